//! Tower/axum middleware for response envelopes and request guards.
//!
//! - [`respond`] -- the response augmenter ([`app_response`]) and the
//!   per-request [`Responder`] handlers use to emit outcomes.
//! - [`guard`] -- [`require_params`] and [`require_headers`], which short-circuit
//!   to `400` when declared names are missing.
//! - [`fields`] -- key/value views over body, path, and query parameters.

pub mod fields;
pub mod guard;
pub mod respond;

pub use guard::{
    missing_headers, missing_params, require_headers, require_params, Names, RequiredHeaders,
    RequiredParams,
};
pub use respond::{app_response, AppResponse, MissingResponder, Responder};
