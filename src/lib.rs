//! Envelope standardizes every HTTP response of an axum service.
//!
//! Each response is wrapped in a uniform envelope carrying request
//! correlation metadata and the measured latency, plus either a success
//! payload (`response`) or a non-empty list of error messages
//! (`exception`). Declarative guards reject requests that lack required
//! parameters or headers before handler logic runs.
//!
//! # Architecture
//!
//! - [`status`] -- The fixed [`Outcome`](status::Outcome) to status-code table.
//! - [`envelope`] -- Envelope data model and the pure builder functions.
//! - [`timer`] -- Monotonic per-request latency measurement.
//! - [`context`] -- Request-scoped correlation identifiers.
//! - [`middleware`] -- The response augmenter, the per-request
//!   [`Responder`](middleware::Responder), and the parameter/header guards.
//! - [`config`] -- Optional config file loading and validation.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`server`], [`health`], [`items`] -- The demo service wired with the layer.
//! - [`cli`], [`cmd`] -- Command-line parsing and subcommand execution.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support |
//! | `toml` | TOML config file support |
//! | `file-backends` | All file format backends |
//! | `full` | All features |

#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod context;
pub mod envelope;
pub mod error;
pub mod health;
pub mod items;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod status;
pub mod timer;

pub use context::RequestContext;
pub use envelope::{Body, Envelope, EnvelopeBuilder, ErrorInput, Meta, StandardEnvelope};
pub use status::Outcome;
pub use timer::Timer;
