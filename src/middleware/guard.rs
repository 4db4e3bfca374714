//! Request guards that reject requests missing required parameters or
//! headers before the handler runs.
//!
//! Install guards with `route_layer` so they run after routing, when path
//! parameters are known:
//!
//! ```rust,no_run
//! use axum::{middleware, routing::post, Router};
//! use envelope::middleware::{
//!     app_response, require_headers, require_params, AppResponse, RequiredHeaders,
//!     RequiredParams,
//! };
//!
//! # async fn create() {}
//! let app: Router = Router::new()
//!     .route("/items/{id}", post(create))
//!     .route_layer(middleware::from_fn_with_state(
//!         RequiredParams::new(["id", "name"]),
//!         require_params,
//!     ))
//!     .route_layer(middleware::from_fn_with_state(
//!         RequiredHeaders::new("x-api-key"),
//!         require_headers,
//!     ))
//!     .layer(middleware::from_fn_with_state(AppResponse::new("items"), app_response));
//! ```

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequestParts, RawPathParams, Request, State};
use axum::http::{Extensions, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use super::fields::{Fields, ParamSources};
use super::respond::{AppResponse, Responder};
use crate::context::RequestContext;
use crate::timer::Timer;

/// Default cap on the body bytes buffered by [`require_params`].
pub const DEFAULT_BODY_LIMIT: usize = 1_048_576;

pub const BODY_UNREADABLE_MESSAGE: &str = "Request body could not be read";

/// One or more declared names, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names(Arc<[String]>);

impl Names {
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for Names {
    fn from(name: &str) -> Self {
        Self(Arc::from([name.to_string()]))
    }
}

impl From<String> for Names {
    fn from(name: String) -> Self {
        Self(Arc::from([name]))
    }
}

impl From<Vec<String>> for Names {
    fn from(names: Vec<String>) -> Self {
        Self(names.into())
    }
}

impl From<Vec<&str>> for Names {
    fn from(names: Vec<&str>) -> Self {
        names.as_slice().into()
    }
}

impl From<&[&str]> for Names {
    fn from(names: &[&str]) -> Self {
        Self(names.iter().map(|n| (*n).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Names {
    fn from(names: [&str; N]) -> Self {
        names.as_slice().into()
    }
}

#[derive(Debug, Clone)]
pub struct RequiredParams {
    names: Names,
    body_limit: usize,
}

impl RequiredParams {
    #[must_use]
    pub fn new(names: impl Into<Names>) -> Self {
        Self {
            names: names.into(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    #[must_use]
    pub const fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        self.names.as_slice()
    }
}

#[derive(Debug, Clone)]
pub struct RequiredHeaders {
    names: Names,
}

impl RequiredHeaders {
    #[must_use]
    pub fn new(names: impl Into<Names>) -> Self {
        Self {
            names: names.into(),
        }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        self.names.as_slice()
    }
}

#[must_use]
pub fn missing_params(names: &[String], sources: &ParamSources) -> Vec<String> {
    names
        .iter()
        .filter(|name| !sources.contains(name))
        .map(|name| format!("Missing required parameter: {name}"))
        .collect()
}

/// Header names are matched case-insensitively; an unparseable name is
/// never present.
#[must_use]
pub fn missing_headers(names: &[String], headers: &HeaderMap) -> Vec<String> {
    names
        .iter()
        .filter(|name| !headers.contains_key(name.as_str()))
        .map(|name| format!("Missing required header parameter: {name}"))
        .collect()
}

/// Rejects with `400` unless every required name is in the body, the path
/// parameters, or the query string. The buffered body is passed on intact.
pub async fn require_params(
    State(required): State<RequiredParams>,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();
    let responder = responder_for(&parts.extensions, &parts.headers);

    let bytes = match axum::body::to_bytes(body, required.body_limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(
                source = %responder.source(),
                limit = required.body_limit,
                error = %e,
                "failed to buffer request body"
            );
            return responder.bad_request(BODY_UNREADABLE_MESSAGE);
        }
    };

    let path = RawPathParams::from_request_parts(&mut parts, &())
        .await
        .map(|params| Fields::from_path(&params))
        .unwrap_or_default();

    let sources = ParamSources {
        body: Fields::from_body(&parts.headers, &bytes),
        path,
        query: Fields::from_query(parts.uri.query()),
    };

    let missing = missing_params(required.names(), &sources);
    if !missing.is_empty() {
        tracing::debug!(
            source = %responder.source(),
            missing = missing.len(),
            "required parameters missing"
        );
        return responder.bad_request(missing);
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Rejects with `400` unless every required header is present.
pub async fn require_headers(
    State(required): State<RequiredHeaders>,
    req: Request,
    next: Next,
) -> Response {
    let missing = missing_headers(required.names(), req.headers());
    if missing.is_empty() {
        return next.run(req).await;
    }

    let responder = responder_for(req.extensions(), req.headers());
    tracing::debug!(
        source = %responder.source(),
        missing = missing.len(),
        "required headers missing"
    );
    responder.bad_request(missing)
}

fn responder_for(extensions: &Extensions, headers: &HeaderMap) -> Responder {
    extensions.get::<Responder>().cloned().unwrap_or_else(|| {
        tracing::warn!("guard running without app_response, using an unlabelled responder");
        AppResponse::new("").responder(RequestContext::from_headers(headers, Timer::start()))
    })
}
