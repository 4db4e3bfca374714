//! Response augmenter: the middleware that makes a [`Responder`] available
//! to every downstream guard and handler.
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use axum::response::Response;
//! use envelope::middleware::{app_response, AppResponse, Responder};
//!
//! async fn get_user(res: Responder) -> Response {
//!     res.ok(serde_json::json!({ "id": 1 }))
//! }
//!
//! let app: Router = Router::new()
//!     .route("/users/1", get(get_user))
//!     .layer(middleware::from_fn_with_state(AppResponse::new("users"), app_response));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::context::RequestContext;
use crate::envelope::{Envelope, EnvelopeBuilder, ErrorInput, StandardEnvelope};
use crate::status::Outcome;
use crate::timer::Timer;

pub const ALREADY_EMITTED_MESSAGE: &str = "Response already emitted for this request";
pub const SERIALIZATION_FAILED_MESSAGE: &str = "Failed to serialize response payload";

/// Install-time configuration of the augmenter: the source label and the
/// envelope builder shared by every request passing through it.
#[derive(Clone)]
pub struct AppResponse {
    source: Arc<str>,
    builder: Arc<dyn EnvelopeBuilder>,
}

impl AppResponse {
    #[must_use]
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
            builder: Arc::new(StandardEnvelope::new()),
        }
    }

    #[must_use]
    pub fn with_builder(mut self, builder: Arc<dyn EnvelopeBuilder>) -> Self {
        self.builder = builder;
        self
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn responder(&self, context: RequestContext) -> Responder {
        Responder {
            context: Arc::new(context),
            source: Arc::clone(&self.source),
            builder: Arc::clone(&self.builder),
            emitted: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl std::fmt::Debug for AppResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppResponse")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Starts the request timer and attaches a [`Responder`] to the request.
///
/// Install with [`axum::middleware::from_fn_with_state`] as the outermost
/// layer so the measured latency covers guards and handlers.
pub async fn app_response(
    State(app): State<AppResponse>,
    mut req: Request,
    next: Next,
) -> Response {
    let timer = Timer::start();
    let context = RequestContext::from_headers(req.headers(), timer);
    req.extensions_mut().insert(app.responder(context));
    next.run(req).await
}

/// Per-request handle exposing the outcome methods.
///
/// Each outcome method consumes the responder and produces the final
/// response. Clones share one emission flag: emitting twice for the same
/// request is a fault and yields a `500` envelope instead.
#[derive(Clone)]
pub struct Responder {
    context: Arc<RequestContext>,
    source: Arc<str>,
    builder: Arc<dyn EnvelopeBuilder>,
    emitted: Arc<AtomicBool>,
}

impl Responder {
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn has_emitted(&self) -> bool {
        self.emitted.load(Ordering::Acquire)
    }

    /// `200` with `payload` as `response`.
    pub fn ok<T: Serialize>(self, payload: T) -> Response {
        self.success(Outcome::Ok, payload)
    }

    /// `201` with `payload` as `response`.
    pub fn created<T: Serialize>(self, payload: T) -> Response {
        self.success(Outcome::Created, payload)
    }

    /// `400`.
    pub fn bad_request(self, error: impl Into<ErrorInput>) -> Response {
        self.error(Outcome::BadRequest, error)
    }

    /// `401`.
    pub fn unauthorized(self, error: impl Into<ErrorInput>) -> Response {
        self.error(Outcome::Unauthorized, error)
    }

    /// `403`.
    pub fn forbidden(self, error: impl Into<ErrorInput>) -> Response {
        self.error(Outcome::Forbidden, error)
    }

    /// `404`.
    pub fn not_found(self, error: impl Into<ErrorInput>) -> Response {
        self.error(Outcome::NotFound, error)
    }

    /// `405`.
    pub fn unsupported_action(self, error: impl Into<ErrorInput>) -> Response {
        self.error(Outcome::UnsupportedAction, error)
    }

    /// `422`.
    pub fn invalid(self, error: impl Into<ErrorInput>) -> Response {
        self.error(Outcome::ValidationFailed, error)
    }

    /// `500`.
    pub fn server_error(self, error: impl Into<ErrorInput>) -> Response {
        self.error(Outcome::ServerError, error)
    }

    /// Emit `payload` under an arbitrary outcome.
    pub fn success<T: Serialize>(self, outcome: Outcome, payload: T) -> Response {
        let elapsed = self.context.elapsed_ms();
        match serde_json::to_value(payload) {
            Ok(value) => {
                let envelope = self
                    .builder
                    .success(&self.context, &self.source, elapsed, value);
                self.emit(outcome, envelope)
            }
            Err(e) => {
                tracing::error!(
                    source = %self.source,
                    error = %e,
                    "failed to serialize response payload"
                );
                self.error(Outcome::ServerError, SERIALIZATION_FAILED_MESSAGE)
            }
        }
    }

    /// Emit an error envelope under an arbitrary outcome. An empty message
    /// list is replaced by the outcome's reason phrase.
    pub fn error(self, outcome: Outcome, error: impl Into<ErrorInput>) -> Response {
        let elapsed = self.context.elapsed_ms();
        let error = error.into();
        let error = if error.is_empty() {
            ErrorInput::Single(outcome.reason().to_string())
        } else {
            error
        };
        let envelope = self
            .builder
            .error(&self.context, &self.source, elapsed, error);
        self.emit(outcome, envelope)
    }

    fn emit(self, outcome: Outcome, envelope: Envelope) -> Response {
        if self.emitted.swap(true, Ordering::AcqRel) {
            tracing::error!(
                source = %self.source,
                transaction_id = ?self.context.transaction_id,
                attempted = outcome.code(),
                "response already emitted for this request"
            );
            let fault = self.builder.error(
                &self.context,
                &self.source,
                envelope.meta.response_time,
                ErrorInput::Single(ALREADY_EMITTED_MESSAGE.to_string()),
            );
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(fault)).into_response();
        }

        tracing::debug!(
            source = %self.source,
            status = outcome.code(),
            response_time_ms = envelope.meta.response_time,
            transaction_id = ?self.context.transaction_id,
            "response emitted"
        );
        (outcome.status(), Json(envelope)).into_response()
    }
}

impl std::fmt::Debug for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("context", &self.context)
            .field("source", &self.source)
            .field("emitted", &self.has_emitted())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("response envelope middleware is not installed for this route")]
pub struct MissingResponder;

impl IntoResponse for MissingResponder {
    fn into_response(self) -> Response {
        tracing::error!("handler requested a Responder but app_response is not installed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

impl<S> FromRequestParts<S> for Responder
where
    S: Send + Sync,
{
    type Rejection = MissingResponder;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or(MissingResponder)
    }
}
