//! Semantic response outcomes and their fixed HTTP status codes.
//!
//! [`Outcome`] is the only place status codes are chosen. Every envelope
//! emitted by a [`Responder`](crate::middleware::Responder) goes through
//! this table.

use axum::http::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Ok,
    Created,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    UnsupportedAction,
    ValidationFailed,
    ServerError,
}

impl Outcome {
    pub const ALL: [Self; 9] = [
        Self::Ok,
        Self::Created,
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::UnsupportedAction,
        Self::ValidationFailed,
        Self::ServerError,
    ];

    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::UnsupportedAction => 405,
            Self::ValidationFailed => 422,
            Self::ServerError => 500,
        }
    }

    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::Ok => StatusCode::OK,
            Self::Created => StatusCode::CREATED,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::UnsupportedAction => StatusCode::METHOD_NOT_ALLOWED,
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Canonical reason phrase, used as the fallback error message.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Created => "Created",
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::UnsupportedAction => "Method Not Allowed",
            Self::ValidationFailed => "Unprocessable Entity",
            Self::ServerError => "Internal Server Error",
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Ok | Self::Created)
    }
}

impl From<Outcome> for u16 {
    fn from(outcome: Outcome) -> Self {
        outcome.code()
    }
}

impl From<Outcome> for StatusCode {
    fn from(outcome: Outcome) -> Self {
        outcome.status()
    }
}
