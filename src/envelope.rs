//! The standard response envelope and the functions that build it.
//!
//! Every response carries a [`Meta`] block plus exactly one [`Body`]:
//!
//! ```json
//! {
//!   "meta": {
//!     "x-trans-id": "abc",
//!     "x-trans-parent-id": null,
//!     "x-request-or-lang": "en",
//!     "source": "users",
//!     "response-time": 0.42
//!   },
//!   "response": { "id": 1 }
//! }
//! ```
//!
//! Error outcomes replace `response` with a non-empty `exception` array.
//! [`Body`] is a sum type, so an envelope with both or neither cannot be
//! constructed.
//!
//! The free functions ([`build_meta`], [`build_success`], [`build_error`])
//! use the default language `"en"`. The [`EnvelopeBuilder`] trait exposes
//! the same operations with an overridable default and is what the
//! middleware holds.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::RequestContext;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Used when an error outcome is emitted with an empty message list.
pub const FALLBACK_ERROR_MESSAGE: &str = "Unspecified error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(rename = "x-trans-id")]
    pub transaction_id: Option<String>,

    #[serde(rename = "x-trans-parent-id")]
    pub parent_transaction_id: Option<String>,

    #[serde(rename = "x-request-or-lang")]
    pub language: String,

    pub source: String,

    #[serde(rename = "response-time")]
    pub response_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Response(Value),
    Exception(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub meta: Meta,
    #[serde(flatten)]
    pub body: Body,
}

impl Envelope {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.body, Body::Exception(_))
    }

    #[must_use]
    pub fn exception(&self) -> Option<&[String]> {
        match &self.body {
            Body::Response(_) => None,
            Body::Exception(messages) => Some(messages),
        }
    }
}

/// Error messages supplied by a caller: one message or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorInput {
    Single(String),
    Many(Vec<String>),
}

impl ErrorInput {
    /// Normalize into a message sequence. An empty list becomes `[fallback]`.
    #[must_use]
    pub fn into_messages(self, fallback: &str) -> Vec<String> {
        match self {
            Self::Single(message) => vec![message],
            Self::Many(messages) if messages.is_empty() => vec![fallback.to_string()],
            Self::Many(messages) => messages,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Many(m) if m.is_empty())
    }
}

impl From<&str> for ErrorInput {
    fn from(message: &str) -> Self {
        Self::Single(message.to_string())
    }
}

impl From<String> for ErrorInput {
    fn from(message: String) -> Self {
        Self::Single(message)
    }
}

impl From<Vec<String>> for ErrorInput {
    fn from(messages: Vec<String>) -> Self {
        Self::Many(messages)
    }
}

impl From<Vec<&str>> for ErrorInput {
    fn from(messages: Vec<&str>) -> Self {
        Self::Many(messages.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ErrorInput {
    fn from(messages: [&str; N]) -> Self {
        Self::Many(messages.iter().map(|m| (*m).to_string()).collect())
    }
}

/// Envelope construction. Implementations must be pure.
pub trait EnvelopeBuilder: Send + Sync {
    /// Language reported when `x-request-or-lang` is missing or empty.
    fn default_language(&self) -> &str {
        DEFAULT_LANGUAGE
    }

    fn meta(&self, context: &RequestContext, source: &str, elapsed_ms: f64) -> Meta {
        Meta {
            transaction_id: context.transaction_id.clone(),
            parent_transaction_id: context.parent_transaction_id.clone(),
            language: context
                .language
                .clone()
                .filter(|language| !language.is_empty())
                .unwrap_or_else(|| self.default_language().to_string()),
            source: source.to_string(),
            response_time: elapsed_ms,
        }
    }

    fn success(
        &self,
        context: &RequestContext,
        source: &str,
        elapsed_ms: f64,
        payload: Value,
    ) -> Envelope {
        Envelope {
            meta: self.meta(context, source, elapsed_ms),
            body: Body::Response(payload),
        }
    }

    fn error(
        &self,
        context: &RequestContext,
        source: &str,
        elapsed_ms: f64,
        error: ErrorInput,
    ) -> Envelope {
        Envelope {
            meta: self.meta(context, source, elapsed_ms),
            body: Body::Exception(error.into_messages(FALLBACK_ERROR_MESSAGE)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardEnvelope {
    default_language: String,
}

impl StandardEnvelope {
    #[must_use]
    pub fn new() -> Self {
        Self::with_default_language(DEFAULT_LANGUAGE)
    }

    #[must_use]
    pub fn with_default_language(language: impl Into<String>) -> Self {
        Self {
            default_language: language.into(),
        }
    }
}

impl Default for StandardEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvelopeBuilder for StandardEnvelope {
    fn default_language(&self) -> &str {
        &self.default_language
    }
}

#[must_use]
pub fn build_meta(context: &RequestContext, source: &str, elapsed_ms: f64) -> Meta {
    StandardEnvelope::new().meta(context, source, elapsed_ms)
}

#[must_use]
pub fn build_success(
    context: &RequestContext,
    source: &str,
    elapsed_ms: f64,
    payload: Value,
) -> Envelope {
    StandardEnvelope::new().success(context, source, elapsed_ms, payload)
}

#[must_use]
pub fn build_error(
    context: &RequestContext,
    source: &str,
    elapsed_ms: f64,
    error: ErrorInput,
) -> Envelope {
    StandardEnvelope::new().error(context, source, elapsed_ms, error)
}
