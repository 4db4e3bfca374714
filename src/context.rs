//! Request-scoped correlation metadata.
//!
//! A [`RequestContext`] is built once per request by the response
//! augmenter and travels with that request only. It never crosses
//! request boundaries.

use axum::http::HeaderMap;

use crate::timer::Timer;

pub const TRANS_ID_HEADER: &str = "x-trans-id";
pub const TRANS_PARENT_ID_HEADER: &str = "x-trans-parent-id";
pub const LANGUAGE_HEADER: &str = "x-request-or-lang";

#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub transaction_id: Option<String>,
    pub parent_transaction_id: Option<String>,
    pub language: Option<String>,
    pub timer: Timer,
}

impl RequestContext {
    /// Read correlation headers. Missing headers are `None`; non-ASCII
    /// values are decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap, timer: Timer) -> Self {
        Self {
            transaction_id: header_string(headers, TRANS_ID_HEADER),
            parent_transaction_id: header_string(headers, TRANS_PARENT_ID_HEADER),
            language: header_string(headers, LANGUAGE_HEADER),
            timer,
        }
    }

    /// Context with no correlation identifiers and a freshly started timer.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            transaction_id: None,
            parent_transaction_id: None,
            language: None,
            timer: Timer::start(),
        }
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.timer.elapsed_ms()
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}
