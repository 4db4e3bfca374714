//! Serde data structures for the envelope service configuration file.
//!
//! All fields are optional in the file; missing ones take the defaults
//! below. Unknown fields are rejected.

use serde::{Deserialize, Serialize};

use crate::envelope::DEFAULT_LANGUAGE;
use crate::middleware::guard::DEFAULT_BODY_LIMIT;

fn default_source() -> String {
    "api".to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

const fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Source label stamped into every envelope's `meta.source`.
    #[serde(default = "default_source")]
    pub source: String,

    /// Reported in `meta.x-request-or-lang` when the header is absent.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Max body bytes buffered by the parameter guard.
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: default_source(),
            default_language: default_language(),
            body_limit: default_body_limit(),
        }
    }
}
