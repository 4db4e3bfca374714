//! Unified error types for the envelope service.
//!
//! Defines [`EnvelopeError`] (infrastructure failures: config loading,
//! binding, I/O) and [`ValidationError`] for config validation failures.
//! Application-level failures are never errors here: they are emitted as
//! envelopes through a [`Responder`](crate::middleware::Responder).

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  {}: {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EnvelopeError {
    #[error("Config file not found: {}", path.display())]
    ConfigFileNotFound { path: PathBuf },

    #[error("Config parse error in {path}:\n  {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config validation failed:\n{}", format_errors(.errors))]
    ConfigValidation { errors: Vec<ValidationError> },

    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_renders_suggestion() {
        let error = ValidationError {
            field: "source".into(),
            message: "cannot be empty".into(),
            suggestion: Some("set a component name".into()),
        };
        assert_eq!(
            error.to_string(),
            "  source: cannot be empty (set a component name)"
        );
    }

    #[test]
    fn config_validation_lists_every_error() {
        let error = EnvelopeError::ConfigValidation {
            errors: vec![
                ValidationError {
                    field: "a".into(),
                    message: "x".into(),
                    suggestion: None,
                },
                ValidationError {
                    field: "b".into(),
                    message: "y".into(),
                    suggestion: None,
                },
            ],
        };
        assert_eq!(
            error.to_string(),
            "Config validation failed:\n  a: x\n  b: y"
        );
    }
}
