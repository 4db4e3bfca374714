//! Configuration loading and validation.
//!
//! A config file is optional: without one the service runs on
//! [`Config::default`](model::Config). The file format is picked from the
//! extension and gated by feature flags (`yaml` by default, `json`, `toml`).

pub mod model;
pub mod validation;

use std::path::Path;

use crate::error::EnvelopeError;
use model::Config;

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<Config, EnvelopeError> {
    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| EnvelopeError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(|e| EnvelopeError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| EnvelopeError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        other => Err(EnvelopeError::UnsupportedFormat(other.to_string())),
    }
}

/// Read, parse, and validate a config file.
pub async fn load(path: &Path) -> Result<Config, EnvelopeError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EnvelopeError::ConfigFileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EnvelopeError::Io(e)
        }
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let config = parse_config_str(ext, &content, &path.display().to_string())?;

    validation::validate(&config).map_err(|errors| EnvelopeError::ConfigValidation { errors })?;
    Ok(config)
}
