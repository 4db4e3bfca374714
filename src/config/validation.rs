//! Configuration validation with detailed error reporting.

use super::model::Config;
use crate::error::ValidationError;

/// Validate a language tag: ASCII alphanumerics separated by `-`.
pub fn validate_language(tag: &str) -> Result<(), String> {
    if tag.is_empty() {
        return Err("language cannot be empty".into());
    }
    let well_formed = tag
        .split('-')
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));
    if well_formed {
        Ok(())
    } else {
        Err(format!("'{tag}' is not a valid language tag"))
    }
}

pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.source.trim().is_empty() {
        errors.push(ValidationError {
            field: "source".into(),
            message: "source label cannot be empty".into(),
            suggestion: Some("name the component emitting responses, e.g. 'users'".into()),
        });
    }

    if let Err(message) = validate_language(&config.default_language) {
        errors.push(ValidationError {
            field: "default_language".into(),
            message,
            suggestion: Some("use a tag such as 'en' or 'en-GB'".into()),
        });
    }

    if config.body_limit == 0 {
        errors.push(ValidationError {
            field: "body_limit".into(),
            message: "body limit must be greater than zero".into(),
            suggestion: None,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[must_use]
pub fn format_validation_report(path: &str, config: &Config) -> String {
    format!(
        "{path} is valid (source '{}', default language '{}', body limit {} bytes)",
        config.source, config.default_language, config.body_limit
    )
}
