//! Integration tests for config loading and validation.

use std::path::Path;

use envelope::config::model::Config;
use envelope::config::parse_config_str;
use envelope::config::validation::validate;
use envelope::error::EnvelopeError;

#[cfg(feature = "yaml")]
#[test]
fn yaml_example_loads_and_validates() {
    let content = std::fs::read_to_string("envelope.yaml").unwrap();
    let config = parse_config_str("yaml", &content, "envelope.yaml").unwrap();
    validate(&config).unwrap();
    assert_eq!(config.source, "items");
    assert_eq!(config.default_language, "en");
}

#[cfg(feature = "json")]
#[test]
fn json_config_parses() {
    let config = parse_config_str("json", r#"{"source": "orders"}"#, "inline.json").unwrap();
    assert_eq!(config.source, "orders");
    assert_eq!(config.default_language, "en");
}

#[cfg(feature = "toml")]
#[test]
fn toml_config_parses() {
    let config = parse_config_str("toml", "source = \"orders\"\nbody_limit = 10", "inline.toml")
        .unwrap();
    assert_eq!(config.body_limit, 10);
}

#[test]
fn unsupported_format_returns_error() {
    let result = parse_config_str("xml", "{}", "test.xml");
    assert!(matches!(result, Err(EnvelopeError::UnsupportedFormat(ext)) if ext == "xml"));
}

#[test]
fn invalid_config_fails_validation() {
    let config: Config = serde_json::from_str(r#"{"source": "", "body_limit": 0}"#).unwrap();
    let errors = validate(&config).unwrap_err();
    assert_eq!(errors.len(), 2);
}

#[tokio::test]
async fn load_reports_missing_file() {
    let result = envelope::config::load(Path::new("does-not-exist.yaml")).await;
    assert!(matches!(result, Err(EnvelopeError::ConfigFileNotFound { .. })));
}

#[cfg(feature = "yaml")]
#[tokio::test]
async fn load_validates_file() {
    let config = envelope::config::load(Path::new("envelope.yaml")).await.unwrap();
    assert_eq!(config, Config {
        source: "items".into(),
        ..Config::default()
    });
}
