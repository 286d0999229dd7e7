use crate::config::CoreConfig;
use crate::error::ConfigError;

use std::fs;

use tempfile::tempdir;

/// **VALUE**: A missing config file yields defaults rather than an error.
///
/// **WHY THIS MATTERS**: First launch has no config; failing there would stop
/// the app from ever starting.
#[test]
fn given_missing_config_file_when_loaded_then_returns_defaults() {
    let dir = tempdir().unwrap();

    let config = CoreConfig::load(dir.path()).unwrap();

    assert_eq!(config, CoreConfig::default());
}

#[test]
fn given_saved_config_when_loaded_then_matches() {
    let dir = tempdir().unwrap();
    let config = CoreConfig {
        first_name: "Grace".to_string(),
        event_capacity: 8,
        ..CoreConfig::default()
    };

    config.save(dir.path()).unwrap();
    let loaded = CoreConfig::load(dir.path()).unwrap();

    assert_eq!(loaded, config);
    assert!(
        !dir.path().join("config.json.tmp").exists(),
        "Temp file should be renamed away"
    );
}

#[test]
fn given_partial_config_when_loaded_then_missing_fields_use_defaults() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.json"), r#"{ "first_name": "Linus" }"#).unwrap();

    let config = CoreConfig::load(dir.path()).unwrap();

    assert_eq!(config.first_name, "Linus");
    assert_eq!(config.event_capacity, CoreConfig::default().event_capacity);
    assert_eq!(config.request_capacity, CoreConfig::default().request_capacity);
}

#[test]
fn given_corrupt_config_when_loaded_then_parse_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.json"), "{ not json").unwrap();

    let result = CoreConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

/// **BUG THIS CATCHES**: A zero capacity makes `tokio::sync::broadcast::channel`
/// panic at engine construction; validation must stop it first.
#[test]
fn given_zero_event_capacity_when_validated_then_rejected() {
    let config = CoreConfig {
        event_capacity: 0,
        ..CoreConfig::default()
    };

    let result = config.validate();

    match result {
        Err(ConfigError::ValidationError { reason, .. }) => {
            assert!(reason.contains("event_capacity"))
        }
        other => panic!("Expected ValidationError, got {other:?}"),
    }
}

#[test]
fn given_invalid_config_when_saved_then_nothing_written() {
    let dir = tempdir().unwrap();
    let config = CoreConfig {
        version: 7,
        ..CoreConfig::default()
    };

    let result = config.save(dir.path());

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    assert!(!dir.path().join("config.json").exists());
}
