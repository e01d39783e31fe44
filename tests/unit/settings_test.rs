//! Tests for loading and saving `TabSettings` from JSON files.

use std::fs;

use tabstate::types::errors::SettingsError;
use tabstate::types::settings::{TabSettings, DEFAULT_NEW_TAB_URL};
use tempfile::TempDir;

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let settings = TabSettings::load_from(&dir.path().join("tabs.json")).unwrap();
    assert_eq!(settings, TabSettings::default());
    assert_eq!(settings.default_url, DEFAULT_NEW_TAB_URL);
}

#[test]
fn test_save_then_load_returns_same_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("tabs.json");
    let settings = TabSettings {
        default_url: "about:blank".to_string(),
        log_filter: "debug".to_string(),
    };

    settings.save_to(&path).unwrap();

    assert_eq!(TabSettings::load_from(&path).unwrap(), settings);
}

/// Fields missing from the file fall back to their defaults.
#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tabs.json");
    fs::write(&path, r#"{"log_filter": "tabstate=debug"}"#).unwrap();

    let settings = TabSettings::load_from(&path).unwrap();

    assert_eq!(settings.log_filter, "tabstate=debug");
    assert_eq!(settings.default_url, DEFAULT_NEW_TAB_URL);
}

#[test]
fn test_malformed_file_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tabs.json");
    fs::write(&path, "{ not json").unwrap();

    let err = TabSettings::load_from(&path).unwrap_err();

    assert!(matches!(err, SettingsError::SerializationError(_)), "got {err:?}");
}
