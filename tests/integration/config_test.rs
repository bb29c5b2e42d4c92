use nagkit::core::config::{Config, ThresholdConfig};
use nagkit::core::Bounds;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.verbose);
    assert!(config.state_dir.is_none());
    assert!(config.thresholds.is_empty());
}

#[test]
fn test_config_load_nonexistent_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("missing.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_load_empty_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "  \n").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let mut config = Config {
        verbose: true,
        state_dir: Some(PathBuf::from("/var/lib/nagkit")),
        ..Default::default()
    };
    config.set_thresholds(
        "memory",
        ThresholdConfig {
            warning: Some("80".to_string()),
            critical: Some("90".to_string()),
        },
    );

    config.save_to(&path).unwrap();
    let loaded = Config::load_from(&path).unwrap();

    assert_eq!(loaded, config);
    let (warning, critical) = loaded.thresholds_for("memory").unwrap().bounds().unwrap();
    assert_eq!(warning, Some(Bounds::between(0.0, 80.0)));
    assert_eq!(critical, Some(Bounds::between(0.0, 90.0)));
}

#[test]
fn test_config_partial_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{ "thresholds": { "load": { "critical": "@10:" } } }"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(!config.verbose);
    let thresholds = config.thresholds_for("load").unwrap();
    assert_eq!(thresholds.warning, None);
    let (_, critical) = thresholds.bounds().unwrap();
    assert_eq!(critical.unwrap().to_range_text(), "@10:");
}

#[test]
fn test_config_invalid_json_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ verbose: yes").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}
