use browser_junit::config::{Config, JunitConfig};
use browser_junit::report::SchemaVariant;
use std::path::PathBuf;

#[test]
fn test_default_config_values() {
    let config = Config::default();

    assert!(config.base_path.is_none());
    assert_eq!(config.junit.output_dir, PathBuf::from("."));
    assert!(config.junit.use_browser_name);
    assert!(config.junit.suite.is_none());
    assert!(config.junit.output_file.is_none());
    assert!(config.junit.properties.is_empty());
    assert_eq!(config.junit.schema_variant().ok(), Some(SchemaVariant::Legacy));
}

#[test]
fn test_resolved_base_path_prefers_configured_value() {
    let config = Config {
        base_path: Some(PathBuf::from("/srv/app")),
        junit: JunitConfig::default(),
    };
    assert_eq!(config.resolved_base_path(), PathBuf::from("/srv/app"));

    let fallback = Config::default().resolved_base_path();
    assert!(!fallback.as_os_str().is_empty());
}

#[test]
fn test_relative_base_path_is_made_absolute() {
    let config = Config {
        base_path: Some(PathBuf::from("web/app")),
        junit: JunitConfig::default(),
    };

    let resolved = config.resolved_base_path();
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("web/app"));
    let cwd = std::env::current_dir().expect("working directory");
    assert_eq!(resolved, cwd.join("web/app"));
}

#[test]
fn test_config_file_on_disk() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(".browser-junitrc.toml");
    std::fs::write(&path, "[junit]\nsuite = \"myapp\"\nxml_version = 1\n").expect("setup");

    let config = Config::read(&path).expect("valid config");
    assert_eq!(config.junit.suite.as_deref(), Some("myapp"));
    assert_eq!(config.junit.schema_variant().ok(), Some(SchemaVariant::Compact));

    std::fs::write(&path, "[junit\nbroken").expect("setup");
    assert!(Config::read(&path).is_err());
    assert!(Config::load_from_file(&path).is_none());
}
