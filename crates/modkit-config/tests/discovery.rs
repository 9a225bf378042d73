//! Tests for config file discovery.

use modkit_config::discovery::ConfigSource;
use modkit_config::{ConfigDiscovery, ConfigError};
use std::fs;
use tempfile::TempDir;

#[test]
fn finds_nothing_in_empty_dir() {
    let dir = TempDir::new().unwrap();
    assert!(ConfigDiscovery::new(dir.path()).find().unwrap().is_none());
}

#[test]
fn discovers_modkit_toml() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("modkit.toml"), "module-dir = \"src\"\n").unwrap();

    let found = ConfigDiscovery::new(dir.path()).find().unwrap().unwrap();
    assert!(matches!(found, ConfigSource::Toml(_)));
    assert_eq!(found.path().file_name().unwrap(), "modkit.toml");
}

#[test]
fn discovers_package_json_field() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{ "name": "pkg", "modkit": { "build-dir": "dist" } }"#,
    )
    .unwrap();

    match ConfigDiscovery::new(dir.path()).find().unwrap() {
        Some(ConfigSource::PackageJson { value, .. }) => {
            assert_eq!(value["build-dir"], "dist");
        }
        other => panic!("expected package.json source, got {:?}", other),
    }
}

#[test]
fn package_json_without_field_is_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), r#"{ "name": "pkg" }"#).unwrap();
    assert!(ConfigDiscovery::new(dir.path()).find().unwrap().is_none());

    fs::write(
        dir.path().join("package.json"),
        r#"{ "name": "pkg", "modkit": null }"#,
    )
    .unwrap();
    assert!(ConfigDiscovery::new(dir.path()).find().unwrap().is_none());
}

#[test]
fn package_json_field_must_be_object() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{ "modkit": "modules" }"#,
    )
    .unwrap();

    let err = ConfigDiscovery::new(dir.path()).find().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn malformed_package_json_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), "{ not json").unwrap();

    let err = ConfigDiscovery::new(dir.path()).find().unwrap_err();
    assert!(matches!(err, ConfigError::Json { .. }));
}

#[test]
fn toml_takes_precedence_over_package_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("modkit.toml"), "").unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{ "modkit": { "build-dir": "dist" } }"#,
    )
    .unwrap();

    let found = ConfigDiscovery::new(dir.path()).find().unwrap().unwrap();
    assert!(matches!(found, ConfigSource::Toml(_)));
}

#[test]
fn explicit_path_must_exist() {
    let dir = TempDir::new().unwrap();
    let err = ConfigDiscovery::explicit(dir.path().join("custom.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn explicit_path_rejects_unknown_formats() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("modkit.yaml");
    fs::write(&path, "module-dir: src").unwrap();

    let err = ConfigDiscovery::explicit(&path).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn explicit_package_json_reads_field_even_next_to_toml() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("modkit.toml"), "").unwrap();
    let pkg = dir.path().join("package.json");
    fs::write(&pkg, r#"{ "modkit": { "module-entry": "index.js" } }"#).unwrap();

    let source = ConfigDiscovery::explicit(&pkg).unwrap();
    assert!(matches!(source, ConfigSource::PackageJson { .. }));
}
