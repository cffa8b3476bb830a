//! Tests for configuration precedence order: defaults < file < environment

use bonekit_config::{ConfigProvider, DEFAULT_QUERY_LIMIT};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

fn write_yaml(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("bonekit.yaml");
    fs::write(
        &path,
        r#"
debug:
  trace: false
module_conf:
  max_depth: 6
  admin_info:
    icon: settings
    name: Modules
"#,
    )
    .unwrap();
    path
}

#[test]
#[serial]
fn test_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_yaml(&temp_dir);

    let config = ConfigProvider::with_file(&path).load().unwrap();

    assert_eq!(config.module_conf.max_depth, 6);
    assert_eq!(config.module_conf.query_limit, DEFAULT_QUERY_LIMIT);
    let admin_info = config.admin_info();
    assert_eq!(admin_info.get("icon").and_then(|v| v.as_str()), Some("settings"));
    assert_eq!(admin_info.get("name").and_then(|v| v.as_str()), Some("Modules"));
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_yaml(&temp_dir);

    std::env::set_var("BONEKIT_MODULE_CONF__MAX_DEPTH", "3");
    std::env::set_var("BONEKIT_DEBUG__TRACE", "true");

    let result = ConfigProvider::with_file(&path).load();

    std::env::remove_var("BONEKIT_MODULE_CONF__MAX_DEPTH");
    std::env::remove_var("BONEKIT_DEBUG__TRACE");

    let config = result.unwrap();
    assert_eq!(config.module_conf.max_depth, 3);
    assert!(config.debug.trace);
    // File-only values survive the environment merge
    assert!(config.admin_info().contains_key("icon"));
}

#[test]
#[serial]
fn test_environment_value_is_validated() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_yaml(&temp_dir);

    std::env::set_var("BONEKIT_MODULE_CONF__MAX_DEPTH", "0");
    let result = ConfigProvider::with_file(&path).load();
    std::env::remove_var("BONEKIT_MODULE_CONF__MAX_DEPTH");

    assert!(result.is_err());
}
