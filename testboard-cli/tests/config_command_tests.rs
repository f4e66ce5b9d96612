//! Integration tests for `testboard config` command.
//!
//! Tests config validation and display functionality with real TOML files.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn testboard(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_testboard"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("should spawn testboard")
}

#[tokio::test]
async fn test_config_validate_valid_toml() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("testboard.toml");

    let valid_config = r#"
[general]
log_level = "info"
log_format = "json"

[report]
reports_dir = "build/reports"
collision_policy = "reject"

[thresholds]
coverage_good = 85.0
"#;

    fs::write(&config_path, valid_config).expect("should write config");

    // When: Loading the config
    let result = testboard_core::config::TestboardConfig::load(&config_path).await;

    // Then: Should succeed
    let config = result.expect("valid config should load");
    assert_eq!(config.report.reports_dir, "build/reports");
    assert_eq!(config.thresholds.coverage_good, 85.0);
}

#[tokio::test]
async fn test_config_validate_malformed_toml() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("bad.toml");

    fs::write(&config_path, "[general\nlog_level = \"info\"\n").expect("should write bad config");

    let result = testboard_core::config::TestboardConfig::load(&config_path).await;

    assert!(result.is_err(), "malformed TOML should fail to load");
}

#[tokio::test]
async fn test_config_empty_file_uses_defaults() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("empty.toml");

    fs::write(&config_path, "").expect("should write empty file");

    let config = testboard_core::config::TestboardConfig::load(&config_path)
        .await
        .expect("empty config should use defaults");
    assert_eq!(config.report.reports_dir, "reports");
    assert_eq!(config.report.collision_policy, "merge");
}

#[test]
fn test_config_validate_command_reports_valid() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(
        temp_dir.path().join("testboard.toml"),
        "[general]\nlog_level = \"warn\"\n",
    )
    .expect("should write config");

    let output = testboard(temp_dir.path(), &["--output", "json", "config", "validate"]);

    assert!(output.status.success(), "valid config should exit 0: {output:?}");
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["valid"].as_bool(), Some(true));
}

#[test]
fn test_config_validate_command_reports_invalid() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(
        temp_dir.path().join("testboard.toml"),
        "[thresholds]\nsuccess_good = 50.0\nsuccess_warning = 70.0\n",
    )
    .expect("should write config");

    let output = testboard(temp_dir.path(), &["--output", "json", "config", "validate"]);

    assert_eq!(output.status.code(), Some(2), "invalid config should exit 2");
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["valid"].as_bool(), Some(false));
    assert!(
        json["errors"][0]
            .as_str()
            .is_some_and(|e| e.contains("success_warning")),
        "error should name the field: {json}"
    );
}

#[test]
fn test_config_validate_without_file_uses_defaults() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = testboard(temp_dir.path(), &["config", "validate"]);

    assert!(output.status.success(), "defaults should be valid: {output:?}");
}

#[test]
fn test_config_show_section() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = testboard(temp_dir.path(), &["config", "show", "--section", "thresholds"]);

    assert!(output.status.success(), "show should succeed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[thresholds]"));
    assert!(stdout.contains("coverage_good"));
    assert!(!stdout.contains("reports_dir"));
}

#[test]
fn test_config_show_unknown_section_fails() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let output = testboard(temp_dir.path(), &["config", "show", "--section", "ebpf"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown section"), "stderr: {stderr}");
}
