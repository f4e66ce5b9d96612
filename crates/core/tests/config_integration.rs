//! testboard.toml 통합 설정 테스트
//!
//! - testboard.toml.example 파싱 테스트
//! - 파일 로딩 + 환경변수 우선순위 테스트
//! - 잘못된 형식 에러 테스트

use testboard_core::config::TestboardConfig;
use testboard_core::error::{ConfigError, TestboardError};

// =============================================================================
// testboard.toml.example 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let content = include_str!("../../../testboard.toml.example");
    let config = TestboardConfig::parse(content).expect("example config should parse");

    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.general.log_format, "pretty");
    assert_eq!(config.report.reports_dir, "reports");
    assert_eq!(config.report.suite_prefixes, vec!["junit-", "TEST-"]);
    assert_eq!(config.report.max_file_size, 52_428_800);
}

#[test]
fn example_config_passes_validation() {
    let content = include_str!("../../../testboard.toml.example");
    let config = TestboardConfig::parse(content).expect("should parse");
    config
        .validate()
        .expect("example config should pass validation");
}

#[test]
fn example_config_matches_defaults() {
    let content = include_str!("../../../testboard.toml.example");
    let config = TestboardConfig::parse(content).expect("should parse");
    let defaults = TestboardConfig::default();

    assert_eq!(config.report.results_dir, defaults.report.results_dir);
    assert_eq!(config.report.coverage_file, defaults.report.coverage_file);
    assert_eq!(config.report.summary_file, defaults.report.summary_file);
    assert_eq!(config.thresholds.success_good, defaults.thresholds.success_good);
    assert_eq!(
        config.thresholds.coverage_warning,
        defaults.thresholds.coverage_warning
    );
}

// =============================================================================
// 파일 로딩 테스트
// =============================================================================

#[tokio::test]
#[serial_test::serial]
async fn load_reads_file_and_validates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("testboard.toml");
    std::fs::write(
        &path,
        "[report]\nreports_dir = \"build/reports\"\n[thresholds]\nsuccess_good = 95.0\n",
    )
    .expect("write config");

    let config = TestboardConfig::load(&path).await.expect("should load");
    assert_eq!(config.report.reports_dir, "build/reports");
    assert_eq!(config.thresholds.success_good, 95.0);
}

#[tokio::test]
#[serial_test::serial]
async fn load_rejects_invalid_values() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("testboard.toml");
    std::fs::write(&path, "[report]\ncollision_policy = \"overwrite\"\n").expect("write config");

    let err = TestboardConfig::load(&path).await.unwrap_err();
    assert!(matches!(
        err,
        TestboardError::Config(ConfigError::InvalidValue { .. })
    ));
}

// =============================================================================
// 환경변수 우선순위 테스트
// =============================================================================

#[test]
#[serial_test::serial]
fn env_override_takes_precedence_over_toml() {
    let toml = r#"
[report]
reports_dir = "from-file"
"#;

    let original = std::env::var("TESTBOARD_REPORT_REPORTS_DIR").ok();
    // SAFETY: 테스트는 serial로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("TESTBOARD_REPORT_REPORTS_DIR", "from-env");
    }

    let mut config = TestboardConfig::parse(toml).expect("should parse");
    config.apply_env_overrides();
    let result = config.report.reports_dir.clone();

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var("TESTBOARD_REPORT_REPORTS_DIR", val),
            None => std::env::remove_var("TESTBOARD_REPORT_REPORTS_DIR"),
        }
    }

    assert_eq!(result, "from-env");
}

#[test]
#[serial_test::serial]
fn env_override_threshold_values() {
    let original = std::env::var("TESTBOARD_THRESHOLDS_COVERAGE_GOOD").ok();
    // SAFETY: 테스트는 serial로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("TESTBOARD_THRESHOLDS_COVERAGE_GOOD", "75.5");
    }

    let result = TestboardConfig::from_env().map(|c| c.thresholds.coverage_good);

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var("TESTBOARD_THRESHOLDS_COVERAGE_GOOD", val),
            None => std::env::remove_var("TESTBOARD_THRESHOLDS_COVERAGE_GOOD"),
        }
    }

    assert_eq!(result.expect("env config should validate"), 75.5);
}

#[test]
#[serial_test::serial]
fn env_override_csv_for_suite_prefixes() {
    let original = std::env::var("TESTBOARD_REPORT_SUITE_PREFIXES").ok();
    // SAFETY: 테스트는 serial로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("TESTBOARD_REPORT_SUITE_PREFIXES", "results-, junit-");
    }

    let mut config = TestboardConfig::parse("").expect("should parse");
    config.apply_env_overrides();
    let result = config.report.suite_prefixes.clone();

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var("TESTBOARD_REPORT_SUITE_PREFIXES", val),
            None => std::env::remove_var("TESTBOARD_REPORT_SUITE_PREFIXES"),
        }
    }

    assert_eq!(result, vec!["results-", "junit-"]);
}

#[test]
fn serialize_and_reparse_roundtrip() {
    let mut original = TestboardConfig::default();
    original.report.collision_policy = "reject".to_owned();
    original.thresholds.success_warning = 65.0;

    let toml_str = toml::to_string_pretty(&original).expect("should serialize");
    let parsed = TestboardConfig::parse(&toml_str).expect("should reparse");

    assert_eq!(parsed.report.collision_policy, "reject");
    assert_eq!(parsed.thresholds.success_warning, 65.0);
    parsed.validate().expect("roundtrip config should be valid");
}
