//! 설정 관리 -- testboard.toml 파싱 및 런타임 설정
//!
//! [`TestboardConfig`]는 모든 섹션의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`TESTBOARD_REPORT_REPORTS_DIR=out` 형식)
//! 3. 설정 파일 (`testboard.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), testboard_core::error::TestboardError> {
//! use testboard_core::config::TestboardConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = TestboardConfig::load("testboard.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = TestboardConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, TestboardError};

/// 허용되는 스위트 이름 충돌 정책
pub const COLLISION_POLICIES: [&str; 2] = ["merge", "reject"];

/// Testboard 통합 설정
///
/// `testboard.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestboardConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 리포트 입출력 설정
    #[serde(default)]
    pub report: ReportConfig,
    /// 상태 색상 임계값
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

impl TestboardConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, TestboardError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일 없이 기본값에 환경변수 오버라이드만 적용합니다.
    pub fn from_env() -> Result<Self, TestboardError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, TestboardError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TestboardError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                TestboardError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, TestboardError> {
        toml::from_str(toml_str).map_err(|e| {
            TestboardError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `TESTBOARD_{SECTION}_{FIELD}`
    /// 예: `TESTBOARD_THRESHOLDS_COVERAGE_GOOD=85`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "TESTBOARD_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "TESTBOARD_GENERAL_LOG_FORMAT");

        // Report
        override_string(&mut self.report.reports_dir, "TESTBOARD_REPORT_REPORTS_DIR");
        override_string(&mut self.report.results_dir, "TESTBOARD_REPORT_RESULTS_DIR");
        override_string(&mut self.report.coverage_dir, "TESTBOARD_REPORT_COVERAGE_DIR");
        override_string(
            &mut self.report.coverage_file,
            "TESTBOARD_REPORT_COVERAGE_FILE",
        );
        override_string(
            &mut self.report.coverage_html_index,
            "TESTBOARD_REPORT_COVERAGE_HTML_INDEX",
        );
        override_string(&mut self.report.summary_file, "TESTBOARD_REPORT_SUMMARY_FILE");
        override_string(&mut self.report.badges_dir, "TESTBOARD_REPORT_BADGES_DIR");
        override_string(
            &mut self.report.dashboard_file,
            "TESTBOARD_REPORT_DASHBOARD_FILE",
        );
        override_string(&mut self.report.index_file, "TESTBOARD_REPORT_INDEX_FILE");
        override_csv(
            &mut self.report.suite_prefixes,
            "TESTBOARD_REPORT_SUITE_PREFIXES",
        );
        override_string(
            &mut self.report.collision_policy,
            "TESTBOARD_REPORT_COLLISION_POLICY",
        );
        override_usize(
            &mut self.report.max_file_size,
            "TESTBOARD_REPORT_MAX_FILE_SIZE",
        );

        // Thresholds
        override_f64(
            &mut self.thresholds.success_good,
            "TESTBOARD_THRESHOLDS_SUCCESS_GOOD",
        );
        override_f64(
            &mut self.thresholds.success_warning,
            "TESTBOARD_THRESHOLDS_SUCCESS_WARNING",
        );
        override_f64(
            &mut self.thresholds.coverage_good,
            "TESTBOARD_THRESHOLDS_COVERAGE_GOOD",
        );
        override_f64(
            &mut self.thresholds.coverage_warning,
            "TESTBOARD_THRESHOLDS_COVERAGE_WARNING",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), TestboardError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.report.reports_dir.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.reports_dir".to_owned(),
                reason: "reports_dir must not be empty".to_owned(),
            }
            .into());
        }

        // reports_dir 하위 경로는 reports_dir 밖으로 나갈 수 없음
        let relative_paths = [
            ("report.results_dir", &self.report.results_dir),
            ("report.coverage_dir", &self.report.coverage_dir),
            ("report.coverage_file", &self.report.coverage_file),
            ("report.coverage_html_index", &self.report.coverage_html_index),
            ("report.summary_file", &self.report.summary_file),
            ("report.badges_dir", &self.report.badges_dir),
            ("report.dashboard_file", &self.report.dashboard_file),
            ("report.index_file", &self.report.index_file),
        ];
        for (field, value) in relative_paths {
            validate_relative_path(field, value)?;
        }

        if !COLLISION_POLICIES.contains(&self.report.collision_policy.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "report.collision_policy".to_owned(),
                reason: format!("must be one of: {}", COLLISION_POLICIES.join(", ")),
            }
            .into());
        }

        if self.report.max_file_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "report.max_file_size".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        self.thresholds.validate()?;

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 리포트 입출력 설정
///
/// `reports_dir`을 제외한 모든 경로는 `reports_dir` 기준 상대 경로입니다.
/// `summary_file`은 `results_dir` 기준입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 리포트 루트 디렉토리
    pub reports_dir: String,
    /// 스위트별 결과 문서 디렉토리
    pub results_dir: String,
    /// 커버리지 디렉토리
    pub coverage_dir: String,
    /// 커버리지 문서 파일명
    pub coverage_file: String,
    /// 외부 도구가 생성한 커버리지 HTML 상세 페이지
    pub coverage_html_index: String,
    /// 정규 요약 문서 파일명
    pub summary_file: String,
    /// 배지 출력 디렉토리
    pub badges_dir: String,
    /// 대시보드 HTML 파일명
    pub dashboard_file: String,
    /// 인덱스 HTML 파일명
    pub index_file: String,
    /// 스위트 이름에서 제거할 파일명 접두사
    pub suite_prefixes: Vec<String>,
    /// 스위트 이름 충돌 정책 (merge, reject)
    pub collision_policy: String,
    /// 입력 문서 최대 크기 (바이트)
    pub max_file_size: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reports_dir: "reports".to_owned(),
            results_dir: "test-results".to_owned(),
            coverage_dir: "coverage".to_owned(),
            coverage_file: "coverage.xml".to_owned(),
            coverage_html_index: "coverage/html/index.html".to_owned(),
            summary_file: "summary.json".to_owned(),
            badges_dir: "badges".to_owned(),
            dashboard_file: "dashboard.html".to_owned(),
            index_file: "index.html".to_owned(),
            suite_prefixes: vec!["junit-".to_owned(), "TEST-".to_owned()],
            collision_policy: "merge".to_owned(),
            max_file_size: 50 * 1024 * 1024, // 50 MB
        }
    }
}

/// 상태 색상 임계값 (백분율)
///
/// 성공률과 커버리지는 서로 다른 임계값을 사용합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// 성공률 "good" 하한
    pub success_good: f64,
    /// 성공률 "warning" 하한
    pub success_warning: f64,
    /// 커버리지 "good" 하한
    pub coverage_good: f64,
    /// 커버리지 "warning" 하한
    pub coverage_warning: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            success_good: 90.0,
            success_warning: 70.0,
            coverage_good: 80.0,
            coverage_warning: 60.0,
        }
    }
}

impl ThresholdConfig {
    /// 임계값 범위(0-100)와 순서(warning <= good)를 검증합니다.
    pub fn validate(&self) -> Result<(), TestboardError> {
        let values = [
            ("thresholds.success_good", self.success_good),
            ("thresholds.success_warning", self.success_warning),
            ("thresholds.coverage_good", self.coverage_good),
            ("thresholds.coverage_warning", self.coverage_warning),
        ];
        for (field, value) in values {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_owned(),
                    reason: format!("must be within 0-100, got {value}"),
                }
                .into());
            }
        }

        if self.success_warning > self.success_good {
            return Err(ConfigError::InvalidValue {
                field: "thresholds.success_warning".to_owned(),
                reason: "must not exceed success_good".to_owned(),
            }
            .into());
        }

        if self.coverage_warning > self.coverage_good {
            return Err(ConfigError::InvalidValue {
                field: "thresholds.coverage_warning".to_owned(),
                reason: "must not exceed coverage_good".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

fn validate_relative_path(field: &str, value: &str) -> Result<(), TestboardError> {
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_owned(),
            reason: "path must not be empty".to_owned(),
        }
        .into());
    }

    let path = Path::new(value);
    if path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        return Err(ConfigError::InvalidValue {
            field: field.to_owned(),
            reason: format!("'{value}' must be a relative path inside reports_dir"),
        }
        .into());
    }

    Ok(())
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_f64(target: &mut f64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<f64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse f64 from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = TestboardConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.report.reports_dir, "reports");
        assert_eq!(config.report.results_dir, "test-results");
        assert_eq!(config.report.collision_policy, "merge");
        assert_eq!(config.thresholds.success_good, 90.0);
        assert_eq!(config.thresholds.coverage_good, 80.0);
    }

    #[test]
    fn default_config_passes_validation() {
        TestboardConfig::default().validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = TestboardConfig::parse("").unwrap();
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.report.badges_dir, "badges");
    }

    #[test]
    fn from_str_partial_toml_merges_with_defaults() {
        let toml = r#"
[report]
reports_dir = "out/reports"
collision_policy = "reject"

[thresholds]
coverage_good = 85.0
"#;
        let config = TestboardConfig::parse(toml).unwrap();
        assert_eq!(config.report.reports_dir, "out/reports");
        assert_eq!(config.report.collision_policy, "reject");
        // 나머지는 기본값 유지
        assert_eq!(config.report.summary_file, "summary.json");
        assert_eq!(config.thresholds.coverage_good, 85.0);
        assert_eq!(config.thresholds.coverage_warning, 60.0);
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let err = TestboardConfig::parse("invalid = [[[toml").unwrap_err();
        assert!(matches!(
            err,
            TestboardError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = TestboardConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_unknown_collision_policy() {
        let mut config = TestboardConfig::default();
        config.report.collision_policy = "last-wins".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("collision_policy"));
    }

    #[test]
    fn validate_rejects_path_escaping_reports_dir() {
        let mut config = TestboardConfig::default();
        config.report.badges_dir = "../badges".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("report.badges_dir"));
    }

    #[test]
    fn validate_rejects_absolute_sub_path() {
        let mut config = TestboardConfig::default();
        config.report.results_dir = "/tmp/results".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_max_file_size() {
        let mut config = TestboardConfig::default();
        config.report.max_file_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_threshold() {
        let mut config = TestboardConfig::default();
        config.thresholds.success_good = 120.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("success_good"));
    }

    #[test]
    fn validate_rejects_inverted_thresholds() {
        let mut config = TestboardConfig::default();
        config.thresholds.coverage_warning = 90.0;
        config.thresholds.coverage_good = 80.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("coverage_warning"));
    }

    #[test]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: 테스트는 단일 스레드에서 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_TESTBOARD_STR", "overridden") };
        override_string(&mut val, "TEST_TESTBOARD_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_TESTBOARD_STR") };
    }

    #[test]
    fn env_override_f64_invalid_keeps_original() {
        let mut val = 90.0;
        // SAFETY: 테스트는 단일 스레드에서 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_TESTBOARD_F64_BAD", "ninety") };
        override_f64(&mut val, "TEST_TESTBOARD_F64_BAD");
        assert_eq!(val, 90.0);
        unsafe { std::env::remove_var("TEST_TESTBOARD_F64_BAD") };
    }

    #[test]
    fn env_override_csv_skips_empty_items() {
        let mut val = vec!["junit-".to_owned()];
        // SAFETY: 테스트는 단일 스레드에서 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_TESTBOARD_CSV", "TEST-, ,results-") };
        override_csv(&mut val, "TEST_TESTBOARD_CSV");
        assert_eq!(val, vec!["TEST-", "results-"]);
        unsafe { std::env::remove_var("TEST_TESTBOARD_CSV") };
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = TestboardConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = TestboardConfig::parse(&toml_str).unwrap();
        assert_eq!(config.report.reports_dir, parsed.report.reports_dir);
        assert_eq!(config.report.suite_prefixes, parsed.report.suite_prefixes);
        assert_eq!(config.thresholds.success_warning, parsed.thresholds.success_warning);
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let err = TestboardConfig::from_file("/nonexistent/path/testboard.toml")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TestboardError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
