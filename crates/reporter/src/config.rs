//! 리포터 설정
//!
//! [`ReporterConfig`]는 core의 [`TestboardConfig`](testboard_core::config::TestboardConfig)에서
//! 파생되며, 문자열 설정을 타입이 있는 값(경로, 충돌 정책, 임계값)으로 변환합니다.
//!
//! # 사용 예시
//!
//! ```
//! use testboard_reporter::{CollisionPolicy, ReporterConfigBuilder};
//!
//! let config = ReporterConfigBuilder::new()
//!     .reports_dir("build/reports")
//!     .collision_policy(CollisionPolicy::Reject)
//!     .build()
//!     .unwrap();
//! assert!(config.summary_path().ends_with("test-results/summary.json"));
//! ```

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ReporterError;
use crate::render::Thresholds;

/// 스위트 이름 충돌 정책
///
/// 두 결과 문서가 같은 스위트 이름을 만들 때의 처리 방법입니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// 카운트를 합산하고 케이스를 이어 붙임 (첫 등장 위치 유지)
    #[default]
    Merge,
    /// 충돌 시 집계 실패
    Reject,
}

impl CollisionPolicy {
    /// 대소문자 무시 문자열 변환
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "merge" | "sum" => Some(Self::Merge),
            "reject" | "error" | "fail" => Some(Self::Reject),
            _ => None,
        }
    }
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// 입력 문서 최대 크기 상한
const MAX_FILE_SIZE_LIMIT: usize = 512 * 1024 * 1024; // 512 MB

/// 경로 길이 제한
const MAX_PATH_LEN: usize = 4096;

/// 리포터 설정
///
/// `reports_dir`을 제외한 경로 필드는 모두 `reports_dir` 기준 상대 경로입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReporterConfig {
    /// 리포트 루트 디렉토리
    pub reports_dir: PathBuf,
    /// 스위트별 결과 문서 디렉토리
    pub results_dir: String,
    /// 커버리지 디렉토리
    pub coverage_dir: String,
    /// 커버리지 문서 파일명
    pub coverage_file: String,
    /// 커버리지 HTML 상세 페이지
    pub coverage_html_index: String,
    /// 정규 요약 문서 파일명 (`results_dir` 기준)
    pub summary_file: String,
    /// 배지 디렉토리
    pub badges_dir: String,
    /// 대시보드 파일명
    pub dashboard_file: String,
    /// 인덱스 파일명
    pub index_file: String,
    /// 스위트 이름에서 제거할 접두사 (앞에서부터 첫 일치만 제거)
    pub suite_prefixes: Vec<String>,
    /// 스위트 이름 충돌 정책
    pub collision_policy: CollisionPolicy,
    /// 입력 문서 최대 크기 (바이트)
    pub max_file_size: usize,
    /// 상태 색상 임계값
    pub thresholds: Thresholds,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("reports"),
            results_dir: "test-results".to_owned(),
            coverage_dir: "coverage".to_owned(),
            coverage_file: "coverage.xml".to_owned(),
            coverage_html_index: "coverage/html/index.html".to_owned(),
            summary_file: "summary.json".to_owned(),
            badges_dir: "badges".to_owned(),
            dashboard_file: "dashboard.html".to_owned(),
            index_file: "index.html".to_owned(),
            suite_prefixes: vec!["junit-".to_owned(), "TEST-".to_owned()],
            collision_policy: CollisionPolicy::Merge,
            max_file_size: 50 * 1024 * 1024, // 50 MB
            thresholds: Thresholds::default(),
        }
    }
}

impl ReporterConfig {
    /// core의 `TestboardConfig`에서 리포터 설정을 생성합니다.
    ///
    /// 알 수 없는 충돌 정책 문자열은 기본값(`merge`)으로 대체됩니다.
    pub fn from_core(core: &testboard_core::config::TestboardConfig) -> Self {
        let report = &core.report;
        let thresholds = &core.thresholds;
        let collision_policy =
            CollisionPolicy::from_str_loose(&report.collision_policy).unwrap_or_default();

        Self {
            reports_dir: PathBuf::from(&report.reports_dir),
            results_dir: report.results_dir.clone(),
            coverage_dir: report.coverage_dir.clone(),
            coverage_file: report.coverage_file.clone(),
            coverage_html_index: report.coverage_html_index.clone(),
            summary_file: report.summary_file.clone(),
            badges_dir: report.badges_dir.clone(),
            dashboard_file: report.dashboard_file.clone(),
            index_file: report.index_file.clone(),
            suite_prefixes: report.suite_prefixes.clone(),
            collision_policy,
            max_file_size: report.max_file_size,
            thresholds: Thresholds {
                success_good: thresholds.success_good,
                success_warning: thresholds.success_warning,
                coverage_good: thresholds.coverage_good,
                coverage_warning: thresholds.coverage_warning,
            },
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `reports_dir`: 비어있으면 안 됨
    /// - 하위 경로: 비어있지 않은 상대 경로, `..` 금지
    /// - `max_file_size`: 1-536870912 (512MB)
    /// - `thresholds`: 0-100, warning <= good
    pub fn validate(&self) -> Result<(), ReporterError> {
        if self.reports_dir.as_os_str().is_empty() {
            return Err(ReporterError::Config {
                field: "reports_dir".to_owned(),
                reason: "reports_dir must not be empty".to_owned(),
            });
        }

        if self.reports_dir.as_os_str().len() > MAX_PATH_LEN {
            return Err(ReporterError::Config {
                field: "reports_dir".to_owned(),
                reason: format!("reports_dir exceeds maximum length {MAX_PATH_LEN}"),
            });
        }

        let relative = [
            ("results_dir", &self.results_dir),
            ("coverage_dir", &self.coverage_dir),
            ("coverage_file", &self.coverage_file),
            ("coverage_html_index", &self.coverage_html_index),
            ("summary_file", &self.summary_file),
            ("badges_dir", &self.badges_dir),
            ("dashboard_file", &self.dashboard_file),
            ("index_file", &self.index_file),
        ];
        for (field, value) in relative {
            check_relative(field, value)?;
        }

        if self.max_file_size == 0 || self.max_file_size > MAX_FILE_SIZE_LIMIT {
            return Err(ReporterError::Config {
                field: "max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE_LIMIT}"),
            });
        }

        self.thresholds
            .validate()
            .map_err(|(field, reason)| ReporterError::Config {
                field: field.to_owned(),
                reason,
            })
    }

    /// 스위트별 결과 문서 디렉토리
    pub fn results_path(&self) -> PathBuf {
        self.reports_dir.join(&self.results_dir)
    }

    /// 정규 요약 문서 경로
    pub fn summary_path(&self) -> PathBuf {
        self.results_path().join(&self.summary_file)
    }

    /// 커버리지 문서 후보 경로 (우선순위 순, 리포트 루트 기준 상대 경로)
    ///
    /// `coverage/coverage.xml`이 없으면 리포트 루트의 `coverage.xml`을 사용합니다.
    pub fn coverage_candidates(&self) -> [PathBuf; 2] {
        [
            Path::new(&self.coverage_dir).join(&self.coverage_file),
            PathBuf::from(&self.coverage_file),
        ]
    }

    /// 배지 디렉토리
    pub fn badges_path(&self) -> PathBuf {
        self.reports_dir.join(&self.badges_dir)
    }

    /// 대시보드 경로
    pub fn dashboard_path(&self) -> PathBuf {
        self.reports_dir.join(&self.dashboard_file)
    }

    /// 인덱스 경로
    pub fn index_path(&self) -> PathBuf {
        self.reports_dir.join(&self.index_file)
    }
}

fn check_relative(field: &str, value: &str) -> Result<(), ReporterError> {
    if value.is_empty() {
        return Err(ReporterError::Config {
            field: field.to_owned(),
            reason: "must not be empty".to_owned(),
        });
    }

    let escapes = Path::new(value).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(ReporterError::Config {
            field: field.to_owned(),
            reason: format!("'{value}' must be a relative path inside reports_dir"),
        });
    }

    Ok(())
}

/// [`ReporterConfig`] 빌더
///
/// 유연한 설정 구성 및 빌드 시 유효성 검증을 제공합니다.
#[derive(Default)]
pub struct ReporterConfigBuilder {
    config: ReporterConfig,
}

impl ReporterConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 리포트 루트 디렉토리를 설정합니다.
    pub fn reports_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.reports_dir = dir.into();
        self
    }

    /// 결과 문서 디렉토리를 설정합니다.
    pub fn results_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.results_dir = dir.into();
        self
    }

    /// 스위트 접두사 목록을 설정합니다.
    pub fn suite_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.config.suite_prefixes = prefixes;
        self
    }

    /// 충돌 정책을 설정합니다.
    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.config.collision_policy = policy;
        self
    }

    /// 최대 파일 크기(바이트)를 설정합니다.
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.config.max_file_size = size;
        self
    }

    /// 상태 임계값을 설정합니다.
    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.config.thresholds = thresholds;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `ReporterError::Config` 반환
    pub fn build(self) -> Result<ReporterConfig, ReporterError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
