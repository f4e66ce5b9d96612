//! 정규 요약 문서 저장소
//!
//! [`SummaryStore`]는 [`AggregateSummary`]를 JSON 파일 하나로 저장하고 다시 읽습니다.
//! 저장된 문서가 렌더러와 외부 도구(임계값 검사 등)의 유일한 입력입니다.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ReporterError;
use crate::output::write_atomic;
use crate::types::AggregateSummary;

/// 요약 문서 저장소
#[derive(Debug, Clone)]
pub struct SummaryStore {
    path: PathBuf,
}

impl SummaryStore {
    /// 문서 경로를 지정하여 저장소를 생성합니다.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 문서 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 문서가 존재하는지 여부
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// 요약을 저장하고 저장 위치를 반환합니다. 기존 문서는 덮어씁니다.
    pub fn save(&self, summary: &AggregateSummary) -> Result<PathBuf, ReporterError> {
        let mut json = serde_json::to_string_pretty(summary)
            .map_err(|e| ReporterError::Render(format!("summary serialization failed: {e}")))?;
        json.push('\n');

        write_atomic(&self.path, json.as_bytes())?;
        info!(
            path = %self.path.display(),
            suites = summary.suites.len(),
            total_tests = summary.total_summary.total_tests,
            "summary saved"
        );
        Ok(self.path.clone())
    }

    /// 저장된 요약을 읽습니다.
    ///
    /// # Errors
    ///
    /// - 문서가 없으면 `ReporterError::SummaryNotFound`
    /// - JSON이 깨졌거나 형식이 다르면 `ReporterError::SummaryParse`
    pub fn load(&self) -> Result<AggregateSummary, ReporterError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ReporterError::SummaryNotFound {
                    path: self.path.display().to_string(),
                }
            } else {
                ReporterError::Io {
                    path: self.path.display().to_string(),
                    source: e,
                }
            }
        })?;

        serde_json::from_str(&content).map_err(|e| ReporterError::SummaryParse {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregator;
    use crate::types::{CoverageReport, SuiteResult, TestCase, TestStatus};

    fn sample_summary() -> AggregateSummary {
        let cases = vec![
            TestCase {
                name: "ok".to_owned(),
                classname: "pkg".to_owned(),
                duration: 0.123456789,
                status: TestStatus::Passed,
                detail: None,
            },
            TestCase {
                name: "broken".to_owned(),
                classname: "pkg".to_owned(),
                duration: 1.1,
                status: TestStatus::Failed,
                detail: Some("assert <a> & \"b\"".to_owned()),
            },
        ];
        let coverage = CoverageReport {
            line_rate: 0.8123,
            branch_rate: 0.1,
            lines_covered: 8123,
            lines_valid: 10000,
            branches_covered: 1,
            branches_valid: 10,
            complexity: 0.0,
            packages: vec![],
        };
        Aggregator::default()
            .aggregate(
                vec![
                    SuiteResult::from_cases("unit", cases),
                    SuiteResult::from_cases("empty", vec![]),
                ],
                Some(coverage),
            )
            .unwrap()
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SummaryStore::new(dir.path().join("test-results").join("summary.json"));
        let summary = sample_summary();

        let location = store.save(&summary).unwrap();
        assert_eq!(location, store.path());
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, summary);
    }

    #[test]
    fn coverage_absent_is_null() {
        let dir = tempfile::tempdir().unwrap();
        let store = SummaryStore::new(dir.path().join("summary.json"));
        let summary = Aggregator::default().aggregate(vec![], None).unwrap();
        store.save(&summary).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert!(raw["coverage"].is_null());
        assert_eq!(raw["totalSummary"]["successRate"], 0.0);
    }

    #[test]
    fn load_missing_is_summary_not_found() {
        let store = SummaryStore::new("/nonexistent/testboard/summary.json");
        assert!(!store.exists());
        let err = store.load().unwrap_err();
        assert!(matches!(err, ReporterError::SummaryNotFound { .. }));
    }

    #[test]
    fn load_corrupt_is_summary_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        std::fs::write(&path, "{\"timestamp\": 42").unwrap();
        let err = SummaryStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ReporterError::SummaryParse { .. }));
    }
}
