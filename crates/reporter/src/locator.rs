//! 아티팩트 탐색기
//!
//! [`ArtifactLocator`]는 리포트 루트에서 스위트별 결과 문서와 커버리지 문서를 찾습니다.
//!
//! - 결과 문서: `results_dir` 바로 아래의 `.xml` 파일 (재귀 없음), 파일명 순 정렬
//! - 커버리지 문서: `coverage/coverage.xml`, 없으면 `<reports_dir>/coverage.xml`
//!
//! 루트나 결과 디렉토리가 없으면 빈 결과를 반환합니다. 파일은 읽지 않습니다.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::ReporterConfig;
use crate::error::ReporterError;

/// 결과 문서 확장자
const RESULT_EXTENSION: &str = "xml";

/// 발견된 스위트 결과 문서
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteArtifact {
    /// 파일명에서 유도한 스위트 이름
    pub suite_name: String,
    /// 문서 경로
    pub path: PathBuf,
}

/// 탐색 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredArtifacts {
    /// 스위트 결과 문서 (발견 순서)
    pub suites: Vec<SuiteArtifact>,
    /// 커버리지 문서 (최대 하나)
    pub coverage: Option<PathBuf>,
}

impl DiscoveredArtifacts {
    /// 아무 아티팩트도 없는지 여부
    pub fn is_empty(&self) -> bool {
        self.suites.is_empty() && self.coverage.is_none()
    }
}

/// 아티팩트 탐색기
pub struct ArtifactLocator {
    results_dir: String,
    summary_file: String,
    coverage_candidates: [PathBuf; 2],
    suite_prefixes: Vec<String>,
}

impl ArtifactLocator {
    /// 리포터 설정으로 탐색기를 생성합니다.
    ///
    /// 커버리지 후보 경로는 [`ReporterConfig::coverage_candidates`]를 그대로 따릅니다.
    pub fn from_config(config: &ReporterConfig) -> Self {
        Self {
            results_dir: config.results_dir.clone(),
            summary_file: config.summary_file.clone(),
            coverage_candidates: config.coverage_candidates(),
            suite_prefixes: config.suite_prefixes.clone(),
        }
    }

    /// 리포트 루트에서 아티팩트를 탐색합니다.
    ///
    /// # Errors
    ///
    /// 결과 디렉토리가 존재하지만 읽을 수 없으면 `ReporterError::Io`
    pub fn locate(&self, root: &Path) -> Result<DiscoveredArtifacts, ReporterError> {
        if !root.is_dir() {
            warn!(root = %root.display(), "reports directory does not exist");
            return Ok(DiscoveredArtifacts::default());
        }

        let suites = self.locate_suites(&root.join(&self.results_dir))?;
        let coverage = self
            .coverage_candidates
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|path| path.is_file());

        debug!(
            root = %root.display(),
            suites = suites.len(),
            coverage = coverage.is_some(),
            "artifacts located"
        );

        Ok(DiscoveredArtifacts { suites, coverage })
    }

    fn locate_suites(&self, dir: &Path) -> Result<Vec<SuiteArtifact>, ReporterError> {
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "results directory does not exist");
            return Ok(Vec::new());
        }

        // 재귀 없이 1단계만 탐색
        let entries = std::fs::read_dir(dir).map_err(|e| ReporterError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !is_result_document(&path) {
                continue;
            }
            if path.file_name().and_then(|n| n.to_str()) == Some(self.summary_file.as_str()) {
                continue;
            }
            paths.push(path);
        }

        // 파일명 순 정렬로 발견 순서를 고정
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(paths
            .into_iter()
            .filter_map(|path| {
                let suite_name = suite_name_for(&path, &self.suite_prefixes)?;
                Some(SuiteArtifact { suite_name, path })
            })
            .collect())
    }
}

fn is_result_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RESULT_EXTENSION))
}

/// 파일명에서 스위트 이름을 유도합니다.
///
/// 확장자를 뗀 파일명에서 처음 일치하는 접두사 하나만 제거합니다.
/// 접두사를 제거한 결과가 비면 원래 파일명을 그대로 씁니다.
pub fn suite_name_for(path: &Path, prefixes: &[String]) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = prefixes
        .iter()
        .filter(|p| !p.is_empty())
        .find_map(|p| stem.strip_prefix(p.as_str()))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(stem);
    Some(name.to_owned())
}
