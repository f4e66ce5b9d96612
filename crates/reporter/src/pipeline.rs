//! 리포트 파이프라인 오케스트레이터 -- 전체 생성 흐름 관리
//!
//! [`ReportPipeline`]은 한 번의 실행을 순차적으로 처리합니다. 공유 상태나 잠금은 없습니다.
//!
//! # 내부 아키텍처
//!
//! ```text
//! reports_dir --> ArtifactLocator --> JunitParser ------> SuiteResult* --+
//!                       |                                                |
//!                       +---------> CoberturaParser ---> CoverageReport? +--> Aggregator
//!                                                                              |
//!                                                                       AggregateSummary
//!                                                                              |
//!                                                                        SummaryStore
//!                                                                              |
//!                                        +-----------------+-------------------+
//!                                        |                 |                   |
//!                                 DashboardRenderer   BadgeRenderer      index::compose
//! ```
//!
//! 아티팩트 하나의 파싱 실패는 그 파일만 제외하고 계속 진행하며 [`OmittedArtifact`]로 기록됩니다.
//! 저장/렌더링 실패는 호출자에게 그대로 전달됩니다.
//!
//! 같은 출력 디렉토리에 대해 두 인스턴스를 동시에 실행하는 것은 지원하지 않습니다
//! (마지막에 쓴 쪽이 남습니다).

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use testboard_core::metrics as m;

use crate::aggregate::Aggregator;
use crate::config::ReporterConfig;
use crate::error::ReporterError;
use crate::locator::{ArtifactLocator, DiscoveredArtifacts};
use crate::output::{remove_stale, write_atomic};
use crate::parser::{CoberturaParser, JunitParser, ResultParser, read_artifact};
use crate::render::badge::COVERAGE_BADGE_FILE;
use crate::render::{BadgeLink, BadgeRenderer, DashboardRenderer, IndexLinks, compose};
use crate::store::SummaryStore;
use crate::types::{AggregateSummary, CoverageReport, SuiteResult};

/// 결과에서 제외된 아티팩트
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OmittedArtifact {
    /// 아티팩트 경로
    pub path: PathBuf,
    /// 제외 사유
    pub reason: String,
}

/// 수집 단계(탐색 + 파싱 + 집계) 결과
#[derive(Debug, Clone)]
pub struct Collection {
    /// 집계된 요약
    pub summary: AggregateSummary,
    /// 제외된 아티팩트
    pub omitted: Vec<OmittedArtifact>,
}

/// 이번 실행에서 쓰거나 지운 파일
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WrittenOutputs {
    /// 정규 요약 문서 (기존 요약 재사용 시 `None`)
    pub summary: Option<PathBuf>,
    /// 대시보드
    pub dashboard: PathBuf,
    /// 배지
    pub badges: Vec<PathBuf>,
    /// 인덱스
    pub index: PathBuf,
    /// 이전 실행이 남겨서 지운 출력
    pub removed: Vec<PathBuf>,
}

/// 파이프라인 실행 결과
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// 렌더링에 사용된 요약
    pub summary: AggregateSummary,
    /// 제외된 아티팩트
    pub omitted: Vec<OmittedArtifact>,
    /// 출력 파일
    pub outputs: WrittenOutputs,
}

/// 리포트 파이프라인
pub struct ReportPipeline {
    /// 리포터 설정
    config: ReporterConfig,
    /// 아티팩트 탐색기
    locator: ArtifactLocator,
    /// 결과 문서 파서 목록
    parsers: Vec<Box<dyn ResultParser>>,
    /// 커버리지 파서
    coverage_parser: CoberturaParser,
    /// 집계기
    aggregator: Aggregator,
    /// 요약 저장소
    store: SummaryStore,
    /// 대시보드 렌더러
    dashboard: DashboardRenderer,
    /// 배지 렌더러
    badges: BadgeRenderer,
}

impl ReportPipeline {
    /// 설정을 반환합니다.
    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// 요약 저장소를 반환합니다.
    pub fn store(&self) -> &SummaryStore {
        &self.store
    }

    /// 탐색, 파싱, 집계만 수행합니다 (파일을 쓰지 않음).
    ///
    /// # Errors
    ///
    /// - 결과 디렉토리를 읽을 수 없으면 `ReporterError::Io`
    /// - `reject` 정책에서 스위트 이름이 겹치면 `ReporterError::SuiteCollision`
    pub fn collect(&self) -> Result<Collection, ReporterError> {
        let artifacts = self.locator.locate(&self.config.reports_dir)?;
        if artifacts.is_empty() {
            info!(
                reports_dir = %self.config.reports_dir.display(),
                "no test artifacts found, report will be empty"
            );
        }
        let DiscoveredArtifacts { suites, coverage } = artifacts;
        let mut omitted = Vec::new();

        let mut results: Vec<SuiteResult> = Vec::with_capacity(suites.len());
        for artifact in suites {
            match self.parse_suite(&artifact.path, &artifact.suite_name) {
                Ok((parser, suite)) => {
                    metrics::counter!(m::REPORTER_ARTIFACTS_PARSED_TOTAL, m::LABEL_KIND => "result")
                        .increment(1);
                    debug!(
                        parser,
                        suite = %suite.suite_name,
                        tests = suite.total_tests,
                        failed = suite.failed,
                        "suite parsed"
                    );
                    results.push(suite);
                }
                Err(e) => {
                    metrics::counter!(m::REPORTER_ARTIFACTS_FAILED_TOTAL, m::LABEL_KIND => "result")
                        .increment(1);
                    warn!(path = %artifact.path.display(), error = %e, "skipping test result artifact");
                    omitted.push(OmittedArtifact {
                        path: artifact.path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let coverage = coverage.and_then(|path| match self.parse_coverage(&path) {
            Ok(report) => {
                metrics::counter!(m::REPORTER_ARTIFACTS_PARSED_TOTAL, m::LABEL_KIND => "coverage")
                    .increment(1);
                Some(report)
            }
            Err(e) => {
                metrics::counter!(m::REPORTER_ARTIFACTS_FAILED_TOTAL, m::LABEL_KIND => "coverage")
                    .increment(1);
                warn!(path = %path.display(), error = %e, "coverage unavailable");
                omitted.push(OmittedArtifact {
                    path,
                    reason: e.to_string(),
                });
                None
            }
        });

        let summary = self.aggregator.aggregate(results, coverage)?;
        metrics::gauge!(m::REPORTER_SUITES_AGGREGATED).set(summary.suites.len() as f64);

        Ok(Collection { summary, omitted })
    }

    /// 전체 파이프라인을 실행합니다 (수집 → 요약 저장 → 렌더링).
    ///
    /// 아티팩트가 하나도 없어도 성공하며 "No tests found" 리포트를 만듭니다.
    pub fn run(&self) -> Result<PipelineOutcome, ReporterError> {
        let started = Instant::now();
        let Collection { summary, omitted } = self.collect()?;

        let summary_path = self.store.save(&summary)?;
        let mut outputs = self.render_outputs(&summary)?;
        outputs.summary = Some(summary_path);

        metrics::histogram!(m::REPORTER_PIPELINE_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());
        info!(
            suites = summary.suites.len(),
            total_tests = summary.total_summary.total_tests,
            success_rate = summary.total_summary.success_rate,
            coverage = summary.coverage.is_some(),
            omitted = omitted.len(),
            "report generated"
        );

        Ok(PipelineOutcome {
            summary,
            omitted,
            outputs,
        })
    }

    /// 저장된 요약으로 렌더링만 다시 수행합니다.
    ///
    /// # Errors
    ///
    /// 요약이 없으면 `ReporterError::SummaryNotFound`
    pub fn render_existing(&self) -> Result<PipelineOutcome, ReporterError> {
        let summary = self.store.load()?;
        let outputs = self.render_outputs(&summary)?;
        info!(
            summary = %self.store.path().display(),
            suites = summary.suites.len(),
            "report re-rendered from existing summary"
        );

        Ok(PipelineOutcome {
            summary,
            omitted: Vec::new(),
            outputs,
        })
    }

    /// 요약에서 대시보드, 배지, 인덱스를 만들어 씁니다.
    pub fn render_outputs(&self, summary: &AggregateSummary) -> Result<WrittenOutputs, ReporterError> {
        let dashboard_path = self.config.dashboard_path();
        write_output(&dashboard_path, self.dashboard.render(summary).as_bytes(), "dashboard")?;

        let badges_dir = self.config.badges_path();
        let badge_set = self.badges.badges(summary);
        let mut badge_paths = Vec::new();
        let mut badge_links = Vec::new();
        for (file, badge) in badge_set.files() {
            let path = badges_dir.join(file);
            write_output(&path, badge.to_svg().as_bytes(), "badge")?;
            badge_paths.push(path);
            badge_links.push(BadgeLink {
                label: badge.label.clone(),
                path: format!("{}/{file}", self.config.badges_dir),
            });
        }

        let mut removed = Vec::new();
        if badge_set.coverage.is_none() {
            let stale = badges_dir.join(COVERAGE_BADGE_FILE);
            if remove_stale(&stale)? {
                removed.push(stale);
            }
        }

        let coverage_detail = self
            .config
            .reports_dir
            .join(&self.config.coverage_html_index)
            .is_file()
            .then(|| self.config.coverage_html_index.clone());
        let links = IndexLinks {
            dashboard: self.config.dashboard_file.clone(),
            coverage_detail,
            raw_results: format!("{}/", self.config.results_dir),
            summary: format!("{}/{}", self.config.results_dir, self.config.summary_file),
            badges: badge_links,
        };
        let index_path = self.config.index_path();
        write_output(&index_path, compose(&links).as_bytes(), "index")?;

        Ok(WrittenOutputs {
            summary: None,
            dashboard: dashboard_path,
            badges: badge_paths,
            index: index_path,
            removed,
        })
    }

    /// 경로를 처리할 수 있는 첫 파서로 파싱하고, 그 파서의 이름과 결과를 반환합니다.
    fn parse_suite(
        &self,
        path: &Path,
        suite_name: &str,
    ) -> Result<(&str, SuiteResult), ReporterError> {
        let parser = self
            .parsers
            .iter()
            .find(|p| p.can_parse(path))
            .ok_or_else(|| ReporterError::ResultParse {
                path: path.display().to_string(),
                reason: "no parser for this file type".to_owned(),
            })?;

        let content = read_artifact(path, self.config.max_file_size)?;
        let suite = parser.parse(&content, suite_name, &path.display().to_string())?;
        Ok((parser.name(), suite))
    }

    fn parse_coverage(&self, path: &Path) -> Result<CoverageReport, ReporterError> {
        let content = read_artifact(path, self.config.max_file_size)?;
        self.coverage_parser
            .parse(&content, &path.display().to_string())
    }
}

fn write_output(path: &Path, bytes: &[u8], kind: &'static str) -> Result<(), ReporterError> {
    write_atomic(path, bytes)?;
    metrics::counter!(m::REPORTER_OUTPUTS_WRITTEN_TOTAL, m::LABEL_OUTPUT => kind).increment(1);
    Ok(())
}

/// [`ReportPipeline`] 빌더
pub struct ReportPipelineBuilder {
    config: ReporterConfig,
    parsers: Vec<Box<dyn ResultParser>>,
}

impl ReportPipelineBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: ReporterConfig::default(),
            parsers: Vec::new(),
        }
    }

    /// 리포터 설정을 지정합니다.
    pub fn config(mut self, config: ReporterConfig) -> Self {
        self.config = config;
        self
    }

    /// 추가 결과 파서를 등록합니다. 기본 JUnit 파서보다 먼저 시도됩니다.
    pub fn parser(mut self, parser: Box<dyn ResultParser>) -> Self {
        self.parsers.push(parser);
        self
    }

    /// 파이프라인을 빌드합니다.
    ///
    /// # Errors
    ///
    /// 설정 검증 실패 시 `ReporterError::Config`
    pub fn build(self) -> Result<ReportPipeline, ReporterError> {
        self.config.validate()?;

        let mut parsers = self.parsers;
        parsers.push(Box::new(JunitParser));

        Ok(ReportPipeline {
            locator: ArtifactLocator::from_config(&self.config),
            parsers,
            coverage_parser: CoberturaParser,
            aggregator: Aggregator::new(self.config.collision_policy),
            store: SummaryStore::new(self.config.summary_path()),
            dashboard: DashboardRenderer::new(self.config.thresholds),
            badges: BadgeRenderer::new(self.config.thresholds),
            config: self.config,
        })
    }
}

impl Default for ReportPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
