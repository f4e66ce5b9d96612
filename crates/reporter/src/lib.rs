//! Testboard 리포터 -- 테스트 결과/커버리지 집계 및 리포트 렌더링
//!
//! 독립적으로 실행된 테스트 스위트들이 남긴 JUnit 결과 문서와 Cobertura 커버리지 문서를
//! 하나의 정규 요약(`summary.json`)으로 합치고, 그 요약만으로 HTML 대시보드,
//! SVG 배지, 인덱스 페이지를 만듭니다. 테스트를 실행하지는 않습니다.
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`ReporterError`)
//! - [`config`]: Reporter configuration (`ReporterConfig`, builder, `CollisionPolicy`)
//! - [`types`]: Data model (`TestCase`, `SuiteResult`, `CoverageReport`, `AggregateSummary`)
//! - [`locator`]: Artifact discovery (`ArtifactLocator`)
//! - [`parser`]: Document parsers (`ResultParser` trait, `JunitParser`, `CoberturaParser`)
//! - [`aggregate`]: Summary aggregation (`Aggregator`)
//! - [`store`]: Canonical summary persistence (`SummaryStore`)
//! - [`render`]: Dashboard, badge and index renderers
//! - [`output`]: Atomic file writes
//! - [`pipeline`]: Main orchestrator (`ReportPipeline`, `ReportPipelineBuilder`)
//!
//! # Example
//!
//! ```no_run
//! use testboard_reporter::{ReportPipelineBuilder, ReporterConfigBuilder};
//!
//! # fn main() -> Result<(), testboard_reporter::ReporterError> {
//! let config = ReporterConfigBuilder::new().reports_dir("reports").build()?;
//! let pipeline = ReportPipelineBuilder::new().config(config).build()?;
//! let outcome = pipeline.run()?;
//! println!("{} tests, {}% passing",
//!     outcome.summary.total_summary.total_tests,
//!     outcome.summary.total_summary.success_rate);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod locator;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod store;
pub mod types;

// --- Public API Re-exports ---

// Pipeline (main orchestrator)
pub use pipeline::{
    Collection, OmittedArtifact, PipelineOutcome, ReportPipeline, ReportPipelineBuilder,
    WrittenOutputs,
};

// Configuration
pub use config::{CollisionPolicy, ReporterConfig, ReporterConfigBuilder};

// Error
pub use error::ReporterError;

// Types
pub use types::{
    AggregateSummary, CoverageClass, CoveragePackage, CoverageReport, SuiteResult, Tally,
    TestCase, TestStatus, TotalSummary,
};

// Components
pub use aggregate::Aggregator;
pub use locator::{ArtifactLocator, DiscoveredArtifacts, SuiteArtifact};
pub use parser::{CoberturaParser, JunitParser, ResultParser};
pub use render::{BadgeRenderer, BadgeSet, DashboardRenderer, StatusLevel, Thresholds};
pub use store::SummaryStore;
