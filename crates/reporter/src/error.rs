//! 리포터 에러 타입
//!
//! [`ReporterError`]는 리포터 모듈 내에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<ReporterError> for TestboardError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 자연스럽게 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **아티팩트 파싱**: `ResultParse`, `CoverageParse` (파일 단위로 격리, 파이프라인 계속)
//! - **요약 문서**: `SummaryNotFound`, `SummaryParse`
//! - **집계**: `SuiteCollision`
//! - **렌더링**: `Render`
//! - **설정**: `Config`
//! - **파일 I/O**: `Io`, `FileTooBig`

use testboard_core::error::{ReportError, TestboardError};

/// 리포터 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ReporterError {
    /// 테스트 결과 문서 파싱 실패
    #[error("result parse error: {path}: {reason}")]
    ResultParse {
        /// 파싱 대상 파일 경로
        path: String,
        /// 파싱 실패 사유
        reason: String,
    },

    /// 커버리지 문서 파싱 실패
    #[error("coverage parse error: {path}: {reason}")]
    CoverageParse {
        /// 파싱 대상 파일 경로
        path: String,
        /// 파싱 실패 사유
        reason: String,
    },

    /// 정규 요약 문서가 없음 (집계 단계 없이 렌더링 요청)
    #[error("no summary to render at {path}; run `generate` first")]
    SummaryNotFound {
        /// 요약 문서 경로
        path: String,
    },

    /// 정규 요약 문서 역직렬화 실패
    #[error("summary parse error: {path}: {reason}")]
    SummaryParse {
        /// 요약 문서 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 스위트 이름 충돌 (reject 정책)
    #[error("suite name collision: '{suite}' is produced by more than one artifact")]
    SuiteCollision {
        /// 충돌한 스위트 이름
        suite: String,
    },

    /// 렌더링 실패
    #[error("render error: {0}")]
    Render(String),

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 파일 경로
        path: String,
        /// 실제 파일 크기 (바이트)
        size: usize,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },
}

impl From<ReporterError> for TestboardError {
    fn from(err: ReporterError) -> Self {
        match err {
            ReporterError::ResultParse { path, reason } => TestboardError::Report(
                ReportError::ParseFailed(format!("result parse error: {path}: {reason}")),
            ),
            ReporterError::CoverageParse { path, reason } => TestboardError::Report(
                ReportError::ParseFailed(format!("coverage parse error: {path}: {reason}")),
            ),
            ReporterError::SummaryNotFound { path } => {
                TestboardError::Report(ReportError::SummaryUnavailable(path))
            }
            ReporterError::SummaryParse { path, reason } => TestboardError::Report(
                ReportError::SummaryUnavailable(format!("{path}: {reason}")),
            ),
            ReporterError::SuiteCollision { suite } => TestboardError::Report(
                ReportError::AggregationFailed(format!("suite name collision: {suite}")),
            ),
            ReporterError::Render(msg) => TestboardError::Report(ReportError::RenderFailed(msg)),
            ReporterError::Config { field, reason } => TestboardError::Report(
                ReportError::RenderFailed(format!("config error: {field}: {reason}")),
            ),
            ReporterError::Io { path, source } => TestboardError::Report(
                ReportError::WriteFailed(format!("io error: {path}: {source}")),
            ),
            ReporterError::FileTooBig { path, size, max } => TestboardError::Report(
                ReportError::ParseFailed(format!("file too large: {path}: {size} bytes (max: {max})")),
            ),
        }
    }
}
