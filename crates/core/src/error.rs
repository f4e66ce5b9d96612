//! 에러 타입 -- 도메인별 에러 정의

/// Testboard 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum TestboardError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 리포트 생성 에러
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 리포트 파이프라인 에러
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// 입력 아티팩트 파싱 실패
    #[error("artifact parse failed: {0}")]
    ParseFailed(String),

    /// 렌더링할 요약 문서가 없음
    #[error("no data to render: {0}")]
    SummaryUnavailable(String),

    /// 집계 실패 (스위트 이름 충돌 등)
    #[error("aggregation failed: {0}")]
    AggregationFailed(String),

    /// 렌더링 실패
    #[error("render failed: {0}")]
    RenderFailed(String),

    /// 출력 파일 쓰기 실패
    #[error("write failed: {0}")]
    WriteFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_wraps_into_top_level() {
        let err: TestboardError = ConfigError::InvalidValue {
            field: "thresholds.success_good".to_owned(),
            reason: "must be 0-100".to_owned(),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.starts_with("config error"));
        assert!(msg.contains("thresholds.success_good"));
    }

    #[test]
    fn report_error_display() {
        let err = ReportError::SummaryUnavailable("reports/test-results/summary.json".to_owned());
        assert!(err.to_string().contains("no data to render"));
        assert!(err.to_string().contains("summary.json"));
    }

    #[test]
    fn io_error_wraps_into_top_level() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TestboardError = io_err.into();
        assert!(matches!(err, TestboardError::Io(_)));
    }
}
