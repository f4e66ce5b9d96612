//! 아티팩트 파서 -- JUnit 결과 문서, Cobertura 커버리지 문서
//!
//! [`ResultParser`] trait은 테스트 결과 문서 형식의 파서가 구현해야 하는 인터페이스입니다.
//! 커버리지 문서는 실행당 하나뿐이므로 [`CoberturaParser`]를 직접 사용합니다.
//!
//! # 지원 형식
//!
//! - JUnit XML (`<testsuite>` / `<testsuites>` 루트) -- [`JunitParser`]
//! - Cobertura XML (`<coverage>` 루트) -- [`CoberturaParser`]
//!
//! # 숫자 파싱
//!
//! 도구마다 숫자 표기가 조금씩 다르므로 모든 숫자 속성은 문자열로 받은 뒤
//! [`parse_count`], [`parse_seconds`], [`parse_rate`]로 관대하게 해석합니다.
//! 해석할 수 없는 값은 `None`이 되며, 호출 측에서 대체값을 정합니다.

pub mod cobertura;
pub mod junit;

use std::path::Path;

pub use cobertura::CoberturaParser;
pub use junit::JunitParser;

use crate::error::ReporterError;
use crate::types::SuiteResult;

/// 테스트 결과 문서 파서 trait
///
/// 문서 하나를 [`SuiteResult`] 하나로 변환합니다. 실패 시 부분 결과를 만들지 않습니다.
pub trait ResultParser: Send + Sync {
    /// 파서 이름 (로그용)
    fn name(&self) -> &str;

    /// 주어진 경로의 파일을 이 파서가 처리할 수 있는지 확인합니다.
    fn can_parse(&self, path: &Path) -> bool;

    /// 문서 내용을 파싱하여 스위트 결과를 반환합니다.
    ///
    /// # Arguments
    ///
    /// - `content`: 문서 내용 (UTF-8 문자열)
    /// - `suite_name`: 파일명에서 유도한 스위트 이름
    /// - `source_path`: 원본 파일 경로 (에러 메시지용)
    fn parse(
        &self,
        content: &str,
        suite_name: &str,
        source_path: &str,
    ) -> Result<SuiteResult, ReporterError>;
}

/// 크기 제한을 확인한 뒤 아티팩트 파일을 읽습니다 (동기 I/O).
///
/// # Errors
///
/// - 파일 크기가 `max_size`를 넘으면 `ReporterError::FileTooBig`
/// - 읽기 실패 또는 UTF-8이 아니면 `ReporterError::Io`
pub fn read_artifact(path: &Path, max_size: usize) -> Result<String, ReporterError> {
    let metadata = std::fs::metadata(path).map_err(|e| ReporterError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    if size > max_size {
        return Err(ReporterError::FileTooBig {
            path: path.display().to_string(),
            size,
            max: max_size,
        });
    }

    std::fs::read_to_string(path).map_err(|e| ReporterError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// 개수 속성을 해석합니다.
///
/// `"12"`, `" 12 "`, `"12.0"`을 모두 12로 봅니다. 음수, 비유한값, 숫자가 아니면 `None`.
pub fn parse_count(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim();
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value.trunc() as u64)
    } else {
        None
    }
}

/// 시간(초) 속성을 해석합니다.
///
/// 천 단위 구분 쉼표(`"1,234.5"`)를 허용합니다. 음수, 비유한값은 `None`.
pub fn parse_seconds(raw: Option<&str>) -> Option<f64> {
    let cleaned: String = raw?.trim().chars().filter(|c| *c != ',').collect();
    let value = cleaned.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// 비율 속성을 해석합니다. 결과는 [0, 1]로 고정됩니다.
pub fn parse_rate(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim().parse::<f64>().ok()?;
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_count_accepts_integer_and_float_forms() {
        assert_eq!(parse_count(Some("12")), Some(12));
        assert_eq!(parse_count(Some(" 7 ")), Some(7));
        assert_eq!(parse_count(Some("3.0")), Some(3));
    }

    #[test]
    fn parse_count_rejects_garbage() {
        assert_eq!(parse_count(None), None);
        assert_eq!(parse_count(Some("")), None);
        assert_eq!(parse_count(Some("many")), None);
        assert_eq!(parse_count(Some("-1")), None);
        assert_eq!(parse_count(Some("NaN")), None);
    }

    #[test]
    fn parse_seconds_handles_thousands_separator() {
        assert_eq!(parse_seconds(Some("1,234.5")), Some(1234.5));
        assert_eq!(parse_seconds(Some("0.25")), Some(0.25));
        assert_eq!(parse_seconds(Some("-0.1")), None);
        assert_eq!(parse_seconds(Some("inf")), None);
    }

    #[test]
    fn parse_rate_is_clamped() {
        assert_eq!(parse_rate(Some("0.8")), Some(0.8));
        assert_eq!(parse_rate(Some("1.5")), Some(1.0));
        assert_eq!(parse_rate(Some("-0.2")), Some(0.0));
        assert_eq!(parse_rate(Some("n/a")), None);
    }

    #[test]
    fn read_artifact_enforces_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junit-big.xml");
        std::fs::write(&path, "<testsuite tests=\"1\"/>").unwrap();

        let err = read_artifact(&path, 4).unwrap_err();
        assert!(matches!(err, ReporterError::FileTooBig { max: 4, .. }));

        let content = read_artifact(&path, 1024).unwrap();
        assert!(content.starts_with("<testsuite"));
    }

    #[test]
    fn read_artifact_missing_file_is_io_error() {
        let err = read_artifact(Path::new("/nonexistent/junit-x.xml"), 1024).unwrap_err();
        assert!(matches!(err, ReporterError::Io { .. }));
    }
}
