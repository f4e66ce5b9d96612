//! Cobertura XML 커버리지 문서 파서
//!
//! [`CoberturaParser`]는 Cobertura 형식의 커버리지 문서를 [`CoverageReport`]로 변환합니다.
//!
//! # 문서 형식 예시
//!
//! ```xml
//! <coverage line-rate="0.8" branch-rate="0.5" lines-covered="80" lines-valid="100"
//!           branches-covered="5" branches-valid="10" complexity="0">
//!   <packages>
//!     <package name="app" line-rate="0.8" branch-rate="0.5" complexity="0">
//!       <classes>
//!         <class name="main" filename="app/main.py" line-rate="0.8" branch-rate="0.5"/>
//!       </classes>
//!     </package>
//!   </packages>
//! </coverage>
//! ```
//!
//! 숫자 속성은 없거나 해석할 수 없으면 0입니다. 루트의 `line-rate`/`branch-rate`가
//! 없으면 covered/valid에서 비율을 계산합니다.

use quick_xml::events::Event;
use serde::Deserialize;

use crate::error::ReporterError;
use crate::parser::{parse_count, parse_rate};
use crate::types::{CoverageClass, CoveragePackage, CoverageReport};

/// Cobertura XML 파서
pub struct CoberturaParser;

/// `<coverage>` 루트 (파싱용)
#[derive(Deserialize)]
struct RawCoverage {
    #[serde(rename = "@line-rate", default)]
    line_rate: Option<String>,
    #[serde(rename = "@branch-rate", default)]
    branch_rate: Option<String>,
    #[serde(rename = "@lines-covered", default)]
    lines_covered: Option<String>,
    #[serde(rename = "@lines-valid", default)]
    lines_valid: Option<String>,
    #[serde(rename = "@branches-covered", default)]
    branches_covered: Option<String>,
    #[serde(rename = "@branches-valid", default)]
    branches_valid: Option<String>,
    #[serde(rename = "@complexity", default)]
    complexity: Option<String>,
    #[serde(default)]
    packages: Option<RawPackages>,
}

#[derive(Deserialize)]
struct RawPackages {
    #[serde(default)]
    package: Vec<RawPackage>,
}

#[derive(Deserialize)]
struct RawPackage {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(rename = "@line-rate", default)]
    line_rate: Option<String>,
    #[serde(rename = "@branch-rate", default)]
    branch_rate: Option<String>,
    #[serde(rename = "@complexity", default)]
    complexity: Option<String>,
    #[serde(default)]
    classes: Option<RawClasses>,
}

#[derive(Deserialize)]
struct RawClasses {
    #[serde(default)]
    class: Vec<RawClass>,
}

#[derive(Deserialize)]
struct RawClass {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(rename = "@filename", default)]
    filename: Option<String>,
    #[serde(rename = "@line-rate", default)]
    line_rate: Option<String>,
    #[serde(rename = "@branch-rate", default)]
    branch_rate: Option<String>,
    #[serde(rename = "@complexity", default)]
    complexity: Option<String>,
}

/// 복잡도 속성 (음수/비유한값/숫자 아님 -> 0)
fn parse_complexity(raw: Option<&str>) -> f64 {
    raw.and_then(|r| r.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// 비율 속성이 없으면 covered/valid로 계산합니다.
fn rate_or_ratio(raw: Option<&str>, covered: u64, valid: u64) -> f64 {
    parse_rate(raw).unwrap_or_else(|| {
        if valid == 0 {
            0.0
        } else {
            (covered as f64 / valid as f64).clamp(0.0, 1.0)
        }
    })
}

impl RawClass {
    fn into_class(self) -> CoverageClass {
        CoverageClass {
            name: self.name.unwrap_or_default(),
            filename: self.filename.unwrap_or_default(),
            line_rate: parse_rate(self.line_rate.as_deref()).unwrap_or(0.0),
            branch_rate: parse_rate(self.branch_rate.as_deref()).unwrap_or(0.0),
            complexity: parse_complexity(self.complexity.as_deref()),
        }
    }
}

impl RawPackage {
    fn into_package(self) -> CoveragePackage {
        CoveragePackage {
            name: self.name.unwrap_or_default(),
            line_rate: parse_rate(self.line_rate.as_deref()).unwrap_or(0.0),
            branch_rate: parse_rate(self.branch_rate.as_deref()).unwrap_or(0.0),
            complexity: parse_complexity(self.complexity.as_deref()),
            classes: self
                .classes
                .map(|c| c.class.into_iter().map(RawClass::into_class).collect())
                .unwrap_or_default(),
        }
    }
}

impl CoberturaParser {
    /// 커버리지 문서를 파싱합니다.
    ///
    /// # Errors
    ///
    /// 루트가 `<coverage>`가 아니거나 XML이 깨져 있으면 `ReporterError::CoverageParse`
    pub fn parse(&self, content: &str, source_path: &str) -> Result<CoverageReport, ReporterError> {
        let parse_error = |reason: String| ReporterError::CoverageParse {
            path: source_path.to_owned(),
            reason,
        };

        check_root(content).map_err(parse_error)?;
        let raw: RawCoverage =
            quick_xml::de::from_str(content).map_err(|e| parse_error(e.to_string()))?;

        let lines_covered = parse_count(raw.lines_covered.as_deref()).unwrap_or(0);
        let lines_valid = parse_count(raw.lines_valid.as_deref()).unwrap_or(0);
        let branches_covered = parse_count(raw.branches_covered.as_deref()).unwrap_or(0);
        let branches_valid = parse_count(raw.branches_valid.as_deref()).unwrap_or(0);

        Ok(CoverageReport {
            line_rate: rate_or_ratio(raw.line_rate.as_deref(), lines_covered, lines_valid),
            branch_rate: rate_or_ratio(
                raw.branch_rate.as_deref(),
                branches_covered,
                branches_valid,
            ),
            lines_covered,
            lines_valid,
            branches_covered,
            branches_valid,
            complexity: parse_complexity(raw.complexity.as_deref()),
            packages: raw
                .packages
                .map(|p| p.package.into_iter().map(RawPackage::into_package).collect())
                .unwrap_or_default(),
        })
    }
}

fn check_root(content: &str) -> Result<(), String> {
    let mut reader = quick_xml::Reader::from_str(content);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return if e.local_name().as_ref() == b"coverage" {
                    Ok(())
                } else {
                    Err(format!(
                        "unexpected root element <{}>, expected <coverage>",
                        String::from_utf8_lossy(e.local_name().as_ref())
                    ))
                };
            }
            Ok(Event::Eof) => return Err("document has no root element".to_owned()),
            Ok(_) => continue,
            Err(e) => return Err(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_COVERAGE: &str = r#"<?xml version="1.0" ?>
<!DOCTYPE coverage SYSTEM "http://cobertura.sourceforge.net/xml/coverage-04.dtd">
<coverage version="7.4" timestamp="1700000000" line-rate="0.8" branch-rate="0.5"
          lines-covered="80" lines-valid="100" branches-covered="5" branches-valid="10" complexity="0">
  <sources><source>/src</source></sources>
  <packages>
    <package name="app" line-rate="0.9" branch-rate="0.5" complexity="0">
      <classes>
        <class name="main.py" filename="app/main.py" complexity="0" line-rate="0.95" branch-rate="0.5">
          <methods/>
          <lines><line number="1" hits="1"/></lines>
        </class>
        <class name="util.py" filename="app/util.py" complexity="0" line-rate="0.85" branch-rate="0.5"/>
      </classes>
    </package>
    <package name="app.db" line-rate="0.6" branch-rate="0" complexity="2"/>
  </packages>
</coverage>
"#;

    fn parse(content: &str) -> Result<CoverageReport, ReporterError> {
        CoberturaParser.parse(content, "coverage/coverage.xml")
    }

    #[test]
    fn parses_root_metrics() {
        let report = parse(SAMPLE_COVERAGE).unwrap();
        assert!((report.line_rate - 0.8).abs() < 1e-9);
        assert!((report.branch_rate - 0.5).abs() < 1e-9);
        assert_eq!(report.lines_covered, 80);
        assert_eq!(report.lines_valid, 100);
        assert_eq!(report.branches_covered, 5);
        assert_eq!(report.branches_valid, 10);
        assert!((report.line_percent() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn preserves_package_and_class_order() {
        let report = parse(SAMPLE_COVERAGE).unwrap();
        let packages: Vec<_> = report.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(packages, vec!["app", "app.db"]);
        let classes: Vec<_> = report.packages[0]
            .classes
            .iter()
            .map(|c| c.filename.as_str())
            .collect();
        assert_eq!(classes, vec!["app/main.py", "app/util.py"]);
        assert!(report.packages[1].classes.is_empty());
        assert_eq!(report.packages[1].complexity, 2.0);
    }

    #[test]
    fn missing_numbers_default_to_zero() {
        let report = parse(r#"<coverage lines-covered="abc"/>"#).unwrap();
        assert_eq!(report.line_rate, 0.0);
        assert_eq!(report.branch_rate, 0.0);
        assert_eq!(report.lines_covered, 0);
        assert_eq!(report.lines_valid, 0);
        assert!(report.packages.is_empty());
    }

    #[test]
    fn rate_falls_back_to_covered_over_valid() {
        let report =
            parse(r#"<coverage lines-covered="30" lines-valid="40" branches-valid="0"/>"#).unwrap();
        assert!((report.line_rate - 0.75).abs() < 1e-9);
        assert_eq!(report.branch_rate, 0.0);
    }

    #[test]
    fn declared_rate_wins_over_ratio() {
        let report =
            parse(r#"<coverage line-rate="0.5" lines-covered="30" lines-valid="40"/>"#).unwrap();
        assert!((report.line_rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn wrong_root_is_parse_error() {
        let err = parse(r#"<testsuite tests="1"/>"#).unwrap_err();
        match err {
            ReporterError::CoverageParse { path, reason } => {
                assert_eq!(path, "coverage/coverage.xml");
                assert!(reason.contains("testsuite"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_document_is_parse_error() {
        assert!(parse(r#"<coverage line-rate="0.5"><packages>"#).is_err());
        assert!(parse("").is_err());
    }
}
