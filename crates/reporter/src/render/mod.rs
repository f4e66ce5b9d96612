//! 리포트 렌더러 -- HTML 대시보드, SVG 배지, 인덱스 페이지
//!
//! 모든 렌더러는 [`AggregateSummary`](crate::types::AggregateSummary)만 입력으로 받는
//! 순수 함수이며, 같은 입력에 대해 항상 같은 문자열을 만듭니다.
//! 파일 쓰기는 파이프라인이 담당합니다.
//!
//! # 상태 색상
//!
//! 성공률과 커버리지는 각각의 임계값([`Thresholds`])으로 [`StatusLevel`]을 정합니다.

pub mod badge;
pub mod dashboard;
pub mod index;

use serde::{Deserialize, Serialize};

pub use badge::{Badge, BadgeRenderer, BadgeSet};
pub use dashboard::DashboardRenderer;
pub use index::{BadgeLink, IndexLinks, compose};

/// 성공률 "good" 하한 (%)
pub const DEFAULT_SUCCESS_GOOD: f64 = 90.0;
/// 성공률 "warning" 하한 (%)
pub const DEFAULT_SUCCESS_WARNING: f64 = 70.0;
/// 커버리지 "good" 하한 (%)
pub const DEFAULT_COVERAGE_GOOD: f64 = 80.0;
/// 커버리지 "warning" 하한 (%)
pub const DEFAULT_COVERAGE_WARNING: f64 = 60.0;

/// 상태 등급
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// 양호
    Good,
    /// 주의
    Warning,
    /// 위험
    Critical,
}

impl StatusLevel {
    /// CSS 클래스 이름
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// 상태 색상 임계값 (백분율)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// 성공률 "good" 하한
    pub success_good: f64,
    /// 성공률 "warning" 하한
    pub success_warning: f64,
    /// 커버리지 "good" 하한
    pub coverage_good: f64,
    /// 커버리지 "warning" 하한
    pub coverage_warning: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            success_good: DEFAULT_SUCCESS_GOOD,
            success_warning: DEFAULT_SUCCESS_WARNING,
            coverage_good: DEFAULT_COVERAGE_GOOD,
            coverage_warning: DEFAULT_COVERAGE_WARNING,
        }
    }
}

impl Thresholds {
    /// 성공률 등급
    pub fn classify_success(&self, percent: f64) -> StatusLevel {
        classify(percent, self.success_good, self.success_warning)
    }

    /// 커버리지 등급
    pub fn classify_coverage(&self, percent: f64) -> StatusLevel {
        classify(percent, self.coverage_good, self.coverage_warning)
    }

    /// 범위(0-100)와 순서(warning <= good)를 검증합니다.
    ///
    /// 실패 시 (필드명, 사유)를 반환합니다.
    pub fn validate(&self) -> Result<(), (&'static str, String)> {
        let values = [
            ("thresholds.success_good", self.success_good),
            ("thresholds.success_warning", self.success_warning),
            ("thresholds.coverage_good", self.coverage_good),
            ("thresholds.coverage_warning", self.coverage_warning),
        ];
        for (field, value) in values {
            if !(0.0..=100.0).contains(&value) {
                return Err((field, "must be between 0 and 100".to_owned()));
            }
        }
        if self.success_warning > self.success_good {
            return Err((
                "thresholds.success_warning",
                "must not exceed success_good".to_owned(),
            ));
        }
        if self.coverage_warning > self.coverage_good {
            return Err((
                "thresholds.coverage_warning",
                "must not exceed coverage_good".to_owned(),
            ));
        }
        Ok(())
    }
}

fn classify(percent: f64, good: f64, warning: f64) -> StatusLevel {
    if percent >= good {
        StatusLevel::Good
    } else if percent >= warning {
        StatusLevel::Warning
    } else {
        StatusLevel::Critical
    }
}

/// HTML/SVG 텍스트 이스케이프
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// 실행 시간 표시 (`0.42s`, `12.3s`, `2m 05s`)
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0.00s".to_owned();
    }
    if seconds < 10.0 {
        format!("{seconds:.2}s")
    } else if seconds < 60.0 {
        format!("{seconds:.1}s")
    } else {
        let total = seconds.round() as u64;
        format!("{}m {:02}s", total / 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_boundaries() {
        let t = Thresholds::default();
        assert_eq!(t.classify_success(100.0), StatusLevel::Good);
        assert_eq!(t.classify_success(90.0), StatusLevel::Good);
        assert_eq!(t.classify_success(89.99), StatusLevel::Warning);
        assert_eq!(t.classify_success(70.0), StatusLevel::Warning);
        assert_eq!(t.classify_success(69.99), StatusLevel::Critical);
        assert_eq!(t.classify_success(0.0), StatusLevel::Critical);
    }

    #[test]
    fn coverage_boundaries() {
        let t = Thresholds::default();
        assert_eq!(t.classify_coverage(80.0), StatusLevel::Good);
        assert_eq!(t.classify_coverage(79.9), StatusLevel::Warning);
        assert_eq!(t.classify_coverage(60.0), StatusLevel::Warning);
        assert_eq!(t.classify_coverage(59.9), StatusLevel::Critical);
    }

    #[test]
    fn thresholds_validate() {
        Thresholds::default().validate().unwrap();

        let out_of_range = Thresholds {
            success_good: 120.0,
            ..Default::default()
        };
        assert_eq!(
            out_of_range.validate().unwrap_err().0,
            "thresholds.success_good"
        );

        let inverted = Thresholds {
            success_good: 50.0,
            success_warning: 60.0,
            ..Default::default()
        };
        assert_eq!(inverted.validate().unwrap_err().0, "thresholds.success_warning");
    }

    #[test]
    fn escape_html_special_chars() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn format_duration_ranges() {
        assert_eq!(format_duration(0.4234), "0.42s");
        assert_eq!(format_duration(12.34), "12.3s");
        assert_eq!(format_duration(125.0), "2m 05s");
        assert_eq!(format_duration(f64::NAN), "0.00s");
    }

    #[test]
    fn css_classes() {
        assert_eq!(StatusLevel::Good.css_class(), "good");
        assert_eq!(StatusLevel::Critical.css_class(), "critical");
    }
}
