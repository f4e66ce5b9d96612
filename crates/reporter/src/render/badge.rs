//! SVG 상태 배지
//!
//! 라벨/값 두 구간으로 된 평면 배지를 만듭니다. 각 구간의 폭은 글자 수 ×
//! [`CHAR_WIDTH`] + [`SEGMENT_PADDING`]으로 계산하므로 폰트 측정 없이 결정적입니다.
//!
//! | 배지 | 값 | 색상 |
//! |------|----|------|
//! | `tests.svg` | `14/15 passing` | 실패/에러가 하나라도 있으면 빨강, 아니면 성공률 임계값 |
//! | `coverage.svg` | `80.0%` | 커버리지 임계값 (커버리지 없으면 생성 안 함) |
//! | `success.svg` | `93.3%` | 성공률 임계값 |

use crate::render::{StatusLevel, Thresholds, escape_html};
use crate::types::AggregateSummary;

/// 글자당 폭 (px)
pub const CHAR_WIDTH: u32 = 7;
/// 구간별 좌우 여백 합 (px)
pub const SEGMENT_PADDING: u32 = 10;
/// 배지 높이 (px)
const BADGE_HEIGHT: u32 = 20;

/// 양호 색상
pub const COLOR_GOOD: &str = "#4c1";
/// 주의 색상
pub const COLOR_WARNING: &str = "#dfb317";
/// 위험 색상
pub const COLOR_CRITICAL: &str = "#e05d44";
/// 데이터 없음 색상
pub const COLOR_NO_DATA: &str = "#9f9f9f";
/// 라벨 구간 색상
const COLOR_LABEL: &str = "#555";

/// 테스트 배지 파일명
pub const TESTS_BADGE_FILE: &str = "tests.svg";
/// 커버리지 배지 파일명
pub const COVERAGE_BADGE_FILE: &str = "coverage.svg";
/// 성공률 배지 파일명
pub const SUCCESS_BADGE_FILE: &str = "success.svg";

/// 등급별 색상
pub fn level_color(level: StatusLevel) -> &'static str {
    match level {
        StatusLevel::Good => COLOR_GOOD,
        StatusLevel::Warning => COLOR_WARNING,
        StatusLevel::Critical => COLOR_CRITICAL,
    }
}

/// 배지 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    /// 왼쪽 라벨
    pub label: String,
    /// 오른쪽 값
    pub value: String,
    /// 값 구간 색상
    pub color: &'static str,
}

impl Badge {
    /// 배지를 생성합니다.
    pub fn new(label: impl Into<String>, value: impl Into<String>, color: &'static str) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color,
        }
    }

    /// 라벨 구간 폭
    pub fn label_width(&self) -> u32 {
        segment_width(&self.label)
    }

    /// 값 구간 폭
    pub fn value_width(&self) -> u32 {
        segment_width(&self.value)
    }

    /// 전체 폭
    pub fn width(&self) -> u32 {
        self.label_width() + self.value_width()
    }

    /// SVG 문서를 만듭니다.
    pub fn to_svg(&self) -> String {
        let lw = self.label_width();
        let vw = self.value_width();
        let width = lw + vw;
        let label = escape_html(&self.label);
        let value = escape_html(&self.value);
        let label_x = f64::from(lw) / 2.0;
        let value_x = f64::from(lw) + f64::from(vw) / 2.0;

        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{h}" role="img" aria-label="{label}: {value}">
<title>{label}: {value}</title>
<linearGradient id="s" x2="0" y2="100%"><stop offset="0" stop-color="#bbb" stop-opacity=".1"/><stop offset="1" stop-opacity=".1"/></linearGradient>
<clipPath id="r"><rect width="{width}" height="{h}" rx="3" fill="#fff"/></clipPath>
<g clip-path="url(#r)"><rect width="{lw}" height="{h}" fill="{label_color}"/><rect x="{lw}" width="{vw}" height="{h}" fill="{color}"/><rect width="{width}" height="{h}" fill="url(#s)"/></g>
<g fill="#fff" text-anchor="middle" font-family="Verdana,Geneva,DejaVu Sans,sans-serif" font-size="11">
<text x="{label_x:.1}" y="15" fill="#010101" fill-opacity=".3">{label}</text><text x="{label_x:.1}" y="14">{label}</text>
<text x="{value_x:.1}" y="15" fill="#010101" fill-opacity=".3">{value}</text><text x="{value_x:.1}" y="14">{value}</text>
</g>
</svg>
"##,
            h = BADGE_HEIGHT,
            label_color = COLOR_LABEL,
            color = self.color,
        )
    }
}

fn segment_width(text: &str) -> u32 {
    let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX / CHAR_WIDTH);
    chars.saturating_mul(CHAR_WIDTH).saturating_add(SEGMENT_PADDING)
}

/// 한 번의 실행에서 만드는 배지 묶음
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeSet {
    /// 테스트 통과 배지
    pub tests: Badge,
    /// 커버리지 배지 (커버리지 없으면 `None`)
    pub coverage: Option<Badge>,
    /// 성공률 배지
    pub success: Badge,
}

impl BadgeSet {
    /// (파일명, 배지) 목록. 커버리지 배지가 없으면 빠집니다.
    pub fn files(&self) -> Vec<(&'static str, &Badge)> {
        let mut files = vec![(TESTS_BADGE_FILE, &self.tests)];
        if let Some(coverage) = &self.coverage {
            files.push((COVERAGE_BADGE_FILE, coverage));
        }
        files.push((SUCCESS_BADGE_FILE, &self.success));
        files
    }
}

/// 배지 렌더러
#[derive(Debug, Clone, Copy, Default)]
pub struct BadgeRenderer {
    thresholds: Thresholds,
}

impl BadgeRenderer {
    /// 임계값을 지정하여 렌더러를 생성합니다.
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// 요약에서 배지 묶음을 만듭니다.
    pub fn badges(&self, summary: &AggregateSummary) -> BadgeSet {
        BadgeSet {
            tests: self.tests_badge(summary),
            coverage: self.coverage_badge(summary),
            success: self.success_badge(summary),
        }
    }

    fn tests_badge(&self, summary: &AggregateSummary) -> Badge {
        let total = &summary.total_summary;
        if total.total_tests == 0 {
            return Badge::new("tests", "no tests", COLOR_NO_DATA);
        }

        let color = if total.failed > 0 || total.errored > 0 {
            COLOR_CRITICAL
        } else {
            level_color(self.thresholds.classify_success(total.success_rate))
        };
        Badge::new(
            "tests",
            format!("{}/{} passing", total.passed, total.total_tests),
            color,
        )
    }

    fn coverage_badge(&self, summary: &AggregateSummary) -> Option<Badge> {
        let coverage = summary.coverage.as_ref()?;
        let percent = coverage.line_percent();
        Some(Badge::new(
            "coverage",
            format!("{percent:.1}%"),
            level_color(self.thresholds.classify_coverage(percent)),
        ))
    }

    fn success_badge(&self, summary: &AggregateSummary) -> Badge {
        let total = &summary.total_summary;
        if total.total_tests == 0 {
            return Badge::new("success", "n/a", COLOR_NO_DATA);
        }
        Badge::new(
            "success",
            format!("{:.1}%", total.success_rate),
            level_color(self.thresholds.classify_success(total.success_rate)),
        )
    }
}
