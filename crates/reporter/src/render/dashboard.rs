//! HTML 대시보드 렌더러
//!
//! [`DashboardRenderer`]는 외부 리소스 없이 열 수 있는 단일 HTML 문서를 만듭니다 (인라인 CSS).
//!
//! # 구성
//!
//! 1. 개요: 전체 테스트 수, 성공률, 라인 커버리지, 실행 시간
//! 2. 결과 분포: passed/failed/skipped/errored 비율 막대
//! 3. 커버리지: 라인/분기 백분율, covered/valid, 패키지 표 (커버리지 없으면 생략)
//! 4. 스위트별 블록: 성공률, 실행 시간, 실패/에러 케이스 상세

use crate::render::{Thresholds, escape_html, format_duration};
use crate::types::{AggregateSummary, CoverageReport, SuiteResult, TotalSummary};

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 0; background: #f6f8fa; color: #24292f; }
header { background: #24292f; color: #fff; padding: 16px 32px; }
header h1 { margin: 0; font-size: 22px; }
header .timestamp { color: #8b949e; font-size: 13px; }
main { padding: 24px 32px; max-width: 1100px; }
section { background: #fff; border: 1px solid #d0d7de; border-radius: 6px; padding: 16px 20px; margin-bottom: 20px; }
h2 { font-size: 17px; margin-top: 0; }
.cards { display: flex; gap: 16px; flex-wrap: wrap; }
.card { flex: 1; min-width: 160px; border: 1px solid #d0d7de; border-radius: 6px; padding: 12px; text-align: center; }
.card .value { font-size: 26px; font-weight: 600; }
.card .label { color: #57606a; font-size: 13px; }
.good { color: #1a7f37; }
.warning { color: #9a6700; }
.critical { color: #cf222e; }
.bar { display: flex; height: 18px; border-radius: 4px; overflow: hidden; background: #eaeef2; }
.bar .passed { background: #2da44e; }
.bar .failed { background: #cf222e; }
.bar .skipped { background: #bf8700; }
.bar .errored { background: #8250df; }
.legend span { margin-right: 16px; font-size: 13px; }
table { border-collapse: collapse; width: 100%; font-size: 13px; }
th, td { text-align: left; padding: 4px 8px; border-bottom: 1px solid #eaeef2; }
.suite { border-left: 4px solid #d0d7de; padding-left: 12px; margin-bottom: 16px; }
.suite h3 { margin: 0 0 4px 0; font-size: 15px; }
.suite .meta { color: #57606a; font-size: 13px; }
.case { margin: 6px 0; }
.case pre { background: #f6f8fa; padding: 8px; overflow-x: auto; font-size: 12px; white-space: pre-wrap; }
.empty { color: #57606a; font-style: italic; }
"#;

/// 대시보드 렌더러
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardRenderer {
    thresholds: Thresholds,
}

impl DashboardRenderer {
    /// 임계값을 지정하여 렌더러를 생성합니다.
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// 요약을 HTML 문서로 렌더링합니다.
    pub fn render(&self, summary: &AggregateSummary) -> String {
        let mut html = String::with_capacity(16 * 1024);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        html.push_str("<title>Test Report</title>\n<style>");
        html.push_str(STYLE);
        html.push_str("</style>\n</head>\n<body>\n");

        html.push_str(&format!(
            "<header><h1>Test Report</h1><div class=\"timestamp\">Generated {}</div></header>\n",
            summary.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        html.push_str("<main>\n");

        self.overview(&mut html, summary);
        if summary.is_empty() {
            html.push_str(
                "<section id=\"results\"><h2>Results</h2><p class=\"empty\">No tests found</p></section>\n",
            );
        } else {
            breakdown(&mut html, &summary.total_summary);
        }
        if let Some(coverage) = &summary.coverage {
            self.coverage(&mut html, coverage);
        }
        self.suites(&mut html, summary);

        html.push_str("</main>\n</body>\n</html>\n");
        html
    }

    fn overview(&self, html: &mut String, summary: &AggregateSummary) {
        let total = &summary.total_summary;
        let success_class = if summary.is_empty() {
            ""
        } else {
            self.thresholds.classify_success(total.success_rate).css_class()
        };
        let (coverage_text, coverage_class) = match &summary.coverage {
            Some(c) => (
                format!("{:.1}%", c.line_percent()),
                self.thresholds.classify_coverage(c.line_percent()).css_class(),
            ),
            None => ("N/A".to_owned(), ""),
        };

        html.push_str("<section id=\"overview\"><h2>Overview</h2><div class=\"cards\">\n");
        card(html, "Total Tests", &total.total_tests.to_string(), "");
        card(
            html,
            "Success Rate",
            &format!("{:.2}%", total.success_rate),
            success_class,
        );
        card(html, "Coverage", &coverage_text, coverage_class);
        card(html, "Duration", &format_duration(total.duration), "");
        html.push_str("</div></section>\n");
    }

    fn coverage(&self, html: &mut String, coverage: &CoverageReport) {
        let line = coverage.line_percent();
        let branch = coverage.branch_percent();

        html.push_str("<section id=\"coverage\"><h2>Coverage</h2>\n");
        html.push_str(&format!(
            "<p class=\"metric {}\">Line Coverage: {line:.1}%</p>\n",
            self.thresholds.classify_coverage(line).css_class()
        ));
        html.push_str(&format!(
            "<p class=\"metric {}\">Branch Coverage: {branch:.1}%</p>\n",
            self.thresholds.classify_coverage(branch).css_class()
        ));
        html.push_str(&format!(
            "<p>Lines: {} / {} covered &middot; Branches: {} / {} covered</p>\n",
            coverage.lines_covered,
            coverage.lines_valid,
            coverage.branches_covered,
            coverage.branches_valid
        ));

        if !coverage.packages.is_empty() {
            html.push_str(
                "<table><thead><tr><th>Package</th><th>Line</th><th>Branch</th><th>Classes</th></tr></thead><tbody>\n",
            );
            for package in &coverage.packages {
                let package_line = package.line_rate * 100.0;
                html.push_str(&format!(
                    "<tr><td>{}</td><td class=\"{}\">{:.1}%</td><td>{:.1}%</td><td>{}</td></tr>\n",
                    escape_html(&package.name),
                    self.thresholds.classify_coverage(package_line).css_class(),
                    package_line,
                    package.branch_rate * 100.0,
                    package.classes.len()
                ));
            }
            html.push_str("</tbody></table>\n");
        }
        html.push_str("</section>\n");
    }

    fn suites(&self, html: &mut String, summary: &AggregateSummary) {
        if summary.suites.is_empty() {
            return;
        }
        html.push_str("<section id=\"suites\"><h2>Suites</h2>\n");
        for suite in summary.suites.values() {
            self.suite_block(html, suite);
        }
        html.push_str("</section>\n");
    }

    fn suite_block(&self, html: &mut String, suite: &SuiteResult) {
        let rate = suite.success_rate();
        let class = if suite.total_tests == 0 {
            ""
        } else {
            self.thresholds.classify_success(rate).css_class()
        };

        html.push_str("<div class=\"suite\">\n");
        html.push_str(&format!(
            "<h3>{} <span class=\"{class}\">{rate:.2}%</span></h3>\n",
            escape_html(&suite.suite_name)
        ));
        html.push_str(&format!(
            "<div class=\"meta\">{} tests &middot; {} passed &middot; {} failed &middot; {} skipped &middot; {} errors &middot; {}</div>\n",
            suite.total_tests,
            suite.passed,
            suite.failed,
            suite.skipped,
            suite.errored,
            format_duration(suite.duration)
        ));

        for case in suite.problem_cases() {
            html.push_str(&format!(
                "<div class=\"case\"><strong class=\"critical\">{}</strong> {}::{}<pre>{}</pre></div>\n",
                case.status,
                escape_html(&case.classname),
                escape_html(&case.name),
                escape_html(case.detail.as_deref().unwrap_or(""))
            ));
        }
        html.push_str("</div>\n");
    }
}

fn card(html: &mut String, label: &str, value: &str, class: &str) {
    html.push_str(&format!(
        "<div class=\"card\"><div class=\"value {class}\">{}</div><div class=\"label\">{label}</div></div>\n",
        escape_html(value)
    ));
}

fn breakdown(html: &mut String, total: &TotalSummary) {
    let share = |n: u64| n as f64 / total.total_tests as f64 * 100.0;
    let segments = [
        ("passed", "Passed", total.passed),
        ("failed", "Failed", total.failed),
        ("skipped", "Skipped", total.skipped),
        ("errored", "Errors", total.errored),
    ];

    html.push_str("<section id=\"results\"><h2>Results</h2>\n<div class=\"bar\">");
    for (class, _, count) in segments {
        if count > 0 {
            html.push_str(&format!(
                "<div class=\"{class}\" style=\"width: {:.2}%\"></div>",
                share(count)
            ));
        }
    }
    html.push_str("</div>\n<p class=\"legend\">");
    for (_, label, count) in segments {
        html.push_str(&format!("<span>{label}: {count}</span>"));
    }
    html.push_str("</p>\n</section>\n");
}
