//! 인덱스(랜딩) 페이지
//!
//! 대시보드, 커버리지 상세, 원본 결과 디렉토리, 정규 요약, 배지로 가는 링크만 담습니다.
//! 링크 경로는 모두 리포트 루트 기준 상대 경로입니다.

use crate::render::escape_html;

/// 배지 링크
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeLink {
    /// 표시 이름 (alt 텍스트)
    pub label: String,
    /// 배지 SVG 경로
    pub path: String,
}

/// 인덱스 페이지 링크 목록
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLinks {
    /// 대시보드 경로
    pub dashboard: String,
    /// 커버리지 HTML 상세 경로 (없으면 `None`)
    pub coverage_detail: Option<String>,
    /// 원본 결과 디렉토리 경로
    pub raw_results: String,
    /// 정규 요약 문서 경로
    pub summary: String,
    /// 배지 목록
    pub badges: Vec<BadgeLink>,
}

/// 인덱스 페이지를 만듭니다.
pub fn compose(links: &IndexLinks) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Reports</title>\n<style>\n\
body { font-family: -apple-system, \"Segoe UI\", Helvetica, Arial, sans-serif; margin: 32px; color: #24292f; }\n\
ul { line-height: 1.8; }\n\
.badges img { margin-right: 8px; }\n\
.missing { color: #57606a; }\n\
</style>\n</head>\n<body>\n<h1>Reports</h1>\n",
    );

    if !links.badges.is_empty() {
        html.push_str("<p class=\"badges\">");
        for badge in &links.badges {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(&badge.path),
                escape_html(&badge.label)
            ));
        }
        html.push_str("</p>\n");
    }

    html.push_str("<ul>\n");
    link(&mut html, &links.dashboard, "Test dashboard");
    match &links.coverage_detail {
        Some(path) => link(&mut html, path, "Coverage details"),
        None => html.push_str("<li class=\"missing\">Coverage details not available</li>\n"),
    }
    link(&mut html, &links.raw_results, "Raw test results");
    link(&mut html, &links.summary, "Summary (JSON)");
    html.push_str("</ul>\n</body>\n</html>\n");
    html
}

fn link(html: &mut String, href: &str, text: &str) {
    html.push_str(&format!("<li><a href=\"{}\">{text}</a></li>\n", escape_html(href)));
}
