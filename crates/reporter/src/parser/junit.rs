//! JUnit XML 결과 문서 파서
//!
//! [`JunitParser`]는 JUnit 형식의 테스트 결과 문서를 [`SuiteResult`]로 변환합니다.
//!
//! # 지원하는 루트 형태
//!
//! ```xml
//! <testsuites tests="3" failures="1" errors="0" skipped="0" time="1.5">
//!   <testsuite name="api" tests="3" failures="1" errors="0" skipped="0" time="1.5">
//!     <testcase name="creates_user" classname="api.users" time="0.5"/>
//!     <testcase name="deletes_user" classname="api.users" time="0.5">
//!       <failure message="expected 204, got 500">...</failure>
//!     </testcase>
//!   </testsuite>
//! </testsuites>
//! ```
//!
//! `<testsuite>` 단일 루트도 허용합니다. 어느 쪽이든 먼저 루트 요소 이름을 확인한 뒤
//! 해당 형태로 역직렬화하여 같은 "스위트 목록" 모델로 정규화합니다.
//!
//! # 카운트 우선순위
//!
//! 필드별로 다음 순서를 따릅니다.
//!
//! 1. `<testsuites>` 루트에 선언된 값
//! 2. 각 `<testsuite>`에 선언된 값의 합
//! 3. 케이스를 직접 센 값
//!
//! 실행 시간도 같은 순서를 따릅니다.
//!
//! 카운트 합산이 `u64`를 넘치면 문서 전체를 파싱 실패로 처리합니다.
//! 시간 합산은 `f64::MAX`에서 멈춥니다.

use std::path::Path;

use quick_xml::events::Event;
use serde::Deserialize;
use tracing::debug;

use crate::error::ReporterError;
use crate::parser::{ResultParser, parse_count, parse_seconds};
use crate::types::{SuiteResult, Tally, TestCase, TestStatus, add_seconds, sum_seconds};

/// 카운트 합산이 넘쳤을 때의 파싱 실패 사유
const COUNT_OVERFLOW: &str = "test count overflow";

/// JUnit XML 파서
pub struct JunitParser;

/// 문서 루트 형태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootKind {
    /// `<testsuites>` -- 여러 스위트
    Suites,
    /// `<testsuite>` -- 단일 스위트
    Suite,
}

/// `<testsuites>` 루트 (파싱용)
#[derive(Deserialize)]
struct RawSuites {
    #[serde(rename = "@tests", default)]
    tests: Option<String>,
    #[serde(rename = "@failures", default)]
    failures: Option<String>,
    #[serde(rename = "@errors", default)]
    errors: Option<String>,
    #[serde(rename = "@skipped", default)]
    skipped: Option<String>,
    #[serde(rename = "@time", default)]
    time: Option<String>,
    #[serde(default)]
    testsuite: Vec<RawSuite>,
}

/// `<testsuite>` 요소 (파싱용)
#[derive(Deserialize)]
struct RawSuite {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(rename = "@tests", default)]
    tests: Option<String>,
    #[serde(rename = "@failures", default)]
    failures: Option<String>,
    #[serde(rename = "@errors", default)]
    errors: Option<String>,
    #[serde(rename = "@skipped", default)]
    skipped: Option<String>,
    #[serde(rename = "@time", default)]
    time: Option<String>,
    #[serde(default)]
    testcase: Vec<RawCase>,
    /// 일부 도구가 만드는 중첩 스위트
    #[serde(default)]
    testsuite: Vec<RawSuite>,
}

/// `<testcase>` 요소 (파싱용)
#[derive(Deserialize)]
struct RawCase {
    #[serde(rename = "@name", default)]
    name: Option<String>,
    #[serde(rename = "@classname", default)]
    classname: Option<String>,
    #[serde(rename = "@time", default)]
    time: Option<String>,
    #[serde(default)]
    failure: Vec<RawMarker>,
    #[serde(default)]
    error: Vec<RawMarker>,
    #[serde(default)]
    skipped: Vec<RawMarker>,
}

/// `<failure>`, `<error>`, `<skipped>` 마커 (파싱용)
#[derive(Deserialize)]
struct RawMarker {
    #[serde(rename = "@message", default)]
    message: Option<String>,
    #[serde(rename = "@type", default)]
    kind: Option<String>,
    #[serde(rename = "$text", default)]
    text: Option<String>,
}

/// 문서에 선언된 카운트
#[derive(Debug, Default, Clone, Copy)]
struct Declared {
    tests: Option<u64>,
    failures: Option<u64>,
    errors: Option<u64>,
    skipped: Option<u64>,
    time: Option<f64>,
}

impl Declared {
    fn from_attrs(
        tests: Option<&str>,
        failures: Option<&str>,
        errors: Option<&str>,
        skipped: Option<&str>,
        time: Option<&str>,
    ) -> Self {
        Self {
            tests: parse_count(tests),
            failures: parse_count(failures),
            errors: parse_count(errors),
            skipped: parse_count(skipped),
            time: parse_seconds(time),
        }
    }

    /// 선언된 필드는 그대로, 빠진 필드는 `fallback`으로 채운 뒤 정규화합니다.
    ///
    /// 실패+스킵+에러 합이 `u64`를 넘치면 파싱 실패 사유를 반환합니다.
    fn resolve(&self, fallback: Tally) -> Result<Tally, String> {
        Tally {
            total: self.tests.unwrap_or(fallback.total),
            failed: self.failures.unwrap_or(fallback.failed),
            skipped: self.skipped.unwrap_or(fallback.skipped),
            errored: self.errors.unwrap_or(fallback.errored),
        }
        .checked_normalized()
        .ok_or_else(|| COUNT_OVERFLOW.to_owned())
    }
}

/// 스위트 하나(중첩 포함)를 펼친 결과
struct Collected {
    tally: Tally,
    duration: f64,
    cases: Vec<TestCase>,
}

impl RawSuite {
    fn collect(self) -> Result<Collected, String> {
        let declared = Declared::from_attrs(
            self.tests.as_deref(),
            self.failures.as_deref(),
            self.errors.as_deref(),
            self.skipped.as_deref(),
            self.time.as_deref(),
        );

        let mut cases: Vec<TestCase> = self.testcase.into_iter().map(RawCase::into_case).collect();
        let mut walked = Tally::from_cases(&cases);
        let mut walked_duration = sum_seconds(cases.iter().map(|c| c.duration));

        for nested in self.testsuite {
            let inner = nested.collect()?;
            walked = walked
                .checked_add(inner.tally)
                .ok_or_else(|| COUNT_OVERFLOW.to_owned())?;
            walked_duration = add_seconds(walked_duration, inner.duration);
            cases.extend(inner.cases);
        }

        if declared.tests.is_some_and(|tests| tests != walked.total) {
            debug!(
                suite = self.name.as_deref().unwrap_or(""),
                declared = declared.tests,
                walked = walked.total,
                "declared test count differs from listed cases"
            );
        }

        Ok(Collected {
            tally: declared.resolve(walked)?,
            duration: declared.time.unwrap_or(walked_duration),
            cases,
        })
    }
}

impl RawSuites {
    fn collect(self) -> Result<Collected, String> {
        let declared = Declared::from_attrs(
            self.tests.as_deref(),
            self.failures.as_deref(),
            self.errors.as_deref(),
            self.skipped.as_deref(),
            self.time.as_deref(),
        );

        let mut summed = Tally::default();
        let mut summed_duration = 0.0;
        let mut cases = Vec::new();
        for suite in self.testsuite {
            let inner = suite.collect()?;
            summed = summed
                .checked_add(inner.tally)
                .ok_or_else(|| COUNT_OVERFLOW.to_owned())?;
            summed_duration = add_seconds(summed_duration, inner.duration);
            cases.extend(inner.cases);
        }

        Ok(Collected {
            tally: declared.resolve(summed)?,
            duration: declared.time.unwrap_or(summed_duration),
            cases,
        })
    }
}

impl RawCase {
    fn into_case(self) -> TestCase {
        // 우선순위: failure > error > skipped
        let (status, marker) = if let Some(m) = self.failure.into_iter().next() {
            (TestStatus::Failed, Some(m))
        } else if let Some(m) = self.error.into_iter().next() {
            (TestStatus::Error, Some(m))
        } else if let Some(m) = self.skipped.into_iter().next() {
            (TestStatus::Skipped, Some(m))
        } else {
            (TestStatus::Passed, None)
        };

        TestCase {
            name: self.name.unwrap_or_default(),
            classname: self.classname.unwrap_or_default(),
            duration: parse_seconds(self.time.as_deref()).unwrap_or(0.0),
            status,
            detail: marker.map(RawMarker::into_detail),
        }
    }
}

impl RawMarker {
    /// 메시지와 본문을 합쳐 상세 텍스트를 만듭니다. 둘 다 없으면 `type` 속성.
    fn into_detail(self) -> String {
        let message = self
            .message
            .map(|m| m.trim().to_owned())
            .filter(|m| !m.is_empty());
        let text = self
            .text
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty());

        match (message, text) {
            (Some(m), Some(t)) if m != t => format!("{m}\n{t}"),
            (Some(m), _) => m,
            (None, Some(t)) => t,
            (None, None) => self.kind.unwrap_or_default(),
        }
    }
}

/// 첫 번째 요소의 이름으로 루트 형태를 판별합니다.
///
/// XML 선언, 주석, 처리 명령, DOCTYPE, 공백은 건너뜁니다.
fn sniff_root(content: &str) -> Result<RootKind, String> {
    let mut reader = quick_xml::Reader::from_str(content);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return match e.local_name().as_ref() {
                    b"testsuites" => Ok(RootKind::Suites),
                    b"testsuite" => Ok(RootKind::Suite),
                    other => Err(format!(
                        "unexpected root element <{}>, expected <testsuites> or <testsuite>",
                        String::from_utf8_lossy(other)
                    )),
                };
            }
            Ok(Event::Eof) => return Err("document has no root element".to_owned()),
            Ok(_) => continue,
            Err(e) => return Err(e.to_string()),
        }
    }
}

impl ResultParser for JunitParser {
    fn name(&self) -> &str {
        "junit"
    }

    fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
    }

    fn parse(
        &self,
        content: &str,
        suite_name: &str,
        source_path: &str,
    ) -> Result<SuiteResult, ReporterError> {
        let parse_error = |reason: String| ReporterError::ResultParse {
            path: source_path.to_owned(),
            reason,
        };

        let collected = match sniff_root(content).map_err(parse_error)? {
            RootKind::Suites => quick_xml::de::from_str::<RawSuites>(content)
                .map_err(|e| parse_error(e.to_string()))?
                .collect(),
            RootKind::Suite => quick_xml::de::from_str::<RawSuite>(content)
                .map_err(|e| parse_error(e.to_string()))?
                .collect(),
        }
        .map_err(parse_error)?;

        Ok(SuiteResult::new(
            suite_name,
            collected.tally,
            collected.duration,
            collected.cases,
        ))
    }
}
