//! 리포터 도메인 타입
//!
//! 파서가 생성하고 집계기/렌더러가 소비하는 데이터 모델입니다.
//! 정규 요약 문서(`summary.json`)의 JSON 필드명은 camelCase입니다.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 테스트 케이스 결과 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// 통과
    Passed,
    /// 실패 (assertion)
    Failed,
    /// 건너뜀
    Skipped,
    /// 에러 (예외, 셋업 실패 등)
    Error,
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// 단일 테스트 케이스
///
/// `detail`은 상태가 `Passed`가 아닐 때만 존재합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// 테스트 이름
    pub name: String,
    /// 논리적 그룹 (클래스/모듈 경로)
    pub classname: String,
    /// 실행 시간 (초)
    pub duration: f64,
    /// 결과 상태
    pub status: TestStatus,
    /// 실패/에러/스킵 메시지
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// 테스트 카운트 묶음
///
/// 문서에 선언된 값이든 케이스를 세어 얻은 값이든 같은 형태로 다룹니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// 전체 테스트 수
    pub total: u64,
    /// 실패 수
    pub failed: u64,
    /// 스킵 수
    pub skipped: u64,
    /// 에러 수
    pub errored: u64,
}

impl Tally {
    /// 케이스 목록을 세어 카운트를 만듭니다.
    pub fn from_cases(cases: &[TestCase]) -> Self {
        let mut tally = Self {
            total: cases.len() as u64,
            ..Self::default()
        };
        for case in cases {
            match case.status {
                TestStatus::Failed => tally.failed += 1,
                TestStatus::Skipped => tally.skipped += 1,
                TestStatus::Error => tally.errored += 1,
                TestStatus::Passed => {}
            }
        }
        tally
    }

    /// 통과 수 (음수가 되지 않도록 포화 연산)
    pub fn passed(&self) -> u64 {
        self.total
            .saturating_sub(self.failed)
            .saturating_sub(self.skipped)
            .saturating_sub(self.errored)
    }

    /// 두 카운트를 합산합니다. 한 필드라도 넘치면 `None`.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Some(Self {
            total: self.total.checked_add(other.total)?,
            failed: self.failed.checked_add(other.failed)?,
            skipped: self.skipped.checked_add(other.skipped)?,
            errored: self.errored.checked_add(other.errored)?,
        })
    }

    /// 두 카운트를 합산합니다 (필드별 포화 연산).
    pub fn saturating_add(self, other: Self) -> Self {
        Self {
            total: self.total.saturating_add(other.total),
            failed: self.failed.saturating_add(other.failed),
            skipped: self.skipped.saturating_add(other.skipped),
            errored: self.errored.saturating_add(other.errored),
        }
    }

    /// [`normalized`](Self::normalized)와 같지만 실패+스킵+에러 합이 넘치면 `None`.
    ///
    /// 결과가 `Some`이면 `total == passed + failed + skipped + errored`가 성립합니다.
    pub fn checked_normalized(self) -> Option<Self> {
        let non_passed = self
            .failed
            .checked_add(self.skipped)?
            .checked_add(self.errored)?;
        Some(Self {
            total: self.total.max(non_passed),
            ..self
        })
    }

    /// 실패+스킵+에러가 전체를 넘으면 전체를 그 합으로 올립니다.
    ///
    /// 합이 `u64::MAX`를 넘는 경우에만 `total == passed + failed + skipped + errored`가
    /// 깨집니다. 파서는 [`checked_normalized`](Self::checked_normalized)로 이런 문서를 거부합니다.
    pub fn normalized(self) -> Self {
        let non_passed = self
            .failed
            .saturating_add(self.skipped)
            .saturating_add(self.errored);
        Self {
            total: self.total.max(non_passed),
            ..self
        }
    }
}

/// 두 시간(초)을 더합니다. 합이 유한하지 않으면 `f64::MAX`로 고정합니다.
///
/// `summary.json`은 비유한값을 표현할 수 없으므로 모든 시간 합산은 이 함수를 거칩니다.
pub fn add_seconds(a: f64, b: f64) -> f64 {
    (a + b).min(f64::MAX)
}

/// 시간(초) 목록의 합 ([`add_seconds`] 누적)
pub fn sum_seconds(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().fold(0.0, add_seconds)
}

/// 스위트 단위 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteResult {
    /// 스위트 이름 (아티팩트 파일명에서 유도)
    pub suite_name: String,
    /// 전체 테스트 수
    pub total_tests: u64,
    /// 통과 수
    pub passed: u64,
    /// 실패 수
    pub failed: u64,
    /// 스킵 수
    pub skipped: u64,
    /// 에러 수
    pub errored: u64,
    /// 실행 시간 (초)
    pub duration: f64,
    /// 케이스 목록 (문서 순서)
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

impl SuiteResult {
    /// 카운트와 케이스로 스위트 결과를 생성합니다.
    pub fn new(
        suite_name: impl Into<String>,
        tally: Tally,
        duration: f64,
        cases: Vec<TestCase>,
    ) -> Self {
        let tally = tally.normalized();
        Self {
            suite_name: suite_name.into(),
            total_tests: tally.total,
            passed: tally.passed(),
            failed: tally.failed,
            skipped: tally.skipped,
            errored: tally.errored,
            duration,
            cases,
        }
    }

    /// 케이스만으로 스위트 결과를 생성합니다 (카운트/시간은 케이스 합계).
    pub fn from_cases(suite_name: impl Into<String>, cases: Vec<TestCase>) -> Self {
        let tally = Tally::from_cases(&cases);
        let duration = sum_seconds(cases.iter().map(|c| c.duration));
        Self::new(suite_name, tally, duration, cases)
    }

    /// 카운트 묶음
    pub fn tally(&self) -> Tally {
        Tally {
            total: self.total_tests,
            failed: self.failed,
            skipped: self.skipped,
            errored: self.errored,
        }
    }

    /// 같은 이름의 다른 결과를 합산합니다 (카운트/시간 포화 합산, 케이스 연결).
    pub fn merge(&mut self, other: SuiteResult) {
        let tally = self.tally().saturating_add(other.tally()).normalized();
        self.total_tests = tally.total;
        self.passed = tally.passed();
        self.failed = tally.failed;
        self.skipped = tally.skipped;
        self.errored = tally.errored;
        self.duration = add_seconds(self.duration, other.duration);
        self.cases.extend(other.cases);
    }

    /// 스위트 성공률 (백분율, 소수점 둘째 자리)
    pub fn success_rate(&self) -> f64 {
        success_rate(self.passed, self.total_tests)
    }

    /// 실패 또는 에러 케이스
    pub fn problem_cases(&self) -> impl Iterator<Item = &TestCase> {
        self.cases
            .iter()
            .filter(|c| matches!(c.status, TestStatus::Failed | TestStatus::Error))
    }
}

/// 커버리지 클래스 단위 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageClass {
    /// 클래스 이름
    pub name: String,
    /// 소스 파일명
    pub filename: String,
    /// 라인 커버리지 비율 [0,1]
    pub line_rate: f64,
    /// 분기 커버리지 비율 [0,1]
    pub branch_rate: f64,
    /// 복잡도
    pub complexity: f64,
}

/// 커버리지 패키지 단위 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoveragePackage {
    /// 패키지 이름
    pub name: String,
    /// 라인 커버리지 비율 [0,1]
    pub line_rate: f64,
    /// 분기 커버리지 비율 [0,1]
    pub branch_rate: f64,
    /// 복잡도
    pub complexity: f64,
    /// 클래스 목록 (문서 순서)
    #[serde(default)]
    pub classes: Vec<CoverageClass>,
}

/// 커버리지 리포트 (실행당 최대 하나)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    /// 라인 커버리지 비율 [0,1]
    pub line_rate: f64,
    /// 분기 커버리지 비율 [0,1]
    pub branch_rate: f64,
    /// 커버된 라인 수
    pub lines_covered: u64,
    /// 유효 라인 수
    pub lines_valid: u64,
    /// 커버된 분기 수
    pub branches_covered: u64,
    /// 유효 분기 수
    pub branches_valid: u64,
    /// 복잡도
    pub complexity: f64,
    /// 패키지 목록 (문서 순서)
    #[serde(default)]
    pub packages: Vec<CoveragePackage>,
}

impl CoverageReport {
    /// 라인 커버리지 백분율
    pub fn line_percent(&self) -> f64 {
        self.line_rate * 100.0
    }

    /// 분기 커버리지 백분율
    pub fn branch_percent(&self) -> f64 {
        self.branch_rate * 100.0
    }
}

/// 전체 합계
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalSummary {
    /// 전체 테스트 수
    pub total_tests: u64,
    /// 통과 수
    pub passed: u64,
    /// 실패 수
    pub failed: u64,
    /// 스킵 수
    pub skipped: u64,
    /// 에러 수
    pub errored: u64,
    /// 전체 실행 시간 (초)
    pub duration: f64,
    /// 성공률 (백분율, 소수점 둘째 자리)
    pub success_rate: f64,
}

/// 정규 요약 문서
///
/// 모든 렌더러는 이 구조체 하나만 입력으로 받습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSummary {
    /// 집계 시각
    pub timestamp: DateTime<Utc>,
    /// 스위트별 결과 (발견 순서)
    pub suites: IndexMap<String, SuiteResult>,
    /// 전체 합계
    pub total_summary: TotalSummary,
    /// 커버리지 (없으면 null)
    #[serde(default)]
    pub coverage: Option<CoverageReport>,
}

impl AggregateSummary {
    /// 테스트가 하나도 없는지 여부
    pub fn is_empty(&self) -> bool {
        self.total_summary.total_tests == 0
    }
}

/// 성공률 = passed / total × 100 (소수점 둘째 자리 반올림, total이 0이면 0)
pub fn success_rate(passed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = passed as f64 / total as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}
