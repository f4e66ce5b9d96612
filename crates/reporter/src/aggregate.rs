//! 집계기
//!
//! [`Aggregator`]는 스위트 결과 목록과 선택적 커버리지를 하나의 [`AggregateSummary`]로 합칩니다.
//!
//! - 스위트 맵은 발견 순서를 유지합니다 ([`IndexMap`]).
//! - 전체 합계는 스위트 순서와 무관합니다.
//! - 이름이 같은 스위트는 [`CollisionPolicy`]에 따라 합산하거나 거부합니다.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::warn;

use crate::config::CollisionPolicy;
use crate::error::ReporterError;
use crate::types::{
    AggregateSummary, CoverageReport, SuiteResult, Tally, TotalSummary, add_seconds, success_rate,
};

/// 스위트 결과 집계기
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    policy: CollisionPolicy,
}

impl Aggregator {
    /// 충돌 정책을 지정하여 집계기를 생성합니다.
    pub fn new(policy: CollisionPolicy) -> Self {
        Self { policy }
    }

    /// 현재 시각으로 집계합니다.
    pub fn aggregate(
        &self,
        suites: Vec<SuiteResult>,
        coverage: Option<CoverageReport>,
    ) -> Result<AggregateSummary, ReporterError> {
        self.aggregate_at(suites, coverage, Utc::now())
    }

    /// 지정한 시각으로 집계합니다.
    ///
    /// # Errors
    ///
    /// `Reject` 정책에서 스위트 이름이 겹치면 `ReporterError::SuiteCollision`
    pub fn aggregate_at(
        &self,
        suites: Vec<SuiteResult>,
        coverage: Option<CoverageReport>,
        timestamp: DateTime<Utc>,
    ) -> Result<AggregateSummary, ReporterError> {
        let mut by_name: IndexMap<String, SuiteResult> = IndexMap::with_capacity(suites.len());

        for suite in suites {
            match by_name.entry(suite.suite_name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(suite);
                }
                Entry::Occupied(mut slot) => match self.policy {
                    CollisionPolicy::Reject => {
                        return Err(ReporterError::SuiteCollision {
                            suite: suite.suite_name,
                        });
                    }
                    CollisionPolicy::Merge => {
                        warn!(
                            suite = %suite.suite_name,
                            "suite name produced by more than one artifact, merging results"
                        );
                        slot.get_mut().merge(suite);
                    }
                },
            }
        }

        let total_summary = totals(by_name.values());

        Ok(AggregateSummary {
            timestamp,
            suites: by_name,
            total_summary,
            coverage,
        })
    }
}

/// 스위트 결과의 전체 합계를 계산합니다.
///
/// 카운트는 포화 합산, 시간은 [`add_seconds`]로 합산하므로 어떤 입력에서도 패닉하지 않고
/// 결과 시간은 항상 유한합니다.
pub fn totals<'a>(suites: impl IntoIterator<Item = &'a SuiteResult>) -> TotalSummary {
    let mut tally = Tally::default();
    let mut duration = 0.0;
    for suite in suites {
        tally = tally.saturating_add(suite.tally());
        duration = add_seconds(duration, suite.duration);
    }

    let passed = tally.passed();
    TotalSummary {
        total_tests: tally.total,
        passed,
        failed: tally.failed,
        skipped: tally.skipped,
        errored: tally.errored,
        duration,
        success_rate: success_rate(passed, tally.total),
    }
}
