//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 리포터는 이 상수를 사용하여 `metrics::counter!()`, `metrics::gauge!()`,
//! `metrics::histogram!()` 매크로를 호출합니다.
//!
//! 레코더가 설치되지 않은 경우 매크로 호출은 아무 일도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `testboard_`
//! - 모듈명: `reporter_`
//! - 접미어: `_total` (counter), `_seconds` (histogram), 없음 (gauge)

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 아티팩트 종류 레이블 키 (result, coverage)
pub const LABEL_KIND: &str = "kind";

/// 출력물 레이블 키 (summary, dashboard, badge, index)
pub const LABEL_OUTPUT: &str = "output";

// ─── Reporter 메트릭 ───────────────────────────────────────────────

/// Reporter: 파싱에 성공한 아티팩트 수 (counter, label: kind)
pub const REPORTER_ARTIFACTS_PARSED_TOTAL: &str = "testboard_reporter_artifacts_parsed_total";

/// Reporter: 파싱 실패로 제외된 아티팩트 수 (counter, label: kind)
pub const REPORTER_ARTIFACTS_FAILED_TOTAL: &str = "testboard_reporter_artifacts_failed_total";

/// Reporter: 기록된 출력 파일 수 (counter, label: output)
pub const REPORTER_OUTPUTS_WRITTEN_TOTAL: &str = "testboard_reporter_outputs_written_total";

/// Reporter: 마지막 실행에서 집계된 스위트 수 (gauge)
pub const REPORTER_SUITES_AGGREGATED: &str = "testboard_reporter_suites_aggregated";

/// Reporter: 파이프라인 전체 소요 시간 (histogram, 초)
pub const REPORTER_PIPELINE_DURATION_SECONDS: &str = "testboard_reporter_pipeline_duration_seconds";

/// 모든 메트릭의 설명을 등록합니다.
///
/// 프로세스 시작 시 한 번 호출합니다. 레코더가 없으면 아무 일도 하지 않으므로
/// 레코더 설치 여부와 관계없이 호출해도 안전합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_gauge, describe_histogram};

    describe_counter!(
        REPORTER_ARTIFACTS_PARSED_TOTAL,
        "Test-result and coverage documents parsed successfully"
    );
    describe_counter!(
        REPORTER_ARTIFACTS_FAILED_TOTAL,
        "Documents excluded from aggregation because they could not be parsed"
    );
    describe_counter!(
        REPORTER_OUTPUTS_WRITTEN_TOTAL,
        "Report files written (summary, dashboard, badges, index)"
    );
    describe_gauge!(
        REPORTER_SUITES_AGGREGATED,
        "Number of suites in the most recent aggregate summary"
    );
    describe_histogram!(
        REPORTER_PIPELINE_DURATION_SECONDS,
        "Wall-clock duration of one report pipeline run in seconds"
    );
}
