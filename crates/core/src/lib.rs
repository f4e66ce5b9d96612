//! Testboard 공통 크레이트
//!
//! 리포터와 CLI가 공유하는 에러 타입, `testboard.toml` 설정, 메트릭 이름을 정의합니다.
//!
//! - [`error`]: 최상위 에러 (`TestboardError`, `ConfigError`, `ReportError`)
//! - [`config`]: 설정 로딩/검증 (`TestboardConfig`)
//! - [`metrics`]: 메트릭 이름 상수

pub mod config;
pub mod error;
pub mod metrics;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, ReportError, TestboardError};

// 설정
pub use config::{GeneralConfig, ReportConfig, TestboardConfig, ThresholdConfig};
