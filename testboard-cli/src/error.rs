//! CLI-specific error types and exit code mapping

use testboard_core::error::TestboardError;
use testboard_reporter::ReporterError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// `render` or `summary` was asked to reuse results that were never generated.
    #[error("no data to render: {path} does not exist; run `testboard generate` first")]
    NoSummary { path: String },

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from testboard-core.
    #[error("{0}")]
    Core(#[from] TestboardError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                         |
    /// |------|---------------------------------|
    /// | 0    | Success                         |
    /// | 1    | General / command error         |
    /// | 2    | Configuration error             |
    /// | 3    | No summary to render            |
    /// | 10   | IO error                        |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(TestboardError::Config(_)) => 2,
            Self::NoSummary { .. } => 3,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}

impl From<ReporterError> for CliError {
    fn from(e: ReporterError) -> Self {
        match e {
            ReporterError::SummaryNotFound { path } => Self::NoSummary { path },
            ReporterError::Config { .. } => Self::Config(e.to_string()),
            other => Self::Core(other.into()),
        }
    }
}
