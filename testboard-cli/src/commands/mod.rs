//! Command handlers -- one module per subcommand

pub mod config;
pub mod generate;
pub mod render;
pub mod summary;

use std::path::{Path, PathBuf};

use tracing::debug;

use testboard_core::config::TestboardConfig;
use testboard_reporter::{ReportPipeline, ReportPipelineBuilder, ReporterConfig};

use crate::cli::DEFAULT_CONFIG_PATH;
use crate::error::CliError;

/// Load the effective configuration.
///
/// A missing file at the default location falls back to defaults plus
/// environment overrides; a missing file named explicitly is an error.
pub async fn load_config(path: &Path) -> Result<TestboardConfig, CliError> {
    if path == Path::new(DEFAULT_CONFIG_PATH) && !path.exists() {
        debug!(path = %path.display(), "no configuration file, using defaults");
        return Ok(TestboardConfig::from_env()?);
    }
    Ok(TestboardConfig::load(path).await?)
}

/// Derive the reporter configuration, applying a `--reports-dir` override.
pub fn reporter_config(
    config: &TestboardConfig,
    reports_dir: Option<PathBuf>,
) -> Result<ReporterConfig, CliError> {
    let mut reporter = ReporterConfig::from_core(config);
    if let Some(dir) = reports_dir {
        reporter.reports_dir = dir;
    }
    reporter.validate()?;
    Ok(reporter)
}

/// Build a pipeline for the given configuration.
pub fn build_pipeline(
    config: &TestboardConfig,
    reports_dir: Option<PathBuf>,
) -> Result<ReportPipeline, CliError> {
    let reporter = reporter_config(config, reports_dir)?;
    Ok(ReportPipelineBuilder::new().config(reporter).build()?)
}

/// Run blocking pipeline work off the async runtime.
pub async fn run_blocking<T, F>(work: F) -> Result<T, CliError>
where
    F: FnOnce() -> Result<T, CliError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| CliError::Command(format!("report task failed: {e}")))?
}

/// Render a path relative to the reports root when possible.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
