//! `testboard render` command handler

use tracing::info;

use testboard_core::config::TestboardConfig;

use crate::cli::ReportArgs;
use crate::commands::generate::RunReport;
use crate::commands::{build_pipeline, run_blocking};
use crate::error::CliError;
use crate::output::OutputWriter;

/// Execute the `render` command.
///
/// Reuses the stored summary and regenerates the dashboard, badges and index
/// without touching result or coverage documents.
///
/// # Errors
///
/// Returns `CliError::NoSummary` (exit code 3) when no summary has been generated yet.
pub async fn execute(
    args: ReportArgs,
    config: &TestboardConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let pipeline = build_pipeline(config, args.reports_dir)?;
    let reports_dir = pipeline.config().reports_dir.clone();
    info!(
        summary = %pipeline.store().path().display(),
        "rendering from existing summary"
    );

    let outcome = run_blocking(move || pipeline.render_existing().map_err(CliError::from)).await?;

    let report = RunReport::from_outcome("render", &reports_dir.display().to_string(), outcome);
    writer.render(&report)
}
