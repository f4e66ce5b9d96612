//! `testboard summary` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use testboard_core::config::TestboardConfig;
use testboard_reporter::{AggregateSummary, SummaryStore};

use crate::cli::ReportArgs;
use crate::commands::generate::{headline, write_coverage, write_suite_table, write_totals};
use crate::commands::{reporter_config, run_blocking};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `summary` command.
///
/// Prints the stored summary. JSON output is the stored document itself.
pub async fn execute(
    args: ReportArgs,
    config: &TestboardConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let reporter = reporter_config(config, args.reports_dir)?;
    let store = SummaryStore::new(reporter.summary_path());
    info!(path = %store.path().display(), "loading summary");

    let source = store.path().display().to_string();
    let summary = run_blocking(move || store.load().map_err(CliError::from)).await?;

    writer.render(&SummaryReport { source, summary })
}

/// Stored summary, serialised exactly as it is on disk.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct SummaryReport {
    /// Summary file path
    #[serde(skip)]
    pub source: String,
    /// The stored summary
    pub summary: AggregateSummary,
}

impl Render for SummaryReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Summary: {}", self.source.bold())?;
        writeln!(w, "  Generated: {}", self.summary.timestamp.to_rfc3339())?;
        writeln!(w)?;

        let (suites, total, coverage) = headline(&self.summary);
        write_suite_table(w, &suites)?;
        writeln!(w)?;
        write_totals(w, &total)?;
        write_coverage(w, coverage.as_ref())?;

        if let Some(ref report) = self.summary.coverage {
            for package in &report.packages {
                writeln!(
                    w,
                    "    {:<32} {:>6.1}% lines  {:>6.1}% branches",
                    package.name,
                    package.line_rate * 100.0,
                    package.branch_rate * 100.0
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> AggregateSummary {
        serde_json::from_str(
            r#"{
              "timestamp": "2026-01-02T03:04:05Z",
              "suites": {
                "alpha": {
                  "suiteName": "alpha", "totalTests": 10, "passed": 9, "failed": 1,
                  "skipped": 0, "errored": 0, "duration": 4.2, "cases": []
                }
              },
              "totalSummary": {
                "totalTests": 10, "passed": 9, "failed": 1, "skipped": 0,
                "errored": 0, "duration": 4.2, "successRate": 90.0
              },
              "coverage": null
            }"#,
        )
        .expect("fixture summary parses")
    }

    #[test]
    fn test_summary_report_json_is_the_stored_document() {
        let report = SummaryReport {
            source: "reports/test-results/summary.json".to_owned(),
            summary: summary(),
        };
        let json = serde_json::to_value(&report).expect("JSON serialization should succeed");
        assert!(json.get("source").is_none(), "source should be skipped");
        assert_eq!(json["totalSummary"]["totalTests"].as_u64(), Some(10));
        assert_eq!(json["suites"]["alpha"]["failed"].as_u64(), Some(1));
        assert!(json["coverage"].is_null());
    }

    #[test]
    fn test_summary_report_render_text() {
        let report = SummaryReport {
            source: "reports/test-results/summary.json".to_owned(),
            summary: summary(),
        };
        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("summary.json"));
        assert!(output.contains("2026-01-02T03:04:05"));
        assert!(output.contains("alpha"));
        assert!(output.contains("10 tests, 9 passed, 1 failed"));
        assert!(output.contains("N/A"));
    }
}
