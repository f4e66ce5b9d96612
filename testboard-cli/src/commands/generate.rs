//! `testboard generate` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use testboard_core::config::TestboardConfig;
use testboard_reporter::{
    AggregateSummary, CoverageReport, OmittedArtifact, PipelineOutcome, SuiteResult, TotalSummary,
    WrittenOutputs,
};

use crate::cli::ReportArgs;
use crate::commands::{build_pipeline, display_path, run_blocking};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `generate` command.
///
/// Runs the full pipeline: locate, parse, aggregate, save the summary and
/// render every output. Zero artifacts is not an error.
pub async fn execute(
    args: ReportArgs,
    config: &TestboardConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let pipeline = build_pipeline(config, args.reports_dir)?;
    let reports_dir = pipeline.config().reports_dir.clone();
    info!(reports_dir = %reports_dir.display(), "generating reports");

    let outcome = run_blocking(move || pipeline.run().map_err(CliError::from)).await?;

    let report = RunReport::from_outcome("generate", &reports_dir.display().to_string(), outcome);
    writer.render(&report)
}

/// Result of a `generate` or `render` run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Which command produced the report
    pub mode: &'static str,
    /// Reports root directory
    pub reports_dir: String,
    /// Per-suite results in discovery order
    pub suites: Vec<SuiteLine>,
    /// Totals across every suite
    pub total: TotalSummary,
    /// Coverage headline figures (absent when no coverage was found)
    pub coverage: Option<CoverageLine>,
    /// Artifacts that were skipped, with the reason
    pub omitted: Vec<OmittedArtifact>,
    /// Files written or removed
    pub outputs: WrittenOutputs,
}

/// One suite row.
#[derive(Debug, Serialize)]
pub struct SuiteLine {
    pub name: String,
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub errored: u64,
    pub success_rate: f64,
    pub duration: f64,
}

/// Coverage headline figures.
#[derive(Debug, Serialize)]
pub struct CoverageLine {
    pub line_percent: f64,
    pub branch_percent: f64,
    pub lines_covered: u64,
    pub lines_valid: u64,
}

impl RunReport {
    /// Build the report from a pipeline outcome.
    pub fn from_outcome(mode: &'static str, reports_dir: &str, outcome: PipelineOutcome) -> Self {
        let PipelineOutcome {
            summary,
            omitted,
            outputs,
        } = outcome;
        let (suites, total, coverage) = headline(&summary);
        Self {
            mode,
            reports_dir: reports_dir.to_owned(),
            suites,
            total,
            coverage,
            omitted,
            outputs,
        }
    }
}

/// Split a summary into the figures printed by the report commands.
pub fn headline(
    summary: &AggregateSummary,
) -> (Vec<SuiteLine>, TotalSummary, Option<CoverageLine>) {
    let suites = summary.suites.values().map(SuiteLine::from).collect();
    let coverage = summary.coverage.as_ref().map(CoverageLine::from);
    (suites, summary.total_summary.clone(), coverage)
}

impl From<&SuiteResult> for SuiteLine {
    fn from(suite: &SuiteResult) -> Self {
        Self {
            name: suite.suite_name.clone(),
            total: suite.total_tests,
            passed: suite.passed,
            failed: suite.failed,
            skipped: suite.skipped,
            errored: suite.errored,
            success_rate: suite.success_rate(),
            duration: suite.duration,
        }
    }
}

impl From<&CoverageReport> for CoverageLine {
    fn from(coverage: &CoverageReport) -> Self {
        Self {
            line_percent: coverage.line_percent(),
            branch_percent: coverage.branch_percent(),
            lines_covered: coverage.lines_covered,
            lines_valid: coverage.lines_valid,
        }
    }
}

impl Render for RunReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Test Report ({}): {}", self.mode, self.reports_dir.bold())?;
        writeln!(w)?;

        write_suite_table(w, &self.suites)?;
        writeln!(w)?;
        write_totals(w, &self.total)?;
        write_coverage(w, self.coverage.as_ref())?;

        if !self.omitted.is_empty() {
            writeln!(w)?;
            let heading = format!("Skipped artifacts ({}):", self.omitted.len());
            writeln!(w, "{}", heading.yellow())?;
            for omitted in &self.omitted {
                writeln!(w, "  {}: {}", omitted.path.display(), omitted.reason)?;
            }
        }

        writeln!(w)?;
        writeln!(w, "Outputs:")?;
        let root = std::path::Path::new(&self.reports_dir);
        if let Some(ref summary) = self.outputs.summary {
            writeln!(w, "  summary    {}", display_path(summary, root))?;
        }
        writeln!(w, "  dashboard  {}", display_path(&self.outputs.dashboard, root))?;
        for badge in &self.outputs.badges {
            writeln!(w, "  badge      {}", display_path(badge, root))?;
        }
        writeln!(w, "  index      {}", display_path(&self.outputs.index, root))?;
        for removed in &self.outputs.removed {
            writeln!(w, "  removed    {}", display_path(removed, root).dimmed())?;
        }

        Ok(())
    }
}

/// Write the per-suite table shared by the report commands.
pub fn write_suite_table(w: &mut dyn Write, suites: &[SuiteLine]) -> std::io::Result<()> {
    use colored::Colorize;

    if suites.is_empty() {
        writeln!(w, "  {}", "No tests found".yellow())?;
        return Ok(());
    }

    let width = suites
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);
    writeln!(
        w,
        "  {:<width$}  {:>6}  {:>6}  {:>6}  {:>7}  {:>7}  {:>8}",
        "Suite", "Tests", "Passed", "Failed", "Skipped", "Errored", "Success"
    )?;
    for suite in suites {
        let rate = format!("{:.2}%", suite.success_rate);
        let rate = if suite.failed > 0 || suite.errored > 0 {
            rate.red()
        } else {
            rate.green()
        };
        writeln!(
            w,
            "  {:<width$}  {:>6}  {:>6}  {:>6}  {:>7}  {:>7}  {:>8}",
            suite.name, suite.total, suite.passed, suite.failed, suite.skipped, suite.errored, rate
        )?;
    }
    Ok(())
}

/// Write the totals block shared by the report commands.
pub fn write_totals(w: &mut dyn Write, total: &TotalSummary) -> std::io::Result<()> {
    use colored::Colorize;

    writeln!(
        w,
        "  Total:    {} tests, {} passed, {} failed, {} skipped, {} errored",
        total.total_tests, total.passed, total.failed, total.skipped, total.errored
    )?;
    let rate = format!("{:.2}%", total.success_rate);
    let rate = if total.total_tests == 0 {
        rate.normal()
    } else if total.failed > 0 || total.errored > 0 {
        rate.red().bold()
    } else {
        rate.green().bold()
    };
    writeln!(w, "  Success:  {rate}")?;
    writeln!(w, "  Duration: {:.2}s", total.duration)?;
    Ok(())
}

/// Write the coverage line shared by the report commands.
pub fn write_coverage(w: &mut dyn Write, coverage: Option<&CoverageLine>) -> std::io::Result<()> {
    use colored::Colorize;

    match coverage {
        Some(c) => writeln!(
            w,
            "  Coverage: {:.1}% lines ({}/{}), {:.1}% branches",
            c.line_percent, c.lines_covered, c.lines_valid, c.branch_percent
        ),
        None => writeln!(w, "  Coverage: {}", "N/A".dimmed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(suites: Vec<SuiteLine>, omitted: Vec<OmittedArtifact>) -> RunReport {
        let total_tests = suites.iter().map(|s| s.total).sum();
        let passed = suites.iter().map(|s| s.passed).sum();
        let failed = suites.iter().map(|s| s.failed).sum();
        RunReport {
            mode: "generate",
            reports_dir: "reports".to_owned(),
            suites,
            total: TotalSummary {
                total_tests,
                passed,
                failed,
                skipped: 0,
                errored: 0,
                duration: 4.2,
                success_rate: 93.33,
            },
            coverage: Some(CoverageLine {
                line_percent: 80.0,
                branch_percent: 60.0,
                lines_covered: 80,
                lines_valid: 100,
            }),
            omitted,
            outputs: WrittenOutputs {
                summary: Some(PathBuf::from("reports/test-results/summary.json")),
                dashboard: PathBuf::from("reports/dashboard.html"),
                badges: vec![PathBuf::from("reports/badges/tests.svg")],
                index: PathBuf::from("reports/index.html"),
                removed: Vec::new(),
            },
        }
    }

    fn line(name: &str, total: u64, failed: u64) -> SuiteLine {
        SuiteLine {
            name: name.to_owned(),
            total,
            passed: total - failed,
            failed,
            skipped: 0,
            errored: 0,
            success_rate: 0.0,
            duration: 1.0,
        }
    }

    fn text(report: &RunReport) -> String {
        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn test_run_report_render_text_lists_suites_and_outputs() {
        let output = text(&report(vec![line("alpha", 10, 1), line("beta", 5, 0)], Vec::new()));
        assert!(output.contains("alpha"));
        assert!(output.contains("beta"));
        assert!(output.contains("15 tests"));
        assert!(output.contains("80.0% lines (80/100)"));
        assert!(output.contains("test-results/summary.json"));
        assert!(output.contains("badges/tests.svg"));
        assert!(!output.contains("Skipped artifacts"));
    }

    #[test]
    fn test_run_report_render_text_no_tests() {
        let output = text(&report(Vec::new(), Vec::new()));
        assert!(output.contains("No tests found"));
    }

    #[test]
    fn test_run_report_render_text_lists_omitted() {
        let omitted = vec![OmittedArtifact {
            path: PathBuf::from("reports/test-results/broken.xml"),
            reason: "unexpected end of file".to_owned(),
        }];
        let output = text(&report(vec![line("alpha", 10, 0)], omitted));
        assert!(output.contains("Skipped artifacts (1)"));
        assert!(output.contains("broken.xml: unexpected end of file"));
    }

    #[test]
    fn test_run_report_json_serialization() {
        let json = serde_json::to_value(report(vec![line("alpha", 10, 1)], Vec::new()))
            .expect("JSON serialization should succeed");
        assert_eq!(json["mode"].as_str(), Some("generate"));
        assert_eq!(json["suites"][0]["name"].as_str(), Some("alpha"));
        assert_eq!(json["total"]["totalTests"].as_u64(), Some(10));
        assert_eq!(json["coverage"]["line_percent"].as_f64(), Some(80.0));
        assert_eq!(
            json["outputs"]["dashboard"].as_str(),
            Some("reports/dashboard.html")
        );
    }

    #[test]
    fn test_write_coverage_absent() {
        let mut buffer = Vec::new();
        write_coverage(&mut buffer, None).expect("write should succeed");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("N/A"));
    }
}
