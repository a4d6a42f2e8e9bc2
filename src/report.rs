//! Check-run reporting.
//!
//! Renders the console summary and the optional persisted plain-text report.
//! Both are derived views over the result sequence; writing the report can
//! fail without affecting the computed results.

use crate::error::{BibCheckError, Result};
use crate::types::{CheckResult, ReportSummary};
use std::fmt::Write as _;
use std::path::Path;

const BANNER: &str = "==================================================";
const DIVIDER: &str = "------------------------------";

/// Render the console summary: totals, success rate, and a listing of every
/// entry whose lookup failed.
pub fn render_summary(results: &[CheckResult]) -> String {
    let summary = ReportSummary::from_results(results);
    let mut out = String::new();

    let _ = writeln!(out, "{}", BANNER);
    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "{}", BANNER);
    let _ = writeln!(out, "Total entries checked: {}", summary.total);
    let _ = writeln!(out, "Found in Google Scholar: {}", summary.found);
    let _ = writeln!(out, "Not found: {}", summary.not_found);
    let _ = writeln!(out, "Errors: {}", summary.errors);
    match summary.success_rate {
        Some(rate) => {
            let _ = writeln!(out, "Success rate: {:.1}%", rate);
        }
        None => {
            let _ = writeln!(out, "Success rate: N/A");
        }
    }

    if summary.errors > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "Entries with errors:");
        for result in results.iter().filter(|r| !r.success) {
            let _ = writeln!(
                out,
                "  - {}: {}",
                result.entry_id,
                result.error.as_deref().unwrap_or("unknown")
            );
        }
    }

    out
}

/// Render the persisted report: header, summary line, then one block per
/// entry with its id, title, query, and status.
pub fn render_report(results: &[CheckResult]) -> String {
    let summary = ReportSummary::from_results(results);
    let mut out = String::new();

    let _ = writeln!(out, "BibTeX Google Scholar Check Results");
    let _ = writeln!(out, "{}", BANNER);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Summary: {}/{} entries found",
        summary.found, summary.total
    );
    let _ = writeln!(out);

    for result in results {
        let _ = writeln!(out, "Entry ID: {}", result.entry_id);
        let _ = writeln!(out, "Title: {}", result.title);
        let _ = writeln!(out, "Query: {}", result.query);
        let _ = writeln!(out, "Status: {}", result.status_line());
        let _ = writeln!(out, "{}", DIVIDER);
        let _ = writeln!(out);
    }

    out
}

/// Write the persisted report to `path`.
///
/// Callers treat a failure here as non-fatal: the results themselves remain
/// the output of the run.
pub fn write_report(path: impl AsRef<Path>, results: &[CheckResult]) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, render_report(results)).map_err(|source| {
        tracing::warn!(path = %path.display(), %source, "failed to write report");
        BibCheckError::ReportWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LookupOutcome;

    fn sample_results() -> Vec<CheckResult> {
        vec![
            CheckResult::from_outcome(
                "vaswani2017attention",
                "Attention Is All You Need",
                "\"Attention Is All You Need\" author:\"Vaswani\" 2017",
                LookupOutcome::Hits(3),
            ),
            CheckResult::from_outcome("missing2020", "Ghost Paper", "\"Ghost Paper\"", LookupOutcome::Hits(0)),
            CheckResult::from_outcome(
                "flaky1999",
                "Flaky Paper",
                "\"Flaky Paper\" 1999",
                LookupOutcome::Network("timed out".into()),
            ),
        ]
    }

    #[test]
    fn test_summary_counts_and_rate() {
        let text = render_summary(&sample_results());
        assert!(text.contains("Total entries checked: 3"));
        assert!(text.contains("Found in Google Scholar: 1"));
        assert!(text.contains("Not found: 1"));
        assert!(text.contains("Errors: 1"));
        assert!(text.contains("Success rate: 33.3%"));
        assert!(text.contains("  - flaky1999: Network error: timed out"));
    }

    #[test]
    fn test_summary_no_errors_omits_listing() {
        let results = vec![CheckResult::from_outcome(
            "a",
            "t",
            "q",
            LookupOutcome::Hits(1),
        )];
        let text = render_summary(&results);
        assert!(!text.contains("Entries with errors"));
        assert!(text.contains("Success rate: 100.0%"));
    }

    #[test]
    fn test_summary_empty_run_is_na() {
        let text = render_summary(&[]);
        assert!(text.contains("Total entries checked: 0"));
        assert!(text.contains("Success rate: N/A"));
    }

    #[test]
    fn test_report_format() {
        let text = render_report(&sample_results());
        assert!(text.starts_with("BibTeX Google Scholar Check Results\n"));
        assert!(text.contains("Summary: 1/3 entries found"));
        assert!(text.contains("Entry ID: vaswani2017attention"));
        assert!(text.contains("Title: Attention Is All You Need"));
        assert!(text.contains("Query: \"Attention Is All You Need\" author:\"Vaswani\" 2017"));
        assert!(text.contains("Status: FOUND (3 results)"));
        assert!(text.contains("Status: NOT FOUND (0 results)"));
        assert!(text.contains("Status: ERROR - Network error: timed out"));
        assert_eq!(text.matches(DIVIDER).count(), 3);
    }

    #[test]
    fn test_write_report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        write_report(&path, &sample_results()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_report(&sample_results()));
    }

    #[test]
    fn test_write_report_failure_is_report_write_error() {
        let err = write_report("/nonexistent-dir/report.txt", &sample_results()).unwrap_err();
        assert!(matches!(err, BibCheckError::ReportWrite { .. }));
    }
}
