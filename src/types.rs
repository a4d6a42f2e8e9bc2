//! Public types for bibcheck.
//!
//! These types are self-contained with no external dependencies beyond serde,
//! so downstream tools can consume check results directly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One structured bibliographic entry, as produced by the BibTeX loader.
///
/// A record is a citation key plus a mapping of field name to verbatim field
/// text. Fields are optional throughout: a record missing `title`, `author`,
/// or `year` still produces a (possibly empty) search query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationRecord {
    /// Citation key (e.g. `vaswani2017attention`).
    pub key: String,
    /// Field name → verbatim field value.
    fields: BTreeMap<String, String>,
}

impl CitationRecord {
    /// Create a record from a key and its fields.
    pub fn new(key: impl Into<String>, fields: BTreeMap<String, String>) -> Self {
        Self {
            key: key.into(),
            fields,
        }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    /// The `title` field, if present.
    pub fn title(&self) -> Option<&str> {
        self.field("title")
    }

    /// The `author` field, if present (authors joined by " and ").
    pub fn author(&self) -> Option<&str> {
        self.field("author")
    }

    /// The `year` field, if present.
    pub fn year(&self) -> Option<&str> {
        self.field("year")
    }
}

/// Classification of one Google Scholar lookup.
///
/// Exactly one variant per attempt; [`CheckResult::from_outcome`] flattens
/// this into the success/found/error shape reports consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// HTTP 200 with `n` result blocks on the page (0 means "not found").
    Hits(u32),
    /// HTTP 429.
    RateLimited,
    /// Any other non-200 status.
    HttpStatus(u16),
    /// Transport-level failure (DNS, connect, timeout).
    Network(String),
    /// The response body could not be interpreted.
    Parse(String),
}

/// Per-record outcome of a lookup attempt.
///
/// Invariants, enforced at construction: `found` is true only when `success`
/// is true and `num_results > 0`; a failed lookup always reports zero results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Citation key of the checked entry.
    pub entry_id: String,
    /// Entry title as it appeared in the .bib file.
    pub title: String,
    /// The query string sent to Google Scholar.
    pub query: String,
    /// Whether the lookup itself completed (HTTP 200, body understood).
    pub success: bool,
    /// Whether the entry is plausibly present in the index.
    pub found: bool,
    /// Number of result blocks on the first page; 0 unless `success`.
    pub num_results: u32,
    /// Error message for failed lookups.
    pub error: Option<String>,
}

impl CheckResult {
    /// Build a result for one record from its lookup outcome.
    pub fn from_outcome(
        entry_id: impl Into<String>,
        title: impl Into<String>,
        query: impl Into<String>,
        outcome: LookupOutcome,
    ) -> Self {
        let (success, num_results, error) = match outcome {
            LookupOutcome::Hits(n) => (true, n, None),
            LookupOutcome::RateLimited => {
                (false, 0, Some("Rate limited by Google Scholar".to_string()))
            }
            LookupOutcome::HttpStatus(code) => (false, 0, Some(format!("HTTP {}", code))),
            LookupOutcome::Network(detail) => {
                (false, 0, Some(format!("Network error: {}", detail)))
            }
            LookupOutcome::Parse(detail) => (false, 0, Some(format!("Error: {}", detail))),
        };

        Self {
            entry_id: entry_id.into(),
            title: title.into(),
            query: query.into(),
            success,
            found: success && num_results > 0,
            num_results,
            error,
        }
    }

    /// One-line status for reports: `FOUND (3 results)`, `NOT FOUND (0
    /// results)`, or `ERROR - <message>`.
    pub fn status_line(&self) -> String {
        if self.success {
            let status = if self.found { "FOUND" } else { "NOT FOUND" };
            format!("{} ({} results)", status, self.num_results)
        } else {
            format!("ERROR - {}", self.error.as_deref().unwrap_or("unknown"))
        }
    }
}

/// Aggregate over a finished check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub found: usize,
    pub not_found: usize,
    pub errors: usize,
    /// Percentage of entries found; `None` when no entries were checked.
    pub success_rate: Option<f64>,
}

impl ReportSummary {
    /// Compute the summary for a sequence of results.
    pub fn from_results(results: &[CheckResult]) -> Self {
        let total = results.len();
        let found = results.iter().filter(|r| r.found).count();
        let errors = results.iter().filter(|r| !r.success).count();
        let success_rate = if total > 0 {
            Some(found as f64 / total as f64 * 100.0)
        } else {
            None
        };

        Self {
            total,
            found,
            not_found: total - found - errors,
            errors,
            success_rate,
        }
    }
}
