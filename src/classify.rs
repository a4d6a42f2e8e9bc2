//! Google Scholar response classification.
//!
//! Turns a raw HTTP status and HTML body into a [`LookupOutcome`]. Result
//! counting is a structural heuristic: the number of result-container
//! elements on the first page, not a verified identity match against the
//! queried record.

use crate::types::LookupOutcome;
use regex::Regex;
use scraper::{Html, Selector};

/// A structural marker identifying one search hit in the response body.
///
/// Markers are `(attribute, pattern)` pairs; every whitespace-separated token
/// in the pattern must appear in the element's attribute value. Markers are
/// tried in order and the first one matching any elements wins.
#[derive(Debug, Clone, Copy)]
pub struct ResultMarker {
    pub attribute: &'static str,
    pub pattern: &'static str,
}

/// Result-container signatures used by Google Scholar, primary first.
pub const RESULT_MARKERS: &[ResultMarker] = &[
    ResultMarker {
        attribute: "class",
        pattern: "gs_r gs_or gs_scl",
    },
    ResultMarker {
        attribute: "class",
        pattern: "gs_ri",
    },
];

/// Phrase fragment Scholar shows when a query matches nothing.
pub const NO_RESULTS_PHRASE: &str = "did not match any articles";

/// Classifies Scholar responses using a data-driven marker list.
#[derive(Debug, Clone)]
pub struct Classifier {
    markers: &'static [ResultMarker],
    no_results: Regex,
}

impl Classifier {
    /// Create a classifier with the standard Scholar markers.
    pub fn new() -> Self {
        Self::with_markers(RESULT_MARKERS)
    }

    /// Create a classifier with a custom marker list (primary first).
    pub fn with_markers(markers: &'static [ResultMarker]) -> Self {
        let pattern = format!("(?i){}", regex::escape(NO_RESULTS_PHRASE));
        Self {
            markers,
            no_results: Regex::new(&pattern).expect("no-results pattern is a valid regex"),
        }
    }

    /// Classify one response.
    ///
    /// Transport failures never reach this point; the client maps them to
    /// [`LookupOutcome::Network`] before a status code exists.
    pub fn classify(&self, status: u16, body: &str) -> LookupOutcome {
        match status {
            429 => LookupOutcome::RateLimited,
            200 => self.classify_body(body),
            code => LookupOutcome::HttpStatus(code),
        }
    }

    fn classify_body(&self, body: &str) -> LookupOutcome {
        let num_results = match self.count_result_blocks(body) {
            Ok(n) => n,
            Err(detail) => return LookupOutcome::Parse(detail),
        };

        if self.no_results.is_match(body) {
            return LookupOutcome::Hits(0);
        }
        LookupOutcome::Hits(num_results)
    }

    /// Count result containers: first marker with a non-empty match wins.
    fn count_result_blocks(&self, body: &str) -> Result<u32, String> {
        let document = Html::parse_document(body);

        for marker in self.markers {
            let selector = marker_selector(marker)?;
            let count = document.select(&selector).count();
            if count > 0 {
                return Ok(count as u32);
            }
        }
        Ok(0)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a CSS selector matching `div` elements whose attribute carries every
/// token in the marker pattern.
fn marker_selector(marker: &ResultMarker) -> Result<Selector, String> {
    let mut css = String::from("div");
    for token in marker.pattern.split_whitespace() {
        css.push_str(&format!("[{}~=\"{}\"]", marker.attribute, token));
    }
    Selector::parse(&css).map_err(|e| format!("bad marker selector {:?}: {}", css, e))
}
