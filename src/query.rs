//! Google Scholar search query construction.
//!
//! Builds one query string per citation record: the quoted title as a phrase
//! search, an `author:"<last name>"` filter for the first author, and the
//! publication year.
//!
//! # Example
//!
//! ```
//! use bibcheck::QueryBuilder;
//!
//! let query = QueryBuilder::new()
//!     .title("Attention Is All You Need")
//!     .author("Vaswani, A. and others")
//!     .year("2017")
//!     .build();
//! assert_eq!(query, "\"Attention Is All You Need\" author:\"Vaswani\" 2017");
//! ```

/// Builder for Google Scholar query strings.
///
/// Missing or unusable fields are silently skipped; a record with no usable
/// fields yields the empty string, which callers must tolerate.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    parts: Vec<String>,
}

impl QueryBuilder {
    /// Create a new empty query builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the query for one citation record.
    pub fn from_record(record: &crate::types::CitationRecord) -> Self {
        let mut qb = Self::new();
        if let Some(title) = record.title() {
            qb = qb.title(title);
        }
        if let Some(author) = record.author() {
            qb = qb.author(author);
        }
        if let Some(year) = record.year() {
            qb = qb.year(year);
        }
        qb
    }

    /// Add the title as a quoted phrase term, normalized for matching.
    pub fn title(mut self, title: &str) -> Self {
        let cleaned = normalize(title);
        if !cleaned.is_empty() {
            self.parts.push(format!("\"{}\"", cleaned));
        }
        self
    }

    /// Add an `author:` filter for the first author's last name.
    ///
    /// Accepts a full BibTeX author field (authors joined by `" and "`) in
    /// either `Last, First` or `First Last` form.
    pub fn author(mut self, author_field: &str) -> Self {
        if let Some(last) = first_author_last_name(author_field) {
            self.parts.push(format!("author:\"{}\"", last));
        }
        self
    }

    /// Add the raw year token.
    pub fn year(mut self, year: &str) -> Self {
        let year = year.trim();
        if !year.is_empty() {
            self.parts.push(year.to_string());
        }
        self
    }

    /// Build the final query string.
    pub fn build(self) -> String {
        self.parts.join(" ")
    }
}

impl std::fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.parts.join(" "))
    }
}

/// Normalize text for search matching: strip everything that is not
/// alphanumeric or whitespace, collapse whitespace runs, trim.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract the last name of the first author from a BibTeX author field.
///
/// The field lists authors separated by the literal `" and "`. The first
/// author is either `Last, First ...` (last name before the comma) or
/// `First ... Last` (last name is the final whitespace token).
fn first_author_last_name(author_field: &str) -> Option<String> {
    let first = author_field.split(" and ").next()?.trim();
    if first.is_empty() {
        return None;
    }

    let last = match first.split_once(',') {
        Some((before, _)) => before.trim().to_string(),
        None => first.split_whitespace().last()?.to_string(),
    };

    if last.is_empty() {
        None
    } else {
        Some(last)
    }
}
