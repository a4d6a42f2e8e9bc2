//! BibTeX file loading.
//!
//! Parsing is delegated to the `biblatex` crate; this module flattens each
//! entry into a [`CitationRecord`] field map, preserving source order.

use crate::error::{BibCheckError, Result};
use crate::types::CitationRecord;
use biblatex::{Bibliography, ChunksExt};
use std::fs;
use std::path::Path;

/// Load all entries from a .bib file, in source order.
///
/// A missing or unparseable file is fatal: the caller gets an error before
/// any lookups run.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<CitationRecord>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| BibCheckError::FileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    parse_records(&raw).map_err(|reason| BibCheckError::FileLoad {
        path: path.to_path_buf(),
        reason,
    })
}

/// Parse BibTeX source into citation records.
pub fn parse_records(src: &str) -> std::result::Result<Vec<CitationRecord>, String> {
    let bibliography = Bibliography::parse(src).map_err(|e| e.to_string())?;

    let records = bibliography
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let key = if entry.key.is_empty() {
                format!("entry_{}", i + 1)
            } else {
                entry.key.clone()
            };
            let fields = entry
                .fields
                .iter()
                .map(|(name, chunks)| (name.clone(), chunks.format_verbatim()))
                .collect();
            CitationRecord::new(key, fields)
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
@article{vaswani2017attention,
  title = {Attention Is All You Need},
  author = {Vaswani, A. and others},
  year = {2017}
}

@inproceedings{devlin2019bert,
  title = {{BERT}: Pre-training of Deep Bidirectional Transformers},
  author = {Devlin, Jacob and Chang, Ming-Wei},
  year = {2019},
  booktitle = {NAACL}
}
"#;

    #[test]
    fn test_parse_preserves_order_and_keys() {
        let records = parse_records(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, "vaswani2017attention");
        assert_eq!(records[1].key, "devlin2019bert");
    }

    #[test]
    fn test_parse_flattens_fields() {
        let records = parse_records(SAMPLE).unwrap();
        assert_eq!(records[0].title(), Some("Attention Is All You Need"));
        assert_eq!(records[0].author(), Some("Vaswani, A. and others"));
        assert_eq!(records[0].year(), Some("2017"));
        assert_eq!(records[1].field("booktitle"), Some("NAACL"));
    }

    #[test]
    fn test_parse_empty_source() {
        let records = parse_records("").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_file_is_file_load_error() {
        let err = load_records("/definitely/not/here.bib").unwrap_err();
        assert!(matches!(err, BibCheckError::FileLoad { .. }));
    }

    #[test]
    fn test_entry_missing_fields_still_loads() {
        let records = parse_records("@misc{bare, note = {nothing useful}}").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "bare");
        assert_eq!(records[0].title(), None);
        assert_eq!(records[0].author(), None);
    }
}
