//! Batch checking of citation records.
//!
//! The per-entry loop: build query → throttle → lookup → classify → record
//! result. Strictly sequential: one lookup in flight at a time, since
//! concurrent requests to Scholar sharply increase block risk.

use crate::bibfile;
use crate::client::ScholarClient;
use crate::error::Result;
use crate::query::QueryBuilder;
use crate::types::{CheckResult, CitationRecord};
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Progress events emitted while a batch run advances.
///
/// Observability only: listeners must not assume events alter run state.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A record's lookup is about to start.
    Checking {
        index: usize,
        total: usize,
        entry_id: String,
        title: String,
    },
    /// A record's lookup finished.
    Checked {
        index: usize,
        total: usize,
        result: CheckResult,
    },
}

impl ScholarClient {
    /// Check every record, in order, returning one [`CheckResult`] per record.
    ///
    /// Nothing in the loop terminates the run early: lookups that fail are
    /// recorded and the next record proceeds. The only exception is the
    /// cancellation token, checked between records; on cancellation the
    /// results gathered so far are returned.
    pub async fn check_records(
        &self,
        records: &[CitationRecord],
        progress: impl Fn(ProgressEvent),
        cancel: &CancellationToken,
    ) -> Vec<CheckResult> {
        let total = records.len();
        let mut results = Vec::with_capacity(total);

        for (i, record) in records.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::info!(checked = results.len(), total, "run cancelled");
                break;
            }

            let title = record.title().unwrap_or("No title").to_string();
            progress(ProgressEvent::Checking {
                index: i,
                total,
                entry_id: record.key.clone(),
                title: title.clone(),
            });

            let query = QueryBuilder::from_record(record).build();
            let outcome = self.lookup(&query).await;
            let result = CheckResult::from_outcome(record.key.clone(), title, query, outcome);

            progress(ProgressEvent::Checked {
                index: i,
                total,
                result: result.clone(),
            });
            results.push(result);
        }

        results
    }

    /// Load a .bib file and check all of its entries.
    ///
    /// A file that cannot be read or parsed is fatal and aborts before any
    /// lookups run.
    pub async fn check_file(
        &self,
        path: impl AsRef<Path>,
        progress: impl Fn(ProgressEvent),
        cancel: &CancellationToken,
    ) -> Result<Vec<CheckResult>> {
        let records = bibfile::load_records(path)?;
        Ok(self.check_records(&records, progress, cancel).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::throttle::Throttle;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    fn record(key: &str, title: &str) -> CitationRecord {
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), title.to_string());
        CitationRecord::new(key, fields)
    }

    /// Client pointed at a closed port: every lookup is a network error.
    fn unreachable_client() -> ScholarClient {
        ScholarClient::new()
            .with_base_url("http://127.0.0.1:9/scholar")
            .with_throttle(Throttle::with_seed(0.0, 0.0, 1))
    }

    #[tokio::test]
    async fn test_all_lookups_fail_still_one_result_each() {
        let client = unreachable_client();
        let records = vec![
            record("a1", "First Paper"),
            record("b2", "Second Paper"),
            record("c3", "Third Paper"),
        ];

        let cancel = CancellationToken::new();
        let results = client.check_records(&records, |_| {}, &cancel).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].entry_id, "a1");
        assert_eq!(results[1].entry_id, "b2");
        assert_eq!(results[2].entry_id, "c3");
        for r in &results {
            assert!(!r.success);
            assert!(!r.found);
            assert_eq!(r.num_results, 0);
            assert!(r.error.as_deref().unwrap().starts_with("Network error:"));
        }
    }

    #[tokio::test]
    async fn test_progress_events_in_order() {
        let client = unreachable_client();
        let records = vec![record("x", "One"), record("y", "Two")];

        let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let cancel = CancellationToken::new();

        client
            .check_records(
                &records,
                move |ev| {
                    let tag = match ev {
                        ProgressEvent::Checking { entry_id, .. } => format!("start:{}", entry_id),
                        ProgressEvent::Checked { result, .. } => format!("done:{}", result.entry_id),
                    };
                    sink.lock().unwrap().push(tag);
                },
                &cancel,
            )
            .await;

        let events = events.lock().unwrap();
        assert_eq!(*events, vec!["start:x", "done:x", "start:y", "done:y"]);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_returns_empty() {
        let client = unreachable_client();
        let records = vec![record("a", "One"), record("b", "Two")];

        let cancel = CancellationToken::new();
        cancel.cancel();
        let results = client.check_records(&records, |_| {}, &cancel).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_between_records_returns_prefix() {
        let client = unreachable_client();
        let records = vec![record("a", "One"), record("b", "Two"), record("c", "Three")];

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let results = client
            .check_records(
                &records,
                move |ev| {
                    if let ProgressEvent::Checked { index: 0, .. } = ev {
                        trigger.cancel();
                    }
                },
                &cancel,
            )
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry_id, "a");
    }

    #[tokio::test]
    async fn test_empty_record_list() {
        let client = unreachable_client();
        let cancel = CancellationToken::new();
        let results = client.check_records(&[], |_| {}, &cancel).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal() {
        let client = unreachable_client();
        let cancel = CancellationToken::new();
        let err = client
            .check_file("/nonexistent/refs.bib", |_| {}, &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::BibCheckError::FileLoad { .. }));
    }
}
