//! # bibcheck
//!
//! Checks whether the entries of a BibTeX file can be found on Google
//! Scholar.
//!
//! Provides:
//! - **Library**: async client that builds one search query per entry,
//!   throttles, classifies the HTML response, and aggregates results
//! - **CLI**: `bibcheck` binary for terminal use
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn example() -> bibcheck::error::Result<()> {
//! use bibcheck::ScholarClient;
//! use tokio_util::sync::CancellationToken;
//!
//! let client = ScholarClient::new().with_delay_range(2.0, 5.0);
//! let results = client
//!     .check_file("references.bib", |_| {}, &CancellationToken::new())
//!     .await?;
//!
//! for result in &results {
//!     println!("{}: {}", result.entry_id, result.status_line());
//! }
//! println!("{}", bibcheck::report::render_summary(&results));
//! # Ok(())
//! # }
//! ```
//!
//! ## Query construction
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

pub mod bibfile;
pub mod check;
pub mod classify;
pub mod client;
pub mod error;
pub mod query;
pub mod report;
pub mod throttle;
pub mod types;

// Re-export key types at the crate root.
pub use check::ProgressEvent;
pub use client::ScholarClient;
pub use error::BibCheckError;
pub use query::QueryBuilder;
pub use throttle::Throttle;
pub use types::*;
