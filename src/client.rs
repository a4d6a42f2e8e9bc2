//! The Google Scholar lookup client.

use crate::classify::Classifier;
use crate::throttle::Throttle;
use crate::types::LookupOutcome;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Scholar rejects obvious bots outright; present a realistic browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const SEARCH_URL: &str = "https://scholar.google.com/scholar";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Async client for Google Scholar searches.
///
/// # Example
///
/// ```no_run
/// # async fn example() {
/// use bibcheck::ScholarClient;
///
/// let client = ScholarClient::new();
/// let outcome = client.lookup("\"dark matter\" author:\"Rubin\" 1970").await;
/// println!("{:?}", outcome);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ScholarClient {
    pub(crate) http: Client,
    pub(crate) base_url: String,
    pub(crate) throttle: Throttle,
    pub(crate) classifier: Classifier,
}

impl ScholarClient {
    /// Create a client with the default delay range.
    pub fn new() -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: SEARCH_URL.to_string(),
            throttle: Throttle::default(),
            classifier: Classifier::new(),
        }
    }

    /// Override the search URL (useful for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the delay range, in seconds.
    pub fn with_delay_range(mut self, min_secs: f64, max_secs: f64) -> Self {
        self.throttle = Throttle::new(min_secs, max_secs);
        self
    }

    /// Override the throttle (e.g. a seeded one for deterministic tests).
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Perform one throttled Scholar lookup and classify the response.
    ///
    /// Never returns an error: transport failures, rate limiting, and bad
    /// status codes all surface as [`LookupOutcome`] variants so a batch run
    /// can keep going.
    pub async fn lookup(&self, query: &str) -> LookupOutcome {
        self.throttle.pause().await;

        let url = match Url::parse_with_params(&self.base_url, &[("q", query)]) {
            Ok(url) => url,
            Err(e) => return LookupOutcome::Parse(format!("invalid search URL: {}", e)),
        };

        tracing::debug!(%url, "querying Google Scholar");

        let response = match self
            .http
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => return LookupOutcome::Network(e.to_string()),
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return LookupOutcome::Network(e.to_string()),
        };

        self.classifier.classify(status, &body)
    }
}

impl Default for ScholarClient {
    fn default() -> Self {
        Self::new()
    }
}
