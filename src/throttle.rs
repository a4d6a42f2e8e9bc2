//! Randomized request throttle.
//!
//! Google Scholar has no published API and blocks clients that hammer it.
//! Every outbound lookup pauses for a duration drawn uniformly from the
//! configured `[min, max]` delay range before the request goes out.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Duration;

/// Default minimum delay between requests, in seconds.
pub const DEFAULT_MIN_DELAY: f64 = 2.0;
/// Default maximum delay between requests, in seconds.
pub const DEFAULT_MAX_DELAY: f64 = 5.0;

/// Enforces a randomized pause before each outbound lookup.
///
/// The pseudorandom source is injected at construction: [`Throttle::new`]
/// seeds from entropy, [`Throttle::with_seed`] makes the delay sequence
/// deterministic for tests.
#[derive(Debug, Clone)]
pub struct Throttle {
    inner: Arc<Mutex<ThrottleInner>>,
}

#[derive(Debug)]
struct ThrottleInner {
    min_secs: f64,
    max_secs: f64,
    rng: StdRng,
}

impl Throttle {
    /// Create a throttle for the given delay range in seconds.
    ///
    /// Callers are expected to pass `min <= max`; an inverted range collapses
    /// to a fixed `min`-second delay.
    pub fn new(min_secs: f64, max_secs: f64) -> Self {
        Self::with_rng(min_secs, max_secs, StdRng::from_entropy())
    }

    /// Create a throttle with a deterministic delay sequence.
    pub fn with_seed(min_secs: f64, max_secs: f64, seed: u64) -> Self {
        Self::with_rng(min_secs, max_secs, StdRng::seed_from_u64(seed))
    }

    fn with_rng(min_secs: f64, max_secs: f64, rng: StdRng) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ThrottleInner {
                min_secs,
                max_secs,
                rng,
            })),
        }
    }

    /// Block the calling task for one randomly drawn delay.
    ///
    /// Invoked exactly once per lookup attempt.
    pub async fn pause(&self) {
        let delay = self.sample_delay().await;
        tokio::time::sleep(delay).await;
    }

    /// Draw the next delay from the configured range without sleeping.
    pub(crate) async fn sample_delay(&self) -> Duration {
        let mut inner = self.inner.lock().await;
        let secs = if inner.max_secs <= inner.min_secs {
            inner.min_secs
        } else {
            let (min, max) = (inner.min_secs, inner.max_secs);
            inner.rng.gen_range(min..=max)
        };
        Duration::from_secs_f64(secs.max(0.0))
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DELAY, DEFAULT_MAX_DELAY)
    }
}
