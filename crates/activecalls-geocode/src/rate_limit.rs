//! Spacing of external geocoding calls.
//!
//! The public geocoder allows about one request per second. Every forward
//! and reverse call goes through one [`RateLimiter`] owned by the caller, so
//! the "last call" marker is explicit state rather than a global.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Enforces a minimum gap between consecutive external calls.
///
/// Built on `tokio::time`, so tests can run it under a paused clock.
#[derive(Debug)]
pub struct RateLimiter {
    min_gap: Duration,
    last_call: Option<Instant>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(min_gap: Duration) -> Self {
        Self {
            min_gap,
            last_call: None,
        }
    }

    #[must_use]
    pub fn from_millis(min_gap_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_gap_ms))
    }

    #[must_use]
    pub fn min_gap(&self) -> Duration {
        self.min_gap
    }

    /// Waits until `min_gap` has passed since the previous call completed,
    /// runs `operation`, and records its completion time.
    ///
    /// The first call after construction does not wait.
    pub async fn run<T, F, Fut>(&mut self, operation: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        self.wait_for_slot().await;
        let output = operation().await;
        self.last_call = Some(Instant::now());
        output
    }

    async fn wait_for_slot(&self) {
        let Some(previous) = self.last_call else {
            return;
        };
        let ready_at = previous + self.min_gap;
        let wait = ready_at.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            tracing::debug!(
                wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                "waiting for geocoder request slot"
            );
            tokio::time::sleep_until(ready_at).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAP: Duration = Duration::from_millis(1100);

    #[tokio::test(start_paused = true)]
    async fn first_call_runs_immediately() {
        let mut limiter = RateLimiter::new(GAP);
        let start = Instant::now();
        let value = limiter.run(|| async { 7 }).await;
        assert_eq!(value, 7);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn back_to_back_calls_are_spaced_by_the_gap() {
        let mut limiter = RateLimiter::new(GAP);
        limiter.run(|| async {}).await;

        let start = Instant::now();
        limiter.run(|| async {}).await;
        assert!(start.elapsed() >= GAP, "waited only {:?}", start.elapsed());

        let start = Instant::now();
        limiter.run(|| async {}).await;
        assert!(start.elapsed() >= GAP, "waited only {:?}", start.elapsed());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_time_counts_toward_the_gap() {
        let mut limiter = RateLimiter::new(GAP);
        limiter.run(|| async {}).await;

        tokio::time::advance(Duration::from_millis(800)).await;
        let start = Instant::now();
        limiter.run(|| async {}).await;
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(300), "waited {waited:?}");
        assert!(waited < GAP, "waited {waited:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn gap_is_measured_from_call_completion() {
        let mut limiter = RateLimiter::new(GAP);
        limiter
            .run(|| tokio::time::sleep(Duration::from_millis(500)))
            .await;

        let start = Instant::now();
        limiter.run(|| async {}).await;
        assert!(start.elapsed() >= GAP);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_gap_never_waits() {
        let mut limiter = RateLimiter::from_millis(0);
        let start = Instant::now();
        for _ in 0..5 {
            limiter.run(|| async {}).await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(limiter.min_gap(), Duration::ZERO);
    }
}
