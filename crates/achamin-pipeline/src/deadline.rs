//! Wall-clock budget threaded through every external call.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Remaining wall-clock budget for one pipeline run.
///
/// Every external call is awaited under the remaining budget; an elapsed
/// deadline surfaces as `None`, which the caller maps to that stage's
/// fallback path rather than an abort.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    /// Remaining budget; zero once elapsed.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_elapsed(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Await `fut` under the remaining budget. `None` means the deadline
    /// elapsed before the future completed.
    pub async fn bound<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::time::timeout(self.remaining(), fut).await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bound_completes_within_budget() {
        let deadline = Deadline::after(Duration::from_secs(5));
        let value = deadline.bound(async { 42 }).await;
        assert_eq!(value, Some(42));
    }

    #[tokio::test]
    async fn test_bound_times_out_when_elapsed() {
        let deadline = Deadline::after(Duration::from_millis(10));
        let value = deadline
            .bound(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                42
            })
            .await;
        assert_eq!(value, None);
        assert!(deadline.is_elapsed());
    }
}
