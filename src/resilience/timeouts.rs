//! Deadline enforcement.
//!
//! # Responsibilities
//! - Represent an absolute request budget (`Deadline`)
//! - Carve child deadlines that never outlive their parent
//! - Run a future under a deadline, cancelling it on expiry
//!
//! # Design Decisions
//! - Uses Tokio's clock so every tier shares one time source
//! - An already expired deadline fails without polling the future
//! - Expiry drops the future; whatever I/O it owns is cancelled with it

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// The deadline elapsed before the guarded operation completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deadline of {}ms exceeded", .budget.as_millis())]
pub struct DeadlineExceeded {
    pub budget: Duration,
}

/// An absolute point in time by which an operation must finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Root deadline expiring `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
            budget,
        }
    }

    /// Child deadline expiring `budget` from now, clamped to this deadline.
    pub fn child(&self, budget: Duration) -> Self {
        let now = Instant::now();
        let expires_at = (now + budget).min(self.expires_at);
        Self {
            expires_at,
            budget: expires_at.saturating_duration_since(now),
        }
    }

    /// Effective budget granted when the deadline was created.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Time left before expiry; zero once expired.
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Run `fut` to completion or until the deadline, whichever comes first.
    pub async fn run<F>(self, fut: F) -> Result<F::Output, DeadlineExceeded>
    where
        F: Future,
    {
        let exceeded = DeadlineExceeded {
            budget: self.budget,
        };
        if self.is_expired() {
            return Err(exceeded);
        }
        tokio::time::timeout_at(self.expires_at, fut)
            .await
            .map_err(|_| exceeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_child_is_clamped_to_parent() {
        let parent = Deadline::after(Duration::from_millis(50));
        let child = parent.child(Duration::from_secs(10));

        assert!(child.expires_at() <= parent.expires_at());
        assert!(child.budget() <= Duration::from_millis(50));
    }

    #[test]
    fn test_shorter_child_keeps_its_own_budget() {
        let parent = Deadline::after(Duration::from_secs(10));
        let child = parent.child(Duration::from_millis(10));

        assert_eq!(child.budget(), Duration::from_millis(10));
        assert!(child.expires_at() < parent.expires_at());
    }

    #[tokio::test]
    async fn test_run_completes_within_budget() {
        let deadline = Deadline::after(Duration::from_secs(5));
        let value = deadline.run(async { 42 }).await;
        assert_eq!(value, Ok(42));
    }

    #[tokio::test]
    async fn test_run_times_out() {
        let deadline = Deadline::after(Duration::from_millis(20));
        let result = deadline
            .run(tokio::time::sleep(Duration::from_secs(5)))
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.budget, Duration::from_millis(20));
        assert!(deadline.is_expired());
        assert_eq!(deadline.remaining(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_expired_deadline_never_polls() {
        let parent = Deadline::after(Duration::from_millis(1));
        tokio::time::sleep(Duration::from_millis(5)).await;

        let child = parent.child(Duration::from_secs(1));
        assert!(child.is_expired());
        assert_eq!(child.budget(), Duration::ZERO);

        let polled = Arc::new(AtomicBool::new(false));
        let flag = polled.clone();
        let result = child
            .run(async move {
                flag.store(true, Ordering::SeqCst);
            })
            .await;

        assert!(result.is_err());
        assert!(!polled.load(Ordering::SeqCst));
    }
}
