//! Wall-clock bound for the optimizer.

use std::time::{Duration, Instant};

/// A deadline the optimizer honours between basket positions.
///
/// The search itself has no cancellation primitive; cost is bounded
/// structurally by beam width and basket length, and a deadline only ever
/// interrupts at position boundaries, never mid-candidate-scoring.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Duration,
}

impl Deadline {
    /// Starts a deadline expiring `limit` from now.
    pub fn after(limit: Duration) -> Self {
        Deadline {
            started: Instant::now(),
            limit,
        }
    }

    /// Returns true once the limit has elapsed.
    pub fn is_exceeded(&self) -> bool {
        self.started.elapsed() >= self.limit
    }

    /// Time spent since the deadline started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generous_deadline_not_exceeded() {
        let deadline = Deadline::after(Duration::from_secs(3600));
        assert!(!deadline.is_exceeded());
    }

    #[test]
    fn test_zero_deadline_exceeded_immediately() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(deadline.is_exceeded());
    }
}
