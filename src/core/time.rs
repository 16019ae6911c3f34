//! Deadline arithmetic.
//!
//! A logical operation is given one absolute deadline when it is first
//! dispatched. Retries of the same operation share that deadline: each
//! attempt is bounded by the remaining budget, never by a fresh per-attempt
//! timeout.

use std::time::{Duration, Instant};

/// An absolute point in time bounding every attempt of one logical operation.
///
/// Backed by a monotonic clock, so a deadline never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Create a deadline `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self {
            at: Instant::now() + timeout,
        }
    }

    /// Create a deadline at the given instant.
    pub const fn at(instant: Instant) -> Self {
        Self { at: instant }
    }

    /// The underlying instant.
    pub const fn instant(self) -> Instant {
        self.at
    }

    /// Time remaining until the deadline.
    ///
    /// Returns zero if the deadline has already passed.
    pub fn remaining(self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// Check if the deadline has passed.
    pub fn has_passed(self) -> bool {
        Instant::now() >= self.at
    }
}

impl std::fmt::Display for Deadline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "deadline(+{}ms)", self.remaining().as_millis())
    }
}
