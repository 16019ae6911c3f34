//! Retry strategy contract and implementations.
//!
//! A strategy is a pure decision function over `(attempt count, reason,
//! remaining budget)`. All per-request counters live on the request
//! itself, so one strategy instance is stateless and shareable across any
//! number of requests.

use rand::Rng;
use std::time::Duration;

use super::reason::RetryReason;

/// A strategy's verdict for one retryable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the suggested delay.
    Retry {
        /// Suggested wait before the next attempt.
        delay: Duration,
    },
    /// Stop retrying.
    GiveUp,
}

/// Decides whether a request may be retried and after what delay.
///
/// Implementations must be stateless with respect to individual requests:
/// the attempt count and the remaining deadline budget arrive as
/// arguments, and the caller (see [`super::maybe_retry`]) owns the
/// bookkeeping and the deadline enforcement.
pub trait RetryStrategy: std::fmt::Debug + Send + Sync {
    /// Decide for the given attempt.
    ///
    /// `attempts` counts this attempt (it is >= 1). `remaining` is the
    /// time left until the request's deadline and is always positive when
    /// this is called.
    fn decide(&self, attempts: u32, reason: RetryReason, remaining: Duration) -> RetryDecision;
}

/// Default strategy: retry indefinitely with capped exponential backoff.
///
/// The delay for attempt `n` is `base * 2^(n-1)` clamped to `cap`, then
/// jittered uniformly into `[delay/2, delay]` so concurrent clients do
/// not resubmit in lockstep. Attempts are unbounded; the only terminator
/// is the request deadline, enforced by the orchestration hook.
#[derive(Debug, Clone)]
pub struct BestEffortRetryStrategy {
    backoff_base: Duration,
    backoff_cap: Duration,
}

impl BestEffortRetryStrategy {
    /// Create a strategy with the given backoff base and cap.
    pub fn new(backoff_base: Duration, backoff_cap: Duration) -> Self {
        Self {
            backoff_base,
            backoff_cap,
        }
    }

    /// The un-jittered delay for the given attempt.
    fn backoff(&self, attempts: u32) -> Duration {
        let exponent = attempts.saturating_sub(1).min(31);
        self.backoff_base
            .saturating_mul(1u32 << exponent)
            .min(self.backoff_cap)
    }
}

impl Default for BestEffortRetryStrategy {
    fn default() -> Self {
        Self {
            backoff_base: Duration::from_millis(1),
            backoff_cap: Duration::from_millis(500),
        }
    }
}

impl RetryStrategy for BestEffortRetryStrategy {
    fn decide(&self, attempts: u32, _reason: RetryReason, _remaining: Duration) -> RetryDecision {
        let ceiling = self.backoff(attempts).as_millis() as u64;
        let floor = ceiling / 2;
        let delay_ms = rand::thread_rng().gen_range(floor..=ceiling);
        RetryDecision::Retry {
            delay: Duration::from_millis(delay_ms),
        }
    }
}

/// Strategy that never offers a retry.
///
/// Useful for callers that layer their own compensation logic and want
/// every retryable failure surfaced immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFastRetryStrategy;

impl RetryStrategy for FailFastRetryStrategy {
    fn decide(&self, _attempts: u32, _reason: RetryReason, _remaining: Duration) -> RetryDecision {
        RetryDecision::GiveUp
    }
}
