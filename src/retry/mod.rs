//! Retry orchestration.
//!
//! The classifier hands retryable failures to [`maybe_retry`], which owns
//! the per-request bookkeeping and the deadline enforcement, then consults
//! the request's pluggable [`RetryStrategy`] for the delay. Strategies
//! themselves are pure: they never touch the request and never outlive the
//! deadline on their own.

mod reason;
mod strategy;

pub use reason::RetryReason;
pub use strategy::{BestEffortRetryStrategy, FailFastRetryStrategy, RetryDecision, RetryStrategy};

use std::sync::Arc;

use crate::core::error::{ErrorContext, ErrorKind, TrellisError};
use crate::request::{Request, RequestBehaviour};

/// Consult the request's retry strategy after a retryable failure.
///
/// Exactly one retry attempt is recorded per invocation (reason added to
/// the deduplicated set, counter incremented), atomically with the
/// deadline check. Returns `Retry(delay)` with the delay clamped to the
/// remaining budget, or a `Fail` carrying the idempotency-selected
/// timeout kind once the deadline is exhausted or the strategy gives up.
pub fn maybe_retry(request: &mut Request, reason: RetryReason) -> RequestBehaviour {
    request.add_retry_attempt(reason);

    let remaining = request.deadline().remaining();
    if remaining.is_zero() {
        return RequestBehaviour::fail(timeout_error(
            request,
            "deadline exhausted before the next attempt",
        ));
    }

    let strategy = Arc::clone(request.retry_strategy());
    match strategy.decide(request.retry_attempts(), reason, remaining) {
        RetryDecision::Retry { delay } => RequestBehaviour::retry(delay.min(remaining)),
        RetryDecision::GiveUp => {
            RequestBehaviour::fail(timeout_error(request, "retry strategy exhausted"))
        }
    }
}

/// Timeout error for an exhausted retry budget.
///
/// Idempotent operations report an unambiguous timeout (state unchanged);
/// non-idempotent operations report an ambiguous one (outcome unknown).
fn timeout_error(request: &Request, message: &str) -> TrellisError {
    let kind = if request.idempotent() {
        ErrorKind::UnambiguousTimeout
    } else {
        ErrorKind::AmbiguousTimeout
    };
    let context = ErrorContext {
        retry_attempts: Some(request.retry_attempts()),
        retry_reasons: request.retry_reasons().iter().copied().collect(),
        ..Default::default()
    };
    TrellisError::new(kind, message, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ServiceType;
    use bytes::Bytes;
    use std::time::Duration;

    fn request(timeout: Duration) -> Request {
        Request::new(ServiceType::Kv, "Get", Bytes::new(), timeout)
    }

    #[test]
    fn test_maybe_retry_records_one_attempt_per_call() {
        let mut req = request(Duration::from_secs(10));
        for expected in 1..=3 {
            let behaviour = maybe_retry(&mut req, RetryReason::KvLocked);
            assert!(matches!(behaviour, RequestBehaviour::Retry { .. }));
            assert_eq!(req.retry_attempts(), expected);
        }
        assert_eq!(req.retry_reasons().len(), 1);
    }

    #[test]
    fn test_delay_never_overshoots_remaining_budget() {
        /// Strategy whose suggested delay dwarfs any test deadline.
        #[derive(Debug)]
        struct Glacial;
        impl RetryStrategy for Glacial {
            fn decide(&self, _: u32, _: RetryReason, _: Duration) -> RetryDecision {
                RetryDecision::Retry {
                    delay: Duration::from_secs(3600),
                }
            }
        }

        let mut req = request(Duration::from_millis(50)).with_retry_strategy(Arc::new(Glacial));
        match maybe_retry(&mut req, RetryReason::SocketNotAvailable) {
            RequestBehaviour::Retry { delay } => {
                assert!(delay <= Duration::from_millis(50));
            }
            other => panic!("expected retry, got {:?}", other),
        }
    }

    #[test]
    fn test_exhausted_deadline_selects_timeout_by_idempotency() {
        let mut ambiguous = request(Duration::ZERO);
        match maybe_retry(&mut ambiguous, RetryReason::KvLocked) {
            RequestBehaviour::Fail(err) => assert_eq!(err.kind, ErrorKind::AmbiguousTimeout),
            other => panic!("expected fail, got {:?}", other),
        }

        let mut unambiguous = request(Duration::ZERO).with_idempotent(true);
        match maybe_retry(&mut unambiguous, RetryReason::KvLocked) {
            RequestBehaviour::Fail(err) => {
                assert_eq!(err.kind, ErrorKind::UnambiguousTimeout);
                assert_eq!(err.context.retry_attempts, Some(1));
            }
            other => panic!("expected fail, got {:?}", other),
        }
    }
}
