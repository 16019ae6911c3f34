//! Retry orchestration tests.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::kv_request;
use trellis::{
    maybe_retry, ErrorKind, FailFastRetryStrategy, RequestBehaviour, RetryReason,
};

#[test]
fn attempts_and_reasons_accumulate() {
    let mut request = kv_request(Duration::from_secs(60));
    let reasons = [
        RetryReason::KvLocked,
        RetryReason::SocketNotAvailable,
        RetryReason::KvLocked,
        RetryReason::SocketNotAvailable,
    ];
    for (index, reason) in reasons.into_iter().enumerate() {
        let behaviour = maybe_retry(&mut request, reason);
        assert!(matches!(behaviour, RequestBehaviour::Retry { .. }));
        assert_eq!(request.retry_attempts(), index as u32 + 1);
    }
    let observed: Vec<_> = request.retry_reasons().iter().copied().collect();
    assert_eq!(
        observed,
        vec![RetryReason::KvLocked, RetryReason::SocketNotAvailable]
    );
}

#[test]
fn retries_terminate_at_the_deadline() {
    let mut request = kv_request(Duration::from_millis(50));

    let mut behaviour = maybe_retry(&mut request, RetryReason::SocketNotAvailable);
    let mut rounds = 0u32;
    loop {
        match behaviour {
            RequestBehaviour::Retry { delay } => {
                std::thread::sleep(delay.max(Duration::from_millis(1)));
            }
            RequestBehaviour::Fail(error) => {
                assert_eq!(error.kind, ErrorKind::AmbiguousTimeout);
                assert_eq!(error.context.retry_attempts, Some(request.retry_attempts()));
                break;
            }
            RequestBehaviour::Success => panic!("maybe_retry never succeeds"),
        }
        rounds += 1;
        assert!(rounds < 10_000, "retry loop failed to terminate");
        behaviour = maybe_retry(&mut request, RetryReason::SocketNotAvailable);
    }
}

#[test]
fn exhausted_idempotent_request_times_out_unambiguously() {
    let mut request = kv_request(Duration::ZERO).with_idempotent(true);
    match maybe_retry(&mut request, RetryReason::SocketNotAvailable) {
        RequestBehaviour::Fail(error) => {
            assert_eq!(error.kind, ErrorKind::UnambiguousTimeout);
            assert_eq!(error.context.retry_reasons, vec![RetryReason::SocketNotAvailable]);
        }
        other => panic!("expected fail, got {:?}", other),
    }
}

#[test]
fn fail_fast_strategy_records_the_attempt_then_fails() {
    let mut request =
        kv_request(Duration::from_secs(60)).with_retry_strategy(Arc::new(FailFastRetryStrategy));
    match maybe_retry(&mut request, RetryReason::KvLocked) {
        RequestBehaviour::Fail(error) => {
            assert_eq!(error.kind, ErrorKind::AmbiguousTimeout);
            assert_eq!(error.context.retry_attempts, Some(1));
        }
        other => panic!("expected fail, got {:?}", other),
    }
    assert_eq!(request.retry_attempts(), 1);
}
