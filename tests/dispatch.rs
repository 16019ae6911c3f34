//! Dispatch loop tests.

mod common;

use std::time::Duration;

use bytes::Bytes;
use common::{kv_request, resource_info, status, ScriptedTransport};
use trellis::rpc::{dispatch, RpcOutcome, RpcStatus, StatusCode, TransportError};
use trellis::ErrorKind;

#[tokio::test]
async fn payload_returns_immediately() {
    let transport = ScriptedTransport::new(vec![Ok(RpcOutcome::Payload(Bytes::from_static(
        b"response",
    )))]);
    let mut request = kv_request(Duration::from_secs(5));

    let payload = dispatch(&transport, &mut request).await.unwrap();
    assert_eq!(payload, Bytes::from_static(b"response"));
    assert_eq!(transport.calls(), 1);
    assert_eq!(request.retry_attempts(), 0);
}

#[tokio::test]
async fn bare_ok_status_yields_empty_payload() {
    let transport = ScriptedTransport::new(vec![Ok(RpcOutcome::Status(RpcStatus::ok()))]);
    let mut request = kv_request(Duration::from_secs(5));

    let payload = dispatch(&transport, &mut request).await.unwrap();
    assert!(payload.is_empty());
}

#[tokio::test]
async fn terminal_failure_raises_without_retry() {
    let transport = ScriptedTransport::new(vec![Ok(RpcOutcome::Status(status(
        StatusCode::NotFound,
        "document not found",
        vec![resource_info("document", "k")],
    )))]);
    let mut request = kv_request(Duration::from_secs(5));

    let error = dispatch(&transport, &mut request).await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::DocumentNotFound);
    assert_eq!(transport.calls(), 1);
    assert_eq!(request.retry_attempts(), 0);
}

#[tokio::test]
async fn unavailable_then_payload_retries_to_success() {
    let transport = ScriptedTransport::new(vec![
        Ok(RpcOutcome::Status(RpcStatus::new(
            StatusCode::Unavailable,
            "connection refused",
        ))),
        Ok(RpcOutcome::Payload(Bytes::from_static(b"second try"))),
    ]);
    let mut request = kv_request(Duration::from_secs(5));

    let payload = dispatch(&transport, &mut request).await.unwrap();
    assert_eq!(payload, Bytes::from_static(b"second try"));
    assert_eq!(transport.calls(), 2);
    assert_eq!(request.retry_attempts(), 1);
}

#[tokio::test]
async fn connection_failure_normalizes_and_retries() {
    let transport = ScriptedTransport::new(vec![
        Err(TransportError::connection("peer reset")),
        Ok(RpcOutcome::Payload(Bytes::from_static(b"ok"))),
    ]);
    let mut request = kv_request(Duration::from_secs(5));

    let payload = dispatch(&transport, &mut request).await.unwrap();
    assert_eq!(payload, Bytes::from_static(b"ok"));
    assert_eq!(request.retry_attempts(), 1);
}

#[tokio::test]
async fn persistent_unavailability_times_out_at_the_deadline() {
    // Script exhaustion keeps reporting connection failures.
    let transport = ScriptedTransport::new(vec![]);
    let mut request = kv_request(Duration::from_millis(50));

    let error = dispatch(&transport, &mut request).await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::AmbiguousTimeout);
    assert!(request.retry_attempts() >= 1);
    assert!(transport.calls() >= 1);
}

#[tokio::test]
async fn idempotent_exhaustion_reports_unambiguous_timeout() {
    let transport = ScriptedTransport::new(vec![]);
    let mut request = kv_request(Duration::from_millis(50)).with_idempotent(true);

    let error = dispatch(&transport, &mut request).await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnambiguousTimeout);
    assert!(error.is_timeout());
}
