//! The dispatch loop.
//!
//! Drives one logical operation to completion: execute an attempt,
//! classify the outcome, then return, raise, or sleep-and-resubmit. This
//! is the only place a `Fail` behaviour becomes a caller-visible error,
//! and `Retry` never escapes it.

use bytes::Bytes;

use crate::core::error::TrellisResult;
use crate::request::{Request, RequestBehaviour};

use super::classify::classify;
use super::transport::{RpcOutcome, Transport};

/// Drive a request against the transport until it succeeds or fails
/// terminally.
///
/// The request's deadline is computed on the first attempt and shared by
/// every retry; each attempt sees the same absolute deadline and the
/// transport bounds the attempt by the remaining time. The suggested
/// retry delay is honored here with a timer sleep.
///
/// An OK status with no payload (a bare acknowledgement) yields an empty
/// payload.
pub async fn dispatch<T>(transport: &T, request: &mut Request) -> TrellisResult<Bytes>
where
    T: Transport + ?Sized,
{
    loop {
        let deadline = request.deadline();
        let outcome = transport
            .execute(request.service(), request.rpc(), request.payload().clone(), deadline)
            .await;

        let status = match outcome {
            Ok(RpcOutcome::Payload(payload)) => return Ok(payload),
            Ok(RpcOutcome::Status(status)) => status,
            Err(err) => err.into_status(),
        };

        match classify(&status, request) {
            RequestBehaviour::Success => return Ok(Bytes::new()),
            RequestBehaviour::Fail(error) => {
                tracing::warn!(
                    service = %request.service(),
                    rpc = request.rpc(),
                    kind = %error.kind,
                    attempts = request.retry_attempts(),
                    "request failed"
                );
                return Err(error);
            }
            RequestBehaviour::Retry { delay } => {
                tracing::debug!(
                    service = %request.service(),
                    rpc = request.rpc(),
                    attempt = request.retry_attempts(),
                    delay_ms = delay.as_millis() as u64,
                    "retrying request"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
