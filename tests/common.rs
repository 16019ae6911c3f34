//! Common test utilities.
//!
//! This module contains shared helpers for integration tests.
//! Import with `mod common;` in test files.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use trellis::rpc::details::{
    AnyDetail, ErrorInfo, PreconditionFailure, PreconditionViolation, ResourceInfo,
    ERROR_INFO_TYPE_URL, PRECONDITION_FAILURE_TYPE_URL, RESOURCE_INFO_TYPE_URL,
};
use trellis::rpc::{RpcOutcome, RpcStatus, StatusCode, Transport, TransportError};
use trellis::{Deadline, Request, ServiceType};

/// A KV get request with the given timeout.
pub fn kv_request(timeout: Duration) -> Request {
    Request::new(ServiceType::Kv, "Get", Bytes::new(), timeout)
}

/// A status with the given code, message, and detail blocks.
pub fn status(code: StatusCode, message: &str, details: Vec<AnyDetail>) -> RpcStatus {
    RpcStatus::new(code, message).with_details(details)
}

/// A resource-info detail block.
pub fn resource_info(resource_type: &str, resource_name: &str) -> AnyDetail {
    AnyDetail::pack(
        RESOURCE_INFO_TYPE_URL,
        &ResourceInfo {
            resource_type: resource_type.to_string(),
            resource_name: resource_name.to_string(),
            ..Default::default()
        },
    )
}

/// A precondition-failure detail block with one violation.
pub fn precondition(violation_type: &str) -> AnyDetail {
    AnyDetail::pack(
        PRECONDITION_FAILURE_TYPE_URL,
        &PreconditionFailure {
            violations: vec![PreconditionViolation {
                violation_type: violation_type.to_string(),
                ..Default::default()
            }],
        },
    )
}

/// An error-info detail block with the given reason.
pub fn error_info(reason: &str) -> AnyDetail {
    AnyDetail::pack(
        ERROR_INFO_TYPE_URL,
        &ErrorInfo {
            reason: reason.to_string(),
            ..Default::default()
        },
    )
}

/// Transport that replays a scripted sequence of outcomes.
///
/// Once the script is exhausted, every further attempt reports a
/// connection failure (which classifies as retryable).
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<RpcOutcome, TransportError>>>,
    calls: AtomicU32,
}

impl ScriptedTransport {
    pub fn new(outcomes: Vec<Result<RpcOutcome, TransportError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicU32::new(0),
        }
    }

    /// Number of execute calls observed.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(
        &self,
        _service: ServiceType,
        _rpc: &str,
        _payload: Bytes,
        _deadline: Deadline,
    ) -> Result<RpcOutcome, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::connection("script exhausted")))
    }
}
