//! Transport contract.
//!
//! The transport is a black box that carries one RPC attempt: channel
//! setup, TLS, and load balancing live behind this trait. Both failure
//! shapes it can produce — an explicit application-level status or a
//! transport-level failure — normalize into the same [`RpcStatus`] so the
//! classifier has a single entry point.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::core::time::Deadline;
use crate::request::ServiceType;

use super::status::{RpcStatus, StatusCode};

/// Outcome of one executed RPC attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcOutcome {
    /// The call completed and returned a response payload.
    Payload(Bytes),
    /// The call completed with an application-level status.
    Status(RpcStatus),
}

/// Failure raised by the transport itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The transport surfaced a structured status (e.g. decoded from a
    /// response trailer).
    #[error("rpc failed: {0}")]
    Status(RpcStatus),

    /// Transport-level failure with no structured status (e.g. a
    /// connection reset).
    #[error("connection failure: {message}")]
    Connection {
        /// Closest status code for the failure.
        code: StatusCode,
        /// Transport-provided description.
        message: String,
    },
}

impl TransportError {
    /// A connection-level failure, reported as UNAVAILABLE.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            code: StatusCode::Unavailable,
            message: message.into(),
        }
    }

    /// Normalize into the structured status consumed by the classifier.
    ///
    /// A structured status is reused verbatim; a bare code/message pair is
    /// synthesized into one with no detail blocks.
    pub fn into_status(self) -> RpcStatus {
        match self {
            Self::Status(status) => status,
            Self::Connection { code, message } => RpcStatus::new(code, message),
        }
    }
}

/// Executes one `(service, rpc, payload, deadline)` call.
///
/// Each attempt — including retries — must be bounded by the remaining
/// time to the supplied deadline, which is shared by every attempt of the
/// same logical operation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one RPC attempt.
    async fn execute(
        &self,
        service: ServiceType,
        rpc: &str,
        payload: Bytes,
        deadline: Deadline,
    ) -> Result<RpcOutcome, TransportError>;
}
