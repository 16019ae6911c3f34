//! Trellis - gRPC document-store client core.
//!
//! Trellis is the request-lifecycle engine of a gRPC document-database
//! client: it turns a logical operation (get/upsert/query/search/...) into
//! a dispatched RPC, classifies every outcome against the server's error
//! taxonomy, and decides whether to retry, fail, or succeed. Channel setup,
//! TLS, and the protobuf request shapes live outside this crate; they are
//! reached through the [`rpc::Transport`] trait and opaque byte payloads.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Operation Layer (caller)                    │
//! │        get │ upsert │ query │ search │ analytics │ mgmt         │
//! └─────────────────────────────────────────────────────────────────┘
//!                                 │ Request (deadline, idempotency)
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Dispatch Loop                          │
//! │          execute → classify → return / raise / retry            │
//! └─────────────────────────────────────────────────────────────────┘
//!                                 │ RpcStatus (code + detail blocks)
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Status Classifier                         │
//! │      (code, detail) → Success │ Fail(error) │ Retry(delay)      │
//! └─────────────────────────────────────────────────────────────────┘
//!                                 │ RetryReason
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Retry Orchestration                       │
//! │        strategy decision bounded by the request deadline        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! ## Core
//! - [`core::config`] - Client configuration and timeout defaults
//! - [`core::error`] - Error taxonomy and classification context
//! - [`core::time`] - Deadline arithmetic
//!
//! ## Request
//! - [`request`] - Request descriptors and dispatch decisions
//!
//! ## Retry
//! - [`retry`] - Retry reasons, strategy contract, and orchestration
//!
//! ## RPC
//! - [`rpc::status`] - Status codes and the structured status value
//! - [`rpc::details`] - google.rpc detail-block wire types
//! - [`rpc::classify`] - Status classification
//! - [`rpc::transport`] - Transport contract
//! - [`rpc::dispatch`] - The dispatch loop
//!
//! # Key Invariants
//!
//! - **DEADLINE-ONCE**: a request's absolute deadline is computed exactly
//!   once and shared by every retry of that operation
//! - **CLASSIFY-TOTAL**: every (status code, detail) combination maps to
//!   exactly one behaviour; unrecognized combinations fall back to the
//!   generic error kind, never to a panic
//! - **RETRY-BOUNDED**: no retry is offered once the deadline has passed,
//!   and a suggested delay never overshoots the remaining budget
//! - **TIMEOUT-SPLIT**: timeouts on idempotent operations are reported as
//!   unambiguous, on non-idempotent operations as ambiguous

// Core infrastructure
pub mod core;

// Request descriptors and dispatch decisions
pub mod request;

// Retry orchestration
pub mod retry;

// RPC status handling, classification, and dispatch
pub mod rpc;

// Re-exports for convenience
pub use self::core::{config, error, time};
pub use self::core::error::{ErrorContext, ErrorKind, TrellisError, TrellisResult};
pub use self::core::time::Deadline;
pub use request::{Request, RequestBehaviour, ServiceType};
pub use retry::{
    maybe_retry, BestEffortRetryStrategy, FailFastRetryStrategy, RetryDecision, RetryReason,
    RetryStrategy,
};
pub use rpc::{classify, dispatch, RpcOutcome, RpcStatus, StatusCode, Transport, TransportError};
