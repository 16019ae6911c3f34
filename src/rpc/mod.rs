//! RPC status handling, classification, and dispatch.

pub mod classify;
pub mod details;
pub mod dispatch;
pub mod status;
pub mod transport;

pub use classify::classify;
pub use dispatch::dispatch;
pub use status::{RpcStatus, StatusCode};
pub use transport::{RpcOutcome, Transport, TransportError};
