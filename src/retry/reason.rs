//! Reasons a retry is considered.

use serde::{Deserialize, Serialize};

/// Why a retry is being considered for a request.
///
/// Accumulated (deduplicated) on the request across attempts and surfaced
/// in timeout errors so operators can see what kept an operation retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RetryReason {
    /// The document is write-locked on the server.
    KvLocked,
    /// No socket/connection was available to carry the request.
    SocketNotAvailable,
}

impl RetryReason {
    /// Stable wire-style name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::KvLocked => "KV_LOCKED",
            Self::SocketNotAvailable => "SOCKET_NOT_AVAILABLE",
        }
    }
}

impl std::fmt::Display for RetryReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
