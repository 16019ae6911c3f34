//! Error taxonomy and classification context.
//!
//! The server's failure taxonomy is a closed set of kinds carried as data
//! on a single error value. Kind is deliberately not type identity: the
//! status classifier stays a pure mapping from status to error value, and
//! callers branch on [`ErrorKind`] instead of downcasting.

use serde::Serialize;
use thiserror::Error;

use crate::retry::RetryReason;

/// Failure kinds recognized by the client core.
///
/// The set is closed: anything the taxonomy does not recognize is reported
/// as [`ErrorKind::Generic`] with the raw server message preserved in the
/// error's context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// Document does not exist.
    #[error("document not found")]
    DocumentNotFound,

    /// Document already exists.
    #[error("document exists")]
    DocumentExists,

    /// Query or search index does not exist.
    #[error("index not found")]
    IndexNotFound,

    /// Query or search index already exists.
    #[error("index exists")]
    IndexExists,

    /// Bucket does not exist.
    #[error("bucket not found")]
    BucketNotFound,

    /// Bucket already exists.
    #[error("bucket exists")]
    BucketExists,

    /// Scope does not exist.
    #[error("scope not found")]
    ScopeNotFound,

    /// Scope already exists.
    #[error("scope exists")]
    ScopeExists,

    /// Collection does not exist.
    #[error("collection not found")]
    CollectionNotFound,

    /// Collection already exists.
    #[error("collection exists")]
    CollectionExists,

    /// Subdocument path does not exist.
    #[error("path not found")]
    PathNotFound,

    /// Subdocument path already exists.
    #[error("path exists")]
    PathExists,

    /// Request was malformed or referenced invalid arguments.
    #[error("invalid argument")]
    InvalidArgument,

    /// Write rejected because the document's version token did not match.
    #[error("cas mismatch")]
    CasMismatch,

    /// Subdocument path nests deeper than the server allows.
    #[error("path too deep")]
    PathTooDeep,

    /// Document content is not JSON.
    #[error("document not json")]
    DocumentNotJson,

    /// Subdocument path type does not match the document structure.
    #[error("path mismatch")]
    PathMismatch,

    /// Value would invalidate the document's JSON structure.
    #[error("value invalid")]
    ValueInvalid,

    /// Numeric value is outside the representable range.
    #[error("number too big")]
    NumberTooBig,

    /// Value exceeds the server's size limit.
    #[error("value too large")]
    ValueTooLarge,

    /// Server does not implement the requested operation.
    #[error("feature not available")]
    FeatureNotAvailable,

    /// Credentials were missing or rejected.
    #[error("authentication failure")]
    AuthenticationFailure,

    /// Authenticated principal lacks access to the resource.
    #[error("permission denied")]
    PermissionDenied,

    /// Request was cancelled before completion.
    #[error("request canceled")]
    RequestCanceled,

    /// Idempotent operation timed out; the server state is unchanged.
    #[error("unambiguous timeout")]
    UnambiguousTimeout,

    /// Non-idempotent operation timed out; the outcome is unknown and the
    /// caller must reconcile state before retrying.
    #[error("ambiguous timeout")]
    AmbiguousTimeout,

    /// Server-side failure with no more specific mapping.
    #[error("internal server failure")]
    InternalServerFailure,

    /// Fallback for status/detail combinations the taxonomy does not
    /// recognize. The raw message and decoded context are preserved.
    #[error("generic error")]
    Generic,
}

impl ErrorKind {
    /// Check if this kind reports a timeout.
    pub fn is_timeout(self) -> bool {
        matches!(self, Self::UnambiguousTimeout | Self::AmbiguousTimeout)
    }
}

/// Diagnostic context decoded from a failed RPC's status.
///
/// Attached to every classified error so operators can distinguish, e.g.,
/// a CAS mismatch from a generic internal failure without parsing raw
/// status codes. Serializes for structured logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorContext {
    /// The server's status message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Resource type from the status's resource-info block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Resource name from the status's resource-info block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,

    /// First violation type from the status's precondition-failure block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precondition_violation: Option<String>,

    /// Reason code from the status's error-info block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Retry attempts consumed when the error was constructed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_attempts: Option<u32>,

    /// Distinct retry reasons observed across attempts.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub retry_reasons: Vec<RetryReason>,
}

/// A classified failure: kind, server message, and decoded context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TrellisError {
    /// Failure kind from the closed taxonomy.
    pub kind: ErrorKind,

    /// Human-readable message, usually the server's status message.
    pub message: String,

    /// Decoded diagnostic context.
    pub context: ErrorContext,
}

impl TrellisError {
    /// Create an error with the given kind, message, and context.
    pub fn new(kind: ErrorKind, message: impl Into<String>, context: ErrorContext) -> Self {
        Self {
            kind,
            message: message.into(),
            context,
        }
    }

    /// Create an error with an empty context.
    pub fn from_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, message, ErrorContext::default())
    }

    /// Check if this error reports a timeout.
    pub fn is_timeout(&self) -> bool {
        self.kind.is_timeout()
    }
}

/// Result type using TrellisError.
pub type TrellisResult<T> = Result<T, TrellisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_kind_and_message() {
        let err = TrellisError::from_kind(ErrorKind::DocumentNotFound, "no such key");
        assert_eq!(err.to_string(), "document not found: no such key");
    }

    #[test]
    fn test_timeout_predicate() {
        assert!(ErrorKind::UnambiguousTimeout.is_timeout());
        assert!(ErrorKind::AmbiguousTimeout.is_timeout());
        assert!(!ErrorKind::CasMismatch.is_timeout());
    }

    #[test]
    fn test_context_serializes_only_populated_fields() {
        let context = ErrorContext {
            server: Some("document locked".to_string()),
            resource_type: Some("document".to_string()),
            ..Default::default()
        };
        let rendered = toml::to_string(&context).unwrap();
        assert!(rendered.contains("server"));
        assert!(rendered.contains("resource_type"));
        assert!(!rendered.contains("resource_name"));
        assert!(!rendered.contains("retry_reasons"));
    }
}
