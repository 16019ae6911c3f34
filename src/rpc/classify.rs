//! Status classification.
//!
//! Maps a structured RPC status plus the originating request onto exactly
//! one dispatch decision. Classification is total and deterministic:
//! every (code, detail) combination maps to some behaviour, and
//! combinations the taxonomy does not recognize — including a detail
//! block absent where the code implies one — fall back to the generic
//! error kind rather than an unchecked default.
//!
//! Only the two retry rows touch the request: they hand off to
//! [`crate::retry::maybe_retry`], which records the attempt and enforces
//! the deadline. Everything else is a pure mapping.

use crate::core::error::{ErrorContext, ErrorKind, TrellisError};
use crate::request::{Request, RequestBehaviour};
use crate::retry::{self, RetryReason};

use super::details::DecodedDetails;
use super::status::{RpcStatus, StatusCode};

/// Classify one RPC status into a dispatch decision.
pub fn classify(status: &RpcStatus, request: &mut Request) -> RequestBehaviour {
    let details = DecodedDetails::from_details(&status.details);

    match status.code {
        StatusCode::Ok => RequestBehaviour::success(),

        StatusCode::NotFound => match details.resource_type().and_then(not_found_kind) {
            Some(kind) => fail(status, &details, kind),
            None => fallback(status, &details),
        },

        StatusCode::AlreadyExists => match details.resource_type().and_then(already_exists_kind) {
            Some(kind) => fail(status, &details, kind),
            None => fallback(status, &details),
        },

        StatusCode::InvalidArgument => fail(status, &details, ErrorKind::InvalidArgument),

        StatusCode::Aborted => match details.error_reason() {
            Some("CAS_MISMATCH") => fail(status, &details, ErrorKind::CasMismatch),
            _ => fallback(status, &details),
        },

        StatusCode::FailedPrecondition => match details.first_violation_type() {
            Some("LOCKED") => retry::maybe_retry(request, RetryReason::KvLocked),
            Some("DOC_TOO_DEEP") => fail(status, &details, ErrorKind::PathTooDeep),
            Some("DOC_NOT_JSON") => fail(status, &details, ErrorKind::DocumentNotJson),
            Some("PATH_MISMATCH") => fail(status, &details, ErrorKind::PathMismatch),
            Some("WOULD_INVALIDATE_JSON") => fail(status, &details, ErrorKind::ValueInvalid),
            Some("PATH_VALUE_OUT_OF_RANGE") => fail(status, &details, ErrorKind::NumberTooBig),
            Some("VALUE_TOO_LARGE") => fail(status, &details, ErrorKind::ValueTooLarge),
            _ => fallback(status, &details),
        },

        StatusCode::Unimplemented => fail(status, &details, ErrorKind::FeatureNotAvailable),

        StatusCode::Unauthenticated => fail(status, &details, ErrorKind::AuthenticationFailure),

        StatusCode::PermissionDenied => {
            // Permission failures on user resources carry management
            // semantics this taxonomy does not model.
            if details.resource_type() == Some("user") {
                fallback(status, &details)
            } else {
                fail(status, &details, ErrorKind::PermissionDenied)
            }
        }

        StatusCode::Cancelled => fail(status, &details, ErrorKind::RequestCanceled),

        StatusCode::DeadlineExceeded => {
            let kind = if request.idempotent() {
                ErrorKind::UnambiguousTimeout
            } else {
                ErrorKind::AmbiguousTimeout
            };
            fail(status, &details, kind)
        }

        StatusCode::Internal => fail(status, &details, ErrorKind::InternalServerFailure),

        StatusCode::Unavailable => retry::maybe_retry(request, RetryReason::SocketNotAvailable),

        StatusCode::Unknown
        | StatusCode::ResourceExhausted
        | StatusCode::OutOfRange
        | StatusCode::DataLoss => fallback(status, &details),
    }
}

/// Resource-type dispatch for NOT_FOUND.
fn not_found_kind(resource_type: &str) -> Option<ErrorKind> {
    match resource_type {
        "document" => Some(ErrorKind::DocumentNotFound),
        "queryindex" | "searchindex" => Some(ErrorKind::IndexNotFound),
        "bucket" => Some(ErrorKind::BucketNotFound),
        "scope" => Some(ErrorKind::ScopeNotFound),
        "collection" => Some(ErrorKind::CollectionNotFound),
        "path" => Some(ErrorKind::PathNotFound),
        _ => None,
    }
}

/// Resource-type dispatch for ALREADY_EXISTS.
fn already_exists_kind(resource_type: &str) -> Option<ErrorKind> {
    match resource_type {
        "document" => Some(ErrorKind::DocumentExists),
        "queryindex" | "searchindex" => Some(ErrorKind::IndexExists),
        "bucket" => Some(ErrorKind::BucketExists),
        "scope" => Some(ErrorKind::ScopeExists),
        "collection" => Some(ErrorKind::CollectionExists),
        "path" => Some(ErrorKind::PathExists),
        _ => None,
    }
}

/// Diagnostic context for an error constructed from this status.
fn context_for(status: &RpcStatus, details: &DecodedDetails) -> ErrorContext {
    ErrorContext {
        server: (!status.message.is_empty()).then(|| status.message.clone()),
        resource_type: details.resource_type().map(str::to_string),
        resource_name: details
            .resource_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string),
        precondition_violation: details.first_violation_type().map(str::to_string),
        reason: details.error_reason().map(str::to_string),
        ..Default::default()
    }
}

fn fail(status: &RpcStatus, details: &DecodedDetails, kind: ErrorKind) -> RequestBehaviour {
    RequestBehaviour::fail(TrellisError::new(
        kind,
        status.message.clone(),
        context_for(status, details),
    ))
}

/// Generic fallback for combinations outside the classification table.
fn fallback(status: &RpcStatus, details: &DecodedDetails) -> RequestBehaviour {
    fail(status, details, ErrorKind::Generic)
}
