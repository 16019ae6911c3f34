//! Request descriptors and dispatch decisions.
//!
//! A [`Request`] describes one logical operation: where it is routed, its
//! opaque payload, the total time budget, and the retry bookkeeping that
//! accumulates across attempts. A request is owned exclusively by the
//! dispatch loop driving it; attempts are strictly sequential and never
//! share one request concurrently.

use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::core::error::TrellisError;
use crate::core::time::Deadline;
use crate::retry::{BestEffortRetryStrategy, RetryReason, RetryStrategy};

/// Service a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Key-value service.
    Kv,
    /// Query service.
    Query,
    /// Full-text search service.
    Search,
    /// Analytics service.
    Analytics,
    /// View service.
    View,
    /// Cluster management service.
    Management,
}

impl ServiceType {
    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kv => "kv",
            Self::Query => "query",
            Self::Search => "search",
            Self::Analytics => "analytics",
            Self::View => "view",
            Self::Management => "management",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptor for one in-flight logical operation.
///
/// The deadline is computed lazily on first access as `now + timeout` and
/// then cached: a retried call shares the original deadline, it does not
/// get a fresh timeout per attempt.
#[derive(Debug)]
pub struct Request {
    /// Target service.
    service: ServiceType,

    /// Method identifier within the service.
    rpc: String,

    /// Opaque wire-format request payload.
    payload: Bytes,

    /// Total duration budget for all attempts.
    timeout: Duration,

    /// Absolute deadline, computed once on first access.
    deadline: OnceCell<Deadline>,

    /// Whether the operation is safe to retry when its effect is unknown.
    idempotent: bool,

    /// Retries consumed so far (the initial attempt does not count).
    retry_attempts: u32,

    /// Distinct reasons retries were considered, across all attempts.
    retry_reasons: BTreeSet<RetryReason>,

    /// Strategy consulted when a retryable failure is classified.
    retry_strategy: Arc<dyn RetryStrategy>,
}

impl Request {
    /// Create a request with the default (best effort) retry strategy.
    ///
    /// The operation is treated as non-idempotent unless
    /// [`Request::with_idempotent`] says otherwise.
    pub fn new(
        service: ServiceType,
        rpc: impl Into<String>,
        payload: Bytes,
        timeout: Duration,
    ) -> Self {
        Self {
            service,
            rpc: rpc.into(),
            payload,
            timeout,
            deadline: OnceCell::new(),
            idempotent: false,
            retry_attempts: 0,
            retry_reasons: BTreeSet::new(),
            retry_strategy: Arc::new(BestEffortRetryStrategy::default()),
        }
    }

    /// Mark the operation idempotent (or not).
    pub fn with_idempotent(mut self, idempotent: bool) -> Self {
        self.idempotent = idempotent;
        self
    }

    /// Replace the retry strategy.
    pub fn with_retry_strategy(mut self, strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = strategy;
        self
    }

    /// Target service.
    pub fn service(&self) -> ServiceType {
        self.service
    }

    /// Method identifier.
    pub fn rpc(&self) -> &str {
        &self.rpc
    }

    /// Opaque request payload.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Total duration budget.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the operation is idempotent.
    pub fn idempotent(&self) -> bool {
        self.idempotent
    }

    /// The absolute deadline shared by every attempt.
    ///
    /// Computed as `now + timeout` on first access, then cached. Expose
    /// this to the transport so each attempt is bounded by the remaining
    /// time, never by a fresh per-attempt timeout.
    pub fn deadline(&self) -> Deadline {
        *self.deadline.get_or_init(|| Deadline::after(self.timeout))
    }

    /// Retries consumed so far.
    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    /// Distinct retry reasons observed so far.
    pub fn retry_reasons(&self) -> &BTreeSet<RetryReason> {
        &self.retry_reasons
    }

    /// The strategy consulted for retryable failures.
    pub fn retry_strategy(&self) -> &Arc<dyn RetryStrategy> {
        &self.retry_strategy
    }

    /// Record one retry: adds `reason` to the deduplicated reason set and
    /// increments the attempt counter.
    ///
    /// No upper bound is enforced here; bounding is the strategy's job.
    pub fn add_retry_attempt(&mut self, reason: RetryReason) {
        self.retry_reasons.insert(reason);
        self.retry_attempts += 1;
    }
}

/// Decision produced by classifying one RPC outcome.
///
/// A flat value rather than control flow: the classifier stays a pure
/// function and the dispatch loop pattern-matches on the result. `Retry`
/// never escapes to the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBehaviour {
    /// The operation succeeded.
    Success,

    /// The operation failed terminally with a classified error.
    Fail(TrellisError),

    /// The operation should be resubmitted after the suggested delay.
    Retry {
        /// Suggested wait before the next attempt. May be zero.
        delay: Duration,
    },
}

impl RequestBehaviour {
    /// The success variant.
    pub fn success() -> Self {
        Self::Success
    }

    /// A terminal failure carrying a fully-formed error.
    pub fn fail(error: TrellisError) -> Self {
        Self::Fail(error)
    }

    /// A retry after the suggested delay.
    pub fn retry(delay: Duration) -> Self {
        Self::Retry { delay }
    }
}
