//! Error taxonomy shared by the upstream client, enricher and aggregator.
//!
//! [`FetchError`] is the only failure an [`Upstream`](crate::Upstream) call can
//! produce. Whether it surfaces to the caller or is swallowed into a
//! placeholder depends on where it happens: base collection fetches propagate
//! it, relation sub-fetches inside enrichment never do.

use std::time::Duration;
use thiserror::Error;

/// A single upstream call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network or DNS level failure; the catalog could not be reached.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// The call exceeded its bounded wait.
    #[error("upstream timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The catalog answered with a non-2xx status.
    #[error("upstream error: {status} {reason}")]
    UpstreamStatus {
        /// Raw status code as returned by the catalog.
        status: u16,
        /// Canonical reason phrase for `status`.
        reason: String,
    },

    /// The body is not JSON, or not the JSON shape the caller requires.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Short machine-friendly name of the failure kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Unreachable(_) => "unreachable",
            FetchError::Timeout(_) => "timeout",
            FetchError::UpstreamStatus { .. } => "upstream_status",
            FetchError::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// A search request could not produce a match set.
///
/// Zero matches is not an error; see [`SearchOutcome::NotFound`](crate::search::SearchOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Bad caller input, rejected before any network call.
    #[error("invalid query: {0}")]
    Validation(String),

    /// The base collection fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
