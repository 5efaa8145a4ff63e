//! The seam between holonet and the upstream catalog.
//!
//! Enrichment and search are written against [`Upstream`] so they can run
//! over the real HTTP client or an in-memory double in tests.

use crate::error::FetchError;
use bytes::Bytes;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// Issues one GET against the catalog per call.
///
/// `target` is either a bare resource path (`"people"`, `"planets/1"`)
/// resolved against the catalog base URL, or an absolute URL as found in
/// relation fields. Implementations make exactly one attempt and must be safe
/// to call from many in-flight futures at once.
pub trait Upstream: Send + Sync {
    fn fetch(&self, target: &str) -> impl Future<Output = Result<Bytes, FetchError>> + Send;

    /// Fetch and decode the body as JSON.
    fn fetch_json(&self, target: &str) -> impl Future<Output = Result<Value, FetchError>> + Send {
        async move {
            let body = self.fetch(target).await?;
            serde_json::from_slice(&body)
                .map_err(|err| FetchError::MalformedResponse(format!("{target}: {err}")))
        }
    }
}

impl<U: Upstream> Upstream for Arc<U> {
    fn fetch(&self, target: &str) -> impl Future<Output = Result<Bytes, FetchError>> + Send {
        (**self).fetch(target)
    }
}
