//! Record Enricher — replaces relation references with resolved summaries.
//!
//! Every configured relation field present on a record is resolved through
//! the [`Upstream`]. A failed resolution never fails the record: the field (or
//! the single item of a sequence) is replaced with the policy placeholder and
//! the rest of the record carries on.
//!
//! All sub-fetches are dispatched concurrently and joined by position, so
//! output order always matches reference order. A [`Semaphore`] bounds how many
//! are in flight at once; one [`Enricher`] is shared by every record of a
//! search so the bound holds across the whole request.

use crate::error::FetchError;
use crate::types::{Cardinality, Record, RelationPolicy};
use crate::upstream::Upstream;
use futures::future::join_all;
use serde_json::Value;
use tokio::sync::Semaphore;

pub struct Enricher<'a, U> {
    upstream: &'a U,
    permits: Semaphore,
}

impl<'a, U: Upstream> Enricher<'a, U> {
    /// `fanout` caps simultaneous upstream calls; zero is treated as one.
    pub fn new(upstream: &'a U, fanout: usize) -> Self {
        Self {
            upstream,
            permits: Semaphore::new(fanout.max(1)),
        }
    }

    /// Resolve every relation field of `record` named in `policies`.
    ///
    /// Fields without a policy, and policy fields absent from the record, are
    /// left untouched. This never fails.
    pub async fn enrich(&self, mut record: Record, policies: &[RelationPolicy]) -> Record {
        let pending = policies
            .iter()
            .filter_map(|policy| record.get(policy.field).map(|value| (policy, value.clone())))
            .map(|(policy, value)| async move { (policy.field, self.resolve_field(policy, value).await) });

        let resolved = join_all(pending).await;
        for (field, value) in resolved {
            record.insert(field, value);
        }
        record
    }

    async fn resolve_field(&self, policy: &RelationPolicy, value: Value) -> Value {
        match (policy.cardinality, value) {
            (Cardinality::Single, value) => self.resolve_item(policy, value).await,
            (Cardinality::Many, Value::Array(items)) => {
                let items = items.into_iter().map(|item| self.resolve_item(policy, item));
                Value::Array(join_all(items).await)
            }
            // Not a sequence: the policy does not apply.
            (Cardinality::Many, other) => other,
        }
    }

    /// Resolve one reference, or hand back anything that is not one.
    async fn resolve_item(&self, policy: &RelationPolicy, item: Value) -> Value {
        let reference = match item {
            Value::String(reference) if !reference.trim().is_empty() => reference,
            other => return other,
        };

        match self.resolve(policy, &reference).await {
            Ok(projected) => projected,
            Err(err) => {
                tracing::warn!(
                    field = policy.field,
                    reference = %reference,
                    kind = err.kind(),
                    error = %err,
                    "relation resolution failed, substituting placeholder"
                );
                policy.placeholder()
            }
        }
    }

    async fn resolve(&self, policy: &RelationPolicy, reference: &str) -> Result<Value, FetchError> {
        let resolved = {
            // The semaphore is never closed; a failed acquire just runs unbounded.
            let _permit = self.permits.acquire().await.ok();
            self.upstream.fetch_json(reference).await?
        };

        match resolved {
            Value::Object(fields) => Ok(policy.project(&fields)),
            other => Err(FetchError::MalformedResponse(format!(
                "{reference}: expected an object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
