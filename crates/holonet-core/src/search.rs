//! Search Aggregator — name search over one catalog collection.
//!
//! Fetches the collection, keeps the records whose name field contains the
//! query (case-insensitive), and enriches every match. Unlike relation
//! sub-fetches, a failed collection fetch fails the whole search.

use crate::enrich::{json_kind, Enricher};
use crate::error::{FetchError, SearchError};
use crate::types::{Record, RelationPolicy, ResourceType, DEFAULT_POLICIES};
use crate::upstream::Upstream;
use futures::future::join_all;
use serde_json::Value;

/// Result of a search that reached the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Enriched matches, in collection order.
    Matches(Vec<Record>),
    /// The collection was fetched but nothing matched.
    NotFound,
}

pub struct Aggregator<'a, U> {
    upstream: &'a U,
    policies: &'a [RelationPolicy],
    fanout: usize,
}

impl<'a, U: Upstream> Aggregator<'a, U> {
    pub fn new(upstream: &'a U, fanout: usize) -> Self {
        Self {
            upstream,
            policies: DEFAULT_POLICIES,
            fanout,
        }
    }

    /// Replace the relation policies applied to matches.
    pub fn with_policies(mut self, policies: &'a [RelationPolicy]) -> Self {
        self.policies = policies;
        self
    }

    pub async fn search(&self, resource: ResourceType, query: &str) -> Result<SearchOutcome, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::Validation("name query must not be blank".to_string()));
        }

        let payload = self.upstream.fetch_json(resource.path()).await?;
        let records = decode_collection(payload)?;
        let total = records.len();
        let matches = filter_by_name(records, resource.name_field(), query);

        tracing::debug!(%resource, query, total, matched = matches.len(), "filtered collection");
        if matches.is_empty() {
            return Ok(SearchOutcome::NotFound);
        }

        let enricher = Enricher::new(self.upstream, self.fanout);
        let enriched = join_all(matches.into_iter().map(|record| enricher.enrich(record, self.policies))).await;
        Ok(SearchOutcome::Matches(enriched))
    }
}

/// Keep the records whose `name_field` contains `query`, ignoring case.
///
/// Records with a missing or empty name never match. Order is preserved.
pub fn filter_by_name(records: Vec<Record>, name_field: &str, query: &str) -> Vec<Record> {
    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|record| match record.text(name_field) {
            Some(name) if !name.is_empty() => name.to_lowercase().contains(&needle),
            _ => false,
        })
        .collect()
}

/// Decode a collection payload into records.
///
/// Accepts a bare array of objects or the catalog's page envelope with a
/// `results` array. Only the page that was returned is used.
pub fn decode_collection(payload: Value) -> Result<Vec<Record>, FetchError> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut page) => match page.remove("results") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(FetchError::MalformedResponse(
                    "collection object has no results array".to_string(),
                ))
            }
        },
        other => {
            return Err(FetchError::MalformedResponse(format!(
                "expected a collection, got {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            Record::try_from(item).map_err(|other| {
                FetchError::MalformedResponse(format!(
                    "collection item {index} is {}, not an object",
                    json_kind(&other)
                ))
            })
        })
        .collect()
}
