//! holonet-core — enrichment and search over the upstream catalog.
//!
//! This crate holds everything with non-trivial control flow, plus the types
//! shared by the client and gateway crates.
//!
//! # Architecture
//!
//! ```text
//! Gateway ──► Aggregator ──► Upstream (collection)
//!                 │
//!                 └──► filter ──► Enricher ──► Upstream (per reference)
//! ```
//!
//! Everything is request-scoped: an [`Aggregator`](search::Aggregator) and its
//! [`Enricher`](enrich::Enricher) borrow the shared [`Upstream`] for the
//! duration of one call and hold no state across requests.

pub mod config;
pub mod enrich;
pub mod error;
pub mod search;
pub mod types;
pub mod upstream;

#[cfg(test)]
mod testing;

pub use error::{FetchError, SearchError};
pub use search::SearchOutcome;
pub use types::{Cardinality, Record, RelationPolicy, ResourceType, DEFAULT_POLICIES};
pub use upstream::Upstream;
