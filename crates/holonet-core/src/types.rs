//! Core types for holonet-core.
//!
//! This module defines the data structures shared across all layers: the
//! catalog [`ResourceType`], the schema-less [`Record`] decoded from one
//! upstream JSON object, and the fixed [`RelationPolicy`] table that drives
//! enrichment.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// ResourceType
// ---------------------------------------------------------------------------

/// A resource collection exposed by the upstream catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    People,
    Planets,
    Films,
    Species,
    Vehicles,
    Starships,
}

impl ResourceType {
    pub const ALL: [ResourceType; 6] = [
        ResourceType::People,
        ResourceType::Planets,
        ResourceType::Films,
        ResourceType::Species,
        ResourceType::Vehicles,
        ResourceType::Starships,
    ];

    /// Collection path relative to the catalog base URL.
    pub fn path(self) -> &'static str {
        match self {
            ResourceType::People => "people",
            ResourceType::Planets => "planets",
            ResourceType::Films => "films",
            ResourceType::Species => "species",
            ResourceType::Vehicles => "vehicles",
            ResourceType::Starships => "starships",
        }
    }

    /// Field searched by name queries. Films carry a title instead of a name.
    pub fn name_field(self) -> &'static str {
        match self {
            ResourceType::Films => "title",
            _ => "name",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

impl std::str::FromStr for ResourceType {
    type Err = UnknownResourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|kind| kind.path() == s)
            .ok_or_else(|| UnknownResourceType(s.to_string()))
    }
}

/// Returned when a path segment does not name a catalog collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource type: {0:?}")]
pub struct UnknownResourceType(pub String);

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One upstream JSON object, field order preserved.
///
/// Relation fields are rewritten in place by the enricher; every other field
/// passes through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Replace (or append) a field. Existing fields keep their position.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    /// The string value of `field`, if present and a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl TryFrom<Value> for Record {
    type Error = Value;

    /// Succeeds only for JSON objects; hands the value back otherwise.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Relation policies
// ---------------------------------------------------------------------------

/// Whether a relation field holds one reference or a sequence of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    Many,
}

/// How one relation field is resolved.
#[derive(Debug, Clone, Copy)]
pub struct RelationPolicy {
    /// Record field holding the reference(s).
    pub field: &'static str,
    pub cardinality: Cardinality,
    /// `(source field on the resolved resource, output field)` pairs.
    pub projection: &'static [(&'static str, &'static str)],
    /// Builds the value substituted for a reference that failed to resolve.
    pub placeholder: fn() -> Value,
}

impl RelationPolicy {
    /// Extract the projected fields from a resolved resource. Source fields
    /// the resource lacks come out as `null`.
    pub fn project(&self, resolved: &Map<String, Value>) -> Value {
        let projected = self
            .projection
            .iter()
            .map(|(source, target)| {
                let value = resolved.get(*source).cloned().unwrap_or(Value::Null);
                ((*target).to_string(), value)
            })
            .collect::<Map<_, _>>();
        Value::Object(projected)
    }

    pub fn placeholder(&self) -> Value {
        (self.placeholder)()
    }
}

/// Marker substituted for a homeworld that failed to resolve.
pub const HOMEWORLD_FAILURE: &str = "Failed to load homeworld";

fn homeworld_placeholder() -> Value {
    Value::String(HOMEWORLD_FAILURE.to_string())
}

fn film_placeholder() -> Value {
    serde_json::json!({ "title": "Failed to load", "episode": -1 })
}

fn craft_placeholder() -> Value {
    serde_json::json!({ "name": "Error", "model": "N/A" })
}

/// The relation fields enriched on every search match.
///
/// `species` is deliberately absent: it is served as a plain collection but
/// never resolved on a record.
pub const DEFAULT_POLICIES: &[RelationPolicy] = &[
    RelationPolicy {
        field: "homeworld",
        cardinality: Cardinality::Single,
        projection: &[("name", "name"), ("climate", "climate")],
        placeholder: homeworld_placeholder,
    },
    RelationPolicy {
        field: "films",
        cardinality: Cardinality::Many,
        projection: &[("title", "title"), ("episode_id", "episode")],
        placeholder: film_placeholder,
    },
    RelationPolicy {
        field: "vehicles",
        cardinality: Cardinality::Many,
        projection: &[("name", "name"), ("model", "model")],
        placeholder: craft_placeholder,
    },
    RelationPolicy {
        field: "starships",
        cardinality: Cardinality::Many,
        projection: &[("name", "name"), ("model", "model")],
        placeholder: craft_placeholder,
    },
];
