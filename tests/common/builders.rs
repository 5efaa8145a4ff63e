//! Builders for catalog JSON fixtures.
//!
//! These produce the shapes the real catalog returns, with references pointing
//! back at a [`FakeCatalog`](super::FakeCatalog).

use super::FakeCatalog;
use serde_json::{json, Value};

/// Fluent builder for a `people` record.
pub struct PersonBuilder<'a> {
    catalog: &'a FakeCatalog,
    name: String,
    homeworld: Option<String>,
    films: Vec<String>,
    vehicles: Vec<String>,
    starships: Vec<String>,
}

impl<'a> PersonBuilder<'a> {
    pub fn new(catalog: &'a FakeCatalog, name: impl Into<String>) -> Self {
        Self {
            catalog,
            name: name.into(),
            homeworld: None,
            films: vec![],
            vehicles: vec![],
            starships: vec![],
        }
    }

    pub fn homeworld(mut self, id: u32) -> Self {
        self.homeworld = Some(self.catalog.url(&format!("planets/{id}")));
        self
    }

    pub fn film(mut self, id: u32) -> Self {
        self.films.push(self.catalog.url(&format!("films/{id}")));
        self
    }

    pub fn vehicle(mut self, id: u32) -> Self {
        self.vehicles.push(self.catalog.url(&format!("vehicles/{id}")));
        self
    }

    pub fn starship(mut self, id: u32) -> Self {
        self.starships.push(self.catalog.url(&format!("starships/{id}")));
        self
    }

    pub fn build(self) -> Value {
        json!({
            "name": self.name,
            "height": "172",
            "homeworld": self.homeworld.unwrap_or_default(),
            "films": self.films,
            "species": [],
            "vehicles": self.vehicles,
            "starships": self.starships,
            "url": self.catalog.url("people/1"),
        })
    }
}

/// Wrap records in the catalog's page envelope.
pub fn page(results: Vec<Value>) -> Value {
    json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results,
    })
}

pub fn planet(name: &str, climate: &str) -> Value {
    json!({ "name": name, "climate": climate, "terrain": "desert", "population": "200000" })
}

pub fn film(title: &str, episode: i64) -> Value {
    json!({ "title": title, "episode_id": episode, "director": "George Lucas" })
}

pub fn craft(name: &str, model: &str) -> Value {
    json!({ "name": name, "model": model, "manufacturer": "Incom Corporation" })
}
