//! holonet-gateway — the HTTP surface.
//!
//! | Route | Behaviour |
//! |---|---|
//! | `GET /data/{resource}` | pass-through of one catalog collection |
//! | `GET /data/{resource}/{id}` | pass-through of one catalog resource |
//! | `GET /data/people/search?name=<q>` | enriched name search |
//! | `GET /health` | liveness |
//!
//! Handlers are generic over [`Upstream`] so the router can be driven
//! in-process against a stub catalog.

mod error;
mod routes;

pub use error::GatewayError;

use axum::{routing::get, Router};
use holonet_core::Upstream;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared by every request. Holds no per-request state.
pub struct AppState<U> {
    upstream: Arc<U>,
    fanout: usize,
}

impl<U> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            upstream: Arc::clone(&self.upstream),
            fanout: self.fanout,
        }
    }
}

impl<U: Upstream> AppState<U> {
    pub fn new(upstream: U, fanout: usize) -> Self {
        Self {
            upstream: Arc::new(upstream),
            fanout: fanout.max(1),
        }
    }
}

/// Build the gateway router.
pub fn router<U: Upstream + 'static>(state: AppState<U>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/data/people/search", get(routes::search_people::<U>))
        .route("/data/{resource}", get(routes::collection::<U>))
        .route("/data/{resource}/{id}", get(routes::item::<U>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
