//! Fake catalog server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Every path is served from a table filled in by the test:
//! a JSON body, a bare status, or either of those after a delay. Unknown
//! paths answer `404 Not Found` like the real catalog.
//!
//! # Example
//!
//! ```rust,no_run
//! let catalog = FakeCatalog::start().await.unwrap();
//! catalog.json("planets/1", serde_json::json!({ "name": "Tatooine" })).await;
//! // Point HttpUpstream at catalog.base_url()
//! ```

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Clone)]
struct Route {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
}

/// State shared between the router and test code.
#[derive(Default)]
struct CatalogState {
    /// Keyed by catalog path without slashes, e.g. `people` or `films/2`.
    routes: Mutex<HashMap<String, Route>>,
    hits: AtomicUsize,
}

/// Handle to the running fake catalog.
pub struct FakeCatalog {
    addr: SocketAddr,
    state: Arc<CatalogState>,
}

impl FakeCatalog {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(CatalogState::default());

        let app = Router::new().fallback(serve_path).with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Catalog base URL (e.g. `http://127.0.0.1:PORT/api/`).
    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }

    /// Absolute URL of a catalog path, as the catalog embeds in references.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}/", self.base_url(), path.trim_matches('/'))
    }

    /// Serve `body` at `path` with 200.
    pub async fn json(&self, path: &str, body: serde_json::Value) {
        self.route(path, StatusCode::OK, body.to_string(), None).await;
    }

    /// Serve a non-JSON body at `path` with 200.
    pub async fn text(&self, path: &str, body: &str) {
        self.route(path, StatusCode::OK, body.to_string(), None).await;
    }

    /// Answer `path` with a bare status.
    pub async fn status(&self, path: &str, status: StatusCode) {
        self.route(path, status, String::new(), None).await;
    }

    /// Serve `body` at `path` only after `delay`.
    pub async fn slow_json(&self, path: &str, body: serde_json::Value, delay: Duration) {
        self.route(path, StatusCode::OK, body.to_string(), Some(delay)).await;
    }

    /// Requests served so far, matched or not.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    async fn route(&self, path: &str, status: StatusCode, body: String, delay: Option<Duration>) {
        let mut routes = self.state.routes.lock().await;
        routes.insert(path.trim_matches('/').to_string(), Route { status, body, delay });
    }
}

// ---------------------------------------------------------------------------
// Route handler
// ---------------------------------------------------------------------------

async fn serve_path(State(state): State<Arc<CatalogState>>, uri: Uri) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let key = uri.path().trim_start_matches("/api").trim_matches('/').to_string();
    let route = state.routes.lock().await.get(&key).cloned();

    let Some(route) = route else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }
    if route.body.is_empty() {
        return route.status.into_response();
    }
    (
        route.status,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        route.body,
    )
        .into_response()
}
