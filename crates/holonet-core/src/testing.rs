//! In-memory [`Upstream`] double for unit tests.

use crate::error::FetchError;
use crate::upstream::Upstream;
use bytes::Bytes;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Answers from a fixed script and counts what it was asked.
///
/// Targets without a script answer `404 Not Found`.
#[derive(Default)]
pub struct ScriptedUpstream {
    answers: HashMap<String, Result<Bytes, FetchError>>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, target: &str, body: serde_json::Value) -> Self {
        self.with_body(target, body.to_string())
    }

    pub fn with_body(mut self, target: &str, body: impl Into<Bytes>) -> Self {
        self.answers.insert(target.to_string(), Ok(body.into()));
        self
    }

    pub fn with_error(mut self, target: &str, err: FetchError) -> Self {
        self.answers.insert(target.to_string(), Err(err));
        self
    }

    pub fn with_delay(mut self, target: &str, delay: Duration) -> Self {
        self.delays.insert(target.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl Upstream for ScriptedUpstream {
    fn fetch(&self, target: &str) -> impl Future<Output = Result<Bytes, FetchError>> + Send {
        let answer = self.answers.get(target).cloned().unwrap_or_else(|| {
            Err(FetchError::UpstreamStatus {
                status: 404,
                reason: "Not Found".to_string(),
            })
        });
        let delay = self.delays.get(target).copied();

        async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            answer
        }
    }
}
