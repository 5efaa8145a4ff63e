use bytes::Bytes;
use holonet_core::config::UpstreamConfig;
use holonet_core::{FetchError, Upstream};
use reqwest::Url;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// The client could not be constructed from its configuration.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid upstream base url {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("failed to build http client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Stateless catalog client. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    http: reqwest::Client,
    base: Url,
    timeout: Duration,
    connect_timeout: Duration,
}

impl HttpUpstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ClientError> {
        let base = parse_base(&config.base_url)?;
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            http,
            base,
            timeout: config.timeout(),
            connect_timeout: config.connect_timeout(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Turn a fetch target into a URL.
    ///
    /// Absolute URLs are used as-is and host-relative references (`/api/...`)
    /// are resolved against the base host. Anything else is a catalog path and
    /// gets a trailing slash, which the catalog requires.
    pub fn resolve(&self, target: &str) -> Result<Url, FetchError> {
        if let Ok(url) = Url::parse(target) {
            if matches!(url.scheme(), "http" | "https") {
                return Ok(url);
            }
        }

        let path = target.trim_matches('/');
        if path.is_empty() {
            return Err(FetchError::Unreachable(format!("empty upstream target {target:?}")));
        }
        let joined = if target.starts_with('/') {
            self.base.join(target)
        } else {
            self.base.join(&format!("{path}/"))
        };
        joined.map_err(|err| FetchError::Unreachable(format!("cannot resolve {target:?}: {err}")))
    }

    async fn exchange(&self, url: Url) -> Result<Bytes, FetchError> {
        let response = self.http.get(url).send().await.map_err(|err| self.classify(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UpstreamStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }

        response.bytes().await.map_err(|err| self.classify(err))
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() && err.is_connect() {
            FetchError::Timeout(self.connect_timeout)
        } else if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Unreachable(err.to_string())
        }
    }
}

impl Upstream for HttpUpstream {
    fn fetch(&self, target: &str) -> impl Future<Output = Result<Bytes, FetchError>> + Send {
        let url = self.resolve(target);
        async move {
            let url = url?;
            tracing::debug!(%url, "fetching from upstream");

            let result = match tokio::time::timeout(self.timeout, self.exchange(url.clone())).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout(self.timeout)),
            };
            if let Err(err) = &result {
                tracing::warn!(%url, kind = err.kind(), error = %err, "upstream call failed");
            }
            result
        }
    }
}

fn parse_base(raw: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::BaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut base = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", base.scheme())));
    }
    // Without a trailing slash `join` would replace the last path segment.
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}
