//! Failure → HTTP status mapping.
//!
//! Every failure is answered with a plain-text body naming the failure kind
//! and, where available, the upstream reason phrase or underlying message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use holonet_core::{FetchError, ResourceType, SearchError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Caller input rejected before any upstream call.
    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    UnknownResource(#[from] holonet_core::types::UnknownResourceType),

    /// The search reached the catalog and nothing matched.
    #[error("no {resource} matched {query:?}")]
    NoMatches { resource: ResourceType, query: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::UnknownResource(_) | GatewayError::NoMatches { .. } => StatusCode::NOT_FOUND,
            GatewayError::Fetch(err) => fetch_status(err),
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn fetch_status(err: &FetchError) -> StatusCode {
    match err {
        FetchError::Unreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
        FetchError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        // Forward the catalog's own status; anything unrepresentable is a bad gateway.
        FetchError::UpstreamStatus { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        FetchError::MalformedResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<SearchError> for GatewayError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Validation(message) => GatewayError::BadRequest(message),
            SearchError::Fetch(err) => GatewayError::Fetch(err),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}
