use crate::error::GatewayError;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use holonet_core::search::{Aggregator, SearchOutcome};
use holonet_core::{FetchError, ResourceType, Upstream};
use serde::de::IgnoredAny;
use serde::Deserialize;

const JSON: [(header::HeaderName, &str); 1] = [(header::CONTENT_TYPE, "application/json")];

#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    name: Option<String>,
}

pub(crate) async fn health() -> &'static str {
    "ok"
}

pub(crate) async fn collection<U: Upstream + 'static>(
    State(state): State<AppState<U>>,
    Path(resource): Path<String>,
) -> Result<Response, GatewayError> {
    let resource: ResourceType = resource.parse()?;
    passthrough(state.upstream.as_ref(), resource.path()).await
}

pub(crate) async fn item<U: Upstream + 'static>(
    State(state): State<AppState<U>>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Response, GatewayError> {
    let resource: ResourceType = resource.parse()?;
    let id: u32 = id
        .parse()
        .map_err(|_| GatewayError::BadRequest(format!("resource id must be a number, got {id:?}")))?;
    passthrough(state.upstream.as_ref(), &format!("{resource}/{id}")).await
}

pub(crate) async fn search_people<U: Upstream + 'static>(
    State(state): State<AppState<U>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, GatewayError> {
    let query = params
        .name
        .ok_or_else(|| GatewayError::BadRequest("missing name parameter".to_string()))?;

    let resource = ResourceType::People;
    let outcome = Aggregator::new(state.upstream.as_ref(), state.fanout)
        .search(resource, &query)
        .await?;

    match outcome {
        SearchOutcome::Matches(records) => {
            let body = serde_json::to_string_pretty(&records)
                .map_err(|err| GatewayError::Internal(format!("serializing matches: {err}")))?;
            Ok((JSON, body).into_response())
        }
        SearchOutcome::NotFound => Err(GatewayError::NoMatches {
            resource,
            query: query.trim().to_string(),
        }),
    }
}

/// Forward one upstream body untouched, provided it is JSON.
async fn passthrough<U: Upstream>(upstream: &U, target: &str) -> Result<Response, GatewayError> {
    let body = upstream.fetch(target).await?;
    serde_json::from_slice::<IgnoredAny>(&body)
        .map_err(|err| FetchError::MalformedResponse(format!("{target}: {err}")))?;
    Ok((JSON, body).into_response())
}
