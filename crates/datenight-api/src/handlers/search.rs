use axum::extract::{Query, State};
use axum::Json;
use datenight_models::ContentTypeFilter;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{non_blank, search_query};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /api/content-search?q&type
pub async fn content_search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> ApiResult<Json<Value>> {
    let query = search_query(params.q.as_deref())?;
    let filter = match non_blank(&params.kind) {
        Some(raw) => raw.parse::<ContentTypeFilter>()?,
        None => ContentTypeFilter::All,
    };

    let found = state.catalog.search(query, filter).await;
    debug!(query, total = found.total, fallback = found.fallback, "Content search complete");

    Ok(Json(json!({
        "results": found.results,
        "total": found.total,
        "query": query,
        "type": filter.as_str(),
        "fallback": found.fallback,
    })))
}

/// GET /api/movies-search?q
pub async fn movies_search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> ApiResult<Json<Value>> {
    let query = search_query(params.q.as_deref())?;
    let found = state.catalog.search_movies(query).await;

    let mut body = json!({
        "results": found.results,
        "total": found.total,
        "query": query,
    });
    if found.fallback {
        body["fallback"] = Value::Bool(true);
    }
    if let Some(message) = found.message {
        body["message"] = Value::String(message);
    }
    Ok(Json(body))
}
