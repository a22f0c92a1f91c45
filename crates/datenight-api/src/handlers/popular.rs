use axum::extract::{Query, State};
use axum::Json;
use datenight_core::parse_popular_limit;
use datenight_models::ContentTypeFilter;
use serde::Deserialize;
use serde_json::{json, Value};

use super::non_blank;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<String>,
}

/// GET /api/popular-content?type&limit
pub async fn popular_content(State(state): State<AppState>, Query(params): Query<PopularParams>) -> ApiResult<Json<Value>> {
    let filter = match non_blank(&params.kind) {
        Some(raw) => raw.parse::<ContentTypeFilter>()?,
        None => ContentTypeFilter::All,
    };
    let limit = parse_popular_limit(params.limit.as_deref());

    let popular = state.catalog.popular(filter, limit).await;
    Ok(Json(json!({
        "total": popular.items.len(),
        "popular": popular.items,
        "type": filter.as_str(),
        "fallback": popular.fallback,
    })))
}
