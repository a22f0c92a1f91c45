use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use datenight_core::{StoreError, WishlistFilter};
use datenight_models::Priority;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::{non_blank, IdParams};
use crate::error::{ApiError, ApiResult};
use crate::payload::{self, parse_body, query_id};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub user_id: Option<String>,
    pub priority: Option<String>,
    pub is_shared: Option<String>,
}

fn unknown_item() -> ApiError {
    ApiError::not_found("Item not found", "No wishlist item found with the provided ID")
}

fn item_not_found(err: StoreError) -> ApiError {
    if err.is_not_found() {
        unknown_item()
    } else {
        err.into()
    }
}

fn target_id(params: &IdParams, action: &str) -> ApiResult<u64> {
    query_id(
        params.id.as_deref(),
        || ApiError::bad_request("Missing item ID", format!("Please provide a wishlist item ID to {}", action)),
        unknown_item,
    )
}

/// GET /api/wishlist
pub async fn list_items(State(state): State<AppState>, Query(params): Query<ListParams>) -> ApiResult<Json<Value>> {
    let filter = WishlistFilter {
        user_id: non_blank(&params.user_id).map(str::to_string),
        priority: non_blank(&params.priority).map(str::parse::<Priority>).transpose()?,
        // Any value other than "true" selects private entries
        is_shared: non_blank(&params.is_shared).map(|raw| raw == "true"),
    };

    let items = state.wishlist.list(&filter).await;
    Ok(Json(json!({ "total": items.len(), "items": items })))
}

/// POST /api/wishlist
pub async fn add_item(State(state): State<AppState>, body: Bytes) -> ApiResult<(StatusCode, Json<Value>)> {
    let body = parse_body(&body)?;
    if payload::text(&body, "movie_id").is_none() || payload::text(&body, "movie_title").is_none() {
        return Err(ApiError::bad_request(
            "Missing required fields",
            "movie_id and movie_title are required",
        ));
    }

    let new = payload::new_wishlist_item(&body, state.default_user())?;
    let item = state.wishlist.add(new).await?;
    info!(id = item.id, movie_id = %item.movie_id, "Wishlist item added");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Movie added to wishlist successfully", "item": item })),
    ))
}

/// PUT /api/wishlist?id
pub async fn update_item(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let id = target_id(&params, "update")?;
    let patch = payload::wishlist_patch(&parse_body(&body)?)?;
    let item = state.wishlist.update(id, patch).await.map_err(item_not_found)?;

    Ok(Json(json!({ "message": "Wishlist item updated successfully", "item": item })))
}

/// DELETE /api/wishlist?id
pub async fn remove_item(State(state): State<AppState>, Query(params): Query<IdParams>) -> ApiResult<Json<Value>> {
    let id = target_id(&params, "delete")?;
    let item = state.wishlist.remove(id).await.map_err(item_not_found)?;
    info!(id, "Wishlist item removed");

    Ok(Json(json!({ "message": "Movie removed from wishlist successfully", "item": item })))
}
