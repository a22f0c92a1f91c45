use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use datenight_core::{SessionFilter, StoreError};
use datenight_models::WatchStatus;
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
    /// Older clients filter by the first partner's id
    pub user1_id: Option<String>,
    pub movie_id: Option<String>,
    pub watch_status: Option<String>,
    pub linked: Option<String>,
}

fn date_not_found() -> ApiError {
    ApiError::not_found("Date not found", "No movie date found with the provided ID")
}

fn not_found_or(err: StoreError) -> ApiError {
    if err.is_not_found() {
        date_not_found()
    } else {
        err.into()
    }
}

fn target_id(params: &IdParams, action: &str) -> ApiResult<u64> {
    query_id(
        params.id.as_deref(),
        || ApiError::bad_request("Missing date ID", format!("Please provide a date ID to {}", action)),
        date_not_found,
    )
}

/// GET /api/movie-dates
pub async fn list_dates(State(state): State<AppState>, Query(params): Query<ListParams>) -> ApiResult<Json<Value>> {
    let filter = SessionFilter {
        user_id: non_blank(&params.user_id)
            .or_else(|| non_blank(&params.user1_id))
            .map(str::to_string),
        movie_id: non_blank(&params.movie_id).map(str::to_string),
        watch_status: non_blank(&params.watch_status)
            .map(str::parse::<WatchStatus>)
            .transpose()?,
    };

    if non_blank(&params.linked) == Some("true") {
        let dates = state.sessions.list_linked(&filter).await;
        return Ok(Json(json!({ "total": dates.len(), "dates": dates })));
    }

    let dates = state.sessions.list(&filter).await;
    Ok(Json(json!({ "total": dates.len(), "dates": dates })))
}

/// POST /api/movie-dates
pub async fn create_date(State(state): State<AppState>, body: Bytes) -> ApiResult<(StatusCode, Json<Value>)> {
    let body = parse_body(&body)?;
    if payload::text(&body, "movie_id").is_none() || payload::text(&body, "movie_title").is_none() {
        return Err(ApiError::bad_request(
            "Missing required fields",
            "movie_id and movie_title are required",
        ));
    }

    let new = payload::new_session(&body, &state.participants)?;
    let date = state.sessions.create(new).await?;
    info!(
        id = date.session.id,
        movie_id = %date.session.movie_id,
        parent = ?date.session.parent_date_id,
        "Movie date created"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Movie date created successfully", "date": date })),
    ))
}

/// PUT /api/movie-dates?id
pub async fn update_date(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let id = target_id(&params, "update")?;
    let body = parse_body(&body)?;
    let patch = payload::session_patch(&body, &state.participants)?;

    let date = state.sessions.update(id, patch).await.map_err(not_found_or)?;
    info!(id, "Movie date updated");

    Ok(Json(json!({ "message": "Movie date updated successfully", "date": date })))
}

/// DELETE /api/movie-dates?id, removing direct continuations too
pub async fn delete_date(State(state): State<AppState>, Query(params): Query<IdParams>) -> ApiResult<Json<Value>> {
    let id = target_id(&params, "delete")?;
    let deleted = state.sessions.delete(id).await.map_err(not_found_or)?;
    info!(id, linked = deleted.linked_dates_deleted, "Movie date deleted");

    Ok(Json(json!({
        "message": "Movie date deleted successfully",
        "date": deleted.session,
        "linked_dates_deleted": deleted.linked_dates_deleted,
    })))
}
