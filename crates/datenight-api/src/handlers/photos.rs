use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use datenight_models::PhotoSummary;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::IdParams;
use crate::error::{ApiError, ApiResult};
use crate::payload::{self, id_field, parse_body, query_id};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub date_id: Option<String>,
}

fn unknown_photo() -> ApiError {
    ApiError::not_found("Photo not found", "No photo found with the provided ID")
}

/// GET /api/photos?date_id
pub async fn list_photos(State(state): State<AppState>, Query(params): Query<ListParams>) -> ApiResult<Json<Value>> {
    let date_id = match params.date_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
            ApiError::bad_request("Invalid date_id", "date_id must be a positive integer")
        })?),
        None => None,
    };

    let photos = state.photos.list(date_id).await;
    Ok(Json(json!({ "total": photos.len(), "photos": photos })))
}

/// POST /api/photos
pub async fn upload_photos(State(state): State<AppState>, body: Bytes) -> ApiResult<(StatusCode, Json<Value>)> {
    let body = parse_body(&body)?;
    let date_id = id_field(&body, "date_id")
        .map_err(|_| ApiError::bad_request("Invalid date_id", "date_id must be a positive integer"))?
        .ok_or_else(|| {
            ApiError::bad_request(
                "Missing date_id",
                "date_id is required to associate photos with a movie date",
            )
        })?;

    let entries = body
        .get("photos")
        .and_then(Value::as_array)
        .filter(|entries| !entries.is_empty())
        .ok_or_else(|| ApiError::bad_request("No photos provided", "Please provide at least one photo to upload"))?;

    let description = payload::text(&body, "description").unwrap_or_default();
    let stored = state
        .photos
        .add(date_id, payload::photo_uploads(entries), &description)
        .await;
    info!(date_id, received = entries.len(), stored = stored.len(), "Photos uploaded");

    let summaries: Vec<PhotoSummary> = stored.iter().map(PhotoSummary::from).collect();
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!("{} photo(s) uploaded successfully", summaries.len()),
            "photos": summaries,
        })),
    ))
}

/// DELETE /api/photos?id
pub async fn delete_photo(State(state): State<AppState>, Query(params): Query<IdParams>) -> ApiResult<Json<Value>> {
    let id = query_id(
        params.id.as_deref(),
        || ApiError::bad_request("Missing photo ID", "Please provide a photo ID to delete"),
        unknown_photo,
    )?;

    let photo = state.photos.remove(id).await.map_err(|err| {
        if err.is_not_found() {
            unknown_photo()
        } else {
            err.into()
        }
    })?;

    Ok(Json(json!({
        "message": "Photo deleted successfully",
        "photo": { "id": photo.id, "filename": photo.filename },
    })))
}
