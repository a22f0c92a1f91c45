use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use datenight_sources::SourceError;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use super::non_blank;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DetailsParams {
    pub id: Option<String>,
}

/// GET /api/movie-details?id=<imdb id>
pub async fn movie_details(State(state): State<AppState>, Query(params): Query<DetailsParams>) -> ApiResult<Json<Value>> {
    let id = non_blank(&params.id).ok_or_else(|| {
        ApiError::bad_request("Missing or invalid IMDb ID parameter", "Please provide a valid IMDb ID")
    })?;

    match state.catalog.movie_details(id).await {
        Ok(movie) => Ok(Json(json!({ "movie": movie, "source": "omdb" }))),
        Err(err) => {
            warn!(imdb_id = id, error = %err, "Movie details lookup failed");
            Err(match err {
                SourceError::NotFound(message) => ApiError::not_found("Movie not found", message),
                SourceError::Timeout { .. } => {
                    ApiError::timeout("The movie details request timed out. Please try again.")
                }
                other => ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch movie details",
                    other.to_string(),
                ),
            }
            .with("imdbID", id))
        }
    }
}

/// GET /api/tv-details?id=<tmdb id, optionally tv_ prefixed>
pub async fn tv_details(State(state): State<AppState>, Query(params): Query<DetailsParams>) -> ApiResult<Json<Value>> {
    let id = non_blank(&params.id).ok_or_else(|| {
        ApiError::bad_request("Missing or invalid TMDb ID parameter", "Please provide a valid TMDb ID")
    })?;

    match state.catalog.tv_details(id).await {
        Ok(series) => Ok(Json(json!({ "series": series, "source": "tmdb" }))),
        Err(err) => {
            warn!(tmdb_id = id, error = %err, "TV details lookup failed");
            Err(match err {
                SourceError::NotFound(_) => {
                    ApiError::not_found("TV series not found", "TV series not found in TMDb database")
                }
                SourceError::Timeout { .. } => {
                    ApiError::timeout("The TV series details request timed out. Please try again.")
                }
                other => ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch TV series details",
                    other.to_string(),
                ),
            }
            .with("tmdbID", id))
        }
    }
}
