pub mod dates;
pub mod details;
pub mod health;
pub mod incomplete;
pub mod photos;
pub mod popular;
pub mod search;
pub mod wishlist;

use axum::http::StatusCode;
use serde::Deserialize;

use crate::error::ApiError;

/// Query string carrying the target id of PUT/DELETE requests
#[derive(Debug, Default, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

/// Bare OPTIONS requests (CORS preflights are answered by the CORS layer)
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn only_get() -> ApiError {
    ApiError::method_not_allowed("Only GET method is supported")
}

pub async fn only_crud() -> ApiError {
    ApiError::method_not_allowed("Only GET, POST, PUT, and DELETE methods are supported")
}

pub async fn only_get_post_delete() -> ApiError {
    ApiError::method_not_allowed("Only GET, POST, and DELETE methods are supported")
}

/// Non-blank `q` parameter, trimmed
pub(crate) fn search_query(q: Option<&str>) -> Result<&str, ApiError> {
    q.map(str::trim).filter(|q| !q.is_empty()).ok_or_else(|| {
        ApiError::bad_request(
            "Missing or invalid query parameter: q",
            "Please provide a valid search query",
        )
    })
}

/// Trimmed optional query value; blank counts as absent
pub(crate) fn non_blank(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
