use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use datenight_core::StoreError;
use datenight_models::ParseEnumError;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::error;

/// Error response in the `{error, message}` shape every endpoint shares.
///
/// 500s render the text under `details` instead of `message`. Extra fields
/// (e.g. the looked-up id or the conflicting item) are merged into the body.
#[derive(Debug, Error)]
#[error("{status} {error}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: String,
    pub extra: Map<String, Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
            extra: Map::new(),
        }
    }

    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, message)
    }

    pub fn not_found(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(StatusCode::REQUEST_TIMEOUT, "Request timeout", message)
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", details)
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", message)
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.error, details = %self.message, "Request failed");
        }

        let mut body = Map::new();
        body.insert("error".to_string(), Value::String(self.error));
        let key = if self.status.is_server_error() { "details" } else { "message" };
        body.insert(key.to_string(), Value::String(self.message));
        body.extend(self.extra);

        (self.status, Json(Value::Object(body))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::not_found("Not found", err.to_string()),
            StoreError::UnknownParent(_) | StoreError::SelfParent(_) => {
                ApiError::bad_request("Invalid parent_date_id", err.to_string())
            }
            StoreError::DuplicateWishlistItem(ref item) => {
                let item = serde_json::to_value(item.as_ref()).unwrap_or(Value::Null);
                ApiError::new(StatusCode::CONFLICT, "Movie already in wishlist", err.to_string()).with("item", item)
            }
            StoreError::InvalidInput(message) => ApiError::bad_request("Invalid request", message),
        }
    }
}

impl From<ParseEnumError> for ApiError {
    fn from(err: ParseEnumError) -> Self {
        ApiError::bad_request(format!("Invalid {} parameter", err.field), err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_client_error_shape() {
        let (status, body) = body_of(ApiError::not_found("Date not found", "gone").with("id", 4)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Date not found");
        assert_eq!(body["message"], "gone");
        assert_eq!(body["id"], 4);
    }

    #[tokio::test]
    async fn test_server_error_uses_details() {
        let (status, body) = body_of(ApiError::internal("boom")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["details"], "boom");
        assert!(body.get("message").is_none());
    }

    #[test]
    fn test_store_error_mapping() {
        assert_eq!(ApiError::from(StoreError::UnknownParent(3)).status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(StoreError::not_found("photo", 3)).status, StatusCode::NOT_FOUND);
    }
}
