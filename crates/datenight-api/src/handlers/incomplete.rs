use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use super::non_blank;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IncompleteParams {
    pub user_id: Option<String>,
}

/// GET /api/incomplete-dates?user_id
pub async fn incomplete_dates(State(state): State<AppState>, Query(params): Query<IncompleteParams>) -> Json<Value> {
    let dates = state.sessions.incomplete(non_blank(&params.user_id), Utc::now()).await;

    let empty = dates.is_empty();

    let mut body = json!({
        "total": dates.len(),
        "incomplete_dates": dates,
    });
    if empty {
        body["message"] = Value::String("No incomplete dates found".to_string());
    }
    Json(body)
}
