//! Lenient JSON body parsing.
//!
//! Clients send numbers as strings, omit fields, and still use the old
//! two-user `user1_*` / `user2_*` fields; this module turns those bodies into
//! the typed inputs the repositories take.

use axum::body::Bytes;
use datenight_core::{
    apply_participant_updates, parse_date_watched, NewWatchSession, NewWishlistItem, ParticipantUpdate, PhotoUpload, WatchSessionPatch,
    WishlistPatch,
};
use datenight_models::{ContentType, Participant, Priority, WatchStatus};
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};

pub type Body = Map<String, Value>;

/// Parse a request body as a JSON object; an empty body is an empty object
pub fn parse_body(bytes: &Bytes) -> ApiResult<Body> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::bad_request("Invalid request body", "Request body must be a JSON object")),
        Err(e) => Err(ApiError::bad_request("Invalid request body", e.to_string())),
    }
}

/// String or number as text; null, empty and other types are absent
pub fn text(body: &Body, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Like `text` but keeps empty strings, for fields that may be cleared
fn raw_text(body: &Body, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Number or numeric string
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Positive integer id from a number or numeric string.
/// `Ok(None)` when absent, null, empty or zero; `Err` when present but not an id.
pub fn id_field(body: &Body, key: &str) -> Result<Option<u64>, ()> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => match number(value) {
            Some(n) if n == 0.0 => Ok(None),
            Some(n) if n > 0.0 && n.fract() == 0.0 => Ok(Some(n as u64)),
            _ => Err(()),
        },
    }
}

/// Parse a positive integer id from a query parameter. Ids that cannot name a
/// row (`abc`, `0`) get the caller's `unknown` error.
pub fn query_id(raw: Option<&str>, missing: impl FnOnce() -> ApiError, unknown: impl FnOnce() -> ApiError) -> ApiResult<u64> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(missing)?;
    raw.parse::<u64>().ok().filter(|id| *id > 0).ok_or_else(unknown)
}

/// `true`, `"true"` and non-zero numbers are true
pub fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().map_or(false, |v| v != 0.0),
        _ => false,
    }
}

/// Progress as sent: absent is `None`, anything non-numeric is NaN (stored as 100)
fn progress(body: &Body) -> Option<f64> {
    body.get("watch_progress").map(|v| number(v).unwrap_or(f64::NAN))
}

fn parse_enum<T: std::str::FromStr<Err = datenight_models::ParseEnumError>>(body: &Body, key: &str) -> ApiResult<Option<T>> {
    match text(body, key) {
        Some(raw) => Ok(Some(raw.parse::<T>()?)),
        None => Ok(None),
    }
}

fn parent_id(body: &Body) -> ApiResult<Option<u64>> {
    id_field(body, "parent_date_id")
        .map_err(|_| ApiError::bad_request("Invalid parent_date_id", "Parent date not found"))
}

fn date_watched(body: &Body) -> ApiResult<Option<chrono::DateTime<chrono::Utc>>> {
    match text(body, "date_watched") {
        Some(raw) => Ok(Some(parse_date_watched(&raw)?)),
        None => Ok(None),
    }
}

fn participant_update(entry: &Value) -> Option<ParticipantUpdate> {
    let obj = entry.as_object()?;
    let user_id = text(obj, "user_id")?;
    Some(ParticipantUpdate {
        user_id,
        rating: obj.get("rating").map(|v| number(v)),
        review: raw_text(obj, "review"),
    })
}

/// Rating/review changes from the `participants` array and the legacy
/// `user<n>_rating` / `user<n>_review` fields
fn participant_updates(body: &Body, defaults: &[String]) -> Vec<ParticipantUpdate> {
    let mut updates: Vec<ParticipantUpdate> = body
        .get("participants")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(participant_update).collect())
        .unwrap_or_default();

    for (index, user_id) in defaults.iter().enumerate() {
        let slot = index + 1;
        let rating = body.get(&format!("user{}_rating", slot)).map(number);
        let review = raw_text(body, &format!("user{}_review", slot));
        if rating.is_some() || review.is_some() {
            updates.push(ParticipantUpdate {
                user_id: user_id.clone(),
                rating,
                review,
            });
        }
    }

    updates
}

/// Body of POST movie-dates. `movie_id` and `movie_title` are checked by the caller.
pub fn new_session(body: &Body, defaults: &[String]) -> ApiResult<NewWatchSession> {
    let mut participants: Vec<Participant> = if body.get("participants").map_or(false, Value::is_array) {
        Vec::new()
    } else {
        defaults.iter().map(Participant::new).collect()
    };
    apply_participant_updates(&mut participants, participant_updates(body, defaults));

    Ok(NewWatchSession {
        movie_id: text(body, "movie_id").unwrap_or_default(),
        movie_title: text(body, "movie_title").unwrap_or_default(),
        movie_year: text(body, "movie_year"),
        movie_poster: text(body, "movie_poster"),
        content_type: parse_enum::<ContentType>(body, "content_type")?.unwrap_or_default(),
        date_watched: date_watched(body)?,
        location: raw_text(body, "location"),
        participants,
        photos: body
            .get("photos")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        watch_status: parse_enum::<WatchStatus>(body, "watch_status")?.unwrap_or_default(),
        watch_progress: progress(body),
        parent_date_id: parent_id(body)?,
    })
}

/// Body of PUT movie-dates; `id`, `created_at` and `updated_at` are ignored
pub fn session_patch(body: &Body, defaults: &[String]) -> ApiResult<WatchSessionPatch> {
    let parent_date_id = match body.get("parent_date_id") {
        None => None,
        Some(Value::Null) => Some(None),
        Some(_) => Some(parent_id(body)?),
    };

    Ok(WatchSessionPatch {
        movie_id: text(body, "movie_id"),
        movie_title: text(body, "movie_title"),
        movie_year: text(body, "movie_year"),
        movie_poster: text(body, "movie_poster"),
        content_type: parse_enum(body, "content_type")?,
        date_watched: date_watched(body)?,
        location: raw_text(body, "location"),
        participants: participant_updates(body, defaults),
        photos: body.get("photos").and_then(Value::as_array).cloned(),
        watch_status: parse_enum(body, "watch_status")?,
        watch_progress: progress(body),
        parent_date_id,
    })
}

/// Body of POST wishlist
pub fn new_wishlist_item(body: &Body, default_user: &str) -> ApiResult<NewWishlistItem> {
    Ok(NewWishlistItem {
        movie_id: text(body, "movie_id").unwrap_or_default(),
        movie_title: text(body, "movie_title").unwrap_or_default(),
        movie_year: text(body, "movie_year"),
        movie_poster: text(body, "movie_poster"),
        movie_genre: text(body, "movie_genre"),
        priority: parse_enum::<Priority>(body, "priority")?.unwrap_or_default(),
        is_shared: body.get("is_shared").map_or(false, flag),
        user_id: text(body, "user_id").unwrap_or_else(|| default_user.to_string()),
    })
}

/// Body of PUT wishlist
pub fn wishlist_patch(body: &Body) -> ApiResult<WishlistPatch> {
    Ok(WishlistPatch {
        movie_id: text(body, "movie_id"),
        movie_title: text(body, "movie_title"),
        movie_year: text(body, "movie_year"),
        movie_poster: text(body, "movie_poster"),
        movie_genre: text(body, "movie_genre"),
        priority: parse_enum(body, "priority")?,
        is_shared: body.get("is_shared").map(flag),
        user_id: text(body, "user_id"),
    })
}

/// Entries of the `photos` array in POST photos
pub fn photo_uploads(entries: &[Value]) -> Vec<PhotoUpload> {
    entries
        .iter()
        .map(|entry| match entry.as_object() {
            Some(obj) => PhotoUpload {
                filename: text(obj, "filename"),
                data: text(obj, "data"),
                size: obj.get("size").and_then(number).filter(|n| *n > 0.0).map(|n| n as u64),
                content_type: text(obj, "type"),
            },
            None => PhotoUpload::default(),
        })
        .collect()
}
