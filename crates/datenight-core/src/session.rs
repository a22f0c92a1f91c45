use chrono::{DateTime, NaiveDate, Utc};
use datenight_models::{ContentType, Participant, WatchSession, WatchStatus};

use crate::error::StoreError;

/// Progress stored when none (or garbage) was supplied
pub const DEFAULT_PROGRESS: f64 = 100.0;

/// Clamp a requested progress into `[0, 100]`; missing or NaN means fully watched.
pub fn clamp_progress(value: Option<f64>) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v.clamp(0.0, 100.0),
        _ => DEFAULT_PROGRESS,
    }
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC)
pub fn parse_date_watched(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| StoreError::InvalidInput(format!("Invalid date_watched: {}", raw)))
}

/// Fields accepted when logging a new session
#[derive(Debug, Clone, Default)]
pub struct NewWatchSession {
    pub movie_id: String,
    pub movie_title: String,
    pub movie_year: Option<String>,
    pub movie_poster: Option<String>,
    pub content_type: ContentType,
    pub date_watched: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub participants: Vec<Participant>,
    pub photos: Vec<serde_json::Value>,
    pub watch_status: WatchStatus,
    pub watch_progress: Option<f64>,
    pub parent_date_id: Option<u64>,
}

impl NewWatchSession {
    pub fn new(movie_id: impl Into<String>, movie_title: impl Into<String>) -> Self {
        Self {
            movie_id: movie_id.into(),
            movie_title: movie_title.into(),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), StoreError> {
        if self.movie_id.trim().is_empty() || self.movie_title.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "movie_id and movie_title are required".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn into_session(self, id: u64, now: DateTime<Utc>) -> WatchSession {
        WatchSession {
            id,
            movie_id: self.movie_id,
            movie_title: self.movie_title,
            movie_year: self.movie_year,
            movie_poster: self.movie_poster,
            content_type: self.content_type,
            date_watched: self.date_watched.unwrap_or(now),
            location: self.location.unwrap_or_default(),
            participants: self.participants,
            photos: self.photos,
            watch_status: self.watch_status,
            watch_progress: clamp_progress(self.watch_progress),
            parent_date_id: self.parent_date_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Rating/review change for one participant. Unknown users are appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantUpdate {
    pub user_id: String,
    /// `Some(None)` clears the rating
    pub rating: Option<Option<f64>>,
    pub review: Option<String>,
}

/// Merge rating/review changes into a participant list, appending unknown users
pub fn apply_participant_updates(participants: &mut Vec<Participant>, updates: Vec<ParticipantUpdate>) {
    for update in updates {
        let index = match participants.iter().position(|p| p.user_id == update.user_id) {
            Some(index) => index,
            None => {
                participants.push(Participant::new(update.user_id.clone()));
                participants.len() - 1
            }
        };
        if let Some(rating) = update.rating {
            participants[index].rating = rating;
        }
        if let Some(review) = update.review {
            participants[index].review = review;
        }
    }
}

/// Partial update of a session; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct WatchSessionPatch {
    pub movie_id: Option<String>,
    pub movie_title: Option<String>,
    pub movie_year: Option<String>,
    pub movie_poster: Option<String>,
    pub content_type: Option<ContentType>,
    pub date_watched: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub participants: Vec<ParticipantUpdate>,
    pub photos: Option<Vec<serde_json::Value>>,
    pub watch_status: Option<WatchStatus>,
    /// Present-but-garbage progress arrives as `Some(NaN)` and stores 100
    pub watch_progress: Option<f64>,
    /// `Some(None)` unlinks the session from its parent
    pub parent_date_id: Option<Option<u64>>,
}

impl WatchSessionPatch {
    pub(crate) fn apply(self, session: &mut WatchSession, now: DateTime<Utc>) {
        if let Some(movie_id) = self.movie_id {
            session.movie_id = movie_id;
        }
        if let Some(movie_title) = self.movie_title {
            session.movie_title = movie_title;
        }
        if let Some(year) = self.movie_year {
            session.movie_year = Some(year);
        }
        if let Some(poster) = self.movie_poster {
            session.movie_poster = Some(poster);
        }
        if let Some(content_type) = self.content_type {
            session.content_type = content_type;
        }
        if let Some(date_watched) = self.date_watched {
            session.date_watched = date_watched;
        }
        if let Some(location) = self.location {
            session.location = location;
        }
        apply_participant_updates(&mut session.participants, self.participants);
        if let Some(photos) = self.photos {
            session.photos = photos;
        }
        if let Some(status) = self.watch_status {
            session.watch_status = status;
        }
        if let Some(progress) = self.watch_progress {
            session.watch_progress = clamp_progress(Some(progress));
        }
        if let Some(parent) = self.parent_date_id {
            session.parent_date_id = parent;
        }
        session.updated_at = now;
    }
}

/// Query filters for listing sessions
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    /// Sessions this user took part in
    pub user_id: Option<String>,
    pub movie_id: Option<String>,
    pub watch_status: Option<WatchStatus>,
}

impl SessionFilter {
    pub fn matches(&self, session: &WatchSession) -> bool {
        if let Some(user_id) = &self.user_id {
            if !session.has_participant(user_id) {
                return false;
            }
        }
        if let Some(movie_id) = &self.movie_id {
            if &session.movie_id != movie_id {
                return false;
            }
        }
        if let Some(status) = self.watch_status {
            if session.watch_status != status {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_clamp_progress() {
        assert_eq!(clamp_progress(None), 100.0);
        assert_eq!(clamp_progress(Some(f64::NAN)), 100.0);
        assert_eq!(clamp_progress(Some(150.0)), 100.0);
        assert_eq!(clamp_progress(Some(-20.0)), 0.0);
        assert_eq!(clamp_progress(Some(0.0)), 0.0);
        assert_eq!(clamp_progress(Some(42.5)), 42.5);
    }

    #[test]
    fn test_parse_date_watched() {
        let ts = parse_date_watched("2024-03-09T20:30:00Z").unwrap();
        assert_eq!(ts.hour(), 20);

        let day = parse_date_watched("2024-03-09").unwrap();
        assert_eq!((day.year(), day.month(), day.day(), day.hour()), (2024, 3, 9, 0));

        assert!(parse_date_watched("last friday").is_err());
    }

    #[test]
    fn test_new_session_defaults() {
        let now = Utc::now();
        let session = NewWatchSession::new("tt1", "X").into_session(1, now);
        assert_eq!(session.watch_status, WatchStatus::Completed);
        assert_eq!(session.watch_progress, 100.0);
        assert_eq!(session.location, "");
        assert_eq!(session.date_watched, now);
        assert!(NewWatchSession::new(" ", "X").validate().is_err());
    }

    #[test]
    fn test_patch_merges_participants() {
        let now = Utc::now();
        let mut new = NewWatchSession::new("tt1", "X");
        new.participants = vec![Participant::new("user1"), Participant::new("user2")];
        let mut session = new.into_session(1, now);

        let patch = WatchSessionPatch {
            participants: vec![
                ParticipantUpdate {
                    user_id: "user2".to_string(),
                    rating: Some(Some(4.5)),
                    review: None,
                },
                ParticipantUpdate {
                    user_id: "guest".to_string(),
                    rating: None,
                    review: Some("Loved it".to_string()),
                },
            ],
            watch_progress: Some(250.0),
            ..WatchSessionPatch::default()
        };
        patch.apply(&mut session, now);

        assert_eq!(session.participant("user2").and_then(|p| p.rating), Some(4.5));
        assert_eq!(session.participant("guest").map(|p| p.review.as_str()), Some("Loved it"));
        assert_eq!(session.participants.len(), 3);
        assert_eq!(session.watch_progress, 100.0);
    }

    #[test]
    fn test_filter_matches() {
        let mut new = NewWatchSession::new("tt1", "X");
        new.participants = vec![Participant::new("user1")];
        new.watch_status = WatchStatus::Partial;
        let session = new.into_session(1, Utc::now());

        let by_user = SessionFilter { user_id: Some("user1".to_string()), ..Default::default() };
        assert!(by_user.matches(&session));

        let other_user = SessionFilter { user_id: Some("user9".to_string()), ..Default::default() };
        assert!(!other_user.matches(&session));

        let completed = SessionFilter { watch_status: Some(WatchStatus::Completed), ..Default::default() };
        assert!(!completed.matches(&session));
    }
}
