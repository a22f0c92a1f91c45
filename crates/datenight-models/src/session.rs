use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::content::{ContentType, ParseEnumError};

/// Progress state of a watch session.
///
/// `Partial` becomes `Continued` when another session names it as parent.
/// No other transition exists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    #[default]
    Completed,
    Partial,
    Continued,
}

impl WatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::Completed => "completed",
            WatchStatus::Partial => "partial",
            WatchStatus::Continued => "continued",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(WatchStatus::Completed),
            "partial" => Ok(WatchStatus::Partial),
            "continued" => Ok(WatchStatus::Continued),
            other => Err(ParseEnumError::new("watch_status", other)),
        }
    }
}

/// One viewer's take on a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review: String,
}

impl Participant {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            rating: None,
            review: String::new(),
        }
    }
}

/// A logged instance of watching a movie or TV content item together
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchSession {
    pub id: u64,
    pub movie_id: String,
    pub movie_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_poster: Option<String>,
    pub content_type: ContentType,
    pub date_watched: DateTime<Utc>,
    pub location: String,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub photos: Vec<serde_json::Value>,
    pub watch_status: WatchStatus,
    pub watch_progress: f64, // 0-100 percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_date_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WatchSession {
    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p.user_id == user_id)
    }

    pub fn participant(&self, user_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }
}

/// A session together with its direct continuation links
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkedWatchSession {
    #[serde(flatten)]
    pub session: WatchSession,
    pub linked_dates: Vec<WatchSession>,
    pub parent_date: Option<WatchSession>,
}

/// A partially watched session, shaped for the "continue watching" picker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncompleteDate {
    pub id: u64,
    pub movie_id: String,
    pub movie_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_poster: Option<String>,
    pub content_type: ContentType,
    pub date_watched: DateTime<Utc>,
    pub location: String,
    pub watch_progress: f64,
    pub formatted_date: String,
    pub days_ago: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WatchSession {
        let now = Utc::now();
        WatchSession {
            id: 1,
            movie_id: "tt1".to_string(),
            movie_title: "X".to_string(),
            movie_year: None,
            movie_poster: None,
            content_type: ContentType::Movie,
            date_watched: now,
            location: String::new(),
            participants: vec![Participant::new("user1"), Participant::new("user2")],
            photos: Vec::new(),
            watch_status: WatchStatus::Completed,
            watch_progress: 100.0,
            parent_date_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_watch_status_parse() {
        assert_eq!("partial".parse::<WatchStatus>().unwrap(), WatchStatus::Partial);
        assert_eq!(WatchStatus::Continued.to_string(), "continued");
        assert!("done".parse::<WatchStatus>().is_err());
    }

    #[test]
    fn test_linked_session_flattens_fields() {
        let linked = LinkedWatchSession {
            session: sample(),
            linked_dates: Vec::new(),
            parent_date: None,
        };
        let json = serde_json::to_value(&linked).unwrap();
        assert_eq!(json["movie_id"], "tt1");
        assert_eq!(json["watch_status"], "completed");
        assert!(json["linked_dates"].as_array().unwrap().is_empty());
        assert!(json["parent_date"].is_null());
        assert!(json.get("parent_date_id").is_none());
    }

    #[test]
    fn test_has_participant() {
        let session = sample();
        assert!(session.has_participant("user2"));
        assert!(!session.has_participant("user3"));
        assert_eq!(session.participant("user1").map(|p| p.review.as_str()), Some(""));
    }
}
