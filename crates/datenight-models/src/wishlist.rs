use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::content::ParseEnumError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    MustWatch,
    #[default]
    Interested,
    Maybe,
}

impl Priority {
    /// Sort weight, higher is listed first
    pub fn rank(&self) -> u8 {
        match self {
            Priority::MustWatch => 3,
            Priority::Interested => 2,
            Priority::Maybe => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::MustWatch => "must_watch",
            Priority::Interested => "interested",
            Priority::Maybe => "maybe",
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "must_watch" => Ok(Priority::MustWatch),
            "interested" => Ok(Priority::Interested),
            "maybe" => Ok(Priority::Maybe),
            other => Err(ParseEnumError::new("priority", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WishlistItem {
    pub id: u64,
    pub movie_id: String,
    pub movie_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_genre: Option<String>,
    pub priority: Priority,
    pub is_shared: bool,
    pub user_id: String,
    pub added_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WishlistItem {
    /// Whether `user_id` can see this entry (own entries and shared ones)
    pub fn visible_to(&self, user_id: &str) -> bool {
        self.user_id == user_id || self.is_shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::MustWatch.rank() > Priority::Interested.rank());
        assert!(Priority::Interested.rank() > Priority::Maybe.rank());
        assert_eq!(Priority::default(), Priority::Interested);
        assert_eq!("must_watch".parse::<Priority>().unwrap(), Priority::MustWatch);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
