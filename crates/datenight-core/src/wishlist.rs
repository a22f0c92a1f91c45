use chrono::{DateTime, Utc};
use datenight_models::{Priority, WishlistItem};
use std::cmp::Reverse;

use crate::error::StoreError;

#[derive(Debug, Clone, Default)]
pub struct NewWishlistItem {
    pub movie_id: String,
    pub movie_title: String,
    pub movie_year: Option<String>,
    pub movie_poster: Option<String>,
    pub movie_genre: Option<String>,
    pub priority: Priority,
    pub is_shared: bool,
    pub user_id: String,
}

impl NewWishlistItem {
    pub(crate) fn validate(&self) -> Result<(), StoreError> {
        if self.movie_id.trim().is_empty() || self.movie_title.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "movie_id and movie_title are required".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn into_item(self, id: u64, now: DateTime<Utc>) -> WishlistItem {
        WishlistItem {
            id,
            movie_id: self.movie_id,
            movie_title: self.movie_title,
            movie_year: self.movie_year,
            movie_poster: self.movie_poster,
            movie_genre: self.movie_genre,
            priority: self.priority,
            is_shared: self.is_shared,
            user_id: self.user_id,
            added_date: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WishlistPatch {
    pub movie_id: Option<String>,
    pub movie_title: Option<String>,
    pub movie_year: Option<String>,
    pub movie_poster: Option<String>,
    pub movie_genre: Option<String>,
    pub priority: Option<Priority>,
    pub is_shared: Option<bool>,
    pub user_id: Option<String>,
}

impl WishlistPatch {
    pub(crate) fn apply(self, item: &mut WishlistItem, now: DateTime<Utc>) {
        if let Some(v) = self.movie_id {
            item.movie_id = v;
        }
        if let Some(v) = self.movie_title {
            item.movie_title = v;
        }
        if let Some(v) = self.movie_year {
            item.movie_year = Some(v);
        }
        if let Some(v) = self.movie_poster {
            item.movie_poster = Some(v);
        }
        if let Some(v) = self.movie_genre {
            item.movie_genre = Some(v);
        }
        if let Some(v) = self.priority {
            item.priority = v;
        }
        if let Some(v) = self.is_shared {
            item.is_shared = v;
        }
        if let Some(v) = self.user_id {
            item.user_id = v;
        }
        item.updated_at = now;
    }
}

#[derive(Debug, Clone, Default)]
pub struct WishlistFilter {
    /// Entries owned by this user plus every shared entry
    pub user_id: Option<String>,
    pub priority: Option<Priority>,
    pub is_shared: Option<bool>,
}

impl WishlistFilter {
    pub fn matches(&self, item: &WishlistItem) -> bool {
        self.user_id.as_deref().map_or(true, |u| item.visible_to(u))
            && self.priority.map_or(true, |p| item.priority == p)
            && self.is_shared.map_or(true, |s| item.is_shared == s)
    }
}

/// An existing entry that blocks adding `movie_id` for `user_id`
pub fn find_duplicate<'a>(items: &'a [WishlistItem], movie_id: &str, user_id: &str) -> Option<&'a WishlistItem> {
    items
        .iter()
        .find(|item| item.movie_id == movie_id && (item.user_id == user_id || item.is_shared))
}

/// Highest priority first, then most recently added
pub fn sort_by_priority(items: &mut [WishlistItem]) {
    items.sort_by_key(|item| (Reverse(item.priority.rank()), Reverse(item.added_date), Reverse(item.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn item(id: u64, priority: Priority, age_days: i64, user_id: &str, shared: bool) -> WishlistItem {
        let new = NewWishlistItem {
            movie_id: format!("tt{}", id),
            movie_title: format!("Movie {}", id),
            priority,
            is_shared: shared,
            user_id: user_id.to_string(),
            ..Default::default()
        };
        new.into_item(id, Utc::now() - Duration::days(age_days))
    }

    #[test]
    fn test_sort_by_priority_then_recency() {
        let mut items = vec![
            item(1, Priority::Maybe, 0, "user1", false),
            item(2, Priority::MustWatch, 5, "user1", false),
            item(3, Priority::Interested, 1, "user1", false),
            item(4, Priority::MustWatch, 1, "user1", false),
        ];
        sort_by_priority(&mut items);
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_duplicate_rules() {
        let items = vec![item(1, Priority::Maybe, 0, "user1", false), item(2, Priority::Maybe, 0, "user2", true)];

        assert!(find_duplicate(&items, "tt1", "user1").is_some());
        assert!(find_duplicate(&items, "tt1", "user2").is_none());
        // shared entries block everyone
        assert!(find_duplicate(&items, "tt2", "user1").is_some());
    }

    #[test]
    fn test_filter_visibility() {
        let own = item(1, Priority::Interested, 0, "user1", false);
        let shared = item(2, Priority::Interested, 0, "user2", true);
        let private = item(3, Priority::Interested, 0, "user2", false);

        let filter = WishlistFilter { user_id: Some("user1".to_string()), ..Default::default() };
        assert!(filter.matches(&own));
        assert!(filter.matches(&shared));
        assert!(!filter.matches(&private));

        let only_shared = WishlistFilter { is_shared: Some(true), ..Default::default() };
        assert!(!only_shared.matches(&own));
        assert!(only_shared.matches(&shared));
    }
}
