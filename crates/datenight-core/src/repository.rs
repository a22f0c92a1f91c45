//! Storage seams for the three resource collections.
//!
//! Handlers only see these traits; `MemoryStore` is the shipped implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use datenight_models::{IncompleteDate, LinkedWatchSession, Photo, WatchSession, WatchStatus, WishlistItem};

use crate::error::StoreError;
use crate::incomplete::incomplete_dates;
use crate::photos::PhotoUpload;
use crate::session::{NewWatchSession, SessionFilter, WatchSessionPatch};
use crate::wishlist::{NewWishlistItem, WishlistFilter, WishlistPatch};

/// Outcome of deleting a session together with its direct continuations
#[derive(Debug, Clone)]
pub struct DeletedSession {
    pub session: WatchSession,
    pub linked_dates_deleted: usize,
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Sessions matching `filter`, in insertion order
    async fn list(&self, filter: &SessionFilter) -> Vec<WatchSession>;

    /// Like `list`, with each session's direct parent and children attached
    async fn list_linked(&self, filter: &SessionFilter) -> Vec<LinkedWatchSession>;

    async fn get(&self, id: u64) -> Option<WatchSession>;

    /// Store a new session. When it continues another session, the parent must
    /// exist and is flipped from `partial` to `continued` in the same step.
    async fn create(&self, new: NewWatchSession) -> Result<LinkedWatchSession, StoreError>;

    async fn update(&self, id: u64, patch: WatchSessionPatch) -> Result<WatchSession, StoreError>;

    /// Remove a session and the sessions directly continuing it
    async fn delete(&self, id: u64) -> Result<DeletedSession, StoreError>;

    /// Partial sessions for the "continue watching" picker
    async fn incomplete(&self, user_id: Option<&str>, now: DateTime<Utc>) -> Vec<IncompleteDate> {
        let filter = SessionFilter {
            watch_status: Some(WatchStatus::Partial),
            ..SessionFilter::default()
        };
        incomplete_dates(&self.list(&filter).await, user_id, now)
    }
}

#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// Matching entries, highest priority and most recent first
    async fn list(&self, filter: &WishlistFilter) -> Vec<WishlistItem>;

    /// Fails with `DuplicateWishlistItem` when the movie is already listed for
    /// this user or in a shared entry
    async fn add(&self, new: NewWishlistItem) -> Result<WishlistItem, StoreError>;

    async fn update(&self, id: u64, patch: WishlistPatch) -> Result<WishlistItem, StoreError>;

    async fn remove(&self, id: u64) -> Result<WishlistItem, StoreError>;
}

#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn list(&self, date_id: Option<u64>) -> Vec<Photo>;

    /// Store every valid upload; invalid entries are skipped
    async fn add(&self, date_id: u64, uploads: Vec<PhotoUpload>, description: &str) -> Vec<Photo>;

    async fn remove(&self, id: u64) -> Result<Photo, StoreError>;
}
