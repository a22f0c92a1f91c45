use async_trait::async_trait;
use chrono::Utc;
use datenight_models::{LinkedWatchSession, Photo, WatchSession, WatchStatus, WishlistItem};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::linking;
use crate::photos::{self, PhotoUpload};
use crate::repository::{DeletedSession, PhotoRepository, SessionRepository, WishlistRepository};
use crate::session::{NewWatchSession, SessionFilter, WatchSessionPatch};
use crate::wishlist::{self, NewWishlistItem, WishlistFilter, WishlistPatch};

trait Identified {
    fn id(&self) -> u64;
}

impl Identified for WatchSession {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Identified for WishlistItem {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Identified for Photo {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Rows plus the id counter; ids start at 1 and are never reused
struct Table<T> {
    rows: Vec<T>,
    next_id: u64,
}

impl<T: Identified> Table<T> {
    fn new() -> Self {
        Self { rows: Vec::new(), next_id: 1 }
    }

    fn from_rows(rows: Vec<T>) -> Self {
        let next_id = rows.iter().map(Identified::id).max().unwrap_or(0) + 1;
        Self { rows, next_id }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.rows.iter().position(|row| row.id() == id)
    }
}

/// Full contents of a store, as written to and read from snapshots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub sessions: Vec<WatchSession>,
    pub wishlist: Vec<WishlistItem>,
    pub photos: Vec<Photo>,
}

impl StoreSnapshot {
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty() && self.wishlist.is_empty() && self.photos.is_empty()
    }
}

/// Process-lifetime store backing all three repositories
pub struct MemoryStore {
    sessions: RwLock<Table<WatchSession>>,
    wishlist: RwLock<Table<WishlistItem>>,
    photos: RwLock<Table<Photo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(Table::new()),
            wishlist: RwLock::new(Table::new()),
            photos: RwLock::new(Table::new()),
        }
    }

    /// Seed a store from a snapshot; counters resume after the highest id
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        info!(
            sessions = snapshot.sessions.len(),
            wishlist = snapshot.wishlist.len(),
            photos = snapshot.photos.len(),
            "Restoring store from snapshot"
        );
        Self {
            sessions: RwLock::new(Table::from_rows(snapshot.sessions)),
            wishlist: RwLock::new(Table::from_rows(snapshot.wishlist)),
            photos: RwLock::new(Table::from_rows(snapshot.photos)),
        }
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            sessions: self.sessions.read().await.rows.clone(),
            wishlist: self.wishlist.read().await.rows.clone(),
            photos: self.photos.read().await.rows.clone(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn list(&self, filter: &SessionFilter) -> Vec<WatchSession> {
        let table = self.sessions.read().await;
        table.rows.iter().filter(|s| filter.matches(s)).cloned().collect()
    }

    async fn list_linked(&self, filter: &SessionFilter) -> Vec<LinkedWatchSession> {
        let table = self.sessions.read().await;
        table
            .rows
            .iter()
            .filter(|s| filter.matches(s))
            .map(|s| linking::link(&table.rows, s))
            .collect()
    }

    async fn get(&self, id: u64) -> Option<WatchSession> {
        let table = self.sessions.read().await;
        table.rows.iter().find(|s| s.id == id).cloned()
    }

    async fn create(&self, new: NewWatchSession) -> Result<LinkedWatchSession, StoreError> {
        new.validate()?;

        // Parent check, parent flip and insert happen under one write guard
        let mut table = self.sessions.write().await;
        let now = Utc::now();

        if let Some(parent_id) = new.parent_date_id {
            let index = table.position(parent_id).ok_or(StoreError::UnknownParent(parent_id))?;
            let parent = &mut table.rows[index];
            if parent.watch_status == WatchStatus::Partial {
                parent.watch_status = WatchStatus::Continued;
                parent.updated_at = now;
                debug!(parent_id, "Parent session marked as continued");
            }
        }

        let id = table.allocate_id();
        let session = new.into_session(id, now);
        info!(id, movie_id = %session.movie_id, status = %session.watch_status, "Watch session created");
        table.rows.push(session.clone());

        Ok(linking::link(&table.rows, &session))
    }

    async fn update(&self, id: u64, patch: WatchSessionPatch) -> Result<WatchSession, StoreError> {
        let mut table = self.sessions.write().await;
        let index = table.position(id).ok_or_else(|| StoreError::not_found("movie date", id))?;

        if let Some(Some(parent_id)) = patch.parent_date_id {
            if parent_id == id {
                return Err(StoreError::SelfParent(id));
            }
            if table.position(parent_id).is_none() {
                return Err(StoreError::UnknownParent(parent_id));
            }
        }

        let session = &mut table.rows[index];
        patch.apply(session, Utc::now());
        debug!(id, "Watch session updated");
        Ok(session.clone())
    }

    async fn delete(&self, id: u64) -> Result<DeletedSession, StoreError> {
        let mut table = self.sessions.write().await;
        let index = table.position(id).ok_or_else(|| StoreError::not_found("movie date", id))?;

        let doomed = linking::cascade_ids(&table.rows, id);
        let session = table.rows.remove(index);
        let before = table.rows.len();
        table.rows.retain(|s| !doomed.contains(&s.id));
        let linked_dates_deleted = before - table.rows.len();

        info!(id, linked_dates_deleted, "Watch session deleted");
        Ok(DeletedSession { session, linked_dates_deleted })
    }
}

#[async_trait]
impl WishlistRepository for MemoryStore {
    async fn list(&self, filter: &WishlistFilter) -> Vec<WishlistItem> {
        let table = self.wishlist.read().await;
        let mut items: Vec<WishlistItem> = table.rows.iter().filter(|i| filter.matches(i)).cloned().collect();
        wishlist::sort_by_priority(&mut items);
        items
    }

    async fn add(&self, new: NewWishlistItem) -> Result<WishlistItem, StoreError> {
        new.validate()?;

        let mut table = self.wishlist.write().await;
        if let Some(existing) = wishlist::find_duplicate(&table.rows, &new.movie_id, &new.user_id) {
            return Err(StoreError::DuplicateWishlistItem(Box::new(existing.clone())));
        }

        let id = table.allocate_id();
        let item = new.into_item(id, Utc::now());
        info!(id, movie_id = %item.movie_id, priority = item.priority.as_str(), "Wishlist item added");
        table.rows.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: u64, patch: WishlistPatch) -> Result<WishlistItem, StoreError> {
        let mut table = self.wishlist.write().await;
        let index = table.position(id).ok_or_else(|| StoreError::not_found("wishlist item", id))?;
        let item = &mut table.rows[index];
        patch.apply(item, Utc::now());
        Ok(item.clone())
    }

    async fn remove(&self, id: u64) -> Result<WishlistItem, StoreError> {
        let mut table = self.wishlist.write().await;
        let index = table.position(id).ok_or_else(|| StoreError::not_found("wishlist item", id))?;
        let item = table.rows.remove(index);
        info!(id, "Wishlist item removed");
        Ok(item)
    }
}

#[async_trait]
impl PhotoRepository for MemoryStore {
    async fn list(&self, date_id: Option<u64>) -> Vec<Photo> {
        let table = self.photos.read().await;
        table
            .rows
            .iter()
            .filter(|p| date_id.map_or(true, |d| p.date_id == d))
            .cloned()
            .collect()
    }

    async fn add(&self, date_id: u64, uploads: Vec<PhotoUpload>, description: &str) -> Vec<Photo> {
        let prepared: Vec<_> = uploads.into_iter().filter_map(photos::prepare).collect();

        let mut table = self.photos.write().await;
        let now = Utc::now();
        let mut stored = Vec::with_capacity(prepared.len());
        for photo in prepared {
            let id = table.allocate_id();
            let photo = photo.into_photo(id, date_id, description, now);
            table.rows.push(photo.clone());
            stored.push(photo);
        }

        info!(date_id, count = stored.len(), "Photos uploaded");
        stored
    }

    async fn remove(&self, id: u64) -> Result<Photo, StoreError> {
        let mut table = self.photos.write().await;
        let index = table.position(id).ok_or_else(|| StoreError::not_found("photo", id))?;
        Ok(table.rows.remove(index))
    }
}
