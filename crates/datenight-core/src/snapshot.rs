use anyhow::{anyhow, Result};
use datenight_config::PathManager;
use datenight_models::{Photo, WatchSession, WishlistItem};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::store::StoreSnapshot;

const SESSIONS: &str = "movie_dates";
const WISHLIST: &str = "wishlist";
const PHOTOS: &str = "photos";

/// Reads and writes store snapshots as one JSON file per data type
#[derive(Clone)]
pub struct SnapshotManager {
    snapshot_dir: PathBuf,
}

impl SnapshotManager {
    pub fn new(path_manager: &PathManager) -> Self {
        Self::with_dir(path_manager.snapshot_dir())
    }

    pub fn with_dir(snapshot_dir: PathBuf) -> Self {
        Self { snapshot_dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.snapshot_dir
    }

    fn data_path(&self, data_type: &str) -> PathBuf {
        self.snapshot_dir.join(format!("{}.json", data_type))
    }

    pub fn exists(&self) -> bool {
        [SESSIONS, WISHLIST, PHOTOS].iter().any(|t| self.data_path(t).exists())
    }

    /// Load whatever was saved. Missing files are empty collections; corrupted
    /// files are deleted and treated as empty.
    pub fn load(&self) -> Result<StoreSnapshot> {
        Ok(StoreSnapshot {
            sessions: self.load_data::<WatchSession>(SESSIONS)?.unwrap_or_default(),
            wishlist: self.load_data::<WishlistItem>(WISHLIST)?.unwrap_or_default(),
            photos: self.load_data::<Photo>(PHOTOS)?.unwrap_or_default(),
        })
    }

    pub fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        std::fs::create_dir_all(&self.snapshot_dir)?;
        self.save_data(SESSIONS, &snapshot.sessions)?;
        self.save_data(WISHLIST, &snapshot.wishlist)?;
        self.save_data(PHOTOS, &snapshot.photos)?;
        info!("Snapshot saved to {:?}", self.snapshot_dir);
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.snapshot_dir.exists() {
            std::fs::remove_dir_all(&self.snapshot_dir)?;
            info!("Cleared snapshot directory: {:?}", self.snapshot_dir);
        }
        Ok(())
    }

    fn load_data<T>(&self, data_type: &str) -> Result<Option<Vec<T>>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let path = self.data_path(data_type);

        if !path.exists() {
            debug!("Snapshot miss: {} (file does not exist)", data_type);
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read snapshot file for {}: {}", data_type, e);
                return Ok(None);
            }
        };

        match serde_json::from_str::<Vec<T>>(&content) {
            Ok(data) => {
                info!("Snapshot hit: {} (loaded {} items)", data_type, data.len());
                Ok(Some(data))
            }
            Err(e) => {
                warn!(
                    "Snapshot corruption detected for {}: {}. Deleting corrupted file.",
                    data_type, e
                );
                if let Err(rm_err) = std::fs::remove_file(&path) {
                    warn!("Failed to delete corrupted snapshot file: {}", rm_err);
                }
                Ok(None)
            }
        }
    }

    fn save_data<T>(&self, data_type: &str, data: &[T]) -> Result<()>
    where
        T: Serialize,
    {
        let path = self.data_path(data_type);
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| anyhow!("Failed to serialize snapshot {}: {}", data_type, e))?;
        std::fs::write(&path, json)
            .map_err(|e| anyhow!("Failed to write snapshot {}: {}", data_type, e))?;
        debug!("Snapshot saved: {} ({} items)", data_type, data.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SessionRepository;
    use crate::session::NewWatchSession;
    use crate::store::MemoryStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let manager = SnapshotManager::with_dir(dir.path().join("snapshot"));
        assert!(!manager.exists());

        let store = MemoryStore::new();
        store.create(NewWatchSession::new("tt0111161", "The Shawshank Redemption")).await.unwrap();
        manager.save(&store.snapshot().await).unwrap();
        assert!(manager.exists());

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.sessions.len(), 1);
        assert_eq!(loaded.sessions[0].movie_title, "The Shawshank Redemption");
        assert!(loaded.wishlist.is_empty());
    }

    #[test]
    fn test_corrupted_file_is_discarded() {
        let dir = TempDir::new().unwrap();
        let manager = SnapshotManager::with_dir(dir.path().to_path_buf());
        std::fs::write(dir.path().join("wishlist.json"), "{not json").unwrap();

        let loaded = manager.load().unwrap();
        assert!(loaded.is_empty());
        assert!(!dir.path().join("wishlist.json").exists());
    }

    #[test]
    fn test_clear_removes_directory() {
        let dir = TempDir::new().unwrap();
        let manager = SnapshotManager::with_dir(dir.path().join("snapshot"));
        manager.save(&StoreSnapshot::default()).unwrap();
        manager.clear().unwrap();
        assert!(!manager.dir().exists());
        manager.clear().unwrap();
    }
}
