use datenight_core::{ContentCatalog, MemoryStore, PhotoRepository, SessionRepository, WishlistRepository};
use std::sync::Arc;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionRepository>,
    pub wishlist: Arc<dyn WishlistRepository>,
    pub photos: Arc<dyn PhotoRepository>,
    pub catalog: ContentCatalog,
    /// User ids legacy `user1_*`/`user2_*` fields map onto, in order
    pub participants: Vec<String>,
}

impl AppState {
    /// All three repositories backed by one in-memory store
    pub fn in_memory(store: Arc<MemoryStore>, catalog: ContentCatalog, participants: Vec<String>) -> Self {
        Self {
            sessions: store.clone(),
            wishlist: store.clone(),
            photos: store,
            catalog,
            participants,
        }
    }

    /// Owner assigned to wishlist entries posted without a `user_id`
    pub fn default_user(&self) -> &str {
        self.participants.first().map(String::as_str).unwrap_or("user1")
    }
}
