pub mod catalog;
pub mod error;
pub mod incomplete;
pub mod linking;
pub mod photos;
pub mod repository;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod wishlist;

pub use catalog::{parse_popular_limit, ContentCatalog, ContentSearch, MovieSearch, PopularContent};
pub use error::StoreError;
pub use photos::PhotoUpload;
pub use repository::{DeletedSession, PhotoRepository, SessionRepository, WishlistRepository};
pub use session::{
    apply_participant_updates, clamp_progress, parse_date_watched, NewWatchSession, ParticipantUpdate, SessionFilter, WatchSessionPatch,
};
pub use snapshot::SnapshotManager;
pub use store::{MemoryStore, StoreSnapshot};
pub use wishlist::{NewWishlistItem, WishlistFilter, WishlistPatch};
