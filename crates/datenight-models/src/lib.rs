pub mod content;
pub mod details;
pub mod photo;
pub mod search;
pub mod session;
pub mod wishlist;

pub use content::{ContentType, ContentTypeFilter, ParseEnumError};
pub use details::{MovieDetails, SourceRating, TvDetails};
pub use photo::{Photo, PhotoSummary};
pub use search::{MovieSearchHit, SearchResult};
pub use session::{IncompleteDate, LinkedWatchSession, Participant, WatchSession, WatchStatus};
pub use wishlist::{Priority, WishlistItem};
