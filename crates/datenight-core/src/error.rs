use datenight_models::WishlistItem;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No {kind} found with id {id}")]
    NotFound { kind: &'static str, id: u64 },

    #[error("Parent date not found")]
    UnknownParent(u64),

    #[error("A date cannot be its own parent")]
    SelfParent(u64),

    #[error("This movie is already in the wishlist")]
    DuplicateWishlistItem(Box<WishlistItem>),

    #[error("{0}")]
    InvalidInput(String),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: u64) -> Self {
        StoreError::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
