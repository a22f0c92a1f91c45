//! HTTP surface of the date tracker: axum handlers over the core repositories
//! and the content catalog.

pub mod error;
pub mod handlers;
pub mod payload;
pub mod router;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use server::{bind, serve};
pub use state::AppState;
