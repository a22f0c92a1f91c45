pub mod capabilities;
pub mod error;
pub mod factory;
pub mod fallback;
pub mod http;
pub mod omdb;
pub mod tmdb;
pub mod traits;

pub use capabilities::{Capability, CapabilityRegistry};
pub use error::SourceError;
pub use factory::{ProviderFactory, ProviderFactoryRegistry};
pub use omdb::OmdbClient;
pub use tmdb::{bare_tv_id, TmdbClient};
pub use traits::{MetadataProvider, MovieSearchPage};
