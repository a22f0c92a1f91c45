use async_trait::async_trait;
use datenight_models::{ContentType, MovieDetails, MovieSearchHit, SearchResult, TvDetails};

use crate::capabilities::CapabilityRegistry;
use crate::error::SourceError;

/// One page of movie search hits in the legacy search format
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieSearchPage {
    pub hits: Vec<MovieSearchHit>,
    pub total: u64,
    /// Provider message when nothing matched (e.g. "Movie not found!")
    pub message: Option<String>,
}

/// A third-party metadata API (OMDb, TMDb, ...).
///
/// Every method has a default that reports the operation as unsupported; providers
/// override the ones matching their declared capabilities.
#[async_trait]
pub trait MetadataProvider: Send + Sync + CapabilityRegistry {
    fn source_name(&self) -> &'static str;

    async fn search(&self, _query: &str, _content_type: ContentType) -> Result<Vec<SearchResult>, SourceError> {
        Err(SourceError::Unsupported { provider: self.source_name(), operation: "search" })
    }

    async fn search_movie_page(&self, _query: &str) -> Result<MovieSearchPage, SourceError> {
        Err(SourceError::Unsupported { provider: self.source_name(), operation: "movie search" })
    }

    async fn movie_details(&self, _id: &str) -> Result<MovieDetails, SourceError> {
        Err(SourceError::Unsupported { provider: self.source_name(), operation: "movie details" })
    }

    async fn tv_details(&self, _id: &str) -> Result<TvDetails, SourceError> {
        Err(SourceError::Unsupported { provider: self.source_name(), operation: "tv details" })
    }

    /// Up to `count` popular items of the given kind
    async fn popular(&self, _content_type: ContentType, _count: usize) -> Result<Vec<SearchResult>, SourceError> {
        Err(SourceError::Unsupported { provider: self.source_name(), operation: "popular listings" })
    }
}
