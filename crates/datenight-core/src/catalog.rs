//! Content lookups across the configured metadata providers, with the sample
//! catalog standing in whenever a provider is missing, failing or empty.

use datenight_models::{ContentType, ContentTypeFilter, MovieDetails, MovieSearchHit, SearchResult, TvDetails};
use datenight_sources::{fallback, Capability, MetadataProvider, SourceError};
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

pub const SEARCH_RESULT_LIMIT: usize = 20;
pub const DEFAULT_POPULAR_LIMIT: usize = 20;
pub const MAX_POPULAR_LIMIT: usize = 50;

/// Parse a popular-content `limit`: default 20, non-positive or garbage → 20, capped at 50
pub fn parse_popular_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .map(|n| (n as usize).min(MAX_POPULAR_LIMIT))
        .unwrap_or(DEFAULT_POPULAR_LIMIT)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentSearch {
    /// At most `SEARCH_RESULT_LIMIT` results
    pub results: Vec<SearchResult>,
    /// Match count before truncation
    pub total: usize,
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieSearch {
    pub results: Vec<MovieSearchHit>,
    pub total: u64,
    pub message: Option<String>,
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopularContent {
    pub items: Vec<SearchResult>,
    pub fallback: bool,
}

/// Movies first, then by where the query appears in the title; titles not
/// containing the query go last. Stable, so provider order breaks ties.
fn rank_results(results: &mut [SearchResult], query: &str) {
    let needle = query.to_lowercase();
    results.sort_by_key(|r| {
        (
            r.content_type != ContentType::Movie,
            r.title.to_lowercase().find(&needle).unwrap_or(usize::MAX),
        )
    });
}

#[derive(Clone, Default)]
pub struct ContentCatalog {
    providers: Vec<Arc<dyn MetadataProvider>>,
}

impl ContentCatalog {
    pub fn new(providers: Vec<Arc<dyn MetadataProvider>>) -> Self {
        Self { providers }
    }

    /// Catalog with no providers; every lookup is answered from sample data
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.source_name()).collect()
    }

    fn provider(&self, capability: Capability) -> Option<&Arc<dyn MetadataProvider>> {
        self.providers.iter().find(|p| p.supports(capability))
    }

    async fn search_movies_in_provider(&self, query: &str) -> Vec<SearchResult> {
        let Some(provider) = self.provider(Capability::MovieSearch) else {
            return Vec::new();
        };
        match provider.search(query, ContentType::Movie).await {
            Ok(results) => results,
            Err(e) => {
                warn!(provider = provider.source_name(), error = %e, "Movie search failed");
                Vec::new()
            }
        }
    }

    /// TV results plus whether they came from the sample catalog
    async fn search_tv_in_provider(&self, query: &str) -> (Vec<SearchResult>, bool) {
        let Some(provider) = self.provider(Capability::TvSearch) else {
            return (fallback::search_tv_titles(query), true);
        };
        match provider.search(query, ContentType::TvSeries).await {
            Ok(results) => (results, false),
            Err(e) => {
                warn!(provider = provider.source_name(), error = %e, "TV search failed");
                (Vec::new(), false)
            }
        }
    }

    /// Merged movie and TV search
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, filter: ContentTypeFilter) -> ContentSearch {
        let movies = async {
            if filter.includes(ContentType::Movie) {
                self.search_movies_in_provider(query).await
            } else {
                Vec::new()
            }
        };
        let shows = async {
            if filter.includes(ContentType::TvSeries) {
                self.search_tv_in_provider(query).await
            } else {
                (Vec::new(), false)
            }
        };
        let (movies, (shows, shows_from_catalog)) = futures::join!(movies, shows);

        let mut fallback_used = shows_from_catalog && !shows.is_empty();
        let mut results = movies;
        results.extend(shows);

        if results.is_empty() {
            debug!(query, "No provider results, searching sample catalog");
            results = fallback::search(query, filter);
            fallback_used = !results.is_empty();
        }

        rank_results(&mut results, query);
        let total = results.len();
        results.truncate(SEARCH_RESULT_LIMIT);

        ContentSearch { results, total, fallback: fallback_used }
    }

    /// Movie-only search in the provider's native hit shape
    #[instrument(skip(self))]
    pub async fn search_movies(&self, query: &str) -> MovieSearch {
        let outcome = match self.provider(Capability::MovieSearch) {
            Some(provider) => provider.search_movie_page(query).await,
            None => Err(SourceError::NotConfigured("omdb")),
        };

        match outcome {
            Ok(page) => MovieSearch {
                results: page.hits,
                total: page.total,
                message: page.message,
                fallback: false,
            },
            Err(e) => {
                warn!(error = %e, query, "Movie search unavailable, using sample data");
                let results = fallback::movie_hits(query);
                MovieSearch {
                    total: results.len() as u64,
                    results,
                    message: Some("Using sample data - external movie API temporarily unavailable".to_string()),
                    fallback: true,
                }
            }
        }
    }

    pub async fn movie_details(&self, id: &str) -> Result<MovieDetails, SourceError> {
        let provider = self
            .provider(Capability::MovieDetails)
            .ok_or(SourceError::NotConfigured("omdb"))?;
        provider.movie_details(id).await
    }

    pub async fn tv_details(&self, id: &str) -> Result<TvDetails, SourceError> {
        let provider = self
            .provider(Capability::TvDetails)
            .ok_or(SourceError::NotConfigured("tmdb"))?;
        provider.tv_details(id).await
    }

    async fn popular_from_provider(&self, content_type: ContentType, count: usize) -> Vec<SearchResult> {
        let capability = match content_type {
            ContentType::Movie => Capability::PopularMovies,
            ContentType::TvSeries => Capability::PopularTv,
        };
        let Some(provider) = self.provider(capability) else {
            return Vec::new();
        };
        match provider.popular(content_type, count).await {
            Ok(items) => items,
            Err(e) => {
                warn!(provider = provider.source_name(), %content_type, error = %e, "Popular listing failed");
                Vec::new()
            }
        }
    }

    /// Popular movies and shows, each kind contributing `limit / 2`, shuffled
    #[instrument(skip(self))]
    pub async fn popular(&self, filter: ContentTypeFilter, limit: usize) -> PopularContent {
        let per_kind = limit / 2;
        let movies = async {
            if filter.includes(ContentType::Movie) && per_kind > 0 {
                self.popular_from_provider(ContentType::Movie, per_kind).await
            } else {
                Vec::new()
            }
        };
        let shows = async {
            if filter.includes(ContentType::TvSeries) && per_kind > 0 {
                self.popular_from_provider(ContentType::TvSeries, per_kind).await
            } else {
                Vec::new()
            }
        };
        let (movies, shows) = futures::join!(movies, shows);

        let mut items = movies;
        items.extend(shows);
        let fallback_used = items.is_empty();
        if fallback_used {
            items = fallback::popular(filter, limit);
        }

        items.shuffle(&mut rand::thread_rng());
        PopularContent { items, fallback: fallback_used }
    }
}
