use async_trait::async_trait;
use datenight_config::OmdbConfig;
use datenight_models::{ContentType, MovieDetails, SearchResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::capabilities::{Capability, CapabilityRegistry};
use crate::error::SourceError;
use crate::http::create_http_client;
use crate::omdb::api::{self, OmdbSearchResponse, OmdbTitle};
use crate::traits::{MetadataProvider, MovieSearchPage};

const PROVIDER: &str = "OMDb";

/// OMDb client: movie search and movie details by IMDb id
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
    search_timeout: Duration,
    details_timeout: Duration,
}

impl OmdbClient {
    pub fn new(api_key: String, config: &OmdbConfig) -> Self {
        Self {
            client: create_http_client(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_timeout: Duration::from_secs(config.search_timeout_secs),
            details_timeout: Duration::from_secs(config.details_timeout_secs),
        }
    }

    async fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)], timeout: Duration) -> Result<T, SourceError> {
        let url = format!("{}/", self.base_url);
        let secs = timeout.as_secs();

        let response = self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .header("Accept", "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(PROVIDER, secs, e))?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                provider: PROVIDER,
                status: response.status().as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SourceError::from_reqwest(PROVIDER, secs, e))
    }

    async fn search_raw(&self, query: &str) -> Result<OmdbSearchResponse, SourceError> {
        debug!(provider = PROVIDER, query, "Searching movies");
        self.get(&[("s", query), ("type", "movie")], self.search_timeout).await
    }
}

impl CapabilityRegistry for OmdbClient {
    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::MovieSearch, Capability::MovieDetails]
    }
}

#[async_trait]
impl MetadataProvider for OmdbClient {
    fn source_name(&self) -> &'static str {
        "omdb"
    }

    async fn search(&self, query: &str, content_type: ContentType) -> Result<Vec<SearchResult>, SourceError> {
        if content_type != ContentType::Movie {
            return Err(SourceError::Unsupported { provider: PROVIDER, operation: "tv search" });
        }

        let response = self.search_raw(query).await?;
        Ok(response.search.iter().map(api::to_search_result).collect())
    }

    async fn search_movie_page(&self, query: &str) -> Result<MovieSearchPage, SourceError> {
        let response = self.search_raw(query).await?;

        if !response.is_success() {
            return Ok(MovieSearchPage {
                hits: Vec::new(),
                total: 0,
                message: Some(response.error.unwrap_or_else(|| "No movies found".to_string())),
            });
        }

        let hits: Vec<_> = response.search.iter().map(api::to_search_hit).collect();
        let total = response
            .total_results
            .as_deref()
            .and_then(|t| t.parse::<u64>().ok())
            .unwrap_or(hits.len() as u64);

        Ok(MovieSearchPage { hits, total, message: None })
    }

    async fn movie_details(&self, id: &str) -> Result<MovieDetails, SourceError> {
        debug!(provider = PROVIDER, id, "Fetching movie details");
        let title: OmdbTitle = self.get(&[("i", id), ("plot", "full")], self.details_timeout).await?;

        if !title.is_success() {
            return Err(SourceError::NotFound(
                title.error.unwrap_or_else(|| "Movie not found in database".to_string()),
            ));
        }

        Ok(api::to_movie_details(title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn fake_omdb(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        if params.get("apikey").map(String::as_str) != Some("test-key") {
            return Json(json!({"Response": "False", "Error": "Invalid API key!"}));
        }
        if let Some(id) = params.get("i") {
            if id == "tt0111161" {
                return Json(json!({
                    "Title": "The Shawshank Redemption", "Year": "1994", "imdbID": "tt0111161",
                    "Poster": "https://example.com/p.jpg", "Ratings": [], "Response": "True"
                }));
            }
            return Json(json!({"Response": "False", "Error": "Incorrect IMDb ID."}));
        }
        match params.get("s").map(String::as_str) {
            Some("heat") => Json(json!({
                "Search": [{"Title": "Heat", "Year": "1995", "imdbID": "tt0113277", "Type": "movie", "Poster": "N/A"}],
                "totalResults": "42", "Response": "True"
            })),
            _ => Json(json!({"Response": "False", "Error": "Movie not found!"})),
        }
    }

    async fn spawn_fake() -> String {
        let app = Router::new().route("/", get(fake_omdb));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base_url: String) -> OmdbClient {
        let config = OmdbConfig { base_url, ..OmdbConfig::default() };
        OmdbClient::new("test-key".to_string(), &config)
    }

    #[tokio::test]
    async fn test_search_movies() {
        let client = client(spawn_fake().await);
        let results = client.search("heat", ContentType::Movie).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Heat");
        assert_eq!(results[0].poster, None);

        let page = client.search_movie_page("heat").await.unwrap();
        assert_eq!(page.total, 42);
        assert_eq!(page.hits[0].imdb_id, "tt0113277");

        let empty = client.search_movie_page("zzz").await.unwrap();
        assert!(empty.hits.is_empty());
        assert_eq!(empty.message.as_deref(), Some("Movie not found!"));
    }

    #[tokio::test]
    async fn test_movie_details() {
        let client = client(spawn_fake().await);
        let details = client.movie_details("tt0111161").await.unwrap();
        assert_eq!(details.title, "The Shawshank Redemption");

        let err = client.movie_details("tt0000000").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Incorrect IMDb ID.");
    }

    #[tokio::test]
    async fn test_tv_search_is_unsupported() {
        let client = client("http://127.0.0.1:9".to_string());
        assert!(!client.supports(Capability::TvSearch));
        assert!(client.search("x", ContentType::TvSeries).await.is_err());
    }
}
