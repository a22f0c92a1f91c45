use async_trait::async_trait;
use datenight_config::TmdbConfig;
use datenight_models::{ContentType, SearchResult, TvDetails};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::capabilities::{Capability, CapabilityRegistry};
use crate::error::SourceError;
use crate::http::create_http_client;
use crate::tmdb::api::{self, TmdbMovie, TmdbPage, TmdbShow, TmdbShowDetails};
use crate::traits::MetadataProvider;

const PROVIDER: &str = "TMDb";
const TV_SEARCH_LIMIT: usize = 10;

/// TMDb client: TV search, TV details and popular listings
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
    search_timeout: Duration,
    details_timeout: Duration,
}

/// Strip the `tv_` prefix search results carry to get the bare TMDb id
pub fn bare_tv_id(id: &str) -> &str {
    id.strip_prefix("tv_").unwrap_or(id)
}

impl TmdbClient {
    pub fn new(api_key: String, config: &TmdbConfig) -> Self {
        Self {
            client: create_http_client(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.trim_end_matches('/').to_string(),
            search_timeout: Duration::from_secs(config.search_timeout_secs),
            details_timeout: Duration::from_secs(config.details_timeout_secs),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, path);
        let secs = timeout.as_secs();

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .header("Accept", "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(PROVIDER, secs, e))?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| SourceError::from_reqwest(PROVIDER, secs, e)),
            StatusCode::NOT_FOUND => Err(SourceError::NotFound(
                "TV series not found in TMDb database".to_string(),
            )),
            status => Err(SourceError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            }),
        }
    }
}

impl CapabilityRegistry for TmdbClient {
    fn capabilities(&self) -> &'static [Capability] {
        &[
            Capability::TvSearch,
            Capability::TvDetails,
            Capability::PopularMovies,
            Capability::PopularTv,
        ]
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    fn source_name(&self) -> &'static str {
        "tmdb"
    }

    async fn search(&self, query: &str, content_type: ContentType) -> Result<Vec<SearchResult>, SourceError> {
        if content_type != ContentType::TvSeries {
            return Err(SourceError::Unsupported { provider: PROVIDER, operation: "movie search" });
        }

        debug!(provider = PROVIDER, query, "Searching TV series");
        let page: TmdbPage<TmdbShow> = self
            .get("/search/tv", &[("query", query)], self.search_timeout)
            .await?;

        Ok(page
            .results
            .iter()
            .take(TV_SEARCH_LIMIT)
            .map(|show| api::show_to_result(show, &self.image_base_url, None))
            .collect())
    }

    async fn tv_details(&self, id: &str) -> Result<TvDetails, SourceError> {
        let tmdb_id = bare_tv_id(id);
        debug!(provider = PROVIDER, tmdb_id, "Fetching TV details");

        let path = format!("/tv/{}", urlencoding::encode(tmdb_id));
        let show: TmdbShowDetails = self
            .get(&path, &[("append_to_response", "credits")], self.details_timeout)
            .await?;

        Ok(api::to_tv_details(show, &self.image_base_url))
    }

    async fn popular(&self, content_type: ContentType, count: usize) -> Result<Vec<SearchResult>, SourceError> {
        debug!(provider = PROVIDER, %content_type, count, "Fetching popular listing");
        match content_type {
            ContentType::Movie => {
                let page: TmdbPage<TmdbMovie> = self
                    .get("/movie/popular", &[("page", "1")], self.search_timeout)
                    .await?;
                Ok(page
                    .results
                    .iter()
                    .take(count)
                    .map(|movie| api::movie_to_result(movie, &self.image_base_url))
                    .collect())
            }
            ContentType::TvSeries => {
                let page: TmdbPage<TmdbShow> = self
                    .get("/tv/popular", &[("page", "1")], self.search_timeout)
                    .await?;
                Ok(page
                    .results
                    .iter()
                    .take(count)
                    .map(|show| api::show_to_result(show, &self.image_base_url, Some("TV Series")))
                    .collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn popular_movies() -> Json<Value> {
        Json(json!({"results": [
            {"id": 1, "title": "One", "release_date": "2024-01-01", "vote_average": 7.26},
            {"id": 2, "title": "Two", "release_date": "2024-02-01"},
            {"id": 3, "title": "Three"}
        ]}))
    }

    async fn search_tv(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let results: Vec<Value> = (0..12)
            .map(|i| json!({"id": i, "name": format!("{} {}", params["query"], i)}))
            .collect();
        Json(json!({ "results": results }))
    }

    async fn tv_show(Path(id): Path<String>) -> Result<Json<Value>, AxumStatus> {
        if id == "1396" {
            Ok(Json(json!({"id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20"})))
        } else if id == "500" {
            Err(AxumStatus::INTERNAL_SERVER_ERROR)
        } else {
            Err(AxumStatus::NOT_FOUND)
        }
    }

    async fn spawn_fake() -> String {
        let app = Router::new()
            .route("/movie/popular", get(popular_movies))
            .route("/search/tv", get(search_tv))
            .route("/tv/{id}", get(tv_show));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base_url: String) -> TmdbClient {
        let config = TmdbConfig { base_url, ..TmdbConfig::default() };
        TmdbClient::new("test-key".to_string(), &config)
    }

    #[test]
    fn test_bare_tv_id() {
        assert_eq!(bare_tv_id("tv_1396"), "1396");
        assert_eq!(bare_tv_id("1396"), "1396");
    }

    #[tokio::test]
    async fn test_popular_respects_count() {
        let client = client(spawn_fake().await);
        let movies = client.popular(ContentType::Movie, 2).await.unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].rating.as_deref(), Some("7.3"));
        assert_eq!(movies[1].year, "2024");
    }

    #[tokio::test]
    async fn test_tv_search_caps_results() {
        let client = client(spawn_fake().await);
        let shows = client.search("office", ContentType::TvSeries).await.unwrap();
        assert_eq!(shows.len(), 10);
        assert_eq!(shows[0].id, "tv_0");
        assert_eq!(shows[0].title, "office 0");
    }

    #[tokio::test]
    async fn test_tv_details_errors() {
        let client = client(spawn_fake().await);
        let details = client.tv_details("tv_1396").await.unwrap();
        assert_eq!(details.tmdb_id, 1396);
        assert_eq!(details.year, "2008");

        assert!(client.tv_details("tv_1").await.unwrap_err().is_not_found());
        match client.tv_details("500").await.unwrap_err() {
            SourceError::Status { status, .. } => assert_eq!(status, 500),
            other => panic!("unexpected error: {other}"),
        }
    }
}
