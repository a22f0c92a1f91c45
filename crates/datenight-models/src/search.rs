use serde::{Deserialize, Serialize};

use crate::content::ContentType;

/// Normalized search / popular-list entry, independent of the provider it came from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<String>,
}

impl SearchResult {
    /// Case-insensitive match on title, or substring match on year
    pub fn matches_query(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase()) || self.year.contains(query)
    }
}

/// Movie search hit in the shape of the legacy movie search endpoint.
///
/// Carries both lowercase and OMDb-cased fields so older clients keep working.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSearchHit {
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "Title")]
    pub omdb_title: String,
    #[serde(rename = "Year")]
    pub omdb_year: String,
    #[serde(rename = "Poster")]
    pub omdb_poster: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_query() {
        let result = SearchResult {
            id: "tt0111161".to_string(),
            title: "The Shawshank Redemption".to_string(),
            year: "1994".to_string(),
            poster: None,
            content_type: ContentType::Movie,
            overview: None,
            genre: None,
            rating: None,
            imdb_id: None,
            tmdb_id: None,
        };
        assert!(result.matches_query("shawshank"));
        assert!(result.matches_query("199"));
        assert!(!result.matches_query("godfather"));
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("poster").is_none());
        assert_eq!(json["content_type"], "movie");
    }
}
