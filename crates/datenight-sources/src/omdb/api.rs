use datenight_models::{ContentType, MovieDetails, MovieSearchHit, SearchResult, SourceRating};
use serde::Deserialize;

/// OMDb uses "N/A" for every missing string field
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbSearchItem>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbSearchItem {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default)]
    pub item_type: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OmdbRating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct OmdbTitle {
    pub response: String,
    pub error: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    pub title: Option<String>,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub poster: Option<String>,
    #[serde(default)]
    pub ratings: Vec<OmdbRating>,
    pub metascore: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: Option<String>,
    #[serde(rename = "Type")]
    pub item_type: Option<String>,
    pub box_office: Option<String>,
    pub production: Option<String>,
    pub website: Option<String>,
}

impl OmdbSearchResponse {
    pub fn is_success(&self) -> bool {
        self.response == "True"
    }
}

impl OmdbTitle {
    pub fn is_success(&self) -> bool {
        self.response == "True"
    }
}

fn poster_url(poster: &str) -> Option<String> {
    if poster.is_empty() || poster == NOT_AVAILABLE {
        None
    } else {
        Some(poster.to_string())
    }
}

pub(crate) fn to_search_result(item: &OmdbSearchItem) -> SearchResult {
    SearchResult {
        id: item.imdb_id.clone(),
        title: item.title.clone(),
        year: item.year.clone(),
        poster: poster_url(&item.poster),
        content_type: ContentType::Movie,
        overview: None,
        genre: None,
        rating: None,
        imdb_id: Some(item.imdb_id.clone()),
        tmdb_id: None,
    }
}

pub(crate) fn to_search_hit(item: &OmdbSearchItem) -> MovieSearchHit {
    MovieSearchHit {
        title: item.title.clone(),
        year: item.year.clone(),
        poster: poster_url(&item.poster),
        imdb_id: item.imdb_id.clone(),
        kind: item.item_type.clone(),
        omdb_title: item.title.clone(),
        omdb_year: item.year.clone(),
        omdb_poster: item.poster.clone(),
    }
}

pub(crate) fn to_movie_details(title: OmdbTitle) -> MovieDetails {
    MovieDetails {
        imdb_id: title.imdb_id.unwrap_or_default(),
        title: title.title.unwrap_or_default(),
        year: title.year.unwrap_or_default(),
        rated: title.rated,
        released: title.released,
        runtime: title.runtime,
        genre: title.genre,
        director: title.director,
        writer: title.writer,
        actors: title.actors,
        plot: title.plot,
        language: title.language,
        country: title.country,
        awards: title.awards,
        poster: title.poster.as_deref().and_then(poster_url),
        ratings: title
            .ratings
            .into_iter()
            .map(|r| SourceRating { source: r.source, value: r.value })
            .collect(),
        metascore: title.metascore,
        imdb_rating: title.imdb_rating,
        imdb_votes: title.imdb_votes,
        kind: title.item_type,
        box_office: title.box_office,
        production: title.production,
        website: title.website,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_item_without_poster() {
        let json = r#"{"Search":[{"Title":"Heat","Year":"1995","imdbID":"tt0113277","Type":"movie","Poster":"N/A"}],"totalResults":"1","Response":"True"}"#;
        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_success());

        let result = to_search_result(&response.search[0]);
        assert_eq!(result.id, "tt0113277");
        assert_eq!(result.poster, None);
        assert_eq!(result.imdb_id.as_deref(), Some("tt0113277"));

        let hit = to_search_hit(&response.search[0]);
        assert_eq!(hit.poster, None);
        assert_eq!(hit.omdb_poster, "N/A");
        assert_eq!(hit.kind, "movie");
    }

    #[test]
    fn test_not_found_response() {
        let json = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert!(!response.is_success());
        assert!(response.search.is_empty());
        assert_eq!(response.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn test_title_to_details() {
        let json = r#"{
            "Title":"The Shawshank Redemption","Year":"1994","Rated":"R","Genre":"Drama",
            "Poster":"N/A","Ratings":[{"Source":"Internet Movie Database","Value":"9.3/10"}],
            "imdbRating":"9.3","imdbID":"tt0111161","Type":"movie","BoxOffice":"$28,767,189","Response":"True"
        }"#;
        let title: OmdbTitle = serde_json::from_str(json).unwrap();
        assert!(title.is_success());

        let details = to_movie_details(title);
        assert_eq!(details.imdb_id, "tt0111161");
        assert_eq!(details.poster, None);
        assert_eq!(details.ratings.len(), 1);
        assert_eq!(details.ratings[0].value, "9.3/10");
        assert_eq!(details.box_office.as_deref(), Some("$28,767,189"));
        assert_eq!(details.kind.as_deref(), Some("movie"));
    }
}
