use serde::{Deserialize, Serialize};

/// Third-party score attached to movie details (e.g. Rotten Tomatoes)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceRating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Full movie record as served by the movie-details endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    pub poster: Option<String>,
    pub ratings: Vec<SourceRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metascore: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_votes: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// TV series record in the same general shape as `MovieDetails`.
///
/// Fields TMDb has no equivalent for (rated, director, awards) are empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TvDetails {
    #[serde(rename = "tmdbID")]
    pub tmdb_id: u64,
    pub title: String,
    pub year: String,
    pub rated: String,
    pub released: Option<String>,
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub creator: String,
    pub actors: String,
    pub plot: String,
    pub overview: String,
    pub language: String,
    pub country: String,
    pub awards: String,
    pub poster: Option<String>,
    pub backdrop: Option<String>,
    pub ratings: Vec<SourceRating>,
    pub tmdb_rating: String,
    pub tmdb_votes: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub number_of_seasons: u32,
    pub number_of_episodes: u32,
    pub status: String,
    pub networks: String,
    pub last_air_date: String,
    pub homepage: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_wire_names() {
        let movie = MovieDetails {
            imdb_id: "tt0111161".to_string(),
            imdb_rating: Some("9.3".to_string()),
            box_office: Some("$28,767,189".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["imdbID"], "tt0111161");
        assert_eq!(json["imdbRating"], "9.3");
        assert_eq!(json["boxOffice"], "$28,767,189");
        assert!(json["poster"].is_null());

        let series = TvDetails {
            tmdb_id: 1396,
            number_of_seasons: 5,
            kind: "series".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["tmdbID"], 1396);
        assert_eq!(json["numberOfSeasons"], 5);
        assert_eq!(json["type"], "series");
    }
}
