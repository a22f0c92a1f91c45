use datenight_models::{ContentType, SearchResult, TvDetails};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbMovie {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbShow {
    pub id: u64,
    pub name: String,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbNamed {
    pub name: String,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbNamed>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbShowDetails {
    pub id: u64,
    pub name: String,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbNamed>,
    #[serde(default)]
    pub created_by: Vec<TmdbNamed>,
    #[serde(default)]
    pub credits: TmdbCredits,
    pub overview: Option<String>,
    pub original_language: Option<String>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    pub status: Option<String>,
    #[serde(default)]
    pub networks: Vec<TmdbNamed>,
    pub last_air_date: Option<String>,
    pub homepage: Option<String>,
}

/// Year part of a TMDb `YYYY-MM-DD` date, empty when absent
fn year_of(date: Option<&str>) -> String {
    date.and_then(|d| d.split('-').next())
        .unwrap_or_default()
        .to_string()
}

/// One-decimal score, omitted when TMDb reports no votes (0.0)
fn score(vote_average: Option<f64>) -> Option<String> {
    vote_average.filter(|v| *v != 0.0).map(|v| format!("{:.1}", v))
}

fn image_url(image_base_url: &str, size: &str, path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}/{}{}", image_base_url, size, p))
}

fn join_names(names: &[TmdbNamed]) -> String {
    names.iter().map(|n| n.name.as_str()).collect::<Vec<_>>().join(", ")
}

pub(crate) fn movie_to_result(movie: &TmdbMovie, image_base_url: &str) -> SearchResult {
    SearchResult {
        id: movie.id.to_string(),
        title: movie.title.clone(),
        year: year_of(movie.release_date.as_deref()),
        poster: image_url(image_base_url, "w500", movie.poster_path.as_deref()),
        content_type: ContentType::Movie,
        overview: movie.overview.clone(),
        genre: Some("Movie".to_string()),
        rating: score(movie.vote_average),
        imdb_id: None,
        tmdb_id: Some(movie.id.to_string()),
    }
}

pub(crate) fn show_to_result(show: &TmdbShow, image_base_url: &str, genre: Option<&str>) -> SearchResult {
    SearchResult {
        id: format!("tv_{}", show.id),
        title: show.name.clone(),
        year: year_of(show.first_air_date.as_deref()),
        poster: image_url(image_base_url, "w500", show.poster_path.as_deref()),
        content_type: ContentType::TvSeries,
        overview: show.overview.clone(),
        genre: genre.map(str::to_string),
        rating: score(show.vote_average),
        imdb_id: None,
        tmdb_id: Some(show.id.to_string()),
    }
}

pub(crate) fn to_tv_details(show: TmdbShowDetails, image_base_url: &str) -> TvDetails {
    let overview = show.overview.unwrap_or_default();
    TvDetails {
        tmdb_id: show.id,
        title: show.name,
        year: year_of(show.first_air_date.as_deref()),
        rated: String::new(),
        released: show.first_air_date,
        runtime: show
            .episode_run_time
            .first()
            .map(|m| format!("{} min/episode", m))
            .unwrap_or_default(),
        genre: join_names(&show.genres),
        director: String::new(),
        creator: join_names(&show.created_by),
        actors: show
            .credits
            .cast
            .iter()
            .take(5)
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        plot: overview.clone(),
        overview,
        language: show.original_language.unwrap_or_default().to_uppercase(),
        country: show.origin_country.join(", "),
        awards: String::new(),
        poster: image_url(image_base_url, "w500", show.poster_path.as_deref()),
        backdrop: image_url(image_base_url, "w1280", show.backdrop_path.as_deref()),
        ratings: Vec::new(),
        tmdb_rating: score(show.vote_average).unwrap_or_default(),
        tmdb_votes: show.vote_count.unwrap_or(0),
        kind: "series".to_string(),
        number_of_seasons: show.number_of_seasons.unwrap_or(0),
        number_of_episodes: show.number_of_episodes.unwrap_or(0),
        status: show.status.unwrap_or_default(),
        networks: join_names(&show.networks),
        last_air_date: show.last_air_date.unwrap_or_default(),
        homepage: show.homepage.unwrap_or_default(),
    }
}
