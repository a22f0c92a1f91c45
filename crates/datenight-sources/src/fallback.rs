//! Static sample catalog served when providers are unreachable or unconfigured.

use datenight_models::{ContentType, ContentTypeFilter, MovieSearchHit, SearchResult};

struct CatalogEntry {
    id: &'static str,
    title: &'static str,
    year: &'static str,
    poster: &'static str,
    content_type: ContentType,
    overview: &'static str,
    rating: &'static str,
    genre: &'static str,
    imdb_id: Option<&'static str>,
    tmdb_id: Option<&'static str>,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "tt0111161",
        title: "The Shawshank Redemption",
        year: "1994",
        poster: "https://m.media-amazon.com/images/M/MV5BNDE3ODcxYzMtY2YzZC00NmNlLWJiNDMtZDViZWM2MzIxZDYwXkEyXkFqcGdeQXVyNjAwNDUxODI@._V1_SX300.jpg",
        content_type: ContentType::Movie,
        overview: "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.",
        rating: "9.3",
        genre: "Drama",
        imdb_id: Some("tt0111161"),
        tmdb_id: None,
    },
    CatalogEntry {
        id: "tv_1396",
        title: "Breaking Bad",
        year: "2008",
        poster: "https://image.tmdb.org/t/p/w500/3xnWaLQjelJDDF7LT1WBo6f4BRe.jpg",
        content_type: ContentType::TvSeries,
        overview: "A high school chemistry teacher diagnosed with inoperable lung cancer turns to manufacturing and selling methamphetamine.",
        rating: "9.5",
        genre: "Crime, Drama, Thriller",
        imdb_id: None,
        tmdb_id: Some("1396"),
    },
    CatalogEntry {
        id: "tv_66732",
        title: "Stranger Things",
        year: "2016",
        poster: "https://image.tmdb.org/t/p/w500/x2LSRK2Cm7MZhjluni1msVJ3wDF.jpg",
        content_type: ContentType::TvSeries,
        overview: "When a young boy disappears, his mother, a police chief and his friends must confront terrifying supernatural forces.",
        rating: "8.7",
        genre: "Drama, Fantasy, Horror",
        imdb_id: None,
        tmdb_id: Some("66732"),
    },
    CatalogEntry {
        id: "tt0068646",
        title: "The Godfather",
        year: "1972",
        poster: "https://m.media-amazon.com/images/M/MV5BM2MyNjYxNmUtYTAwNi00MTYxLWJmNWYtYzZlODY3ZTk3OTFlXkEyXkFqcGdeQXVyNzUwNzE@._V1_SX300.jpg",
        content_type: ContentType::Movie,
        overview: "The aging patriarch of an organized crime dynasty transfers control of his empire to his reluctant son.",
        rating: "9.2",
        genre: "Crime, Drama",
        imdb_id: Some("tt0068646"),
        tmdb_id: None,
    },
    CatalogEntry {
        id: "tv_1399",
        title: "Game of Thrones",
        year: "2011",
        poster: "https://image.tmdb.org/t/p/w500/1XS1oqL89opfnbLl8WnZY1O1uJx.jpg",
        content_type: ContentType::TvSeries,
        overview: "Seven noble families fight for control of the mythical land of Westeros.",
        rating: "9.3",
        genre: "Drama, Fantasy, Adventure",
        imdb_id: None,
        tmdb_id: Some("1399"),
    },
];

impl CatalogEntry {
    fn to_result(&self) -> SearchResult {
        SearchResult {
            id: self.id.to_string(),
            title: self.title.to_string(),
            year: self.year.to_string(),
            poster: Some(self.poster.to_string()),
            content_type: self.content_type,
            overview: Some(self.overview.to_string()),
            genre: Some(self.genre.to_string()),
            rating: Some(self.rating.to_string()),
            imdb_id: self.imdb_id.map(str::to_string),
            tmdb_id: self.tmdb_id.map(str::to_string),
        }
    }
}

/// Every catalog entry
pub fn catalog() -> Vec<SearchResult> {
    CATALOG.iter().map(CatalogEntry::to_result).collect()
}

/// Entries whose title or year contains `query` and whose kind passes `filter`
pub fn search(query: &str, filter: ContentTypeFilter) -> Vec<SearchResult> {
    catalog()
        .into_iter()
        .filter(|item| item.matches_query(query) && filter.includes(item.content_type))
        .collect()
}

/// TV entries whose title contains `query`, standing in for TV search without a TMDb key
pub fn search_tv_titles(query: &str) -> Vec<SearchResult> {
    let needle = query.to_lowercase();
    catalog()
        .into_iter()
        .filter(|item| item.content_type == ContentType::TvSeries && item.title.to_lowercase().contains(&needle))
        .collect()
}

/// First `limit` entries of the requested kind
pub fn popular(filter: ContentTypeFilter, limit: usize) -> Vec<SearchResult> {
    catalog()
        .into_iter()
        .filter(|item| filter.includes(item.content_type))
        .take(limit)
        .collect()
}

/// Movie entries in the legacy movie-search shape
pub fn movie_hits(query: &str) -> Vec<MovieSearchHit> {
    search(query, ContentTypeFilter::Movie)
        .into_iter()
        .map(|item| {
            let poster = item.poster.clone().unwrap_or_default();
            MovieSearchHit {
                title: item.title.clone(),
                year: item.year.clone(),
                poster: item.poster,
                imdb_id: item.id,
                kind: "movie".to_string(),
                omdb_title: item.title,
                omdb_year: item.year,
                omdb_poster: poster,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_by_title_and_year() {
        let hits = search("breaking", ContentTypeFilter::All);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "tv_1396");

        let by_year = search("197", ContentTypeFilter::All);
        assert_eq!(by_year.len(), 1);
        assert_eq!(by_year[0].title, "The Godfather");

        assert!(search("breaking", ContentTypeFilter::Movie).is_empty());
    }

    #[test]
    fn test_search_tv_titles_ignores_year() {
        assert!(search_tv_titles("2016").is_empty());
        assert_eq!(search_tv_titles("THINGS")[0].id, "tv_66732");
    }

    #[test]
    fn test_popular_filters_and_limits() {
        let tv = popular(ContentTypeFilter::TvSeries, 50);
        assert_eq!(tv.len(), 3);
        assert!(tv.iter().all(|i| i.content_type == ContentType::TvSeries));
        assert_eq!(popular(ContentTypeFilter::All, 2).len(), 2);
    }

    #[test]
    fn test_movie_hits_shape() {
        let hits = movie_hits("the");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.kind == "movie"));
        assert!(hits.iter().all(|h| h.imdb_id.starts_with("tt")));
    }
}
