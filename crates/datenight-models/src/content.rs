use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of content a session or search result refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Movie,
    TvSeries,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::TvSeries => "tv_series",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(ContentType::Movie),
            "tv_series" => Ok(ContentType::TvSeries),
            other => Err(ParseEnumError::new("content_type", other)),
        }
    }
}

/// `type` query parameter used by search and popular listings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentTypeFilter {
    #[default]
    All,
    Movie,
    TvSeries,
}

impl ContentTypeFilter {
    pub fn includes(&self, content_type: ContentType) -> bool {
        match self {
            ContentTypeFilter::All => true,
            ContentTypeFilter::Movie => content_type == ContentType::Movie,
            ContentTypeFilter::TvSeries => content_type == ContentType::TvSeries,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentTypeFilter::All => "all",
            ContentTypeFilter::Movie => "movie",
            ContentTypeFilter::TvSeries => "tv_series",
        }
    }
}

impl FromStr for ContentTypeFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ContentTypeFilter::All),
            "movie" => Ok(ContentTypeFilter::Movie),
            "tv_series" => Ok(ContentTypeFilter::TvSeries),
            other => Err(ParseEnumError::new("type", other)),
        }
    }
}

/// Returned when a wire string does not name a known enum variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid value for {}: {}", self.field, self.value)
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_wire_names() {
        assert_eq!(serde_json::to_string(&ContentType::TvSeries).unwrap(), "\"tv_series\"");
        assert_eq!("movie".parse::<ContentType>().unwrap(), ContentType::Movie);
        assert!("series".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_filter_includes() {
        assert!(ContentTypeFilter::All.includes(ContentType::TvSeries));
        assert!(ContentTypeFilter::Movie.includes(ContentType::Movie));
        assert!(!ContentTypeFilter::Movie.includes(ContentType::TvSeries));
        assert!(!ContentTypeFilter::TvSeries.includes(ContentType::Movie));
    }
}
