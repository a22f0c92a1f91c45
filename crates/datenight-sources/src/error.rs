use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{provider} request timed out after {secs}s")]
    Timeout { provider: &'static str, secs: u64 },

    #[error("{0}")]
    NotFound(String),

    #[error("{provider} API responded with status: {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("{provider} request failed: {message}")]
    Request { provider: &'static str, message: String },

    #[error("{provider} returned an unreadable response: {message}")]
    Decode { provider: &'static str, message: String },

    #[error("{0} provider is not configured")]
    NotConfigured(&'static str),

    #[error("{provider} does not support {operation}")]
    Unsupported { provider: &'static str, operation: &'static str },
}

impl SourceError {
    /// Classify a reqwest failure, keeping timeouts distinct from other transport errors
    pub fn from_reqwest(provider: &'static str, timeout_secs: u64, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout { provider, secs: timeout_secs }
        } else if err.is_decode() {
            SourceError::Decode { provider, message: err.to_string() }
        } else {
            SourceError::Request { provider, message: err.to_string() }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, SourceError::Timeout { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SourceError::Status { provider: "TMDb", status: 502 };
        assert_eq!(err.to_string(), "TMDb API responded with status: 502");
        assert!(SourceError::Timeout { provider: "OMDb", secs: 8 }.is_timeout());
        assert!(SourceError::NotFound("Movie not found!".to_string()).is_not_found());
        assert_eq!(SourceError::NotConfigured("tmdb").to_string(), "tmdb provider is not configured");
    }
}
