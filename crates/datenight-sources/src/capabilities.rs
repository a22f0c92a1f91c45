/// Capability flags for metadata providers
///
/// Providers declare what they can answer so the catalog can route a request
/// without string-matching on provider names.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Free-text movie search
    MovieSearch,
    /// Free-text TV series search
    TvSearch,
    /// Movie lookup by IMDb id
    MovieDetails,
    /// TV series lookup by TMDb id
    TvDetails,
    /// Popular movie listing
    PopularMovies,
    /// Popular TV listing
    PopularTv,
}

/// Registry pattern for capability lookup on trait objects
pub trait CapabilityRegistry: Send + Sync {
    /// All capabilities this provider supports
    fn capabilities(&self) -> &'static [Capability];

    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}
