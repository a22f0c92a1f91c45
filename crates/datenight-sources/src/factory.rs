/// Provider factory pattern for creating metadata providers from configuration
///
/// Each factory knows how to build one provider from the config file plus the
/// resolved API key. A provider without a key is skipped, and the catalog falls
/// back to sample data for whatever it would have answered.

use anyhow::Result;
use datenight_config::{Config, CredentialStore};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::MetadataProvider;

/// Factory trait for creating metadata providers from configuration
pub trait ProviderFactory: Send + Sync {
    /// The name of the provider this factory creates
    fn source_name(&self) -> &'static str;

    /// Create a provider instance.
    /// Returns None if the provider is disabled or has no API key.
    fn create_provider(
        &self,
        config: &Config,
        credentials: &CredentialStore,
    ) -> Result<Option<Arc<dyn MetadataProvider>>>;

    /// Validate that the provider configuration is usable
    fn validate_config(&self, config: &Config) -> Result<()>;
}

/// Registry of provider factories
pub struct ProviderFactoryRegistry {
    factories: BTreeMap<&'static str, Box<dyn ProviderFactory>>,
}

impl ProviderFactoryRegistry {
    /// Create a new registry with the built-in factories registered
    pub fn new() -> Self {
        let mut registry = Self {
            factories: BTreeMap::new(),
        };

        registry.register(Box::new(omdb::OmdbProviderFactory));
        registry.register(Box::new(tmdb::TmdbProviderFactory));

        registry
    }

    pub fn register(&mut self, factory: Box<dyn ProviderFactory>) {
        self.factories.insert(factory.source_name(), factory);
    }

    /// Create every enabled and configured provider
    pub fn create_all_providers(
        &self,
        config: &Config,
        credentials: &CredentialStore,
    ) -> Result<Vec<Arc<dyn MetadataProvider>>> {
        let mut providers = Vec::new();

        for factory in self.factories.values() {
            factory.validate_config(config)?;
            if let Some(provider) = factory.create_provider(config, credentials)? {
                info!(provider = factory.source_name(), "Metadata provider enabled");
                providers.push(provider);
            }
        }

        Ok(providers)
    }

    pub fn create_provider_by_name(
        &self,
        name: &str,
        config: &Config,
        credentials: &CredentialStore,
    ) -> Result<Option<Arc<dyn MetadataProvider>>> {
        match self.factories.get(name) {
            Some(factory) => factory.create_provider(config, credentials),
            None => Ok(None),
        }
    }

    pub fn registered_providers(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for ProviderFactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn check_base_url(provider: &str, base_url: &str) -> Result<()> {
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(anyhow::anyhow!(
            "{} base_url must be an http(s) URL, got '{}'",
            provider,
            base_url
        ));
    }
    Ok(())
}

mod omdb {
    use super::*;
    use crate::omdb::OmdbClient;

    pub struct OmdbProviderFactory;

    impl ProviderFactory for OmdbProviderFactory {
        fn source_name(&self) -> &'static str {
            "omdb"
        }

        fn create_provider(
            &self,
            config: &Config,
            credentials: &CredentialStore,
        ) -> Result<Option<Arc<dyn MetadataProvider>>> {
            let omdb_config = &config.providers.omdb;
            if !omdb_config.enabled {
                return Ok(None);
            }

            match credentials.resolve_omdb_api_key() {
                Some(key) => Ok(Some(Arc::new(OmdbClient::new(key, omdb_config)))),
                None => {
                    warn!("OMDb API key not configured; movie lookups will use sample data. Set OMDB_API_KEY or run 'datenight config api-key --provider omdb'");
                    Ok(None)
                }
            }
        }

        fn validate_config(&self, config: &Config) -> Result<()> {
            let omdb_config = &config.providers.omdb;
            if omdb_config.enabled {
                check_base_url("OMDb", &omdb_config.base_url)?;
            }
            Ok(())
        }
    }
}

mod tmdb {
    use super::*;
    use crate::tmdb::TmdbClient;

    pub struct TmdbProviderFactory;

    impl ProviderFactory for TmdbProviderFactory {
        fn source_name(&self) -> &'static str {
            "tmdb"
        }

        fn create_provider(
            &self,
            config: &Config,
            credentials: &CredentialStore,
        ) -> Result<Option<Arc<dyn MetadataProvider>>> {
            let tmdb_config = &config.providers.tmdb;
            if !tmdb_config.enabled {
                return Ok(None);
            }

            match credentials.resolve_tmdb_api_key() {
                Some(key) => Ok(Some(Arc::new(TmdbClient::new(key, tmdb_config)))),
                None => {
                    warn!("TMDb API key not configured; TV lookups will use sample data. Set TMDB_API_KEY or run 'datenight config api-key --provider tmdb'");
                    Ok(None)
                }
            }
        }

        fn validate_config(&self, config: &Config) -> Result<()> {
            let tmdb_config = &config.providers.tmdb;
            if tmdb_config.enabled {
                check_base_url("TMDb", &tmdb_config.base_url)?;
                check_base_url("TMDb", &tmdb_config.image_base_url)?;
            }
            Ok(())
        }
    }
}
