use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub participants: ParticipantsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OmdbConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,
    #[serde(default = "default_details_timeout_secs")]
    pub details_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_tmdb_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,
    #[serde(default = "default_details_timeout_secs")]
    pub details_timeout_secs: u64,
}

/// Who a new watch session is logged for when the request names nobody
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ParticipantsConfig {
    #[serde(default = "default_participants")]
    pub default_users: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Persist the in-memory stores to JSON on shutdown and reload them on startup
    #[serde(default)]
    pub snapshot: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    pub file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_omdb_base_url() -> String {
    "http://www.omdbapi.com".to_string()
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_search_timeout_secs() -> u64 {
    8
}

fn default_details_timeout_secs() -> u64 {
    10
}

fn default_participants() -> Vec<String> {
    vec!["user1".to_string(), "user2".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_url: default_omdb_base_url(),
            search_timeout_secs: default_search_timeout_secs(),
            details_timeout_secs: default_details_timeout_secs(),
        }
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_url: default_tmdb_base_url(),
            image_base_url: default_tmdb_image_base_url(),
            search_timeout_secs: default_search_timeout_secs(),
            details_timeout_secs: default_details_timeout_secs(),
        }
    }
}

impl Default for ParticipantsConfig {
    fn default() -> Self {
        Self {
            default_users: default_participants(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("server.port must be non-zero"));
        }

        let omdb = &self.providers.omdb;
        if omdb.search_timeout_secs == 0 || omdb.details_timeout_secs == 0 {
            return Err(anyhow::anyhow!("providers.omdb timeouts must be at least 1 second"));
        }
        let tmdb = &self.providers.tmdb;
        if tmdb.search_timeout_secs == 0 || tmdb.details_timeout_secs == 0 {
            return Err(anyhow::anyhow!("providers.tmdb timeouts must be at least 1 second"));
        }

        if self.participants.default_users.is_empty() {
            return Err(anyhow::anyhow!("participants.default_users cannot be empty"));
        }
        if self.participants.default_users.iter().any(|u| u.trim().is_empty()) {
            return Err(anyhow::anyhow!("participants.default_users cannot contain blank user ids"));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.server.port = 8080;
        config.storage.snapshot = true;
        config.participants.default_users = vec!["alex".to_string(), "sam".to_string()];

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.server.port, 8080);
        assert!(loaded.storage.snapshot);
        assert_eq!(loaded.participants.default_users, vec!["alex", "sam"]);
        assert_eq!(loaded.providers.omdb.search_timeout_secs, 8);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[server]\nport = 4000\n").unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.providers.tmdb.details_timeout_secs, 10);
        assert_eq!(config.providers.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.participants.default_users, vec!["user1", "user2"]);
        assert!(!config.storage.snapshot);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.participants.default_users.clear();
        assert!(config.validate().is_err());

        config = Config::default();
        config.providers.omdb.details_timeout_secs = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }
}
