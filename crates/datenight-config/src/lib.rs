pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, LoggingConfig, OmdbConfig, ParticipantsConfig, ProvidersConfig, ServerConfig, StorageConfig, TmdbConfig};
pub use credentials::CredentialStore;
pub use paths::{PathManager, container_base_path};
