pub mod config;
pub mod paths;

pub use config::{Config, ContentConfig, PlaybackConfig, ProviderConfig, ProviderKind, StorageConfig, TMDB_API_KEY_ENV};
pub use paths::{PathManager, home_override};
