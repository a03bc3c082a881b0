//! Provider factory: builds the configured metadata provider.

use cinestream_config::{ProviderConfig, ProviderKind};
use std::time::Duration;
use tracing::debug;
use crate::error::SourceError;
use crate::proxy::ProxyClient;
use crate::tmdb::TmdbClient;
use crate::traits::ContentProvider;

pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn ContentProvider>, SourceError> {
    let timeout = config.timeout_secs.map(Duration::from_secs);

    match config.kind {
        ProviderKind::Tmdb => {
            let api_key = config.effective_api_key().ok_or_else(|| {
                SourceError::NotConfigured(format!(
                    "TMDB API key missing (set provider.api_key or {})",
                    cinestream_config::TMDB_API_KEY_ENV
                ))
            })?;
            debug!("Creating TMDB provider at {}", config.base_url);
            Ok(Box::new(TmdbClient::with_options(api_key, config.base_url.clone(), timeout)?))
        }
        ProviderKind::Proxy => {
            debug!("Creating proxy provider at {}", config.base_url);
            Ok(Box::new(ProxyClient::new(config.base_url.clone(), timeout)?))
        }
    }
}
