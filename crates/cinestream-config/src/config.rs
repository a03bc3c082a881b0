use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const TMDB_API_KEY_ENV: &str = "CINESTREAM_TMDB_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Talk to TMDB v3 directly
    Tmdb,
    /// Talk to a proxy that speaks `?type=popular|tv` / `?query=`
    Proxy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_kind")]
    pub kind: ProviderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_popular_limit")]
    pub popular_limit: usize,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_movie_template")]
    pub movie_template: String,
    #[serde(default = "default_series_template")]
    pub series_template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lists_dir: Option<PathBuf>,
}

fn default_provider_kind() -> ProviderKind {
    ProviderKind::Tmdb
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_popular_limit() -> usize {
    12
}

fn default_search_limit() -> usize {
    24
}

fn default_movie_template() -> String {
    "https://vidsrc.me/embed/movie?tmdb={id}".to_string()
}

fn default_series_template() -> String {
    "https://vidsrc.me/embed/tv?tmdb={id}".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_provider_kind(),
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            popular_limit: default_popular_limit(),
            search_limit: default_search_limit(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            movie_template: default_movie_template(),
            series_template: default_series_template(),
        }
    }
}

impl ProviderConfig {
    /// API key from the environment if set, otherwise from the config file
    pub fn effective_api_key(&self) -> Option<String> {
        std::env::var(TMDB_API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults
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
        if self.content.popular_limit == 0 {
            return Err(anyhow::anyhow!("content.popular_limit must be greater than zero"));
        }
        if self.content.search_limit == 0 {
            return Err(anyhow::anyhow!("content.search_limit must be greater than zero"));
        }

        for (name, template) in [
            ("movie_template", &self.playback.movie_template),
            ("series_template", &self.playback.series_template),
        ] {
            if !template.contains("{id}") {
                return Err(anyhow::anyhow!("playback.{} must contain an {{id}} placeholder", name));
            }
        }

        if self.provider.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("provider.base_url is required"));
        }

        match self.provider.kind {
            ProviderKind::Tmdb => {
                if self.provider.effective_api_key().is_none() {
                    return Err(anyhow::anyhow!(
                        "provider.api_key is required for the tmdb provider (or set {})",
                        TMDB_API_KEY_ENV
                    ));
                }
            }
            ProviderKind::Proxy => {}
        }

        if self.provider.timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("provider.timeout_secs must be greater than zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn proxy_config() -> Config {
        Config {
            provider: ProviderConfig {
                kind: ProviderKind::Proxy,
                api_key: None,
                base_url: "http://localhost:3000/api/tmdb".to_string(),
                timeout_secs: Some(10),
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = proxy_config();
        config.content.search_limit = 30;
        config.storage.lists_dir = Some(PathBuf::from("/tmp/lists"));

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.provider.kind, ProviderKind::Proxy);
        assert_eq!(loaded.provider.base_url, "http://localhost:3000/api/tmdb");
        assert_eq!(loaded.provider.timeout_secs, Some(10));
        assert_eq!(loaded.content.search_limit, 30);
        assert_eq!(loaded.content.popular_limit, 12);
        assert_eq!(loaded.storage.lists_dir, Some(PathBuf::from("/tmp/lists")));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[content]\nsearch_limit = 10\n").unwrap();
        assert_eq!(config.content.search_limit, 10);
        assert_eq!(config.content.popular_limit, 12);
        assert_eq!(config.provider.kind, ProviderKind::Tmdb);
        assert_eq!(config.playback.movie_template, "https://vidsrc.me/embed/movie?tmdb={id}");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.content.search_limit, 24);
    }

    #[test]
    fn test_config_validate() {
        let mut config = proxy_config();
        assert!(config.validate().is_ok());

        config.content.search_limit = 0;
        assert!(config.validate().is_err());
        config.content.search_limit = 24;

        config.playback.series_template = "https://vidsrc.me/embed/tv".to_string();
        assert!(config.validate().is_err());
        config.playback.series_template = default_series_template();

        config.provider.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tmdb_config_with_key_is_valid() {
        let mut config = Config::default();
        config.provider.api_key = Some("abc123".to_string());
        assert!(config.validate().is_ok());
        assert!(config.provider.effective_api_key().is_some());
    }
}
