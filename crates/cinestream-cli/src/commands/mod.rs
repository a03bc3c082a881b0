pub mod config;
pub mod content;
pub mod list;
pub mod metadata;
pub mod play;

use cinestream_config::{Config, PathManager};
use cinestream_core::{ContentPipeline, FileStorage, ListStore, PipelineOptions};
use cinestream_sources::create_provider;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Loaded configuration plus the directory layout every command works against
pub struct AppContext {
    pub config: Config,
    pub paths: PathManager,
    pub config_file: PathBuf,
}

impl AppContext {
    /// `creating` is set by `config init`, whose target file need not exist yet
    pub fn load(config_override: Option<PathBuf>, creating: bool) -> Result<Self> {
        let paths = PathManager::default();
        let (config, config_file) = resolve_config(config_override, paths.config_file(), creating)?;
        debug!("Using config {}", config_file.display());

        Ok(Self {
            config,
            paths,
            config_file,
        })
    }

    pub fn lists_dir(&self) -> PathBuf {
        self.config
            .storage
            .lists_dir
            .clone()
            .unwrap_or_else(|| self.paths.lists_dir())
    }

    pub fn list_store(&self) -> ListStore<FileStorage> {
        ListStore::open(self.lists_dir())
    }

    pub fn pipeline(&self) -> Result<ContentPipeline> {
        self.config
            .validate()
            .map_err(|e| eyre!("Invalid configuration in {}: {}", self.config_file.display(), e))?;
        let provider = create_provider(&self.config.provider).wrap_err("Failed to create content provider")?;
        Ok(ContentPipeline::new(
            Arc::from(provider),
            PipelineOptions::from(&self.config.content),
        ))
    }

    /// `dir` if given, otherwise the exports directory, created if missing
    pub fn output_dir(&self, dir: Option<PathBuf>) -> Result<PathBuf> {
        let dir = dir.unwrap_or_else(|| self.paths.exports_dir());
        std::fs::create_dir_all(&dir).wrap_err_with(|| format!("Failed to create {}", dir.display()))?;
        Ok(dir)
    }
}

/// An explicit config path must exist unless it is about to be created.
/// Otherwise only the default location falls back to defaults.
fn resolve_config(
    config_override: Option<PathBuf>,
    default_file: PathBuf,
    creating: bool,
) -> Result<(Config, PathBuf)> {
    let config = match &config_override {
        Some(path) if creating => Config::load_or_default(path),
        Some(path) => {
            if !path.exists() {
                return Err(eyre!("Config file not found: {}", path.display()));
            }
            Config::load_from_file(path)
        }
        None => Config::load_or_default(&default_file),
    };
    let config_file = config_override.unwrap_or(default_file);
    let config = config.map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    Ok((config, config_file))
}
