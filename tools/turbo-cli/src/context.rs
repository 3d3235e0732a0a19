//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::debug;
use turbo_data::CatalogClient;
use turbo_state::{JsonFileStorage, Store};

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["turbo.toml", ".turbo.toml", "turbo.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the config was read from, or will be written to.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Favorites file.
    pub favorites_path: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        favorites_override: Option<PathBuf>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) if Path::new(path).exists() => {
                (CliConfig::load(path)?, Some(PathBuf::from(path)))
            }
            Some(path) => {
                debug!(path, "config file not found, using defaults");
                (CliConfig::default(), Some(PathBuf::from(path)))
            }
            // Try to find config in current directory or parent directories
            None => match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };
        config.apply_env();

        let favorites_path = match favorites_override {
            Some(path) => resolve(&cwd, &path),
            None => match &config.storage.favorites_path {
                Some(path) => resolve(&cwd, Path::new(path)),
                None => data_dir().join("turbo").join("favorites.json"),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            favorites_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// HTTP client for the configured catalog API.
    pub fn client(&self) -> Result<CatalogClient> {
        CatalogClient::new(self.config.client_config())
            .with_context(|| format!("Invalid API base URL: {}", self.config.api.base_url))
    }

    /// A store with favorites loaded from the favorites file.
    pub fn store(&self) -> Store {
        Store::new().with_storage(JsonFileStorage::new(&self.favorites_path))
    }
}

fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("XDG_DATA_HOME").filter(|d| !d.is_empty()) {
        PathBuf::from(dir)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
