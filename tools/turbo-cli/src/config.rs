//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use turbo_catalog::format::Currency;
use turbo_data::{ClientConfig, RetryPolicy, DEFAULT_BASE_URL};

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "TURBO_API_URL";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().to_string();
            }
        }
    }

    /// Client settings derived from the `[api]` section.
    pub fn client_config(&self) -> ClientConfig {
        let retry = if self.api.max_retries == 0 {
            RetryPolicy::none()
        } else {
            RetryPolicy::new(self.api.max_retries)
        };
        ClientConfig::new(&self.api.base_url)
            .with_timeout(Duration::from_millis(self.api.timeout_ms))
            .with_retry(retry)
            .with_user_agent(format!("turbo-cli/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Display currency, falling back to USD for unknown codes.
    pub fn currency(&self) -> Currency {
        Currency::from_code(&self.display.currency).unwrap_or_default()
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}

/// Catalog API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after a transient failure.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    1
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

/// Local storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Favorites file; defaults to the user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorites_path: Option<String>,
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a typed search term is applied.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// ISO currency code for prices.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Maximum characters of a product description.
    #[serde(default = "default_description_width")]
    pub description_width: usize,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_description_width() -> usize {
    160
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            description_width: default_description_width(),
        }
    }
}

/// Generate a default turbo.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Turbo catalog browser configuration

[api]
base_url = "{base_url}"
timeout_ms = {timeout_ms}
max_retries = {max_retries}

[storage]
# favorites_path = "~/.local/share/turbo/favorites.json"

[search]
debounce_ms = {debounce_ms}

[display]
currency = "{currency}"
description_width = {description_width}
"#,
        base_url = default_base_url(),
        timeout_ms = default_timeout_ms(),
        max_retries = default_max_retries(),
        debounce_ms = default_debounce_ms(),
        currency = default_currency(),
        description_width = default_description_width(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.currency(), Currency::USD);
        assert!(config.storage.favorites_path.is_none());
    }

    #[test]
    fn test_partial_config() {
        let config: CliConfig = toml::from_str(
            r#"
[api]
timeout_ms = 2000
max_retries = 0

[display]
currency = "EUR"
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.currency(), Currency::EUR);
        assert_eq!(config.display.description_width, 160);

        let client = config.client_config();
        assert_eq!(client.timeout, Duration::from_millis(2000));
        assert_eq!(client.retry.max_attempts, 0);
    }

    #[test]
    fn test_unknown_currency_falls_back() {
        let mut config = CliConfig::default();
        config.display.currency = "XYZ".into();
        assert_eq!(config.currency(), Currency::USD);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turbo.json");
        let path = path.to_str().unwrap();

        let mut config = CliConfig::default();
        config.search.debounce_ms = 150;
        config.save(path).unwrap();

        let loaded = CliConfig::load(path).unwrap();
        assert_eq!(loaded.search.debounce_ms, 150);
    }
}
