//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults (this file)                                               │
//! │  2. Config file                                                        │
//! │     --config <path>, else the platform config dir:                     │
//! │     ~/.config/cake-quote/cake-quote.toml (Linux)                       │
//! │     ~/Library/Application Support/com.cakequote.cake-quote/... (macOS) │
//! │  3. Environment variables (`CAKE_*`)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Config File
//! ```toml
//! business_name = "Sweet Layers"
//! currency_symbol = "$"
//! share_base_url = "https://sweetlayers.example/quote"
//! store_path = "/home/me/.local/share/cake-quote/store.json"
//! ```
//!
//! Read-only after startup, so no lock.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use cake_core::Money;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "cakequote";
const APPLICATION: &str = "cake-quote";

const CONFIG_FILE: &str = "cake-quote.toml";
const STORE_FILE: &str = "store.json";

/// Errors loading or saving the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config directory available on this platform")]
    NoConfigDir,
}

// =============================================================================
// AppConfig (the file)
// =============================================================================

/// Settings read from `cake-quote.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the key-value store file lives.
    pub store_path: PathBuf,

    /// Page the share link points at; the selection replaces its query.
    pub share_base_url: String,

    /// Symbol in front of amounts in text output.
    pub currency_symbol: String,

    /// Shown in the quote header.
    pub business_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store_path: default_store_path(),
            share_base_url: "http://localhost:8080/".to_string(),
            currency_symbol: "$".to_string(),
            business_name: "Cake Quote".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// file at the default location just means defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::read(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::read(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Writes this configuration as TOML.
    pub fn save(&self, config_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => default_config_path().ok_or(ConfigError::NoConfigDir)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store_path must not be empty".into()));
        }

        let base = url::Url::parse(&self.share_base_url).map_err(|e| {
            ConfigError::Invalid(format!(
                "share_base_url '{}' is not a URL: {}",
                self.share_base_url, e
            ))
        })?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::Invalid(format!(
                "share_base_url '{}' cannot carry a query",
                self.share_base_url
            )));
        }

        if self.currency_symbol.chars().count() > 4 {
            return Err(ConfigError::Invalid(
                "currency_symbol must be at most 4 characters".into(),
            ));
        }

        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("CAKE_STORE_PATH") {
            debug!(path = %path, "Overriding store path from environment");
            self.store_path = PathBuf::from(path);
        }

        if let Ok(url) = std::env::var("CAKE_SHARE_BASE_URL") {
            debug!(url = %url, "Overriding share base URL from environment");
            self.share_base_url = url;
        }

        if let Ok(symbol) = std::env::var("CAKE_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }
    }
}

/// Returns the default config file path.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Platform data dir, or the working directory when there is none.
fn default_store_path() -> PathBuf {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.data_dir().join(STORE_FILE))
        .unwrap_or_else(|| PathBuf::from(STORE_FILE))
}

// =============================================================================
// ConfigState
// =============================================================================

/// Configuration as the commands see it.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigState {
    #[serde(flatten)]
    pub config: AppConfig,

    /// File the config came from; `None` when running on defaults.
    pub loaded_from: Option<PathBuf>,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState::new(AppConfig::default(), None)
    }
}

impl ConfigState {
    pub fn new(config: AppConfig, loaded_from: Option<PathBuf>) -> Self {
        ConfigState {
            config,
            loaded_from,
        }
    }

    /// Resolves and loads the config the way the CLI does.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let loaded_from = config_path
            .map(Path::to_path_buf)
            .or_else(|| default_config_path().filter(|p| p.exists()));
        let config = AppConfig::load(config_path)?;
        Ok(ConfigState::new(config, loaded_from))
    }

    /// Formats a money amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust
    /// use cake_core::Money;
    /// use cake_quote::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_money(Money::from_cents(5700)), "$57.00");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.config.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_format_money() {
        let mut config = ConfigState::default();
        assert_eq!(config.format_money(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_money(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_money(Money::zero()), "$0.00");

        config.config.currency_symbol = "€".to_string();
        assert_eq!(config.format_money(Money::from_cents(-550)), "-€5.50");
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cake-quote.toml");
        std::fs::write(
            &path,
            r#"
business_name = "Sweet Layers"
share_base_url = "https://sweetlayers.example/quote"
"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.business_name, "Sweet Layers");
        assert_eq!(config.share_base_url, "https://sweetlayers.example/quote");
        // Unset keys keep their defaults
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));
        assert!(ConfigState::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = AppConfig {
            share_base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = AppConfig {
            share_base_url: "mailto:orders@cakes.example".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            store_path: PathBuf::new(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf").join("cake-quote.toml");

        let config = AppConfig {
            business_name: "Crumb & Co".to_string(),
            store_path: dir.path().join("store.json"),
            ..AppConfig::default()
        };
        assert_eq!(config.save(Some(&path)).unwrap(), path);

        let contents = std::fs::read_to_string(&path).unwrap();
        let back: AppConfig = toml::from_str(&contents).unwrap();
        assert_eq!(back, config);
    }
}
