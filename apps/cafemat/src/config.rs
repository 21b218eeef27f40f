//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CAFEMAT_CHANGE_STRATEGY=minimal_coins                              │
//! │     CAFEMAT_LOG_LEVEL=debug                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, else $CAFEMAT_CONFIG, else                          │
//! │     ~/.config/cafemat/cafemat.toml (Linux)                             │
//! │     ~/Library/Application Support/com.cafemat.cafemat/cafemat.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     greedy change, info logging, stock catalogue                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [machine]
//! name = "Lobby"
//! currency = "colones"
//! change_strategy = "greedy"   # greedy | minimal_coins
//!
//! [log]
//! level = "info"
//! ansi = false
//!
//! [seed.items.Latte]
//! price = 1350
//! stock = 10
//!
//! [[seed.coins]]
//! denomination = 500
//! count = 20
//! ```

use std::path::{Path, PathBuf};

use cafemat_core::{ChangeStrategyKind, ValidationError};
use cafemat_store::SeedData;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CAFEMAT_CONFIG";

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid seed data: {0}")]
    Seed(#[from] ValidationError),
}

// =============================================================================
// Sections
// =============================================================================

/// `[machine]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSettings {
    #[serde(default = "default_machine_name")]
    pub name: String,

    /// Currency word used in customer messages.
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub change_strategy: ChangeStrategyKind,
}

fn default_machine_name() -> String {
    "Cafemat".to_string()
}

fn default_currency() -> String {
    "colones".to_string()
}

impl Default for MachineSettings {
    fn default() -> Self {
        MachineSettings {
            name: default_machine_name(),
            currency: default_currency(),
            change_strategy: ChangeStrategyKind::default(),
        }
    }
}

/// `[log]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Default filter directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_ansi() -> bool {
    true
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            level: default_log_level(),
            ansi: default_ansi(),
        }
    }
}

/// Whole application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub machine: MachineSettings,

    #[serde(default)]
    pub log: LogSettings,

    #[serde(default)]
    pub seed: SeedData,
}

// =============================================================================
// Loading
// =============================================================================

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// An explicitly named file must exist; the platform default may not.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        let explicit = explicit.or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `CAFEMAT_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(strategy) = lookup("CAFEMAT_CHANGE_STRATEGY") {
            self.machine.change_strategy =
                strategy
                    .parse()
                    .map_err(|_: ValidationError| ConfigError::InvalidValue {
                        key: "CAFEMAT_CHANGE_STRATEGY".to_string(),
                        value: strategy.clone(),
                    })?;
            debug!(strategy = %self.machine.change_strategy, "Overriding change strategy from environment");
        }

        if let Some(level) = lookup("CAFEMAT_LOG_LEVEL") {
            debug!(level = %level, "Overriding log level from environment");
            self.log.level = level;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if EnvFilter::try_new(&self.log.level).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "log.level".to_string(),
                value: self.log.level.clone(),
            });
        }

        if self.machine.currency.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "machine.currency".to_string(),
                value: self.machine.currency.clone(),
            });
        }

        if self.seed.items.is_empty() {
            warn!("Seed catalogue is empty; every order will be rejected");
        }
        self.seed.validate()?;

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cafemat", "cafemat")
            .map(|dirs| dirs.config_dir().join("cafemat.toml"))
    }
}
