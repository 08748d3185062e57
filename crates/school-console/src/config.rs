//! # Console Configuration
//!
//! Settings the console layer passes down into school-core calls.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SCHOOL_CURRENCY=USD                                                │
//! │     SCHOOL_LOG=debug                                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/school-console/console.toml (Linux)                      │
//! │     ~/Library/Application Support/com.school.console/console.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     currency = "EGP", filter = "info,school_core=debug"                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # console.toml
//! [display]
//! currency = "EGP"
//!
//! [logging]
//! filter = "info,school_core=debug"
//! ```

use std::path::PathBuf;

use school_core::DEFAULT_CURRENCY;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::{ConsoleError, ConsoleResult};

/// Env var overriding `display.currency`.
pub const ENV_CURRENCY: &str = "SCHOOL_CURRENCY";

/// Env var overriding `logging.filter`.
pub const ENV_LOG_FILTER: &str = "SCHOOL_LOG";

// =============================================================================
// Display Settings
// =============================================================================

/// How amounts are shown in tables and badges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Currency printed after fixed discount values.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            currency: default_currency(),
        }
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info,school_core=debug,school_console=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_filter(),
        }
    }
}

// =============================================================================
// Console Config
// =============================================================================

/// Complete console configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConsoleConfig {
    /// Parses a TOML document. Missing sections and keys take defaults.
    pub fn from_toml_str(contents: &str) -> ConsoleResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (console.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConsoleResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading console config from file");
                let contents = std::fs::read_to_string(&path).map_err(|e| {
                    ConsoleError::ConfigLoadFailed(format!("{}: {}", path.display(), e))
                })?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(std::env::vars());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load console config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Applies `SCHOOL_*` overrides from a set of environment variables.
    pub fn apply_overrides<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                ENV_CURRENCY => {
                    debug!(currency = %value, "Overriding currency from environment");
                    self.display.currency = value;
                }
                ENV_LOG_FILTER => {
                    debug!(filter = %value, "Overriding log filter from environment");
                    self.logging.filter = value;
                }
                _ => {}
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConsoleResult<()> {
        if self.display.currency.trim().is_empty() {
            return Err(ConsoleError::InvalidConfig(
                "display.currency must not be empty".into(),
            ));
        }

        EnvFilter::try_new(&self.logging.filter).map_err(|e| {
            ConsoleError::InvalidConfig(format!(
                "logging.filter '{}' is not a valid filter: {}",
                self.logging.filter, e
            ))
        })?;

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "school", "console")
            .map(|dirs| dirs.config_dir().join("console.toml"))
    }

    pub fn currency(&self) -> &str {
        &self.display.currency
    }
}
