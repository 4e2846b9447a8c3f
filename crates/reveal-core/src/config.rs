//! Configuration types.
//!
//! Configuration lives in `config.toml` under the Reveal config directory.
//! Every section is optional; missing values take their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Runtime configuration loaded from config.toml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Screen layout settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// External editor settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Credential storage settings
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Log settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Screen layout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Width lists are truncated to and text is wrapped at.
    pub max_width: usize,

    /// Number of body lines shown when previewing a page.
    pub preview_lines: usize,

    /// Clear the screen before each new screen is drawn.
    pub clear_screen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_width: 80,
            preview_lines: 20,
            clear_screen: true,
        }
    }
}

/// External editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Editor command. Falls back to VISUAL, then EDITOR, then a platform default.
    pub command: Option<String>,
}

/// Credential storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Directory holding connections.toml and secrets.toml.
    pub directory: Option<PathBuf>,
}

/// Log configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&content)
    }

    /// Load configuration from the default location.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load(&path)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.display.max_width < 20 {
            return Err(ConfigError::Invalid {
                key: "display.max_width".to_string(),
                message: "must be at least 20".to_string(),
            });
        }
        Ok(())
    }

    /// Directory holding the credential files.
    pub fn credentials_dir(&self) -> Option<PathBuf> {
        self.credentials.directory.clone().or_else(config_dir)
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("reveal"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}
