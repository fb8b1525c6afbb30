//! Configuration management for Publico.
//!
//! Configuration is read from `~/.config/publico/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;

pub use colors::ColorConfig;

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::normalizer::DEFAULT_DATE_FORMAT;

pub const DEFAULT_BASE_URL: &str = "https://www.publico.pt/api";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub colors: ColorConfig,
}

/// Where and how the provider's API is reached.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            user_agent: concat!("publico/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Tags shown per article.
    pub max_tags: usize,
    /// chrono strftime format for publication dates.
    pub date_format: String,
    /// Quiet period before a selection triggers a detail fetch.
    pub detail_debounce_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_tags: 6,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            detail_debounce_ms: 150,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: config_path,
                source,
            },
            other => other,
        })
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.api.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.api.base_url.clone(),
            source: e,
        })?;

        let format_ok = StrftimeItems::new(&self.display.date_format)
            .all(|item| !matches!(item, Item::Error));
        if !format_ok {
            return Err(ConfigError::InvalidDateFormat(self.display.date_format.clone()));
        }
        Ok(())
    }

    /// Get the default config file path: `~/.config/publico/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("publico").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Publico Configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"

[api]
base_url = "https://www.publico.pt/api"
timeout_secs = 10

[display]
# Tags shown per article
max_tags = 6

# Publication date format (chrono strftime syntax)
date_format = "%d/%m/%Y %H:%M"

# Wait this long after the selection settles before loading article details
detail_debounce_ms = 150

[colors]
active_border = "Cyan"
inactive_border = "DarkGray"
selection_bg = "Cyan"
selection_fg = "Black"
metadata_author = "Yellow"
metadata_date = "Yellow"
metadata_link = "Blue"
status_fg = "White"
status_bg = "DarkGray"
icon_globe = "#1E90FF"

# Tag colors, cycled by tag position
tags = ["#B22222", "#4B0082", "#006400", "#8B4513", "#4682B4", "#800080", "#FF8C00", "#2F4F4F"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid API base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),
}
