//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching trendcards.toml.
//! Every section has defaults, so the file itself is optional.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::adapters::coingecko::DEFAULT_API_URL;
use crate::domain::format::DEFAULT_CAPTION;
use crate::render::card::{DEFAULT_CARD_WIDTH, DEFAULT_COLUMNS, MIN_CARD_WIDTH};

/// Looked up when no `--config` is given; absence is not an error
pub const DEFAULT_CONFIG_PATH: &str = "config/trendcards.toml";

pub const DEFAULT_SITE_URL: &str = "https://www.coingecko.com";

pub const MAX_COLUMNS: usize = 6;

/// Main configuration structure matching trendcards.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub export: ExportSection,
    #[serde(default)]
    pub display: DisplaySection,
}

/// CoinGecko API configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// REST API base URL
    pub base_url: String,
    /// Website used for `View on CoinGecko` links
    pub site_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiSection {
    /// Get API base URL with environment variable override
    /// Checks COINGECKO_API_URL env var first, falls back to config value
    pub fn get_base_url(&self) -> String {
        override_or(std::env::var("COINGECKO_API_URL").ok(), &self.base_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Image export configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Directory receiving `<symbol>_info.png` files (`~` expanded)
    pub output_dir: String,
    /// Regular TrueType face; system fonts are tried when unset
    pub font_path: Option<String>,
    /// Bold TrueType face
    pub bold_font_path: Option<String>,
    /// Italic face for the caption
    pub italic_font_path: Option<String>,
    /// URL prefix prepended to logo URLs, empty for direct requests
    pub image_proxy: String,
    /// Logo download timeout in seconds
    pub logo_timeout_secs: u64,
    /// Attribution line at the bottom of the image
    pub caption: String,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            font_path: None,
            bold_font_path: None,
            italic_font_path: None,
            image_proxy: String::new(),
            logo_timeout_secs: 10,
            caption: DEFAULT_CAPTION.to_string(),
        }
    }
}

impl ExportSection {
    pub fn output_dir(&self) -> PathBuf {
        expand_path(&self.output_dir)
    }

    /// Get regular font path with environment variable override
    /// Checks TRENDCARDS_FONT env var first, falls back to config value
    pub fn get_font_path(&self) -> Option<PathBuf> {
        std::env::var("TRENDCARDS_FONT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.font_path.clone())
            .map(|p| expand_path(&p))
    }

    pub fn get_bold_font_path(&self) -> Option<PathBuf> {
        self.bold_font_path.as_deref().map(expand_path)
    }

    pub fn get_italic_font_path(&self) -> Option<PathBuf> {
        self.italic_font_path.as_deref().map(expand_path)
    }

    /// Get image proxy with environment variable override
    /// Checks TRENDCARDS_IMAGE_PROXY env var first, falls back to config value
    pub fn get_image_proxy(&self) -> String {
        override_or(std::env::var("TRENDCARDS_IMAGE_PROXY").ok(), &self.image_proxy)
    }

    pub fn logo_timeout(&self) -> Duration {
        Duration::from_secs(self.logo_timeout_secs)
    }
}

/// Terminal display configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Cards per grid row
    pub columns: usize,
    /// Card width in terminal columns
    pub card_width: usize,
    /// Use ANSI colors
    pub color: bool,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            card_width: DEFAULT_CARD_WIDTH,
            color: true,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

fn override_or(env_value: Option<String>, fallback: &str) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load `path` when given (it must exist), otherwise the default path if
/// present, otherwise built-in defaults
pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = path {
        let expanded = expand_path(&path.to_string_lossy());
        tracing::debug!("Loading config from {}", expanded.display());
        return load_config(expanded);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        tracing::debug!("Loading config from {}", DEFAULT_CONFIG_PATH);
        return load_config(default_path);
    }

    tracing::debug!("No config file, using defaults");
    Ok(Config::default())
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate api section
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "base_url cannot be empty".to_string(),
            ));
        }

        if self.api.site_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "site_url cannot be empty".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be > 0, got 0".to_string(),
            ));
        }

        // Validate export section
        if self.export.output_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "output_dir cannot be empty".to_string(),
            ));
        }

        if self.export.logo_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "logo_timeout_secs must be > 0, got 0".to_string(),
            ));
        }

        // Validate display section
        if self.display.columns == 0 || self.display.columns > MAX_COLUMNS {
            return Err(ConfigError::ValidationError(format!(
                "columns must be 1-{}, got {}",
                MAX_COLUMNS, self.display.columns
            )));
        }

        if self.display.card_width < MIN_CARD_WIDTH {
            return Err(ConfigError::ValidationError(format!(
                "card_width must be >= {}, got {}",
                MIN_CARD_WIDTH, self.display.card_width
            )));
        }

        Ok(())
    }
}
