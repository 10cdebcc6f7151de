//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    Config, ConfigError, ApiSection, ExportSection, DisplaySection,
    load_config, load_or_default, DEFAULT_CONFIG_PATH, MAX_COLUMNS,
};
