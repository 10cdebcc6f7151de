//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - CoinGecko: trending and markets API client
//! - Logo: HTTP image loader with optional relay prefix
//! - CLI: Command-line interface handlers

pub mod coingecko;
pub mod logo;
pub mod cli;

pub use coingecko::CoinGeckoClient;
pub use logo::ProxiedImageLoader;
pub use cli::CliApp;
