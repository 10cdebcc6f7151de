//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Trending coins and market data (CoinGecko)
//! - Remote image loading for export logos

pub mod market_data;
pub mod image_loader;
pub mod mocks;

pub use market_data::{FetchError, TrendingSource};
pub use image_loader::{ImageLoadError, ImageLoader};
