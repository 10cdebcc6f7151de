//! trendcards - CoinGecko trending tokens as cards and share images
//!
//! Fetches the trending coin list, joins it with market data and the 7-day
//! sparkline, and renders each token as a terminal card or a PNG image.
//!
//! # Modules
//!
//! - `domain`: Core types and presentation rules (TrendingToken, format, sparkline, ViewState)
//! - `ports`: Trait abstractions (TrendingSource, ImageLoader)
//! - `adapters`: External implementations (CoinGecko, logo loader, CLI)
//! - `render`: Terminal cards and the PNG exporter
//! - `config`: Configuration loading and validation
//! - `application`: Token fetcher and dashboard state machine

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod render;
pub mod config;
pub mod application;
