//! CoinGecko Adapter
//!
//! Implements `TrendingSource` against the public CoinGecko v3 API:
//! - `GET /search/trending` for the trending coin list
//! - `GET /coins/markets` for USD prices, 24h change and 7-day sparklines
//!
//! # Example
//!
//! ```rust,ignore
//! use trendcards::adapters::coingecko::CoinGeckoClient;
//! use trendcards::ports::TrendingSource;
//!
//! let client = CoinGeckoClient::new()?;
//! let coins = client.trending_coins().await?;
//! ```

mod client;
mod types;

pub use client::{CoinGeckoClient, CoinGeckoConfig, DEFAULT_API_URL};
pub use types::{MarketsQuery, TrendingResponse};
