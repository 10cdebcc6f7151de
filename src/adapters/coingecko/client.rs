//! CoinGecko API Client
//!
//! Public, unauthenticated v3 endpoints. One request per call, no retries:
//! any non-2xx status, transport failure or undecodable body is returned to
//! the caller as a `FetchError`.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;

use crate::domain::{MarketRecord, TrendingCoin};
use crate::ports::market_data::{FetchError, TrendingSource};
use super::types::{MarketsQuery, TrendingResponse};

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko client configuration
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    config: CoinGeckoConfig,
    http: Client,
}

impl CoinGeckoClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(CoinGeckoConfig::default())
    }

    pub fn with_config(mut config: CoinGeckoConfig) -> Result<Self, FetchError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Point the client at another server (mirrors, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

#[async_trait]
impl TrendingSource for CoinGeckoClient {
    async fn trending_coins(&self) -> Result<Vec<TrendingCoin>, FetchError> {
        let url = self.url("/search/trending");
        tracing::debug!("GET {}", url);

        let response = self.http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Trending request failed with HTTP {}", status);
            return Err(FetchError::TrendingUnavailable { status: status.as_u16() });
        }

        let body: TrendingResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(format!("Invalid trending response: {}", e)))?;

        let coins = body.into_coins();
        tracing::info!("Fetched {} trending coins", coins.len());
        Ok(coins)
    }

    async fn market_records(&self, ids: &[String]) -> Result<Vec<MarketRecord>, FetchError> {
        let url = self.url("/coins/markets");
        let query = MarketsQuery::for_ids(ids);
        tracing::debug!("GET {} ids={}", url, query.ids);

        let response = self.http
            .get(&url)
            .query(&query.to_pairs())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Markets request failed with HTTP {}", status);
            return Err(FetchError::PricesUnavailable { status: status.as_u16() });
        }

        let records: Vec<MarketRecord> = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(format!("Invalid markets response: {}", e)))?;

        tracing::info!("Fetched market data for {}/{} coins", records.len(), ids.len());
        Ok(records)
    }
}
