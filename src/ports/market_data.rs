use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{MarketRecord, TrendingCoin};

/// Failure of either upstream call. Any variant aborts the whole fetch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Failed to fetch trending tokens")]
    TrendingUnavailable { status: u16 },

    #[error("Failed to fetch token prices")]
    PricesUnavailable { status: u16 },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Parse(String),
}

impl FetchError {
    /// Upstream HTTP status, if the failure was a non-2xx response
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::TrendingUnavailable { status } | FetchError::PricesUnavailable { status } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Source of trending coins and their market data
#[async_trait]
pub trait TrendingSource: Send + Sync {
    /// Trending coins, in the order the provider ranks them
    async fn trending_coins(&self) -> Result<Vec<TrendingCoin>, FetchError>;

    /// USD market records (with 7-day sparkline and 24h change) for `ids`
    async fn market_records(&self, ids: &[String]) -> Result<Vec<MarketRecord>, FetchError>;
}
