//! Token Fetcher
//!
//! Trending list first, then market data for exactly those ids, then the
//! by-id merge. The second request depends on the first and only starts
//! once it has completed. Any failure aborts the whole fetch.

use crate::domain::{merge, TrendingSnapshot, TrendingToken};
use crate::ports::market_data::{FetchError, TrendingSource};

pub struct TokenFetcher<S> {
    source: S,
}

impl<S: TrendingSource> TokenFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Merged tokens in trending order
    pub async fn fetch(&self) -> Result<Vec<TrendingToken>, FetchError> {
        let coins = self.source.trending_coins().await?;
        let ids: Vec<String> = coins.iter().map(|c| c.id.clone()).collect();

        if ids.is_empty() {
            tracing::info!("Trending list is empty, skipping market data request");
            return Ok(Vec::new());
        }

        let records = self.source.market_records(&ids).await?;
        let tokens = merge(coins, &records);

        let unmatched = tokens.iter().filter(|t| t.data.is_empty()).count();
        if unmatched > 0 {
            tracing::debug!("{} trending coins have no market data", unmatched);
        }

        Ok(tokens)
    }

    /// `fetch` stamped with the current time
    pub async fn fetch_snapshot(&self) -> Result<TrendingSnapshot, FetchError> {
        self.fetch().await.map(TrendingSnapshot::new)
    }
}
