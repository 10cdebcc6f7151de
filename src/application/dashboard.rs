//! Trending Dashboard
//!
//! Owns the session's view state. The token list is loaded once; a failed
//! load is terminal and there is no retry.

use crate::domain::{TrendingSnapshot, TrendingToken, ViewState};
use crate::ports::market_data::TrendingSource;
use super::fetcher::TokenFetcher;

pub struct TrendingDashboard<S> {
    fetcher: TokenFetcher<S>,
    state: ViewState,
    site_url: String,
}

impl<S: TrendingSource> TrendingDashboard<S> {
    pub fn new(source: S, site_url: impl Into<String>) -> Self {
        Self {
            fetcher: TokenFetcher::new(source),
            state: ViewState::Idle,
            site_url: site_url.into(),
        }
    }

    /// Fetch the token list. Only the first call does any work; later calls
    /// return the state reached by the first one.
    pub async fn load(&mut self) -> &ViewState {
        if !self.state.begin_loading() {
            tracing::debug!("Dashboard already {}, ignoring load", self.state.name());
            return &self.state;
        }

        tracing::info!("Loading trending tokens...");
        match self.fetcher.fetch_snapshot().await {
            Ok(snapshot) => {
                tracing::info!("Loaded {} trending tokens", snapshot.len());
                self.state.finish(snapshot);
            }
            Err(e) => {
                tracing::error!("Error fetching trending tokens: {}", e);
                self.state.fail(&e);
            }
        }
        &self.state
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&TrendingSnapshot> {
        self.state.snapshot()
    }

    /// Loaded tokens, empty unless the state is `Ready`
    pub fn tokens(&self) -> &[TrendingToken] {
        self.snapshot().map(|s| s.tokens.as_slice()).unwrap_or(&[])
    }

    /// Token by id, or by case-insensitive symbol
    pub fn find(&self, query: &str) -> Option<&TrendingToken> {
        self.snapshot().and_then(|s| s.find(query))
    }

    /// Resolve queries to tokens; the second list holds queries with no match
    pub fn select<'a>(&self, queries: &'a [String]) -> (Vec<&TrendingToken>, Vec<&'a str>) {
        let mut found = Vec::new();
        let mut missing = Vec::new();
        for query in queries {
            match self.find(query) {
                Some(token) => found.push(token),
                None => missing.push(query.as_str()),
            }
        }
        (found, missing)
    }

    pub fn profile_url(&self, token: &TrendingToken) -> String {
        token.profile_url(&self.site_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketRecord, TokenMarketData, TrendingCoin};
    use crate::ports::market_data::FetchError;
    use crate::ports::mocks::{MockTrendingSource, SourceCall};

    fn coin(id: &str, symbol: &str) -> TrendingCoin {
        TrendingCoin {
            id: id.to_string(),
            name: id.to_string(),
            symbol: symbol.to_string(),
            market_cap_rank: Some(1),
            thumb: String::new(),
            price_btc: None,
        }
    }

    fn dashboard(source: MockTrendingSource) -> TrendingDashboard<MockTrendingSource> {
        TrendingDashboard::new(source, "https://www.coingecko.com")
    }

    #[tokio::test]
    async fn test_load_reaches_ready() {
        let source = MockTrendingSource::new()
            .with_coins(vec![coin("bitcoin", "btc")])
            .with_records(vec![MarketRecord {
                id: "bitcoin".into(),
                data: TokenMarketData { current_price: Some(1.0), ..Default::default() },
            }]);
        let mut dash = dashboard(source);
        assert_eq!(dash.state().name(), "idle");

        let state = dash.load().await;
        assert_eq!(state.name(), "ready");
        assert_eq!(dash.tokens().len(), 1);
        assert_eq!(
            dash.profile_url(&dash.tokens()[0]),
            "https://www.coingecko.com/en/coins/bitcoin"
        );
    }

    #[tokio::test]
    async fn test_trending_failure_reaches_error_and_stays() {
        let source = MockTrendingSource::new()
            .failing_trending(FetchError::TrendingUnavailable { status: 503 });
        let mut dash = dashboard(source);

        dash.load().await;
        let message = dash.state().error().unwrap().to_string();
        assert!(message.starts_with("Error fetching data:"));
        assert_eq!(message, "Error fetching data: Failed to fetch trending tokens");
        assert!(dash.snapshot().is_none());
        assert!(dash.tokens().is_empty());

        // no retry
        dash.load().await;
        assert_eq!(dash.state().name(), "error");
    }

    #[tokio::test]
    async fn test_load_fetches_once() {
        let source = MockTrendingSource::new().with_coins(vec![coin("a", "a")]);
        let mut dash = dashboard(source.clone());

        dash.load().await;
        dash.load().await;

        let trending_calls = source
            .get_calls()
            .into_iter()
            .filter(|c| *c == SourceCall::Trending)
            .count();
        assert_eq!(trending_calls, 1);
    }

    #[tokio::test]
    async fn test_select_splits_found_and_missing() {
        let source = MockTrendingSource::new()
            .with_coins(vec![coin("bitcoin", "btc"), coin("pepe", "pepe")]);
        let mut dash = dashboard(source);
        dash.load().await;

        let queries = vec!["BTC".to_string(), "nope".to_string(), "pepe".to_string()];
        let (found, missing) = dash.select(&queries);
        let ids: Vec<_> = found.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "pepe"]);
        assert_eq!(missing, vec!["nope"]);
    }
}
