//! Trending Token Model
//!
//! View model for one trending coin joined with its market data record.
//! Market fields are all optional: an absent value means "unknown" and must
//! never be rendered as zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A coin as listed by the trending endpoint, before the market join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingCoin {
    /// Provider identifier (e.g. "bitcoin")
    pub id: String,
    pub name: String,
    /// Ticker symbol as sent upstream (usually lowercase)
    pub symbol: String,
    /// Market-cap rank; upstream sends null for unranked coins
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    /// Thumbnail image URL
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub price_btc: Option<f64>,
}

/// 7-day price series, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sparkline {
    #[serde(default)]
    pub price: Vec<f64>,
}

/// Market data attached to a trending token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenMarketData {
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub sparkline_in_7d: Option<Sparkline>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
}

impl TokenMarketData {
    /// The 7-day series, empty when the record carried none
    pub fn sparkline(&self) -> &[f64] {
        self.sparkline_in_7d
            .as_ref()
            .map(|s| s.price.as_slice())
            .unwrap_or(&[])
    }

    /// True when no market record matched the coin
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A market record returned by the markets endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub id: String,
    #[serde(flatten)]
    pub data: TokenMarketData,
}

/// Trending coin merged with its market data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingToken {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    pub thumb: String,
    pub price_btc: Option<f64>,
    pub data: TokenMarketData,
}

impl TrendingToken {
    pub fn new(coin: TrendingCoin, data: TokenMarketData) -> Self {
        Self {
            id: coin.id,
            name: coin.name,
            symbol: coin.symbol,
            market_cap_rank: coin.market_cap_rank,
            thumb: coin.thumb,
            price_btc: coin.price_btc,
            data,
        }
    }

    /// External profile page, `<site>/en/coins/<id>`
    pub fn profile_url(&self, site_url: &str) -> String {
        format!("{}/en/coins/{}", site_url.trim_end_matches('/'), self.id)
    }

    /// Match by exact id or case-insensitive symbol
    pub fn matches(&self, query: &str) -> bool {
        self.id == query || self.symbol.eq_ignore_ascii_case(query)
    }
}

/// Join trending coins with market records by id.
///
/// Keeps the order (and any duplicates) of `coins`. A coin with no matching
/// record gets an empty `TokenMarketData`; this never fails.
pub fn merge(coins: Vec<TrendingCoin>, records: &[MarketRecord]) -> Vec<TrendingToken> {
    coins
        .into_iter()
        .map(|coin| {
            let data = records
                .iter()
                .find(|r| r.id == coin.id)
                .map(|r| r.data.clone())
                .unwrap_or_default();
            TrendingToken::new(coin, data)
        })
        .collect()
}

/// The token list held in memory for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub tokens: Vec<TrendingToken>,
}

impl TrendingSnapshot {
    pub fn new(tokens: Vec<TrendingToken>) -> Self {
        Self { fetched_at: Utc::now(), tokens }
    }

    /// First token whose id or symbol matches `query`
    pub fn find(&self, query: &str) -> Option<&TrendingToken> {
        self.tokens
            .iter()
            .find(|t| t.id == query)
            .or_else(|| self.tokens.iter().find(|t| t.matches(query)))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
