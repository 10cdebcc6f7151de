//! CoinGecko wire types
//!
//! Only the fields the view model needs are declared; everything else in
//! the payloads is ignored.

use serde::Deserialize;

use crate::domain::TrendingCoin;

/// `GET /search/trending`
#[derive(Debug, Clone, Deserialize)]
pub struct TrendingResponse {
    #[serde(default)]
    pub coins: Vec<TrendingEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingEntry {
    pub item: TrendingCoin,
}

impl TrendingResponse {
    pub fn into_coins(self) -> Vec<TrendingCoin> {
        self.coins.into_iter().map(|entry| entry.item).collect()
    }
}

/// Query for `GET /coins/markets`
#[derive(Debug, Clone, PartialEq)]
pub struct MarketsQuery {
    pub vs_currency: &'static str,
    pub ids: String,
    pub order: &'static str,
    pub per_page: u32,
    pub page: u32,
    pub sparkline: bool,
    pub price_change_percentage: &'static str,
}

impl MarketsQuery {
    pub fn for_ids(ids: &[String]) -> Self {
        Self {
            vs_currency: "usd",
            ids: ids.join(","),
            order: "market_cap_desc",
            per_page: 100,
            page: 1,
            sparkline: true,
            price_change_percentage: "24h",
        }
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", self.vs_currency.to_string()),
            ("ids", self.ids.clone()),
            ("order", self.order.to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
            ("sparkline", self.sparkline.to_string()),
            ("price_change_percentage", self.price_change_percentage.to_string()),
        ]
    }
}
