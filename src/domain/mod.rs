//! Domain Layer - Core types and presentation rules for trendcards
//!
//! Pure logic with no I/O. Network access and rendering go through the
//! ports and render layers.
//!
//! - `token`: trending token model and the by-id merge
//! - `format`: price, change, glyph and color rules shared by both renderers
//! - `sparkline`: chart normalization
//! - `view_state`: idle/loading/ready/error lifecycle

pub mod token;
pub mod format;
pub mod sparkline;
pub mod view_state;

pub use token::{merge, MarketRecord, Sparkline, TokenMarketData, TrendingCoin, TrendingSnapshot, TrendingToken};
pub use format::{
    export_filename, format_change, format_day_label, format_locale_number, format_price,
    format_rank, format_tooltip_price, format_usd_amount, palette, Color, Trend,
};
pub use sparkline::{project, resample, ChartBand, PriceRange};
pub use view_state::{ViewState, FETCH_ERROR_PREFIX};
