pub mod fetcher;
pub mod dashboard;

pub use fetcher::TokenFetcher;
pub use dashboard::TrendingDashboard;
