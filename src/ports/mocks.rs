use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use image::{DynamicImage, Rgba, RgbaImage};

use crate::domain::{MarketRecord, TrendingCoin};
use super::image_loader::{ImageLoadError, ImageLoader};
use super::market_data::{FetchError, TrendingSource};

/// Calls seen by `MockTrendingSource`
#[derive(Debug, Clone, PartialEq)]
pub enum SourceCall {
    Trending,
    Markets(Vec<String>),
}

/// Trending source with canned responses that records every call
#[derive(Debug, Default, Clone)]
pub struct MockTrendingSource {
    coins: Arc<Mutex<Option<Result<Vec<TrendingCoin>, FetchError>>>>,
    records: Arc<Mutex<Option<Result<Vec<MarketRecord>, FetchError>>>>,
    calls: Arc<Mutex<Vec<SourceCall>>>,
}

impl MockTrendingSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the trending list
    pub fn with_coins(self, coins: Vec<TrendingCoin>) -> Self {
        *self.coins.lock().unwrap() = Some(Ok(coins));
        self
    }

    /// Builder method to set the market records
    pub fn with_records(self, records: Vec<MarketRecord>) -> Self {
        *self.records.lock().unwrap() = Some(Ok(records));
        self
    }

    /// Make the trending call fail
    pub fn failing_trending(self, error: FetchError) -> Self {
        *self.coins.lock().unwrap() = Some(Err(error));
        self
    }

    /// Make the markets call fail
    pub fn failing_markets(self, error: FetchError) -> Self {
        *self.records.lock().unwrap() = Some(Err(error));
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<SourceCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrendingSource for MockTrendingSource {
    async fn trending_coins(&self) -> Result<Vec<TrendingCoin>, FetchError> {
        self.calls.lock().unwrap().push(SourceCall::Trending);
        self.coins
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn market_records(&self, ids: &[String]) -> Result<Vec<MarketRecord>, FetchError> {
        self.calls.lock().unwrap().push(SourceCall::Markets(ids.to_vec()));
        self.records
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Image loader that returns a solid square, or always fails
#[derive(Debug, Clone)]
pub struct StaticImageLoader {
    image: Option<DynamicImage>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl StaticImageLoader {
    /// Always succeeds with a `size`×`size` image of `color`
    pub fn solid(size: u32, color: [u8; 4]) -> Self {
        Self {
            image: Some(DynamicImage::ImageRgba8(RgbaImage::from_pixel(size, size, Rgba(color)))),
            requested: Arc::default(),
        }
    }

    /// Always fails, like an unreachable image proxy
    pub fn unavailable() -> Self {
        Self { image: None, requested: Arc::default() }
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageLoader for StaticImageLoader {
    async fn load_image_cross_origin(&self, url: &str) -> Result<DynamicImage, ImageLoadError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.image
            .clone()
            .ok_or_else(|| ImageLoadError::Transport("proxy unavailable".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source_records_calls() {
        let mock = MockTrendingSource::new();

        assert_eq!(mock.trending_coins().await, Ok(vec![]));
        let ids = vec!["a".to_string(), "b".to_string()];
        assert_eq!(mock.market_records(&ids).await, Ok(vec![]));
        assert_eq!(
            mock.get_calls(),
            vec![SourceCall::Trending, SourceCall::Markets(ids)]
        );
    }

    #[tokio::test]
    async fn test_mock_source_failure() {
        let mock = MockTrendingSource::new()
            .failing_trending(FetchError::TrendingUnavailable { status: 503 });

        let result = mock.trending_coins().await;
        assert_eq!(result, Err(FetchError::TrendingUnavailable { status: 503 }));
    }

    #[tokio::test]
    async fn test_static_image_loader() {
        let ok = StaticImageLoader::solid(4, [255, 0, 0, 255]);
        let img = ok.load_image_cross_origin("https://x/logo.png").await.unwrap();
        assert_eq!(img.width(), 4);
        assert_eq!(ok.requested_urls(), vec!["https://x/logo.png".to_string()]);

        let failing = StaticImageLoader::unavailable();
        assert!(failing.load_image_cross_origin("https://x").await.is_err());
    }
}
