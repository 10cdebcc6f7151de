//! Logo Loader
//!
//! HTTP implementation of `ImageLoader`. An optional relay prefix is
//! prepended to every URL (`<prefix><url>`). Leave it empty to fetch the
//! image directly.

use std::time::Duration;
use async_trait::async_trait;
use image::DynamicImage;
use reqwest::Client;

use crate::ports::image_loader::{ImageLoadError, ImageLoader};

#[derive(Debug, Clone)]
pub struct ProxiedImageLoader {
    http: Client,
    proxy_prefix: Option<String>,
}

impl ProxiedImageLoader {
    pub fn new(timeout: Duration) -> Result<Self, ImageLoadError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ImageLoadError::Transport(e.to_string()))?;
        Ok(Self { http, proxy_prefix: None })
    }

    /// Route requests through a relay; an empty prefix disables it
    pub fn with_proxy(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.proxy_prefix = if prefix.trim().is_empty() { None } else { Some(prefix) };
        self
    }

    /// Final URL requested for `url`
    pub fn request_url(&self, url: &str) -> String {
        match &self.proxy_prefix {
            Some(prefix) => format!("{}{}", prefix, url),
            None => url.to_string(),
        }
    }
}

#[async_trait]
impl ImageLoader for ProxiedImageLoader {
    async fn load_image_cross_origin(&self, url: &str) -> Result<DynamicImage, ImageLoadError> {
        if url.trim().is_empty() {
            return Err(ImageLoadError::Transport("empty image URL".into()));
        }

        let target = self.request_url(url);
        tracing::debug!("Loading logo from {}", target);

        let response = self.http
            .get(&target)
            .send()
            .await
            .map_err(|e| ImageLoadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageLoadError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageLoadError::Transport(e.to_string()))?;

        image::load_from_memory(&bytes).map_err(|e| ImageLoadError::Decode(e.to_string()))
    }
}
