use async_trait::async_trait;
use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("Image request failed: {0}")]
    Transport(String),

    #[error("Image request returned HTTP {0}")]
    Status(u16),

    #[error("Image could not be decoded: {0}")]
    Decode(String),
}

/// Loads a remote image (a token logo) for compositing.
///
/// Failures are never fatal to the caller: an export without a logo is still
/// a valid export.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load_image_cross_origin(&self, url: &str) -> Result<DynamicImage, ImageLoadError>;
}
