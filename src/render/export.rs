//! Image Exporter
//!
//! Draws one token as a 1200×630 share card and writes it to
//! `<output_dir>/<symbol>_info.png`.
//!
//! The drawing surface is owned by the exporter and reused; every export
//! resets its size and contents first, and `&mut self` keeps exports
//! sequential. A logo that fails to load is logged and skipped.

use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{
    export_filename, format_change, format_price, format_rank, format_usd_amount, palette,
    project, ChartBand, TrendingToken, Trend,
};
use crate::domain::format::DEFAULT_CAPTION;
use crate::ports::image_loader::ImageLoader;
use super::canvas::{Canvas, Rect};
use super::fonts::{FontSet, Weight};

/// Fixed card geometry
pub mod layout {
    pub const WIDTH: u32 = 1200;
    pub const HEIGHT: u32 = 630;
    pub const PANEL_INSET: u32 = 40;
    pub const PANEL_RADIUS: u32 = 20;
    pub const PANEL_ALPHA: f32 = 0.9;

    pub const LOGO_X: i64 = 60;
    pub const LOGO_Y: i64 = 60;
    pub const LOGO_SIZE: u32 = 100;

    /// (x, baseline, px)
    pub const NAME: (f32, f32, f32) = (180.0, 100.0, 48.0);
    pub const SYMBOL: (f32, f32, f32) = (180.0, 150.0, 36.0);
    pub const PRICE: (f32, f32, f32) = (60.0, 240.0, 64.0);
    pub const CHANGE: (f32, f32, f32) = (60.0, 300.0, 36.0);
    pub const MARKET_CAP: (f32, f32, f32) = (60.0, 360.0, 24.0);
    pub const VOLUME: (f32, f32, f32) = (60.0, 400.0, 24.0);
    pub const RANK: (f32, f32, f32) = (60.0, 440.0, 24.0);
    pub const CAPTION: (f32, f32, f32) = (60.0, 610.0, 18.0);

    pub const CHART_LEFT: f64 = 60.0;
    pub const CHART_BOTTOM: f64 = 580.0;
    pub const CHART_WIDTH: f64 = 1080.0;
    pub const CHART_HEIGHT: f64 = 150.0;
    pub const CHART_STROKE: u32 = 2;
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Token symbol {0:?} cannot be used as a file name")]
    InvalidSymbol(String),
}

/// Where and how exports are written
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub caption: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            caption: DEFAULT_CAPTION.to_string(),
        }
    }
}

pub struct ImageExporter<L> {
    canvas: Canvas,
    fonts: FontSet,
    loader: L,
    options: ExportOptions,
}

impl<L: ImageLoader> ImageExporter<L> {
    pub fn new(loader: L, fonts: FontSet, options: ExportOptions) -> Self {
        Self {
            canvas: Canvas::default(),
            fonts,
            loader,
            options,
        }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Render `token` and save it; returns the written path
    pub async fn export(&mut self, token: &TrendingToken) -> Result<PathBuf, ExportError> {
        let filename = export_filename(&token.symbol);
        if filename == export_filename("") {
            return Err(ExportError::InvalidSymbol(token.symbol.clone()));
        }

        let png = self.render_png(token).await?;
        let path = self.options.output_dir.join(filename);
        save_atomically(&path, &png)?;

        tracing::info!("Exported {} to {}", token.id, path.display());
        Ok(path)
    }

    /// Compose the card and encode it as PNG bytes
    pub async fn render_png(&mut self, token: &TrendingToken) -> Result<Vec<u8>, ExportError> {
        self.compose(token).await;
        Ok(self.canvas.encode_png()?)
    }

    /// Draw the card onto the internal canvas
    pub async fn compose(&mut self, token: &TrendingToken) -> &Canvas {
        self.canvas.reset(layout::WIDTH, layout::HEIGHT);
        self.canvas.fill_diagonal_gradient(palette::GRADIENT_START, palette::GRADIENT_END);
        self.canvas.fill_rounded_rect(
            Rect::new(
                layout::PANEL_INSET,
                layout::PANEL_INSET,
                layout::WIDTH - 2 * layout::PANEL_INSET,
                layout::HEIGHT - 2 * layout::PANEL_INSET,
            ),
            layout::PANEL_RADIUS,
            palette::PANEL,
            layout::PANEL_ALPHA,
        );

        match self.loader.load_image_cross_origin(&token.thumb).await {
            Ok(logo) => self.canvas.draw_image(
                &logo,
                layout::LOGO_X,
                layout::LOGO_Y,
                layout::LOGO_SIZE,
                layout::LOGO_SIZE,
            ),
            Err(e) => tracing::warn!("Failed to load the token logo for {}: {}", token.id, e),
        }

        self.draw_details(token);
        self.draw_chart(token);

        &self.canvas
    }

    fn draw_details(&mut self, token: &TrendingToken) {
        if self.fonts.is_empty() {
            tracing::warn!("No font loaded, {} export will have no text", token.id);
            return;
        }

        let trend = Trend::from_change(token.data.price_change_percentage_24h);
        let lines = [
            (Weight::Bold, layout::NAME, palette::TEXT_PRIMARY, token.name.clone()),
            (Weight::Regular, layout::SYMBOL, palette::TEXT_PRIMARY, format!("${}", token.symbol.to_uppercase())),
            (Weight::Bold, layout::PRICE, palette::TEXT_PRIMARY, format_price(token.data.current_price)),
            (Weight::Regular, layout::CHANGE, trend.color(), format_change(token.data.price_change_percentage_24h)),
            (Weight::Regular, layout::MARKET_CAP, palette::TEXT_SECONDARY, format!("Market Cap: {}", format_usd_amount(token.data.market_cap))),
            (Weight::Regular, layout::VOLUME, palette::TEXT_SECONDARY, format!("24h Volume: {}", format_usd_amount(token.data.total_volume))),
            (Weight::Regular, layout::RANK, palette::TEXT_SECONDARY, format!("Rank: {}", format_rank(token.market_cap_rank))),
            (Weight::Italic, layout::CAPTION, palette::CAPTION, self.options.caption.clone()),
        ];

        for (weight, (x, baseline, size), color, text) in lines {
            if let Some(font) = self.fonts.face(weight) {
                self.canvas.draw_text(font, &text, x, baseline, size, color);
            }
        }
    }

    fn draw_chart(&mut self, token: &TrendingToken) {
        let band = ChartBand::new(
            layout::CHART_LEFT,
            layout::CHART_BOTTOM,
            layout::CHART_WIDTH,
            layout::CHART_HEIGHT,
        );
        let points = project(token.data.sparkline(), &band);
        if points.is_empty() {
            tracing::debug!("No sparkline for {}, chart skipped", token.id);
            return;
        }

        let color = Trend::from_change(token.data.price_change_percentage_24h).color();
        self.canvas.draw_polyline(&points, color, layout::CHART_STROKE);
    }
}

/// Write to a temporary file next to `path`, then move it into place. The
/// temporary file is removed if anything fails before the rename.
fn save_atomically(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| ExportError::Io(e.error))?;
    Ok(())
}
