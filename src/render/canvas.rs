//! Raster Canvas
//!
//! A reusable RGBA drawing surface with the handful of primitives the
//! export card needs: gradient fill, translucent rounded panel, thick
//! polyline, image overlay and baseline-anchored text.

use std::io::Cursor;
use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::domain::Color;

/// Linear blend of two colors, `t` clamped to [0, 1]
pub fn interpolate_color(c1: Color, c2: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| ((1.0 - t) * a as f64 + t * b as f64).round() as u8;
    Color::new(mix(c1.r, c2.r), mix(c1.g, c2.g), mix(c1.b, c2.b))
}

fn rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::new(width, height) }
    }

    /// New dimensions and fully transparent contents
    pub fn reset(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width() && y < self.height() {
            let p = self.image.get_pixel(x, y);
            Some(Color::new(p[0], p[1], p[2]))
        } else {
            None
        }
    }

    /// Composite `color` at `alpha` over the pixel; out-of-bounds is ignored
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }

        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        let mix = |src: u8, dst: u8| (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8;
        let out_alpha = (255.0 * a + dst[3] as f32 * (1.0 - a)).round() as u8;
        *dst = Rgba([mix(color.r, dst[0]), mix(color.g, dst[1]), mix(color.b, dst[2]), out_alpha]);
    }

    /// Gradient from the top-left corner (`from`) to the bottom-right (`to`)
    pub fn fill_diagonal_gradient(&mut self, from: Color, to: Color) {
        let (w, h) = (self.width() as f64, self.height() as f64);
        let norm = w * w + h * h;
        if norm == 0.0 {
            return;
        }
        for (x, y, pixel) in self.image.enumerate_pixels_mut() {
            let t = (x as f64 * w + y as f64 * h) / norm;
            *pixel = rgba(interpolate_color(from, to, t));
        }
    }

    /// Filled rounded rectangle composited at `alpha`
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: u32, color: Color, alpha: f32) {
        let Rect { x, y, width, height } = rect;
        let r = radius.min(width / 2).min(height / 2) as f64;
        let (left, top) = (x as f64, y as f64);
        let (right, bottom) = (left + width as f64, top + height as f64);

        for py in y..y.saturating_add(height) {
            for px in x..x.saturating_add(width) {
                // pixel centers
                let cx = px as f64 + 0.5;
                let cy = py as f64 + 0.5;
                let corner_x = if cx < left + r { Some(left + r) } else if cx > right - r { Some(right - r) } else { None };
                let corner_y = if cy < top + r { Some(top + r) } else if cy > bottom - r { Some(bottom - r) } else { None };

                if let (Some(kx), Some(ky)) = (corner_x, corner_y) {
                    let (dx, dy) = (cx - kx, cy - ky);
                    if dx * dx + dy * dy > r * r {
                        continue;
                    }
                }
                self.blend_pixel(px as i64, py as i64, color, alpha);
            }
        }
    }

    /// Square brush of side `width` centered on (x, y)
    fn stamp(&mut self, x: i64, y: i64, color: Color, width: u32) {
        let w = width.max(1) as i64;
        let start = -(w / 2);
        for dy in start..start + w {
            for dx in start..start + w {
                self.blend_pixel(x + dx, y + dy, color, 1.0);
            }
        }
    }

    /// Bresenham line with a square brush
    pub fn draw_line(&mut self, from: (i64, i64), to: (i64, i64), color: Color, width: u32) {
        let (x1, y1) = from;
        let (x2, y2) = to;
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx - dy;

        let (mut x, mut y) = (x1, y1);
        loop {
            self.stamp(x, y, color, width);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Connect consecutive points; a single point is drawn as a dot
    pub fn draw_polyline(&mut self, points: &[(f64, f64)], color: Color, width: u32) {
        let rounded: Vec<(i64, i64)> = points
            .iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|&(x, y)| (x.round() as i64, y.round() as i64))
            .collect();

        match rounded.as_slice() {
            [] => {}
            [only] => self.stamp(only.0, only.1, color, width),
            _ => {
                for pair in rounded.windows(2) {
                    self.draw_line(pair[0], pair[1], color, width);
                }
            }
        }
    }

    /// Scale `src` to `width`×`height` and composite it at (x, y)
    pub fn draw_image(&mut self, src: &DynamicImage, x: i64, y: i64, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let scaled = imageops::resize(&src.to_rgba8(), width, height, imageops::FilterType::Triangle);
        for (sx, sy, p) in scaled.enumerate_pixels() {
            let alpha = p[3] as f32 / 255.0;
            self.blend_pixel(x + sx as i64, y + sy as i64, Color::new(p[0], p[1], p[2]), alpha);
        }
    }

    /// Draw `text` with its baseline at `baseline`; returns the advance width
    pub fn draw_text(
        &mut self,
        font: &FontVec,
        text: &str,
        x: f32,
        baseline: f32,
        size: f32,
        color: Color,
    ) -> f32 {
        let scale = PxScale::from(size);
        let scaled = font.as_scaled(scale);
        let mut caret = x;
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    self.blend_pixel(
                        bounds.min.x as i64 + gx as i64,
                        bounds.min.y as i64 + gy as i64,
                        color,
                        coverage,
                    );
                });
            }
        }

        caret - x
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut out = Cursor::new(Vec::new());
        self.image.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
