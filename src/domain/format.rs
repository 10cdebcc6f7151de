//! Presentation Rules
//!
//! Formatting and color decisions shared by the terminal card and the PNG
//! exporter. Both renderers go through these functions so the two outputs
//! always agree on prices, glyphs and colors.

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

/// Placeholder for an unknown value
pub const MISSING: &str = "-";

/// Title shown above the card grid
pub const GRID_TITLE: &str = "Trending Tokens on CoinGecko";

/// Default attribution drawn at the bottom of exported images
pub const DEFAULT_CAPTION: &str = "made with love by @Altcoin_daddy";

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Color palette shared by both renderers
pub mod palette {
    use super::Color;

    pub const UP: Color = Color::new(0x10, 0xB9, 0x81);
    pub const DOWN: Color = Color::new(0xEF, 0x44, 0x44);
    pub const NEUTRAL: Color = Color::new(0x9C, 0xA3, 0xAF);
    pub const GRADIENT_START: Color = Color::new(0x8B, 0x5C, 0xF6);
    pub const GRADIENT_END: Color = Color::new(0xEC, 0x48, 0x99);
    pub const TEXT_PRIMARY: Color = Color::new(0x1F, 0x29, 0x37);
    pub const TEXT_SECONDARY: Color = Color::new(0x4B, 0x55, 0x63);
    pub const CAPTION: Color = Color::new(0x9C, 0xA3, 0xAF);
    pub const PANEL: Color = Color::new(0xFF, 0xFF, 0xFF);
    pub const LINK: Color = Color::new(0x3B, 0x82, 0xF6);
}

/// Direction of the 24h price change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// change >= 0
    Up,
    /// change < 0
    Down,
    /// change unknown
    Unknown,
}

impl Trend {
    pub fn from_change(change: Option<f64>) -> Self {
        match change {
            Some(c) if c.is_nan() => Trend::Unknown,
            Some(c) if c >= 0.0 => Trend::Up,
            Some(_) => Trend::Down,
            None => Trend::Unknown,
        }
    }

    pub fn glyph(self) -> Option<&'static str> {
        match self {
            Trend::Up => Some("▲"),
            Trend::Down => Some("▼"),
            Trend::Unknown => None,
        }
    }

    /// Text and chart color for this direction
    pub fn color(self) -> Color {
        match self {
            Trend::Up => palette::UP,
            Trend::Down => palette::DOWN,
            Trend::Unknown => palette::NEUTRAL,
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Current price, `$` and two decimals
pub fn format_price(price: Option<f64>) -> String {
    match finite(price) {
        Some(p) => format!("${:.2}", p),
        None => MISSING.to_string(),
    }
}

/// Glyph followed by the absolute change, e.g. `▼ 0.01%`
pub fn format_change(change: Option<f64>) -> String {
    let Some(c) = finite(change) else {
        return MISSING.to_string();
    };
    match Trend::from_change(Some(c)).glyph() {
        Some(glyph) => format!("{} {:.2}%", glyph, c.abs()),
        None => MISSING.to_string(),
    }
}

/// en-US grouping with at most three fractional digits: `1,234,567.5`
pub fn format_locale_number(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let grouped = match int_part.parse::<u128>() {
        Ok(n) => n.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_string(),
    };
    let frac = frac_part.trim_end_matches('0');

    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

/// Dollar amount with locale grouping, `-` when unknown
pub fn format_usd_amount(amount: Option<f64>) -> String {
    match finite(amount) {
        Some(a) => format!("${}", format_locale_number(a)),
        None => MISSING.to_string(),
    }
}

pub fn format_rank(rank: Option<u32>) -> String {
    match rank {
        Some(r) => format!("#{}", r),
        None => format!("#{}", MISSING),
    }
}

/// Price with four decimals, used for chart point labels
pub fn format_tooltip_price(price: f64) -> String {
    format!("${:.4}", price)
}

/// One-based label for a chart point
pub fn format_day_label(index: usize) -> String {
    format!("Day {}", index + 1)
}

/// `<symbol>_info.png`; path separators in the symbol become `_`
pub fn export_filename(symbol: &str) -> String {
    let safe: String = symbol
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    format!("{}_info.png", safe)
}
