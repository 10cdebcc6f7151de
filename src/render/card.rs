//! Terminal Cards
//!
//! Fixed-width boxed cards, one per token, laid out in a grid. Every line is
//! fitted to the card by display width before it goes into the table, so wide
//! (CJK) glyphs and colored output line up the same way.

use colored::Colorize;
use comfy_table::{modifiers, presets, Attribute, Cell, ContentArrangement, Table};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::format::GRID_TITLE;
use crate::domain::{
    format_change, format_day_label, format_price, format_rank, format_tooltip_price,
    format_usd_amount, palette, resample, Color, PriceRange, Trend, TrendingToken,
};

pub const DEFAULT_CARD_WIDTH: usize = 38;
pub const MIN_CARD_WIDTH: usize = 24;
pub const DEFAULT_COLUMNS: usize = 3;

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const NO_CHART: &str = "no chart data";
const EMPTY_GRID: &str = "No trending tokens right now.";
const ELLIPSIS: char = '…';

/// Block-character sparkline of at most `width` cells
pub fn block_sparkline(series: &[f64], width: usize) -> Option<String> {
    let range = PriceRange::of(series)?;
    let top = (BLOCKS.len() - 1) as f64;
    let line = resample(series, width)
        .into_iter()
        .map(|p| BLOCKS[(range.normalize(p) * top).round() as usize])
        .collect();
    Some(line)
}

/// Index and value of the lowest and highest finite prices
fn extremes(series: &[f64]) -> Option<((usize, f64), (usize, f64))> {
    let mut finite = series.iter().copied().enumerate().filter(|(_, p)| p.is_finite());
    let first = finite.next()?;
    Some(finite.fold((first, first), |(lo, hi), cur| {
        (
            if cur.1 < lo.1 { cur } else { lo },
            if cur.1 > hi.1 { cur } else { hi },
        )
    }))
}

/// Truncate with `…` and pad so the result is exactly `width` terminal columns
fn fit(text: &str, width: usize) -> String {
    let text: String = text.chars().map(|c| if c.is_control() { ' ' } else { c }).collect();
    let full = UnicodeWidthStr::width(text.as_str());
    if full <= width {
        return format!("{}{}", text, " ".repeat(width - full));
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push(ELLIPSIS);
    used += 1;
    out.push_str(&" ".repeat(width - used));
    out
}

struct Line {
    text: String,
    color: Option<Color>,
    bold: bool,
}

impl Line {
    fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: None, bold: false }
    }

    fn colored(text: impl Into<String>, color: Color) -> Self {
        Self { text: text.into(), color: Some(color), bold: false }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct CardRenderer {
    width: usize,
    color: bool,
    site_url: String,
}

impl CardRenderer {
    pub fn new(width: usize, site_url: impl Into<String>) -> Self {
        Self {
            width: width.max(MIN_CARD_WIDTH),
            color: true,
            site_url: site_url.into(),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn content_width(&self) -> usize {
        self.width - 4
    }

    fn lines(&self, token: &TrendingToken) -> Vec<Line> {
        let data = &token.data;
        let trend = Trend::from_change(data.price_change_percentage_24h);
        let series = data.sparkline();

        let (chart, low, high) = match (
            block_sparkline(series, self.content_width()),
            extremes(series),
        ) {
            (Some(chart), Some(((lo_i, lo), (hi_i, hi)))) => (
                Line::colored(chart, trend.color()),
                format!("Low  {} ({})", format_tooltip_price(lo), format_day_label(lo_i)),
                format!("High {} ({})", format_tooltip_price(hi), format_day_label(hi_i)),
            ),
            _ => (Line::colored(NO_CHART, palette::NEUTRAL), String::new(), String::new()),
        };

        vec![
            Line::plain(token.name.clone()).bold(),
            Line::plain(token.symbol.to_uppercase()),
            Line::plain(format!("Rank: {}", format_rank(token.market_cap_rank))),
            Line::colored(token.thumb.clone(), palette::TEXT_SECONDARY),
            Line::plain(format_price(data.current_price)).bold(),
            Line::colored(format_change(data.price_change_percentage_24h), trend.color()),
            chart,
            Line::colored(low, palette::TEXT_SECONDARY),
            Line::colored(high, palette::TEXT_SECONDARY),
            Line::plain(format!("Market Cap: {}", format_usd_amount(data.market_cap))),
            Line::plain(format!("24h Volume: {}", format_usd_amount(data.total_volume))),
            Line::colored(
                format!("View on CoinGecko → {}", token.profile_url(&self.site_url)),
                palette::LINK,
            ),
            Line::colored(format!("Download: trendcards export {}", token.id), palette::CAPTION),
        ]
    }

    fn cell(&self, line: &Line) -> Cell {
        let mut cell = Cell::new(fit(&line.text, self.content_width()));
        if let Some(c) = line.color {
            cell = cell.fg(comfy_table::Color::Rgb { r: c.r, g: c.g, b: c.b });
        }
        if line.bold {
            cell = cell.add_attribute(Attribute::Bold);
        }
        cell
    }

    /// Card rows, each exactly `width` terminal columns wide
    pub fn render(&self, token: &TrendingToken) -> Vec<String> {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Disabled);
        if self.color {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }

        for line in self.lines(token) {
            table.add_row(vec![self.cell(&line)]);
        }
        table.lines().collect()
    }
}

/// Cards laid out side by side in a fixed number of columns
#[derive(Debug, Clone)]
pub struct CardGrid {
    renderer: CardRenderer,
    columns: usize,
}

impl CardGrid {
    pub fn new(renderer: CardRenderer, columns: usize) -> Self {
        Self { renderer, columns: columns.max(1) }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn render(&self, tokens: &[TrendingToken]) -> String {
        let title = if self.renderer.color {
            GRID_TITLE.bold().to_string()
        } else {
            GRID_TITLE.to_string()
        };

        let mut out = vec![title, String::new()];
        if tokens.is_empty() {
            out.push(EMPTY_GRID.to_string());
            return out.join("\n");
        }

        for row in tokens.chunks(self.columns) {
            let cards: Vec<Vec<String>> = row.iter().map(|t| self.renderer.render(t)).collect();
            let height = cards.iter().map(Vec::len).max().unwrap_or(0);
            for i in 0..height {
                let line: Vec<&str> = cards
                    .iter()
                    .map(|c| c.get(i).map(String::as_str).unwrap_or(""))
                    .collect();
                out.push(line.join("  "));
            }
        }
        out.join("\n")
    }
}
