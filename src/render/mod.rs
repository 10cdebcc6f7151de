//! Render Layer - terminal cards and PNG export
//!
//! - `canvas`: RGBA drawing surface (gradient, panel, lines, logo, text)
//! - `fonts`: optional TrueType faces for image text
//! - `card`: fixed-width terminal cards and the card grid
//! - `export`: 1200×630 share image written as `<symbol>_info.png`

pub mod canvas;
pub mod fonts;
pub mod card;
pub mod export;

pub use canvas::{Canvas, Rect};
pub use fonts::{FontSet, Weight};
pub use card::{CardGrid, CardRenderer, DEFAULT_CARD_WIDTH, DEFAULT_COLUMNS, MIN_CARD_WIDTH};
pub use export::{ExportError, ExportOptions, ImageExporter};
