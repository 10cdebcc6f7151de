//! TrueType faces for the exported image.
//!
//! Each weight is looked up in order: the configured path, well-known system
//! locations, then the DejaVu faces compiled into the binary.

use std::path::{Path, PathBuf};
use ab_glyph::FontVec;

/// Common system locations, tried in order when no path is configured
const REGULAR_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const BOLD_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

const ITALIC_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// DejaVu Sans (Bitstream Vera license, see assets/fonts/LICENSE)
const BUNDLED_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const BUNDLED_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");
const BUNDLED_ITALIC: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Oblique.ttf");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
    Italic,
}

impl Weight {
    fn candidates(self) -> &'static [&'static str] {
        match self {
            Weight::Regular => REGULAR_CANDIDATES,
            Weight::Bold => BOLD_CANDIDATES,
            Weight::Italic => ITALIC_CANDIDATES,
        }
    }

    fn bundled(self) -> &'static [u8] {
        match self {
            Weight::Regular => BUNDLED_REGULAR,
            Weight::Bold => BUNDLED_BOLD,
            Weight::Italic => BUNDLED_ITALIC,
        }
    }
}

#[derive(Default)]
pub struct FontSet {
    regular: Option<FontVec>,
    bold: Option<FontVec>,
    italic: Option<FontVec>,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet")
            .field("regular", &self.regular.is_some())
            .field("bold", &self.bold.is_some())
            .field("italic", &self.italic.is_some())
            .finish()
    }
}

fn read_font(path: &Path) -> Option<FontVec> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!("Cannot read font {}: {}", path.display(), e);
            return None;
        }
    };
    match FontVec::try_from_vec(bytes) {
        Ok(font) => Some(font),
        Err(e) => {
            tracing::warn!("Invalid font file {}: {}", path.display(), e);
            None
        }
    }
}

fn first_readable(candidates: &[&str]) -> Option<FontVec> {
    candidates
        .iter()
        .map(PathBuf::from)
        .filter(|p| p.exists())
        .find_map(|p| read_font(&p))
}

fn bundled_face(weight: Weight) -> Option<FontVec> {
    match FontVec::try_from_vec(weight.bundled().to_vec()) {
        Ok(font) => Some(font),
        Err(e) => {
            tracing::error!("Bundled {:?} face is unreadable: {}", weight, e);
            None
        }
    }
}

fn resolve(weight: Weight, configured: Option<&Path>) -> Option<FontVec> {
    configured
        .and_then(read_font)
        .or_else(|| first_readable(weight.candidates()))
        .or_else(|| {
            tracing::debug!("Using bundled {:?} face", weight);
            bundled_face(weight)
        })
}

impl FontSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Only the faces compiled into the binary
    pub fn bundled() -> Self {
        Self {
            regular: bundled_face(Weight::Regular),
            bold: bundled_face(Weight::Bold),
            italic: bundled_face(Weight::Italic),
        }
    }

    /// Load configured faces, falling back to system fonts and then to the
    /// bundled ones
    pub fn load(regular: Option<&Path>, bold: Option<&Path>, italic: Option<&Path>) -> Self {
        Self {
            regular: resolve(Weight::Regular, regular),
            bold: resolve(Weight::Bold, bold),
            italic: resolve(Weight::Italic, italic),
        }
    }

    pub fn from_fonts(regular: Option<FontVec>, bold: Option<FontVec>, italic: Option<FontVec>) -> Self {
        Self { regular, bold, italic }
    }

    /// Face for `weight`; a missing bold or italic falls back to regular
    pub fn face(&self, weight: Weight) -> Option<&FontVec> {
        let preferred = match weight {
            Weight::Regular => None,
            Weight::Bold => self.bold.as_ref(),
            Weight::Italic => self.italic.as_ref(),
        };
        preferred
            .or(self.regular.as_ref())
            .or(self.bold.as_ref())
            .or(self.italic.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_none() && self.bold.is_none() && self.italic.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_glyph::Font;

    #[test]
    fn test_empty_set_has_no_faces() {
        let fonts = FontSet::empty();
        assert!(fonts.is_empty());
        assert!(fonts.face(Weight::Regular).is_none());
        assert!(fonts.face(Weight::Bold).is_none());
        assert!(fonts.face(Weight::Italic).is_none());
    }

    #[test]
    fn test_invalid_font_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        assert!(read_font(&path).is_none());
        assert!(read_font(&dir.path().join("missing.ttf")).is_none());
    }

    #[test]
    fn test_bundled_faces_load() {
        let fonts = FontSet::bundled();
        assert!(!fonts.is_empty());
        for weight in [Weight::Regular, Weight::Bold, Weight::Italic] {
            let face = fonts.face(weight).unwrap();
            assert_ne!(face.glyph_id('$').0, 0, "{:?} has no '$'", weight);
            assert_ne!(face.glyph_id('▼').0, 0, "{:?} has no '▼'", weight);
        }
    }

    #[test]
    fn test_bad_configured_path_still_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.ttf");
        std::fs::write(&broken, b"not a font").unwrap();

        let fonts = FontSet::load(Some(&broken), Some(&dir.path().join("missing.ttf")), None);
        assert!(fonts.face(Weight::Regular).is_some());
        assert!(fonts.face(Weight::Bold).is_some());
        assert!(fonts.face(Weight::Italic).is_some());
    }

    #[test]
    fn test_missing_weights_fall_back_to_regular() {
        let regular = bundled_face(Weight::Regular).unwrap();
        let expected = regular.glyph_id('a');
        let fonts = FontSet::from_fonts(Some(regular), None, None);

        assert_eq!(fonts.face(Weight::Italic).unwrap().glyph_id('a'), expected);
        assert_eq!(fonts.face(Weight::Bold).unwrap().glyph_id('a'), expected);
    }
}
