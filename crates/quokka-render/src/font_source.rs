//! Font metrics backed by fontdue for accurate text measurement.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."
//!
//! This module implements the engine's [`FontSource`] seam with real font
//! files: one face per variant (regular/bold/italic/bold-italic) loaded
//! from common system font paths, measured through fontdue's per-glyph
//! metrics. It uses `Font::metrics()` (not `Font::rasterize()`) so that
//! measurement never pays for bitmap generation.

use std::rc::Rc;

use fontdue::{Font, FontSettings};
use quokka_layout::{FontHandle, FontKey, FontSlant, FontSource, FontWeight, VerticalMetrics};
use thiserror::Error;

/// Common system font paths to search for a default (regular) font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNS.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// System font paths for bold variants.
const FONT_BOLD_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// System font paths for italic variants.
const FONT_ITALIC_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf",
    // Windows
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// System font paths for bold-italic variants.
const FONT_BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "/Library/Fonts/Arial Bold Italic.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBoldOblique.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

/// Error type for system font loading.
#[derive(Debug, Error)]
pub enum FontLoadError {
    /// None of the candidate font files could be read and parsed.
    #[error("no usable system font found ({searched} paths searched)")]
    NoFontFound {
        /// How many candidate paths were tried.
        searched: usize,
    },
}

/// Font faces loaded from the system, one per variant.
///
/// Cheap to clone: faces are shared via `Rc`, so the same loaded fonts
/// can back both the layout engine's measurements and the renderer's
/// rasterization.
#[derive(Clone)]
pub struct SystemFontSource {
    regular: Rc<Font>,
    bold: Option<Rc<Font>>,
    italic: Option<Rc<Font>>,
    bold_italic: Option<Rc<Font>>,
}

impl SystemFontSource {
    /// Load the default system faces.
    ///
    /// The regular face is required; variant faces are optional and fall
    /// back to the regular face when missing.
    ///
    /// # Errors
    ///
    /// Returns [`FontLoadError::NoFontFound`] if no regular face could be
    /// loaded from any of the search paths.
    pub fn load_default() -> Result<Self, FontLoadError> {
        let regular =
            Self::load_from_paths(FONT_SEARCH_PATHS).ok_or(FontLoadError::NoFontFound {
                searched: FONT_SEARCH_PATHS.len(),
            })?;
        Ok(SystemFontSource {
            regular: Rc::new(regular),
            bold: Self::load_from_paths(FONT_BOLD_SEARCH_PATHS).map(Rc::new),
            italic: Self::load_from_paths(FONT_ITALIC_SEARCH_PATHS).map(Rc::new),
            bold_italic: Self::load_from_paths(FONT_BOLD_ITALIC_SEARCH_PATHS).map(Rc::new),
        })
    }

    /// Try to load a font from a list of filesystem paths.
    fn load_from_paths(paths: &[&str]) -> Option<Font> {
        for path in paths {
            if let Ok(data) = std::fs::read(path)
                && let Ok(font) = Font::from_bytes(data, FontSettings::default())
            {
                return Some(font);
            }
        }
        None
    }

    /// Select the best available face for a weight/slant pair, falling
    /// back through: exact match → partial match → regular.
    pub fn select(&self, weight: FontWeight, slant: FontSlant) -> &Rc<Font> {
        let is_bold = weight == FontWeight::Bold;
        let is_italic = slant == FontSlant::Italic;

        let variant = match (is_bold, is_italic) {
            (true, true) => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.italic.as_ref()),
            (true, false) => self.bold.as_ref(),
            (false, true) => self.italic.as_ref(),
            (false, false) => None,
        };
        variant.unwrap_or(&self.regular)
    }
}

impl FontSource for SystemFontSource {
    fn load(&self, key: FontKey) -> Rc<dyn FontHandle> {
        Rc::new(SystemFontHandle {
            font: Rc::clone(self.select(key.weight, key.slant)),
            px: key.px(),
        })
    }
}

/// One sized face: a shared fontdue font plus the pixel size of its key.
struct SystemFontHandle {
    font: Rc<Font>,
    px: f32,
}

impl FontHandle for SystemFontHandle {
    fn measure(&self, text: &str) -> f32 {
        // Sum per-character advance widths, matching the cursor
        // advancement used in Renderer::draw_text.
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.font.metrics(ch, self.px).advance_width)
            .sum()
    }

    fn metrics(&self) -> VerticalMetrics {
        match self.font.horizontal_line_metrics(self.px) {
            Some(line) => VerticalMetrics {
                ascent: line.ascent,
                // fontdue reports descent as a negative offset below the
                // baseline; the engine wants a positive depth.
                descent: -line.descent,
            },
            // Fonts without horizontal metrics are rare; approximate with
            // the conventional em-square split.
            None => VerticalMetrics {
                ascent: self.px * 0.8,
                descent: self.px * 0.2,
            },
        }
    }
}
