//! Font metrics seam and memoizing font cache.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."
//!
//! The layout engine never touches font files. It asks a [`FontSource`]
//! (implemented by the embedder) for a [`FontHandle`] per font variant and
//! uses the handle to measure word widths and query ascent/descent. The
//! [`FontCache`] memoizes handles so each (size, weight, slant) variant is
//! resolved at most once per engine instance.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;

/// [§ 2.2 Font weight](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
///
/// Only the two weights the engine distinguishes; numeric weights are
/// bucketed when the style value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum FontWeight {
    /// font-weight: normal (400)
    #[default]
    Normal,
    /// font-weight: bold (700)
    Bold,
}

impl FontWeight {
    /// Interpret a resolved `font-weight` style value.
    ///
    /// "bold" and numeric weights of 600 and above select the bold face;
    /// everything else selects the regular face.
    pub fn from_css(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("bold") {
            return FontWeight::Bold;
        }
        match value.parse::<u16>() {
            Ok(n) if n >= 600 => FontWeight::Bold,
            _ => FontWeight::Normal,
        }
    }
}

/// [§ 2.4 Font style](https://www.w3.org/TR/css-fonts-4/#font-style-prop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum FontSlant {
    /// font-style: normal (upright)
    #[default]
    Roman,
    /// font-style: italic or oblique
    Italic,
}

impl FontSlant {
    /// Interpret a resolved `font-style` style value.
    pub fn from_css(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("italic") || value.eq_ignore_ascii_case("oblique") {
            FontSlant::Italic
        } else {
            FontSlant::Roman
        }
    }
}

/// Key identifying one font variant in the cache.
///
/// The size is an integer point size (resolved from the pixel font-size),
/// which keeps the key hashable while matching the granularity fonts are
/// actually loaded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FontKey {
    /// Point size (1pt = 4/3 px at 96 dpi).
    pub size: i32,
    /// Regular or bold face.
    pub weight: FontWeight,
    /// Upright or italic face.
    pub slant: FontSlant,
}

impl FontKey {
    /// The pixel size this key renders at (96 dpi: 1pt = 4/3 px).
    pub fn px(&self) -> f32 {
        self.size as f32 * 4.0 / 3.0
    }
}

/// Vertical metrics of a sized font.
///
/// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
///
/// "CSS assumes that every font has font metrics that specify a
/// characteristic height above the baseline and a depth below it."
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalMetrics {
    /// Height above the baseline, in pixels (positive).
    pub ascent: f32,
    /// Depth below the baseline, in pixels (positive).
    pub descent: f32,
}

/// A resolved font variant, ready to measure text.
///
/// Implementors wrap whatever the backend loaded (a parsed font file, a
/// platform font object) scaled to the key's size. Handles are shared via
/// `Rc` and must be immutable: the same handle answers every query for its
/// key for the lifetime of the engine.
pub trait FontHandle {
    /// Measure the advance width of `text` in pixels.
    ///
    /// This should sum the advance width of each glyph in the string,
    /// matching the cursor advancement used during text rendering.
    fn measure(&self, text: &str) -> f32;

    /// The ascent/descent of this font variant, in pixels.
    fn metrics(&self) -> VerticalMetrics;
}

/// The loading side of the font seam, implemented by the embedder.
///
/// The cache calls `load` at most once per distinct [`FontKey`]; sources
/// do not need to memoize anything themselves.
pub trait FontSource {
    /// Resolve a font variant for the given key.
    fn load(&self, key: FontKey) -> Rc<dyn FontHandle>;
}

/// Memoizing font cache, one per engine instance.
///
/// Entries are additive-only: a handle is inserted the first time its key
/// is requested and never evicted or replaced. All insertions funnel
/// through [`FontCache::get`], the single mutation path.
pub struct FontCache {
    source: Box<dyn FontSource>,
    fonts: RefCell<HashMap<FontKey, Rc<dyn FontHandle>>>,
}

impl FontCache {
    /// Create an empty cache backed by the given source.
    pub fn new(source: Box<dyn FontSource>) -> Self {
        FontCache {
            source,
            fonts: RefCell::new(HashMap::new()),
        }
    }

    /// Get the handle for a font variant, loading it on first use.
    ///
    /// Repeated calls with an identical key return the same handle.
    pub fn get(&self, key: FontKey) -> Rc<dyn FontHandle> {
        if let Some(handle) = self.fonts.borrow().get(&key) {
            return Rc::clone(handle);
        }
        let handle = self.source.load(key);
        self.fonts
            .borrow_mut()
            .insert(key, Rc::clone(&handle));
        handle
    }

    /// Number of variants resolved so far.
    pub fn len(&self) -> usize {
        self.fonts.borrow().len()
    }

    /// Whether no variant has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.fonts.borrow().is_empty()
    }
}

/// Approximate font metrics using fixed ratios.
///
/// Implementation note: Without access to actual font data, we use fixed
/// ratio approximations. The average advance width of Latin glyphs in a
/// proportional font is approximately 0.6× the font size (typical for
/// Helvetica/Arial body text); the ascender sits at roughly 80% of the em
/// square and the descender takes the remaining 20%.
///
/// This is used as a fallback when no font is available, and in tests,
/// where its determinism makes expected geometry easy to state exactly.
pub struct ApproximateFontSource;

impl FontSource for ApproximateFontSource {
    fn load(&self, key: FontKey) -> Rc<dyn FontHandle> {
        Rc::new(ApproximateFontHandle { px: key.px() })
    }
}

/// Handle produced by [`ApproximateFontSource`].
struct ApproximateFontHandle {
    px: f32,
}

impl FontHandle for ApproximateFontHandle {
    fn measure(&self, text: &str) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        text.chars().count() as f32 * self.px * CHAR_WIDTH_RATIO
    }

    fn metrics(&self) -> VerticalMetrics {
        VerticalMetrics {
            ascent: self.px * 0.8,
            descent: self.px * 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(size: i32) -> FontKey {
        FontKey {
            size,
            weight: FontWeight::Normal,
            slant: FontSlant::Roman,
        }
    }

    #[test]
    fn test_cache_returns_same_handle_for_same_key() {
        let cache = FontCache::new(Box::new(ApproximateFontSource));
        let a = cache.get(key(12));
        let b = cache.get(key(12));
        assert!(Rc::ptr_eq(&a, &b), "identical keys must share one handle");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_is_additive_per_key() {
        let cache = FontCache::new(Box::new(ApproximateFontSource));
        let _ = cache.get(key(12));
        let _ = cache.get(key(14));
        let _ = cache.get(FontKey {
            size: 12,
            weight: FontWeight::Bold,
            slant: FontSlant::Roman,
        });
        let _ = cache.get(key(12));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_weight_from_css() {
        assert_eq!(FontWeight::from_css("bold"), FontWeight::Bold);
        assert_eq!(FontWeight::from_css("700"), FontWeight::Bold);
        assert_eq!(FontWeight::from_css("normal"), FontWeight::Normal);
        assert_eq!(FontWeight::from_css("400"), FontWeight::Normal);
        assert_eq!(FontWeight::from_css("wiggly"), FontWeight::Normal);
    }

    #[test]
    fn test_slant_from_css() {
        assert_eq!(FontSlant::from_css("italic"), FontSlant::Italic);
        assert_eq!(FontSlant::from_css("oblique"), FontSlant::Italic);
        assert_eq!(FontSlant::from_css("normal"), FontSlant::Roman);
    }

    #[test]
    fn test_approximate_metrics_are_deterministic() {
        let cache = FontCache::new(Box::new(ApproximateFontSource));
        let handle = cache.get(key(12));
        let px = key(12).px();
        assert_eq!(handle.measure("hello"), 5.0 * px * 0.6);
        let m = handle.metrics();
        assert_eq!(m.ascent, px * 0.8);
        assert_eq!(m.descent, px * 0.2);
    }
}
