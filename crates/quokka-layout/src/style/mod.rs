//! Resolved style value interpretation.
//!
//! Style values reach the layout engine as plain strings, one map per
//! node, already cascaded and defaulted upstream. This module is the only
//! place those strings are interpreted: colors, font properties, and the
//! pixel font-size. Values the engine cannot interpret are substituted
//! with safe defaults (and reported once via `warn_once`) — a malformed
//! value must never abort a layout pass.

pub mod color;

pub use color::ColorValue;

use quokka_common::warn_once;
use quokka_dom::StyleMap;

use crate::fonts::{FontKey, FontSlant, FontWeight};

/// Default font size when `font-size` is missing or malformed, in pixels.
///
/// [HTML § 15.3.4](https://html.spec.whatwg.org/multipage/rendering.html#phrasing-content-3)
/// — medium text, conventionally 16px.
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// Ratio converting CSS pixels to font points (72 dpi / 96 dpi).
const PX_TO_PT: f32 = 0.75;

/// Typed read access over one node's resolved style map.
///
/// A cheap borrow — construct one wherever a property is needed:
///
/// ```
/// use quokka_dom::StyleMap;
/// use quokka_layout::style::Style;
///
/// let mut map = StyleMap::new();
/// map.insert("font-weight".to_string(), "bold".to_string());
/// let style = Style::of(&map);
/// assert_eq!(style.font_size_px(), 16.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Style<'a> {
    map: &'a StyleMap,
}

impl<'a> Style<'a> {
    /// Wrap a node's style map.
    pub fn of(map: &'a StyleMap) -> Self {
        Style { map }
    }

    /// Raw lookup of a property value.
    pub fn get(&self, property: &str) -> Option<&'a str> {
        self.map.get(property).map(String::as_str)
    }

    /// [§ 3.1 Foreground color](https://www.w3.org/TR/css-color-4/#the-color-property)
    ///
    /// The text color. Missing or uninterpretable values fall back to
    /// black, the conventional initial value.
    pub fn color(&self) -> ColorValue {
        match self.get("color") {
            None => ColorValue::BLACK,
            Some(value) => ColorValue::parse(value).unwrap_or_else(|| {
                warn_once("style", &format!("unsupported color value: {value}"));
                ColorValue::BLACK
            }),
        }
    }

    /// [§ 3.10 background-color](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    ///
    /// The background fill, or `None` when nothing should be painted:
    /// the property is absent, resolves to "transparent", or cannot be
    /// interpreted.
    pub fn background_color(&self) -> Option<ColorValue> {
        let value = self.get("background-color")?;
        match ColorValue::parse(value) {
            Some(c) if c.is_transparent() => None,
            Some(c) => Some(c),
            None => {
                warn_once("style", &format!("unsupported background-color value: {value}"));
                None
            }
        }
    }

    /// The resolved `font-weight`, bucketed to the faces the engine knows.
    pub fn font_weight(&self) -> FontWeight {
        self.get("font-weight").map(FontWeight::from_css).unwrap_or_default()
    }

    /// The resolved `font-style`.
    pub fn font_style(&self) -> FontSlant {
        self.get("font-style").map(FontSlant::from_css).unwrap_or_default()
    }

    /// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
    ///
    /// The resolved font size in CSS pixels. Accepts a "px"-suffixed or
    /// bare number; anything else (relative units should have been
    /// absolutized upstream) falls back to [`DEFAULT_FONT_SIZE_PX`].
    pub fn font_size_px(&self) -> f32 {
        let Some(value) = self.get("font-size") else {
            return DEFAULT_FONT_SIZE_PX;
        };
        let value = value.trim();
        let number = value.strip_suffix("px").unwrap_or(value).trim_end();
        match number.parse::<f32>() {
            Ok(px) if px.is_finite() => px,
            _ => {
                warn_once("style", &format!("unsupported font-size value: {value}"));
                DEFAULT_FONT_SIZE_PX
            }
        }
    }

    /// The font cache key for this node's text: point size plus the
    /// weight and slant variant.
    pub fn font_key(&self) -> FontKey {
        FontKey {
            size: (self.font_size_px() * PX_TO_PT).round() as i32,
            weight: self.font_weight(),
            slant: self.font_style(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style_with(pairs: &[(&str, &str)]) -> StyleMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_color_defaults_to_black() {
        let map = StyleMap::new();
        assert_eq!(Style::of(&map).color(), ColorValue::BLACK);

        let map = style_with(&[("color", "not-a-color")]);
        assert_eq!(Style::of(&map).color(), ColorValue::BLACK);
    }

    #[test]
    fn test_background_transparent_paints_nothing() {
        let map = style_with(&[("background-color", "transparent")]);
        assert_eq!(Style::of(&map).background_color(), None);

        let map = StyleMap::new();
        assert_eq!(Style::of(&map).background_color(), None);

        let map = style_with(&[("background-color", "red")]);
        assert_eq!(
            Style::of(&map).background_color(),
            Some(ColorValue::rgb(255, 0, 0))
        );
    }

    #[test]
    fn test_font_size_parsing() {
        let map = style_with(&[("font-size", "24px")]);
        assert_eq!(Style::of(&map).font_size_px(), 24.0);

        let map = style_with(&[("font-size", "18")]);
        assert_eq!(Style::of(&map).font_size_px(), 18.0);

        let map = style_with(&[("font-size", "1.5em")]);
        assert_eq!(Style::of(&map).font_size_px(), DEFAULT_FONT_SIZE_PX);
    }

    #[test]
    fn test_font_key_resolves_points_and_variant() {
        let map = style_with(&[
            ("font-size", "16px"),
            ("font-weight", "bold"),
            ("font-style", "italic"),
        ]);
        let key = Style::of(&map).font_key();
        assert_eq!(key.size, 12); // 16px * 0.75
        assert_eq!(key.weight, FontWeight::Bold);
        assert_eq!(key.slant, FontSlant::Italic);
    }
}
