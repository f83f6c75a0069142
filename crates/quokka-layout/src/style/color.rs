//! CSS color values.
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use serde::Serialize;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Fully transparent black, the color of "transparent".
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// An opaque color from its RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Whether this color paints nothing at all.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Parse a resolved color value string: hex notation or a named color.
    ///
    /// Returns `None` for values the engine does not understand. Callers
    /// decide the fallback (text defaults to black, backgrounds to no
    /// paint), since normalization is an upstream responsibility.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.starts_with('#') {
            Self::from_hex(value)
        } else {
            Self::from_named(value)
        }
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            // [§ 4.2.1]
            // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
            // by replicating digits, not by adding zeros."
            3 | 4 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
                let r = digit(0)?;
                let g = digit(1)?;
                let b = digit(2)?;
                let a = if hex.len() == 4 { digit(3)? } else { 255 };
                Some(ColorValue { r, g, b, a })
            }
            // Six-digit RGB and eight-digit RGBA notation
            6 | 8 => {
                let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                let r = pair(0)?;
                let g = pair(2)?;
                let b = pair(4)?;
                let a = if hex.len() == 8 { pair(6)? } else { 255 };
                Some(ColorValue { r, g, b, a })
            }
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    /// "CSS defines a large set of named colors..."
    ///
    /// The basic 16 HTML colors plus a few common extended keywords and
    /// "transparent". Unknown names yield `None`.
    pub fn from_named(name: &str) -> Option<Self> {
        let c = match name.to_ascii_lowercase().as_str() {
            "transparent" => Self::TRANSPARENT,
            "black" => Self::rgb(0, 0, 0),
            "white" => Self::rgb(255, 255, 255),
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "aqua" | "cyan" => Self::rgb(0, 255, 255),
            "fuchsia" | "magenta" => Self::rgb(255, 0, 255),
            "lime" => Self::rgb(0, 255, 0),
            "maroon" => Self::rgb(128, 0, 0),
            "navy" => Self::rgb(0, 0, 128),
            "olive" => Self::rgb(128, 128, 0),
            "purple" => Self::rgb(128, 0, 128),
            "silver" => Self::rgb(192, 192, 192),
            "teal" => Self::rgb(0, 128, 128),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "orange" => Self::rgb(255, 165, 0),
            "lightblue" => Self::rgb(173, 216, 230),
            "lightgray" | "lightgrey" => Self::rgb(211, 211, 211),
            "darkgray" | "darkgrey" => Self::rgb(169, 169, 169),
            _ => return None,
        };
        Some(c)
    }

    /// Convert to hex string notation (#RRGGBB or #RRGGBBAA if alpha != 255)
    ///
    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    pub fn to_hex_string(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_short_form_replicates_digits() {
        assert_eq!(ColorValue::from_hex("#f0a"), Some(ColorValue::rgb(0xff, 0x00, 0xaa)));
        assert_eq!(
            ColorValue::from_hex("#f0a8"),
            Some(ColorValue {
                r: 0xff,
                g: 0x00,
                b: 0xaa,
                a: 0x88
            })
        );
    }

    #[test]
    fn test_hex_long_form() {
        assert_eq!(ColorValue::from_hex("#336699"), Some(ColorValue::rgb(0x33, 0x66, 0x99)));
        assert_eq!(
            ColorValue::from_hex("33669980"),
            Some(ColorValue {
                r: 0x33,
                g: 0x66,
                b: 0x99,
                a: 0x80
            })
        );
    }

    #[test]
    fn test_invalid_hex() {
        assert_eq!(ColorValue::from_hex("#12"), None);
        assert_eq!(ColorValue::from_hex("#gggggg"), None);
        assert_eq!(ColorValue::from_hex("#12345"), None);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(ColorValue::parse("red"), Some(ColorValue::rgb(255, 0, 0)));
        assert_eq!(ColorValue::parse("Lime"), Some(ColorValue::rgb(0, 255, 0)));
        assert_eq!(ColorValue::parse("no-such-color"), None);
    }

    #[test]
    fn test_transparent_has_zero_alpha() {
        let c = ColorValue::parse("transparent").unwrap();
        assert!(c.is_transparent());
    }

    #[test]
    fn test_to_hex_string_round_trip() {
        let c = ColorValue::rgb(0x12, 0xab, 0xef);
        assert_eq!(c.to_hex_string(), "#12abef");
        assert_eq!(ColorValue::from_hex(&c.to_hex_string()), Some(c));
    }
}
