//! Background color codes

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// An opaque or translucent RGB color.
///
/// Hosts accept CSS-style hex codes; [`Color::parse`] understands `#RGB`,
/// `#RRGGBB` and `#AARRGGBB` (the `#` is optional).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// RGB color (no alpha)
    Rgb { r: u8, g: u8, b: u8 },

    /// ARGB color with alpha channel
    Argb { a: u8, r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create an ARGB color
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a, r, g, b }
    }

    /// Parse a hex color code (e.g., "#FF0000", "ff0000", "#f00")
    pub fn parse(code: &str) -> Result<Self> {
        Self::from_hex(code).ok_or_else(|| Error::InvalidColor(code.to_string()))
    }

    /// Create from a hex string, returning `None` when it is not one
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 17);
                Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Lower-case CSS hex, the form hosts report back (`#rrggbb`)
    pub fn to_css_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Convert to ARGB hex string (8 characters, no `#`)
    pub fn to_argb_hex(&self) -> String {
        match self {
            Color::Rgb { r, g, b } => format!("FF{r:02X}{g:02X}{b:02X}"),
            Color::Argb { a, r, g, b } => format!("{a:02X}{r:02X}{g:02X}{b:02X}"),
        }
    }

    /// Convert to RGB tuple, dropping alpha
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match *self {
            Color::Rgb { r, g, b } | Color::Argb { r, g, b, .. } => (r, g, b),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse("#FF0000").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse("00ff00").unwrap(), Color::rgb(0, 255, 0));
        assert_eq!(Color::parse("#f0a").unwrap(), Color::rgb(255, 0, 170));
        assert_eq!(
            Color::parse("#80112233").unwrap(),
            Color::argb(0x80, 0x11, 0x22, 0x33)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "#", "red", "#12345", "#GGGGGG", "#ＦＦ0000"] {
            assert!(
                matches!(Color::parse(bad), Err(Error::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_formatting() {
        let color = Color::rgb(0xAB, 0xCD, 0xEF);
        assert_eq!(color.to_css_hex(), "#abcdef");
        assert_eq!(color.to_argb_hex(), "FFABCDEF");
        assert_eq!(color.to_string(), "#abcdef");
        assert_eq!(Color::argb(0, 1, 2, 3).to_css_hex(), "#010203");
    }
}
