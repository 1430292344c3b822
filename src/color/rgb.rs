//! 8-bit sRGB color type
//!
//! [`Rgb`] is the storage representation for palette entries and pixel
//! samples: three gamma-encoded 8-bit channels, matching the RGBA buffers
//! the pipeline operates on.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color in 8-bit sRGB.
///
/// This is the input/output representation: palette entries are parsed into
/// it, and quantized pixels are written from it. Perceptual math happens in
/// [`Lab`](crate::Lab), derived via `Lab::from(rgb)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a new color from 8-bit channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The channels as `[r, g, b]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// The channels as floats on the 0..=255 scale.
    ///
    /// This is the form the dithering code works in: error accumulation and
    /// threshold perturbation need fractional channel values.
    #[inline]
    pub fn to_channels(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Render as a lowercase `#rrggbb` hex string.
    ///
    /// # Example
    /// ```
    /// use pixelgrid::Rgb;
    /// assert_eq!(Rgb::new(255, 128, 0).to_hex(), "#ff8000");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` - standard 6-digit hex with hash
    /// - `RRGGBB` - standard 6-digit hex without hash
    /// - `#RGB` - shorthand 3-digit hex with hash (each nibble duplicated)
    /// - `RGB` - shorthand 3-digit hex without hash
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is
    /// trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixelgrid::Rgb;
    ///
    /// let white: Rgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Rgb::new(255, 255, 255));
    ///
    /// let red: Rgb = "#f00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        // Byte-indexed slicing below; a multi-byte char can't be a hex digit
        // anyway.
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each nibble by duplication (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing_6digit() {
        let white: Rgb = "#FFFFFF".parse().unwrap();
        assert_eq!(white, Rgb::new(255, 255, 255));

        let black: Rgb = "#000000".parse().unwrap();
        assert_eq!(black, Rgb::new(0, 0, 0));

        let red: Rgb = "#FF0000".parse().unwrap();
        assert_eq!(red, Rgb::new(255, 0, 0));

        // No hash
        let teal: Rgb = "008080".parse().unwrap();
        assert_eq!(teal, Rgb::new(0, 128, 128));
    }

    #[test]
    fn test_hex_parsing_shorthand() {
        let white: Rgb = "#FFF".parse().unwrap();
        assert_eq!(white, Rgb::new(255, 255, 255));

        let red: Rgb = "#f00".parse().unwrap();
        assert_eq!(red, Rgb::new(255, 0, 0));

        // #ABC expands to #AABBCC
        let color: Rgb = "#ABC".parse().unwrap();
        assert_eq!(color, Rgb::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_hex_parsing_errors() {
        // Invalid character
        let result = "#GGG".parse::<Rgb>();
        assert!(matches!(result, Err(ParseColorError::InvalidHex(_))));

        // 4 chars
        let result = "#FFFF".parse::<Rgb>();
        assert!(matches!(result, Err(ParseColorError::InvalidLength)));

        // Empty / bare hash
        assert!(matches!(
            "".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength)
        ));
        assert!(matches!(
            "#".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength)
        ));

        // Multi-byte chars must not panic the byte-indexed slicing
        assert!("€".parse::<Rgb>().is_err());
        assert!("#ééé".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_hex_parsing_whitespace_and_case() {
        let white: Rgb = "  #ffffff  ".parse().unwrap();
        assert_eq!(white, Rgb::new(255, 255, 255));

        let upper: Rgb = "#ABCDEF".parse().unwrap();
        let lower: Rgb = "#abcdef".parse().unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_hex_round_trip() {
        for hex in ["#000000", "#ffffff", "#12ab9c"] {
            let color: Rgb = hex.parse().unwrap();
            assert_eq!(color.to_hex(), hex);
        }

        // Shorthand renders in expanded form
        let shorthand: Rgb = "#abc".parse().unwrap();
        assert_eq!(shorthand.to_hex(), "#aabbcc");
    }

    #[test]
    fn test_display_matches_to_hex() {
        let color = Rgb::new(1, 2, 3);
        assert_eq!(format!("{color}"), color.to_hex());
    }
}
