//! Quantization to a palette, with optional dithering.
//!
//! Two families are available: error diffusion ([`kernel`] definitions
//! driven by the [`diffusion`] core) and ordered Bayer thresholding
//! ([`ordered`]). [`DitherMode::None`] quantizes each pixel independently
//! with no dithering at all.

mod diffusion;
mod kernel;
mod ordered;

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::{DistanceMetric, Palette};

/// Dithering algorithm applied during palette quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DitherMode {
    /// Plain nearest-color quantization, no dithering.
    None,
    /// Floyd-Steinberg error diffusion, serpentine scan.
    #[default]
    #[serde(alias = "floyd")]
    FloydSteinberg,
    /// Atkinson error diffusion, raster scan, 75% error propagation.
    Atkinson,
    /// Jarvis-Judice-Ninke error diffusion, serpentine scan.
    #[serde(rename = "jarvis-judice-ninke", alias = "jjn", alias = "jarvis")]
    Jjn,
    /// 2x2 Bayer ordered dithering.
    #[serde(rename = "bayer-2")]
    Bayer2,
    /// 4x4 Bayer ordered dithering.
    #[serde(rename = "bayer-4", alias = "bayer4")]
    Bayer4,
    /// 8x8 Bayer ordered dithering.
    #[serde(rename = "bayer-8", alias = "bayer8", alias = "ordered")]
    Bayer8,
    /// 16x16 Bayer ordered dithering.
    #[serde(rename = "bayer-16")]
    Bayer16,
    /// 32x32 Bayer ordered dithering.
    #[serde(rename = "bayer-32")]
    Bayer32,
}

impl DitherMode {
    /// Canonical name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            DitherMode::None => "none",
            DitherMode::FloydSteinberg => "floyd-steinberg",
            DitherMode::Atkinson => "atkinson",
            DitherMode::Jjn => "jarvis-judice-ninke",
            DitherMode::Bayer2 => "bayer-2",
            DitherMode::Bayer4 => "bayer-4",
            DitherMode::Bayer8 => "bayer-8",
            DitherMode::Bayer16 => "bayer-16",
            DitherMode::Bayer32 => "bayer-32",
        }
    }

    /// Quantizes `image` to `palette` in place with this mode.
    ///
    /// Every output pixel is a palette color with alpha 255.
    pub fn apply(self, image: &mut RgbaImage, palette: &Palette, metric: DistanceMetric) {
        match self {
            DitherMode::None => quantize(image, palette, metric),
            DitherMode::FloydSteinberg => {
                diffusion::diffuse(image, palette, metric, &kernel::FLOYD_STEINBERG)
            }
            DitherMode::Atkinson => {
                diffusion::diffuse(image, palette, metric, &kernel::ATKINSON)
            }
            DitherMode::Jjn => {
                diffusion::diffuse(image, palette, metric, &kernel::JARVIS_JUDICE_NINKE)
            }
            DitherMode::Bayer2 => ordered::ordered_dither(image, palette, metric, 2),
            DitherMode::Bayer4 => ordered::ordered_dither(image, palette, metric, 4),
            DitherMode::Bayer8 => ordered::ordered_dither(image, palette, metric, 8),
            DitherMode::Bayer16 => ordered::ordered_dither(image, palette, metric, 16),
            DitherMode::Bayer32 => ordered::ordered_dither(image, palette, metric, 32),
        }
    }
}

impl fmt::Display for DitherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a dither mode string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dither mode '{0}'")]
pub struct ParseDitherModeError(pub String);

impl FromStr for DitherMode {
    type Err = ParseDitherModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(DitherMode::None),
            "floyd-steinberg" | "floyd" => Ok(DitherMode::FloydSteinberg),
            "atkinson" => Ok(DitherMode::Atkinson),
            "jarvis-judice-ninke" | "jjn" | "jarvis" => Ok(DitherMode::Jjn),
            "bayer-2" => Ok(DitherMode::Bayer2),
            "bayer-4" | "bayer4" => Ok(DitherMode::Bayer4),
            "bayer-8" | "bayer8" | "ordered" => Ok(DitherMode::Bayer8),
            "bayer-16" => Ok(DitherMode::Bayer16),
            "bayer-32" => Ok(DitherMode::Bayer32),
            other => Err(ParseDitherModeError(other.to_string())),
        }
    }
}

/// Maps every pixel to its nearest palette color with no error diffusion.
fn quantize(image: &mut RgbaImage, palette: &Palette, metric: DistanceMetric) {
    for pixel in image.pixels_mut() {
        let channels = [pixel.0[0] as f32, pixel.0[1] as f32, pixel.0[2] as f32];
        let (idx, _) = palette.nearest(channels, metric);
        let chosen = palette.color(idx);
        *pixel = image::Rgba([chosen.r, chosen.g, chosen.b, 255]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!("none".parse(), Ok(DitherMode::None));
        assert_eq!("floyd-steinberg".parse(), Ok(DitherMode::FloydSteinberg));
        assert_eq!("atkinson".parse(), Ok(DitherMode::Atkinson));
        assert_eq!("jarvis-judice-ninke".parse(), Ok(DitherMode::Jjn));
        assert_eq!("bayer-2".parse(), Ok(DitherMode::Bayer2));
        assert_eq!("bayer-16".parse(), Ok(DitherMode::Bayer16));
        assert_eq!("bayer-32".parse(), Ok(DitherMode::Bayer32));
    }

    #[test]
    fn test_parse_legacy_aliases() {
        assert_eq!("floyd".parse(), Ok(DitherMode::FloydSteinberg));
        assert_eq!("jarvis".parse(), Ok(DitherMode::Jjn));
        assert_eq!("jjn".parse(), Ok(DitherMode::Jjn));
        assert_eq!("ordered".parse(), Ok(DitherMode::Bayer8));
        assert_eq!("bayer4".parse(), Ok(DitherMode::Bayer4));
        assert_eq!("bayer8".parse(), Ok(DitherMode::Bayer8));
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(" Floyd-Steinberg ".parse(), Ok(DitherMode::FloydSteinberg));
        assert_eq!("ATKINSON".parse(), Ok(DitherMode::Atkinson));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "sierra".parse::<DitherMode>().unwrap_err();
        assert_eq!(err, ParseDitherModeError("sierra".to_string()));
    }

    #[test]
    fn test_default_is_floyd_steinberg() {
        assert_eq!(DitherMode::default(), DitherMode::FloydSteinberg);
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [
            DitherMode::None,
            DitherMode::FloydSteinberg,
            DitherMode::Atkinson,
            DitherMode::Jjn,
            DitherMode::Bayer2,
            DitherMode::Bayer4,
            DitherMode::Bayer8,
            DitherMode::Bayer16,
            DitherMode::Bayer32,
        ] {
            assert_eq!(mode.to_string().parse(), Ok(mode));
        }
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&DitherMode::FloydSteinberg).unwrap();
        assert_eq!(json, "\"floyd-steinberg\"");
        let mode: DitherMode = serde_json::from_str("\"bayer-8\"").unwrap();
        assert_eq!(mode, DitherMode::Bayer8);
        let alias: DitherMode = serde_json::from_str("\"ordered\"").unwrap();
        assert_eq!(alias, DitherMode::Bayer8);

        let jjn = serde_json::to_string(&DitherMode::Jjn).unwrap();
        assert_eq!(jjn, "\"jarvis-judice-ninke\"");
        let parsed: DitherMode = serde_json::from_str("\"jjn\"").unwrap();
        assert_eq!(parsed, DitherMode::Jjn);
    }

    #[test]
    fn test_none_quantizes_to_palette() {
        let palette = Palette::from_hex(&["#ff0000", "#0000ff"]).unwrap();
        let mut image = RgbaImage::from_pixel(4, 4, image::Rgba([200, 30, 30, 10]));
        DitherMode::None.apply(&mut image, &palette, DistanceMetric::DeltaE76);
        for p in image.pixels() {
            assert_eq!(p.0, [255, 0, 0, 255]);
        }
    }
}
