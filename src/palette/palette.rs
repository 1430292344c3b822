//! Palette struct with precomputed Lab coordinates and nearest-color lookup.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PaletteError;
use crate::color::{ciede2000, delta_e76, Lab, Rgb};

/// Distance metric for palette color matching.
///
/// Controls how perceptual distance is measured when finding the nearest
/// palette color to an input pixel. Both metrics operate in Lab space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Euclidean distance in Lab space (CIE76).
    ///
    /// The default: cheap, symmetric, monotonic. For nearest-of-N lookup it
    /// agrees with CIEDE2000 on the vast majority of inputs.
    #[default]
    #[serde(rename = "delta-e76", alias = "deltaE76")]
    DeltaE76,

    /// Full CIEDE2000 formula.
    ///
    /// Corrects the known non-uniformities of ΔE76 (saturated blues,
    /// near-neutrals) at roughly 4x the per-comparison cost.
    Ciede2000,
}

impl DistanceMetric {
    /// Perceptual distance between two Lab colors under this metric.
    #[inline]
    pub fn distance(self, a: Lab, b: Lab) -> f32 {
        match self {
            DistanceMetric::DeltaE76 => delta_e76(a, b),
            DistanceMetric::Ciede2000 => ciede2000(a, b),
        }
    }
}

/// One palette color with its precomputed Lab coordinates.
///
/// Invariant: `lab` is always the exact recomputation of `rgb` via the
/// canonical conversion; entries are never mutated after construction.
#[derive(Debug, Clone)]
struct Entry {
    hex: String,
    rgb: Rgb,
    lab: Lab,
}

impl Entry {
    fn new(hex: String, rgb: Rgb) -> Self {
        Self {
            hex,
            lab: Lab::from(rgb),
            rgb,
        }
    }
}

/// An ordered, immutable palette index.
///
/// Built once per conversion (or reused across conversions -- the index is
/// read-only and `Send + Sync`), a `Palette` holds each color's source hex
/// string, its 8-bit sRGB value, and its precomputed Lab coordinates so the
/// per-pixel nearest-color scan does no conversion work on palette entries.
///
/// # Example
///
/// ```
/// use pixelgrid::{Palette, Rgb};
///
/// let palette = Palette::from_hex(&["#000000", "#fff", "#e63946"]).unwrap();
/// assert_eq!(palette.len(), 3);
/// assert_eq!(palette.color(1), Rgb::new(255, 255, 255));
/// ```
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<Entry>,
}

impl Palette {
    /// Build a palette from hex color strings.
    ///
    /// Each string goes through [`Rgb`]'s hex parser (3- or 6-digit, with or
    /// without `#`), then its Lab coordinates are precomputed. The build is
    /// atomic: an empty list or any unparseable entry rejects the whole
    /// palette.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::Empty`] if `hex_colors` is empty
    /// - [`PaletteError::ParseColor`] for the first malformed entry
    pub fn from_hex<S: AsRef<str>>(hex_colors: &[S]) -> Result<Self, PaletteError> {
        if hex_colors.is_empty() {
            return Err(PaletteError::Empty);
        }

        let mut entries = Vec::with_capacity(hex_colors.len());
        for (index, hex) in hex_colors.iter().enumerate() {
            let hex = hex.as_ref();
            let rgb = Rgb::from_str(hex).map_err(|source| PaletteError::ParseColor {
                index,
                hex: hex.to_string(),
                source,
            })?;
            entries.push(Entry::new(hex.trim().to_string(), rgb));
        }

        Ok(Self { entries })
    }

    /// Build a palette from already-decoded colors.
    ///
    /// The stored hex string is rendered from each color.
    ///
    /// # Errors
    ///
    /// [`PaletteError::Empty`] if `colors` is empty.
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self {
            entries: colors
                .iter()
                .map(|&rgb| Entry::new(rgb.to_hex(), rgb))
                .collect(),
        })
    }

    /// Number of colors in the palette. Always at least 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The sRGB color at `idx`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.entries[idx].rgb
    }

    /// The precomputed Lab coordinates at `idx`.
    #[inline]
    pub fn lab(&self, idx: usize) -> Lab {
        self.entries[idx].lab
    }

    /// The source hex string at `idx`.
    #[inline]
    pub fn hex(&self, idx: usize) -> &str {
        &self.entries[idx].hex
    }

    /// Find the palette entry nearest to the given sRGB channels.
    ///
    /// `channels` are on the 0..=255 scale and may be fractional or out of
    /// range (dithering feeds error-accumulated and threshold-perturbed
    /// values). The query is converted to Lab once, then all entries are
    /// scanned linearly -- O(len) per call, optimal for the small palettes
    /// this crate targets.
    ///
    /// Returns `(index, distance)`. Ties resolve to the first entry in input
    /// order (the scan uses strict `<`), so the result is deterministic for
    /// a given palette.
    pub fn nearest(&self, channels: [f32; 3], metric: DistanceMetric) -> (usize, f32) {
        let query = Lab::from_channels(channels[0], channels[1], channels[2]);

        let mut best_idx = 0;
        let mut best_dist = f32::INFINITY;
        for (i, entry) in self.entries.iter().enumerate() {
            let dist = metric.distance(query, entry.lab);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }
        (best_idx, best_dist)
    }

    /// Convenience wrapper: the nearest palette *color*.
    #[inline]
    pub fn nearest_color(&self, channels: [f32; 3], metric: DistanceMetric) -> Rgb {
        let (idx, _) = self.nearest(channels, metric);
        self.entries[idx].rgb
    }
}
