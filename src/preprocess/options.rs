//! Adjustment configuration.

use serde::{Deserialize, Serialize};

/// Tone and sharpness settings for one conversion.
///
/// All values clamp to their valid range rather than failing, so any
/// deserialized configuration produces a working pipeline.
///
/// | Field        | Range        | Neutral |
/// |--------------|--------------|---------|
/// | `brightness` | -100..=100   | 0       |
/// | `contrast`   | -100..=100   | 0       |
/// | `gamma`      | 0.1..        | 1       |
/// | `saturation` | 0..          | 1       |
/// | `sharpness`  | 0..=200 (%)  | 0       |
///
/// # Example
///
/// ```
/// use pixelgrid::Adjustments;
///
/// let adjust = Adjustments {
///     contrast: 20.0,
///     saturation: 1.4,
///     ..Adjustments::default()
/// };
/// assert!(!adjust.is_neutral());
/// assert!(Adjustments::default().is_neutral());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    /// Brightness offset, -100..=100. Mapped to a pixel offset of
    /// `round(brightness * 255 / 100)`.
    pub brightness: f32,

    /// Contrast, -100..=100. Applied as the classic 259-formula factor
    /// around the 128 midpoint.
    pub contrast: f32,

    /// Gamma, floored at 0.1. Applied as `255 * (v/255)^(1/gamma)`.
    pub gamma: f32,

    /// Saturation multiplier, floored at 0. A luma-mix with sRGB weights:
    /// 0 = greyscale, 1 = unchanged, 2 = doubled color distance from luma.
    pub saturation: f32,

    /// Unsharp-mask strength as a percentage, 0..=200. 0 disables the
    /// sharpening pass entirely.
    pub sharpness: f32,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 0.0,
            gamma: 1.0,
            saturation: 1.0,
            sharpness: 0.0,
        }
    }
}

impl Adjustments {
    /// Clamp every field to its valid range.
    ///
    /// Out-of-range values snap to the nearest bound; NaN snaps to neutral.
    /// The pipeline applies this before using the settings, keeping the
    /// conversion total for any input configuration.
    pub fn clamped(self) -> Self {
        let or_neutral = |v: f32, neutral: f32| if v.is_nan() { neutral } else { v };
        Self {
            brightness: or_neutral(self.brightness, 0.0).clamp(-100.0, 100.0),
            contrast: or_neutral(self.contrast, 0.0).clamp(-100.0, 100.0),
            gamma: or_neutral(self.gamma, 1.0).max(0.1),
            saturation: or_neutral(self.saturation, 1.0).max(0.0),
            sharpness: or_neutral(self.sharpness, 0.0).clamp(0.0, 200.0),
        }
    }

    /// True when the tone pass would not change any pixel.
    ///
    /// Sharpness is excluded: it is a separate pass with its own zero check.
    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.brightness == 0.0
            && self.contrast == 0.0
            && self.gamma == 1.0
            && self.saturation == 1.0
    }
}
