//! Tone adjustment pass: brightness, contrast, gamma, saturation.

use image::RgbaImage;

use super::options::Adjustments;

/// sRGB luma weights (ITU-R BT.709).
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

#[inline]
fn clamp255(v: f32) -> f32 {
    v.clamp(0.0, 255.0)
}

/// Apply brightness, contrast, gamma, and saturation to a pixel buffer.
///
/// Settings are clamped to their valid ranges first. At neutral settings
/// this returns immediately, leaving the buffer byte-identical.
///
/// Per pixel, in fixed order, with each step clamped to 0..=255 before the
/// next reads it:
///
/// 1. Brightness and contrast together:
///    `v' = factor * (v - 128) + 128 + offset` where
///    `offset = round(brightness * 255 / 100)` and
///    `factor = 259 * (contrast + 255) / (255 * (259 - contrast))`.
///    The denominator cannot reach zero under the -100..=100 clamp, but is
///    guarded anyway.
/// 2. Gamma: `v' = 255 * (v / 255) ^ (1 / gamma)` with gamma floored at 0.1.
/// 3. Saturation: luma mix on the post-gamma channels,
///    `v' = L + (v - L) * saturation` with `L` the sRGB-weighted luma.
///
/// Channels are rounded back to 8 bits only at the final write. Alpha is
/// untouched.
pub fn apply_tone(image: &mut RgbaImage, adjust: &Adjustments) {
    let adjust = adjust.clamped();
    if adjust.is_neutral() {
        return;
    }

    let offset = (adjust.brightness * 255.0 / 100.0).round();
    let denom = 255.0 * (259.0 - adjust.contrast);
    let factor = 259.0 * (adjust.contrast + 255.0) / if denom == 0.0 { 1.0 } else { denom };
    let inv_gamma = 1.0 / adjust.gamma;
    let sat = adjust.saturation;

    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let mut r = r as f32;
        let mut g = g as f32;
        let mut b = b as f32;

        // brightness + contrast
        r = clamp255(factor * (r - 128.0) + 128.0 + offset);
        g = clamp255(factor * (g - 128.0) + 128.0 + offset);
        b = clamp255(factor * (b - 128.0) + 128.0 + offset);

        // gamma
        r = clamp255(255.0 * (r / 255.0).powf(inv_gamma));
        g = clamp255(255.0 * (g / 255.0).powf(inv_gamma));
        b = clamp255(255.0 * (b / 255.0).powf(inv_gamma));

        // saturation (luma mix)
        let luma = LUMA_R * r + LUMA_G * g + LUMA_B * b;
        r = clamp255(luma + (r - luma) * sat);
        g = clamp255(luma + (g - luma) * sat);
        b = clamp255(luma + (b - luma) * sat);

        pixel.0 = [r.round() as u8, g.round() as u8, b.round() as u8, a];
    }
}
