//! Ordered (Bayer) dithering.
//!
//! The pixel at `(x, y)` is biased by a position-dependent threshold from
//! a Bayer matrix before the nearest-color lookup. No error leaves the
//! pixel, so the output for each pixel depends only on its own value and
//! position.

use image::RgbaImage;
use tracing::debug;

use crate::palette::{DistanceMetric, Palette};

/// Peak threshold offset in 8-bit channel units.
const AMPLITUDE: f32 = 32.0;

/// Builds the `size` x `size` Bayer matrix by recursive doubling from the
/// 2x2 base. `size` must be a power of two.
///
/// Each doubling step tiles the previous matrix `b` as:
///
/// ```text
///    4b      4b + 2
///    4b + 3  4b + 1
/// ```
fn bayer_matrix(size: u32) -> Vec<u32> {
    debug_assert!(size.is_power_of_two() && size >= 2);
    let mut matrix = vec![0u32, 2, 3, 1];
    let mut n = 2;
    while n < size {
        let doubled = n * 2;
        let mut next = vec![0u32; (doubled * doubled) as usize];
        for y in 0..n {
            for x in 0..n {
                let v = 4 * matrix[(y * n + x) as usize];
                next[(y * doubled + x) as usize] = v;
                next[(y * doubled + x + n) as usize] = v + 2;
                next[((y + n) * doubled + x) as usize] = v + 3;
                next[((y + n) * doubled + x + n) as usize] = v + 1;
            }
        }
        matrix = next;
        n = doubled;
    }
    matrix
}

/// Quantizes `image` to `palette` in place with an ordered threshold from
/// the `size` x `size` Bayer matrix.
///
/// Alpha is forced fully opaque on every output pixel.
pub fn ordered_dither(
    image: &mut RgbaImage,
    palette: &Palette,
    metric: DistanceMetric,
    size: u32,
) {
    debug!(width = image.width(), height = image.height(), size, "ordered dither");

    let matrix = bayer_matrix(size);
    let denom = (size * size) as f32;

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let m = matrix[((y % size) * size + (x % size)) as usize] as f32;
        let threshold = (m / denom - 0.5) * AMPLITUDE * 2.0;
        // No clamp here; the nearest lookup accepts out-of-range channels.
        let biased = [
            pixel.0[0] as f32 + threshold,
            pixel.0[1] as f32 + threshold,
            pixel.0[2] as f32 + threshold,
        ];
        let (idx, _) = palette.nearest(biased, metric);
        let chosen = palette.color(idx);
        *pixel = image::Rgba([chosen.r, chosen.g, chosen.b, 255]);
    }
}
