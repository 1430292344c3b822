//! Error diffusion over a floating point working buffer.
//!
//! The image is lifted into an `[f32; 3]` buffer so fractional error
//! survives until a pixel is quantized. After each error deposit the
//! receiving channel is clamped back into `[0, 255]`, so saturated
//! neighbors absorb error instead of accumulating it.

use image::RgbaImage;
use tracing::debug;

use crate::dither::kernel::Kernel;
use crate::palette::{DistanceMetric, Palette};

/// Quantizes `image` to `palette` in place, diffusing the per-channel
/// quantization error with `kernel`.
///
/// Alpha is forced fully opaque on every output pixel.
pub fn diffuse(
    image: &mut RgbaImage,
    palette: &Palette,
    metric: DistanceMetric,
    kernel: &Kernel,
) {
    let width = image.width() as usize;
    let height = image.height() as usize;
    if width == 0 || height == 0 {
        return;
    }

    debug!(
        width,
        height,
        entries = kernel.entries.len(),
        serpentine = kernel.serpentine,
        "diffusing"
    );

    let mut buffer: Vec<[f32; 3]> = image
        .pixels()
        .map(|p| [p.0[0] as f32, p.0[1] as f32, p.0[2] as f32])
        .collect();
    let divisor = kernel.divisor as f32;

    for y in 0..height {
        let reverse = kernel.serpentine && y % 2 == 1;
        for step in 0..width {
            let x = if reverse { width - 1 - step } else { step };
            let idx = y * width + x;
            let old = buffer[idx];

            let (pal_idx, _) = palette.nearest(old, metric);
            let chosen = palette.color(pal_idx);
            image.put_pixel(
                x as u32,
                y as u32,
                image::Rgba([chosen.r, chosen.g, chosen.b, 255]),
            );

            let err = [
                old[0] - chosen.r as f32,
                old[1] - chosen.g as f32,
                old[2] - chosen.b as f32,
            ];

            for &(dx, dy, weight) in kernel.entries {
                let dx = if reverse { -dx } else { dx };
                let nx = x as i64 + dx as i64;
                let ny = y as i64 + dy as i64;
                if nx < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                let nidx = ny as usize * width + nx as usize;
                let scale = weight as f32 / divisor;
                let neighbor = &mut buffer[nidx];
                for c in 0..3 {
                    neighbor[c] = (neighbor[c] + err[c] * scale).clamp(0.0, 255.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::kernel::{ATKINSON, FLOYD_STEINBERG, JARVIS_JUDICE_NINKE};

    fn bw_palette() -> Palette {
        Palette::from_hex(&["#000000", "#ffffff"]).unwrap()
    }

    fn mean_luma(image: &RgbaImage) -> f32 {
        let sum: f32 = image
            .pixels()
            .map(|p| {
                0.2126 * p.0[0] as f32 + 0.7152 * p.0[1] as f32 + 0.0722 * p.0[2] as f32
            })
            .sum();
        sum / (image.width() * image.height()) as f32
    }

    #[test]
    fn test_output_pixels_are_palette_colors() {
        let mut image = RgbaImage::from_pixel(8, 8, image::Rgba([100, 150, 200, 255]));
        let palette = bw_palette();
        diffuse(&mut image, &palette, DistanceMetric::DeltaE76, &FLOYD_STEINBERG);
        for p in image.pixels() {
            let grey = p.0[0];
            assert!(grey == 0 || grey == 255);
            assert_eq!(p.0[0], p.0[1]);
            assert_eq!(p.0[1], p.0[2]);
            assert_eq!(p.0[3], 255);
        }
    }

    #[test]
    fn test_floyd_steinberg_preserves_mid_grey_luma() {
        let mut image = RgbaImage::from_pixel(32, 32, image::Rgba([128, 128, 128, 255]));
        let palette = bw_palette();
        diffuse(&mut image, &palette, DistanceMetric::DeltaE76, &FLOYD_STEINBERG);
        let luma = mean_luma(&image);
        assert!(
            (luma - 128.0).abs() < 16.0,
            "mean luma {luma} drifted from 128"
        );
    }

    #[test]
    fn test_jjn_preserves_mid_grey_luma() {
        let mut image = RgbaImage::from_pixel(32, 32, image::Rgba([128, 128, 128, 255]));
        let palette = bw_palette();
        diffuse(
            &mut image,
            &palette,
            DistanceMetric::DeltaE76,
            &JARVIS_JUDICE_NINKE,
        );
        let luma = mean_luma(&image);
        assert!((luma - 128.0).abs() < 16.0);
    }

    #[test]
    fn test_atkinson_runs_and_quantizes() {
        let mut image = RgbaImage::from_pixel(16, 16, image::Rgba([200, 200, 200, 255]));
        let palette = bw_palette();
        diffuse(&mut image, &palette, DistanceMetric::DeltaE76, &ATKINSON);
        let whites = image.pixels().filter(|p| p.0[0] == 255).count();
        assert!(whites > 128, "bright input should mostly map to white");
    }

    #[test]
    fn test_exact_palette_color_is_stable() {
        let mut image = RgbaImage::from_pixel(8, 8, image::Rgba([255, 255, 255, 255]));
        let palette = bw_palette();
        diffuse(&mut image, &palette, DistanceMetric::DeltaE76, &FLOYD_STEINBERG);
        for p in image.pixels() {
            assert_eq!(p.0, [255, 255, 255, 255]);
        }
    }

    #[test]
    fn test_serpentine_mirrors_kernel_on_odd_rows() {
        // Row 0 is pure black: zero quantization error, so it deposits
        // nothing into row 1. Row 1 is scanned right-to-left and the kernel
        // dx is mirrored, so the 7/16 tap walks the error leftward:
        //   x=2: 140 -> white, err -115; x=1 gets -115*7/16 = -50.31
        //   x=1: 49.69 -> black, err +49.69; x=0 gets +49.69*7/16 = +21.74
        //   x=0: 121.74 -> white
        // An unmirrored kernel would drop both same-row deposits off the
        // right edge and leave x=0 and x=1 black; a plain raster scan would
        // produce black, white, black.
        let mut image = RgbaImage::from_fn(3, 2, |x, y| {
            if y == 0 {
                image::Rgba([0, 0, 0, 255])
            } else if x == 2 {
                image::Rgba([140, 140, 140, 255])
            } else {
                image::Rgba([100, 100, 100, 255])
            }
        });
        let palette = bw_palette();
        diffuse(&mut image, &palette, DistanceMetric::DeltaE76, &FLOYD_STEINBERG);

        for x in 0..3 {
            assert_eq!(image.get_pixel(x, 0).0, [0, 0, 0, 255]);
        }
        assert_eq!(image.get_pixel(2, 1).0, [255, 255, 255, 255]);
        assert_eq!(
            image.get_pixel(1, 1).0,
            [0, 0, 0, 255],
            "mirrored 7/16 tap must darken the pixel left of x=2"
        );
        assert_eq!(
            image.get_pixel(0, 1).0,
            [255, 255, 255, 255],
            "error from x=1 must continue leftward on the right-to-left row"
        );
    }

    #[test]
    fn test_single_pixel_image() {
        let mut image = RgbaImage::from_pixel(1, 1, image::Rgba([10, 10, 10, 255]));
        let palette = bw_palette();
        diffuse(&mut image, &palette, DistanceMetric::Ciede2000, &FLOYD_STEINBERG);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }
}
