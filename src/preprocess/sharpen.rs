//! Unsharp-mask detail enhancement.

use image::RgbaImage;

/// Compute a 3x3 box blur of the RGB channels.
///
/// Each output sample is the arithmetic mean of all valid neighbors in a
/// 3x3 window clipped at the buffer edges: edge pixels average fewer
/// samples. No wraparound, no mirroring.
fn box_blur_3x3(image: &RgbaImage) -> Vec<[f32; 3]> {
    let (w, h) = image.dimensions();
    let mut out = vec![[0.0f32; 3]; (w * h) as usize];

    for y in 0..h {
        for x in 0..w {
            let mut sum = [0.0f32; 3];
            let mut count = 0.0f32;
            for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                    let p = image.get_pixel(nx, ny).0;
                    sum[0] += p[0] as f32;
                    sum[1] += p[1] as f32;
                    sum[2] += p[2] as f32;
                    count += 1.0;
                }
            }
            out[(y * w + x) as usize] = [sum[0] / count, sum[1] / count, sum[2] / count];
        }
    }
    out
}

/// Sharpen a pixel buffer with a classic unsharp mask.
///
/// A 3x3 box blur of the buffer serves as the low-frequency reference;
/// each channel is then pushed away from it:
/// `out = clamp(original + (original - blurred) * amount / 100)`.
///
/// `amount_percent` is clamped to 0..=200; at 0 this is a true no-op (the
/// buffer is left byte-identical). Runs on the raw downsampled grid,
/// before tone adjustment. Alpha is untouched.
pub fn sharpen(image: &mut RgbaImage, amount_percent: f32) {
    let amount_percent = if amount_percent.is_nan() {
        0.0
    } else {
        amount_percent.clamp(0.0, 200.0)
    };
    if amount_percent == 0.0 {
        return;
    }

    let (w, _h) = image.dimensions();
    let blurred = box_blur_3x3(image);
    let amount = amount_percent / 100.0;

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let low = blurred[(y * w + x) as usize];
        let [r, g, b, a] = pixel.0;
        let sharpen_channel = |orig: u8, blur: f32| -> u8 {
            let v = orig as f32 + (orig as f32 - blur) * amount;
            v.clamp(0.0, 255.0).round() as u8
        };
        pixel.0 = [
            sharpen_channel(r, low[0]),
            sharpen_channel(g, low[1]),
            sharpen_channel(b, low[2]),
            a,
        ];
    }
}
