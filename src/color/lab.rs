//! CIE L\*a\*b\* color space and perceptual distance metrics
//!
//! The conversion goes sRGB -> linear RGB -> CIE XYZ -> Lab with a D65
//! reference white, and the crate guarantees it formula-exact: no lookup
//! tables or approximations, so reference Lab values are reproduced to
//! within float rounding. Palette matching depends on this, since every
//! pixel and every palette entry meet in Lab space.
//!
//! Two distance metrics are provided: [`delta_e76`] (plain Euclidean, the
//! default) and [`ciede2000`] (the full CIEDE2000 formula, more perceptually
//! accurate and considerably more expensive).

use super::rgb::Rgb;

/// A color in CIE L\*a\*b\* space.
///
/// # Components
///
/// - `l`: lightness, 0.0 (black) to 100.0 (white) for in-gamut colors
/// - `a`: green-red opponent axis
/// - `b`: blue-yellow opponent axis
///
/// The a/b axes are unbounded in general but, being derived from sRGB here,
/// stay within roughly -128..128. Values are never mutated once computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness (0 = black, 100 = white)
    pub l: f32,
    /// Green-red axis
    pub a: f32,
    /// Blue-yellow axis
    pub b: f32,
}

// D65 reference white.
const XR: f32 = 0.95047;
const YR: f32 = 1.0;
const ZR: f32 = 1.08883;

/// Decode one gamma-encoded sRGB channel (0..=255 scale) to linear light.
///
/// Piecewise IEC 61966-2-1: the linear segment below 0.04045 (normalized)
/// divides by 12.92, above it a 2.4 power law with 0.055 offset. Inputs
/// outside 0..=255 (threshold-perturbed channels from ordered dithering)
/// take the linear branch when negative and the power branch when large;
/// both extend the curve continuously.
#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    let x = c / 255.0;
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

impl Lab {
    /// Create a Lab color from raw components.
    #[inline]
    pub const fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Convert sRGB channels on the 0..=255 scale (possibly fractional or
    /// out of range) to Lab.
    ///
    /// This is the canonical conversion used everywhere in the crate:
    /// linearize each channel, apply the standard sRGB-to-XYZ matrix, divide
    /// by the D65 white point, then the Lab nonlinearity (cube root above
    /// 0.008856, linear approximation `7.787t + 16/116` below).
    pub fn from_channels(r: f32, g: f32, b: f32) -> Self {
        let rl = srgb_to_linear(r);
        let gl = srgb_to_linear(g);
        let bl = srgb_to_linear(b);

        let x = 0.4124 * rl + 0.3576 * gl + 0.1805 * bl;
        let y = 0.2126 * rl + 0.7152 * gl + 0.0722 * bl;
        let z = 0.0193 * rl + 0.1192 * gl + 0.9505 * bl;

        let f = |t: f32| {
            if t > 0.008856 {
                t.cbrt()
            } else {
                7.787 * t + 16.0 / 116.0
            }
        };
        let fx = f(x / XR);
        let fy = f(y / YR);
        let fz = f(z / ZR);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Rgb> for Lab {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        Self::from_channels(rgb.r as f32, rgb.g as f32, rgb.b as f32)
    }
}

/// Euclidean distance in Lab space (CIE76 ΔE).
///
/// Symmetric, monotonic, and zero iff the colors are equal. This is the
/// default palette-matching metric: it over-weights chroma differences in
/// saturated blues compared to human perception, but for nearest-of-N
/// lookup it almost always agrees with CIEDE2000 at a quarter of the cost.
///
/// # Example
///
/// ```
/// use pixelgrid::{delta_e76, Lab};
///
/// let a = Lab::new(50.0, 10.0, -5.0);
/// let b = Lab::new(55.0, 10.0, -5.0);
/// assert_eq!(delta_e76(a, b), 5.0);
/// assert_eq!(delta_e76(a, a), 0.0);
/// ```
#[inline]
pub fn delta_e76(a: Lab, b: Lab) -> f32 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// CIEDE2000 color difference (ΔE00).
///
/// The full formula: chroma compensation term G, compensated a', hue angles
/// in degrees normalized to [0, 360), the T hue-weighting polynomial, the
/// Sl/Sc/Sh weighting functions, and the Rt rotation term that corrects the
/// blue region. More perceptually uniform than [`delta_e76`], selectable via
/// [`DistanceMetric::Ciede2000`](crate::DistanceMetric), not the default.
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f32 {
    const POW25_7: f32 = 6103515625.0; // 25^7

    let (l1, a1, b1) = (lab1.l, lab1.a, lab1.b);
    let (l2, a2, b2) = (lab2.l, lab2.a, lab2.b);

    let avg_lp = (l1 + l2) / 2.0;
    let c1 = a1.hypot(b1);
    let c2 = a2.hypot(b2);
    let avg_c = (c1 + c2) / 2.0;

    let avg_c7 = avg_c.powi(7);
    let g = 0.5 * (1.0 - (avg_c7 / (avg_c7 + POW25_7)).sqrt());
    let a1p = (1.0 + g) * a1;
    let a2p = (1.0 + g) * a2;
    let c1p = a1p.hypot(b1);
    let c2p = a2p.hypot(b2);
    let avg_cp = (c1p + c2p) / 2.0;

    // Hue angles in degrees, normalized to [0, 360).
    let h1p = b1.atan2(a1p).to_degrees().rem_euclid(360.0);
    let h2p = b2.atan2(a2p).to_degrees().rem_euclid(360.0);

    let mut dhp = h2p - h1p;
    if dhp > 180.0 {
        dhp -= 360.0;
    }
    if dhp < -180.0 {
        dhp += 360.0;
    }

    let dlp = l2 - l1;
    let dcp = c2p - c1p;
    let dhp_term = 2.0 * (c1p * c2p).sqrt() * (dhp.to_radians() / 2.0).sin();

    let mut avg_hp = h1p + h2p;
    if (h1p - h2p).abs() > 180.0 {
        avg_hp += 360.0;
    }
    avg_hp /= 2.0;

    let t = 1.0 - 0.17 * (avg_hp - 30.0).to_radians().cos()
        + 0.24 * (2.0 * avg_hp).to_radians().cos()
        + 0.32 * (3.0 * avg_hp + 6.0).to_radians().cos()
        - 0.20 * (4.0 * avg_hp - 63.0).to_radians().cos();

    let dl50_sq = (avg_lp - 50.0) * (avg_lp - 50.0);
    let sl = 1.0 + (0.015 * dl50_sq) / (20.0 + dl50_sq).sqrt();
    let sc = 1.0 + 0.045 * avg_cp;
    let sh = 1.0 + 0.015 * avg_cp * t;

    let avg_cp7 = avg_cp.powi(7);
    let rt = -2.0
        * (avg_cp7 / (avg_cp7 + POW25_7)).sqrt()
        * (60.0 * (-((avg_hp - 275.0) / 25.0) * ((avg_hp - 275.0) / 25.0)).exp())
            .to_radians()
            .sin();

    let term_l = dlp / sl;
    let term_c = dcp / sc;
    let term_h = dhp_term / sh;
    (term_l * term_l + term_c * term_c + term_h * term_h + rt * term_c * term_h).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Black and white are the anchors of the Lab axis: L 0 and 100, with
    /// both opponent axes at zero.
    #[test]
    fn test_lab_round_trip_anchors() {
        let black = Lab::from(Rgb::new(0, 0, 0));
        assert!(black.l.abs() < 0.05, "black L should be ~0, got {}", black.l);
        assert!(black.a.abs() < 0.05);
        assert!(black.b.abs() < 0.05);

        let white = Lab::from(Rgb::new(255, 255, 255));
        assert!(
            (white.l - 100.0).abs() < 0.05,
            "white L should be ~100, got {}",
            white.l
        );
        assert!(white.a.abs() < 0.05);
        assert!(white.b.abs() < 0.05);
    }

    /// Reference Lab coordinates for pure sRGB red (D65).
    #[test]
    fn test_lab_known_value_red() {
        let red = Lab::from(Rgb::new(255, 0, 0));
        assert!((red.l - 53.24).abs() < 0.5, "red L: {}", red.l);
        assert!((red.a - 80.09).abs() < 0.5, "red a: {}", red.a);
        assert!((red.b - 67.20).abs() < 0.5, "red b: {}", red.b);
    }

    #[test]
    fn test_lab_greys_are_achromatic() {
        for v in [32u8, 64, 128, 200] {
            let grey = Lab::from(Rgb::new(v, v, v));
            assert!(grey.a.abs() < 0.05, "grey {v} a: {}", grey.a);
            assert!(grey.b.abs() < 0.05, "grey {v} b: {}", grey.b);
        }
    }

    #[test]
    fn test_delta_e76_identity_and_symmetry() {
        let colors = [
            Lab::from(Rgb::new(0, 0, 0)),
            Lab::from(Rgb::new(255, 0, 0)),
            Lab::from(Rgb::new(13, 200, 77)),
        ];
        for &c in &colors {
            assert_eq!(delta_e76(c, c), 0.0);
        }
        for &a in &colors {
            for &b in &colors {
                assert_eq!(delta_e76(a, b), delta_e76(b, a));
            }
        }
    }

    #[test]
    fn test_delta_e76_monotonic_along_grey_axis() {
        let black = Lab::from(Rgb::new(0, 0, 0));
        let mid = Lab::from(Rgb::new(128, 128, 128));
        let light = Lab::from(Rgb::new(200, 200, 200));
        assert!(delta_e76(black, mid) < delta_e76(black, light));
    }

    #[test]
    fn test_ciede2000_identity() {
        let c = Lab::from(Rgb::new(120, 30, 220));
        assert_eq!(ciede2000(c, c), 0.0);
    }

    /// Reference pairs from the published CIEDE2000 test data
    /// (Sharma, Wu & Dalal 2005, pairs 1-3 and 26).
    #[test]
    fn test_ciede2000_reference_pairs() {
        let cases = [
            (
                Lab::new(50.0, 2.6772, -79.7751),
                Lab::new(50.0, 0.0, -82.7485),
                2.0425,
            ),
            (
                Lab::new(50.0, 3.1571, -77.2803),
                Lab::new(50.0, 0.0, -82.7485),
                2.8615,
            ),
            (
                Lab::new(50.0, 2.8361, -74.0200),
                Lab::new(50.0, 0.0, -82.7485),
                3.4412,
            ),
            // Hue angles on opposite sides of 0 degrees - exercises the
            // mean-hue wraparound branch.
            (
                Lab::new(50.0, 2.5, 0.0),
                Lab::new(73.0, 25.0, -18.0),
                27.1492,
            ),
        ];

        for (a, b, expected) in cases {
            let got = ciede2000(a, b);
            assert!(
                (got - expected).abs() < 0.005,
                "ciede2000({a:?}, {b:?}) = {got}, expected {expected}"
            );
            // Symmetric like any sane metric
            let rev = ciede2000(b, a);
            assert!((rev - expected).abs() < 0.005);
        }
    }

    /// ΔE76 and CIEDE2000 may rank hue-differing candidates differently;
    /// what matters is both are zero at identity and positive elsewhere.
    #[test]
    fn test_metrics_positive_for_distinct_colors() {
        let a = Lab::from(Rgb::new(100, 150, 200));
        let b = Lab::from(Rgb::new(101, 150, 200));
        assert!(delta_e76(a, b) > 0.0);
        assert!(ciede2000(a, b) > 0.0);
    }

    #[test]
    fn test_from_channels_accepts_out_of_range() {
        // Ordered dithering perturbs channels past the 8-bit range; the
        // conversion must stay finite there.
        let low = Lab::from_channels(-32.0, -32.0, -32.0);
        let high = Lab::from_channels(287.0, 287.0, 287.0);
        assert!(low.l.is_finite() && low.a.is_finite() && low.b.is_finite());
        assert!(high.l.is_finite() && high.a.is_finite() && high.b.is_finite());
        assert!(low.l < 0.0);
        assert!(high.l > 100.0);
    }
}
