//! pixelgrid: palette-constrained pixel art conversion
//!
//! This library converts an arbitrary decoded RGBA raster into a
//! reduced-palette, pixel-art-style raster of a caller-specified resolution
//! and pixel-block size. The pipeline is a single deterministic
//! transformation:
//!
//! ```text
//! source raster
//!     |
//!     v
//! downscale            (aspect-preserving, bilinear, centered on the grid)
//!     |
//!     v
//! sharpen              (3x3 unsharp mask on the raw downsampled pixels)
//!     |
//!     v
//! tone adjust          (brightness/contrast -> gamma -> saturation)
//!     |
//!     v
//! quantize / dither    (error diffusion or Bayer, nearest palette color)
//!     |
//!     v
//! upscale              (nearest-neighbor block replication)
//! ```
//!
//! # Quick Start
//!
//! The [`Converter`] builder is the primary entry point:
//!
//! ```
//! use pixelgrid::{Converter, Palette};
//!
//! let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
//! let converter = Converter::new(palette)
//!     .output_size(64, 64)
//!     .block_size(8);
//!
//! let source = image::RgbaImage::from_pixel(100, 80, image::Rgba([120, 90, 200, 255]));
//! let art = converter.convert(&source).unwrap();
//!
//! assert_eq!(art.dimensions(), (64, 64));
//! ```
//!
//! # Color Matching
//!
//! Every pixel is quantized to the perceptually nearest palette color.
//! "Perceptually nearest" means distance in CIE L\*a\*b\* space, measured
//! either with plain Euclidean ΔE76 (the default -- cheap and monotonic) or
//! with the full CIEDE2000 formula (more accurate near-neutrals and blues,
//! roughly 4x the cost per comparison). See [`DistanceMetric`].
//!
//! The palette is an ordered, immutable index built once per
//! [`Palette::from_hex`] call; each entry precomputes its Lab coordinates so
//! the per-pixel scan does no conversion work for palette colors. Nearest
//! lookup is a linear scan with strict `<` comparison, so ties resolve to
//! the first entry in input order -- deterministic for a given palette.
//!
//! # Dithering
//!
//! Quantizing to a handful of colors destroys smooth gradients; dithering
//! algorithms shape the quantization error so average tone survives. Two
//! families are available via [`DitherMode`]:
//!
//! - **Error diffusion** (Floyd-Steinberg, Atkinson, Jarvis-Judice-Ninke):
//!   the signed per-channel error of each quantized pixel is pushed onto
//!   not-yet-visited neighbors. Floyd-Steinberg and JJN use a serpentine
//!   scan with the kernel mirrored on right-to-left rows; Atkinson scans in
//!   raster order and deliberately discards a quarter of the error.
//! - **Ordered (Bayer)** thresholding at sizes 2-32: a fixed spatial
//!   threshold matrix perturbs each pixel before quantization. No error
//!   feedback between pixels, fully deterministic, parallel-friendly.
//!
//! All modes force the output alpha channel to fully opaque.

pub mod api;
pub mod color;
pub mod dither;
pub mod palette;
pub mod preprocess;
pub mod resample;


pub use api::{convert, Converter, ConvertError};
pub use color::{ciede2000, delta_e76, Lab, Rgb};
pub use dither::{DitherMode, ParseDitherModeError};
pub use palette::{DistanceMetric, Palette, PaletteError, ParseColorError};
pub use preprocess::Adjustments;
pub use resample::GridGeometry;
