//! Resampling between source, grid and output resolutions.
//!
//! The pipeline works on a small intermediate grid, one cell per output
//! pixel block. [`downscale`] fits the source into that grid with a
//! filtered, aspect-preserving resize; [`upscale`] blows the quantized
//! grid back up with flat nearest-neighbor blocks.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::debug;

/// Output and grid dimensions for one conversion.
///
/// The grid is the output divided by the block size, with every dimension
/// floored at 1 so degenerate requests still produce a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// Final output width in pixels.
    pub out_width: u32,
    /// Final output height in pixels.
    pub out_height: u32,
    /// Side length of one output block in pixels.
    pub block_size: u32,
    /// Grid width, `max(1, out_width / block_size)`.
    pub grid_width: u32,
    /// Grid height, `max(1, out_height / block_size)`.
    pub grid_height: u32,
}

impl GridGeometry {
    /// Derives the grid from the requested output size and block size.
    pub fn new(out_width: u32, out_height: u32, block_size: u32) -> Self {
        let out_width = out_width.max(1);
        let out_height = out_height.max(1);
        let block_size = block_size.max(1);
        GridGeometry {
            out_width,
            out_height,
            block_size,
            grid_width: (out_width / block_size).max(1),
            grid_height: (out_height / block_size).max(1),
        }
    }
}

/// Shrinks `source` onto a grid-sized canvas, preserving aspect ratio.
///
/// The source is resized by the uniform scale `min(grid_w/w, grid_h/h)`
/// with a triangle (bilinear) filter and centered on a transparent canvas,
/// so a source whose aspect ratio differs from the grid gets transparent
/// letterbox margins.
pub fn downscale(source: &RgbaImage, geometry: &GridGeometry) -> RgbaImage {
    let (src_w, src_h) = source.dimensions();
    let scale = f64::min(
        geometry.grid_width as f64 / src_w as f64,
        geometry.grid_height as f64 / src_h as f64,
    );
    let scaled_w = ((src_w as f64 * scale).round() as u32)
        .max(1)
        .min(geometry.grid_width);
    let scaled_h = ((src_h as f64 * scale).round() as u32)
        .max(1)
        .min(geometry.grid_height);

    debug!(
        src_w,
        src_h,
        grid_w = geometry.grid_width,
        grid_h = geometry.grid_height,
        scaled_w,
        scaled_h,
        "downscale"
    );

    let scaled = imageops::resize(source, scaled_w, scaled_h, FilterType::Triangle);

    let mut canvas = RgbaImage::from_pixel(
        geometry.grid_width,
        geometry.grid_height,
        Rgba([0, 0, 0, 0]),
    );
    let offset_x = i64::from((geometry.grid_width - scaled_w) / 2);
    let offset_y = i64::from((geometry.grid_height - scaled_h) / 2);
    imageops::replace(&mut canvas, &scaled, offset_x, offset_y);
    canvas
}

/// Expands `grid` to `out_width` x `out_height` with flat nearest-neighbor
/// blocks.
///
/// Each output pixel samples `grid[x * grid_w / out_w, y * grid_h / out_h]`
/// (integer division), so when the output is an exact multiple of the grid
/// every cell becomes one solid block.
pub fn upscale(grid: &RgbaImage, out_width: u32, out_height: u32) -> RgbaImage {
    let (grid_w, grid_h) = grid.dimensions();
    let out_width = out_width.max(1);
    let out_height = out_height.max(1);

    debug!(grid_w, grid_h, out_width, out_height, "upscale");

    RgbaImage::from_fn(out_width, out_height, |x, y| {
        let src_x = (u64::from(x) * u64::from(grid_w) / u64::from(out_width)) as u32;
        let src_y = (u64::from(y) * u64::from(grid_h) / u64::from(out_height)) as u32;
        *grid.get_pixel(src_x, src_y)
    })
}
