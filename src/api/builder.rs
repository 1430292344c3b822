use std::sync::atomic::{AtomicBool, Ordering};

use image::RgbaImage;
use tracing::debug;

use crate::api::ConvertError;
use crate::dither::DitherMode;
use crate::palette::{DistanceMetric, Palette};
use crate::preprocess::{apply_tone, sharpen, Adjustments};
use crate::resample::{downscale, upscale, GridGeometry};

/// A reusable, configured conversion pipeline.
///
/// Built once around a [`Palette`], then applied to any number of source
/// images via [`convert`](Converter::convert). The pipeline runs in a
/// fixed order: downscale, sharpen, tone adjustment, dithered
/// quantization, block upscale.
///
/// # Example
///
/// ```
/// use pixelgrid::{Converter, DitherMode, Palette};
///
/// let palette = Palette::from_hex(&["#000000", "#ffffff", "#ff0000"])?;
/// let converter = Converter::new(palette)
///     .output_size(128, 128)
///     .block_size(4)
///     .dither(DitherMode::Atkinson);
///
/// let source = image::RgbaImage::from_pixel(64, 64, image::Rgba([90, 90, 90, 255]));
/// let output = converter.convert(&source)?;
/// assert_eq!(output.dimensions(), (128, 128));
/// # Ok::<(), pixelgrid::ConvertError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    palette: Palette,
    out_width: u32,
    out_height: u32,
    block_size: u32,
    mode: DitherMode,
    metric: DistanceMetric,
    adjustments: Adjustments,
}

impl Converter {
    /// Creates a converter with defaults: 64x64 output, block size 1,
    /// Floyd-Steinberg dithering, ΔE76 distance, neutral adjustments.
    pub fn new(palette: Palette) -> Self {
        Converter {
            palette,
            out_width: 64,
            out_height: 64,
            block_size: 1,
            mode: DitherMode::default(),
            metric: DistanceMetric::default(),
            adjustments: Adjustments::default(),
        }
    }

    /// Sets the output dimensions in pixels. Zeroes are floored to 1.
    pub fn output_size(mut self, width: u32, height: u32) -> Self {
        self.out_width = width;
        self.out_height = height;
        self
    }

    /// Sets the side length of one output pixel block.
    pub fn block_size(mut self, pixels: u32) -> Self {
        self.block_size = pixels;
        self
    }

    /// Sets the dithering mode.
    pub fn dither(mut self, mode: DitherMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the color distance metric used for nearest-color lookups.
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Sets the tone and sharpening adjustments.
    pub fn adjustments(mut self, adjustments: Adjustments) -> Self {
        self.adjustments = adjustments;
        self
    }

    /// The palette this converter quantizes to.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Runs the full pipeline on `source`.
    pub fn convert(&self, source: &RgbaImage) -> Result<RgbaImage, ConvertError> {
        static NEVER: AtomicBool = AtomicBool::new(false);
        self.convert_with_cancel(source, &NEVER)
    }

    /// Runs the full pipeline, checking `cancel` between stages.
    ///
    /// A conversion observed as cancelled yields [`ConvertError::Cancelled`]
    /// and no partial output. The flag is only polled at stage boundaries,
    /// so a stage that already started runs to completion.
    pub fn convert_with_cancel(
        &self,
        source: &RgbaImage,
        cancel: &AtomicBool,
    ) -> Result<RgbaImage, ConvertError> {
        let (src_w, src_h) = source.dimensions();
        if src_w == 0 || src_h == 0 {
            return Err(ConvertError::EmptySource);
        }

        let geometry = GridGeometry::new(self.out_width, self.out_height, self.block_size);
        debug!(
            src_w,
            src_h,
            out_w = geometry.out_width,
            out_h = geometry.out_height,
            grid_w = geometry.grid_width,
            grid_h = geometry.grid_height,
            mode = %self.mode,
            "conversion start"
        );

        let checkpoint = |stage: &str| {
            if cancel.load(Ordering::Relaxed) {
                debug!(stage, "conversion cancelled");
                Err(ConvertError::Cancelled)
            } else {
                Ok(())
            }
        };

        checkpoint("downscale")?;
        let mut grid = downscale(source, &geometry);

        checkpoint("sharpen")?;
        sharpen(&mut grid, self.adjustments.sharpness);

        checkpoint("tone")?;
        apply_tone(&mut grid, &self.adjustments);

        checkpoint("dither")?;
        self.mode.apply(&mut grid, &self.palette, self.metric);

        checkpoint("upscale")?;
        let output = upscale(&grid, geometry.out_width, geometry.out_height);

        debug!(
            out_w = output.width(),
            out_h = output.height(),
            "conversion done"
        );
        Ok(output)
    }
}

/// Single-call conversion from hex palette strings.
///
/// Builds the palette and a [`Converter`] and runs the pipeline once.
#[allow(clippy::too_many_arguments)]
pub fn convert<S: AsRef<str>>(
    source: &RgbaImage,
    out_width: u32,
    out_height: u32,
    block_size: u32,
    palette: &[S],
    mode: DitherMode,
    metric: DistanceMetric,
    adjustments: Adjustments,
) -> Result<RgbaImage, ConvertError> {
    let palette = Palette::from_hex(palette)?;
    Converter::new(palette)
        .output_size(out_width, out_height)
        .block_size(block_size)
        .dither(mode)
        .metric(metric)
        .adjustments(adjustments)
        .convert(source)
}
