//! Pre-quantization adjustments: tone and sharpness.
//!
//! Both passes operate on the downsampled working grid, before any palette
//! quantization. Order matters and is fixed by the pipeline: sharpening runs
//! first on the raw downsampled pixels, then the tone pass. Each pass is a
//! detectable true no-op at its neutral setting -- the buffer is left
//! byte-identical.

mod options;
mod sharpen;
mod tone;

pub use options::Adjustments;
pub use sharpen::sharpen;
pub use tone::apply_tone;
