//! Palette index and nearest-color matching.

mod error;
#[allow(clippy::module_inception)]
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{DistanceMetric, Palette};
