//! Color types and conversion utilities
//!
//! This module provides the two color representations the pipeline works in:
//!
//! - [`Rgb`]: 8-bit gamma-encoded sRGB, the storage and I/O representation.
//! - [`Lab`]: CIE L\*a\*b\* perceptual coordinates, used for all color
//!   distance measurement.
//!
//! Conversion is one-way (sRGB -> Lab) and deterministic; a [`Lab`] value is
//! never mutated once computed.
//!
//! # Example
//!
//! ```
//! use pixelgrid::{Rgb, Lab, delta_e76};
//!
//! let red: Rgb = "#ff0000".parse().unwrap();
//! let orange: Rgb = "#ff8000".parse().unwrap();
//!
//! let d = delta_e76(Lab::from(red), Lab::from(orange));
//! assert!(d > 0.0);
//! ```

mod lab;
mod rgb;

pub use lab::{ciede2000, delta_e76, Lab};
pub use rgb::Rgb;
