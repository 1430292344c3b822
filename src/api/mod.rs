//! Conversion pipeline entry points.

mod builder;
mod error;

pub use builder::{convert, Converter};
pub use error::ConvertError;
