//! Error types for color parsing and palette validation.

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after
    /// stripping `#`)
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,

    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette construction.
///
/// A palette build is atomic: any malformed entry rejects the whole list,
/// so a [`Palette`](crate::Palette) never holds a partial palette.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No colors provided
    #[error("palette cannot be empty")]
    Empty,

    /// A hex string in the list failed to parse
    #[error("invalid palette color {hex:?} at index {index}: {source}")]
    ParseColor {
        /// Index of the offending entry in the input list
        index: usize,
        /// The offending input string
        hex: String,
        /// The underlying parse failure
        source: ParseColorError,
    },
}
