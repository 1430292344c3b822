use thiserror::Error;

use crate::palette::PaletteError;

/// Error produced by a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The palette could not be built from the supplied colors.
    #[error("invalid palette: {0}")]
    Palette(#[from] PaletteError),

    /// The source image has zero width or height.
    #[error("source image is empty")]
    EmptySource,

    /// The conversion was cancelled between pipeline stages.
    #[error("conversion cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ConvertError::EmptySource.to_string(), "source image is empty");
        assert_eq!(ConvertError::Cancelled.to_string(), "conversion cancelled");
    }

    #[test]
    fn test_palette_error_converts() {
        let err: ConvertError = PaletteError::Empty.into();
        assert!(matches!(err, ConvertError::Palette(PaletteError::Empty)));
    }
}
