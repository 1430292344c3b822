//! Error diffusion kernel definitions.
//!
//! Each kernel specifies how the quantization error of one pixel is
//! distributed to neighboring pixels that have not been visited yet, plus
//! the scan discipline (serpentine or plain raster) its algorithm uses.

/// An error diffusion kernel.
///
/// Each entry is an `(dx, dy, weight)` offset relative to the current pixel;
/// every neighbor receives `error * weight / divisor`. Entries only ever
/// reach forward in scan order (`dy == 0` with `dx > 0`, or `dy > 0`), so
/// error never lands on an already-quantized pixel.
///
/// # Error Propagation
///
/// Most kernels propagate 100% of the error (weights sum to the divisor).
/// Atkinson intentionally propagates only 6/8, trading tonal accuracy for
/// higher contrast and less noise.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// `(dx, dy, weight)` entries for error diffusion.
    ///
    /// `dx` is flipped on right-to-left rows when `serpentine` is set;
    /// `dy` is always non-negative (at or below the current row).
    pub entries: &'static [(i32, i32, u8)],

    /// Divisor normalizing the weights.
    pub divisor: u8,

    /// Whether the scan alternates direction per row, mirroring `dx` on
    /// right-to-left rows.
    pub serpentine: bool,
}

/// Floyd-Steinberg kernel, serpentine scan.
///
/// Distributes error to 4 neighbors with 100% propagation (16/16). The
/// classic algorithm and this crate's default mode.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    serpentine: true,
};

/// Atkinson kernel, plain raster scan.
///
/// Six taps of weight 1 over a divisor of 8: only 75% of the error is
/// propagated, the rest deliberately discarded. Scans every row
/// left-to-right -- no serpentine in this design.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
    serpentine: false,
};

/// Jarvis-Judice-Ninke kernel, serpentine scan.
///
/// Twelve taps across the current row and two rows below, 100% propagation
/// (48/48). The wide spread gives smoother gradients than Floyd-Steinberg
/// at higher cost.
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    entries: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48,
    serpentine: true,
};
