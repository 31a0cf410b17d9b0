//! Error types for scanline reconstruction.

use thiserror::Error;

/// Result type alias for scanline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when a caller hands in malformed scanline data.
///
/// None of these are transient: they all mean the upstream stream is corrupt
/// and the decode should be abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Bytes-per-pixel is zero, wider than any PNG pixel, or unusable for the row.
    #[error("invalid pixel stride: bpp {bpp} for a {row_len}-byte row")]
    InvalidStride {
        /// Bytes per pixel supplied by the caller.
        bpp: usize,
        /// Length of the row being reconstructed.
        row_len: usize,
    },
    /// Two byte sequences that must line up have different lengths.
    #[error("length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Length required by the first operand.
        expected: usize,
        /// Length actually provided.
        actual: usize,
    },
    /// Bit depth outside {1, 2, 4, 8, 16}.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u8),
    /// Filter tag outside 0..=4.
    #[error("unknown filter type: {0}")]
    UnknownFilterType(u8),
    /// A tagged scanline stream that does not divide into whole records.
    #[error("truncated scanline data: {len} bytes is not a multiple of the {stride}-byte stride")]
    TruncatedScanlines {
        /// Tag byte plus row bytes.
        stride: usize,
        /// Total length of the stream.
        len: usize,
    },
    /// A byte run that cannot hold a whole number of samples.
    #[error("{len} bytes cannot be split into {bit_depth}-bit samples")]
    MisalignedSamples {
        /// Length of the byte run.
        len: usize,
        /// Declared bit depth.
        bit_depth: u8,
    },
}
