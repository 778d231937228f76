//! Error types for ThumbHash encoding and decoding.

use thiserror::Error;

/// Errors that can occur during ThumbHash encoding or decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThumbhashError {
    /// The image dimensions are invalid (zero or larger than 100 pixels).
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// The width value.
        width: u32,
        /// The height value.
        height: u32,
        /// Why the dimensions are invalid.
        reason: &'static str,
    },

    /// The RGBA pixel buffer does not hold exactly `width * height * 4` bytes.
    #[error("pixel buffer length mismatch: expected {expected}, got {actual}")]
    BufferLengthMismatch {
        /// The expected length.
        expected: usize,
        /// The actual length.
        actual: usize,
    },

    /// The hash bytes cannot be decoded.
    #[error("malformed ThumbHash: {0}")]
    MalformedHash(String),
}
