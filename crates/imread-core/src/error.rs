//! Error types for core pixel-buffer operations.
//!
//! Covers buffer construction (geometry and size validation) and the planar
//! split/merge operations. I/O and codec failures live in `imread-io`.

use crate::buffer::SampleDepth;
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing or combining pixel buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Width or height is zero, or the byte size would overflow.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Channel count outside the supported `1..=4` range.
    #[error("invalid channel count: {0} (expected 1..=4)")]
    InvalidChannelCount(usize),

    /// Supplied byte region does not match the buffer geometry.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        /// Bytes required by width * height * channels * bytes_per_sample
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },

    /// Two buffers disagree in width or height.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First buffer width
        a_width: u32,
        /// First buffer height
        a_height: u32,
        /// Second buffer width
        b_width: u32,
        /// Second buffer height
        b_height: u32,
    },

    /// Two buffers disagree in sample depth.
    #[error("sample depth mismatch: {expected} vs {got}")]
    DepthMismatch {
        /// Depth of the reference buffer
        expected: SampleDepth,
        /// Depth of the offending buffer
        got: SampleDepth,
    },

    /// A buffer has the wrong channel count for the operation.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Expected channel count
        expected: u8,
        /// Actual channel count
        got: u8,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::BufferSizeMismatch`] error.
    #[inline]
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::BufferSizeMismatch { expected, actual }
    }

    /// Creates an [`Error::DimensionMismatch`] error from two (w, h) pairs.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::DepthMismatch`] error.
    #[inline]
    pub fn depth_mismatch(expected: SampleDepth, got: SampleDepth) -> Self {
        Self::DepthMismatch { expected, got }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: u8, got: u8) -> Self {
        Self::ChannelMismatch { expected, got }
    }
}
