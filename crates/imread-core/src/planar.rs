//! Channel split and merge.
//!
//! [`split`] fans a multi-channel buffer out into independently owned
//! single-channel buffers; [`merge`] is the inverse. Both are pure: inputs
//! are never mutated and outputs never alias input storage. Extracting one
//! channel from an interleaved buffer is inherently a stride-changing copy,
//! so there is no zero-copy variant.
//!
//! The core correctness law, checked by the tests below and by the
//! integration suite in `imread-io`, is that `merge(&split(buf))` is
//! byte-identical to `buf` for every valid interleaved buffer.
//!
//! # Example
//!
//! ```rust
//! use imread_core::{planar, PixelBuffer, SampleDepth, Layout};
//!
//! let data: Vec<u8> = (0..2 * 2 * 3).map(|i| i as u8).collect();
//! let rgb = PixelBuffer::from_bytes(2, 2, 3, SampleDepth::U8, Layout::Interleaved, data).unwrap();
//!
//! let planes = planar::split(&rgb);
//! assert_eq!(planes.len(), 3);
//!
//! let merged = planar::merge(&planes).unwrap();
//! assert_eq!(merged.bytes(), rgb.bytes());
//! ```

use crate::buffer::{Layout, PixelBuffer};
use crate::error::{Error, Result};

/// Splits a buffer into one single-channel buffer per channel.
///
/// Outputs are ordered by channel index as stored (e.g. R, G, B, A), each
/// with the parent's width, height and sample depth. A single-channel input
/// yields one copy of itself.
pub fn split(buf: &PixelBuffer) -> Vec<PixelBuffer> {
    let channels = buf.channels() as usize;
    let bps = buf.depth().bytes_per_sample();
    let pixel_count = buf.pixel_count();
    let src = buf.bytes();

    (0..channels)
        .map(|ch| {
            let mut plane = Vec::with_capacity(pixel_count * bps);
            match buf.layout() {
                Layout::Interleaved => {
                    // Stride-changing copy: one sample every `channels` samples.
                    for px in 0..pixel_count {
                        let off = (px * channels + ch) * bps;
                        plane.extend_from_slice(&src[off..off + bps]);
                    }
                }
                Layout::Planar => {
                    let block = pixel_count * bps;
                    plane.extend_from_slice(&src[ch * block..(ch + 1) * block]);
                }
            }
            // Geometry is inherited from a validated buffer.
            PixelBuffer::from_bytes(
                buf.width(),
                buf.height(),
                1,
                buf.depth(),
                Layout::Interleaved,
                plane,
            )
            .expect("plane geometry derived from a valid buffer")
        })
        .collect()
}

/// Merges single-channel buffers into one interleaved composite.
///
/// Channel order follows the input order. All inputs must be single-channel
/// and agree on width, height and sample depth.
///
/// # Errors
///
/// - [`Error::InvalidChannelCount`] for an empty slice or more than four planes
/// - [`Error::ChannelMismatch`] when an input is not single-channel
/// - [`Error::DimensionMismatch`] when widths or heights disagree
/// - [`Error::DepthMismatch`] when sample depths disagree
pub fn merge<B: std::borrow::Borrow<PixelBuffer>>(planes: &[B]) -> Result<PixelBuffer> {
    if planes.is_empty() || planes.len() > 4 {
        return Err(Error::InvalidChannelCount(planes.len()));
    }
    let first: &PixelBuffer = planes[0].borrow();
    for plane in planes {
        let plane: &PixelBuffer = plane.borrow();
        if plane.channels() != 1 {
            return Err(Error::channel_mismatch(1, plane.channels()));
        }
        if plane.width() != first.width() || plane.height() != first.height() {
            return Err(Error::dimension_mismatch(
                (first.width(), first.height()),
                (plane.width(), plane.height()),
            ));
        }
        if plane.depth() != first.depth() {
            return Err(Error::depth_mismatch(first.depth(), plane.depth()));
        }
    }

    let channels = planes.len();
    let bps = first.depth().bytes_per_sample();
    let pixel_count = first.pixel_count();
    let mut out = vec![0u8; pixel_count * channels * bps];

    for (ch, plane) in planes.iter().enumerate() {
        let src = plane.borrow().bytes();
        for px in 0..pixel_count {
            let dst_off = (px * channels + ch) * bps;
            let src_off = px * bps;
            out[dst_off..dst_off + bps].copy_from_slice(&src[src_off..src_off + bps]);
        }
    }

    PixelBuffer::from_bytes(
        first.width(),
        first.height(),
        channels as u8,
        first.depth(),
        Layout::Interleaved,
        out,
    )
}
