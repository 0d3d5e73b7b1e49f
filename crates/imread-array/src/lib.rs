//! # imread-array
//!
//! Bridge between [`imread_io::Image`] and [`ndarray`].
//!
//! Images map to rank-3 arrays of shape `(height, width, channels)`:
//!
//! - [`from_array`] - Builds an image from a typed array view
//! - [`to_array`] - Copies an image's samples into a typed owned array
//! - [`as_array_view`] - Borrows 8-bit interleaved pixels with zero copy
//!
//! Sample types are selected through the [`Sample`] trait, implemented for
//! `u8`, `u16` and `u32` to match the buffer depths the stack carries.
//! 16- and 32-bit conversions always copy: the underlying byte storage
//! carries no alignment guarantee for wider sample types.
//!
//! # Example
//!
//! ```rust,ignore
//! use imread_array::{from_array, to_array};
//! use ndarray::Array3;
//!
//! let pixels = Array3::<u8>::zeros((480, 640, 3));
//! let image = from_array(pixels.view())?;
//!
//! let back: Array3<u8> = to_array(&image)?;
//! assert_eq!(back.dim(), (480, 640, 3));
//! ```

#![warn(missing_docs)]

use imread_core::{Layout, PixelBuffer, SampleDepth};
use imread_io::{Format, Image};
use ndarray::{Array3, ArrayView3, ShapeError};
use thiserror::Error;

/// Errors produced by array/image conversion.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Array shape cannot be expressed as an image.
    #[error("invalid array shape: {0}")]
    InvalidShape(String),

    /// The image's sample depth does not match the requested element type.
    #[error("sample depth mismatch: image is {got}, requested {expected}")]
    DepthMismatch {
        /// Depth implied by the requested element type.
        expected: SampleDepth,
        /// Depth the image actually carries.
        got: SampleDepth,
    },

    /// A zero-copy view was requested for a layout that needs conversion.
    #[error("zero-copy view unavailable: {0}")]
    ViewUnavailable(String),

    /// Shape bookkeeping failed inside ndarray.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Result alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// An unsigned sample type the image stack can carry.
///
/// Sealed in practice: the three implementations cover every
/// [`SampleDepth`] and no other type satisfies the buffer model.
pub trait Sample: Copy {
    /// The buffer depth this element type maps to.
    const DEPTH: SampleDepth;

    /// Appends this sample to a native-endian byte stream.
    fn write_ne(self, out: &mut Vec<u8>);

    /// Reads one sample from a native-endian byte group of
    /// [`SampleDepth::bytes_per_sample`] length.
    fn read_ne(bytes: &[u8]) -> Self;
}

impl Sample for u8 {
    const DEPTH: SampleDepth = SampleDepth::U8;

    fn write_ne(self, out: &mut Vec<u8>) {
        out.push(self);
    }

    fn read_ne(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl Sample for u16 {
    const DEPTH: SampleDepth = SampleDepth::U16;

    fn write_ne(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_ne_bytes());
    }

    fn read_ne(bytes: &[u8]) -> Self {
        u16::from_ne_bytes([bytes[0], bytes[1]])
    }
}

impl Sample for u32 {
    const DEPTH: SampleDepth = SampleDepth::U32;

    fn write_ne(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_ne_bytes());
    }

    fn read_ne(bytes: &[u8]) -> Self {
        u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

/// Builds an image from a `(height, width, channels)` array view.
///
/// The view may have any stride order; samples are copied in logical
/// order into an interleaved buffer. The resulting image carries
/// [`Format::Unknown`] as its hint since it never passed through a codec.
///
/// # Errors
///
/// [`BridgeError::InvalidShape`] for zero dimensions or channel counts
/// outside 1-4.
pub fn from_array<T: Sample>(view: ArrayView3<'_, T>) -> BridgeResult<Image> {
    let (height, width, channels) = view.dim();
    if height == 0 || width == 0 {
        return Err(BridgeError::InvalidShape(format!(
            "zero dimension in shape ({height}, {width}, {channels})"
        )));
    }
    if channels == 0 || channels > 4 {
        return Err(BridgeError::InvalidShape(format!(
            "channel axis must be 1-4, got {channels}"
        )));
    }
    if width > u32::MAX as usize || height > u32::MAX as usize {
        return Err(BridgeError::InvalidShape(format!(
            "dimensions ({height}, {width}) exceed the image model"
        )));
    }

    let mut data = Vec::with_capacity(view.len() * T::DEPTH.bytes_per_sample());
    for &sample in view.iter() {
        sample.write_ne(&mut data);
    }

    let buffer = PixelBuffer::from_bytes(
        width as u32,
        height as u32,
        channels as u8,
        T::DEPTH,
        Layout::Interleaved,
        data,
    )
    .map_err(|e| BridgeError::InvalidShape(e.to_string()))?;
    Ok(Image::from_buffer(buffer, Format::Unknown))
}

/// Copies an image's samples into an owned `(height, width, channels)`
/// array.
///
/// # Errors
///
/// [`BridgeError::DepthMismatch`] when `T` does not match the image's
/// sample depth.
pub fn to_array<T: Sample>(image: &Image) -> BridgeResult<Array3<T>> {
    let buffer = image.buffer();
    if buffer.depth() != T::DEPTH {
        return Err(BridgeError::DepthMismatch {
            expected: T::DEPTH,
            got: buffer.depth(),
        });
    }

    let bps = T::DEPTH.bytes_per_sample();
    let samples: Vec<T> = buffer.bytes().chunks_exact(bps).map(T::read_ne).collect();
    let shape = (
        buffer.height() as usize,
        buffer.width() as usize,
        buffer.channels() as usize,
    );

    // Planar storage interleaves on the way out so the channel axis is
    // always innermost.
    if buffer.layout() == Layout::Planar {
        let (h, w, c) = shape;
        let plane = h * w;
        let mut interleaved = Vec::with_capacity(samples.len());
        for px in 0..plane {
            for ch in 0..c {
                interleaved.push(samples[ch * plane + px]);
            }
        }
        return Ok(Array3::from_shape_vec(shape, interleaved)?);
    }

    Ok(Array3::from_shape_vec(shape, samples)?)
}

/// Borrows an 8-bit interleaved image as a `(height, width, channels)`
/// view without copying.
///
/// # Errors
///
/// [`BridgeError::DepthMismatch`] for 16/32-bit images (byte storage has
/// no alignment guarantee for wider elements) and
/// [`BridgeError::ViewUnavailable`] for planar buffers.
pub fn as_array_view(image: &Image) -> BridgeResult<ArrayView3<'_, u8>> {
    let buffer = image.buffer();
    if buffer.depth() != SampleDepth::U8 {
        return Err(BridgeError::DepthMismatch {
            expected: SampleDepth::U8,
            got: buffer.depth(),
        });
    }
    if buffer.layout() == Layout::Planar {
        return Err(BridgeError::ViewUnavailable(
            "planar buffers must be merged first".into(),
        ));
    }

    let shape = (
        buffer.height() as usize,
        buffer.width() as usize,
        buffer.channels() as usize,
    );
    Ok(ArrayView3::from_shape(shape, buffer.bytes())?)
}
