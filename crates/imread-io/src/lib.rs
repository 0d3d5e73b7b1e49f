//! # imread-io
//!
//! Image decoding and encoding for the imread stack.
//!
//! This crate turns encoded blobs and files into [`imread_core::PixelBuffer`]
//! values and back:
//!
//! - **JPEG** - Lossy baseline, quality setting, CMYK converted on decode
//! - **PNG** - Lossless, 8/16-bit, alpha support
//! - **TIFF** - Lossless, 8/16/32-bit grayscale/RGB/RGBA
//! - **PVR** - PowerVR v3 container, uncompressed 8-bit formats
//!
//! # Architecture
//!
//! Formats are wired through a registry of codec descriptors:
//!
//! - [`Codec`] - One descriptor per format: sniff, decode and encode entry
//!   points
//! - [`CodecRegistry`] - Maps formats and extensions to codecs; a global
//!   instance is built once and shared
//! - [`Image`] - A decoded pixel buffer plus format metadata, with planar
//!   split/merge and preview hooks
//! - [`read`] / [`write`] - High-level functions with format auto-detection
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use imread_io::{read, write};
//!
//! // Read any supported format (auto-detected)
//! let image = read("input.jpg")?;
//!
//! // Write to a different format
//! write("output.png", &image)?;
//! ```
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Bit Depths | Features |
//! |--------|------|-------|------------|----------|
//! | JPEG | Yes | Yes | 8 (16 luma read) | Quality setting, CMYK read |
//! | PNG | Yes | Yes | 8, 16 | Alpha, lossless |
//! | TIFF | Yes | Yes | 8, 16, 32 | Gray/RGB/RGBA, lossless |
//! | PVR | Yes | Yes | 8 | Uncompressed v3 container |
//!
//! # Feature Flags
//!
//! - `jpeg` - JPEG support (default)
//! - `png` - PNG support (default)
//! - `tiff` - TIFF support (default)
//! - `pvr` - PVR support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod format;
mod image;
pub mod registry;

#[cfg(feature = "jpeg")]
pub mod jpeg;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "tiff")]
pub mod tiff;

#[cfg(feature = "pvr")]
pub mod pvr;

pub use error::{IoError, IoResult};
pub use format::Format;
pub use image::{Image, WriteOptions};
pub use registry::{Codec, CodecRegistry, EncodeOptions};

use std::path::Path;

/// Reads an image from a file, auto-detecting the format.
///
/// The format is detected by file extension first and magic bytes second.
/// Shorthand for [`Image::from_path`].
///
/// # Example
///
/// ```rust,ignore
/// use imread_io::read;
///
/// let image = read("input.png")?;
/// println!("Size: {}x{}", image.width(), image.height());
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported
/// - The blob is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    Image::from_path(path)
}

/// Writes an image to a file, detecting the format from the extension.
///
/// Shorthand for [`Image::write_path`] with default options.
///
/// # Example
///
/// ```rust,ignore
/// use imread_io::{read, write};
///
/// let image = read("input.jpg")?;
/// write("output.png", &image)?;
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be created
/// - The format is not supported for writing
/// - The buffer's channel/depth combination is incompatible with the format
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    image.write_path(path, &WriteOptions::default())
}
