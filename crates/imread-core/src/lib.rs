//! # imread-core
//!
//! Core types for the imread image-handling stack.
//!
//! This crate provides the foundational types used throughout imread:
//!
//! - [`PixelBuffer`] - Owned, contiguous pixel storage with validated geometry
//! - [`SampleDepth`] - Per-channel sample width (8, 16 or 32 bits)
//! - [`Layout`] - Interleaved vs. planar channel ordering
//! - [`planar`] - Channel split/merge operations on pixel buffers
//!
//! ## Design Philosophy
//!
//! A [`PixelBuffer`] owns exactly `width * height * channels *
//! bytes_per_sample` bytes; every constructor validates that invariant, so
//! downstream code (codecs, planar operations, array bridges) can index the
//! byte region without re-checking. Buffers are mutated only by whole-buffer
//! replacement - there is no partial in-place channel rewrite outside of
//! [`planar::merge`], which always allocates a fresh buffer.
//!
//! ## Crate Structure
//!
//! This crate is the foundation of imread and has no internal dependencies.
//! The other imread crates build on it:
//!
//! ```text
//! imread-core (this crate)
//!    ^
//!    |
//!    +-- imread-io (codec registry, Image, format I/O)
//!    +-- imread-array (ndarray interop)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod planar;

pub use buffer::{Layout, PixelBuffer, SampleDepth};
pub use error::{Error, Result};
