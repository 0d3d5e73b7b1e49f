//! Owned pixel storage.
//!
//! [`PixelBuffer`] is the single pixel container used throughout imread.
//! It owns a contiguous byte region whose length is tied to the buffer
//! geometry by construction:
//!
//! ```text
//! data.len() == width * height * channels * bytes_per_sample
//! ```
//!
//! # Memory Layout
//!
//! Interleaved buffers store channel samples contiguously per pixel,
//! row-major, top-to-bottom:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//! ```
//!
//! Planar buffers store each channel as one contiguous block:
//! `[R R R ... G G G ... B B B ...]`.
//!
//! Multi-byte samples ([`SampleDepth::U16`], [`SampleDepth::U32`]) are kept
//! in native byte order; codecs converting from big-endian wire formats do
//! so before constructing the buffer.
//!
//! # Usage
//!
//! ```rust
//! use imread_core::{PixelBuffer, SampleDepth};
//!
//! // A zero-filled 64x48 RGB buffer, 8 bits per channel
//! let buf = PixelBuffer::new(64, 48, 3, SampleDepth::U8).unwrap();
//! assert_eq!(buf.bytes().len(), 64 * 48 * 3);
//! ```

use crate::error::{Error, Result};

/// Per-channel sample width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleDepth {
    /// 8-bit unsigned samples.
    U8,
    /// 16-bit unsigned samples.
    U16,
    /// 32-bit unsigned samples.
    U32,
}

impl SampleDepth {
    /// Returns the number of bytes one sample occupies.
    #[inline]
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }

    /// Returns the sample width in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        (self.bytes_per_sample() * 8) as u32
    }
}

impl std::fmt::Display for SampleDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::U8 => write!(f, "u8"),
            Self::U16 => write!(f, "u16"),
            Self::U32 => write!(f, "u32"),
        }
    }
}

/// Channel ordering within the byte region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Channel samples stored contiguously per pixel (RGBRGB...).
    #[default]
    Interleaved,
    /// Each channel stored as one contiguous block (RRR...GGG...BBB...).
    Planar,
}

/// Owned, contiguous pixel storage with validated geometry.
///
/// See the [module documentation](self) for the layout contract. A buffer is
/// mutated only by whole-buffer replacement ([`replace_bytes`]); there is no
/// partial in-place channel rewrite.
///
/// [`replace_bytes`]: PixelBuffer::replace_bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    depth: SampleDepth,
    layout: Layout,
}

impl PixelBuffer {
    /// Creates a zero-filled interleaved buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for zero width/height and
    /// [`Error::InvalidChannelCount`] for channel counts outside `1..=4`.
    pub fn new(width: u32, height: u32, channels: u8, depth: SampleDepth) -> Result<Self> {
        let len = Self::byte_len_for(width, height, channels, depth)?;
        Ok(Self {
            data: vec![0u8; len],
            width,
            height,
            channels,
            depth,
            layout: Layout::Interleaved,
        })
    }

    /// Creates a buffer from existing bytes.
    ///
    /// # Errors
    ///
    /// In addition to the geometry checks of [`new`](Self::new), returns
    /// [`Error::BufferSizeMismatch`] when `data.len()` does not equal
    /// `width * height * channels * bytes_per_sample`.
    pub fn from_bytes(
        width: u32,
        height: u32,
        channels: u8,
        depth: SampleDepth,
        layout: Layout,
        data: Vec<u8>,
    ) -> Result<Self> {
        let expected = Self::byte_len_for(width, height, channels, depth)?;
        if data.len() != expected {
            return Err(Error::size_mismatch(expected, data.len()));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            depth,
            layout,
        })
    }

    /// Creates an interleaved buffer from 16-bit samples (native order).
    pub fn from_samples_u16(
        width: u32,
        height: u32,
        channels: u8,
        samples: Vec<u16>,
    ) -> Result<Self> {
        let mut data = Vec::with_capacity(samples.len() * 2);
        for s in samples {
            data.extend_from_slice(&s.to_ne_bytes());
        }
        Self::from_bytes(width, height, channels, SampleDepth::U16, Layout::Interleaved, data)
    }

    /// Creates an interleaved buffer from 32-bit samples (native order).
    pub fn from_samples_u32(
        width: u32,
        height: u32,
        channels: u8,
        samples: Vec<u32>,
    ) -> Result<Self> {
        let mut data = Vec::with_capacity(samples.len() * 4);
        for s in samples {
            data.extend_from_slice(&s.to_ne_bytes());
        }
        Self::from_bytes(width, height, channels, SampleDepth::U32, Layout::Interleaved, data)
    }

    fn byte_len_for(width: u32, height: u32, channels: u8, depth: SampleDepth) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "zero dimension"));
        }
        if channels == 0 || channels > 4 {
            return Err(Error::InvalidChannelCount(channels as usize));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels as usize))
            .and_then(|n| n.checked_mul(depth.bytes_per_sample()))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "byte size overflow"))
    }

    /// Returns the buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of channels (1..=4).
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Returns the per-channel sample depth.
    #[inline]
    pub fn depth(&self) -> SampleDepth {
        self.depth
    }

    /// Returns the channel layout.
    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the number of bytes one pixel occupies (all channels).
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels as usize * self.depth.bytes_per_sample()
    }

    /// Returns a read-only view of the byte region.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer, returning the byte region.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Replaces the whole byte region.
    ///
    /// This is the only mutation path; the replacement must match the
    /// existing geometry exactly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] when the length differs.
    pub fn replace_bytes(&mut self, data: Vec<u8>) -> Result<()> {
        if data.len() != self.data.len() {
            return Err(Error::size_mismatch(self.data.len(), data.len()));
        }
        self.data = data;
        Ok(())
    }

    /// Decodes the byte region into 16-bit samples (native order).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the depth is not [`SampleDepth::U16`];
    /// callers check [`depth`](Self::depth) first.
    pub fn to_samples_u16(&self) -> Vec<u16> {
        debug_assert_eq!(self.depth, SampleDepth::U16);
        self.data
            .chunks_exact(2)
            .map(|c| u16::from_ne_bytes([c[0], c[1]]))
            .collect()
    }

    /// Decodes the byte region into 32-bit samples (native order).
    pub fn to_samples_u32(&self) -> Vec<u32> {
        debug_assert_eq!(self.depth, SampleDepth::U32);
        self.data
            .chunks_exact(4)
            .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    /// Converts the sample data to 8-bit, truncating wider depths to their
    /// most significant byte.
    pub fn to_u8_samples(&self) -> Vec<u8> {
        match self.depth {
            SampleDepth::U8 => self.data.clone(),
            SampleDepth::U16 => self
                .to_samples_u16()
                .into_iter()
                .map(|s| (s >> 8) as u8)
                .collect(),
            SampleDepth::U32 => self
                .to_samples_u32()
                .into_iter()
                .map(|s| (s >> 24) as u8)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zero_filled() {
        let buf = PixelBuffer::new(16, 8, 3, SampleDepth::U8).unwrap();
        assert_eq!(buf.width(), 16);
        assert_eq!(buf.height(), 8);
        assert_eq!(buf.channels(), 3);
        assert_eq!(buf.bytes().len(), 16 * 8 * 3);
        assert!(buf.bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_rejects_zero_dimension() {
        assert!(PixelBuffer::new(0, 8, 3, SampleDepth::U8).is_err());
        assert!(PixelBuffer::new(8, 0, 3, SampleDepth::U8).is_err());
    }

    #[test]
    fn test_new_rejects_bad_channel_count() {
        assert!(PixelBuffer::new(8, 8, 0, SampleDepth::U8).is_err());
        assert!(PixelBuffer::new(8, 8, 5, SampleDepth::U8).is_err());
    }

    #[test]
    fn test_from_bytes_length_check() {
        let ok = PixelBuffer::from_bytes(
            4,
            4,
            2,
            SampleDepth::U8,
            Layout::Interleaved,
            vec![0; 32],
        );
        assert!(ok.is_ok());

        let short = PixelBuffer::from_bytes(
            4,
            4,
            2,
            SampleDepth::U8,
            Layout::Interleaved,
            vec![0; 31],
        );
        assert!(matches!(
            short.unwrap_err(),
            Error::BufferSizeMismatch { expected: 32, actual: 31 }
        ));
    }

    #[test]
    fn test_u16_sample_roundtrip() {
        let samples: Vec<u16> = (0..4 * 4 * 3).map(|i| i as u16 * 257).collect();
        let buf = PixelBuffer::from_samples_u16(4, 4, 3, samples.clone()).unwrap();
        assert_eq!(buf.depth(), SampleDepth::U16);
        assert_eq!(buf.bytes().len(), 4 * 4 * 3 * 2);
        assert_eq!(buf.to_samples_u16(), samples);
    }

    #[test]
    fn test_to_u8_samples_truncates_high_byte() {
        let buf = PixelBuffer::from_samples_u16(1, 1, 1, vec![0xABCD]).unwrap();
        assert_eq!(buf.to_u8_samples(), vec![0xAB]);

        let buf = PixelBuffer::from_samples_u32(1, 1, 1, vec![0xDEAD_BEEF]).unwrap();
        assert_eq!(buf.to_u8_samples(), vec![0xDE]);
    }

    #[test]
    fn test_replace_bytes() {
        let mut buf = PixelBuffer::new(2, 2, 1, SampleDepth::U8).unwrap();
        buf.replace_bytes(vec![1, 2, 3, 4]).unwrap();
        assert_eq!(buf.bytes(), &[1, 2, 3, 4]);
        assert!(buf.replace_bytes(vec![1, 2, 3]).is_err());
    }

    #[test]
    fn test_bytes_per_pixel() {
        let buf = PixelBuffer::new(2, 2, 4, SampleDepth::U16).unwrap();
        assert_eq!(buf.bytes_per_pixel(), 8);
    }
}
