//! The polymorphic image type.
//!
//! [`Image`] composes one [`PixelBuffer`] with a [`Format`] hint recording
//! where the pixels came from. Images are created by decoding (from a path
//! or an in-memory blob), by wrapping an existing buffer, or by
//! [`Image::merge`]; they are encoded back out through the codec registry.
//!
//! # Example
//!
//! ```rust,ignore
//! use imread_io::{Image, WriteOptions};
//!
//! let image = Image::from_path("photo.jpg")?;
//! println!("{}x{}, {} planes", image.width(), image.height(), image.planes());
//!
//! // Re-encode as PNG bytes
//! let blob = image.write_blob(&WriteOptions::format(imread_io::Format::Png))?;
//! ```
//!
//! # Preview Hooks
//!
//! [`to_jpeg_bytes`](Image::to_jpeg_bytes), [`to_png_bytes`](Image::to_png_bytes)
//! and [`to_html_fragment`](Image::to_html_fragment) exist for embedding
//! environments (notebook-style previews). Each is defined purely in terms
//! of [`write_blob`](Image::write_blob) and is byte-identical to the
//! corresponding explicit call.

use crate::registry::{CodecRegistry, EncodeOptions};
use crate::{Format, IoError, IoResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use imread_core::{planar, PixelBuffer};
use std::path::Path;
use tracing::debug;

/// Options for [`Image::write_blob`] and [`Image::write_path`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Target format. Defaults to the image's format hint (for blobs) or
    /// the target path's extension (for files).
    pub format: Option<Format>,
    /// Codec-specific quality, 1-100 where applicable (JPEG). Ignored by
    /// codecs without a lossy quality axis.
    pub quality: Option<u8>,
}

impl WriteOptions {
    /// Options selecting an explicit target format.
    pub fn format(format: Format) -> Self {
        Self {
            format: Some(format),
            quality: None,
        }
    }
}

/// A decoded image: one owned pixel buffer plus format metadata.
#[derive(Debug, Clone)]
pub struct Image {
    buffer: PixelBuffer,
    format_hint: Format,
}

impl Image {
    /// Decodes an image from a file.
    ///
    /// The format is inferred from the extension (case-insensitive); when
    /// the extension is unknown the leading bytes are sniffed instead. The
    /// file handle is scoped to the read and closed before decoding.
    ///
    /// # Errors
    ///
    /// [`IoError::NotFound`] when the path does not resolve,
    /// [`IoError::UnsupportedFormat`] when no codec matches, and any
    /// [`IoError::DecodeError`] propagated from the codec.
    pub fn from_path<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IoError::not_found(path)
            } else {
                IoError::Io(e)
            }
        })?;

        let registry = CodecRegistry::global();
        let mut format = Format::from_extension(path);
        if format == Format::Unknown {
            format = registry.sniff(&bytes).unwrap_or(Format::Unknown);
        }
        if format == Format::Unknown {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown");
            return Err(IoError::unsupported(ext));
        }

        debug!(path = %path.display(), ?format, "decoding image from file");
        let buffer = registry.decode(&bytes, format)?;
        Ok(Self {
            buffer,
            format_hint: format,
        })
    }

    /// Decodes an image from an in-memory blob with an explicit format.
    pub fn from_blob(bytes: &[u8], format: Format) -> IoResult<Self> {
        let buffer = CodecRegistry::global().decode(bytes, format)?;
        Ok(Self {
            buffer,
            format_hint: format,
        })
    }

    /// Wraps an existing pixel buffer.
    pub fn from_buffer(buffer: PixelBuffer, format_hint: Format) -> Self {
        Self {
            buffer,
            format_hint,
        }
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Returns the number of planes (the buffer's channel count; 1 for an
    /// extracted single-channel plane).
    #[inline]
    pub fn planes(&self) -> usize {
        self.buffer.channels() as usize
    }

    /// Returns a read-only view of the pixel buffer.
    #[inline]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Returns the format this image was decoded from
    /// ([`Format::Unknown`] for buffers built in memory).
    #[inline]
    pub fn format_hint(&self) -> Format {
        self.format_hint
    }

    /// Consumes the image, returning its pixel buffer.
    #[inline]
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    /// Encodes the image into an in-memory blob.
    ///
    /// The target format is `options.format`, falling back to the image's
    /// format hint when omitted.
    pub fn write_blob(&self, options: &WriteOptions) -> IoResult<Vec<u8>> {
        let format = options.format.unwrap_or(self.format_hint);
        CodecRegistry::global().encode(
            &self.buffer,
            format,
            &EncodeOptions {
                quality: options.quality,
            },
        )
    }

    /// Encodes the image and writes the blob to a file.
    ///
    /// When `options.format` is omitted the target path's extension picks
    /// the codec, falling back to the format hint for unknown extensions.
    /// The bytes written are exactly those [`write_blob`](Self::write_blob)
    /// would return for the resolved format.
    pub fn write_path<P: AsRef<Path>>(&self, path: P, options: &WriteOptions) -> IoResult<()> {
        let path = path.as_ref();
        let format = options
            .format
            .or_else(|| match Format::from_extension(path) {
                Format::Unknown => None,
                f => Some(f),
            })
            .unwrap_or(self.format_hint);

        let blob = self.write_blob(&WriteOptions {
            format: Some(format),
            quality: options.quality,
        })?;
        debug!(path = %path.display(), ?format, bytes = blob.len(), "writing image to file");
        std::fs::write(path, blob)?;
        Ok(())
    }

    /// Splits the image into one single-channel image per plane.
    ///
    /// Outputs are ordered by channel index, each with this image's width,
    /// height, sample depth and format hint. Pure; the source is unchanged.
    pub fn split(&self) -> Vec<Image> {
        planar::split(&self.buffer)
            .into_iter()
            .map(|plane| Image {
                buffer: plane,
                format_hint: self.format_hint,
            })
            .collect()
    }

    /// Merges single-channel images into one composite.
    ///
    /// The inverse of [`split`](Self::split): channel order follows input
    /// order and `merge(&image.split())` is pixel-identical to `image`.
    /// The composite takes the first plane's format hint.
    ///
    /// # Errors
    ///
    /// Propagates [`imread_core::Error`] when the planes disagree in
    /// dimensions, depth or channel count.
    pub fn merge(planes: &[Image]) -> IoResult<Image> {
        let buffers: Vec<&PixelBuffer> = planes.iter().map(|p| p.buffer()).collect();
        let merged = planar::merge(&buffers)?;
        let format_hint = planes
            .first()
            .map(|p| p.format_hint)
            .unwrap_or(Format::Unknown);
        Ok(Image {
            buffer: merged,
            format_hint,
        })
    }

    /// Returns the image encoded as JPEG bytes.
    ///
    /// Byte-identical to `write_blob` with an explicit JPEG format.
    pub fn to_jpeg_bytes(&self) -> IoResult<Vec<u8>> {
        self.write_blob(&WriteOptions::format(Format::Jpeg))
    }

    /// Returns the image encoded as PNG bytes.
    ///
    /// Byte-identical to `write_blob` with an explicit PNG format.
    pub fn to_png_bytes(&self) -> IoResult<Vec<u8>> {
        self.write_blob(&WriteOptions::format(Format::Png))
    }

    /// Returns an inline HTML `<img>` fragment embedding the JPEG blob as
    /// a base64 data URI.
    ///
    /// The data URI is always tagged `image/jpeg` regardless of the
    /// image's native format; the tag is an external compatibility
    /// contract and must not change per-format.
    pub fn to_html_fragment(&self) -> IoResult<String> {
        let blob = self.to_jpeg_bytes()?;
        Ok(format!(
            "<img src='data:image/jpeg;base64,{}'>",
            BASE64.encode(&blob)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use imread_core::{Layout, SampleDepth};

    fn test_image(width: u32, height: u32, channels: u8) -> Image {
        let len = (width * height * channels as u32) as usize;
        let data: Vec<u8> = (0..len).map(|i| (i % 256) as u8).collect();
        let buffer =
            PixelBuffer::from_bytes(width, height, channels, SampleDepth::U8, Layout::Interleaved, data)
                .unwrap();
        Image::from_buffer(buffer, Format::Png)
    }

    #[test]
    fn test_accessors() {
        let image = test_image(24, 16, 3);
        assert_eq!(image.width(), 24);
        assert_eq!(image.height(), 16);
        assert_eq!(image.planes(), 3);
        assert_eq!(image.format_hint(), Format::Png);
        assert_eq!(image.buffer().bytes().len(), 24 * 16 * 3);
    }

    #[test]
    fn test_split_merge_structure() {
        let image = test_image(10, 10, 4);
        let planes = image.split();
        assert_eq!(planes.len(), image.planes());
        for plane in &planes {
            assert_eq!(plane.width(), image.width());
            assert_eq!(plane.height(), image.height());
            assert_eq!(plane.planes(), 1);
            assert_eq!(plane.format_hint(), image.format_hint());
        }

        let merged = Image::merge(&planes).unwrap();
        assert_eq!(merged.planes(), image.planes());
        assert_eq!(merged.buffer().bytes(), image.buffer().bytes());
    }

    #[test]
    fn test_merge_dimension_mismatch() {
        let a = test_image(10, 10, 1);
        let b = test_image(20, 20, 1);
        let err = Image::merge(&[a, b]).unwrap_err();
        assert!(matches!(
            err,
            IoError::Core(imread_core::Error::DimensionMismatch { .. })
        ));
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_from_blob_roundtrip() {
        let image = test_image(12, 12, 3);
        let blob = image.write_blob(&WriteOptions::format(Format::Png)).unwrap();
        let reloaded = Image::from_blob(&blob, Format::Png).unwrap();
        assert_eq!(reloaded.buffer().bytes(), image.buffer().bytes());
        assert_eq!(reloaded.format_hint(), Format::Png);
    }

    #[cfg(all(feature = "jpeg", feature = "png"))]
    #[test]
    fn test_preview_hooks_match_write_blob() {
        let image = test_image(16, 16, 3);

        let jpeg = image.write_blob(&WriteOptions::format(Format::Jpeg)).unwrap();
        assert_eq!(image.to_jpeg_bytes().unwrap(), jpeg);

        let png = image.write_blob(&WriteOptions::format(Format::Png)).unwrap();
        assert_eq!(image.to_png_bytes().unwrap(), png);
    }

    #[cfg(feature = "jpeg")]
    #[test]
    fn test_html_fragment_shape() {
        let image = test_image(8, 8, 3);
        let fragment = image.to_html_fragment().unwrap();
        let expected = format!(
            "<img src='data:image/jpeg;base64,{}'>",
            BASE64.encode(image.to_jpeg_bytes().unwrap())
        );
        assert_eq!(fragment, expected);
        assert!(fragment.starts_with("<img src='data:image/jpeg;base64,"));
        assert!(fragment.ends_with("'>"));
    }

    #[test]
    fn test_from_path_not_found() {
        let err = Image::from_path("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, IoError::NotFound(_)));
    }

    #[test]
    fn test_from_path_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.bmp");
        std::fs::write(&path, b"BM not a real bitmap").unwrap();
        let err = Image::from_path(&path).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_write_path_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let image = test_image(20, 10, 3);
        image.write_path(&path, &WriteOptions::default()).unwrap();

        let reloaded = Image::from_path(&path).unwrap();
        assert_eq!(reloaded.width(), 20);
        assert_eq!(reloaded.height(), 10);
        assert_eq!(reloaded.buffer().bytes(), image.buffer().bytes());
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_from_path_extension_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let image = test_image(6, 6, 3);

        let lower = dir.path().join("x.png");
        let upper = dir.path().join("x.PNG");
        image.write_path(&lower, &WriteOptions::default()).unwrap();
        image.write_path(&upper, &WriteOptions::default()).unwrap();

        let a = Image::from_path(&lower).unwrap();
        let b = Image::from_path(&upper).unwrap();
        assert_eq!(a.format_hint(), b.format_hint());
        assert_eq!(a.buffer().bytes(), b.buffer().bytes());
    }
}
