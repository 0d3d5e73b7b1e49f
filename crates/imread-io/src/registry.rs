//! Codec registry.
//!
//! The registry maps a [`Format`] (or an extension/format-id string) to a
//! [`Codec`] descriptor holding the decode and encode entry points.
//!
//! # Architecture
//!
//! Built-in codecs are registered exactly once, at first access of
//! [`CodecRegistry::global()`]. After that the registry is never mutated, so
//! lookups are plain read-only map accesses and safe from any thread.
//! Callers that prefer explicit wiring can build their own instance with
//! [`CodecRegistry::with_builtin`] (or [`CodecRegistry::new`] plus
//! [`register`](CodecRegistry::register)) and pass it around by reference.
//!
//! # Example
//!
//! ```rust
//! use imread_io::registry::CodecRegistry;
//!
//! let registry = CodecRegistry::global();
//! assert!(registry.supports_extension("png"));
//! assert!(registry.resolve("JPEG").is_ok());
//! assert!(registry.resolve("bmp").is_err());
//! ```

use crate::{Format, IoError, IoResult};
use imread_core::PixelBuffer;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Options passed to codec encoders.
///
/// Codecs without a lossy quality axis ignore `quality`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Codec-specific quality, 1-100 where applicable (JPEG).
    pub quality: Option<u8>,
}

/// Immutable codec descriptor.
///
/// One entry per format: decode and (optionally) encode entry points plus
/// the identification data the registry indexes on.
#[derive(Clone)]
pub struct Codec {
    /// Human-readable codec name (e.g. "JPEG", "PNG").
    pub name: &'static str,
    /// Format this codec handles.
    pub format: Format,
    /// File extensions without dots (e.g. `["jpg", "jpeg"]`).
    pub extensions: &'static [&'static str],
    /// Checks whether leading header bytes match this format.
    pub sniff: fn(&[u8]) -> bool,
    /// Decodes an encoded blob into a pixel buffer.
    pub decode: fn(&[u8]) -> IoResult<PixelBuffer>,
    /// Encodes a pixel buffer into a blob (None for decode-only codecs).
    pub encode: Option<fn(&PixelBuffer, &EncodeOptions) -> IoResult<Vec<u8>>>,
}

/// Central registry of image codecs.
///
/// Registration is append-only and happens at startup; lookups never take a
/// lock. See the [module documentation](self).
pub struct CodecRegistry {
    codecs: HashMap<Format, Arc<Codec>>,
    by_extension: HashMap<&'static str, Format>,
}

impl CodecRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            codecs: HashMap::new(),
            by_extension: HashMap::new(),
        }
    }

    /// Creates a registry populated with the built-in codecs for the
    /// enabled cargo features.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register_builtin_codecs();
        registry
    }

    /// Returns the process-wide registry, built once on first access and
    /// read-only afterwards.
    pub fn global() -> &'static CodecRegistry {
        static INSTANCE: OnceLock<CodecRegistry> = OnceLock::new();
        INSTANCE.get_or_init(CodecRegistry::with_builtin)
    }

    fn register_builtin_codecs(&mut self) {
        #[cfg(feature = "jpeg")]
        self.register(Codec {
            name: "JPEG",
            format: Format::Jpeg,
            extensions: &["jpg", "jpeg"],
            sniff: |h| h.len() >= 3 && h[0] == 0xFF && h[1] == 0xD8 && h[2] == 0xFF,
            decode: crate::jpeg::decode,
            encode: Some(crate::jpeg::encode),
        });

        #[cfg(feature = "png")]
        self.register(Codec {
            name: "PNG",
            format: Format::Png,
            extensions: &["png"],
            sniff: |h| {
                h.len() >= 8 && h[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
            },
            decode: crate::png::decode,
            encode: Some(crate::png::encode),
        });

        #[cfg(feature = "tiff")]
        self.register(Codec {
            name: "TIFF",
            format: Format::Tiff,
            extensions: &["tif", "tiff"],
            sniff: |h| {
                h.len() >= 4
                    && (h[0..4] == [0x49, 0x49, 0x2A, 0x00] || h[0..4] == [0x4D, 0x4D, 0x00, 0x2A])
            },
            decode: crate::tiff::decode,
            encode: Some(crate::tiff::encode),
        });

        #[cfg(feature = "pvr")]
        self.register(Codec {
            name: "PVR",
            format: Format::Pvr,
            extensions: &["pvr"],
            sniff: |h| {
                h.len() >= 4
                    && (h[0..4] == [b'P', b'V', b'R', 0x03] || h[0..4] == [0x03, b'R', b'V', b'P'])
            },
            decode: crate::pvr::decode,
            encode: Some(crate::pvr::encode),
        });
    }

    /// Registers a codec. Later registrations for the same format win.
    pub fn register(&mut self, codec: Codec) {
        for ext in codec.extensions {
            self.by_extension.insert(ext, codec.format);
        }
        self.codecs.insert(codec.format, Arc::new(codec));
    }

    /// Returns an iterator over registered codec names.
    pub fn codec_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.codecs.values().map(|c| c.name)
    }

    /// Resolves a format id or file extension (case-insensitive) to a codec.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFormat`] when no codec matches.
    pub fn resolve(&self, id_or_extension: &str) -> IoResult<&Codec> {
        let format = Format::from_name(id_or_extension);
        if format != Format::Unknown {
            return self.resolve_format(format);
        }
        let lower = id_or_extension.to_lowercase();
        self.by_extension
            .get(lower.as_str())
            .and_then(|f| self.codecs.get(f))
            .map(|arc| arc.as_ref())
            .ok_or_else(|| IoError::unsupported(id_or_extension))
    }

    /// Resolves a [`Format`] to a codec.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFormat`] when no codec is registered.
    pub fn resolve_format(&self, format: Format) -> IoResult<&Codec> {
        self.codecs
            .get(&format)
            .map(|arc| arc.as_ref())
            .ok_or_else(|| IoError::unsupported(format!("{:?}", format).to_lowercase()))
    }

    /// Checks whether an extension (case-insensitive) is supported.
    pub fn supports_extension(&self, ext: &str) -> bool {
        self.by_extension.contains_key(ext.to_lowercase().as_str())
    }

    /// Detects the format of a blob by magic bytes.
    pub fn sniff(&self, header: &[u8]) -> Option<Format> {
        self.codecs
            .values()
            .find(|codec| (codec.sniff)(header))
            .map(|codec| codec.format)
    }

    /// Decodes a blob with the codec registered for `format`.
    ///
    /// # Errors
    ///
    /// [`IoError::UnsupportedFormat`] when no codec is registered,
    /// [`IoError::DecodeError`] for malformed input.
    pub fn decode(&self, bytes: &[u8], format: Format) -> IoResult<PixelBuffer> {
        let codec = self.resolve_format(format)?;
        debug!(codec = codec.name, len = bytes.len(), "decoding blob");
        (codec.decode)(bytes)
    }

    /// Encodes a buffer with the codec registered for `format`.
    ///
    /// # Errors
    ///
    /// [`IoError::UnsupportedFormat`] when no codec is registered or the
    /// codec is decode-only, [`IoError::EncodeError`] when the buffer's
    /// channel/depth combination is not representable.
    pub fn encode(
        &self,
        buffer: &PixelBuffer,
        format: Format,
        options: &EncodeOptions,
    ) -> IoResult<Vec<u8>> {
        let codec = self.resolve_format(format)?;
        let encode = codec
            .encode
            .ok_or_else(|| IoError::unsupported(format!("{} (decode-only)", codec.name)))?;
        debug!(
            codec = codec.name,
            width = buffer.width(),
            height = buffer.height(),
            channels = buffer.channels(),
            "encoding buffer"
        );
        encode(buffer, options)
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_registry() {
        let registry = CodecRegistry::global();
        let names: Vec<_> = registry.codec_names().collect();
        assert!(!names.is_empty());

        #[cfg(feature = "png")]
        assert!(registry.supports_extension("png"));

        #[cfg(feature = "jpeg")]
        assert!(registry.supports_extension("jpeg"));

        #[cfg(feature = "pvr")]
        assert!(registry.supports_extension("pvr"));
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let registry = CodecRegistry::global();

        #[cfg(feature = "jpeg")]
        {
            let a = registry.resolve("jpg").unwrap().name;
            let b = registry.resolve("JPG").unwrap().name;
            let c = registry.resolve("jpeg").unwrap().name;
            assert_eq!(a, b);
            assert_eq!(a, c);
        }
    }

    #[test]
    fn test_resolve_unknown_fails() {
        let registry = CodecRegistry::global();
        assert!(matches!(
            registry.resolve("bmp"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_sniff() {
        let registry = CodecRegistry::global();

        #[cfg(feature = "png")]
        {
            let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
            assert_eq!(registry.sniff(&png_header), Some(Format::Png));
        }

        #[cfg(feature = "jpeg")]
        {
            let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
            assert_eq!(registry.sniff(&jpeg_header), Some(Format::Jpeg));
        }

        assert_eq!(registry.sniff(&[0x00, 0x01, 0x02, 0x03]), None);
    }

    #[test]
    fn test_empty_registry_rejects_everything() {
        let registry = CodecRegistry::new();
        assert!(registry.resolve("png").is_err());
        assert!(registry.resolve_format(Format::Jpeg).is_err());
    }
}
