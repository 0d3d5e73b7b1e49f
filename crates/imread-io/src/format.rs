//! Format identification.
//!
//! Identifies image formats from file extensions, explicit format names and
//! magic bytes.

use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Baseline JPEG.
    Jpeg,
    /// PNG.
    Png,
    /// TIFF.
    Tiff,
    /// PVR (PowerVR texture container, v3).
    Pvr,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Identifies the format from a file extension (case-insensitive).
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => Format::Jpeg,
            Some("png") => Format::Png,
            Some("tif") | Some("tiff") => Format::Tiff,
            Some("pvr") => Format::Pvr,
            _ => Format::Unknown,
        }
    }

    /// Parses an explicit format id, as passed in write options
    /// (case-insensitive, extension aliases accepted).
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "jpg" | "jpeg" => Format::Jpeg,
            "png" => Format::Png,
            "tif" | "tiff" => Format::Tiff,
            "pvr" => Format::Pvr,
            _ => Format::Unknown,
        }
    }

    /// Identifies the format from leading magic bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        // JPEG: FF D8 FF
        if bytes.len() >= 3 && bytes[0..3] == [0xFF, 0xD8, 0xFF] {
            return Format::Jpeg;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if bytes.len() >= 8 && bytes[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
            return Format::Png;
        }

        if bytes.len() >= 4 {
            // TIFF: II (little-endian) or MM (big-endian)
            if bytes[0..4] == [0x49, 0x49, 0x2A, 0x00] {
                return Format::Tiff;
            }
            if bytes[0..4] == [0x4D, 0x4D, 0x00, 0x2A] {
                return Format::Tiff;
            }
            // PVR v3: "PVR\x03", or byte-swapped when written big-endian
            if bytes[0..4] == [b'P', b'V', b'R', 0x03] || bytes[0..4] == [0x03, b'R', b'V', b'P'] {
                return Format::Pvr;
            }
        }

        Format::Unknown
    }

    /// Returns the canonical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Jpeg => "jpg",
            Format::Png => "png",
            Format::Tiff => "tif",
            Format::Pvr => "pvr",
            Format::Unknown => "",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Jpeg => "image/jpeg",
            Format::Png => "image/png",
            Format::Tiff => "image/tiff",
            Format::Pvr => "application/x-pvr",
            Format::Unknown => "application/octet-stream",
        }
    }
}
