//! PVR codec (PowerVR texture container, version 3).
//!
//! Manual implementation over [`byteorder`]. Supports uncompressed
//! unsigned-byte-normalised channel formats (r8, rg8, rgb8, rgba8) with a
//! single surface, single face and no volume depth. Mipmapped files decode
//! to the top level only; compressed payloads (PVRTC, ETC) are rejected.
//!
//! # Container Layout
//!
//! The v3 header is 52 bytes, little-endian:
//!
//! ```text
//! u32 version      "PVR\x03"
//! u32 flags
//! u64 pixel format  low word: channel names, high word: per-channel bits
//! u32 colour space
//! u32 channel type  0 = unsigned byte normalised
//! u32 height
//! u32 width
//! u32 depth
//! u32 surfaces
//! u32 faces
//! u32 mip count
//! u32 metadata size
//! ```
//!
//! followed by metadata and texel data.

use crate::registry::EncodeOptions;
use crate::{IoError, IoResult};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use imread_core::{Layout, PixelBuffer, SampleDepth};
use std::io::Cursor;

/// "PVR\x03" when the version word is written little-endian.
const PVR3_VERSION: u32 = 0x0352_5650;

/// Channel type 0: unsigned byte, normalised.
const CHANNEL_TYPE_U8_NORM: u32 = 0;

const HEADER_LEN: usize = 52;

fn truncated(_: std::io::Error) -> IoError {
    IoError::DecodeError("truncated PVR header".into())
}

/// Decodes a PVR v3 blob into a pixel buffer.
pub fn decode(data: &[u8]) -> IoResult<PixelBuffer> {
    let mut r = Cursor::new(data);

    let version = r.read_u32::<LittleEndian>().map_err(truncated)?;
    if version == PVR3_VERSION.swap_bytes() {
        return Err(IoError::DecodeError(
            "byte-swapped PVR files not supported".into(),
        ));
    }
    if version != PVR3_VERSION {
        return Err(IoError::DecodeError("bad PVR magic".into()));
    }
    let _flags = r.read_u32::<LittleEndian>().map_err(truncated)?;
    let pixel_format = r.read_u64::<LittleEndian>().map_err(truncated)?;
    let _colour_space = r.read_u32::<LittleEndian>().map_err(truncated)?;
    let channel_type = r.read_u32::<LittleEndian>().map_err(truncated)?;
    let height = r.read_u32::<LittleEndian>().map_err(truncated)?;
    let width = r.read_u32::<LittleEndian>().map_err(truncated)?;
    let depth = r.read_u32::<LittleEndian>().map_err(truncated)?;
    let surfaces = r.read_u32::<LittleEndian>().map_err(truncated)?;
    let faces = r.read_u32::<LittleEndian>().map_err(truncated)?;
    let _mip_count = r.read_u32::<LittleEndian>().map_err(truncated)?;
    let meta_size = r.read_u32::<LittleEndian>().map_err(truncated)?;

    // High word zero marks an enumerated (compressed) pixel format.
    if pixel_format >> 32 == 0 {
        return Err(IoError::DecodeError(
            "compressed PVR payloads not supported".into(),
        ));
    }

    let names = (pixel_format as u32).to_le_bytes();
    let widths = ((pixel_format >> 32) as u32).to_le_bytes();
    let channels = names.iter().take_while(|&&n| n != 0).count();
    if channels == 0 || channels > 4 {
        return Err(IoError::DecodeError(format!(
            "unsupported PVR channel layout: {channels} channels"
        )));
    }
    for i in 0..4 {
        let expected = if i < channels { 8 } else { 0 };
        if widths[i] != expected {
            return Err(IoError::DecodeError(
                "only 8-bit PVR channels supported".into(),
            ));
        }
    }
    if channel_type != CHANNEL_TYPE_U8_NORM {
        return Err(IoError::DecodeError(format!(
            "unsupported PVR channel type: {channel_type}"
        )));
    }
    if width == 0 || height == 0 {
        return Err(IoError::DecodeError(
            "zero dimension in PVR header".into(),
        ));
    }
    if depth > 1 || surfaces != 1 || faces != 1 {
        return Err(IoError::DecodeError(
            "unsupported PVR layout (volume/array/cubemap)".into(),
        ));
    }

    let texel_start = HEADER_LEN
        .checked_add(meta_size as usize)
        .filter(|&s| s <= data.len())
        .ok_or_else(|| IoError::DecodeError("PVR metadata exceeds file".into()))?;
    let needed = width as usize * height as usize * channels;
    // Only the top mip level is consumed; trailing levels are ignored.
    let texels = data
        .get(texel_start..texel_start + needed)
        .ok_or_else(|| IoError::DecodeError("truncated PVR texel data".into()))?;

    PixelBuffer::from_bytes(
        width,
        height,
        channels as u8,
        SampleDepth::U8,
        Layout::Interleaved,
        texels.to_vec(),
    )
    .map_err(|e| IoError::DecodeError(format!("inconsistent PVR dimensions: {e}")))
}

/// Encodes a pixel buffer as an uncompressed PVR v3 texture.
pub fn encode(buffer: &PixelBuffer, _options: &EncodeOptions) -> IoResult<Vec<u8>> {
    if buffer.layout() == Layout::Planar {
        return Err(IoError::EncodeError(
            "planar buffers must be merged before encoding".into(),
        ));
    }
    if buffer.depth() != SampleDepth::U8 {
        return Err(IoError::EncodeError(format!(
            "{} samples not representable in uncompressed PVR",
            buffer.depth()
        )));
    }

    let channels = buffer.channels() as usize;
    let mut names = [0u8; 4];
    names[..channels].copy_from_slice(&b"rgba"[..channels]);
    let mut widths = [0u8; 4];
    widths[..channels].fill(8);
    let pixel_format =
        u32::from_le_bytes(names) as u64 | ((u32::from_le_bytes(widths) as u64) << 32);

    let mut out = Vec::with_capacity(HEADER_LEN + buffer.bytes().len());
    out.write_u32::<LittleEndian>(PVR3_VERSION)?;
    out.write_u32::<LittleEndian>(0)?; // flags
    out.write_u64::<LittleEndian>(pixel_format)?;
    out.write_u32::<LittleEndian>(0)?; // colour space: linear
    out.write_u32::<LittleEndian>(CHANNEL_TYPE_U8_NORM)?;
    out.write_u32::<LittleEndian>(buffer.height())?;
    out.write_u32::<LittleEndian>(buffer.width())?;
    out.write_u32::<LittleEndian>(1)?; // depth
    out.write_u32::<LittleEndian>(1)?; // surfaces
    out.write_u32::<LittleEndian>(1)?; // faces
    out.write_u32::<LittleEndian>(1)?; // mip count
    out.write_u32::<LittleEndian>(0)?; // metadata size
    out.extend_from_slice(buffer.bytes());

    Ok(out)
}
