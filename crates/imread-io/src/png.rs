//! PNG codec.
//!
//! Decoding and encoding via the [`png`] crate. Channel count (1-4) and
//! sample depth (8/16-bit) are preserved in both directions; `quality` has
//! no effect since PNG is lossless.

use crate::registry::EncodeOptions;
use crate::{IoError, IoResult};
use imread_core::{Layout, PixelBuffer, SampleDepth};
use std::io::Cursor;

/// Decodes a PNG blob into a pixel buffer.
pub fn decode(data: &[u8]) -> IoResult<PixelBuffer> {
    let decoder = png::Decoder::new(Cursor::new(data));
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let width = info.width;
    let height = info.height;
    let raw = &buf[..info.buffer_size()];

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => {
            return Err(IoError::DecodeError(format!(
                "unsupported PNG color type: {other:?}"
            )));
        }
    };

    let buffer = match info.bit_depth {
        png::BitDepth::Eight => PixelBuffer::from_bytes(
            width,
            height,
            channels,
            SampleDepth::U8,
            Layout::Interleaved,
            raw.to_vec(),
        ),
        png::BitDepth::Sixteen => {
            // PNG stores 16-bit samples big-endian on the wire.
            let samples: Vec<u16> = raw
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();
            PixelBuffer::from_samples_u16(width, height, channels, samples)
        }
        other => {
            return Err(IoError::DecodeError(format!(
                "unsupported PNG bit depth: {other:?}"
            )));
        }
    };

    buffer.map_err(|e| IoError::DecodeError(format!("inconsistent PNG dimensions: {e}")))
}

/// Encodes a pixel buffer as PNG. Lossless; `options.quality` is ignored.
pub fn encode(buffer: &PixelBuffer, _options: &EncodeOptions) -> IoResult<Vec<u8>> {
    if buffer.layout() == Layout::Planar {
        return Err(IoError::EncodeError(
            "planar buffers must be merged before encoding".into(),
        ));
    }

    let color_type = match buffer.channels() {
        1 => png::ColorType::Grayscale,
        2 => png::ColorType::GrayscaleAlpha,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => {
            return Err(IoError::EncodeError(format!(
                "unsupported channel count for PNG: {n}"
            )));
        }
    };

    let (bit_depth, data): (png::BitDepth, Vec<u8>) = match buffer.depth() {
        SampleDepth::U8 => (png::BitDepth::Eight, buffer.bytes().to_vec()),
        SampleDepth::U16 => {
            let mut be = Vec::with_capacity(buffer.bytes().len());
            for s in buffer.to_samples_u16() {
                be.extend_from_slice(&s.to_be_bytes());
            }
            (png::BitDepth::Sixteen, be)
        }
        SampleDepth::U32 => {
            return Err(IoError::EncodeError(
                "32-bit samples not representable in PNG".into(),
            ));
        }
    };

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, buffer.width(), buffer.height());
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::default());

        let mut writer = encoder
            .write_header()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        writer
            .write_image_data(&data)
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
    }

    Ok(out)
}
