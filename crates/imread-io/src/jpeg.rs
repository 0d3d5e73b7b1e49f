//! JPEG codec.
//!
//! Decoding via [`jpeg_decoder`], encoding via [`jpeg_encoder`] (baseline,
//! 8-bit). Grayscale sources stay single-channel; CMYK is converted to RGB
//! on decode since the buffer model carries at most four unsigned channels
//! and downstream consumers expect r/g/b/a ordering.
//!
//! Encoding accepts 1-channel (luma), 3-channel (RGB) and 4-channel buffers
//! (alpha stripped); 2-channel buffers and 32-bit depths are not
//! representable and fail with `EncodeError`.

use crate::registry::EncodeOptions;
use crate::{IoError, IoResult};
use imread_core::{Layout, PixelBuffer, SampleDepth};
use std::io::Cursor;

/// Default encode quality, matching common preview pipelines.
pub const DEFAULT_QUALITY: u8 = 90;

/// Decodes a JPEG blob into a pixel buffer.
pub fn decode(data: &[u8]) -> IoResult<PixelBuffer> {
    let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(data));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG frame info".into()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let buffer = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => {
            PixelBuffer::from_bytes(width, height, 3, SampleDepth::U8, Layout::Interleaved, pixels)
        }
        jpeg_decoder::PixelFormat::L8 => {
            PixelBuffer::from_bytes(width, height, 1, SampleDepth::U8, Layout::Interleaved, pixels)
        }
        jpeg_decoder::PixelFormat::L16 => {
            // jpeg-decoder emits big-endian byte pairs for 16-bit luma.
            let samples: Vec<u16> = pixels
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();
            PixelBuffer::from_samples_u16(width, height, 1, samples)
        }
        jpeg_decoder::PixelFormat::CMYK32 => {
            let rgb: Vec<u8> = pixels
                .chunks(4)
                .flat_map(|cmyk| {
                    let c = cmyk[0] as f32 / 255.0;
                    let m = cmyk[1] as f32 / 255.0;
                    let y = cmyk[2] as f32 / 255.0;
                    let k = cmyk[3] as f32 / 255.0;

                    let r = ((1.0 - c) * (1.0 - k) * 255.0) as u8;
                    let g = ((1.0 - m) * (1.0 - k) * 255.0) as u8;
                    let b = ((1.0 - y) * (1.0 - k) * 255.0) as u8;

                    [r, g, b]
                })
                .collect();
            PixelBuffer::from_bytes(width, height, 3, SampleDepth::U8, Layout::Interleaved, rgb)
        }
    };

    buffer.map_err(|e| IoError::DecodeError(format!("inconsistent JPEG dimensions: {e}")))
}

/// Encodes a pixel buffer as baseline JPEG.
pub fn encode(buffer: &PixelBuffer, options: &EncodeOptions) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    if buffer.layout() == Layout::Planar {
        return Err(IoError::EncodeError(
            "planar buffers must be merged before encoding".into(),
        ));
    }
    if buffer.depth() == SampleDepth::U32 {
        return Err(IoError::EncodeError(
            "32-bit samples not representable in JPEG".into(),
        ));
    }
    if buffer.width() > u16::MAX as u32 || buffer.height() > u16::MAX as u32 {
        return Err(IoError::EncodeError(format!(
            "dimensions {}x{} exceed JPEG limits",
            buffer.width(),
            buffer.height()
        )));
    }

    let samples = buffer.to_u8_samples();
    let (color_type, pixel_data) = match buffer.channels() {
        1 => (ColorType::Luma, samples),
        3 => (ColorType::Rgb, samples),
        4 => {
            // Baseline JPEG carries no alpha.
            let rgb = samples
                .chunks(4)
                .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
                .collect();
            (ColorType::Rgb, rgb)
        }
        n => {
            return Err(IoError::EncodeError(format!(
                "unsupported channel count for JPEG: {n}"
            )));
        }
    };

    let quality = options.quality.unwrap_or(DEFAULT_QUALITY).clamp(1, 100);
    let mut out = Vec::new();
    let encoder = Encoder::new(&mut out, quality);
    encoder
        .encode(
            &pixel_data,
            buffer.width() as u16,
            buffer.height() as u16,
            color_type,
        )
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(out)
}
