//! TIFF codec.
//!
//! Decoding and encoding via the [`tiff`] crate. Grayscale, RGB and RGBA
//! are carried at 8, 16 or 32 bits per sample without depth conversion;
//! two-channel buffers have no TIFF color type here and fail to encode.

use crate::registry::EncodeOptions;
use crate::{IoError, IoResult};
use imread_core::{Layout, PixelBuffer, SampleDepth};
use std::io::Cursor;

/// Decodes a TIFF blob into a pixel buffer.
pub fn decode(data: &[u8]) -> IoResult<PixelBuffer> {
    use tiff::decoder::{Decoder, DecodingResult};
    use tiff::ColorType;

    let mut decoder =
        Decoder::new(Cursor::new(data)).map_err(|e| IoError::DecodeError(e.to_string()))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let result = decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;

    let channels = match color_type {
        ColorType::Gray(_) => 1,
        ColorType::RGB(_) => 3,
        ColorType::RGBA(_) => 4,
        other => {
            return Err(IoError::DecodeError(format!(
                "unsupported TIFF color type: {other:?}"
            )));
        }
    };

    let buffer = match result {
        DecodingResult::U8(buf) => PixelBuffer::from_bytes(
            width,
            height,
            channels,
            SampleDepth::U8,
            Layout::Interleaved,
            buf,
        ),
        DecodingResult::U16(buf) => PixelBuffer::from_samples_u16(width, height, channels, buf),
        DecodingResult::U32(buf) => PixelBuffer::from_samples_u32(width, height, channels, buf),
        other => {
            return Err(IoError::DecodeError(format!(
                "unsupported TIFF sample format: {other:?}"
            )));
        }
    };

    buffer.map_err(|e| IoError::DecodeError(format!("inconsistent TIFF dimensions: {e}")))
}

/// Encodes a pixel buffer as TIFF. Lossless; `options.quality` is ignored.
pub fn encode(buffer: &PixelBuffer, _options: &EncodeOptions) -> IoResult<Vec<u8>> {
    use tiff::encoder::{colortype, TiffEncoder};

    if buffer.layout() == Layout::Planar {
        return Err(IoError::EncodeError(
            "planar buffers must be merged before encoding".into(),
        ));
    }

    let width = buffer.width();
    let height = buffer.height();
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut encoder =
            TiffEncoder::new(&mut cursor).map_err(|e| IoError::EncodeError(e.to_string()))?;

        let result = match (buffer.channels(), buffer.depth()) {
            (1, SampleDepth::U8) => {
                encoder.write_image::<colortype::Gray8>(width, height, buffer.bytes())
            }
            (3, SampleDepth::U8) => {
                encoder.write_image::<colortype::RGB8>(width, height, buffer.bytes())
            }
            (4, SampleDepth::U8) => {
                encoder.write_image::<colortype::RGBA8>(width, height, buffer.bytes())
            }
            (1, SampleDepth::U16) => {
                encoder.write_image::<colortype::Gray16>(width, height, &buffer.to_samples_u16())
            }
            (3, SampleDepth::U16) => {
                encoder.write_image::<colortype::RGB16>(width, height, &buffer.to_samples_u16())
            }
            (4, SampleDepth::U16) => {
                encoder.write_image::<colortype::RGBA16>(width, height, &buffer.to_samples_u16())
            }
            (1, SampleDepth::U32) => {
                encoder.write_image::<colortype::Gray32>(width, height, &buffer.to_samples_u32())
            }
            (3, SampleDepth::U32) => {
                encoder.write_image::<colortype::RGB32>(width, height, &buffer.to_samples_u32())
            }
            (4, SampleDepth::U32) => {
                encoder.write_image::<colortype::RGBA32>(width, height, &buffer.to_samples_u32())
            }
            (n, depth) => {
                return Err(IoError::EncodeError(format!(
                    "unsupported channel/depth combination for TIFF: {n} x {depth}"
                )));
            }
        };
        result.map_err(|e| IoError::EncodeError(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_rgb_u8() {
        let data: Vec<u8> = (0..32 * 32 * 3).map(|i| (i % 256) as u8).collect();
        let buffer = PixelBuffer::from_bytes(
            32,
            32,
            3,
            SampleDepth::U8,
            Layout::Interleaved,
            data.clone(),
        )
        .unwrap();

        let blob = encode(&buffer, &EncodeOptions::default()).expect("encode failed");
        let decoded = decode(&blob).expect("decode failed");

        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 32);
        assert_eq!(decoded.channels(), 3);
        assert_eq!(decoded.bytes(), &data[..]);
    }

    #[test]
    fn test_roundtrip_gray_u16() {
        let samples: Vec<u16> = (0..16 * 16).map(|i| (i * 257) as u16).collect();
        let buffer = PixelBuffer::from_samples_u16(16, 16, 1, samples.clone()).unwrap();

        let blob = encode(&buffer, &EncodeOptions::default()).unwrap();
        let decoded = decode(&blob).unwrap();

        assert_eq!(decoded.depth(), SampleDepth::U16);
        assert_eq!(decoded.to_samples_u16(), samples);
    }

    #[test]
    fn test_roundtrip_rgba_u32() {
        let samples: Vec<u32> = (0..8 * 8 * 4).map(|i| (i as u32) * 0x0101_0101).collect();
        let buffer = PixelBuffer::from_samples_u32(8, 8, 4, samples.clone()).unwrap();

        let blob = encode(&buffer, &EncodeOptions::default()).unwrap();
        let decoded = decode(&blob).unwrap();

        assert_eq!(decoded.depth(), SampleDepth::U32);
        assert_eq!(decoded.channels(), 4);
        assert_eq!(decoded.to_samples_u32(), samples);
    }

    #[test]
    fn test_two_channel_rejected() {
        let buffer = PixelBuffer::new(8, 8, 2, SampleDepth::U8).unwrap();
        assert!(matches!(
            encode(&buffer, &EncodeOptions::default()),
            Err(IoError::EncodeError(_))
        ));
    }

    #[test]
    fn test_garbage_blob_rejected() {
        assert!(matches!(
            decode(&[0x49, 0x49, 0x2A, 0x00, 0xFF]),
            Err(IoError::DecodeError(_))
        ));
    }
}
