//! End-to-end decode/encode behavior across the built-in codecs.

use imread_core::{Layout, PixelBuffer, SampleDepth};
use imread_io::{read, write, Format, Image, IoError, WriteOptions};

fn gradient_image(width: u32, height: u32, channels: u8) -> Image {
    let mut data = Vec::with_capacity((width * height * channels as u32) as usize);
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                data.push(((x * 7 + y * 13 + c as u32 * 31) % 256) as u8);
            }
        }
    }
    let buffer = PixelBuffer::from_bytes(
        width,
        height,
        channels,
        SampleDepth::U8,
        Layout::Interleaved,
        data,
    )
    .unwrap();
    Image::from_buffer(buffer, Format::Unknown)
}

#[cfg(feature = "png")]
#[test]
fn png_blob_roundtrip_is_lossless() {
    let image = gradient_image(40, 30, 4);
    let blob = image
        .write_blob(&WriteOptions::format(Format::Png))
        .expect("encode png");
    let reloaded = Image::from_blob(&blob, Format::Png).expect("decode png");

    assert_eq!(reloaded.width(), 40);
    assert_eq!(reloaded.height(), 30);
    assert_eq!(reloaded.planes(), 4);
    assert_eq!(reloaded.buffer().bytes(), image.buffer().bytes());
}

#[cfg(feature = "tiff")]
#[test]
fn tiff_blob_roundtrip_is_lossless() {
    let image = gradient_image(25, 25, 3);
    let blob = image
        .write_blob(&WriteOptions::format(Format::Tiff))
        .expect("encode tiff");
    let reloaded = Image::from_blob(&blob, Format::Tiff).expect("decode tiff");
    assert_eq!(reloaded.buffer().bytes(), image.buffer().bytes());
}

#[cfg(feature = "pvr")]
#[test]
fn pvr_blob_roundtrip_is_lossless() {
    let image = gradient_image(16, 16, 4);
    let blob = image
        .write_blob(&WriteOptions::format(Format::Pvr))
        .expect("encode pvr");
    let reloaded = Image::from_blob(&blob, Format::Pvr).expect("decode pvr");
    assert_eq!(reloaded.buffer().bytes(), image.buffer().bytes());
}

#[cfg(feature = "jpeg")]
#[test]
fn jpeg_blob_roundtrip_preserves_geometry() {
    let image = gradient_image(48, 32, 3);
    let blob = image
        .write_blob(&WriteOptions {
            format: Some(Format::Jpeg),
            quality: Some(95),
        })
        .expect("encode jpeg");
    let reloaded = Image::from_blob(&blob, Format::Jpeg).expect("decode jpeg");

    assert_eq!(reloaded.width(), 48);
    assert_eq!(reloaded.height(), 32);
    assert_eq!(reloaded.planes(), 3);
}

#[cfg(all(feature = "png", feature = "tiff"))]
#[test]
fn cross_format_reencode() {
    let image = gradient_image(20, 20, 3);
    let png_blob = image
        .write_blob(&WriteOptions::format(Format::Png))
        .unwrap();
    let from_png = Image::from_blob(&png_blob, Format::Png).unwrap();

    // PNG and TIFF are both lossless so the pixels survive the hop.
    let tiff_blob = from_png
        .write_blob(&WriteOptions::format(Format::Tiff))
        .unwrap();
    let from_tiff = Image::from_blob(&tiff_blob, Format::Tiff).unwrap();
    assert_eq!(from_tiff.buffer().bytes(), image.buffer().bytes());
}

#[cfg(feature = "png")]
#[test]
fn file_roundtrip_via_convenience_functions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");

    let image = gradient_image(30, 20, 3);
    write(&path, &image).expect("write file");

    let reloaded = read(&path).expect("read file");
    assert_eq!(reloaded.format_hint(), Format::Png);
    assert_eq!(reloaded.buffer().bytes(), image.buffer().bytes());
}

#[cfg(feature = "png")]
#[test]
fn write_path_extension_overrides_hint() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("converted.png");

    // Hint says JPEG; the .png target extension wins.
    let buffer = gradient_image(10, 10, 3).into_buffer();
    let image = Image::from_buffer(buffer, Format::Jpeg);
    image.write_path(&path, &WriteOptions::default()).unwrap();

    let reloaded = read(&path).unwrap();
    assert_eq!(reloaded.format_hint(), Format::Png);
}

#[cfg(feature = "png")]
#[test]
fn explicit_format_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.bin");

    let image = gradient_image(10, 10, 3);
    image
        .write_path(&path, &WriteOptions::format(Format::Png))
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], &[0x89, 0x50, 0x4E, 0x47]);
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("picture.xyz");
    std::fs::write(&path, b"not an image at all").unwrap();

    assert!(matches!(
        read(&path),
        Err(IoError::UnsupportedFormat(_))
    ));
}

#[test]
fn missing_file_reports_not_found() {
    assert!(matches!(
        read("/no/such/dir/missing.png"),
        Err(IoError::NotFound(_))
    ));
}

#[cfg(feature = "png")]
#[test]
fn sniffing_recovers_misnamed_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("actually_png.dat");

    let image = gradient_image(12, 12, 3);
    let blob = image
        .write_blob(&WriteOptions::format(Format::Png))
        .unwrap();
    std::fs::write(&path, &blob).unwrap();

    let reloaded = read(&path).expect("sniffed read");
    assert_eq!(reloaded.format_hint(), Format::Png);
    assert_eq!(reloaded.buffer().bytes(), image.buffer().bytes());
}
