//! Image checks that run before OCR.
//!
//! Uploaded JPEGs are fully decoded once so that corrupt or truncated files are
//! rejected here, with a clear reason, instead of surfacing later as an opaque
//! OCR engine failure.

use std::io::Cursor;

use image::codecs::jpeg::JpegDecoder;
use image::{GenericImageView, ImageDecoder, ImageFormat};
use tracing::debug;

use super::ExtractionError;
use crate::pipeline::import::FileFormat;

/// Maximum input image size (in bytes) before rejecting.
/// Prevents OOM on corrupt/adversarial files.
const MAX_IMAGE_BYTES: usize = 50 * 1024 * 1024; // 50 MB

/// Largest width or height accepted from a JPEG header.
const MAX_IMAGE_DIMENSION: u32 = 10_000;

/// Dimensions of a successfully decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
}

/// Decode JPEG bytes, returning the image dimensions.
pub fn decode_jpeg(bytes: &[u8]) -> Result<DecodedImage, ExtractionError> {
    validate_image_bytes(bytes)?;
    validate_declared_dimensions(bytes)?;

    let img = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
        .map_err(|e| ExtractionError::unreadable(FileFormat::Jpeg, format!("image decode failed: {e}")))?;

    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(ExtractionError::unreadable(
            FileFormat::Jpeg,
            "image has zero width or height",
        ));
    }

    debug!(width, height, "Decoded JPEG upload");
    Ok(DecodedImage { width, height })
}

/// Validate image bytes before decoding.
/// Empty or oversized input is rejected without touching the decoder.
pub fn validate_image_bytes(bytes: &[u8]) -> Result<(), ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::unreadable(FileFormat::Jpeg, "image data is empty"));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ExtractionError::unreadable(
            FileFormat::Jpeg,
            format!("image data exceeds {}MB limit", MAX_IMAGE_BYTES / (1024 * 1024)),
        ));
    }
    Ok(())
}

/// Read only the JPEG header and check the dimensions it declares.
/// Runs before any pixel buffer is allocated.
fn validate_declared_dimensions(bytes: &[u8]) -> Result<(), ExtractionError> {
    let decoder = JpegDecoder::new(Cursor::new(bytes)).map_err(|e| {
        ExtractionError::unreadable(FileFormat::Jpeg, format!("invalid JPEG header: {e}"))
    })?;

    let (width, height) = decoder.dimensions();
    if width == 0 || height == 0 {
        return Err(ExtractionError::unreadable(
            FileFormat::Jpeg,
            "image has zero width or height",
        ));
    }
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(ExtractionError::unreadable(
            FileFormat::Jpeg,
            format!("image dimensions {width}x{height} exceed {MAX_IMAGE_DIMENSION}px limit"),
        ));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};

    pub(crate) fn make_test_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([20, 20, 20])
            }
        });
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageOutputFormat::Jpeg(90))
            .unwrap();
        buf
    }

    #[test]
    fn decodes_valid_jpeg() {
        let bytes = make_test_jpeg(64, 32);
        let decoded = decode_jpeg(&bytes).unwrap();
        assert_eq!(decoded, DecodedImage { width: 64, height: 32 });
    }

    #[test]
    fn rejects_garbage_bytes() {
        let result = decode_jpeg(b"definitely not an image");
        assert!(matches!(
            result,
            Err(ExtractionError::UnreadableFile { format: FileFormat::Jpeg, .. })
        ));
    }

    #[test]
    fn rejects_png_named_as_jpeg() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert!(decode_jpeg(&png).is_err());
    }

    /// Overwrite the frame size in the SOF0 segment of an encoded JPEG.
    fn with_declared_size(mut jpeg: Vec<u8>, width: u16, height: u16) -> Vec<u8> {
        let sof = jpeg
            .windows(2)
            .position(|w| w == [0xFF, 0xC0])
            .expect("encoder writes a baseline SOF0 segment");
        // marker(2) length(2) precision(1) height(2) width(2)
        jpeg[sof + 5..sof + 7].copy_from_slice(&height.to_be_bytes());
        jpeg[sof + 7..sof + 9].copy_from_slice(&width.to_be_bytes());
        jpeg
    }

    #[test]
    fn rejects_huge_declared_dimensions_without_decoding() {
        let bytes = with_declared_size(make_test_jpeg(16, 16), 60_000, 60_000);
        assert!(bytes.len() < 4096);

        let result = decode_jpeg(&bytes);
        match result {
            Err(ExtractionError::UnreadableFile { format: FileFormat::Jpeg, reason }) => {
                assert!(reason.contains("60000x60000"), "unexpected reason: {reason}");
            }
            other => panic!("Expected UnreadableFile, got {other:?}"),
        }
    }

    #[test]
    fn rejects_one_oversized_side() {
        let bytes = with_declared_size(make_test_jpeg(16, 16), 16, 20_000);
        assert!(matches!(
            decode_jpeg(&bytes),
            Err(ExtractionError::UnreadableFile { format: FileFormat::Jpeg, .. })
        ));
    }

    #[test]
    fn accepts_small_declared_dimensions() {
        let bytes = make_test_jpeg(16, 16);
        assert!(validate_declared_dimensions(&bytes).is_ok());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            validate_image_bytes(&[]),
            Err(ExtractionError::UnreadableFile { .. })
        ));
    }
}
