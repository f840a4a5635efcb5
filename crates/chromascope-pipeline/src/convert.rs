//! Frame format conversion.
//!
//! Camera preview callbacks deliver NV21; the histogram engine consumes
//! encoded images. This module converts NV21 payloads to RGB using BT.601
//! full-range fixed-point math and re-encodes them as JPEG.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use chromascope_core::DecodedImage;

use crate::frame::{FrameFormat, RawFrame};

/// JPEG quality used when re-encoding converted preview frames.
pub const JPEG_QUALITY: u8 = 60;

/// Errors that can occur during frame conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The frame has zero dimensions or an empty payload.
    #[error("Frame is empty")]
    EmptyFrame,

    /// The payload is shorter than the dimensions require.
    #[error("NV21 buffer too small: expected {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Convert an NV21 payload to an RGB image.
///
/// NV21 carries a full-resolution Y plane followed by one interleaved VU
/// pair per 2x2 pixel block; odd dimensions round the chroma plane up.
/// Conversion uses BT.601 full-range coefficients in 10-bit fixed point,
/// so a neutral gray frame (Y = U = V = 128) converts to exactly
/// `#808080`.
///
/// # Arguments
///
/// * `data` - NV21 payload (Y plane then interleaved VU plane)
/// * `width` - Frame width in pixels
/// * `height` - Frame height in pixels
///
/// # Errors
///
/// Returns `ConvertError::EmptyFrame` for zero dimensions or an empty
/// payload. Returns `ConvertError::BufferTooSmall` if the payload cannot
/// hold both planes.
pub fn nv21_to_rgb(data: &[u8], width: u32, height: u32) -> Result<DecodedImage, ConvertError> {
    if width == 0 || height == 0 || data.is_empty() {
        return Err(ConvertError::EmptyFrame);
    }

    let w = width as usize;
    let h = height as usize;
    let y_len = w * h;
    let chroma_stride = ((w + 1) / 2) * 2;
    let expected = y_len + chroma_stride * ((h + 1) / 2);
    if data.len() < expected {
        return Err(ConvertError::BufferTooSmall {
            expected,
            actual: data.len(),
        });
    }

    let mut pixels = Vec::with_capacity(y_len * 3);
    for row in 0..h {
        let chroma_row = y_len + (row / 2) * chroma_stride;
        for col in 0..w {
            let y = data[row * w + col] as i32;
            let chroma = chroma_row + (col / 2) * 2;
            let v = data[chroma] as i32 - 128;
            let u = data[chroma + 1] as i32 - 128;

            // BT.601 full-range, coefficients scaled by 1024
            let r = y + ((1436 * v) >> 10);
            let g = y - ((352 * u + 731 * v) >> 10);
            let b = y + ((1815 * u) >> 10);

            pixels.push(r.clamp(0, 255) as u8);
            pixels.push(g.clamp(0, 255) as u8);
            pixels.push(b.clamp(0, 255) as u8);
        }
    }

    Ok(DecodedImage::new(width, height, pixels))
}

/// Convert an NV21 payload straight to JPEG bytes.
///
/// # Errors
///
/// Any `ConvertError` from [`nv21_to_rgb`], plus
/// `ConvertError::EncodingFailed` if the encoder rejects the image.
pub fn nv21_to_jpeg(
    data: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, ConvertError> {
    let image = nv21_to_rgb(data, width, height)?;
    encode_jpeg(&image, quality)
}

/// Produce JPEG bytes for a frame regardless of its capture format.
///
/// JPEG frames pass through unchanged; NV21 frames are converted and
/// encoded at [`JPEG_QUALITY`].
pub fn frame_to_jpeg(frame: &RawFrame) -> Result<Vec<u8>, ConvertError> {
    match frame.format {
        FrameFormat::Jpeg => {
            if frame.bytes.is_empty() {
                return Err(ConvertError::EmptyFrame);
            }
            Ok(frame.bytes.clone())
        }
        FrameFormat::Nv21 => nv21_to_jpeg(&frame.bytes, frame.width, frame.height, JPEG_QUALITY),
    }
}

/// Encode an RGB image to JPEG bytes at the given quality.
fn encode_jpeg(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, ConvertError> {
    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ConvertError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for frame dimensions (kept small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=32, 1u32..=32)
    }

    /// Strategy for dimensions plus an exactly-sized arbitrary NV21 payload.
    fn nv21_strategy() -> impl Strategy<Value = (u32, u32, Vec<u8>)> {
        dimensions_strategy().prop_flat_map(|(width, height)| {
            let w = width as usize;
            let h = height as usize;
            let len = w * h + ((w + 1) / 2) * 2 * ((h + 1) / 2);
            proptest::collection::vec(any::<u8>(), len)
                .prop_map(move |data| (width, height, data))
        })
    }

    proptest! {
        /// Property: Conversion fills exactly width * height RGB pixels.
        #[test]
        fn prop_rgb_output_shape((width, height, data) in nv21_strategy()) {
            let image = nv21_to_rgb(&data, width, height).unwrap();

            prop_assert_eq!(image.width, width);
            prop_assert_eq!(image.height, height);
            prop_assert_eq!(image.pixels.len(), (width * height * 3) as usize);
        }

        /// Property: Neutral chroma converts every pixel to r == g == b == y.
        #[test]
        fn prop_neutral_chroma_is_grayscale(
            (width, height) in dimensions_strategy(),
            y in any::<u8>(),
        ) {
            let w = width as usize;
            let h = height as usize;
            let mut data = vec![y; w * h];
            data.resize(w * h + ((w + 1) / 2) * 2 * ((h + 1) / 2), 128);

            let image = nv21_to_rgb(&data, width, height).unwrap();
            for chunk in image.pixels.chunks_exact(3) {
                prop_assert_eq!(chunk, &[y, y, y]);
            }
        }

        /// Property: A payload one byte short reports the exact expected
        /// length.
        #[test]
        fn prop_short_payload_rejected((width, height, data) in nv21_strategy()) {
            let short = &data[..data.len() - 1];

            match nv21_to_rgb(short, width, height) {
                Err(ConvertError::BufferTooSmall { expected, actual }) => {
                    prop_assert_eq!(expected, data.len());
                    prop_assert_eq!(actual, data.len() - 1);
                }
                other => prop_assert!(
                    false,
                    "Expected BufferTooSmall, got {:?}",
                    other
                ),
            }
        }
    }
}
