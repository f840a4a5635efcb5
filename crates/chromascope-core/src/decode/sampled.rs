//! Sampled decoding with EXIF orientation handling.
//!
//! Decodes an encoded image directly to a reduced sampling grid. The
//! downsample factor comes either straight from the caller or from a
//! header-only probe against a dimension boundary, so the full-resolution
//! pixel buffer is never materialized for analysis.

use std::io::{BufRead, Cursor, Seek, SeekFrom};

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader, RgbImage};

use super::{DecodeError, DecodedImage, ImageInfo, Orientation, SampleConfig};

/// Decode an encoded image from bytes to a reduced sampling grid.
///
/// The grid is shrunk by an exact power-of-two factor using nearest
/// sampling, so every pixel in the result is a pixel of the source.
/// EXIF orientation correction is applied to the reduced grid.
///
/// # Arguments
///
/// * `bytes` - Raw encoded image bytes (JPEG or PNG)
/// * `config` - Downsample mode: explicit factor or dimension boundary
///
/// # Returns
///
/// A `DecodedImage` with RGB pixel data at the sampled dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidConfig` if the config fails validation.
/// Returns `DecodeError::CorruptedFile` if the bytes cannot be decoded.
/// Returns `DecodeError::EmptyImage` if decoding yields zero pixels.
pub fn decode_sampled(bytes: &[u8], config: &SampleConfig) -> Result<DecodedImage, DecodeError> {
    let mut cursor = Cursor::new(bytes);
    decode_sampled_from_reader(&mut cursor, config)
}

/// Decode an encoded image from a seekable reader to a reduced sampling grid.
///
/// Boundary-mode configs probe the header for native dimensions before the
/// full decode; factor-mode configs skip the probe entirely. The reader is
/// left positioned wherever the decoder stopped.
///
/// # Errors
///
/// Same as [`decode_sampled`], plus `DecodeError::IoError` if the reader
/// fails to report or restore its position between the probe and the decode.
pub fn decode_sampled_from_reader<R: BufRead + Seek>(
    reader: &mut R,
    config: &SampleConfig,
) -> Result<DecodedImage, DecodeError> {
    config.validate()?;

    let factor = match *config {
        SampleConfig::ScaleFactor(factor) => factor,
        SampleConfig::MaxBoundary(bound) => {
            let (width, height) = probe_dimensions(reader)?;
            sample_factor(width, height, bound)
        }
    };

    // Extract EXIF orientation before handing the reader to the decoder
    let orientation = probe_orientation(reader)?;

    let img = ImageReader::new(&mut *reader)
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb = img.into_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }

    let reduced = downsample(rgb, factor);
    let oriented = apply_orientation(DynamicImage::ImageRgb8(reduced), orientation);
    Ok(DecodedImage::from_rgb_image(oriented.into_rgb8()))
}

/// Read native dimensions and EXIF orientation from an image header.
///
/// Only the header is parsed; no pixel data is decoded.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the header cannot be parsed.
pub fn probe_info(bytes: &[u8]) -> Result<ImageInfo, DecodeError> {
    let mut cursor = Cursor::new(bytes);
    probe_info_from_reader(&mut cursor)
}

/// Read native dimensions and EXIF orientation from a seekable reader.
///
/// The stream position is restored before returning, so the same reader
/// can be handed to [`decode_sampled_from_reader`] afterwards.
pub fn probe_info_from_reader<R: BufRead + Seek>(
    reader: &mut R,
) -> Result<ImageInfo, DecodeError> {
    let (width, height) = probe_dimensions(reader)?;
    let orientation = probe_orientation(reader)?;
    Ok(ImageInfo {
        width,
        height,
        orientation,
    })
}

/// Read native dimensions from the header, restoring the stream position.
fn probe_dimensions<R: BufRead + Seek>(reader: &mut R) -> Result<(u32, u32), DecodeError> {
    let start = reader
        .stream_position()
        .map_err(|e| DecodeError::IoError(e.to_string()))?;

    let dimensions = ImageReader::new(&mut *reader)
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    reader
        .seek(SeekFrom::Start(start))
        .map_err(|e| DecodeError::IoError(e.to_string()))?;

    Ok(dimensions)
}

/// Extract EXIF orientation, restoring the stream position.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn probe_orientation<R: BufRead + Seek>(reader: &mut R) -> Result<Orientation, DecodeError> {
    let start = reader
        .stream_position()
        .map_err(|e| DecodeError::IoError(e.to_string()))?;

    let orientation = match Reader::new().read_from_container(&mut *reader) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or(Orientation::Normal),
        Err(_) => Orientation::Normal,
    };

    reader
        .seek(SeekFrom::Start(start))
        .map_err(|e| DecodeError::IoError(e.to_string()))?;

    Ok(orientation)
}

/// Smallest power-of-two factor bringing both dimensions within `bound`.
///
/// Comparison uses integer division, matching the sampled-decode grid:
/// a factor is accepted as soon as `height / factor` and `width / factor`
/// both fit.
fn sample_factor(width: u32, height: u32, bound: u32) -> u32 {
    let mut factor = 1;
    while height / factor > bound || width / factor > bound {
        factor *= 2;
    }
    factor
}

/// Reduce an image by an exact factor using nearest sampling.
///
/// Output pixel `(x, y)` is source pixel `(x * factor, y * factor)`.
/// Every color in the output therefore exists in the source; nothing is
/// blended or interpolated. Output dimensions floor at 1x1.
fn downsample(image: RgbImage, factor: u32) -> RgbImage {
    if factor <= 1 {
        return image;
    }

    let (src_width, src_height) = image.dimensions();
    let width = (src_width / factor).max(1);
    let height = (src_height / factor).max(1);

    RgbImage::from_fn(width, height, |x, y| *image.get_pixel(x * factor, y * factor))
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
