//! Core types for sampled image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::ConfigError;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The downsample configuration is invalid.
    #[error("Invalid downsample configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The image data is corrupted, truncated, or not a supported format.
    #[error("Corrupted or unsupported image data: {0}")]
    CorruptedFile(String),

    /// Decoding produced an image with no pixels.
    #[error("Decoded image is empty")]
    EmptyImage,

    /// I/O error while reading from a stream.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height dimensions.
    ///
    /// Rotations of 90° and 270° (and their flip variants Transpose/Transverse)
    /// swap the image dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Image properties read during a bounds probe, without decoding pixels.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Image width in pixels (before orientation correction).
    pub width: u32,
    /// Image height in pixels (before orientation correction).
    pub height: u32,
    /// EXIF orientation.
    pub orientation: Orientation,
}

impl ImageInfo {
    /// Get the effective dimensions after orientation correction.
    pub fn oriented_dimensions(&self) -> (u32, u32) {
        if self.orientation.swaps_dimensions() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

/// A decoded image with RGB pixel data.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_orientation_swaps_dimensions() {
        // Non-swapping orientations
        assert!(!Orientation::Normal.swaps_dimensions());
        assert!(!Orientation::FlipHorizontal.swaps_dimensions());
        assert!(!Orientation::Rotate180.swaps_dimensions());
        assert!(!Orientation::FlipVertical.swaps_dimensions());

        // Swapping orientations (90° and 270° rotations and their flip variants)
        assert!(Orientation::Transpose.swaps_dimensions());
        assert!(Orientation::Rotate90CW.swaps_dimensions());
        assert!(Orientation::Transverse.swaps_dimensions());
        assert!(Orientation::Rotate270CW.swaps_dimensions());
    }

    #[test]
    fn test_oriented_dimensions() {
        let mut info = ImageInfo {
            width: 1920,
            height: 1080,
            ..Default::default()
        };

        // Normal orientation - no swap
        info.orientation = Orientation::Normal;
        assert_eq!(info.oriented_dimensions(), (1920, 1080));

        // Rotate 90 CW - dimensions swap
        info.orientation = Orientation::Rotate90CW;
        assert_eq!(info.oriented_dimensions(), (1080, 1920));
    }

    #[test]
    fn test_decoded_image_creation() {
        let pixels = vec![0u8; 100 * 50 * 3];
        let img = DecodedImage::new(100, 50, pixels);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.pixel_count(), 5000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_decoded_image_empty() {
        let img = DecodedImage::new(0, 0, vec![]);
        assert!(img.is_empty());
        assert_eq!(img.pixel_count(), 0);
    }

    #[test]
    fn test_decoded_image_rgb_roundtrip() {
        let pixels = vec![
            255, 0, 0, // Red
            0, 255, 0, // Green
        ];
        let img = DecodedImage::new(2, 1, pixels.clone());

        let rgb = img.to_rgb_image().unwrap();
        assert_eq!(rgb.dimensions(), (2, 1));
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 0, 0]);

        let back = DecodedImage::from_rgb_image(rgb);
        assert_eq!(back.pixels, pixels);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::EmptyImage;
        assert_eq!(err.to_string(), "Decoded image is empty");

        let err = DecodeError::CorruptedFile("unexpected EOF".to_string());
        assert_eq!(
            err.to_string(),
            "Corrupted or unsupported image data: unexpected EOF"
        );
    }
}
