//! Chromascope Core - Dominant-color histogram engine
//!
//! This crate provides the core functionality for Chromascope: decoding
//! encoded camera frames at a reduced resolution, counting exact pixel
//! colors, and exposing the dominant colors with their share of the frame.

pub mod counter;
pub mod decode;
pub mod histogram;

pub use decode::{decode_sampled, DecodeError, DecodedImage, SampleConfig};
pub use histogram::{compute_histogram, histogram_from_encoded, Histogram};

/// A packed 32-bit RGB color value with layout `0x00RRGGBB`.
///
/// Identity and equality are by exact packed value; two colors differing in
/// any channel bit are distinct histogram buckets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct PackedRgb(u32);

impl PackedRgb {
    /// Create a color from individual channel values.
    pub const fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Create a color from an already-packed `0x00RRGGBB` word.
    ///
    /// Bits above the low 24 are cleared.
    pub const fn from_packed(value: u32) -> Self {
        Self(value & 0x00FF_FFFF)
    }

    /// The packed `0x00RRGGBB` word.
    pub const fn packed(self) -> u32 {
        self.0
    }

    /// Red channel value (0-255).
    pub const fn red(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green channel value (0-255).
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue channel value (0-255).
    pub const fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

impl std::fmt::Display for PackedRgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

/// A discovered color together with its occurrence count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColorEntry {
    /// The packed color value.
    pub color: PackedRgb,
    /// How many sampled pixels carried this exact value.
    pub count: u64,
}
