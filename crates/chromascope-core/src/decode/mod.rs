//! Image decoding pipeline for Chromascope.
//!
//! This module provides functionality for:
//! - Sampled decoding of JPEG and PNG images straight to a reduced grid
//! - Header-only probing of native dimensions and EXIF orientation
//! - Downsample configuration (explicit factor or dimension boundary)
//!
//! # Architecture
//!
//! Dominant-color analysis reads a sampling grid, never the full-resolution
//! image, so decoding and downsampling happen in a single step. Boundary
//! mode probes the header first to pick a factor; the probe restores the
//! stream position so the same reader can be decoded afterwards.
//!
//! # Examples
//!
//! ```ignore
//! use chromascope_core::decode::{decode_sampled, SampleConfig};
//!
//! let jpeg_bytes = std::fs::read("frame.jpg").unwrap();
//! let grid = decode_sampled(&jpeg_bytes, &SampleConfig::default()).unwrap();
//! println!("Sampled to {}x{}", grid.width, grid.height);
//! ```

mod config;
mod sampled;
mod types;

pub use config::{ConfigError, SampleConfig};
pub use sampled::{decode_sampled, decode_sampled_from_reader, probe_info, probe_info_from_reader};
pub use types::{DecodeError, DecodedImage, ImageInfo, Orientation};
