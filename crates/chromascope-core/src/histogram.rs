//! Dominant-color histogram construction and queries.
//!
//! This module builds per-color pixel counts from a sampled grid and
//! answers ranking and share queries over them, used for the dominant
//! color display.

use std::collections::HashMap;
use std::io::{BufRead, Seek};
use std::sync::OnceLock;

use thiserror::Error;

use crate::counter::count_colors;
use crate::decode::{
    decode_sampled, decode_sampled_from_reader, DecodeError, DecodedImage, SampleConfig,
};
use crate::{ColorEntry, PackedRgb};

/// Errors from histogram queries.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HistogramError {
    /// The queried color does not occur in the histogram.
    #[error("Color {0} does not occur in this histogram")]
    UnknownColor(PackedRgb),

    /// The histogram was built from an image with no pixels.
    #[error("Histogram contains no pixels")]
    Empty,
}

/// Per-color pixel counts for one sampled grid.
///
/// A histogram is fully populated by [`compute_histogram`]; there is no
/// partially-built state to observe. Queries never mutate the counts, so
/// a histogram can be shared freely across threads once built.
#[derive(Debug, Clone)]
pub struct Histogram {
    counts: HashMap<PackedRgb, u64>,
    total_pixels: u64,
    sorted: OnceLock<Vec<ColorEntry>>,
}

impl Histogram {
    /// Total number of pixels counted.
    ///
    /// This is the pixel count of the sampled grid, not the number of
    /// distinct colors.
    pub fn total_color_count(&self) -> u64 {
        self.total_pixels
    }

    /// Number of distinct colors observed.
    pub fn distinct_color_count(&self) -> usize {
        self.counts.len()
    }

    /// Occurrence count for one exact color, if it was observed.
    pub fn count(&self, color: PackedRgb) -> Option<u64> {
        self.counts.get(&color).copied()
    }

    /// Percentage of sampled pixels carrying one exact color.
    ///
    /// # Errors
    ///
    /// Returns `HistogramError::Empty` if the histogram holds no pixels.
    /// Returns `HistogramError::UnknownColor` if the color never occurs.
    pub fn color_share(&self, color: PackedRgb) -> Result<f32, HistogramError> {
        if self.total_pixels == 0 {
            return Err(HistogramError::Empty);
        }
        match self.counts.get(&color) {
            Some(&count) => Ok((count as f32 / self.total_pixels as f32) * 100.0),
            None => Err(HistogramError::UnknownColor(color)),
        }
    }

    /// All observed colors, most frequent first.
    ///
    /// The ordering is computed on first call and cached; repeated calls
    /// return the same slice. Equal counts break ties by ascending packed
    /// value, so the ordering is fully deterministic.
    pub fn sorted_colors(&self) -> &[ColorEntry] {
        self.sorted.get_or_init(|| {
            let mut entries: Vec<ColorEntry> = self
                .counts
                .iter()
                .map(|(&color, &count)| ColorEntry { color, count })
                .collect();
            entries.sort_unstable_by(|a, b| {
                b.count.cmp(&a.count).then_with(|| a.color.cmp(&b.color))
            });
            entries
        })
    }

    /// The `n` most frequent colors, or all of them if fewer exist.
    pub fn top_colors(&self, n: usize) -> &[ColorEntry] {
        let sorted = self.sorted_colors();
        &sorted[..n.min(sorted.len())]
    }
}

/// Build a histogram from a decoded sampling grid.
///
/// # Arguments
/// * `image` - Sampled RGB grid to analyze
///
/// # Returns
/// A fully populated `Histogram`. An empty grid yields a histogram with
/// zero pixels and no colors.
///
/// # Performance
/// Counting is a single O(n) pass over the pixels. Sorting is deferred
/// until [`Histogram::sorted_colors`] is first called.
pub fn compute_histogram(image: &DecodedImage) -> Histogram {
    Histogram {
        counts: count_colors(image),
        total_pixels: image.pixel_count(),
        sorted: OnceLock::new(),
    }
}

/// Decode encoded image bytes to a sampled grid and histogram it.
///
/// # Errors
///
/// Any `DecodeError` from the decode stage.
pub fn histogram_from_encoded(
    bytes: &[u8],
    config: &SampleConfig,
) -> Result<Histogram, DecodeError> {
    let image = decode_sampled(bytes, config)?;
    Ok(compute_histogram(&image))
}

/// Decode from a seekable reader to a sampled grid and histogram it.
///
/// # Errors
///
/// Any `DecodeError` from the decode stage.
pub fn histogram_from_reader<R: BufRead + Seek>(
    reader: &mut R,
    config: &SampleConfig,
) -> Result<Histogram, DecodeError> {
    let image = decode_sampled_from_reader(reader, config)?;
    Ok(compute_histogram(&image))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
