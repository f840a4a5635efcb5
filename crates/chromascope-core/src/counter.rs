//! Color counting from RGB pixel data.
//!
//! This module provides the single pass that turns a sampled grid into
//! per-color pixel counts, the raw material for dominant-color histograms.

use std::collections::HashMap;

use crate::decode::DecodedImage;
use crate::PackedRgb;

/// Count occurrences of every distinct color in an image.
///
/// Colors match by exact packed RGB value; no tolerance or bucketing is
/// applied.
///
/// # Arguments
/// * `image` - Sampled RGB grid to count
///
/// # Returns
/// A map from packed RGB value to the number of pixels carrying it. The
/// counts sum to the image's pixel count; an empty image yields an empty
/// map.
///
/// # Performance
/// Single pass with O(n) time complexity where n is the number of pixels.
/// Map size is bounded by the number of distinct colors, which sampled
/// grids keep small.
pub fn count_colors(image: &DecodedImage) -> HashMap<PackedRgb, u64> {
    let mut counts = HashMap::new();

    // Process pixels in chunks of 3 (RGB)
    for chunk in image.pixels.chunks_exact(3) {
        let color = PackedRgb::from_channels(chunk[0], chunk[1], chunk[2]);
        *counts.entry(color).or_insert(0) += 1;
    }

    counts
}
