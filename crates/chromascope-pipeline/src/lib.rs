//! Chromascope Pipeline - camera frame adapter for dominant-color histograms
//!
//! This crate connects a frame producer (camera capture callbacks) to the
//! chromascope-core histogram engine: frames go into a latest-wins slot, a
//! dedicated worker thread converts and analyzes them at a self-tuning
//! downsample factor, and finished histograms come back on a channel.
//!
//! # Module Structure
//!
//! - `frame` - Captured frame descriptions (JPEG and NV21 payloads)
//! - `convert` - NV21 to RGB conversion and JPEG re-encoding
//! - `slot` - Latest-wins frame hand-off between threads
//! - `schedule` - Coarse-to-steady downsample factor sequence
//! - `worker` - The worker thread and pipeline handle
//!
//! # Usage
//!
//! ```ignore
//! use chromascope_pipeline::{HistogramPipeline, RawFrame, ScaleSchedule};
//!
//! let (pipeline, results) = HistogramPipeline::start(ScaleSchedule::default());
//! pipeline.submit(RawFrame::nv21(1920, 1080, nv21_bytes));
//!
//! let histogram = results.recv().unwrap();
//! for entry in histogram.top_colors(5) {
//!     println!("{} covers {} pixels", entry.color, entry.count);
//! }
//! pipeline.stop();
//! ```

pub mod convert;
pub mod frame;
pub mod schedule;
pub mod slot;
pub mod worker;

// Re-export public types
pub use convert::{frame_to_jpeg, nv21_to_jpeg, nv21_to_rgb, ConvertError};
pub use frame::{FrameFormat, RawFrame};
pub use schedule::ScaleSchedule;
pub use slot::FrameSlot;
pub use worker::{process_frame, HistogramPipeline, PipelineError};
