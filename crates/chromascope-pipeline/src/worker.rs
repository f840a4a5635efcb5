//! The histogram worker thread.
//!
//! A single dedicated thread drains the frame slot, computes a histogram
//! per frame at the schedule's current factor, and publishes results on
//! an mpsc channel. Capture callbacks stay fire-and-forget: they submit
//! and return, never waiting on analysis.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use thiserror::Error;

use chromascope_core::histogram::{histogram_from_encoded, Histogram};
use chromascope_core::{DecodeError, SampleConfig};

use crate::convert::{self, ConvertError};
use crate::frame::{FrameFormat, RawFrame};
use crate::schedule::ScaleSchedule;
use crate::slot::FrameSlot;

/// Errors from processing a single frame.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Frame conversion failed.
    #[error("Frame conversion failed: {0}")]
    Convert(#[from] ConvertError),

    /// Sampled decoding or histogram construction failed.
    #[error("Histogram computation failed: {0}")]
    Decode(#[from] DecodeError),
}

/// Compute a histogram for one frame at the given sampling config.
///
/// JPEG frames decode directly; NV21 frames are converted to JPEG first,
/// matching the capture path. The returned histogram is unsorted.
///
/// # Errors
///
/// Returns `PipelineError::Convert` if an NV21 payload is malformed.
/// Returns `PipelineError::Decode` if the encoded bytes cannot be decoded.
pub fn process_frame(
    frame: &RawFrame,
    config: &SampleConfig,
) -> Result<Histogram, PipelineError> {
    match frame.format {
        FrameFormat::Jpeg => Ok(histogram_from_encoded(&frame.bytes, config)?),
        FrameFormat::Nv21 => {
            let jpeg = convert::frame_to_jpeg(frame)?;
            Ok(histogram_from_encoded(&jpeg, config)?)
        }
    }
}

/// Handle to the histogram worker thread.
///
/// Created by [`HistogramPipeline::start`]. Dropping the handle closes
/// the frame slot and joins the worker.
pub struct HistogramPipeline {
    slot: Arc<FrameSlot>,
    worker: Option<JoinHandle<()>>,
}

impl HistogramPipeline {
    /// Start the worker thread.
    ///
    /// Returns the pipeline handle and the channel on which finished
    /// histograms arrive, one per processed frame, already sorted.
    pub fn start(schedule: ScaleSchedule) -> (Self, Receiver<Histogram>) {
        let slot = Arc::new(FrameSlot::new());
        let (tx, rx) = mpsc::channel();

        let worker_slot = Arc::clone(&slot);
        let worker = std::thread::spawn(move || worker_loop(worker_slot, schedule, tx));

        (
            Self {
                slot,
                worker: Some(worker),
            },
            rx,
        )
    }

    /// Publish a frame for analysis, replacing any unconsumed one.
    ///
    /// Never blocks. Returns `true` if an unconsumed frame was discarded
    /// to make room.
    pub fn submit(&self, frame: RawFrame) -> bool {
        self.slot.put(frame)
    }

    /// Whether the pipeline still accepts frames.
    pub fn is_running(&self) -> bool {
        !self.slot.is_closed()
    }

    /// Close the frame slot and wait for the worker to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.slot.close();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for HistogramPipeline {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(slot: Arc<FrameSlot>, mut schedule: ScaleSchedule, tx: Sender<Histogram>) {
    while let Some(frame) = slot.take() {
        match process_frame(&frame, &schedule.current_config()) {
            Ok(histogram) => {
                // Sort here so consumers read a cached ordering
                histogram.sorted_colors();
                if tx.send(histogram).is_err() {
                    break;
                }
                // Warmup steps only count completed frames
                schedule.advance();
            }
            Err(e) => {
                log::warn!(
                    "worker_loop: dropping {}x{} frame: {}",
                    frame.width,
                    frame.height,
                    e
                );
            }
        }
    }
}
