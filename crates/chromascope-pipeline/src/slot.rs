//! Latest-wins frame hand-off between capture and analysis threads.

use std::sync::{Condvar, Mutex};

use crate::frame::RawFrame;

/// Hand-off state guarded by the slot mutex.
#[derive(Debug, Default)]
struct SlotState {
    frame: Option<RawFrame>,
    closed: bool,
}

/// A single-frame hand-off between one producer and one consumer.
///
/// The slot holds at most one pending frame. A producer that outpaces the
/// consumer replaces the pending frame, so the consumer always sees the
/// newest capture and a backlog can never build up. Taking blocks until a
/// frame arrives or the slot closes.
#[derive(Debug, Default)]
pub struct FrameSlot {
    state: Mutex<SlotState>,
    available: Condvar,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a frame, replacing any unconsumed one.
    ///
    /// Returns `true` if a pending frame was discarded. Publishing to a
    /// closed slot is a no-op returning `false`.
    pub fn put(&self, frame: RawFrame) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return false;
        }
        let discarded = state.frame.replace(frame).is_some();
        self.available.notify_one();
        discarded
    }

    /// Block until a frame is available or the slot closes.
    ///
    /// Returns `None` once the slot is closed. A frame still pending at
    /// close is discarded, never delivered.
    pub fn take(&self) -> Option<RawFrame> {
        let mut state = self.state.lock().unwrap();
        loop {
            if state.closed {
                return None;
            }
            if let Some(frame) = state.frame.take() {
                return Some(frame);
            }
            state = self.available.wait(state).unwrap();
        }
    }

    /// Close the slot, discarding any pending frame and waking blocked
    /// takers.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.closed = true;
        state.frame = None;
        self.available.notify_all();
    }

    /// Whether the slot has been closed.
    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameFormat;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn frame(tag: u8) -> RawFrame {
        RawFrame::jpeg(1, 1, vec![tag])
    }

    #[test]
    fn test_put_then_take() {
        let slot = FrameSlot::new();
        assert!(!slot.put(frame(7)));

        let taken = slot.take().unwrap();
        assert_eq!(taken.format, FrameFormat::Jpeg);
        assert_eq!(taken.bytes, vec![7]);
    }

    #[test]
    fn test_put_replaces_pending_frame() {
        let slot = FrameSlot::new();
        assert!(!slot.put(frame(1)));
        assert!(slot.put(frame(2)), "Second put should report a discard");

        // Only the newest frame is delivered
        assert_eq!(slot.take().unwrap().bytes, vec![2]);

        slot.close();
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_take_blocks_until_put() {
        let slot = Arc::new(FrameSlot::new());
        let producer_slot = Arc::clone(&slot);

        let producer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            producer_slot.put(frame(9));
        });

        // Blocks until the producer publishes
        let taken = slot.take().unwrap();
        assert_eq!(taken.bytes, vec![9]);
        producer.join().unwrap();
    }

    #[test]
    fn test_close_wakes_blocked_taker() {
        let slot = Arc::new(FrameSlot::new());
        let taker_slot = Arc::clone(&slot);

        let taker = thread::spawn(move || taker_slot.take());

        thread::sleep(Duration::from_millis(50));
        slot.close();

        assert!(taker.join().unwrap().is_none());
    }

    #[test]
    fn test_close_discards_pending_frame() {
        let slot = FrameSlot::new();
        slot.put(frame(3));
        slot.close();

        assert!(slot.take().is_none());
    }

    #[test]
    fn test_put_after_close_is_noop() {
        let slot = FrameSlot::new();
        slot.close();

        assert!(!slot.put(frame(4)));
        assert!(slot.is_closed());
        assert!(slot.take().is_none());
    }
}
