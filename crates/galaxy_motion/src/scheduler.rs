//! Frame scheduling.
//!
//! The engine never owns a timer. It asks the host for "a callback on the
//! next display frame" and gets back a [`FrameId`]; the host later calls
//! [`MotionEngine::on_frame`](crate::MotionEngine::on_frame) with that id.
//! A frame id that has been cancelled, or superseded, is ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Handle to a requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameId(pub u64);

/// Host frame-callback primitive (`requestAnimationFrame` / `cancelAnimationFrame`).
pub trait FrameScheduler {
    /// Request a callback on the next frame.
    fn request_frame(&mut self) -> FrameId;

    /// Revoke a previously requested frame. Unknown ids are ignored.
    fn cancel_frame(&mut self, id: FrameId);
}

/// Scheduler for headless hosts and tests: requested frames queue up until
/// the host drains them with [`take_pending`](Self::take_pending).
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: BTreeSet<FrameId>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every outstanding frame request, oldest first.
    pub fn take_pending(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    /// Number of frames currently requested and not cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Total number of frames ever requested.
    pub fn requested_total(&self) -> u64 {
        self.next_id
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameId {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        self.pending.insert(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.pending.remove(&id);
    }
}
