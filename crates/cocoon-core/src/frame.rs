//! Display refresh scheduling.
//!
//! A [`FrameRequest`] asks for one callback before the next frame is drawn.
//! The host calls [`FrameScheduler::begin_frame`] once per draw; every request
//! outstanding at that moment is due in the returned [`Frame`]. Dropping a
//! request cancels it.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};
use std::time::Instant;

#[derive(Default)]
struct FrameQueue {
    next_id: u64,
    pending: BTreeSet<u64>,
}

/// Per-frame callback queue
#[derive(Clone, Default)]
pub struct FrameScheduler {
    queue: Rc<RefCell<FrameQueue>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask to run once before the next frame
    pub fn request_frame(&self) -> FrameRequest {
        let mut queue = self.queue.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        queue.pending.insert(id);
        FrameRequest {
            id,
            queue: Rc::downgrade(&self.queue),
        }
    }

    /// Start a frame: every outstanding request becomes due
    pub fn begin_frame(&self, now: Instant) -> Frame {
        let due = std::mem::take(&mut self.queue.borrow_mut().pending);
        Frame { now, due }
    }

    /// Outstanding requests (the host keeps its fast tick while this is non-zero)
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }
}

/// One outstanding frame callback; dropping it cancels the callback
#[derive(Debug)]
pub struct FrameRequest {
    id: u64,
    queue: Weak<RefCell<FrameQueue>>,
}

impl FrameRequest {
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for FrameRequest {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.borrow_mut().pending.remove(&self.id);
        }
    }
}

/// A frame being drawn
#[derive(Debug)]
pub struct Frame {
    now: Instant,
    due: BTreeSet<u64>,
}

impl Frame {
    /// Timestamp shared by every callback in this frame
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Whether `request` was outstanding when the frame began
    pub fn is_due(&self, request: &FrameRequest) -> bool {
        self.due.contains(&request.id)
    }
}
