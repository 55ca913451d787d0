//! Frame scheduling.
//!
//! Animations never own a timer. They ask a `Scheduler` for one callback
//! before the next frame, receive the frame timestamp in milliseconds, and
//! ask again. In the browser this is `requestAnimationFrame`; in tests it is
//! [`ManualScheduler`], which only advances when told to.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

/// Callback run once with the frame timestamp (ms).
pub type TickCallback = Box<dyn FnOnce(f64)>;

/// Identifies one outstanding tick so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// Platform primitive for "run this before the next repaint".
pub trait Scheduler {
    /// Queue `callback` for the next frame. `None` if the platform refused.
    fn schedule_tick(&self, callback: TickCallback) -> Option<TickHandle>;

    /// Drop a queued callback. Unknown or already-run handles are ignored.
    fn cancel_tick(&self, handle: TickHandle);
}

/// Deterministic scheduler driven by explicit frame timestamps.
///
/// `run_frame(t)` runs every callback queued before the call, in queue
/// order. Callbacks queued while a frame runs wait for the next frame, the
/// same as animation frames in a browser.
#[derive(Default)]
pub struct ManualScheduler {
    next_id: Cell<u64>,
    queue: RefCell<Vec<(TickHandle, TickCallback)>>,
    /// Handles cancelled while their frame batch is already running.
    cancelled: RefCell<HashSet<TickHandle>>,
    now: Cell<f64>,
    frames: Cell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Timestamp of the last frame run.
    pub fn now(&self) -> f64 {
        self.now.get()
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frames.get()
    }

    /// Run one frame at `timestamp`. Returns the number of callbacks run.
    pub fn run_frame(&self, timestamp: f64) -> usize {
        self.now.set(timestamp);
        self.frames.set(self.frames.get() + 1);
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        let mut ran = 0;
        for (handle, callback) in batch {
            if self.cancelled.borrow_mut().remove(&handle) {
                continue;
            }
            callback(timestamp);
            ran += 1;
        }
        self.cancelled.borrow_mut().clear();
        ran
    }

    /// Run frames every `step` ms from the last frame time up to and
    /// including `until`.
    pub fn run_until(&self, until: f64, step: f64) {
        let mut t = self.now.get() + step;
        while t <= until {
            self.run_frame(t);
            t += step;
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_tick(&self, callback: TickCallback) -> Option<TickHandle> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let handle = TickHandle(id);
        self.queue.borrow_mut().push((handle, callback));
        Some(handle)
    }

    fn cancel_tick(&self, handle: TickHandle) {
        let mut queue = self.queue.borrow_mut();
        let before = queue.len();
        queue.retain(|(h, _)| *h != handle);
        if queue.len() == before {
            // Possibly part of the batch currently running.
            self.cancelled.borrow_mut().insert(handle);
        }
    }
}
