//! A particle travelling along one path.
//!
//! Each frame the marker is placed at an arc-length position derived from the
//! loop clock, the trail is redrawn as a single dash behind it, and the trail
//! gradient is re-aimed along the dash. On reaching the terminus the marker
//! and trail fade out, the end marker lights up, and the animation dwells for
//! the configured pause. After the pause it either loops on its own or, when
//! an owner has registered a cycle callback, hands control to the owner and
//! stays paused.

use crate::config::AnimationConfig;
use crate::error::{ConfigError, Result};
use crate::geometry::PathGeometry;
use crate::scheduler::{Scheduler, TickHandle};
use crate::target::VisualTarget;
use crate::trail::{self, DashPattern, EndProximity, TrailWindow};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Observer notified when a terminal pause expires.
pub type CycleCallback = Rc<dyn Fn()>;

/// Mutable run state. Reset to `Default` by [`PathAnimation::reset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunState {
    /// Timestamp the current loop started at.
    pub start_time: Option<f64>,
    pub is_paused: bool,
    pub pause_start_time: Option<f64>,
    pub has_reached_end: bool,
    pub is_running: bool,
    /// The cycle callback already fired for the current pause.
    pub completion_signalled: bool,
    /// Arc-length position rendered on the last frame.
    pub position: f64,
}

struct Shared {
    name: String,
    config: AnimationConfig,
    path_length: f64,
    geometry: Box<dyn PathGeometry>,
    target: RefCell<Box<dyn VisualTarget>>,
    scheduler: Rc<dyn Scheduler>,
    state: RefCell<RunState>,
    frame: Cell<Option<TickHandle>>,
    on_cycle_complete: RefCell<Option<CycleCallback>>,
}

/// What a frame decided, acted on once internal borrows are released.
enum Step {
    Continue,
    CycleComplete(CycleCallback),
}

/// Handle to one path animation. Clones share the same animation.
#[derive(Clone)]
pub struct PathAnimation {
    shared: Rc<Shared>,
}

impl fmt::Debug for PathAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathAnimation")
            .field("name", &self.shared.name)
            .field("path_length", &self.shared.path_length)
            .field("state", &*self.shared.state.borrow())
            .finish()
    }
}

impl PathAnimation {
    /// Validate `config` and `geometry` and build an idle animation.
    pub fn new(
        name: impl Into<String>,
        config: AnimationConfig,
        geometry: Box<dyn PathGeometry>,
        target: Box<dyn VisualTarget>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Result<Self> {
        let name = name.into();
        config.validate(&name)?;

        let path_length = geometry.length();
        if !path_length.is_finite() || path_length <= 0.0 {
            return Err(ConfigError::EmptyPath { name });
        }

        let animation = Self {
            shared: Rc::new(Shared {
                name,
                config,
                path_length,
                geometry,
                target: RefCell::new(target),
                scheduler,
                state: RefCell::new(RunState::default()),
                frame: Cell::new(None),
                on_cycle_complete: RefCell::new(None),
            }),
        };
        let cfg = &animation.shared.config;
        animation.debug(format_args!(
            "initialized: length={:.1} duration={}ms trail={} pause={}ms direction={}",
            path_length,
            cfg.duration_ms,
            cfg.trail_length,
            cfg.pause_duration_ms,
            if cfg.reverse { "end→start" } else { "start→end" },
        ));
        Ok(animation)
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.shared.config
    }

    pub fn path_length(&self) -> f64 {
        self.shared.path_length
    }

    pub fn state(&self) -> RunState {
        self.shared.state.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.shared.state.borrow().is_running
    }

    pub fn is_paused(&self) -> bool {
        self.shared.state.borrow().is_paused
    }

    /// Whether a frame callback is currently queued.
    pub fn has_pending_frame(&self) -> bool {
        self.shared.frame.get().is_some()
    }

    /// Whether two handles refer to the same animation.
    pub fn ptr_eq(&self, other: &PathAnimation) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Begin ticking. No-op while already running.
    pub fn start(&self) {
        {
            let mut state = self.shared.state.borrow_mut();
            if state.is_running {
                drop(state);
                self.debug(format_args!("already running"));
                return;
            }
            state.is_running = true;
        }
        self.debug(format_args!("start"));
        self.schedule();
    }

    /// Cancel the queued frame and stop ticking. Idempotent.
    pub fn stop(&self) {
        if let Some(handle) = self.shared.frame.take() {
            self.shared.scheduler.cancel_tick(handle);
        }
        let was_running = std::mem::replace(&mut self.shared.state.borrow_mut().is_running, false);
        if was_running {
            self.debug(format_args!("stop"));
        }
    }

    /// Stop, clear run state, and restore resting visuals: marker and trail
    /// fully opaque, end marker in the inactive color.
    pub fn reset(&self) {
        self.stop();
        *self.shared.state.borrow_mut() = RunState::default();
        let mut target = self.shared.target.borrow_mut();
        target.set_motion_opacity(1.0);
        target.set_end_marker_stroke(&self.shared.config.inactive_color);
        drop(target);
        self.debug(format_args!("reset"));
    }

    /// Register the single cycle observer, replacing any previous one.
    pub fn set_on_cycle_complete(&self, callback: CycleCallback) {
        *self.shared.on_cycle_complete.borrow_mut() = Some(callback);
    }

    pub fn clear_on_cycle_complete(&self) {
        self.shared.on_cycle_complete.borrow_mut().take();
    }

    pub fn has_cycle_observer(&self) -> bool {
        self.shared.on_cycle_complete.borrow().is_some()
    }

    // ─── Frame loop ──────────────────────────────────────────────────────

    fn schedule(&self) {
        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        let handle = self.shared.scheduler.schedule_tick(Box::new(move |timestamp| {
            if let Some(shared) = weak.upgrade() {
                PathAnimation { shared }.tick(timestamp);
            }
        }));
        if handle.is_none() {
            log::error!("[{}] scheduler refused a frame; animation stalls", self.shared.name);
        }
        self.shared.frame.set(handle);
    }

    fn tick(&self, timestamp: f64) {
        self.shared.frame.set(None);
        if !self.is_running() {
            return;
        }

        if !timestamp.is_finite() || timestamp < 0.0 {
            log::debug!("[{}] skipping frame with timestamp {timestamp}", self.shared.name);
            self.schedule();
            return;
        }

        match self.advance(timestamp) {
            Step::Continue => self.schedule(),
            Step::CycleComplete(callback) => {
                self.debug(format_args!("pause over, handing off to owner"));
                callback();
                // The owner usually stops us; if it restarted us, a frame is already queued.
                if self.is_running() && !self.has_pending_frame() {
                    self.schedule();
                }
            }
        }
    }

    fn advance(&self, timestamp: f64) -> Step {
        let shared = &*self.shared;
        let cfg = &shared.config;
        let length = shared.path_length;
        let mut state = shared.state.borrow_mut();
        let mut target = shared.target.borrow_mut();

        if state.start_time.is_none() {
            state.start_time = Some(timestamp);
            self.debug(format_args!("first frame at {timestamp:.1}"));
        }

        if state.is_paused {
            let elapsed = timestamp - state.pause_start_time.unwrap_or(timestamp);
            if elapsed < cfg.pause_duration_ms {
                return Step::Continue;
            }
            let observer = shared.on_cycle_complete.borrow().clone();
            if let Some(callback) = observer {
                if state.completion_signalled {
                    return Step::Continue;
                }
                state.completion_signalled = true;
                return Step::CycleComplete(callback);
            }

            self.debug(format_args!("pause over, looping"));
            state.is_paused = false;
            state.has_reached_end = false;
            state.pause_start_time = None;
            state.start_time = Some(timestamp);
            target.set_end_marker_stroke(&cfg.inactive_color);
            target.set_motion_opacity(1.0);
        }

        let start = state.start_time.unwrap_or(timestamp);
        let progress = trail::progress(timestamp - start, cfg.duration_ms, cfg.reverse);
        let position = trail::arc_position(progress, length);
        state.position = position;

        let window = TrailWindow::around(position, cfg.trail_length, length, cfg.reverse);
        let marker = shared.geometry.point_at(position);
        target.move_marker(marker);
        target.set_trail_dash(&DashPattern::for_window(&window, length));

        let (from, to) = if cfg.reverse {
            (marker, shared.geometry.point_at(window.end))
        } else {
            (shared.geometry.point_at(window.start), marker)
        };
        target.set_gradient_line(from, to);
        log::trace!("[{}] t={timestamp:.1} pos={position:.2}", shared.name);

        let proximity = trail::end_proximity(position, length, cfg.reverse);
        if proximity == EndProximity::AtEnd && !state.has_reached_end && !state.is_paused {
            self.debug(format_args!(
                "reached end, pausing {:.1}s",
                cfg.pause_duration_ms / 1000.0
            ));
            state.is_paused = true;
            state.has_reached_end = true;
            state.pause_start_time = Some(timestamp);
            target.set_end_marker_stroke(&cfg.active_color);
            target.set_motion_opacity(0.0);
        } else if proximity != EndProximity::Away && !state.has_reached_end {
            target.set_end_marker_stroke(&cfg.active_color);
        } else if !state.is_paused && !state.has_reached_end {
            target.set_end_marker_stroke(&cfg.inactive_color);
        }

        Step::Continue
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        if self.shared.config.debug {
            log::debug!("[PathAnimation {}] {}", self.shared.name, args);
        }
    }
}
