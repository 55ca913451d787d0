//! Round-robin playback of several animations.
//!
//! A sequence activates one member at a time. It registers itself as the
//! active member's cycle observer; when that member's terminal pause expires
//! the observer stops and resets it, moves the cursor on (wrapping), and
//! starts the next member, all inside the same callback so no two members
//! ever progress on the same frame.

use crate::animation::{CycleCallback, PathAnimation};
use std::cell::Cell;
use std::rc::{Rc, Weak};

/// The part of an animation a sequence drives.
pub trait Playable {
    fn label(&self) -> &str;
    fn start(&self);
    fn stop(&self);
    fn reset(&self);
    fn is_running(&self) -> bool;
    fn set_on_cycle_complete(&self, callback: CycleCallback);
    fn clear_on_cycle_complete(&self);
}

impl Playable for PathAnimation {
    fn label(&self) -> &str {
        self.name()
    }

    fn start(&self) {
        PathAnimation::start(self)
    }

    fn stop(&self) {
        PathAnimation::stop(self)
    }

    fn reset(&self) {
        PathAnimation::reset(self)
    }

    fn is_running(&self) -> bool {
        PathAnimation::is_running(self)
    }

    fn set_on_cycle_complete(&self, callback: CycleCallback) {
        PathAnimation::set_on_cycle_complete(self, callback)
    }

    fn clear_on_cycle_complete(&self) {
        PathAnimation::clear_on_cycle_complete(self)
    }
}

struct Inner<P> {
    members: Vec<P>,
    current: Cell<usize>,
    running: Cell<bool>,
}

/// Rotates through a fixed list of animations, one at a time, forever.
pub struct AnimationSequence<P: Playable + 'static = PathAnimation> {
    inner: Rc<Inner<P>>,
}

impl<P: Playable + 'static> Clone for AnimationSequence<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P: Playable + 'static> AnimationSequence<P> {
    pub fn new(members: Vec<P>) -> Self {
        log::debug!("[AnimationSequence] created with {} animations", members.len());
        Self {
            inner: Rc::new(Inner {
                members,
                current: Cell::new(0),
                running: Cell::new(false),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.members.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    pub fn current_index(&self) -> usize {
        self.inner.current.get()
    }

    pub fn members(&self) -> &[P] {
        &self.inner.members
    }

    /// The member currently holding the sequence's observer.
    pub fn current(&self) -> Option<&P> {
        self.inner.members.get(self.inner.current.get())
    }

    /// Start rotation from the first member. No-op while running or empty.
    pub fn start(&self) {
        if self.inner.running.get() {
            log::debug!("[AnimationSequence] already running");
            return;
        }
        if self.inner.members.is_empty() {
            log::warn!("[AnimationSequence] nothing to play");
            return;
        }
        self.inner.running.set(true);
        self.inner.current.set(0);
        log::debug!("[AnimationSequence] start");
        start_current(&self.inner);
    }

    /// Stop rotation; every member is stopped, reset and detached.
    pub fn stop(&self) {
        self.inner.running.set(false);
        for member in &self.inner.members {
            member.clear_on_cycle_complete();
            member.stop();
            member.reset();
        }
        log::debug!("[AnimationSequence] stopped");
    }
}

fn start_current<P: Playable + 'static>(inner: &Rc<Inner<P>>) {
    let n = inner.members.len();
    if inner.current.get() >= n {
        inner.current.set(0);
    }
    let index = inner.current.get();
    let member = &inner.members[index];
    log::debug!(
        "[AnimationSequence] playing {} ({} of {n})",
        member.label(),
        index + 1
    );

    let weak: Weak<Inner<P>> = Rc::downgrade(inner);
    member.set_on_cycle_complete(Rc::new(move || {
        if let Some(inner) = weak.upgrade() {
            advance(&inner, index);
        }
    }));
    member.start();
}

fn advance<P: Playable + 'static>(inner: &Rc<Inner<P>>, finished: usize) {
    if !inner.running.get() || inner.current.get() != finished {
        return;
    }
    let member = &inner.members[finished];
    log::debug!("[AnimationSequence] {} finished its cycle", member.label());
    member.clear_on_cycle_complete();
    member.stop();
    member.reset();

    inner.current.set((finished + 1) % inner.members.len());
    start_current(inner);
}
