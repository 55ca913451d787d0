//! Presentation side effects of a path animation.

use crate::color::CssColor;
use crate::trail::DashPattern;
use kurbo::Point;
use std::cell::RefCell;
use std::rc::Rc;

/// The elements one animation writes to: moving marker, trail, the trail's
/// gradient and the end marker. These writes are the animation's only
/// side effects.
pub trait VisualTarget {
    fn move_marker(&mut self, at: Point);

    fn set_trail_dash(&mut self, dash: &DashPattern);

    /// Line the trail gradient runs along, in user space.
    fn set_gradient_line(&mut self, from: Point, to: Point);

    fn set_end_marker_stroke(&mut self, color: &CssColor);

    /// Opacity of both the marker and the trail.
    fn set_motion_opacity(&mut self, opacity: f64);
}

/// What a [`RecordingTarget`] has been told so far.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    pub marker: Option<Point>,
    pub dash: Option<DashPattern>,
    pub gradient: Option<(Point, Point)>,
    pub end_stroke: Option<CssColor>,
    pub opacity: f64,
    /// Number of `move_marker` calls, i.e. rendered frames.
    pub frames: usize,
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            marker: None,
            dash: None,
            gradient: None,
            end_stroke: None,
            opacity: 1.0,
            frames: 0,
        }
    }
}

/// In-memory target. Clones share state, so a test can keep one clone and
/// hand the other to an animation.
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    state: Rc<RefCell<FrameState>>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> FrameState {
        self.state.borrow().clone()
    }
}

impl VisualTarget for RecordingTarget {
    fn move_marker(&mut self, at: Point) {
        let mut s = self.state.borrow_mut();
        s.marker = Some(at);
        s.frames += 1;
    }

    fn set_trail_dash(&mut self, dash: &DashPattern) {
        self.state.borrow_mut().dash = Some(*dash);
    }

    fn set_gradient_line(&mut self, from: Point, to: Point) {
        self.state.borrow_mut().gradient = Some((from, to));
    }

    fn set_end_marker_stroke(&mut self, color: &CssColor) {
        self.state.borrow_mut().end_stroke = Some(color.clone());
    }

    fn set_motion_opacity(&mut self, opacity: f64) {
        self.state.borrow_mut().opacity = opacity;
    }
}
