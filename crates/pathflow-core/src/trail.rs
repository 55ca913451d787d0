//! Per-frame numbers: where the marker is, which slice of the path the trail
//! covers, and how close the marker is to its terminus.

/// Distance from the terminus that counts as arrival.
pub const AT_END_DISTANCE: f64 = 1.0;
/// Distance from the terminus at which the end marker lights up early.
pub const NEAR_END_DISTANCE: f64 = 20.0;

/// Normalized loop progress in `[0, 1)`, inverted for reverse travel.
///
/// `elapsed_ms` is time since the current loop started.
pub fn progress(elapsed_ms: f64, duration_ms: f64, reverse: bool) -> f64 {
    let p = (elapsed_ms % duration_ms) / duration_ms;
    if reverse { 1.0 - p } else { p }
}

/// Arc-length position for a normalized progress, clamped to the path.
/// Non-finite input yields `0`.
pub fn arc_position(progress: f64, path_length: f64) -> f64 {
    let pos = path_length * progress;
    if !pos.is_finite() {
        log::debug!("non-finite arc position {pos}, using 0");
        return 0.0;
    }
    pos.clamp(0.0, path_length.max(0.0))
}

/// The slice `[start, end]` of the path the trail occupies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailWindow {
    pub start: f64,
    pub end: f64,
}

impl TrailWindow {
    /// Trail for a marker at `position`.
    ///
    /// Reverse travel heads toward 0, so the trail lies on the far side
    /// (`position..position+trail`). Forward travel trails behind
    /// (`position-trail..position`).
    pub fn around(position: f64, trail_length: f64, path_length: f64, reverse: bool) -> Self {
        if reverse {
            Self {
                start: position,
                end: (position + trail_length).min(path_length),
            }
        } else {
            Self {
                start: (position - trail_length).max(0.0),
                end: position,
            }
        }
    }

    pub fn visible_length(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// `stroke-dasharray` / `stroke-dashoffset` values drawing one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub dash: f64,
    pub gap: f64,
    pub offset: f64,
}

impl DashPattern {
    /// One dash the size of the window, a gap the size of the whole path, and
    /// an offset that slides the dash to the window's start.
    pub fn for_window(window: &TrailWindow, path_length: f64) -> Self {
        Self {
            dash: window.visible_length(),
            gap: path_length,
            offset: -window.start,
        }
    }

    pub fn dasharray(&self) -> String {
        format!("{} {}", self.dash, self.gap)
    }

    pub fn dashoffset(&self) -> String {
        format!("{}", self.offset)
    }
}

/// How close the marker is to its logical terminus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndProximity {
    /// Within [`AT_END_DISTANCE`].
    AtEnd,
    /// Within [`NEAR_END_DISTANCE`].
    NearEnd,
    Away,
}

/// The terminus is `0` for reverse travel and `path_length` otherwise.
pub fn end_proximity(position: f64, path_length: f64, reverse: bool) -> EndProximity {
    let remaining = if reverse { position } else { path_length - position };
    if remaining < AT_END_DISTANCE {
        EndProximity::AtEnd
    } else if remaining < NEAR_END_DISTANCE {
        EndProximity::NearEnd
    } else {
        EndProximity::Away
    }
}
