//! Animation configuration and the page wiring table.
//!
//! The JSON shape uses camelCase keys so the same table can be written inline
//! in page scripts:
//!
//! ```json
//! {
//!   "mode": "sequence",
//!   "animations": [
//!     { "path": "fullPath", "trail": "animatedPath", "marker": "movingCircle",
//!       "gradient": "trailGradient", "endMarker": "endCircle",
//!       "duration": 3000, "pauseDuration": 3000, "reverse": false }
//!   ]
//! }
//! ```

use crate::color::CssColor;
use crate::error::{ConfigError, Result, TargetRole};
use serde::{Deserialize, Serialize};

/// Per-animation timing, direction and colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Label for diagnostics. Defaults to the marker element id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// One full traversal of the path, in milliseconds.
    #[serde(rename = "duration")]
    pub duration_ms: f64,
    /// Length of the highlighted trail, in arc-length units.
    pub trail_length: f64,
    /// Dwell at the terminus before looping or handing off, in milliseconds.
    #[serde(rename = "pauseDuration")]
    pub pause_duration_ms: f64,
    /// Travel from the path's end toward its start.
    pub reverse: bool,
    /// Any CSS color; hex values are normalized.
    pub active_color: CssColor,
    pub inactive_color: CssColor,
    /// Emit lifecycle diagnostics for this instance.
    pub debug: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            name: None,
            duration_ms: 4000.0,
            trail_length: 60.0,
            pause_duration_ms: 5000.0,
            reverse: true,
            active_color: CssColor::ACTIVE,
            inactive_color: CssColor::INACTIVE,
            debug: true,
        }
    }
}

impl AnimationConfig {
    /// Check ranges that serde cannot express.
    pub fn validate(&self, name: &str) -> Result<()> {
        let bad = |field, expected, value| ConfigError::InvalidTiming {
            name: name.to_string(),
            field,
            expected,
            value,
        };
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(bad("duration", "a positive number of milliseconds", self.duration_ms));
        }
        if !self.trail_length.is_finite() || self.trail_length < 0.0 {
            return Err(bad("trailLength", "a non-negative length", self.trail_length));
        }
        if !self.pause_duration_ms.is_finite() || self.pause_duration_ms < 0.0 {
            return Err(bad(
                "pauseDuration",
                "a non-negative number of milliseconds",
                self.pause_duration_ms,
            ));
        }
        Ok(())
    }
}

/// DOM ids of the five elements one animation drives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementIds {
    pub path: String,
    pub trail: String,
    pub marker: String,
    pub gradient: String,
    pub end_marker: String,
}

impl ElementIds {
    pub fn get(&self, role: TargetRole) -> &str {
        match role {
            TargetRole::Path => &self.path,
            TargetRole::Trail => &self.trail,
            TargetRole::Marker => &self.marker,
            TargetRole::Gradient => &self.gradient,
            TargetRole::EndMarker => &self.end_marker,
        }
    }
}

/// One row of the wiring table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationDef {
    #[serde(flatten)]
    pub elements: ElementIds,
    #[serde(flatten)]
    pub config: AnimationConfig,
}

impl AnimationDef {
    /// Configured name, falling back to the marker id.
    pub fn display_name(&self) -> &str {
        self.config.name.as_deref().unwrap_or(&self.elements.marker)
    }
}

/// How mounted animations are played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
    /// Every animation loops on its own, each pausing independently.
    #[default]
    Independent,
    /// A single sequence rotates through the animations one at a time.
    Sequence,
}

impl PlaybackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackMode::Independent => "independent",
            PlaybackMode::Sequence => "sequence",
        }
    }
}

/// The full set of animations on a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub mode: PlaybackMode,
    pub animations: Vec<AnimationDef>,
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The four contact-section animations, in rotation order.
    pub fn contact_section() -> Self {
        let row = |name: &str, stem: &str, gradient: &str, end: &str, timing: (f64, f64), reverse| {
            AnimationDef {
                elements: ElementIds {
                    path: format!("fullPath{stem}"),
                    trail: format!("animatedPath{stem}"),
                    marker: format!("movingCircle{stem}"),
                    gradient: gradient.to_string(),
                    end_marker: end.to_string(),
                },
                config: AnimationConfig {
                    name: Some(name.to_string()),
                    duration_ms: timing.0,
                    pause_duration_ms: timing.1,
                    reverse,
                    ..AnimationConfig::default()
                },
            }
        };

        Self {
            mode: PlaybackMode::Independent,
            animations: vec![
                row(
                    "Animation1",
                    "FromListToPerformer",
                    "paint0_linear_2004_1241",
                    "endCirclePerformer",
                    (4000.0, 5000.0),
                    true,
                ),
                row(
                    "Animation2",
                    "FromSearchASpecialistToList",
                    "linear-2",
                    "endCircleList",
                    (3000.0, 3000.0),
                    false,
                ),
                row(
                    "Animation3",
                    "FromCheckConditionToSearchDocument",
                    "left-linear-1",
                    "endCircleSearchDocument",
                    (3000.0, 3000.0),
                    false,
                ),
                row(
                    "Animation4",
                    "FromSearchDocumentToFound",
                    "left-linear-2",
                    "endCircleDocumentFound",
                    (4000.0, 5000.0),
                    true,
                ),
            ],
        }
    }
}
