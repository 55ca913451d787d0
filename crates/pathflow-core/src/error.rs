//! Configuration errors.
//!
//! Every way an animation can fail to come up is reported once, at
//! construction. Nothing past construction returns an error: frame-time
//! anomalies are clamped and logged instead.

use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

/// Result alias for construction and configuration parsing.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The part an element plays in a path animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetRole {
    /// The full path providing geometry.
    Path,
    /// The highlight path drawn as a dash over the full path.
    Trail,
    /// The moving circle.
    Marker,
    /// The linear gradient painting the trail.
    Gradient,
    /// The circle at the path's logical end.
    EndMarker,
}

impl TargetRole {
    pub const ALL: [TargetRole; 5] = [
        TargetRole::Path,
        TargetRole::Trail,
        TargetRole::Marker,
        TargetRole::Gradient,
        TargetRole::EndMarker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetRole::Path => "path",
            TargetRole::Trail => "trail",
            TargetRole::Marker => "marker",
            TargetRole::Gradient => "gradient",
            TargetRole::EndMarker => "endMarker",
        }
    }
}

impl fmt::Display for TargetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element id that could not be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTarget {
    pub role: TargetRole,
    pub id: String,
}

impl fmt::Display for MissingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.role, self.id)
    }
}

pub type MissingTargets = SmallVec<[MissingTarget; 5]>;

fn join_missing(missing: &[MissingTarget]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why an animation (or a whole page table) could not be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// One or more required elements are absent from the document.
    #[error("animation '{name}' is missing {}", join_missing(.missing))]
    MissingTargets { name: String, missing: MissingTargets },

    /// Path data could not be parsed.
    #[error("animation '{name}' has unparsable path data: {reason}")]
    InvalidPath { name: String, reason: String },

    /// Path parsed but has no measurable length.
    #[error("animation '{name}' has a path of zero length")]
    EmptyPath { name: String },

    /// A duration or length is out of range.
    #[error("animation '{name}': {field} must be {expected}, got {value}")]
    InvalidTiming {
        name: String,
        field: &'static str,
        expected: &'static str,
        value: f64,
    },

    /// The page wiring table is not valid JSON for its schema, including
    /// color strings that are not hex.
    #[error("invalid page configuration: {0}")]
    InvalidJson(String),
}

impl ConfigError {
    /// The animation this error belongs to, when there is one.
    pub fn animation_name(&self) -> Option<&str> {
        match self {
            ConfigError::MissingTargets { name, .. }
            | ConfigError::InvalidPath { name, .. }
            | ConfigError::EmptyPath { name }
            | ConfigError::InvalidTiming { name, .. } => Some(name),
            ConfigError::InvalidJson(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::InvalidJson(e.to_string())
    }
}
