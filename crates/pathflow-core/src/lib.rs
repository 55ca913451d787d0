pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod page;
pub mod scheduler;
pub mod sequence;
pub mod target;
pub mod trail;

pub use animation::{CycleCallback, PathAnimation, RunState};
pub use color::{Color, CssColor};
pub use config::{AnimationConfig, AnimationDef, ElementIds, PageConfig, PlaybackMode};
pub use error::{ConfigError, MissingTarget, TargetRole};
pub use geometry::{PathGeometry, SvgPath};
pub use page::{ElementHost, Mounted, ResolvedElements, mount};
pub use scheduler::{ManualScheduler, Scheduler, TickCallback, TickHandle};
pub use sequence::{AnimationSequence, Playable};
pub use target::{FrameState, RecordingTarget, VisualTarget};

// Re-export kurbo's point so downstream crates don't need a direct dependency
pub use kurbo::Point;
