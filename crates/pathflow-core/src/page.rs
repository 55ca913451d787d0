//! Page composition root.
//!
//! Turns a [`PageConfig`] wiring table into live animations. Element lookup,
//! geometry extraction and visual targets come from an [`ElementHost`], so
//! the same mounting logic drives the browser DOM and in-memory test hosts.
//! A row that fails to resolve is logged and skipped; the rest of the page
//! still animates.

use crate::animation::PathAnimation;
use crate::config::{AnimationDef, PageConfig, PlaybackMode};
use crate::error::{ConfigError, MissingTarget, MissingTargets, Result, TargetRole};
use crate::geometry::PathGeometry;
use crate::scheduler::Scheduler;
use crate::sequence::AnimationSequence;
use crate::target::VisualTarget;
use std::rc::Rc;

/// The five elements of one animation, found in the document.
#[derive(Debug, Clone)]
pub struct ResolvedElements<E> {
    pub path: E,
    pub trail: E,
    pub marker: E,
    pub gradient: E,
    pub end_marker: E,
}

/// Platform access used while mounting.
pub trait ElementHost {
    type Element: Clone;

    fn find(&self, id: &str) -> Option<Self::Element>;

    /// Arc-length geometry of a resolved `path` element.
    fn geometry(&self, path: &Self::Element) -> std::result::Result<Box<dyn PathGeometry>, String>;

    /// Visual target writing to the resolved elements.
    fn target(&self, elements: ResolvedElements<Self::Element>) -> Box<dyn VisualTarget>;
}

/// Look up every element of `def`, reporting all missing ones together.
pub fn resolve_elements<H: ElementHost>(
    host: &H,
    def: &AnimationDef,
) -> Result<ResolvedElements<H::Element>> {
    let name = def.display_name();
    let mut missing = MissingTargets::new();
    let mut find = |role: TargetRole| {
        let id = def.elements.get(role);
        let found = host.find(id);
        if found.is_none() {
            log::error!("[PathAnimation {name}] {role} element #{id} not found");
            missing.push(MissingTarget {
                role,
                id: id.to_string(),
            });
        }
        found
    };

    let path = find(TargetRole::Path);
    let trail = find(TargetRole::Trail);
    let marker = find(TargetRole::Marker);
    let gradient = find(TargetRole::Gradient);
    let end_marker = find(TargetRole::EndMarker);

    match (path, trail, marker, gradient, end_marker) {
        (Some(path), Some(trail), Some(marker), Some(gradient), Some(end_marker)) => {
            Ok(ResolvedElements {
                path,
                trail,
                marker,
                gradient,
                end_marker,
            })
        }
        _ => Err(ConfigError::MissingTargets {
            name: name.to_string(),
            missing,
        }),
    }
}

/// Resolve, measure and construct one animation.
pub fn build_animation<H: ElementHost>(
    host: &H,
    def: &AnimationDef,
    scheduler: Rc<dyn Scheduler>,
) -> Result<PathAnimation> {
    let name = def.display_name();
    let elements = resolve_elements(host, def)?;
    let geometry = host
        .geometry(&elements.path)
        .map_err(|reason| ConfigError::InvalidPath {
            name: name.to_string(),
            reason,
        })?;
    let target = host.target(elements);
    PathAnimation::new(name, def.config.clone(), geometry, target, scheduler)
}

/// Everything mounted from one wiring table.
pub struct Mounted {
    mode: PlaybackMode,
    animations: Vec<PathAnimation>,
    sequence: Option<AnimationSequence>,
    failures: Vec<ConfigError>,
}

/// Build every row of `page`; rows that fail are collected, not fatal.
pub fn mount<H: ElementHost>(host: &H, page: &PageConfig, scheduler: Rc<dyn Scheduler>) -> Mounted {
    let mut animations = Vec::with_capacity(page.animations.len());
    let mut failures = Vec::new();

    for def in &page.animations {
        match build_animation(host, def, scheduler.clone()) {
            Ok(animation) => animations.push(animation),
            Err(e) => {
                log::error!("skipping animation: {e}");
                failures.push(e);
            }
        }
    }

    let sequence = match page.mode {
        PlaybackMode::Sequence => Some(AnimationSequence::new(animations.clone())),
        PlaybackMode::Independent => None,
    };
    log::info!(
        "mounted {} of {} path animations ({} mode)",
        animations.len(),
        page.animations.len(),
        page.mode.as_str()
    );

    Mounted {
        mode: page.mode,
        animations,
        sequence,
        failures,
    }
}

impl Mounted {
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn animations(&self) -> &[PathAnimation] {
        &self.animations
    }

    pub fn sequence(&self) -> Option<&AnimationSequence> {
        self.sequence.as_ref()
    }

    pub fn failures(&self) -> &[ConfigError] {
        &self.failures
    }

    pub fn get(&self, name: &str) -> Option<&PathAnimation> {
        self.animations.iter().find(|a| a.name() == name)
    }

    /// Start playback according to the mode.
    pub fn start(&self) {
        match &self.sequence {
            Some(sequence) => sequence.start(),
            None => self.animations.iter().for_each(PathAnimation::start),
        }
    }

    /// Stop everything and restore resting visuals.
    pub fn stop(&self) {
        match &self.sequence {
            Some(sequence) => sequence.stop(),
            None => {
                for animation in &self.animations {
                    animation.reset();
                }
            }
        }
    }
}
