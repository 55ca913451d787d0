//! Integration tests: wiring table → mounted animations.
//!
//! Mounts page configurations against an in-memory document and checks how
//! missing elements, bad path data and both playback modes behave.

use pathflow_core::page::build_animation;
use pathflow_core::{
    ConfigError, CssColor, ElementHost, ElementIds, ManualScheduler, PageConfig,
    PathGeometry, PlaybackMode, RecordingTarget, ResolvedElements, Scheduler, SvgPath, TargetRole,
    VisualTarget, mount,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Element ids map to themselves; `path` elements carry `d` data.
#[derive(Default)]
struct FakeDocument {
    paths: HashMap<String, String>,
    elements: HashSet<String>,
    targets: RefCell<HashMap<String, RecordingTarget>>,
}

impl FakeDocument {
    fn add(&mut self, ids: &ElementIds, d: &str) {
        self.paths.insert(ids.path.clone(), d.to_string());
        for id in [&ids.trail, &ids.marker, &ids.gradient, &ids.end_marker] {
            self.elements.insert(id.clone());
        }
    }

    fn remove(&mut self, id: &str) {
        self.paths.remove(id);
        self.elements.remove(id);
    }

    fn target(&self, marker: &str) -> RecordingTarget {
        self.targets.borrow()[marker].clone()
    }

    fn with_page(page: &PageConfig) -> Self {
        let mut doc = Self::default();
        for (i, def) in page.animations.iter().enumerate() {
            let y = i as f64 * 40.0;
            doc.add(&def.elements, &format!("M0 {y} C40 {y} 60 {} 100 {}", y + 30.0, y + 30.0));
        }
        doc
    }
}

impl ElementHost for FakeDocument {
    type Element = String;

    fn find(&self, id: &str) -> Option<String> {
        (self.paths.contains_key(id) || self.elements.contains(id)).then(|| id.to_string())
    }

    fn geometry(&self, path: &String) -> Result<Box<dyn PathGeometry>, String> {
        let d = self
            .paths
            .get(path)
            .ok_or_else(|| format!("#{path} is not a path"))?;
        Ok(Box::new(SvgPath::parse(d)?))
    }

    fn target(&self, elements: ResolvedElements<String>) -> Box<dyn VisualTarget> {
        let target = RecordingTarget::new();
        self.targets
            .borrow_mut()
            .insert(elements.marker.clone(), target.clone());
        Box::new(target)
    }
}

fn scheduler() -> (Rc<ManualScheduler>, Rc<dyn Scheduler>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let sched = Rc::new(ManualScheduler::new());
    let dyn_sched: Rc<dyn Scheduler> = sched.clone();
    (sched, dyn_sched)
}

fn onboarding() -> PageConfig {
    PageConfig::from_json(include_str!("fixtures/onboarding_page.json")).unwrap()
}

// ─── Resolution ──────────────────────────────────────────────────────────

#[test]
fn fixture_mounts_every_row() {
    let page = onboarding();
    let doc = FakeDocument::with_page(&page);
    let (_, sched) = scheduler();

    let mounted = mount(&doc, &page, sched);
    assert!(mounted.failures().is_empty());
    assert_eq!(mounted.mode(), PlaybackMode::Sequence);
    let names: Vec<&str> = mounted.animations().iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["Intake", "Review", "doneDot"]);
    assert_eq!(mounted.sequence().map(|s| s.len()), Some(3));
}

#[test]
fn missing_elements_are_reported_together_and_skipped() {
    let page = onboarding();
    let mut doc = FakeDocument::with_page(&page);
    doc.remove("reviewTrail");
    doc.remove("reviewEnd");
    let (sched, dyn_sched) = scheduler();

    let mounted = mount(&doc, &page, dyn_sched);
    assert_eq!(mounted.animations().len(), 2);
    assert_eq!(mounted.failures().len(), 1);
    match &mounted.failures()[0] {
        ConfigError::MissingTargets { name, missing } => {
            assert_eq!(name, "Review");
            let roles: Vec<TargetRole> = missing.iter().map(|m| m.role).collect();
            assert_eq!(roles, vec![TargetRole::Trail, TargetRole::EndMarker]);
            assert_eq!(missing[0].id, "reviewTrail");
        }
        other => panic!("expected MissingTargets, got {other:?}"),
    }

    // The remaining two still rotate.
    mounted.start();
    assert!(mounted.get("Intake").unwrap().is_running());
    assert!(!mounted.get("doneDot").unwrap().is_running());
    assert_eq!(sched.pending(), 1);
}

#[test]
fn missing_target_never_schedules_a_frame() {
    let mut page = onboarding();
    page.mode = PlaybackMode::Independent;
    page.animations.truncate(1);
    let mut doc = FakeDocument::with_page(&page);
    doc.remove("intakeDot");
    let (sched, dyn_sched) = scheduler();

    let mounted = mount(&doc, &page, dyn_sched);
    assert!(mounted.animations().is_empty());
    assert!(matches!(
        &mounted.failures()[0],
        ConfigError::MissingTargets { name, .. } if name == "Intake"
    ));

    mounted.start();
    assert_eq!(sched.pending(), 0);
    sched.run_frame(16.0);
    mounted.stop();
}

#[test]
fn bad_path_data_is_a_config_error() {
    let page = onboarding();
    let def = &page.animations[0];
    let mut doc = FakeDocument::default();
    doc.add(&def.elements, "M 0 0 Q");
    let (_, sched) = scheduler();

    let err = build_animation(&doc, def, sched.clone()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPath { ref name, .. } if name == "Intake"));

    doc.add(&def.elements, "M 10 10");
    let err = build_animation(&doc, def, sched).unwrap_err();
    assert_eq!(err, ConfigError::EmptyPath { name: "Intake".into() });
}

#[test]
fn bad_timing_is_a_config_error() {
    let mut page = onboarding();
    page.animations[2].config.duration_ms = -5.0;
    let doc = FakeDocument::with_page(&page);
    let (_, sched) = scheduler();

    let mounted = mount(&doc, &page, sched);
    assert_eq!(mounted.animations().len(), 2);
    assert!(matches!(
        mounted.failures()[0],
        ConfigError::InvalidTiming { field: "duration", .. }
    ));
}

// ─── Playback modes ──────────────────────────────────────────────────────

#[test]
fn independent_mode_runs_every_animation_at_once() {
    let page = PageConfig::contact_section();
    let doc = FakeDocument::with_page(&page);
    let (sched, dyn_sched) = scheduler();

    let mounted = mount(&doc, &page, dyn_sched);
    assert_eq!(mounted.mode(), PlaybackMode::Independent);
    assert!(mounted.sequence().is_none());
    mounted.start();
    assert!(mounted.animations().iter().all(|a| a.is_running()));
    assert_eq!(sched.pending(), 4);

    sched.run_frame(0.0);
    sched.run_until(3000.0, 10.0);
    // 3s loops are dwelling at their ends; 4s loops are still travelling.
    assert!(mounted.get("Animation2").unwrap().is_paused());
    assert!(mounted.get("Animation3").unwrap().is_paused());
    assert!(!mounted.get("Animation1").unwrap().is_paused());
    assert!(!mounted.get("Animation4").unwrap().is_paused());

    // Each loops back on its own after the dwell.
    sched.run_until(6500.0, 10.0);
    assert!(!mounted.get("Animation2").unwrap().is_paused());
    assert!(mounted.animations().iter().all(|a| a.is_running()));

    mounted.stop();
    assert!(mounted.animations().iter().all(|a| !a.is_running()));
    assert_eq!(sched.pending(), 0);
    let snap = doc.target("movingCircleFromListToPerformer").snapshot();
    assert_eq!(snap.opacity, 1.0);
    assert_eq!(snap.end_stroke, Some(CssColor::INACTIVE));
}

#[test]
fn sequence_mode_rotates_one_at_a_time() {
    let page = onboarding();
    let doc = FakeDocument::with_page(&page);
    let (sched, dyn_sched) = scheduler();

    let mounted = mount(&doc, &page, dyn_sched);
    mounted.start();
    sched.run_frame(0.0);

    let mut seen = Vec::new();
    let mut t = 0.0;
    while t <= 4000.0 {
        sched.run_frame(t);
        let active: Vec<&str> = mounted
            .animations()
            .iter()
            .filter(|a| a.is_running())
            .map(|a| a.name())
            .collect();
        assert_eq!(active.len(), 1, "at {t}: {active:?}");
        if seen.last() != Some(&active[0]) {
            seen.push(active[0]);
        }
        t += 5.0;
    }
    assert_eq!(seen, vec!["Intake", "Review", "doneDot", "Intake"]);
}

#[test]
fn configured_colors_reach_the_end_marker() {
    let mut page = onboarding();
    page.mode = PlaybackMode::Independent;
    let doc = FakeDocument::with_page(&page);
    let (sched, dyn_sched) = scheduler();

    let mounted = mount(&doc, &page, dyn_sched);
    mounted.start();
    sched.run_frame(0.0);
    sched.run_until(995.0, 5.0);

    let done = doc.target("doneDot").snapshot();
    assert_eq!(done.end_stroke.map(|c| c.to_string()), Some("#22AA66".to_string()));
    let intake = doc.target("intakeDot").snapshot();
    assert_eq!(intake.end_stroke, Some(CssColor::ACTIVE));
    // Named colors pass through untouched.
    let review = doc.target("reviewDot").snapshot();
    assert_eq!(review.end_stroke, Some(CssColor::Css("steelblue".into())));
}
