//! WASM bridge for Pathflow: drives decorative SVG path animations in the page.
//!
//! Compiled via `wasm-pack build --target web` and loaded by the page script:
//!
//! ```js
//! import init, { init_logging, mount_contact_animations } from "./pathflow_wasm.js";
//! await init();
//! init_logging("warn");
//! const animations = mount_contact_animations();
//! ```

mod dom;
mod logger;
mod raf;

pub use dom::{DomHost, DomTarget};
pub use raf::RafScheduler;

use pathflow_core::{ConfigError, Mounted, PageConfig, mount};
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// The page's mounted path animations.
///
/// Holds every animation built from one wiring table. All control from the
/// page script goes through this struct.
#[wasm_bindgen]
pub struct PathAnimations {
    mounted: Mounted,
}

#[wasm_bindgen]
impl PathAnimations {
    /// Mount animations from a JSON wiring table, or the built-in
    /// contact-section table when `config_json` is omitted.
    ///
    /// Missing elements never throw; they are logged and listed by
    /// `failures()`. Malformed JSON does throw.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PathAnimations, JsValue> {
        console_error_panic_hook_setup();

        let page = match config_json {
            Some(json) => PageConfig::from_json(&json).map_err(to_js_error)?,
            None => PageConfig::contact_section(),
        };
        let host = DomHost::from_window().ok_or_else(|| js_error("no document to animate"))?;
        let scheduler = RafScheduler::from_window().ok_or_else(|| js_error("no window to schedule frames on"))?;

        Ok(Self {
            mounted: mount(&host, &page, Rc::new(scheduler)),
        })
    }

    /// Start playback (independently or as a rotation, per the table's mode).
    pub fn start(&self) {
        self.mounted.start();
    }

    /// Stop every animation and restore resting visuals.
    pub fn stop(&self) {
        self.mounted.stop();
    }

    /// `"independent"` or `"sequence"`.
    pub fn mode(&self) -> String {
        self.mounted.mode().as_str().to_string()
    }

    pub fn animation_count(&self) -> usize {
        self.mounted.animations().len()
    }

    pub fn failure_count(&self) -> usize {
        self.mounted.failures().len()
    }

    /// Rows that failed to mount, as JSON `[{"animation":..,"error":..}]`.
    pub fn failures(&self) -> String {
        failures_to_json(self.mounted.failures())
    }

    /// Whether the named animation is currently running.
    pub fn is_running(&self, name: &str) -> bool {
        self.mounted.get(name).is_some_and(|a| a.is_running())
    }
}

/// Page-load entry point: mount the contact-section table and start it.
#[wasm_bindgen]
pub fn mount_contact_animations() -> Result<PathAnimations, JsValue> {
    let animations = PathAnimations::new(None)?;
    animations.start();
    Ok(animations)
}

/// Route `log` output to the browser console at the given level.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    logger::init(logger::parse_level(level));
}

// ─── Errors ──────────────────────────────────────────────────────────────

fn js_error(msg: &str) -> JsValue {
    js_sys::Error::new(msg).into()
}

fn to_js_error(e: ConfigError) -> JsValue {
    js_error(&e.to_string())
}

#[derive(Serialize)]
struct FailureReport<'a> {
    animation: Option<&'a str>,
    error: String,
}

fn failures_to_json(failures: &[ConfigError]) -> String {
    let reports: Vec<FailureReport<'_>> = failures
        .iter()
        .map(|e| FailureReport {
            animation: e.animation_name(),
            error: e.to_string(),
        })
        .collect();
    serde_json::to_string(&reports).unwrap_or_else(|_| "[]".to_string())
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Pathflow WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone validation (no document needed) ──────────────────────────

/// Validate a JSON wiring table without touching the DOM.
/// Returns `{"ok":true,"mode":"..","animations":N}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_config(json: &str) -> String {
    let result = PageConfig::from_json(json).and_then(|page| {
        for def in &page.animations {
            def.config.validate(def.display_name())?;
        }
        Ok(page)
    });
    match result {
        Ok(page) => serde_json::json!({
            "ok": true,
            "mode": page.mode.as_str(),
            "animations": page.animations.len(),
        })
        .to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}

/// The built-in contact-section table as JSON, for page authors to copy.
#[wasm_bindgen]
pub fn default_config() -> String {
    PageConfig::contact_section()
        .to_json()
        .unwrap_or_else(|_| "{}".to_string())
}
