//! `requestAnimationFrame` as a [`Scheduler`].

use pathflow_core::{Scheduler, TickCallback, TickHandle};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

pub struct RafScheduler {
    window: Window,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    pub fn from_window() -> Option<Self> {
        web_sys::window().map(Self::new)
    }
}

impl Scheduler for RafScheduler {
    fn schedule_tick(&self, callback: TickCallback) -> Option<TickHandle> {
        // Freed by wasm-bindgen after it runs. A cancelled frame leaks its
        // closure, which only happens on stop/reset.
        let closure = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        match self.window.request_animation_frame(closure.unchecked_ref()) {
            Ok(id) => Some(TickHandle(id as u64)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                None
            }
        }
    }

    fn cancel_tick(&self, handle: TickHandle) {
        let _ = self.window.cancel_animation_frame(handle.0 as i32);
    }
}
