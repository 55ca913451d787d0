//! Page DOM as an animation host.
//!
//! Elements are looked up by id once at mount time. Path geometry comes from
//! the path's `d` attribute, so arc lengths are measured in the same user
//! units the browser uses for `stroke-dasharray`.

use pathflow_core::trail::DashPattern;
use pathflow_core::{
    CssColor, ElementHost, PathGeometry, Point, ResolvedElements, SvgPath, VisualTarget,
};
use std::fmt;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, SvgElement};

/// Element lookup and target construction over a live document.
pub struct DomHost {
    document: Document,
}

impl DomHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Host for the current window's document, if there is one.
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }
}

impl ElementHost for DomHost {
    type Element = Element;

    fn find(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn geometry(&self, path: &Element) -> Result<Box<dyn PathGeometry>, String> {
        let d = path
            .get_attribute("d")
            .ok_or_else(|| format!("#{} has no `d` attribute", path.id()))?;
        Ok(Box::new(SvgPath::parse(&d)?))
    }

    fn target(&self, elements: ResolvedElements<Element>) -> Box<dyn VisualTarget> {
        Box::new(DomTarget::new(elements))
    }
}

/// Writes frame output to SVG attributes and inline styles.
pub struct DomTarget {
    marker: Element,
    trail: Element,
    gradient: Element,
    end_marker: Element,
    failures: WriteFailures,
}

impl DomTarget {
    pub fn new(elements: ResolvedElements<Element>) -> Self {
        let mut failures = WriteFailures::default();
        // Gradient coordinates are written in path space.
        failures.check(
            elements.gradient.set_attribute("gradientUnits", "userSpaceOnUse"),
            || format!("gradientUnits on #{}", elements.gradient.id()),
        );
        Self {
            marker: elements.marker,
            trail: elements.trail,
            gradient: elements.gradient,
            end_marker: elements.end_marker,
            failures,
        }
    }
}

/// Logs the first failed DOM write of a target at debug level. Later
/// failures are dropped.
#[derive(Debug, Default)]
struct WriteFailures {
    reported: bool,
}

impl WriteFailures {
    /// Returns whether `result` was logged.
    fn check<E: fmt::Debug>(
        &mut self,
        result: Result<(), E>,
        what: impl FnOnce() -> String,
    ) -> bool {
        match result {
            Ok(()) => false,
            Err(_) if self.reported => false,
            Err(e) => {
                self.reported = true;
                log::debug!("writing {} failed: {e:?}", what());
                true
            }
        }
    }
}

/// Inline style on SVG elements; plain attribute on anything else.
fn set_style(el: &Element, property: &str, value: &str) -> Result<(), JsValue> {
    match el.dyn_ref::<SvgElement>() {
        Some(svg) => svg.style().set_property(property, value),
        None => el.set_attribute(property, value),
    }
}

fn set_number(el: &Element, name: &str, value: f64) -> Result<(), JsValue> {
    el.set_attribute(name, &value.to_string())
}

impl VisualTarget for DomTarget {
    fn move_marker(&mut self, at: Point) {
        let result = set_number(&self.marker, "cx", at.x)
            .and_then(|()| set_number(&self.marker, "cy", at.y));
        self.failures.check(result, || format!("cx/cy on #{}", self.marker.id()));
    }

    fn set_trail_dash(&mut self, dash: &DashPattern) {
        let result = set_style(&self.trail, "stroke-dasharray", &dash.dasharray())
            .and_then(|()| set_style(&self.trail, "stroke-dashoffset", &dash.dashoffset()));
        self.failures.check(result, || format!("dash pattern on #{}", self.trail.id()));
    }

    fn set_gradient_line(&mut self, from: Point, to: Point) {
        let g = &self.gradient;
        let result = set_number(g, "x1", from.x)
            .and_then(|()| set_number(g, "y1", from.y))
            .and_then(|()| set_number(g, "x2", to.x))
            .and_then(|()| set_number(g, "y2", to.y));
        self.failures.check(result, || format!("gradient line on #{}", g.id()));
    }

    fn set_end_marker_stroke(&mut self, color: &CssColor) {
        let result = self.end_marker.set_attribute("stroke", &color.as_css());
        self.failures.check(result, || format!("stroke on #{}", self.end_marker.id()));
    }

    fn set_motion_opacity(&mut self, opacity: f64) {
        let value = opacity.to_string();
        let result = set_style(&self.marker, "opacity", &value)
            .and_then(|()| set_style(&self.trail, "opacity", &value));
        self.failures.check(result, || {
            format!("opacity on #{}/#{}", self.marker.id(), self.trail.id())
        });
    }
}
