//! WASM bridge for folio.
//!
//! The JS host owns the DOM: it measures section/element geometry,
//! wires an `IntersectionObserver` and a scroll listener, and applies
//! the returned [`UiCommand`]s as class/style mutations. This bridge
//! owns the core state and is driven entirely through the exports
//! below; everything crosses the boundary as JSON strings.

use std::cell::RefCell;
use std::collections::HashMap;

use folio_core::{ParallaxRegistry, ScrollCoalescer, SectionTracker, VisibilityEngine};
use folio_protocol::{
    AnimationConfig, ElementBounds, ElementId, IdStr, ParallaxConfig, ScrollFrame, Section,
    SectionBounds, UiCommand,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

struct Bridge {
    tracker: SectionTracker,
    reveals: VisibilityEngine,
    parallax: ParallaxRegistry,
    coalescer: ScrollCoalescer,
    section_bounds: HashMap<IdStr, SectionBounds>,
}

// Single-threaded host; the bridge lives in a thread-local slot.
thread_local! {
    static BRIDGE: RefCell<Option<Bridge>> = const { RefCell::new(None) };
}

fn with_bridge<T>(f: impl FnOnce(&mut Bridge) -> Result<T, JsError>) -> Result<T, JsError> {
    BRIDGE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let bridge = slot
            .as_mut()
            .ok_or_else(|| JsError::new("folio: init_sections has not been called"))?;
        f(bridge)
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&e.to_string()))
}

/// Per-element geometry the host measures on each scroll tick, for the
/// elements it registered for reveals (polling mode) or parallax.
#[derive(Deserialize)]
struct ElementGeometry {
    element: ElementId,
    top: f64,
    height: f64,
}

/// What one scroll tick produced.
#[derive(Serialize)]
struct ScrollOutcome {
    /// Currently active section id.
    active_section: IdStr,
    /// Whether this tick changed the active section.
    changed: bool,
    /// Style mutations to apply, in order.
    commands: Vec<UiCommand>,
}

/// Configure the fixed, ordered section list. Replaces any previous
/// bridge state (trackers, observers, fired flags).
#[wasm_bindgen]
pub fn init_sections(sections_json: &str) -> Result<(), JsError> {
    let sections: Vec<Section> =
        serde_json::from_str(sections_json).map_err(|e| JsError::new(&e.to_string()))?;
    let tracker = SectionTracker::new(sections).map_err(|e| JsError::new(&e.to_string()))?;
    BRIDGE.with(|cell| {
        *cell.borrow_mut() = Some(Bridge {
            tracker,
            reveals: VisibilityEngine::new(),
            parallax: ParallaxRegistry::new(),
            coalescer: ScrollCoalescer::default(),
            section_bounds: HashMap::new(),
        });
    });
    Ok(())
}

/// Supply fresh section bounds (layout-ready, resize).
#[wasm_bindgen]
pub fn set_section_bounds(bounds_json: &str) -> Result<(), JsError> {
    let bounds: HashMap<IdStr, SectionBounds> =
        serde_json::from_str(bounds_json).map_err(|e| JsError::new(&e.to_string()))?;
    with_bridge(|bridge| {
        bridge.section_bounds = bounds;
        Ok(())
    })
}

/// One scroll tick. `now_ms` is any monotonic timestamp
/// (`performance.now()`); ticks inside the coalescing window return an
/// empty outcome. `elements_json` carries current geometry for
/// registered elements (`[]` when the host only uses observer-driven
/// reveals and has no parallax).
#[wasm_bindgen]
pub fn on_scroll(
    scroll_y: f64,
    viewport_width: f64,
    viewport_height: f64,
    now_ms: f64,
    elements_json: &str,
) -> Result<String, JsError> {
    let elements: Vec<ElementGeometry> =
        serde_json::from_str(elements_json).map_err(|e| JsError::new(&e.to_string()))?;
    with_bridge(|bridge| {
        let before = bridge.tracker.current_active_section().clone();
        if !bridge.coalescer.poll(now_ms) {
            return to_json(&ScrollOutcome {
                active_section: before,
                changed: false,
                commands: Vec::new(),
            });
        }

        let frame = ScrollFrame::new(scroll_y, viewport_width, viewport_height);
        bridge.tracker.on_scroll(&frame, &bridge.section_bounds);

        let by_id: HashMap<ElementId, ElementBounds> = elements
            .iter()
            .map(|e| (e.element, ElementBounds::new(e.top, e.height)))
            .collect();
        let bounds_of = |id: ElementId| by_id.get(&id).copied();

        let mut commands = bridge.reveals.on_frame(&frame, bounds_of);
        commands.extend(bridge.parallax.on_frame(&frame, bounds_of));

        let active = bridge.tracker.current_active_section().clone();
        to_json(&ScrollOutcome {
            changed: active != before,
            active_section: active,
            commands,
        })
    })
}

/// Start watching an element for its one-shot reveal.
#[wasm_bindgen]
pub fn observe_element(
    element: ElementId,
    config_json: &str,
    child_count: u32,
) -> Result<(), JsError> {
    let config: AnimationConfig =
        serde_json::from_str(config_json).map_err(|e| JsError::new(&e.to_string()))?;
    with_bridge(|bridge| {
        bridge.reveals.register(element, config, child_count);
        Ok(())
    })
}

/// Release an element (detach). Safe to call for unknown ids.
#[wasm_bindgen]
pub fn unobserve_element(element: ElementId) -> Result<(), JsError> {
    with_bridge(|bridge| {
        bridge.reveals.unregister(element);
        bridge.parallax.unregister(element);
        Ok(())
    })
}

/// Event-push reveal path: forward one `IntersectionObserver` entry.
/// Returns the style mutations to apply (usually empty).
#[wasm_bindgen]
pub fn element_visibility(element: ElementId, ratio: f64) -> Result<String, JsError> {
    with_bridge(|bridge| to_json(&bridge.reveals.deliver(element, ratio)))
}

/// Register an element for parallax. `resting_top` is its offset at
/// registration time and is never refreshed.
#[wasm_bindgen]
pub fn register_parallax(
    element: ElementId,
    speed_factor: f64,
    max_offset_px: f64,
    resting_top: f64,
) -> Result<(), JsError> {
    with_bridge(|bridge| {
        let config = ParallaxConfig::new(speed_factor, max_offset_px, resting_top);
        bridge.parallax.register(element, config);
        Ok(())
    })
}

/// Navigation click: optimistically activate `id` and return the
/// commands to apply (a `ScrollToSection` for the host's
/// `scrollIntoView`, or nothing for an unknown id).
#[wasm_bindgen]
pub fn scroll_to_section(id: &str) -> Result<String, JsError> {
    with_bridge(|bridge| {
        let commands: Vec<UiCommand> = bridge.tracker.request_scroll_to(id).into_iter().collect();
        to_json(&commands)
    })
}

/// Current active section id.
#[wasm_bindgen]
pub fn active_section() -> Result<String, JsError> {
    with_bridge(|bridge| Ok(bridge.tracker.current_active_section().to_string()))
}

/// Drop all bridge state. Part of host teardown — after this, every
/// export except `init_sections` fails cleanly.
#[wasm_bindgen]
pub fn teardown() {
    BRIDGE.with(|cell| {
        *cell.borrow_mut() = None;
    });
}
