use std::collections::HashMap;

use folio_protocol::{ElementBounds, ElementId, ParallaxConfig, ScrollFrame, Target, UiCommand};

/// Parallax is disabled below this viewport width — a performance
/// policy for narrow (mobile) viewports, not a correctness rule.
pub const PARALLAX_MIN_VIEWPORT_WIDTH: f64 = 768.0;

/// Translation for one element at one scroll position.
///
/// `None` means the element is outside the viewport: keep whatever
/// offset it last had. Inside the viewport the offset is the scroll
/// distance from the resting position scaled by the speed factor and
/// clamped symmetrically, so the formula is idempotent per tick and
/// cannot oscillate from rounding.
pub fn compute_offset(
    scroll_y: f64,
    config: &ParallaxConfig,
    bounds: &ElementBounds,
    viewport_height: f64,
) -> Option<f64> {
    let intersecting = bounds.bottom() > scroll_y && bounds.top < scroll_y + viewport_height;
    if !intersecting {
        return None;
    }
    let raw = config.speed_factor * (scroll_y - config.resting_top);
    Some(raw.clamp(-config.max_offset_px, config.max_offset_px))
}

#[derive(Debug)]
struct ParallaxEntry {
    config: ParallaxConfig,
    last_offset: f64,
}

/// Holds parallax configs for registered elements and turns scroll
/// frames into `SetTranslateY` commands. Only registered elements are
/// recomputed, and a command is only emitted when the offset actually
/// changed.
#[derive(Debug)]
pub struct ParallaxRegistry {
    elements: HashMap<ElementId, ParallaxEntry>,
    min_viewport_width: f64,
}

impl Default for ParallaxRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallaxRegistry {
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            min_viewport_width: PARALLAX_MIN_VIEWPORT_WIDTH,
        }
    }

    /// Override the narrow-viewport cutoff for hosts whose units are
    /// not CSS pixels (e.g. terminal columns).
    pub fn with_min_viewport_width(min_viewport_width: f64) -> Self {
        Self {
            elements: HashMap::new(),
            min_viewport_width,
        }
    }

    /// Register an element. `config.resting_top` should be captured by
    /// the caller at this moment and never refreshed.
    pub fn register(&mut self, element: ElementId, config: ParallaxConfig) {
        self.elements.insert(
            element,
            ParallaxEntry {
                config,
                last_offset: 0.0,
            },
        );
    }

    /// Stop tracking an element. Idempotent.
    pub fn unregister(&mut self, element: ElementId) {
        self.elements.remove(&element);
    }

    /// Recompute offsets for one scroll frame.
    pub fn on_frame<F>(&mut self, frame: &ScrollFrame, bounds_of: F) -> Vec<UiCommand>
    where
        F: Fn(ElementId) -> Option<ElementBounds>,
    {
        if frame.viewport_width < self.min_viewport_width {
            return Vec::new();
        }

        let mut commands = Vec::new();
        for (&element, entry) in &mut self.elements {
            let Some(bounds) = bounds_of(element) else {
                continue;
            };
            let Some(offset) =
                compute_offset(frame.scroll_y, &entry.config, &bounds, frame.viewport_height)
            else {
                continue;
            };
            if offset != entry.last_offset {
                entry.last_offset = offset;
                commands.push(UiCommand::SetTranslateY {
                    target: Target::element(element),
                    offset_px: offset,
                });
            }
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(speed: f64, max: f64, resting: f64) -> ParallaxConfig {
        ParallaxConfig::new(speed, max, resting)
    }

    #[test]
    fn offset_clamps_at_max() {
        // 1000px past resting at speed 0.5 would be 500 — clamped to 50.
        let c = config(0.5, 50.0, 0.0);
        let bounds = ElementBounds::new(900.0, 400.0);
        let offset = compute_offset(1000.0, &c, &bounds, 720.0);
        assert_eq!(offset, Some(50.0));
    }

    #[test]
    fn offset_clamps_symmetrically() {
        let c = config(0.5, 50.0, 2000.0);
        let bounds = ElementBounds::new(0.0, 400.0);
        let offset = compute_offset(0.0, &c, &bounds, 720.0);
        assert_eq!(offset, Some(-50.0));
    }

    #[test]
    fn offset_proportional_within_clamp() {
        let c = config(0.5, 50.0, 0.0);
        let bounds = ElementBounds::new(0.0, 400.0);
        let offset = compute_offset(60.0, &c, &bounds, 720.0);
        assert_eq!(offset, Some(30.0));
    }

    #[test]
    fn non_intersecting_element_keeps_last_offset() {
        let c = config(0.5, 50.0, 0.0);
        let far_below = ElementBounds::new(10_000.0, 100.0);
        assert_eq!(compute_offset(0.0, &c, &far_below, 720.0), None);
    }

    #[test]
    fn registry_emits_only_on_change() {
        let mut registry = ParallaxRegistry::new();
        registry.register(1, config(0.5, 50.0, 0.0));
        let bounds = |_| Some(ElementBounds::new(0.0, 400.0));

        let frame = ScrollFrame::new(60.0, 1280.0, 720.0);
        let first = registry.on_frame(&frame, bounds);
        assert_eq!(
            first,
            vec![UiCommand::SetTranslateY {
                target: Target::element(1),
                offset_px: 30.0,
            }]
        );

        // Same frame again: offset unchanged, nothing emitted.
        assert!(registry.on_frame(&frame, bounds).is_empty());
    }

    #[test]
    fn narrow_viewport_disables_parallax() {
        let mut registry = ParallaxRegistry::new();
        registry.register(1, config(0.5, 50.0, 0.0));
        let bounds = |_| Some(ElementBounds::new(0.0, 400.0));
        let narrow = ScrollFrame::new(60.0, 500.0, 720.0);
        assert!(registry.on_frame(&narrow, bounds).is_empty());
    }

    #[test]
    fn unregister_stops_recomputation() {
        let mut registry = ParallaxRegistry::new();
        registry.register(1, config(0.5, 50.0, 0.0));
        registry.unregister(1);
        registry.unregister(1);
        let frame = ScrollFrame::new(60.0, 1280.0, 720.0);
        assert!(registry
            .on_frame(&frame, |_| Some(ElementBounds::new(0.0, 400.0)))
            .is_empty());
    }
}
