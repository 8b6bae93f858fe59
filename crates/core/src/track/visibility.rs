use std::collections::HashMap;

use folio_protocol::{
    AnimationConfig, ElementBounds, ElementId, IdStr, ScrollFrame, Target, UiCommand,
};

/// Fraction of an element that must be visible before its reveal fires.
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

/// The effective viewport is shrunk by this much at the bottom, so
/// reveals start slightly before the element is fully scrolled in.
pub const EARLY_TRIGGER_MARGIN_PX: f64 = 50.0;

/// Fraction of `bounds` visible inside the viewport described by
/// `frame`, with the bottom edge pulled up by `bottom_margin`.
///
/// Degenerate (zero or negative height) elements count as fully visible
/// when their top edge is inside the effective viewport and invisible
/// otherwise, so they can still fire exactly once.
pub fn visible_fraction(bounds: &ElementBounds, frame: &ScrollFrame, bottom_margin: f64) -> f64 {
    let view_top = frame.scroll_y;
    let view_bottom = frame.scroll_y + frame.viewport_height - bottom_margin;
    if view_bottom <= view_top {
        return 0.0;
    }

    if bounds.height <= 0.0 {
        let inside = view_top <= bounds.top && bounds.top < view_bottom;
        return if inside { 1.0 } else { 0.0 };
    }

    let overlap_top = bounds.top.max(view_top);
    let overlap_bottom = bounds.bottom().min(view_bottom);
    ((overlap_bottom - overlap_top) / bounds.height).clamp(0.0, 1.0)
}

/// Per-element trigger lifecycle. `Fired` is terminal — there is no
/// transition back to `Watching`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TriggerState {
    Watching,
    Fired,
}

#[derive(Debug)]
struct TrackedElement {
    config: AnimationConfig,
    child_count: u32,
    state: TriggerState,
}

/// One-shot reveal engine.
///
/// Each registered element walks a monotonic state machine:
/// unobserved (absent) → watching → fired. The first qualifying
/// visibility event emits the element's animation assignment plus an
/// explicit [`UiCommand::Unobserve`]; everything after that — duplicate
/// events, reordered batches, re-deliveries — is a no-op. Which
/// mechanism produces the events (an intersection observer, polling
/// over geometry) is the host's business; both funnel into
/// [`deliver`](Self::deliver).
#[derive(Debug)]
pub struct VisibilityEngine {
    elements: HashMap<ElementId, TrackedElement>,
    threshold: f64,
    bottom_margin: f64,
}

impl Default for VisibilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityEngine {
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            threshold: VISIBILITY_THRESHOLD,
            bottom_margin: EARLY_TRIGGER_MARGIN_PX,
        }
    }

    /// Override threshold and bottom margin for hosts whose units are
    /// not CSS pixels.
    pub fn with_thresholds(threshold: f64, bottom_margin: f64) -> Self {
        Self {
            elements: HashMap::new(),
            threshold,
            bottom_margin,
        }
    }

    /// Start watching an element. `child_count` is the number of
    /// immediate child content nodes, used for staggered assignment.
    ///
    /// Registering an id that is already tracked keeps the existing
    /// entry — in particular, a fired element stays fired.
    pub fn register(&mut self, element: ElementId, config: AnimationConfig, child_count: u32) {
        self.elements.entry(element).or_insert(TrackedElement {
            config,
            child_count,
            state: TriggerState::Watching,
        });
    }

    /// Stop tracking an element and release its state. Idempotent:
    /// unknown ids (already unregistered, detached before firing) are
    /// fine.
    pub fn unregister(&mut self, element: ElementId) {
        self.elements.remove(&element);
    }

    /// Whether an element is registered and has not fired yet.
    pub fn is_watching(&self, element: ElementId) -> bool {
        self.elements
            .get(&element)
            .is_some_and(|e| e.state == TriggerState::Watching)
    }

    /// Whether an element has fired. Unregistered elements report false.
    pub fn has_fired(&self, element: ElementId) -> bool {
        self.elements
            .get(&element)
            .is_some_and(|e| e.state == TriggerState::Fired)
    }

    /// Deliver one visibility observation for an element.
    ///
    /// Qualifying means `visible_ratio >= threshold`. Returns the
    /// animation commands on the watching → fired transition and an
    /// empty vec in every other case.
    pub fn deliver(&mut self, element: ElementId, visible_ratio: f64) -> Vec<UiCommand> {
        let Some(tracked) = self.elements.get_mut(&element) else {
            return Vec::new();
        };
        if tracked.state == TriggerState::Fired || visible_ratio < self.threshold {
            return Vec::new();
        }
        tracked.state = TriggerState::Fired;

        let mut commands = Vec::new();
        let config = &tracked.config;
        let class = IdStr::from(config.class_name());
        if config.stagger {
            for index in 0..tracked.child_count {
                let target = Target::child(element, index);
                commands.push(UiCommand::AddClass {
                    target,
                    class: class.clone(),
                });
                commands.push(UiCommand::SetAnimationTiming {
                    target,
                    duration_ms: config.duration_ms,
                    delay_ms: f64::from(index) * config.stagger_delay_ms,
                });
            }
        } else {
            let target = Target::element(element);
            commands.push(UiCommand::AddClass { target, class });
            commands.push(UiCommand::SetAnimationTiming {
                target,
                duration_ms: config.duration_ms,
                delay_ms: config.delay_ms,
            });
        }
        commands.push(UiCommand::Unobserve { element });
        commands
    }

    /// Polling driver: compute visibility for every watching element
    /// from a scroll frame and the host's bounds lookup, and deliver.
    pub fn on_frame<F>(&mut self, frame: &ScrollFrame, bounds_of: F) -> Vec<UiCommand>
    where
        F: Fn(ElementId) -> Option<ElementBounds>,
    {
        let watching: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|(_, e)| e.state == TriggerState::Watching)
            .map(|(id, _)| *id)
            .collect();

        let mut commands = Vec::new();
        for element in watching {
            // A detached element (no bounds) is simply skipped; it fires
            // later if it re-attaches, or is released by unregister.
            let Some(bounds) = bounds_of(element) else {
                continue;
            };
            let ratio = visible_fraction(&bounds, frame, self.bottom_margin);
            commands.extend(self.deliver(element, ratio));
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_style_mutations(commands: &[UiCommand]) -> usize {
        commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    UiCommand::AddClass { .. } | UiCommand::SetAnimationTiming { .. }
                )
            })
            .count()
    }

    #[test]
    fn first_qualifying_event_fires_once() {
        let mut engine = VisibilityEngine::new();
        engine.register(1, AnimationConfig::default(), 0);

        let first = engine.deliver(1, 0.5);
        assert_eq!(count_style_mutations(&first), 2);
        assert!(first.contains(&UiCommand::Unobserve { element: 1 }));
        assert!(engine.has_fired(1));

        // Second qualifying event is a no-op.
        let second = engine.deliver(1, 0.9);
        assert!(second.is_empty());
    }

    #[test]
    fn below_threshold_does_not_fire() {
        let mut engine = VisibilityEngine::new();
        engine.register(1, AnimationConfig::default(), 0);
        assert!(engine.deliver(1, 0.05).is_empty());
        assert!(engine.is_watching(1));
    }

    #[test]
    fn stagger_assigns_sequential_delays() {
        let mut engine = VisibilityEngine::new();
        let config = AnimationConfig {
            stagger: true,
            stagger_delay_ms: 50.0,
            ..AnimationConfig::default()
        };
        engine.register(9, config, 3);

        let commands = engine.deliver(9, 1.0);
        let delays: Vec<f64> = commands
            .iter()
            .filter_map(|c| match c {
                UiCommand::SetAnimationTiming { delay_ms, .. } => Some(*delay_ms),
                _ => None,
            })
            .collect();
        assert_eq!(delays, vec![0.0, 50.0, 100.0]);

        // Children addressed in document order.
        let targets: Vec<Option<u32>> = commands
            .iter()
            .filter_map(|c| match c {
                UiCommand::AddClass { target, .. } => Some(target.child),
                _ => None,
            })
            .collect();
        assert_eq!(targets, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn stagger_with_no_children_emits_only_unobserve() {
        let mut engine = VisibilityEngine::new();
        let config = AnimationConfig {
            stagger: true,
            ..AnimationConfig::default()
        };
        engine.register(4, config, 0);
        let commands = engine.deliver(4, 1.0);
        assert_eq!(commands, vec![UiCommand::Unobserve { element: 4 }]);
        assert!(engine.has_fired(4));
    }

    #[test]
    fn unregister_is_idempotent_and_silences_delivery() {
        let mut engine = VisibilityEngine::new();
        engine.register(2, AnimationConfig::default(), 0);
        engine.unregister(2);
        engine.unregister(2);
        assert!(engine.deliver(2, 1.0).is_empty());
        assert!(!engine.is_watching(2));
        assert!(!engine.has_fired(2));
    }

    #[test]
    fn reregistering_fired_element_stays_fired() {
        let mut engine = VisibilityEngine::new();
        engine.register(3, AnimationConfig::default(), 0);
        assert!(!engine.deliver(3, 1.0).is_empty());
        engine.register(3, AnimationConfig::default(), 0);
        assert!(engine.has_fired(3));
        assert!(engine.deliver(3, 1.0).is_empty());
    }

    #[test]
    fn frame_driver_fires_visible_elements_only() {
        let mut engine = VisibilityEngine::with_thresholds(0.1, 50.0);
        engine.register(1, AnimationConfig::default(), 0);
        engine.register(2, AnimationConfig::default(), 0);

        let frame = ScrollFrame::new(0.0, 1280.0, 720.0);
        let bounds = |id: ElementId| match id {
            1 => Some(ElementBounds::new(100.0, 200.0)), // fully in view
            2 => Some(ElementBounds::new(5_000.0, 200.0)), // far below
            _ => None,
        };

        let commands = engine.on_frame(&frame, bounds);
        assert!(engine.has_fired(1));
        assert!(engine.is_watching(2));
        assert!(commands.contains(&UiCommand::Unobserve { element: 1 }));
        assert!(!commands.contains(&UiCommand::Unobserve { element: 2 }));
    }

    #[test]
    fn early_trigger_margin_shrinks_viewport() {
        // Element whose top 10% sits just above the margin line fires;
        // the same element against the unshrunk viewport bottom would
        // already have fired earlier in the scroll.
        let frame = ScrollFrame::new(0.0, 1280.0, 720.0);
        let barely_in = ElementBounds::new(600.0, 100.0);
        let frac_with_margin = visible_fraction(&barely_in, &frame, 50.0);
        let frac_without = visible_fraction(&barely_in, &frame, 0.0);
        assert!(frac_with_margin < frac_without);
        assert!((frac_with_margin - 0.7).abs() < 1e-9);
        assert!((frac_without - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_height_element_fires_when_inside() {
        let frame = ScrollFrame::new(0.0, 1280.0, 720.0);
        let marker = ElementBounds::new(300.0, 0.0);
        assert!((visible_fraction(&marker, &frame, 50.0) - 1.0).abs() < f64::EPSILON);
        let below = ElementBounds::new(5_000.0, 0.0);
        assert!(visible_fraction(&below, &frame, 50.0).abs() < f64::EPSILON);
    }
}
