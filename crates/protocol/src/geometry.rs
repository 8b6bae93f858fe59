use serde::{Deserialize, Serialize};

/// Opaque handle for a tracked content element.
///
/// Hosts map their native element references (DOM nodes, layout blocks)
/// to stable ids at registration time. The core never dereferences one.
pub type ElementId = u64;

/// One coalesced snapshot of the host's scroll state.
///
/// All lengths are in host units — CSS pixels in a browser, rows and
/// columns in a terminal. The core only ever compares lengths against
/// each other, so any consistent unit works; the built-in trigger
/// constants are calibrated for pixels and hosts with other units supply
/// their own (see the tracker and registry constructors).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollFrame {
    /// Vertical scroll offset from the document origin.
    pub scroll_y: f64,
    /// Viewport width.
    pub viewport_width: f64,
    /// Viewport height.
    pub viewport_height: f64,
}

impl ScrollFrame {
    pub fn new(scroll_y: f64, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            viewport_width,
            viewport_height,
        }
    }
}

/// Vertical bounds of a named section, offsets from the document origin.
///
/// `top < bottom` is expected; the resolver tolerates violations (they
/// simply never match) but never panics on them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub top: f64,
    pub bottom: f64,
}

impl SectionBounds {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Whether `point` falls inside the half-open interval `[top, bottom)`.
    pub fn contains(&self, point: f64) -> bool {
        self.top <= point && point < self.bottom
    }
}

/// Vertical extent of a tracked element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBounds {
    /// Offset of the element's top edge from the document origin.
    pub top: f64,
    /// Element height.
    pub height: f64,
}

impl ElementBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_contains_is_half_open() {
        let b = SectionBounds::new(100.0, 200.0);
        assert!(b.contains(100.0));
        assert!(b.contains(199.9));
        assert!(!b.contains(200.0));
        assert!(!b.contains(99.9));
    }

    #[test]
    fn inverted_bounds_never_contain() {
        let b = SectionBounds::new(200.0, 100.0);
        assert!(!b.contains(150.0));
    }

    #[test]
    fn element_bottom() {
        let e = ElementBounds::new(40.0, 10.0);
        assert!((e.bottom() - 50.0).abs() < f64::EPSILON);
    }
}
