use std::collections::HashMap;

use folio_protocol::{IdStr, ScrollFrame, SectionBounds};

/// Host-supplied geometry access.
///
/// Abstracts the ambient scroll/layout state (window size, scroll
/// position, section offsets) so every tracking algorithm operates
/// purely over passed-in values and stays unit-testable without a
/// rendering environment. Each call returns a read-only snapshot;
/// the core never caches across invocations.
pub trait GeometryProvider {
    /// Current vertical bounds per section id. May be incomplete while
    /// layout is settling — the resolver tolerates missing entries.
    fn section_bounds(&self) -> HashMap<IdStr, SectionBounds>;

    /// Current vertical scroll offset from the document origin.
    fn scroll_y(&self) -> f64;

    /// Current viewport width.
    fn viewport_width(&self) -> f64;

    /// Current viewport height.
    fn viewport_height(&self) -> f64;

    /// Snapshot of the scroll state as a single frame.
    fn scroll_frame(&self) -> ScrollFrame {
        ScrollFrame::new(self.scroll_y(), self.viewport_width(), self.viewport_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedGeometry;

    impl GeometryProvider for FixedGeometry {
        fn section_bounds(&self) -> HashMap<IdStr, SectionBounds> {
            HashMap::new()
        }

        fn scroll_y(&self) -> f64 {
            120.0
        }

        fn viewport_width(&self) -> f64 {
            1280.0
        }

        fn viewport_height(&self) -> f64 {
            720.0
        }
    }

    #[test]
    fn frame_snapshot_mirrors_accessors() {
        let frame = FixedGeometry.scroll_frame();
        assert!((frame.scroll_y - 120.0).abs() < f64::EPSILON);
        assert!((frame.viewport_width - 1280.0).abs() < f64::EPSILON);
        assert!((frame.viewport_height - 720.0).abs() < f64::EPSILON);
    }
}
