use serde::{Deserialize, Serialize};

use crate::geometry::ElementId;
use crate::id::IdStr;

/// Addressee of a style mutation: an element itself, or one of its
/// immediate children by document-order index (staggered reveals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub element: ElementId,
    pub child: Option<u32>,
}

impl Target {
    pub fn element(element: ElementId) -> Self {
        Self {
            element,
            child: None,
        }
    }

    pub fn child(element: ElementId, index: u32) -> Self {
        Self {
            element,
            child: Some(index),
        }
    }
}

/// A single, stateless UI effect instruction.
///
/// The core emits a `Vec<UiCommand>` per event batch. Presenters apply
/// them sequentially — each command carries all the data it needs, and
/// applying the same command twice is harmless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UiCommand {
    /// Add a CSS class (`animate-<name>`) to the target.
    AddClass { target: Target, class: IdStr },

    /// Set the target's inline `animation-duration` / `animation-delay`.
    SetAnimationTiming {
        target: Target,
        duration_ms: f64,
        delay_ms: f64,
    },

    /// Set the target's vertical translation (`translateY(<offset>px)`).
    SetTranslateY { target: Target, offset_px: f64 },

    /// Release the host's native observation of an element. Emitted when
    /// a one-shot trigger fires; the element will never be reconsidered.
    Unobserve { element: ElementId },

    /// Delegate a smooth scroll to the section's anchor to the host's
    /// native scroll primitive.
    ScrollToSection { id: IdStr },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_constructors() {
        assert_eq!(Target::element(7).child, None);
        assert_eq!(Target::child(7, 2).child, Some(2));
    }

    #[test]
    fn serde_roundtrip() {
        let cmds = vec![
            UiCommand::AddClass {
                target: Target::child(3, 1),
                class: IdStr::from("animate-fade-in-up"),
            },
            UiCommand::Unobserve { element: 3 },
            UiCommand::ScrollToSection {
                id: IdStr::from("projects"),
            },
        ];
        let json = serde_json::to_string(&cmds).unwrap_or_default();
        let back: Vec<UiCommand> = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(back, cmds);
    }
}
