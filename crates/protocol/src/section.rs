use serde::{Deserialize, Serialize};

use crate::id::IdStr;

/// A named, vertically-bounded content region participating in
/// navigation highlighting.
///
/// The ordered sequence of sections is fixed for the lifetime of the
/// page; `order` is the section's position in document flow, ascending
/// and contiguous from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Unique, stable identifier (also the host anchor, e.g. `#about`).
    pub id: IdStr,
    /// Display label for navigation links.
    pub label: String,
    /// Position in document order.
    pub order: u32,
}

impl Section {
    pub fn new(id: impl Into<IdStr>, label: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let s = Section::new("about", "About", 1);
        let json = serde_json::to_string(&s).unwrap_or_default();
        let back: Section = serde_json::from_str(&json).unwrap_or_else(|_| Section::new("", "", 0));
        assert_eq!(back, s);
    }
}
