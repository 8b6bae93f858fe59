use std::collections::{HashMap, HashSet};

use folio_protocol::{IdStr, ScrollFrame, Section, SectionBounds, UiCommand};

use crate::track::TrackError;

/// Height of the fixed navigation header.
pub const NAV_HEIGHT_PX: f64 = 80.0;

/// Extra lead below the header so a section activates slightly before
/// its visual top reaches the navigation bar.
pub const TRIGGER_LEAD_PX: f64 = 50.0;

/// Resolve the active section for a scroll offset.
///
/// The trigger point is the scroll offset pushed down past the fixed
/// header plus a small lead. The first section in document order whose
/// bounds contain the trigger point (`top <= trigger < bottom`) wins;
/// bounds are non-overlapping by invariant, so at most one matches, and
/// first-match-in-order keeps the result deterministic when layout
/// thrash temporarily violates that. Falls back to the first section's
/// id when nothing matches or bounds are missing.
///
/// Returns `None` only for an empty section list.
pub fn resolve_active_section(
    scroll_y: f64,
    nav_height: f64,
    trigger_lead: f64,
    bounds: &HashMap<IdStr, SectionBounds>,
    sections: &[Section],
) -> Option<IdStr> {
    let first = sections.first()?;
    let trigger = scroll_y + nav_height + trigger_lead;

    for section in sections {
        if let Some(b) = bounds.get(&section.id)
            && b.contains(trigger)
        {
            return Some(section.id.clone());
        }
    }

    Some(first.id.clone())
}

type ChangeListener = Box<dyn FnMut(&IdStr)>;

/// Stateful wrapper around [`resolve_active_section`].
///
/// Owns the active-section cell — single writer, any number of readers.
/// Subscribers get the current value immediately and one notification
/// per actual change afterwards; re-resolving to the held id emits
/// nothing.
pub struct SectionTracker {
    sections: Vec<Section>,
    active: IdStr,
    nav_height: f64,
    trigger_lead: f64,
    listeners: Vec<ChangeListener>,
}

impl std::fmt::Debug for SectionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionTracker")
            .field("sections", &self.sections)
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SectionTracker {
    /// Build a tracker over a fixed section list.
    ///
    /// Sections are reordered by their `order` field; the first becomes
    /// the initial active section. Fails on an empty list or duplicate
    /// ids — the only error paths in the tracker.
    pub fn new(mut sections: Vec<Section>) -> Result<Self, TrackError> {
        if sections.is_empty() {
            return Err(TrackError::NoSections);
        }
        let mut seen = HashSet::new();
        for section in &sections {
            if !seen.insert(section.id.clone()) {
                return Err(TrackError::DuplicateSection(section.id.clone()));
            }
        }
        sections.sort_by_key(|s| s.order);
        let active = sections[0].id.clone();
        Ok(Self {
            sections,
            active,
            nav_height: NAV_HEIGHT_PX,
            trigger_lead: TRIGGER_LEAD_PX,
            listeners: Vec::new(),
        })
    }

    /// Override the trigger constants for hosts whose units are not CSS
    /// pixels (e.g. terminal rows).
    pub fn with_viewport_chrome(mut self, nav_height: f64, trigger_lead: f64) -> Self {
        self.nav_height = nav_height;
        self.trigger_lead = trigger_lead;
        self
    }

    /// The fixed section list, in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Synchronous read of the active-section cell.
    pub fn current_active_section(&self) -> &IdStr {
        &self.active
    }

    /// Subscribe to active-section changes, latest-value-on-subscribe:
    /// the listener is called with the current id before this returns.
    pub fn subscribe(&mut self, mut listener: impl FnMut(&IdStr) + 'static) {
        listener(&self.active);
        self.listeners.push(Box::new(listener));
    }

    /// Feed one coalesced scroll frame plus a bounds snapshot.
    pub fn on_scroll(&mut self, frame: &ScrollFrame, bounds: &HashMap<IdStr, SectionBounds>) {
        if let Some(id) = resolve_active_section(
            frame.scroll_y,
            self.nav_height,
            self.trigger_lead,
            bounds,
            &self.sections,
        ) {
            self.set_active(id);
        }
    }

    /// Handle a navigation click: optimistically mark `id` active before
    /// any scrolling happens, and hand the actual smooth scroll to the
    /// host. Unknown ids are ignored.
    pub fn request_scroll_to(&mut self, id: &str) -> Option<UiCommand> {
        let known = self.sections.iter().find(|s| s.id == *id)?;
        let id = known.id.clone();
        self.set_active(id.clone());
        Some(UiCommand::ScrollToSection { id })
    }

    fn set_active(&mut self, id: IdStr) {
        if id == self.active {
            return;
        }
        self.active = id;
        for listener in &mut self.listeners {
            listener(&self.active);
        }
    }
}
