pub mod coalesce;
pub mod parallax;
pub mod section;
pub mod visibility;

use folio_protocol::IdStr;
use thiserror::Error;

/// Configuration-time failures. Tracking itself is total — once a
/// tracker or engine is constructed, no event path returns an error.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("no sections configured")]
    NoSections,
    #[error("duplicate section id: {0}")]
    DuplicateSection(IdStr),
}

pub use coalesce::ScrollCoalescer;
pub use parallax::ParallaxRegistry;
pub use section::SectionTracker;
pub use visibility::VisibilityEngine;
