//! Front-Desk Core Library
//!
//! Patient queue state for a clinic front-desk dashboard.
//!
//! # Architecture
//!
//! ```text
//!   Search box ──add_from_search──┐
//!   Card menu ──remove / move─────┤
//!   Drag gestures ──DragGesture───┤
//!                                 ▼
//!                   ┌──────────────────────────┐
//!                   │        QueueStore        │
//!                   │  one flat ordered list   │
//!                   │  section tag per patient │
//!                   └────────────┬─────────────┘
//!                                │ filter by section
//!               ┌────────────────┼────────────────┐
//!               ▼                ▼                ▼
//!          Checked In       With Doctor       Completed
//!
//!   Details drawer ── Selection (snapshot) ── resolve_current(queue)
//! ```
//!
//! # Core Principle
//!
//! **Sections are derived, never stored.** Every reorder operates on flat
//! indices; section-relative indices are translated at the edge.
//!
//! # Modules
//!
//! - [`models`]: Patient record, badges, sections
//! - [`queue`]: Queue store and section views
//! - [`selection`]: Details-drawer selection
//! - [`drag`]: Drag-and-drop reorder protocol
//! - [`search`]: Patient search for adding to the queue
//! - [`session`]: The [`FrontDesk`] state container
//! - [`config`]: Queue settings

pub mod config;
pub mod drag;
pub mod models;
pub mod queue;
pub mod search;
pub mod selection;
pub mod session;

// Re-export commonly used types
pub use config::{DuplicatePolicy, QueueConfig};
pub use drag::{DragGesture, DragSummary, HoverEvent, HoverOutcome, RowBounds};
pub use models::{PatientDetails, PatientRecord, Section, StatusBadge, StatusBadgeKind};
pub use queue::{QueueError, QueueSnapshot, QueueStore, SectionSummary};
pub use search::{MatchKind, PatientSearch, SearchHit};
pub use selection::Selection;
pub use session::FrontDesk;

// =========================================================================
// Error Type
// =========================================================================

#[derive(Debug, thiserror::Error)]
pub enum FrontDeskError {
    #[error("Patient already in queue: {0}")]
    DuplicateIdentity(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<QueueError> for FrontDeskError {
    fn from(e: QueueError) -> Self {
        match e {
            QueueError::DuplicateIdentity(id) => FrontDeskError::DuplicateIdentity(id),
            QueueError::UnknownPatient(id) => FrontDeskError::NotFound(id),
        }
    }
}

impl From<serde_json::Error> for FrontDeskError {
    fn from(e: serde_json::Error) -> Self {
        FrontDeskError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Factory Functions
// =========================================================================

/// Start a session from a JSON queue snapshot and optional JSON config.
pub fn open_session_json(
    snapshot_json: &str,
    config_json: Option<&str>,
) -> Result<FrontDesk, FrontDeskError> {
    let snapshot = QueueSnapshot::from_json(snapshot_json)?;
    let config = match config_json {
        Some(json) => QueueConfig::from_json(json)?,
        None => QueueConfig::default(),
    };
    Ok(FrontDesk::from_snapshot(snapshot, config))
}
