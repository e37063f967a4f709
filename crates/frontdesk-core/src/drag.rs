//! Drag-and-drop reordering of a section list.
//!
//! Each row is both a drag source and a drop target. While a row is dragged,
//! every hover event over another row of the same section is checked against
//! the hovered row's vertical midpoint:
//!
//! - dragging downward commits only once the pointer is below the midpoint
//! - dragging upward commits only once the pointer is above the midpoint
//!
//! A commit is one section-relative reorder on the store, after which the
//! gesture tracks the new position. Releasing the pointer never touches the
//! store, so an abandoned drag with no crossings leaves the queue unchanged.

use tracing::{debug, trace};

use crate::config::QueueConfig;
use crate::models::Section;
use crate::queue::QueueStore;

/// Vertical extent of a rendered row in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBounds {
    pub top: f64,
    pub bottom: f64,
}

impl RowBounds {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Distance from the top of the row to its midpoint.
    pub fn middle_offset(&self) -> f64 {
        (self.bottom - self.top) / 2.0
    }
}

/// One pointer-move report over a drop target.
///
/// Fields are optional because the renderer may report a hover before the
/// row has been measured or while the pointer is off-screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverEvent {
    pub section: Section,
    pub hover_index: Option<usize>,
    pub bounds: Option<RowBounds>,
    pub pointer_y: Option<f64>,
}

impl HoverEvent {
    pub fn new(section: Section, hover_index: usize, bounds: RowBounds, pointer_y: f64) -> Self {
        Self {
            section,
            hover_index: Some(hover_index),
            bounds: Some(bounds),
            pointer_y: Some(pointer_y),
        }
    }
}

/// What a hover event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverOutcome {
    /// Malformed event, foreign section, stale index, or dragged patient gone
    Ignored,
    /// Pointer is over the dragged row itself
    SameRow,
    /// Pointer has not crossed the hovered row's midpoint yet
    Held,
    /// One reorder was applied (section-relative indices)
    Committed { from: usize, to: usize },
}

/// Result of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSummary {
    pub section: Section,
    pub origin_index: usize,
    pub final_index: usize,
    pub commits: usize,
}

/// An in-progress drag of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    section: Section,
    patient_id: String,
    origin_index: usize,
    index: usize,
    commits: usize,
}

impl DragGesture {
    /// Start dragging the `index`-th row of `section`.
    ///
    /// Returns `None` if the section is not draggable or the row does not exist.
    pub fn begin(store: &QueueStore, config: &QueueConfig, section: Section, index: usize) -> Option<Self> {
        if !config.is_draggable(section) {
            trace!(?section, "Drag refused for read-only section");
            return None;
        }
        let Some(patient) = store.section_view(section).get(index).copied() else {
            trace!(?section, index, "Drag refused for missing row");
            return None;
        };
        debug!(?section, index, id = %patient.id, "Drag started");
        Some(Self {
            section,
            patient_id: patient.id.clone(),
            origin_index: index,
            index,
            commits: 0,
        })
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Id of the patient being dragged.
    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    /// Current section-relative position of the dragged row.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Handle one hover report, committing at most one reorder.
    pub fn hover(&mut self, store: &mut QueueStore, event: &HoverEvent) -> HoverOutcome {
        if event.section != self.section {
            return HoverOutcome::Ignored;
        }
        let (Some(hover_index), Some(bounds), Some(pointer_y)) =
            (event.hover_index, event.bounds, event.pointer_y)
        else {
            trace!("Ignoring malformed hover event");
            return HoverOutcome::Ignored;
        };
        if !pointer_y.is_finite() || !bounds.top.is_finite() || !bounds.bottom.is_finite() {
            trace!("Ignoring hover event with non-finite coordinates");
            return HoverOutcome::Ignored;
        }

        // The queue may have changed under the gesture; follow the dragged patient
        let Some(drag_index) = store
            .section_view(self.section)
            .iter()
            .position(|p| p.id == self.patient_id)
        else {
            trace!(id = %self.patient_id, "Dragged patient left the section");
            return HoverOutcome::Ignored;
        };
        self.index = drag_index;
        if drag_index == hover_index {
            return HoverOutcome::SameRow;
        }

        let hover_middle = bounds.middle_offset();
        let hover_client_y = pointer_y - bounds.top;
        if drag_index < hover_index && hover_client_y < hover_middle {
            return HoverOutcome::Held;
        }
        if drag_index > hover_index && hover_client_y > hover_middle {
            return HoverOutcome::Held;
        }

        if !store.reorder_in_section(self.section, drag_index, hover_index) {
            return HoverOutcome::Ignored;
        }
        self.index = hover_index;
        self.commits += 1;
        HoverOutcome::Committed {
            from: drag_index,
            to: hover_index,
        }
    }

    /// End the gesture. The store is not touched.
    pub fn finish(self) -> DragSummary {
        debug!(
            section = ?self.section,
            from = self.origin_index,
            to = self.index,
            commits = self.commits,
            "Drag finished"
        );
        DragSummary {
            section: self.section,
            origin_index: self.origin_index,
            final_index: self.index,
            commits: self.commits,
        }
    }
}
