//! The front-desk state container.
//!
//! [`FrontDesk`] owns the queue, the details-drawer selection and any
//! in-progress drag. Presentation code reads through the accessors and
//! mutates only through the command methods.

use tracing::{debug, info};

use crate::config::{DuplicatePolicy, QueueConfig};
use crate::drag::{DragGesture, DragSummary, HoverEvent, HoverOutcome};
use crate::models::{BadgeDisplay, PatientRecord, Section};
use crate::queue::{QueueSnapshot, QueueStore, SectionSummary};
use crate::search::{PatientSearch, SearchHit};
use crate::selection::Selection;
use crate::FrontDeskError;

/// One user session at the front desk.
#[derive(Debug, Clone, Default)]
pub struct FrontDesk {
    config: QueueConfig,
    queue: QueueStore,
    selection: Selection,
    drag: Option<DragGesture>,
}

impl FrontDesk {
    /// Start a session with an empty queue.
    pub fn new(config: QueueConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Start a session pre-seeded from a snapshot.
    pub fn from_snapshot(snapshot: QueueSnapshot, config: QueueConfig) -> Self {
        let queue = QueueStore::from_snapshot(snapshot);
        info!(patients = queue.len(), "Seeded front-desk queue");
        Self {
            config,
            queue,
            ..Default::default()
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn queue(&self) -> &QueueStore {
        &self.queue
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn section_view(&self, section: Section) -> Vec<&PatientRecord> {
        self.queue.section_view(section)
    }

    pub fn section_summary(&self) -> Vec<SectionSummary> {
        self.queue.section_summary()
    }

    /// Badges for a queue card, truncated to the configured limit.
    pub fn badges<'a>(&self, patient: &'a PatientRecord) -> BadgeDisplay<'a> {
        patient.badge_display(self.config.badge_display_limit)
    }

    /// The patient the details drawer should render, live if still queued.
    pub fn current_selection(&self) -> Option<&PatientRecord> {
        self.selection.resolve_current(self.queue.patients())
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        self.queue.snapshot()
    }

    // =========================================================================
    // Queue commands
    // =========================================================================

    /// Search `roster` with the configured result limit.
    pub fn search<'r>(&self, roster: &'r PatientSearch, query: &str) -> Vec<SearchHit<'r>> {
        roster.search(query, self.config.search_result_limit)
    }

    /// Queue a patient picked from search, applying the duplicate policy.
    pub fn add_from_search(&mut self, patient: PatientRecord) -> Result<(), FrontDeskError> {
        match self.config.duplicate_policy {
            DuplicatePolicy::Reject => self.queue.try_add_to_front(patient)?,
            DuplicatePolicy::MoveToFront => {
                if let Some(replaced) = self.queue.move_to_front(patient) {
                    debug!(id = %replaced.id, "Re-queued patient already present");
                }
            }
        }
        Ok(())
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        self.queue.reorder(from, to)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<PatientRecord> {
        self.queue.remove_at(index)
    }

    pub fn remove_in_section(&mut self, section: Section, rel: usize) -> Option<PatientRecord> {
        self.queue.remove_in_section(section, rel)
    }

    pub fn move_up(&mut self, section: Section, rel: usize) -> bool {
        self.queue.move_up(section, rel)
    }

    pub fn move_down(&mut self, section: Section, rel: usize) -> bool {
        self.queue.move_down(section, rel)
    }

    /// Move a patient to the next workflow stage.
    pub fn advance(&mut self, id: &str) -> Result<Option<Section>, FrontDeskError> {
        Ok(self.queue.advance(id)?)
    }

    // =========================================================================
    // Details drawer
    // =========================================================================

    pub fn open(&mut self, patient: PatientRecord) {
        self.selection.open(patient);
    }

    /// Open the drawer on the `rel`-th patient of `section`.
    pub fn view_details(&mut self, section: Section, rel: usize) -> bool {
        let Some(patient) = self.queue.section_view(section).get(rel).map(|p| (*p).clone()) else {
            return false;
        };
        self.selection.open(patient);
        true
    }

    pub fn close(&mut self) {
        self.selection.close();
    }

    /// Mark a patient completed and close the drawer.
    pub fn checkout(&mut self, id: &str) -> Result<(), FrontDeskError> {
        self.queue.set_section(id, Section::Completed)?;
        self.selection.close();
        info!(id, "Checked out patient");
        Ok(())
    }

    // =========================================================================
    // Drag and drop
    // =========================================================================

    /// Start dragging a row. Replaces any gesture still in progress.
    pub fn begin_drag(&mut self, section: Section, index: usize) -> bool {
        self.drag = DragGesture::begin(&self.queue, &self.config, section, index);
        self.drag.is_some()
    }

    pub fn drag_hover(&mut self, event: &HoverEvent) -> HoverOutcome {
        match self.drag.as_mut() {
            Some(drag) => drag.hover(&mut self.queue, event),
            None => HoverOutcome::Ignored,
        }
    }

    /// Release the pointer, wherever it is.
    pub fn end_drag(&mut self) -> Option<DragSummary> {
        self.drag.take().map(DragGesture::finish)
    }

    /// Clear all session state.
    pub fn end_session(&mut self) {
        info!(patients = self.queue.len(), "Ending front-desk session");
        self.drag = None;
        self.selection.close();
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::RowBounds;

    fn seeded(config: QueueConfig) -> FrontDesk {
        let snapshot = QueueSnapshot {
            patients: vec![
                PatientRecord::with_id("1", "Thomas Newman"),
                PatientRecord::with_id("2", "Sarah Johnson"),
                PatientRecord::with_id("3", "Michael Chang").in_section(Section::WithDoctor),
            ],
        };
        FrontDesk::from_snapshot(snapshot, config)
    }

    fn ids(desk: &FrontDesk) -> Vec<&str> {
        desk.queue().patients().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_add_from_search_moves_duplicate_to_front() {
        let mut desk = seeded(QueueConfig::default());
        desk.add_from_search(PatientRecord::with_id("3", "Michael Chang")).unwrap();
        assert_eq!(ids(&desk), vec!["3", "1", "2"]);
        assert_eq!(desk.section_view(Section::WithDoctor).len(), 0);
    }

    #[test]
    fn test_add_from_search_rejects_duplicate() {
        let config = QueueConfig {
            duplicate_policy: DuplicatePolicy::Reject,
            ..Default::default()
        };
        let mut desk = seeded(config);
        let err = desk
            .add_from_search(PatientRecord::with_id("2", "Sarah Johnson"))
            .unwrap_err();
        assert!(matches!(err, FrontDeskError::DuplicateIdentity(id) if id == "2"));
        assert_eq!(ids(&desk), vec!["1", "2", "3"]);

        desk.add_from_search(PatientRecord::with_id("4", "Lisa Thompson")).unwrap();
        assert_eq!(ids(&desk), vec!["4", "1", "2", "3"]);
    }

    #[test]
    fn test_view_details_tracks_live_record() {
        let mut desk = seeded(QueueConfig::default());
        assert!(desk.view_details(Section::CheckedIn, 1));
        assert_eq!(desk.current_selection().unwrap().id, "2");

        desk.advance("2").unwrap();
        assert_eq!(desk.current_selection().unwrap().section(), Section::WithDoctor);

        // Still open after the row moves or leaves the queue
        desk.reorder(0, 2);
        assert_eq!(desk.current_selection().unwrap().id, "2");
        let index = desk.queue().position_of("2").unwrap();
        desk.remove_at(index);
        let current = desk.current_selection().unwrap();
        assert_eq!(current.id, "2");
        assert_eq!(current.section(), Section::CheckedIn); // snapshot from open time
    }

    #[test]
    fn test_view_details_out_of_range() {
        let mut desk = seeded(QueueConfig::default());
        assert!(!desk.view_details(Section::Completed, 0));
        assert!(!desk.selection().is_open());
    }

    #[test]
    fn test_checkout_completes_and_closes() {
        let mut desk = seeded(QueueConfig::default());
        desk.view_details(Section::WithDoctor, 0);
        desk.checkout("3").unwrap();
        assert!(!desk.selection().is_open());
        assert!(desk.current_selection().is_none());
        assert_eq!(desk.section_view(Section::Completed)[0].id, "3");
    }

    #[test]
    fn test_checkout_unknown() {
        let mut desk = seeded(QueueConfig::default());
        assert!(matches!(desk.checkout("99"), Err(FrontDeskError::NotFound(_))));
    }

    #[test]
    fn test_drag_through_session() {
        let mut desk = seeded(QueueConfig::default());
        assert!(!desk.begin_drag(Section::WithDoctor, 0));
        assert_eq!(
            desk.drag_hover(&HoverEvent::new(Section::CheckedIn, 1, RowBounds::new(72.0, 144.0), 140.0)),
            HoverOutcome::Ignored
        );

        assert!(desk.begin_drag(Section::CheckedIn, 0));
        let outcome =
            desk.drag_hover(&HoverEvent::new(Section::CheckedIn, 1, RowBounds::new(72.0, 144.0), 140.0));
        assert_eq!(outcome, HoverOutcome::Committed { from: 0, to: 1 });
        let summary = desk.end_drag().unwrap();
        assert_eq!(summary.commits, 1);
        assert!(!desk.is_dragging());
        assert_eq!(ids(&desk), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_drag_survives_queue_commands() {
        let mut desk = seeded(QueueConfig::default());
        assert!(desk.begin_drag(Section::CheckedIn, 0));

        // A new arrival lands on row 0 while Thomas is still being dragged
        desk.add_from_search(PatientRecord::with_id("4", "Lisa Thompson")).unwrap();
        let outcome =
            desk.drag_hover(&HoverEvent::new(Section::CheckedIn, 2, RowBounds::new(144.0, 216.0), 210.0));
        assert_eq!(outcome, HoverOutcome::Committed { from: 1, to: 2 });
        assert_eq!(ids(&desk), vec!["4", "2", "1", "3"]);

        // Once the dragged patient leaves the section, hovers do nothing
        desk.checkout("1").unwrap();
        let outcome =
            desk.drag_hover(&HoverEvent::new(Section::CheckedIn, 0, RowBounds::new(0.0, 72.0), 10.0));
        assert_eq!(outcome, HoverOutcome::Ignored);
        assert_eq!(ids(&desk), vec!["4", "2", "1", "3"]);
    }

    #[test]
    fn test_badges_use_config_limit() {
        let desk = FrontDesk::new(QueueConfig {
            badge_display_limit: 1,
            ..Default::default()
        });
        let patient = PatientRecord::with_id("1", "Thomas Newman")
            .with_badge(crate::models::StatusBadgeKind::New, "New")
            .with_badge(crate::models::StatusBadgeKind::Forms, "Forms");
        let display = desk.badges(&patient);
        assert_eq!(display.shown.len(), 1);
        assert_eq!(display.overflow, 1);
    }

    #[test]
    fn test_end_session_clears_everything() {
        let mut desk = seeded(QueueConfig::default());
        desk.view_details(Section::CheckedIn, 0);
        desk.begin_drag(Section::CheckedIn, 0);
        desk.end_session();
        assert!(desk.queue().is_empty());
        assert!(!desk.selection().is_open());
        assert!(!desk.is_dragging());
    }
}
