//! Single-slot "currently viewed patient" for the details drawer.
//!
//! The open flag and the selected patient live in one enum, so a closed
//! drawer can never hold a stale patient and an open drawer always has one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::PatientRecord;

/// Drawer state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", content = "patient", rename_all = "camelCase")]
pub enum Selection {
    #[default]
    Closed,
    /// Snapshot of the patient taken when the drawer was opened
    Open(PatientRecord),
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the drawer on `patient`, replacing any current selection.
    pub fn open(&mut self, patient: PatientRecord) {
        debug!(id = %patient.id, "Opened patient details");
        *self = Selection::Open(patient);
    }

    /// Close the drawer and drop the snapshot in one transition.
    pub fn close(&mut self) {
        if let Selection::Open(patient) = std::mem::take(self) {
            debug!(id = %patient.id, "Closed patient details");
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Selection::Open(_))
    }

    /// The snapshot taken at open time.
    pub fn selected_patient(&self) -> Option<&PatientRecord> {
        match self {
            Selection::Open(patient) => Some(patient),
            Selection::Closed => None,
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_patient().map(|p| p.id.as_str())
    }

    /// Prefer the live queue entry with the selected id, else the snapshot.
    pub fn resolve_current<'a>(&'a self, patients: &'a [PatientRecord]) -> Option<&'a PatientRecord> {
        let snapshot = self.selected_patient()?;
        patients
            .iter()
            .find(|p| p.id == snapshot.id)
            .or(Some(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Section;

    #[test]
    fn test_open_and_close() {
        let mut selection = Selection::new();
        assert!(!selection.is_open());
        assert!(selection.selected_patient().is_none());

        selection.open(PatientRecord::with_id("1", "Thomas Newman"));
        assert!(selection.is_open());
        assert_eq!(selection.selected_id(), Some("1"));

        selection.close();
        assert!(!selection.is_open());
        assert!(selection.selected_patient().is_none());
    }

    #[test]
    fn test_reopen_replaces() {
        let mut selection = Selection::new();
        selection.open(PatientRecord::with_id("1", "Thomas Newman"));
        selection.open(PatientRecord::with_id("2", "Sarah Johnson"));
        assert!(selection.is_open());
        assert_eq!(selection.selected_id(), Some("2"));
    }

    #[test]
    fn test_close_when_closed() {
        let mut selection = Selection::new();
        selection.close();
        assert_eq!(selection, Selection::Closed);
    }

    #[test]
    fn test_resolve_prefers_live_record() {
        let mut selection = Selection::new();
        selection.open(PatientRecord::with_id("2", "Sarah Johnson"));

        let live = vec![
            PatientRecord::with_id("1", "Thomas Newman"),
            PatientRecord::with_id("2", "Sarah Johnson").in_section(Section::WithDoctor),
        ];
        let current = selection.resolve_current(&live).unwrap();
        assert_eq!(current.section(), Section::WithDoctor);
    }

    #[test]
    fn test_resolve_falls_back_to_snapshot() {
        let mut selection = Selection::new();
        selection.open(PatientRecord::with_id("2", "Sarah Johnson"));

        let current = selection.resolve_current(&[]).unwrap();
        assert_eq!(current.name, "Sarah Johnson");
        assert_eq!(current.section(), Section::CheckedIn);
    }

    #[test]
    fn test_resolve_when_closed() {
        let selection = Selection::new();
        let live = vec![PatientRecord::with_id("1", "Thomas Newman")];
        assert!(selection.resolve_current(&live).is_none());
    }
}
