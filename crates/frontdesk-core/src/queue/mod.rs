//! Queue store: the single flat, ordered list of active patients.
//!
//! All mutations go through three primitives:
//!
//! - [`QueueStore::add_to_front`]: insert at position 0, resetting the section to checked-in
//! - [`QueueStore::reorder`]: move one element between two flat indices
//! - [`QueueStore::remove_at`]: delete one element
//!
//! Out-of-range indices are ignored rather than reported; drag gestures can
//! report stale offsets mid-animation. Section views are computed on demand
//! (see [`sections`]) and never stored.

pub mod sections;

pub use sections::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::models::{PatientRecord, Section};

/// Queue errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Patient already in queue: {0}")]
    DuplicateIdentity(String),

    #[error("Patient not in queue: {0}")]
    UnknownPatient(String),
}

pub type QueueResult<T> = Result<T, QueueError>;

/// Ordered patient collection, unique by `id` as long as callers check
/// [`QueueStore::contains`] before inserting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueStore {
    patients: Vec<PatientRecord>,
}

/// Serializable copy of the queue order, used to seed or export a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueueSnapshot {
    pub patients: Vec<PatientRecord>,
}

impl QueueSnapshot {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl QueueStore {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pre-seeded queue, keeping the first occurrence of any repeated id.
    pub fn from_patients(patients: Vec<PatientRecord>) -> Self {
        let mut store = Self::new();
        for patient in patients {
            if store.contains(&patient.id) {
                trace!(id = %patient.id, "Dropping repeated id while seeding queue");
                continue;
            }
            store.patients.push(patient);
        }
        store
    }

    pub fn from_snapshot(snapshot: QueueSnapshot) -> Self {
        Self::from_patients(snapshot.patients)
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            patients: self.patients.clone(),
        }
    }

    /// The flat sequence in display order.
    pub fn patients(&self) -> &[PatientRecord] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PatientRecord> {
        self.patients.get(index)
    }

    /// Flat index of the patient with this id.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.patients.iter().position(|p| p.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&PatientRecord> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position_of(id).is_some()
    }

    /// Insert at the front with the section forced to checked-in.
    ///
    /// Does not check for an existing id; use [`QueueStore::try_add_to_front`]
    /// or [`QueueStore::move_to_front`] when the caller has not already done so.
    pub fn add_to_front(&mut self, mut patient: PatientRecord) {
        patient.details.section = Section::CheckedIn;
        patient.details.checked_in_at = Some(chrono::Utc::now().to_rfc3339());
        debug!(id = %patient.id, "Added patient to front of queue");
        self.patients.insert(0, patient);
    }

    /// Insert at the front, rejecting an id that is already queued.
    pub fn try_add_to_front(&mut self, patient: PatientRecord) -> QueueResult<()> {
        if self.contains(&patient.id) {
            return Err(QueueError::DuplicateIdentity(patient.id));
        }
        self.add_to_front(patient);
        Ok(())
    }

    /// Insert at the front, dropping any existing entry with the same id first.
    ///
    /// Returns the replaced entry, if there was one.
    pub fn move_to_front(&mut self, patient: PatientRecord) -> Option<PatientRecord> {
        let replaced = self
            .position_of(&patient.id)
            .and_then(|index| self.remove_at(index));
        self.add_to_front(patient);
        replaced
    }

    /// Move the element at `from` so it ends up at `to`.
    ///
    /// Returns false (and leaves the queue untouched) if either index is out of range.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.patients.len();
        if from >= len || to >= len {
            trace!(from, to, len, "Ignoring out-of-range reorder");
            return false;
        }
        if from == to {
            return true;
        }
        let patient = self.patients.remove(from);
        debug!(id = %patient.id, from, to, "Reordered patient");
        self.patients.insert(to, patient);
        true
    }

    /// Remove the element at `index`, or do nothing if it is out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<PatientRecord> {
        if index >= self.patients.len() {
            trace!(index, len = self.patients.len(), "Ignoring out-of-range remove");
            return None;
        }
        let patient = self.patients.remove(index);
        debug!(id = %patient.id, index, "Removed patient from queue");
        Some(patient)
    }

    /// Retag a patient with a new section. Position is unchanged.
    pub fn set_section(&mut self, id: &str, section: Section) -> QueueResult<()> {
        let patient = self
            .patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| QueueError::UnknownPatient(id.to_string()))?;
        debug!(id, from = ?patient.details.section, to = ?section, "Changed patient section");
        patient.details.section = section;
        Ok(())
    }

    /// Move a patient one workflow stage forward.
    ///
    /// Returns the new section, or `None` if the patient was already completed.
    pub fn advance(&mut self, id: &str) -> QueueResult<Option<Section>> {
        let current = self
            .find(id)
            .map(PatientRecord::section)
            .ok_or_else(|| QueueError::UnknownPatient(id.to_string()))?;
        match current.next() {
            Some(next) => {
                self.set_section(id, next)?;
                Ok(Some(next))
            }
            None => Ok(None),
        }
    }

    /// Drop every patient.
    pub fn clear(&mut self) {
        self.patients.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_queue() -> QueueStore {
        QueueStore::from_patients(vec![
            PatientRecord::with_id("1", "Thomas Newman"),
            PatientRecord::with_id("2", "Sarah Johnson"),
            PatientRecord::with_id("3", "Michael Chang").in_section(Section::WithDoctor),
        ])
    }

    fn ids(store: &QueueStore) -> Vec<&str> {
        store.patients().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_reorder_flat() {
        let mut store = make_queue();
        assert!(store.reorder(0, 1));
        assert_eq!(ids(&store), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let mut store = make_queue();
        assert!(!store.reorder(0, 3));
        assert!(!store.reorder(7, 0));
        assert_eq!(ids(&store), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut store = make_queue();
        assert!(store.remove_at(10).is_none());
        assert_eq!(ids(&store), vec!["1", "2", "3"]);

        let removed = store.remove_at(1).unwrap();
        assert_eq!(removed.id, "2");
        assert_eq!(ids(&store), vec!["1", "3"]);
    }

    #[test]
    fn test_add_to_front_resets_section() {
        let mut store = make_queue();
        let returning = PatientRecord::with_id("9", "Lisa Thompson").in_section(Section::Completed);
        store.add_to_front(returning);

        let front = store.get(0).unwrap();
        assert_eq!(front.id, "9");
        assert_eq!(front.section(), Section::CheckedIn);
        assert!(front.details.checked_in_at.is_some());
    }

    #[test]
    fn test_try_add_rejects_duplicate() {
        let mut store = make_queue();
        let err = store
            .try_add_to_front(PatientRecord::with_id("2", "Sarah Johnson"))
            .unwrap_err();
        assert_eq!(err, QueueError::DuplicateIdentity("2".into()));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_move_to_front_dedupes() {
        let mut store = make_queue();
        let replaced = store.move_to_front(PatientRecord::with_id("3", "Michael Chang"));
        assert_eq!(replaced.map(|p| p.id), Some("3".to_string()));
        assert_eq!(ids(&store), vec!["3", "1", "2"]);
        assert_eq!(store.get(0).unwrap().section(), Section::CheckedIn);
    }

    #[test]
    fn test_seed_drops_repeated_ids() {
        let store = QueueStore::from_patients(vec![
            PatientRecord::with_id("1", "A"),
            PatientRecord::with_id("1", "B"),
        ]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().name, "A");
    }

    #[test]
    fn test_advance_through_workflow() {
        let mut store = make_queue();
        assert_eq!(store.advance("1").unwrap(), Some(Section::WithDoctor));
        assert_eq!(store.advance("1").unwrap(), Some(Section::Completed));
        assert_eq!(store.advance("1").unwrap(), None);
        assert_eq!(store.find("1").unwrap().section(), Section::Completed);
        // Position never moves on a section change
        assert_eq!(store.position_of("1"), Some(0));
    }

    #[test]
    fn test_unknown_patient() {
        let mut store = make_queue();
        assert_eq!(
            store.advance("nope").unwrap_err(),
            QueueError::UnknownPatient("nope".into())
        );
        assert!(store.set_section("nope", Section::Completed).is_err());
    }

    #[test]
    fn test_snapshot_json() {
        let store = make_queue();
        let json = store.snapshot().to_json().unwrap();
        let restored = QueueStore::from_snapshot(QueueSnapshot::from_json(&json).unwrap());
        assert_eq!(restored, store);
    }
}
