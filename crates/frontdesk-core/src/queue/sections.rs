//! Derived section views and section-relative index translation.

use serde::Serialize;

use super::QueueStore;
use crate::models::{PatientRecord, Section};

/// Header data for one section list.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SectionSummary {
    pub section: Section,
    pub title: &'static str,
    pub count: usize,
}

/// Patients tagged with `section`, in flat-sequence order.
pub fn section_view(patients: &[PatientRecord], section: Section) -> Vec<&PatientRecord> {
    patients.iter().filter(|p| p.section() == section).collect()
}

/// Flat index of the `rel`-th patient in `section`.
pub fn flat_index(patients: &[PatientRecord], section: Section, rel: usize) -> Option<usize> {
    patients
        .iter()
        .enumerate()
        .filter(|(_, p)| p.section() == section)
        .nth(rel)
        .map(|(index, _)| index)
}

impl QueueStore {
    pub fn section_view(&self, section: Section) -> Vec<&PatientRecord> {
        section_view(self.patients(), section)
    }

    pub fn section_len(&self, section: Section) -> usize {
        self.patients().iter().filter(|p| p.section() == section).count()
    }

    pub fn flat_index(&self, section: Section, rel: usize) -> Option<usize> {
        flat_index(self.patients(), section, rel)
    }

    /// Reorder using indices relative to one section view.
    ///
    /// The moved patient lands at `to` within the section; patients of other
    /// sections keep their relative order.
    pub fn reorder_in_section(&mut self, section: Section, from: usize, to: usize) -> bool {
        match (self.flat_index(section, from), self.flat_index(section, to)) {
            (Some(flat_from), Some(flat_to)) => self.reorder(flat_from, flat_to),
            _ => {
                tracing::trace!(?section, from, to, "Ignoring out-of-range section reorder");
                false
            }
        }
    }

    /// Swap a patient with the one above it in its section.
    pub fn move_up(&mut self, section: Section, rel: usize) -> bool {
        if rel == 0 {
            return false;
        }
        self.reorder_in_section(section, rel, rel - 1)
    }

    /// Swap a patient with the one below it in its section.
    pub fn move_down(&mut self, section: Section, rel: usize) -> bool {
        self.reorder_in_section(section, rel, rel + 1)
    }

    /// Remove using an index relative to one section view.
    pub fn remove_in_section(&mut self, section: Section, rel: usize) -> Option<PatientRecord> {
        self.flat_index(section, rel)
            .and_then(|index| self.remove_at(index))
    }

    /// Title and count for every section, in workflow order.
    pub fn section_summary(&self) -> Vec<SectionSummary> {
        Section::ALL
            .iter()
            .map(|&section| SectionSummary {
                section,
                title: section.title(),
                count: self.section_len(section),
            })
            .collect()
    }
}
