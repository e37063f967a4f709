//! Workflow sections of the patient queue.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Workflow stage a patient is tagged with.
///
/// Sections are a membership tag on each record, not separate collections.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    /// Arrived and waiting
    #[default]
    CheckedIn,
    /// Currently with a doctor
    WithDoctor,
    /// Visit finished
    Completed,
}

impl Section {
    /// All sections in workflow order.
    pub const ALL: [Section; 3] = [Section::CheckedIn, Section::WithDoctor, Section::Completed];

    /// The next workflow stage, if any.
    pub fn next(self) -> Option<Section> {
        match self {
            Section::CheckedIn => Some(Section::WithDoctor),
            Section::WithDoctor => Some(Section::Completed),
            Section::Completed => None,
        }
    }

    /// Header title shown above the section list.
    pub fn title(self) -> &'static str {
        match self {
            Section::CheckedIn => "Checked In",
            Section::WithDoctor => "With Doctor",
            Section::Completed => "Completed",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
