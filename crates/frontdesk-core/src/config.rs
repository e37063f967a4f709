//! Queue configuration.

use serde::{Deserialize, Serialize};

use crate::models::Section;

/// Number of badges a queue card shows before collapsing the rest into "+N".
pub const DEFAULT_BADGE_DISPLAY_LIMIT: usize = 2;

/// Maximum search hits returned to the search dropdown.
pub const DEFAULT_SEARCH_RESULT_LIMIT: usize = 10;

/// What to do when a patient picked from search is already queued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePolicy {
    /// Leave the queue alone and report the duplicate
    Reject,
    /// Drop the existing entry and re-add at the front as checked-in
    #[default]
    MoveToFront,
}

/// Front-desk queue settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct QueueConfig {
    pub badge_display_limit: usize,
    /// Sections whose rows can be dragged to reorder
    pub draggable_sections: Vec<Section>,
    pub duplicate_policy: DuplicatePolicy,
    pub search_result_limit: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            badge_display_limit: DEFAULT_BADGE_DISPLAY_LIMIT,
            draggable_sections: vec![Section::CheckedIn],
            duplicate_policy: DuplicatePolicy::default(),
            search_result_limit: DEFAULT_SEARCH_RESULT_LIMIT,
        }
    }
}

impl QueueConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn is_draggable(&self, section: Section) -> bool {
        self.draggable_sections.contains(&section)
    }
}
