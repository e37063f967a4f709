//! Patient models.

use serde::{Deserialize, Serialize};

use super::section::Section;

/// Kind of status chip shown on a queue card.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StatusBadgeKind {
    New,
    Forms,
    Pay,
    Exam,
    Military,
}

/// A status chip attached to a patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusBadge {
    #[serde(rename = "type")]
    pub kind: StatusBadgeKind,
    pub label: String,
}

impl StatusBadge {
    pub fn new(kind: StatusBadgeKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}

/// Descriptive patient details. Only `section` is read by the queue logic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetails {
    /// Preferred doctor of chiropractic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc_preference: Option<String>,
    /// Plan name (e.g. "Wellness Plan", "20 Visits")
    #[serde(default)]
    pub plan_type: String,
    /// Billing cycle date as displayed
    #[serde(default)]
    pub cycle_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_clinic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visits_left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care_cards: Option<u32>,
    /// Workflow stage; drives which section view the patient shows up in
    #[serde(default)]
    pub section: Section,
    /// When the patient last entered the queue (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<String>,
}

/// A patient as held in the front-desk queue.
///
/// `id` is the only field used for identity; everything else is display data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub initials: String,
    #[serde(default)]
    pub status_badges: Vec<StatusBadge>,
    #[serde(default)]
    pub details: PatientDetails,
}

/// Badges to render for one card, plus how many were cut off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeDisplay<'a> {
    pub shown: &'a [StatusBadge],
    pub overflow: usize,
}

impl PatientRecord {
    /// Create a new patient with a generated id and derived initials.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            initials: initials_from_name(&name),
            name,
            status_badges: Vec::new(),
            details: PatientDetails::default(),
        }
    }

    /// Create a patient with a caller-supplied id.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            initials: initials_from_name(&name),
            name,
            status_badges: Vec::new(),
            details: PatientDetails::default(),
        }
    }

    /// Builder-style section setter.
    pub fn in_section(mut self, section: Section) -> Self {
        self.details.section = section;
        self
    }

    /// Builder-style badge append.
    pub fn with_badge(mut self, kind: StatusBadgeKind, label: impl Into<String>) -> Self {
        self.status_badges.push(StatusBadge::new(kind, label));
        self
    }

    pub fn section(&self) -> Section {
        self.details.section
    }

    /// Split badges into the first `limit` shown and an overflow count.
    pub fn badge_display(&self, limit: usize) -> BadgeDisplay<'_> {
        let shown_len = self.status_badges.len().min(limit);
        BadgeDisplay {
            shown: &self.status_badges[..shown_len],
            overflow: self.status_badges.len() - shown_len,
        }
    }

    /// Digits of the phone number, if any.
    pub fn phone_digits(&self) -> Option<String> {
        self.details
            .phone_number
            .as_deref()
            .map(|p| p.chars().filter(|c| c.is_ascii_digit()).collect())
    }
}

/// First letter of every word, upper-cased ("sarah  johnson" -> "SJ").
pub fn initials_from_name(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
