//! Patient lookup for the global search box.
//!
//! Matching, in rank order:
//! - Name: case-insensitive substring of the full name
//! - Phone: digits of the query appear in the phone digits
//! - Fuzzy: a name word is close to the query (typos)
//!
//! Within a match kind, hits are ordered by similarity score.

use std::cmp::Ordering;

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::models::PatientRecord;

/// Minimum similarity for a typo match.
const MIN_FUZZY_SCORE: f64 = 0.85;

/// How a search hit matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    Name,
    Phone,
    Fuzzy,
}

/// One search result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub patient: &'a PatientRecord,
    pub kind: MatchKind,
    pub score: f64,
}

/// Searchable patient roster.
#[derive(Debug, Clone, Default)]
pub struct PatientSearch {
    roster: Vec<PatientRecord>,
}

impl PatientSearch {
    pub fn new(roster: Vec<PatientRecord>) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &[PatientRecord] {
        &self.roster
    }

    pub fn find(&self, id: &str) -> Option<&PatientRecord> {
        self.roster.iter().find(|p| p.id == id)
    }

    /// Ranked hits for `query`, at most `limit` of them.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit<'_>> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let query_lower = query.to_lowercase();
        let query_digits: String = query.chars().filter(|c| c.is_ascii_digit()).collect();

        let mut hits: Vec<SearchHit<'_>> = self
            .roster
            .iter()
            .filter_map(|patient| match_patient(patient, &query_lower, &query_digits))
            .collect();

        hits.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
        });
        hits.truncate(limit);

        tracing::debug!(hits = hits.len(), "Patient search");
        hits
    }
}

fn match_patient<'a>(
    patient: &'a PatientRecord,
    query_lower: &str,
    query_digits: &str,
) -> Option<SearchHit<'a>> {
    let name_lower = patient.name.to_lowercase();
    let score = name_similarity(&name_lower, query_lower);

    if name_lower.contains(query_lower) {
        return Some(SearchHit {
            patient,
            kind: MatchKind::Name,
            score,
        });
    }

    // A query with no digits would match every phone number
    if !query_digits.is_empty() {
        if let Some(phone) = patient.phone_digits() {
            if phone.contains(query_digits) {
                return Some(SearchHit {
                    patient,
                    kind: MatchKind::Phone,
                    score,
                });
            }
        }
    }

    (score >= MIN_FUZZY_SCORE).then_some(SearchHit {
        patient,
        kind: MatchKind::Fuzzy,
        score,
    })
}

/// Best similarity between the query and the full name or any single word of it.
fn name_similarity(name_lower: &str, query_lower: &str) -> f64 {
    std::iter::once(name_lower)
        .chain(name_lower.split_whitespace())
        .map(|candidate| fuzzy_match(candidate, query_lower))
        .fold(0.0, f64::max)
}

/// Jaro-Winkler weighted over normalized Levenshtein.
fn fuzzy_match(a: &str, b: &str) -> f64 {
    let jw = jaro_winkler(a, b);
    let lev = normalized_levenshtein(a, b);
    jw * 0.6 + lev * 0.4
}
