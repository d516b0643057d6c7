//! Name search and search history.
//!
//! # Responsibility
//! - Match candidates against whole-word name keywords.
//! - Keep a bounded most-recent-first history of raw queries.

use crate::model::candidate::Candidate;
use serde::{Deserialize, Serialize};

/// True when any keyword equals any word of the candidate's display name,
/// case-insensitively. Partial words do not match.
pub fn name_matches_keywords(candidate: &Candidate, keywords: &[String]) -> bool {
    candidate.name().display().split_whitespace().any(|word| {
        keywords
            .iter()
            .any(|keyword| word.eq_ignore_ascii_case(keyword.trim()))
    })
}

/// Bounded list of past queries, most recent first, no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub const MAX_ENTRIES: usize = 50;

    pub fn new() -> Self {
        Self::default()
    }

    /// Records a query: blank input is ignored, a repeated query moves to the
    /// front, and the list is capped at [`SearchHistory::MAX_ENTRIES`].
    pub fn record(&mut self, query: &str) {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return;
        }
        self.entries.retain(|entry| entry != trimmed);
        self.entries.insert(0, trimmed.to_string());
        self.entries.truncate(Self::MAX_ENTRIES);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
