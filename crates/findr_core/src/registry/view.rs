//! Derived read-only projections over the candidate list.
//!
//! Projections are recomputed on every call and never cached across a
//! mutation; the registry's list remains the only stored state.

use crate::model::candidate::{Candidate, Stage};
use std::cmp::Ordering;

/// Sort criterion for the board display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Canonical name, ascending.
    Alphabetical,
    /// Rating rank, best first; canonical name breaks ties.
    Rating,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "alphabetical" => Some(SortKey::Alphabetical),
            "rating" => Some(SortKey::Rating),
            _ => None,
        }
    }

    pub fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        match self {
            SortKey::Alphabetical => a.name().cmp(b.name()),
            SortKey::Rating => b
                .rating()
                .rank()
                .cmp(&a.rating().rank())
                .then_with(|| a.name().cmp(b.name())),
        }
    }
}

/// Candidates currently in `stage`, relative order preserved.
pub fn stage_candidates(candidates: &[Candidate], stage: Stage) -> Vec<&Candidate> {
    candidates.iter().filter(|c| c.stage() == stage).collect()
}

/// Per-stage candidate counts in board order.
pub fn stage_counts(candidates: &[Candidate]) -> [(Stage, usize); 4] {
    Stage::ALL.map(|stage| {
        (
            stage,
            candidates.iter().filter(|c| c.stage() == stage).count(),
        )
    })
}

/// A sorted projection of `candidates`; the underlying order is untouched.
pub fn sorted<'a>(candidates: &'a [Candidate], key: SortKey) -> Vec<&'a Candidate> {
    let mut projected: Vec<&Candidate> = candidates.iter().collect();
    projected.sort_by(|a, b| key.compare(a, b));
    projected
}
