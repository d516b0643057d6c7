//! Uniqueness-enforcing candidate collection.
//!
//! # Responsibility
//! - Keep candidates in insertion order for display.
//! - Reject any second entry sharing a name identity.
//!
//! # Invariants
//! - No two entries are `is_same_candidate` to each other.
//! - `set_candidate` swaps in place; it never reorders the list.

use crate::model::candidate::Candidate;
use crate::registry::{RegistryError, RegistryResult};

/// Insertion-ordered list of candidates, unique by name identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    entries: Vec<Candidate>,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity lookup: true when an entry shares `candidate`'s name.
    pub fn contains(&self, candidate: &Candidate) -> bool {
        self.entries.iter().any(|c| c.is_same_candidate(candidate))
    }

    pub fn add(&mut self, candidate: Candidate) -> RegistryResult<()> {
        if self.contains(&candidate) {
            return Err(RegistryError::DuplicateCandidate(candidate.name().clone()));
        }
        self.entries.push(candidate);
        Ok(())
    }

    /// Replaces `target` with `edited`, preserving its list position.
    ///
    /// `target` is located by full value equality; `edited` may change the
    /// name identity as long as it does not collide with a different entry.
    pub fn set_candidate(&mut self, target: &Candidate, edited: Candidate) -> RegistryResult<()> {
        let index = self
            .entries
            .iter()
            .position(|c| c == target)
            .ok_or_else(|| RegistryError::CandidateNotFound(target.name().clone()))?;

        let collides = self
            .entries
            .iter()
            .enumerate()
            .any(|(i, c)| i != index && c.is_same_candidate(&edited));
        if collides {
            return Err(RegistryError::DuplicateCandidate(edited.name().clone()));
        }

        self.entries[index] = edited;
        Ok(())
    }

    pub fn remove(&mut self, target: &Candidate) -> RegistryResult<()> {
        let index = self
            .entries
            .iter()
            .position(|c| c == target)
            .ok_or_else(|| RegistryError::CandidateNotFound(target.name().clone()))?;
        self.entries.remove(index);
        Ok(())
    }

    /// Bulk replace. The input must not contain two entries sharing identity.
    pub fn replace_all(&mut self, candidates: Vec<Candidate>) -> RegistryResult<()> {
        for (i, candidate) in candidates.iter().enumerate() {
            let duplicated = candidates[..i].iter().any(|c| c.is_same_candidate(candidate));
            if duplicated {
                return Err(RegistryError::DuplicateCandidate(candidate.name().clone()));
            }
        }
        self.entries = candidates;
        Ok(())
    }

    // Cascade write-back: the caller has already proven `candidate` keeps the
    // same identity as the entry at `index`.
    pub(crate) fn replace_at(&mut self, index: usize, candidate: Candidate) {
        self.entries[index] = candidate;
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
