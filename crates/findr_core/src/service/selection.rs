//! Shared stage-scoped index resolution.
//!
//! # Responsibility
//! - Resolve a 1-based index against either the full candidate sequence or a
//!   single stage column, depending on the selection's scope.
//!
//! # Invariants
//! - Stage scoping filters first (relative order preserved), then indexes.
//! - Out-of-bounds failures name the addressing mode that was used.

use crate::model::candidate::{Candidate, Stage};
use crate::registry::view::stage_candidates;
use crate::service::{CommandError, CommandResult};

/// Positional address for a candidate: a 1-based index, optionally scoped to
/// one stage column. Which collection the index is relative to is decided by
/// the scope, not by the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    index: usize,
    stage: Option<Stage>,
}

impl Selection {
    /// Index into the full candidate sequence.
    pub fn in_list(index: usize) -> Self {
        Self { index, stage: None }
    }

    /// Index counted only among candidates currently in `stage`.
    pub fn in_stage(index: usize, stage: Stage) -> Self {
        Self {
            index,
            stage: Some(stage),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    fn out_of_bounds(&self) -> CommandError {
        match self.stage {
            Some(stage) => CommandError::InvalidIndexForStage {
                index: self.index,
                stage,
            },
            None => CommandError::InvalidIndex { index: self.index },
        }
    }
}

/// Resolves `selection` against `candidates`, returning the addressed
/// candidate by value.
pub fn resolve(candidates: &[Candidate], selection: Selection) -> CommandResult<Candidate> {
    if selection.index == 0 {
        return Err(selection.out_of_bounds());
    }
    let resolved = match selection.stage {
        Some(stage) => stage_candidates(candidates, stage)
            .get(selection.index - 1)
            .map(|c| (*c).clone()),
        None => candidates.get(selection.index - 1).cloned(),
    };
    resolved.ok_or_else(|| selection.out_of_bounds())
}
