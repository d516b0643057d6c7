//! Board use-case service: move, rate, delete and clear.
//!
//! # Responsibility
//! - Apply stage transitions and rating edits as whole-value rebuilds.
//! - Keep index addressing semantics per command: `move` indexes the full
//!   list and treats the origin stage as a precondition; `rate` and `delete`
//!   index within one stage column.
//!
//! # Invariants
//! - A move changes only `stage`; a rate changes only `rating`.
//! - Clearing a stage leaves other stages and the tag catalogue untouched.

use crate::model::candidate::{Candidate, Rating, Stage};
use crate::registry::view::stage_candidates;
use crate::registry::CandidateRegistry;
use crate::service::selection::{resolve, Selection};
use crate::service::{CommandError, CommandResult};
use log::info;

/// Stage-board operations over the registry.
pub struct BoardService<'a> {
    registry: &'a mut CandidateRegistry,
}

impl<'a> BoardService<'a> {
    pub fn new(registry: &'a mut CandidateRegistry) -> Self {
        Self { registry }
    }

    /// Moves the candidate at `index` (full-list, 1-based) from `from` to
    /// `to`.
    ///
    /// The origin stage is a precondition, not an index scope: the wrong
    /// current stage is reported with the candidate's actual stage.
    pub fn move_candidate(
        &mut self,
        index: usize,
        from: Stage,
        to: Stage,
    ) -> CommandResult<Candidate> {
        let candidate = resolve(self.registry.candidates(), Selection::in_list(index))?;
        if candidate.stage() != from {
            return Err(CommandError::WrongCurrentStage {
                actual: candidate.stage(),
            });
        }
        if from == to {
            return Err(CommandError::SameStage(to));
        }

        let moved = candidate.edit().stage(to).build();
        self.registry.set_candidate(&candidate, moved.clone())?;
        info!(
            "event=candidate_moved module=board status=ok from={} to={}",
            from.display_name(),
            to.display_name()
        );
        Ok(moved)
    }

    /// Re-rates the candidate at `index` within the `stage` column.
    pub fn rate(&mut self, index: usize, stage: Stage, rating: Rating) -> CommandResult<Candidate> {
        let candidate = resolve(self.registry.candidates(), Selection::in_stage(index, stage))?;
        let rated = candidate.edit().rating(rating).build();
        self.registry.set_candidate(&candidate, rated.clone())?;
        info!(
            "event=candidate_rated module=board status=ok stage={} rating={}",
            stage.display_name(),
            rating.display_name()
        );
        Ok(rated)
    }

    /// Deletes the candidate at `index` within the `stage` column.
    pub fn delete(&mut self, index: usize, stage: Stage) -> CommandResult<Candidate> {
        let candidate = resolve(self.registry.candidates(), Selection::in_stage(index, stage))?;
        self.registry.remove_candidate(&candidate)?;
        info!(
            "event=candidate_deleted module=board status=ok stage={}",
            stage.display_name()
        );
        Ok(candidate)
    }

    /// Removes every candidate currently in `stage`; returns how many.
    pub fn clear_stage(&mut self, stage: Stage) -> CommandResult<usize> {
        let doomed: Vec<Candidate> = stage_candidates(self.registry.candidates(), stage)
            .into_iter()
            .cloned()
            .collect();
        for candidate in &doomed {
            self.registry.remove_candidate(candidate)?;
        }
        info!(
            "event=stage_cleared module=board status=ok stage={} removed={}",
            stage.display_name(),
            doomed.len()
        );
        Ok(doomed.len())
    }

    /// Resets the registry wholesale: candidates and catalogue both emptied.
    pub fn clear_all(&mut self) {
        self.registry.reset();
    }
}
