//! Command-facing services over the registry.
//!
//! # Responsibility
//! - Resolve user-supplied positional addressing against the right view.
//! - Turn command requests into validated registry mutations.
//!
//! # Invariants
//! - Every failure is a recoverable [`CommandError`]; no partial mutation is
//!   left behind when an operation fails.

use crate::model::candidate::{CandidateValidationError, Stage};
use crate::model::tag::TagValidationError;
use crate::registry::RegistryError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod board;
pub mod catalogue;
pub mod roster;
pub mod selection;

pub use board::BoardService;
pub use catalogue::{CatalogueService, EditTagDescriptor};
pub use roster::{EditCandidateDescriptor, NewCandidate, RosterService};
pub use selection::Selection;

pub type CommandResult<T> = Result<T, CommandError>;

/// Command-scoped failure. Never fatal to the hosting process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Collection-level failure from the registry.
    Registry(RegistryError),
    /// Malformed candidate field value.
    Candidate(CandidateValidationError),
    /// Malformed tag field value.
    Tag(TagValidationError),
    /// 1-based index out of bounds for the full candidate list.
    InvalidIndex { index: usize },
    /// 1-based index out of bounds for one stage column.
    InvalidIndexForStage { index: usize, stage: Stage },
    /// Move precondition: candidate is not in the claimed current stage.
    WrongCurrentStage { actual: Stage },
    /// Move precondition: origin and destination stages are equal.
    SameStage(Stage),
    /// Edit request carries no change.
    NothingToEdit,
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "{err}"),
            Self::Candidate(err) => write!(f, "{err}"),
            Self::Tag(err) => write!(f, "{err}"),
            Self::InvalidIndex { index } => {
                write!(f, "index {index} is invalid for the candidate list")
            }
            Self::InvalidIndexForStage { index, stage } => {
                write!(f, "index {index} is invalid for stage {stage}")
            }
            Self::WrongCurrentStage { actual } => write!(
                f,
                "the candidate is not in the specified current stage (currently in {actual})"
            ),
            Self::SameStage(stage) => {
                write!(f, "the candidate is already in {stage}")
            }
            Self::NothingToEdit => write!(f, "at least one field to edit must be provided"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            Self::Candidate(err) => Some(err),
            Self::Tag(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RegistryError> for CommandError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<CandidateValidationError> for CommandError {
    fn from(value: CandidateValidationError) -> Self {
        Self::Candidate(value)
    }
}

impl From<TagValidationError> for CommandError {
    fn from(value: TagValidationError) -> Self {
        Self::Tag(value)
    }
}
