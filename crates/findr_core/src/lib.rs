//! Core domain logic for Findr, a recruitment pipeline tracker.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod registry;
pub mod search;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::candidate::{
    Address, Candidate, CandidateValidationError, DateAdded, Email, Name, Phone, Rating, Stage,
};
pub use model::tag::{Tag, TagValidationError};
pub use registry::sample::sample_registry;
pub use registry::view::{sorted, stage_candidates, stage_counts, SortKey};
pub use registry::{CandidateList, CandidateRegistry, RegistryError, TagCatalogue};
pub use search::{name_matches_keywords, SearchHistory};
pub use service::{
    BoardService, CatalogueService, CommandError, EditCandidateDescriptor, EditTagDescriptor,
    NewCandidate, RosterService, Selection,
};
pub use storage::{
    load_registry, load_search_history, save_registry, save_search_history, StorageError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
