//! Domain model for the recruitment board.
//!
//! # Responsibility
//! - Define the validated value types commands and storage agree on.
//! - Keep every record immutable; edits rebuild whole values.
//!
//! # Invariants
//! - A candidate is identified by its whitespace/case-normalized name.
//! - A tag is identified by its case-insensitive name.

pub mod candidate;
pub mod tag;
