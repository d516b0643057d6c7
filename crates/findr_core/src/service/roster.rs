//! Roster use-case service: add and edit candidate records.
//!
//! # Responsibility
//! - Insert new candidates with strict tag resolution.
//! - Rebuild edited candidates through the copy-with helper.
//!
//! # Invariants
//! - Interactive adds and edits never auto-create tags; a missing tag is a
//!   `TagNotFound` the caller surfaces as a create-it-first prompt.

use crate::model::candidate::{
    Address, Candidate, DateAdded, Email, Name, Phone, Rating, Stage,
};
use crate::model::tag::Tag;
use crate::registry::CandidateRegistry;
use crate::service::selection::{resolve, Selection};
use crate::service::{CommandError, CommandResult};
use log::info;
use std::collections::BTreeSet;

/// Request model for inserting one candidate.
///
/// New candidates always start unrated in the Candidates stage.
#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub name: Name,
    pub phone: Phone,
    pub email: Email,
    pub address: Address,
    pub tags: BTreeSet<Tag>,
    pub date_added: DateAdded,
}

/// Field overrides for an edit; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditCandidateDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl EditCandidateDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.tags.is_some()
    }
}

/// Candidate CRUD entry points for interactive commands.
pub struct RosterService<'a> {
    registry: &'a mut CandidateRegistry,
}

impl<'a> RosterService<'a> {
    pub fn new(registry: &'a mut CandidateRegistry) -> Self {
        Self { registry }
    }

    /// Inserts a new candidate. Tags must already be catalogued.
    pub fn add(&mut self, request: NewCandidate) -> CommandResult<Candidate> {
        let tags = self.registry.resolve_tags(&request.tags)?;
        let candidate = Candidate::new(
            request.name,
            request.phone,
            request.email,
            request.address,
            tags,
            request.date_added,
            Rating::Unrated,
            Stage::Candidates,
        );
        self.registry.add_candidate(candidate.clone())?;
        Ok(candidate)
    }

    /// Rebuilds the selected candidate with the descriptor's overrides.
    pub fn edit(
        &mut self,
        selection: Selection,
        descriptor: EditCandidateDescriptor,
    ) -> CommandResult<Candidate> {
        if !descriptor.is_any_field_edited() {
            return Err(CommandError::NothingToEdit);
        }
        let target = resolve(self.registry.candidates(), selection)?;

        let mut edit = target.edit();
        if let Some(name) = descriptor.name {
            edit = edit.name(name);
        }
        if let Some(phone) = descriptor.phone {
            edit = edit.phone(phone);
        }
        if let Some(email) = descriptor.email {
            edit = edit.email(email);
        }
        if let Some(address) = descriptor.address {
            edit = edit.address(address);
        }
        if let Some(tags) = descriptor.tags {
            edit = edit.tags(self.registry.resolve_tags(&tags)?);
        }

        let edited = edit.build();
        self.registry.set_candidate(&target, edited.clone())?;
        info!("event=candidate_edited module=roster status=ok");
        Ok(edited)
    }
}
