//! Catalogue use-case service: the tag command family.
//!
//! # Responsibility
//! - Add, edit, delete and list tag definitions.
//! - Route every catalogue edit through the registry so the cascade reaches
//!   referencing candidates.

use crate::model::tag::Tag;
use crate::registry::CandidateRegistry;
use crate::service::{CommandError, CommandResult};

/// Field overrides for a tag edit; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditTagDescriptor {
    pub name: Option<String>,
    pub category: Option<String>,
    pub colour: Option<String>,
    pub description: Option<String>,
}

impl EditTagDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.category.is_some()
            || self.colour.is_some()
            || self.description.is_some()
    }
}

/// Tag command entry points over the registry.
pub struct CatalogueService<'a> {
    registry: &'a mut CandidateRegistry,
}

impl<'a> CatalogueService<'a> {
    pub fn new(registry: &'a mut CandidateRegistry) -> Self {
        Self { registry }
    }

    pub fn add_tag(&mut self, tag: Tag) -> CommandResult<()> {
        self.registry.add_tag(tag)?;
        Ok(())
    }

    /// Edits the tag named `target_name`, cascading to referencing
    /// candidates. An edit that changes nothing is rejected.
    pub fn edit_tag(
        &mut self,
        target_name: &str,
        descriptor: EditTagDescriptor,
    ) -> CommandResult<Tag> {
        let probe = Tag::named(target_name)?;
        let current = self.registry.get_tag(&probe)?.clone();

        if !descriptor.is_any_field_edited() {
            return Err(CommandError::NothingToEdit);
        }

        let edited = Tag::new(
            descriptor.name.as_deref().unwrap_or_else(|| current.name()),
            descriptor
                .category
                .as_deref()
                .unwrap_or_else(|| current.category()),
            descriptor
                .colour
                .as_deref()
                .unwrap_or_else(|| current.colour()),
            descriptor
                .description
                .as_deref()
                .unwrap_or_else(|| current.description()),
        )?;
        if edited == current {
            return Err(CommandError::NothingToEdit);
        }

        self.registry.set_tag(&current, edited.clone())?;
        Ok(edited)
    }

    /// Deletes the tag named `name`, dropping it from every candidate.
    pub fn delete_tag(&mut self, name: &str) -> CommandResult<Tag> {
        let probe = Tag::named(name)?;
        let target = self.registry.get_tag(&probe)?.clone();
        self.registry.remove_tag(&target)?;
        Ok(target)
    }

    pub fn list(&self) -> &[Tag] {
        self.registry.tags()
    }
}
