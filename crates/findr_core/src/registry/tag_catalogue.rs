//! Uniqueness-enforcing tag catalogue.
//!
//! # Responsibility
//! - Hold the canonical instance of every tag definition.
//! - Reject any second entry sharing a case-insensitive name.
//!
//! # Invariants
//! - No two entries are `is_same_tag` to each other.
//! - `set_tag` swaps in place; it never reorders the catalogue.

use crate::model::tag::Tag;
use crate::registry::{RegistryError, RegistryResult};

/// Insertion-ordered catalogue of tags, unique by case-insensitive name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCatalogue {
    entries: Vec<Tag>,
}

impl TagCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity lookup: true when an entry shares `tag`'s name.
    pub fn contains(&self, tag: &Tag) -> bool {
        self.entries.iter().any(|t| t.is_same_tag(tag))
    }

    /// Returns the canonical catalogue instance matching `tag` by identity.
    pub fn get(&self, tag: &Tag) -> RegistryResult<&Tag> {
        self.entries
            .iter()
            .find(|t| t.is_same_tag(tag))
            .ok_or_else(|| RegistryError::TagNotFound(tag.name().to_string()))
    }

    pub fn add(&mut self, tag: Tag) -> RegistryResult<()> {
        if self.contains(&tag) {
            return Err(RegistryError::DuplicateTag(tag.name().to_string()));
        }
        self.entries.push(tag);
        Ok(())
    }

    /// Replaces `target` with `replacement`, preserving its position.
    ///
    /// Fails when `replacement`'s identity collides with an entry other than
    /// `target`.
    pub fn set_tag(&mut self, target: &Tag, replacement: Tag) -> RegistryResult<()> {
        let index = self
            .entries
            .iter()
            .position(|t| t == target)
            .ok_or_else(|| RegistryError::TagNotFound(target.name().to_string()))?;

        let collides = self
            .entries
            .iter()
            .enumerate()
            .any(|(i, t)| i != index && t.is_same_tag(&replacement));
        if collides {
            return Err(RegistryError::DuplicateTag(replacement.name().to_string()));
        }

        self.entries[index] = replacement;
        Ok(())
    }

    pub fn remove(&mut self, target: &Tag) -> RegistryResult<()> {
        let index = self
            .entries
            .iter()
            .position(|t| t == target)
            .ok_or_else(|| RegistryError::TagNotFound(target.name().to_string()))?;
        self.entries.remove(index);
        Ok(())
    }

    /// Bulk replace. The input must not contain two entries sharing identity.
    pub fn replace_all(&mut self, tags: Vec<Tag>) -> RegistryResult<()> {
        for (i, tag) in tags.iter().enumerate() {
            if tags[..i].iter().any(|t| t.is_same_tag(tag)) {
                return Err(RegistryError::DuplicateTag(tag.name().to_string()));
            }
        }
        self.entries = tags;
        Ok(())
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_case_insensitive_duplicates() {
        let mut catalogue = TagCatalogue::new();
        catalogue.add(Tag::named("Backend").unwrap()).unwrap();

        let err = catalogue.add(Tag::named("backend").unwrap()).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateTag(_)));
    }

    #[test]
    fn get_returns_the_canonical_instance() {
        let mut catalogue = TagCatalogue::new();
        let styled = Tag::new("backend", "Engineering", "#1F75FE", "Backend specialist").unwrap();
        catalogue.add(styled.clone()).unwrap();

        let probe = Tag::named("BACKEND").unwrap();
        assert_eq!(catalogue.get(&probe).unwrap(), &styled);

        let missing = Tag::named("frontend").unwrap();
        assert!(matches!(
            catalogue.get(&missing).unwrap_err(),
            RegistryError::TagNotFound(_)
        ));
    }

    #[test]
    fn set_tag_preserves_position_and_allows_same_identity_rename() {
        let mut catalogue = TagCatalogue::new();
        catalogue.add(Tag::named("alpha").unwrap()).unwrap();
        catalogue.add(Tag::named("beta").unwrap()).unwrap();

        let alpha = catalogue.as_slice()[0].clone();
        let recoloured = Tag::new("Alpha", "General", "#123456", "").unwrap();
        catalogue.set_tag(&alpha, recoloured.clone()).unwrap();
        assert_eq!(catalogue.as_slice()[0], recoloured);
        assert_eq!(catalogue.as_slice()[1].name(), "beta");

        let err = catalogue
            .set_tag(&recoloured, Tag::named("BETA").unwrap())
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateTag(_)));
    }

    #[test]
    fn replace_all_rejects_internal_duplicates() {
        let mut catalogue = TagCatalogue::new();
        let err = catalogue
            .replace_all(vec![
                Tag::named("remote").unwrap(),
                Tag::named("REMOTE").unwrap(),
            ])
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateTag(_)));
    }
}
