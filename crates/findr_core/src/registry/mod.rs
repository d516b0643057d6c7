//! Registry aggregate for candidates and tags.
//!
//! # Responsibility
//! - Own the candidate list and the tag catalogue behind one mutation API.
//! - Enforce the cross-collection invariant: every tag referenced by any
//!   candidate is a canonical catalogue entry.
//!
//! # Invariants
//! - Candidate inserts resolve tags first: unknown tags are auto-registered,
//!   known ones substituted with the catalogue instance.
//! - Catalogue edits and removals cascade to every referencing candidate
//!   without touching other fields or list order, and commit all-or-nothing.

use crate::model::candidate::{Candidate, Name};
use crate::model::tag::Tag;
use log::info;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod candidate_list;
pub mod sample;
pub mod tag_catalogue;
pub mod view;

pub use candidate_list::CandidateList;
pub use tag_catalogue::TagCatalogue;

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Collection-level failure raised by the registry and its collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Insert or rename collides with an existing candidate identity.
    DuplicateCandidate(Name),
    /// Referenced candidate is absent from the list.
    CandidateNotFound(Name),
    /// Insert or rename collides with an existing tag identity.
    DuplicateTag(String),
    /// Referenced tag is absent from the catalogue.
    TagNotFound(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateCandidate(name) => {
                write!(f, "duplicate candidate: {}", name.display())
            }
            Self::CandidateNotFound(name) => {
                write!(f, "candidate not found: {}", name.display())
            }
            Self::DuplicateTag(name) => write!(f, "duplicate tag: `{name}`"),
            Self::TagNotFound(name) => write!(f, "tag not found: `{name}`"),
        }
    }
}

impl Error for RegistryError {}

/// Aggregate root over one [`CandidateList`] and one [`TagCatalogue`].
///
/// Lives for the process lifetime; `reset` replaces its contents wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRegistry {
    candidates: CandidateList,
    tags: TagCatalogue,
}

impl CandidateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidates(&self) -> &[Candidate] {
        self.candidates.as_slice()
    }

    pub fn tags(&self) -> &[Tag] {
        self.tags.as_slice()
    }

    pub fn has_candidate(&self, candidate: &Candidate) -> bool {
        self.candidates.contains(candidate)
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Returns the canonical catalogue instance matching `tag` by identity.
    pub fn get_tag(&self, tag: &Tag) -> RegistryResult<&Tag> {
        self.tags.get(tag)
    }

    /// Inserts a candidate, resolving its tags against the catalogue first.
    ///
    /// Unknown tags are auto-registered with the attributes they carry; known
    /// tags are substituted with the canonical catalogue instance so that
    /// later catalogue edits reach every referencing candidate.
    pub fn add_candidate(&mut self, candidate: Candidate) -> RegistryResult<()> {
        if self.candidates.contains(&candidate) {
            return Err(RegistryError::DuplicateCandidate(candidate.name().clone()));
        }
        let resolved = self.resolve_candidate(candidate)?;
        self.candidates.add(resolved)?;
        info!(
            "event=candidate_added module=registry status=ok candidates={} tags={}",
            self.candidates.len(),
            self.tags.len()
        );
        Ok(())
    }

    /// Replaces `target` with `edited` in place.
    ///
    /// Tags on `edited` are not re-resolved; callers that change tags resolve
    /// them explicitly through [`CandidateRegistry::resolve_tags`].
    pub fn set_candidate(&mut self, target: &Candidate, edited: Candidate) -> RegistryResult<()> {
        self.candidates.set_candidate(target, edited)
    }

    /// Removes a candidate. Its tags stay catalogued even if now unused.
    pub fn remove_candidate(&mut self, target: &Candidate) -> RegistryResult<()> {
        self.candidates.remove(target)
    }

    pub fn add_tag(&mut self, tag: Tag) -> RegistryResult<()> {
        self.tags.add(tag)
    }

    /// Swaps a catalogue entry and rewrites every candidate referencing it.
    pub fn set_tag(&mut self, target: &Tag, edited: Tag) -> RegistryResult<()> {
        self.tags.set_tag(target, edited.clone())?;
        let rewritten = self.cascade(target, Some(&edited));
        info!(
            "event=tag_edited module=registry status=ok tag={} rewritten_candidates={}",
            edited.canonical_name(),
            rewritten
        );
        Ok(())
    }

    /// Removes a catalogue entry and drops it from every candidate's tag set.
    pub fn remove_tag(&mut self, target: &Tag) -> RegistryResult<()> {
        self.tags.remove(target)?;
        let rewritten = self.cascade(target, None);
        info!(
            "event=tag_removed module=registry status=ok tag={} rewritten_candidates={}",
            target.canonical_name(),
            rewritten
        );
        Ok(())
    }

    /// Strict lookup of every identity in `tags` against the catalogue.
    ///
    /// Unlike [`CandidateRegistry::add_candidate`], nothing is auto-created:
    /// interactive commands require the tag to exist already.
    pub fn resolve_tags(&self, tags: &BTreeSet<Tag>) -> RegistryResult<BTreeSet<Tag>> {
        let mut resolved = BTreeSet::new();
        for tag in tags {
            resolved.insert(self.tags.get(tag)?.clone());
        }
        Ok(resolved)
    }

    /// Bulk tag install used by persistence; same duplicate rules as `add_tag`.
    pub fn replace_all_tags(&mut self, tags: Vec<Tag>) -> RegistryResult<()> {
        self.tags.replace_all(tags)
    }

    /// Bulk candidate install used by persistence.
    ///
    /// Every candidate goes through the same resolve path as a live insert,
    /// so a reload can never bypass uniqueness or tag-resolution rules.
    pub fn replace_all_candidates(&mut self, candidates: Vec<Candidate>) -> RegistryResult<()> {
        let mut resolved = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            resolved.push(self.resolve_candidate(candidate)?);
        }
        self.candidates.replace_all(resolved)
    }

    /// Empties both collections.
    pub fn reset(&mut self) {
        self.candidates = CandidateList::new();
        self.tags = TagCatalogue::new();
        info!("event=registry_reset module=registry status=ok");
    }

    fn resolve_candidate(&mut self, candidate: Candidate) -> RegistryResult<Candidate> {
        let mut resolved = BTreeSet::new();
        for tag in candidate.tags() {
            if !self.tags.contains(tag) {
                self.tags.add(tag.clone())?;
            }
            resolved.insert(self.tags.get(tag)?.clone());
        }
        Ok(candidate.edit().tags(resolved).build())
    }

    // Rebuilds the tag set of every candidate referencing `target`:
    // substitute `replacement` when present, drop the tag when absent.
    // All rebuilds are computed before any write-back, and untouched
    // candidates are not rewritten. Returns the number rewritten.
    fn cascade(&mut self, target: &Tag, replacement: Option<&Tag>) -> usize {
        let mut rebuilt = Vec::new();
        for (index, candidate) in self.candidates.iter().enumerate() {
            if !candidate.tags().iter().any(|t| t.is_same_tag(target)) {
                continue;
            }
            let mut tags = BTreeSet::new();
            for tag in candidate.tags() {
                if tag.is_same_tag(target) {
                    if let Some(replacement) = replacement {
                        tags.insert(replacement.clone());
                    }
                } else {
                    tags.insert(tag.clone());
                }
            }
            rebuilt.push((index, candidate.edit().tags(tags).build()));
        }

        let rewritten = rebuilt.len();
        for (index, candidate) in rebuilt {
            self.candidates.replace_at(index, candidate);
        }
        rewritten
    }
}
