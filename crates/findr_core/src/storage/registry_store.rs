//! Registry save/load as one JSON document.
//!
//! # Responsibility
//! - Flatten the registry into serde records and back.
//! - Install loaded data through the registry's bulk paths so uniqueness and
//!   tag resolution apply exactly as they do for live commands.
//!
//! # Invariants
//! - Candidate tags are stored by name; the catalogue owns the attributes.
//! - Missing optional tag attributes default like a freshly created tag.

use crate::model::candidate::{
    Address, Candidate, DateAdded, Email, Name, Phone, Rating, Stage,
};
use crate::model::tag::Tag;
use crate::registry::CandidateRegistry;
use crate::storage::{StorageError, StorageResult};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Serialize, Deserialize)]
struct StoredTag {
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    colour: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl StoredTag {
    fn from_model(tag: &Tag) -> Self {
        Self {
            name: tag.name().to_string(),
            category: Some(tag.category().to_string()),
            colour: Some(tag.colour().to_string()),
            description: Some(tag.description().to_string()),
        }
    }

    fn to_model(&self) -> StorageResult<Tag> {
        Tag::new(
            &self.name,
            self.category.as_deref().unwrap_or(Tag::DEFAULT_CATEGORY),
            self.colour.as_deref().unwrap_or(Tag::DEFAULT_COLOUR),
            self.description.as_deref().unwrap_or(""),
        )
        .map_err(|err| StorageError::InvalidData(err.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredCandidate {
    name: String,
    phone: String,
    email: String,
    address: String,
    date_added_ms: i64,
    rating: Rating,
    stage: Stage,
    #[serde(default)]
    tags: Vec<String>,
}

impl StoredCandidate {
    fn from_model(candidate: &Candidate) -> Self {
        Self {
            name: candidate.name().display().to_string(),
            phone: candidate.phone().value().to_string(),
            email: candidate.email().value().to_string(),
            address: candidate.address().value().to_string(),
            date_added_ms: candidate.date_added().epoch_ms(),
            rating: candidate.rating(),
            stage: candidate.stage(),
            tags: candidate.tags().iter().map(|t| t.name().to_string()).collect(),
        }
    }

    fn to_model(&self) -> StorageResult<Candidate> {
        let invalid = |err: &dyn std::fmt::Display| StorageError::InvalidData(err.to_string());
        let mut tags = BTreeSet::new();
        for name in &self.tags {
            tags.insert(Tag::named(name).map_err(|err| invalid(&err))?);
        }
        Ok(Candidate::new(
            Name::new(&self.name).map_err(|err| invalid(&err))?,
            Phone::new(&self.phone).map_err(|err| invalid(&err))?,
            Email::new(&self.email).map_err(|err| invalid(&err))?,
            Address::new(&self.address).map_err(|err| invalid(&err))?,
            tags,
            DateAdded::from_epoch_ms(self.date_added_ms),
            self.rating,
            self.stage,
        ))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredRegistry {
    #[serde(default)]
    candidates: Vec<StoredCandidate>,
    #[serde(default)]
    tags: Vec<StoredTag>,
}

/// Writes the registry to `path` as pretty-printed JSON.
pub fn save_registry(path: impl AsRef<Path>, registry: &CandidateRegistry) -> StorageResult<()> {
    let started_at = Instant::now();
    let stored = StoredRegistry {
        candidates: registry
            .candidates()
            .iter()
            .map(StoredCandidate::from_model)
            .collect(),
        tags: registry.tags().iter().map(StoredTag::from_model).collect(),
    };

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&stored)?;
    std::fs::write(path.as_ref(), json)?;
    info!(
        "event=registry_save module=storage status=ok candidates={} tags={} duration_ms={}",
        stored.candidates.len(),
        stored.tags.len(),
        started_at.elapsed().as_millis()
    );
    Ok(())
}

/// Reads a registry back from `path`.
///
/// Returns `Ok(None)` when the file does not exist. Tags are installed
/// before candidates so candidate tag references resolve against the loaded
/// catalogue; names absent from it are auto-registered with defaults, the
/// same as a live insert.
pub fn load_registry(path: impl AsRef<Path>) -> StorageResult<Option<CandidateRegistry>> {
    let path = path.as_ref();
    if !path.exists() {
        info!("event=registry_load module=storage status=ok outcome=missing_file");
        return Ok(None);
    }

    let started_at = Instant::now();
    let result = read_registry(path);
    match &result {
        Ok(registry) => info!(
            "event=registry_load module=storage status=ok candidates={} tags={} duration_ms={}",
            registry.candidates().len(),
            registry.tags().len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=registry_load module=storage status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result.map(Some)
}

fn read_registry(path: &Path) -> StorageResult<CandidateRegistry> {
    let raw = std::fs::read_to_string(path)?;
    let stored: StoredRegistry = serde_json::from_str(&raw)?;

    let mut tags = Vec::with_capacity(stored.tags.len());
    for stored_tag in &stored.tags {
        tags.push(stored_tag.to_model()?);
    }
    let mut candidates = Vec::with_capacity(stored.candidates.len());
    for stored_candidate in &stored.candidates {
        candidates.push(stored_candidate.to_model()?);
    }

    let mut registry = CandidateRegistry::new();
    registry.replace_all_tags(tags)?;
    registry.replace_all_candidates(candidates)?;
    Ok(registry)
}
