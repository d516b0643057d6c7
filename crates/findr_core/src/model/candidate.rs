//! Candidate domain model.
//!
//! # Responsibility
//! - Define the validated field types of a candidate record.
//! - Provide the single copy-with helper used for every candidate edit.
//!
//! # Invariants
//! - Name identity is the whitespace-collapsed, lowercased form, so
//!   `"john smith"` and `"John   Smith"` are the same candidate.
//! - `Candidate` values are never mutated after construction.

use crate::model::tag::Tag;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^[\p{L}\p{M}\p{N}][\p{L}\p{M}\p{N} @'\-]*(?:\b[sd]/o\b[\p{L}\p{M}\p{N} @'\-]*)*$",
    )
    .expect("valid name regex")
});
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9](?:[A-Za-z0-9+_.\-]*[A-Za-z0-9])?@(?:[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?\.)*[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9]$",
    )
    .expect("valid email regex")
});
static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s].*$").expect("valid address regex"));

pub type ValidationResult<T> = Result<T, CandidateValidationError>;

/// Field-level construction failure for candidate values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateValidationError {
    /// Name is blank or contains characters outside the allowed set.
    InvalidName,
    /// Phone is not at least 3 digits.
    InvalidPhone,
    /// Email does not have a `local@domain` shape within the allowed charset.
    InvalidEmail,
    /// Address is blank or starts with whitespace.
    InvalidAddress,
    /// Rating text matches no known rating.
    InvalidRating(String),
    /// Stage text matches no pipeline stage.
    InvalidStage(String),
}

impl Display for CandidateValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(
                f,
                "names should only contain letters, numbers, spaces, apostrophes, '@' or hyphens, \
                 may include 's/o' or 'd/o', and should not be blank"
            ),
            Self::InvalidPhone => {
                write!(f, "phone numbers should only contain digits, at least 3 of them")
            }
            Self::InvalidEmail => write!(f, "emails should be of the form local-part@domain"),
            Self::InvalidAddress => {
                write!(f, "addresses can take any value but should not be blank")
            }
            Self::InvalidRating(value) => write!(
                f,
                "unknown rating `{value}`; expected one of Unrated, Very Poor, Poor, Average, \
                 Good, Excellent"
            ),
            Self::InvalidStage(value) => write!(
                f,
                "unknown stage `{value}`; expected one of Candidates, Contacted, Interviewed, Hired"
            ),
        }
    }
}

impl Error for CandidateValidationError {}

/// A candidate's name.
///
/// Keeps a `display` form (whitespace collapsed, title-cased) and a
/// `canonical` form (collapsed, lowercased). Equality, ordering and hashing
/// use only the canonical form.
#[derive(Debug, Clone)]
pub struct Name {
    display: String,
    canonical: String,
}

impl Name {
    pub fn new(value: &str) -> ValidationResult<Self> {
        let collapsed = collapse_whitespace(value);
        if !NAME_RE.is_match(&collapsed) {
            return Err(CandidateValidationError::InvalidName);
        }
        Ok(Self {
            display: title_case(&collapsed),
            canonical: collapsed.to_lowercase(),
        })
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Lowercased, whitespace-collapsed identity key.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display)
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Capitalize after a word start; `'`, `-` and `/` start a new word so
// "o'brien-lee s/o tan" renders as "O'Brien-Lee S/O Tan".
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut capitalize_next = true;
    for ch in value.chars() {
        if ch == ' ' {
            out.push(ch);
            capitalize_next = true;
        } else if ch == '\'' || ch == '-' || ch == '/' {
            out.push(ch);
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// A candidate's phone number: digits only, at least 3.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn new(value: &str) -> ValidationResult<Self> {
        let trimmed = value.trim();
        if !PHONE_RE.is_match(trimmed) {
            return Err(CandidateValidationError::InvalidPhone);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Display for Phone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A candidate's email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: &str) -> ValidationResult<Self> {
        let trimmed = value.trim();
        if !EMAIL_RE.is_match(trimmed) {
            return Err(CandidateValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A candidate's address: free-form, but not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn new(value: &str) -> ValidationResult<Self> {
        let trimmed = value.trim();
        if !ADDRESS_RE.is_match(trimmed) {
            return Err(CandidateValidationError::InvalidAddress);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// When the candidate entered the board, in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateAdded(i64);

impl DateAdded {
    pub fn from_epoch_ms(epoch_ms: i64) -> Self {
        Self(epoch_ms)
    }

    pub fn epoch_ms(&self) -> i64 {
        self.0
    }
}

/// Interview rating, ordered worst to best. Declaration order is rank order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Unrated,
    VeryPoor,
    Poor,
    Average,
    Good,
    Excellent,
}

impl Rating {
    pub const ALL: [Rating; 6] = [
        Rating::Unrated,
        Rating::VeryPoor,
        Rating::Poor,
        Rating::Average,
        Rating::Good,
        Rating::Excellent,
    ];

    /// Integer rank used by the rating sort, 0 (Unrated) to 5 (Excellent).
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Rating::Unrated => "Unrated",
            Rating::VeryPoor => "Very Poor",
            Rating::Poor => "Poor",
            Rating::Average => "Average",
            Rating::Good => "Good",
            Rating::Excellent => "Excellent",
        }
    }

    /// Parses display names ("Very Poor") and underscore names ("VERY_POOR"),
    /// case-insensitively.
    pub fn parse(value: &str) -> ValidationResult<Self> {
        let normalized = value.trim().to_ascii_uppercase().replace(' ', "_");
        match normalized.as_str() {
            "UNRATED" => Ok(Rating::Unrated),
            "VERY_POOR" => Ok(Rating::VeryPoor),
            "POOR" => Ok(Rating::Poor),
            "AVERAGE" => Ok(Rating::Average),
            "GOOD" => Ok(Rating::Good),
            "EXCELLENT" => Ok(Rating::Excellent),
            _ => Err(CandidateValidationError::InvalidRating(
                value.trim().to_string(),
            )),
        }
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Pipeline stage of a candidate, in board order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Candidates,
    Contacted,
    Interviewed,
    Hired,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Candidates,
        Stage::Contacted,
        Stage::Interviewed,
        Stage::Hired,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Candidates => "Candidates",
            Stage::Contacted => "Contacted",
            Stage::Interviewed => "Interviewed",
            Stage::Hired => "Hired",
        }
    }

    pub fn parse(value: &str) -> ValidationResult<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CANDIDATES" => Ok(Stage::Candidates),
            "CONTACTED" => Ok(Stage::Contacted),
            "INTERVIEWED" => Ok(Stage::Interviewed),
            "HIRED" => Ok(Stage::Hired),
            _ => Err(CandidateValidationError::InvalidStage(
                value.trim().to_string(),
            )),
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One candidate on the board. Immutable; edit through [`Candidate::edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    date_added: DateAdded,
    rating: Rating,
    stage: Stage,
    tags: BTreeSet<Tag>,
}

impl Candidate {
    /// Every field must be present; the type system enforces validity.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        address: Address,
        tags: BTreeSet<Tag>,
        date_added: DateAdded,
        rating: Rating,
        stage: Stage,
    ) -> Self {
        Self {
            name,
            phone,
            email,
            address,
            date_added,
            rating,
            stage,
            tags,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn date_added(&self) -> DateAdded {
        self.date_added
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Weaker notion of equality: same name identity.
    pub fn is_same_candidate(&self, other: &Candidate) -> bool {
        self.name == other.name
    }

    /// Starts a rebuild of this candidate. Every field defaults to its
    /// current value; override the ones the command changes.
    pub fn edit(&self) -> CandidateEdit {
        CandidateEdit {
            inner: self.clone(),
        }
    }
}

impl Display for Candidate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Copy-with rebuild helper; threads every untouched field through unchanged.
#[derive(Debug)]
pub struct CandidateEdit {
    inner: Candidate,
}

impl CandidateEdit {
    pub fn name(mut self, name: Name) -> Self {
        self.inner.name = name;
        self
    }

    pub fn phone(mut self, phone: Phone) -> Self {
        self.inner.phone = phone;
        self
    }

    pub fn email(mut self, email: Email) -> Self {
        self.inner.email = email;
        self
    }

    pub fn address(mut self, address: Address) -> Self {
        self.inner.address = address;
        self
    }

    pub fn rating(mut self, rating: Rating) -> Self {
        self.inner.rating = rating;
        self
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.inner.stage = stage;
        self
    }

    pub fn tags(mut self, tags: BTreeSet<Tag>) -> Self {
        self.inner.tags = tags;
        self
    }

    pub fn build(self) -> Candidate {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_normalizes_case_and_whitespace_for_identity() {
        let lower = Name::new("john   smith").unwrap();
        let spaced = Name::new("  John Smith ").unwrap();
        assert_eq!(lower, spaced);
        assert_eq!(lower.canonical(), "john smith");
        assert_eq!(lower.display(), "John Smith");
    }

    #[test]
    fn name_title_cases_after_separators() {
        let name = Name::new("mary-jane o'neil d/o watson").unwrap();
        assert_eq!(name.display(), "Mary-Jane O'Neil D/O Watson");
    }

    #[test]
    fn name_rejects_blank_and_leading_whitespace_only() {
        assert!(Name::new("").is_err());
        assert!(Name::new("   ").is_err());
        assert!(Name::new("^caret").is_err());
    }

    #[test]
    fn phone_requires_at_least_three_digits() {
        assert!(Phone::new("91").is_err());
        assert!(Phone::new("911").is_ok());
        assert!(Phone::new("9312 1534").is_err());
    }

    #[test]
    fn email_accepts_plain_and_rejects_missing_domain() {
        assert!(Email::new("amy@example.com").is_ok());
        assert!(Email::new("a+b_c@mail-server.org").is_ok());
        assert!(Email::new("no-at-sign").is_err());
        assert!(Email::new("trailing.@example.com").is_err());
        assert!(Email::new("amy@x").is_err());
    }

    #[test]
    fn address_rejects_blank() {
        assert!(Address::new(" ").is_err());
        assert!(Address::new("Blk 45 Aljunied Street 85, #11-31").is_ok());
    }

    #[test]
    fn rating_parses_display_and_underscore_names() {
        assert_eq!(Rating::parse("very poor").unwrap(), Rating::VeryPoor);
        assert_eq!(Rating::parse("VERY_POOR").unwrap(), Rating::VeryPoor);
        assert_eq!(Rating::parse(" Excellent ").unwrap(), Rating::Excellent);
        assert!(Rating::parse("amazing").is_err());
        assert!(Rating::parse("").is_err());
    }

    #[test]
    fn rating_ranks_follow_declaration_order() {
        assert_eq!(Rating::Unrated.rank(), 0);
        assert_eq!(Rating::Excellent.rank(), 5);
        assert!(Rating::Good > Rating::Poor);
    }

    #[test]
    fn stage_parses_case_insensitively() {
        assert_eq!(Stage::parse("candidates").unwrap(), Stage::Candidates);
        assert_eq!(Stage::parse("HIRED").unwrap(), Stage::Hired);
        assert!(Stage::parse("archived").is_err());
    }

    #[test]
    fn edit_threads_untouched_fields_through() {
        let candidate = Candidate::new(
            Name::new("Alex Yeoh").unwrap(),
            Phone::new("87438807").unwrap(),
            Email::new("alexyeoh@example.com").unwrap(),
            Address::new("Blk 30 Geylang Street 29").unwrap(),
            BTreeSet::new(),
            DateAdded::from_epoch_ms(1_700_000_000_000),
            Rating::Unrated,
            Stage::Candidates,
        );

        let moved = candidate.edit().stage(Stage::Contacted).build();
        assert_eq!(moved.stage(), Stage::Contacted);
        assert_eq!(moved.name(), candidate.name());
        assert_eq!(moved.phone(), candidate.phone());
        assert_eq!(moved.email(), candidate.email());
        assert_eq!(moved.address(), candidate.address());
        assert_eq!(moved.rating(), candidate.rating());
        assert_eq!(moved.date_added(), candidate.date_added());
        assert_eq!(moved.tags(), candidate.tags());
    }
}
