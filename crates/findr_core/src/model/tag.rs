//! Tag domain model.
//!
//! # Responsibility
//! - Define the immutable tag value shared through the catalogue.
//! - Validate name, category, colour and description at construction.
//!
//! # Invariants
//! - Tag identity is the case-insensitive name; `isSame` never looks at the
//!   other attributes.
//! - Colour codes are normalized to upper-case `#RRGGBB` on construction.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

static TAG_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid tag name regex"));
static CATEGORY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][ A-Za-z0-9]*$").expect("valid category regex"));
static COLOUR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid colour regex"));

/// Field-level construction failure for tag values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    /// Name is empty or contains non-alphanumeric characters.
    InvalidName,
    /// Category does not start with an alphanumeric character.
    InvalidCategory,
    /// Colour is not a `#RRGGBB` hex code.
    InvalidColour,
    /// Description exceeds the length cap.
    InvalidDescription,
}

impl Display for TagValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(
                f,
                "tag names must contain only letters and digits, without spaces or special \
                 characters"
            ),
            Self::InvalidCategory => write!(
                f,
                "tag categories should start with an alphanumeric character and may contain spaces"
            ),
            Self::InvalidColour => {
                write!(f, "tag colours should be valid hex codes (e.g. #A1B2C3)")
            }
            Self::InvalidDescription => write!(
                f,
                "tag descriptions should be {} characters or fewer",
                Tag::DESCRIPTION_MAX_LEN
            ),
        }
    }
}

impl Error for TagValidationError {}

/// One catalogued tag. Identity is the case-insensitive name; the remaining
/// attributes are display data owned by the catalogue entry.
#[derive(Debug, Clone)]
pub struct Tag {
    name: String,
    category: String,
    colour: String,
    description: String,
}

impl Tag {
    pub const DEFAULT_CATEGORY: &'static str = "General";
    pub const DEFAULT_COLOUR: &'static str = "#7A7A7A";
    pub const DESCRIPTION_MAX_LEN: usize = 200;

    /// Builds a tag with full attributes.
    pub fn new(
        name: &str,
        category: &str,
        colour: &str,
        description: &str,
    ) -> Result<Self, TagValidationError> {
        let name = name.trim();
        let category = category.trim();
        let colour = colour.trim();
        let description = description.trim();
        if !TAG_NAME_RE.is_match(name) {
            return Err(TagValidationError::InvalidName);
        }
        if !CATEGORY_RE.is_match(category) {
            return Err(TagValidationError::InvalidCategory);
        }
        if !COLOUR_RE.is_match(colour) {
            return Err(TagValidationError::InvalidColour);
        }
        if description.chars().count() > Self::DESCRIPTION_MAX_LEN {
            return Err(TagValidationError::InvalidDescription);
        }
        Ok(Self {
            name: name.to_string(),
            category: category.to_string(),
            colour: colour.to_ascii_uppercase(),
            description: description.to_string(),
        })
    }

    /// Builds a tag carrying the default attributes, as auto-created tags do.
    pub fn named(name: &str) -> Result<Self, TagValidationError> {
        Self::new(name, Self::DEFAULT_CATEGORY, Self::DEFAULT_COLOUR, "")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn colour(&self) -> &str {
        &self.colour
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Lowercased identity key.
    pub fn canonical_name(&self) -> String {
        self.name.to_ascii_lowercase()
    }

    /// Identity equality: names match case-insensitively.
    pub fn is_same_tag(&self, other: &Tag) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.name)
    }
}

// Value equality: case-insensitive name plus exact remaining attributes.
impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.category == other.category
            && self.colour == other.colour
            && self.description == other.description
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_name().hash(state);
        self.category.hash(state);
        self.colour.hash(state);
        self.description.hash(state);
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_name()
            .cmp(&other.canonical_name())
            .then_with(|| self.category.cmp(&other.category))
            .then_with(|| self.colour.cmp(&other.colour))
            .then_with(|| self.description.cmp(&other.description))
    }
}
