//! Line parser for the command box syntax.
//!
//! # Responsibility
//! - Split a raw input line into a command word and prefixed arguments.
//! - Produce typed command requests; field values are validated here so the
//!   executor only ever sees well-formed model values.
//!
//! # Invariants
//! - A prefix only counts when it starts the line or follows whitespace, so
//!   values may contain `/` freely.

use findr_core::{
    Address, EditCandidateDescriptor, EditTagDescriptor, Email, Name, Phone, Rating, SortKey,
    Stage, Tag,
};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const PREFIX_NAME: &str = "n/";
pub const PREFIX_PHONE: &str = "p/";
pub const PREFIX_EMAIL: &str = "e/";
pub const PREFIX_ADDRESS: &str = "a/";
pub const PREFIX_TAG: &str = "t/";
pub const PREFIX_FROM: &str = "from/";
pub const PREFIX_FROM_SHORT: &str = "f/";
pub const PREFIX_TO: &str = "to/";
pub const PREFIX_RATE: &str = "r/";
pub const PREFIX_TAG_NAME: &str = "tn/";
pub const PREFIX_TAG_CATEGORY: &str = "tc/";
pub const PREFIX_TAG_COLOUR: &str = "tcol/";
pub const PREFIX_TAG_DESCRIPTION: &str = "td/";
pub const PREFIX_NEW_TAG_NAME: &str = "nn/";

pub const USAGE_ADD: &str = "add: Adds a candidate to the board.\n\
    Parameters: n/NAME p/PHONE e/EMAIL a/ADDRESS [t/TAG]...\n\
    Example: add n/John Doe p/98765432 e/johnd@example.com a/311, Clementi Ave 2 t/backend";
pub const USAGE_EDIT: &str = "edit: Edits the candidate identified by the index number.\n\
    Parameters: INDEX [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [t/TAG]...\n\
    Example: edit 1 p/91234567 e/johndoe@example.com";
pub const USAGE_DELETE: &str = "delete: Deletes the candidate identified by the index number in \
    the specified stage.\n\
    Parameters: INDEX from/STAGE\n\
    Stages: Candidates, Contacted, Interviewed, Hired (case-insensitive)\n\
    Example: delete 1 from/contacted";
pub const USAGE_MOVE: &str = "move: Moves the candidate identified by the index number from one \
    stage to another.\n\
    Parameters: INDEX from/CURRENT_STAGE to/NEW_STAGE\n\
    Stages: Candidates, Contacted, Interviewed, Hired (case-insensitive)\n\
    Example: move 1 from/Candidates to/Contacted";
pub const USAGE_RATE: &str = "rate: Edits the rating of the candidate in the specified stage \
    column.\n\
    Parameters: INDEX from/STAGE r/RATING\n\
    Ratings: Unrated, Very Poor, Poor, Average, Good, Excellent (case-insensitive)\n\
    Example: rate 1 f/Candidates r/Excellent";
pub const USAGE_CLEAR: &str = "clear: Clears all candidates from the specified stage.\n\
    Use `clear all` to clear every stage.\n\
    Parameters: STAGE (candidates, contacted, interviewed, hired) or `all`\n\
    Example: clear candidates";
pub const USAGE_FIND: &str = "find: Finds candidates whose names contain any of the given \
    keywords as whole words.\n\
    Parameters: KEYWORD [MORE_KEYWORDS]...\n\
    Example: find alice bob charlie";
pub const USAGE_SORT: &str = "sort: Sorts the displayed candidate list.\n\
    Parameters: CRITERIA (alphabetical, rating)\n\
    Example: sort alphabetical";
pub const USAGE_TAG_ADD: &str = "tagadd: Adds a tag to the tag list.\n\
    Parameters: tn/TAG_NAME [tc/CATEGORY] [tcol/COLOUR] [td/DESCRIPTION]\n\
    Example: tagadd tn/backend tc/Engineering tcol/#1F75FE td/Backend specialist";
pub const USAGE_TAG_EDIT: &str = "tagedit: Edits the tag identified by its name; given fields \
    overwrite current values.\n\
    Parameters: tn/TAG_NAME [nn/NEW_NAME] [tc/CATEGORY] [tcol/COLOUR] [td/DESCRIPTION]\n\
    Example: tagedit tn/backend tc/Engineering";
pub const USAGE_TAG_DELETE: &str = "tagdelete: Deletes the tag identified by its name.\n\
    Parameters: tn/TAG_NAME\n\
    Example: tagdelete tn/backend";

const MESSAGE_INVALID_INDEX: &str = "Index is not a non-zero unsigned integer.";

/// Parse failure for one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    InvalidFormat { usage: &'static str },
    InvalidValue(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(word) => {
                write!(f, "Unknown command: {word}. Type `help` for the command list.")
            }
            Self::InvalidFormat { usage } => write!(f, "Invalid command format!\n{usage}"),
            Self::InvalidValue(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ParseError {}

/// One fully parsed command, ready to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandRequest {
    Add {
        name: Name,
        phone: Phone,
        email: Email,
        address: Address,
        tags: BTreeSet<Tag>,
    },
    Edit {
        index: usize,
        descriptor: EditCandidateDescriptor,
    },
    Delete {
        index: usize,
        stage: Stage,
    },
    Move {
        index: usize,
        from: Stage,
        to: Stage,
    },
    Rate {
        index: usize,
        stage: Stage,
        rating: Rating,
    },
    ClearStage(Stage),
    ClearAll,
    Find {
        keywords: Vec<String>,
    },
    List,
    Sort(SortKey),
    TagAdd(Tag),
    TagEdit {
        target: String,
        descriptor: EditTagDescriptor,
    },
    TagDelete {
        target: String,
    },
    TagList,
    History,
    Help,
    Exit,
}

/// Parses one input line into a command request.
pub fn parse_command(line: &str) -> Result<CommandRequest, ParseError> {
    let trimmed = line.trim();
    let (word, args) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "add" => parse_add(args),
        "edit" => parse_edit(args),
        "delete" => parse_delete(args),
        "move" => parse_move(args),
        "rate" => parse_rate(args),
        "clear" => parse_clear(args),
        "find" => parse_find(args),
        "list" => Ok(CommandRequest::List),
        "sort" => parse_sort(args),
        "tagadd" => parse_tag_add(args),
        "tagedit" => parse_tag_edit(args),
        "tagdelete" => parse_tag_delete(args),
        "taglist" => Ok(CommandRequest::TagList),
        "history" => Ok(CommandRequest::History),
        "help" => Ok(CommandRequest::Help),
        "exit" => Ok(CommandRequest::Exit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_add(args: &str) -> Result<CommandRequest, ParseError> {
    let tokens = tokenize(
        args,
        &[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS, PREFIX_TAG],
    );
    if !tokens.preamble().is_empty() {
        return Err(ParseError::InvalidFormat { usage: USAGE_ADD });
    }
    let name = tokens.required(PREFIX_NAME, USAGE_ADD)?;
    let phone = tokens.required(PREFIX_PHONE, USAGE_ADD)?;
    let email = tokens.required(PREFIX_EMAIL, USAGE_ADD)?;
    let address = tokens.required(PREFIX_ADDRESS, USAGE_ADD)?;

    Ok(CommandRequest::Add {
        name: Name::new(name).map_err(invalid_value)?,
        phone: Phone::new(phone).map_err(invalid_value)?,
        email: Email::new(email).map_err(invalid_value)?,
        address: Address::new(address).map_err(invalid_value)?,
        tags: parse_tag_set(tokens.all(PREFIX_TAG))?,
    })
}

fn parse_edit(args: &str) -> Result<CommandRequest, ParseError> {
    let tokens = tokenize(
        args,
        &[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS, PREFIX_TAG],
    );
    let index = parse_index(tokens.preamble(), USAGE_EDIT)?;

    let mut descriptor = EditCandidateDescriptor::default();
    if let Some(name) = tokens.optional(PREFIX_NAME)? {
        descriptor.name = Some(Name::new(name).map_err(invalid_value)?);
    }
    if let Some(phone) = tokens.optional(PREFIX_PHONE)? {
        descriptor.phone = Some(Phone::new(phone).map_err(invalid_value)?);
    }
    if let Some(email) = tokens.optional(PREFIX_EMAIL)? {
        descriptor.email = Some(Email::new(email).map_err(invalid_value)?);
    }
    if let Some(address) = tokens.optional(PREFIX_ADDRESS)? {
        descriptor.address = Some(Address::new(address).map_err(invalid_value)?);
    }
    let tag_values = tokens.all(PREFIX_TAG);
    if !tag_values.is_empty() {
        // A single empty `t/` clears the tag set, as in `edit 1 t/`.
        if tag_values.len() == 1 && tag_values[0].is_empty() {
            descriptor.tags = Some(BTreeSet::new());
        } else {
            descriptor.tags = Some(parse_tag_set(tag_values)?);
        }
    }

    Ok(CommandRequest::Edit { index, descriptor })
}

fn parse_delete(args: &str) -> Result<CommandRequest, ParseError> {
    let tokens = tokenize(args, &[PREFIX_FROM]);
    let index = parse_index(tokens.preamble(), USAGE_DELETE)?;
    let stage = tokens.required(PREFIX_FROM, USAGE_DELETE)?;
    Ok(CommandRequest::Delete {
        index,
        stage: Stage::parse(stage).map_err(invalid_value)?,
    })
}

fn parse_move(args: &str) -> Result<CommandRequest, ParseError> {
    let tokens = tokenize(args, &[PREFIX_FROM, PREFIX_TO]);
    let index = parse_index(tokens.preamble(), USAGE_MOVE)?;
    let from = tokens.required(PREFIX_FROM, USAGE_MOVE)?;
    let to = tokens.required(PREFIX_TO, USAGE_MOVE)?;
    Ok(CommandRequest::Move {
        index,
        from: Stage::parse(from).map_err(invalid_value)?,
        to: Stage::parse(to).map_err(invalid_value)?,
    })
}

fn parse_rate(args: &str) -> Result<CommandRequest, ParseError> {
    let tokens = tokenize(args, &[PREFIX_FROM, PREFIX_FROM_SHORT, PREFIX_RATE]);
    let index = parse_index(tokens.preamble(), USAGE_RATE)?;
    let stage = match (
        tokens.optional(PREFIX_FROM)?,
        tokens.optional(PREFIX_FROM_SHORT)?,
    ) {
        (Some(stage), None) | (None, Some(stage)) => stage,
        _ => return Err(ParseError::InvalidFormat { usage: USAGE_RATE }),
    };
    let rating = tokens.required(PREFIX_RATE, USAGE_RATE)?;
    Ok(CommandRequest::Rate {
        index,
        stage: Stage::parse(stage).map_err(invalid_value)?,
        rating: Rating::parse(rating).map_err(invalid_value)?,
    })
}

fn parse_clear(args: &str) -> Result<CommandRequest, ParseError> {
    let target = args.trim();
    if target.is_empty() {
        return Err(ParseError::InvalidFormat { usage: USAGE_CLEAR });
    }
    if target.eq_ignore_ascii_case("all") {
        return Ok(CommandRequest::ClearAll);
    }
    Ok(CommandRequest::ClearStage(
        Stage::parse(target).map_err(invalid_value)?,
    ))
}

fn parse_find(args: &str) -> Result<CommandRequest, ParseError> {
    let keywords: Vec<String> = args.split_whitespace().map(str::to_string).collect();
    if keywords.is_empty() {
        return Err(ParseError::InvalidFormat { usage: USAGE_FIND });
    }
    Ok(CommandRequest::Find { keywords })
}

fn parse_sort(args: &str) -> Result<CommandRequest, ParseError> {
    match SortKey::parse(args) {
        Some(key) => Ok(CommandRequest::Sort(key)),
        None => Err(ParseError::InvalidFormat { usage: USAGE_SORT }),
    }
}

fn parse_tag_add(args: &str) -> Result<CommandRequest, ParseError> {
    let tokens = tokenize(
        args,
        &[PREFIX_TAG_NAME, PREFIX_TAG_CATEGORY, PREFIX_TAG_COLOUR, PREFIX_TAG_DESCRIPTION],
    );
    let name = tokens.required(PREFIX_TAG_NAME, USAGE_TAG_ADD)?;
    let tag = Tag::new(
        name,
        tokens.optional(PREFIX_TAG_CATEGORY)?.unwrap_or(Tag::DEFAULT_CATEGORY),
        tokens.optional(PREFIX_TAG_COLOUR)?.unwrap_or(Tag::DEFAULT_COLOUR),
        tokens.optional(PREFIX_TAG_DESCRIPTION)?.unwrap_or(""),
    )
    .map_err(invalid_value)?;
    Ok(CommandRequest::TagAdd(tag))
}

fn parse_tag_edit(args: &str) -> Result<CommandRequest, ParseError> {
    let tokens = tokenize(
        args,
        &[
            PREFIX_TAG_NAME,
            PREFIX_NEW_TAG_NAME,
            PREFIX_TAG_CATEGORY,
            PREFIX_TAG_COLOUR,
            PREFIX_TAG_DESCRIPTION,
        ],
    );
    let target = tokens.required(PREFIX_TAG_NAME, USAGE_TAG_EDIT)?.to_string();
    let descriptor = EditTagDescriptor {
        name: tokens.optional(PREFIX_NEW_TAG_NAME)?.map(str::to_string),
        category: tokens.optional(PREFIX_TAG_CATEGORY)?.map(str::to_string),
        colour: tokens.optional(PREFIX_TAG_COLOUR)?.map(str::to_string),
        description: tokens.optional(PREFIX_TAG_DESCRIPTION)?.map(str::to_string),
    };
    Ok(CommandRequest::TagEdit { target, descriptor })
}

fn parse_tag_delete(args: &str) -> Result<CommandRequest, ParseError> {
    let tokens = tokenize(args, &[PREFIX_TAG_NAME]);
    let target = tokens.required(PREFIX_TAG_NAME, USAGE_TAG_DELETE)?.to_string();
    Ok(CommandRequest::TagDelete { target })
}

fn parse_tag_set(values: Vec<&str>) -> Result<BTreeSet<Tag>, ParseError> {
    let mut tags = BTreeSet::new();
    for value in values {
        tags.insert(Tag::named(value).map_err(invalid_value)?);
    }
    Ok(tags)
}

fn parse_index(value: &str, usage: &'static str) -> Result<usize, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    match trimmed.parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(ParseError::InvalidValue(MESSAGE_INVALID_INDEX.to_string())),
    }
}

fn invalid_value(err: impl Display) -> ParseError {
    ParseError::InvalidValue(err.to_string())
}

/// Arguments split at prefix boundaries.
struct ArgTokens {
    preamble: String,
    values: Vec<(&'static str, String)>,
}

impl ArgTokens {
    fn preamble(&self) -> &str {
        &self.preamble
    }

    /// All values for a repeatable prefix, in input order.
    fn all(&self, prefix: &str) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(p, _)| *p == prefix)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// At most one value; a repeated single-value prefix is a format error.
    fn optional(&self, prefix: &'static str) -> Result<Option<&str>, ParseError> {
        let values = self.all(prefix);
        match values.len() {
            0 => Ok(None),
            1 => Ok(Some(values[0])),
            _ => Err(ParseError::InvalidValue(format!(
                "Multiple values specified for the single-valued field {prefix}"
            ))),
        }
    }

    fn required(&self, prefix: &'static str, usage: &'static str) -> Result<&str, ParseError> {
        self.optional(prefix)?
            .ok_or(ParseError::InvalidFormat { usage })
    }
}

/// Splits `args` on every occurrence of the given prefixes that starts the
/// string or follows whitespace. Text before the first prefix is the
/// preamble; each value runs until the next prefix.
fn tokenize(args: &str, prefixes: &[&'static str]) -> ArgTokens {
    let mut positions: Vec<(usize, &'static str)> = Vec::new();
    for &prefix in prefixes {
        let mut search_from = 0;
        while let Some(found) = args[search_from..].find(prefix) {
            let at = search_from + found;
            let at_boundary = at == 0
                || args[..at]
                    .chars()
                    .next_back()
                    .is_some_and(char::is_whitespace);
            if at_boundary {
                positions.push((at, prefix));
            }
            search_from = at + prefix.len();
        }
    }
    positions.sort_by_key(|(at, _)| *at);

    let preamble_end = positions.first().map_or(args.len(), |(at, _)| *at);
    let mut tokens = ArgTokens {
        preamble: args[..preamble_end].trim().to_string(),
        values: Vec::new(),
    };
    for (i, (at, prefix)) in positions.iter().enumerate() {
        let value_start = at + prefix.len();
        let value_end = positions.get(i + 1).map_or(args.len(), |(next, _)| *next);
        tokens
            .values
            .push((prefix, args[value_start..value_end].trim().to_string()));
    }
    tokens
}
