//! Command execution and message rendering.
//!
//! # Responsibility
//! - Run parsed requests against the core services.
//! - Turn every outcome, success or failure, into a user-facing message;
//!   no failure reaches the process boundary.

use crate::parser::CommandRequest;
use findr_core::{
    name_matches_keywords, sorted, stage_candidates, BoardService, Candidate, CandidateRegistry,
    CatalogueService, CommandError, DateAdded, NewCandidate, RegistryError, RosterService,
    SearchHistory, Selection, SortKey, Stage, Tag,
};
use std::fmt::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};

const MESSAGE_TAG_NOT_FOUND_PROMPT: &str = "Would you like to create this tag first?";
const MESSAGE_TAG_NOT_FOUND: &str = "This tag does not exist in the tag list.";
const MESSAGE_DUPLICATE_TAG: &str = "This tag already exists in the tag list.";
const MESSAGE_DUPLICATE_CANDIDATE: &str =
    "This candidate already exists in the candidate list.";
const MESSAGE_INVALID_INDEX: &str = "The candidate index provided is invalid.";
const MESSAGE_SAME_STAGE: &str = "The candidate is already in this stage.";
const MESSAGE_NOT_EDITED: &str = "At least one field to edit must be provided.";

const HELP_TEXT: &str = "Commands:\n\
    add n/NAME p/PHONE e/EMAIL a/ADDRESS [t/TAG]...\n\
    edit INDEX [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [t/TAG]...\n\
    delete INDEX from/STAGE\n\
    move INDEX from/CURRENT_STAGE to/NEW_STAGE\n\
    rate INDEX from/STAGE r/RATING\n\
    clear STAGE | clear all\n\
    find KEYWORD [MORE_KEYWORDS]...\n\
    list | sort CRITERIA | history\n\
    tagadd tn/NAME [tc/CATEGORY] [tcol/COLOUR] [td/DESCRIPTION]\n\
    tagedit tn/NAME [nn/NEW_NAME] [tc/CATEGORY] [tcol/COLOUR] [td/DESCRIPTION]\n\
    tagdelete tn/NAME | taglist\n\
    help | exit";

/// Result of one executed command line.
pub struct Outcome {
    pub message: String,
    pub mutated: bool,
    pub exit: bool,
}

impl Outcome {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            mutated: false,
            exit: false,
        }
    }

    fn mutation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            mutated: true,
            exit: false,
        }
    }
}

/// Executes one request; every core failure comes back as a message.
pub fn execute(
    registry: &mut CandidateRegistry,
    history: &mut SearchHistory,
    request: CommandRequest,
) -> Outcome {
    match request {
        CommandRequest::Add {
            name,
            phone,
            email,
            address,
            tags,
        } => {
            let request = NewCandidate {
                name,
                phone,
                email,
                address,
                tags,
                date_added: now(),
            };
            match RosterService::new(registry).add(request) {
                Ok(candidate) => {
                    Outcome::mutation(format!("New candidate added: {}", format_candidate(&candidate)))
                }
                Err(err) => Outcome::message(render_roster_error(err)),
            }
        }
        CommandRequest::Edit { index, descriptor } => {
            match RosterService::new(registry).edit(Selection::in_list(index), descriptor) {
                Ok(candidate) => {
                    Outcome::mutation(format!("Edited candidate: {}", format_candidate(&candidate)))
                }
                Err(err) => Outcome::message(render_roster_error(err)),
            }
        }
        CommandRequest::Delete { index, stage } => {
            match BoardService::new(registry).delete(index, stage) {
                Ok(candidate) => {
                    Outcome::mutation(format!("Deleted candidate: {}", format_candidate(&candidate)))
                }
                Err(err) => Outcome::message(render_error(err)),
            }
        }
        CommandRequest::Move { index, from, to } => {
            match BoardService::new(registry).move_candidate(index, from, to) {
                Ok(candidate) => Outcome::mutation(format!(
                    "Moved candidate from {from} to {to}: {}",
                    format_candidate(&candidate)
                )),
                Err(err) => Outcome::message(render_error(err)),
            }
        }
        CommandRequest::Rate {
            index,
            stage,
            rating,
        } => match BoardService::new(registry).rate(index, stage, rating) {
            Ok(candidate) => Outcome::mutation(format!(
                "Rating for {}: {rating}",
                candidate.name().display()
            )),
            Err(err) => Outcome::message(render_error(err)),
        },
        CommandRequest::ClearStage(stage) => {
            match BoardService::new(registry).clear_stage(stage) {
                Ok(_) => {
                    Outcome::mutation(format!("All candidates from {stage} have been cleared!"))
                }
                Err(err) => Outcome::message(render_error(err)),
            }
        }
        CommandRequest::ClearAll => {
            BoardService::new(registry).clear_all();
            Outcome::mutation("All candidates have been cleared!")
        }
        CommandRequest::Find { keywords } => {
            history.record(&keywords.join(" "));
            let matches: Vec<&Candidate> = registry
                .candidates()
                .iter()
                .filter(|c| name_matches_keywords(c, &keywords))
                .collect();
            let mut message = format!("{} candidates listed!", matches.len());
            for candidate in matches {
                let _ = write!(message, "\n  {}", format_candidate(candidate));
            }
            // Recording the query mutates the saved history even though the
            // board is untouched.
            Outcome::mutation(message)
        }
        CommandRequest::List => Outcome::message(render_board(registry.candidates())),
        CommandRequest::Sort(key) => {
            let mut message = String::from(match key {
                SortKey::Alphabetical => "Sorted all candidates alphabetically",
                SortKey::Rating => "Sorted all candidates by rating",
            });
            for candidate in sorted(registry.candidates(), key) {
                let _ = write!(message, "\n  {}", format_candidate(candidate));
            }
            Outcome::message(message)
        }
        CommandRequest::TagAdd(tag) => {
            let name = tag.name().to_string();
            match CatalogueService::new(registry).add_tag(tag) {
                Ok(()) => Outcome::mutation(format!("New tag added: {name}")),
                Err(err) => Outcome::message(render_tag_error(err)),
            }
        }
        CommandRequest::TagEdit { target, descriptor } => {
            match CatalogueService::new(registry).edit_tag(&target, descriptor) {
                Ok(tag) => Outcome::mutation(format!("Edited tag: {}", tag.name())),
                Err(err) => Outcome::message(render_tag_error(err)),
            }
        }
        CommandRequest::TagDelete { target } => {
            match CatalogueService::new(registry).delete_tag(&target) {
                Ok(tag) => Outcome::mutation(format!("Deleted tag: {}", tag.name())),
                Err(err) => Outcome::message(render_tag_error(err)),
            }
        }
        CommandRequest::TagList => {
            let tags = registry.tags();
            if tags.is_empty() {
                return Outcome::message("No tags in the tag list.");
            }
            let mut message = format!("{} tags listed!", tags.len());
            for tag in tags {
                let _ = write!(message, "\n  {}", format_tag(tag));
            }
            Outcome::message(message)
        }
        CommandRequest::History => {
            if history.entries().is_empty() {
                return Outcome::message("No past searches.");
            }
            let mut message = String::from("Past searches, most recent first:");
            for entry in history.entries() {
                let _ = write!(message, "\n  {entry}");
            }
            Outcome::message(message)
        }
        CommandRequest::Help => Outcome::message(HELP_TEXT),
        CommandRequest::Exit => Outcome {
            message: "Exiting Findr. Goodbye!".to_string(),
            mutated: false,
            exit: true,
        },
    }
}

fn now() -> DateAdded {
    let epoch_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);
    DateAdded::from_epoch_ms(epoch_ms)
}

/// Renders the four stage columns with stage-scoped 1-based indices.
pub fn render_board(candidates: &[Candidate]) -> String {
    let mut board = String::new();
    for stage in Stage::ALL {
        let column = stage_candidates(candidates, stage);
        let _ = write!(board, "{} ({})", stage.display_name(), column.len());
        for (i, candidate) in column.iter().enumerate() {
            let _ = write!(board, "\n  {}. {}", i + 1, format_candidate(candidate));
        }
        if stage != Stage::Hired {
            board.push('\n');
        }
    }
    board
}

fn format_candidate(candidate: &Candidate) -> String {
    let mut line = format!(
        "{}; Phone: {}; Email: {}; Address: {}; Rating: {}",
        candidate.name().display(),
        candidate.phone(),
        candidate.email(),
        candidate.address(),
        candidate.rating()
    );
    if !candidate.tags().is_empty() {
        let tags: Vec<String> = candidate.tags().iter().map(Tag::to_string).collect();
        let _ = write!(line, "; Tags: {}", tags.join(""));
    }
    line
}

fn format_tag(tag: &Tag) -> String {
    let mut line = format!("{} ({}, {})", tag.name(), tag.category(), tag.colour());
    if !tag.description().is_empty() {
        let _ = write!(line, " - {}", tag.description());
    }
    line
}

// Shared renderings for failures whose message does not depend on the
// command that raised them.
fn render_error(err: CommandError) -> String {
    match err {
        CommandError::Registry(RegistryError::DuplicateCandidate(_)) => {
            MESSAGE_DUPLICATE_CANDIDATE.to_string()
        }
        CommandError::Registry(RegistryError::DuplicateTag(_)) => MESSAGE_DUPLICATE_TAG.to_string(),
        CommandError::InvalidIndex { .. } => MESSAGE_INVALID_INDEX.to_string(),
        CommandError::InvalidIndexForStage { stage, .. } => {
            format!("Invalid index for stage {stage}.")
        }
        CommandError::WrongCurrentStage { actual } => format!(
            "The candidate is not in the specified current stage. Current stage: {actual}"
        ),
        CommandError::SameStage(_) => MESSAGE_SAME_STAGE.to_string(),
        CommandError::NothingToEdit => MESSAGE_NOT_EDITED.to_string(),
        other => capitalize(&other.to_string()),
    }
}

// Roster commands surface a missing tag as an invitation to create it.
fn render_roster_error(err: CommandError) -> String {
    match err {
        CommandError::Registry(RegistryError::TagNotFound(_)) => {
            MESSAGE_TAG_NOT_FOUND_PROMPT.to_string()
        }
        other => render_error(other),
    }
}

// Tag commands address catalogue entries directly, so a missing tag is
// simply absent.
fn render_tag_error(err: CommandError) -> String {
    match err {
        CommandError::Registry(RegistryError::TagNotFound(_)) => MESSAGE_TAG_NOT_FOUND.to_string(),
        other => render_error(other),
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_command, USAGE_ADD};
    use findr_core::sample_registry;

    fn run(registry: &mut CandidateRegistry, history: &mut SearchHistory, line: &str) -> Outcome {
        execute(registry, history, parse_command(line).unwrap())
    }

    #[test]
    fn add_then_move_then_rate_flows_through_the_services() {
        let mut registry = CandidateRegistry::new();
        let mut history = SearchHistory::new();

        let added = run(
            &mut registry,
            &mut history,
            "add n/John Doe p/98765432 e/johnd@example.com a/311, Clementi Ave 2",
        );
        assert!(added.mutated);
        assert!(added.message.starts_with("New candidate added: John Doe"));

        let moved = run(
            &mut registry,
            &mut history,
            "move 1 from/Candidates to/Contacted",
        );
        assert!(moved.message.contains("Moved candidate from Candidates to Contacted"));

        let rated = run(&mut registry, &mut history, "rate 1 f/Contacted r/Good");
        assert_eq!(rated.message, "Rating for John Doe: Good");
    }

    #[test]
    fn adding_with_an_unknown_tag_prompts_for_creation() {
        let mut registry = CandidateRegistry::new();
        let mut history = SearchHistory::new();

        let outcome = run(
            &mut registry,
            &mut history,
            "add n/Jane p/98765432 e/jane@example.com a/1 Main St t/frontend",
        );
        assert!(!outcome.mutated);
        assert_eq!(outcome.message, MESSAGE_TAG_NOT_FOUND_PROMPT);
    }

    #[test]
    fn find_records_history_and_lists_matches() {
        let mut registry = sample_registry();
        let mut history = SearchHistory::new();

        let outcome = run(&mut registry, &mut history, "find bernice alex");
        assert!(outcome.message.starts_with("2 candidates listed!"));
        assert_eq!(history.entries(), ["bernice alex"]);
    }

    #[test]
    fn board_indices_are_stage_scoped() {
        let registry = sample_registry();
        let board = render_board(registry.candidates());
        assert!(board.contains("Candidates (1)"));
        assert!(board.contains("Contacted (1)"));
        assert!(board.contains("  1. Bernice Yu"));
    }

    #[test]
    fn usage_is_shown_for_malformed_add() {
        let err = parse_command("add John Doe").unwrap_err();
        assert!(err.to_string().contains(USAGE_ADD));
    }
}
