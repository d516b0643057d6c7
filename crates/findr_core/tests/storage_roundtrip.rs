use findr_core::{
    load_registry, load_search_history, save_registry, save_search_history, Address, Candidate,
    CandidateRegistry, DateAdded, Email, Name, Phone, Rating, SearchHistory, Stage, StorageError,
    Tag,
};
use std::collections::BTreeSet;

fn candidate(name: &str, stage: Stage, rating: Rating, tags: &[Tag]) -> Candidate {
    Candidate::new(
        Name::new(name).unwrap(),
        Phone::new("94824271").unwrap(),
        Email::new("anna@example.com").unwrap(),
        Address::new("4th street").unwrap(),
        tags.iter().cloned().collect::<BTreeSet<_>>(),
        DateAdded::from_epoch_ms(1_722_470_400_000),
        rating,
        stage,
    )
}

fn roundtrip(registry: &CandidateRegistry) -> CandidateRegistry {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("findr.json");
    save_registry(&path, registry).unwrap();
    load_registry(&path).unwrap().expect("file was just written")
}

#[test]
fn empty_registry_round_trips() {
    let registry = CandidateRegistry::new();
    assert_eq!(roundtrip(&registry), registry);
}

#[test]
fn single_candidate_without_tags_round_trips() {
    let mut registry = CandidateRegistry::new();
    registry
        .add_candidate(candidate("Amy Bee", Stage::Interviewed, Rating::Good, &[]))
        .unwrap();
    assert_eq!(roundtrip(&registry), registry);
}

#[test]
fn shared_tag_edited_after_assignment_round_trips() {
    let mut registry = CandidateRegistry::new();
    let shared = Tag::named("shared").unwrap();
    registry
        .add_candidate(candidate(
            "Amy Bee",
            Stage::Candidates,
            Rating::Unrated,
            &[shared.clone()],
        ))
        .unwrap();
    registry
        .add_candidate(candidate(
            "Bob Choo",
            Stage::Hired,
            Rating::Excellent,
            &[shared.clone()],
        ))
        .unwrap();
    registry
        .set_tag(
            &shared,
            Tag::new("shared", "Priority", "#D0342C", "rewritten after assignment").unwrap(),
        )
        .unwrap();

    let reloaded = roundtrip(&registry);
    assert_eq!(reloaded, registry);

    // Both reloaded holders point at the edited catalogue entry.
    let canonical = reloaded.tags()[0].clone();
    assert_eq!(canonical.category(), "Priority");
    for held in reloaded.candidates() {
        assert_eq!(held.tags().iter().next().unwrap(), &canonical);
    }
}

#[test]
fn missing_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_registry(dir.path().join("absent.json")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn malformed_file_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("findr.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_registry(&path).unwrap_err();
    assert!(matches!(err, StorageError::Json(_)));
}

#[test]
fn duplicate_candidates_in_the_file_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("findr.json");
    let entry = r#"{
        "name": "Amy Bee", "phone": "94824271", "email": "anna@example.com",
        "address": "4th street", "date_added_ms": 0,
        "rating": "unrated", "stage": "candidates", "tags": []
    }"#;
    let doc = format!(
        r#"{{ "candidates": [{entry}, {entry}], "tags": [] }}"#
    );
    std::fs::write(&path, doc).unwrap();

    let err = load_registry(&path).unwrap_err();
    assert!(matches!(err, StorageError::Registry(_)));
}

#[test]
fn invalid_field_values_are_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("findr.json");
    let doc = r#"{
        "candidates": [{
            "name": "Amy Bee", "phone": "91", "email": "anna@example.com",
            "address": "4th street", "date_added_ms": 0,
            "rating": "unrated", "stage": "candidates", "tags": []
        }],
        "tags": []
    }"#;
    std::fs::write(&path, doc).unwrap();

    let err = load_registry(&path).unwrap_err();
    assert!(matches!(err, StorageError::InvalidData(_)));
}

#[test]
fn tag_records_default_missing_attributes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("findr.json");
    let doc = r#"{ "candidates": [], "tags": [{ "name": "legacy" }] }"#;
    std::fs::write(&path, doc).unwrap();

    let loaded = load_registry(&path).unwrap().unwrap();
    assert_eq!(loaded.tags()[0].category(), Tag::DEFAULT_CATEGORY);
    assert_eq!(loaded.tags()[0].colour(), Tag::DEFAULT_COLOUR);
}

#[test]
fn search_history_round_trips_and_defaults_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("searchhistory.json");

    assert_eq!(load_search_history(&path).unwrap(), SearchHistory::new());

    let mut history = SearchHistory::new();
    history.record("alice");
    history.record("bob tan");
    save_search_history(&path, &history).unwrap();
    assert_eq!(load_search_history(&path).unwrap(), history);
}
