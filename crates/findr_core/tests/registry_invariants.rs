use findr_core::{
    Address, Candidate, CandidateRegistry, DateAdded, Email, Name, Phone, Rating, RegistryError,
    Stage, Tag,
};
use std::collections::BTreeSet;

fn candidate(name: &str, stage: Stage, tags: &[Tag]) -> Candidate {
    Candidate::new(
        Name::new(name).unwrap(),
        Phone::new("94351253").unwrap(),
        Email::new("someone@example.com").unwrap(),
        Address::new("123, Jurong West Ave 6, #08-111").unwrap(),
        tags.iter().cloned().collect::<BTreeSet<_>>(),
        DateAdded::from_epoch_ms(1_700_000_000_000),
        Rating::Unrated,
        stage,
    )
}

#[test]
fn candidates_with_distinct_names_coexist_but_normalized_duplicates_fail() {
    let mut registry = CandidateRegistry::new();
    registry
        .add_candidate(candidate("Alice Pauline", Stage::Candidates, &[]))
        .unwrap();
    registry
        .add_candidate(candidate("Benson Meier", Stage::Candidates, &[]))
        .unwrap();

    let err = registry
        .add_candidate(candidate("ALICE   pauline", Stage::Hired, &[]))
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateCandidate(_)));
    assert_eq!(registry.candidates().len(), 2);
}

#[test]
fn add_candidate_auto_registers_unknown_tags_with_their_attributes() {
    let mut registry = CandidateRegistry::new();
    let java = Tag::named("java").unwrap();
    registry
        .add_candidate(candidate("Alice Pauline", Stage::Candidates, &[java.clone()]))
        .unwrap();

    assert_eq!(registry.tags().len(), 1);
    assert_eq!(registry.tags()[0], java);
    assert_eq!(registry.tags()[0].category(), Tag::DEFAULT_CATEGORY);
    assert_eq!(registry.tags()[0].colour(), Tag::DEFAULT_COLOUR);
}

#[test]
fn add_candidate_substitutes_the_canonical_catalogue_instance() {
    let mut registry = CandidateRegistry::new();
    let styled = Tag::new("java", "Engineering", "#B07219", "JVM roles").unwrap();
    registry.add_tag(styled.clone()).unwrap();

    // The candidate arrives holding a stale defaulted copy of the same tag.
    let stale = Tag::named("JAVA").unwrap();
    registry
        .add_candidate(candidate("Benson Meier", Stage::Contacted, &[stale]))
        .unwrap();

    let held = registry.candidates()[0].tags().iter().next().unwrap();
    assert_eq!(held, &styled);
    assert_eq!(registry.tags().len(), 1);
}

#[test]
fn set_tag_cascades_to_holders_and_leaves_others_untouched() {
    let mut registry = CandidateRegistry::new();
    let java = Tag::named("java").unwrap();
    let rust = Tag::named("rust").unwrap();
    registry
        .add_candidate(candidate("Alice Pauline", Stage::Candidates, &[java.clone()]))
        .unwrap();
    registry
        .add_candidate(candidate("Benson Meier", Stage::Contacted, &[rust]))
        .unwrap();
    let benson_before = registry.candidates()[1].clone();

    let edited = Tag::new("java", "Engineering", "#B07219", "JVM roles").unwrap();
    registry.set_tag(&java, edited.clone()).unwrap();

    let alice = &registry.candidates()[0];
    assert_eq!(alice.tags().iter().next().unwrap(), &edited);
    assert_eq!(alice.name().display(), "Alice Pauline");
    assert_eq!(alice.stage(), Stage::Candidates);

    // Non-holders are not rewritten at all.
    assert_eq!(&registry.candidates()[1], &benson_before);
    assert_eq!(registry.tags(), [edited]);
}

#[test]
fn remove_tag_drops_it_from_every_holder_and_the_catalogue() {
    let mut registry = CandidateRegistry::new();
    let java = Tag::named("java").unwrap();
    let rust = Tag::named("rust").unwrap();
    registry
        .add_candidate(candidate(
            "Alice Pauline",
            Stage::Candidates,
            &[java.clone(), rust.clone()],
        ))
        .unwrap();
    registry
        .add_candidate(candidate("Benson Meier", Stage::Contacted, &[rust.clone()]))
        .unwrap();

    registry.remove_tag(&java).unwrap();

    assert_eq!(registry.tags(), [rust.clone()]);
    let alice_tags: Vec<_> = registry.candidates()[0].tags().iter().cloned().collect();
    assert_eq!(alice_tags, [rust.clone()]);
    let benson_tags: Vec<_> = registry.candidates()[1].tags().iter().cloned().collect();
    assert_eq!(benson_tags, [rust]);
}

#[test]
fn cascade_preserves_candidate_list_order() {
    let mut registry = CandidateRegistry::new();
    let shared = Tag::named("shared").unwrap();
    for name in ["Alice Pauline", "Benson Meier", "Carl Kurz"] {
        registry
            .add_candidate(candidate(name, Stage::Candidates, &[shared.clone()]))
            .unwrap();
    }

    let edited = Tag::new("shared", "General", "#00FF00", "").unwrap();
    registry.set_tag(&shared, edited).unwrap();

    let order: Vec<_> = registry
        .candidates()
        .iter()
        .map(|c| c.name().display().to_string())
        .collect();
    assert_eq!(order, ["Alice Pauline", "Benson Meier", "Carl Kurz"]);
}

#[test]
fn resolve_tags_is_strict_and_returns_canonical_instances() {
    let mut registry = CandidateRegistry::new();
    let styled = Tag::new("backend", "Engineering", "#1F75FE", "").unwrap();
    registry.add_tag(styled.clone()).unwrap();

    let probe: BTreeSet<Tag> = [Tag::named("BACKEND").unwrap()].into_iter().collect();
    let resolved = registry.resolve_tags(&probe).unwrap();
    assert_eq!(resolved.iter().next().unwrap(), &styled);

    let missing: BTreeSet<Tag> = [Tag::named("frontend").unwrap()].into_iter().collect();
    let err = registry.resolve_tags(&missing).unwrap_err();
    assert!(matches!(err, RegistryError::TagNotFound(_)));
}

#[test]
fn removing_a_candidate_keeps_its_tags_catalogued() {
    let mut registry = CandidateRegistry::new();
    let java = Tag::named("java").unwrap();
    registry
        .add_candidate(candidate("Alice Pauline", Stage::Candidates, &[java.clone()]))
        .unwrap();

    let alice = registry.candidates()[0].clone();
    registry.remove_candidate(&alice).unwrap();

    assert!(registry.candidates().is_empty());
    assert!(registry.has_tag(&java));
}
