use findr_core::{
    Address, CandidateRegistry, CatalogueService, CommandError, DateAdded, EditCandidateDescriptor,
    EditTagDescriptor, Email, Name, NewCandidate, Phone, Rating, RegistryError, RosterService,
    Selection, Stage, Tag,
};
use std::collections::BTreeSet;

fn new_candidate(name: &str, tags: &[Tag]) -> NewCandidate {
    NewCandidate {
        name: Name::new(name).unwrap(),
        phone: Phone::new("87652533").unwrap(),
        email: Email::new("cornelia@example.com").unwrap(),
        address: Address::new("10th street").unwrap(),
        tags: tags.iter().cloned().collect::<BTreeSet<_>>(),
        date_added: DateAdded::from_epoch_ms(1_700_000_000_000),
    }
}

#[test]
fn add_requires_catalogued_tags() {
    let mut registry = CandidateRegistry::new();
    let err = RosterService::new(&mut registry)
        .add(new_candidate("Daniel Meier", &[Tag::named("friends").unwrap()]))
        .unwrap_err();
    assert_eq!(
        err,
        CommandError::Registry(RegistryError::TagNotFound("friends".to_string()))
    );
    assert!(registry.candidates().is_empty());
}

#[test]
fn add_attaches_the_canonical_tag_and_starts_unrated_in_candidates() {
    let mut registry = CandidateRegistry::new();
    let styled = Tag::new("friends", "Network", "#00AA00", "").unwrap();
    registry.add_tag(styled.clone()).unwrap();

    let added = RosterService::new(&mut registry)
        .add(new_candidate("Daniel Meier", &[Tag::named("FRIENDS").unwrap()]))
        .unwrap();

    assert_eq!(added.stage(), Stage::Candidates);
    assert_eq!(added.rating(), Rating::Unrated);
    assert_eq!(added.tags().iter().next().unwrap(), &styled);
}

#[test]
fn add_rejects_duplicate_identities() {
    let mut registry = CandidateRegistry::new();
    let mut roster = RosterService::new(&mut registry);
    roster.add(new_candidate("Daniel Meier", &[])).unwrap();
    let err = roster.add(new_candidate("daniel   MEIER", &[])).unwrap_err();
    assert!(matches!(
        err,
        CommandError::Registry(RegistryError::DuplicateCandidate(_))
    ));
}

#[test]
fn edit_rebuilds_only_the_requested_fields() {
    let mut registry = CandidateRegistry::new();
    let mut roster = RosterService::new(&mut registry);
    roster.add(new_candidate("Elle Meyer", &[])).unwrap();

    let descriptor = EditCandidateDescriptor {
        phone: Some(Phone::new("9482224").unwrap()),
        ..Default::default()
    };
    let edited = roster.edit(Selection::in_list(1), descriptor).unwrap();

    assert_eq!(edited.phone().value(), "9482224");
    assert_eq!(edited.name().display(), "Elle Meyer");
    assert_eq!(edited.email().value(), "cornelia@example.com");
}

#[test]
fn edit_with_no_fields_is_rejected() {
    let mut registry = CandidateRegistry::new();
    let mut roster = RosterService::new(&mut registry);
    roster.add(new_candidate("Elle Meyer", &[])).unwrap();

    let err = roster
        .edit(Selection::in_list(1), EditCandidateDescriptor::default())
        .unwrap_err();
    assert_eq!(err, CommandError::NothingToEdit);
}

#[test]
fn edit_tags_resolves_strictly() {
    let mut registry = CandidateRegistry::new();
    let mut roster = RosterService::new(&mut registry);
    roster.add(new_candidate("Elle Meyer", &[])).unwrap();

    let descriptor = EditCandidateDescriptor {
        tags: Some([Tag::named("colleagues").unwrap()].into_iter().collect()),
        ..Default::default()
    };
    let err = roster.edit(Selection::in_list(1), descriptor).unwrap_err();
    assert!(matches!(
        err,
        CommandError::Registry(RegistryError::TagNotFound(_))
    ));
}

#[test]
fn tag_edit_cascades_and_preserves_non_holders() {
    let mut registry = CandidateRegistry::new();
    registry.add_tag(Tag::named("java").unwrap()).unwrap();
    registry.add_tag(Tag::named("rust").unwrap()).unwrap();
    {
        let mut roster = RosterService::new(&mut registry);
        roster
            .add(new_candidate("Fiona Kunz", &[Tag::named("java").unwrap()]))
            .unwrap();
        roster
            .add(new_candidate("George Best", &[Tag::named("rust").unwrap()]))
            .unwrap();
    }
    let george_before = registry.candidates()[1].clone();

    let descriptor = EditTagDescriptor {
        colour: Some("#b07219".to_string()),
        description: Some("JVM roles".to_string()),
        ..Default::default()
    };
    let edited = CatalogueService::new(&mut registry)
        .edit_tag("java", descriptor)
        .unwrap();

    assert_eq!(edited.colour(), "#B07219");
    assert_eq!(
        registry.candidates()[0].tags().iter().next().unwrap(),
        &edited
    );
    assert_eq!(&registry.candidates()[1], &george_before);
}

#[test]
fn tag_edit_rejects_unknown_target_rename_collision_and_no_op() {
    let mut registry = CandidateRegistry::new();
    registry.add_tag(Tag::named("java").unwrap()).unwrap();
    registry.add_tag(Tag::named("rust").unwrap()).unwrap();
    let mut catalogue = CatalogueService::new(&mut registry);

    let err = catalogue
        .edit_tag("golang", EditTagDescriptor::default())
        .unwrap_err();
    assert!(matches!(
        err,
        CommandError::Registry(RegistryError::TagNotFound(_))
    ));

    let rename = EditTagDescriptor {
        name: Some("RUST".to_string()),
        ..Default::default()
    };
    let err = catalogue.edit_tag("java", rename).unwrap_err();
    assert!(matches!(
        err,
        CommandError::Registry(RegistryError::DuplicateTag(_))
    ));

    let err = catalogue
        .edit_tag("java", EditTagDescriptor::default())
        .unwrap_err();
    assert_eq!(err, CommandError::NothingToEdit);

    let same_value = EditTagDescriptor {
        category: Some(Tag::DEFAULT_CATEGORY.to_string()),
        ..Default::default()
    };
    let err = catalogue.edit_tag("java", same_value).unwrap_err();
    assert_eq!(err, CommandError::NothingToEdit);
}

#[test]
fn tag_delete_drops_references_everywhere() {
    let mut registry = CandidateRegistry::new();
    registry.add_tag(Tag::named("urgent").unwrap()).unwrap();
    RosterService::new(&mut registry)
        .add(new_candidate("Hoon Meier", &[Tag::named("urgent").unwrap()]))
        .unwrap();

    let deleted = CatalogueService::new(&mut registry)
        .delete_tag("URGENT")
        .unwrap();

    assert_eq!(deleted.name(), "urgent");
    assert!(registry.tags().is_empty());
    assert!(registry.candidates()[0].tags().is_empty());
}

#[test]
fn tag_add_rejects_case_insensitive_duplicates() {
    let mut registry = CandidateRegistry::new();
    let mut catalogue = CatalogueService::new(&mut registry);
    catalogue.add_tag(Tag::named("remote").unwrap()).unwrap();
    let err = catalogue.add_tag(Tag::named("Remote").unwrap()).unwrap_err();
    assert!(matches!(
        err,
        CommandError::Registry(RegistryError::DuplicateTag(_))
    ));
}
