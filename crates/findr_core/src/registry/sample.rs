//! Seed data for a first launch with no saved board.

use crate::model::candidate::{
    Address, Candidate, DateAdded, Email, Name, Phone, Rating, Stage,
};
use crate::model::tag::Tag;
use crate::registry::CandidateRegistry;
use std::collections::BTreeSet;

/// Returns a small populated registry shown on first launch.
pub fn sample_registry() -> CandidateRegistry {
    let mut registry = CandidateRegistry::new();

    let backend = Tag::new("backend", "Engineering", "#1F75FE", "Backend specialist")
        .expect("sample tag is valid");
    let urgent = Tag::new("urgent", "Priority", "#D0342C", "").expect("sample tag is valid");

    let entries = [
        (
            "Alex Yeoh",
            "87438807",
            "alexyeoh@example.com",
            "Blk 30 Geylang Street 29, #06-40",
            vec![backend.clone()],
            Rating::Unrated,
            Stage::Candidates,
        ),
        (
            "Bernice Yu",
            "99272758",
            "berniceyu@example.com",
            "Blk 30 Lorong 3 Serangoon Gardens, #07-18",
            vec![backend, urgent],
            Rating::Good,
            Stage::Contacted,
        ),
        (
            "Charlotte Oliveiro",
            "93210283",
            "charlotte@example.com",
            "Blk 11 Ang Mo Kio Street 74, #11-04",
            vec![],
            Rating::Average,
            Stage::Interviewed,
        ),
    ];

    for (name, phone, email, address, tags, rating, stage) in entries {
        let candidate = Candidate::new(
            Name::new(name).expect("sample name is valid"),
            Phone::new(phone).expect("sample phone is valid"),
            Email::new(email).expect("sample email is valid"),
            Address::new(address).expect("sample address is valid"),
            tags.into_iter().collect::<BTreeSet<_>>(),
            DateAdded::from_epoch_ms(1_735_689_600_000),
            rating,
            stage,
        );
        registry
            .add_candidate(candidate)
            .expect("sample candidates are unique");
    }

    registry
}
