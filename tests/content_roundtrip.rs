//! Round-trip fidelity of the content codec and aggregate, end to end.

use std::sync::Arc;

use serde_json::json;

use newsletter_studio::adapters::storage::InMemoryNewsletterRepository;
use newsletter_studio::domain::foundation::{NewsletterStatus, UserId};
use newsletter_studio::domain::newsletter::{
    ContentCodec, Newsletter, NewsletterContent, SectionFactory, SectionType,
    SequenceIdGenerator,
};
use newsletter_studio::ports::NewsletterRepository;

fn factory() -> SectionFactory {
    SectionFactory::new(Arc::new(SequenceIdGenerator::new("s")))
}

fn user() -> UserId {
    UserId::new("teacher-1").unwrap()
}

#[test]
fn save_then_load_preserves_sections_theme_and_version() {
    let factory = factory();
    let codec = ContentCodec::new(factory.clone());

    let mut newsletter = Newsletter::new(user(), &factory);
    newsletter.add_section_of(&factory, SectionType::Image.into());
    newsletter.reorder(4, 0).unwrap();

    let stored = codec.encode(newsletter.content());
    let loaded = codec.decode(Some(&stored));

    assert_eq!(&loaded, newsletter.content());
}

#[test]
fn document_with_unknown_future_section_round_trips_unchanged() {
    let codec = ContentCodec::new(factory());

    let stored = json!({
        "version": "1.0",
        "sections": [
            {"id": "a", "type": "title", "order": 0, "data": {"title": "Hello"}},
            {"id": "b", "type": "futureType", "order": 1,
             "data": {"widgets": [{"w": 1}, {"w": 2}], "flags": {"beta": true}}}
        ],
        "theme": {"primaryColor": "#123", "backgroundColor": "#fff",
                  "fontFamily": "serif", "glowColor": "#0ff"}
    });

    let loaded = codec.decode(Some(&stored));
    assert_eq!(loaded.sections.len(), 2);
    assert_eq!(codec.encode(&loaded), stored);
}

#[test]
fn defaults_substitute_only_for_empty_section_lists() {
    let codec = ContentCodec::new(factory());

    // Empty list: defaults.
    let empty = json!({"version": "1.0", "sections": [], "theme": {}});
    assert_eq!(codec.decode(Some(&empty)).sections.len(), 4);

    // One unrecognized section: used verbatim, no substitution.
    let one_unknown = json!({
        "version": "1.0",
        "sections": [{"id": "x", "type": "futureType", "order": 0}],
        "theme": {}
    });
    let loaded = codec.decode(Some(&one_unknown));
    assert_eq!(loaded.sections.len(), 1);
    assert_eq!(loaded.sections[0].kind().as_str(), "futureType");
}

#[tokio::test]
async fn repository_round_trip_preserves_the_whole_document() {
    let factory = factory();
    let repo = InMemoryNewsletterRepository::new();

    let mut newsletter = Newsletter::new(user(), &factory);
    newsletter.rename_title("Week 9");
    newsletter.set_status(NewsletterStatus::Published);
    let target = newsletter.sorted_sections()[2].id().clone();
    newsletter
        .update_section(
            &target,
            json!({"title": "Events", "events": [], "customFlag": 7}),
        )
        .unwrap();

    let id = repo.create(&newsletter).await.unwrap();
    newsletter.assign_id(id);
    let loaded = repo.find_by_id(&id).await.unwrap().unwrap();

    assert_eq!(loaded.title(), "Week 9");
    assert_eq!(loaded.status(), NewsletterStatus::Published);
    assert_eq!(loaded.content(), newsletter.content());
}

#[test]
fn empty_content_is_never_written_with_defaults() {
    let factory = factory();
    let codec = ContentCodec::new(factory);

    let encoded = codec.encode(&NewsletterContent::empty());
    assert_eq!(encoded["sections"], json!([]));
    assert_eq!(encoded["version"], "1.0");
}
