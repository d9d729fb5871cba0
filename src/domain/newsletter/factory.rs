//! Section factory - creates sections with fresh ids and per-type defaults.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::domain::foundation::{SectionId, Timestamp};

use super::section::Section;
use super::section_data::{
    ContactData, EventItem, EventsData, HeaderData, ImageData, RichTextData, TextStyle,
    TitleData, TypedSectionData,
};
use super::section_type::{SectionKind, SectionType};

/// Source of fresh section and event ids.
///
/// Injected rather than read from a hidden process-wide clock/random source
/// so tests can pin id generation down.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh id, unique for the life of the process.
    fn next_id(&self) -> String;
}

/// Production id generator backed by UUID v4.
///
/// 122 random bits per id; two calls can never collide in practice, even
/// within the same millisecond.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic id generator for tests: `prefix-1`, `prefix-2`, ...
#[derive(Debug)]
pub struct SequenceIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequenceIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}

/// Creates sections of a given type with fresh ids and type-specific
/// default data.
#[derive(Clone)]
pub struct SectionFactory {
    ids: Arc<dyn IdGenerator>,
}

impl SectionFactory {
    /// Creates a factory using the given id source.
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// Creates a factory with the production UUID id source.
    pub fn with_uuid_ids() -> Self {
        Self::new(Arc::new(UuidIdGenerator))
    }

    /// Returns the underlying id source (the events editor mints event ids
    /// from the same source).
    pub fn id_generator(&self) -> Arc<dyn IdGenerator> {
        Arc::clone(&self.ids)
    }

    /// Creates a new section of the given kind at the given order.
    ///
    /// Known kinds get their pre-filled default data; an unrecognized kind
    /// yields a minimal base section with no data rather than an error, and
    /// callers must render it as the unknown placeholder.
    pub fn create(&self, kind: SectionKind, order: u32) -> Section {
        let id = self.fresh_section_id();
        let data = match &kind {
            SectionKind::Known(known) => Some(self.default_data(*known)),
            SectionKind::Unknown(_) => None,
        };
        Section::new(id, kind, order, data)
    }

    /// Creates a new section of a known type at the given order.
    pub fn create_known(&self, section_type: SectionType, order: u32) -> Section {
        self.create(SectionKind::Known(section_type), order)
    }

    /// Returns the default data record for a known section type.
    pub fn default_data(&self, section_type: SectionType) -> Value {
        match section_type {
            SectionType::Header => HeaderData {
                title: "Classroom Newsletter".to_string(),
                subtitle: "News and updates from our class".to_string(),
                style: TextStyle {
                    font_size: "32px".to_string(),
                    text_align: "center".to_string(),
                    ..TextStyle::default()
                },
                ..HeaderData::default()
            }
            .to_value(),
            SectionType::Title => TitleData {
                title: "Weekly Update".to_string(),
                style: TextStyle {
                    font_size: "28px".to_string(),
                    text_align: "center".to_string(),
                    ..TextStyle::default()
                },
                ..TitleData::default()
            }
            .to_value(),
            SectionType::RichText => RichTextData {
                content: "Share this week's news with your families...".to_string(),
                ..RichTextData::default()
            }
            .to_value(),
            SectionType::Events => EventsData {
                title: "Upcoming Events".to_string(),
                events: vec![EventItem {
                    id: self.ids.next_id(),
                    date: Timestamp::now().date_string(),
                    title: "New event".to_string(),
                    ..EventItem::default()
                }],
                ..EventsData::default()
            }
            .to_value(),
            SectionType::Contact => ContactData {
                title: "Get in Touch".to_string(),
                ..ContactData::default()
            }
            .to_value(),
            SectionType::Image => ImageData::default().to_value(),
        }
    }

    fn fresh_section_id(&self) -> SectionId {
        // The generator contract guarantees a non-empty id; fall back to a
        // UUID if a broken implementation hands back an empty string.
        SectionId::new(self.ids.next_id())
            .unwrap_or_else(|_| SectionId::new(Uuid::new_v4().to_string()).expect("uuid is non-empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_factory() -> SectionFactory {
        SectionFactory::new(Arc::new(SequenceIdGenerator::new("s")))
    }

    #[test]
    fn creates_section_with_given_type_and_order() {
        let factory = test_factory();
        let section = factory.create_known(SectionType::Contact, 4);

        assert_eq!(section.kind().known(), Some(SectionType::Contact));
        assert_eq!(section.order(), 4);
        assert!(section.data().is_some());
    }

    #[test]
    fn header_defaults_are_prefilled() {
        let factory = test_factory();
        let section = factory.create_known(SectionType::Header, 0);
        let data = section.data().unwrap();

        assert_eq!(data["title"], "Classroom Newsletter");
        assert_eq!(data["subtitle"], "News and updates from our class");
        assert_eq!(data["style"]["textAlign"], "center");
    }

    #[test]
    fn events_default_has_one_placeholder_event_dated_today() {
        let factory = test_factory();
        let section = factory.create_known(SectionType::Events, 0);
        let events = section.data().unwrap()["events"].as_array().unwrap().clone();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["date"], Timestamp::now().date_string());
        assert!(!events[0]["id"].as_str().unwrap().is_empty());
    }

    #[test]
    fn unknown_kind_yields_base_section_without_data() {
        let factory = test_factory();
        let section = factory.create(SectionKind::Unknown("futureType".to_string()), 2);

        assert_eq!(section.kind().as_str(), "futureType");
        assert_eq!(section.order(), 2);
        assert!(section.data().is_none());
    }

    #[test]
    fn rapid_creation_never_collides_ids() {
        let factory = SectionFactory::with_uuid_ids();
        let mut seen = HashSet::new();
        for i in 0..1000 {
            let section = factory.create_known(SectionType::RichText, i);
            assert!(seen.insert(section.id().as_str().to_string()));
        }
    }

    #[test]
    fn sequence_generator_is_deterministic() {
        let factory = test_factory();
        let a = factory.create_known(SectionType::Title, 0);
        let b = factory.create_known(SectionType::Title, 1);
        assert_eq!(a.id().as_str(), "s-1");
        assert_eq!(b.id().as_str(), "s-2");
    }
}
