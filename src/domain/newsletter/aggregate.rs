//! Newsletter aggregate - the in-memory document coordinating sections,
//! theme, and metadata as one consistent unit.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{
    DomainError, ErrorCode, NewsletterId, NewsletterStatus, SectionId, Timestamp, UserId,
};

use super::factory::SectionFactory;
use super::section::Section;
use super::section_type::{SectionKind, SectionType};
use super::theme::Theme;

/// Schema tag written into every content blob. Preserved on load, not
/// branched on.
pub const CONTENT_VERSION: &str = "1.0";

/// The four sections a brand-new newsletter starts with, in order.
pub const DEFAULT_SECTION_TYPES: [SectionType; 4] = [
    SectionType::Title,
    SectionType::RichText,
    SectionType::Events,
    SectionType::Contact,
];

/// The serialized `{version, sections, theme}` structure persisted per
/// newsletter and template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterContent {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub theme: Theme,
}

fn default_version() -> String {
    CONTENT_VERSION.to_string()
}

impl NewsletterContent {
    /// Content for a brand-new document: the default section set and theme.
    pub fn with_defaults(factory: &SectionFactory) -> Self {
        let sections = DEFAULT_SECTION_TYPES
            .iter()
            .enumerate()
            .map(|(i, t)| factory.create_known(*t, i as u32))
            .collect();
        Self {
            version: default_version(),
            sections,
            theme: Theme::default(),
        }
    }

    /// Empty content (no sections). The codec substitutes defaults for this
    /// at load time only.
    pub fn empty() -> Self {
        Self {
            version: default_version(),
            sections: Vec::new(),
            theme: Theme::default(),
        }
    }
}

impl Default for NewsletterContent {
    fn default() -> Self {
        Self::empty()
    }
}

/// The Newsletter aggregate root.
///
/// Owns the ordered section collection, theme, settings, and lifecycle
/// status. All structural edits go through the operations below so the
/// ordering invariant (contiguous `order` after every reorder) holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Newsletter {
    // Identity - assigned by the storage collaborator on first create.
    id: Option<NewsletterId>,
    user_id: UserId,

    // Document
    title: String,
    content: NewsletterContent,

    // Opaque per-document layout preferences, merged shallowly on update.
    settings: Map<String, Value>,

    status: NewsletterStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Newsletter {
    // ════════════════════════════════════════════════════════════════════
    // Construction
    // ════════════════════════════════════════════════════════════════════

    /// Creates a new draft newsletter with the four default sections and
    /// the default theme. No id yet: storage assigns one on first save.
    pub fn new(user_id: UserId, factory: &SectionFactory) -> Self {
        let now = Timestamp::now();
        Self {
            id: None,
            user_id,
            title: "Untitled Newsletter".to_string(),
            content: NewsletterContent::with_defaults(factory),
            settings: Map::new(),
            status: NewsletterStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a draft newsletter seeded with a template's content and
    /// settings, copied verbatim (sections keep their ids, orders, data,
    /// and theme exactly as captured).
    pub fn from_template_content(
        user_id: UserId,
        title: impl Into<String>,
        content: NewsletterContent,
        settings: Map<String, Value>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: None,
            user_id,
            title: title.into(),
            content,
            settings,
            status: NewsletterStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitutes a newsletter from persistence.
    pub fn reconstitute(
        id: NewsletterId,
        user_id: UserId,
        title: String,
        content: NewsletterContent,
        settings: Map<String, Value>,
        status: NewsletterStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id: Some(id),
            user_id,
            title,
            content,
            settings,
            status,
            created_at,
            updated_at,
        }
    }

    // ════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════

    pub fn id(&self) -> Option<NewsletterId> {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &NewsletterContent {
        &self.content
    }

    pub fn sections(&self) -> &[Section] {
        &self.content.sections
    }

    pub fn theme(&self) -> &Theme {
        &self.content.theme
    }

    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    pub fn status(&self) -> NewsletterStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Sections in visual top-to-bottom order.
    ///
    /// Always a sort by `order` (stable, so ties keep their array position):
    /// between a delete and the next reorder the in-memory array is not
    /// assumed to match visual order.
    pub fn sorted_sections(&self) -> Vec<&Section> {
        let mut sorted: Vec<&Section> = self.content.sections.iter().collect();
        sorted.sort_by_key(|s| s.order());
        sorted
    }

    /// The order value the next appended section receives.
    pub fn next_order(&self) -> u32 {
        self.content
            .sections
            .iter()
            .map(|s| s.order() + 1)
            .max()
            .unwrap_or(0)
    }

    // ════════════════════════════════════════════════════════════════════
    // Mutations
    // ════════════════════════════════════════════════════════════════════

    /// Assigns the storage-issued id after first create.
    pub fn assign_id(&mut self, id: NewsletterId) {
        self.id = Some(id);
    }

    /// Appends a section at the end of the visual order.
    ///
    /// The incoming section's order is overwritten with `max + 1` (or 0 for
    /// an empty document); mid-list placement is a separate reorder.
    pub fn add_section(&mut self, mut section: Section) {
        section.set_order(self.next_order());
        self.content.sections.push(section);
        self.touch();
    }

    /// Creates a section of the given kind via the factory and appends it.
    pub fn add_section_of(&mut self, factory: &SectionFactory, kind: SectionKind) -> SectionId {
        let section = factory.create(kind, self.next_order());
        let id = section.id().clone();
        self.add_section(section);
        id
    }

    /// Moves the section at visual position `source` to visual position
    /// `dest`, then re-normalizes every section's order to its new index.
    ///
    /// The re-normalization is what keeps `order` a contiguous 0..n-1
    /// sequence; it runs on every call, including no-op moves.
    pub fn reorder(&mut self, source: usize, dest: usize) -> Result<(), DomainError> {
        let len = self.content.sections.len();
        if source >= len || dest >= len {
            return Err(DomainError::new(
                ErrorCode::SectionIndexOutOfRange,
                format!("reorder {source} -> {dest} out of range for {len} sections"),
            ));
        }

        let mut sorted: Vec<Section> = std::mem::take(&mut self.content.sections);
        sorted.sort_by_key(|s| s.order());

        let moved = sorted.remove(source);
        sorted.insert(dest, moved);

        for (index, section) in sorted.iter_mut().enumerate() {
            section.set_order(index as u32);
        }

        self.content.sections = sorted;
        self.touch();
        Ok(())
    }

    /// Replaces the data of the section with the given id.
    ///
    /// Whole-data replacement: editors always send the full recomputed
    /// record. Every other section is left untouched. Should duplicate ids
    /// ever exist (a factory defect), the last matching section wins.
    pub fn update_section(&mut self, id: &SectionId, data: Value) -> Result<(), DomainError> {
        let index = self
            .content
            .sections
            .iter()
            .rposition(|s| s.id() == id)
            .ok_or_else(|| section_not_found(id))?;

        self.content.sections[index].replace_data(data);
        self.touch();
        Ok(())
    }

    /// Removes exactly one section by id.
    ///
    /// Remaining sections keep their order values: gaps are permitted until
    /// the next reorder re-normalizes.
    pub fn delete_section(&mut self, id: &SectionId) -> Result<(), DomainError> {
        let index = self
            .content
            .sections
            .iter()
            .rposition(|s| s.id() == id)
            .ok_or_else(|| section_not_found(id))?;

        self.content.sections.remove(index);
        self.touch();
        Ok(())
    }

    /// Renames the newsletter.
    ///
    /// This is the document's own title, deliberately decoupled from any
    /// title section's `data.title`.
    pub fn rename_title(&mut self, new_title: impl Into<String>) {
        self.title = new_title.into();
        self.touch();
    }

    /// Shallow-merges the given keys into the settings object.
    pub fn update_settings(&mut self, patch: Map<String, Value>) {
        for (key, value) in patch {
            self.settings.insert(key, value);
        }
        self.touch();
    }

    /// Replaces the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.content.theme = theme;
        self.touch();
    }

    /// Sets the lifecycle status. Any transition is permitted.
    pub fn set_status(&mut self, status: NewsletterStatus) {
        self.status = status;
        self.touch();
    }

    /// Replaces the whole content blob (used by the save path when a client
    /// submits its in-memory document).
    pub fn replace_content(&mut self, content: NewsletterContent) {
        self.content = content;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

fn section_not_found(id: &SectionId) -> DomainError {
    DomainError::new(
        ErrorCode::SectionNotFound,
        format!("no section with id {id}"),
    )
}

// ════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::newsletter::factory::SequenceIdGenerator;
    use serde_json::json;
    use std::sync::Arc;

    fn test_factory() -> SectionFactory {
        SectionFactory::new(Arc::new(SequenceIdGenerator::new("s")))
    }

    fn test_user() -> UserId {
        UserId::new("teacher-1").unwrap()
    }

    fn orders(n: &Newsletter) -> Vec<u32> {
        n.sorted_sections().iter().map(|s| s.order()).collect()
    }

    fn sorted_ids(n: &Newsletter) -> Vec<String> {
        n.sorted_sections()
            .iter()
            .map(|s| s.id().as_str().to_string())
            .collect()
    }

    // ───────────────────────────────────────────────────────────────
    // Creation
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn new_newsletter_has_four_default_sections_in_order() {
        let newsletter = Newsletter::new(test_user(), &test_factory());

        let kinds: Vec<&str> = newsletter
            .sorted_sections()
            .iter()
            .map(|s| s.kind().as_str())
            .collect();
        assert_eq!(kinds, vec!["title", "richText", "events", "contact"]);
        assert_eq!(orders(&newsletter), vec![0, 1, 2, 3]);
        assert_eq!(newsletter.status(), NewsletterStatus::Draft);
        assert!(newsletter.id().is_none());
    }

    #[test]
    fn new_newsletter_sections_have_unique_ids() {
        let newsletter = Newsletter::new(test_user(), &test_factory());
        let mut ids = sorted_ids(&newsletter);
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    // ───────────────────────────────────────────────────────────────
    // Add
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn add_section_appends_with_max_plus_one() {
        let factory = test_factory();
        let mut newsletter = Newsletter::new(test_user(), &factory);

        let id = newsletter.add_section_of(&factory, SectionType::Image.into());
        let added = newsletter
            .sections()
            .iter()
            .find(|s| *s.id() == id)
            .unwrap();
        assert_eq!(added.order(), 4);
    }

    #[test]
    fn add_section_to_empty_document_gets_order_zero() {
        let factory = test_factory();
        let mut newsletter = Newsletter::new(test_user(), &factory);
        let ids = sorted_ids(&newsletter);
        for id in &ids {
            newsletter
                .delete_section(&SectionId::new(id.clone()).unwrap())
                .unwrap();
        }
        assert!(newsletter.sections().is_empty());

        newsletter.add_section_of(&factory, SectionType::Header.into());
        assert_eq!(newsletter.sections()[0].order(), 0);
    }

    #[test]
    fn add_section_after_delete_uses_max_plus_one_not_len() {
        let factory = test_factory();
        let mut newsletter = Newsletter::new(test_user(), &factory);

        // Delete the first section; remaining orders are 1, 2, 3.
        let first = SectionId::new(sorted_ids(&newsletter)[0].clone()).unwrap();
        newsletter.delete_section(&first).unwrap();

        newsletter.add_section_of(&factory, SectionType::Image.into());
        assert_eq!(orders(&newsletter), vec![1, 2, 3, 4]);
    }

    // ───────────────────────────────────────────────────────────────
    // Reorder
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn reorder_moves_and_renormalizes() {
        let factory = test_factory();
        let mut newsletter = Newsletter::new(test_user(), &factory);
        let before = sorted_ids(&newsletter); // [A, B, C, D]

        newsletter.reorder(0, 2).unwrap();

        let after = sorted_ids(&newsletter);
        assert_eq!(
            after,
            vec![
                before[1].clone(),
                before[2].clone(),
                before[0].clone(),
                before[3].clone()
            ]
        );
        assert_eq!(orders(&newsletter), vec![0, 1, 2, 3]);
    }

    #[test]
    fn noop_reorder_still_renormalizes_gapped_orders() {
        let factory = test_factory();
        let mut newsletter = Newsletter::new(test_user(), &factory);

        // Create a gap: delete index 1, orders become 0, 2, 3.
        let second = SectionId::new(sorted_ids(&newsletter)[1].clone()).unwrap();
        newsletter.delete_section(&second).unwrap();
        assert_eq!(orders(&newsletter), vec![0, 2, 3]);

        newsletter.reorder(1, 1).unwrap();
        assert_eq!(orders(&newsletter), vec![0, 1, 2]);
    }

    #[test]
    fn reorder_out_of_range_is_rejected() {
        let factory = test_factory();
        let mut newsletter = Newsletter::new(test_user(), &factory);

        let err = newsletter.reorder(0, 4).unwrap_err();
        assert_eq!(err.code, ErrorCode::SectionIndexOutOfRange);
        let err = newsletter.reorder(9, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::SectionIndexOutOfRange);
    }

    // ───────────────────────────────────────────────────────────────
    // Update
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn update_section_replaces_only_the_matching_section() {
        let factory = test_factory();
        let mut newsletter = Newsletter::new(test_user(), &factory);
        let ids = sorted_ids(&newsletter);
        let target = SectionId::new(ids[1].clone()).unwrap();

        let untouched_before: Vec<Section> = newsletter
            .sections()
            .iter()
            .filter(|s| *s.id() != target)
            .cloned()
            .collect();

        newsletter
            .update_section(&target, json!({"content": "fresh", "style": {}}))
            .unwrap();

        let updated = newsletter
            .sections()
            .iter()
            .find(|s| *s.id() == target)
            .unwrap();
        assert_eq!(updated.data().unwrap()["content"], "fresh");

        let untouched_after: Vec<Section> = newsletter
            .sections()
            .iter()
            .filter(|s| *s.id() != target)
            .cloned()
            .collect();
        assert_eq!(untouched_before, untouched_after);
    }

    #[test]
    fn update_section_with_unknown_id_fails() {
        let factory = test_factory();
        let mut newsletter = Newsletter::new(test_user(), &factory);

        let err = newsletter
            .update_section(&SectionId::new("missing").unwrap(), json!({}))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SectionNotFound);
    }

    // ───────────────────────────────────────────────────────────────
    // Delete
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn delete_removes_exactly_one_and_leaves_gaps() {
        let factory = test_factory();
        let mut newsletter = Newsletter::new(test_user(), &factory);
        let second = SectionId::new(sorted_ids(&newsletter)[1].clone()).unwrap();

        newsletter.delete_section(&second).unwrap();

        assert_eq!(newsletter.sections().len(), 3);
        assert_eq!(orders(&newsletter), vec![0, 2, 3]);
    }

    #[test]
    fn delete_with_unknown_id_fails() {
        let factory = test_factory();
        let mut newsletter = Newsletter::new(test_user(), &factory);

        let err = newsletter
            .delete_section(&SectionId::new("missing").unwrap())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SectionNotFound);
    }

    // ───────────────────────────────────────────────────────────────
    // Title / settings / status
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn rename_title_does_not_touch_title_section_data() {
        let factory = test_factory();
        let mut newsletter = Newsletter::new(test_user(), &factory);
        let title_section_data = newsletter.sorted_sections()[0].data().cloned();

        newsletter.rename_title("Week 12 Update");

        assert_eq!(newsletter.title(), "Week 12 Update");
        assert_eq!(newsletter.sorted_sections()[0].data().cloned(), title_section_data);
    }

    #[test]
    fn update_settings_merges_shallowly() {
        let factory = test_factory();
        let mut newsletter = Newsletter::new(test_user(), &factory);

        let mut first = Map::new();
        first.insert("spacing".to_string(), json!("compact"));
        first.insert("width".to_string(), json!(720));
        newsletter.update_settings(first);

        let mut second = Map::new();
        second.insert("width".to_string(), json!(960));
        newsletter.update_settings(second);

        assert_eq!(newsletter.settings().get("spacing"), Some(&json!("compact")));
        assert_eq!(newsletter.settings().get("width"), Some(&json!(960)));
    }

    #[test]
    fn any_status_transition_is_permitted() {
        let factory = test_factory();
        let mut newsletter = Newsletter::new(test_user(), &factory);

        newsletter.set_status(NewsletterStatus::Published);
        newsletter.set_status(NewsletterStatus::Draft);
        newsletter.set_status(NewsletterStatus::Archived);
        newsletter.set_status(NewsletterStatus::Published);
        assert_eq!(newsletter.status(), NewsletterStatus::Published);
    }
}
