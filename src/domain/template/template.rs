//! Template aggregate - a newsletter's content captured for reuse.

use serde_json::{Map, Value};

use crate::domain::foundation::{TemplateId, Timestamp, UserId};
use crate::domain::newsletter::{Newsletter, NewsletterContent};

/// A reusable template derived from a newsletter.
///
/// Produced by copying a newsletter's `content` and `settings` verbatim;
/// instantiating copies the template's `content` verbatim back into a new
/// draft newsletter. Visibility: private to the owner by default,
/// optionally shared (`is_public`) or available to everyone (`is_global`).
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    id: Option<TemplateId>,
    user_id: UserId,
    name: String,
    content: NewsletterContent,
    settings: Map<String, Value>,
    is_public: bool,
    is_global: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Template {
    // ════════════════════════════════════════════════════════════════════
    // Construction
    // ════════════════════════════════════════════════════════════════════

    /// Captures a newsletter's content and settings as a new template.
    pub fn from_newsletter(
        name: impl Into<String>,
        newsletter: &Newsletter,
        is_public: bool,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: None,
            user_id: newsletter.user_id().clone(),
            name: name.into(),
            content: newsletter.content().clone(),
            settings: newsletter.settings().clone(),
            is_public,
            is_global: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitutes a template from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: TemplateId,
        user_id: UserId,
        name: String,
        content: NewsletterContent,
        settings: Map<String, Value>,
        is_public: bool,
        is_global: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id: Some(id),
            user_id,
            name,
            content,
            settings,
            is_public,
            is_global,
            created_at,
            updated_at,
        }
    }

    // ════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════

    pub fn id(&self) -> Option<TemplateId> {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &NewsletterContent {
        &self.content
    }

    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn is_global(&self) -> bool {
        self.is_global
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// True if the given user may instantiate this template.
    pub fn visible_to(&self, user_id: &UserId) -> bool {
        self.is_global || self.is_public || self.user_id == *user_id
    }

    // ════════════════════════════════════════════════════════════════════
    // Mutations
    // ════════════════════════════════════════════════════════════════════

    pub fn assign_id(&mut self, id: TemplateId) {
        self.id = Some(id);
    }

    pub fn set_public(&mut self, is_public: bool) {
        self.is_public = is_public;
        self.updated_at = Timestamp::now();
    }

    pub fn set_global(&mut self, is_global: bool) {
        self.is_global = is_global;
        self.updated_at = Timestamp::now();
    }

    /// Creates a new draft newsletter from this template.
    ///
    /// Content and settings are copied verbatim - sections keep their ids,
    /// orders, data, and theme exactly as captured. The new document starts
    /// titled after the template.
    pub fn instantiate(&self, user_id: UserId) -> Newsletter {
        Newsletter::from_template_content(
            user_id,
            self.name.clone(),
            self.content.clone(),
            self.settings.clone(),
        )
    }
}
