//! SaveNewsletterHandler - persists a client's in-memory document.
//!
//! The client submits the whole document state (any subset of title,
//! content blob, settings patch, status). Content is written exactly as
//! submitted - default substitution happens only on the load path - and
//! settings merge shallowly.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::foundation::{
    DomainError, ErrorCode, NewsletterId, NewsletterStatus, UserId,
};
use crate::domain::newsletter::{Newsletter, NewsletterContent};
use crate::ports::NewsletterRepository;

use super::load_owned;

/// Command carrying a save payload.
#[derive(Debug, Clone)]
pub struct SaveNewsletterCommand {
    pub newsletter_id: NewsletterId,
    pub user_id: UserId,
    pub title: Option<String>,
    /// Whole content blob `{version, sections, theme}`, as held by the
    /// editor.
    pub content: Option<Value>,
    /// Shallow-merged into the stored settings object.
    pub settings: Option<Map<String, Value>>,
    pub status: Option<NewsletterStatus>,
}

/// Handler for saving newsletters.
pub struct SaveNewsletterHandler {
    repository: Arc<dyn NewsletterRepository>,
}

impl SaveNewsletterHandler {
    pub fn new(repository: Arc<dyn NewsletterRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: SaveNewsletterCommand) -> Result<Newsletter, DomainError> {
        let mut newsletter =
            load_owned(self.repository.as_ref(), &cmd.newsletter_id, &cmd.user_id).await?;

        if let Some(title) = cmd.title {
            newsletter.rename_title(title);
        }

        if let Some(content) = cmd.content {
            let content: NewsletterContent =
                serde_json::from_value(content).map_err(|err| {
                    DomainError::new(
                        ErrorCode::ValidationFailed,
                        format!("malformed content blob: {err}"),
                    )
                })?;
            newsletter.replace_content(content);
        }

        if let Some(settings) = cmd.settings {
            newsletter.update_settings(settings);
        }

        if let Some(status) = cmd.status {
            newsletter.set_status(status);
        }

        self.repository.update(&newsletter).await?;
        Ok(newsletter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryNewsletterRepository;
    use crate::domain::newsletter::{SectionFactory, SequenceIdGenerator};
    use serde_json::json;

    async fn setup() -> (Arc<dyn NewsletterRepository>, NewsletterId, UserId) {
        let repo: Arc<dyn NewsletterRepository> = Arc::new(InMemoryNewsletterRepository::new());
        let factory = SectionFactory::new(Arc::new(SequenceIdGenerator::new("s")));
        let user = UserId::new("teacher-1").unwrap();
        let id = repo
            .create(&Newsletter::new(user.clone(), &factory))
            .await
            .unwrap();
        (repo, id, user)
    }

    #[tokio::test]
    async fn saves_submitted_content_verbatim_even_when_empty() {
        let (repo, id, user) = setup().await;
        let handler = SaveNewsletterHandler::new(Arc::clone(&repo));

        let saved = handler
            .handle(SaveNewsletterCommand {
                newsletter_id: id,
                user_id: user,
                title: Some("Cleared".to_string()),
                content: Some(json!({"version": "1.0", "sections": [], "theme": {}})),
                settings: None,
                status: None,
            })
            .await
            .unwrap();

        // No default substitution on the save path.
        assert!(saved.sections().is_empty());
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert!(stored.sections().is_empty());
    }

    #[tokio::test]
    async fn settings_merge_shallowly_across_saves() {
        let (repo, id, user) = setup().await;
        let handler = SaveNewsletterHandler::new(Arc::clone(&repo));

        let mut first = Map::new();
        first.insert("margins".to_string(), json!("wide"));
        handler
            .handle(SaveNewsletterCommand {
                newsletter_id: id,
                user_id: user.clone(),
                title: None,
                content: None,
                settings: Some(first),
                status: None,
            })
            .await
            .unwrap();

        let mut second = Map::new();
        second.insert("spacing".to_string(), json!("cozy"));
        let saved = handler
            .handle(SaveNewsletterCommand {
                newsletter_id: id,
                user_id: user,
                title: None,
                content: None,
                settings: Some(second),
                status: None,
            })
            .await
            .unwrap();

        assert_eq!(saved.settings().get("margins"), Some(&json!("wide")));
        assert_eq!(saved.settings().get("spacing"), Some(&json!("cozy")));
    }

    #[tokio::test]
    async fn malformed_content_blob_is_rejected() {
        let (repo, id, user) = setup().await;
        let handler = SaveNewsletterHandler::new(repo);

        let err = handler
            .handle(SaveNewsletterCommand {
                newsletter_id: id,
                user_id: user,
                title: None,
                content: Some(json!({"sections": "nope"})),
                settings: None,
                status: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn unknown_section_types_survive_a_save() {
        let (repo, id, user) = setup().await;
        let handler = SaveNewsletterHandler::new(Arc::clone(&repo));

        let content = json!({
            "version": "1.0",
            "sections": [{"id": "f1", "type": "futureType", "order": 0, "data": {"x": 1}}],
            "theme": {}
        });
        handler
            .handle(SaveNewsletterCommand {
                newsletter_id: id,
                user_id: user,
                title: None,
                content: Some(content.clone()),
                settings: None,
                status: None,
            })
            .await
            .unwrap();

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        let stored_value = serde_json::to_value(stored.content()).unwrap();
        assert_eq!(stored_value["sections"], content["sections"]);
        assert_eq!(stored_value["version"], content["version"]);
    }
}
