//! InstantiateTemplateHandler - starts a newsletter from a template.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, TemplateId, UserId};
use crate::domain::newsletter::Newsletter;
use crate::ports::{NewsletterRepository, TemplateRepository};

/// Command to instantiate a template.
#[derive(Debug, Clone)]
pub struct InstantiateTemplateCommand {
    pub template_id: TemplateId,
    pub user_id: UserId,
}

/// Handler for instantiating templates.
pub struct InstantiateTemplateHandler {
    templates: Arc<dyn TemplateRepository>,
    newsletters: Arc<dyn NewsletterRepository>,
}

impl InstantiateTemplateHandler {
    pub fn new(
        templates: Arc<dyn TemplateRepository>,
        newsletters: Arc<dyn NewsletterRepository>,
    ) -> Self {
        Self {
            templates,
            newsletters,
        }
    }

    /// Copies the template's content verbatim into a new draft newsletter
    /// owned by the caller.
    pub async fn handle(
        &self,
        cmd: InstantiateTemplateCommand,
    ) -> Result<Newsletter, DomainError> {
        let template = self
            .templates
            .find_by_id(&cmd.template_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::TemplateNotFound,
                    format!("template {} not found", cmd.template_id),
                )
            })?;

        if !template.visible_to(&cmd.user_id) {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "template is not visible to this user",
            ));
        }

        let mut newsletter = template.instantiate(cmd.user_id);
        let id = self.newsletters.create(&newsletter).await?;
        newsletter.assign_id(id);
        Ok(newsletter)
    }
}
