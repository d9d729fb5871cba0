//! CreateTemplateHandler - captures a newsletter as a reusable template.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, NewsletterId, UserId};
use crate::domain::template::Template;
use crate::ports::{NewsletterRepository, TemplateRepository};

use crate::application::handlers::newsletter::load_owned;

/// Command to derive a template from a newsletter.
#[derive(Debug, Clone)]
pub struct CreateTemplateCommand {
    pub newsletter_id: NewsletterId,
    pub user_id: UserId,
    pub name: String,
    pub is_public: bool,
}

/// Handler for creating templates.
pub struct CreateTemplateHandler {
    newsletters: Arc<dyn NewsletterRepository>,
    templates: Arc<dyn TemplateRepository>,
}

impl CreateTemplateHandler {
    pub fn new(
        newsletters: Arc<dyn NewsletterRepository>,
        templates: Arc<dyn TemplateRepository>,
    ) -> Self {
        Self {
            newsletters,
            templates,
        }
    }

    /// Copies the newsletter's content and settings verbatim into a new
    /// template owned by the caller.
    pub async fn handle(&self, cmd: CreateTemplateCommand) -> Result<Template, DomainError> {
        let newsletter =
            load_owned(self.newsletters.as_ref(), &cmd.newsletter_id, &cmd.user_id).await?;

        let mut template = Template::from_newsletter(cmd.name, &newsletter, cmd.is_public);
        let id = self.templates.create(&template).await?;
        template.assign_id(id);
        Ok(template)
    }
}
