//! RenameNewsletterHandler - renames the document (top-level title only).

use std::sync::Arc;

use crate::domain::foundation::{DomainError, NewsletterId, UserId};
use crate::domain::newsletter::Newsletter;
use crate::ports::NewsletterRepository;

use super::load_owned;

/// Command to rename a newsletter.
#[derive(Debug, Clone)]
pub struct RenameNewsletterCommand {
    pub newsletter_id: NewsletterId,
    pub user_id: UserId,
    pub title: String,
}

/// Handler for renaming newsletters.
pub struct RenameNewsletterHandler {
    repository: Arc<dyn NewsletterRepository>,
}

impl RenameNewsletterHandler {
    pub fn new(repository: Arc<dyn NewsletterRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: RenameNewsletterCommand) -> Result<Newsletter, DomainError> {
        let mut newsletter =
            load_owned(self.repository.as_ref(), &cmd.newsletter_id, &cmd.user_id).await?;
        newsletter.rename_title(cmd.title);
        self.repository.update(&newsletter).await?;
        Ok(newsletter)
    }
}
