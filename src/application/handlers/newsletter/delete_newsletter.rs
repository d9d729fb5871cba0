//! DeleteNewsletterHandler - permanently removes a newsletter.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, NewsletterId, UserId};
use crate::ports::NewsletterRepository;

use super::load_owned;

/// Command to delete a newsletter.
#[derive(Debug, Clone)]
pub struct DeleteNewsletterCommand {
    pub newsletter_id: NewsletterId,
    pub user_id: UserId,
}

/// Handler for deleting newsletters.
pub struct DeleteNewsletterHandler {
    repository: Arc<dyn NewsletterRepository>,
}

impl DeleteNewsletterHandler {
    pub fn new(repository: Arc<dyn NewsletterRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteNewsletterCommand) -> Result<(), DomainError> {
        // Ownership check before the destructive call.
        load_owned(self.repository.as_ref(), &cmd.newsletter_id, &cmd.user_id).await?;
        self.repository.delete(&cmd.newsletter_id).await
    }
}
