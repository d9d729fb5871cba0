//! CreateNewsletterHandler - creates a new draft newsletter.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::newsletter::{Newsletter, SectionFactory};
use crate::ports::NewsletterRepository;

/// Command to create a new newsletter.
#[derive(Debug, Clone)]
pub struct CreateNewsletterCommand {
    pub user_id: UserId,
}

/// Handler for creating newsletters.
pub struct CreateNewsletterHandler {
    repository: Arc<dyn NewsletterRepository>,
    factory: SectionFactory,
}

impl CreateNewsletterHandler {
    pub fn new(repository: Arc<dyn NewsletterRepository>, factory: SectionFactory) -> Self {
        Self {
            repository,
            factory,
        }
    }

    /// Creates an empty draft (four default sections, default theme),
    /// persists it, and returns the aggregate with its storage-assigned id.
    pub async fn handle(&self, cmd: CreateNewsletterCommand) -> Result<Newsletter, DomainError> {
        let mut newsletter = Newsletter::new(cmd.user_id, &self.factory);
        let id = self.repository.create(&newsletter).await?;
        newsletter.assign_id(id);
        Ok(newsletter)
    }
}
