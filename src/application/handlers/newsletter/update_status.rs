//! UpdateStatusHandler - moves a newsletter between lifecycle states.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, NewsletterId, NewsletterStatus, UserId};
use crate::domain::newsletter::Newsletter;
use crate::ports::NewsletterRepository;

use super::load_owned;

/// Command to change a newsletter's status.
#[derive(Debug, Clone)]
pub struct UpdateStatusCommand {
    pub newsletter_id: NewsletterId,
    pub user_id: UserId,
    pub status: NewsletterStatus,
}

/// Handler for status changes.
pub struct UpdateStatusHandler {
    repository: Arc<dyn NewsletterRepository>,
}

impl UpdateStatusHandler {
    pub fn new(repository: Arc<dyn NewsletterRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateStatusCommand) -> Result<Newsletter, DomainError> {
        let mut newsletter =
            load_owned(self.repository.as_ref(), &cmd.newsletter_id, &cmd.user_id).await?;
        newsletter.set_status(cmd.status);
        self.repository.update(&newsletter).await?;
        Ok(newsletter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryNewsletterRepository;
    use crate::domain::newsletter::{SectionFactory, SequenceIdGenerator};

    #[tokio::test]
    async fn publishes_a_draft() {
        let repo: Arc<dyn NewsletterRepository> = Arc::new(InMemoryNewsletterRepository::new());
        let factory = SectionFactory::new(Arc::new(SequenceIdGenerator::new("s")));
        let user = UserId::new("teacher-1").unwrap();
        let id = repo
            .create(&Newsletter::new(user.clone(), &factory))
            .await
            .unwrap();

        let handler = UpdateStatusHandler::new(Arc::clone(&repo));
        let updated = handler
            .handle(UpdateStatusCommand {
                newsletter_id: id,
                user_id: user,
                status: NewsletterStatus::Published,
            })
            .await
            .unwrap();

        assert_eq!(updated.status(), NewsletterStatus::Published);
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.status(), NewsletterStatus::Published);
    }
}
