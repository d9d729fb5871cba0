//! ListNewslettersHandler - lists a user's newsletters.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{NewsletterRepository, NewsletterSummary};

/// Query for a user's newsletter list.
#[derive(Debug, Clone)]
pub struct ListNewslettersQuery {
    pub user_id: UserId,
}

/// Handler for listing newsletters.
pub struct ListNewslettersHandler {
    repository: Arc<dyn NewsletterRepository>,
}

impl ListNewslettersHandler {
    pub fn new(repository: Arc<dyn NewsletterRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListNewslettersQuery,
    ) -> Result<Vec<NewsletterSummary>, DomainError> {
        self.repository.list_by_user(&query.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryNewsletterRepository;
    use crate::domain::newsletter::{Newsletter, SectionFactory, SequenceIdGenerator};

    #[tokio::test]
    async fn lists_only_the_users_newsletters() {
        let repo = Arc::new(InMemoryNewsletterRepository::new());
        let factory = SectionFactory::new(Arc::new(SequenceIdGenerator::new("s")));

        let mine = UserId::new("teacher-1").unwrap();
        let theirs = UserId::new("teacher-2").unwrap();
        repo.create(&Newsletter::new(mine.clone(), &factory)).await.unwrap();
        repo.create(&Newsletter::new(mine.clone(), &factory)).await.unwrap();
        repo.create(&Newsletter::new(theirs, &factory)).await.unwrap();

        let handler = ListNewslettersHandler::new(repo);
        let list = handler
            .handle(ListNewslettersQuery { user_id: mine })
            .await
            .unwrap();
        assert_eq!(list.len(), 2);
    }
}
