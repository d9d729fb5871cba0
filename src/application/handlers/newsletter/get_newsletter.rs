//! GetNewsletterHandler - loads one newsletter for its owner.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, NewsletterId, UserId};
use crate::domain::newsletter::Newsletter;
use crate::ports::NewsletterRepository;

use super::load_owned;

/// Query for a single newsletter.
#[derive(Debug, Clone)]
pub struct GetNewsletterQuery {
    pub newsletter_id: NewsletterId,
    pub user_id: UserId,
}

/// Handler for loading newsletters.
pub struct GetNewsletterHandler {
    repository: Arc<dyn NewsletterRepository>,
}

impl GetNewsletterHandler {
    pub fn new(repository: Arc<dyn NewsletterRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetNewsletterQuery) -> Result<Newsletter, DomainError> {
        load_owned(self.repository.as_ref(), &query.newsletter_id, &query.user_id).await
    }
}
