//! In-memory implementation of NewsletterRepository.
//!
//! Backs tests and local development; production uses the Postgres
//! adapter. Supports error injection so handler tests can exercise save
//! failure paths.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, NewsletterId, UserId};
use crate::domain::newsletter::Newsletter;
use crate::ports::{NewsletterRepository, NewsletterSummary};

/// In-memory newsletter store.
#[derive(Debug, Default)]
pub struct InMemoryNewsletterRepository {
    rows: Mutex<HashMap<NewsletterId, Newsletter>>,
    fail: AtomicBool,
}

impl InMemoryNewsletterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// When true, every operation returns a database error.
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::database("in-memory store set to fail"));
        }
        Ok(())
    }
}

#[async_trait]
impl NewsletterRepository for InMemoryNewsletterRepository {
    async fn create(&self, newsletter: &Newsletter) -> Result<NewsletterId, DomainError> {
        self.check_available()?;
        let id = NewsletterId::new();
        let mut stored = newsletter.clone();
        stored.assign_id(id);
        self.rows.lock().expect("lock poisoned").insert(id, stored);
        Ok(id)
    }

    async fn update(&self, newsletter: &Newsletter) -> Result<(), DomainError> {
        self.check_available()?;
        let id = newsletter.id().ok_or_else(|| {
            DomainError::new(ErrorCode::ValidationFailed, "cannot update an unsaved newsletter")
        })?;

        let mut rows = self.rows.lock().expect("lock poisoned");
        if !rows.contains_key(&id) {
            return Err(DomainError::new(
                ErrorCode::NewsletterNotFound,
                format!("newsletter {id} not found"),
            ));
        }
        rows.insert(id, newsletter.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &NewsletterId) -> Result<Option<Newsletter>, DomainError> {
        self.check_available()?;
        Ok(self.rows.lock().expect("lock poisoned").get(id).cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<NewsletterSummary>, DomainError> {
        self.check_available()?;
        let rows = self.rows.lock().expect("lock poisoned");
        let mut summaries: Vec<NewsletterSummary> = rows
            .values()
            .filter(|n| n.user_id() == user_id)
            .map(|n| NewsletterSummary {
                id: n.id().expect("stored newsletters always carry an id"),
                title: n.title().to_string(),
                status: n.status(),
                created_at: n.created_at(),
                updated_at: n.updated_at(),
            })
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    async fn delete(&self, id: &NewsletterId) -> Result<(), DomainError> {
        self.check_available()?;
        let removed = self.rows.lock().expect("lock poisoned").remove(id);
        if removed.is_none() {
            return Err(DomainError::new(
                ErrorCode::NewsletterNotFound,
                format!("newsletter {id} not found"),
            ));
        }
        Ok(())
    }
}
