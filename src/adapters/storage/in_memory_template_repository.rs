//! In-memory implementation of TemplateRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, TemplateId, UserId};
use crate::domain::template::Template;
use crate::ports::TemplateRepository;

/// In-memory template store.
#[derive(Debug, Default)]
pub struct InMemoryTemplateRepository {
    rows: Mutex<HashMap<TemplateId, Template>>,
}

impl InMemoryTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn create(&self, template: &Template) -> Result<TemplateId, DomainError> {
        let id = TemplateId::new();
        let mut stored = template.clone();
        stored.assign_id(id);
        self.rows.lock().expect("lock poisoned").insert(id, stored);
        Ok(id)
    }

    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<Template>, DomainError> {
        Ok(self.rows.lock().expect("lock poisoned").get(id).cloned())
    }

    async fn list_visible_to(&self, user_id: &UserId) -> Result<Vec<Template>, DomainError> {
        let rows = self.rows.lock().expect("lock poisoned");
        let mut visible: Vec<Template> = rows
            .values()
            .filter(|t| t.visible_to(user_id))
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        Ok(visible)
    }

    async fn delete(&self, id: &TemplateId) -> Result<(), DomainError> {
        let removed = self.rows.lock().expect("lock poisoned").remove(id);
        if removed.is_none() {
            return Err(DomainError::new(
                ErrorCode::TemplateNotFound,
                format!("template {id} not found"),
            ));
        }
        Ok(())
    }
}
