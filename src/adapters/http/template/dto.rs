//! HTTP DTOs for template endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::template::Template;

// ════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════

/// Request to derive a template from a newsletter.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTemplateRequest {
    pub newsletter_id: String,
    pub name: String,
    #[serde(default)]
    pub is_public: bool,
}

// ════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════

/// Template view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub content: Value,
    pub is_public: bool,
    pub is_global: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Template> for TemplateResponse {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id().map(|id| id.to_string()).unwrap_or_default(),
            user_id: template.user_id().to_string(),
            name: template.name().to_string(),
            content: serde_json::to_value(template.content()).unwrap_or(Value::Null),
            is_public: template.is_public(),
            is_global: template.is_global(),
            created_at: template.created_at().to_string(),
            updated_at: template.updated_at().to_string(),
        }
    }
}

/// List response wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateResponse>,
}
