//! HTTP DTOs for newsletter endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing
//! independent evolution.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::NewsletterStatus;
use crate::domain::newsletter::Newsletter;
use crate::ports::NewsletterSummary;

// ════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════

/// Save payload: any subset of the document's savable state.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveNewsletterRequest {
    #[serde(default)]
    pub title: Option<String>,
    /// Whole content blob `{version, sections, theme}`.
    #[serde(default)]
    pub content: Option<Value>,
    /// Shallow-merged settings patch.
    #[serde(default)]
    pub settings: Option<Map<String, Value>>,
    #[serde(default)]
    pub status: Option<NewsletterStatus>,
}

/// Request to rename a newsletter.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameNewsletterRequest {
    pub title: String,
}

/// Request to change lifecycle status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: NewsletterStatus,
}

/// Query parameters for export.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportQuery {
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "html".to_string()
}

// ════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════

/// Full newsletter view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct NewsletterResponse {
    pub id: String,
    pub title: String,
    pub content: Value,
    pub settings: Value,
    pub status: NewsletterStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Newsletter> for NewsletterResponse {
    fn from(newsletter: &Newsletter) -> Self {
        Self {
            id: newsletter
                .id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            title: newsletter.title().to_string(),
            content: serde_json::to_value(newsletter.content()).unwrap_or(Value::Null),
            settings: Value::Object(newsletter.settings().clone()),
            status: newsletter.status(),
            created_at: newsletter.created_at().to_string(),
            updated_at: newsletter.updated_at().to_string(),
        }
    }
}

/// Summary row for list responses.
#[derive(Debug, Clone, Serialize)]
pub struct NewsletterSummaryResponse {
    pub id: String,
    pub title: String,
    pub status: NewsletterStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<NewsletterSummary> for NewsletterSummaryResponse {
    fn from(summary: NewsletterSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            title: summary.title,
            status: summary.status,
            created_at: summary.created_at.to_string(),
            updated_at: summary.updated_at.to_string(),
        }
    }
}

/// List response wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct NewsletterListResponse {
    pub newsletters: Vec<NewsletterSummaryResponse>,
}
