//! HTTP routes for template endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    create_template, delete_template, instantiate_template, list_templates, TemplateHandlers,
};

/// Creates the template router with all endpoints.
///
/// Suitable for mounting at `/api/templates`.
pub fn template_router(handlers: TemplateHandlers) -> Router {
    Router::new()
        .route("/", post(create_template))
        .route("/", get(list_templates))
        .route("/:id/instantiate", post(instantiate_template))
        .route("/:id", delete(delete_template))
        .with_state(handlers)
}
