//! HTTP routes for newsletter endpoints.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use super::handlers::{
    create_newsletter, delete_newsletter, export_newsletter, get_newsletter, list_newsletters,
    rename_newsletter, save_newsletter, update_status, NewsletterHandlers,
};

/// Creates the newsletter router with all endpoints.
///
/// Suitable for mounting at `/api/newsletters`.
pub fn newsletter_router(handlers: NewsletterHandlers) -> Router {
    Router::new()
        .route("/", post(create_newsletter))
        .route("/", get(list_newsletters))
        .route("/:id", get(get_newsletter))
        .route("/:id", put(save_newsletter))
        .route("/:id", delete(delete_newsletter))
        .route("/:id/rename", patch(rename_newsletter))
        .route("/:id/status", patch(update_status))
        .route("/:id/export", get(export_newsletter))
        .with_state(handlers)
}
