//! HTTP routes for editor tool endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{generate_text, search_images, ToolsHandlers};

/// Creates the tools router.
///
/// Suitable for mounting at `/api/tools`.
pub fn tools_router(handlers: ToolsHandlers) -> Router {
    Router::new()
        .route("/generate-text", post(generate_text))
        .route("/images", get(search_images))
        .with_state(handlers)
}
