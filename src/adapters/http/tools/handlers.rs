//! HTTP handlers for editor tool endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::domain_error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::tools::{
    GenerateTextCommand, GenerateTextHandler, SearchImagesHandler, SearchImagesQuery,
};

use super::dto::{
    GenerateTextRequest, GenerateTextResponse, ImageSearchQuery, ImageSearchResponse,
};

// ════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ToolsHandlers {
    pub generate_text: Arc<GenerateTextHandler>,
    pub search_images: Arc<SearchImagesHandler>,
}

// ════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════

/// POST /api/tools/generate-text - AI newsletter copy
pub async fn generate_text(
    State(handlers): State<ToolsHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<GenerateTextRequest>,
) -> Response {
    match handlers
        .generate_text
        .handle(GenerateTextCommand {
            user_id: user.id,
            prompt: req.prompt,
            tone: req.tone,
            max_words: req.max_words,
        })
        .await
    {
        Ok(text) => (StatusCode::OK, Json(GenerateTextResponse::from(text))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/tools/images?query=... - Stock photo search
pub async fn search_images(
    State(handlers): State<ToolsHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ImageSearchQuery>,
) -> Response {
    match handlers
        .search_images
        .handle(SearchImagesQuery {
            user_id: user.id,
            query: params.query,
            per_page: params.per_page,
            orientation: params.orientation,
        })
        .await
    {
        Ok(results) => (StatusCode::OK, Json(ImageSearchResponse { results })).into_response(),
        Err(e) => domain_error_response(e),
    }
}
