//! HTTP handlers for template endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::newsletter::NewsletterResponse;
use crate::adapters::http::{domain_error_response, ErrorResponse};
use crate::application::handlers::template::{
    CreateTemplateCommand, CreateTemplateHandler, DeleteTemplateCommand, DeleteTemplateHandler,
    InstantiateTemplateCommand, InstantiateTemplateHandler, ListTemplatesHandler,
    ListTemplatesQuery,
};
use crate::domain::foundation::{NewsletterId, TemplateId};

use super::dto::{CreateTemplateRequest, TemplateListResponse, TemplateResponse};

// ════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct TemplateHandlers {
    pub create: Arc<CreateTemplateHandler>,
    pub list: Arc<ListTemplatesHandler>,
    pub instantiate: Arc<InstantiateTemplateHandler>,
    pub delete: Arc<DeleteTemplateHandler>,
}

fn parse_template_id(raw: &str) -> Result<TemplateId, Response> {
    raw.parse::<TemplateId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid template ID")),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════

/// POST /api/templates - Capture a newsletter as a template
pub async fn create_template(
    State(handlers): State<TemplateHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateTemplateRequest>,
) -> Response {
    let newsletter_id = match req.newsletter_id.parse::<NewsletterId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid newsletter ID")),
            )
                .into_response()
        }
    };

    match handlers
        .create
        .handle(CreateTemplateCommand {
            newsletter_id,
            user_id: user.id,
            name: req.name,
            is_public: req.is_public,
        })
        .await
    {
        Ok(template) => {
            (StatusCode::CREATED, Json(TemplateResponse::from(&template))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/templates - List templates visible to the caller
pub async fn list_templates(
    State(handlers): State<TemplateHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .list
        .handle(ListTemplatesQuery { user_id: user.id })
        .await
    {
        Ok(templates) => {
            let response = TemplateListResponse {
                templates: templates.iter().map(TemplateResponse::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/templates/:id/instantiate - Start a newsletter from a template
pub async fn instantiate_template(
    State(handlers): State<TemplateHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let template_id = match parse_template_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .instantiate
        .handle(InstantiateTemplateCommand {
            template_id,
            user_id: user.id,
        })
        .await
    {
        Ok(newsletter) => (
            StatusCode::CREATED,
            Json(NewsletterResponse::from(&newsletter)),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// DELETE /api/templates/:id - Delete an owned template
pub async fn delete_template(
    State(handlers): State<TemplateHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let template_id = match parse_template_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .delete
        .handle(DeleteTemplateCommand {
            template_id,
            user_id: user.id,
        })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}
