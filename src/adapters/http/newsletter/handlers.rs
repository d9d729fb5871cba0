//! HTTP handlers for newsletter endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::{domain_error_response, ErrorResponse};
use crate::application::handlers::newsletter::{
    CreateNewsletterCommand, CreateNewsletterHandler, DeleteNewsletterCommand,
    DeleteNewsletterHandler, ExportFormat, ExportNewsletterHandler, ExportNewsletterQuery,
    GetNewsletterHandler, GetNewsletterQuery, ListNewslettersHandler, ListNewslettersQuery,
    RenameNewsletterCommand, RenameNewsletterHandler, SaveNewsletterCommand,
    SaveNewsletterHandler, UpdateStatusCommand, UpdateStatusHandler,
};
use crate::domain::foundation::NewsletterId;

use super::dto::{
    ExportQuery as ExportQueryParams, NewsletterListResponse, NewsletterResponse,
    RenameNewsletterRequest, SaveNewsletterRequest, UpdateStatusRequest,
};

// ════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct NewsletterHandlers {
    pub create: Arc<CreateNewsletterHandler>,
    pub get: Arc<GetNewsletterHandler>,
    pub list: Arc<ListNewslettersHandler>,
    pub save: Arc<SaveNewsletterHandler>,
    pub rename: Arc<RenameNewsletterHandler>,
    pub update_status: Arc<UpdateStatusHandler>,
    pub delete: Arc<DeleteNewsletterHandler>,
    pub export: Arc<ExportNewsletterHandler>,
}

fn parse_id(raw: &str) -> Result<NewsletterId, Response> {
    raw.parse::<NewsletterId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid newsletter ID")),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════

/// POST /api/newsletters - Create a new draft newsletter
pub async fn create_newsletter(
    State(handlers): State<NewsletterHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .create
        .handle(CreateNewsletterCommand { user_id: user.id })
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

/// GET /api/newsletters - List the caller's newsletters
pub async fn list_newsletters(
    State(handlers): State<NewsletterHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .list
        .handle(ListNewslettersQuery { user_id: user.id })
        .await
    {
        Ok(summaries) => {
            let response = NewsletterListResponse {
                newsletters: summaries.into_iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/newsletters/:id - Load one newsletter
pub async fn get_newsletter(
    State(handlers): State<NewsletterHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let newsletter_id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get
        .handle(GetNewsletterQuery {
            newsletter_id,
            user_id: user.id,
        })
        .await
    {
        Ok(newsletter) => {
            (StatusCode::OK, Json(NewsletterResponse::from(&newsletter))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// PUT /api/newsletters/:id - Save the document state
pub async fn save_newsletter(
    State(handlers): State<NewsletterHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<SaveNewsletterRequest>,
) -> Response {
    let newsletter_id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .save
        .handle(SaveNewsletterCommand {
            newsletter_id,
            user_id: user.id,
            title: req.title,
            content: req.content,
            settings: req.settings,
            status: req.status,
        })
        .await
    {
        Ok(newsletter) => {
            (StatusCode::OK, Json(NewsletterResponse::from(&newsletter))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// PATCH /api/newsletters/:id/rename - Rename the document
pub async fn rename_newsletter(
    State(handlers): State<NewsletterHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<RenameNewsletterRequest>,
) -> Response {
    let newsletter_id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .rename
        .handle(RenameNewsletterCommand {
            newsletter_id,
            user_id: user.id,
            title: req.title,
        })
        .await
    {
        Ok(newsletter) => {
            (StatusCode::OK, Json(NewsletterResponse::from(&newsletter))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// PATCH /api/newsletters/:id/status - Change lifecycle status
pub async fn update_status(
    State(handlers): State<NewsletterHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Response {
    let newsletter_id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .update_status
        .handle(UpdateStatusCommand {
            newsletter_id,
            user_id: user.id,
            status: req.status,
        })
        .await
    {
        Ok(newsletter) => {
            (StatusCode::OK, Json(NewsletterResponse::from(&newsletter))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// DELETE /api/newsletters/:id - Delete a newsletter
pub async fn delete_newsletter(
    State(handlers): State<NewsletterHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let newsletter_id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .delete
        .handle(DeleteNewsletterCommand {
            newsletter_id,
            user_id: user.id,
        })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/newsletters/:id/export?format=html|pdf - Export rendered output
pub async fn export_newsletter(
    State(handlers): State<NewsletterHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Query(params): Query<ExportQueryParams>,
) -> Response {
    let newsletter_id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let format = match params.format.as_str() {
        "html" => ExportFormat::Html,
        "pdf" => ExportFormat::Pdf,
        other => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(format!(
                    "Unsupported export format: {other}"
                ))),
            )
                .into_response()
        }
    };

    match handlers
        .export
        .handle(ExportNewsletterQuery {
            newsletter_id,
            user_id: user.id,
            format,
        })
        .await
    {
        Ok(exported) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, exported.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", exported.filename),
                ),
            ],
            exported.bytes,
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}
