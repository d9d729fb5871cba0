//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod middleware;
pub mod newsletter;
pub mod template;
pub mod tools;

pub use newsletter::{newsletter_router, NewsletterHandlers};
pub use template::{template_router, TemplateHandlers};
pub use tools::{tools_router, ToolsHandlers};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Error body shared by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, "BAD_REQUEST")
    }
}

/// Maps a domain error to its HTTP response.
pub fn domain_error_response(err: DomainError) -> Response {
    let status = match err.code {
        ErrorCode::NewsletterNotFound | ErrorCode::TemplateNotFound | ErrorCode::SectionNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat
        | ErrorCode::SectionIndexOutOfRange
        | ErrorCode::ImmutableSectionType => StatusCode::BAD_REQUEST,
        ErrorCode::AiProviderError | ErrorCode::ImageProviderError | ErrorCode::ExportFailed => {
            StatusCode::BAD_GATEWAY
        }
        ErrorCode::DatabaseError | ErrorCode::SerializationFailed | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        tracing::error!(code = %err.code, "request failed: {}", err.message);
    }

    (
        status,
        Json(ErrorResponse::new(err.message, err.code.to_string())),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_codes_map_to_404() {
        let response =
            domain_error_response(DomainError::new(ErrorCode::NewsletterNotFound, "nope"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn collaborator_failures_map_to_502() {
        let response = domain_error_response(DomainError::new(ErrorCode::ExportFailed, "pandoc"));
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
