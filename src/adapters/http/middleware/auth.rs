//! Authentication middleware and extractors for axum.
//!
//! The middleware validates Bearer tokens through the `AuthTokenValidator`
//! port and injects the `AuthenticatedUser` into request extensions; the
//! `RequireAuth` extractor reads it back in handlers. Swapping identity
//! providers (JWT, mock, an OIDC introspector) never touches this file.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::AuthTokenValidator;

/// Auth middleware state - the token validator.
pub type AuthState = Arc<dyn AuthTokenValidator>;

/// Authentication middleware that validates Bearer tokens.
///
/// 1. Extracts the token from the `Authorization: Bearer <token>` header
/// 2. Validates it via the `AuthTokenValidator` port
/// 3. On success, injects `AuthenticatedUser` into request extensions
/// 4. On missing token, continues without injecting (public routes)
/// 5. On invalid token, returns 401
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match validator.validate(token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
            Err(e) => {
                let (status, message) = match &e {
                    AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
                    AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
                    AuthError::ServiceUnavailable(msg) => {
                        tracing::error!("Auth service unavailable: {}", msg);
                        (
                            StatusCode::SERVICE_UNAVAILABLE,
                            "Authentication service unavailable",
                        )
                    }
                };

                (
                    status,
                    Json(serde_json::json!({
                        "error": message,
                        "code": "AUTH_ERROR"
                    })),
                )
                    .into_response()
            }
        },
        None => next.run(request).await,
    }
}

/// Extractor that requires an authenticated user.
///
/// Returns 401 when the auth middleware did not inject a user (no token or
/// middleware not mounted on this route).
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({
                        "error": "Authentication required",
                        "code": "AUTH_REQUIRED"
                    })),
                )
                    .into_response()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockTokenValidator;
    use axum::{body::Body, http::Request as HttpRequest, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn whoami(RequireAuth(user): RequireAuth) -> String {
        user.id.to_string()
    }

    fn app() -> Router {
        let validator: AuthState = Arc::new(MockTokenValidator::new().with_user("tok-1", "teacher-1"));
        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn_with_state(validator, auth_middleware))
    }

    #[tokio::test]
    async fn valid_token_reaches_the_handler() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header("Authorization", "Bearer tok-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized_on_protected_routes() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn bad_token_is_unauthorized() {
        let response = app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header("Authorization", "Bearer wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
