//! HTTP middleware - authentication and rate limiting.

mod auth;
mod rate_limit;

pub use auth::{auth_middleware, AuthState, RequireAuth};
pub use rate_limit::{rate_limit_middleware, RateLimiterState};
