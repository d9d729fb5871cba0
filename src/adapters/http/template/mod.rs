//! Template HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateTemplateRequest, TemplateListResponse, TemplateResponse};
pub use handlers::TemplateHandlers;
pub use routes::template_router;
