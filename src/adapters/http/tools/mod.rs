//! Editor tools HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    GenerateTextRequest, GenerateTextResponse, ImageSearchQuery, ImageSearchResponse,
};
pub use handlers::ToolsHandlers;
pub use routes::tools_router;
