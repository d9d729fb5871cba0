//! Newsletter HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    NewsletterListResponse, NewsletterResponse, NewsletterSummaryResponse,
    RenameNewsletterRequest, SaveNewsletterRequest, UpdateStatusRequest,
};
pub use handlers::NewsletterHandlers;
pub use routes::newsletter_router;
