//! PostgreSQL adapters - production persistence.

mod newsletter_repository;
mod template_repository;

pub use newsletter_repository::PostgresNewsletterRepository;
pub use template_repository::PostgresTemplateRepository;
