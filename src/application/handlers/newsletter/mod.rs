//! Newsletter command/query handlers.

mod create_newsletter;
mod delete_newsletter;
mod export_newsletter;
mod get_newsletter;
mod list_newsletters;
mod rename_newsletter;
mod save_newsletter;
mod update_status;

pub use create_newsletter::{CreateNewsletterCommand, CreateNewsletterHandler};
pub use delete_newsletter::{DeleteNewsletterCommand, DeleteNewsletterHandler};
pub use export_newsletter::{
    ExportFormat, ExportNewsletterHandler, ExportNewsletterQuery, ExportedNewsletter,
};
pub use get_newsletter::{GetNewsletterHandler, GetNewsletterQuery};
pub use list_newsletters::{ListNewslettersHandler, ListNewslettersQuery};
pub use rename_newsletter::{RenameNewsletterCommand, RenameNewsletterHandler};
pub use save_newsletter::{SaveNewsletterCommand, SaveNewsletterHandler};
pub use update_status::{UpdateStatusCommand, UpdateStatusHandler};

use crate::domain::foundation::{DomainError, ErrorCode, NewsletterId, UserId};
use crate::domain::newsletter::Newsletter;
use crate::ports::NewsletterRepository;

/// Loads a newsletter and checks the caller owns it.
pub(crate) async fn load_owned(
    repository: &dyn NewsletterRepository,
    id: &NewsletterId,
    user_id: &UserId,
) -> Result<Newsletter, DomainError> {
    let newsletter = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::new(ErrorCode::NewsletterNotFound, format!("newsletter {id} not found")))?;

    if newsletter.user_id() != user_id {
        return Err(DomainError::new(
            ErrorCode::Forbidden,
            "newsletter belongs to another user",
        ));
    }

    Ok(newsletter)
}
