//! ExportNewsletterHandler - renders a newsletter for sharing.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, NewsletterId, UserId};
use crate::ports::{NewsletterExportService, NewsletterRepository};

use super::load_owned;

/// Requested export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Pdf,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Html => "text/html; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Query for an export.
#[derive(Debug, Clone)]
pub struct ExportNewsletterQuery {
    pub newsletter_id: NewsletterId,
    pub user_id: UserId,
    pub format: ExportFormat,
}

/// A rendered export ready to stream to the client.
#[derive(Debug, Clone)]
pub struct ExportedNewsletter {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Handler for exporting newsletters.
pub struct ExportNewsletterHandler {
    repository: Arc<dyn NewsletterRepository>,
    export_service: Arc<dyn NewsletterExportService>,
}

impl ExportNewsletterHandler {
    pub fn new(
        repository: Arc<dyn NewsletterRepository>,
        export_service: Arc<dyn NewsletterExportService>,
    ) -> Self {
        Self {
            repository,
            export_service,
        }
    }

    pub async fn handle(
        &self,
        query: ExportNewsletterQuery,
    ) -> Result<ExportedNewsletter, DomainError> {
        let newsletter =
            load_owned(self.repository.as_ref(), &query.newsletter_id, &query.user_id).await?;

        // The export service gets a read-only snapshot of the aggregate.
        let bytes = match query.format {
            ExportFormat::Html => self
                .export_service
                .to_html(&newsletter)
                .await
                .map(String::into_bytes),
            ExportFormat::Pdf => self.export_service.to_pdf(&newsletter).await,
        }
        .map_err(|err| DomainError::new(ErrorCode::ExportFailed, err.to_string()))?;

        let filename = format!(
            "{}.{}",
            slugify(newsletter.title()),
            query.format.extension()
        );

        Ok(ExportedNewsletter {
            filename,
            content_type: query.format.content_type(),
            bytes,
        })
    }
}

/// Filesystem-safe filename stem from a newsletter title.
fn slugify(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "newsletter".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryNewsletterRepository;
    use crate::domain::newsletter::{Newsletter, SectionFactory, SequenceIdGenerator};
    use crate::ports::ExportError;
    use async_trait::async_trait;

    struct StubExportService;

    #[async_trait]
    impl NewsletterExportService for StubExportService {
        async fn to_html(&self, newsletter: &Newsletter) -> Result<String, ExportError> {
            Ok(format!("<html>{}</html>", newsletter.title()))
        }

        async fn to_pdf(&self, _newsletter: &Newsletter) -> Result<Vec<u8>, ExportError> {
            Err(ExportError::ServiceUnavailable("pandoc not installed".into()))
        }
    }

    async fn setup() -> (ExportNewsletterHandler, NewsletterId, UserId) {
        let repo = Arc::new(InMemoryNewsletterRepository::new());
        let factory = SectionFactory::new(Arc::new(SequenceIdGenerator::new("s")));
        let user = UserId::new("teacher-1").unwrap();
        let mut newsletter = Newsletter::new(user.clone(), &factory);
        newsletter.rename_title("Week 3: Field Trip!");
        let id = repo.create(&newsletter).await.unwrap();
        (
            ExportNewsletterHandler::new(repo, Arc::new(StubExportService)),
            id,
            user,
        )
    }

    #[tokio::test]
    async fn html_export_returns_rendered_bytes_and_filename() {
        let (handler, id, user) = setup().await;
        let exported = handler
            .handle(ExportNewsletterQuery {
                newsletter_id: id,
                user_id: user,
                format: ExportFormat::Html,
            })
            .await
            .unwrap();

        assert_eq!(exported.filename, "week-3--field-trip.html");
        assert_eq!(exported.content_type, "text/html; charset=utf-8");
        assert!(String::from_utf8(exported.bytes).unwrap().contains("Week 3"));
    }

    #[tokio::test]
    async fn export_service_failure_maps_to_export_failed() {
        let (handler, id, user) = setup().await;
        let err = handler
            .handle(ExportNewsletterQuery {
                newsletter_id: id,
                user_id: user,
                format: ExportFormat::Pdf,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportFailed);
    }
}
