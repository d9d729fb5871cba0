//! Export service port - rendered output for sharing and printing.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::newsletter::Newsletter;

/// Port for exporting a newsletter to shareable formats.
///
/// Implementations receive a read-only snapshot of the aggregate and render
/// the order-sorted section list with the document's theme merged in.
#[async_trait]
pub trait NewsletterExportService: Send + Sync {
    /// Render the newsletter to a complete HTML document.
    async fn to_html(&self, newsletter: &Newsletter) -> Result<String, ExportError>;

    /// Render the newsletter to PDF bytes.
    async fn to_pdf(&self, newsletter: &Newsletter) -> Result<Vec<u8>, ExportError>;
}

/// Errors from export rendering.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export tool unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Export failed: {0}")]
    RenderFailed(String),

    #[error("Export timed out after {0} seconds")]
    Timeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_service_is_object_safe() {
        fn _accepts_dyn(_svc: &dyn NewsletterExportService) {}
    }
}
