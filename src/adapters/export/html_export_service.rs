//! HTML/PDF export adapter.
//!
//! HTML rendering is pure Rust: the order-sorted section list is dispatched
//! through the section renderer and wrapped in a themed document shell.
//! PDF conversion shells out to Pandoc, which must be installed on the
//! system; when it is not, PDF export returns `ServiceUnavailable`.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::domain::newsletter::render::{markup, render_section};
use crate::domain::newsletter::Newsletter;
use crate::ports::{ExportError, NewsletterExportService};

/// Export service rendering sections to HTML, with Pandoc for PDF.
#[derive(Debug, Clone)]
pub struct HtmlExportService {
    /// Path to the pandoc executable. If None, searches PATH.
    pandoc_path: Option<String>,
    /// Timeout for PDF conversion.
    pdf_timeout_secs: u64,
}

impl HtmlExportService {
    /// Creates an export service with default settings.
    pub fn new() -> Self {
        Self {
            pandoc_path: None,
            pdf_timeout_secs: 30,
        }
    }

    /// Sets a custom path to the Pandoc executable.
    pub fn with_pandoc_path(mut self, path: impl Into<String>) -> Self {
        self.pandoc_path = Some(path.into());
        self
    }

    /// Sets the timeout for PDF conversion.
    pub fn with_pdf_timeout(mut self, timeout_secs: u64) -> Self {
        self.pdf_timeout_secs = timeout_secs;
        self
    }

    fn pandoc_command(&self) -> &str {
        self.pandoc_path.as_deref().unwrap_or("pandoc")
    }

    /// Renders the sorted section list into a complete HTML document with
    /// the theme merged in.
    fn render_document(&self, newsletter: &Newsletter) -> String {
        let theme = newsletter.theme();

        let mut body = String::new();
        for section in newsletter.sorted_sections() {
            body.push_str(&render_section(section, theme).html);
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
:root {{
    --primary-color: {primary};
    --background-color: {background};
}}
body {{
    font-family: {font};
    background-color: var(--background-color);
    margin: 0;
}}
{css}
    </style>
</head>
<body>
    <article class="newsletter">
{body}
    </article>
</body>
</html>
"#,
            title = markup::escape(newsletter.title()),
            primary = markup::escape(&theme.primary_color),
            background = markup::escape(&theme.background_color),
            font = markup::escape(&theme.font_family),
            css = DEFAULT_CSS,
            body = body,
        )
    }
}

impl Default for HtmlExportService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsletterExportService for HtmlExportService {
    async fn to_html(&self, newsletter: &Newsletter) -> Result<String, ExportError> {
        Ok(self.render_document(newsletter))
    }

    async fn to_pdf(&self, newsletter: &Newsletter) -> Result<Vec<u8>, ExportError> {
        let html = self.render_document(newsletter);

        let mut child = Command::new(self.pandoc_command())
            .args(["-f", "html", "-t", "pdf", "-o", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ExportError::ServiceUnavailable(format!("pandoc not available: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(html.as_bytes())
                .await
                .map_err(|e| ExportError::RenderFailed(format!("failed to feed pandoc: {e}")))?;
        }

        let timeout = Duration::from_secs(self.pdf_timeout_secs);
        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| ExportError::Timeout(self.pdf_timeout_secs))?
            .map_err(|e| ExportError::RenderFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExportError::RenderFailed(format!(
                "pandoc exited with {}: {}",
                output.status, stderr
            )));
        }

        Ok(output.stdout)
    }
}

/// Print-friendly defaults layered under the document theme.
const DEFAULT_CSS: &str = r#"
.newsletter {
    max-width: 720px;
    margin: 0 auto;
    padding: 24px;
}
.section-header { padding: 32px 16px; }
.section-header .subtitle { margin: 4px 0 0; opacity: 0.85; }
.section-title h2 { margin: 24px 0 8px; }
.section-rich-text { line-height: 1.6; }
.section-events .event-list { list-style: none; padding: 0; }
.section-events .event-date { font-variant-numeric: tabular-nums; margin-right: 8px; }
.section-contact dl { display: grid; grid-template-columns: auto 1fr; gap: 4px 16px; }
.section-contact dt { font-weight: 600; }
.section-image img { max-width: 100%; }
.section-image.img-small img { max-width: 33%; }
.section-image.img-medium img { max-width: 66%; }
.section-image.img-frame-rounded img { border-radius: 12px; }
.section-image.img-frame-circle img { border-radius: 50%; aspect-ratio: 1; object-fit: cover; }
.section-unknown { border: 1px dashed #b91c1c; color: #b91c1c; padding: 12px; }
.empty-state { color: #6b7280; font-style: italic; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::newsletter::{SectionFactory, SequenceIdGenerator};
    use std::sync::Arc;

    fn newsletter() -> Newsletter {
        let factory = SectionFactory::new(Arc::new(SequenceIdGenerator::new("s")));
        Newsletter::new(UserId::new("teacher-1").unwrap(), &factory)
    }

    #[tokio::test]
    async fn html_export_contains_every_section_in_visual_order() {
        let mut newsletter = newsletter();
        newsletter.reorder(0, 3).unwrap();
        let service = HtmlExportService::new();

        let html = service.to_html(&newsletter).await.unwrap();

        // Title section was moved below contact.
        let title_pos = html.find("section-title").unwrap();
        let contact_pos = html.find("section-contact").unwrap();
        assert!(contact_pos < title_pos);
        assert!(html.contains("section-rich-text"));
        assert!(html.contains("section-events"));
    }

    #[tokio::test]
    async fn theme_colors_are_woven_into_the_shell() {
        let newsletter = newsletter();
        let service = HtmlExportService::new();
        let html = service.to_html(&newsletter).await.unwrap();

        assert!(html.contains(&format!(
            "--primary-color: {}",
            newsletter.theme().primary_color
        )));
    }

    #[tokio::test]
    async fn document_title_is_escaped() {
        let mut newsletter = newsletter();
        newsletter.rename_title("<script>week</script>");
        let service = HtmlExportService::new();
        let html = service.to_html(&newsletter).await.unwrap();
        assert!(html.contains("&lt;script&gt;week&lt;/script&gt;"));
    }
}
