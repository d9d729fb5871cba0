//! Export adapters.

mod html_export_service;

pub use html_export_service::HtmlExportService;
