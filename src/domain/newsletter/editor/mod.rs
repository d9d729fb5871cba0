//! Per-type section editors.
//!
//! Each section type gets an independent two-mode editor: view mode renders
//! themed read-only markup (with graceful fallbacks for absent data), edit
//! mode renders field inputs. Every field change recomputes the *entire*
//! data record and hands it back as a [`SectionUpdate`] - the aggregate
//! merges by id and replaces `data` wholesale, never patching.

pub mod contact;
pub mod events;
pub mod header;
pub mod image;
pub mod rich_text;
pub mod title;

pub use contact::ContactEditor;
pub use events::EventsEditor;
pub use header::HeaderEditor;
pub use image::ImageEditor;
pub use rich_text::{Formatting, ListKind, RichTextEditor};
pub use title::TitleEditor;

use serde_json::Value;

use crate::domain::foundation::SectionId;

/// Whether an editor is showing read-only output or field inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    View,
    Edit,
}

/// A whole-data replacement emitted by an editor after a field change.
///
/// Routed to [`Newsletter::update_section`](super::Newsletter::update_section);
/// carries the full recomputed record, never a diff.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "an update does nothing until applied to the aggregate"]
pub struct SectionUpdate {
    pub section_id: SectionId,
    pub data: Value,
}

impl SectionUpdate {
    pub fn new(section_id: SectionId, data: Value) -> Self {
        Self { section_id, data }
    }
}
