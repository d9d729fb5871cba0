//! Section - one typed block of newsletter content.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::SectionId;

use super::section_type::SectionKind;

/// One typed, ordered block of newsletter content.
///
/// `data` is held as the raw stored JSON: typed views are parsed on demand
/// by the editors and renderer, and the stored bytes are never rewritten
/// except by a whole-data replacement from an editor. This is what lets
/// unknown keys, unknown shapes, and unknown section types survive a
/// load→save round trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSection", into = "RawSection")]
pub struct Section {
    id: SectionId,
    kind: SectionKind,
    order: u32,
    data: Option<Value>,
}

/// Wire shape of a section inside the content blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSection {
    id: SectionId,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl From<RawSection> for Section {
    fn from(raw: RawSection) -> Self {
        Section {
            id: raw.id,
            kind: SectionKind::parse(&raw.kind),
            order: raw.order,
            data: raw.data,
        }
    }
}

impl From<Section> for RawSection {
    fn from(section: Section) -> Self {
        RawSection {
            id: section.id,
            kind: section.kind.as_str().to_string(),
            order: section.order,
            data: section.data,
        }
    }
}

impl Section {
    /// Assembles a section from its parts. Used by the factory and tests;
    /// loaded documents come through deserialization instead.
    pub fn new(id: SectionId, kind: SectionKind, order: u32, data: Option<Value>) -> Self {
        Self {
            id,
            kind,
            order,
            data,
        }
    }

    /// Returns the section id.
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    /// Returns the section's type tag.
    pub fn kind(&self) -> &SectionKind {
        &self.kind
    }

    /// Returns the sort key.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Returns the raw stored data, if any.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Replaces the entire data object.
    ///
    /// Editors always send the full recomputed record, never a diff; the
    /// aggregate merges by id and swaps `data` wholesale.
    pub fn replace_data(&mut self, data: Value) {
        self.data = Some(data);
    }

    /// Sets the sort key. Only the aggregate's reorder re-normalization
    /// calls this.
    pub(crate) fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}
