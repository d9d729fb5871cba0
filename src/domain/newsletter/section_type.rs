//! SectionType - the closed set of section variants a newsletter is built from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six section types this build knows how to edit and render.
///
/// Wire tags are camelCase (`richText`) to match the stored content blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionType {
    Header,
    Title,
    RichText,
    Events,
    Contact,
    Image,
}

impl SectionType {
    /// Returns all known section types in palette order.
    pub fn all() -> &'static [SectionType] {
        &[
            SectionType::Header,
            SectionType::Title,
            SectionType::RichText,
            SectionType::Events,
            SectionType::Contact,
            SectionType::Image,
        ]
    }

    /// Returns the wire tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Header => "header",
            SectionType::Title => "title",
            SectionType::RichText => "richText",
            SectionType::Events => "events",
            SectionType::Contact => "contact",
            SectionType::Image => "image",
        }
    }

    /// Parses a wire tag into a known type, if this build recognizes it.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.as_str() == tag)
    }

    /// Returns the display name shown in the editor palette.
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionType::Header => "Header",
            SectionType::Title => "Title",
            SectionType::RichText => "Rich Text",
            SectionType::Events => "Events",
            SectionType::Contact => "Contact",
            SectionType::Image => "Image",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A section's type tag as stored, tolerant of tags from newer schemas.
///
/// Documents may contain section types this build does not know about; those
/// must load, render as a flagged placeholder, and save back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Known(SectionType),
    Unknown(String),
}

impl SectionKind {
    /// Parses a wire tag, falling back to `Unknown` for unrecognized tags.
    pub fn parse(tag: &str) -> Self {
        match SectionType::parse(tag) {
            Some(known) => SectionKind::Known(known),
            None => SectionKind::Unknown(tag.to_string()),
        }
    }

    /// Returns the wire tag.
    pub fn as_str(&self) -> &str {
        match self {
            SectionKind::Known(t) => t.as_str(),
            SectionKind::Unknown(tag) => tag,
        }
    }

    /// Returns the known type, if any.
    pub fn known(&self) -> Option<SectionType> {
        match self {
            SectionKind::Known(t) => Some(*t),
            SectionKind::Unknown(_) => None,
        }
    }
}

impl From<SectionType> for SectionKind {
    fn from(t: SectionType) -> Self {
        SectionKind::Known(t)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_tag_round_trips() {
        for t in SectionType::all() {
            assert_eq!(SectionType::parse(t.as_str()), Some(*t));
        }
    }

    #[test]
    fn rich_text_uses_camel_case_tag() {
        assert_eq!(SectionType::RichText.as_str(), "richText");
        let json = serde_json::to_string(&SectionType::RichText).unwrap();
        assert_eq!(json, "\"richText\"");
    }

    #[test]
    fn unknown_tag_is_preserved_verbatim() {
        let kind = SectionKind::parse("futureType");
        assert_eq!(kind, SectionKind::Unknown("futureType".to_string()));
        assert_eq!(kind.as_str(), "futureType");
        assert_eq!(kind.known(), None);
    }

    #[test]
    fn known_tag_parses_to_known_kind() {
        assert_eq!(
            SectionKind::parse("events"),
            SectionKind::Known(SectionType::Events)
        );
    }
}
