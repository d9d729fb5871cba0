//! Section renderer - polymorphic dispatch over the closed section variant
//! set.

use crate::domain::newsletter::editor::{contact, events, header, image, rich_text, title};
use crate::domain::newsletter::section::Section;
use crate::domain::newsletter::section_data::{
    ContactData, EventsData, HeaderData, ImageData, RichTextData, TitleData, TypedSectionData,
};
use crate::domain::newsletter::section_type::{SectionKind, SectionType};
use crate::domain::newsletter::theme::Theme;

use super::markup::escape;

/// One section rendered to display markup.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    /// The section's wire tag (`header`, `richText`, ..., or an unknown tag).
    pub kind: String,
    pub html: String,
    /// True when this build did not recognize the section type and rendered
    /// the inert placeholder instead.
    pub unknown: bool,
}

/// Renders one section in view mode.
///
/// Exhaustive over [`SectionType`]: adding a seventh type is a compile-time
/// checked change here. The `Unknown` arm is the single deliberately
/// tolerant path - a document written by a newer schema renders a visibly
/// flagged placeholder instead of failing.
pub fn render_section(section: &Section, theme: &Theme) -> RenderedSection {
    let html = match section.kind() {
        SectionKind::Known(section_type) => match section_type {
            SectionType::Header => {
                header::render_view(&HeaderData::from_value(section.data()), theme)
            }
            SectionType::Title => {
                title::render_view(&TitleData::from_value(section.data()), theme)
            }
            SectionType::RichText => {
                rich_text::render_view(&RichTextData::from_value(section.data()), theme)
            }
            SectionType::Events => {
                events::render_view(&EventsData::from_value(section.data()), theme)
            }
            SectionType::Contact => {
                contact::render_view(&ContactData::from_value(section.data()), theme)
            }
            SectionType::Image => {
                image::render_view(&ImageData::from_value(section.data()), theme)
            }
        },
        SectionKind::Unknown(tag) => {
            tracing::warn!(section_id = %section.id(), tag = %tag, "unknown section type, rendering placeholder");
            return RenderedSection {
                kind: tag.clone(),
                html: render_unknown_placeholder(tag),
                unknown: true,
            };
        }
    };

    RenderedSection {
        kind: section.kind().as_str().to_string(),
        html,
        unknown: false,
    }
}

fn render_unknown_placeholder(tag: &str) -> String {
    format!(
        concat!(
            "<div class=\"section-unknown\">\n",
            "<p>Unknown section type: <code>{}</code></p>\n",
            "<p class=\"hint\">This section was created by a newer version and is preserved as-is.</p>\n",
            "</div>\n"
        ),
        escape(tag)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SectionId;
    use crate::domain::newsletter::factory::{SectionFactory, SequenceIdGenerator};
    use serde_json::json;
    use std::sync::Arc;

    fn factory() -> SectionFactory {
        SectionFactory::new(Arc::new(SequenceIdGenerator::new("s")))
    }

    #[test]
    fn every_known_type_renders_without_panicking() {
        let factory = factory();
        let theme = Theme::default();
        for (i, t) in SectionType::all().iter().enumerate() {
            let section = factory.create_known(*t, i as u32);
            let rendered = render_section(&section, &theme);
            assert!(!rendered.unknown, "{t} rendered as unknown");
            assert!(!rendered.html.is_empty());
        }
    }

    #[test]
    fn unknown_type_renders_flagged_placeholder() {
        let section = Section::new(
            SectionId::new("x").unwrap(),
            SectionKind::Unknown("futureType".to_string()),
            0,
            Some(json!({"anything": true})),
        );

        let rendered = render_section(&section, &Theme::default());
        assert!(rendered.unknown);
        assert_eq!(rendered.kind, "futureType");
        assert!(rendered.html.contains("Unknown section type"));
        assert!(rendered.html.contains("futureType"));
    }

    #[test]
    fn known_type_with_no_data_renders_defaults() {
        let section = Section::new(
            SectionId::new("x").unwrap(),
            SectionType::Events.into(),
            0,
            None,
        );
        let rendered = render_section(&section, &Theme::default());
        assert!(rendered.html.contains("No events scheduled"));
    }

    #[test]
    fn placeholder_escapes_hostile_tags() {
        let section = Section::new(
            SectionId::new("x").unwrap(),
            SectionKind::Unknown("<script>".to_string()),
            0,
            None,
        );
        let rendered = render_section(&section, &Theme::default());
        assert!(rendered.html.contains("&lt;script&gt;"));
    }
}
