//! Header section editor.

use crate::domain::foundation::SectionId;
use crate::domain::newsletter::render::markup::escape;
use crate::domain::newsletter::section::Section;
use crate::domain::newsletter::section_data::{HeaderData, TextStyle, TypedSectionData};
use crate::domain::newsletter::theme::Theme;

use super::{EditorMode, SectionUpdate};

/// Editor for the newsletter masthead: title, subtitle, and a style block.
#[derive(Debug, Clone)]
pub struct HeaderEditor {
    section_id: SectionId,
    data: HeaderData,
    mode: EditorMode,
}

impl HeaderEditor {
    /// Builds an editor over a section's stored data (leniently parsed).
    pub fn from_section(section: &Section) -> Self {
        Self {
            section_id: section.id().clone(),
            data: HeaderData::from_value(section.data()),
            mode: EditorMode::View,
        }
    }

    pub fn data(&self) -> &HeaderData {
        &self.data
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> SectionUpdate {
        self.data.title = title.into();
        self.emit()
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) -> SectionUpdate {
        self.data.subtitle = subtitle.into();
        self.emit()
    }

    pub fn set_style(&mut self, style: TextStyle) -> SectionUpdate {
        self.data.style = style;
        self.emit()
    }

    /// Renders the current mode.
    pub fn render(&self, theme: &Theme) -> String {
        match self.mode {
            EditorMode::View => render_view(&self.data, theme),
            EditorMode::Edit => self.render_edit(),
        }
    }

    fn render_edit(&self) -> String {
        format!(
            concat!(
                "<div class=\"section-editor section-editor-header\">\n",
                "<input name=\"title\" value=\"{}\">\n",
                "<input name=\"subtitle\" value=\"{}\">\n",
                "</div>\n"
            ),
            escape(&self.data.title),
            escape(&self.data.subtitle),
        )
    }

    fn emit(&self) -> SectionUpdate {
        SectionUpdate::new(self.section_id.clone(), self.data.to_value())
    }
}

/// Read-only header markup, themed.
pub fn render_view(data: &HeaderData, theme: &Theme) -> String {
    format!(
        concat!(
            "<header class=\"section-header\" style=\"background-color: {}; ",
            "color: #ffffff; text-align: {}\">\n",
            "<h1 style=\"font-size: {}\">{}</h1>\n",
            "<p class=\"subtitle\">{}</p>\n",
            "</header>\n"
        ),
        escape(&theme.primary_color),
        escape(&data.style.text_align),
        escape(&data.style.font_size),
        escape(&data.title),
        escape(&data.subtitle),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::newsletter::section_type::SectionType;
    use serde_json::json;

    fn section(data: serde_json::Value) -> Section {
        Section::new(
            SectionId::new("h1").unwrap(),
            SectionType::Header.into(),
            0,
            Some(data),
        )
    }

    #[test]
    fn set_title_emits_full_data_object() {
        let mut editor = editor_with_defaults();
        let update = editor.set_title("Room 12 News");

        assert_eq!(update.section_id.as_str(), "h1");
        assert_eq!(update.data["title"], "Room 12 News");
        // The whole record rides along, not just the changed field.
        assert!(update.data.get("subtitle").is_some());
        assert!(update.data.get("style").is_some());
    }

    #[test]
    fn view_uses_theme_primary_color() {
        let editor = editor_with_defaults();
        let theme = Theme {
            primary_color: "#C8102E".to_string(),
            ..Theme::default()
        };
        let html = editor.render(&theme);
        assert!(html.contains("background-color: #C8102E"));
    }

    #[test]
    fn absent_data_renders_without_panicking() {
        let section = Section::new(
            SectionId::new("h2").unwrap(),
            SectionType::Header.into(),
            0,
            None,
        );
        let editor = HeaderEditor::from_section(&section);
        let html = editor.render(&Theme::default());
        assert!(html.contains("section-header"));
    }

    #[test]
    fn edit_mode_renders_inputs() {
        let mut editor = editor_with_defaults();
        editor.set_mode(EditorMode::Edit);
        let html = editor.render(&Theme::default());
        assert!(html.contains("<input name=\"title\""));
    }

    fn editor_with_defaults() -> HeaderEditor {
        HeaderEditor::from_section(&section(json!({
            "title": "Classroom Newsletter",
            "subtitle": "News and updates",
            "style": {"fontSize": "32px", "textAlign": "center", "color": "#333"}
        })))
    }
}
