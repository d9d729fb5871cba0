//! Title section editor.

use crate::domain::foundation::SectionId;
use crate::domain::newsletter::render::markup::escape;
use crate::domain::newsletter::section::Section;
use crate::domain::newsletter::section_data::{TextStyle, TitleData, TypedSectionData};
use crate::domain::newsletter::theme::Theme;

use super::{EditorMode, SectionUpdate};

/// Editor for standalone title sections.
///
/// The `data.title` edited here is independent of the newsletter's own
/// top-level title.
#[derive(Debug, Clone)]
pub struct TitleEditor {
    section_id: SectionId,
    data: TitleData,
    mode: EditorMode,
}

impl TitleEditor {
    pub fn from_section(section: &Section) -> Self {
        Self {
            section_id: section.id().clone(),
            data: TitleData::from_value(section.data()),
            mode: EditorMode::View,
        }
    }

    pub fn data(&self) -> &TitleData {
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

    pub fn set_style(&mut self, style: TextStyle) -> SectionUpdate {
        self.data.style = style;
        self.emit()
    }

    pub fn render(&self, theme: &Theme) -> String {
        match self.mode {
            EditorMode::View => render_view(&self.data, theme),
            EditorMode::Edit => format!(
                "<div class=\"section-editor section-editor-title\">\n<input name=\"title\" value=\"{}\">\n</div>\n",
                escape(&self.data.title)
            ),
        }
    }

    fn emit(&self) -> SectionUpdate {
        SectionUpdate::new(self.section_id.clone(), self.data.to_value())
    }
}

/// Read-only title markup, themed.
pub fn render_view(data: &TitleData, theme: &Theme) -> String {
    format!(
        concat!(
            "<div class=\"section-title\" style=\"text-align: {}\">\n",
            "<h2 style=\"color: {}; font-size: {}\">{}</h2>\n",
            "</div>\n"
        ),
        escape(&data.style.text_align),
        escape(&theme.primary_color),
        escape(&data.style.font_size),
        escape(&data.title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::newsletter::section_type::SectionType;
    use serde_json::json;

    #[test]
    fn set_title_replaces_whole_record() {
        let section = Section::new(
            SectionId::new("t1").unwrap(),
            SectionType::Title.into(),
            0,
            Some(json!({"title": "Old", "style": {}, "futureKey": 1})),
        );
        let mut editor = TitleEditor::from_section(&section);

        let update = editor.set_title("Week 3");
        assert_eq!(update.data["title"], "Week 3");
        // Unknown keys the editor loaded ride along in the replacement.
        assert_eq!(update.data["futureKey"], 1);
    }

    #[test]
    fn view_colors_heading_with_theme_primary() {
        let section = Section::new(
            SectionId::new("t1").unwrap(),
            SectionType::Title.into(),
            0,
            Some(json!({"title": "Hello"})),
        );
        let editor = TitleEditor::from_section(&section);
        let html = editor.render(&Theme::default());
        assert!(html.contains(&Theme::default().primary_color));
        assert!(html.contains("Hello"));
    }
}
