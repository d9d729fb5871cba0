//! Contact section editor.

use crate::domain::foundation::SectionId;
use crate::domain::newsletter::render::markup::escape;
use crate::domain::newsletter::section::Section;
use crate::domain::newsletter::section_data::{ContactData, TypedSectionData};
use crate::domain::newsletter::theme::Theme;

use super::{EditorMode, SectionUpdate};

/// Editor for contact sections.
#[derive(Debug, Clone)]
pub struct ContactEditor {
    section_id: SectionId,
    data: ContactData,
    mode: EditorMode,
}

impl ContactEditor {
    pub fn from_section(section: &Section) -> Self {
        Self {
            section_id: section.id().clone(),
            data: ContactData::from_value(section.data()),
            mode: EditorMode::View,
        }
    }

    pub fn data(&self) -> &ContactData {
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

    pub fn set_teacher_name(&mut self, name: impl Into<String>) -> SectionUpdate {
        self.data.teacher_name = name.into();
        self.emit()
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> SectionUpdate {
        self.data.email = email.into();
        self.emit()
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> SectionUpdate {
        self.data.phone = phone.into();
        self.emit()
    }

    pub fn set_room(&mut self, room: impl Into<String>) -> SectionUpdate {
        self.data.room = room.into();
        self.emit()
    }

    pub fn render(&self, theme: &Theme) -> String {
        match self.mode {
            EditorMode::View => render_view(&self.data, theme),
            EditorMode::Edit => self.render_edit(),
        }
    }

    fn render_edit(&self) -> String {
        format!(
            concat!(
                "<div class=\"section-editor section-editor-contact\">\n",
                "<input name=\"title\" value=\"{}\">\n",
                "<input name=\"teacherName\" value=\"{}\">\n",
                "<input name=\"email\" value=\"{}\">\n",
                "<input name=\"phone\" value=\"{}\">\n",
                "<input name=\"room\" value=\"{}\">\n",
                "</div>\n"
            ),
            escape(&self.data.title),
            escape(&self.data.teacher_name),
            escape(&self.data.email),
            escape(&self.data.phone),
            escape(&self.data.room),
        )
    }

    fn emit(&self) -> SectionUpdate {
        SectionUpdate::new(self.section_id.clone(), self.data.to_value())
    }
}

/// Read-only contact markup, themed. Blank fields are skipped rather than
/// rendered as empty rows.
pub fn render_view(data: &ContactData, theme: &Theme) -> String {
    let mut out = format!(
        "<div class=\"section-contact\">\n<h3 style=\"color: {}\">{}</h3>\n",
        escape(&theme.primary_color),
        escape(&data.title),
    );

    let rows = [
        ("Teacher", &data.teacher_name),
        ("Email", &data.email),
        ("Phone", &data.phone),
        ("Room", &data.room),
    ];

    let filled: Vec<_> = rows.iter().filter(|(_, v)| !v.is_empty()).collect();
    if filled.is_empty() {
        out.push_str("<p class=\"empty-state\">No contact details yet</p>\n");
    } else {
        out.push_str("<dl>\n");
        for (label, value) in filled {
            out.push_str(&format!(
                "<dt>{}</dt><dd>{}</dd>\n",
                escape(label),
                escape(value)
            ));
        }
        out.push_str("</dl>\n");
    }

    out.push_str("</div>\n");
    out
}
