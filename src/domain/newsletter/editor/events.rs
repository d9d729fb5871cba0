//! Events section editor.
//!
//! The event list is mutated by array position, matching how the rows are
//! rendered; event ids exist only as render keys. Fresh event ids come from
//! the same injected generator the section factory uses.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, SectionId, Timestamp};
use crate::domain::newsletter::factory::IdGenerator;
use crate::domain::newsletter::render::markup::escape;
use crate::domain::newsletter::section::Section;
use crate::domain::newsletter::section_data::{EventItem, EventsData, TypedSectionData};
use crate::domain::newsletter::theme::Theme;

use super::{EditorMode, SectionUpdate};

/// Editor for events sections.
pub struct EventsEditor {
    section_id: SectionId,
    data: EventsData,
    mode: EditorMode,
    ids: Arc<dyn IdGenerator>,
}

impl EventsEditor {
    pub fn from_section(section: &Section, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            section_id: section.id().clone(),
            data: EventsData::from_value(section.data()),
            mode: EditorMode::View,
            ids,
        }
    }

    pub fn data(&self) -> &EventsData {
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

    /// Appends a blank event dated today with a fresh id.
    pub fn add_event(&mut self) -> SectionUpdate {
        self.data.events.push(EventItem {
            id: self.ids.next_id(),
            date: Timestamp::now().date_string(),
            ..EventItem::default()
        });
        self.emit()
    }

    /// Removes exactly the event at `index`; later rows shift down by one.
    pub fn remove_event(&mut self, index: usize) -> Result<SectionUpdate, DomainError> {
        self.check_index(index)?;
        self.data.events.remove(index);
        Ok(self.emit())
    }

    pub fn set_event_title(
        &mut self,
        index: usize,
        title: impl Into<String>,
    ) -> Result<SectionUpdate, DomainError> {
        self.check_index(index)?;
        self.data.events[index].title = title.into();
        Ok(self.emit())
    }

    pub fn set_event_date(
        &mut self,
        index: usize,
        date: impl Into<String>,
    ) -> Result<SectionUpdate, DomainError> {
        self.check_index(index)?;
        self.data.events[index].date = date.into();
        Ok(self.emit())
    }

    pub fn set_event_description(
        &mut self,
        index: usize,
        description: impl Into<String>,
    ) -> Result<SectionUpdate, DomainError> {
        self.check_index(index)?;
        self.data.events[index].description = description.into();
        Ok(self.emit())
    }

    pub fn render(&self, theme: &Theme) -> String {
        match self.mode {
            EditorMode::View => render_view(&self.data, theme),
            EditorMode::Edit => self.render_edit(),
        }
    }

    fn render_edit(&self) -> String {
        let mut out = String::from("<div class=\"section-editor section-editor-events\">\n");
        out.push_str(&format!(
            "<input name=\"title\" value=\"{}\">\n",
            escape(&self.data.title)
        ));
        for (index, event) in self.data.events.iter().enumerate() {
            out.push_str(&format!(
                concat!(
                    "<fieldset data-index=\"{i}\">\n",
                    "<input name=\"events[{i}].date\" value=\"{date}\">\n",
                    "<input name=\"events[{i}].title\" value=\"{title}\">\n",
                    "<input name=\"events[{i}].description\" value=\"{description}\">\n",
                    "</fieldset>\n"
                ),
                i = index,
                date = escape(&event.date),
                title = escape(&event.title),
                description = escape(&event.description),
            ));
        }
        out.push_str("</div>\n");
        out
    }

    fn check_index(&self, index: usize) -> Result<(), DomainError> {
        if index >= self.data.events.len() {
            return Err(DomainError::new(
                ErrorCode::SectionIndexOutOfRange,
                format!(
                    "event index {index} out of range for {} events",
                    self.data.events.len()
                ),
            ));
        }
        Ok(())
    }

    fn emit(&self) -> SectionUpdate {
        SectionUpdate::new(self.section_id.clone(), self.data.to_value())
    }
}

/// Read-only events markup, themed. An absent/empty list renders the
/// empty-state copy instead of erroring.
pub fn render_view(data: &EventsData, theme: &Theme) -> String {
    let mut out = format!(
        "<div class=\"section-events\">\n<h3 style=\"color: {}\">{}</h3>\n",
        escape(&theme.primary_color),
        escape(&data.title),
    );

    if data.events.is_empty() {
        out.push_str("<p class=\"empty-state\">No events scheduled</p>\n");
    } else {
        out.push_str("<ul class=\"event-list\">\n");
        for event in &data.events {
            out.push_str(&format!(
                "<li><span class=\"event-date\">{}</span> <strong>{}</strong> {}</li>\n",
                escape(&event.date),
                escape(&event.title),
                escape(&event.description),
            ));
        }
        out.push_str("</ul>\n");
    }

    out.push_str("</div>\n");
    out
}
