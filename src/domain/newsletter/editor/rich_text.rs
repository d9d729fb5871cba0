//! Rich text section editor.
//!
//! Owns the authored content plus the current text selection. Toolbar
//! operations (bold, italic, lists, image embeds) work on the selection
//! range, not the whole field, and restore the cursor afterwards. All
//! offsets are character offsets, matching how the front end reports
//! selections.

use crate::domain::foundation::SectionId;
use crate::domain::newsletter::render::markup::{escape, render_rich_text};
use crate::domain::newsletter::section::Section;
use crate::domain::newsletter::section_data::{RichTextData, TextStyle, TypedSectionData};
use crate::domain::newsletter::theme::Theme;

use super::{EditorMode, SectionUpdate};

/// Inline formatting the toolbar can apply to a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatting {
    Bold,
    Italic,
}

impl Formatting {
    fn marker(&self) -> &'static str {
        match self {
            Formatting::Bold => "**",
            Formatting::Italic => "*",
        }
    }
}

/// List prefixes the toolbar can insert at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Numbered,
}

impl ListKind {
    fn prefix(&self) -> &'static str {
        match self {
            ListKind::Bullet => "\u{2022} ",
            ListKind::Numbered => "1. ",
        }
    }
}

/// Editor for rich text sections.
#[derive(Debug, Clone)]
pub struct RichTextEditor {
    section_id: SectionId,
    data: RichTextData,
    mode: EditorMode,
    /// Current selection as character offsets into `data.content`.
    /// `start == end` is a caret.
    selection: (usize, usize),
}

impl RichTextEditor {
    pub fn from_section(section: &Section) -> Self {
        Self {
            section_id: section.id().clone(),
            data: RichTextData::from_value(section.data()),
            mode: EditorMode::View,
            selection: (0, 0),
        }
    }

    pub fn data(&self) -> &RichTextData {
        &self.data
    }

    pub fn content(&self) -> &str {
        &self.data.content
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    /// Returns the current selection (character offsets).
    pub fn selection(&self) -> (usize, usize) {
        self.selection
    }

    /// Sets the selection, clamped to the content and normalized so
    /// start <= end.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        let start = start.min(len);
        let end = end.min(len);
        self.selection = if start <= end { (start, end) } else { (end, start) };
    }

    /// Replaces the whole content (a plain keystroke-level edit).
    pub fn set_content(&mut self, content: impl Into<String>) -> SectionUpdate {
        self.data.content = content.into();
        let len = self.char_len();
        self.selection = (self.selection.0.min(len), self.selection.1.min(len));
        self.emit()
    }

    pub fn set_style(&mut self, style: TextStyle) -> SectionUpdate {
        self.data.style = style;
        self.emit()
    }

    /// Wraps the current selection in the formatting markers.
    ///
    /// The selection is restored to cover the same text afterwards (shifted
    /// past the opening marker), so repeated toolbar clicks keep operating
    /// on what the user selected. A caret gets an empty pair with the
    /// cursor left between the markers.
    pub fn apply_formatting(&mut self, formatting: Formatting) -> SectionUpdate {
        let marker = formatting.marker();
        let marker_len = marker.chars().count();
        let (start, end) = self.selection;

        let chars: Vec<char> = self.data.content.chars().collect();
        let mut next = String::with_capacity(self.data.content.len() + 2 * marker.len());
        next.extend(chars[..start].iter());
        next.push_str(marker);
        next.extend(chars[start..end].iter());
        next.push_str(marker);
        next.extend(chars[end..].iter());

        self.data.content = next;
        self.selection = (start + marker_len, end + marker_len);
        self.emit()
    }

    /// Inserts a list prefix at the start of the line the selection begins
    /// on, keeping the cursor over the same text.
    pub fn insert_list_prefix(&mut self, kind: ListKind) -> SectionUpdate {
        let prefix = kind.prefix();
        let prefix_len = prefix.chars().count();
        let (start, end) = self.selection;

        let chars: Vec<char> = self.data.content.chars().collect();
        let line_start = chars[..start]
            .iter()
            .rposition(|&c| c == '\n')
            .map(|i| i + 1)
            .unwrap_or(0);

        let mut next = String::with_capacity(self.data.content.len() + prefix.len());
        next.extend(chars[..line_start].iter());
        next.push_str(prefix);
        next.extend(chars[line_start..].iter());

        self.data.content = next;
        self.selection = (start + prefix_len, end + prefix_len);
        self.emit()
    }

    /// Appends an `![alt](url)` embed.
    ///
    /// Inserted content merges in with a blank-line separator; it never
    /// replaces what the teacher already wrote.
    pub fn insert_image_embed(&mut self, alt: &str, url: &str) -> SectionUpdate {
        self.merge_append(&format!("![{alt}]({url})"))
    }

    /// Appends AI-generated text, separated by a blank line.
    pub fn append_generated(&mut self, text: &str) -> SectionUpdate {
        self.merge_append(text)
    }

    pub fn render(&self, theme: &Theme) -> String {
        match self.mode {
            EditorMode::View => render_view(&self.data, theme),
            EditorMode::Edit => format!(
                "<div class=\"section-editor section-editor-rich-text\">\n<textarea name=\"content\">{}</textarea>\n</div>\n",
                escape(&self.data.content)
            ),
        }
    }

    fn merge_append(&mut self, text: &str) -> SectionUpdate {
        if self.data.content.trim().is_empty() {
            self.data.content = text.to_string();
        } else {
            self.data.content = format!("{}\n\n{}", self.data.content.trim_end(), text);
        }
        let len = self.char_len();
        self.selection = (len, len);
        self.emit()
    }

    fn char_len(&self) -> usize {
        self.data.content.chars().count()
    }

    fn emit(&self) -> SectionUpdate {
        SectionUpdate::new(self.section_id.clone(), self.data.to_value())
    }
}

/// Read-only rich text markup, themed.
pub fn render_view(data: &RichTextData, theme: &Theme) -> String {
    format!(
        concat!(
            "<div class=\"section-rich-text\" style=\"color: {}; font-size: {}; ",
            "text-align: {}; font-family: {}\">\n{}</div>\n"
        ),
        escape(&data.style.color),
        escape(&data.style.font_size),
        escape(&data.style.text_align),
        escape(&theme.font_family),
        render_rich_text(&data.content),
    )
}
