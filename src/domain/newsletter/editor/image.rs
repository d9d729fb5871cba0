//! Image section editor.
//!
//! Size, alignment, and layout are stored orthogonally and never interact.
//! A failed image load flips a local-only error flag that swaps the view to
//! a retry affordance; the flag is not part of `data`, so the stored
//! `imageUrl` is never corrupted by a flaky network.

use crate::domain::foundation::SectionId;
use crate::domain::newsletter::render::markup::escape;
use crate::domain::newsletter::section::Section;
use crate::domain::newsletter::section_data::{
    ImageAlignment, ImageData, ImageLayout, ImageSize, TypedSectionData,
};
use crate::domain::newsletter::theme::Theme;

use super::{EditorMode, SectionUpdate};

/// Editor for image sections.
#[derive(Debug, Clone)]
pub struct ImageEditor {
    section_id: SectionId,
    data: ImageData,
    mode: EditorMode,
    /// Local-only: true after the displayed image failed to load.
    load_failed: bool,
}

impl ImageEditor {
    pub fn from_section(section: &Section) -> Self {
        Self {
            section_id: section.id().clone(),
            data: ImageData::from_value(section.data()),
            mode: EditorMode::View,
            load_failed: false,
        }
    }

    pub fn data(&self) -> &ImageData {
        &self.data
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Records that the current image failed to load.
    pub fn mark_load_failed(&mut self) {
        self.load_failed = true;
    }

    /// Clears the failure flag so the view re-attempts the same URL.
    pub fn retry_load(&mut self) {
        self.load_failed = false;
    }

    pub fn set_image_url(&mut self, url: impl Into<String>) -> SectionUpdate {
        self.data.image_url = url.into();
        self.load_failed = false;
        self.emit()
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) -> SectionUpdate {
        self.data.caption = caption.into();
        self.emit()
    }

    pub fn set_alt_text(&mut self, alt_text: impl Into<String>) -> SectionUpdate {
        self.data.alt_text = alt_text.into();
        self.emit()
    }

    pub fn set_size(&mut self, size: ImageSize) -> SectionUpdate {
        self.data.size = size;
        self.emit()
    }

    pub fn set_alignment(&mut self, alignment: ImageAlignment) -> SectionUpdate {
        self.data.alignment = alignment;
        self.emit()
    }

    pub fn set_layout(&mut self, layout: ImageLayout) -> SectionUpdate {
        self.data.layout = layout;
        self.emit()
    }

    pub fn render(&self, theme: &Theme) -> String {
        if self.load_failed {
            return concat!(
                "<div class=\"section-image image-error\">\n",
                "<p>Image failed to load</p>\n",
                "<button class=\"retry\">Retry</button>\n",
                "</div>\n"
            )
            .to_string();
        }
        match self.mode {
            EditorMode::View => render_view(&self.data, theme),
            EditorMode::Edit => format!(
                concat!(
                    "<div class=\"section-editor section-editor-image\">\n",
                    "<input name=\"imageUrl\" value=\"{}\">\n",
                    "<input name=\"caption\" value=\"{}\">\n",
                    "<input name=\"altText\" value=\"{}\">\n",
                    "</div>\n"
                ),
                escape(&self.data.image_url),
                escape(&self.data.caption),
                escape(&self.data.alt_text),
            ),
        }
    }

    fn emit(&self) -> SectionUpdate {
        SectionUpdate::new(self.section_id.clone(), self.data.to_value())
    }
}

/// Read-only image markup. Without a URL it renders a placeholder instead
/// of a broken image.
pub fn render_view(data: &ImageData, _theme: &Theme) -> String {
    if data.image_url.is_empty() {
        return "<div class=\"section-image image-placeholder\"><p>No image selected</p></div>\n"
            .to_string();
    }

    let size_class = match data.size {
        ImageSize::Small => "img-small",
        ImageSize::Medium => "img-medium",
        ImageSize::Large => "img-large",
    };
    let align = match data.alignment {
        ImageAlignment::Left => "left",
        ImageAlignment::Center => "center",
        ImageAlignment::Right => "right",
    };
    let layout_class = match data.layout {
        ImageLayout::Default => "img-frame-default",
        ImageLayout::Rounded => "img-frame-rounded",
        ImageLayout::Circle => "img-frame-circle",
    };

    let mut out = format!(
        "<figure class=\"section-image {} {}\" style=\"text-align: {}\">\n<img src=\"{}\" alt=\"{}\">\n",
        size_class,
        layout_class,
        align,
        escape(&data.image_url),
        escape(&data.alt_text),
    );
    if !data.caption.is_empty() {
        out.push_str(&format!("<figcaption>{}</figcaption>\n", escape(&data.caption)));
    }
    out.push_str("</figure>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::newsletter::section_type::SectionType;
    use serde_json::json;

    fn editor(data: serde_json::Value) -> ImageEditor {
        let section = Section::new(
            SectionId::new("i1").unwrap(),
            SectionType::Image.into(),
            0,
            Some(data),
        );
        ImageEditor::from_section(&section)
    }

    #[test]
    fn toggles_are_orthogonal() {
        let mut e = editor(json!({"imageUrl": "u.png"}));

        let _ = e.set_size(ImageSize::Large);
        let _ = e.set_layout(ImageLayout::Circle);
        let update = e.set_alignment(ImageAlignment::Right);

        assert_eq!(update.data["size"], "large");
        assert_eq!(update.data["alignment"], "right");
        assert_eq!(update.data["layout"], "circle");
    }

    #[test]
    fn load_failure_shows_retry_without_touching_stored_url() {
        let mut e = editor(json!({"imageUrl": "https://img.test/a.png"}));

        e.mark_load_failed();
        let html = e.render(&Theme::default());
        assert!(html.contains("Retry"));
        assert_eq!(e.data().image_url, "https://img.test/a.png");
        // The flag never enters the data record.
        assert!(e.data().to_value().get("loadFailed").is_none());

        e.retry_load();
        let html = e.render(&Theme::default());
        assert!(html.contains("img src=\"https://img.test/a.png\""));
    }

    #[test]
    fn setting_a_new_url_clears_the_failure_flag() {
        let mut e = editor(json!({"imageUrl": "old.png"}));
        e.mark_load_failed();
        let _ = e.set_image_url("new.png");
        assert!(!e.load_failed());
    }

    #[test]
    fn missing_url_renders_placeholder() {
        let e = editor(json!({}));
        let html = e.render(&Theme::default());
        assert!(html.contains("No image selected"));
    }

    #[test]
    fn caption_renders_when_present() {
        let e = editor(json!({"imageUrl": "u.png", "caption": "Field day"}));
        let html = e.render(&Theme::default());
        assert!(html.contains("<figcaption>Field day</figcaption>"));
    }
}
