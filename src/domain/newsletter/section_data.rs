//! Typed views over each known section type's `data` record.
//!
//! Stored `data` stays raw JSON on the [`Section`](super::Section); these
//! types are the lenient, editable projections the editors and renderer
//! work with. Parsing never fails: absent fields take their defaults and an
//! entirely unparseable shape degrades to the default record (the stored
//! value itself is left untouched, so nothing is lost on the next save of an
//! unedited section).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shared behavior for typed section data records.
pub trait TypedSectionData: Serialize + DeserializeOwned + Default {
    /// Parses a stored data value leniently.
    fn from_value(value: Option<&Value>) -> Self {
        value
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    /// Serializes the full record for a whole-data replacement update.
    fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Inline text styling shared by header, title, and rich text sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default = "TextStyle::default_font_size")]
    pub font_size: String,
    #[serde(default = "TextStyle::default_text_align")]
    pub text_align: String,
    #[serde(default = "TextStyle::default_color")]
    pub color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextStyle {
    fn default_font_size() -> String {
        "16px".to_string()
    }

    fn default_text_align() -> String {
        "left".to_string()
    }

    fn default_color() -> String {
        "#333333".to_string()
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: Self::default_font_size(),
            text_align: Self::default_text_align(),
            color: Self::default_color(),
            extra: Map::new(),
        }
    }
}

/// Data record for `header` sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub style: TextStyle,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypedSectionData for HeaderData {}

/// Data record for `title` sections.
///
/// `data.title` here is deliberately decoupled from the newsletter's own
/// top-level title.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub style: TextStyle,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypedSectionData for TitleData {}

/// Data record for `richText` sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextData {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub style: TextStyle,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypedSectionData for RichTextData {}

/// One entry in an events section.
///
/// The `id` is a render key only; add/remove/edit always index by array
/// position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Data record for `events` sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub events: Vec<EventItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypedSectionData for EventsData {}

/// Data record for `contact` sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub teacher_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub room: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypedSectionData for ContactData {}

/// Display size toggle for image sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Horizontal alignment toggle for image sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Frame layout toggle for image sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageLayout {
    #[default]
    Default,
    Rounded,
    Circle,
}

/// Data record for `image` sections.
///
/// Size, alignment, and layout are stored orthogonally; toggling one never
/// touches the others.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub size: ImageSize,
    #[serde(default)]
    pub alignment: ImageAlignment,
    #[serde(default)]
    pub layout: ImageLayout,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypedSectionData for ImageData {}
