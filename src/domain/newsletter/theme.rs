//! Theme - free-form style dictionary applied across a rendered newsletter.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Style dictionary consumed by the renderer.
///
/// Never validated against a closed palette: teachers may enter any custom
/// color, and keys this build does not know about are carried in `extra`
/// and round-trip through persistence untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default = "Theme::default_primary_color")]
    pub primary_color: String,
    #[serde(default = "Theme::default_background_color")]
    pub background_color: String,
    #[serde(default = "Theme::default_font_family")]
    pub font_family: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Theme {
    fn default_primary_color() -> String {
        "#1d4ed8".to_string()
    }

    fn default_background_color() -> String {
        "#ffffff".to_string()
    }

    fn default_font_family() -> String {
        "Georgia, 'Times New Roman', serif".to_string()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: Self::default_primary_color(),
            background_color: Self::default_background_color(),
            font_family: Self::default_font_family(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_keys_take_defaults() {
        let theme: Theme = serde_json::from_value(json!({})).unwrap();
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn custom_colors_are_accepted_verbatim() {
        let theme: Theme =
            serde_json::from_value(json!({"primaryColor": "#C8102E"})).unwrap();
        assert_eq!(theme.primary_color, "#C8102E");
    }

    #[test]
    fn unknown_keys_round_trip() {
        let stored = json!({
            "primaryColor": "#000000",
            "backgroundColor": "#fafafa",
            "fontFamily": "Inter, sans-serif",
            "accentColor": "#C8102E"
        });
        let theme: Theme = serde_json::from_value(stored.clone()).unwrap();
        assert_eq!(serde_json::to_value(&theme).unwrap(), stored);
    }
}
