//! Content codec - (de)serializes the `{version, sections, theme}` blob.
//!
//! Save writes the in-memory content verbatim; defaults are only ever
//! substituted at load time, and only for an empty/absent section list.

use serde_json::Value;

use super::aggregate::NewsletterContent;
use super::factory::SectionFactory;

/// Encodes/decodes newsletter content blobs for the storage collaborator.
#[derive(Clone)]
pub struct ContentCodec {
    factory: SectionFactory,
}

impl ContentCodec {
    pub fn new(factory: SectionFactory) -> Self {
        Self { factory }
    }

    /// Serializes content exactly as held in memory.
    ///
    /// No field renaming, no default substitution: a document saved with
    /// zero sections is stored with zero sections.
    pub fn encode(&self, content: &NewsletterContent) -> Value {
        serde_json::to_value(content).unwrap_or(Value::Null)
    }

    /// Parses a stored content blob.
    ///
    /// - A missing or malformed blob (legacy record shapes included) never
    ///   fails the load path: it is treated as empty content.
    /// - An empty/absent section list gets the four-section default set and
    ///   the default theme (the stored `version` tag is preserved).
    /// - A non-empty section list is used verbatim, including section types
    ///   or data shapes unknown to this build.
    pub fn decode(&self, stored: Option<&Value>) -> NewsletterContent {
        let mut content = match stored {
            Some(value) => match serde_json::from_value::<NewsletterContent>(value.clone()) {
                Ok(content) => content,
                Err(err) => {
                    tracing::warn!(error = %err, "malformed stored content, substituting empty");
                    NewsletterContent::empty()
                }
            },
            None => NewsletterContent::empty(),
        };

        if content.sections.is_empty() {
            let defaults = NewsletterContent::with_defaults(&self.factory);
            content.sections = defaults.sections;
            content.theme = defaults.theme;
        }

        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::newsletter::factory::SequenceIdGenerator;
    use serde_json::json;
    use std::sync::Arc;

    fn codec() -> ContentCodec {
        ContentCodec::new(SectionFactory::new(Arc::new(SequenceIdGenerator::new("s"))))
    }

    #[test]
    fn missing_content_loads_as_defaults() {
        let content = codec().decode(None);

        let kinds: Vec<&str> = content.sections.iter().map(|s| s.kind().as_str()).collect();
        assert_eq!(kinds, vec!["title", "richText", "events", "contact"]);
        assert_eq!(content.version, "1.0");
    }

    #[test]
    fn malformed_content_loads_as_defaults_without_error() {
        for stored in [json!("not an object"), json!(42), json!({"sections": "nope"})] {
            let content = codec().decode(Some(&stored));
            assert_eq!(content.sections.len(), 4);
        }
    }

    #[test]
    fn empty_section_list_gets_default_substitution() {
        let stored = json!({"version": "1.0", "sections": [], "theme": {}});
        let content = codec().decode(Some(&stored));
        assert_eq!(content.sections.len(), 4);
    }

    #[test]
    fn nonempty_sections_are_never_substituted_even_when_unrecognized() {
        let stored = json!({
            "version": "1.0",
            "sections": [
                {"id": "x1", "type": "futureType", "order": 0, "data": {"payload": [1, 2]}}
            ],
            "theme": {"primaryColor": "#123456"}
        });

        let content = codec().decode(Some(&stored));
        assert_eq!(content.sections.len(), 1);
        assert_eq!(content.sections[0].kind().as_str(), "futureType");
        assert_eq!(content.theme.primary_color, "#123456");
    }

    #[test]
    fn stored_version_tag_is_preserved() {
        let stored = json!({
            "version": "2.3",
            "sections": [{"id": "x1", "type": "title", "order": 0, "data": {"title": "t"}}],
            "theme": {}
        });
        let content = codec().decode(Some(&stored));
        assert_eq!(content.version, "2.3");
    }

    #[test]
    fn load_save_round_trip_is_lossless() {
        let stored = json!({
            "version": "1.0",
            "sections": [
                {
                    "id": "a",
                    "type": "events",
                    "order": 1,
                    "data": {"title": "Events", "events": [], "futureKey": {"deep": true}}
                },
                {"id": "b", "type": "futureType", "order": 0, "data": {"anything": null}}
            ],
            "theme": {"primaryColor": "#000", "backgroundColor": "#fff",
                      "fontFamily": "serif", "accentColor": "#C8102E"}
        });

        let codec = codec();
        let content = codec.decode(Some(&stored));
        assert_eq!(codec.encode(&content), stored);
    }

    #[test]
    fn encode_does_not_substitute_defaults() {
        let codec = codec();
        let content = NewsletterContent::empty();
        let encoded = codec.encode(&content);
        assert_eq!(encoded["sections"], json!([]));
    }
}
