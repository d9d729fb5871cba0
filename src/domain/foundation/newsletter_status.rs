//! NewsletterStatus enum for tracking a newsletter's lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a newsletter.
///
/// There are no enforced transition rules; the editor may move a document
/// between any two states (publish, unpublish, archive, restore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NewsletterStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl NewsletterStatus {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsletterStatus::Draft => "draft",
            NewsletterStatus::Published => "published",
            NewsletterStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for NewsletterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NewsletterStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(NewsletterStatus::Draft),
            "published" => Ok(NewsletterStatus::Published),
            "archived" => Ok(NewsletterStatus::Archived),
            other => Err(format!("unknown newsletter status: {other}")),
        }
    }
}
