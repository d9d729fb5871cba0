//! Template domain - reusable newsletter content.

mod template;

pub use template::Template;
