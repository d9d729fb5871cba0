//! Editing - debounced autosave sessions over open documents.

mod session;

pub use session::EditingSession;
