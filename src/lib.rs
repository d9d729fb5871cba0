//! Newsletter Studio - Classroom newsletter builder.
//!
//! Teachers assemble newsletters from typed content sections (header,
//! title, rich text, events, contact, image), persist them, derive
//! reusable templates, and export rendered HTML/PDF.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
