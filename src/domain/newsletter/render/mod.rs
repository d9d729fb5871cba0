//! Rendering - markup parsing and section dispatch.

pub mod markup;
mod renderer;

pub use renderer::{render_section, RenderedSection};
