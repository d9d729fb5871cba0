//! Domain layer - pure newsletter model, no I/O.

pub mod foundation;
pub mod newsletter;
pub mod template;
