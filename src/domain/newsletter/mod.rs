//! Newsletter domain - the section-based document model.
//!
//! A newsletter is a typed, ordered collection of heterogeneous sections
//! plus a theme and metadata. The aggregate owns the structural operations
//! (add, reorder, update, delete), the factory mints sections with
//! per-type defaults, the editors own field-level editing, and the codec
//! round-trips the content blob through storage losslessly.

mod aggregate;
mod autosave;
mod codec;
pub mod editor;
mod factory;
pub mod render;
mod section;
mod section_data;
mod section_type;
mod theme;

pub use aggregate::{Newsletter, NewsletterContent, CONTENT_VERSION, DEFAULT_SECTION_TYPES};
pub use autosave::{AutosaveScheduler, SaveState};
pub use codec::ContentCodec;
pub use factory::{IdGenerator, SectionFactory, SequenceIdGenerator, UuidIdGenerator};
pub use section::Section;
pub use section_data::{
    ContactData, EventItem, EventsData, HeaderData, ImageAlignment, ImageData, ImageLayout,
    ImageSize, RichTextData, TextStyle, TitleData, TypedSectionData,
};
pub use section_type::{SectionKind, SectionType};
pub use theme::Theme;
