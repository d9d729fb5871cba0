//! Template command/query handlers.

mod create_template;
mod delete_template;
mod instantiate_template;
mod list_templates;

pub use create_template::{CreateTemplateCommand, CreateTemplateHandler};
pub use delete_template::{DeleteTemplateCommand, DeleteTemplateHandler};
pub use instantiate_template::{InstantiateTemplateCommand, InstantiateTemplateHandler};
pub use list_templates::{ListTemplatesHandler, ListTemplatesQuery};
