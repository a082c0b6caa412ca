//! Adapters behind the enablement core ports.
//!
//! - [`filesystem`]: disk-backed and in-memory [`Filesystem`] implementations
//! - [`template_store`]: built-in templates and on-disk template directories
//! - [`renderer`]: strict `{{VARIABLE}}` substitution
//!
//! [`Filesystem`]: enablement_core::application::ports::Filesystem

pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod template_store;

pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use template_store::{DirectoryTemplateStore, EmbeddedTemplateStore};
