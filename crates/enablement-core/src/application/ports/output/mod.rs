//! Driven (output) ports - implemented by infrastructure.

use std::path::Path;

use crate::domain::{
    ApplicationTemplates, Platform, RenderContext, ServiceDescriptor, ServiceTemplates,
};
use crate::error::EnablementResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `enablement_adapters::filesystem::LocalFilesystem` (production)
/// - `enablement_adapters::filesystem::MemoryFilesystem` (testing, dry runs)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> EnablementResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> EnablementResult<()>;

    /// Read a file. `Ok(None)` when it does not exist.
    fn read_file(&self, path: &Path) -> EnablementResult<Option<String>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template retrieval.
///
/// Implemented by:
/// - `enablement_adapters::template_store::EmbeddedTemplateStore` (built-in)
/// - `enablement_adapters::template_store::DirectoryTemplateStore` (user templates)
pub trait TemplateStore: Send + Sync {
    /// Instrumentation source and dependency declarations for one service
    /// on `platform`.
    fn service(
        &self,
        descriptor: &ServiceDescriptor,
        platform: Platform,
    ) -> EnablementResult<ServiceTemplates>;

    /// Templates of the composed application files for `platform`.
    fn application(&self, platform: Platform) -> EnablementResult<ApplicationTemplates>;
}

/// Port for template rendering.
pub trait TemplateRenderer: Send + Sync {
    /// Render `source` with `context`. `name` identifies the template in errors.
    fn render(&self, name: &str, source: &str, context: &RenderContext) -> EnablementResult<String>;
}
