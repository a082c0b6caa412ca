//! Application layer for the enablement generator.
//!
//! This layer contains:
//! - **Services**: the per-service generator, the orchestrator that runs the
//!   three-phase pipeline, and the application composer
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Business rules (naming, documents, fixture shape) live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ApplicationComposer, EnablementService, GenerationOptions, GenerationPlan, GenerationReport,
    ServiceGenerator,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
