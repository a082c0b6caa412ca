//! Application ports (traits) for external dependencies.
//!
//! Adapters in `enablement-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateStore`: Template retrieval
//!   - `TemplateRenderer`: Variable substitution

pub mod output;

pub use output::{Filesystem, TemplateRenderer, TemplateStore};
