//! Core domain layer for the enablement generator.
//!
//! Pure logic only: fixture parsing, the service registry, naming rules and
//! the shared configuration documents. Template lookup, rendering and all
//! filesystem access go through the ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Deterministic**: Same fixture in, same documents out

pub mod entities;
pub mod error;
pub mod registry;
pub mod value_objects;

pub use entities::{
    contribution::{ApplicationTemplates, InjectedCode, ServiceContribution, ServiceTemplates},
    documents::{ConfigDocuments, LocalDevConfigEntry, MappingEntry, ensure_ignored},
    fixture::{ProjectFixture, ServiceSection},
    project_structure::{FileToWrite, ProjectStructure},
    render_context::RenderContext,
};

pub use error::{DomainError, ErrorCategory};

pub use registry::{SERVICE_REGISTRY, ServiceDescriptor, find_service};

pub use value_objects::{
    LOCALDEV_CONFIG_PATH, MAPPINGS_PATH, Platform, SearchPattern, SearchSource, pascalize,
};
