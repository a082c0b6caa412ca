pub mod contribution;
pub mod documents;
pub mod fixture;
pub mod project_structure;
pub mod render_context;

pub use contribution::{ApplicationTemplates, InjectedCode, ServiceContribution, ServiceTemplates};
pub use documents::{ConfigDocuments, LocalDevConfigEntry, MappingEntry};
pub use fixture::{ProjectFixture, ServiceSection};
pub use project_structure::ProjectStructure;
pub use render_context::RenderContext;
