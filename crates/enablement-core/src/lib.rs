//! Enablement Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the service
//! enablement generator: it scaffolds cloud-service integration code into a
//! generated application skeleton.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          enablement-cli (CLI)           │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (EnablementService, ServiceGenerator,   │
//! │          ApplicationComposer)           │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, TemplateStore, Renderer)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   enablement-adapters (Infrastructure)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ServiceDescriptor, ProjectFixture,     │
//! │  ConfigDocuments, ProjectStructure)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use enablement_core::{
//!     application::{EnablementService, GenerationOptions},
//!     domain::ProjectFixture,
//! };
//!
//! let fixture = ProjectFixture::from_json(r#"{"name": "shop"}"#).unwrap();
//! let service = EnablementService::new(templates, renderer, filesystem);
//! let report = service.generate(&fixture, &GenerationOptions::new("./shop")).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationComposer, EnablementService, GenerationOptions, GenerationPlan,
        GenerationReport, ServiceGenerator,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        ConfigDocuments, LocalDevConfigEntry, MappingEntry, Platform, ProjectFixture,
        ProjectStructure, RenderContext, SERVICE_REGISTRY, ServiceContribution, ServiceDescriptor, find_service,
    };
    pub use crate::error::{EnablementError, EnablementResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
