//! Application services - orchestrate use cases.
//!
//! The orchestrator drives the per-service generators through the
//! three-phase pipeline; the composer turns their contributions into the
//! application source and manifest.

pub mod composer;
pub mod enablement_service;
pub mod service_generator;

pub use composer::{ApplicationComposer, unique_dependencies};
pub use enablement_service::{
    EnablementService, GenerationOptions, GenerationPlan, GenerationReport,
};
pub use service_generator::ServiceGenerator;
