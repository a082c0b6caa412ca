//! What each service hands to the composing generator.
//!
//! Service generators do not call back into the composer. Their writing phase
//! returns a [`ServiceContribution`] and the orchestrator collects these in
//! order.

use serde::Serialize;

/// Application wiring payload. `service` holds the code line to inject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectedCode {
    pub service: String,
}

/// Output of one service generator's writing phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceContribution {
    pub service_name: &'static str,
    pub code: InjectedCode,
    pub dependencies: Vec<String>,
    pub source_path: String,
    pub source: String,
}

/// Raw template sources for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTemplates {
    pub instrumentation: String,
    pub dependencies: String,
}

impl ServiceTemplates {
    pub fn new(instrumentation: impl Into<String>, dependencies: impl Into<String>) -> Self {
        Self {
            instrumentation: instrumentation.into(),
            dependencies: dependencies.into(),
        }
    }

    /// One declaration per trimmed, non-empty line of `dependencies.txt`.
    pub fn dependency_lines(&self) -> Vec<String> {
        self.dependencies
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Raw template sources for the composed application files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationTemplates {
    pub application: String,
    pub package: String,
}
