// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are cloneable, categorizable for CLI display, and carry
/// actionable suggestions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Malformed project fixture: {0}")]
    MalformedFixture(String),

    #[error("Malformed '{property}' section: {reason}")]
    MalformedServiceSection { property: String, reason: String },

    #[error("Existing document {document} is malformed: {reason}")]
    MalformedDocument { document: String, reason: String },

    #[error("Duplicate output path: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Unsupported
    // ========================================================================
    #[error("Backend platform '{0}' is not supported")]
    UnsupportedPlatform(String),

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Unknown service: {0}")]
    UnknownService(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedFixture(msg) => vec![
                "The fixture must be a JSON object with at least a \"name\" field".into(),
                format!("Details: {}", msg),
            ],
            Self::MalformedServiceSection { property, .. } => vec![
                format!("Check the \"{}\" section of the fixture", property),
                "Each service section needs \"serviceInfo\": {\"name\": \"<instance>\"}".into(),
            ],
            Self::MalformedDocument { document, .. } => vec![
                format!("Fix or remove {} and run the generator again", document),
            ],
            Self::UnsupportedPlatform(platform) => vec![
                format!("'{}' projects cannot be enabled by this generator", platform),
                "Set \"backendPlatform\" to \"SWIFT\" (the default) or \"PYTHON\"".into(),
            ],
            Self::UnknownService(name) => vec![
                format!("'{}' is not a registered service", name),
                "Try: enablement list".into(),
            ],
            Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                vec!["Check custom templates for conflicting output paths".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedFixture(_)
            | Self::MalformedServiceSection { .. }
            | Self::MalformedDocument { .. }
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Validation,
            Self::UnsupportedPlatform(_) => ErrorCategory::Unsupported,
            Self::UnknownService(_) => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Unsupported,
    NotFound,
}
