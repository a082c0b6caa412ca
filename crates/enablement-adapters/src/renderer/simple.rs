//! Simple variable substitution renderer.

use enablement_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::RenderContext,
    error::EnablementResult,
};
use tracing::instrument;

/// Renderer using `{{VARIABLE}}` substitution.
///
/// Strict: a placeholder with no value in the context is an error, so a typo
/// in a custom template never reaches the generated project. Values are
/// inserted verbatim, even when they contain `{{...}}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip(self, source, context))]
    fn render(&self, name: &str, source: &str, context: &RenderContext) -> EnablementResult<String> {
        context.try_render(source).map_err(|variable| {
            ApplicationError::RenderingFailed {
                template: name.to_string(),
                reason: format!("unknown variable {{{{{}}}}}", variable),
            }
            .into()
        })
    }
}
