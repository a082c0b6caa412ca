//! Variables available to templates.
//!
//! ## Variable Naming Convention
//!
//! All built-in variables are `SCREAMING_SNAKE_CASE`.
//!
//! | Variable | Example | Source |
//! |----------|---------|--------|
//! | `PROJECT_NAME` | "shop" | Fixture |
//! | `SERVICE_NAME` | "service-watson-conversation" | Descriptor |
//! | `SERVICE_PASCAL` | "ServiceWatsonConversation" | Computed |
//! | `INIT_FUNCTION` | "initializeServiceWatsonConversation" | Computed |
//! | `LOOKUP_KEY` | "watson_conversation" | Computed |
//! | `INSTANCE_NAME` | "shop-conversation" | Fixture |
//! | `SERVICE_INITIALIZERS` | init calls, one per line | Composer |
//! | `SERVICE_DEPENDENCIES` | dependency lines | Composer |

use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::domain::registry::ServiceDescriptor;

/// Context for template rendering.
///
/// Immutable after creation; `with_variable` consumes and returns a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self::default().with_variable("PROJECT_NAME", project_name)
    }

    /// Context for a service's instrumentation template.
    pub fn for_service(
        project_name: impl Into<String>,
        descriptor: &ServiceDescriptor,
        instance_name: &str,
    ) -> Self {
        Self::new(project_name)
            .with_variable("SERVICE_NAME", descriptor.service_name)
            .with_variable("SERVICE_PASCAL", descriptor.pascal_name())
            .with_variable("INIT_FUNCTION", descriptor.init_function())
            .with_variable("LOOKUP_KEY", descriptor.lookup_key())
            .with_variable("INSTANCE_NAME", instance_name)
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{VARIABLE}}` placeholder with its value.
    ///
    /// Unknown placeholders are left untouched. Substituted values are never
    /// scanned again.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let Ok(()) = self.expand(template, &mut out, |name, out| {
            out.push_str("{{");
            out.push_str(name);
            out.push_str("}}");
            Ok::<(), Infallible>(())
        });
        out
    }

    /// Like [`render`](Self::render), but an unknown placeholder is an error
    /// carrying its name.
    pub fn try_render<'t>(&self, template: &'t str) -> Result<String, &'t str> {
        let mut out = String::with_capacity(template.len());
        self.expand(template, &mut out, |name, _| Err(name))?;
        Ok(out)
    }

    /// Single left-to-right pass over `template`.
    ///
    /// Only upper-case identifiers count as placeholders, so Swift closures
    /// like `{ {` pass through.
    fn expand<'t, E>(
        &self,
        template: &'t str,
        out: &mut String,
        mut unknown: impl FnMut(&'t str, &mut String) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let name = after
                .find("}}")
                .map(|end| &after[..end])
                .filter(|name| is_placeholder_name(name));

            match name {
                Some(name) => {
                    match self.get(name) {
                        Some(value) => out.push_str(value),
                        None => unknown(name, &mut *out)?,
                    }
                    rest = &after[name.len() + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        Ok(())
    }
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
