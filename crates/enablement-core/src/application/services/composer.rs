//! Application composer.
//!
//! Turns the collected [`ServiceContribution`]s into the two files owned by
//! the composing generator: the application source with one init call per
//! service, and the dependency manifest. Paths and indentation come from the
//! [`Platform`].

use tracing::{debug, instrument};

use crate::{
    application::ports::{TemplateRenderer, TemplateStore},
    domain::{Platform, RenderContext, ServiceContribution},
    error::EnablementResult,
};

const STATEMENT_INDENT: &str = "    ";

pub struct ApplicationComposer<'a> {
    templates: &'a dyn TemplateStore,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> ApplicationComposer<'a> {
    pub fn new(templates: &'a dyn TemplateStore, renderer: &'a dyn TemplateRenderer) -> Self {
        Self {
            templates,
            renderer,
        }
    }

    /// Render `(path, content)` for the application source and manifest.
    #[instrument(
        skip_all,
        fields(project = %project_name, %platform, services = contributions.len())
    )]
    pub fn compose(
        &self,
        project_name: &str,
        platform: Platform,
        contributions: &[ServiceContribution],
    ) -> EnablementResult<Vec<(String, String)>> {
        let templates = self.templates.application(platform)?;
        let indent = platform.dependency_indent();

        let initializers = contributions
            .iter()
            .map(|c| format!("{STATEMENT_INDENT}{}", c.code.service))
            .collect::<Vec<_>>()
            .join("\n");

        let raw: Vec<String> = contributions
            .iter()
            .flat_map(|c| c.dependencies.iter().cloned())
            .collect();
        let dependencies = unique_dependencies(&raw)
            .into_iter()
            .map(|d| format!("{indent}{d}"))
            .collect::<Vec<_>>()
            .join("\n");

        let context = RenderContext::new(project_name)
            .with_variable("SERVICE_INITIALIZERS", initializers)
            .with_variable("SERVICE_DEPENDENCIES", dependencies);

        let application_path = platform.application_path();
        let manifest_path = platform.manifest_path();
        let application =
            self.renderer
                .render(application_path, &templates.application, &context)?;
        let manifest = self
            .renderer
            .render(manifest_path, &templates.package, &context)?;

        debug!("Application files composed");
        Ok(vec![
            (application_path.to_string(), application),
            (manifest_path.to_string(), manifest),
        ])
    }
}

/// Dependency lines with repeats removed, first occurrence kept.
pub fn unique_dependencies(raw: &[String]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    raw.iter()
        .map(String::as_str)
        .filter(|d| seen.insert(*d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicationTemplates, InjectedCode, ServiceDescriptor, ServiceTemplates};

    struct AppStore;

    impl TemplateStore for AppStore {
        fn service(&self, _: &ServiceDescriptor, _: Platform) -> EnablementResult<ServiceTemplates> {
            unreachable!()
        }

        fn application(&self, _: Platform) -> EnablementResult<ApplicationTemplates> {
            Ok(ApplicationTemplates {
                application: "// {{PROJECT_NAME}}\n{{SERVICE_INITIALIZERS}}\n".into(),
                package: "deps:\n{{SERVICE_DEPENDENCIES}}\n".into(),
            })
        }
    }

    struct PlainRenderer;

    impl TemplateRenderer for PlainRenderer {
        fn render(&self, _: &str, source: &str, ctx: &RenderContext) -> EnablementResult<String> {
            Ok(ctx.render(source))
        }
    }

    fn contribution(name: &'static str, init: &str, deps: &[&str]) -> ServiceContribution {
        ServiceContribution {
            service_name: name,
            code: InjectedCode {
                service: init.into(),
            },
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            source_path: String::new(),
            source: String::new(),
        }
    }

    #[test]
    fn unique_dependencies_keep_first_occurrence() {
        let raw = vec!["a".to_string(), "b".into(), "a".into(), "c".into()];
        assert_eq!(unique_dependencies(&raw), vec!["a", "b", "c"]);
    }

    #[test]
    fn compose_injects_calls_and_dependencies() {
        let contributions = vec![
            contribution("service-redis", "try initializeServiceRedis()", &["dep-a", "dep-b"]),
            contribution("service-push", "try initializeServicePush()", &["dep-a"]),
        ];

        let files = ApplicationComposer::new(&AppStore, &PlainRenderer)
            .compose("shop", Platform::Swift, &contributions)
            .unwrap();

        assert_eq!(files[0].0, "Sources/Application/Application.swift");
        assert_eq!(
            files[0].1,
            "// shop\n    try initializeServiceRedis()\n    try initializeServicePush()\n"
        );
        assert_eq!(files[1].0, "Package.swift");
        assert_eq!(files[1].1, "deps:\n        dep-a\n        dep-b\n");
    }

    #[test]
    fn python_manifest_lines_are_not_indented() {
        let contributions = vec![
            contribution(
                "service-object-storage",
                "register(app, 'service_object_storage')",
                &["ibm-cloud-env", "python-swiftclient"],
            ),
            contribution(
                "service-watson-text-to-speech",
                "register(app, 'service_watson_text_to_speech')",
                &["ibm-cloud-env", "watson-developer-cloud"],
            ),
        ];

        let files = ApplicationComposer::new(&AppStore, &PlainRenderer)
            .compose("speech", Platform::Python, &contributions)
            .unwrap();

        assert_eq!(files[0].0, "server/services/__init__.py");
        assert!(files[0].1.contains("    register(app, 'service_object_storage')\n"));
        assert_eq!(files[1].0, "requirements.txt");
        assert_eq!(
            files[1].1,
            "deps:\nibm-cloud-env\npython-swiftclient\nwatson-developer-cloud\n"
        );
    }
}
