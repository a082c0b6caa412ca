//! Generic per-service generator.
//!
//! One instance per registry entry. The orchestrator drives every instance
//! through `initializing`, `configuring` and `writing`, finishing each phase
//! for all services before starting the next.

use tracing::{debug, warn};

use crate::{
    application::ports::{TemplateRenderer, TemplateStore},
    domain::{
        ConfigDocuments, InjectedCode, LocalDevConfigEntry, MappingEntry, Platform,
        ProjectFixture, RenderContext, ServiceContribution, ServiceDescriptor, ServiceSection,
    },
    error::EnablementResult,
};

#[derive(Debug, Clone)]
pub struct ServiceGenerator {
    descriptor: &'static ServiceDescriptor,
    project_name: String,
    platform: Platform,
    section: Option<ServiceSection>,
}

impl ServiceGenerator {
    pub fn new(descriptor: &'static ServiceDescriptor) -> Self {
        Self {
            descriptor,
            project_name: String::new(),
            platform: Platform::default(),
            section: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.section.is_some()
    }

    pub fn instance_name(&self) -> Option<&str> {
        self.section.as_ref().map(ServiceSection::instance_name)
    }

    /// Resolve this service's section of the fixture.
    ///
    /// A missing section disables the service. A present but malformed
    /// section is an error. A service without templates for the fixture's
    /// platform is skipped with a warning.
    pub fn initializing(&mut self, fixture: &ProjectFixture) -> EnablementResult<bool> {
        self.project_name = fixture.name().to_string();
        self.platform = fixture.platform();
        self.section = fixture.service_section(self.descriptor)?;

        if self.section.is_some() && !self.descriptor.supports(self.platform) {
            warn!(
                service = %self.descriptor,
                platform = %self.platform,
                "Service has no templates for this platform, skipped"
            );
            self.section = None;
        }

        match self.instance_name() {
            Some(instance) => debug!(service = %self.descriptor, instance, "Service enabled"),
            None => debug!(service = %self.descriptor, "Service not in fixture"),
        }

        Ok(self.is_enabled())
    }

    /// Register the mapping entry and, when credentials exist, the local-dev
    /// entry. Does nothing for a disabled service.
    pub fn configuring(&self, documents: &mut ConfigDocuments) {
        let Some(section) = &self.section else {
            return;
        };

        documents.add_mapping(MappingEntry::new(
            self.descriptor.lookup_key(),
            section.instance_name(),
        ));

        if !self.descriptor.has_local_dev_config() {
            return;
        }

        let mut fields = Vec::with_capacity(self.descriptor.local_dev_fields.len());
        for &field in self.descriptor.local_dev_fields {
            match section.credential(field) {
                Some(value) => fields.push((field, value)),
                None => warn!(
                    service = %self.descriptor,
                    field,
                    "Credential missing from fixture, omitted from local-dev config"
                ),
            }
        }

        if let Some(entry) = LocalDevConfigEntry::from_fields(section.instance_name(), fields) {
            documents.add_local_dev(entry);
        }
    }

    /// Render the service source and collect what the composer needs.
    ///
    /// Returns `Ok(None)` for a disabled service.
    pub fn writing(
        &self,
        templates: &dyn TemplateStore,
        renderer: &dyn TemplateRenderer,
    ) -> EnablementResult<Option<ServiceContribution>> {
        let Some(section) = &self.section else {
            return Ok(None);
        };

        let sources = templates.service(self.descriptor, self.platform)?;
        let context =
            RenderContext::for_service(&self.project_name, self.descriptor, section.instance_name());
        let source_path = self.descriptor.source_path(self.platform);
        let source = renderer.render(&source_path, &sources.instrumentation, &context)?;

        Ok(Some(ServiceContribution {
            service_name: self.descriptor.service_name,
            code: InjectedCode {
                service: self.descriptor.init_call(self.platform),
            },
            dependencies: sources.dependency_lines(),
            source_path,
            source,
        }))
    }
}
