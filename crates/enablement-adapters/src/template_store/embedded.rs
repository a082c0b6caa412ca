//! Template store backed by the templates compiled into the binary.

use enablement_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{ApplicationTemplates, Platform, ServiceDescriptor, ServiceTemplates},
    error::EnablementResult,
};

use crate::builtin_templates;

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateStore;

impl EmbeddedTemplateStore {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateStore for EmbeddedTemplateStore {
    fn service(
        &self,
        descriptor: &ServiceDescriptor,
        platform: Platform,
    ) -> EnablementResult<ServiceTemplates> {
        builtin_templates::service(descriptor.service_name, platform).ok_or_else(|| {
            ApplicationError::TemplateMissing {
                service: descriptor.service_name.to_string(),
                file: format!("{}/{}", platform.template_dir(), platform.instrumentation_file()),
            }
            .into()
        })
    }

    fn application(&self, platform: Platform) -> EnablementResult<ApplicationTemplates> {
        Ok(builtin_templates::application(platform))
    }
}
