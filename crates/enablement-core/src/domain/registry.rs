//! Service descriptor registry.
//!
//! Every supported cloud service is described exactly once by a
//! [`ServiceDescriptor`]. A single generic generator consumes these entries,
//! so adding a service means adding one entry here plus its templates.
//!
//! # Adding a New Service
//!
//! 1. Add one [`ServiceDescriptor`] to [`SERVICE_REGISTRY`], listing the
//!    platforms it has templates for
//! 2. Add `instrumentation.<ext>` and `dependencies.txt` for each platform in
//!    the adapters' template directory
//! 3. Naming, mappings and local-dev entries derive from the entry

use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::value_objects::{Platform, init_function_name, lookup_key, pascalize};

/// Static description of one service integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Generator name, e.g. `service-watson-conversation`.
    pub service_name: &'static str,

    /// Key of the service section in the project fixture.
    pub scaffolder_property: &'static str,

    /// Credential fields copied into the local-dev config, in order.
    pub local_dev_fields: &'static [&'static str],

    /// Backend platforms with templates for this service.
    pub platforms: &'static [Platform],
}

impl ServiceDescriptor {
    /// Short identifier used for the mapping entry and credential lookup.
    pub fn lookup_key(&self) -> String {
        lookup_key(self.service_name)
    }

    /// `ServiceWatsonConversation` for `service-watson-conversation`.
    pub fn pascal_name(&self) -> String {
        pascalize(self.service_name)
    }

    pub fn init_function(&self) -> String {
        init_function_name(self.service_name)
    }

    /// The wiring line injected into the application, e.g.
    /// `try initializeServiceWatsonConversation()` on Swift.
    pub fn init_call(&self, platform: Platform) -> String {
        platform.init_call(self.service_name)
    }

    /// Relative path of the generated service source file.
    pub fn source_path(&self, platform: Platform) -> String {
        platform.source_path(self.service_name)
    }

    pub fn supports(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }

    pub fn has_local_dev_config(&self) -> bool {
        !self.local_dev_fields.is_empty()
    }
}

impl fmt::Display for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service_name)
    }
}

const SWIFT: &[Platform] = &[Platform::Swift];
const SWIFT_AND_PYTHON: &[Platform] = &[Platform::Swift, Platform::Python];

/// Single source of truth for supported services.
///
/// Order is the processing order of the generation pipeline.
pub static SERVICE_REGISTRY: &[ServiceDescriptor] = &[
    ServiceDescriptor {
        service_name: "service-alert-notification",
        scaffolder_property: "alertnotification",
        local_dev_fields: &["name", "password", "url"],
        platforms: SWIFT,
    },
    ServiceDescriptor {
        service_name: "service-appid",
        scaffolder_property: "auth",
        local_dev_fields: &[
            "tenant_id",
            "client_id",
            "secret",
            "oauth_server_url",
            "profiles_url",
        ],
        platforms: SWIFT,
    },
    ServiceDescriptor {
        service_name: "service-cloudant",
        scaffolder_property: "cloudant",
        local_dev_fields: &["username", "password", "url"],
        platforms: SWIFT,
    },
    ServiceDescriptor {
        service_name: "service-db2",
        scaffolder_property: "db2OnCloud",
        local_dev_fields: &["dsn", "ssljdbcurl"],
        platforms: SWIFT,
    },
    ServiceDescriptor {
        service_name: "service-finance-historical-instrument-analytics",
        scaffolder_property: "historicalInstrumentAnalytics",
        local_dev_fields: &["uri", "accessToken"],
        platforms: SWIFT,
    },
    ServiceDescriptor {
        service_name: "service-finance-simulated-instrument-analytics",
        scaffolder_property: "simulatedInstrumentAnalytics",
        local_dev_fields: &["uri", "accessToken"],
        platforms: SWIFT,
    },
    ServiceDescriptor {
        service_name: "service-object-storage",
        scaffolder_property: "objectStorage",
        local_dev_fields: &["project_id", "user_id", "password", "region"],
        platforms: SWIFT_AND_PYTHON,
    },
    ServiceDescriptor {
        service_name: "service-postgre",
        scaffolder_property: "postgresql",
        local_dev_fields: &["uri"],
        platforms: SWIFT,
    },
    ServiceDescriptor {
        service_name: "service-push",
        scaffolder_property: "push",
        local_dev_fields: &["app_guid", "app_secret", "client_secret"],
        platforms: SWIFT,
    },
    ServiceDescriptor {
        service_name: "service-redis",
        scaffolder_property: "redis",
        local_dev_fields: &["uri"],
        platforms: SWIFT,
    },
    ServiceDescriptor {
        service_name: "service-watson-conversation",
        scaffolder_property: "conversation",
        local_dev_fields: &["url", "username", "password"],
        platforms: SWIFT,
    },
    ServiceDescriptor {
        service_name: "service-watson-language-translator",
        scaffolder_property: "languageTranslator",
        local_dev_fields: &["url", "username", "password"],
        platforms: SWIFT,
    },
    ServiceDescriptor {
        service_name: "service-watson-text-to-speech",
        scaffolder_property: "textToSpeech",
        local_dev_fields: &["url", "username", "password"],
        platforms: &[Platform::Python],
    },
];

/// Look up a descriptor by its service name.
pub fn find_service(service_name: &str) -> Result<&'static ServiceDescriptor, DomainError> {
    SERVICE_REGISTRY
        .iter()
        .find(|d| d.service_name == service_name)
        .ok_or_else(|| DomainError::UnknownService(service_name.to_string()))
}
