//! Domain value objects: Platform, SearchSource, SearchPattern, and the
//! naming transformations shared by every service.
//!
//! These are pure value types. Naming is deterministic: the same service name
//! always yields the same init function, lookup key and source path.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::domain::error::DomainError;

/// Path of the local-dev config document, relative to the project root.
pub const LOCALDEV_CONFIG_PATH: &str = "config/localdev-config.json";

/// Path of the credential mapping document, relative to the project root.
pub const MAPPINGS_PATH: &str = "config/mappings.json";

const SERVICE_PREFIX: &str = "service-";

// ── Platform ─────────────────────────────────────────────────────────────────

/// Backend platform of the generated application.
///
/// The platform picks the template set and where generated files land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    #[default]
    Swift,
    Python,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Swift, Platform::Python];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Swift => "SWIFT",
            Self::Python => "PYTHON",
        }
    }

    /// Per-platform subdirectory of a template set.
    pub const fn template_dir(&self) -> &'static str {
        match self {
            Self::Swift => "swift",
            Self::Python => "python",
        }
    }

    /// File name of a service's instrumentation template.
    pub const fn instrumentation_file(&self) -> &'static str {
        match self {
            Self::Swift => "instrumentation.swift",
            Self::Python => "instrumentation.py",
        }
    }

    /// Composed source that initializes every enabled service.
    pub const fn application_path(&self) -> &'static str {
        match self {
            Self::Swift => "Sources/Application/Application.swift",
            Self::Python => "server/services/__init__.py",
        }
    }

    /// Composed dependency manifest.
    pub const fn manifest_path(&self) -> &'static str {
        match self {
            Self::Swift => "Package.swift",
            Self::Python => "requirements.txt",
        }
    }

    /// Relative path of the generated source for `service_name`.
    pub fn source_path(&self, service_name: &str) -> String {
        match self {
            Self::Swift => format!("Sources/Application/Services/{}.swift", pascalize(service_name)),
            Self::Python => format!("server/services/{}.py", module_name(service_name)),
        }
    }

    /// The wiring line injected into the composed application source.
    pub fn init_call(&self, service_name: &str) -> String {
        match self {
            Self::Swift => format!("try {}()", init_function_name(service_name)),
            Self::Python => format!("register(app, '{}')", module_name(service_name)),
        }
    }

    /// Indentation of one manifest dependency line.
    pub const fn dependency_indent(&self) -> &'static str {
        match self {
            Self::Swift => "        ",
            Self::Python => "",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SWIFT" => Ok(Self::Swift),
            "PYTHON" => Ok(Self::Python),
            other => Err(DomainError::UnsupportedPlatform(other.to_string())),
        }
    }
}

// ── Search patterns ──────────────────────────────────────────────────────────

/// Where the generated application looks for a service's credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchSource {
    CloudFoundry,
    Env,
    File,
}

impl SearchSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CloudFoundry => "cloudfoundry",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

/// One `source:identifier` entry of a mapping's `searchPatterns`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchPattern {
    source: SearchSource,
    identifier: String,
}

impl SearchPattern {
    pub fn new(source: SearchSource, identifier: impl Into<String>) -> Self {
        Self {
            source,
            identifier: identifier.into(),
        }
    }

    /// The three patterns for an instance, in resolution order.
    pub fn for_instance(instance_name: &str) -> [Self; 3] {
        [
            Self::new(SearchSource::CloudFoundry, instance_name),
            Self::new(SearchSource::Env, env_identifier(instance_name)),
            Self::new(
                SearchSource::File,
                format!("/{LOCALDEV_CONFIG_PATH}:{instance_name}"),
            ),
        ]
    }

    pub fn source(&self) -> SearchSource {
        self.source
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source.as_str(), self.identifier)
    }
}

impl Serialize for SearchPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── Naming ───────────────────────────────────────────────────────────────────

/// Split on `-`, uppercase each segment's first character, lowercase the rest.
///
/// | Input | Output |
/// |-------|--------|
/// | `service-watson-conversation` | `ServiceWatsonConversation` |
/// | `service-db2` | `ServiceDb2` |
/// | `service-appid` | `ServiceAppid` |
pub fn pascalize(name: &str) -> String {
    name.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

pub fn init_function_name(service_name: &str) -> String {
    format!("initialize{}", pascalize(service_name))
}

/// `service-object-storage` → `service_object_storage`, a Python module name.
pub fn module_name(service_name: &str) -> String {
    service_name.replace('-', "_")
}

/// `service-object-storage` → `object_storage`.
pub fn lookup_key(service_name: &str) -> String {
    service_name
        .strip_prefix(SERVICE_PREFIX)
        .unwrap_or(service_name)
        .replace('-', "_")
}

/// Instance names become environment identifiers by swapping `-` for `_`.
pub fn env_identifier(instance_name: &str) -> String {
    instance_name.replace('-', "_")
}

/// `tenant_id` → `tenantId`; names without underscores are returned unchanged.
pub fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
