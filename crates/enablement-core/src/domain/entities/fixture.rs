//! Project fixture: the parsed description of the application being enabled.
//!
//! A fixture is a JSON object with a project `name`, an optional
//! `backendPlatform` (`SWIFT` by default, or `PYTHON`), an optional `server`
//! block, and one section per enabled service keyed by the service's
//! scaffolder property:
//!
//! ```json
//! {
//!   "name": "shop",
//!   "backendPlatform": "SWIFT",
//!   "conversation": {
//!     "serviceInfo": { "name": "shop-conversation", "label": "conversation", "plan": "free" },
//!     "url": "https://gateway.example.net/conversation/api",
//!     "username": "user",
//!     "password": "secret"
//!   }
//! }
//! ```
//!
//! A missing section means the service is disabled.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{
    error::DomainError,
    registry::ServiceDescriptor,
    value_objects::{Platform, camel_case},
};

#[derive(Debug, Clone, Deserialize)]
struct RawFixture {
    name: Option<String>,
    #[serde(rename = "backendPlatform")]
    backend_platform: Option<String>,
    server: Option<Value>,
    #[serde(flatten)]
    sections: Map<String, Value>,
}

/// Parsed project fixture.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    name: String,
    platform: Platform,
    server: Option<Value>,
    sections: Map<String, Value>,
}

impl ProjectFixture {
    /// Parse a fixture from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let raw: RawFixture =
            serde_json::from_str(json).map_err(|e| DomainError::MalformedFixture(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Build a fixture from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        let raw: RawFixture = serde_json::from_value(value)
            .map_err(|e| DomainError::MalformedFixture(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawFixture) -> Result<Self, DomainError> {
        let name = raw
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| DomainError::MalformedFixture("missing project \"name\"".into()))?;

        let platform = match raw.backend_platform.as_deref() {
            Some(p) => p.parse()?,
            None => Platform::default(),
        };

        Ok(Self {
            name,
            platform,
            server: raw.server,
            sections: raw.sections,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn server(&self) -> Option<&Value> {
        self.server.as_ref()
    }

    /// Resolve the section enabling `descriptor`.
    ///
    /// Returns `Ok(None)` when the fixture has no section for the service (or an
    /// empty array). Array sections contribute their first element.
    pub fn service_section(
        &self,
        descriptor: &ServiceDescriptor,
    ) -> Result<Option<ServiceSection>, DomainError> {
        let property = descriptor.scaffolder_property;
        let value = match self.sections.get(property) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Array(items)) => match items.first() {
                Some(first) => first,
                None => return Ok(None),
            },
            Some(other) => other,
        };

        ServiceSection::parse(property, value).map(Some)
    }
}

/// Credentials and identity of one provisioned service instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSection {
    instance_name: String,
    credentials: Map<String, Value>,
}

impl ServiceSection {
    fn parse(property: &str, value: &Value) -> Result<Self, DomainError> {
        let malformed = |reason: &str| DomainError::MalformedServiceSection {
            property: property.to_string(),
            reason: reason.to_string(),
        };

        let credentials = value
            .as_object()
            .ok_or_else(|| malformed("expected a JSON object"))?;

        let instance_name = credentials
            .get("serviceInfo")
            .and_then(|info| info.get("name"))
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| malformed("missing serviceInfo.name"))?;

        Ok(Self {
            instance_name: instance_name.to_string(),
            credentials: credentials.clone(),
        })
    }

    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    /// Credential value for a local-dev field.
    ///
    /// The field is looked up verbatim first, then in camelCase
    /// (`tenant_id` falls back to `tenantId`). Nulls count as absent.
    pub fn credential(&self, field: &str) -> Option<&Value> {
        present(&self.credentials, field).or_else(|| present(&self.credentials, &camel_case(field)))
    }
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}
