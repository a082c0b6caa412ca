//! Shared configuration documents.
//!
//! Every enabled service registers one [`MappingEntry`] and at most one
//! [`LocalDevConfigEntry`] into a [`ConfigDocuments`] accumulator during the
//! configuring phase. The accumulator is rendered once, after all services
//! have run, merging over whatever document already exists in the project.
//!
//! Output is deterministic: keys are sorted and documents end with a newline,
//! so identical fixtures always produce byte-identical files.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{
    error::DomainError,
    value_objects::{LOCALDEV_CONFIG_PATH, MAPPINGS_PATH, SearchPattern},
};

/// Credential resolution entry for one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    #[serde(skip)]
    lookup_key: String,
    search_patterns: Vec<SearchPattern>,
}

impl MappingEntry {
    pub fn new(lookup_key: impl Into<String>, instance_name: &str) -> Self {
        Self {
            lookup_key: lookup_key.into(),
            search_patterns: SearchPattern::for_instance(instance_name).to_vec(),
        }
    }

    pub fn lookup_key(&self) -> &str {
        &self.lookup_key
    }

    pub fn search_patterns(&self) -> &[SearchPattern] {
        &self.search_patterns
    }
}

/// Local-dev credentials for one service instance.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalDevConfigEntry {
    instance_name: String,
    fields: Map<String, Value>,
}

impl LocalDevConfigEntry {
    /// Returns `None` when no field carries a value.
    pub fn from_fields<'a, I>(instance_name: impl Into<String>, fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let fields: Map<String, Value> = fields
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();

        if fields.is_empty() {
            return None;
        }

        Some(Self {
            instance_name: instance_name.into(),
            fields,
        })
    }

    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Accumulator for the mapping and local-dev documents of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocuments {
    mappings: BTreeMap<String, MappingEntry>,
    local_dev: BTreeMap<String, LocalDevConfigEntry>,
}

impl ConfigDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mapping(&mut self, entry: MappingEntry) {
        self.mappings.insert(entry.lookup_key.clone(), entry);
    }

    pub fn add_local_dev(&mut self, entry: LocalDevConfigEntry) {
        self.local_dev.insert(entry.instance_name.clone(), entry);
    }

    pub fn mappings(&self) -> impl Iterator<Item = &MappingEntry> {
        self.mappings.values()
    }

    pub fn local_dev_entries(&self) -> impl Iterator<Item = &LocalDevConfigEntry> {
        self.local_dev.values()
    }

    pub fn mapping(&self, lookup_key: &str) -> Option<&MappingEntry> {
        self.mappings.get(lookup_key)
    }

    pub fn local_dev(&self, instance_name: &str) -> Option<&LocalDevConfigEntry> {
        self.local_dev.get(instance_name)
    }

    pub fn has_mappings(&self) -> bool {
        !self.mappings.is_empty()
    }

    pub fn has_local_dev(&self) -> bool {
        !self.local_dev.is_empty()
    }

    /// Render `config/mappings.json`, merged over `existing` when present.
    pub fn render_mappings(&self, existing: Option<&str>) -> Result<String, DomainError> {
        let mut doc = parse_document(MAPPINGS_PATH, existing)?;
        for (key, entry) in &self.mappings {
            let value = serde_json::to_value(entry).map_err(|e| malformed(MAPPINGS_PATH, e))?;
            doc.insert(key.clone(), value);
        }
        to_pretty(MAPPINGS_PATH, doc)
    }

    /// Render `config/localdev-config.json`, merged over `existing` when present.
    pub fn render_local_dev(&self, existing: Option<&str>) -> Result<String, DomainError> {
        let mut doc = parse_document(LOCALDEV_CONFIG_PATH, existing)?;
        for (instance, entry) in &self.local_dev {
            doc.insert(instance.clone(), Value::Object(entry.fields.clone()));
        }
        to_pretty(LOCALDEV_CONFIG_PATH, doc)
    }
}

/// Return the updated ignore file when `entry` is not yet listed.
pub fn ensure_ignored(existing: Option<&str>, entry: &str) -> Option<String> {
    let current = existing.unwrap_or_default();
    let listed = current
        .lines()
        .map(str::trim)
        .any(|line| line == entry || line.strip_prefix('/') == Some(entry));
    if listed {
        return None;
    }

    let mut updated = current.to_string();
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(entry);
    updated.push('\n');
    Some(updated)
}

fn parse_document(name: &str, existing: Option<&str>) -> Result<Map<String, Value>, DomainError> {
    match existing.map(str::trim) {
        None | Some("") => Ok(Map::new()),
        Some(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(DomainError::MalformedDocument {
                document: name.to_string(),
                reason: "top-level value is not an object".into(),
            }),
            Err(e) => Err(malformed(name, e)),
        },
    }
}

fn to_pretty(name: &str, doc: Map<String, Value>) -> Result<String, DomainError> {
    let mut text =
        serde_json::to_string_pretty(&Value::Object(doc)).map_err(|e| malformed(name, e))?;
    text.push('\n');
    Ok(text)
}

fn malformed(name: &str, e: serde_json::Error) -> DomainError {
    DomainError::MalformedDocument {
        document: name.to_string(),
        reason: e.to_string(),
    }
}
