//! Implementation of the `enablement list` command.

use serde::Serialize;

use enablement_core::domain::{SERVICE_REGISTRY, ServiceDescriptor};

use crate::{
    cli::{ListArgs, ListFormat},
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// One registry entry as shown by `list --format json`.
#[derive(Debug, Serialize)]
struct ServiceInfo {
    service: &'static str,
    property: &'static str,
    lookup_key: String,
    platforms: Vec<&'static str>,
    /// Generated source path on each supported platform.
    source_paths: Vec<String>,
    local_dev_fields: &'static [&'static str],
}

impl From<&ServiceDescriptor> for ServiceInfo {
    fn from(d: &ServiceDescriptor) -> Self {
        Self {
            service: d.service_name,
            property: d.scaffolder_property,
            lookup_key: d.lookup_key(),
            platforms: d.platforms.iter().map(|p| p.as_str()).collect(),
            source_paths: d.platforms.iter().map(|p| d.source_path(*p)).collect(),
            local_dev_fields: d.local_dev_fields,
        }
    }
}

pub fn execute(args: ListArgs, output: &OutputManager) -> CliResult<()> {
    let services: Vec<ServiceInfo> = SERVICE_REGISTRY.iter().map(ServiceInfo::from).collect();

    match args.format {
        ListFormat::Table => {
            output.header("Supported Services:")?;
            output.print(&format!(
                "  {:<48} {:<30} {:<30} {:<14} {}",
                "SERVICE", "PROPERTY", "LOOKUP KEY", "PLATFORMS", "LOCAL-DEV FIELDS"
            ))?;
            for s in &services {
                let fields = if s.local_dev_fields.is_empty() {
                    "-".to_string()
                } else {
                    s.local_dev_fields.join(", ")
                };
                output.print(&format!(
                    "  {:<48} {:<30} {:<30} {:<14} {}",
                    s.service,
                    s.property,
                    s.lookup_key,
                    s.platforms.join(","),
                    fields
                ))?;
            }
        }

        ListFormat::List => {
            for s in &services {
                output.print(s.service)?;
            }
        }

        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&services)
                .map_err(std::io::Error::other)
                .with_cli_context(|| "failed to serialise service list")?;
            output.data(&json)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use enablement_core::domain::find_service;

    #[test]
    fn service_info_mirrors_descriptor() {
        let info = ServiceInfo::from(find_service("service-watson-conversation").unwrap());
        assert_eq!(info.property, "conversation");
        assert_eq!(info.lookup_key, "watson_conversation");
        assert_eq!(info.platforms, vec!["SWIFT"]);
        assert_eq!(
            info.source_paths,
            vec!["Sources/Application/Services/ServiceWatsonConversation.swift"]
        );
    }

    #[test]
    fn service_info_lists_every_platform() {
        let info = ServiceInfo::from(find_service("service-object-storage").unwrap());
        assert_eq!(info.platforms, vec!["SWIFT", "PYTHON"]);
        assert_eq!(
            info.source_paths,
            vec![
                "Sources/Application/Services/ServiceObjectStorage.swift",
                "server/services/service_object_storage.py",
            ]
        );
    }

    #[test]
    fn service_info_serialises_fields() {
        let info = ServiceInfo::from(find_service("service-redis").unwrap());
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["service"], "service-redis");
        assert!(value["local_dev_fields"].is_array());
    }
}
