//! Filesystem-based template store.
//!
//! Loads user templates from a directory laid out like the built-in set:
//!
//! ```text
//! templates/
//! ├── app/
//! │   ├── swift/
//! │   │   ├── Application.swift
//! │   │   └── Package.swift
//! │   └── python/
//! │       ├── __init__.py
//! │       └── requirements.txt
//! └── service-redis/
//!     └── swift/
//!         ├── instrumentation.swift
//!         └── dependencies.txt
//! ```
//!
//! Any file missing from the directory falls back to the built-in template,
//! so a directory may override a single service.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use enablement_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{ApplicationTemplates, Platform, ServiceDescriptor, ServiceTemplates},
    error::EnablementResult,
};

use crate::builtin_templates::{self, APP_DIR, DEPENDENCIES_FILE, template_file};

#[derive(Debug, Clone)]
pub struct DirectoryTemplateStore {
    root: PathBuf,
    /// Relative path (with `/` separators) to content.
    files: BTreeMap<String, String>,
}

impl DirectoryTemplateStore {
    /// Read every template file under `root`.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn open(root: impl AsRef<Path>) -> EnablementResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ApplicationError::TemplateDirectory {
                path: root.to_path_buf(),
                reason: "not a directory".into(),
            }
            .into());
        }

        let mut files = BTreeMap::new();
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry.map_err(|e| ApplicationError::TemplateDirectory {
                path: root.to_path_buf(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            let content = fs::read_to_string(entry.path()).map_err(|e| {
                ApplicationError::FilesystemError {
                    path: entry.path().to_path_buf(),
                    reason: format!("Failed to read template: {}", e),
                }
            })?;
            debug!(template = %key, "Loaded template");
            files.insert(key, content);
        }

        Ok(Self {
            root: root.to_path_buf(),
            files,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Service directories found under the root, whether or not they are
    /// registered services.
    pub fn discovered_services(&self) -> Vec<String> {
        self.files
            .keys()
            .filter_map(|key| key.split('/').next())
            .filter(|dir| *dir != APP_DIR)
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn file(&self, dir: &str, platform: Platform, name: &str) -> Option<&str> {
        self.files
            .get(&format!("{dir}/{}/{name}", platform.template_dir()))
            .map(String::as_str)
    }
}

impl TemplateStore for DirectoryTemplateStore {
    fn service(
        &self,
        descriptor: &ServiceDescriptor,
        platform: Platform,
    ) -> EnablementResult<ServiceTemplates> {
        let name = descriptor.service_name;
        let instrumentation_file = platform.instrumentation_file();
        let builtin = builtin_templates::service(name, platform);

        let instrumentation = self
            .file(name, platform, instrumentation_file)
            .map(str::to_string)
            .or_else(|| builtin.as_ref().map(|b| b.instrumentation.clone()))
            .ok_or_else(|| ApplicationError::TemplateMissing {
                service: name.to_string(),
                file: format!("{}/{instrumentation_file}", platform.template_dir()),
            })?;

        let dependencies = match self.file(name, platform, DEPENDENCIES_FILE) {
            Some(text) => text.to_string(),
            None => match &builtin {
                Some(b) => b.dependencies.clone(),
                None => {
                    warn!(service = name, "No dependencies.txt, service declares no dependencies");
                    String::new()
                }
            },
        };

        Ok(ServiceTemplates::new(instrumentation, dependencies))
    }

    fn application(&self, platform: Platform) -> EnablementResult<ApplicationTemplates> {
        let builtin = builtin_templates::application(platform);
        let application_file = template_file(platform.application_path());
        let manifest_file = template_file(platform.manifest_path());
        Ok(ApplicationTemplates {
            application: self
                .file(APP_DIR, platform, application_file)
                .map_or(builtin.application, str::to_string),
            package: self
                .file(APP_DIR, platform, manifest_file)
                .map_or(builtin.package, str::to_string),
        })
    }
}
