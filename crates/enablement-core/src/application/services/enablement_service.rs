//! Enablement Service - the composing generator.
//!
//! This service coordinates the whole run:
//! 1. Build one generator per registered service
//! 2. Run `initializing` for all of them, then `configuring`, then `writing`
//! 3. Compose the application files from the returned contributions
//! 4. Flush files and the shared configuration documents once

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationComposer, ServiceGenerator,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    },
    domain::{
        ConfigDocuments, InjectedCode, LOCALDEV_CONFIG_PATH, MAPPINGS_PATH,
        ProjectFixture, ProjectStructure, SERVICE_REGISTRY, ServiceContribution, ensure_ignored,
    },
    error::{Context, EnablementResult},
};

const GITIGNORE_PATH: &str = ".gitignore";

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub output_root: PathBuf,
    /// Render `Application.swift` and `Package.swift`.
    pub compose: bool,
    /// Plan and report without touching the filesystem.
    pub dry_run: bool,
}

impl GenerationOptions {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            compose: true,
            dry_run: false,
        }
    }

    pub fn with_compose(mut self, compose: bool) -> Self {
        self.compose = compose;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Everything a run would produce, before any I/O.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub structure: ProjectStructure,
    pub documents: ConfigDocuments,
    pub contributions: Vec<ServiceContribution>,
}

impl GenerationPlan {
    pub fn services(&self) -> Vec<&'static str> {
        self.contributions.iter().map(|c| c.service_name).collect()
    }

    /// Injected code in service order.
    pub fn code(&self) -> Vec<InjectedCode> {
        self.contributions.iter().map(|c| c.code.clone()).collect()
    }

    /// Every dependency line of every service, repeats included.
    pub fn dependencies(&self) -> Vec<String> {
        self.contributions
            .iter()
            .flat_map(|c| c.dependencies.iter().cloned())
            .collect()
    }
}

/// Summary of a run, printed by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub project: String,
    pub platform: String,
    pub services: Vec<String>,
    pub code: Vec<InjectedCode>,
    pub dependencies: Vec<String>,
    pub files_written: Vec<PathBuf>,
    pub dry_run: bool,
}

impl GenerationReport {
    pub fn to_json(&self) -> EnablementResult<String> {
        serde_json::to_string_pretty(self).context("serializing generation report")
    }
}

/// The composing generator.
pub struct EnablementService {
    templates: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl EnablementService {
    pub fn new(
        templates: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            templates,
            renderer,
            filesystem,
        }
    }

    /// Run the three phases and composition without writing anything.
    #[instrument(skip_all, fields(project = %fixture.name(), platform = %fixture.platform()))]
    pub fn plan(
        &self,
        fixture: &ProjectFixture,
        options: &GenerationOptions,
    ) -> EnablementResult<GenerationPlan> {
        let mut generators: Vec<ServiceGenerator> =
            SERVICE_REGISTRY.iter().map(ServiceGenerator::new).collect();

        // Phase 1: every generator resolves its section before any configures.
        for generator in &mut generators {
            generator.initializing(fixture)?;
        }
        generators.retain(ServiceGenerator::is_enabled);
        info!(enabled = generators.len(), "Initializing complete");

        // Phase 2
        let mut documents = ConfigDocuments::new();
        for generator in &generators {
            generator.configuring(&mut documents);
        }
        info!(
            mappings = documents.mappings().count(),
            local_dev = documents.local_dev_entries().count(),
            "Configuring complete"
        );

        // Phase 3
        let mut structure = ProjectStructure::new(&options.output_root);
        let mut contributions = Vec::with_capacity(generators.len());
        for generator in &generators {
            if let Some(contribution) =
                generator.writing(self.templates.as_ref(), self.renderer.as_ref())?
            {
                debug!(
                    service = contribution.service_name,
                    path = %contribution.source_path,
                    "Service source rendered"
                );
                structure.add_file(&contribution.source_path, contribution.source.clone());
                contributions.push(contribution);
            }
        }
        info!(services = contributions.len(), "Writing complete");

        if options.compose {
            let composer =
                ApplicationComposer::new(self.templates.as_ref(), self.renderer.as_ref());
            let composed = composer.compose(fixture.name(), fixture.platform(), &contributions)?;
            for (path, content) in composed {
                structure.add_file(path, content);
            }
        }

        structure.validate()?;

        Ok(GenerationPlan {
            structure,
            documents,
            contributions,
        })
    }

    /// Plan, then flush files and documents under `options.output_root`.
    #[instrument(
        skip_all,
        fields(
            project = %fixture.name(),
            output = %options.output_root.display(),
            dry_run = options.dry_run
        )
    )]
    pub fn generate(
        &self,
        fixture: &ProjectFixture,
        options: &GenerationOptions,
    ) -> EnablementResult<GenerationReport> {
        let run_id = Uuid::new_v4();
        info!(%run_id, "Enabling services for {}", fixture.name());

        let plan = self.plan(fixture, options)?;
        let documents = self.pending_documents(&options.output_root, &plan.documents)?;

        let mut files_written: Vec<PathBuf> = plan
            .structure
            .files()
            .map(|f| f.path.clone())
            .chain(documents.iter().map(|(path, _)| PathBuf::from(*path)))
            .collect();
        files_written.sort();

        if options.dry_run {
            info!(files = files_written.len(), "Dry run, nothing written");
        } else {
            self.write_structure(&plan.structure)?;
            for (path, content) in &documents {
                self.write(&options.output_root, Path::new(*path), content)?;
            }
            info!(files = files_written.len(), "Generation completed successfully");
        }

        Ok(GenerationReport {
            run_id,
            project: fixture.name().to_string(),
            platform: fixture.platform().to_string(),
            services: plan.services().into_iter().map(str::to_string).collect(),
            code: plan.code(),
            dependencies: plan.dependencies(),
            files_written,
            dry_run: options.dry_run,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Render the shared documents merged over what already exists on disk.
    fn pending_documents(
        &self,
        root: &Path,
        documents: &ConfigDocuments,
    ) -> EnablementResult<Vec<(&'static str, String)>> {
        let mut pending = Vec::new();

        if documents.has_mappings() {
            let existing = self.filesystem.read_file(&root.join(MAPPINGS_PATH))?;
            pending.push((MAPPINGS_PATH, documents.render_mappings(existing.as_deref())?));
        }

        if documents.has_local_dev() {
            let existing = self.filesystem.read_file(&root.join(LOCALDEV_CONFIG_PATH))?;
            pending.push((
                LOCALDEV_CONFIG_PATH,
                documents.render_local_dev(existing.as_deref())?,
            ));

            let ignore = self.filesystem.read_file(&root.join(GITIGNORE_PATH))?;
            if let Some(updated) = ensure_ignored(ignore.as_deref(), LOCALDEV_CONFIG_PATH) {
                pending.push((GITIGNORE_PATH, updated));
            }
        }

        Ok(pending)
    }

    fn write_structure(&self, structure: &ProjectStructure) -> EnablementResult<()> {
        self.filesystem.create_dir_all(structure.root())?;

        for file in structure.files() {
            self.write(structure.root(), &file.path, &file.content)?;
        }

        Ok(())
    }

    fn write(&self, root: &Path, relative: &Path, content: &str) -> EnablementResult<()> {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        debug!(path = %path.display(), "Writing file");
        self.filesystem.write_file(&path, content)
    }
}
