//! Implementation of the `enablement generate` command.
//!
//! Responsibility: read the fixture, wire the adapters into the core
//! [`EnablementService`], and display the report. No business logic lives
//! here.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use enablement_adapters::{
    DirectoryTemplateStore, EmbeddedTemplateStore, LocalFilesystem, SimpleRenderer,
};
use enablement_core::{
    application::{EnablementService, GenerationOptions, GenerationReport, ports::TemplateStore},
    domain::ProjectFixture,
};

use crate::{
    cli::{GenerateArgs, OutputFormat, ReportFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `enablement generate` command.
///
/// 1. Load and parse the fixture
/// 2. Resolve templates, output root and options from flags and config
/// 3. Confirm with the user when attached to a terminal
/// 4. Run the generator (or plan only, with `--dry-run`)
/// 5. Print the report
#[instrument(skip_all, fields(fixture = %args.fixture.display()))]
pub fn execute(args: GenerateArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let fixture = load_fixture(&args.fixture)?;
    let output_root = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    if output_root.exists() && !output_root.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("output '{}' is not a directory", output_root.display()),
            source: None,
        });
    }
    let templates_dir = args
        .templates
        .as_ref()
        .or(config.generation.templates_dir.as_ref());

    let options = GenerationOptions::new(&output_root)
        .with_compose(config.generation.compose && !args.no_compose)
        .with_dry_run(args.dry_run);
    let format = report_format(&args, output);

    debug!(
        project = fixture.name(),
        output = %output_root.display(),
        templates = ?templates_dir,
        compose = options.compose,
        "Generation options resolved"
    );

    let prompt = !args.yes
        && !args.dry_run
        && !output.is_quiet()
        && format == ReportFormat::Human
        && std::io::stdin().is_terminal();
    if prompt {
        show_plan(&fixture, &output_root, templates_dir, &options, output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let service = EnablementService::new(
        template_store(templates_dir)?,
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    let report = service
        .generate(&fixture, &options)
        .with_cli_context(|| "generation failed")?;

    match format {
        ReportFormat::Json => {
            let json = report.to_json().with_cli_context(|| "report")?;
            output.data(&json)?;
        }
        ReportFormat::Human => print_report(&report, &output_root, output)?,
    }

    Ok(())
}

fn load_fixture(path: &Path) -> CliResult<ProjectFixture> {
    if !path.exists() {
        return Err(CliError::FixtureNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)
        .with_cli_context(|| format!("failed to read fixture '{}'", path.display()))?;
    ProjectFixture::from_json(&text).map_err(|e| CliError::Core(e.into()))
}

fn template_store(templates_dir: Option<&PathBuf>) -> CliResult<Box<dyn TemplateStore>> {
    match templates_dir {
        Some(dir) => {
            let store = DirectoryTemplateStore::open(dir).with_cli_context(|| "templates")?;
            debug!(
                root = %store.root().display(),
                services = store.discovered_services().len(),
                "Using template directory"
            );
            Ok(Box::new(store))
        }
        None => Ok(Box::new(EmbeddedTemplateStore::new())),
    }
}

fn report_format(args: &GenerateArgs, output: &OutputManager) -> ReportFormat {
    match args.format {
        Some(format) => format,
        None if output.format() == OutputFormat::Json => ReportFormat::Json,
        None => ReportFormat::Human,
    }
}

fn show_plan(
    fixture: &ProjectFixture,
    output_root: &Path,
    templates_dir: Option<&PathBuf>,
    options: &GenerationOptions,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Enablement")?;
    out.print(&format!("  Project:   {}", fixture.name()))?;
    out.print(&format!("  Platform:  {}", fixture.platform()))?;
    out.print(&format!("  Location:  {}", output_root.display()))?;
    out.print(&format!(
        "  Templates: {}",
        templates_dir
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "built-in".into())
    ))?;
    out.print(&format!("  Compose:   {}", options.compose))?;
    out.print("")?;
    Ok(())
}

fn print_report(
    report: &GenerationReport,
    output_root: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    if report.services.is_empty() {
        out.warning(&format!(
            "No {} services found in the fixture",
            report.platform
        ))?;
    }

    if report.dry_run {
        out.info(&format!(
            "Dry run: would write {} files under {}",
            report.files_written.len(),
            output_root.display()
        ))?;
    } else {
        out.success(&format!(
            "Enabled {} services for '{}' ({})",
            report.services.len(),
            report.project,
            report.platform
        ))?;
    }

    if !report.services.is_empty() {
        out.header("Services")?;
        for (service, code) in report.services.iter().zip(&report.code) {
            out.print(&format!("  {service:<32} {}", code.service))?;
        }
    }

    out.header("Files")?;
    for path in &report.files_written {
        out.print(&format!("  {}", path.display()))?;
    }

    if !report.dependencies.is_empty() {
        out.header("Dependencies")?;
        for dependency in &report.dependencies {
            out.print(&format!("  {dependency}"))?;
        }
    }

    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e.to_string()),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}
