//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "enablement",
    bin_name = "enablement",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Cloud service enablement for generated Swift applications",
    long_about = "Enablement reads a project fixture and adds cloud service \
                  integrations to a generated Kitura application: one source \
                  file per service, credential mappings, local-dev \
                  credentials, and the composed application and manifest.",
    after_help = "EXAMPLES:\n\
        \x20 enablement generate --fixture project.json --output ./MyApp\n\
        \x20 enablement generate -f project.json --dry-run --format json\n\
        \x20 enablement list\n\
        \x20 enablement completions bash > /usr/share/bash-completion/completions/enablement",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Enable the services named in a project fixture.
    #[command(
        visible_alias = "g",
        about = "Enable services from a project fixture",
        after_help = "EXAMPLES:\n\
            \x20 enablement generate --fixture project.json\n\
            \x20 enablement generate -f project.json -o ./MyApp --yes\n\
            \x20 enablement generate -f project.json --templates ./my-templates --no-compose"
    )]
    Generate(GenerateArgs),

    /// List the services this generator can enable.
    #[command(
        visible_alias = "ls",
        about = "List supported services",
        after_help = "EXAMPLES:\n\
            \x20 enablement list\n\
            \x20 enablement list --format json"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 enablement init\n\
            \x20 enablement init --force\n\
            \x20 enablement --config ./enablement.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 enablement completions bash > ~/.local/share/bash-completion/completions/enablement\n\
            \x20 enablement completions zsh  > ~/.zfunc/_enablement\n\
            \x20 enablement completions fish > ~/.config/fish/completions/enablement.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 enablement config get generation.compose\n\
            \x20 enablement config list\n\
            \x20 enablement config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `enablement generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project fixture describing the application and its services.
    #[arg(
        short = 'f',
        long = "fixture",
        value_name = "FILE",
        help = "Project fixture (JSON)"
    )]
    pub fixture: PathBuf,

    /// Root of the generated application.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Template directory overriding the built-in templates.
    #[arg(
        short = 't',
        long = "templates",
        value_name = "DIR",
        help = "Template directory (overrides generation.templates_dir)"
    )]
    pub templates: Option<PathBuf>,

    /// Skip rendering `Application.swift` and `Package.swift`.
    #[arg(long = "no-compose", help = "Do not compose the application files")]
    pub no_compose: bool,

    /// Plan and report without writing any files.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and write immediately")]
    pub yes: bool,

    /// Report format.
    #[arg(long = "format", value_enum, help = "Report format")]
    pub format: Option<ReportFormat>,
}

/// Output format for the generation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary.
    Human,
    /// The full report as JSON on stdout.
    Json,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `enablement list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One service name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `enablement init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `enablement completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `enablement config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.compose`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
