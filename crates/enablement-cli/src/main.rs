//! `enablement`: add cloud service integrations to a generated Swift
//! application.
//!
//! Startup runs in a fixed order. Arguments are parsed first, then the
//! configuration is loaded, so `logging.file` is known before the subscriber
//! is installed. Only then is a command dispatched. Every failure funnels
//! into [`handle_error`], which prints suggestions and picks the exit code:
//!
//! | Code | Meaning                          |
//! |------|----------------------------------|
//! |  0   | Success                          |
//! |  1   | Internal / I/O failure           |
//! |  2   | Bad input or fixture             |
//! |  3   | Fixture or template not found    |
//! |  4   | Configuration problem            |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // A missing .env is not an error.
    let _ = dotenvy::dotenv();

    // Help and version exit 0, usage errors exit 2.
    let cli = Cli::try_parse().unwrap_or_else(|e| e.exit());

    // `init` creates the file named by `--config`, so it may not exist yet.
    let require_file = !matches!(cli.command, Commands::Init(_));
    let config = AppConfig::load(cli.global.config.as_deref(), require_file);
    let log_file = config.as_ref().ok().and_then(|c| c.logging.file.clone());

    let _log_guard = match init_logging(&cli.global, log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e}");
            return ExitCode::from(1);
        }
    };
    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        config = ?cli.global.config,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;
    let config = match config {
        Ok(config) => config,
        Err(e) => return handle_error(e, verbose, !cli.global.no_color),
    };

    let output = OutputManager::new(&cli.global, &config);
    let color = !cli.global.no_color && !config.output.no_color;

    match run(cli, &config, &output) {
        Ok(()) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose, color),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, config, output),
        Commands::List(args) => commands::list::execute(args, output),
        Commands::Init(args) => commands::init::execute(args, &cli.global, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, &cli.global, config, output),
    }
}

/// Log `err`, print it to stderr and map it to an exit code.
///
/// Colour needs both `color` and a terminal on stderr.
fn handle_error(err: CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();

    let rendered = if color && std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{rendered}");

    ExitCode::from(err.exit_code())
}
