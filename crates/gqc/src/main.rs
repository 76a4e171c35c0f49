#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
//! Command-line interface for checking out one branch across every
//! repository in a workspace via the libgqc crate.

use std::{
    env,
    io::{self, IsTerminal, Write},
    process,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use gqc_term::{Output, Quiet, Terminal};
use libgqc::{Config, GqcError, RefCatalog, workspace};
use tracing::debug;

/// Command-line argument definitions.
mod args;
/// Subcommand implementations.
mod commands;
/// Diagnostic logging setup.
mod logging;
/// Shared rendering and prompt helpers.
mod ui;
/// Path helpers.
mod utils;

use crate::{
    args::{CheckoutRequest, Cli, Commands},
    utils::{WORKSPACE_ENV, expand_tilde, resolve_workspace},
};

/// CLI entrypoint.
fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    // Determine color output preference early for error handling
    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stdout().is_terminal()
    };

    let output: Arc<dyn Output> = if cli.quiet {
        Arc::new(Quiet)
    } else {
        Arc::new(Terminal::new(color))
    };

    if let Err(e) = run(cli, &output) {
        // Reset any existing colors only if color was enabled and stdout is a TTY
        if color && io::stdout().is_terminal() {
            print!("\x1b[0m");
            if let Err(flush_err) = io::stdout().flush() {
                eprintln!("Failed to flush stdout while resetting colors: {flush_err}");
            }
        }

        let exit_code = match e.downcast_ref::<GqcError>() {
            Some(err @ GqcError::UserAborted) => {
                if let Err(finish_err) = output.finish() {
                    eprintln!("Failed to flush output handler: {finish_err:#}");
                }
                err.exit_code()
            }
            Some(err) => {
                report_error(output.as_ref(), &e);
                err.exit_code()
            }
            None => {
                report_error(output.as_ref(), &e);
                1
            }
        };

        process::exit(exit_code);
    }
    Ok(())
}

/// Display `e` through the output handler, falling back to stderr.
fn report_error(output: &dyn Output, e: &anyhow::Error) {
    if let Err(display_err) = output.fail(&format!("{e:#}")) {
        eprintln!("Failed to report error via output handler: {display_err:#}");
    }
    if let Err(finish_err) = output.finish() {
        eprintln!("Failed to flush output handler: {finish_err:#}");
    }
}

/// Execute the selected CLI command using the provided output implementation.
fn run(cli: Cli, output: &Arc<dyn Output>) -> Result<()> {
    // Workspace priority: CLI flag > env var > current directory
    let cwd = env::current_dir().context("Failed to read current directory")?;
    let workspace_dir = resolve_workspace(
        cli.workspace.as_deref(),
        env::var(WORKSPACE_ENV).ok(),
        cwd,
    );

    let config_path = cli.config.as_deref().map_or_else(
        || Config::workspace_path(&workspace_dir),
        expand_tilde,
    );
    let config = Config::load(&config_path)?;

    // Default ref priority: CLI flag > config file > built-in fallback
    let default_ref = cli
        .default_ref
        .unwrap_or_else(|| config.default_ref().to_string());

    debug!(
        workspace = %workspace_dir.display(),
        config = %config_path.display(),
        default_ref = %default_ref,
        "resolved settings"
    );

    let repos = workspace::open_all(&workspace_dir)
        .with_context(|| format!("Failed to read workspace {}", workspace_dir.display()))?;
    let catalog = RefCatalog::build(repos);

    match cli.command {
        Commands::List => {
            commands::list::list(&catalog, output.as_ref())?;
        }
        Commands::Repos => {
            commands::repos::repos(&catalog, output.as_ref())?;
        }
        Commands::Checkout { ref_name, default } => {
            if catalog.is_empty() {
                return Err(GqcError::ContextError(format!(
                    "No repositories found in {}",
                    workspace_dir.display()
                ))
                .into());
            }
            commands::checkout::checkout(
                &catalog,
                &config,
                &default_ref,
                output.as_ref(),
                CheckoutRequest {
                    ref_name,
                    default,
                    no_prompt: cli.no_prompt,
                },
            )?;
        }
    }

    output.finish()?;
    Ok(())
}
