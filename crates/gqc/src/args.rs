use clap::{ArgGroup, Parser, Subcommand};

use crate::logging::LogLevel;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("color_mode")
        .args(["color", "no_color"])
))]
/// Top-level CLI options for gqc.
pub struct Cli {
    /// Workspace directory holding the repositories (defaults to $GQC_WORKSPACE, then the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub workspace: Option<String>,

    /// Configuration file (defaults to gqc.toml in the workspace)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<String>,

    /// Ref to check out in repositories that lack the chosen one
    #[arg(long, global = true, value_name = "NAME")]
    pub default_ref: Option<String>,

    /// Enable colored output
    #[arg(long, global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Suppress all output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Never prompt; fail instead
    #[arg(long, global = true)]
    pub no_prompt: bool,

    /// Diagnostic log verbosity (RUST_LOG overrides)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    /// The primary command to execute.
    pub command: Commands,
}

#[derive(Subcommand)]
/// CLI subcommands supported by gqc.
pub enum Commands {
    /// Show every ref name and the repositories that have it
    #[command(alias = "ls")]
    List,

    /// Show every repository and its current branch
    Repos,

    /// Check out one ref in every repository, falling back to the default ref
    #[command(alias = "co")]
    Checkout {
        /// Ref to check out (prompts when omitted)
        #[arg(value_name = "REF", conflicts_with = "default")]
        ref_name: Option<String>,

        /// Check out the default ref everywhere
        #[arg(long)]
        default: bool,
    },
}

/// Parameters for the `gqc checkout` command.
pub struct CheckoutRequest {
    /// Ref named on the command line, if any.
    pub ref_name: Option<String>,
    /// Check out the default ref everywhere.
    pub default: bool,
    /// Fail instead of prompting when no ref was named.
    pub no_prompt: bool,
}
