use std::{fmt, io};

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Diagnostic verbosity selected on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error conditions
    Error,
    /// Errors and warnings
    #[default]
    Warn,
    /// Errors, warnings, and informational messages
    Info,
    /// All above plus debug information
    Debug,
    /// All above plus detailed tracing
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Build the filter: `RUST_LOG` wins when set, otherwise `level`.
fn filter_for(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

/// Install the global stderr subscriber.
pub fn init(level: LogLevel) {
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("Failed to install log subscriber: {err}");
    }
}
