#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
//! Terminal output primitives for the gqc command line.
//!
//! This crate keeps rendering, prompts and spinners out of libgqc so the
//! checkout core stays UI-agnostic.

/// Terminal output abstractions and implementations.
mod output;

pub use output::{Output, OutputError, Quiet, Result, Spinner, Terminal};
