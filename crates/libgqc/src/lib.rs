#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
//! Core library for checking out one branch across every repository in a
//! multi-repository workspace.
//!
//! The flow is two-step. [`RefCatalog::build`] scans a set of repository
//! handles and indexes which simplified ref names exist where. The caller
//! shows those names to the user (see [`build_menu`]), then hands the chosen
//! [`CheckoutTarget`] and the same catalog to [`checkout_ref`], which drives
//! every repository concurrently: repositories that have the ref check it
//! out, the rest fall back to the configured default ref. Each repository
//! succeeds or fails on its own and the outcome is collected in a
//! [`CheckoutReport`].
//!
//! The CLI binary in `crates/gqc` builds on top of this library.

/// Ref catalog construction and queries.
mod catalog;
/// Concurrent checkout orchestration.
mod checkout;
/// Workspace configuration.
mod config;
/// Error types.
mod error;
/// Git-backed repository handles.
mod git;
/// Selection menu model.
mod menu;
/// Ref records and name simplification.
mod refs;
/// The repository handle abstraction.
mod repo;
/// Repository discovery inside a workspace directory.
pub mod workspace;

pub use catalog::RefCatalog;
pub use checkout::{CheckoutOutcome, CheckoutReport, CheckoutTarget, RepoCheckout, checkout_ref};
pub use config::{CONFIG_FILE_NAME, Config, FALLBACK_DEFAULT_REF};
pub use error::{GqcError, Result};
pub use git::GitRepository;
pub use menu::{MenuItem, build_menu};
pub use refs::{Ref, RefKind, simplify_ref_name};
pub use repo::{RepoHandle, RepoId, Repository};
