use std::{collections::HashMap, fmt};

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::{
    catalog::RefCatalog,
    error::{GqcError, Result},
    refs::simplify_ref_name,
    repo::{RepoHandle, RepoId},
};

/// What the user asked to check out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutTarget {
    /// A simplified ref name from the catalog. Repositories without it fall
    /// back to the default ref.
    Ref(String),
    /// Check out the default ref everywhere, whatever refs each repository has.
    Default,
}

impl fmt::Display for CheckoutTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ref(name) => write!(f, "{name}"),
            Self::Default => write!(f, "<default>"),
        }
    }
}

/// Terminal state of one repository after a checkout batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// HEAD was already on the requested ref; nothing was run.
    Skipped,
    /// The checkout completed.
    Succeeded,
    /// The checkout failed with the given reason.
    Failed(String),
}

/// Outcome of the checkout for a single repository.
#[derive(Debug, Clone)]
pub struct RepoCheckout {
    /// Identity of the repository.
    pub repo: RepoId,
    /// Display name of the repository.
    pub name: String,
    /// Ref the repository was driven to.
    pub ref_name: String,
    /// What happened.
    pub outcome: CheckoutOutcome,
}

/// Per-repository results of one checkout batch, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct CheckoutReport {
    /// One entry per repository in the catalog.
    pub results: Vec<RepoCheckout>,
}

impl CheckoutReport {
    /// Repositories that were already on their requested ref.
    pub fn skipped(&self) -> impl Iterator<Item = &RepoCheckout> {
        self.with_outcome(|o| matches!(o, CheckoutOutcome::Skipped))
    }

    /// Repositories whose checkout completed.
    pub fn succeeded(&self) -> impl Iterator<Item = &RepoCheckout> {
        self.with_outcome(|o| matches!(o, CheckoutOutcome::Succeeded))
    }

    /// Repositories whose checkout failed.
    pub fn failed(&self) -> impl Iterator<Item = &RepoCheckout> {
        self.with_outcome(|o| matches!(o, CheckoutOutcome::Failed(_)))
    }

    /// Whether no repository failed.
    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }

    /// Result for the repository with the given display name.
    pub fn get(&self, name: &str) -> Option<&RepoCheckout> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Convert a partial failure into [`GqcError::CheckoutFailed`].
    pub fn into_result(self) -> Result<Self> {
        let failed = self.failed().count();
        if failed > 0 {
            return Err(GqcError::CheckoutFailed {
                failed,
                total: self.results.len(),
            });
        }
        Ok(self)
    }

    /// Filter results by outcome.
    fn with_outcome(
        &self,
        pred: impl Fn(&CheckoutOutcome) -> bool,
    ) -> impl Iterator<Item = &RepoCheckout> {
        self.results.iter().filter(move |r| pred(&r.outcome))
    }
}

/// Drive every repository in `catalog` to `target`, or to `default_ref` where
/// `target` is unavailable.
///
/// All checkouts run concurrently and the call returns once every repository
/// has settled. A failing repository is recorded in the report and never
/// affects its siblings. The call itself only fails when the request is
/// malformed.
pub async fn checkout_ref(
    target: &CheckoutTarget,
    catalog: &RefCatalog,
    default_ref: &str,
) -> Result<CheckoutReport> {
    if default_ref.trim().is_empty() {
        return Err(GqcError::InvalidTarget(
            "default ref name is empty".to_string(),
        ));
    }

    let (with_ref, without_ref, target_name) = match target {
        CheckoutTarget::Ref(name) => {
            if name.trim().is_empty() {
                return Err(GqcError::InvalidTarget("ref name is empty".to_string()));
            }
            let (with_ref, without_ref) = catalog.partition(name);
            (with_ref, without_ref, name.as_str())
        }
        CheckoutTarget::Default => (Vec::new(), catalog.repos().to_vec(), default_ref),
    };

    debug!(
        checkout_target = %target,
        with_ref = with_ref.len(),
        without_ref = without_ref.len(),
        "starting checkout batch"
    );

    // Both groups go out as a single task group; neither waits on the other.
    let tasks = with_ref
        .into_iter()
        .map(|repo| (repo, target_name))
        .chain(without_ref.into_iter().map(|repo| (repo, default_ref)))
        .map(|(repo, ref_name)| checkout_repo(repo, ref_name));
    let mut results = join_all(tasks).await;

    let order: HashMap<&RepoId, usize> = catalog
        .repos()
        .iter()
        .enumerate()
        .map(|(idx, repo)| (repo.id(), idx))
        .collect();
    results.sort_by_key(|r| order.get(&r.repo).copied().unwrap_or(usize::MAX));

    Ok(CheckoutReport { results })
}

/// Check out `ref_name` in one repository, capturing failure instead of propagating it.
async fn checkout_repo(repo: RepoHandle, ref_name: &str) -> RepoCheckout {
    let already_there = repo
        .head()
        .and_then(simplify_ref_name)
        .is_some_and(|head| head == ref_name);

    let outcome = if already_there {
        debug!(repo = repo.name(), ref_name, "already on ref, skipping");
        CheckoutOutcome::Skipped
    } else {
        match repo.checkout(ref_name).await {
            Ok(()) => {
                info!(repo = repo.name(), ref_name, "checked out");
                CheckoutOutcome::Succeeded
            }
            Err(err) => {
                let reason = format!("{err:#}");
                warn!(
                    repo = repo.name(),
                    path = %repo.id(),
                    ref_name,
                    error = %reason,
                    "failed to checkout ref"
                );
                CheckoutOutcome::Failed(reason)
            }
        }
    };

    RepoCheckout {
        repo: repo.id().clone(),
        name: repo.name().to_string(),
        ref_name: ref_name.to_string(),
        outcome,
    }
}
