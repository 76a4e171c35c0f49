use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::{
    refs::simplify_ref_name,
    repo::{RepoHandle, RepoId},
};

/// Point-in-time index of simplified ref names to the repositories that have
/// them.
///
/// The catalog is immutable once built. Rebuild it if repository state may
/// have changed.
pub struct RefCatalog {
    /// Every repository scanned, in input order.
    repos: Vec<RepoHandle>,
    /// Distinct simplified ref names in lexicographic byte order.
    ref_names: Vec<String>,
    /// Repositories owning each ref name, in scan order. Never empty.
    ref_names_map: BTreeMap<String, Vec<RepoHandle>>,
}

impl RefCatalog {
    /// Index the refs of `repos`.
    ///
    /// Handles sharing a [`RepoId`] (e.g. a repository reached through a
    /// symlink) are collapsed to the first one.
    pub fn build(repos: Vec<RepoHandle>) -> Self {
        let mut seen: HashSet<RepoId> = HashSet::new();
        let repos: Vec<RepoHandle> = repos
            .into_iter()
            .filter(|repo| {
                let first = seen.insert(repo.id().clone());
                if !first {
                    debug!(path = %repo.id(), "dropping duplicate repository handle");
                }
                first
            })
            .collect();

        let mut ref_names_map: BTreeMap<String, Vec<RepoHandle>> = BTreeMap::new();

        for repo in &repos {
            for name in repo.refs().iter().filter_map(simplify_ref_name) {
                let bucket = ref_names_map.entry(name).or_default();
                // `main` and `origin/main` both simplify to `main`; the repo
                // is still listed once.
                if !bucket.iter().any(|r| r.id() == repo.id()) {
                    bucket.push(repo.clone());
                }
            }
        }

        let ref_names: Vec<String> = ref_names_map.keys().cloned().collect();
        debug!(
            repos = repos.len(),
            ref_names = ref_names.len(),
            "built ref catalog"
        );

        Self {
            repos,
            ref_names,
            ref_names_map,
        }
    }

    /// Every repository scanned, in input order.
    pub fn repos(&self) -> &[RepoHandle] {
        &self.repos
    }

    /// Distinct simplified ref names, sorted.
    pub fn ref_names(&self) -> &[String] {
        &self.ref_names
    }

    /// Repositories that have `ref_name`; empty when the name is unknown.
    pub fn repos_with(&self, ref_name: &str) -> &[RepoHandle] {
        self.ref_names_map
            .get(ref_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Sorted, de-duplicated display names of the repositories that have `ref_name`.
    pub fn owner_names(&self, ref_name: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .repos_with(ref_name)
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Split the repositories into those that have `ref_name` and those that don't.
    ///
    /// The two halves are disjoint and together hold every repository exactly
    /// once. Both keep catalog order.
    pub fn partition(&self, ref_name: &str) -> (Vec<RepoHandle>, Vec<RepoHandle>) {
        let owners: HashSet<&RepoId> = self.repos_with(ref_name).iter().map(|r| r.id()).collect();
        self.repos
            .iter()
            .cloned()
            .partition(|repo| owners.contains(repo.id()))
    }

    /// Whether the catalog has no repositories at all.
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}
