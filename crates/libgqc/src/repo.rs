use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;

use crate::refs::Ref;

/// Stable identity of a repository handle: its root directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoId(PathBuf);

impl RepoId {
    /// Wrap a repository root path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self(root.into())
    }

    /// Root directory of the repository.
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A view of one working copy: its refs, its HEAD, and a way to check out a ref.
///
/// Handles are owned by the caller. Ref and HEAD data is a snapshot held in
/// memory; reading it never touches disk.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Stable identity used for set membership.
    fn id(&self) -> &RepoId;
    /// Human-readable name shown to the user.
    fn name(&self) -> &str;
    /// The ref HEAD points at, or `None` when detached or unknown.
    fn head(&self) -> Option<&Ref>;
    /// Every ref known to the repository.
    fn refs(&self) -> &[Ref];
    /// Check out `ref_name`, returning a descriptive error on failure.
    async fn checkout(&self, ref_name: &str) -> anyhow::Result<()>;
}

/// Shared handle to a repository.
pub type RepoHandle = Arc<dyn Repository>;
