//! Finding the repositories that make up a workspace.
//!
//! A workspace is a directory whose immediate children are repositories. The
//! directory may itself be a repository too.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::warn;

use crate::{error::Result, git::GitRepository, repo::RepoHandle};

/// Whether `dir` is the root of a working copy.
fn is_repo_root(dir: &Path) -> bool {
    // `.git` is a directory for normal clones and a file for worktrees and submodules.
    dir.join(".git").exists()
}

/// List repository roots in `root`: `root` itself if it is a repository, then
/// every non-hidden child directory that is one, sorted by path.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if path.is_dir() && is_repo_root(&path) {
            children.push(path);
        }
    }
    children.sort();

    let mut repos = Vec::with_capacity(children.len() + 1);
    if is_repo_root(root) {
        repos.push(root.to_path_buf());
    }
    repos.extend(children);
    Ok(repos)
}

/// Open every repository in `root` as a git-backed handle.
///
/// Repositories that cannot be read are logged and left out.
pub fn open_all(root: &Path) -> Result<Vec<RepoHandle>> {
    let mut handles: Vec<RepoHandle> = Vec::new();
    for path in discover(root)? {
        match GitRepository::open(&path) {
            Ok(repo) => handles.push(Arc::new(repo)),
            Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable repository"),
        }
    }
    Ok(handles)
}
