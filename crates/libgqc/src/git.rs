use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command as AsyncCommand;
use tracing::debug;

use crate::{
    error::GqcError,
    refs::{Ref, RefKind},
    repo::{RepoId, Repository},
};

/// Run a git command with the given arguments in the specified directory.
/// Returns the output if successful, otherwise returns an error with the full command details.
fn run_git(repo_path: &Path, args: &[&str]) -> Result<Output> {
    let output = git_output(repo_path, args)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let command = format!("git {}", args.join(" "));
        anyhow::bail!("Git command failed: {}\nError: {}", command, stderr.trim());
    }

    Ok(output)
}

/// Run a git command and return its output whatever the exit status.
fn git_output(repo_path: &Path, args: &[&str]) -> Result<Output> {
    Command::new("git")
        .current_dir(repo_path)
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute git command: git {}", args.join(" ")))
}

/// Resolve the top-level directory of the repository containing `path`.
fn toplevel(path: &Path) -> Result<PathBuf> {
    let output = run_git(path, &["rev-parse", "--show-toplevel"])?;
    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(PathBuf::from(root))
}

/// Short name of the branch HEAD points at, or `None` when detached.
fn head_branch(repo_path: &Path) -> Result<Option<String>> {
    // `symbolic-ref -q` exits 1 without output on a detached HEAD, which
    // `run_git` would report as a failure.
    let output = git_output(repo_path, &["symbolic-ref", "-q", "--short", "HEAD"])?;

    if !output.status.success() {
        return Ok(None);
    }

    let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((!branch.is_empty()).then_some(branch))
}

/// Names of every configured remote.
fn list_remotes(repo_path: &Path) -> Result<Vec<String>> {
    let output = run_git(repo_path, &["remote"])?;
    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|remote| !remote.is_empty())
        .collect())
}

/// Every branch, remote-tracking branch and tag, as `(refname, symref)` pairs.
fn list_refs(repo_path: &Path) -> Result<Vec<(String, String)>> {
    let output = run_git(
        repo_path,
        &[
            "for-each-ref",
            "--format=%(refname)%09%(symref)",
            "refs/heads",
            "refs/remotes",
            "refs/tags",
        ],
    )?;

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (refname, symref) = line.split_once('\t').unwrap_or((line, ""));
            (refname.to_string(), symref.to_string())
        })
        .collect())
}

/// Classify a fully-qualified ref name.
///
/// Remote names may contain `/`, so the longest configured remote that
/// prefixes the ref wins.
fn parse_ref(refname: &str, symref: &str, remotes: &[String]) -> Ref {
    if let Some(branch) = refname.strip_prefix("refs/heads/") {
        return if symref.is_empty() {
            Ref::local(branch)
        } else {
            Ref::other(branch)
        };
    }

    if let Some(rest) = refname.strip_prefix("refs/remotes/") {
        if !symref.is_empty() {
            // e.g. origin/HEAD -> origin/main
            return Ref::other(rest);
        }
        let remote = remotes
            .iter()
            .filter(|r| rest.len() > r.len() && rest.starts_with(r.as_str()))
            .filter(|r| rest.as_bytes()[r.len()] == b'/')
            .max_by_key(|r| r.len());
        return match remote {
            Some(remote) => Ref::remote(remote.as_str(), rest),
            None => Ref {
                kind: RefKind::RemoteBranch,
                name: Some(rest.to_string()),
                remote: None,
            },
        };
    }

    Ref::other(refname.strip_prefix("refs/tags/").unwrap_or(refname))
}

/// A repository handle backed by the `git` command line.
///
/// Refs and HEAD are read once by [`GitRepository::open`] and kept in memory;
/// open the repository again to pick up later changes.
#[derive(Debug, Clone)]
pub struct GitRepository {
    /// Repository root.
    id: RepoId,
    /// Final component of the root path.
    name: String,
    /// HEAD at open time.
    head: Option<Ref>,
    /// Refs at open time.
    refs: Vec<Ref>,
}

impl GitRepository {
    /// Open the repository containing `path` and snapshot its refs and HEAD.
    pub fn open(path: &Path) -> crate::Result<Self> {
        Self::read(path).map_err(|e| GqcError::GitError(format!("{}: {e:#}", path.display())))
    }

    /// Read the repository state, with git errors left as `anyhow` errors.
    fn read(path: &Path) -> Result<Self> {
        let root = toplevel(path)?;
        let root = root.canonicalize().unwrap_or(root);
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        let remotes = list_remotes(&root)?;
        let refs: Vec<Ref> = list_refs(&root)?
            .iter()
            .map(|(refname, symref)| parse_ref(refname, symref, &remotes))
            .collect();
        let head = head_branch(&root)?.map(Ref::local);

        debug!(repo = %name, refs = refs.len(), head = ?head, "opened repository");

        Ok(Self {
            id: RepoId::new(root),
            name,
            head,
            refs,
        })
    }
}

#[async_trait]
impl Repository for GitRepository {
    fn id(&self) -> &RepoId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn head(&self) -> Option<&Ref> {
        self.head.as_ref()
    }

    fn refs(&self) -> &[Ref] {
        &self.refs
    }

    async fn checkout(&self, ref_name: &str) -> Result<()> {
        if ref_name.starts_with('-') {
            anyhow::bail!("Refusing to check out '{ref_name}': looks like an option");
        }

        let output = AsyncCommand::new("git")
            .current_dir(self.id.path())
            // Without `--`, a name that matches no ref but matches a path
            // restores that path instead of switching branches.
            .args(["checkout", "--quiet", ref_name, "--"])
            .output()
            .await
            .with_context(|| format!("Failed to execute git command: git checkout {ref_name}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "Failed to checkout '{ref_name}' in {}: {}",
                self.id,
                stderr.trim()
            );
        }

        Ok(())
    }
}
