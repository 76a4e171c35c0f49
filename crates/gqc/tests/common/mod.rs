// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result, ensure};
use tempfile::TempDir;

/// Return the path to the compiled `gqc` binary for integration-style tests.
pub fn gqc_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gqc"))
}

/// Run a git command inside `repo_path`, ensuring it succeeds.
pub fn git(repo_path: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new("git")
        .current_dir(repo_path)
        .args(args)
        .output()
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;

    ensure!(
        output.status.success(),
        "git command failed: git {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(output)
}

/// Initialise a repository at `repo_path` on `branch` with a README commit.
pub fn init_repository(repo_path: &Path, branch: &str) -> Result<()> {
    fs::create_dir_all(repo_path)?;

    git(repo_path, &["init", "--quiet"])?;
    git(
        repo_path,
        &["symbolic-ref", "HEAD", &format!("refs/heads/{branch}")],
    )?;
    git(repo_path, &["config", "user.email", "test@example.com"])?;
    git(repo_path, &["config", "user.name", "Test User"])?;

    fs::write(repo_path.join("README.md"), "# Test Project")?;
    git(repo_path, &["add", "README.md"])?;
    git(repo_path, &["commit", "--quiet", "-m", "Initial commit"])?;

    Ok(())
}

/// Create `branch` in `repo_path` without switching to it.
pub fn create_branch(repo_path: &Path, branch: &str) -> Result<()> {
    git(repo_path, &["branch", branch])?;
    Ok(())
}

/// Current branch of `repo_path`.
pub fn current_branch(repo_path: &Path) -> Result<String> {
    let output = git(repo_path, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Create an empty temporary workspace directory.
pub fn create_workspace() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Add a repository named `name` on `branch` to the workspace.
pub fn add_repo(workspace: &Path, name: &str, branch: &str) -> Result<PathBuf> {
    let repo_path = workspace.join(name);
    init_repository(&repo_path, branch)?;
    Ok(repo_path)
}

/// Prepare a `Command` configured to run `gqc` against the provided workspace.
pub fn gqc_command(workspace: &Path) -> Command {
    let mut cmd = Command::new(gqc_binary());
    cmd.current_dir(workspace);
    cmd.env_remove("GQC_WORKSPACE");
    cmd.env_remove("RUST_LOG");
    cmd.arg("--no-color");
    cmd.arg("--workspace");
    cmd.arg(workspace);
    cmd
}

/// Run `gqc` with the provided arguments, returning the command output.
pub fn run_gqc(workspace: &Path, args: &[&str]) -> Result<Output> {
    let mut cmd = gqc_command(workspace);
    cmd.args(args);
    cmd.output()
        .with_context(|| format!("failed to run gqc {}", args.join(" ")))
}

/// Stdout of a finished command as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Panic with both streams when `output` did not succeed.
pub fn assert_success(output: &Output, what: &str) {
    if !output.status.success() {
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("{what} failed");
    }
}
