// Integration tests are compiled as a separate crate, so these lints don't apply
#![allow(clippy::tests_outside_test_module)]
#![allow(missing_docs)]

mod common;

use std::{fs, process::Command};

use anyhow::Result;
use common::{
    add_repo, assert_success, create_branch, create_workspace, current_branch, gqc_binary,
    run_gqc, stdout,
};

#[test]
fn test_checkout_falls_back_to_default() -> Result<()> {
    let workspace = create_workspace()?;
    let api = add_repo(workspace.path(), "api", "master")?;
    let web = add_repo(workspace.path(), "web", "master")?;
    create_branch(&api, "feat")?;
    create_branch(&web, "other")?;
    common::git(&web, &["checkout", "--quiet", "other"])?;

    let output = run_gqc(workspace.path(), &["checkout", "feat"])?;
    assert_success(&output, "gqc checkout feat");

    assert_eq!(current_branch(&api)?, "feat");
    assert_eq!(current_branch(&web)?, "master");

    let out = stdout(&output);
    assert!(out.contains("api: checked out feat"), "stdout: {out}");
    assert!(out.contains("web: checked out master"), "stdout: {out}");
    Ok(())
}

#[test]
fn test_checkout_skips_repositories_already_on_ref() -> Result<()> {
    let workspace = create_workspace()?;
    let api = add_repo(workspace.path(), "api", "master")?;
    add_repo(workspace.path(), "web", "master")?;
    create_branch(&api, "feat")?;

    let output = run_gqc(workspace.path(), &["checkout", "master"])?;
    assert_success(&output, "gqc checkout master");

    let out = stdout(&output);
    assert!(out.contains("api: already on master"), "stdout: {out}");
    assert!(out.contains("web: already on master"), "stdout: {out}");
    assert!(out.contains("0 checked out, 2 already there"), "stdout: {out}");
    Ok(())
}

#[test]
fn test_checkout_default_uses_config() -> Result<()> {
    let workspace = create_workspace()?;
    let api = add_repo(workspace.path(), "api", "main")?;
    let web = add_repo(workspace.path(), "web", "main")?;
    create_branch(&api, "feat")?;
    common::git(&api, &["checkout", "--quiet", "feat"])?;
    fs::write(
        workspace.path().join("gqc.toml"),
        "default_branch_name = \"main\"\n",
    )?;

    let output = run_gqc(workspace.path(), &["checkout", "--default"])?;
    assert_success(&output, "gqc checkout --default");

    assert_eq!(current_branch(&api)?, "main");
    assert_eq!(current_branch(&web)?, "main");
    Ok(())
}

#[test]
fn test_default_ref_flag_overrides_config() -> Result<()> {
    let workspace = create_workspace()?;
    let api = add_repo(workspace.path(), "api", "master")?;
    create_branch(&api, "trunk")?;
    fs::write(
        workspace.path().join("gqc.toml"),
        "default_branch_name = \"main\"\n",
    )?;

    let output = run_gqc(
        workspace.path(),
        &["--default-ref", "trunk", "checkout", "--default"],
    )?;
    assert_success(&output, "gqc checkout --default-ref trunk");

    assert_eq!(current_branch(&api)?, "trunk");
    Ok(())
}

#[test]
fn test_partial_failure_exits_with_code_two() -> Result<()> {
    let workspace = create_workspace()?;
    let api = add_repo(workspace.path(), "api", "master")?;
    // No master here, so the fallback checkout fails.
    let web = add_repo(workspace.path(), "web", "trunk")?;
    create_branch(&api, "feat")?;

    let output = run_gqc(workspace.path(), &["checkout", "feat"])?;
    assert_eq!(output.status.code(), Some(2));

    assert_eq!(current_branch(&api)?, "feat");
    assert_eq!(current_branch(&web)?, "trunk");

    let out = stdout(&output);
    assert!(out.contains("api: checked out feat"), "stdout: {out}");
    assert!(out.contains("web: failed to check out master"), "stdout: {out}");
    assert!(
        out.contains("1 checked out, 0 already there, 1 failed"),
        "stdout: {out}"
    );
    assert!(
        out.contains("Checkout failed in 1 of 2 repositories"),
        "stdout: {out}"
    );
    Ok(())
}

#[test]
fn test_fallback_never_overwrites_a_file_named_like_the_ref() -> Result<()> {
    let workspace = create_workspace()?;
    let api = add_repo(workspace.path(), "api", "master")?;
    let web = add_repo(workspace.path(), "web", "trunk")?;
    create_branch(&api, "feat")?;
    fs::write(web.join("docs"), "committed")?;
    common::git(&web, &["add", "docs"])?;
    common::git(&web, &["commit", "--quiet", "-m", "Add docs"])?;
    fs::write(web.join("docs"), "unsaved work")?;

    let output = run_gqc(
        workspace.path(),
        &["--default-ref", "docs", "checkout", "feat"],
    )?;
    assert_eq!(output.status.code(), Some(2));

    assert_eq!(fs::read_to_string(web.join("docs"))?, "unsaved work");
    assert_eq!(current_branch(&web)?, "trunk");
    assert!(stdout(&output).contains("web: failed to check out docs"));
    Ok(())
}

#[test]
fn test_checkout_without_ref_and_no_prompt_fails() -> Result<()> {
    let workspace = create_workspace()?;
    add_repo(workspace.path(), "api", "master")?;

    let output = run_gqc(workspace.path(), &["--no-prompt", "checkout"])?;
    assert_eq!(output.status.code(), Some(3));
    Ok(())
}

#[test]
fn test_checkout_in_empty_workspace_fails() -> Result<()> {
    let workspace = create_workspace()?;

    let output = run_gqc(workspace.path(), &["checkout", "feat"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("No repositories found"));
    Ok(())
}

#[test]
fn test_list_shows_owners() -> Result<()> {
    let workspace = create_workspace()?;
    let api = add_repo(workspace.path(), "api", "master")?;
    add_repo(workspace.path(), "web", "master")?;
    create_branch(&api, "feat")?;

    let output = run_gqc(workspace.path(), &["list"])?;
    assert_success(&output, "gqc list");

    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines, ["feat: api", "master: api, web"]);
    Ok(())
}

#[test]
fn test_repos_shows_current_branch() -> Result<()> {
    let workspace = create_workspace()?;
    let api = add_repo(workspace.path(), "api", "master")?;
    create_branch(&api, "feat")?;
    common::git(&api, &["checkout", "--quiet", "feat"])?;

    let output = run_gqc(workspace.path(), &["repos"])?;
    assert_success(&output, "gqc repos");

    let out = stdout(&output);
    assert!(out.contains("api"), "stdout: {out}");
    assert!(out.contains("branch: feat"), "stdout: {out}");
    Ok(())
}

#[test]
fn test_workspace_from_environment() -> Result<()> {
    let workspace = create_workspace()?;
    let api = add_repo(workspace.path(), "api", "master")?;
    create_branch(&api, "feat")?;
    let elsewhere = create_workspace()?;

    let output = Command::new(gqc_binary())
        .current_dir(elsewhere.path())
        .env_remove("RUST_LOG")
        .env("GQC_WORKSPACE", workspace.path())
        .args(["--no-color", "checkout", "feat"])
        .output()?;
    assert_success(&output, "gqc checkout with GQC_WORKSPACE");

    assert_eq!(current_branch(&api)?, "feat");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinked_repository_is_checked_out_once() -> Result<()> {
    use std::os::unix::fs::symlink;

    let workspace = create_workspace()?;
    let api = add_repo(workspace.path(), "api", "master")?;
    create_branch(&api, "feat")?;
    symlink(&api, workspace.path().join("api-link"))?;

    let output = run_gqc(workspace.path(), &["checkout", "feat"])?;
    assert_success(&output, "gqc checkout feat with a symlinked repository");

    assert_eq!(current_branch(&api)?, "feat");
    let out = stdout(&output);
    assert_eq!(out.matches("api: checked out feat").count(), 1, "stdout: {out}");
    assert!(out.contains("1 checked out, 0 already there"), "stdout: {out}");
    Ok(())
}
