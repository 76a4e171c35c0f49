use std::{env, path::PathBuf};

/// Environment variable naming the workspace directory.
pub const WORKSPACE_ENV: &str = "GQC_WORKSPACE";

/// Expand a leading `~` in a filesystem path using the `HOME` environment variable.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~")
        && let Ok(home) = env::var("HOME")
    {
        return PathBuf::from(path.replacen("~", &home, 1));
    }
    PathBuf::from(path)
}

/// Pick the workspace directory: the flag, then `GQC_WORKSPACE`, then `cwd`.
pub fn resolve_workspace(flag: Option<&str>, env_value: Option<String>, cwd: PathBuf) -> PathBuf {
    match (flag, env_value) {
        (Some(dir), _) => expand_tilde(dir),
        (None, Some(dir)) if !dir.is_empty() => expand_tilde(&dir),
        _ => cwd,
    }
}
