use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{GqcError, Result};

/// Default ref used when nothing is configured.
pub const FALLBACK_DEFAULT_REF: &str = "master";

/// Name of the configuration file looked up at the workspace root.
pub const CONFIG_FILE_NAME: &str = "gqc.toml";

/// Workspace configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Ref checked out in repositories that lack the chosen ref. Empty means
    /// [`FALLBACK_DEFAULT_REF`].
    pub default_branch_name: Option<String>,
    /// Labels shown for the "default" choice in the selection menu.
    pub default_branch_names: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_branch_name: None,
            default_branch_names: vec![FALLBACK_DEFAULT_REF.to_string()],
        }
    }
}

impl Config {
    /// Read configuration from `path`, returning defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| GqcError::ConfigError {
            path: path.to_path_buf(),
            message: format!("failed to read: {e}"),
        })?;
        toml::from_str(&contents).map_err(|e| GqcError::ConfigError {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Read `gqc.toml` from the workspace root.
    pub fn load_from_workspace(workspace: &Path) -> Result<Self> {
        Self::load(&Self::workspace_path(workspace))
    }

    /// Location of the configuration file for `workspace`.
    pub fn workspace_path(workspace: &Path) -> PathBuf {
        workspace.join(CONFIG_FILE_NAME)
    }

    /// The ref repositories fall back to.
    pub fn default_ref(&self) -> &str {
        self.default_branch_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_DEFAULT_REF)
    }

    /// Labels for the default choice, never empty.
    pub fn default_labels(&self) -> Vec<String> {
        let labels: Vec<String> = self
            .default_branch_names
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        if labels.is_empty() {
            vec![self.default_ref().to_string()]
        } else {
            labels
        }
    }
}
