use anyhow::Result;
use gqc_term::Output;
use libgqc::{RefCatalog, simplify_ref_name};

use crate::ui::emit;

/// Run the `gqc repos` command logic.
pub fn repos(catalog: &RefCatalog, output: &dyn Output) -> Result<()> {
    if catalog.is_empty() {
        emit(output.message("No repositories found."))?;
        return Ok(());
    }

    for repo in catalog.repos() {
        let head = repo
            .head()
            .and_then(simplify_ref_name)
            .unwrap_or_else(|| "(detached HEAD)".to_string());
        let section = output.section(repo.name());
        emit(section.item("path", &repo.id().to_string()))?;
        emit(section.item("branch", &head))?;
    }

    Ok(())
}
