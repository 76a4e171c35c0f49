use anyhow::Result;
use gqc_term::Output;
use libgqc::RefCatalog;

use crate::ui::emit;

/// Run the `gqc list` command logic.
pub fn list(catalog: &RefCatalog, output: &dyn Output) -> Result<()> {
    if catalog.ref_names().is_empty() {
        emit(output.message("No refs found."))?;
        return Ok(());
    }

    for name in catalog.ref_names() {
        emit(output.item(name, &catalog.owner_names(name).join(", ")))?;
    }

    Ok(())
}
