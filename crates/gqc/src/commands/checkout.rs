use anyhow::{Context, Result};
use gqc_term::Output;
use libgqc::{CheckoutTarget, Config, GqcError, RefCatalog, build_menu, checkout_ref};
use tokio::runtime::Runtime;

use crate::{
    args::CheckoutRequest,
    ui::{prompt_select_optional, render_checkout_report},
};

/// Run the `gqc checkout` command logic.
pub fn checkout(
    catalog: &RefCatalog,
    config: &Config,
    default_ref: &str,
    output: &dyn Output,
    request: CheckoutRequest,
) -> Result<()> {
    let target = match (request.default, request.ref_name) {
        (true, _) => CheckoutTarget::Default,
        (false, Some(name)) => CheckoutTarget::Ref(name),
        (false, None) if request.no_prompt => {
            return Err(GqcError::InvalidTarget(
                "no ref given and prompting is disabled".to_string(),
            )
            .into());
        }
        (false, None) => select_target(catalog, config, output)?,
    };

    let runtime = Runtime::new().context("Failed to start async runtime")?;
    let spinner = output.spinner("Checkout in progress...");
    let report = match runtime.block_on(checkout_ref(&target, catalog, default_ref)) {
        Ok(report) => {
            spinner.finish_clear();
            report
        }
        Err(err) => {
            spinner.finish_fail("Checkout failed");
            return Err(err.into());
        }
    };

    render_checkout_report(output, report)
}

/// Ask the user which ref to check out.
fn select_target(
    catalog: &RefCatalog,
    config: &Config,
    output: &dyn Output,
) -> Result<CheckoutTarget> {
    let mut menu = build_menu(catalog, config);
    let options = menu.iter().map(ToString::to_string).collect();
    match prompt_select_optional(output, "Select a ref to check out", options)? {
        Some(index) if index < menu.len() => Ok(menu.swap_remove(index).target),
        Some(index) => Err(GqcError::OperationError(format!("selection {index} out of range")).into()),
        None => Err(GqcError::UserAborted.into()),
    }
}
