use std::result::Result as StdResult;

use anyhow::Result;
use gqc_term::{Output, OutputError};
use libgqc::{CheckoutOutcome, CheckoutReport, GqcError, RepoCheckout};

/// Convert output-layer failures into domain errors.
pub fn map_output_error(err: OutputError) -> GqcError {
    match err {
        OutputError::Cancelled => GqcError::UserAborted,
        other => GqcError::OperationError(format!("Output operation failed: {other}")),
    }
}

/// Emit an output result, mapping errors into `GqcError`.
pub fn emit(result: StdResult<(), OutputError>) -> Result<()> {
    result.map_err(map_output_error)?;
    Ok(())
}

/// Prompt for selection, returning `None` on cancellation.
pub fn prompt_select_optional(
    output: &dyn Output,
    prompt: &str,
    options: Vec<String>,
) -> Result<Option<usize>> {
    match output.select(prompt, options) {
        Ok(selection) => Ok(Some(selection)),
        Err(OutputError::Cancelled) => Ok(None),
        Err(err) => Err(map_output_error(err).into()),
    }
}

/// Render one repository's line of the checkout summary.
fn render_repo_checkout(output: &dyn Output, result: &RepoCheckout) -> Result<()> {
    let RepoCheckout {
        name,
        ref_name,
        outcome,
        ..
    } = result;
    match outcome {
        CheckoutOutcome::Skipped => emit(output.message(&format!("{name}: already on {ref_name}"))),
        CheckoutOutcome::Succeeded => {
            emit(output.success(&format!("{name}: checked out {ref_name}")))
        }
        CheckoutOutcome::Failed(reason) => emit(output.fail(&format!(
            "{name}: failed to check out {ref_name}: {reason}"
        ))),
    }
}

/// Render the per-repository summary, then surface partial failure as an error.
pub fn render_checkout_report(output: &dyn Output, report: CheckoutReport) -> Result<()> {
    for result in &report.results {
        render_repo_checkout(output, result)?;
    }

    let changed = report.succeeded().count();
    let skipped = report.skipped().count();
    let failed = report.failed().count();
    if failed > 0 {
        emit(output.warn(&format!(
            "{changed} checked out, {skipped} already there, {failed} failed"
        )))?;
    }
    report.into_result()?;

    emit(output.success(&format!(
        "{changed} checked out, {skipped} already there"
    )))
}
