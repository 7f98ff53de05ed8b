use crate::engine::FormulaEngine;
use crate::loader::{SheetResolver, add_sheet};
use crate::scanner::extract_sheet_names;
use crate::types::CellValue;
use anyhow::{Context, Result};
use indexmap::IndexSet;
use rand::Rng;

const SCRATCH_NAME_LEN: usize = 8;
const SCRATCH_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a name for a throwaway sheet: 8 characters over lowercase
/// letters and digits, enough that collision with real sheet names is
/// negligible. An engine rejecting a duplicate is the only further
/// defense.
pub fn generate_sheet_name() -> String {
    let mut rng = rand::thread_rng();
    (0..SCRATCH_NAME_LEN)
        .map(|_| SCRATCH_ALPHABET[rng.gen_range(0..SCRATCH_ALPHABET.len())] as char)
        .collect()
}

/// Evaluate a one-off formula against a disposable sheet.
///
/// The formula's direct sheet references are loaded first (each with
/// its full dependency closure, via [`add_sheet`]), under a single
/// suspension so recalculation runs once for the whole batch. The
/// formula is then evaluated in a freshly created scratch sheet, which
/// is removed again before the result is returned — also on the
/// evaluation-error path, so a failed formula cannot leak a sheet.
///
/// A formula with no cross-sheet references touches the resolver zero
/// times.
pub async fn calculate_formula(
    engine: &mut dyn FormulaEngine,
    formula: &str,
    resolver: &dyn SheetResolver,
) -> Result<CellValue> {
    let dependencies: IndexSet<String> = extract_sheet_names(formula).into_iter().collect();
    if !dependencies.is_empty() {
        engine.suspend_evaluation();
        for dependency in &dependencies {
            add_sheet(engine, dependency, resolver).await?;
        }
        engine.resume_evaluation()?;
    }

    // TODO: if per-call sheet churn shows up in profiles, keep one
    // reusable scratch sheet as the formula context instead.
    let scratch = engine.add_sheet(&generate_sheet_name())?;
    let sheet_id = engine
        .sheet_id(&scratch)
        .with_context(|| format!("engine did not assign an id for scratch sheet '{scratch}'"))?;

    tracing::debug!(sheet = %scratch, "evaluating formula in scratch sheet");
    let result = engine.calculate_formula(formula, sheet_id);
    engine.remove_sheet(sheet_id)?;
    result
}
