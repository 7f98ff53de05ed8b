use crate::types::{CellChange, CellValue, Sheet, SheetId};
use anyhow::Result;

/// The formula-evaluation engine this crate loads sheets into.
///
/// The engine is an externally owned, mutable resource; every
/// operation in this crate takes it as an explicit `&mut` parameter
/// and never snapshots or clones its state. Nothing here serializes
/// access — callers sharing one engine across concurrent operations
/// must do their own locking.
///
/// Suspension is expected to nest: a caller may suspend, perform
/// several operations that each suspend and resume internally, and
/// resume once at the end. `resume_evaluation` reports the cells the
/// deferred recalculation touched.
pub trait FormulaEngine: Send {
    /// Look up a sheet's internal identifier by name. `None` when the
    /// engine does not know the name.
    fn sheet_id(&self, name: &str) -> Option<SheetId>;

    /// Create a new empty sheet, returning the name the engine
    /// actually assigned (engines may deduplicate the requested name).
    fn add_sheet(&mut self, name: &str) -> Result<String>;

    /// Replace the full contents of a sheet.
    fn set_sheet_content(&mut self, sheet: SheetId, content: Sheet) -> Result<()>;

    /// Hold off recalculation until the matching `resume_evaluation`.
    fn suspend_evaluation(&mut self);

    /// Resume recalculation, reporting every cell it changed.
    fn resume_evaluation(&mut self) -> Result<Vec<CellChange>>;

    /// Evaluate an ad hoc formula string scoped to the given sheet.
    fn calculate_formula(&mut self, formula: &str, sheet: SheetId) -> Result<CellValue>;

    /// Remove a sheet and everything in it.
    fn remove_sheet(&mut self, sheet: SheetId) -> Result<()>;
}
