use crate::types::Sheet;
use indexmap::IndexSet;

const FORMULA_MARKER: char = '=';
const SHEET_SEPARATOR: char = '!';

/// Collect every formula cell of a grid in row-major encounter order.
///
/// A cell is a formula when its value starts with `=`. Duplicates are
/// kept; deduplication happens in [`find_dependencies`].
pub fn extract_formulas(sheet: &Sheet) -> Vec<&str> {
    let mut formulas = Vec::new();
    for row in sheet {
        for value in row {
            if value.starts_with(FORMULA_MARKER) {
                formulas.push(value.as_str());
            }
        }
    }
    formulas
}

/// Extract the sheet names referenced by a formula, in occurrence
/// order, duplicates kept.
///
/// This is a character scanner, not a formula parser: runs of ASCII
/// alphanumerics accumulate into a candidate name, a `!` emits the
/// candidate, and any other character discards it (an operator between
/// identifier-like tokens means the left token was not a sheet
/// qualifier). Cross-sheet references always take the form
/// `<name>!<cellref>`, so this is sufficient — with the known
/// limitation that a `!` used for anything else (say, inside a string
/// literal) is indistinguishable from a sheet qualifier here.
pub fn extract_sheet_names(formula: &str) -> Vec<String> {
    if !formula.contains(SHEET_SEPARATOR) {
        return Vec::new();
    }

    let mut names = Vec::new();
    let mut candidate = String::new();
    for c in formula.chars() {
        if c.is_ascii_alphanumeric() {
            candidate.push(c);
        } else if c == SHEET_SEPARATOR {
            if !candidate.is_empty() {
                names.push(std::mem::take(&mut candidate));
            }
        } else {
            candidate.clear();
        }
    }
    names
}

/// The distinct sheet names referenced by any formula in the grid,
/// first-occurrence order.
pub fn find_dependencies(sheet: &Sheet) -> Vec<String> {
    let mut names: IndexSet<String> = IndexSet::new();
    for formula in extract_formulas(sheet) {
        names.extend(extract_sheet_names(formula));
    }
    names.into_iter().collect()
}
