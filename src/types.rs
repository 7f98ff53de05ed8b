use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A dense rectangular grid of raw cell values, row-major. This is the
/// unit of exchange with both the resolver and the engine.
pub type Sheet = Vec<Vec<String>>;

/// Named sheets staged in memory before a bulk commit. Insertion order
/// is the commit order, so dependencies land before their dependents.
pub type SheetRegistry = IndexMap<String, Sheet>;

/// Engine-internal identifier for a registered sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetId(pub u32);

impl std::fmt::Display for SheetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value produced by the evaluation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellValue {
    Empty,
    Number(f64),
    Bool(bool),
    Text(String),
    /// An evaluation error code as the engine reports it (`#REF!`, `#CYCLE!`, ...).
    Error(String),
}

/// One recalculated cell, as reported when evaluation resumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellChange {
    pub sheet: SheetId,
    pub row: u32,
    pub col: u32,
    pub value: CellValue,
}
