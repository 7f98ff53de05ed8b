#![allow(dead_code)]
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sheet_loader::{CellChange, CellValue, FormulaEngine, Sheet, SheetId, SheetResolver};
use std::collections::HashMap;
use std::sync::Mutex;

pub fn grid(rows: &[&[&str]]) -> Sheet {
    rows.iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect()
}

/// Every mutating engine call, in order. `sheet_id` probes are not
/// recorded; the interesting discipline is suspend/commit/resume.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineOp {
    Suspend,
    Resume,
    AddSheet(String),
    SetContent(String),
    Calculate(String),
    RemoveSheet(String),
}

struct MockSheet {
    name: String,
    content: Sheet,
    removed: bool,
}

/// An in-memory stand-in for the evaluation engine that records the
/// call sequence and returns scripted formula results.
#[derive(Default)]
pub struct MockEngine {
    sheets: Vec<MockSheet>,
    suspend_depth: u32,
    pub ops: Vec<EngineOp>,
    results: HashMap<String, CellValue>,
    failing_formulas: Vec<String>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register a sheet as if the engine already knew it.
    pub fn with_sheet(mut self, name: &str, content: Sheet) -> Self {
        self.sheets.push(MockSheet {
            name: name.to_string(),
            content,
            removed: false,
        });
        self
    }

    /// Script the value returned for a formula.
    pub fn with_result(mut self, formula: &str, value: CellValue) -> Self {
        self.results.insert(formula.to_string(), value);
        self
    }

    /// Make evaluation of a formula fail outright.
    pub fn with_failing_formula(mut self, formula: &str) -> Self {
        self.failing_formulas.push(formula.to_string());
        self
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.iter().filter(|s| !s.removed).count()
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets
            .iter()
            .filter(|s| !s.removed)
            .map(|s| s.name.as_str())
            .collect()
    }

    pub fn content(&self, name: &str) -> Option<&Sheet> {
        self.sheets
            .iter()
            .find(|s| !s.removed && s.name == name)
            .map(|s| &s.content)
    }

    pub fn added_sheet_names(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                EngineOp::AddSheet(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl FormulaEngine for MockEngine {
    fn sheet_id(&self, name: &str) -> Option<SheetId> {
        self.sheets
            .iter()
            .position(|s| !s.removed && s.name == name)
            .map(|idx| SheetId(idx as u32))
    }

    fn add_sheet(&mut self, name: &str) -> Result<String> {
        if self.sheet_id(name).is_some() {
            return Err(anyhow!("sheet '{name}' already exists"));
        }
        self.ops.push(EngineOp::AddSheet(name.to_string()));
        self.sheets.push(MockSheet {
            name: name.to_string(),
            content: Vec::new(),
            removed: false,
        });
        Ok(name.to_string())
    }

    fn set_sheet_content(&mut self, sheet: SheetId, content: Sheet) -> Result<()> {
        let entry = self
            .sheets
            .get_mut(sheet.0 as usize)
            .filter(|s| !s.removed)
            .ok_or_else(|| anyhow!("no sheet with id {sheet}"))?;
        self.ops.push(EngineOp::SetContent(entry.name.clone()));
        entry.content = content;
        Ok(())
    }

    fn suspend_evaluation(&mut self) {
        self.suspend_depth += 1;
        self.ops.push(EngineOp::Suspend);
    }

    fn resume_evaluation(&mut self) -> Result<Vec<CellChange>> {
        if self.suspend_depth == 0 {
            return Err(anyhow!("resume without matching suspend"));
        }
        self.suspend_depth -= 1;
        self.ops.push(EngineOp::Resume);
        Ok(Vec::new())
    }

    fn calculate_formula(&mut self, formula: &str, sheet: SheetId) -> Result<CellValue> {
        if self.sheets.get(sheet.0 as usize).is_none_or(|s| s.removed) {
            return Err(anyhow!("no sheet with id {sheet}"));
        }
        self.ops.push(EngineOp::Calculate(formula.to_string()));
        if self.failing_formulas.iter().any(|f| f == formula) {
            return Err(anyhow!("evaluation failed for '{formula}'"));
        }
        Ok(self
            .results
            .get(formula)
            .cloned()
            .unwrap_or(CellValue::Empty))
    }

    fn remove_sheet(&mut self, sheet: SheetId) -> Result<()> {
        let entry = self
            .sheets
            .get_mut(sheet.0 as usize)
            .filter(|s| !s.removed)
            .ok_or_else(|| anyhow!("no sheet with id {sheet}"))?;
        self.ops.push(EngineOp::RemoveSheet(entry.name.clone()));
        entry.removed = true;
        Ok(())
    }
}

/// Map-backed resolver that records the order of every resolve call.
#[derive(Default)]
pub struct MapResolver {
    sheets: HashMap<String, Sheet>,
    calls: Mutex<Vec<String>>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: &str, content: Sheet) -> Self {
        self.sheets.insert(name.to_string(), content);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SheetResolver for MapResolver {
    async fn resolve(&self, name: &str) -> Result<Sheet> {
        self.calls.lock().unwrap().push(name.to_string());
        self.sheets
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("unknown sheet '{name}'"))
    }
}
