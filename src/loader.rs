use crate::engine::FormulaEngine;
use crate::scanner::find_dependencies;
use crate::types::{CellChange, Sheet, SheetRegistry};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashSet;

/// Fetches a named sheet from wherever sheets live. Resolution is the
/// only suspension point in a load; no timeout is imposed here, so a
/// caller wanting bounded latency wraps its resolver accordingly.
#[async_trait]
pub trait SheetResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<Sheet>;
}

/// Load a sheet and all its formula dependencies, then commit the
/// batch to the engine.
///
/// The transitive closure of `<name>!<ref>` references is fetched
/// depth-first and strictly sequentially into an in-memory registry; a
/// sheet is registered only after its dependencies, and nothing
/// touches the engine until the whole closure is in memory. A resolver
/// failure therefore aborts the load with the engine untouched.
/// Cyclic references terminate: a sheet that is already registered,
/// already being loaded, or already known to the engine is never
/// fetched again.
pub async fn add_sheet(
    engine: &mut dyn FormulaEngine,
    name: &str,
    resolver: &dyn SheetResolver,
) -> Result<Vec<CellChange>> {
    let mut session = LoadSession::default();
    session.load(&*engine, name, resolver).await?;
    add_sheets(engine, session.registry)
}

/// Commit a batch of named sheets to the engine while recalculation is
/// held off, then resume once.
///
/// Names the engine already knows are skipped, existing content
/// preserved. Per-sheet commits with interleaved recalculation would
/// transiently evaluate formulas against missing sheets; the single
/// suspended batch avoids that.
pub fn add_sheets(engine: &mut dyn FormulaEngine, sheets: SheetRegistry) -> Result<Vec<CellChange>> {
    tracing::debug!(count = sheets.len(), "committing sheet batch");
    engine.suspend_evaluation();
    for (name, content) in sheets {
        if engine.sheet_id(&name).is_some() {
            tracing::debug!(sheet = %name, "sheet already present, skipping");
            continue;
        }
        let assigned = engine.add_sheet(&name)?;
        let sheet_id = engine
            .sheet_id(&assigned)
            .with_context(|| format!("engine did not assign an id for sheet '{assigned}'"))?;
        engine.set_sheet_content(sheet_id, content)?;
    }
    engine.resume_evaluation()
}

/// One dependency walk. The worklist and visited set replace the
/// call-stack recursion of a naive implementation, so arbitrarily deep
/// dependency chains stay heap-bounded and the cycle guard is ordinary
/// data.
#[derive(Default)]
struct LoadSession {
    registry: SheetRegistry,
    visited: HashSet<String>,
}

enum Step {
    /// Fetch the sheet and queue its missing dependencies.
    Visit(String),
    /// Dependencies are done; move the fetched grid into the registry.
    Register(String, Sheet),
}

impl LoadSession {
    async fn load(
        &mut self,
        engine: &dyn FormulaEngine,
        root: &str,
        resolver: &dyn SheetResolver,
    ) -> Result<()> {
        let mut work = vec![Step::Visit(root.to_string())];

        while let Some(step) = work.pop() {
            match step {
                Step::Visit(name) => {
                    if self.is_satisfied(engine, &name) {
                        continue;
                    }
                    // Guard from first visit, not from registration, so
                    // mutually-referencing sheets cannot re-queue each other.
                    self.visited.insert(name.clone());

                    tracing::debug!(sheet = %name, "resolving sheet");
                    let sheet = resolver
                        .resolve(&name)
                        .await
                        .with_context(|| format!("failed to resolve sheet '{name}'"))?;

                    let missing: Vec<String> = find_dependencies(&sheet)
                        .into_iter()
                        .filter(|dep| !self.is_satisfied(engine, dep))
                        .collect();
                    tracing::debug!(sheet = %name, missing = missing.len(), "sheet resolved");

                    work.push(Step::Register(name, sheet));
                    for dep in missing.into_iter().rev() {
                        work.push(Step::Visit(dep));
                    }
                }
                Step::Register(name, sheet) => {
                    self.registry.insert(name, sheet);
                }
            }
        }
        Ok(())
    }

    fn is_satisfied(&self, engine: &dyn FormulaEngine, name: &str) -> bool {
        self.visited.contains(name) || engine.sheet_id(name).is_some()
    }
}
