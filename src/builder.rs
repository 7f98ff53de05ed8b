use crate::address::CellAddress;
use crate::errors::AddressError;
use crate::types::Sheet;
use std::collections::HashMap;

/// Accumulates sparse cell assignments and projects them into a dense
/// rectangular grid.
///
/// ```
/// use sheet_loader::SheetBuilder;
///
/// let sheet = SheetBuilder::new()
///     .set_cell_content("A1", "=B1*2")?
///     .set_cell_content("B1", "21")?
///     .build();
/// assert_eq!(sheet, vec![
///     vec!["=B1*2".to_string()],
///     vec!["21".to_string()],
/// ]);
/// # Ok::<(), sheet_loader::AddressError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct SheetBuilder {
    cells: HashMap<CellAddress, String>,
}

impl SheetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the contents of a cell, overwriting any previous value at
    /// the same coordinate.
    pub fn set_cell_content(
        mut self,
        cell_address: &str,
        value: impl Into<String>,
    ) -> Result<Self, AddressError> {
        let address = CellAddress::parse(cell_address)?;
        self.cells.insert(address, value.into());
        Ok(self)
    }

    /// Remove the contents of a cell. Removal matches by coordinate
    /// value; a cell that was never set is a no-op.
    pub fn remove_cell_content(mut self, cell_address: &str) -> Result<Self, AddressError> {
        let address = CellAddress::parse(cell_address)?;
        self.cells.remove(&address);
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Project the sparse assignments into a dense grid.
    ///
    /// The grid spans `max_row + 1` rows by `max_col + 1` columns over
    /// every assigned address; unassigned slots hold the empty string,
    /// never a gap. Building an empty map yields an empty grid. The
    /// result is a fresh value each call, not a view of the builder.
    pub fn build(&self) -> Sheet {
        let Some((max_row, max_col)) = self.extent() else {
            return Vec::new();
        };

        let mut sheet: Sheet =
            vec![vec![String::new(); max_col as usize + 1]; max_row as usize + 1];
        for (address, value) in &self.cells {
            sheet[address.row as usize][address.col as usize] = value.clone();
        }
        sheet
    }

    fn extent(&self) -> Option<(u32, u32)> {
        self.cells.keys().fold(None, |extent, address| {
            let (row, col) = extent.unwrap_or((0, 0));
            Some((row.max(address.row), col.max(address.col)))
        })
    }
}
