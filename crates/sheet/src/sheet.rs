use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use once_cell::sync::OnceCell;
use std::collections::HashMap;

static NULL_CELL: CellValue = CellValue::Null;

/// A sheet representing a 2D grid of cells (row-major storage).
///
/// Row 0 is treated as the header row. The header names and the
/// header-to-column mapping are built on first use and cached until the
/// data is replaced.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
    /// Width of the widest row, kept in step with `data`.
    width: usize,
    header: OnceCell<Vec<String>>,
    column_index: OnceCell<HashMap<String, usize>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
            width: 0,
            header: OnceCell::new(),
            column_index: OnceCell::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let converted: Vec<Vec<CellValue>> = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        let mut sheet = Self::new();
        sheet.set_data(converted);
        sheet
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows, header included
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the number of columns (width of the widest row)
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.width
    }

    /// Check if the sheet is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // ===== Cell Access =====

    /// Get a cell value by row and column index (0-based).
    ///
    /// Cells missing from the end of a short row read as `Null`.
    pub fn get(&self, row: usize, col: usize) -> Result<&CellValue> {
        let cells = self
            .data
            .get(row)
            .filter(|_| col < self.width)
            .ok_or(SheetError::IndexOutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.width,
            })?;
        Ok(cells.get(col).unwrap_or(&NULL_CELL))
    }

    /// Get a cell value by row index and header name
    pub fn get_by_name(&self, row: usize, col_name: &str) -> Result<&CellValue> {
        let col = self.column_position(col_name)?;
        self.get(row, col)
    }

    // ===== Row Access =====

    /// Append a row
    pub fn row_append<T: Into<CellValue>>(&mut self, data: Vec<T>) {
        if self.data.is_empty() {
            self.reset_header();
        }
        let row: Vec<CellValue> = data.into_iter().map(Into::into).collect();
        self.width = self.width.max(row.len());
        self.data.push(row);
    }

    /// Replace the underlying data, dropping the cached header
    pub fn set_data(&mut self, data: Vec<Vec<CellValue>>) {
        self.width = data.iter().map(Vec::len).max().unwrap_or(0);
        self.data = data;
        self.reset_header();
    }

    fn reset_header(&mut self) {
        self.header = OnceCell::new();
        self.column_index = OnceCell::new();
    }

    // ===== Named Access =====

    /// Header names in column order, as text
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        self.header.get_or_init(|| {
            self.data
                .first()
                .map(|header| header.iter().map(CellValue::as_str).collect())
                .unwrap_or_default()
        })
    }

    /// Mapping from header name to column index.
    ///
    /// Built once from row 0. When a header name appears more than once the
    /// last occurrence wins.
    pub fn column_index(&self) -> &HashMap<String, usize> {
        self.column_index.get_or_init(|| {
            let mut index_map = HashMap::new();
            for (i, name) in self.column_names().iter().enumerate() {
                index_map.insert(name.clone(), i);
            }
            index_map
        })
    }

    /// Get the column index by header name
    pub fn column_position(&self, name: &str) -> Result<usize> {
        self.column_index()
            .get(name)
            .copied()
            .ok_or_else(|| SheetError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Check whether a header with this name exists
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index().contains_key(name)
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
