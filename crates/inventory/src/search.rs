//! Row search over a single sheet.
//!
//! Every entity resolves its attributes and relationships through [`search`]:
//! a linear scan of one column below the header, comparing each cell's text
//! with a target exactly. Matches come back as [`Row`]s keyed by header name.

use crate::error::{InventoryError, Result};
use indexmap::IndexMap;
use rvinventory_sheet::{CellValue, Sheet};

/// One matched row, keyed by header name in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: IndexMap<String, CellValue>,
}

impl Row {
    /// Get a cell by header name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Get a cell by header name, failing when the sheet has no such column.
    pub fn require(&self, column: &str) -> Result<&CellValue> {
        self.cells
            .get(column)
            .ok_or_else(|| InventoryError::invalid_field(column, "", "a column in the matched row"))
    }

    /// Text of a cell; fails when the column is absent.
    pub fn text(&self, column: &str) -> Result<String> {
        self.require(column).map(CellValue::as_str)
    }

    /// Non-empty text of a cell naming another entity.
    #[must_use]
    pub fn reference(&self, column: &str) -> Option<String> {
        self.get(column)
            .map(CellValue::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Header names in column order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Number of columns in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
thread_local! {
    static SCANS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Number of scans run by [`search`] on the current thread.
#[cfg(test)]
pub(crate) fn scan_count() -> usize {
    SCANS.with(std::cell::Cell::get)
}

/// Find the rows of `sheet` whose `column` cell reads exactly `target`.
///
/// Scanning starts below the header and keeps sheet order. With
/// `first_only`, the scan stops at the first match. A column missing from
/// the header matches nothing.
#[must_use]
pub fn search(sheet: &Sheet, column: &str, target: &str, first_only: bool) -> Vec<Row> {
    #[cfg(test)]
    SCANS.with(|scans| scans.set(scans.get() + 1));

    let index = sheet.column_index();
    let Some(&col) = index.get(column) else {
        tracing::trace!(sheet = sheet.name(), column, "search on unknown column");
        return Vec::new();
    };

    let mut rows = Vec::new();
    for row in 1..sheet.row_count() {
        let Ok(cell) = sheet.get(row, col) else {
            continue;
        };
        if cell.text_eq(target) {
            rows.push(expand(sheet, row));
            if first_only {
                break;
            }
        }
    }

    tracing::trace!(
        sheet = sheet.name(),
        column,
        target,
        matches = rows.len(),
        "search"
    );
    rows
}

/// Non-empty values of `column` below the header, in row order.
///
/// Fails when the sheet has no such column.
pub fn column_values<'a>(
    sheet: &'a Sheet,
    column: &str,
) -> Result<impl Iterator<Item = String> + 'a> {
    let col = sheet.column_position(column)?;
    Ok((1..sheet.row_count())
        .filter_map(move |row| sheet.get(row, col).ok())
        .map(CellValue::as_str)
        .filter(|value| !value.is_empty()))
}

fn expand(sheet: &Sheet, row: usize) -> Row {
    let index = sheet.column_index();
    let mut cells = IndexMap::with_capacity(index.len());
    for name in sheet.column_names() {
        // duplicate headers resolve to the last column carrying the name
        let value = index
            .get(name)
            .and_then(|&col| sheet.get(row, col).ok())
            .cloned()
            .unwrap_or_default();
        cells.insert(name.clone(), value);
    }
    Row { cells }
}
