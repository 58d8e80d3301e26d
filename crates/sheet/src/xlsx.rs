use crate::book::Book;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel serial: days since 1899-12-30
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

impl Book {
    /// Load every sheet of a spreadsheet file (`.xlsx`, `.xlsm`, `.xls`, `.ods`).
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Unreadable` if the path is not a readable file or
    /// cannot be parsed as a workbook.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        if !path.is_file() {
            return Err(SheetError::unreadable(shown, "no such file"));
        }

        let mut workbook =
            open_workbook_auto(path).map_err(|e| SheetError::unreadable(&shown, e.to_string()))?;

        let book_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| shown.clone());
        let mut book = Book::with_name(&book_name);

        for sheet_name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| SheetError::unreadable(&shown, e.to_string()))?;

            let data: Vec<Vec<CellValue>> = range
                .rows()
                .map(|row| row.iter().map(data_to_cell_value).collect())
                .collect();

            let mut sheet = Sheet::with_name(&sheet_name);
            sheet.set_data(data);
            book.add_sheet(&sheet_name, sheet)?;
        }

        tracing::debug!(path = %shown, sheets = book.sheet_count(), "loaded workbook");
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::tempdir;

    #[test]
    fn test_open_reads_all_sheets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rvtools.xlsx");

        let mut workbook = Workbook::new();
        let info = workbook.add_worksheet();
        info.set_name("tabvInfo").unwrap();
        info.write_string(0, 0, "VM").unwrap();
        info.write_string(0, 1, "CPUs").unwrap();
        info.write_string(0, 2, "Template").unwrap();
        info.write_string(1, 0, "vm01").unwrap();
        info.write_number(1, 1, 4.0).unwrap();
        info.write_boolean(1, 2, false).unwrap();
        let host = workbook.add_worksheet();
        host.set_name("tabvHost").unwrap();
        host.write_string(0, 0, "Host").unwrap();
        workbook.save(&path).unwrap();

        let book = Book::open(&path).unwrap();
        assert_eq!(book.name(), "rvtools");
        assert_eq!(book.sheet_names(), vec!["tabvInfo", "tabvHost"]);

        let sheet = book.get_sheet("tabvInfo").unwrap();
        assert_eq!(sheet.get_by_name(1, "VM").unwrap().as_str(), "vm01");
        assert_eq!(sheet.get_by_name(1, "CPUs").unwrap().as_int(), Some(4));
        assert_eq!(sheet.get_by_name(1, "Template").unwrap(), &CellValue::Bool(false));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        let result = Book::open(dir.path().join("missing.xlsx"));
        assert!(matches!(result, Err(SheetError::Unreadable { .. })));
    }

    #[test]
    fn test_open_directory_is_unreadable() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Book::open(dir.path()),
            Err(SheetError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_open_garbage_is_unreadable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        assert!(matches!(Book::open(&path), Err(SheetError::Unreadable { .. })));
    }
}
