use crate::book::Book;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// File name prefix RVTools puts in front of each exported tab.
const EXPORT_PREFIX: &str = "RVTools_";

/// CSV reader options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Whether to use type inference when reading
    pub infer_types: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            infer_types: false,
        }
    }
}

impl CsvOptions {
    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to infer types
    #[must_use]
    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }
}

impl Sheet {
    /// Load a sheet from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_csv_with_options(path, &CsvOptions::default())
    }

    /// Load a sheet from a CSV file with custom options
    pub fn from_csv_with_options<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(BufReader::new(file), options)
    }

    /// Load a sheet from a CSV string
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_reader(content.as_bytes(), &CsvOptions::default())
    }

    /// Load a sheet from a reader
    pub fn from_csv_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(false) // header stays in row 0
            .flexible(true)
            .from_reader(reader);

        let mut data: Vec<Vec<CellValue>> = Vec::new();

        for result in csv_reader.records() {
            let record = result?;
            let row: Vec<CellValue> = record
                .iter()
                .map(|field| {
                    if options.infer_types {
                        CellValue::parse(field)
                    } else if field.is_empty() {
                        CellValue::Null
                    } else {
                        CellValue::String(field.to_string())
                    }
                })
                .collect();
            data.push(row);
        }

        let mut sheet = Sheet::with_name("Sheet1");
        sheet.set_data(data);
        Ok(sheet)
    }
}

impl Book {
    /// Load a directory of CSV exports, one sheet per `*.csv` file.
    ///
    /// `RVTools_tabvInfo.csv` becomes sheet `tabvInfo`. Files are added in
    /// name order so the sheet order is stable.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Unreadable` if `dir` is not a readable directory.
    pub fn from_csv_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let shown = dir.display().to_string();

        if !dir.is_dir() {
            return Err(SheetError::unreadable(shown, "not a directory"));
        }

        let mut paths: Vec<_> = std::fs::read_dir(dir)
            .map_err(|e| SheetError::unreadable(&shown, e.to_string()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            })
            .collect();
        paths.sort();

        let book_name = dir
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| shown.clone());
        let mut book = Book::with_name(&book_name);

        for path in paths {
            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let sheet_name = stem.strip_prefix(EXPORT_PREFIX).unwrap_or(&stem);
            let sheet = Sheet::from_csv(&path)?;
            book.add_sheet(sheet_name, sheet)?;
        }

        tracing::debug!(path = %shown, sheets = book.sheet_count(), "loaded csv export directory");
        Ok(book)
    }
}
