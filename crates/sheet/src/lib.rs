//! Tabular source for RVTools exports
//!
//! Reads a spreadsheet workbook (or a directory of CSV exports) into memory as
//! a [`Book`] of named [`Sheet`]s. Row 0 of every sheet is its header; cells
//! are scalar [`CellValue`]s. The data is read-only once loaded.
//!
//! # Examples
//!
//! ## Building a sheet in memory
//!
//! ```
//! use rvinventory_sheet::{Sheet, CellValue};
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["Host", "Cluster"],
//!     vec!["esx01", "Prod"],
//! ]);
//!
//! assert_eq!(sheet.row_count(), 2);
//! assert_eq!(sheet.get_by_name(1, "Cluster").unwrap(), &CellValue::from("Prod"));
//! ```
//!
//! ## Loading a workbook
//!
//! ```no_run
//! use rvinventory_sheet::Book;
//!
//! let book = Book::open("RVTools_export_all.xlsx").unwrap();
//! for name in book.sheet_names() {
//!     println!("{name}");
//! }
//! ```

mod book;
mod cell;
mod csv;
mod error;
mod sheet;
mod xlsx;

/// Re-export book type.
pub use book::Book;
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::Sheet;
