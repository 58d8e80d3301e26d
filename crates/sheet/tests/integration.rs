use rust_xlsxwriter::Workbook;
use rvinventory_sheet::{Book, CellValue, CsvOptions, Sheet, SheetError};
use tempfile::tempdir;

// ===== Workbook Loading Tests =====

#[test]
fn test_open_xlsx_keeps_sheet_order_and_types() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("RVTools_export_all.xlsx");

    let mut workbook = Workbook::new();
    let info = workbook.add_worksheet();
    info.set_name("tabvInfo").unwrap();
    info.write_string(0, 0, "VM").unwrap();
    info.write_string(0, 1, "CPUs").unwrap();
    info.write_string(0, 2, "Template").unwrap();
    info.write_string(1, 0, "web01").unwrap();
    info.write_number(1, 1, 4.0).unwrap();
    info.write_boolean(1, 2, false).unwrap();
    let host = workbook.add_worksheet();
    host.set_name("tabvHost").unwrap();
    host.write_string(0, 0, "Host").unwrap();
    workbook.save(&path).unwrap();

    let book = Book::open(&path).unwrap();
    assert_eq!(book.name(), "RVTools_export_all");
    assert_eq!(book.sheet_names(), vec!["tabvInfo", "tabvHost"]);

    let sheet = book.get_sheet("tabvInfo").unwrap();
    assert_eq!(sheet.get_by_name(1, "VM").unwrap(), &CellValue::from("web01"));
    assert_eq!(sheet.get_by_name(1, "CPUs").unwrap().as_int(), Some(4));
    assert_eq!(sheet.get_by_name(1, "Template").unwrap(), &CellValue::Bool(false));
    assert!(book.get_sheet("tabvHost").unwrap().has_column("Host"));
}

#[test]
fn test_open_rejects_missing_and_garbage_files() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        Book::open(dir.path().join("missing.xlsx")),
        Err(SheetError::Unreadable { .. })
    ));

    let garbage = dir.path().join("garbage.xlsx");
    std::fs::write(&garbage, b"definitely not a zip archive").unwrap();
    assert!(matches!(Book::open(&garbage), Err(SheetError::Unreadable { .. })));

    assert!(matches!(
        Book::open(dir.path()),
        Err(SheetError::Unreadable { .. })
    ));
}

#[test]
fn test_csv_directory() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("RVTools_tabvHost.csv"), "Host,# CPU\nesx01,2\n").unwrap();
    std::fs::write(dir.path().join("RVTools_tabvInfo.csv"), "VM,Host\nvm01,esx01\n").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let book = Book::from_csv_dir(dir.path()).unwrap();
    assert_eq!(book.sheet_names(), vec!["tabvHost", "tabvInfo"]);

    // no type inference: values stay as exported text
    let host = book.get_sheet("tabvHost").unwrap();
    assert_eq!(host.get_by_name(1, "# CPU").unwrap(), &CellValue::from("2"));
    assert_eq!(host.get_by_name(1, "# CPU").unwrap().as_int(), Some(2));
}

#[test]
fn test_csv_options() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hosts.csv");
    std::fs::write(&path, "Host;# CPU\nesx01;2\nesx02\n").unwrap();

    let options = CsvOptions::default()
        .with_delimiter(b';')
        .with_type_inference(true);
    let sheet = Sheet::from_csv_with_options(&path, &options).unwrap();
    assert_eq!(sheet.get(1, 1).unwrap(), &CellValue::Int(2));
    // short rows read as empty cells
    assert!(sheet.get(2, 1).unwrap().is_null());
}

// ===== Lookup Tests =====

#[test]
fn test_missing_sheet_and_column() {
    let mut book = Book::new();
    book.add_sheet("tabvHost", Sheet::from_data(vec![vec!["Host"], vec!["esx01"]]))
        .unwrap();

    assert!(matches!(
        book.get_sheet("tabvHBA"),
        Err(SheetError::SheetNotFound { name }) if name == "tabvHBA"
    ));
    assert!(matches!(
        book.add_sheet("tabvHost", Sheet::new()),
        Err(SheetError::SheetAlreadyExists { .. })
    ));

    let sheet = book.get_sheet("tabvHost").unwrap();
    assert!(matches!(
        sheet.column_position("Cluster"),
        Err(SheetError::ColumnNotFound { .. })
    ));
}
