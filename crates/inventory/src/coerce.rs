//! Conversions from raw cells to typed attribute values.

use crate::error::{InventoryError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rvinventory_sheet::CellValue;

/// Timestamp layout used by RVTools for text dates.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

const NAA_PREFIX: &str = "naa.";

/// Parse a cell as an integer.
pub fn to_int(field: &str, value: &CellValue) -> Result<i64> {
    value
        .as_int()
        .ok_or_else(|| InventoryError::invalid_field(field, value.as_str(), "an integer"))
}

/// Any non-empty cell is true, whatever its text says.
///
/// Native booleans keep their value and numbers are true when non-zero.
#[must_use]
pub fn to_bool(value: &CellValue) -> bool {
    match value {
        CellValue::Null => false,
        CellValue::Bool(b) => *b,
        CellValue::Int(i) => *i != 0,
        CellValue::Float(f) => *f != 0.0,
        CellValue::String(s) => !s.is_empty(),
    }
}

/// Parse a `DD/MM/YYYY HH:MM:SS` text cell or an Excel date serial.
pub fn to_timestamp(field: &str, value: &CellValue) -> Result<NaiveDateTime> {
    let invalid = || InventoryError::invalid_field(field, value.as_str(), "a DD/MM/YYYY HH:MM:SS timestamp");
    match value {
        CellValue::String(s) => NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map_err(|_| invalid()),
        CellValue::Float(serial) => from_excel_serial(*serial).ok_or_else(invalid),
        CellValue::Int(serial) => from_excel_serial(*serial as f64).ok_or_else(invalid),
        CellValue::Null | CellValue::Bool(_) => Err(invalid()),
    }
}

/// Like [`to_timestamp`], but an empty cell is `None`.
pub fn to_optional_timestamp(field: &str, value: &CellValue) -> Result<Option<NaiveDateTime>> {
    if value.is_empty() {
        return Ok(None);
    }
    to_timestamp(field, value).map(Some)
}

fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

/// Datastore name from a storage path such as `[DS01] vm1/vm1.vmx`.
///
/// Returns the text between the first `[` and the next `]`, or `None` when
/// either bracket is missing. Empty brackets give `Some("")`.
#[must_use]
pub fn datastore_from_path(path: &str) -> Option<&str> {
    let start = path.find('[')?;
    let rest = &path[start + 1..];
    let end = rest.find(']')?;
    Some(&rest[..end])
}

/// Identifier embedded in an `naa.<id>` address.
///
/// Everything after the `naa.` prefix up to the next `.`; empty when the
/// address does not start with the prefix.
#[must_use]
pub fn naa_identifier(address: &str) -> &str {
    address
        .strip_prefix(NAA_PREFIX)
        .and_then(|rest| rest.split('.').next())
        .unwrap_or("")
}

/// Split a `", "`-separated list cell, dropping empty items.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(", ")
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
