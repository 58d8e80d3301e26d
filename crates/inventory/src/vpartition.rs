//! Guest partitions, one per row of `tabvPartition`.

use crate::coerce;
use crate::error::{InventoryError, Result};
use crate::search::Row;
use serde::Serialize;
use std::fmt;

/// Some RVTools releases header the free-percentage column with a trailing space.
const FREE_PERCENT_COLUMNS: [&str; 2] = ["Free %", "Free % "];

/// A partition seen from inside the guest OS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VPartition {
    pub vm: String,
    pub disk: String,
    pub capacity_mb: i64,
    pub free_mb: i64,
    pub free_percent: i64,
}

impl VPartition {
    pub fn from_row(row: &Row) -> Result<Self> {
        let free_percent = FREE_PERCENT_COLUMNS
            .iter()
            .find_map(|column| row.get(column).map(|cell| (*column, cell)))
            .ok_or_else(|| InventoryError::invalid_field("Free %", "", "a column in the matched row"))?;

        Ok(Self {
            vm: row.text("VM")?,
            disk: row.text("Disk")?,
            capacity_mb: int(row, "Capacity MB")?,
            free_mb: int(row, "Free MB")?,
            free_percent: coerce::to_int(free_percent.0, free_percent.1)?,
        })
    }
}

fn int(row: &Row, column: &str) -> Result<i64> {
    coerce::to_int(column, row.require(column)?)
}

impl fmt::Display for VPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.disk)
    }
}
