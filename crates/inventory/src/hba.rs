//! Host bus adapters, one per row of `tabvHBA`.

use crate::error::Result;
use crate::search::Row;
use rvinventory_sheet::CellValue;
use serde::Serialize;
use std::fmt;

const FIBRE_CHANNEL: &str = "Fibre Channel";

/// A host bus adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hba {
    pub host: String,
    pub device: String,
    pub status: String,
    pub hba_type: String,
    pub driver: String,
    pub model: String,
    wwn: String,
}

impl Hba {
    /// Build from a `tabvHBA` row. `WWN` may be absent; the other columns
    /// are required.
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            host: row.text("Host")?,
            device: row.text("Device")?,
            status: row.text("Status")?,
            hba_type: row.text("Type")?,
            driver: row.text("Driver")?,
            model: row.text("Model")?,
            wwn: row.get("WWN").map(CellValue::as_str).unwrap_or_default(),
        })
    }

    /// World wide names, only for Fibre Channel adapters.
    #[must_use]
    pub fn wwn(&self) -> Option<Vec<String>> {
        (self.hba_type == FIBRE_CHANNEL).then(|| {
            self.wwn
                .split_whitespace()
                .map(str::to_string)
                .collect()
        })
    }
}

impl fmt::Display for Hba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.device)
    }
}
