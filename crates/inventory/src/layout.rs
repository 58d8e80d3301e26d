//! Sheet and key-column names of an RVTools export.

/// Virtual machines, one row per VM.
pub const INFO_SHEET: &str = "tabvInfo";
/// Virtual disks, one row per disk.
pub const DISK_SHEET: &str = "tabvDisk";
/// Guest partitions, one row per partition.
pub const PARTITION_SHEET: &str = "tabvPartition";
/// Virtual network adapters, one row per adapter.
pub const NETWORK_SHEET: &str = "tabvNetwork";
/// ESX hosts, carrying the cluster and datacenter columns.
pub const HOST_SHEET: &str = "tabvHost";
/// Host bus adapters, one row per adapter.
pub const HBA_SHEET: &str = "tabvHBA";
/// Datastores, one row per datastore.
pub const DATASTORE_SHEET: &str = "tabvDatastore";

/// Sheets that must exist for a workbook to count as an RVTools export.
///
/// `tabvNetwork` is read on demand but is not part of the check.
pub const REQUIRED_SHEETS: [&str; 6] = [
    INFO_SHEET,
    DISK_SHEET,
    PARTITION_SHEET,
    HOST_SHEET,
    HBA_SHEET,
    DATASTORE_SHEET,
];

/// The (sheet, key column) pair that resolves a keyed entity's own row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub sheet: &'static str,
    pub column: &'static str,
}

impl Binding {
    pub const fn new(sheet: &'static str, column: &'static str) -> Self {
        Self { sheet, column }
    }
}
