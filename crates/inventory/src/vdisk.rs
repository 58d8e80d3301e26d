//! Virtual disks, one per row of `tabvDisk`.

use crate::coerce;
use crate::datastore::DataStore;
use crate::error::Result;
use crate::search::Row;
use rvinventory_sheet::Book;
use std::fmt;
use std::sync::Arc;

/// A virtual disk (VMDK) attached to a VM.
#[derive(Clone)]
pub struct VDisk {
    book: Arc<Book>,
    pub vm: String,
    pub disk: String,
    pub capacity_mb: i64,
    pub path: String,
    pub eagerly_scrub: bool,
    pub thin: bool,
}

impl VDisk {
    pub(crate) fn from_row(book: Arc<Book>, row: &Row) -> Result<Self> {
        Ok(Self {
            book,
            vm: row.text("VM")?,
            disk: row.text("Disk")?,
            capacity_mb: coerce::to_int("Capacity MB", row.require("Capacity MB")?)?,
            path: row.text("Path")?,
            eagerly_scrub: coerce::to_bool(row.require("Eagerly Scrub")?),
            thin: coerce::to_bool(row.require("Thin")?),
        })
    }

    /// Datastore holding the disk file, from the bracketed prefix of `Path`.
    #[must_use]
    pub fn datastore(&self) -> Option<DataStore> {
        coerce::datastore_from_path(&self.path)
            .filter(|name| !name.is_empty())
            .map(|name| DataStore::new(self.book.clone(), name))
    }
}

impl fmt::Display for VDisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.disk)
    }
}

impl fmt::Debug for VDisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VDisk")
            .field("vm", &self.vm)
            .field("disk", &self.disk)
            .field("capacity_mb", &self.capacity_mb)
            .field("path", &self.path)
            .field("eagerly_scrub", &self.eagerly_scrub)
            .field("thin", &self.thin)
            .finish_non_exhaustive()
    }
}
