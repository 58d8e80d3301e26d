//! Datastores, keyed by the `Name` column of `tabvDatastore`.

use crate::coerce;
use crate::entity::{keyed_entity, EntityKind, Record};
use crate::error::Result;
use crate::host::Host;
use crate::layout::{Binding, DATASTORE_SHEET};
use once_cell::sync::OnceCell;
use rvinventory_sheet::Book;
use std::sync::Arc;

/// A datastore (VMFS, NFS, vSAN, ...).
#[derive(Clone)]
pub struct DataStore {
    record: Record,
    hosts: OnceCell<Vec<Host>>,
}

keyed_entity!(DataStore, EntityKind::DataStore);

impl DataStore {
    pub(crate) const BINDING: Binding = Binding::new(DATASTORE_SHEET, "Name");

    pub(crate) fn new(book: Arc<Book>, name: impl Into<String>) -> Self {
        Self {
            record: Record::new(book, EntityKind::DataStore, Self::BINDING, name),
            hosts: OnceCell::new(),
        }
    }

    /// Total capacity in MB (`Capacity MB`).
    pub fn capacity_mb(&self) -> Result<i64> {
        self.record.int("Capacity MB")
    }

    /// Free space in MB (`Free MB`).
    pub fn free_mb(&self) -> Result<i64> {
        self.record.int("Free MB")
    }

    /// Free space as a whole percentage (`Free %`).
    pub fn free_percent(&self) -> Result<i64> {
        self.record.int("Free %")
    }

    /// Space in use in MB (`In Use MB`).
    pub fn in_use_mb(&self) -> Result<i64> {
        self.record.int("In Use MB")
    }

    /// Space provisioned to VMs in MB (`Provisioned MB`).
    pub fn provisioned_mb(&self) -> Result<i64> {
        self.record.int("Provisioned MB")
    }

    /// Hosts mounting the datastore (`# Hosts`).
    pub fn number_of_hosts(&self) -> Result<i64> {
        self.record.int("# Hosts")
    }

    /// VMs with files on the datastore (`# VMs`).
    pub fn number_of_vms(&self) -> Result<i64> {
        self.record.int("# VMs")
    }

    /// Whether Storage I/O Control is enabled.
    pub fn sioc_enabled(&self) -> Result<bool> {
        self.record.flag("SIOC enabled")
    }

    /// Filesystem type, e.g. `VMFS` or `NFS`.
    pub fn datastore_type(&self) -> Result<String> {
        self.record.text("Type")
    }

    /// Major filesystem version, as text.
    pub fn version(&self) -> Result<String> {
        self.record.text("Major Version")
    }

    /// NAA identifier of the backing LUN; empty for non-`naa.` addresses.
    pub fn naa(&self) -> Result<String> {
        let address = self.record.text("Address")?;
        Ok(coerce::naa_identifier(&address).to_string())
    }

    /// Hosts listed in the `Hosts` cell.
    pub fn hosts(&self) -> Result<&[Host]> {
        self.hosts
            .get_or_try_init(|| {
                let hosts = self.record.text("Hosts")?;
                Ok(coerce::split_list(&hosts)
                    .into_iter()
                    .map(|name| Host::new(self.record.book().clone(), name))
                    .collect())
            })
            .map(Vec::as_slice)
    }
}
