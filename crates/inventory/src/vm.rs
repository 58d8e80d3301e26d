//! Virtual machines, keyed by the `VM` column of `tabvInfo`.

use crate::cluster::Cluster;
use crate::coerce;
use crate::datacenter::DataCenter;
use crate::datastore::DataStore;
use crate::entity::{keyed_entity, EntityKind, Record};
use crate::error::Result;
use crate::host::Host;
use crate::layout::{Binding, DISK_SHEET, INFO_SHEET, NETWORK_SHEET, PARTITION_SHEET};
use crate::vdisk::VDisk;
use crate::vnetwork::VNetwork;
use crate::vpartition::VPartition;
use chrono::NaiveDateTime;
use once_cell::sync::OnceCell;
use rvinventory_sheet::Book;
use std::sync::Arc;

/// A virtual machine.
#[derive(Clone)]
pub struct VirtualMachine {
    record: Record,
    disks: OnceCell<Vec<VDisk>>,
    networks: OnceCell<Vec<VNetwork>>,
    partitions: OnceCell<Vec<VPartition>>,
}

keyed_entity!(VirtualMachine, EntityKind::VirtualMachine);

impl VirtualMachine {
    pub(crate) const BINDING: Binding = Binding::new(INFO_SHEET, "VM");

    pub(crate) fn new(book: Arc<Book>, name: impl Into<String>) -> Self {
        Self {
            record: Record::new(book, EntityKind::VirtualMachine, Self::BINDING, name),
            disks: OnceCell::new(),
            networks: OnceCell::new(),
            partitions: OnceCell::new(),
        }
    }

    /// Cluster the VM runs in.
    pub fn cluster(&self) -> Result<Option<Cluster>> {
        Ok(self
            .record
            .reference(Cluster::BINDING.column)?
            .map(|name| Cluster::new(self.record.book().clone(), name)))
    }

    /// Datacenter the VM belongs to.
    pub fn datacenter(&self) -> Result<Option<DataCenter>> {
        Ok(self
            .record
            .reference(DataCenter::BINDING.column)?
            .map(|name| DataCenter::new(self.record.book().clone(), name)))
    }

    /// Datastore holding the VM's configuration, from the `[name]` prefix of
    /// its `Path`.
    pub fn datastore(&self) -> Result<Option<DataStore>> {
        let path = self.record.text("Path")?;
        match coerce::datastore_from_path(&path) {
            Some(name) if !name.is_empty() => {
                Ok(Some(DataStore::new(self.record.book().clone(), name)))
            }
            _ => {
                tracing::warn!(vm = self.name(), path = %path, "no datastore in VM path");
                Ok(None)
            }
        }
    }

    /// Host the VM is registered on.
    pub fn host(&self) -> Result<Option<Host>> {
        Ok(self
            .record
            .reference(Host::BINDING.column)?
            .map(|name| Host::new(self.record.book().clone(), name)))
    }

    /// Configured vCPUs (`CPUs`).
    pub fn cpus(&self) -> Result<i64> {
        self.record.int("CPUs")
    }

    /// Configured memory in MB (`Memory`).
    pub fn memory_mb(&self) -> Result<i64> {
        self.record.int("Memory")
    }

    /// Storage in use in MB (`In Use MB`).
    pub fn in_use_mb(&self) -> Result<i64> {
        self.record.int("In Use MB")
    }

    /// Storage provisioned in MB (`Provisioned MB`).
    pub fn provisioned_mb(&self) -> Result<i64> {
        self.record.int("Provisioned MB")
    }

    /// Storage not shared with other VMs in MB (`Unshared MB`).
    pub fn unshared_mb(&self) -> Result<i64> {
        self.record.int("Unshared MB")
    }

    /// Guest OS as reported by the VM configuration.
    pub fn os(&self) -> Result<String> {
        self.record.text("OS")
    }

    /// Last power-on time; `None` when the VM never ran.
    pub fn power_on(&self) -> Result<Option<NaiveDateTime>> {
        self.record.optional_timestamp("PowerOn")
    }

    /// Power state such as `poweredOn` (`Powerstate`).
    pub fn power_state(&self) -> Result<String> {
        self.record.text("Powerstate")
    }

    /// Virtual disks from `tabvDisk`.
    pub fn disks(&self) -> Result<&[VDisk]> {
        self.disks
            .get_or_try_init(|| {
                self.record
                    .rows_in(DISK_SHEET, Self::BINDING.column)?
                    .iter()
                    .map(|row| VDisk::from_row(self.record.book().clone(), row))
                    .collect()
            })
            .map(Vec::as_slice)
    }

    /// Network adapters from `tabvNetwork`.
    pub fn networks(&self) -> Result<&[VNetwork]> {
        self.networks
            .get_or_try_init(|| {
                self.record
                    .rows_in(NETWORK_SHEET, Self::BINDING.column)?
                    .iter()
                    .map(VNetwork::from_row)
                    .collect()
            })
            .map(Vec::as_slice)
    }

    /// Guest partitions from `tabvPartition`.
    pub fn partitions(&self) -> Result<&[VPartition]> {
        self.partitions
            .get_or_try_init(|| {
                self.record
                    .rows_in(PARTITION_SHEET, Self::BINDING.column)?
                    .iter()
                    .map(VPartition::from_row)
                    .collect()
            })
            .map(Vec::as_slice)
    }
}
