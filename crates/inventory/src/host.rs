//! ESX hosts, keyed by the `Host` column of `tabvHost`.

use crate::cluster::Cluster;
use crate::datacenter::DataCenter;
use crate::entity::{keyed_entity, EntityKind, Record};
use crate::error::Result;
use crate::hba::Hba;
use crate::layout::{Binding, HBA_SHEET, HOST_SHEET, INFO_SHEET};
use crate::vm::VirtualMachine;
use chrono::NaiveDateTime;
use once_cell::sync::OnceCell;
use rvinventory_sheet::Book;
use std::sync::Arc;

/// An ESX(i) host.
#[derive(Clone)]
pub struct Host {
    record: Record,
    hbas: OnceCell<Vec<Hba>>,
    vms: OnceCell<Vec<VirtualMachine>>,
}

keyed_entity!(Host, EntityKind::Host);

impl Host {
    pub(crate) const BINDING: Binding = Binding::new(HOST_SHEET, "Host");

    pub(crate) fn new(book: Arc<Book>, name: impl Into<String>) -> Self {
        Self {
            record: Record::new(book, EntityKind::Host, Self::BINDING, name),
            hbas: OnceCell::new(),
            vms: OnceCell::new(),
        }
    }

    /// Last boot (`Boot time`).
    pub fn boot_time(&self) -> Result<NaiveDateTime> {
        self.record.timestamp("Boot time")
    }

    /// Cluster the host belongs to; `None` for standalone hosts.
    pub fn cluster(&self) -> Result<Option<Cluster>> {
        Ok(self
            .record
            .reference(Cluster::BINDING.column)?
            .map(|name| Cluster::new(self.record.book().clone(), name)))
    }

    /// Datacenter the host belongs to.
    pub fn datacenter(&self) -> Result<Option<DataCenter>> {
        Ok(self
            .record
            .reference(DataCenter::BINDING.column)?
            .map(|name| DataCenter::new(self.record.book().clone(), name)))
    }

    /// Current CPU usage (`CPU usage %`).
    pub fn cpu_usage_percent(&self) -> Result<i64> {
        self.record.int("CPU usage %")
    }

    /// ESX build string (`ESX Version`).
    pub fn esx_version(&self) -> Result<String> {
        self.record.text("ESX Version")
    }

    /// Physical memory in MB (`# Memory`).
    pub fn memory_mb(&self) -> Result<i64> {
        self.record.int("# Memory")
    }

    /// Current memory usage (`Memory usage %`).
    pub fn memory_usage_percent(&self) -> Result<i64> {
        self.record.int("Memory usage %")
    }

    /// Hardware model.
    pub fn model(&self) -> Result<String> {
        self.record.text("Model")
    }

    /// Physical cores (`# Cores`).
    pub fn number_of_cores(&self) -> Result<i64> {
        self.record.int("# Cores")
    }

    /// CPU sockets (`# CPU`).
    pub fn number_of_cpu(&self) -> Result<i64> {
        self.record.int("# CPU")
    }

    /// vCPUs allocated to VMs on this host (`# vCPUs`).
    pub fn number_of_vcpu(&self) -> Result<i64> {
        self.record.int("# vCPUs")
    }

    /// VMs registered on this host (`# VMs`).
    pub fn number_of_vms(&self) -> Result<i64> {
        self.record.int("# VMs")
    }

    /// Host bus adapters from `tabvHBA`.
    pub fn hbas(&self) -> Result<&[Hba]> {
        self.hbas
            .get_or_try_init(|| {
                self.record
                    .rows_in(HBA_SHEET, "Host")?
                    .iter()
                    .map(Hba::from_row)
                    .collect()
            })
            .map(Vec::as_slice)
    }

    /// Virtual machines registered on this host, from `tabvInfo`.
    pub fn vms(&self) -> Result<&[VirtualMachine]> {
        self.vms
            .get_or_try_init(|| {
                let rows = self.record.rows_in(INFO_SHEET, "Host")?;
                Ok(rows
                    .iter()
                    .filter_map(|row| row.reference(VirtualMachine::BINDING.column))
                    .map(|name| VirtualMachine::new(self.record.book().clone(), name))
                    .collect())
            })
            .map(Vec::as_slice)
    }
}
