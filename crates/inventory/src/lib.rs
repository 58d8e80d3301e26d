//! Typed, lazily resolved view over an RVTools inventory export
//!
//! An RVTools export is a workbook of flat sheets (`tabvInfo`, `tabvHost`,
//! `tabvDatastore`, ...). This crate turns those rows into a graph of
//! entities you can navigate: a [`Host`] has VMs and HBAs, a
//! [`VirtualMachine`] has disks, partitions and network adapters, a
//! [`DataStore`] has hosts.
//!
//! Relationships are resolved on demand by scanning the relevant sheet for
//! the entity's name, and each entity caches what it has already resolved.
//! The workbook is immutable once loaded, so nothing is ever invalidated.
//!
//! # Examples
//!
//! ```no_run
//! use rvinventory::{Inventory, InventoryOptions};
//!
//! let inventory = Inventory::open_with(
//!     "RVTools_export_all.xlsx",
//!     &InventoryOptions::default().with_health_check(true),
//! )?;
//!
//! for host in inventory.hosts()? {
//!     println!("{host}: {} VMs", host.vms()?.len());
//! }
//!
//! let vm = inventory.vm_by_name("web01")?;
//! if let Some(datastore) = vm.datastore()? {
//!     println!("{} lives on {datastore} ({} MB free)", vm, datastore.free_mb()?);
//! }
//! # Ok::<(), rvinventory::InventoryError>(())
//! ```

mod cluster;
pub mod coerce;
mod datacenter;
mod datastore;
mod entity;
mod error;
mod hba;
mod host;
mod inventory;
pub mod layout;
pub mod search;
mod vdisk;
mod vm;
mod vnetwork;
mod vpartition;

pub use cluster::Cluster;
pub use datacenter::DataCenter;
pub use datastore::DataStore;
pub use entity::{Entity, EntityKey, EntityKind};
pub use error::{InventoryError, Result};
pub use hba::Hba;
pub use host::Host;
pub use inventory::{Inventory, InventoryOptions};
pub use search::{search, Row};
pub use vdisk::VDisk;
pub use vm::VirtualMachine;
pub use vnetwork::VNetwork;
pub use vpartition::VPartition;

/// Re-export of the tabular source types.
pub use rvinventory_sheet::{Book, CellValue, Sheet};
