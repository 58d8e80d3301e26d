//! Entry point: open an export, check its layout, enumerate and look up entities.

use crate::cluster::Cluster;
use crate::datacenter::DataCenter;
use crate::datastore::DataStore;
use crate::entity::EntityKind;
use crate::error::{InventoryError, Result};
use crate::host::Host;
use crate::layout::{Binding, REQUIRED_SHEETS};
use crate::search::column_values;
use crate::vm::VirtualMachine;
use rvinventory_sheet::Book;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Options for opening an inventory source
#[derive(Debug, Clone, Default)]
pub struct InventoryOptions {
    /// Check that every required sheet exists right after opening
    pub health_check: bool,
}

impl InventoryOptions {
    /// Set whether to run the layout health check on open
    #[must_use]
    pub fn with_health_check(mut self, health_check: bool) -> Self {
        self.health_check = health_check;
        self
    }
}

/// An RVTools export loaded into memory.
///
/// Entities handed out by the inventory share its workbook and stay valid
/// after the inventory itself is dropped.
#[derive(Debug, Clone)]
pub struct Inventory {
    book: Arc<Book>,
}

impl Inventory {
    /// Open a workbook file, or a directory of `RVTools_*.csv` exports.
    ///
    /// No layout check is performed; see [`Inventory::health_check`].
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::SourceUnreadable` if the path is missing or
    /// cannot be read as a workbook.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &InventoryOptions::default())
    }

    /// Open with options.
    pub fn open_with<P: AsRef<Path>>(path: P, options: &InventoryOptions) -> Result<Self> {
        let path = path.as_ref();
        let book = if path.is_dir() {
            Book::from_csv_dir(path)?
        } else {
            Book::open(path)?
        };

        let inventory = Self::from_book(book);
        if options.health_check {
            inventory.health_check()?;
        }
        Ok(inventory)
    }

    /// Wrap an already loaded workbook.
    #[must_use]
    pub fn from_book(book: Book) -> Self {
        Self {
            book: Arc::new(book),
        }
    }

    /// The shared workbook.
    #[must_use]
    pub fn book(&self) -> &Arc<Book> {
        &self.book
    }

    /// Confirm that every required sheet is present.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::NonConformantSource` listing the missing sheets.
    pub fn health_check(&self) -> Result<()> {
        let missing: Vec<String> = REQUIRED_SHEETS
            .iter()
            .filter(|name| !self.book.has_sheet(name))
            .map(|name| (*name).to_string())
            .collect();

        if missing.is_empty() {
            tracing::debug!(book = self.book.name(), "layout health check passed");
            Ok(())
        } else {
            tracing::warn!(book = self.book.name(), missing = ?missing, "layout health check failed");
            Err(InventoryError::NonConformantSource { missing })
        }
    }

    // ===== Enumeration =====

    /// Distinct clusters, in first-occurrence order. Hosts without a cluster
    /// are skipped.
    pub fn clusters(&self) -> Result<impl Iterator<Item = Cluster> + '_> {
        Ok(distinct(self.names(Cluster::BINDING)?).map(|name| Cluster::new(self.book.clone(), name)))
    }

    /// Distinct datacenters, in first-occurrence order.
    pub fn datacenters(&self) -> Result<impl Iterator<Item = DataCenter> + '_> {
        Ok(distinct(self.names(DataCenter::BINDING)?)
            .map(|name| DataCenter::new(self.book.clone(), name)))
    }

    /// Every datastore row, in sheet order.
    pub fn datastores(&self) -> Result<impl Iterator<Item = DataStore> + '_> {
        Ok(self
            .names(DataStore::BINDING)?
            .map(|name| DataStore::new(self.book.clone(), name)))
    }

    /// Every host row, in sheet order.
    pub fn hosts(&self) -> Result<impl Iterator<Item = Host> + '_> {
        Ok(self
            .names(Host::BINDING)?
            .map(|name| Host::new(self.book.clone(), name)))
    }

    /// Every VM row, in sheet order.
    pub fn vms(&self) -> Result<impl Iterator<Item = VirtualMachine> + '_> {
        Ok(self
            .names(VirtualMachine::BINDING)?
            .map(|name| VirtualMachine::new(self.book.clone(), name)))
    }

    // ===== Lookup =====

    /// Cluster named `name` in `tabvHost`.
    ///
    /// Fails with `InventoryError::ObjectNotFound` when no row matches.
    pub fn cluster_by_name(&self, name: &str) -> Result<Cluster> {
        self.find(Cluster::BINDING, EntityKind::Cluster, name)
            .map(|name| Cluster::new(self.book.clone(), name))
    }

    /// Datacenter named `name` in `tabvHost`.
    ///
    /// Fails with `InventoryError::ObjectNotFound` when no row matches.
    pub fn datacenter_by_name(&self, name: &str) -> Result<DataCenter> {
        self.find(DataCenter::BINDING, EntityKind::DataCenter, name)
            .map(|name| DataCenter::new(self.book.clone(), name))
    }

    /// Datastore named `name` in `tabvDatastore`.
    ///
    /// Fails with `InventoryError::ObjectNotFound` when no row matches.
    pub fn datastore_by_name(&self, name: &str) -> Result<DataStore> {
        self.find(DataStore::BINDING, EntityKind::DataStore, name)
            .map(|name| DataStore::new(self.book.clone(), name))
    }

    /// Host named `name` in `tabvHost`.
    ///
    /// Fails with `InventoryError::ObjectNotFound` when no row matches.
    pub fn host_by_name(&self, name: &str) -> Result<Host> {
        self.find(Host::BINDING, EntityKind::Host, name)
            .map(|name| Host::new(self.book.clone(), name))
    }

    /// VM named `name` in `tabvInfo`.
    ///
    /// Fails with `InventoryError::ObjectNotFound` when no row matches.
    pub fn vm_by_name(&self, name: &str) -> Result<VirtualMachine> {
        self.find(VirtualMachine::BINDING, EntityKind::VirtualMachine, name)
            .map(|name| VirtualMachine::new(self.book.clone(), name))
    }

    /// Non-empty key values of a binding, rescanned on every call.
    fn names(&self, binding: Binding) -> Result<impl Iterator<Item = String> + '_> {
        let sheet = self.book.get_sheet(binding.sheet)?;
        column_values(sheet, binding.column)
    }

    /// First row whose key column equals `name`.
    fn find(&self, binding: Binding, kind: EntityKind, name: &str) -> Result<String> {
        self.names(binding)?
            .find(|candidate| candidate == name)
            .ok_or_else(|| InventoryError::not_found(kind, name))
    }
}

fn distinct(names: impl Iterator<Item = String>) -> impl Iterator<Item = String> {
    let mut seen = HashSet::new();
    names.filter(move |name| seen.insert(name.clone()))
}
