//! vSphere datacenters, keyed by the `Datacenter` column of `tabvHost`.

use crate::cluster::Cluster;
use crate::entity::{keyed_entity, EntityKind, Record};
use crate::error::Result;
use crate::host::Host;
use crate::layout::{Binding, HOST_SHEET};
use once_cell::sync::OnceCell;
use rvinventory_sheet::Book;
use std::collections::HashSet;
use std::sync::Arc;

/// A vSphere datacenter.
#[derive(Clone)]
pub struct DataCenter {
    record: Record,
    clusters: OnceCell<Vec<Cluster>>,
    hosts: OnceCell<Vec<Host>>,
}

keyed_entity!(DataCenter, EntityKind::DataCenter);

impl DataCenter {
    pub(crate) const BINDING: Binding = Binding::new(HOST_SHEET, "Datacenter");

    pub(crate) fn new(book: Arc<Book>, name: impl Into<String>) -> Self {
        Self {
            record: Record::new(book, EntityKind::DataCenter, Self::BINDING, name),
            clusters: OnceCell::new(),
            hosts: OnceCell::new(),
        }
    }

    /// Distinct clusters of this datacenter, in first-occurrence order.
    ///
    /// Hosts outside any cluster are skipped.
    pub fn clusters(&self) -> Result<&[Cluster]> {
        self.clusters
            .get_or_try_init(|| {
                let rows = self.record.rows_in(HOST_SHEET, Self::BINDING.column)?;
                let mut seen = HashSet::new();
                Ok(rows
                    .iter()
                    .filter_map(|row| row.reference(Cluster::BINDING.column))
                    .filter(|name| seen.insert(name.clone()))
                    .map(|name| Cluster::new(self.record.book().clone(), name))
                    .collect())
            })
            .map(Vec::as_slice)
    }

    /// Every host row of this datacenter, in sheet order.
    pub fn hosts(&self) -> Result<&[Host]> {
        self.hosts
            .get_or_try_init(|| {
                let rows = self.record.rows_in(HOST_SHEET, Self::BINDING.column)?;
                Ok(rows
                    .iter()
                    .filter_map(|row| row.reference(Host::BINDING.column))
                    .map(|name| Host::new(self.record.book().clone(), name))
                    .collect())
            })
            .map(Vec::as_slice)
    }
}
