//! vSphere clusters, keyed by the `Cluster` column of `tabvHost`.

use crate::datacenter::DataCenter;
use crate::entity::{keyed_entity, EntityKind, Record};
use crate::error::Result;
use crate::host::Host;
use crate::layout::{Binding, HOST_SHEET};
use once_cell::sync::OnceCell;
use rvinventory_sheet::Book;
use std::sync::Arc;

/// A vSphere cluster.
#[derive(Clone)]
pub struct Cluster {
    record: Record,
    hosts: OnceCell<Vec<Host>>,
}

keyed_entity!(Cluster, EntityKind::Cluster);

impl Cluster {
    pub(crate) const BINDING: Binding = Binding::new(HOST_SHEET, "Cluster");

    pub(crate) fn new(book: Arc<Book>, name: impl Into<String>) -> Self {
        Self {
            record: Record::new(book, EntityKind::Cluster, Self::BINDING, name),
            hosts: OnceCell::new(),
        }
    }

    /// Datacenter of the first host row carrying this cluster.
    pub fn datacenter(&self) -> Result<Option<DataCenter>> {
        Ok(self
            .record
            .reference("Datacenter")?
            .map(|name| DataCenter::new(self.record.book().clone(), name)))
    }

    /// Every host row assigned to this cluster, in sheet order.
    pub fn hosts(&self) -> Result<&[Host]> {
        self.hosts
            .get_or_try_init(|| {
                let rows = self.record.rows_in(HOST_SHEET, Self::BINDING.column)?;
                Ok(rows
                    .iter()
                    .filter_map(|row| row.reference("Host"))
                    .map(|name| Host::new(self.record.book().clone(), name))
                    .collect())
            })
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::search::scan_count;
    use rvinventory_sheet::Sheet;

    fn book() -> Arc<Book> {
        let mut book = Book::new();
        book.add_sheet(
            HOST_SHEET,
            Sheet::from_data(vec![
                vec!["Host", "Cluster", "Datacenter"],
                vec!["esx01", "A", "DC1"],
                vec!["esx02", "B", "DC1"],
                vec!["esx03", "A", "DC1"],
                vec!["esx04", "", "DC2"],
            ]),
        )
        .unwrap();
        Arc::new(book)
    }

    #[test]
    fn test_hosts() {
        let cluster = Cluster::new(book(), "A");
        let names: Vec<_> = cluster.hosts().unwrap().iter().map(Host::name).collect();
        assert_eq!(names, vec!["esx01", "esx03"]);
    }

    #[test]
    fn test_hosts_are_cached() {
        let cluster = Cluster::new(book(), "A");
        let before = scan_count();
        let first = cluster.hosts().unwrap();
        let second = cluster.hosts().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(scan_count() - before, 1);
    }

    #[test]
    fn test_datacenter() {
        let cluster = Cluster::new(book(), "B");
        assert_eq!(cluster.datacenter().unwrap().unwrap().name(), "DC1");
    }

    #[test]
    fn test_equality_by_name() {
        let book = book();
        let a = Cluster::new(book.clone(), "A");
        assert_eq!(a, Cluster::new(book.clone(), "A"));
        assert_ne!(a, Cluster::new(book, "B"));
        assert!(a.is_named("A"));
        assert_eq!(format!("{a:?}"), "Cluster(\"A\")");
        assert_eq!(a.to_string(), "A");
    }
}
