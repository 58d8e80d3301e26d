//! State and behaviour shared by every keyed entity.

use crate::coerce;
use crate::error::{InventoryError, Result};
use crate::layout::Binding;
use crate::search::{search, Row};
use chrono::NaiveDateTime;
use once_cell::sync::OnceCell;
use rvinventory_sheet::{Book, CellValue};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// The concrete type of a keyed entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Cluster,
    DataCenter,
    DataStore,
    Host,
    VirtualMachine,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Cluster => "Cluster",
            EntityKind::DataCenter => "DataCenter",
            EntityKind::DataStore => "DataStore",
            EntityKind::Host => "Host",
            EntityKind::VirtualMachine => "VirtualMachine",
        };
        f.write_str(label)
    }
}

/// Identity of a keyed entity across types.
///
/// Two keys are equal only when both kind and name match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntityKey {
    pub kind: EntityKind,
    pub name: String,
}

impl EntityKey {
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.name)
    }
}

/// A domain object identified by a name unique within its governing column.
pub trait Entity {
    /// The entity's type.
    const KIND: EntityKind;

    /// The entity's name (never empty).
    fn name(&self) -> &str;

    /// Kind-qualified identity.
    fn key(&self) -> EntityKey {
        EntityKey::new(Self::KIND, self.name())
    }

    /// Name comparison against a plain string.
    fn is_named(&self, name: &str) -> bool {
        self.name() == name
    }
}

/// Name, shared workbook and the lazily fetched row of one keyed entity.
#[derive(Clone)]
pub(crate) struct Record {
    book: Arc<Book>,
    kind: EntityKind,
    binding: Binding,
    name: String,
    row: OnceCell<Row>,
}

impl Record {
    pub(crate) fn new(
        book: Arc<Book>,
        kind: EntityKind,
        binding: Binding,
        name: impl Into<String>,
    ) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "keyed entities need a name");
        Self {
            book,
            kind,
            binding,
            name,
            row: OnceCell::new(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn book(&self) -> &Arc<Book> {
        &self.book
    }

    /// The entity's own row, fetched on first use.
    pub(crate) fn row(&self) -> Result<&Row> {
        self.row.get_or_try_init(|| {
            let sheet = self.book.get_sheet(self.binding.sheet)?;
            search(sheet, self.binding.column, &self.name, true)
                .into_iter()
                .next()
                .ok_or_else(|| {
                    tracing::debug!(
                        kind = %self.kind,
                        name = %self.name,
                        sheet = self.binding.sheet,
                        "no row for entity"
                    );
                    InventoryError::not_found(self.kind, &self.name)
                })
        })
    }

    /// Raw cell of the entity's own row.
    pub(crate) fn attribute(&self, column: &str) -> Result<&CellValue> {
        self.row()?.require(column)
    }

    pub(crate) fn text(&self, column: &str) -> Result<String> {
        self.attribute(column).map(CellValue::as_str)
    }

    pub(crate) fn int(&self, column: &str) -> Result<i64> {
        coerce::to_int(column, self.attribute(column)?)
    }

    pub(crate) fn flag(&self, column: &str) -> Result<bool> {
        self.attribute(column).map(coerce::to_bool)
    }

    pub(crate) fn timestamp(&self, column: &str) -> Result<NaiveDateTime> {
        coerce::to_timestamp(column, self.attribute(column)?)
    }

    pub(crate) fn optional_timestamp(&self, column: &str) -> Result<Option<NaiveDateTime>> {
        coerce::to_optional_timestamp(column, self.attribute(column)?)
    }

    /// Non-empty text of a column naming another entity.
    pub(crate) fn reference(&self, column: &str) -> Result<Option<String>> {
        let text = self.text(column)?;
        Ok((!text.is_empty()).then_some(text))
    }

    /// Rows of another sheet whose `column` holds this entity's name.
    pub(crate) fn rows_in(&self, sheet: &str, column: &str) -> Result<Vec<Row>> {
        let sheet = self.book.get_sheet(sheet)?;
        Ok(search(sheet, column, &self.name, false))
    }
}

/// Equality, hashing, formatting and [`Entity`] for a keyed entity type.
///
/// The type must expose its [`Record`] as a field named `record`.
macro_rules! keyed_entity {
    ($ty:ident, $kind:expr) => {
        impl $ty {
            /// The entity's name.
            pub fn name(&self) -> &str {
                self.record.name()
            }
        }

        impl $crate::entity::Entity for $ty {
            const KIND: $crate::entity::EntityKind = $kind;

            fn name(&self) -> &str {
                self.record.name()
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.record.name() == other.record.name()
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash(self.record.name(), state);
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.record.name())
            }
        }

        impl std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($ty))
                    .field(&self.record.name())
                    .finish()
            }
        }
    };
}

pub(crate) use keyed_entity;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::HOST_SHEET;
    use rvinventory_sheet::Sheet;

    const HOST: Binding = Binding::new(HOST_SHEET, "Host");

    fn book() -> Arc<Book> {
        let mut book = Book::new();
        book.add_sheet(
            HOST_SHEET,
            Sheet::from_data(vec![
                vec!["Host", "# CPU", "Boot time", "Cluster"],
                vec!["esx01", "2", "05/03/2021 14:07:09", ""],
                vec!["esx02", "two", "yesterday", "A"],
            ]),
        )
        .unwrap();
        Arc::new(book)
    }

    #[test]
    fn test_row_fetch_and_coercion() {
        let record = Record::new(book(), EntityKind::Host, HOST, "esx01");
        assert_eq!(record.int("# CPU").unwrap(), 2);
        assert_eq!(record.timestamp("Boot time").unwrap().to_string(), "2021-03-05 14:07:09");
        assert_eq!(record.reference("Cluster").unwrap(), None);
    }

    #[test]
    fn test_invalid_values_surface() {
        let record = Record::new(book(), EntityKind::Host, HOST, "esx02");
        assert!(matches!(
            record.int("# CPU"),
            Err(InventoryError::InvalidFieldValue { .. })
        ));
        assert!(matches!(
            record.timestamp("Boot time"),
            Err(InventoryError::InvalidFieldValue { .. })
        ));
        assert_eq!(record.reference("Cluster").unwrap().as_deref(), Some("A"));
    }

    #[test]
    fn test_row_is_fetched_once() {
        let record = Record::new(book(), EntityKind::Host, HOST, "esx02");
        let before = crate::search::scan_count();
        let _ = record.int("# CPU");
        let _ = record.int("# CPU");
        let _ = record.text("Cluster").unwrap();
        assert_eq!(crate::search::scan_count() - before, 1);
    }

    #[test]
    fn test_missing_row_is_not_found() {
        let record = Record::new(book(), EntityKind::Host, HOST, "esx99");
        assert!(matches!(
            record.text("Cluster"),
            Err(InventoryError::ObjectNotFound { kind: EntityKind::Host, name }) if name == "esx99"
        ));
    }

    #[test]
    fn test_missing_sheet() {
        let record = Record::new(book(), EntityKind::Host, HOST, "esx01");
        assert!(matches!(
            record.rows_in("tabvHBA", "Host"),
            Err(InventoryError::SheetNotFound { .. })
        ));
    }

    #[test]
    fn test_entity_keys_differ_by_kind() {
        let host = EntityKey::new(EntityKind::Host, "X");
        let cluster = EntityKey::new(EntityKind::Cluster, "X");
        assert_ne!(host, cluster);
        assert_eq!(host, EntityKey::new(EntityKind::Host, "X"));
        assert_eq!(host.to_string(), "Host(X)");
    }
}
