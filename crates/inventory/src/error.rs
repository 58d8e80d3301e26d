//! Error types for inventory queries.

use crate::entity::EntityKind;
use rvinventory_sheet::SheetError;
use thiserror::Error;

/// Result type for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Errors surfaced by the inventory facade and its entities.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The source file is missing, not a file, or cannot be parsed.
    #[error("Cannot read inventory source {path}: {reason}")]
    SourceUnreadable { path: String, reason: String },

    /// The workbook lacks one or more required sheets.
    #[error("Not an RVTools export, missing sheet(s): {}", .missing.join(", "))]
    NonConformantSource { missing: Vec<String> },

    /// A relationship referenced a sheet absent from the workbook.
    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    /// No row matched a by-name lookup or a lazy row fetch.
    #[error("{kind} '{name}' not found")]
    ObjectNotFound { kind: EntityKind, name: String },

    /// A raw cell could not be coerced, or the matched row lacks the column.
    #[error("Invalid value {value:?} for field '{field}': expected {expected}")]
    InvalidFieldValue {
        field: String,
        value: String,
        expected: &'static str,
    },

    /// Any other failure of the tabular source.
    #[error(transparent)]
    Sheet(SheetError),
}

impl InventoryError {
    /// Create an object-not-found error.
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::ObjectNotFound {
            kind,
            name: name.into(),
        }
    }

    /// Create an invalid-field-value error.
    pub fn invalid_field(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidFieldValue {
            field: field.into(),
            value: value.into(),
            expected,
        }
    }
}

impl From<SheetError> for InventoryError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::SheetNotFound { name } => Self::SheetNotFound { name },
            SheetError::Unreadable { path, reason } => Self::SourceUnreadable { path, reason },
            other => Self::Sheet(other),
        }
    }
}
