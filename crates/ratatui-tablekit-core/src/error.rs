//! Error types

/// Configuration errors reported by [`crate::datatable::DataTable`].
///
/// Interaction (clicks, keys, toggles) never fails; only column setup and programmatic sorting
/// can name something that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("duplicate column key '{0}'")]
    DuplicateColumnKey(String),

    #[error("no column with key '{0}'")]
    UnknownColumn(String),

    #[error("column '{0}' is not sortable")]
    ColumnNotSortable(String),
}
