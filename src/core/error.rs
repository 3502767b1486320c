/// Error Module
///
/// This module defines the crate-wide error type for the binding engine.
/// Every failure propagates to the immediate caller; nothing is retried,
/// logged, or recovered inside the binders.
use thiserror::Error;

/// Error type covering every failure a bind or execution helper can hit.
#[derive(Error, Debug)]
pub enum BindError {
    /// Errors from the underlying SQLite driver in the execution helpers
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The cursor could not report the column names of its result set
    #[error("Column introspection error: {0}")]
    ColumnIntrospection(String),

    /// A column has no matching field on the destination record
    #[error("Binding error: no field matching column '{column}' in record '{record}'")]
    FieldNotFound {
        record: &'static str,
        column: String,
    },

    /// The matching field exists but has no setter registered
    #[error("Binding error: field matching column '{column}' in record '{record}' is not settable")]
    FieldNotSettable {
        record: &'static str,
        column: String,
    },

    /// A row could not be advanced or decoded into the resolved fields
    #[error("Row scan error: {0}")]
    RowScan(String),

    /// An insert helper ran a statement that affected no rows
    #[error("Execution error: statement affected no rows")]
    NoRowsAffected,
}

/// Type alias for Result to use BindError as the error type.
pub type Result<T> = std::result::Result<T, BindError>;
