/// Row Cursor Module
///
/// This module defines the forward-only cursor abstraction the binders
/// consume, plus an in-memory implementation for binding tabular data that
/// does not come from a SQL statement.
use crate::value::Value;
use std::convert::Infallible;

/// A forward-only, single-pass source of result rows.
///
/// Implementations expose the column names of the active result set and
/// decode one row at a time into owned [`Value`]s, index-aligned with the
/// column list. A cursor is consumed by binding and must not be shared
/// between threads while a bind is in progress.
pub trait RowCursor {
    /// Error produced by the underlying row source.
    type Error: std::error::Error;

    /// Returns the column names of the active result set.
    fn columns(&mut self) -> Result<Vec<String>, Self::Error>;

    /// Advances to the next row and decodes it, or returns `None` once the
    /// cursor is exhausted.
    fn next_row(&mut self) -> Result<Option<Vec<Value>>, Self::Error>;
}

/// An infallible in-memory cursor over pre-built rows.
///
/// Useful for binding tabular data assembled in memory and as a test
/// double for the SQL-backed cursor.
#[derive(Debug)]
pub struct MemoryCursor {
    columns: Vec<String>,
    rows: std::vec::IntoIter<Vec<Value>>,
}

impl MemoryCursor {
    /// Creates a cursor over `rows`, each row index-aligned with `columns`.
    pub fn new<C: Into<String>>(columns: Vec<C>, rows: Vec<Vec<Value>>) -> Self {
        MemoryCursor {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: rows.into_iter(),
        }
    }
}

impl RowCursor for MemoryCursor {
    type Error = Infallible;

    fn columns(&mut self) -> Result<Vec<String>, Infallible> {
        Ok(self.columns.clone())
    }

    fn next_row(&mut self) -> Result<Option<Vec<Value>>, Infallible> {
        Ok(self.rows.next())
    }
}
