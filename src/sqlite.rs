/// SQLite Adapter Module
///
/// This module connects the binding engine to rusqlite: a cursor
/// implementation over a prepared statement, plus thin execution helpers
/// for the statements that do not return rows. The helpers take the
/// connection explicitly; the crate holds no connection state of its own.
use crate::bind::{bind, Destination};
use crate::core::{BindError, Result};
use crate::cursor::RowCursor;
use crate::value::Value;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Params, Statement};
use tracing::debug;

/// A forward-only cursor over the rows of a prepared SQLite statement.
///
/// Column names are captured before execution; the cursor borrows the
/// statement for its whole lifetime, so it cannot outlive the query that
/// produced it.
pub struct SqliteCursor<'stmt> {
    columns: Vec<String>,
    rows: rusqlite::Rows<'stmt>,
}

impl<'stmt> SqliteCursor<'stmt> {
    /// Executes the prepared statement and wraps its row stream.
    ///
    /// # Arguments
    ///
    /// * `statement` - Prepared statement to execute
    /// * `params` - Parameters bound into the statement
    ///
    /// # Errors
    ///
    /// Returns the underlying `rusqlite::Error` if execution fails.
    pub fn new<P: Params>(
        statement: &'stmt mut Statement<'_>,
        params: P,
    ) -> rusqlite::Result<Self> {
        let columns = statement
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let rows = statement.query(params)?;
        Ok(SqliteCursor { columns, rows })
    }
}

impl RowCursor for SqliteCursor<'_> {
    type Error = rusqlite::Error;

    fn columns(&mut self) -> std::result::Result<Vec<String>, rusqlite::Error> {
        Ok(self.columns.clone())
    }

    fn next_row(&mut self) -> std::result::Result<Option<Vec<Value>>, rusqlite::Error> {
        let row = match self.rows.next()? {
            Some(row) => row,
            None => return Ok(None),
        };
        let mut values = Vec::with_capacity(self.columns.len());
        for index in 0..self.columns.len() {
            values.push(decode_value(row.get_ref(index)?));
        }
        Ok(Some(values))
    }
}

/// Decodes a SQLite value into the crate's dynamic value model.
fn decode_value(value: ValueRef) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).to_string()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

/// Prepares and runs a query, binding its result set into `destination`.
///
/// # Arguments
///
/// * `conn` - Connection to run the query on (a `Transaction` works too,
///   it derefs to a connection)
/// * `sql` - Query to execute
/// * `params` - Parameters bound into the query
/// * `destination` - Record or sequence of records to populate
///
/// # Errors
///
/// Returns `BindError::Database` for preparation and execution failures,
/// or any binding error from the result set.
pub fn query<P, D>(conn: &Connection, sql: &str, params: P, destination: &mut D) -> Result<()>
where
    P: Params,
    D: Destination,
{
    debug!("binding query results: {}", sql);
    let mut statement = conn.prepare(sql)?;
    let mut cursor = SqliteCursor::new(&mut statement, params)?;
    bind(&mut cursor, destination)
}

/// Prepares and runs a statement that returns no rows.
///
/// # Returns
///
/// The number of rows affected.
pub fn execute<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<usize> {
    debug!("executing statement: {}", sql);
    let mut statement = conn.prepare(sql)?;
    let affected = statement.execute(params)?;
    Ok(affected)
}

/// Prepares and runs an insert, returning the auto-increment row id.
///
/// # Errors
///
/// Returns `BindError::NoRowsAffected` when the statement affected no
/// rows.
pub fn execute_insert<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<i64> {
    let affected = execute(conn, sql, params)?;
    if affected == 0 {
        return Err(BindError::NoRowsAffected);
    }
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_reports_columns_and_rows() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (id INTEGER, payload BLOB, score REAL, note TEXT);
             INSERT INTO t VALUES (1, X'0102', 0.5, NULL);",
        )
        .unwrap();

        let mut statement = conn.prepare("SELECT * FROM t").unwrap();
        let mut cursor = SqliteCursor::new(&mut statement, []).unwrap();

        assert_eq!(
            cursor.columns().unwrap(),
            vec!["id", "payload", "score", "note"]
        );
        let row = cursor.next_row().unwrap().unwrap();
        assert_eq!(
            row,
            vec![
                Value::Integer(1),
                Value::Blob(vec![1, 2]),
                Value::Real(0.5),
                Value::Null,
            ]
        );
        assert!(cursor.next_row().unwrap().is_none());
    }

    #[test]
    fn test_execute_reports_affected_rows() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (id INTEGER);
             INSERT INTO t VALUES (1), (2), (3);",
        )
        .unwrap();

        let affected = execute(&conn, "UPDATE t SET id = id + 10 WHERE id > ?1", [1]).unwrap();
        assert_eq!(affected, 2);
    }

    #[test]
    fn test_execute_insert_returns_rowid() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT);")
            .unwrap();

        let id = execute_insert(&conn, "INSERT INTO t (name) VALUES (?1)", ["ann"]).unwrap();
        assert_eq!(id, 1);
        let id = execute_insert(&conn, "INSERT INTO t (name) VALUES (?1)", ["bob"]).unwrap();
        assert_eq!(id, 2);
    }

    #[test]
    fn test_execute_insert_fails_when_nothing_changes() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT);")
            .unwrap();

        let err =
            execute_insert(&conn, "UPDATE t SET name = 'x' WHERE id = 999", []).unwrap_err();
        assert!(matches!(err, BindError::NoRowsAffected));
    }
}
