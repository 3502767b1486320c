/// Binding Module
///
/// This module hosts the two binding strategies and the dispatch between
/// them. The single-record binder keeps the first row of a result set,
/// the collection binders gather every row into a growable sequence, and
/// all of them drain the cursor completely so forward-only sources are
/// left reusable by the caller.
///
/// Dispatch is by destination shape: binding into a record takes the
/// single-record path, binding into `Vec<Record>` or `Vec<Box<Record>>`
/// takes the collection paths. Shapes outside those three do not
/// implement [`Destination`] and are rejected at compile time.
use crate::core::{BindError, Result};
use crate::cursor::RowCursor;
use crate::record::{Descriptor, Record};
use crate::value::Value;

/// A destination handle the dispatcher can route into.
///
/// Implemented for every record type declared through
/// [`record!`](crate::record!): the record itself, `Vec` of it, and
/// `Vec<Box<...>>` of it. Hand-implemented records provide the same three
/// impls by delegating to [`bind_record`], [`bind_records`], and
/// [`bind_boxed_records`].
pub trait Destination {
    /// Binds every remaining row of `cursor` into `self`.
    fn bind_rows<C: RowCursor>(&mut self, cursor: &mut C) -> Result<()>;
}

/// Binds a row cursor into a destination.
///
/// This is the single entry point for binding. The destination is always
/// a mutable reference to caller-owned storage; its shape selects the
/// strategy. On failure the destination keeps exactly its prior contents.
///
/// # Arguments
///
/// * `cursor` - Forward-only row source; fully drained on success
/// * `destination` - Record or sequence of records to populate
///
/// # Errors
///
/// Propagates the first failure from column introspection, descriptor
/// resolution, or row scanning. Nothing is retried.
pub fn bind<C, D>(cursor: &mut C, destination: &mut D) -> Result<()>
where
    C: RowCursor,
    D: Destination,
{
    destination.bind_rows(cursor)
}

fn read_columns<C: RowCursor>(cursor: &mut C) -> Result<Vec<String>> {
    cursor
        .columns()
        .map_err(|e| BindError::ColumnIntrospection(e.to_string()))
}

fn read_row<C: RowCursor>(cursor: &mut C) -> Result<Option<Vec<Value>>> {
    cursor
        .next_row()
        .map_err(|e| BindError::RowScan(e.to_string()))
}

/// Binds a result set into a single record.
///
/// The descriptor is resolved once, before any row is consumed. Only the
/// first row's values are copied; later rows are still advanced so the
/// cursor ends up drained. On success the destination is replaced
/// wholesale with the newly populated value; a result set with no rows
/// leaves the default record in place.
pub fn bind_record<C, T>(cursor: &mut C, destination: &mut T) -> Result<()>
where
    C: RowCursor,
    T: Record,
{
    let columns = read_columns(cursor)?;
    let descriptor = Descriptor::<T>::resolve(&columns)?;
    let mut scratch = T::default();
    let mut scanned = false;
    while let Some(row) = read_row(cursor)? {
        // First row wins; the rest are consumed to leave the cursor drained.
        if scanned {
            continue;
        }
        descriptor.apply(&mut scratch, row)?;
        scanned = true;
    }
    *destination = scratch;
    Ok(())
}

/// Binds every row of a result set into a sequence of records.
///
/// The descriptor is resolved once and a single scratch record is reused:
/// each row overwrites the scratch's resolved fields, then the scratch is
/// cloned into the output. Rows are appended to the destination only
/// after the cursor is fully drained, so a mid-stream failure leaves the
/// destination untouched. Elements already in the destination are kept.
pub fn bind_records<C, T>(cursor: &mut C, destination: &mut Vec<T>) -> Result<()>
where
    C: RowCursor,
    T: Record + Clone,
{
    let columns = read_columns(cursor)?;
    let descriptor = Descriptor::<T>::resolve(&columns)?;
    let mut scratch = T::default();
    let mut collected = Vec::new();
    while let Some(row) = read_row(cursor)? {
        descriptor.apply(&mut scratch, row)?;
        collected.push(scratch.clone());
    }
    destination.append(&mut collected);
    Ok(())
}

/// Binds every row of a result set into a sequence of boxed records.
///
/// Each row populates a freshly allocated record, so every element is
/// independently owned. Commit semantics match [`bind_records`]: one
/// append after a full drain, prior elements preserved.
pub fn bind_boxed_records<C, T>(cursor: &mut C, destination: &mut Vec<Box<T>>) -> Result<()>
where
    C: RowCursor,
    T: Record,
{
    let columns = read_columns(cursor)?;
    let descriptor = Descriptor::<T>::resolve(&columns)?;
    let mut collected = Vec::new();
    while let Some(row) = read_row(cursor)? {
        let mut record = Box::new(T::default());
        descriptor.apply(&mut record, row)?;
        collected.push(record);
    }
    destination.append(&mut collected);
    Ok(())
}
