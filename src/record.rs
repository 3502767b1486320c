/// Record Registry Module
///
/// This module replaces identifier-based reflection with an explicit field
/// registry: every bindable record type carries a compile-time table of
/// its fields and setters, and [`Descriptor`] resolves the active column
/// set against that table once per result set.
///
/// Records are usually declared through the [`record!`](crate::record!)
/// macro, which generates the registry from the struct definition. The
/// [`Record`] trait can also be implemented by hand when a registry needs
/// non-settable fields or custom setters.
use crate::core::{BindError, Result};
use crate::mapper::underscore_to_pascal;
use crate::value::{Value, ValueError};

/// Setter writing one decoded row value into a record field.
pub type FieldSetter<T> = fn(&mut T, Value) -> std::result::Result<(), ValueError>;

/// A single entry in a record's field registry.
pub struct FieldDef<T> {
    /// Declared field name. Columns match a field when both identifiers
    /// agree after passing through the name mapper, so `user_id` in source
    /// form and `UserId` in capitalized form name the same field.
    pub name: &'static str,
    /// Setter for the field, or `None` when the field is declared but not
    /// settable from a result row.
    pub set: Option<FieldSetter<T>>,
}

/// A record shape the binders can populate.
pub trait Record: Default + 'static {
    /// Record name used in error messages.
    const NAME: &'static str;
    /// Field registry, one entry per named field.
    const FIELDS: &'static [FieldDef<Self>];
}

/// The resolved, ordered column-to-field mapping for one result set.
///
/// Built once per distinct column set and reused for every row; entries
/// are index-aligned with the column list that produced them.
#[derive(Debug)]
pub struct Descriptor<T: Record> {
    entries: Vec<(String, FieldSetter<T>)>,
}

impl<T: Record> Descriptor<T> {
    /// Resolves the active column set against the record's field registry.
    ///
    /// Each column name is mapped through [`underscore_to_pascal`] and
    /// looked up among the record's fields. Resolution happens before any
    /// row is consumed, so a mismatched result set fails the whole bind up
    /// front.
    ///
    /// # Errors
    ///
    /// Returns `BindError::FieldNotFound` when a column has no matching
    /// field, and `BindError::FieldNotSettable` when the matching field
    /// has no setter registered.
    pub fn resolve(columns: &[String]) -> Result<Self> {
        let mut entries = Vec::with_capacity(columns.len());
        for column in columns {
            let ident = underscore_to_pascal(column);
            let field = T::FIELDS
                .iter()
                .find(|field| underscore_to_pascal(field.name) == ident)
                .ok_or_else(|| BindError::FieldNotFound {
                    record: T::NAME,
                    column: column.clone(),
                })?;
            let set = field.set.ok_or_else(|| BindError::FieldNotSettable {
                record: T::NAME,
                column: column.clone(),
            })?;
            entries.push((column.clone(), set));
        }
        Ok(Descriptor { entries })
    }

    /// Number of resolved columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the descriptor was resolved from an empty column set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes one decoded row into `target` through the resolved setters.
    ///
    /// # Errors
    ///
    /// Returns `BindError::RowScan` when the row length does not match the
    /// resolved column set or a value refuses to convert into its field
    /// type.
    pub fn apply(&self, target: &mut T, row: Vec<Value>) -> Result<()> {
        if row.len() != self.entries.len() {
            return Err(BindError::RowScan(format!(
                "row has {} values, result set has {} columns",
                row.len(),
                self.entries.len()
            )));
        }
        for ((column, set), value) in self.entries.iter().zip(row) {
            set(target, value)
                .map_err(|e| BindError::RowScan(format!("column '{}': {}", column, e)))?;
        }
        Ok(())
    }
}

/// Declares a bindable record struct.
///
/// Expands to the struct definition itself plus a [`Record`] impl with one
/// registry entry per field, and [`Destination`](crate::Destination) impls
/// for the record, `Vec` of it, and `Vec<Box<...>>` of it. The struct must
/// derive (or implement) `Default` and `Clone`.
///
/// ```
/// rowbind::record! {
///     #[derive(Debug, Default, Clone, PartialEq)]
///     pub struct User {
///         pub id: i64,
///         pub user_name: String,
///     }
/// }
///
/// use rowbind::{MemoryCursor, Value};
///
/// let mut cursor = MemoryCursor::new(
///     vec!["id", "user_name"],
///     vec![vec![Value::Integer(1), Value::Text("ann".into())]],
/// );
/// let mut user = User::default();
/// rowbind::bind(&mut cursor, &mut user).unwrap();
/// assert_eq!(user, User { id: 1, user_name: "ann".into() });
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$field_meta:meta])* $field_vis:vis $field:ident : $ty:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$field_meta])* $field_vis $field : $ty, )+
        }

        impl $crate::Record for $name {
            const NAME: &'static str = stringify!($name);
            const FIELDS: &'static [$crate::FieldDef<Self>] = &[
                $(
                    $crate::FieldDef {
                        name: stringify!($field),
                        set: Some(|record: &mut Self, value: $crate::Value| {
                            record.$field = <$ty as $crate::FromValue>::from_value(value)?;
                            Ok(())
                        }),
                    },
                )+
            ];
        }

        impl $crate::Destination for $name {
            fn bind_rows<C: $crate::RowCursor>(
                &mut self,
                cursor: &mut C,
            ) -> $crate::Result<()> {
                $crate::bind::bind_record(cursor, self)
            }
        }

        impl $crate::Destination for ::std::vec::Vec<$name> {
            fn bind_rows<C: $crate::RowCursor>(
                &mut self,
                cursor: &mut C,
            ) -> $crate::Result<()> {
                $crate::bind::bind_records(cursor, self)
            }
        }

        impl $crate::Destination for ::std::vec::Vec<::std::boxed::Box<$name>> {
            fn bind_rows<C: $crate::RowCursor>(
                &mut self,
                cursor: &mut C,
            ) -> $crate::Result<()> {
                $crate::bind::bind_boxed_records(cursor, self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        pub struct OrderItem {
            pub order_item_id: i64,
            pub label: String,
        }
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_registry_generated_from_struct() {
        assert_eq!(OrderItem::NAME, "OrderItem");
        let names: Vec<&str> = OrderItem::FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["order_item_id", "label"]);
    }

    #[test]
    fn test_resolve_is_index_aligned_with_columns() {
        let descriptor =
            Descriptor::<OrderItem>::resolve(&cols(&["label", "order_item_id"])).unwrap();
        assert_eq!(descriptor.len(), 2);

        let mut item = OrderItem::default();
        descriptor
            .apply(
                &mut item,
                vec![Value::Text("widget".into()), Value::Integer(9)],
            )
            .unwrap();
        assert_eq!(item.order_item_id, 9);
        assert_eq!(item.label, "widget");
    }

    #[test]
    fn test_resolve_unknown_column() {
        let err = Descriptor::<OrderItem>::resolve(&cols(&["unknown_col"])).unwrap_err();
        match err {
            BindError::FieldNotFound { record, column } => {
                assert_eq!(record, "OrderItem");
                assert_eq!(column, "unknown_col");
            }
            other => panic!("Expected FieldNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_non_settable_field() {
        // Hand-rolled registry with a declared but non-settable field.
        #[derive(Debug, Default)]
        struct Audit {
            revision: i64,
        }

        impl Record for Audit {
            const NAME: &'static str = "Audit";
            const FIELDS: &'static [FieldDef<Self>] = &[
                FieldDef {
                    name: "revision",
                    set: Some(|record: &mut Self, value| {
                        record.revision = crate::FromValue::from_value(value)?;
                        Ok(())
                    }),
                },
                FieldDef {
                    name: "checksum",
                    set: None,
                },
            ];
        }

        let err = Descriptor::<Audit>::resolve(&cols(&["checksum"])).unwrap_err();
        match err {
            BindError::FieldNotSettable { record, column } => {
                assert_eq!(record, "Audit");
                assert_eq!(column, "checksum");
            }
            other => panic!("Expected FieldNotSettable, got {other:?}"),
        }

        let descriptor = Descriptor::<Audit>::resolve(&cols(&["revision"])).unwrap();
        let mut audit = Audit::default();
        descriptor.apply(&mut audit, vec![Value::Integer(4)]).unwrap();
        assert_eq!(audit.revision, 4);
    }

    #[test]
    fn test_apply_reports_column_on_conversion_failure() {
        let descriptor = Descriptor::<OrderItem>::resolve(&cols(&["order_item_id"])).unwrap();
        let mut item = OrderItem::default();
        let err = descriptor
            .apply(&mut item, vec![Value::Text("nope".into())])
            .unwrap_err();
        match err {
            BindError::RowScan(msg) => {
                assert!(msg.contains("order_item_id"));
                assert!(msg.contains("TEXT"));
            }
            other => panic!("Expected RowScan, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_rejects_row_length_mismatch() {
        let descriptor =
            Descriptor::<OrderItem>::resolve(&cols(&["order_item_id", "label"])).unwrap();
        let mut item = OrderItem::default();
        let err = descriptor
            .apply(&mut item, vec![Value::Integer(1)])
            .unwrap_err();
        assert!(matches!(err, BindError::RowScan(_)));
    }
}
