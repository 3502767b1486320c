/// Dynamic Value Module
///
/// This module provides the owned value model rows are decoded into before
/// they reach a record field. The variants mirror the SQLite storage
/// classes, and the [`FromValue`] trait performs the final conversion into
/// the concrete field types a record declares.
use thiserror::Error;

/// An owned, dynamically typed value decoded from one result-set cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL
    Null,
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit float
    Real(f64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Blob(Vec<u8>),
}

impl Value {
    /// Returns the storage-class name of the value, used in conversion
    /// error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
            Value::Blob(_) => "BLOB",
        }
    }
}

/// Error produced when a row value refuses to convert into a field type.
#[derive(Debug, Error, PartialEq)]
#[error("cannot convert {found} value into {expected}")]
pub struct ValueError {
    expected: &'static str,
    found: &'static str,
}

impl ValueError {
    /// Creates a conversion error for `value` failing to become `expected`.
    pub fn new(expected: &'static str, value: &Value) -> Self {
        ValueError {
            expected,
            found: value.type_name(),
        }
    }
}

/// Conversion from a dynamically typed row value into a field type.
///
/// Implementations are strict about storage classes: integers only come
/// from `Integer`, text only from `Text`. Two conversions are widened:
/// `f64` accepts `Integer` input, and `bool` reads any non-zero
/// `Integer` as true. `Option<T>` turns `Null` into `None` and delegates
/// everything else.
pub trait FromValue: Sized {
    /// Converts `value` into the implementing type.
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Integer(i) => Ok(i),
            other => Err(ValueError::new("i64", &other)),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Integer(i) => i32::try_from(i).map_err(|_| ValueError {
                expected: "i32",
                found: "INTEGER",
            }),
            other => Err(ValueError::new("i32", &other)),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Real(f) => Ok(f),
            Value::Integer(i) => Ok(i as f64),
            other => Err(ValueError::new("f64", &other)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Integer(i) => Ok(i != 0),
            other => Err(ValueError::new("bool", &other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(ValueError::new("String", &other)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Blob(b) => Ok(b),
            other => Err(ValueError::new("Vec<u8>", &other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_conversions() {
        assert_eq!(i64::from_value(Value::Integer(42)), Ok(42));
        assert_eq!(i32::from_value(Value::Integer(-7)), Ok(-7));
        assert!(i32::from_value(Value::Integer(i64::MAX)).is_err());
    }

    #[test]
    fn test_real_accepts_integer() {
        assert_eq!(f64::from_value(Value::Real(1.5)), Ok(1.5));
        assert_eq!(f64::from_value(Value::Integer(3)), Ok(3.0));
    }

    #[test]
    fn test_bool_from_integer() {
        assert_eq!(bool::from_value(Value::Integer(1)), Ok(true));
        assert_eq!(bool::from_value(Value::Integer(0)), Ok(false));
        assert!(bool::from_value(Value::Text("true".into())).is_err());
    }

    #[test]
    fn test_text_and_blob() {
        assert_eq!(
            String::from_value(Value::Text("ann".into())),
            Ok("ann".to_string())
        );
        assert_eq!(
            Vec::<u8>::from_value(Value::Blob(vec![1, 2, 3])),
            Ok(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_option_handles_null() {
        assert_eq!(Option::<i64>::from_value(Value::Null), Ok(None));
        assert_eq!(Option::<i64>::from_value(Value::Integer(5)), Ok(Some(5)));
        assert!(Option::<i64>::from_value(Value::Text("x".into())).is_err());
    }

    #[test]
    fn test_null_into_plain_type_is_an_error() {
        let err = String::from_value(Value::Null).unwrap_err();
        assert!(err.to_string().contains("NULL"));
        assert!(err.to_string().contains("String"));
    }
}
