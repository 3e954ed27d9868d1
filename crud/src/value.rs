//! Loosely typed column values and the conversions generated code relies on.

use crate::error::CrudError;

/// A single column value as it moves between a row cursor and a struct
/// member.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Variant name, used in conversion error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Snapshot a struct member as a [`Value`].
///
/// Generated `FieldEnumerator` implementations call this for each annotated
/// member, in declaration order.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Rebuild a struct member from a [`Value`].
///
/// `None` means the value's variant does not carry this type; [`convert`]
/// turns that into a [`CrudError::TypeMismatch`] naming the column.
pub trait FromValue: Sized {
    /// Variant name reported when conversion fails.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

/// Convert a column value into a member type, naming the column on failure.
pub fn convert<T: FromValue>(column: &str, value: &Value) -> Result<T, CrudError> {
    T::from_value(value).ok_or_else(|| CrudError::TypeMismatch {
        column: column.to_string(),
        expected: T::EXPECTED,
        actual: value.kind(),
    })
}

macro_rules! integer_conversions {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }
            }

            impl FromValue for $ty {
                const EXPECTED: &'static str = "integer";

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Integer(raw) => <$ty>::try_from(*raw).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

integer_conversions!(i8, i16, i32, i64, u8, u16, u32);

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(raw) => Some(*raw),
            _ => None,
        }
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Real(*self)
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "real";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Real(raw) => Some(*raw),
            // Integer-typed columns routinely feed real members.
            Value::Integer(raw) => Some(*raw as f64),
            _ => None,
        }
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "text";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(raw) => Some(raw.clone()),
            _ => None,
        }
    }
}

impl ToValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Blob(self.clone())
    }
}

impl FromValue for Vec<u8> {
    const EXPECTED: &'static str = "blob";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Blob(raw) => Some(raw.clone()),
            _ => None,
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}
