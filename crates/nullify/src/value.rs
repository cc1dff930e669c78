//! Dynamically typed values of synthesized types.

use std::fmt;

use crate::metadata::{ScalarKind, TypeDescriptor};

/// Value of a type described by a [`TypeDescriptor`].
///
/// Values are produced by [zero-initialization](Self::zero()) and by the [decoder](crate::de),
/// and are inspected by the [validator](crate::validation).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Unset optional value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer.
    Int(i128),
    /// Unsigned integer (including bytes).
    UInt(u128),
    /// Floating-point number.
    Float(f64),
    /// Complex number.
    Complex {
        /// Real part.
        re: f64,
        /// Imaginary part.
        im: f64,
    },
    /// Text.
    String(String),
    /// Struct with fields in the declaration order.
    Struct(Vec<(String, Value)>),
    /// Fixed-size sequence.
    Array(Vec<Value>),
    /// Variable-size sequence.
    List(Vec<Value>),
    /// Map entries in the insertion order.
    Map(Vec<(Value, Value)>),
    /// Value of an opaque type. Opaque values carry no data.
    Opaque,
}

impl Value {
    /// Creates a zero value of the specified type. For optional types, this is [`Self::Null`].
    pub fn zero(ty: &TypeDescriptor) -> Self {
        match ty {
            TypeDescriptor::Optional(_) => Self::Null,
            TypeDescriptor::Scalar(kind) => Self::zero_scalar(*kind),
            TypeDescriptor::Struct(ty) => Self::Struct(
                ty.fields
                    .iter()
                    .map(|field| (field.name.clone().into_owned(), Self::zero(&field.ty)))
                    .collect(),
            ),
            TypeDescriptor::Array { len, elem } => {
                Self::Array((0..*len).map(|_| Self::zero(elem)).collect())
            }
            TypeDescriptor::List(_) => Self::List(vec![]),
            TypeDescriptor::Map { .. } => Self::Map(vec![]),
            TypeDescriptor::Opaque(_) => Self::Opaque,
        }
    }

    pub(crate) fn zero_scalar(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => Self::Bool(false),
            ScalarKind::String => Self::String(String::new()),
            ScalarKind::F32 | ScalarKind::F64 => Self::Float(0.0),
            ScalarKind::Complex64 | ScalarKind::Complex128 => Self::Complex { re: 0.0, im: 0.0 },
            kind if kind.is_signed_int() => Self::Int(0),
            _ => Self::UInt(0),
        }
    }

    /// Checks whether this value is [null](Self::Null).
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Checks whether this value is equal to the zero value of its type. Null values are considered zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Null | Self::Opaque => true,
            Self::Bool(value) => !value,
            Self::Int(value) => *value == 0,
            Self::UInt(value) => *value == 0,
            Self::Float(value) => *value == 0.0,
            Self::Complex { re, im } => *re == 0.0 && *im == 0.0,
            Self::String(s) => s.is_empty(),
            Self::Struct(fields) => fields.iter().all(|(_, value)| value.is_zero()),
            Self::Array(items) => items.iter().all(Self::is_zero),
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
        }
    }

    /// Gets a struct field by name.
    pub fn field(&self, name: &str) -> Option<&Self> {
        let Self::Struct(fields) = self else {
            return None;
        };
        fields
            .iter()
            .find_map(|(field_name, value)| (field_name == name).then_some(value))
    }

    /// Gets a mutable reference to a struct field by name.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Self> {
        let Self::Struct(fields) = self else {
            return None;
        };
        fields
            .iter_mut()
            .find_map(|(field_name, value)| (field_name == name).then_some(value))
    }

    /// Returns the contained string, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained Boolean value, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the contained integer as `i128`, if the value is an integer that fits.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Int(value) => Some(*value),
            Self::UInt(value) => i128::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Returns the contained number as `f64`, if the value is numeric.
    #[allow(clippy::cast_precision_loss)] // acceptable for numeric comparisons
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::UInt(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the length of a string, a sequence or a map.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::String(s) => Some(s.chars().count()),
            Self::Array(items) | Self::List(items) => Some(items.len()),
            Self::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Returns sequence items, if this value is an array or a list.
    pub fn as_slice(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) | Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Gets a map value by key.
    pub fn get(&self, key: &Self) -> Option<&Self> {
        let Self::Map(entries) = self else {
            return None;
        };
        entries
            .iter()
            .find_map(|(entry_key, value)| (entry_key == key).then_some(value))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::UInt(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value}"),
            Self::Complex { re, im } => write!(formatter, "({re}{im:+}i)"),
            Self::String(s) => write!(formatter, "{s:?}"),
            Self::Struct(fields) => {
                formatter.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    let delimiter = if i == 0 { " " } else { ", " };
                    write!(formatter, "{delimiter}{name}: {value}")?;
                }
                formatter.write_str(if fields.is_empty() { "}" } else { " }" })
            }
            Self::Array(items) | Self::List(items) => {
                formatter.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{item}")?;
                }
                formatter.write_str("]")
            }
            Self::Map(entries) => {
                formatter.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    let delimiter = if i == 0 { " " } else { ", " };
                    write!(formatter, "{delimiter}{key}: {value}")?;
                }
                formatter.write_str(if entries.is_empty() { "}" } else { " }" })
            }
            Self::Opaque => formatter.write_str("<opaque>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Field, StructType};

    #[test]
    fn zero_values() {
        let ty = TypeDescriptor::Struct(StructType::new(
            "Test",
            vec![
                Field::new("int", ScalarKind::I32.into()),
                Field::new("opt", TypeDescriptor::from(ScalarKind::String).optional()),
                Field::new("array", TypeDescriptor::array(2, ScalarKind::Bool.into())),
                Field::new("list", TypeDescriptor::list(ScalarKind::F32.into())),
            ],
        ));
        let value = Value::zero(&ty);
        assert_eq!(value.field("int"), Some(&Value::Int(0)));
        assert_eq!(value.field("opt"), Some(&Value::Null));
        assert_eq!(
            value.field("array"),
            Some(&Value::Array(vec![Value::Bool(false); 2]))
        );
        assert_eq!(value.field("list"), Some(&Value::List(vec![])));
        assert!(value.is_zero());
        assert_eq!(
            value.to_string(),
            "{ int: 0, opt: null, array: [false, false], list: [] }"
        );

        assert_eq!(Value::zero(&ScalarKind::U8.into()), Value::UInt(0));
        assert_eq!(
            Value::zero(&ScalarKind::Complex128.into()),
            Value::Complex { re: 0.0, im: 0.0 }
        );
    }

    #[test]
    fn value_accessors() {
        let mut value = Value::Struct(vec![("name".to_owned(), Value::Null)]);
        *value.field_mut("name").unwrap() = Value::String("test".to_owned());
        assert_eq!(value.field("name").and_then(Value::as_str), Some("test"));
        assert_eq!(value.field("name").and_then(Value::len), Some(4));
        assert!(!value.is_zero());
        assert!(value.field("missing").is_none());

        let map = Value::Map(vec![(Value::String("a".to_owned()), Value::UInt(1))]);
        assert_eq!(
            map.get(&Value::String("a".to_owned())).and_then(Value::as_i128),
            Some(1)
        );
        assert_eq!(Value::Complex { re: 1.0, im: -2.0 }.to_string(), "(1-2i)");
    }
}
