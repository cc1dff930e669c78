//! Reference JSON decoder for synthesized types.
//!
//! # How it works
//!
//! Input is parsed into a [`serde_json::Value`] first; the value is then converted into a [`Value`]
//! guided by a [`TypeDescriptor`]. Conversion follows the descriptor rather than the input, so that
//! absent struct fields are left at their [zero value](Value::zero()), which is [`Value::Null`] for optional fields.
//!
//! - Struct fields are matched by the `json` [tag](crate::metadata::Tags) (the part before the first comma),
//!   or by the Rust field name if the tag is absent or has an empty name. Fields tagged `json = "-"` are skipped.
//!   An exact key match is preferred; otherwise, the first key equal to the name ignoring case is used.
//!   Unknown input fields are ignored.
//! - `null` decodes to [`Value::Null`] for optional types, and to the zero value for other types.
//! - Integers are range-checked according to their width; 128-bit integers are decoded without precision loss.
//!   Complex numbers are encoded as `[re, im]` pairs.
//! - Map keys are decoded from object keys; string, integer and Boolean keys are supported.
//! - Opaque types only accept `null`.
//!
//! # Examples
//!
//! ```
//! use nullify::{de, metadata::{ScalarKind, TypeDescriptor}};
//! # use nullify::value::Value;
//!
//! let ty = TypeDescriptor::list(TypeDescriptor::from(ScalarKind::U8).optional());
//! let value = de::decode(&ty, &serde_json::json!([1, null, 3]))?;
//! assert_eq!(value, Value::List(vec![Value::UInt(1), Value::Null, Value::UInt(3)]));
//!
//! let err = de::decode(&ty, &serde_json::json!([1, 256])).unwrap_err();
//! assert_eq!(err.path(), "1");
//! assert_eq!(err.to_string(), "error at `1`: number 256 is out of range for `u8`");
//! # anyhow::Ok(())
//! ```

use serde_json::Value as Json;

use crate::{
    error::{DecodeError, DecodeErrorKind},
    metadata::{ScalarKind, StructType, TypeDescriptor},
    utils::{join_path, serialized_name},
    value::Value,
};


/// Decodes a JSON value according to the provided type.
///
/// # Errors
///
/// Returns an error if the JSON value doesn't correspond to the type.
pub fn decode(ty: &TypeDescriptor, json: &Json) -> Result<Value, DecodeError> {
    Decoder { path: String::new() }.decode(ty, json)
}

/// Finds an object key matching the field name, preferring an exact match over a case-insensitive one.
fn find_key<'a>(
    object: &'a serde_json::Map<String, Json>,
    name: &str,
) -> Option<(&'a str, &'a Json)> {
    if let Some((key, value)) = object.get_key_value(name) {
        return Some((key.as_str(), value));
    }
    object
        .iter()
        .find(|(key, _)| eq_ignore_case(key, name))
        .map(|(key, value)| (key.as_str(), value))
}

fn eq_ignore_case(lhs: &str, rhs: &str) -> bool {
    lhs.chars()
        .flat_map(char::to_lowercase)
        .eq(rhs.chars().flat_map(char::to_lowercase))
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}

fn json_type(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "Boolean",
        Json::Number(number) if number.is_f64() => "floating-point number",
        Json::Number(_) => "integer",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

#[derive(Debug)]
struct Decoder {
    path: String,
}

impl Decoder {
    fn child(&self, segment: &str) -> Self {
        Self {
            path: join_path(&self.path, segment),
        }
    }

    fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(kind, &self.path)
    }

    fn invalid_type(&self, expected: impl ToString, json: &Json) -> DecodeError {
        self.error(DecodeErrorKind::InvalidType {
            expected: expected.to_string(),
            actual: json_type(json),
        })
    }

    fn decode(&self, ty: &TypeDescriptor, json: &Json) -> Result<Value, DecodeError> {
        if json.is_null() {
            return Ok(Value::zero(ty));
        }

        Ok(match ty {
            TypeDescriptor::Optional(inner) => self.decode(inner, json)?,
            TypeDescriptor::Scalar(kind) => self.decode_scalar(*kind, json)?,
            TypeDescriptor::Struct(ty) => self.decode_struct(ty, json)?,
            TypeDescriptor::Array { len, elem } => {
                let items = self.decode_items(elem, json, "array")?;
                if items.len() != *len {
                    return Err(self.error(DecodeErrorKind::InvalidLength {
                        expected: *len,
                        actual: items.len(),
                    }));
                }
                Value::Array(items)
            }
            TypeDescriptor::List(elem) => Value::List(self.decode_items(elem, json, "array")?),
            TypeDescriptor::Map {
                key: key_ty,
                value: value_ty,
            } => {
                let Json::Object(object) = json else {
                    return Err(self.invalid_type("object", json));
                };
                let entries = object.iter().map(|(raw_key, raw_value)| {
                    let child = self.child(raw_key);
                    let key = child.decode_key(key_ty, raw_key)?;
                    Ok::<_, DecodeError>((key, child.decode(value_ty, raw_value)?))
                });
                Value::Map(entries.collect::<Result<_, DecodeError>>()?)
            }
            TypeDescriptor::Opaque(_) => return Err(self.invalid_type("null", json)),
        })
    }

    fn decode_items(
        &self,
        elem: &TypeDescriptor,
        json: &Json,
        expected: &str,
    ) -> Result<Vec<Value>, DecodeError> {
        let Json::Array(items) = json else {
            return Err(self.invalid_type(expected, json));
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.child(&i.to_string()).decode(elem, item))
            .collect()
    }

    fn decode_struct(&self, ty: &StructType, json: &Json) -> Result<Value, DecodeError> {
        let Json::Object(object) = json else {
            return Err(self.invalid_type(format_args!("struct `{}`", ty.name), json));
        };

        let mut fields = Vec::with_capacity(ty.fields.len());
        let mut matched_keys = Vec::with_capacity(ty.fields.len());
        for field in &ty.fields {
            let Some(name) = serialized_name(field) else {
                fields.push((field.name.clone().into_owned(), Value::zero(&field.ty)));
                continue;
            };
            let value = match find_key(object, name) {
                Some((key, raw_value)) => {
                    matched_keys.push(key);
                    self.child(key).decode(&field.ty, raw_value)?
                }
                None => Value::zero(&field.ty),
            };
            fields.push((field.name.clone().into_owned(), value));
        }

        for unknown_name in object.keys().filter(|name| !matched_keys.contains(&name.as_str())) {
            tracing::debug!(
                path = self.path.as_str(),
                name = unknown_name.as_str(),
                ty = %ty.name,
                "ignoring unknown field"
            );
        }
        Ok(Value::Struct(fields))
    }

    fn decode_scalar(&self, kind: ScalarKind, json: &Json) -> Result<Value, DecodeError> {
        match (kind, json) {
            (ScalarKind::Bool, Json::Bool(value)) => Ok(Value::Bool(*value)),
            (ScalarKind::String, Json::String(s)) => Ok(Value::String(s.clone())),
            (ScalarKind::F32 | ScalarKind::F64, Json::Number(number)) => {
                // `as_f64()` fails for numbers that overflow `f64`
                let value = number
                    .as_f64()
                    .ok_or_else(|| self.invalid_type(kind, json))?;
                Ok(Value::Float(value))
            }
            (_, Json::Number(number)) if kind.int_range().is_some() => {
                self.decode_int(kind, number)
            }
            (ScalarKind::Complex64 | ScalarKind::Complex128, Json::Array(parts)) => {
                let [Json::Number(re), Json::Number(im)] = parts.as_slice() else {
                    return Err(self.invalid_type("[re, im] pair of numbers", json));
                };
                let (Some(re), Some(im)) = (re.as_f64(), im.as_f64()) else {
                    return Err(self.invalid_type("[re, im] pair of numbers", json));
                };
                Ok(Value::Complex { re, im })
            }
            _ => Err(self.invalid_type(kind, json)),
        }
    }

    fn decode_int(
        &self,
        kind: ScalarKind,
        number: &serde_json::Number,
    ) -> Result<Value, DecodeError> {
        let value = if let Some(value) = number.as_u64() {
            Value::UInt(value.into())
        } else if let Some(value) = number.as_i64() {
            Value::Int(value.into())
        } else {
            // Integers beyond 64 bits are only available as text
            let text = number.to_string();
            if let Ok(value) = text.parse::<u128>() {
                Value::UInt(value)
            } else if let Ok(value) = text.parse::<i128>() {
                Value::Int(value)
            } else if is_integer_literal(&text) {
                return Err(self.error(DecodeErrorKind::OutOfRange {
                    number: text,
                    expected: kind.to_string(),
                }));
            } else {
                return Err(self.error(DecodeErrorKind::InvalidType {
                    expected: kind.to_string(),
                    actual: "floating-point number",
                }));
            }
        };
        self.check_int_range(kind, value, || number.to_string())
    }

    /// Checks that the value fits into `kind`, and normalizes it to `Value::Int` for signed kinds
    /// and `Value::UInt` for unsigned ones.
    fn check_int_range(
        &self,
        kind: ScalarKind,
        value: Value,
        number: impl FnOnce() -> String,
    ) -> Result<Value, DecodeError> {
        let (min, max) = kind.int_range().unwrap_or((0, 0));
        let normalized = match value {
            Value::UInt(value) if value <= max => {
                if kind.is_signed_int() {
                    i128::try_from(value).ok().map(Value::Int)
                } else {
                    Some(Value::UInt(value))
                }
            }
            Value::Int(value) if value >= min && kind.is_signed_int() => {
                u128::try_from(value).map_or(Some(Value::Int(value)), |unsigned| {
                    (unsigned <= max).then_some(Value::Int(value))
                })
            }
            _ => None,
        };
        normalized.ok_or_else(|| {
            self.error(DecodeErrorKind::OutOfRange {
                number: number(),
                expected: kind.to_string(),
            })
        })
    }

    fn decode_key(&self, ty: &TypeDescriptor, raw_key: &str) -> Result<Value, DecodeError> {
        let invalid_key = || {
            self.error(DecodeErrorKind::InvalidKey {
                key: raw_key.to_owned(),
                expected: ty.to_string(),
            })
        };

        let TypeDescriptor::Scalar(kind) = ty.base() else {
            return Err(invalid_key());
        };
        let kind = *kind;
        match kind {
            ScalarKind::String => Ok(Value::String(raw_key.to_owned())),
            ScalarKind::Bool => raw_key.parse().map(Value::Bool).map_err(|_| invalid_key()),
            _ if kind.is_signed_int() => {
                let value: i128 = raw_key.parse().map_err(|_| invalid_key())?;
                self.check_int_range(kind, Value::Int(value), || raw_key.to_owned())
            }
            _ if kind.is_unsigned_int() => {
                let value: u128 = raw_key.parse().map_err(|_| invalid_key())?;
                self.check_int_range(kind, Value::UInt(value), || raw_key.to_owned())
            }
            _ => Err(invalid_key()),
        }
    }
}
