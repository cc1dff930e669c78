//! Reference validator driven by `validate` field tags.
//!
//! # Overview
//!
//! Rules are read from the `validate` [tag](crate::metadata::Tags) of struct fields as a comma-separated list,
//! e.g. `validate = "omitnil,email"`. Rules are evaluated left to right, and evaluation for a field stops
//! at its first failed rule. All fields are validated (validation doesn't stop at the first error),
//! recursing into nested structs, sequences and map values.
//!
//! | Rule | Meaning |
//! |------|---------|
//! | `required` | Value must be present, i.e. not null. Non-optional values must not be zero. |
//! | `omitnil` | If the value is null, skip the remaining rules. |
//! | `email` | Value must be an email address. |
//! | `uuid` | Value must be a hyphenated UUID. |
//! | `min=N` | Number must be at least `N`; for strings, sequences and maps, the length must be at least `N`. |
//! | `max=N` | Same as `min`, but for the upper bound. |
//! | `len=N` | Length must be exactly `N`. |
//!
//! Other rules fail for null values, so absent optional fields must be guarded with a leading `omitnil`.
//!
//! # Examples
//!
//! ```
//! use nullify::{Describe, Nullified, NullifyOptions};
//!
//! #[derive(Describe)]
//! struct Request {
//!     #[describe(tag(json = "optional", validate = "omitnil,email"))]
//!     optional: String,
//!     #[describe(tag(json = "required", validate = "required,uuid"))]
//!     required: String,
//! }
//!
//! let mut request = Nullified::of::<Request>(&NullifyOptions::default());
//! request.decode_json(r#"{ "required": "89ec270d-8256-4b0e-b25c-39564b10f29e" }"#)?;
//! request.validate()?;
//!
//! request.decode_json(r#"{ "required": "invalid", "optional": "test@example.com" }"#)?;
//! let errors = request.validate().unwrap_err();
//! assert_eq!(errors.len(), 1);
//! let err = errors.iter().next().unwrap();
//! assert_eq!(err.path(), "required");
//! assert_eq!(err.rule(), "uuid");
//! # anyhow::Ok(())
//! ```

use std::fmt;

use crate::{
    metadata::{StructType, TypeDescriptor},
    utils::{join_path, serialized_name},
    value::Value,
};

#[cfg(test)]
mod tests;

/// Error validating a single value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    path: String,
    rule: String,
    message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "`{}` failed on `{}`: {}",
            self.path, self.rule, self.message
        )
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Returns a dot-separated path to the value in serialized input (i.e., using `json` tag names).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the failed rule, e.g. `required` or `max=10`.
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Returns a human-readable error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Collection of [`ValidationError`]s. Guaranteed to be non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                formatter.write_str("; ")?;
            }
            fmt::Display::fmt(err, formatter)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    /// Returns the number of errors.
    #[allow(clippy::len_without_is_empty)] // never empty
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over errors in the order they were encountered.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ValidationError> + '_ {
        self.errors.iter()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Validates a value of the specified type.
///
/// # Errors
///
/// Returns all encountered validation errors.
pub fn validate(ty: &TypeDescriptor, value: &Value) -> Result<(), ValidationErrors> {
    let mut validator = Validator::default();
    validator.visit(ty, value, "");
    if validator.errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors {
            errors: validator.errors,
        })
    }
}

#[derive(Debug)]
enum RuleOutcome {
    Continue,
    Skip,
}

#[derive(Debug, Default)]
struct Validator {
    errors: Vec<ValidationError>,
}

impl Validator {
    fn visit(&mut self, ty: &TypeDescriptor, value: &Value, path: &str) {
        match (ty.base(), value) {
            (TypeDescriptor::Struct(ty), Value::Struct(_)) => self.visit_struct(ty, value, path),
            (
                TypeDescriptor::Array { elem, .. } | TypeDescriptor::List(elem),
                Value::Array(items) | Value::List(items),
            ) => {
                for (i, item) in items.iter().enumerate() {
                    self.visit(elem, item, &join_path(path, &i.to_string()));
                }
            }
            (TypeDescriptor::Map { value: value_ty, .. }, Value::Map(entries)) => {
                for (key, entry) in entries {
                    self.visit(value_ty, entry, &join_path(path, &key_segment(key)));
                }
            }
            _ => { /* leaf or null value */ }
        }
    }

    fn visit_struct(&mut self, ty: &StructType, value: &Value, path: &str) {
        for field in &ty.fields {
            let Some(field_value) = value.field(&field.name) else {
                continue;
            };
            let field_path = join_path(path, serialized_name(field).unwrap_or(&*field.name));
            if let Some(rules) = field.tags.get("validate") {
                self.check_rules(rules, &field.ty, field_value, &field_path);
            }
            self.visit(&field.ty, field_value, &field_path);
        }
    }

    fn check_rules(&mut self, rules: &str, ty: &TypeDescriptor, value: &Value, path: &str) {
        let rules = rules.split(',').map(str::trim).filter(|rule| !rule.is_empty());
        for rule in rules {
            match check_rule(rule, ty, value) {
                Ok(RuleOutcome::Continue) => { /* proceed to the next rule */ }
                Ok(RuleOutcome::Skip) => break,
                Err(message) => {
                    tracing::debug!(path, rule, error = message.as_str(), "validation failed");
                    self.errors.push(ValidationError {
                        path: path.to_owned(),
                        rule: rule.to_owned(),
                        message,
                    });
                    break;
                }
            }
        }
    }
}

fn key_segment(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn check_rule(rule: &str, ty: &TypeDescriptor, value: &Value) -> Result<RuleOutcome, String> {
    let (name, arg) = rule
        .split_once('=')
        .map_or((rule, None), |(name, arg)| (name, Some(arg)));

    match name {
        "required" => {
            let is_missing = if ty.is_optional() {
                value.is_null()
            } else {
                value.is_zero()
            };
            return if is_missing {
                Err("value is required".to_owned())
            } else {
                Ok(RuleOutcome::Continue)
            };
        }
        "omitnil" => {
            return Ok(if value.is_null() {
                RuleOutcome::Skip
            } else {
                RuleOutcome::Continue
            });
        }
        "email" | "uuid" | "min" | "max" | "len" => { /* checked below */ }
        _ => return Err(format!("unknown validation rule `{name}`")),
    }

    if value.is_null() {
        return Err("value is absent".to_owned());
    }
    let result = match (name, arg) {
        ("email", None) => check_email(value),
        ("uuid", None) => check_uuid(value),
        ("min" | "max" | "len", Some(arg)) => check_bound(name, arg, value),
        _ => Err(format!("invalid use of validation rule `{name}`")),
    };
    result.map(|()| RuleOutcome::Continue)
}

fn check_email(value: &Value) -> Result<(), String> {
    let s = value.as_str().ok_or("email validation requires a string")?;
    let is_valid = s.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !s.contains(char::is_whitespace)
    });
    if is_valid {
        Ok(())
    } else {
        Err(format!("{s:?} is not a valid email address"))
    }
}

fn check_uuid(value: &Value) -> Result<(), String> {
    let s = value.as_str().ok_or("UUID validation requires a string")?;
    // Only the canonical hyphenated form is accepted
    if s.len() == 36 && uuid::Uuid::parse_str(s).is_ok() {
        Ok(())
    } else {
        Err(format!("{s:?} is not a valid UUID"))
    }
}

fn check_bound(name: &str, arg: &str, value: &Value) -> Result<(), String> {
    let bound: f64 = arg
        .parse()
        .map_err(|_| format!("invalid bound `{arg}` for rule `{name}`"))?;
    #[allow(clippy::cast_precision_loss)] // lengths are small
    let (actual, what) = if let Some(len) = value.len() {
        (len as f64, "length")
    } else if let Some(number) = value.as_f64() {
        (number, "value")
    } else {
        return Err(format!("rule `{name}` is not applicable to {value}"));
    };

    let is_valid = match name {
        "min" => actual >= bound,
        "max" => actual <= bound,
        _ => (actual - bound).abs() < f64::EPSILON,
    };
    if is_valid {
        Ok(())
    } else {
        let relation = match name {
            "min" => "at least",
            "max" => "at most",
            _ => "exactly",
        };
        Err(format!("{what} {actual} must be {relation} {arg}"))
    }
}
