//! `nullify` – synthesizes nullable counterparts of types to tell absent fields from zero values.
//!
//! # Overview
//!
//! When decoding external input (e.g., a JSON payload) directly into a strongly typed struct, a missing field
//! and a field explicitly set to a zero value (`0`, `""`, `false`) become indistinguishable. This library
//! takes a [type descriptor](metadata::TypeDescriptor) and [transforms](transform()) it into a structurally identical one
//! where scalars, struct fields and (by [policy](NullifyOptions)) container elements and keys are wrapped
//! into an optional indirection. A zero-valued instance of the synthesized type has every optional leaf
//! unset; after decoding input into it, unset leaves are exactly the absent ones.
//!
//! The original type is never modified.
//!
//! Besides the core transformation, the crate provides reference collaborators:
//!
//! - A [JSON decoder](de) populating [`Value`](value::Value)s of the synthesized type
//! - A [validator](validation) driven by `validate` field tags
//!
//! # Examples
//!
//! ## Basic workflow
//!
//! ```
//! use nullify::{Describe, Nullified, NullifyOptions};
//!
//! #[derive(Describe)]
//! struct Person {
//!     #[describe(tag(json = "name", validate = "required"))]
//!     name: String,
//!     #[describe(tag(json = "age"))]
//!     age: u32,
//! }
//!
//! let mut nullified = Nullified::of::<Person>(&NullifyOptions::default());
//! assert_eq!(
//!     nullified.ty().to_string(),
//!     "Option<Person { name: Option<String>, age: Option<u32> }>"
//! );
//!
//! nullified.decode_json(r#"{ "age": 0 }"#)?;
//! let value = nullified.value();
//! // `age` was explicitly set to 0, while `name` is absent.
//! assert!(value.field("name").unwrap().is_null());
//! assert!(!value.field("age").unwrap().is_null());
//!
//! let err = nullified.validate().unwrap_err();
//! assert_eq!(err.to_string(), "`name` failed on `required`: value is required");
//! # anyhow::Ok(())
//! ```
//!
//! ## Untyped input
//!
//! ```
//! use nullify::{nullify, NullifyOptions, Typed};
//!
//! let options = NullifyOptions::default();
//! assert!(nullify(None, &options).is_none());
//!
//! let value: &dyn Typed = &vec![1_u8, 2, 3];
//! let nullified = nullify(Some(value), &options).unwrap();
//! assert_eq!(nullified.ty().to_string(), "Option<Vec<Option<u8>>>");
//!
//! let options = NullifyOptions::for_payload_decoding();
//! let nullified = nullify(Some(value), &options).unwrap();
//! assert_eq!(nullified.ty().to_string(), "Option<String>");
//! ```

// Documentation settings
#![doc(html_root_url = "https://docs.rs/nullify/0.1.0")]
// Linter settings
#![warn(missing_docs)]

/// Derives the [`Describe`](trait@Describe) trait for a struct with named fields.
///
/// # Container attributes
///
/// ## `rename`
///
/// **Type:** string
///
/// Overrides the struct name recorded in the descriptor. By default, the Rust identifier is used.
///
/// ## `crate`
///
/// **Type:** path
///
/// Path to the `nullify` crate, in case it is re-exported under another name.
///
/// # Field attributes
///
/// ## `tag`
///
/// **Type:** list of `key = "value"` pairs
///
/// Attaches [tags](metadata::Tags) to the field. Tags are copied verbatim to the nullified type;
/// the `json` tag is used by the [decoder](de) and the `validate` tag by the [validator](validation).
/// Can be specified multiple times; a later value for the same key wins.
///
/// ## `skip`
///
/// Excludes the field from the descriptor. The field type doesn't need to implement `Describe`.
///
/// # Generics
///
/// Type params are supported; each type param receives a `Describe` bound.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use nullify::{Describe, metadata::TypeDescriptor};
///
/// #[derive(Describe)]
/// #[describe(rename = "Payload")]
/// struct Envelope<T> {
///     #[describe(tag(json = "body"))]
///     body: T,
///     #[describe(tag(json = "headers", validate = "max=16"))]
///     headers: HashMap<String, String>,
///     #[describe(skip)]
///     received_at: std::time::Instant,
/// }
///
/// let ty = Envelope::<Vec<u8>>::describe();
/// let ty = ty.as_struct().unwrap();
/// assert_eq!(ty.name, "Payload");
/// assert_eq!(ty.fields.len(), 2);
/// assert_eq!(ty.fields[0].tags.get("json"), Some("body"));
/// ```
pub use nullify_derive::Describe;

pub use self::{
    describe::{Describe, Typed},
    error::{DecodeError, DecodeErrorKind},
    options::{NullifyOptions, Override},
    transform::transform,
    validation::ValidationErrors,
};
use self::{metadata::TypeDescriptor, value::Value};

pub mod de;
mod describe;
mod error;
pub mod metadata;
mod options;
#[cfg(test)]
mod testonly;
mod transform;
mod utils;
pub mod validation;
pub mod value;

/// Transforms the type of the provided value and allocates a zero-valued instance of the result.
///
/// Returns `None` if `value` is `None`, i.e., if there is no type to transform.
pub fn nullify(value: Option<&dyn Typed>, options: &NullifyOptions) -> Option<Nullified> {
    let ty = value?.type_descriptor();
    Some(Nullified::new(&ty, options))
}

/// Zero-valued instance of a synthesized (nullified) type.
///
/// The instance corresponds to the [inner type](Self::inner_ty()) of the synthesized optional type; i.e.,
/// `Nullified` plays the role of a reference to the zero value.
#[derive(Debug, Clone, PartialEq)]
pub struct Nullified {
    ty: TypeDescriptor,
    value: Value,
}

impl Nullified {
    /// Transforms the provided type and allocates a zero-valued instance of the result.
    pub fn new(ty: &TypeDescriptor, options: &NullifyOptions) -> Self {
        let ty = transform(ty, options);
        let value = Value::zero(ty.base());
        Self { ty, value }
    }

    /// Same as [`Self::new()`], but for a type implementing [`Describe`].
    pub fn of<T: Describe + ?Sized>(options: &NullifyOptions) -> Self {
        Self::new(&T::describe(), options)
    }

    /// Returns the synthesized type. It is always [optional](TypeDescriptor::Optional).
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    /// Returns the type of the [value](Self::value()), i.e., the synthesized type without the top-level optional.
    pub fn inner_ty(&self) -> &TypeDescriptor {
        self.ty.base()
    }

    /// Returns the value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns a mutable reference to the value.
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Splits this instance into the synthesized type and the value.
    pub fn into_parts(self) -> (TypeDescriptor, Value) {
        (self.ty, self.value)
    }

    /// Decodes a JSON value into this instance, replacing the current value.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON value doesn't correspond to the synthesized type.
    pub fn decode_value(&mut self, json: &serde_json::Value) -> Result<(), DecodeError> {
        self.value = de::decode(self.inner_ty(), json)?;
        Ok(())
    }

    /// Parses and decodes JSON text into this instance, replacing the current value.
    /// Empty (or whitespace-only) input is treated as absent and leaves the value unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON, or if it doesn't correspond to the synthesized type.
    pub fn decode_json(&mut self, json: &str) -> Result<(), DecodeError> {
        if json.trim().is_empty() {
            return Ok(());
        }
        let json: serde_json::Value = serde_json::from_str(json).map_err(DecodeError::syntax)?;
        self.decode_value(&json)
    }

    /// Validates the value using `validate` tags of struct fields.
    ///
    /// # Errors
    ///
    /// Returns all encountered validation errors.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validation::validate(self.inner_ty(), &self.value)
    }
}

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
