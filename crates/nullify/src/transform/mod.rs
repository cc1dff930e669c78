//! Recursive type transformation.
//!
//! # Rules
//!
//! Each type is mapped to an *optional* counterpart:
//!
//! | Input | Output |
//! |-------|--------|
//! | scalar `T` | `Option<T>` |
//! | struct | `Option<_>` of a struct with the same name, field names and tags, with each field type transformed |
//! | `[T; N]` | `Option<[T'; N]>`, where `T'` is `T` transformed and then wrapped / unwrapped per [`NullifyOptions::wrap_array_elements`] |
//! | `Vec<T>` | `Option<Vec<T'>>`, same as arrays, but governed by [`NullifyOptions::wrap_list_elements`] |
//! | `Map<K, V>` | `Option<Map<K', V'>>`, with keys and values governed by [`NullifyOptions::wrap_map_keys`] and [`NullifyOptions::wrap_map_values`] |
//! | `Option<Option<.. T>>` | transformed `T`, i.e. optionals of any depth are flattened to a single level |
//! | opaque `T` | `Option<T>` |
//!
//! If [`NullifyOptions::bytes_as_text`] is set, byte arrays and lists (including ones with optional bytes)
//! are collapsed to `Option<String>`; this check precedes the element wrapping switches.

use crate::{
    metadata::{Field, ScalarKind, StructType, TypeDescriptor},
    options::NullifyOptions,
};


/// Transforms the type into its nullable counterpart according to the provided policy.
///
/// The returned type is always [optional](TypeDescriptor::Optional) with exactly one level of indirection.
/// The input type is not modified.
///
/// # Examples
///
/// ```
/// use nullify::{transform, Describe, NullifyOptions};
/// # use std::collections::HashMap;
///
/// let options = NullifyOptions::default();
/// let ty = transform(&<[String; 1]>::describe(), &options);
/// assert_eq!(ty.to_string(), "Option<[Option<String>; 1]>");
///
/// let ty = transform(&HashMap::<String, i64>::describe(), &options);
/// assert_eq!(ty.to_string(), "Option<Map<Option<String>, Option<i64>>>");
///
/// let options = NullifyOptions::for_payload_decoding();
/// let ty = transform(&Vec::<u8>::describe(), &options);
/// assert_eq!(ty.to_string(), "Option<String>");
/// ```
pub fn transform(ty: &TypeDescriptor, options: &NullifyOptions) -> TypeDescriptor {
    Transformer { options }.transform(ty)
}

#[derive(Debug, Clone, Copy)]
enum Container {
    Array,
    List,
}

#[derive(Debug)]
struct Transformer<'a> {
    options: &'a NullifyOptions,
}

impl Transformer<'_> {
    fn transform(&self, ty: &TypeDescriptor) -> TypeDescriptor {
        match ty {
            TypeDescriptor::Struct(ty) => {
                TypeDescriptor::Struct(self.transform_struct(ty)).optional()
            }
            TypeDescriptor::Array { len, elem } => {
                if let Some(text) = self.collapse_bytes(elem) {
                    return text;
                }
                let elem = self.transform_constituent(elem, self.wraps(Container::Array));
                TypeDescriptor::array(*len, elem).optional()
            }
            TypeDescriptor::List(elem) => {
                if let Some(text) = self.collapse_bytes(elem) {
                    return text;
                }
                let elem = self.transform_constituent(elem, self.wraps(Container::List));
                TypeDescriptor::list(elem).optional()
            }
            TypeDescriptor::Map { key, value } => {
                let key = self.transform_constituent(key, self.options.wrap_map_keys);
                let value = self.transform_constituent(value, self.options.wrap_map_values);
                TypeDescriptor::map(key, value).optional()
            }
            TypeDescriptor::Optional(_) => {
                let base = ty.base();
                tracing::trace!(depth = ty.optional_depth(), %base, "flattening optional chain");
                self.transform(base)
            }
            TypeDescriptor::Scalar(_) | TypeDescriptor::Opaque(_) => ty.clone().optional(),
        }
    }

    fn transform_struct(&self, ty: &StructType) -> StructType {
        let _span = tracing::trace_span!("transform_struct", name = %ty.name).entered();
        let fields = ty
            .fields
            .iter()
            .map(|field| Field {
                name: field.name.clone(),
                tags: field.tags.clone(),
                ty: self.transform(&field.ty),
            })
            .collect();
        StructType::new(ty.name.clone(), fields)
    }

    fn wraps(&self, container: Container) -> bool {
        match container {
            Container::Array => self.options.wrap_array_elements,
            Container::List => self.options.wrap_list_elements,
        }
    }

    fn collapse_bytes(&self, elem: &TypeDescriptor) -> Option<TypeDescriptor> {
        if self.options.bytes_as_text && elem.is_byte() {
            tracing::trace!("collapsing byte sequence to text");
            Some(TypeDescriptor::Scalar(ScalarKind::String).optional())
        } else {
            None
        }
    }

    /// Every transformation output is optional, so `wrap == false` strips exactly one level.
    fn transform_constituent(&self, ty: &TypeDescriptor, wrap: bool) -> TypeDescriptor {
        let transformed = self.transform(ty);
        debug_assert!(transformed.is_optional(), "{transformed}");
        if wrap {
            transformed
        } else {
            transformed.into_unwrapped()
        }
    }
}
