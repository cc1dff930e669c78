//! Type descriptors: explicit, owned descriptions of a type's shape.
//!
//! A [`TypeDescriptor`] is a tree over a handful of [kinds](TypeKind): scalars, structs, fixed-size arrays,
//! variable-size lists, maps, optionals and opaque handles. Descriptors are normally obtained via
//! the [`Describe`](crate::Describe) trait (which can be derived for structs), but they can be assembled
//! by hand just as well:
//!
//! ```
//! use nullify::metadata::{Field, ScalarKind, StructType, Tags, TypeDescriptor};
//!
//! let person = TypeDescriptor::Struct(StructType::new(
//!     "Person",
//!     vec![Field::new("name", ScalarKind::String.into()).with_tags(Tags::new().with("json", "name"))],
//! ));
//! assert_eq!(person.to_string(), "Person { name: String }");
//! ```

use std::{borrow::Cow, fmt};


/// Scalar type kinds. Scalars are leaves of a [`TypeDescriptor`] tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ScalarKind {
    /// Boolean value.
    Bool,
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 128-bit signed integer.
    I128,
    /// Pointer-sized signed integer.
    Isize,
    /// Byte, aka 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
    /// 64-bit unsigned integer.
    U64,
    /// 128-bit unsigned integer.
    U128,
    /// Pointer-sized unsigned integer.
    Usize,
    /// Single-precision float.
    F32,
    /// Double-precision float.
    F64,
    /// Complex number with single-precision components.
    Complex64,
    /// Complex number with double-precision components.
    Complex128,
    /// UTF-8 text.
    String,
}

impl ScalarKind {
    /// All scalar kinds.
    pub const ALL: &'static [Self] = &[
        Self::Bool,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::I128,
        Self::Isize,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::U128,
        Self::Usize,
        Self::F32,
        Self::F64,
        Self::Complex64,
        Self::Complex128,
        Self::String,
    ];

    /// Returns the type name as used in Rust code (or a descriptive name for complex numbers).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::String => "String",
        }
    }

    /// Checks whether this is a signed integer kind.
    pub const fn is_signed_int(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::I128 | Self::Isize
        )
    }

    /// Checks whether this is an unsigned integer kind (including bytes).
    pub const fn is_unsigned_int(self) -> bool {
        matches!(
            self,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::U128 | Self::Usize
        )
    }

    /// Checks whether this is a floating-point kind.
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Checks whether this is a complex number kind.
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// Returns the inclusive value range for integer kinds, or `None` for other kinds.
    #[allow(clippy::cast_sign_loss)] // all casted values are non-negative
    pub(crate) fn int_range(self) -> Option<(i128, u128)> {
        Some(match self {
            Self::I8 => (i8::MIN.into(), i8::MAX as u128),
            Self::I16 => (i16::MIN.into(), i16::MAX as u128),
            Self::I32 => (i32::MIN.into(), i32::MAX as u128),
            Self::I64 => (i64::MIN.into(), i64::MAX as u128),
            Self::I128 => (i128::MIN, i128::MAX as u128),
            Self::Isize => (isize::MIN as i128, isize::MAX as u128),
            Self::U8 => (0, u8::MAX.into()),
            Self::U16 => (0, u16::MAX.into()),
            Self::U32 => (0, u32::MAX.into()),
            Self::U64 => (0, u64::MAX.into()),
            Self::U128 => (0, u128::MAX),
            Self::Usize => (0, usize::MAX as u128),
            _ => return None,
        })
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Kind of an [opaque type](OpaqueType).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OpaqueKind {
    /// Channel endpoint (e.g., a sender or a receiver).
    Channel,
    /// Function or closure.
    Function,
    /// Raw pointer or another unsafe handle.
    RawPointer,
    /// Any other type that cannot be looked into.
    Other,
}

/// Type which the transformer treats as a black box.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpaqueType {
    /// Kind of the type.
    pub kind: OpaqueKind,
    /// Name of the type, used for display purposes only.
    pub name: Cow<'static, str>,
}

impl OpaqueType {
    /// Creates an opaque type.
    pub fn new(kind: OpaqueKind, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// Ordered key–value metadata attached to a struct field, such as `json = "name"` or `validate = "required"`.
///
/// Tags are opaque to the transformer and are copied verbatim; the [decoder](crate::de) and
/// the [validator](crate::validation) are the consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Tags(Vec<(Cow<'static, str>, Cow<'static, str>)>);

impl Tags {
    /// Creates empty tags.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a tag. If a tag with the same key is already present, it is overwritten in place.
    #[must_use]
    pub fn with(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        let key = key.into();
        let value = value.into();
        if let Some((_, existing)) = self.0.iter_mut().find(|(k, _)| *k == key) {
            *existing = value;
        } else {
            self.0.push((key, value));
        }
        self
    }

    /// Gets the tag value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find_map(|(k, value)| (k == key).then_some(value.as_ref()))
    }

    /// Iterates over tags in the declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    /// Checks whether there are no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                formatter.write_str(" ")?;
            }
            write!(formatter, "{key}:{value:?}")?;
        }
        Ok(())
    }
}

/// Struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Name of the field in Rust code.
    pub name: Cow<'static, str>,
    /// Field metadata.
    pub tags: Tags,
    /// Field type.
    pub ty: TypeDescriptor,
}

impl Field {
    /// Creates a field without tags.
    pub fn new(name: impl Into<Cow<'static, str>>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            tags: Tags::new(),
            ty,
        }
    }

    /// Sets tags for this field.
    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }
}

/// Struct type with named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    /// Name of the struct.
    pub name: Cow<'static, str>,
    /// Fields in the declaration order.
    pub fields: Vec<Field>,
}

impl StructType {
    /// Creates a struct type.
    pub fn new(name: impl Into<Cow<'static, str>>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Gets a field by its Rust name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Coarse category of a [`TypeDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Scalar.
    Scalar(ScalarKind),
    /// Struct.
    Struct,
    /// Fixed-size sequence.
    Array,
    /// Variable-size sequence.
    List,
    /// Map.
    Map,
    /// Optional indirection.
    Optional,
    /// Opaque type.
    Opaque(OpaqueKind),
}

/// Description of a type's shape.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TypeDescriptor {
    /// Scalar type.
    Scalar(ScalarKind),
    /// Struct with named fields.
    Struct(StructType),
    /// Fixed-size sequence, e.g. `[T; N]`.
    Array {
        /// Number of elements.
        len: usize,
        /// Element type.
        elem: Box<Self>,
    },
    /// Variable-size sequence, e.g. `Vec<T>`.
    List(Box<Self>),
    /// Map, e.g. `HashMap<K, V>`.
    Map {
        /// Key type.
        key: Box<Self>,
        /// Value type.
        value: Box<Self>,
    },
    /// One level of optional indirection, e.g. `Option<T>`.
    Optional(Box<Self>),
    /// Type that cannot be looked into.
    Opaque(OpaqueType),
}

impl From<ScalarKind> for TypeDescriptor {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl From<StructType> for TypeDescriptor {
    fn from(ty: StructType) -> Self {
        Self::Struct(ty)
    }
}

impl From<OpaqueType> for TypeDescriptor {
    fn from(ty: OpaqueType) -> Self {
        Self::Opaque(ty)
    }
}

impl TypeDescriptor {
    /// Creates a fixed-size sequence type.
    pub fn array(len: usize, elem: Self) -> Self {
        Self::Array {
            len,
            elem: Box::new(elem),
        }
    }

    /// Creates a variable-size sequence type.
    pub fn list(elem: Self) -> Self {
        Self::List(Box::new(elem))
    }

    /// Creates a map type.
    pub fn map(key: Self, value: Self) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Wraps this type in one level of optional indirection.
    #[must_use]
    pub fn optional(self) -> Self {
        Self::Optional(Box::new(self))
    }

    /// Returns the kind of this type.
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(kind) => TypeKind::Scalar(*kind),
            Self::Struct(_) => TypeKind::Struct,
            Self::Array { .. } => TypeKind::Array,
            Self::List(_) => TypeKind::List,
            Self::Map { .. } => TypeKind::Map,
            Self::Optional(_) => TypeKind::Optional,
            Self::Opaque(ty) => TypeKind::Opaque(ty.kind),
        }
    }

    /// Checks whether this type is optional.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Returns the number of chained optional levels on top of this type.
    pub fn optional_depth(&self) -> usize {
        let mut depth = 0;
        let mut ty = self;
        while let Self::Optional(inner) = ty {
            depth += 1;
            ty = inner;
        }
        depth
    }

    /// Strips all chained optional levels, returning the first non-optional type.
    pub fn base(&self) -> &Self {
        let mut ty = self;
        while let Self::Optional(inner) = ty {
            ty = inner;
        }
        ty
    }

    /// Strips exactly one optional level, or returns `self` if the type isn't optional.
    #[must_use]
    pub fn into_unwrapped(self) -> Self {
        match self {
            Self::Optional(inner) => *inner,
            other => other,
        }
    }

    /// Returns the struct type if this is a struct.
    pub fn as_struct(&self) -> Option<&StructType> {
        match self {
            Self::Struct(ty) => Some(ty),
            _ => None,
        }
    }

    /// Checks whether this is a byte (possibly behind optionals).
    pub(crate) fn is_byte(&self) -> bool {
        matches!(self.base(), Self::Scalar(ScalarKind::U8))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => fmt::Display::fmt(kind, formatter),
            Self::Struct(ty) => {
                write!(formatter, "{} {{", ty.name)?;
                for (i, field) in ty.fields.iter().enumerate() {
                    let delimiter = if i == 0 { " " } else { ", " };
                    write!(formatter, "{delimiter}{}: {}", field.name, field.ty)?;
                }
                if ty.fields.is_empty() {
                    formatter.write_str("}")
                } else {
                    formatter.write_str(" }")
                }
            }
            Self::Array { len, elem } => write!(formatter, "[{elem}; {len}]"),
            Self::List(elem) => write!(formatter, "Vec<{elem}>"),
            Self::Map { key, value } => write!(formatter, "Map<{key}, {value}>"),
            Self::Optional(inner) => write!(formatter, "Option<{inner}>"),
            Self::Opaque(ty) => formatter.write_str(&ty.name),
        }
    }
}
