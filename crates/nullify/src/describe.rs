//! Describing Rust types as [`TypeDescriptor`]s.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    rc::Rc,
    sync::{Arc, mpsc},
};

use crate::metadata::{OpaqueKind, OpaqueType, ScalarKind, TypeDescriptor};

/// Type with a known [descriptor](TypeDescriptor).
///
/// # Implementations
///
/// `Describe` is implemented for:
///
/// - `bool`, signed and unsigned integers of all widths, `f32`, `f64`
/// - [`String`], `str` and `Cow<'_, str>` (all described as text)
/// - [`Option`] (described as an optional indirection)
/// - References, [`Box`], [`Rc`] and [`Arc`] (transparent, i.e. described as the wrapped type)
/// - Arrays `[T; N]` (fixed-size sequences)
/// - [`Vec`], [`VecDeque`], slices, [`HashSet`] and [`BTreeSet`] (variable-size sequences)
/// - [`HashMap`] and [`BTreeMap`] (maps)
/// - Raw pointers, [`mpsc`] channel endpoints and function pointers (opaque types)
///
/// No Rust type is described as [`ScalarKind::Complex64`] or [`ScalarKind::Complex128`]; these kinds
/// only occur in manually built descriptors.
///
/// For structs with named fields, `Describe` can be [derived](macro@crate::Describe).
pub trait Describe {
    /// Returns the descriptor for this type.
    fn describe() -> TypeDescriptor;
}

/// Object-safe counterpart of [`Describe`] allowing to get a type descriptor from a value.
///
/// This trait is blanket-implemented for all types implementing [`Describe`].
pub trait Typed {
    /// Returns the descriptor of this value's type.
    fn type_descriptor(&self) -> TypeDescriptor;
}

impl<T: Describe + ?Sized> Typed for T {
    fn type_descriptor(&self) -> TypeDescriptor {
        T::describe()
    }
}

macro_rules! impl_describe_scalar {
    ($($ty:ty => $kind:ident),+ $(,)?) => {
        $(
        impl Describe for $ty {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::Scalar(ScalarKind::$kind)
            }
        }
        )+
    };
}

impl_describe_scalar!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
    str => String,
    Cow<'_, str> => String,
);

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDescriptor {
        T::describe().optional()
    }
}

macro_rules! impl_describe_transparent {
    ($($wrapper:ident),+) => {
        $(
        impl<T: Describe + ?Sized> Describe for $wrapper<T> {
            fn describe() -> TypeDescriptor {
                T::describe()
            }
        }
        )+
    };
}

impl_describe_transparent!(Box, Rc, Arc);

impl<T: Describe + ?Sized> Describe for &T {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::array(N, T::describe())
    }
}

impl<T: Describe> Describe for [T] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list(T::describe())
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list(T::describe())
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list(T::describe())
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list(T::describe())
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list(T::describe())
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(K::describe(), V::describe())
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(K::describe(), V::describe())
    }
}

fn opaque<T: ?Sized>(kind: OpaqueKind) -> TypeDescriptor {
    OpaqueType::new(kind, std::any::type_name::<T>()).into()
}

impl<T: ?Sized> Describe for *const T {
    fn describe() -> TypeDescriptor {
        opaque::<Self>(OpaqueKind::RawPointer)
    }
}

impl<T: ?Sized> Describe for *mut T {
    fn describe() -> TypeDescriptor {
        opaque::<Self>(OpaqueKind::RawPointer)
    }
}

impl<T> Describe for mpsc::Sender<T> {
    fn describe() -> TypeDescriptor {
        opaque::<Self>(OpaqueKind::Channel)
    }
}

impl<T> Describe for mpsc::SyncSender<T> {
    fn describe() -> TypeDescriptor {
        opaque::<Self>(OpaqueKind::Channel)
    }
}

impl<T> Describe for mpsc::Receiver<T> {
    fn describe() -> TypeDescriptor {
        opaque::<Self>(OpaqueKind::Channel)
    }
}

macro_rules! impl_describe_fn {
    ($(($($arg:ident),*)),+) => {
        $(
        impl<R, $($arg,)*> Describe for fn($($arg),*) -> R {
            fn describe() -> TypeDescriptor {
                opaque::<Self>(OpaqueKind::Function)
            }
        }
        )+
    };
}

impl_describe_fn!((), (A), (A, B), (A, B, C));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::TypeKind;

    #[test]
    fn describing_std_types() {
        assert_eq!(u64::describe(), TypeDescriptor::Scalar(ScalarKind::U64));
        assert_eq!(<&str>::describe().to_string(), "String");
        assert_eq!(Box::<str>::describe().to_string(), "String");
        assert_eq!(Option::<Arc<i32>>::describe().to_string(), "Option<i32>");
        assert_eq!(<[bool; 3]>::describe().to_string(), "[bool; 3]");
        assert_eq!(Vec::<Vec<u8>>::describe().to_string(), "Vec<Vec<u8>>");
        assert_eq!(
            HashMap::<String, Option<f64>>::describe().to_string(),
            "Map<String, Option<f64>>"
        );
        assert_eq!(
            BTreeSet::<u16>::describe(),
            TypeDescriptor::list(ScalarKind::U16.into())
        );
    }

    #[test]
    fn describing_opaque_types() {
        let ty = mpsc::Sender::<u32>::describe();
        assert_eq!(ty.kind(), TypeKind::Opaque(OpaqueKind::Channel));
        let ty = <*const u8>::describe();
        assert_eq!(ty.kind(), TypeKind::Opaque(OpaqueKind::RawPointer));
        let ty = <fn(u32) -> bool>::describe();
        assert_eq!(ty.kind(), TypeKind::Opaque(OpaqueKind::Function));
        assert!(ty.to_string().starts_with("fn("), "{ty}");
    }

    #[test]
    fn describing_values_via_typed() {
        let values: [&dyn Typed; 3] = [&1_u8, &"test", &vec![1.0_f32]];
        let descriptions: Vec<_> = values
            .iter()
            .map(|value| value.type_descriptor().to_string())
            .collect();
        assert_eq!(descriptions, ["u8", "String", "Vec<f32>"]);
    }
}
