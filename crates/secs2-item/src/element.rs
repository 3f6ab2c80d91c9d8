//! Typed access to array item elements.
//!
//! [`Element`] links a Rust primitive to the array formats that store it, so
//! generic accessors such as [`crate::Item::values`] can hand out a typed view
//! of the backing buffer without reinterpreting memory. Asking for a type that
//! does not belong to the item's format is reported as
//! [`crate::ItemError::ElementMismatch`].

use crate::ArrayItem;
use bytes::{Buf, BufMut};

/// A primitive that can be stored in an [`ArrayItem`].
///
/// Implemented for `bool`, `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`,
/// `i64`, `f32` and `f64`. `u8` is the element type of both `Binary` and `U1`.
pub trait Element: Copy + PartialEq + std::fmt::Debug + 'static {
    /// Size of one element on the wire.
    const WIDTH: usize;

    /// Rust type name, used in error messages.
    const TYPE_NAME: &'static str;

    /// Borrow the elements if `array` stores this type.
    fn slice(array: &ArrayItem) -> Option<&[Self]>;

    /// Mutably borrow the elements if `array` stores this type.
    fn slice_mut(array: &mut ArrayItem) -> Option<&mut [Self]>;

    /// Write one element in network byte order.
    fn put<B: BufMut>(self, buf: &mut B);

    /// Read one element in network byte order.
    ///
    /// `chunk` must hold exactly `WIDTH` bytes.
    fn get(chunk: &[u8]) -> Self;

    /// Write all elements in network byte order.
    fn put_all<B: BufMut>(values: &[Self], buf: &mut B) {
        for &value in values {
            value.put(buf);
        }
    }

    /// Read a whole payload. `payload.len()` must be a multiple of `WIDTH`.
    fn get_all(payload: &[u8]) -> Vec<Self> {
        payload.chunks_exact(Self::WIDTH).map(Self::get).collect()
    }

    /// Value equality used by item comparison.
    fn same(a: Self, b: Self) -> bool {
        a == b
    }
}

macro_rules! impl_element {
    ($ty:ident, $width:expr, $put:ident, $get:ident, $($variant:ident)|+) => {
        impl Element for $ty {
            const WIDTH: usize = $width;
            const TYPE_NAME: &'static str = stringify!($ty);

            fn slice(array: &ArrayItem) -> Option<&[Self]> {
                match array {
                    $(ArrayItem::$variant(values))|+ => Some(values.as_slice()),
                    _ => None,
                }
            }

            fn slice_mut(array: &mut ArrayItem) -> Option<&mut [Self]> {
                match array {
                    $(ArrayItem::$variant(values))|+ => Some(values.as_mut_slice()),
                    _ => None,
                }
            }

            fn put<B: BufMut>(self, buf: &mut B) {
                buf.$put(self);
            }

            fn get(mut chunk: &[u8]) -> Self {
                chunk.$get()
            }

            impl_element!(@float $ty);
        }
    };
    (@float f32) => {
        fn same(a: Self, b: Self) -> bool {
            a == b || (a.is_nan() && b.is_nan())
        }
    };
    (@float f64) => {
        fn same(a: Self, b: Self) -> bool {
            a == b || (a.is_nan() && b.is_nan())
        }
    };
    (@float $ty:ident) => {};
}

impl_element!(i8, 1, put_i8, get_i8, I1);
impl_element!(u16, 2, put_u16, get_u16, U2);
impl_element!(i16, 2, put_i16, get_i16, I2);
impl_element!(u32, 4, put_u32, get_u32, U4);
impl_element!(i32, 4, put_i32, get_i32, I4);
impl_element!(u64, 8, put_u64, get_u64, U8);
impl_element!(i64, 8, put_i64, get_i64, I8);
impl_element!(f32, 4, put_f32, get_f32, F4);
impl_element!(f64, 8, put_f64, get_f64, F8);

impl Element for u8 {
    const WIDTH: usize = 1;
    const TYPE_NAME: &'static str = "u8";

    fn slice(array: &ArrayItem) -> Option<&[Self]> {
        match array {
            ArrayItem::Binary(values) | ArrayItem::U1(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    fn slice_mut(array: &mut ArrayItem) -> Option<&mut [Self]> {
        match array {
            ArrayItem::Binary(values) | ArrayItem::U1(values) => Some(values.as_mut_slice()),
            _ => None,
        }
    }

    fn put<B: BufMut>(self, buf: &mut B) {
        buf.put_u8(self);
    }

    fn get(chunk: &[u8]) -> Self {
        chunk[0]
    }

    fn put_all<B: BufMut>(values: &[Self], buf: &mut B) {
        buf.put_slice(values);
    }

    fn get_all(payload: &[u8]) -> Vec<Self> {
        payload.to_vec()
    }
}

impl Element for bool {
    const WIDTH: usize = 1;
    const TYPE_NAME: &'static str = "bool";

    fn slice(array: &ArrayItem) -> Option<&[Self]> {
        match array {
            ArrayItem::Boolean(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    fn slice_mut(array: &mut ArrayItem) -> Option<&mut [Self]> {
        match array {
            ArrayItem::Boolean(values) => Some(values.as_mut_slice()),
            _ => None,
        }
    }

    fn put<B: BufMut>(self, buf: &mut B) {
        buf.put_u8(u8::from(self));
    }

    // Any non-zero byte is true.
    fn get(chunk: &[u8]) -> Self {
        chunk[0] != 0
    }
}
