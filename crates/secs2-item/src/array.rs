//! Fixed-width element arrays.

use crate::{Element, Format};
use bytes::BufMut;

/// Payload of every non-list, non-text item: a contiguous run of elements of
/// one primitive kind.
///
/// The variant fixes the [`Format`]; the element vector is adopted on
/// construction, so nothing outside the item can alias it.
#[derive(Debug, Clone)]
pub enum ArrayItem {
    /// Raw bytes.
    Binary(Vec<u8>),
    /// Boolean values.
    Boolean(Vec<bool>),
    /// 8-byte signed integers.
    I8(Vec<i64>),
    /// 1-byte signed integers.
    I1(Vec<i8>),
    /// 2-byte signed integers.
    I2(Vec<i16>),
    /// 4-byte signed integers.
    I4(Vec<i32>),
    /// 8-byte floating point.
    F8(Vec<f64>),
    /// 4-byte floating point.
    F4(Vec<f32>),
    /// 8-byte unsigned integers.
    U8(Vec<u64>),
    /// 1-byte unsigned integers.
    U1(Vec<u8>),
    /// 2-byte unsigned integers.
    U2(Vec<u16>),
    /// 4-byte unsigned integers.
    U4(Vec<u32>),
}

/// Apply `$body` to the element vector of whichever variant `$array` holds.
macro_rules! with_values {
    ($array:expr, $values:ident => $body:expr) => {
        match $array {
            ArrayItem::Binary($values) => $body,
            ArrayItem::Boolean($values) => $body,
            ArrayItem::I8($values) => $body,
            ArrayItem::I1($values) => $body,
            ArrayItem::I2($values) => $body,
            ArrayItem::I4($values) => $body,
            ArrayItem::F8($values) => $body,
            ArrayItem::F4($values) => $body,
            ArrayItem::U8($values) => $body,
            ArrayItem::U1($values) => $body,
            ArrayItem::U2($values) => $body,
            ArrayItem::U4($values) => $body,
        }
    };
}

impl ArrayItem {
    /// The format implied by the variant.
    pub const fn format(&self) -> Format {
        match self {
            ArrayItem::Binary(_) => Format::Binary,
            ArrayItem::Boolean(_) => Format::Boolean,
            ArrayItem::I8(_) => Format::I8,
            ArrayItem::I1(_) => Format::I1,
            ArrayItem::I2(_) => Format::I2,
            ArrayItem::I4(_) => Format::I4,
            ArrayItem::F8(_) => Format::F8,
            ArrayItem::F4(_) => Format::F4,
            ArrayItem::U8(_) => Format::U8,
            ArrayItem::U1(_) => Format::U1,
            ArrayItem::U2(_) => Format::U2,
            ArrayItem::U4(_) => Format::U4,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        with_values!(self, values => values.len())
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Payload size on the wire: element count times element width.
    pub fn byte_len(&self) -> usize {
        with_values!(self, values => values.len() * element_width(values.as_slice()))
    }

    /// Typed view of the elements, or `None` if `T` is not this array's
    /// element type.
    pub fn values<T: Element>(&self) -> Option<&[T]> {
        T::slice(self)
    }

    /// Mutable typed view of the elements.
    ///
    /// Writes through the view change the array in place.
    pub fn values_mut<T: Element>(&mut self) -> Option<&mut [T]> {
        T::slice_mut(self)
    }

    /// Write the elements in network byte order.
    pub fn put_payload<B: BufMut>(&self, buf: &mut B) {
        with_values!(self, values => Element::put_all(values.as_slice(), buf))
    }

    /// Parse a payload of the given format.
    ///
    /// Returns `None` if `format` is not an array format. The caller checks
    /// that `payload.len()` is a multiple of the element width; a trailing
    /// partial element is ignored.
    pub fn from_payload(format: Format, payload: &[u8]) -> Option<ArrayItem> {
        let array = match format {
            Format::Binary => ArrayItem::Binary(u8::get_all(payload)),
            Format::Boolean => ArrayItem::Boolean(bool::get_all(payload)),
            Format::I8 => ArrayItem::I8(i64::get_all(payload)),
            Format::I1 => ArrayItem::I1(i8::get_all(payload)),
            Format::I2 => ArrayItem::I2(i16::get_all(payload)),
            Format::I4 => ArrayItem::I4(i32::get_all(payload)),
            Format::F8 => ArrayItem::F8(f64::get_all(payload)),
            Format::F4 => ArrayItem::F4(f32::get_all(payload)),
            Format::U8 => ArrayItem::U8(u64::get_all(payload)),
            Format::U1 => ArrayItem::U1(u8::get_all(payload)),
            Format::U2 => ArrayItem::U2(u16::get_all(payload)),
            Format::U4 => ArrayItem::U4(u32::get_all(payload)),
            Format::List | Format::Ascii | Format::Jis8 => return None,
        };
        Some(array)
    }

    /// Free the element buffer, leaving an empty array of the same format.
    ///
    /// Returns the number of buffers freed (0 or 1).
    pub fn release(&mut self) -> usize {
        with_values!(self, values => {
            let freed = usize::from(values.capacity() > 0);
            *values = Vec::new();
            freed
        })
    }
}

fn element_width<T: Element>(_: &[T]) -> usize {
    T::WIDTH
}

fn same_values<T: Element>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| T::same(x, y))
}

impl PartialEq for ArrayItem {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ArrayItem::Binary(a), ArrayItem::Binary(b)) => same_values(a, b),
            (ArrayItem::Boolean(a), ArrayItem::Boolean(b)) => same_values(a, b),
            (ArrayItem::I8(a), ArrayItem::I8(b)) => same_values(a, b),
            (ArrayItem::I1(a), ArrayItem::I1(b)) => same_values(a, b),
            (ArrayItem::I2(a), ArrayItem::I2(b)) => same_values(a, b),
            (ArrayItem::I4(a), ArrayItem::I4(b)) => same_values(a, b),
            (ArrayItem::F8(a), ArrayItem::F8(b)) => same_values(a, b),
            (ArrayItem::F4(a), ArrayItem::F4(b)) => same_values(a, b),
            (ArrayItem::U8(a), ArrayItem::U8(b)) => same_values(a, b),
            (ArrayItem::U1(a), ArrayItem::U1(b)) => same_values(a, b),
            (ArrayItem::U2(a), ArrayItem::U2(b)) => same_values(a, b),
            (ArrayItem::U4(a), ArrayItem::U4(b)) => same_values(a, b),
            _ => false,
        }
    }
}

// NaN compares equal to NaN, so equality stays reflexive.
impl Eq for ArrayItem {}

// ============================================================================
// From implementations for ArrayItem
// ============================================================================

macro_rules! impl_from_vec {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<Vec<$ty>> for ArrayItem {
                fn from(values: Vec<$ty>) -> Self {
                    ArrayItem::$variant(values)
                }
            }
        )+
    };
}

// `Vec<u8>` is left out: it could be either Binary or U1.
impl_from_vec!(
    bool => Boolean,
    i64 => I8,
    i8 => I1,
    i16 => I2,
    i32 => I4,
    f64 => F8,
    f32 => F4,
    u64 => U8,
    u16 => U2,
    u32 => U4,
);
