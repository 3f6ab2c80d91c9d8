//! The SECS-II item value type.
//!
//! [`Item`] is a closed sum over the three payload shapes:
//!
//! - [`Item::List`] - an ordered sequence of child items
//! - [`Item::Text`] - an ASCII or JIS-8 string ([`TextItem`])
//! - [`Item::Array`] - a fixed-width element array ([`ArrayItem`])
//!
//! Accessors that only make sense for one shape return
//! [`ItemError::UnsupportedOperation`] on the others, naming the operation and
//! the item's actual format.
//!
//! # Ownership
//!
//! A list owns its children. Replacing a child with [`Item::set`] hands the
//! previous occupant back to the caller, and dropping the root of a decoded
//! tree frees every item in it. [`Item::release`] frees backing storage early
//! while keeping the item usable as an empty value of the same format.

use crate::{
    codec, ArrayItem, Element, Format, ItemError, ItemResult, Jis8Charset, TextEncoding, TextItem,
};
use bytes::BufMut;

/// A SECS-II data item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// Ordered child items.
    List(Vec<Item>),
    /// ASCII or JIS-8 text.
    Text(TextItem),
    /// Binary, boolean or numeric elements.
    Array(ArrayItem),
}

// ============================================================================
// Empty Items
// ============================================================================

static EMPTY_LIST: Item = Item::List(Vec::new());
static EMPTY_ASCII: Item = Item::Text(TextItem::new(TextEncoding::Ascii, String::new()));
static EMPTY_JIS8: Item = Item::Text(TextItem::new(TextEncoding::Jis8, String::new()));
static EMPTY_BINARY: Item = Item::Array(ArrayItem::Binary(Vec::new()));
static EMPTY_BOOLEAN: Item = Item::Array(ArrayItem::Boolean(Vec::new()));
static EMPTY_I8: Item = Item::Array(ArrayItem::I8(Vec::new()));
static EMPTY_I1: Item = Item::Array(ArrayItem::I1(Vec::new()));
static EMPTY_I2: Item = Item::Array(ArrayItem::I2(Vec::new()));
static EMPTY_I4: Item = Item::Array(ArrayItem::I4(Vec::new()));
static EMPTY_F8: Item = Item::Array(ArrayItem::F8(Vec::new()));
static EMPTY_F4: Item = Item::Array(ArrayItem::F4(Vec::new()));
static EMPTY_U8: Item = Item::Array(ArrayItem::U8(Vec::new()));
static EMPTY_U1: Item = Item::Array(ArrayItem::U1(Vec::new()));
static EMPTY_U2: Item = Item::Array(ArrayItem::U2(Vec::new()));
static EMPTY_U4: Item = Item::Array(ArrayItem::U4(Vec::new()));

impl Item {
    /// The shared zero-length item of `format`.
    ///
    /// Every call with the same format returns the same instance. Use
    /// `.clone()` to get an owned, mutable copy.
    pub fn empty(format: Format) -> &'static Item {
        match format {
            Format::List => &EMPTY_LIST,
            Format::Ascii => &EMPTY_ASCII,
            Format::Jis8 => &EMPTY_JIS8,
            Format::Binary => &EMPTY_BINARY,
            Format::Boolean => &EMPTY_BOOLEAN,
            Format::I8 => &EMPTY_I8,
            Format::I1 => &EMPTY_I1,
            Format::I2 => &EMPTY_I2,
            Format::I4 => &EMPTY_I4,
            Format::F8 => &EMPTY_F8,
            Format::F4 => &EMPTY_F4,
            Format::U8 => &EMPTY_U8,
            Format::U1 => &EMPTY_U1,
            Format::U2 => &EMPTY_U2,
            Format::U4 => &EMPTY_U4,
        }
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl Item {
    /// `L` item.
    pub fn list(items: Vec<Item>) -> Self {
        Item::List(items)
    }

    /// `A` item.
    ///
    /// Characters outside ASCII are encoded as `?`, so such strings do not
    /// survive an encode/decode round trip unchanged.
    pub fn ascii(value: impl Into<String>) -> Self {
        Item::Text(TextItem::new(TextEncoding::Ascii, value.into()))
    }

    /// `J` item.
    ///
    /// With [`Jis8Charset::JisX0201`], characters the charset cannot map are
    /// encoded as `?` and come back changed after decoding.
    pub fn jis8(value: impl Into<String>) -> Self {
        Item::Text(TextItem::new(TextEncoding::Jis8, value.into()))
    }

    /// `B` item.
    pub fn binary(values: Vec<u8>) -> Self {
        Item::Array(ArrayItem::Binary(values))
    }

    /// `BOOLEAN` item.
    pub fn boolean(values: Vec<bool>) -> Self {
        Item::Array(ArrayItem::Boolean(values))
    }

    /// `I1` item.
    pub fn i1(values: Vec<i8>) -> Self {
        Item::Array(ArrayItem::I1(values))
    }

    /// `I2` item.
    pub fn i2(values: Vec<i16>) -> Self {
        Item::Array(ArrayItem::I2(values))
    }

    /// `I4` item.
    pub fn i4(values: Vec<i32>) -> Self {
        Item::Array(ArrayItem::I4(values))
    }

    /// `I8` item.
    pub fn i8(values: Vec<i64>) -> Self {
        Item::Array(ArrayItem::I8(values))
    }

    /// `U1` item.
    pub fn u1(values: Vec<u8>) -> Self {
        Item::Array(ArrayItem::U1(values))
    }

    /// `U2` item.
    pub fn u2(values: Vec<u16>) -> Self {
        Item::Array(ArrayItem::U2(values))
    }

    /// `U4` item.
    pub fn u4(values: Vec<u32>) -> Self {
        Item::Array(ArrayItem::U4(values))
    }

    /// `U8` item.
    pub fn u8(values: Vec<u64>) -> Self {
        Item::Array(ArrayItem::U8(values))
    }

    /// `F4` item.
    pub fn f4(values: Vec<f32>) -> Self {
        Item::Array(ArrayItem::F4(values))
    }

    /// `F8` item.
    pub fn f8(values: Vec<f64>) -> Self {
        Item::Array(ArrayItem::F8(values))
    }
}

impl From<ArrayItem> for Item {
    fn from(array: ArrayItem) -> Self {
        Item::Array(array)
    }
}

impl From<TextItem> for Item {
    fn from(text: TextItem) -> Self {
        Item::Text(text)
    }
}

impl From<Vec<Item>> for Item {
    fn from(items: Vec<Item>) -> Self {
        Item::List(items)
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Item {
    /// The item's format. Fixed for the lifetime of the item.
    pub fn format(&self) -> Format {
        match self {
            Item::List(_) => Format::List,
            Item::Text(text) => match text.encoding() {
                TextEncoding::Ascii => Format::Ascii,
                TextEncoding::Jis8 => Format::Jis8,
            },
            Item::Array(array) => array.format(),
        }
    }

    /// Number of direct children, characters or elements.
    pub fn count(&self) -> usize {
        match self {
            Item::List(items) => items.len(),
            Item::Text(text) => text.len(),
            Item::Array(array) => array.len(),
        }
    }

    /// Whether [`count`](Self::count) is zero.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Borrow the children if this is a list.
    pub fn as_list(&self) -> Option<&[Item]> {
        match self {
            Item::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Borrow the text payload if this is an ASCII or JIS-8 item.
    pub fn as_text(&self) -> Option<&TextItem> {
        match self {
            Item::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow the element array if this is a binary, boolean or numeric item.
    pub fn as_array(&self) -> Option<&ArrayItem> {
        match self {
            Item::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Mutably borrow the element array.
    pub fn as_array_mut(&mut self) -> Option<&mut ArrayItem> {
        match self {
            Item::Array(array) => Some(array),
            _ => None,
        }
    }

    /// The children of a list item.
    pub fn items(&self) -> ItemResult<&[Item]> {
        match self {
            Item::List(items) => Ok(items.as_slice()),
            other => Err(ItemError::unsupported("items", other.format())),
        }
    }

    /// The live child vector of a list item. Changes are visible in the list.
    pub fn items_mut(&mut self) -> ItemResult<&mut Vec<Item>> {
        match self {
            Item::List(items) => Ok(items),
            other => Err(ItemError::unsupported("items_mut", other.format())),
        }
    }

    /// The child at `index`.
    pub fn get(&self, index: usize) -> ItemResult<&Item> {
        match self {
            Item::List(items) => items.get(index).ok_or(ItemError::IndexOutOfRange {
                index,
                count: items.len(),
            }),
            other => Err(ItemError::unsupported("get", other.format())),
        }
    }

    /// Mutable access to the child at `index`.
    pub fn get_mut(&mut self, index: usize) -> ItemResult<&mut Item> {
        match self {
            Item::List(items) => {
                let count = items.len();
                items
                    .get_mut(index)
                    .ok_or(ItemError::IndexOutOfRange { index, count })
            }
            other => Err(ItemError::unsupported("get_mut", other.format())),
        }
    }

    /// Put `item` at `index` and return the child it replaced.
    pub fn set(&mut self, index: usize, item: Item) -> ItemResult<Item> {
        match self {
            Item::List(items) => {
                let count = items.len();
                let slot = items
                    .get_mut(index)
                    .ok_or(ItemError::IndexOutOfRange { index, count })?;
                Ok(std::mem::replace(slot, item))
            }
            other => Err(ItemError::unsupported("set", other.format())),
        }
    }

    /// The string of a text item.
    pub fn as_str(&self) -> ItemResult<&str> {
        match self {
            Item::Text(text) => Ok(text.as_str()),
            other => Err(ItemError::unsupported("as_str", other.format())),
        }
    }

    /// Typed view of an array item's elements.
    ///
    /// `T` must be the element type of the item's format (`u8` for `Binary`
    /// and `U1`, `bool` for `Boolean`, `u32` for `U4`, ...).
    pub fn values<T: Element>(&self) -> ItemResult<&[T]> {
        self.typed_values("values")
    }

    /// Mutable typed view of an array item's elements.
    ///
    /// Writes through the slice change the item in place.
    pub fn values_mut<T: Element>(&mut self) -> ItemResult<&mut [T]> {
        self.typed_values_mut("values_mut")
    }

    /// The first element of an array item.
    pub fn first_value<T: Element>(&self) -> ItemResult<T> {
        self.typed_values::<T>("first_value")?
            .first()
            .copied()
            .ok_or(ItemError::IndexOutOfRange { index: 0, count: 0 })
    }

    /// Mutable reference to the first element of an array item.
    pub fn first_value_mut<T: Element>(&mut self) -> ItemResult<&mut T> {
        self.typed_values_mut::<T>("first_value_mut")?
            .first_mut()
            .ok_or(ItemError::IndexOutOfRange { index: 0, count: 0 })
    }

    /// The first element of an array item, or `default` if it has none.
    pub fn first_value_or<T: Element>(&self, default: T) -> ItemResult<T> {
        Ok(self
            .typed_values::<T>("first_value_or")?
            .first()
            .copied()
            .unwrap_or(default))
    }

    // `operation` is the public accessor reported in `UnsupportedOperation`.
    fn typed_values<T: Element>(&self, operation: &'static str) -> ItemResult<&[T]> {
        match self {
            Item::Array(array) => array.values::<T>().ok_or(ItemError::ElementMismatch {
                format: array.format(),
                requested: T::TYPE_NAME,
            }),
            other => Err(ItemError::unsupported(operation, other.format())),
        }
    }

    fn typed_values_mut<T: Element>(&mut self, operation: &'static str) -> ItemResult<&mut [T]> {
        match self {
            Item::Array(array) => {
                let format = array.format();
                array.values_mut::<T>().ok_or(ItemError::ElementMismatch {
                    format,
                    requested: T::TYPE_NAME,
                })
            }
            other => Err(ItemError::unsupported(operation, other.format())),
        }
    }

    /// Free backing storage of this item and every child it owns.
    ///
    /// The item stays valid as an empty item of the same format, so calling
    /// this again is harmless. Returns the number of buffers freed.
    pub fn release(&mut self) -> usize {
        match self {
            Item::List(items) => {
                let children: usize = items.iter_mut().map(Item::release).sum();
                let own = usize::from(items.capacity() > 0);
                *items = Vec::new();
                children + own
            }
            Item::Text(text) => text.release(),
            Item::Array(array) => array.release(),
        }
    }
}

// ============================================================================
// Encoding
// ============================================================================

impl Item {
    /// Encode the item, header and payload, into `buf`.
    ///
    /// JIS-8 items use [`Jis8Charset::default`]; see
    /// [`encode_to_with`](Self::encode_to_with).
    pub fn encode_to<B: BufMut>(&self, buf: &mut B) -> ItemResult<()> {
        codec::write_item(self, buf, Jis8Charset::default())
    }

    /// Encode the item with an explicit JIS-8 character set.
    pub fn encode_to_with<B: BufMut>(&self, buf: &mut B, jis8: Jis8Charset) -> ItemResult<()> {
        codec::write_item(self, buf, jis8)
    }

    /// The encoded form of the item.
    pub fn encoded_bytes(&self) -> ItemResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode_to(&mut buf)?;
        Ok(buf)
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.format(), self.count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_count() {
        let item = Item::list(vec![Item::ascii("AB"), Item::u1(vec![7])]);
        assert_eq!(item.format(), Format::List);
        assert_eq!(item.count(), 2);

        assert_eq!(Item::jis8("ｱｲｳ").count(), 3);
        assert_eq!(Item::f8(vec![1.0, 2.0]).format(), Format::F8);
        assert_eq!(Item::boolean(vec![true]).format(), Format::Boolean);
    }

    #[test]
    fn test_display() {
        assert_eq!(Item::u4(vec![1, 2, 3]).to_string(), "U4 [3]");
        assert_eq!(Item::ascii("hello").to_string(), "A [5]");
        assert_eq!(Item::list(Vec::new()).to_string(), "L [0]");
    }

    #[test]
    fn test_list_access_on_non_list() {
        let mut item = Item::ascii("text");
        assert_eq!(
            item.items().unwrap_err(),
            ItemError::UnsupportedOperation {
                operation: "items",
                format: Format::Ascii
            }
        );
        assert_eq!(
            item.get(0).unwrap_err(),
            ItemError::unsupported("get", Format::Ascii)
        );
        assert_eq!(
            item.set(0, Item::u1(vec![1])).unwrap_err(),
            ItemError::unsupported("set", Format::Ascii)
        );

        let numeric = Item::u2(vec![1]);
        assert_eq!(
            numeric.items().unwrap_err(),
            ItemError::unsupported("items", Format::U2)
        );
    }

    #[test]
    fn test_as_str_on_non_text() {
        assert_eq!(
            Item::list(Vec::new()).as_str().unwrap_err(),
            ItemError::unsupported("as_str", Format::List)
        );
        assert_eq!(
            Item::i4(vec![1]).as_str().unwrap_err(),
            ItemError::unsupported("as_str", Format::I4)
        );
        assert_eq!(Item::ascii("ok").as_str().unwrap(), "ok");
    }

    #[test]
    fn test_values_on_non_array() {
        assert_eq!(
            Item::ascii("x").values::<u8>().unwrap_err(),
            ItemError::unsupported("values", Format::Ascii)
        );
        assert_eq!(
            Item::list(Vec::new()).first_value::<u8>().unwrap_err(),
            ItemError::unsupported("first_value", Format::List)
        );
    }

    #[test]
    fn test_first_value_errors_name_the_accessor() {
        let mut list = Item::list(vec![Item::u1(vec![1])]);
        let mut text = Item::ascii("x");

        for item in [&mut list, &mut text] {
            let format = item.format();
            assert_eq!(
                item.first_value::<u8>().unwrap_err(),
                ItemError::unsupported("first_value", format)
            );
            assert_eq!(
                item.first_value_or(0u8).unwrap_err(),
                ItemError::unsupported("first_value_or", format)
            );
            assert_eq!(
                item.first_value_mut::<u8>().unwrap_err(),
                ItemError::unsupported("first_value_mut", format)
            );
            assert_eq!(
                item.values_mut::<u8>().unwrap_err(),
                ItemError::unsupported("values_mut", format)
            );
        }
    }

    #[test]
    fn test_element_mismatch() {
        let item = Item::u4(vec![1]);
        assert_eq!(
            item.first_value::<i32>().unwrap_err(),
            ItemError::ElementMismatch {
                format: Format::U4,
                requested: "i32"
            }
        );
        assert!(Item::boolean(vec![true]).values::<u8>().is_err());
        assert_eq!(Item::binary(vec![9]).first_value::<u8>().unwrap(), 9);
    }

    #[test]
    fn test_first_value_on_empty() {
        let item = Item::u4(Vec::new());
        assert_eq!(
            item.first_value::<u32>().unwrap_err(),
            ItemError::IndexOutOfRange { index: 0, count: 0 }
        );
        assert_eq!(item.first_value_or(42u32).unwrap(), 42);
        assert_eq!(Item::u4(vec![5]).first_value_or(42u32).unwrap(), 5);
    }

    #[test]
    fn test_first_value_mut_is_live() {
        let mut item = Item::i2(vec![1, 2]);
        *item.first_value_mut::<i16>().unwrap() = -7;
        item.values_mut::<i16>().unwrap()[1] = 300;
        assert_eq!(item, Item::i2(vec![-7, 300]));
    }

    #[test]
    fn test_get_and_set() {
        let mut list = Item::list(vec![Item::u1(vec![1]), Item::ascii("x")]);
        assert_eq!(list.get(1).unwrap(), &Item::ascii("x"));
        assert_eq!(
            list.get(2).unwrap_err(),
            ItemError::IndexOutOfRange { index: 2, count: 2 }
        );

        let previous = list.set(0, Item::u1(vec![2])).unwrap();
        assert_eq!(previous, Item::u1(vec![1]));
        assert_eq!(list.get(0).unwrap(), &Item::u1(vec![2]));
        assert!(list.set(5, Item::u1(vec![3])).is_err());
    }

    #[test]
    fn test_items_mut_is_live() {
        let mut list = Item::list(Vec::new());
        list.items_mut().unwrap().push(Item::boolean(vec![true]));
        assert_eq!(list.count(), 1);
        assert_eq!(list.items().unwrap()[0], Item::boolean(vec![true]));
    }

    #[test]
    fn test_empty_singletons() {
        for format in Format::ALL {
            let a = Item::empty(format);
            let b = Item::empty(format);
            assert!(std::ptr::eq(a, b));
            assert_eq!(a.format(), format);
            assert_eq!(a.count(), 0);
        }
    }

    #[test]
    fn test_equality() {
        let a = Item::list(vec![Item::u1(vec![1])]);
        let mut b = Item::list(vec![Item::u1(vec![1])]);
        assert_eq!(a, b);

        b.set(0, Item::u1(vec![2])).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, Item::u1(vec![1]));

        assert_ne!(Item::ascii("AB"), Item::jis8("AB"));
        assert_ne!(Item::binary(vec![1]), Item::u1(vec![1]));
        assert_ne!(Item::list(Vec::new()), Item::ascii(""));
    }

    #[test]
    fn test_release_cascades_once() {
        let mut item = Item::list(vec![
            Item::ascii("abc"),
            Item::list(vec![Item::u4(vec![1, 2])]),
            Item::u1(Vec::new()),
        ]);
        // outer list, text, inner list, inner U4; the empty U1 owns nothing
        assert_eq!(item.release(), 4);
        assert_eq!(item.format(), Format::List);
        assert_eq!(item.count(), 0);
        assert_eq!(item.release(), 0);
    }

    #[test]
    fn test_ascii_roundtrip_is_lossy_outside_ascii() {
        let item = Item::ascii("café");
        let decoded = codec::decode_item(&item.encoded_bytes().unwrap()).unwrap();
        assert_eq!(decoded.as_str().unwrap(), "caf?");
        assert_ne!(decoded, item);
    }

    #[test]
    fn test_encoded_bytes() {
        let bytes = Item::u1(vec![7]).encoded_bytes().unwrap();
        assert_eq!(bytes, vec![0xA5, 0x01, 0x07]);
    }
}
