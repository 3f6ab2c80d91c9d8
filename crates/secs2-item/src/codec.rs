//! Item encoding and decoding.
//!
//! Every item uses the same layout, recursively for lists:
//!
//! | Field        | Size (bytes) | Description                                        |
//! |--------------|--------------|----------------------------------------------------|
//! | format byte  | 1            | `format code << 2` OR number of length bytes (1-3) |
//! | length       | 1-3          | Big-endian, fewest bytes that hold the value       |
//! | payload      | variable     | See below                                          |
//!
//! The length field means:
//! - List: number of child items; the payload is the children's encodings
//! - ASCII/JIS-8: number of encoded text bytes
//! - everything else: element count times element width; elements are
//!   big-endian

use crate::{
    ArrayItem, CodecConfig, Format, Item, ItemError, ItemResult, Jis8Charset, TextEncoding,
    TextItem,
};
use bytes::BufMut;

/// Largest value a 3-byte length field can carry.
pub const MAX_LENGTH: usize = 0xFF_FFFF;

/// Mask for the length-byte count in the format byte.
const LENGTH_BYTES_MASK: u8 = 0b11;

// ============================================================================
// Encoding Functions
// ============================================================================

/// Encode `item` into `buf` with the default configuration.
///
/// On error `buf` may hold a partial encoding.
pub fn encode_item<B: BufMut>(item: &Item, buf: &mut B) -> ItemResult<()> {
    write_item(item, buf, Jis8Charset::default())
}

/// Encode `item` into `buf` with the given configuration.
pub fn encode_item_with<B: BufMut>(
    item: &Item,
    buf: &mut B,
    config: &CodecConfig,
) -> ItemResult<()> {
    write_item(item, buf, config.jis8)
}

/// Write the format byte and length field.
pub fn encode_header<B: BufMut>(format: Format, length: usize, buf: &mut B) -> ItemResult<()> {
    let length_bytes = match length {
        0..=0xFF => 1,
        0x100..=0xFFFF => 2,
        0x1_0000..=MAX_LENGTH => 3,
        _ => {
            return Err(ItemError::LengthOverflow {
                length,
                max: MAX_LENGTH,
            })
        }
    };
    buf.put_u8(format.code() << 2 | length_bytes as u8);
    buf.put_uint(length as u64, length_bytes);
    Ok(())
}

pub(crate) fn write_item<B: BufMut>(item: &Item, buf: &mut B, jis8: Jis8Charset) -> ItemResult<()> {
    match item {
        Item::List(items) => {
            encode_header(Format::List, items.len(), buf)?;
            for child in items {
                write_item(child, buf, jis8)?;
            }
        }
        Item::Text(text) => {
            let bytes = text.encode(jis8);
            encode_header(item.format(), bytes.len(), buf)?;
            buf.put_slice(&bytes);
        }
        Item::Array(array) => {
            encode_header(array.format(), array.byte_len(), buf)?;
            array.put_payload(buf);
        }
    }
    Ok(())
}

// ============================================================================
// Decoding Functions
// ============================================================================

/// Decode one item that spans all of `data`, with the default configuration.
pub fn decode_item(data: &[u8]) -> ItemResult<Item> {
    ItemDecoder::default().decode(data)
}

/// Decodes items according to a [`CodecConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemDecoder {
    config: CodecConfig,
}

impl ItemDecoder {
    /// Create a decoder.
    pub fn new(config: CodecConfig) -> Self {
        ItemDecoder { config }
    }

    /// Decode one item that spans all of `data`.
    pub fn decode(&self, data: &[u8]) -> ItemResult<Item> {
        let (item, consumed) = self.decode_prefix(data)?;
        if consumed != data.len() {
            let err = ItemError::TrailingBytes {
                offset: consumed,
                remaining: data.len() - consumed,
            };
            log::debug!("item decode failed: {}", err);
            return Err(err);
        }
        Ok(item)
    }

    /// Decode the item at the start of `data`.
    ///
    /// Returns the item and the number of bytes it occupied.
    pub fn decode_prefix(&self, data: &[u8]) -> ItemResult<(Item, usize)> {
        let mut reader = Reader { data, offset: 0 };
        match self.read_item(&mut reader, 0) {
            Ok(item) => Ok((item, reader.offset)),
            Err(err) => {
                log::debug!("item decode failed: {}", err);
                Err(err)
            }
        }
    }

    fn read_item(&self, reader: &mut Reader<'_>, depth: usize) -> ItemResult<Item> {
        let start = reader.offset;
        let format_byte = reader.take(1)?[0];
        let code = format_byte >> 2;
        let format = Format::try_from(code)?;

        let length_bytes = usize::from(format_byte & LENGTH_BYTES_MASK);
        if length_bytes == 0 {
            return Err(ItemError::decode_at(start, "length byte count is zero"));
        }
        let length = reader
            .take(length_bytes)?
            .iter()
            .fold(0usize, |acc, &b| acc << 8 | usize::from(b));

        log::trace!("decoding {} item, length {} at offset {}", format, length, start);

        match format {
            Format::List => {
                if depth >= self.config.max_depth {
                    return Err(ItemError::NestingTooDeep {
                        max: self.config.max_depth,
                    });
                }
                // Every child needs at least two bytes, so a bogus count cannot
                // reserve more than the input could hold.
                let mut items = Vec::with_capacity(length.min(reader.remaining() / 2));
                for _ in 0..length {
                    items.push(self.read_item(reader, depth + 1)?);
                }
                Ok(Item::List(items))
            }
            Format::Ascii | Format::Jis8 => {
                let encoding = if format == Format::Ascii {
                    TextEncoding::Ascii
                } else {
                    TextEncoding::Jis8
                };
                let payload = reader.take(length)?;
                Ok(Item::Text(TextItem::decode(encoding, payload, self.config.jis8)))
            }
            _ => {
                let width = format.element_width().unwrap_or(1);
                if length % width != 0 {
                    return Err(ItemError::decode_at(
                        start,
                        format!(
                            "{} payload length {} is not a multiple of {}",
                            format, length, width
                        ),
                    ));
                }
                let payload = reader.take(length)?;
                ArrayItem::from_payload(format, payload)
                    .map(Item::Array)
                    .ok_or_else(|| {
                        ItemError::decode_at(start, format!("{} is not an array format", format))
                    })
            }
        }
    }
}

/// Cursor over the input with bounds-checked reads.
struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take(&mut self, len: usize) -> ItemResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(ItemError::decode_at(
                self.offset,
                format!(
                    "not enough data: need {} bytes, have {}",
                    len,
                    self.remaining()
                ),
            ));
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(item: &Item) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_item(item, &mut buf).unwrap();
        buf
    }

    #[test]
    fn test_header_length_bytes() {
        let mut buf = Vec::new();
        encode_header(Format::Binary, 0, &mut buf).unwrap();
        assert_eq!(buf, vec![0x21, 0x00]);

        buf.clear();
        encode_header(Format::Binary, 0x100, &mut buf).unwrap();
        assert_eq!(buf, vec![0x22, 0x01, 0x00]);

        buf.clear();
        encode_header(Format::Binary, 0x12_3456, &mut buf).unwrap();
        assert_eq!(buf, vec![0x23, 0x12, 0x34, 0x56]);

        buf.clear();
        assert_eq!(
            encode_header(Format::Binary, MAX_LENGTH + 1, &mut buf),
            Err(ItemError::LengthOverflow {
                length: MAX_LENGTH + 1,
                max: MAX_LENGTH
            })
        );
    }

    #[test]
    fn test_encode_u4() {
        let bytes = encode(&Item::u4(vec![1, 2, 3]));
        assert_eq!(bytes, vec![0xB1, 12, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3]);
    }

    #[test]
    fn test_encode_nested_list() {
        let item = Item::list(vec![Item::ascii("AB"), Item::u1(vec![7])]);
        assert_eq!(
            encode(&item),
            vec![0x01, 0x02, 0x41, 0x02, b'A', b'B', 0xA5, 0x01, 0x07]
        );
    }

    #[test]
    fn test_encode_two_byte_length() {
        let item = Item::binary(vec![0xEE; 300]);
        let bytes = encode(&item);
        assert_eq!(&bytes[..3], &[0x22, 0x01, 0x2C]);
        assert_eq!(bytes.len(), 3 + 300);
        assert_eq!(decode_item(&bytes).unwrap(), item);
    }

    #[test]
    fn test_three_byte_length_roundtrip() {
        let item = Item::u2(vec![0xBEEF; 0x8000]);
        let bytes = encode(&item);
        assert_eq!(&bytes[..4], &[0xAB, 0x01, 0x00, 0x00]);
        assert_eq!(bytes.len(), 4 + 0x1_0000);

        let decoded = decode_item(&bytes).unwrap();
        assert_eq!(decoded.count(), 0x8000);
        assert_eq!(decoded, item);

        // Header alone, payload missing.
        assert!(matches!(
            decode_item(&[0x23, 0x01, 0x00, 0x00]),
            Err(ItemError::DecodeError { offset: 4, .. })
        ));
    }

    #[test]
    fn test_encode_with_jis_x0201() {
        let config = CodecConfig::default().with_jis8(Jis8Charset::JisX0201);
        let mut buf = Vec::new();
        encode_item_with(&Item::jis8("ｱ"), &mut buf, &config).unwrap();
        assert_eq!(buf, vec![0x45, 0x01, 0xB1]);

        let decoded = ItemDecoder::new(config).decode(&buf).unwrap();
        assert_eq!(decoded, Item::jis8("ｱ"));
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(matches!(
            decode_item(&[]),
            Err(ItemError::DecodeError { offset: 0, .. })
        ));
    }

    #[test]
    fn test_decode_unknown_format() {
        // code 0o77
        assert_eq!(decode_item(&[0xFD, 0x00]), Err(ItemError::UnknownFormat(0o77)));
    }

    #[test]
    fn test_decode_zero_length_bytes() {
        assert!(matches!(
            decode_item(&[0xB0]),
            Err(ItemError::DecodeError { offset: 0, .. })
        ));
    }

    #[test]
    fn test_decode_truncated() {
        let bytes = encode(&Item::u4(vec![1, 2]));
        assert!(matches!(
            decode_item(&bytes[..bytes.len() - 1]),
            Err(ItemError::DecodeError { offset: 2, .. })
        ));

        // list promises two children but carries one
        let bytes = [0x01, 0x02, 0xA5, 0x01, 0x07];
        assert!(decode_item(&bytes).is_err());
    }

    #[test]
    fn test_decode_misaligned_length() {
        // U2 with 3 payload bytes
        assert!(matches!(
            decode_item(&[0xA9, 0x03, 0x00, 0x01, 0x02]),
            Err(ItemError::DecodeError { offset: 0, .. })
        ));
    }

    #[test]
    fn test_decode_trailing_bytes() {
        let mut bytes = encode(&Item::u1(vec![1]));
        bytes.push(0xFF);
        assert_eq!(
            decode_item(&bytes),
            Err(ItemError::TrailingBytes {
                offset: 3,
                remaining: 1
            })
        );

        let (item, consumed) = ItemDecoder::default().decode_prefix(&bytes).unwrap();
        assert_eq!(item, Item::u1(vec![1]));
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_decode_nesting_limit() {
        let mut item = Item::list(Vec::new());
        for _ in 0..3 {
            item = Item::list(vec![item]);
        }
        let bytes = encode(&item);

        let shallow = ItemDecoder::new(CodecConfig::default().with_max_depth(3));
        assert_eq!(
            shallow.decode(&bytes),
            Err(ItemError::NestingTooDeep { max: 3 })
        );

        let deep = ItemDecoder::new(CodecConfig::default().with_max_depth(4));
        assert_eq!(deep.decode(&bytes).unwrap(), item);
    }

    #[test]
    fn test_decode_huge_list_count() {
        // L with 0xFFFFFF children and no data
        assert!(decode_item(&[0x03, 0xFF, 0xFF, 0xFF]).is_err());
    }

    #[test]
    fn test_decode_boolean_nonzero_is_true() {
        assert_eq!(
            decode_item(&[0x25, 0x02, 0x00, 0x05]).unwrap(),
            Item::boolean(vec![false, true])
        );
    }
}
