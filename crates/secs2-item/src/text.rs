//! Text items and their character encodings.
//!
//! ASCII items map every character outside `0x00..=0x7F` to `?`. JIS-8 items
//! are converted with a [`Jis8Charset`] passed explicitly by the caller; there
//! is no process-wide setting.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Substitute for characters the target encoding cannot represent.
const UNMAPPABLE: u8 = b'?';

/// Which text format an item uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// 7-bit ASCII.
    Ascii,
    /// 8-bit JIS.
    Jis8,
}

/// Character set used to convert JIS-8 items to and from bytes.
///
/// `Utf8` is the default. Peers that send real JIS X 0201 data need
/// `JisX0201`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jis8Charset {
    /// Treat JIS-8 payloads as UTF-8.
    #[default]
    Utf8,
    /// JIS X 0201: ASCII with `¥` and `‾` at 0x5C/0x7E, half-width katakana
    /// at 0xA1..=0xDF.
    JisX0201,
}

impl Jis8Charset {
    /// Encode `text` with this character set.
    pub fn encode(self, text: &str) -> Cow<'_, [u8]> {
        match self {
            Jis8Charset::Utf8 => Cow::Borrowed(text.as_bytes()),
            Jis8Charset::JisX0201 => {
                if text.bytes().all(|b| b < 0x80 && b != b'\\' && b != b'~') {
                    Cow::Borrowed(text.as_bytes())
                } else {
                    Cow::Owned(text.chars().map(jis_x0201_byte).collect())
                }
            }
        }
    }

    /// Decode `bytes` with this character set.
    ///
    /// Invalid sequences become U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Jis8Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Jis8Charset::JisX0201 => bytes.iter().map(|&b| jis_x0201_char(b)).collect(),
        }
    }
}

fn jis_x0201_byte(c: char) -> u8 {
    match c {
        '\u{A5}' => 0x5C,
        '\u{203E}' => 0x7E,
        '\\' | '~' => UNMAPPABLE,
        '\u{0}'..='\u{7F}' => c as u8,
        '\u{FF61}'..='\u{FF9F}' => (c as u32 - 0xFF61 + 0xA1) as u8,
        _ => UNMAPPABLE,
    }
}

fn jis_x0201_char(b: u8) -> char {
    match b {
        0x5C => '\u{A5}',
        0x7E => '\u{203E}',
        0x00..=0x7F => b as char,
        0xA1..=0xDF => {
            char::from_u32(0xFF61 + u32::from(b - 0xA1)).unwrap_or(char::REPLACEMENT_CHARACTER)
        }
        _ => char::REPLACEMENT_CHARACTER,
    }
}

fn encode_ascii(text: &str) -> Cow<'_, [u8]> {
    if text.is_ascii() {
        Cow::Borrowed(text.as_bytes())
    } else {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_ascii() { c as u8 } else { UNMAPPABLE })
                .collect(),
        )
    }
}

fn decode_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { UNMAPPABLE as char })
        .collect()
}

/// A decoded string tagged with its text format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    encoding: TextEncoding,
    value: String,
}

impl TextItem {
    /// Create a text item.
    pub const fn new(encoding: TextEncoding, value: String) -> Self {
        TextItem { encoding, value }
    }

    /// The text format.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// The decoded string.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Whether the string is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Wire bytes for this item. `jis8` is only consulted for JIS-8 items.
    pub fn encode(&self, jis8: Jis8Charset) -> Cow<'_, [u8]> {
        match self.encoding {
            TextEncoding::Ascii => encode_ascii(&self.value),
            TextEncoding::Jis8 => jis8.encode(&self.value),
        }
    }

    /// Build a text item from wire bytes.
    pub fn decode(encoding: TextEncoding, bytes: &[u8], jis8: Jis8Charset) -> Self {
        let value = match encoding {
            TextEncoding::Ascii => decode_ascii(bytes),
            TextEncoding::Jis8 => jis8.decode(bytes),
        };
        TextItem { encoding, value }
    }

    /// Free the string buffer. Returns the number of buffers freed (0 or 1).
    pub fn release(&mut self) -> usize {
        let freed = usize::from(self.value.capacity() > 0);
        self.value = String::new();
        freed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_substitutes_non_ascii() {
        let item = TextItem::new(TextEncoding::Ascii, "héllo".to_string());
        assert_eq!(&item.encode(Jis8Charset::default())[..], b"h?llo");
        assert_eq!(item.len(), 5);

        let decoded = TextItem::decode(TextEncoding::Ascii, &[b'A', 0xC8], Jis8Charset::Utf8);
        assert_eq!(decoded.as_str(), "A?");
    }

    #[test]
    fn test_ascii_borrows_when_clean() {
        let item = TextItem::new(TextEncoding::Ascii, "PPID-01".to_string());
        assert!(matches!(item.encode(Jis8Charset::Utf8), Cow::Borrowed(_)));
    }

    #[test]
    fn test_jis8_utf8_charset() {
        let item = TextItem::new(TextEncoding::Jis8, "ｱｲ".to_string());
        let bytes = item.encode(Jis8Charset::Utf8);
        assert_eq!(bytes.len(), 6);
        let decoded = TextItem::decode(TextEncoding::Jis8, &bytes, Jis8Charset::Utf8);
        assert_eq!(decoded, item);
    }

    #[test]
    fn test_jis_x0201_charset() {
        let item = TextItem::new(TextEncoding::Jis8, "A¥ｱﾟ‾".to_string());
        let bytes = item.encode(Jis8Charset::JisX0201);
        assert_eq!(&bytes[..], &[0x41u8, 0x5C, 0xB1, 0xDF, 0x7E]);

        let decoded = TextItem::decode(TextEncoding::Jis8, &bytes, Jis8Charset::JisX0201);
        assert_eq!(decoded, item);
    }

    #[test]
    fn test_jis_x0201_unmappable() {
        assert_eq!(&Jis8Charset::JisX0201.encode("\\漢")[..], b"??");
        assert_eq!(Jis8Charset::JisX0201.decode(&[0x80, 0xE0]), "\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn test_release() {
        let mut item = TextItem::new(TextEncoding::Ascii, "abc".to_string());
        assert_eq!(item.release(), 1);
        assert!(item.is_empty());
        assert_eq!(item.encoding(), TextEncoding::Ascii);
        assert_eq!(item.release(), 0);
    }
}
