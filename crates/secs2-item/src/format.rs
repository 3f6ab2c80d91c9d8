//! Item format codes.
//!
//! Every item starts with a format byte whose upper six bits identify the
//! item kind and whose lower two bits give the number of length bytes that
//! follow (see [`crate::codec`]).
//!
//! | Format  | Code (octal) | Element width |
//! |---------|--------------|---------------|
//! | List    | 00           | -             |
//! | Binary  | 10           | 1             |
//! | Boolean | 11           | 1             |
//! | ASCII   | 20           | 1             |
//! | JIS8    | 21           | 1             |
//! | I8      | 30           | 8             |
//! | I1      | 31           | 1             |
//! | I2      | 32           | 2             |
//! | I4      | 34           | 4             |
//! | F8      | 40           | 8             |
//! | F4      | 44           | 4             |
//! | U8      | 50           | 8             |
//! | U1      | 51           | 1             |
//! | U2      | 52           | 2             |
//! | U4      | 54           | 4             |

// ============================================================================
// Format Codes (SEMI E5)
// ============================================================================

/// List of items.
pub const FORMAT_LIST: u8 = 0o00;
/// Raw binary bytes.
pub const FORMAT_BINARY: u8 = 0o10;
/// Boolean values, one byte each.
pub const FORMAT_BOOLEAN: u8 = 0o11;
/// ASCII text.
pub const FORMAT_ASCII: u8 = 0o20;
/// JIS-8 text.
pub const FORMAT_JIS8: u8 = 0o21;
/// 8-byte signed integers.
pub const FORMAT_I8: u8 = 0o30;
/// 1-byte signed integers.
pub const FORMAT_I1: u8 = 0o31;
/// 2-byte signed integers.
pub const FORMAT_I2: u8 = 0o32;
/// 4-byte signed integers.
pub const FORMAT_I4: u8 = 0o34;
/// 8-byte floating point.
pub const FORMAT_F8: u8 = 0o40;
/// 4-byte floating point.
pub const FORMAT_F4: u8 = 0o44;
/// 8-byte unsigned integers.
pub const FORMAT_U8: u8 = 0o50;
/// 1-byte unsigned integers.
pub const FORMAT_U1: u8 = 0o51;
/// 2-byte unsigned integers.
pub const FORMAT_U2: u8 = 0o52;
/// 4-byte unsigned integers.
pub const FORMAT_U4: u8 = 0o54;

/// The kind of value an item holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Ordered sequence of child items.
    List,
    /// Raw bytes.
    Binary,
    /// Boolean values.
    Boolean,
    /// ASCII text.
    Ascii,
    /// JIS-8 text.
    Jis8,
    /// 8-byte signed integers.
    I8,
    /// 1-byte signed integers.
    I1,
    /// 2-byte signed integers.
    I2,
    /// 4-byte signed integers.
    I4,
    /// 8-byte floating point.
    F8,
    /// 4-byte floating point.
    F4,
    /// 8-byte unsigned integers.
    U8,
    /// 1-byte unsigned integers.
    U1,
    /// 2-byte unsigned integers.
    U2,
    /// 4-byte unsigned integers.
    U4,
}

impl Format {
    /// All formats, in wire code order.
    pub const ALL: [Format; 15] = [
        Format::List,
        Format::Binary,
        Format::Boolean,
        Format::Ascii,
        Format::Jis8,
        Format::I8,
        Format::I1,
        Format::I2,
        Format::I4,
        Format::F8,
        Format::F4,
        Format::U8,
        Format::U1,
        Format::U2,
        Format::U4,
    ];

    /// The 6-bit wire code.
    pub const fn code(self) -> u8 {
        match self {
            Format::List => FORMAT_LIST,
            Format::Binary => FORMAT_BINARY,
            Format::Boolean => FORMAT_BOOLEAN,
            Format::Ascii => FORMAT_ASCII,
            Format::Jis8 => FORMAT_JIS8,
            Format::I8 => FORMAT_I8,
            Format::I1 => FORMAT_I1,
            Format::I2 => FORMAT_I2,
            Format::I4 => FORMAT_I4,
            Format::F8 => FORMAT_F8,
            Format::F4 => FORMAT_F4,
            Format::U8 => FORMAT_U8,
            Format::U1 => FORMAT_U1,
            Format::U2 => FORMAT_U2,
            Format::U4 => FORMAT_U4,
        }
    }

    /// Look up a format by its 6-bit wire code.
    pub const fn from_code(code: u8) -> Option<Format> {
        match code {
            FORMAT_LIST => Some(Format::List),
            FORMAT_BINARY => Some(Format::Binary),
            FORMAT_BOOLEAN => Some(Format::Boolean),
            FORMAT_ASCII => Some(Format::Ascii),
            FORMAT_JIS8 => Some(Format::Jis8),
            FORMAT_I8 => Some(Format::I8),
            FORMAT_I1 => Some(Format::I1),
            FORMAT_I2 => Some(Format::I2),
            FORMAT_I4 => Some(Format::I4),
            FORMAT_F8 => Some(Format::F8),
            FORMAT_F4 => Some(Format::F4),
            FORMAT_U8 => Some(Format::U8),
            FORMAT_U1 => Some(Format::U1),
            FORMAT_U2 => Some(Format::U2),
            FORMAT_U4 => Some(Format::U4),
            _ => None,
        }
    }

    /// Short name, as used in SML notation.
    pub const fn name(self) -> &'static str {
        match self {
            Format::List => "L",
            Format::Binary => "B",
            Format::Boolean => "BOOLEAN",
            Format::Ascii => "A",
            Format::Jis8 => "J",
            Format::I8 => "I8",
            Format::I1 => "I1",
            Format::I2 => "I2",
            Format::I4 => "I4",
            Format::F8 => "F8",
            Format::F4 => "F4",
            Format::U8 => "U8",
            Format::U1 => "U1",
            Format::U2 => "U2",
            Format::U4 => "U4",
        }
    }

    /// Size in bytes of one payload element, or `None` for lists.
    ///
    /// Text formats report 1: their length field counts encoded bytes.
    pub const fn element_width(self) -> Option<usize> {
        match self {
            Format::List => None,
            Format::Binary
            | Format::Boolean
            | Format::Ascii
            | Format::Jis8
            | Format::I1
            | Format::U1 => Some(1),
            Format::I2 | Format::U2 => Some(2),
            Format::I4 | Format::U4 | Format::F4 => Some(4),
            Format::I8 | Format::U8 | Format::F8 => Some(8),
        }
    }

    /// Whether this is the list format.
    pub const fn is_list(self) -> bool {
        matches!(self, Format::List)
    }

    /// Whether this is one of the text formats.
    pub const fn is_text(self) -> bool {
        matches!(self, Format::Ascii | Format::Jis8)
    }

    /// Whether items of this format hold a fixed-width element array.
    pub const fn is_array(self) -> bool {
        !self.is_list() && !self.is_text()
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Format {
    type Error = crate::ItemError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Format::from_code(code).ok_or(crate::ItemError::UnknownFormat(code))
    }
}
