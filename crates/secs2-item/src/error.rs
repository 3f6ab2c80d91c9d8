//! Error types for secs2-item.

use crate::Format;
use thiserror::Error;

/// Errors that can occur when accessing, encoding or decoding items.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// The operation is not offered by the item's format.
    #[error("{operation} is not supported, since the item's format is {format}")]
    UnsupportedOperation {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Actual format of the item.
        format: Format,
    },

    /// Element position outside the valid range.
    #[error("index {index} out of range for item with {count} elements")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of elements in the item.
        count: usize,
    },

    /// The requested element type does not match the item's format.
    #[error("element type {requested} does not match item format {format}")]
    ElementMismatch {
        /// Actual format of the item.
        format: Format,
        /// Name of the requested Rust element type.
        requested: &'static str,
    },

    /// The host is not little-endian.
    #[error("only little-endian hosts are supported")]
    PlatformNotSupported,

    /// Header byte carries a format code that is not defined.
    #[error("unknown format code: 0o{0:02o}")]
    UnknownFormat(u8),

    /// Decode error at a specific offset.
    #[error("decode error at offset {offset}: {message}")]
    DecodeError {
        /// Byte offset where the error occurred.
        offset: usize,
        /// Description of the error.
        message: String,
    },

    /// Input continues after a complete item.
    #[error("{remaining} trailing bytes after item ending at offset {offset}")]
    TrailingBytes {
        /// Offset where the item ended.
        offset: usize,
        /// Bytes left over.
        remaining: usize,
    },

    /// Lists nested deeper than the decoder allows.
    #[error("list nesting exceeds maximum depth {max}")]
    NestingTooDeep {
        /// Configured maximum.
        max: usize,
    },

    /// Payload length cannot be expressed in a 3-byte length field.
    #[error("item length too large: {length} (max {max})")]
    LengthOverflow {
        /// Actual length.
        length: usize,
        /// Maximum encodable length.
        max: usize,
    },
}

impl ItemError {
    /// Create a decode error at a specific offset.
    pub fn decode_at(offset: usize, message: impl Into<String>) -> Self {
        ItemError::DecodeError {
            offset,
            message: message.into(),
        }
    }

    /// Create an unsupported operation error.
    pub fn unsupported(operation: &'static str, format: Format) -> Self {
        ItemError::UnsupportedOperation { operation, format }
    }
}

/// Result type alias for item operations.
pub type ItemResult<T> = Result<T, ItemError>;
