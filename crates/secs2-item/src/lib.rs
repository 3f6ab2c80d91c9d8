//! SECS-II Item Model
//!
//! This crate provides the value type for SECS-II (SEMI E5) message items and
//! the binary codec that converts items to and from their wire form.
//!
//! # Item Overview
//!
//! Every datum in a SECS-II message body is an [`Item`]:
//!
//! - **List** (`L`): an ordered sequence of child items, nested to any depth
//! - **Text** (`A`, `J`): ASCII or JIS-8 strings
//! - **Array** (`B`, `BOOLEAN`, `I1`..`I8`, `U1`..`U8`, `F4`, `F8`): fixed-width
//!   elements of a single kind
//!
//! Items are encoded as a format byte, a 1-3 byte big-endian length, and the
//! payload (see [`codec`]).
//!
//! # Example
//!
//! ```rust
//! use secs2_item::{decode_item, Item};
//!
//! let item = Item::list(vec![Item::ascii("PPID-01"), Item::u4(vec![1, 2, 3])]);
//!
//! let mut buf = Vec::new();
//! item.encode_to(&mut buf).unwrap();
//!
//! let decoded = decode_item(&buf).unwrap();
//! assert_eq!(decoded, item);
//! assert_eq!(decoded.get(1).unwrap().first_value::<u32>().unwrap(), 1);
//! ```

mod array;
pub mod codec;
mod config;
mod element;
mod error;
mod format;
mod item;
mod text;

pub use array::*;
pub use codec::{decode_item, encode_header, encode_item, encode_item_with, ItemDecoder, MAX_LENGTH};
pub use config::*;
pub use element::*;
pub use error::*;
pub use format::*;
pub use item::*;
pub use text::*;

/// Check that the host can run this crate.
///
/// Only little-endian hosts are supported. Call this once from the process
/// entry point and stop if it fails.
pub fn check_platform() -> ItemResult<()> {
    if cfg!(target_endian = "little") {
        Ok(())
    } else {
        Err(ItemError::PlatformNotSupported)
    }
}
