//! Schema-driven decode and encode of little-endian binary layouts.
//!
//! [`decode`] walks a [`Descriptor`] over a byte slice and returns a
//! [`Value`] shaped like the schema plus the number of bytes consumed.
//! [`encode`] walks the same descriptor over a value and produces the bytes
//! `decode` would invert. [`Layout`] binds a descriptor once for repeated use.
//!
//! ```text
//! descriptor {magic: raw:"AB", flag: u8, value: u32}
//! bytes      41 42 01 78 56 34 12
//! value      {magic: (), flag: 1, value: 0x12345678}
//! ```
//!
//! Padding is zero-filled on encode unless [`PaddingPolicy::Preserve`] is set,
//! so decoded padding bytes survive a round trip only when they were zero or
//! the policy preserves them.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod json;
pub mod layout;
mod path;
pub mod value;

pub use binlayout_schema::{Descriptor, ScalarKind};
pub use config::{CodecConfig, PaddingPolicy, DEFAULT_MAX_ENCODE_SIZE};
pub use decode::decode;
pub use encode::{encode, encode_with};
pub use error::{CodecError, Result};
pub use json::{from_json, to_json_string};
pub use layout::Layout;
pub use value::{Record, Value};
