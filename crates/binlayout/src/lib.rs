//! Declarative little-endian binary layouts.
//!
//! Describe a wire or file format as data, then decode bytes into a
//! structured value and encode it back. The two directions are inverses.
//!
//! # Crate Structure
//!
//! - [`bytes`]: Canonical byte sequences: hex, concat, slicing, patterns
//! - [`schema`]: Layout descriptors, JSON notation, named registry
//! - [`codec`]: Decode/encode engines and the reusable [`Layout`] handle
//!
//! ```no_run
//! use binlayout::{Layout, SchemaRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::with_builtins()?;
//! let elf = Layout::from_registry(&registry, "ELF64")?;
//! let header = elf.decode(std::fs::read("/bin/true")?)?;
//! println!("entry = {:?}", header.get("e_entry"));
//! # Ok(())
//! # }
//! ```

/// Re-export byte normalization helpers.
pub mod bytes {
    pub use binlayout_bytes::*;
}

/// Re-export schema types.
pub mod schema {
    pub use binlayout_schema::*;
}

/// Re-export codec types.
pub mod codec {
    pub use binlayout_codec::*;
}

pub use binlayout_codec::{CodecConfig, CodecError, Layout, PaddingPolicy, Record, Value};
pub use binlayout_schema::{Descriptor, ScalarKind, SchemaError, SchemaRegistry};
