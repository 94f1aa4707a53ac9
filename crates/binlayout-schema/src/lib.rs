//! Schema descriptors for declarative binary layouts.
//!
//! A [`Descriptor`] describes a fixed-size little-endian record: scalar
//! integers, opaque padding, literal magic bytes, and nested composites
//! whose field order is the byte order.
//!
//! Descriptors are written in a small JSON notation:
//!
//! ```text
//! {
//!     "magic": "raw:\u007fELF",
//!     "class": "u8",
//!     "pad":   7,
//!     "entry": "u64"
//! }
//! ```
//!
//! Named schemas live in a [`SchemaRegistry`]; nothing is ever evaluated
//! as code.

pub mod builtin;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod notation;
pub mod registry;

pub use config::RegistryConfig;
pub use descriptor::{CompositeBuilder, Descriptor, Field, LayoutEntry, ScalarKind};
pub use error::{Result, SchemaError};
pub use registry::SchemaRegistry;
