use std::sync::Arc;

use binlayout_schema::{Descriptor, SchemaRegistry};
use bytes::Bytes;

use crate::config::CodecConfig;
use crate::decode::decode;
use crate::encode::encode_with;
use crate::error::{CodecError, Result};
use crate::value::Value;

/// A descriptor bound once and reused for many decode/encode calls.
///
/// The descriptor is immutable and shared behind an `Arc`, so a `Layout` is
/// cheap to clone and safe to use from several threads at once.
#[derive(Debug, Clone)]
pub struct Layout {
    descriptor: Arc<Descriptor>,
    config: CodecConfig,
}

impl Layout {
    /// Bind a descriptor with the default config.
    pub fn new(descriptor: impl Into<Arc<Descriptor>>) -> Self {
        Self::with_config(descriptor, CodecConfig::default())
    }

    /// Bind a descriptor with explicit config.
    pub fn with_config(descriptor: impl Into<Arc<Descriptor>>, config: CodecConfig) -> Self {
        Self {
            descriptor: descriptor.into(),
            config,
        }
    }

    /// Parse JSON notation and bind it.
    pub fn from_notation(notation: &str) -> Result<Self> {
        Ok(Self::new(Descriptor::from_notation(notation)?))
    }

    /// Bind a named schema from a registry.
    pub fn from_registry(registry: &SchemaRegistry, name: &str) -> Result<Self> {
        Ok(Self::new(registry.shared(name)?))
    }

    /// Decode a value, discarding the consumed byte count.
    pub fn decode(&self, bytes: impl AsRef<[u8]>) -> Result<Value> {
        self.decode_with_size(bytes).map(|(value, _)| value)
    }

    /// Decode a value and report how many bytes it used.
    pub fn decode_with_size(&self, bytes: impl AsRef<[u8]>) -> Result<(Value, usize)> {
        let bytes = bytes.as_ref();
        let (value, consumed) = decode(&self.descriptor, bytes)?;
        if !self.config.allow_trailing && consumed < bytes.len() {
            return Err(CodecError::TrailingBytes {
                consumed,
                total: bytes.len(),
            });
        }
        Ok((value, consumed))
    }

    /// Encode a value.
    pub fn encode(&self, value: &Value) -> Result<Bytes> {
        encode_with(&self.descriptor, value, &self.config)
    }

    /// Fixed byte size of the layout.
    pub fn size(&self) -> usize {
        self.descriptor.size()
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}
