use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use bytes::Bytes;

use crate::error::{Result, SchemaError};

/// Fixed-width little-endian integer kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 8] = [
        ScalarKind::U8,
        ScalarKind::U16,
        ScalarKind::U32,
        ScalarKind::U64,
        ScalarKind::I8,
        ScalarKind::I16,
        ScalarKind::I32,
        ScalarKind::I64,
    ];

    /// Width in bits.
    pub fn width_bits(self) -> u32 {
        match self {
            ScalarKind::U8 | ScalarKind::I8 => 8,
            ScalarKind::U16 | ScalarKind::I16 => 16,
            ScalarKind::U32 | ScalarKind::I32 => 32,
            ScalarKind::U64 | ScalarKind::I64 => 64,
        }
    }

    /// Width in bytes.
    pub fn size(self) -> usize {
        (self.width_bits() / 8) as usize
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            ScalarKind::I8 | ScalarKind::I16 | ScalarKind::I32 | ScalarKind::I64
        )
    }

    /// Smallest representable value.
    pub fn min(self) -> i128 {
        if self.is_signed() {
            -(1i128 << (self.width_bits() - 1))
        } else {
            0
        }
    }

    /// Largest representable value.
    pub fn max(self) -> i128 {
        if self.is_signed() {
            (1i128 << (self.width_bits() - 1)) - 1
        } else {
            (1i128 << self.width_bits()) - 1
        }
    }

    /// Notation token (`u8` .. `s64`).
    pub fn token(self) -> &'static str {
        match self {
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::I8 => "s8",
            ScalarKind::I16 => "s16",
            ScalarKind::I32 => "s32",
            ScalarKind::I64 => "s64",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ScalarKind {
    type Err = SchemaError;

    fn from_str(token: &str) -> Result<Self> {
        ScalarKind::ALL
            .into_iter()
            .find(|kind| kind.token() == token)
            .ok_or_else(|| SchemaError::UnknownType(token.to_string()))
    }
}

/// A named field of a composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub descriptor: Descriptor,
}

impl Field {
    pub fn new(name: impl Into<String>, descriptor: Descriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
        }
    }
}

/// Recursive description of a fixed-size binary layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// Little-endian integer.
    Scalar(ScalarKind),
    /// `n` opaque bytes.
    Padding(usize),
    /// Literal bytes, checked on decode and emitted verbatim on encode.
    Magic(Bytes),
    /// Ordered named fields, packed back to back.
    Composite(Vec<Field>),
}

impl Descriptor {
    pub fn scalar(kind: ScalarKind) -> Self {
        Descriptor::Scalar(kind)
    }

    pub fn padding(len: usize) -> Self {
        Descriptor::Padding(len)
    }

    pub fn magic(literal: impl AsRef<[u8]>) -> Self {
        Descriptor::Magic(binlayout_bytes::to_bytes(literal))
    }

    /// Build a composite, rejecting duplicate field names and layouts whose
    /// total size does not fit in `usize`.
    pub fn composite(fields: Vec<Field>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }
        let composite = Descriptor::Composite(fields);
        if composite.checked_size().is_none() {
            return Err(SchemaError::InvalidNotation(
                "layout size overflows the address space".to_string(),
            ));
        }
        Ok(composite)
    }

    /// Start building a composite field by field.
    pub fn builder() -> CompositeBuilder {
        CompositeBuilder::default()
    }

    /// Total byte size, or `None` if the sum of the fields overflows.
    pub fn checked_size(&self) -> Option<usize> {
        match self {
            Descriptor::Scalar(kind) => Some(kind.size()),
            Descriptor::Padding(len) => Some(*len),
            Descriptor::Magic(literal) => Some(literal.len()),
            Descriptor::Composite(fields) => fields
                .iter()
                .try_fold(0usize, |acc, f| acc.checked_add(f.descriptor.checked_size()?)),
        }
    }

    /// Total byte size. Composites are the sum of their fields.
    ///
    /// [`Descriptor::composite`] rejects overflowing layouts, so this only
    /// reports `usize::MAX` for a `Composite` assembled by hand. Encoders
    /// should use [`Descriptor::checked_size`].
    pub fn size(&self) -> usize {
        self.checked_size().unwrap_or(usize::MAX)
    }

    /// Composite nesting depth; leaves are depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Descriptor::Composite(fields) => {
                1 + fields
                    .iter()
                    .map(|f| f.descriptor.depth())
                    .max()
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Look up a direct field of a composite.
    pub fn field(&self, name: &str) -> Option<&Descriptor> {
        match self {
            Descriptor::Composite(fields) => fields
                .iter()
                .find(|f| f.name == name)
                .map(|f| &f.descriptor),
            _ => None,
        }
    }

    /// Flatten into leaf entries with absolute offsets, in byte order.
    pub fn layout_entries(&self) -> Vec<LayoutEntry> {
        let mut entries = Vec::new();
        collect_entries(self, "", 0, &mut entries);
        entries
    }

    /// Short description of a leaf, e.g. `u32`, `pad[7]`, `magic 7f454c46`.
    pub fn kind_label(&self) -> String {
        match self {
            Descriptor::Scalar(kind) => kind.token().to_string(),
            Descriptor::Padding(len) => format!("pad[{len}]"),
            Descriptor::Magic(literal) => format!("magic {}", binlayout_bytes::to_hex(literal)),
            Descriptor::Composite(fields) => format!("struct[{}]", fields.len()),
        }
    }
}

fn collect_entries(descriptor: &Descriptor, path: &str, offset: usize, out: &mut Vec<LayoutEntry>) {
    match descriptor {
        Descriptor::Composite(fields) => {
            let mut cursor = offset;
            for field in fields {
                let child = if path.is_empty() {
                    field.name.clone()
                } else {
                    format!("{path}.{}", field.name)
                };
                collect_entries(&field.descriptor, &child, cursor, out);
                cursor = cursor.saturating_add(field.descriptor.size());
            }
        }
        leaf => out.push(LayoutEntry {
            path: path.to_string(),
            offset,
            size: leaf.size(),
            kind: leaf.kind_label(),
        }),
    }
}

/// One leaf of a flattened layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    /// Dotted field path; empty for a top-level leaf.
    pub path: String,
    pub offset: usize,
    pub size: usize,
    pub kind: String,
}

/// Incremental composite construction.
#[derive(Debug, Default)]
pub struct CompositeBuilder {
    fields: Vec<Field>,
}

impl CompositeBuilder {
    pub fn field(mut self, name: impl Into<String>, descriptor: Descriptor) -> Self {
        self.fields.push(Field::new(name, descriptor));
        self
    }

    pub fn scalar(self, name: impl Into<String>, kind: ScalarKind) -> Self {
        self.field(name, Descriptor::Scalar(kind))
    }

    pub fn padding(self, name: impl Into<String>, len: usize) -> Self {
        self.field(name, Descriptor::Padding(len))
    }

    pub fn magic(self, name: impl Into<String>, literal: impl AsRef<[u8]>) -> Self {
        self.field(name, Descriptor::magic(literal))
    }

    pub fn build(self) -> Result<Descriptor> {
        Descriptor::composite(self.fields)
    }
}
