//! JSON schema notation.
//!
//! | JSON value            | Descriptor          |
//! |-----------------------|---------------------|
//! | `"u8"` .. `"s64"`     | `Scalar`            |
//! | non-negative integer  | `Padding(n)`        |
//! | `"raw:<byte-string>"` | `Magic(bytes)`      |
//! | object                | `Composite`, keys in document order |
//!
//! The text after `raw:` is a byte-string: each character is one byte, so
//! `"raw:\u007fELF"` is the four bytes `7f 45 4c 46`.

use std::fmt;

use serde::de::{self, MapAccess, Unexpected, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::descriptor::{Descriptor, Field, ScalarKind};
use crate::error::{Result, SchemaError};

/// Prefix marking a magic literal.
pub const MAGIC_PREFIX: &str = "raw:";

/// Raw notation tree, field order preserved, before type resolution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Notation {
    Token(String),
    Size(u64),
    Fields(Vec<(String, Notation)>),
}

impl Notation {
    pub(crate) fn into_descriptor(self) -> Result<Descriptor> {
        match self {
            Notation::Size(len) => usize::try_from(len)
                .map(Descriptor::Padding)
                .map_err(|_| SchemaError::InvalidNotation(format!("padding too large: {len}"))),
            Notation::Token(token) => match token.strip_prefix(MAGIC_PREFIX) {
                Some(literal) => Ok(Descriptor::Magic(
                    binlayout_bytes::byte_string_to_bytes(literal)?,
                )),
                None => token.parse::<ScalarKind>().map(Descriptor::Scalar),
            },
            Notation::Fields(entries) => {
                let fields = entries
                    .into_iter()
                    .map(|(name, child)| Ok(Field::new(name, child.into_descriptor()?)))
                    .collect::<Result<Vec<_>>>()?;
                Descriptor::composite(fields)
            }
        }
    }
}

struct NotationVisitor;

impl<'de> Visitor<'de> for NotationVisitor {
    type Value = Notation;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a type token, a padding size, or an object of fields")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Notation, E> {
        Ok(Notation::Token(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<Notation, E> {
        Ok(Notation::Token(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Notation, E> {
        Ok(Notation::Size(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Notation, E> {
        u64::try_from(value)
            .map(Notation::Size)
            .map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Notation, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, child)) = map.next_entry::<String, Notation>()? {
            entries.push((name, child));
        }
        Ok(Notation::Fields(entries))
    }
}

impl<'de> Deserialize<'de> for Notation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(NotationVisitor)
    }
}

impl<'de> Deserialize<'de> for Descriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Notation::deserialize(deserializer)?
            .into_descriptor()
            .map_err(de::Error::custom)
    }
}

impl Serialize for Descriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Descriptor::Scalar(kind) => serializer.serialize_str(kind.token()),
            Descriptor::Padding(len) => serializer.serialize_u64(*len as u64),
            Descriptor::Magic(literal) => serializer.serialize_str(&format!(
                "{MAGIC_PREFIX}{}",
                binlayout_bytes::bytes_to_byte_string(literal)
            )),
            Descriptor::Composite(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for field in fields {
                    map.serialize_entry(&field.name, &field.descriptor)?;
                }
                map.end()
            }
        }
    }
}

impl Descriptor {
    /// Parse JSON notation.
    ///
    /// Unlike the `Deserialize` impl, errors keep their kind:
    /// an unrecognised token is [`SchemaError::UnknownType`], a repeated
    /// key is [`SchemaError::DuplicateField`].
    pub fn from_notation(text: &str) -> Result<Self> {
        serde_json::from_str::<Notation>(text)?.into_descriptor()
    }

    /// Render as compact JSON notation.
    pub fn to_notation(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
