use binlayout_schema::{Descriptor, ScalarKind};
use bytes::{Buf, Bytes};

use crate::error::{CodecError, Result};
use crate::path::FieldPath;
use crate::value::{Record, Value};

/// Decode `source` against `descriptor`.
///
/// Returns the value and the number of bytes consumed. Bytes past the end of
/// the layout are left untouched. On error nothing is returned: a magic
/// mismatch or short buffer anywhere aborts the whole composite.
pub fn decode(descriptor: &Descriptor, source: &[u8]) -> Result<(Value, usize)> {
    let mut path = FieldPath::default();
    let (value, consumed) = decode_at(descriptor, source, &mut path).inspect_err(|err| {
        tracing::debug!(error = %err, available = source.len(), "decode failed");
    })?;
    tracing::trace!(consumed, available = source.len(), "decoded layout");
    Ok((value, consumed))
}

fn decode_at<'d>(
    descriptor: &'d Descriptor,
    source: &[u8],
    path: &mut FieldPath<'d>,
) -> Result<(Value, usize)> {
    match descriptor {
        Descriptor::Padding(len) => {
            let bytes = take(source, *len, path)?;
            Ok((Value::Bytes(Bytes::copy_from_slice(bytes)), *len))
        }
        Descriptor::Scalar(kind) => {
            let buf = take(source, kind.size(), path)?;
            Ok((read_scalar(*kind, buf), kind.size()))
        }
        Descriptor::Magic(literal) => {
            let found = take(source, literal.len(), path)?;
            if found != literal.as_ref() {
                return Err(CodecError::MagicMismatch {
                    path: path.render(),
                    expected: binlayout_bytes::to_hex(literal),
                    found: binlayout_bytes::to_hex(found),
                });
            }
            Ok((Value::Unit, literal.len()))
        }
        Descriptor::Composite(fields) => {
            let mut record = Record::with_capacity(fields.len());
            let mut cursor = 0usize;
            for field in fields {
                path.push(&field.name);
                let (value, consumed) = decode_at(&field.descriptor, &source[cursor..], path)?;
                path.pop();
                cursor += consumed;
                record.push(field.name.clone(), value);
            }
            Ok((Value::Record(record), cursor))
        }
    }
}

fn take<'s>(source: &'s [u8], len: usize, path: &FieldPath<'_>) -> Result<&'s [u8]> {
    source.get(..len).ok_or_else(|| CodecError::ShortBuffer {
        path: path.render(),
        needed: len,
        available: source.len(),
    })
}

fn read_scalar(kind: ScalarKind, mut buf: &[u8]) -> Value {
    match kind {
        ScalarKind::U8 => Value::U8(buf.get_u8()),
        ScalarKind::U16 => Value::U16(buf.get_u16_le()),
        ScalarKind::U32 => Value::U32(buf.get_u32_le()),
        ScalarKind::U64 => Value::U64(buf.get_u64_le()),
        ScalarKind::I8 => Value::I8(buf.get_i8()),
        ScalarKind::I16 => Value::I16(buf.get_i16_le()),
        ScalarKind::I32 => Value::I32(buf.get_i32_le()),
        ScalarKind::I64 => Value::I64(buf.get_i64_le()),
    }
}
