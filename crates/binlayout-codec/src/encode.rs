use binlayout_schema::{Descriptor, ScalarKind};
use bytes::{BufMut, Bytes, BytesMut};

use crate::config::{CodecConfig, PaddingPolicy};
use crate::error::{CodecError, Result};
use crate::path::FieldPath;
use crate::value::Value;

/// Encode `value` against `descriptor` with the default config.
///
/// Padding is zero-filled and magic literals are emitted verbatim whatever
/// the value holds for them.
pub fn encode(descriptor: &Descriptor, value: &Value) -> Result<Bytes> {
    encode_with(descriptor, value, &CodecConfig::default())
}

/// Encode `value` against `descriptor` with explicit config.
///
/// Layouts larger than [`CodecConfig::max_encode_size`] are refused before
/// anything is allocated.
pub fn encode_with(descriptor: &Descriptor, value: &Value, config: &CodecConfig) -> Result<Bytes> {
    let size = descriptor.checked_size().ok_or(CodecError::SizeOverflow)?;
    if size > config.max_encode_size {
        return Err(CodecError::TooLarge {
            size,
            max: config.max_encode_size,
        });
    }
    let mut out = BytesMut::with_capacity(size);
    let mut path = FieldPath::default();
    encode_into(descriptor, Some(value), config, &mut path, &mut out).inspect_err(|err| {
        tracing::debug!(error = %err, "encode failed");
    })?;
    tracing::trace!(len = out.len(), "encoded layout");
    Ok(out.freeze())
}

/// Emit one descriptor's chunk. `value` is `None` when a record lacks the field.
fn encode_into<'d>(
    descriptor: &'d Descriptor,
    value: Option<&Value>,
    config: &CodecConfig,
    path: &mut FieldPath<'d>,
    out: &mut BytesMut,
) -> Result<()> {
    match descriptor {
        Descriptor::Magic(literal) => out.put_slice(literal),
        Descriptor::Padding(len) => write_padding(*len, value, config.padding, path, out)?,
        Descriptor::Scalar(kind) => {
            let value = value.ok_or_else(|| CodecError::MissingField {
                path: path.render(),
            })?;
            write_scalar(*kind, value, path, out)?;
        }
        Descriptor::Composite(fields) => {
            let record = match value {
                Some(Value::Record(record)) => record,
                Some(other) => {
                    return Err(CodecError::TypeMismatch {
                        path: path.render(),
                        expected: "record",
                        found: other.kind_name(),
                    })
                }
                None => {
                    return Err(CodecError::MissingField {
                        path: path.render(),
                    })
                }
            };
            for field in fields {
                path.push(&field.name);
                encode_into(&field.descriptor, record.get(&field.name), config, path, out)?;
                path.pop();
            }
        }
    }
    Ok(())
}

fn write_padding(
    len: usize,
    value: Option<&Value>,
    policy: PaddingPolicy,
    path: &FieldPath<'_>,
    out: &mut BytesMut,
) -> Result<()> {
    match (policy, value) {
        (PaddingPolicy::Preserve, Some(Value::Bytes(bytes))) => {
            if bytes.len() != len {
                return Err(CodecError::PaddingLength {
                    path: path.render(),
                    expected: len,
                    found: bytes.len(),
                });
            }
            out.put_slice(bytes);
        }
        (PaddingPolicy::Preserve, Some(other)) if !other.is_unit() => {
            return Err(CodecError::TypeMismatch {
                path: path.render(),
                expected: "bytes",
                found: other.kind_name(),
            });
        }
        _ => out.put_bytes(0, len),
    }
    Ok(())
}

fn write_scalar(kind: ScalarKind, value: &Value, path: &FieldPath<'_>, out: &mut BytesMut) -> Result<()> {
    let n = value.as_i128().ok_or_else(|| CodecError::TypeMismatch {
        path: path.render(),
        expected: kind.token(),
        found: value.kind_name(),
    })?;
    if n < kind.min() || n > kind.max() {
        return Err(CodecError::Range {
            path: path.render(),
            value: n,
            kind,
        });
    }

    match kind {
        ScalarKind::U8 => out.put_u8(n as u8),
        ScalarKind::U16 => out.put_u16_le(n as u16),
        ScalarKind::U32 => out.put_u32_le(n as u32),
        ScalarKind::U64 => out.put_u64_le(n as u64),
        ScalarKind::I8 => out.put_i8(n as i8),
        ScalarKind::I16 => out.put_i16_le(n as i16),
        ScalarKind::I32 => out.put_i32_le(n as i32),
        ScalarKind::I64 => out.put_i64_le(n as i64),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use binlayout_schema::Field;

    use super::*;
    use crate::decode::decode;
    use crate::value::Record;

    fn header() -> Descriptor {
        Descriptor::builder()
            .magic("magic", b"AB")
            .scalar("flag", ScalarKind::U8)
            .scalar("value", ScalarKind::U32)
            .build()
            .unwrap()
    }

    #[test]
    fn encodes_header_scenario() {
        let value = Value::Record(
            Record::new()
                .with("flag", 1u8)
                .with("value", 0x1234_5678u32),
        );
        let bytes = encode(&header(), &value).unwrap();
        assert_eq!(bytes.as_ref(), &[0x41, 0x42, 0x01, 0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn decoded_value_reencodes_identically() {
        let input = [0x41, 0x42, 0x01, 0x78, 0x56, 0x34, 0x12];
        let (value, _) = decode(&header(), &input).unwrap();
        assert_eq!(encode(&header(), &value).unwrap().as_ref(), &input);
    }

    #[test]
    fn u32_is_little_endian() {
        let bytes = encode(&Descriptor::scalar(ScalarKind::U32), &Value::U32(0x0102_0304)).unwrap();
        assert_eq!(bytes.as_ref(), &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn u64_max_round_trips() {
        let descriptor = Descriptor::scalar(ScalarKind::U64);
        let bytes = encode(&descriptor, &Value::U64(u64::MAX)).unwrap();
        assert_eq!(bytes.as_ref(), &[0xff; 8]);
        let (value, _) = decode(&descriptor, &bytes).unwrap();
        assert_eq!(value, Value::U64(u64::MAX));
    }

    #[test]
    fn signed_values_use_twos_complement() {
        let bytes = encode(&Descriptor::scalar(ScalarKind::I16), &Value::I16(-2)).unwrap();
        assert_eq!(bytes.as_ref(), &[0xfe, 0xff]);
        let bytes = encode(&Descriptor::scalar(ScalarKind::I64), &Value::I64(i64::MIN)).unwrap();
        assert_eq!(bytes.as_ref(), &i64::MIN.to_le_bytes());
    }

    #[test]
    fn any_integer_variant_is_accepted_when_in_range() {
        let bytes = encode(&Descriptor::scalar(ScalarKind::U16), &Value::U64(0xbeef)).unwrap();
        assert_eq!(bytes.as_ref(), &[0xef, 0xbe]);
        let bytes = encode(&Descriptor::scalar(ScalarKind::I8), &Value::I64(-1)).unwrap();
        assert_eq!(bytes.as_ref(), &[0xff]);
    }

    #[test]
    fn out_of_range_is_rejected_not_truncated() {
        let err = encode(&Descriptor::scalar(ScalarKind::U8), &Value::U16(256)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Range {
                value: 256,
                kind: ScalarKind::U8,
                ..
            }
        ));
        assert!(matches!(
            encode(&Descriptor::scalar(ScalarKind::U32), &Value::I8(-1)),
            Err(CodecError::Range { .. })
        ));
        assert!(matches!(
            encode(&Descriptor::scalar(ScalarKind::I64), &Value::U64(u64::MAX)),
            Err(CodecError::Range { .. })
        ));
    }

    #[test]
    fn magic_ignores_supplied_value() {
        let value = Value::Record(
            Record::new()
                .with("magic", 0xffffu16)
                .with("flag", 0u8)
                .with("value", 0u32),
        );
        let bytes = encode(&header(), &value).unwrap();
        assert_eq!(&bytes[..2], b"AB");
    }

    #[test]
    fn missing_field_and_wrong_shape() {
        let value = Value::Record(Record::new().with("flag", 1u8));
        assert!(matches!(
            encode(&header(), &value),
            Err(CodecError::MissingField { path }) if path == "value"
        ));

        assert!(matches!(
            encode(&header(), &Value::U8(1)),
            Err(CodecError::TypeMismatch {
                expected: "record",
                found: "u8",
                ..
            })
        ));

        let value = Value::Record(
            Record::new()
                .with("flag", Value::Bytes(Bytes::new()))
                .with("value", 0u32),
        );
        assert!(matches!(
            encode(&header(), &value),
            Err(CodecError::TypeMismatch { expected: "u8", .. })
        ));
    }

    #[test]
    fn extra_record_fields_are_ignored() {
        let value = Value::Record(
            Record::new()
                .with("flag", 1u8)
                .with("value", 2u32)
                .with("comment", 99u8),
        );
        assert_eq!(encode(&header(), &value).unwrap().len(), 7);
    }

    #[test]
    fn oversized_layouts_fail_before_allocating() {
        let value = Value::Record(Record::new().with("a", 1u8));

        let overflowing = Descriptor::Composite(vec![
            Field::new("a", Descriptor::scalar(ScalarKind::U8)),
            Field::new("pad", Descriptor::padding(usize::MAX)),
        ]);
        assert!(matches!(
            encode(&overflowing, &value),
            Err(CodecError::SizeOverflow)
        ));

        let huge = Descriptor::builder()
            .scalar("a", ScalarKind::U8)
            .padding("pad", 1 << 40)
            .build()
            .unwrap();
        assert!(matches!(
            encode(&huge, &value),
            Err(CodecError::TooLarge { size, max })
                if size == (1 << 40) + 1 && max == crate::config::DEFAULT_MAX_ENCODE_SIZE
        ));

        let small = CodecConfig {
            max_encode_size: 4,
            ..CodecConfig::default()
        };
        let record = Value::Record(Record::new().with("flag", 1u8).with("value", 2u32));
        assert!(matches!(
            encode_with(&header(), &record, &small),
            Err(CodecError::TooLarge { size: 7, max: 4 })
        ));
    }

    fn padded() -> Descriptor {
        Descriptor::builder()
            .scalar("id", ScalarKind::U8)
            .padding("reserved", 3)
            .build()
            .unwrap()
    }

    #[test]
    fn zero_fill_padding_ignores_decoded_bytes() {
        let input = [0x07, 0xaa, 0xbb, 0xcc];
        let (value, _) = decode(&padded(), &input).unwrap();
        assert_eq!(
            value.get("reserved").and_then(Value::as_bytes).map(|b| &b[..]),
            Some(&[0xaa, 0xbb, 0xcc][..])
        );

        let bytes = encode(&padded(), &value).unwrap();
        assert_eq!(bytes.as_ref(), &[0x07, 0x00, 0x00, 0x00]);

        // Padding that was already zero survives the round trip.
        let (zeroed, _) = decode(&padded(), &bytes).unwrap();
        assert_eq!(encode(&padded(), &zeroed).unwrap(), bytes);
    }

    #[test]
    fn preserve_padding_round_trips_bytes() {
        let config = CodecConfig {
            padding: PaddingPolicy::Preserve,
            ..CodecConfig::default()
        };
        let input = [0x07, 0xaa, 0xbb, 0xcc];
        let (value, _) = decode(&padded(), &input).unwrap();
        let bytes = encode_with(&padded(), &value, &config).unwrap();
        assert_eq!(bytes.as_ref(), &input);

        let without = Value::Record(Record::new().with("id", 7u8));
        let bytes = encode_with(&padded(), &without, &config).unwrap();
        assert_eq!(bytes.as_ref(), &[0x07, 0, 0, 0]);
    }

    #[test]
    fn preserve_padding_checks_length_and_type() {
        let config = CodecConfig {
            padding: PaddingPolicy::Preserve,
            ..CodecConfig::default()
        };
        let short = Value::Record(Record::new().with("id", 7u8).with("reserved", vec![1u8]));
        assert!(matches!(
            encode_with(&padded(), &short, &config),
            Err(CodecError::PaddingLength {
                expected: 3,
                found: 1,
                ..
            })
        ));

        let wrong = Value::Record(Record::new().with("id", 7u8).with("reserved", 5u8));
        assert!(matches!(
            encode_with(&padded(), &wrong, &config),
            Err(CodecError::TypeMismatch { expected: "bytes", .. })
        ));
    }
}
