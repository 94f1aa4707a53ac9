//! Bridge between [`Value`] and JSON.
//!
//! Integers stay exact (no float round trip), padding travels as a hex
//! string, magic fields as `null`.

use binlayout_schema::Descriptor;
use serde_json::Value as Json;

use crate::error::{CodecError, Result};
use crate::path::FieldPath;
use crate::value::{Record, Value};

/// Render a value as JSON text, fields in declaration order.
pub fn to_json_string(value: &Value, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Build a [`Value`] from JSON, guided by `descriptor`.
///
/// Scalars accept JSON integers or strings holding a decimal or `0x` hex
/// integer. Padding accepts a hex string or `null`. Magic fields may hold
/// anything or be absent.
pub fn from_json(descriptor: &Descriptor, json: &Json) -> Result<Value> {
    let mut path = FieldPath::default();
    convert(descriptor, json, &mut path)
}

fn convert<'d>(descriptor: &'d Descriptor, json: &Json, path: &mut FieldPath<'d>) -> Result<Value> {
    match descriptor {
        Descriptor::Magic(_) => Ok(Value::Unit),
        Descriptor::Padding(_) => match json {
            Json::Null => Ok(Value::Unit),
            Json::String(text) => binlayout_bytes::from_hex(text)
                .map(Value::Bytes)
                .map_err(|source| CodecError::Bytes {
                    path: path.render(),
                    source,
                }),
            other => Err(mismatch(path, "hex string", other)),
        },
        Descriptor::Scalar(kind) => {
            let n = json_integer(json).ok_or_else(|| mismatch(path, kind.token(), json))?;
            Value::scalar(*kind, n).ok_or_else(|| CodecError::Range {
                path: path.render(),
                value: n,
                kind: *kind,
            })
        }
        Descriptor::Composite(fields) => {
            let Json::Object(object) = json else {
                return Err(mismatch(path, "record", json));
            };
            let mut record = Record::with_capacity(fields.len());
            for field in fields {
                path.push(&field.name);
                match (object.get(&field.name), &field.descriptor) {
                    (Some(child), descriptor) => {
                        record.push(field.name.clone(), convert(descriptor, child, path)?);
                    }
                    (None, Descriptor::Magic(_) | Descriptor::Padding(_)) => {
                        record.push(field.name.clone(), Value::Unit);
                    }
                    (None, _) => {
                        return Err(CodecError::MissingField {
                            path: path.render(),
                        })
                    }
                }
                path.pop();
            }
            Ok(Value::Record(record))
        }
    }
}

fn json_integer(json: &Json) -> Option<i128> {
    match json {
        Json::Number(number) => number
            .as_u64()
            .map(i128::from)
            .or_else(|| number.as_i64().map(i128::from)),
        Json::String(text) => parse_integer(text),
        _ => None,
    }
}

fn parse_integer(text: &str) -> Option<i128> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (radix, body) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (16, hex.replace('_', "")),
        None => (10, digits.replace('_', "")),
    };
    // The std parsers accept their own sign; only the one stripped above counts.
    if body.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = i128::from_str_radix(&body, radix).ok()?;
    if negative {
        magnitude.checked_neg()
    } else {
        Some(magnitude)
    }
}

fn mismatch(path: &FieldPath<'_>, expected: &'static str, found: &Json) -> CodecError {
    CodecError::TypeMismatch {
        path: path.render(),
        expected,
        found: json_kind(found),
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::encode::encode;

    fn header() -> Descriptor {
        Descriptor::from_notation(r#"{"magic":"raw:AB","flag":"u8","value":"u32","pad":2}"#)
            .unwrap()
    }

    #[test]
    fn builds_typed_values_from_json() {
        let value = from_json(&header(), &json!({"flag": 1, "value": "0x12345678"})).unwrap();
        assert_eq!(value.get("flag"), Some(&Value::U8(1)));
        assert_eq!(value.get("value"), Some(&Value::U32(0x1234_5678)));
        assert_eq!(value.get("magic"), Some(&Value::Unit));
        assert_eq!(value.get("pad"), Some(&Value::Unit));
        assert_eq!(
            encode(&header(), &value).unwrap().as_ref(),
            &[0x41, 0x42, 0x01, 0x78, 0x56, 0x34, 0x12, 0, 0]
        );
    }

    #[test]
    fn json_text_round_trip_is_exact_for_u64() {
        let descriptor = Descriptor::from_notation(r#"{"big":"u64","neg":"s64"}"#).unwrap();
        let value = Value::Record(
            Record::new()
                .with("big", u64::MAX)
                .with("neg", i64::MIN),
        );
        let text = to_json_string(&value, false).unwrap();
        assert_eq!(
            text,
            r#"{"big":18446744073709551615,"neg":-9223372036854775808}"#
        );
        let parsed: Json = serde_json::from_str(&text).unwrap();
        assert_eq!(from_json(&descriptor, &parsed).unwrap(), value);
    }

    #[test]
    fn padding_hex_is_decoded() {
        let value = from_json(&header(), &json!({"flag": 0, "value": 0, "pad": "beef"})).unwrap();
        assert_eq!(
            value.get("pad").and_then(Value::as_bytes).map(|b| &b[..]),
            Some(&[0xbe, 0xef][..])
        );

        assert!(matches!(
            from_json(&header(), &json!({"flag": 0, "value": 0, "pad": "xyz"})),
            Err(CodecError::Bytes { path, .. }) if path == "pad"
        ));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            from_json(&header(), &json!({"flag": 256, "value": 0})),
            Err(CodecError::Range { value: 256, .. })
        ));
        assert!(matches!(
            from_json(&header(), &json!({"flag": 1})),
            Err(CodecError::MissingField { path }) if path == "value"
        ));
        assert!(matches!(
            from_json(&header(), &json!({"flag": 1.5, "value": 0})),
            Err(CodecError::TypeMismatch { found: "number", .. })
        ));
        assert!(matches!(
            from_json(&header(), &json!([1, 2])),
            Err(CodecError::TypeMismatch { expected: "record", found: "array", .. })
        ));
    }

    #[test]
    fn doubled_sign_is_a_type_mismatch() {
        assert!(matches!(
            from_json(&header(), &json!({"flag": "--1", "value": 0})),
            Err(CodecError::TypeMismatch { found: "string", .. })
        ));
    }

    #[test]
    fn parses_integer_strings() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("-0x10"), Some(-16));
        assert_eq!(parse_integer("0xffff_ffff"), Some(0xffff_ffff));
        assert_eq!(parse_integer(" 7 "), Some(7));
        assert_eq!(parse_integer("0x"), None);
        assert_eq!(parse_integer("seven"), None);
        assert_eq!(parse_integer("--5"), None);
        assert_eq!(parse_integer("+5"), None);
        assert_eq!(parse_integer("-+5"), None);
        assert_eq!(parse_integer("0x-5"), None);
        assert_eq!(
            parse_integer("--170141183460469231731687303715884105728"),
            None
        );
        assert_eq!(parse_integer("-170141183460469231731687303715884105727"), Some(-i128::MAX));
    }
}
