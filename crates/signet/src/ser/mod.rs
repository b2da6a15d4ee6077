// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive codec: fixed-width scalars and strings in wire order.
//!
//! Scalars are big-endian, fixed width (`ScalarKind::width`). Strings are a
//! 4-byte big-endian length equal to `content bytes + 1`, the UTF-8 content,
//! then a single zero terminator. String decode is lossy on invalid UTF-8
//! (replacement characters, never fatal).

pub mod cursor;

pub use cursor::{Cursor, Sink};

use crate::error::{CodecError, CodecResult};
use crate::types::ScalarKind;
use crate::value::Value;

/// Append the big-endian fixed-width representation of `value` to `sink`.
///
/// Fails with `TypeMismatch` when the value's kind disagrees with `kind`.
pub fn encode_scalar(kind: ScalarKind, value: &Value, sink: &mut Sink) -> CodecResult<()> {
    match (kind, value) {
        (ScalarKind::Bool, Value::Bool(v)) => sink.write_u8(u8::from(*v)),
        (ScalarKind::Byte, Value::Byte(v)) => sink.write_u8(*v),
        (ScalarKind::I8, Value::I8(v)) => sink.write_i8(*v),
        (ScalarKind::I16, Value::I16(v)) => sink.write_i16_be(*v),
        (ScalarKind::I32, Value::I32(v)) => sink.write_i32_be(*v),
        (ScalarKind::I64, Value::I64(v)) => sink.write_i64_be(*v),
        (ScalarKind::F32, Value::F32(v)) => sink.write_f32_be(*v),
        (ScalarKind::F64, Value::F64(v)) => sink.write_f64_be(*v),
        _ => {
            return Err(CodecError::TypeMismatch {
                expected: kind.name().to_string(),
                found: value.kind_name().to_string(),
            })
        }
    }
    Ok(())
}

/// Consume exactly `kind.width()` bytes and return the decoded value.
pub fn decode_scalar(kind: ScalarKind, cursor: &mut Cursor<'_>) -> CodecResult<Value> {
    Ok(match kind {
        ScalarKind::Bool => Value::Bool(cursor.read_u8()? != 0),
        ScalarKind::Byte => Value::Byte(cursor.read_u8()?),
        ScalarKind::I8 => Value::I8(cursor.read_i8()?),
        ScalarKind::I16 => Value::I16(cursor.read_i16_be()?),
        ScalarKind::I32 => Value::I32(cursor.read_i32_be()?),
        ScalarKind::I64 => Value::I64(cursor.read_i64_be()?),
        ScalarKind::F32 => Value::F32(cursor.read_f32_be()?),
        ScalarKind::F64 => Value::F64(cursor.read_f64_be()?),
    })
}

/// Length prefix covers content bytes plus the zero terminator.
pub fn encode_string(s: &str, sink: &mut Sink) {
    let bytes = s.as_bytes();
    sink.write_u32_be(bytes.len() as u32 + 1);
    sink.write_bytes(bytes);
    sink.write_u8(0);
}

/// Read one length-prefixed string; the terminator byte is discarded.
///
/// A zero length is malformed (no room for the terminator).
pub fn decode_string(cursor: &mut Cursor<'_>) -> CodecResult<String> {
    let len = cursor.read_u32_be()? as usize;
    if len == 0 {
        return Err(CodecError::Malformed(
            "zero-length string field".to_string(),
        ));
    }
    let bytes = cursor.read_bytes(len)?;
    Ok(String::from_utf8_lossy(&bytes[..len - 1]).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip_scalar(kind: ScalarKind, value: Value) {
        let mut sink = Sink::new();
        encode_scalar(kind, &value, &mut sink).expect("encode");
        assert_eq!(sink.len(), kind.width());
        let bytes = sink.into_bytes();
        let mut cursor = Cursor::new(&bytes);
        assert_eq!(decode_scalar(kind, &mut cursor).expect("decode"), value);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_scalar_roundtrips() {
        roundtrip_scalar(ScalarKind::Bool, Value::Bool(true));
        roundtrip_scalar(ScalarKind::Byte, Value::Byte(0xFE));
        roundtrip_scalar(ScalarKind::I8, Value::I8(-128));
        roundtrip_scalar(ScalarKind::I16, Value::I16(-30_000));
        roundtrip_scalar(ScalarKind::I32, Value::I32(i32::MIN));
        roundtrip_scalar(ScalarKind::I64, Value::I64(i64::MAX));
        roundtrip_scalar(ScalarKind::F32, Value::F32(3.5));
        roundtrip_scalar(ScalarKind::F64, Value::F64(-0.0625));
    }

    #[test]
    fn test_scalar_type_mismatch() {
        let mut sink = Sink::new();
        let err = encode_scalar(ScalarKind::I32, &Value::F64(1.0), &mut sink).unwrap_err();
        assert_eq!(
            err,
            CodecError::TypeMismatch {
                expected: "i32".into(),
                found: "f64".into(),
            }
        );
    }

    #[test]
    fn test_string_wire_layout() {
        let mut sink = Sink::new();
        encode_string("abc", &mut sink);
        assert_eq!(sink.as_bytes(), &[0, 0, 0, 4, b'a', b'b', b'c', 0]);
    }

    #[test]
    fn test_string_roundtrip_empty() {
        let mut sink = Sink::new();
        encode_string("", &mut sink);
        assert_eq!(sink.as_bytes(), &[0, 0, 0, 1, 0]);
        let bytes = sink.into_bytes();
        let mut cursor = Cursor::new(&bytes);
        assert_eq!(decode_string(&mut cursor).expect("decode"), "");
    }

    #[test]
    fn test_string_interior_nul_roundtrips() {
        // The terminator is appended, not a boundary; interior NULs are
        // content like any other byte.
        let mut sink = Sink::new();
        encode_string("a\0b", &mut sink);
        let bytes = sink.into_bytes();
        let mut cursor = Cursor::new(&bytes);
        assert_eq!(decode_string(&mut cursor).expect("decode"), "a\0b");
    }

    #[test]
    fn test_string_zero_length_is_malformed() {
        let bytes = [0u8, 0, 0, 0];
        let mut cursor = Cursor::new(&bytes);
        let err = decode_string(&mut cursor).unwrap_err();
        assert!(matches!(err, CodecError::Malformed(_)));
    }

    #[test]
    fn test_string_truncated_content_underruns() {
        // Length claims 5 bytes but only 2 remain.
        let bytes = [0u8, 0, 0, 5, b'h', b'i'];
        let mut cursor = Cursor::new(&bytes);
        let err = decode_string(&mut cursor).unwrap_err();
        assert_eq!(err, CodecError::Underrun { need: 5, have: 2 });
    }

    #[test]
    fn test_string_invalid_utf8_replaced() {
        let bytes = [0u8, 0, 0, 3, 0xFF, 0xFE, 0];
        let mut cursor = Cursor::new(&bytes);
        let s = decode_string(&mut cursor).expect("lossy decode");
        assert_eq!(s, "\u{FFFD}\u{FFFD}");
    }
}
