// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic message codec: one encode/decode pair driven entirely by
//! [`TypeDescriptor`](crate::types::TypeDescriptor) metadata.
//!
//! Top-level wire form is the 8-byte big-endian fingerprint followed by the
//! positional payload. Nested message fields contribute payload bytes only;
//! the single leading fingerprint guards the whole tree, because nested
//! shapes are folded into the outer type's fingerprint.
//!
//! Array dimensions are walked outermost first. A length-field dimension
//! reads its element count from the referenced sibling field, which the
//! registry guarantees precedes the array.

use crate::error::{CodecError, CodecResult};
use crate::fingerprint::Fingerprint;
use crate::message::DynamicMessage;
use crate::registry::{TypeHandle, TypeRegistry};
use crate::ser::{decode_scalar, decode_string, encode_scalar, encode_string, Cursor, Sink};
use crate::types::{Dim, ElemType, FieldType};
use crate::value::Value;

/// Encode one message to its framed wire form.
///
/// The length-field value is authoritative at encode time: if an array
/// holds a different number of elements than its dimension claims, encoding
/// fails with `Malformed` rather than silently truncating or padding.
pub fn encode(registry: &TypeRegistry, message: &DynamicMessage) -> CodecResult<Vec<u8>> {
    let mut sink = Sink::new();
    sink.write_u64_be(registry.fingerprint(message.handle()).raw());
    encode_payload(registry, message, &mut sink)?;
    Ok(sink.into_bytes())
}

/// Decode one framed message, expecting the type identified by `handle`.
///
/// The leading fingerprint is compared before any field byte is touched;
/// disagreement fails with `SchemaMismatch`. Trailing bytes after the
/// payload are ignored.
pub fn decode(
    registry: &TypeRegistry,
    handle: TypeHandle,
    bytes: &[u8],
) -> CodecResult<DynamicMessage> {
    let mut cursor = Cursor::new(bytes);
    let found = Fingerprint::from_raw(cursor.read_u64_be()?);
    let expected = registry.fingerprint(handle);
    if found != expected {
        return Err(CodecError::SchemaMismatch { expected, found });
    }
    decode_payload(registry, handle, &mut cursor)
}

fn encode_payload(
    registry: &TypeRegistry,
    message: &DynamicMessage,
    sink: &mut Sink,
) -> CodecResult<()> {
    let descriptor = message.descriptor();
    for (field, value) in descriptor.fields().iter().zip(message.values()) {
        encode_field(registry, &field.ty, value, message.values(), sink)?;
    }
    Ok(())
}

fn encode_field(
    registry: &TypeRegistry,
    ty: &FieldType,
    value: &Value,
    siblings: &[Value],
    sink: &mut Sink,
) -> CodecResult<()> {
    match ty {
        FieldType::Scalar(kind) => encode_scalar(*kind, value, sink),
        FieldType::String => {
            let s = value.as_str().ok_or_else(|| CodecError::TypeMismatch {
                expected: "string".to_string(),
                found: value.kind_name().to_string(),
            })?;
            encode_string(s, sink);
            Ok(())
        }
        FieldType::Message(handle) => encode_nested(registry, *handle, value, sink),
        FieldType::Array { elem, dims } => encode_array(registry, *elem, dims, value, siblings, sink),
    }
}

fn encode_array(
    registry: &TypeRegistry,
    elem: ElemType,
    dims: &[Dim],
    value: &Value,
    siblings: &[Value],
    sink: &mut Sink,
) -> CodecResult<()> {
    match dims.split_first() {
        None => encode_element(registry, elem, value, sink),
        Some((dim, rest)) => {
            let expected = resolve_dim(*dim, siblings)?;
            let items = value.as_array().ok_or_else(|| CodecError::TypeMismatch {
                expected: "array".to_string(),
                found: value.kind_name().to_string(),
            })?;
            if items.len() != expected {
                return Err(CodecError::Malformed(format!(
                    "array holds {} elements but its dimension says {}",
                    items.len(),
                    expected
                )));
            }
            for item in items {
                encode_array(registry, elem, rest, item, siblings, sink)?;
            }
            Ok(())
        }
    }
}

fn encode_element(
    registry: &TypeRegistry,
    elem: ElemType,
    value: &Value,
    sink: &mut Sink,
) -> CodecResult<()> {
    match elem {
        ElemType::Scalar(kind) => encode_scalar(kind, value, sink),
        ElemType::String => {
            let s = value.as_str().ok_or_else(|| CodecError::TypeMismatch {
                expected: "string".to_string(),
                found: value.kind_name().to_string(),
            })?;
            encode_string(s, sink);
            Ok(())
        }
        ElemType::Message(handle) => encode_nested(registry, handle, value, sink),
    }
}

/// Nested messages are encoded payload-only. Handing a value of the wrong
/// registered type to a message field is a programming error, not a data
/// error, so the fingerprint check here asserts.
fn encode_nested(
    registry: &TypeRegistry,
    expected: TypeHandle,
    value: &Value,
    sink: &mut Sink,
) -> CodecResult<()> {
    let nested = value.as_message().ok_or_else(|| CodecError::TypeMismatch {
        expected: registry.name(expected).to_string(),
        found: value.kind_name().to_string(),
    })?;
    assert_eq!(
        registry.fingerprint(nested.handle()),
        registry.fingerprint(expected),
        "nested message `{}` does not match field type `{}`",
        nested.type_name(),
        registry.name(expected)
    );
    encode_payload(registry, nested, sink)
}

fn decode_payload(
    registry: &TypeRegistry,
    handle: TypeHandle,
    cursor: &mut Cursor<'_>,
) -> CodecResult<DynamicMessage> {
    let descriptor = registry.descriptor(handle).clone();
    let mut values: Vec<Value> = Vec::with_capacity(descriptor.fields().len());
    for field in descriptor.fields() {
        let value = decode_field(registry, &field.ty, &values, cursor)?;
        values.push(value);
    }
    Ok(DynamicMessage::from_parts(descriptor, handle, values))
}

fn decode_field(
    registry: &TypeRegistry,
    ty: &FieldType,
    decoded: &[Value],
    cursor: &mut Cursor<'_>,
) -> CodecResult<Value> {
    match ty {
        FieldType::Scalar(kind) => decode_scalar(*kind, cursor),
        FieldType::String => Ok(Value::String(decode_string(cursor)?)),
        FieldType::Message(handle) => {
            Ok(Value::Message(decode_payload(registry, *handle, cursor)?))
        }
        FieldType::Array { elem, dims } => decode_array(registry, *elem, dims, decoded, cursor),
    }
}

fn decode_array(
    registry: &TypeRegistry,
    elem: ElemType,
    dims: &[Dim],
    decoded: &[Value],
    cursor: &mut Cursor<'_>,
) -> CodecResult<Value> {
    match dims.split_first() {
        None => decode_element(registry, elem, cursor),
        Some((dim, rest)) => {
            let count = resolve_dim(*dim, decoded)?;
            // Element count is attacker-controlled; let the cursor underrun
            // on short input rather than reserving `count` slots up front.
            let mut items = Vec::new();
            for _ in 0..count {
                items.push(decode_array(registry, elem, rest, decoded, cursor)?);
            }
            Ok(Value::Array(items))
        }
    }
}

fn decode_element(
    registry: &TypeRegistry,
    elem: ElemType,
    cursor: &mut Cursor<'_>,
) -> CodecResult<Value> {
    match elem {
        ElemType::Scalar(kind) => decode_scalar(kind, cursor),
        ElemType::String => Ok(Value::String(decode_string(cursor)?)),
        ElemType::Message(handle) => Ok(Value::Message(decode_payload(registry, handle, cursor)?)),
    }
}

fn resolve_dim(dim: Dim, siblings: &[Value]) -> CodecResult<usize> {
    match dim {
        Dim::Fixed(n) => Ok(n as usize),
        Dim::Field(index) => {
            let len = siblings[index].as_length().ok_or_else(|| {
                CodecError::Malformed(format!(
                    "length field at index {} is not an integer",
                    index
                ))
            })?;
            usize::try_from(len)
                .map_err(|_| CodecError::Malformed(format!("negative array length {}", len)))
        }
    }
}
