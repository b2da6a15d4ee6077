// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Byte-exact wire format checks: fingerprint framing, positional payloads,
// length-field arrays, and the failure modes a decoder must report.

use signet::{
    ArrayDim, CodecError, DynamicMessage, ScalarKind, TypeDescriptorBuilder, TypeRegistry,
};

fn triple_registry() -> (TypeRegistry, signet::TypeHandle) {
    let mut registry = TypeRegistry::new();
    let handle = registry.register(
        TypeDescriptorBuilder::new("Triple")
            .scalar("a", ScalarKind::I32)
            .scalar("b", ScalarKind::I32)
            .scalar("c", ScalarKind::I32)
            .build(),
    );
    (registry, handle)
}

#[test]
fn frame_is_fingerprint_then_positional_payload() {
    let (registry, handle) = triple_registry();
    let mut msg = DynamicMessage::new(&registry, handle);
    msg.set("a", 1i32).unwrap();
    msg.set("b", 1i32).unwrap();
    msg.set("c", 1i32).unwrap();

    let bytes = signet::encode(&registry, &msg).unwrap();
    assert_eq!(bytes.len(), 8 + 12);
    assert_eq!(&bytes[..8], &registry.fingerprint(handle).to_be_bytes());
    assert_eq!(
        &bytes[8..],
        &[0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1],
        "i32 fields are 4-byte big-endian, in declaration order"
    );
}

#[test]
fn length_field_array_bytes() {
    let mut registry = TypeRegistry::new();
    let handle = registry.register(
        TypeDescriptorBuilder::new("Samples")
            .scalar("count", ScalarKind::I32)
            .scalar_array("data", ScalarKind::I16, &[ArrayDim::Length("count")])
            .build(),
    );
    let mut msg = DynamicMessage::new(&registry, handle);
    msg.set("count", 3i32).unwrap();
    msg.set("data", vec![10i16, 20, 30]).unwrap();

    let bytes = signet::encode(&registry, &msg).unwrap();
    assert_eq!(
        &bytes[8..],
        &[0, 0, 0, 3, 0, 10, 0, 20, 0, 30],
        "count then packed elements, no per-array length on the wire"
    );
}

#[test]
fn zero_length_array_contributes_no_bytes() {
    let mut registry = TypeRegistry::new();
    let handle = registry.register(
        TypeDescriptorBuilder::new("Samples")
            .scalar("count", ScalarKind::I32)
            .scalar_array("data", ScalarKind::F64, &[ArrayDim::Length("count")])
            .build(),
    );
    let msg = DynamicMessage::new(&registry, handle);
    let bytes = signet::encode(&registry, &msg).unwrap();
    assert_eq!(bytes.len(), 8 + 4);
    let back = signet::decode(&registry, handle, &bytes).unwrap();
    assert!(back.get_value("data").unwrap().as_array().unwrap().is_empty());
}

#[test]
fn string_field_wire_bytes() {
    let mut registry = TypeRegistry::new();
    let handle = registry.register(TypeDescriptorBuilder::new("Note").string_field("s").build());
    let mut msg = DynamicMessage::new(&registry, handle);
    msg.set("s", "ok").unwrap();
    let bytes = signet::encode(&registry, &msg).unwrap();
    assert_eq!(&bytes[8..], &[0, 0, 0, 3, b'o', b'k', 0]);
}

#[test]
fn truncation_at_every_offset_reports_underrun() {
    let mut registry = TypeRegistry::new();
    let handle = registry.register(
        TypeDescriptorBuilder::new("Mixed")
            .scalar("n", ScalarKind::I32)
            .string_field("label")
            .scalar_array("data", ScalarKind::I64, &[ArrayDim::Length("n")])
            .build(),
    );
    let mut msg = DynamicMessage::new(&registry, handle);
    msg.set("n", 2i32).unwrap();
    msg.set("label", "xy").unwrap();
    msg.set("data", vec![1i64, 2]).unwrap();
    let bytes = signet::encode(&registry, &msg).unwrap();

    for cut in 0..bytes.len() {
        match signet::decode(&registry, handle, &bytes[..cut]) {
            Err(CodecError::Underrun { need, have }) => assert!(have < need, "cut at {}", cut),
            other => panic!("cut at {}: expected underrun, got {:?}", cut, other),
        }
    }
    assert!(signet::decode(&registry, handle, &bytes).is_ok());
}

#[test]
fn foreign_fingerprint_is_rejected_before_payload() {
    let (registry, handle) = triple_registry();
    let mut registry_b = TypeRegistry::new();
    let wide = registry_b.register(
        TypeDescriptorBuilder::new("Triple")
            .scalar("a", ScalarKind::I64)
            .scalar("b", ScalarKind::I64)
            .scalar("c", ScalarKind::I64)
            .build(),
    );
    let bytes = signet::encode(&registry_b, &DynamicMessage::new(&registry_b, wide)).unwrap();

    match signet::decode(&registry, handle, &bytes) {
        Err(CodecError::SchemaMismatch { expected, found }) => {
            assert_eq!(expected, registry.fingerprint(handle));
            assert_eq!(found, registry_b.fingerprint(wide));
        }
        other => panic!("expected schema mismatch, got {:?}", other),
    }
}

#[test]
fn corrupted_fingerprint_byte_is_detected() {
    let (registry, handle) = triple_registry();
    let mut bytes = signet::encode(&registry, &DynamicMessage::new(&registry, handle)).unwrap();
    bytes[3] ^= 0x01;
    assert!(matches!(
        signet::decode(&registry, handle, &bytes),
        Err(CodecError::SchemaMismatch { .. })
    ));
}

#[test]
fn trailing_bytes_are_tolerated() {
    let (registry, handle) = triple_registry();
    let mut bytes = signet::encode(&registry, &DynamicMessage::new(&registry, handle)).unwrap();
    bytes.extend_from_slice(&[0xDE, 0xAD]);
    assert!(signet::decode(&registry, handle, &bytes).is_ok());
}
