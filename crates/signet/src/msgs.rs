// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed message bindings layered over the dynamic runtime.
//!
//! These are hand-written but deliberately mechanical: a plain struct, a
//! `register` that installs the descriptor, and lossless conversion to and
//! from [`DynamicMessage`]. Application crates follow this shape for their
//! own message types.

use crate::builder::{ArrayDim, TypeDescriptorBuilder};
use crate::codec;
use crate::error::CodecResult;
use crate::message::{DynamicMessage, MessageError};
use crate::registry::{TypeHandle, TypeRegistry};
use crate::types::ScalarKind;
use crate::value::Value;

fn required_handle(registry: &TypeRegistry, name: &str) -> TypeHandle {
    registry
        .lookup(name)
        .unwrap_or_else(|| panic!("message type `{}` is not registered", name))
}

/// A 3-component integer vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Vector3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vector3 {
    pub const TYPE_NAME: &'static str = "Vector3";

    /// Install the descriptor; idempotent.
    pub fn register(registry: &mut TypeRegistry) -> TypeHandle {
        if let Some(handle) = registry.lookup(Self::TYPE_NAME) {
            return handle;
        }
        registry.register(
            TypeDescriptorBuilder::new(Self::TYPE_NAME)
                .scalar("x", ScalarKind::I32)
                .scalar("y", ScalarKind::I32)
                .scalar("z", ScalarKind::I32)
                .build(),
        )
    }

    pub fn to_message(&self, registry: &TypeRegistry) -> DynamicMessage {
        let handle = required_handle(registry, Self::TYPE_NAME);
        let mut message = DynamicMessage::new(registry, handle);
        // Field names are fixed by `register`; failures cannot happen.
        let _ = message.set("x", self.x);
        let _ = message.set("y", self.y);
        let _ = message.set("z", self.z);
        message
    }

    pub fn from_message(message: &DynamicMessage) -> Result<Self, MessageError> {
        Ok(Self {
            x: message.get("x")?,
            y: message.get("y")?,
            z: message.get("z")?,
        })
    }

    pub fn encode(&self, registry: &TypeRegistry) -> CodecResult<Vec<u8>> {
        codec::encode(registry, &self.to_message(registry))
    }

    pub fn decode(registry: &TypeRegistry, bytes: &[u8]) -> CodecResult<Self> {
        let handle = required_handle(registry, Self::TYPE_NAME);
        let message = codec::decode(registry, handle, bytes)?;
        Ok(Self::from_message(&message)?)
    }
}

/// An ordered sequence of [`Vector3`] waypoints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    pub points: Vec<Vector3>,
}

impl Trajectory {
    pub const TYPE_NAME: &'static str = "Trajectory";

    /// Install the descriptor along with its [`Vector3`] dependency;
    /// idempotent.
    pub fn register(registry: &mut TypeRegistry) -> TypeHandle {
        if let Some(handle) = registry.lookup(Self::TYPE_NAME) {
            return handle;
        }
        let vector3 = Vector3::register(registry);
        registry.register(
            TypeDescriptorBuilder::new(Self::TYPE_NAME)
                .scalar("points_length", ScalarKind::I32)
                .message_array("points", vector3, &[ArrayDim::Length("points_length")])
                .build(),
        )
    }

    pub fn to_message(&self, registry: &TypeRegistry) -> DynamicMessage {
        let handle = required_handle(registry, Self::TYPE_NAME);
        let mut message = DynamicMessage::new(registry, handle);
        let _ = message.set("points_length", self.points.len() as i32);
        let points: Vec<Value> = self
            .points
            .iter()
            .map(|p| Value::Message(p.to_message(registry)))
            .collect();
        let _ = message.set("points", Value::Array(points));
        message
    }

    pub fn from_message(message: &DynamicMessage) -> Result<Self, MessageError> {
        let value = message.get_value("points")?;
        let items = value.as_array().ok_or_else(|| MessageError::TypeMismatch {
            expected: "array".to_string(),
            found: value.kind_name().to_string(),
        })?;
        let mut points = Vec::with_capacity(items.len());
        for item in items {
            let nested = item.as_message().ok_or_else(|| MessageError::TypeMismatch {
                expected: "message".to_string(),
                found: item.kind_name().to_string(),
            })?;
            points.push(Vector3::from_message(nested)?);
        }
        Ok(Self { points })
    }

    pub fn encode(&self, registry: &TypeRegistry) -> CodecResult<Vec<u8>> {
        codec::encode(registry, &self.to_message(registry))
    }

    pub fn decode(registry: &TypeRegistry, bytes: &[u8]) -> CodecResult<Self> {
        let handle = required_handle(registry, Self::TYPE_NAME);
        let message = codec::decode(registry, handle, bytes)?;
        Ok(Self::from_message(&message)?)
    }
}
