// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Message instances: positional field values paired with a type
//! descriptor.
//!
//! Instances are created per encode/decode call and owned exclusively by
//! the caller; they hold no references back into the registry beyond the
//! type identity used during recursive dispatch.

use crate::error::CodecError;
use crate::registry::{TypeHandle, TypeRegistry};
use crate::types::{Dim, ElemType, FieldType, ScalarKind, TypeDescriptor};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Errors for field access on a message instance.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageError {
    FieldNotFound(String),
    TypeMismatch { expected: String, found: String },
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::FieldNotFound(name) => write!(f, "field not found: {}", name),
            MessageError::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for MessageError {}

impl From<MessageError> for CodecError {
    fn from(err: MessageError) -> Self {
        match err {
            MessageError::FieldNotFound(name) => {
                CodecError::Malformed(format!("field not found: {}", name))
            }
            MessageError::TypeMismatch { expected, found } => {
                CodecError::TypeMismatch { expected, found }
            }
        }
    }
}

/// One message instance of a registered type.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMessage {
    descriptor: Arc<TypeDescriptor>,
    handle: TypeHandle,
    values: Vec<Value>,
}

impl DynamicMessage {
    /// Create an instance with per-field defaults: zeroed scalars, empty
    /// strings, recursively-defaulted nested messages, fixed-size arrays
    /// pre-sized and length-field arrays empty.
    pub fn new(registry: &TypeRegistry, handle: TypeHandle) -> Self {
        let descriptor = registry.descriptor(handle).clone();
        let values = descriptor
            .fields()
            .iter()
            .map(|field| default_value(registry, &field.ty))
            .collect();
        Self {
            descriptor,
            handle,
            values,
        }
    }

    pub(crate) fn from_parts(
        descriptor: Arc<TypeDescriptor>,
        handle: TypeHandle,
        values: Vec<Value>,
    ) -> Self {
        debug_assert_eq!(descriptor.fields().len(), values.len());
        Self {
            descriptor,
            handle,
            values,
        }
    }

    pub fn handle(&self) -> TypeHandle {
        self.handle
    }

    pub fn type_name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    /// Field values in declared order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Typed field read.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T, MessageError> {
        T::from_value(self.get_value(name)?)
    }

    /// Typed field write. The value's kind is checked against the
    /// descriptor at encode time, not here.
    pub fn set<T: IntoValue>(&mut self, name: &str, value: T) -> Result<(), MessageError> {
        let index = self
            .descriptor
            .field_index(name)
            .ok_or_else(|| MessageError::FieldNotFound(name.to_string()))?;
        self.values[index] = value.into_value();
        Ok(())
    }

    pub fn get_value(&self, name: &str) -> Result<&Value, MessageError> {
        let index = self
            .descriptor
            .field_index(name)
            .ok_or_else(|| MessageError::FieldNotFound(name.to_string()))?;
        Ok(&self.values[index])
    }

    pub fn get_value_mut(&mut self, name: &str) -> Result<&mut Value, MessageError> {
        let index = self
            .descriptor
            .field_index(name)
            .ok_or_else(|| MessageError::FieldNotFound(name.to_string()))?;
        Ok(&mut self.values[index])
    }

    /// Iterate `(field name, value)` pairs in declared order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.descriptor
            .fields()
            .iter()
            .zip(&self.values)
            .map(|(f, v)| (f.name.as_str(), v))
    }
}

fn default_value(registry: &TypeRegistry, ty: &FieldType) -> Value {
    match ty {
        FieldType::Scalar(kind) => default_scalar(*kind),
        FieldType::String => Value::String(String::new()),
        FieldType::Message(handle) => Value::Message(DynamicMessage::new(registry, *handle)),
        FieldType::Array { elem, dims } => default_array(registry, *elem, dims),
    }
}

fn default_scalar(kind: ScalarKind) -> Value {
    match kind {
        ScalarKind::Bool => Value::Bool(false),
        ScalarKind::Byte => Value::Byte(0),
        ScalarKind::I8 => Value::I8(0),
        ScalarKind::I16 => Value::I16(0),
        ScalarKind::I32 => Value::I32(0),
        ScalarKind::I64 => Value::I64(0),
        ScalarKind::F32 => Value::F32(0.0),
        ScalarKind::F64 => Value::F64(0.0),
    }
}

fn default_array(registry: &TypeRegistry, elem: ElemType, dims: &[Dim]) -> Value {
    match dims.split_first() {
        Some((Dim::Fixed(n), rest)) => {
            let inner = if rest.is_empty() {
                default_element(registry, elem)
            } else {
                default_array(registry, elem, rest)
            };
            Value::Array(vec![inner; *n as usize])
        }
        // Length-field dimensions default to zero elements.
        _ => Value::Array(Vec::new()),
    }
}

fn default_element(registry: &TypeRegistry, elem: ElemType) -> Value {
    match elem {
        ElemType::Scalar(kind) => default_scalar(kind),
        ElemType::String => Value::String(String::new()),
        ElemType::Message(handle) => Value::Message(DynamicMessage::new(registry, handle)),
    }
}

/// Conversion out of a field value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, MessageError>;
}

/// Conversion into a field value.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

macro_rules! impl_from_value {
    ($ty:ty, $variant:ident, $name:expr) => {
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Self, MessageError> {
                match value {
                    Value::$variant(v) => Ok(v.clone()),
                    other => Err(MessageError::TypeMismatch {
                        expected: $name.to_string(),
                        found: other.kind_name().to_string(),
                    }),
                }
            }
        }
    };
}

impl_from_value!(bool, Bool, "bool");
impl_from_value!(i8, I8, "i8");
impl_from_value!(i16, I16, "i16");
impl_from_value!(i32, I32, "i32");
impl_from_value!(i64, I64, "i64");
impl_from_value!(f32, F32, "f32");
impl_from_value!(f64, F64, "f64");
impl_from_value!(String, String, "string");
impl_from_value!(DynamicMessage, Message, "message");

impl<T: Into<Value>> IntoValue for T {
    fn into_value(self) -> Value {
        self.into()
    }
}
