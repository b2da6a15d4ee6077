// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for [`TypeDescriptor`].
//!
//! Length-field dimensions are given by field name and resolved to indices
//! here, at construction time. Misuse (unknown length field, length field
//! declared after the array, non-integer length field) panics: descriptor
//! construction is build-phase code and ill-formed metadata is a defect.

use crate::registry::TypeHandle;
use crate::types::{Dim, ElemType, FieldDescriptor, FieldType, ScalarKind, TypeDescriptor};

/// One array dimension as written by the caller.
#[derive(Debug, Clone, Copy)]
pub enum ArrayDim<'a> {
    /// Fixed element count.
    Fixed(u32),
    /// Name of a preceding sibling integer field carrying the count.
    Length(&'a str),
}

/// Builder for message type descriptors.
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptorBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a fixed-width scalar field.
    pub fn scalar(mut self, name: impl Into<String>, kind: ScalarKind) -> Self {
        self.fields
            .push(FieldDescriptor::new(name, FieldType::Scalar(kind)));
        self
    }

    /// Add a string field.
    pub fn string_field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldDescriptor::new(name, FieldType::String));
        self
    }

    /// Add a nested message field.
    pub fn message_field(mut self, name: impl Into<String>, handle: TypeHandle) -> Self {
        self.fields
            .push(FieldDescriptor::new(name, FieldType::Message(handle)));
        self
    }

    /// Add an array of scalars.
    pub fn scalar_array(
        self,
        name: impl Into<String>,
        kind: ScalarKind,
        dims: &[ArrayDim<'_>],
    ) -> Self {
        self.array(name, ElemType::Scalar(kind), dims)
    }

    /// Add an array of strings.
    pub fn string_array(self, name: impl Into<String>, dims: &[ArrayDim<'_>]) -> Self {
        self.array(name, ElemType::String, dims)
    }

    /// Add an array of nested messages.
    pub fn message_array(
        self,
        name: impl Into<String>,
        handle: TypeHandle,
        dims: &[ArrayDim<'_>],
    ) -> Self {
        self.array(name, ElemType::Message(handle), dims)
    }

    /// Add an array field with explicit element type and dimensions,
    /// outermost dimension first.
    pub fn array(
        mut self,
        name: impl Into<String>,
        elem: ElemType,
        dims: &[ArrayDim<'_>],
    ) -> Self {
        let name = name.into();
        assert!(!dims.is_empty(), "array field `{}` needs at least one dimension", name);
        let resolved = dims
            .iter()
            .map(|dim| match dim {
                ArrayDim::Fixed(n) => Dim::Fixed(*n),
                ArrayDim::Length(length_name) => Dim::Field(self.resolve_length(&name, length_name)),
            })
            .collect();
        self.fields.push(FieldDescriptor::new(
            name,
            FieldType::Array {
                elem,
                dims: resolved,
            },
        ));
        self
    }

    fn resolve_length(&self, array_name: &str, length_name: &str) -> usize {
        let index = self
            .fields
            .iter()
            .position(|f| f.name == length_name)
            .unwrap_or_else(|| {
                panic!(
                    "array field `{}` references unknown length field `{}` \
                     (length fields must be declared before the array)",
                    array_name, length_name
                )
            });
        assert!(
            matches!(self.fields[index].ty, FieldType::Scalar(kind) if kind.is_integer()),
            "array field `{}` references non-integer length field `{}`",
            array_name,
            length_name
        );
        index
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::new(self.name, self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_fields_in_order() {
        let desc = TypeDescriptorBuilder::new("Reading")
            .scalar("sensor_id", ScalarKind::I32)
            .scalar("value", ScalarKind::F64)
            .string_field("unit")
            .build();
        assert_eq!(desc.name(), "Reading");
        let names: Vec<_> = desc.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["sensor_id", "value", "unit"]);
    }

    #[test]
    fn test_resolves_length_dimension() {
        let desc = TypeDescriptorBuilder::new("Samples")
            .scalar("count", ScalarKind::I32)
            .scalar_array("data", ScalarKind::I64, &[ArrayDim::Length("count")])
            .build();
        match &desc.field("data").expect("data field").ty {
            FieldType::Array { dims, .. } => assert_eq!(dims, &[Dim::Field(0)]),
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_multi_dimension() {
        let desc = TypeDescriptorBuilder::new("Grid")
            .scalar("rows", ScalarKind::I32)
            .scalar_array(
                "cells",
                ScalarKind::F32,
                &[ArrayDim::Length("rows"), ArrayDim::Fixed(3)],
            )
            .build();
        match &desc.field("cells").expect("cells field").ty {
            FieldType::Array { dims, .. } => {
                assert_eq!(dims, &[Dim::Field(0), Dim::Fixed(3)]);
            }
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    #[should_panic(expected = "unknown length field")]
    fn test_unknown_length_field_panics() {
        let _ = TypeDescriptorBuilder::new("Bad")
            .scalar_array("data", ScalarKind::I32, &[ArrayDim::Length("count")]);
    }

    #[test]
    #[should_panic(expected = "non-integer length field")]
    fn test_float_length_field_panics() {
        let _ = TypeDescriptorBuilder::new("Bad")
            .scalar("count", ScalarKind::F64)
            .scalar_array("data", ScalarKind::I32, &[ArrayDim::Length("count")]);
    }
}
