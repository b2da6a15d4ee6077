// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors: the declarative metadata the codec engine and the
//! fingerprint engine are parameterized by.
//!
//! Field kinds form a closed tagged variant resolved once at registration
//! time; nothing is looked up by name per encode/decode call.

use crate::registry::TypeHandle;
use std::fmt::Write;

/// Fixed-width scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Byte,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl ScalarKind {
    /// Encoded width in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::Bool | Self::Byte | Self::I8 => 1,
            Self::I16 => 2,
            Self::I32 | Self::F32 => 4,
            Self::I64 | Self::F64 => 8,
        }
    }

    /// True for kinds that may carry an array's element count.
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

/// One array dimension: a fixed element count, or the index of a preceding
/// sibling integer field holding the count at encode/decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dim {
    Fixed(u32),
    Field(usize),
}

/// Element type of an array field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElemType {
    Scalar(ScalarKind),
    String,
    Message(TypeHandle),
}

/// Semantic type of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Scalar(ScalarKind),
    String,
    Message(TypeHandle),
    Array { elem: ElemType, dims: Vec<Dim> },
}

impl FieldType {
    /// The nested message type this field contributes to the structural
    /// hash, if any. Scalar and string fields (and arrays of them) are
    /// covered by the base constant alone.
    pub(crate) fn message_ref(&self) -> Option<TypeHandle> {
        match self {
            FieldType::Message(handle) => Some(*handle),
            FieldType::Array {
                elem: ElemType::Message(handle),
                ..
            } => Some(*handle),
            _ => None,
        }
    }
}

/// One named, typed field of a message type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: FieldType,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A named, ordered collection of fields describing one wire-format record.
///
/// Immutable once registered; message instances reference it via `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Canonical structural signature: field-kind tokens only, no type or
    /// field names, so structurally identical types sign identically.
    /// Nested message fields appear as an opaque `struct` token; their
    /// shape enters the fingerprint through recursion instead.
    pub(crate) fn signature(&self) -> String {
        let mut sig = String::new();
        for field in &self.fields {
            if !sig.is_empty() {
                sig.push(';');
            }
            match &field.ty {
                FieldType::Scalar(kind) => sig.push_str(kind.name()),
                FieldType::String => sig.push_str("string"),
                FieldType::Message(_) => sig.push_str("struct"),
                FieldType::Array { elem, dims } => {
                    match elem {
                        ElemType::Scalar(kind) => sig.push_str(kind.name()),
                        ElemType::String => sig.push_str("string"),
                        ElemType::Message(_) => sig.push_str("struct"),
                    }
                    for dim in dims {
                        match dim {
                            Dim::Fixed(n) => {
                                let _ = write!(sig, "[{}]", n);
                            }
                            Dim::Field(idx) => {
                                let _ = write!(sig, "[#{}]", idx);
                            }
                        }
                    }
                }
            }
        }
        sig
    }
}
