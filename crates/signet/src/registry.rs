// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registry: owns every registered [`TypeDescriptor`], resolves nested
//! type references, and memoizes structural fingerprints.
//!
//! Registration is a build-phase activity on `&mut self`; afterwards the
//! registry is shared immutably (typically behind an `Arc`) and every
//! operation is safe from any thread. The fingerprint cache is a
//! store-once cell per type -- redundant concurrent computation produces
//! the identical value, so no lock is needed.
//!
//! Mutually-referential type graphs register in two steps: `declare` the
//! name to obtain a handle, build descriptors referencing that handle,
//! then `define`.

use crate::fingerprint::{base_constant, Fingerprint};
use crate::types::{Dim, FieldType, TypeDescriptor};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Copyable identity of one registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeHandle(pub(crate) usize);

struct Slot {
    name: String,
    descriptor: Option<Arc<TypeDescriptor>>,
    fingerprint: OnceLock<Fingerprint>,
}

/// The set of all message types known to this process.
#[derive(Default)]
pub struct TypeRegistry {
    slots: Vec<Slot>,
    by_name: HashMap<String, TypeHandle>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a handle for `name` without defining its shape yet.
    /// Returns the existing handle if the name is already known.
    pub fn declare(&mut self, name: &str) -> TypeHandle {
        if let Some(handle) = self.by_name.get(name) {
            return *handle;
        }
        let handle = TypeHandle(self.slots.len());
        self.slots.push(Slot {
            name: name.to_string(),
            descriptor: None,
            fingerprint: OnceLock::new(),
        });
        self.by_name.insert(name.to_string(), handle);
        handle
    }

    /// Attach the shape to a previously declared handle.
    ///
    /// Panics on redefinition, on a descriptor named differently from the
    /// declaration, or on ill-formed dimension metadata -- these are
    /// build-time defects, not runtime errors.
    pub fn define(&mut self, handle: TypeHandle, descriptor: TypeDescriptor) {
        let slot = &self.slots[handle.0];
        assert_eq!(
            slot.name,
            descriptor.name(),
            "descriptor name does not match declaration"
        );
        assert!(
            slot.descriptor.is_none(),
            "message type `{}` is already defined",
            slot.name
        );
        validate_dimensions(&descriptor);
        log::debug!(
            "registered message type `{}` ({} fields)",
            descriptor.name(),
            descriptor.fields().len()
        );
        self.slots[handle.0].descriptor = Some(Arc::new(descriptor));
    }

    /// Declare-and-define in one step, for the common acyclic case.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> TypeHandle {
        let handle = self.declare(descriptor.name());
        self.define(handle, descriptor);
        handle
    }

    pub fn lookup(&self, name: &str) -> Option<TypeHandle> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, handle: TypeHandle) -> &str {
        &self.slots[handle.0].name
    }

    /// Resolve a handle to its descriptor.
    ///
    /// Panics if the type was declared but never defined.
    pub fn descriptor(&self, handle: TypeHandle) -> &Arc<TypeDescriptor> {
        let slot = &self.slots[handle.0];
        match &slot.descriptor {
            Some(descriptor) => descriptor,
            None => panic!("message type `{}` declared but never defined", slot.name),
        }
    }

    /// Structural fingerprint of a registered type, computed lazily on
    /// first demand and memoized for the registry's lifetime.
    pub fn fingerprint(&self, handle: TypeHandle) -> Fingerprint {
        *self.slots[handle.0]
            .fingerprint
            .get_or_init(|| Fingerprint::from_raw(self.hash_recursive(handle, &[])))
    }

    /// Recursive structural hash with cycle protection.
    ///
    /// A handle already on the active chain contributes 0 for that
    /// occurrence, which terminates the recursion without corrupting the
    /// outer type's hash. Nested message field types contribute once per
    /// occurrence, in field order; arrays contribute their element type's
    /// hash only when the element is itself a message type. All arithmetic
    /// wraps mod 2^64, with a final rotate-left by one bit.
    fn hash_recursive(&self, handle: TypeHandle, visiting: &[TypeHandle]) -> u64 {
        if visiting.contains(&handle) {
            return 0;
        }
        let descriptor = self.descriptor(handle);
        let mut chain = Vec::with_capacity(visiting.len() + 1);
        chain.extend_from_slice(visiting);
        chain.push(handle);

        let mut hash = base_constant(descriptor);
        for field in descriptor.fields() {
            if let Some(nested) = field.ty.message_ref() {
                hash = hash.wrapping_add(self.hash_recursive(nested, &chain));
            }
        }
        hash.rotate_left(1)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Every length-field dimension must reference a preceding integer scalar
/// field. The builder enforces this for name-based construction; descriptors
/// assembled by hand get the same check here.
fn validate_dimensions(descriptor: &TypeDescriptor) {
    for (position, field) in descriptor.fields().iter().enumerate() {
        if let FieldType::Array { dims, .. } = &field.ty {
            assert!(
                !dims.is_empty(),
                "array field `{}` has no dimensions",
                field.name
            );
            for dim in dims {
                if let Dim::Field(index) = dim {
                    assert!(
                        *index < position,
                        "array field `{}` references a length field that does not precede it",
                        field.name
                    );
                    let length_field = &descriptor.fields()[*index];
                    assert!(
                        matches!(length_field.ty, FieldType::Scalar(kind) if kind.is_integer()),
                        "array field `{}` references non-integer length field `{}`",
                        field.name,
                        length_field.name
                    );
                }
            }
        }
    }
}
