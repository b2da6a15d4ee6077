// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural fingerprints: 64-bit hashes identifying a message type's
//! exact field-type shape.
//!
//! Independently-built encoder/decoder pairs compare fingerprints at decode
//! time to detect schema disagreement without any out-of-band registry.
//! The recursive combination over nested types lives in
//! [`crate::registry::TypeRegistry`]; this module holds the packed form
//! and the per-type base constant.

use crate::types::TypeDescriptor;
use std::fmt;

/// A 64-bit structural hash. The wire form is the big-endian 8-byte
/// encoding, written ahead of every top-level message payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Packed wire form.
    pub const fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

/// Per-type base constant: FNV-1a 64 over the canonical structural
/// signature. Stable across builds and processes; identical for
/// structurally identical types regardless of naming.
pub(crate) fn base_constant(descriptor: &TypeDescriptor) -> u64 {
    fnv1a_64(descriptor.signature().as_bytes())
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
