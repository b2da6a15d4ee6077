// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy for encode/decode operations.
//!
//! Everything here is fatal to the current call and propagates to the
//! immediate caller; the codec never logs, retries, or suppresses.
//! Programming errors (nested-type fingerprint confusion, undefined type
//! handles) are not represented here -- they panic.

use crate::fingerprint::Fingerprint;
use std::fmt;

/// Errors surfaced by the wire codec.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Not enough bytes remain in the source for the next read.
    Underrun { need: usize, have: usize },
    /// Structurally invalid payload or rejected encode-side validation
    /// (zero-length string field, array length disagreeing with its
    /// dimension, negative length field).
    Malformed(String),
    /// Fingerprint prefix does not match the expected type's fingerprint.
    /// The bytes were produced by an incompatible type definition.
    SchemaMismatch {
        expected: Fingerprint,
        found: Fingerprint,
    },
    /// A value does not match the descriptor kind it is encoded against.
    TypeMismatch { expected: String, found: String },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Underrun { need, have } => {
                write!(f, "source underrun: need {} bytes, have {}", need, have)
            }
            CodecError::Malformed(reason) => write!(f, "malformed payload: {}", reason),
            CodecError::SchemaMismatch { expected, found } => {
                write!(
                    f,
                    "schema mismatch: expected fingerprint {}, found {}",
                    expected, found
                )
            }
            CodecError::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for CodecError {}

pub type CodecResult<T> = std::result::Result<T, CodecError>;
