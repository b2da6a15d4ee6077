// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Signet - fingerprint-guarded message serialization
//!
//! A schema-driven binary serialization runtime for pub/sub transports.
//! Message types are described by declarative descriptors registered at
//! startup; a single generic codec encodes and decodes every type, and a
//! 64-bit structural fingerprint written ahead of each payload lets
//! independently-built peers detect schema disagreement before reading a
//! single field byte.
//!
//! ## Quick Start
//!
//! ```rust
//! use signet::{DynamicMessage, ScalarKind, TypeDescriptorBuilder, TypeRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = TypeRegistry::new();
//! let reading = registry.register(
//!     TypeDescriptorBuilder::new("Reading")
//!         .scalar("id", ScalarKind::I32)
//!         .scalar("value", ScalarKind::F64)
//!         .build(),
//! );
//!
//! let mut msg = DynamicMessage::new(&registry, reading);
//! msg.set("id", 7i32)?;
//! msg.set("value", 21.5f64)?;
//!
//! let bytes = signet::encode(&registry, &msg)?;
//! let back = signet::decode(&registry, reading, &bytes)?;
//! assert_eq!(back.get::<f64>("value")?, 21.5);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                      Application Layer                       |
//! |     typed bindings (msgs) | Publisher / Subscription         |
//! +--------------------------------------------------------------+
//! |                        Codec Layer                           |
//! |  generic encode/decode driven by TypeDescriptor metadata     |
//! |  fingerprint framing and schema-mismatch detection           |
//! +--------------------------------------------------------------+
//! |                       Registry Layer                         |
//! |  TypeRegistry | structural fingerprints | cycle protection   |
//! +--------------------------------------------------------------+
//! |                       Primitive Layer                        |
//! |  big-endian scalars | length-prefixed strings | Cursor/Sink  |
//! +--------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeRegistry`] | Owns descriptors, resolves nested types, memoizes fingerprints |
//! | [`TypeDescriptorBuilder`] | Fluent construction of message type descriptors |
//! | [`DynamicMessage`] | One message instance with typed field access |
//! | [`Fingerprint`] | 64-bit structural hash framing every wire payload |
//! | [`Publisher`] / [`Subscription`] | Typed topic endpoints over a [`Transport`] |

/// Fluent builder for message type descriptors.
pub mod builder;
/// Generic message codec (fingerprint framing plus positional payload).
pub mod codec;
/// Error taxonomy for decode and encode failures.
pub mod error;
/// Structural fingerprints (packed form and base constant).
pub mod fingerprint;
/// Message instances with typed field access.
pub mod message;
/// Typed message bindings layered over the dynamic runtime.
pub mod msgs;
/// Type registry, handles, and fingerprint memoization.
pub mod registry;
/// Primitive big-endian codec (scalars, strings, Cursor/Sink).
pub mod ser;
/// Transport seam and in-process loopback transport.
pub mod transport;
/// Descriptor metadata (scalar kinds, field types, dimensions).
pub mod types;
/// Runtime values held by message instances.
pub mod value;

pub use builder::{ArrayDim, TypeDescriptorBuilder};
pub use codec::{decode, encode};
pub use error::{CodecError, CodecResult};
pub use fingerprint::Fingerprint;
pub use message::{DynamicMessage, FromValue, IntoValue, MessageError};
pub use registry::{TypeHandle, TypeRegistry};
pub use transport::{LoopbackTransport, PublishError, Publisher, Subscription, Transport};
pub use types::{Dim, ElemType, FieldDescriptor, FieldType, ScalarKind, TypeDescriptor};
pub use value::Value;
