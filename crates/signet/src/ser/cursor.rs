// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read cursor and write sink for wire-format buffers.
//!
//! The read side borrows the source slice and is bounds-checked on every
//! read; the write side appends to an owned buffer and cannot fail.
//! All multi-byte values are big-endian.

use crate::error::{CodecError, CodecResult};

/// Generate big-endian read methods for fixed-width types.
///
/// Each generated method:
/// 1. Checks remaining bytes (returns `CodecError::Underrun` when short)
/// 2. Converts via `from_be_bytes()`
/// 3. Advances the offset
macro_rules! impl_read_be {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> CodecResult<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(<$type>::from_be_bytes(bytes))
        }
    };
}

/// Generate big-endian write methods for fixed-width types.
macro_rules! impl_write_be {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) {
            self.buf.extend_from_slice(&value.to_be_bytes());
        }
    };
}

/// Immutable cursor for reading (bounds-checked, zero-copy).
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    impl_read_be!(read_u8, u8, 1);
    impl_read_be!(read_i8, i8, 1);
    impl_read_be!(read_i16_be, i16, 2);
    impl_read_be!(read_i32_be, i32, 4);
    impl_read_be!(read_i64_be, i64, 8);
    impl_read_be!(read_u32_be, u32, 4);
    impl_read_be!(read_u64_be, u64, 8);
    impl_read_be!(read_f32_be, f32, 4);
    impl_read_be!(read_f64_be, f64, 8);

    pub fn read_bytes(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if self.offset + len > self.buffer.len() {
            return Err(CodecError::Underrun {
                need: len,
                have: self.remaining(),
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}

/// Growable write sink (append-only).
#[derive(Default)]
pub struct Sink {
    buf: Vec<u8>,
}

impl Sink {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    impl_write_be!(write_u8, u8);
    impl_write_be!(write_i8, i8);
    impl_write_be!(write_i16_be, i16);
    impl_write_be!(write_i32_be, i32);
    impl_write_be!(write_i64_be, i64);
    impl_write_be!(write_u32_be, u32);
    impl_write_be!(write_u64_be, u64);
    impl_write_be!(write_f32_be, f32);
    impl_write_be!(write_f64_be, f64);

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}
