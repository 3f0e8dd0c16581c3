/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};
use std::io;

/// An implementation of [`ByteWrite`] appending to a vector.
///
/// # Example
/// ```
/// use bitcursor::prelude::*;
///
/// let mut bytes = Vec::<u8>::new();
/// let mut byte_writer = MemByteWriterVec::new(&mut bytes);
///
/// byte_writer.write_byte(0xa5).unwrap();
/// byte_writer.write_byte(0x3c).unwrap();
/// assert_eq!(byte_writer.len(), 2);
/// drop(byte_writer);
/// assert_eq!(bytes, [0xa5, 0x3c]);
/// ```
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct MemByteWriterVec<B: AsMut<Vec<u8>>> {
    data: B,
}

impl<B: AsMut<Vec<u8>>> MemByteWriterVec<B> {
    /// Create a new [`MemByteWriterVec`] appending to `data`.
    #[must_use]
    pub fn new(data: B) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsMut<Vec<u8>> + AsRef<Vec<u8>>> MemByteWriterVec<B> {
    /// Return the number of bytes in the underlying vector.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.as_ref().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<B: AsMut<Vec<u8>>> ByteWrite for MemByteWriterVec<B> {
    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.data.as_mut().push(byte);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
