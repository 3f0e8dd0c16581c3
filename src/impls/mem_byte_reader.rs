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

/// An implementation of [`ByteRead`] for a slice of memory.
///
/// Optionally, the number of bytes returned by each call can be limited, to
/// mimic sources (sockets, pipes) that return short reads.
///
/// # Example
/// ```
/// use bitcursor::prelude::*;
///
/// let data = [0x12_u8, 0x34, 0x56];
/// let mut byte_reader = MemByteReader::with_chunk_size(&data, 2);
/// let mut buf = [0; 8];
///
/// assert_eq!(byte_reader.read_bytes(&mut buf).unwrap(), 2);
/// assert_eq!(buf[..2], [0x12, 0x34]);
/// assert_eq!(byte_reader.read_bytes(&mut buf).unwrap(), 1);
/// assert_eq!(buf[0], 0x56);
/// assert_eq!(byte_reader.read_bytes(&mut buf).unwrap(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct MemByteReader<B: AsRef<[u8]>> {
    data: B,
    byte_index: usize,
    chunk_size: usize,
}

impl<B: AsRef<[u8]>> MemByteReader<B> {
    /// Create a new [`MemByteReader`] returning as many bytes as requested.
    #[must_use]
    pub fn new(data: B) -> Self {
        Self::with_chunk_size(data, usize::MAX)
    }

    /// Create a new [`MemByteReader`] returning at most `chunk_size` bytes
    /// per call. A `chunk_size` of zero is treated as one.
    #[must_use]
    pub fn with_chunk_size(data: B, chunk_size: usize) -> Self {
        Self {
            data,
            byte_index: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Return the number of bytes already handed out.
    #[must_use]
    pub fn position(&self) -> usize {
        self.byte_index
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsRef<[u8]>> ByteRead for MemByteReader<B> {
    #[inline]
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let left = &self.data.as_ref()[self.byte_index..];
        let n = left.len().min(buf.len()).min(self.chunk_size);
        buf[..n].copy_from_slice(&left[..n]);
        self.byte_index += n;
        Ok(n)
    }
}
