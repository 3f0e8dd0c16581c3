/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::io;

/// Sequential, streaming chunked byte reads.
pub trait ByteRead {
    /// Fill a prefix of `buf` with the next bytes of the source and return
    /// the length of the prefix.
    ///
    /// The call may block. Returning fewer bytes than `buf.len()` is allowed;
    /// returning zero bytes for a nonempty `buf` means that the source is
    /// exhausted.
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Sequential, streaming byte-by-byte writes.
pub trait ByteWrite {
    /// Write a byte and advance the current position.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Flush the sink.
    fn flush(&mut self) -> io::Result<()>;
}

impl<R: ByteRead + ?Sized> ByteRead for &mut R {
    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_bytes(buf)
    }
}

impl<W: ByteWrite + ?Sized> ByteWrite for &mut W {
    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        (**self).write_byte(byte)
    }

    #[inline(always)]
    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}
