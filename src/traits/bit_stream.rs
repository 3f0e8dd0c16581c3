/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;
use num_traits::AsPrimitive;

/// Sequential, streaming big-endian bit-by-bit reads.
///
/// The first bit read is the most significant bit of the value returned.
/// Implementors provide single-bit reads, reads of up to 64 bits, and
/// arbitrary-length reads into byte arrays; everything else is derived.
pub trait BitRead {
    /// Read a single bit, returned in the lowest bit of the result.
    fn read_bit(&mut self) -> Result<u8>;

    /// Read `n_bits` bits and return them in the lowest bits.
    ///
    /// Fails with [`Error::WidthExceeded`] if `n_bits` is greater than 64.
    /// Reading zero bits returns zero and does not touch the stream.
    fn read_bits_as_u64(&mut self, n_bits: u32) -> Result<u64>;

    /// Read `n_bits` bits, with no upper bound, and return them packed into
    /// the minimum number of bytes, laid out as specified by `options`.
    ///
    /// Reading zero bits returns an empty vector.
    fn read_bits(&mut self, n_bits: usize, options: &ReadOptions) -> Result<Vec<u8>>;

    /// Read `n_bits` bits as an unsigned integer of type `W`.
    #[inline]
    fn read_bits_as<W: UnsignedWidth>(&mut self, n_bits: u32) -> Result<W> {
        check_width::<W>(n_bits)?;
        Ok(W::from_u64_truncating(self.read_bits_as_u64(n_bits)?))
    }

    #[inline]
    fn read_bits_as_u8(&mut self, n_bits: u32) -> Result<u8> {
        self.read_bits_as::<u8>(n_bits)
    }

    #[inline]
    fn read_bits_as_u16(&mut self, n_bits: u32) -> Result<u16> {
        self.read_bits_as::<u16>(n_bits)
    }

    #[inline]
    fn read_bits_as_u32(&mut self, n_bits: u32) -> Result<u32> {
        self.read_bits_as::<u32>(n_bits)
    }

    /// Read `n_bits` bits as a two's complement integer whose sign bit is
    /// the first bit read.
    fn read_bits_as_i32(&mut self, n_bits: u32) -> Result<i32> {
        let value = self.read_bits_as_u32(n_bits)?;
        if n_bits == 0 {
            return Ok(0);
        }
        let shift = 32 - n_bits;
        Ok(((value << shift) as i32) >> shift)
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8> {
        self.read_bits_as_u8(8)
    }

    #[inline]
    fn read_u16(&mut self) -> Result<u16> {
        self.read_bits_as_u16(16)
    }

    #[inline]
    fn read_u32(&mut self) -> Result<u32> {
        self.read_bits_as_u32(32)
    }

    #[inline]
    fn read_u64(&mut self) -> Result<u64> {
        self.read_bits_as_u64(64)
    }

    /// Read a single bit as a boolean.
    #[inline]
    fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_bit()? != 0)
    }

    /// Consume and discard `n_bits` bits.
    fn skip_bits(&mut self, mut n_bits: u64) -> Result<()> {
        while n_bits > 0 {
            let to_skip = n_bits.min(64) as u32;
            self.read_bits_as_u64(to_skip)?;
            n_bits -= to_skip as u64;
        }
        Ok(())
    }
}

/// Sequential, streaming big-endian bit-by-bit writes.
///
/// Bits are packed into bytes starting from the most significant bit. A
/// byte is handed to the underlying sink as soon as it is complete; a
/// partially filled final byte is kept pending until [`BitWrite::flush`] is
/// called, so callers must flush after the last write.
pub trait BitWrite {
    /// Write the lowest bit of `bit`.
    fn write_bit(&mut self, bit: u8) -> Result<()>;

    /// Write the lowest `n_bits` bits of `value`, most significant first.
    ///
    /// Fails with [`Error::WidthExceeded`] if `n_bits` is greater than 64.
    /// The other bits of `value` are ignored.
    fn write_bits_of_u64(&mut self, n_bits: u32, value: u64) -> Result<()>;

    /// Write the pending partial byte, if any, padding its unused low bits
    /// with zeros, and flush the sink.
    fn flush(&mut self) -> Result<()>;

    /// Write the lowest `n_bits` bits of a value of type `W`.
    #[inline]
    fn write_bits_of<W: UnsignedWidth>(&mut self, n_bits: u32, value: W) -> Result<()> {
        check_width::<W>(n_bits)?;
        self.write_bits_of_u64(n_bits, value.as_())
    }

    #[inline]
    fn write_bits_of_u8(&mut self, n_bits: u32, value: u8) -> Result<()> {
        self.write_bits_of::<u8>(n_bits, value)
    }

    #[inline]
    fn write_bits_of_u16(&mut self, n_bits: u32, value: u16) -> Result<()> {
        self.write_bits_of::<u16>(n_bits, value)
    }

    #[inline]
    fn write_bits_of_u32(&mut self, n_bits: u32, value: u32) -> Result<()> {
        self.write_bits_of::<u32>(n_bits, value)
    }

    /// Write the lowest `n_bits` bits of the two's complement representation
    /// of `value`.
    fn write_bits_of_i32(&mut self, n_bits: u32, value: i32) -> Result<()> {
        check_width::<u32>(n_bits)?;
        self.write_bits_of_u32(n_bits, value as u32 & low_mask(n_bits) as u32)
    }

    /// Write the first `n_bits` bits of `bytes`, starting from the most
    /// significant bit of the first byte.
    ///
    /// This is the inverse of a left-aligned [`BitRead::read_bits`]. Fails
    /// with [`Error::WidthExceeded`] if `bytes` holds fewer than `n_bits` bits.
    fn write_bits(&mut self, n_bits: usize, bytes: &[u8]) -> Result<()> {
        if n_bits > bytes.len() * 8 {
            return Err(Error::WidthExceeded {
                requested: n_bits,
                capacity: bytes.len() * 8,
            });
        }
        let full_bytes = n_bits / 8;
        for &byte in &bytes[..full_bytes] {
            self.write_bits_of_u8(8, byte)?;
        }
        let tail = (n_bits % 8) as u32;
        if tail > 0 {
            self.write_bits_of_u8(tail, bytes[full_bytes] >> (8 - tail))?;
        }
        Ok(())
    }

    #[inline]
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bits_of_u8(8, value)
    }

    #[inline]
    fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_bits_of_u16(16, value)
    }

    #[inline]
    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bits_of_u32(32, value)
    }

    #[inline]
    fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_bits_of_u64(64, value)
    }

    /// Write a boolean as a single bit.
    #[inline]
    fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_bit(value as u8)
    }
}
