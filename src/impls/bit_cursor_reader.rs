/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::fragments::Fragments;
use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// An implementation of [`BitRead`] for a [`ByteRead`].
///
/// The reader keeps a byte buffer that is refilled from the source, one
/// [`ByteRead::read_bytes`] call at a time, and a cursor made of a byte index
/// into the buffer and a bit index into that byte, counting from 7 (most
/// significant bit) down to 0.
///
/// The cursor reaches the end of the buffer only after the last bit of the
/// last byte has been consumed, so a refill never needs to carry bits from
/// the old buffer: it replaces the whole buffer and moves the cursor to the
/// most significant bit of its first byte.
///
/// # Example
/// ```
/// use bitcursor::prelude::*;
///
/// let data = [0x01_u8, 0x23, 0x45, 0x67];
/// let mut reader = BitCursorReader::new(MemByteReader::new(&data));
/// assert_eq!(reader.read_bit().unwrap(), 0);
/// assert_eq!(reader.read_bits_as_u8(2).unwrap(), 0b00);
/// assert_eq!(reader.read_bits_as_u16(10).unwrap(), 0b0000100100);
/// assert_eq!(reader.read_bits_as_u32(19).unwrap(), 0b0110100010101100111);
/// ```
#[derive(Debug)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct BitCursorReader<R: ByteRead> {
    /// The [`ByteRead`] used to fill the buffer.
    backend: R,
    /// The buffer; its length is the refill size.
    buffer: Vec<u8>,
    /// Number of valid bytes in the buffer.
    buffer_len: usize,
    /// Index in the buffer of the byte containing the next bit.
    byte_index: usize,
    /// Index of the next bit in the current byte (7 is the MSB).
    bit_index: u8,
    /// Number of bits consumed so far.
    bits_read: u64,
}

impl<R: ByteRead> BitCursorReader<R> {
    /// Create a new [`BitCursorReader`] with the default buffer size.
    #[must_use]
    pub fn new(backend: R) -> Self {
        Self::with_options(backend, ReaderOptions::default())
    }

    /// Create a new [`BitCursorReader`] with the given options.
    #[must_use]
    pub fn with_options(backend: R, options: ReaderOptions) -> Self {
        Self {
            backend,
            buffer: vec![0; options.buffer_size()],
            buffer_len: 0,
            byte_index: 0,
            bit_index: 7,
            bits_read: 0,
        }
    }

    /// Return the number of bits consumed so far.
    #[must_use]
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Return the number of bytes requested from the source at each refill.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    /// Return the underlying source. Buffered bits not yet read are lost.
    pub fn into_inner(self) -> R {
        self.backend
    }

    /// Replace the buffer with the next chunk of the source if all its bytes
    /// have been consumed.
    #[inline(always)]
    fn refill_if_needed(&mut self) -> Result<()> {
        if self.byte_index < self.buffer_len {
            return Ok(());
        }
        debug_assert_eq!(self.bit_index, 7, "refill in the middle of a byte");

        let n = self
            .backend
            .read_bytes(&mut self.buffer)
            .map_err(Error::Source)?;
        if n == 0 {
            tracing::debug!(bits_read = self.bits_read, "end of stream");
            return Err(Error::EndOfStream);
        }
        tracing::trace!(bytes = n, capacity = self.buffer.len(), "refilled buffer");

        self.buffer_len = n;
        self.byte_index = 0;
        self.bit_index = 7;
        Ok(())
    }

    /// Move the cursor forward by `n_bits` bits.
    #[inline(always)]
    fn advance(&mut self, n_bits: u8) {
        if n_bits <= self.bit_index {
            self.bit_index -= n_bits;
            return;
        }
        let beyond = (n_bits - (self.bit_index + 1)) as usize;
        self.byte_index += beyond / 8 + 1;
        self.bit_index = 7 - (beyond % 8) as u8;
    }

    /// Read `n_bits` bits, which must all lie in the current byte, and return
    /// them in the lowest bits.
    ///
    /// The buffer must not be empty.
    #[inline(always)]
    fn read_in_current_byte(&mut self, n_bits: u8) -> Result<u8> {
        if n_bits == 0 {
            return Ok(0);
        }
        let remaining = self.bit_index + 1;
        if n_bits > remaining {
            return Err(Error::InvalidMask {
                requested: n_bits,
                remaining,
            });
        }
        let mask = (u16::MAX >> (16 - remaining as u32)) as u8;
        let value = (self.buffer[self.byte_index] & mask) >> (remaining - n_bits);
        self.advance(n_bits);
        Ok(value)
    }
}

impl<R: ByteRead> BitRead for BitCursorReader<R> {
    fn read_bit(&mut self) -> Result<u8> {
        self.refill_if_needed()?;
        let bit = (self.buffer[self.byte_index] >> self.bit_index) & 1;
        self.advance(1);
        self.bits_read += 1;
        Ok(bit)
    }

    fn read_bits_as_u64(&mut self, n_bits: u32) -> Result<u64> {
        check_width::<u64>(n_bits)?;
        if n_bits == 0 {
            return Ok(0);
        }

        self.refill_if_needed()?;
        let fragments = Fragments::split(n_bits, self.bit_index + 1);

        let mut result = 0_u64;
        for width in fragments.iter() {
            self.refill_if_needed()?;
            let fragment = self.read_in_current_byte(width)?;
            result = (result << width) | fragment as u64;
            self.bits_read += width as u64;
        }
        Ok(result)
    }

    fn read_bits(&mut self, n_bits: usize, options: &ReadOptions) -> Result<Vec<u8>> {
        // n_bits may be arbitrarily large: never reserve more than a buffer
        let mut result = Vec::with_capacity(n_bits.div_ceil(8).min(self.buffer.len()));
        // The output byte being assembled, filled from its MSB
        let mut pending = 0_u8;
        let mut pending_bits = 0_u8;

        let mut to_read = n_bits;
        while to_read > 0 {
            self.refill_if_needed()?;
            let width = to_read.min(self.bit_index as usize + 1) as u8;
            let fragment = self.read_in_current_byte(width)?;
            self.bits_read += width as u64;
            to_read -= width as usize;

            let free = 8 - pending_bits;
            if width < free {
                pending |= fragment << (free - width);
                pending_bits += width;
            } else {
                let spill = width - free;
                result.push(pending | (fragment >> spill));
                // spill < 8 as width <= 8 and free >= 1
                pending = if spill == 0 {
                    0
                } else {
                    fragment << (8 - spill)
                };
                pending_bits = spill;
            }
        }
        if pending_bits > 0 {
            result.push(pending);
        }

        let pad = ((8 - n_bits % 8) % 8) as u32;
        if pad > 0 {
            if options.align_right {
                shift_right(&mut result, pad);
                if options.pad_one {
                    result[0] |= !(u8::MAX >> pad);
                }
            } else if options.pad_one {
                if let Some(last) = result.last_mut() {
                    *last |= u8::MAX >> (8 - pad);
                }
            }
        }
        Ok(result)
    }
}

/// Shift a big-endian byte array right by `shift` bits (between 1 and 7),
/// dropping the lowest bits of the last byte.
fn shift_right(bytes: &mut [u8], shift: u32) {
    debug_assert!((1..8).contains(&shift));
    let mut carry = 0_u8;
    for byte in bytes.iter_mut() {
        let next_carry = *byte << (8 - shift);
        *byte = (*byte >> shift) | carry;
        carry = next_carry;
    }
}
