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

/// An implementation of [`BitWrite`] for a [`ByteWrite`].
///
/// The writer accumulates bits in a single pending byte, filled starting from
/// the most significant bit; as soon as the byte is complete it is written
/// to the sink. The last byte of the stream is usually incomplete, and it
/// reaches the sink only when [`flush`](BitWrite::flush) is called: there is
/// no flush on drop.
///
/// # Example
/// ```
/// use bitcursor::prelude::*;
///
/// let mut data = Vec::<u8>::new();
/// let mut writer = BitCursorWriter::new(MemByteWriterVec::new(&mut data));
/// writer.write_bit(1).unwrap();
/// writer.write_bool(false).unwrap();
/// writer.write_bits_of_u8(2, 0b10).unwrap();
/// writer.write_u8(0x53).unwrap();
/// writer.write_bits_of_u16(10, 0x032d).unwrap();
/// writer.write_u16(0x0f5a).unwrap();
/// writer.flush().unwrap();
/// drop(writer);
/// assert_eq!(data, [0xa5, 0x3c, 0xb4, 0x3d, 0x68]);
/// ```
#[derive(Debug)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct BitCursorWriter<W: ByteWrite> {
    /// The [`ByteWrite`] receiving complete bytes.
    backend: W,
    /// The pending byte.
    byte: u8,
    /// Index of the next bit to fill in the pending byte (7 is the MSB).
    bit_index: u8,
    /// Number of bits accepted so far, including pending ones.
    bits_written: u64,
}

impl<W: ByteWrite> BitCursorWriter<W> {
    /// Create a new [`BitCursorWriter`] around a [`ByteWrite`].
    #[must_use]
    pub fn new(backend: W) -> Self {
        Self {
            backend,
            byte: 0,
            bit_index: 7,
            bits_written: 0,
        }
    }

    /// Return the number of bits written so far, including those still
    /// pending in the accumulator.
    #[must_use]
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Return the underlying sink. Pending bits are lost unless
    /// [`flush`](BitWrite::flush) has been called.
    pub fn into_inner(self) -> W {
        self.backend
    }

    /// Send the pending byte to the sink and reset the accumulator.
    #[inline(always)]
    fn emit_byte(&mut self) -> Result<()> {
        tracing::trace!(byte = self.byte, "emitting byte");
        self.backend.write_byte(self.byte).map_err(Error::Sink)?;
        self.byte = 0;
        self.bit_index = 7;
        Ok(())
    }

    /// Write the lowest `n_bits` bits of `value`, which must fit in the
    /// pending byte. The byte is emitted if it becomes complete.
    #[inline(always)]
    fn write_in_current_byte(&mut self, n_bits: u8, value: u8) -> Result<()> {
        if n_bits == 0 {
            return Ok(());
        }
        let available = self.bit_index + 1;
        if n_bits > available {
            return Err(Error::InvalidMask {
                requested: n_bits,
                remaining: available,
            });
        }
        let mask = (u16::MAX >> (16 - n_bits as u32)) as u8;
        self.byte |= (value & mask) << (available - n_bits);
        if n_bits == available {
            self.emit_byte()
        } else {
            self.bit_index -= n_bits;
            Ok(())
        }
    }
}

impl<W: ByteWrite> BitWrite for BitCursorWriter<W> {
    fn write_bit(&mut self, bit: u8) -> Result<()> {
        self.byte |= (bit & 1) << self.bit_index;
        self.bits_written += 1;
        if self.bit_index > 0 {
            self.bit_index -= 1;
            Ok(())
        } else {
            self.emit_byte()
        }
    }

    fn write_bits_of_u64(&mut self, n_bits: u32, value: u64) -> Result<()> {
        check_width::<u64>(n_bits)?;

        #[cfg(feature = "checks")]
        if value & low_mask(n_bits) != value {
            return Err(Error::WidthExceeded {
                requested: (u64::BITS - value.leading_zeros()) as usize,
                capacity: n_bits as usize,
            });
        }

        let fragments = Fragments::split(n_bits, self.bit_index + 1);
        let mut to_write = n_bits;
        for width in fragments.iter() {
            to_write -= width as u32;
            // Shifting by 64 is not allowed, but the first fragment is never empty
            self.write_in_current_byte(width, (value >> to_write) as u8)?;
            self.bits_written += width as u64;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.bit_index != 7 {
            self.emit_byte()?;
        }
        self.backend.flush().map_err(Error::Sink)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::impls::MemByteWriterVec;

    /// The observable state of a writer: pending byte, bit index, and the
    /// bytes already emitted.
    type State = (u8, u8, &'static [u8]);

    fn check<F>(start: (u8, u8), expected: State, n_bits: u32, write: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut BitCursorWriter<MemByteWriterVec<&mut Vec<u8>>>) -> Result<()>,
    {
        let mut data = Vec::<u8>::new();
        let mut writer = BitCursorWriter::new(MemByteWriterVec::new(&mut data));
        writer.byte = start.0;
        writer.bit_index = start.1;
        write(&mut writer)?;
        assert_eq!(writer.bits_written(), n_bits as u64);
        assert_eq!((writer.byte, writer.bit_index), (expected.0, expected.1));
        drop(writer);
        assert_eq!(data, expected.2);
        Ok(())
    }

    #[test]
    fn test_write_bit() -> anyhow::Result<()> {
        let mut data = Vec::<u8>::new();
        let mut writer = BitCursorWriter::new(MemByteWriterVec::new(&mut data));
        for bit in [0, 1, 0, 1, 0, 0, 1, 1, 1, 0, 1, 0, 1, 1, 0, 0] {
            writer.write_bit(bit)?;
        }
        assert_eq!(writer.bits_written(), 16);
        drop(writer);
        assert_eq!(data, [0x53, 0xac]);
        Ok(())
    }

    #[test]
    fn test_write_bits_of_u8() -> anyhow::Result<()> {
        let cases: [(u32, u8, (u8, u8), State); 4] = [
            (1, 0xff, (0x00, 7), (0x80, 6, &[])),
            (4, 0x02, (0x40, 5), (0x48, 1, &[])),
            (8, 0xff, (0x00, 3), (0xf0, 3, &[0x0f])),
            (8, 0xaa, (0x00, 7), (0x00, 7, &[0xaa])),
        ];
        for (n_bits, value, start, expected) in cases {
            check(start, expected, n_bits, |w| {
                w.write_bits_of_u8(n_bits, value & low_mask(n_bits) as u8)
            })?;
        }
        Ok(())
    }

    #[test]
    fn test_write_bits_of_u16() -> anyhow::Result<()> {
        let cases: [(u32, u16, (u8, u8), State); 5] = [
            (1, 0xffff, (0x00, 7), (0x80, 6, &[])),
            (10, 0x2222, (0x40, 5), (0x20, 3, &[0x62])),
            (13, 0xffff, (0x00, 3), (0x80, 6, &[0x0f, 0xff])),
            (16, 0xabcd, (0x00, 7), (0x00, 7, &[0xab, 0xcd])),
            (16, 0xabcd, (0x88, 1), (0x34, 1, &[0x8a, 0xaf])),
        ];
        for (n_bits, value, start, expected) in cases {
            check(start, expected, n_bits, |w| {
                w.write_bits_of_u16(n_bits, value & low_mask(n_bits) as u16)
            })?;
        }
        Ok(())
    }

    #[test]
    fn test_write_bits_of_u32() -> anyhow::Result<()> {
        let cases: [(u32, u32, (u8, u8), State); 10] = [
            (1, 0xffff, (0x00, 7), (0x80, 6, &[])),
            (16, 0xffffabcd, (0x88, 1), (0x34, 1, &[0x8a, 0xaf])),
            (17, 0xffffabcd, (0x88, 1), (0x9a, 0, &[0x8b, 0x57])),
            (24, 0xffabcdef, (0x00, 7), (0x00, 7, &[0xab, 0xcd, 0xef])),
            (24, 0xffabcdef, (0xf0, 3), (0xf0, 3, &[0xfa, 0xbc, 0xde])),
            (24, 0xffabcdef, (0xfc, 1), (0xbc, 1, &[0xfe, 0xaf, 0x37])),
            (31, 0x89abcdef, (0x00, 7), (0xde, 0, &[0x13, 0x57, 0x9b])),
            (31, 0x89abcdef, (0x80, 6), (0x00, 7, &[0x89, 0xab, 0xcd, 0xef])),
            (32, 0x89abcdef, (0x00, 7), (0x00, 7, &[0x89, 0xab, 0xcd, 0xef])),
            (32, 0x89abcdef, (0x80, 6), (0x80, 6, &[0xc4, 0xd5, 0xe6, 0xf7])),
        ];
        for (n_bits, value, start, expected) in cases {
            check(start, expected, n_bits, |w| {
                w.write_bits_of_u32(n_bits, value & low_mask(n_bits) as u32)
            })?;
        }
        Ok(())
    }

    #[test]
    fn test_write_bits_of_u64() -> anyhow::Result<()> {
        check(
            (0x80, 6),
            (0x00, 7, &[0x89, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e, 0x6f, 0x78]),
            63,
            |w| w.write_bits_of_u64(63, 0x123456789abcdef0 >> 1),
        )?;
        check(
            (0xc0, 5),
            (0x00, 5, &[0xc4, 0x8d, 0x15, 0x9e, 0x26, 0xaf, 0x37, 0xbc]),
            64,
            |w| w.write_u64(0x123456789abcdef0),
        )
    }

    #[test]
    fn test_write_bits() -> anyhow::Result<()> {
        let cases: [(usize, &[u8], (u8, u8), State); 11] = [
            (1, &[0xff], (0x00, 7), (0x80, 6, &[])),
            (16, &[0xab, 0xcd], (0x88, 1), (0x34, 1, &[0x8a, 0xaf])),
            (17, &[0xab, 0xcd, 0xef], (0x88, 1), (0x36, 0, &[0x8a, 0xaf])),
            (24, &[0xab, 0xcd, 0xef, 0xff], (0x00, 7), (0x00, 7, &[0xab, 0xcd, 0xef])),
            (24, &[0xab, 0xcd, 0xef, 0xff], (0xf0, 3), (0xf0, 3, &[0xfa, 0xbc, 0xde])),
            (24, &[0xab, 0xcd, 0xef, 0xff], (0xfc, 1), (0xbc, 1, &[0xfe, 0xaf, 0x37])),
            (31, &[0x89, 0xab, 0xcd, 0xef], (0x00, 7), (0xee, 0, &[0x89, 0xab, 0xcd])),
            (31, &[0x89, 0xab, 0xcd, 0xef], (0x80, 6), (0x00, 7, &[0xc4, 0xd5, 0xe6, 0xf7])),
            (31, &[0x89, 0xab, 0xcd, 0xef], (0xc0, 5), (0x80, 6, &[0xe2, 0x6a, 0xf3, 0x7b])),
            (32, &[0x89, 0xab, 0xcd, 0xef], (0x00, 7), (0x00, 7, &[0x89, 0xab, 0xcd, 0xef])),
            (32, &[0x89, 0xab, 0xcd, 0xef], (0x80, 6), (0x80, 6, &[0xc4, 0xd5, 0xe6, 0xf7])),
        ];
        for (n_bits, bytes, start, expected) in cases {
            check(start, expected, n_bits as u32, |w| w.write_bits(n_bits, bytes))?;
        }
        Ok(())
    }

    #[cfg(not(feature = "checks"))]
    #[test]
    fn test_high_bits_are_ignored() -> anyhow::Result<()> {
        check((0x00, 7), (0x80, 6, &[]), 1, |w| w.write_bits_of_u8(1, 0xff))?;
        check((0x40, 5), (0x20, 3, &[0x62]), 10, |w| {
            w.write_bits_of_u16(10, 0x2222)
        })?;
        check((0x00, 7), (0xde, 0, &[0x13, 0x57, 0x9b]), 31, |w| {
            w.write_bits_of_u32(31, 0x89abcdef)
        })
    }

    #[test]
    fn test_write_in_current_byte_never_overflows() {
        for bit_index in 0..8_u8 {
            for n_bits in 0..=8_u8 {
                let mut data = Vec::<u8>::new();
                let mut writer = BitCursorWriter::new(MemByteWriterVec::new(&mut data));
                writer.bit_index = bit_index;
                let available = bit_index + 1;
                match writer.write_in_current_byte(n_bits, 0xff) {
                    Ok(()) => assert!(n_bits <= available),
                    Err(Error::InvalidMask {
                        requested,
                        remaining,
                    }) => {
                        assert!(n_bits > available);
                        assert_eq!((requested, remaining), (n_bits, available));
                        assert_eq!((writer.byte, writer.bit_index), (0, bit_index));
                    }
                    Err(e) => panic!("unexpected error {e}"),
                }
            }
        }
    }

    #[test]
    fn test_flush() -> anyhow::Result<()> {
        let mut data = Vec::<u8>::new();
        let mut writer = BitCursorWriter::new(MemByteWriterVec::new(&mut data));
        // Nothing pending, nothing emitted
        writer.flush()?;
        writer.write_bits_of_u8(3, 0b101)?;
        writer.flush()?;
        assert_eq!((writer.byte, writer.bit_index), (0, 7));
        writer.write_u8(0xff)?;
        writer.flush()?;
        assert_eq!(writer.bits_written(), 11);
        drop(writer);
        assert_eq!(data, [0xa0, 0xff]);
        Ok(())
    }

    #[test]
    fn test_width_exceeded() {
        let mut data = Vec::<u8>::new();
        let mut writer = BitCursorWriter::new(MemByteWriterVec::new(&mut data));
        assert!(matches!(writer.write_bits_of_u8(9, 0), Err(Error::WidthExceeded { .. })));
        assert!(matches!(writer.write_bits_of_u16(17, 0), Err(Error::WidthExceeded { .. })));
        assert!(matches!(writer.write_bits_of_u32(33, 0), Err(Error::WidthExceeded { .. })));
        assert!(matches!(writer.write_bits_of_u64(65, 0), Err(Error::WidthExceeded { .. })));
        assert!(matches!(
            writer.write_bits(17, &[0, 0]),
            Err(Error::WidthExceeded {
                requested: 17,
                capacity: 16
            })
        ));
        assert_eq!(writer.bits_written(), 0);
    }

    #[cfg(feature = "checks")]
    #[test]
    fn test_checks() -> anyhow::Result<()> {
        let mut data = Vec::<u8>::new();
        let mut writer = BitCursorWriter::new(MemByteWriterVec::new(&mut data));
        assert!(matches!(
            writer.write_bits_of_u8(3, 0b1000),
            Err(Error::WidthExceeded {
                requested: 4,
                capacity: 3
            })
        ));
        assert!(matches!(
            writer.write_bits_of_u64(0, 1),
            Err(Error::WidthExceeded { .. })
        ));
        assert_eq!(writer.bits_written(), 0);

        writer.write_bits_of_u64(64, u64::MAX)?;
        // Signed values and byte arrays are reduced to n_bits before writing
        writer.write_bits_of_i32(5, -1)?;
        writer.write_bits(3, &[0xff])?;
        writer.flush()?;
        assert_eq!(writer.bits_written(), 72);
        drop(writer);
        assert_eq!(data, [0xff; 9]);
        Ok(())
    }
}
