/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;

/// Wrapping struct that keep tracks of written bits. Optionally,
/// prints to standard error information about methods called.
#[derive(Debug)]
pub struct CountBitWriter<BW: BitWrite, const PRINT: bool = false> {
    bit_write: BW,
    /// The number of bits written so far on the underlying [`BitWrite`].
    pub bits_written: usize,
}

impl<BW: BitWrite, const PRINT: bool> CountBitWriter<BW, PRINT> {
    pub fn new(bit_write: BW) -> Self {
        Self {
            bit_write,
            bits_written: 0,
        }
    }

    pub fn into_inner(self) -> BW {
        self.bit_write
    }
}

impl<BW: BitWrite, const PRINT: bool> BitWrite for CountBitWriter<BW, PRINT> {
    fn write_bit(&mut self, bit: u8) -> Result<()> {
        self.bit_write.write_bit(bit).map(|()| {
            self.bits_written += 1;
            if PRINT {
                eprintln!("write_bit({}) (total = {})", bit & 1, self.bits_written);
            }
        })
    }

    fn write_bits_of_u64(&mut self, n_bits: u32, value: u64) -> Result<()> {
        self.bit_write.write_bits_of_u64(n_bits, value).map(|()| {
            self.bits_written += n_bits as usize;
            if PRINT {
                eprintln!(
                    "write_bits_of_u64({}, {:#018x}) (total = {})",
                    n_bits, value, self.bits_written
                );
            }
        })
    }

    fn write_bits(&mut self, n_bits: usize, bytes: &[u8]) -> Result<()> {
        self.bit_write.write_bits(n_bits, bytes).map(|()| {
            self.bits_written += n_bits;
            if PRINT {
                eprintln!(
                    "write_bits({}, {:02x?}) (total = {})",
                    n_bits, bytes, self.bits_written
                );
            }
        })
    }

    fn flush(&mut self) -> Result<()> {
        if PRINT {
            eprintln!("flush() (total = {})", self.bits_written);
        }
        self.bit_write.flush()
    }
}

/// Wrapping struct that keep tracks of read bits. Optionally,
/// prints to standard error information about methods called.
#[derive(Debug)]
pub struct CountBitReader<BR: BitRead, const PRINT: bool = false> {
    bit_read: BR,
    /// The number of bits read (or skipped) so far from the underlying [`BitRead`].
    pub bits_read: usize,
}

impl<BR: BitRead, const PRINT: bool> CountBitReader<BR, PRINT> {
    pub fn new(bit_read: BR) -> Self {
        Self {
            bit_read,
            bits_read: 0,
        }
    }

    pub fn into_inner(self) -> BR {
        self.bit_read
    }
}

impl<BR: BitRead, const PRINT: bool> BitRead for CountBitReader<BR, PRINT> {
    fn read_bit(&mut self) -> Result<u8> {
        self.bit_read.read_bit().map(|x| {
            self.bits_read += 1;
            if PRINT {
                eprintln!("read_bit() = {} (total = {})", x, self.bits_read);
            }
            x
        })
    }

    fn read_bits_as_u64(&mut self, n_bits: u32) -> Result<u64> {
        self.bit_read.read_bits_as_u64(n_bits).map(|x| {
            self.bits_read += n_bits as usize;
            if PRINT {
                eprintln!(
                    "read_bits_as_u64({}) = {:#018x} (total = {})",
                    n_bits, x, self.bits_read
                );
            }
            x
        })
    }

    fn read_bits(&mut self, n_bits: usize, options: &ReadOptions) -> Result<Vec<u8>> {
        self.bit_read.read_bits(n_bits, options).map(|x| {
            self.bits_read += n_bits;
            if PRINT {
                eprintln!(
                    "read_bits({}, {:?}) = {:02x?} (total = {})",
                    n_bits, options, x, self.bits_read
                );
            }
            x
        })
    }

    fn skip_bits(&mut self, n_bits: u64) -> Result<()> {
        self.bits_read += n_bits as usize;
        if PRINT {
            eprintln!("skip_bits({}) (total = {})", n_bits, self.bits_read);
        }
        self.bit_read.skip_bits(n_bits)
    }
}

#[cfg(test)]
#[test]
fn test_count() -> anyhow::Result<()> {
    use crate::prelude::*;
    let mut buffer = <Vec<u8>>::new();
    let bit_write = BitCursorWriter::new(MemByteWriterVec::new(&mut buffer));
    let mut count_bit_write = CountBitWriter::<_, true>::new(bit_write);

    count_bit_write.write_bit(1)?;
    assert_eq!(count_bit_write.bits_written, 1);
    count_bit_write.write_bits_of_u8(5, 0b10110)?;
    assert_eq!(count_bit_write.bits_written, 6);
    count_bit_write.write_u32(0xdeadbeef)?;
    assert_eq!(count_bit_write.bits_written, 38);
    count_bit_write.write_bits(12, &[0xab, 0xcd])?;
    assert_eq!(count_bit_write.bits_written, 50);
    count_bit_write.write_bits_of_u64(33, 1)?;
    assert_eq!(count_bit_write.bits_written, 83);
    count_bit_write.flush()?;
    assert_eq!(count_bit_write.into_inner().bits_written(), 83);

    let bit_read = BitCursorReader::new(MemByteReader::new(&buffer));
    let mut count_bit_read = CountBitReader::<_, true>::new(bit_read);

    assert_eq!(count_bit_read.read_bit()?, 1);
    assert_eq!(count_bit_read.bits_read, 1);
    assert_eq!(count_bit_read.read_bits_as_u8(5)?, 0b10110);
    assert_eq!(count_bit_read.bits_read, 6);
    assert_eq!(count_bit_read.read_u32()?, 0xdeadbeef);
    assert_eq!(count_bit_read.bits_read, 38);
    assert_eq!(
        count_bit_read.read_bits(12, &ReadOptions::default())?,
        [0xab, 0xc0]
    );
    assert_eq!(count_bit_read.bits_read, 50);
    count_bit_read.skip_bits(32)?;
    assert_eq!(count_bit_read.bits_read, 82);
    assert_eq!(count_bit_read.read_bit()?, 1);
    assert_eq!(count_bit_read.into_inner().bits_read(), 83);

    Ok(())
}
