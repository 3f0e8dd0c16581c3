/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::prelude::*;
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
pub struct FuzzCase {
    buffer_size: u8,
    chunk_size: u8,
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug)]
pub enum RandomCommand {
    Bit(bool),
    Bits(u64, u8),
    Signed(i32, u8),
    Bytes(Vec<u8>, u16),
    Skip(u64, u8),
}

/// Append the lowest `n_bits` bits of `value` to `bits`, most significant first.
fn push_bits(bits: &mut Vec<bool>, value: u64, n_bits: u32) {
    for i in (0..n_bits).rev() {
        bits.push((value >> i) & 1 != 0);
    }
}

pub fn harness(data: FuzzCase) {
    // One entry per bit written
    let mut bits = Vec::<bool>::new();
    let mut buffer = Vec::<u8>::new();

    let mut writer = BitCursorWriter::new(MemByteWriterVec::new(&mut buffer));
    for command in &data.commands {
        match command {
            RandomCommand::Bit(bit) => {
                writer.write_bool(*bit).unwrap();
                bits.push(*bit);
            }
            RandomCommand::Bits(value, n_bits) | RandomCommand::Skip(value, n_bits) => {
                let n_bits = (*n_bits % 65) as u32;
                let value = *value & low_mask(n_bits);
                writer.write_bits_of_u64(n_bits, value).unwrap();
                push_bits(&mut bits, value, n_bits);
            }
            RandomCommand::Signed(value, n_bits) => {
                let n_bits = (*n_bits % 33) as u32;
                writer.write_bits_of_i32(n_bits, *value).unwrap();
                push_bits(&mut bits, *value as u32 as u64, n_bits);
            }
            RandomCommand::Bytes(bytes, n_bits) => {
                let n_bits = *n_bits as usize % (bytes.len() * 8 + 1);
                writer.write_bits(n_bits, bytes).unwrap();
                for i in 0..n_bits {
                    bits.push((bytes[i / 8] >> (7 - i % 8)) & 1 != 0);
                }
            }
        }
    }
    assert_eq!(writer.bits_written(), bits.len() as u64);
    writer.flush().unwrap();
    drop(writer);
    assert_eq!(buffer.len(), bits.len().div_ceil(8));

    let options = ReaderOptions::default().with_buffer_size(data.buffer_size as usize);
    let mut reader = BitCursorReader::with_options(
        MemByteReader::with_chunk_size(&buffer, data.chunk_size as usize),
        options,
    );
    let mut pos = 0;
    for command in &data.commands {
        match command {
            RandomCommand::Bit(bit) => {
                assert_eq!(reader.read_bool().unwrap(), *bit);
                pos += 1;
            }
            RandomCommand::Bits(value, n_bits) => {
                let n_bits = (*n_bits % 65) as u32;
                let value = *value & low_mask(n_bits);
                let read = reader.read_bits_as_u64(n_bits).unwrap();
                assert_eq!(
                    read,
                    value,
                    "\nread : {:0n$b}\ntruth: {:0n$b}",
                    read,
                    value,
                    n = n_bits as _
                );
                pos += n_bits as usize;
            }
            RandomCommand::Skip(_, n_bits) => {
                let n_bits = (*n_bits % 65) as u64;
                reader.skip_bits(n_bits).unwrap();
                pos += n_bits as usize;
            }
            RandomCommand::Signed(value, n_bits) => {
                let n_bits = (*n_bits % 33) as u32;
                let read = reader.read_bits_as_i32(n_bits).unwrap();
                if n_bits == 0 {
                    assert_eq!(read, 0);
                } else {
                    let shift = 32 - n_bits;
                    assert_eq!(read, (*value << shift) >> shift);
                }
                pos += n_bits as usize;
            }
            RandomCommand::Bytes(bytes, n_bits) => {
                let n_bits = *n_bits as usize % (bytes.len() * 8 + 1);
                let read = reader.read_bits(n_bits, &ReadOptions::default()).unwrap();
                assert_eq!(read.len(), n_bits.div_ceil(8));
                for (i, &bit) in bits[pos..pos + n_bits].iter().enumerate() {
                    assert_eq!((read[i / 8] >> (7 - i % 8)) & 1 != 0, bit);
                }
                pos += n_bits;
            }
        }
        assert_eq!(reader.bits_read(), pos as u64);
    }

    // Only the zero padding of the last byte is left
    let padding = buffer.len() * 8 - bits.len();
    assert_eq!(reader.read_bits_as_u64(padding as u32).unwrap(), 0);
    assert!(matches!(reader.read_bit(), Err(Error::EndOfStream)));
}
