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
use std::io::{self, Read, Write};

/// An adapter from [`Read`] and [`Write`] to [`ByteRead`] and [`ByteWrite`],
/// respectively.
///
/// Instances of this struct can be created using [`ByteAdapter::new`]. They
/// turn every standard source or destination of bytes (such as
/// [`std::fs::File`], [`std::io::BufReader`], sockets, etc.) into a source or
/// destination for a bit cursor.
///
/// The adapter does not close the backend: it can be recovered with
/// [`ByteAdapter::into_inner`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct ByteAdapter<B> {
    backend: B,
}

impl<B> ByteAdapter<B> {
    /// Create a new ByteAdapter
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn into_inner(self) -> B {
        self.backend
    }
}

impl<B: Read> ByteRead for ByteAdapter<B> {
    /// Reads interrupted by a signal are retried.
    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.backend.read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }
}

impl<B: Write> ByteWrite for ByteAdapter<B> {
    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.backend.write_all(&[byte])
    }

    fn flush(&mut self) -> io::Result<()> {
        self.backend.flush()
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn test_byte_adapter_file() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join("test_bitcursor_byte_adapter");
        {
            let mut writer =
                BitCursorWriter::new(ByteAdapter::new(std::fs::File::create(&path)?));
            for value in 0..100_u32 {
                let n_bits = value % 23 + 1;
                writer.write_bits_of_u32(n_bits, value & ((1 << n_bits) - 1))?;
            }
            writer.flush()?;
        }
        {
            let mut reader = BitCursorReader::with_options(
                ByteAdapter::new(std::fs::File::open(&path)?),
                ReaderOptions::default().with_buffer_size(7),
            );
            for value in 0..100_u32 {
                let n_bits = value % 23 + 1;
                assert_eq!(reader.read_bits_as_u32(n_bits)?, value & ((1 << n_bits) - 1));
            }
        }
        std::fs::remove_file(&path)?;
        Ok(())
    }

    #[test]
    fn test_byte_adapter_cursor() -> anyhow::Result<()> {
        let mut writer = BitCursorWriter::new(ByteAdapter::new(std::io::Cursor::new(Vec::<u8>::new())));
        writer.write_bits_of_u16(12, 0xabc)?;
        writer.flush()?;
        let data = writer.into_inner().into_inner().into_inner();
        assert_eq!(data, [0xab, 0xc0]);
        Ok(())
    }

    /// Returns one byte per call, after a failing call with the given kind.
    struct FlakySource {
        data: Vec<u8>,
        kind: std::io::ErrorKind,
        fail: bool,
    }

    impl std::io::Read for FlakySource {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.fail = !self.fail;
            if self.fail {
                return Err(std::io::Error::from(self.kind));
            }
            if self.data.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data.remove(0);
            Ok(1)
        }
    }

    #[test]
    fn test_byte_adapter_interrupted() -> anyhow::Result<()> {
        let mut reader = BitCursorReader::new(ByteAdapter::new(FlakySource {
            data: vec![0x12, 0x34],
            kind: std::io::ErrorKind::Interrupted,
            fail: false,
        }));
        assert_eq!(reader.read_u16()?, 0x1234);
        assert!(matches!(reader.read_bit(), Err(Error::EndOfStream)));

        // Other errors are reported
        let mut reader = BitCursorReader::new(ByteAdapter::new(FlakySource {
            data: vec![0x12],
            kind: std::io::ErrorKind::UnexpectedEof,
            fail: false,
        }));
        match reader.read_bit() {
            Err(Error::Source(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected result {other:?}"),
        }
        Ok(())
    }
}
