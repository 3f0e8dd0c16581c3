/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Implementations of bit cursors and byte sources and sinks.

If you need to read or write bits from a file or any backend implementing
[`std::io::Read`] or [`std::io::Write`] you just need to wrap it in a
[`ByteAdapter`]. If instead you want to read from or write to memory, you can
use [`MemByteReader`] and [`MemByteWriterVec`].

Once you have a byte source or sink, [`BitCursorReader`] and
[`BitCursorWriter`] read or write bits from it. The reader keeps a buffer of
configurable size (see [`ReaderOptions`](crate::traits::ReaderOptions)),
refilled with one call to the source at a time; the writer keeps a single
pending byte, which is handed to the sink as soon as it is complete.

Neither the reader nor the writer closes the wrapped source or sink: use
their `into_inner` methods to get it back.

*/

mod fragments;

mod byte_adapter;
pub use byte_adapter::*;

mod mem_byte_reader;
pub use mem_byte_reader::*;

mod mem_byte_writer;
pub use mem_byte_writer::*;

mod bit_cursor_reader;
pub use bit_cursor_reader::BitCursorReader;

mod bit_cursor_writer;
pub use bit_cursor_writer::BitCursorWriter;
