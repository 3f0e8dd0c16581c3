/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Traits for byte sources and sinks, bit widths, and bit-level reads and writes.

A [`ByteRead`] or [`ByteWrite`] is the minimal collaborator a bit cursor
needs: "read up to N bytes" and "write one byte", respectively. On top of
them, [`BitRead`] and [`BitWrite`] describe big-endian bit streams: the first
bit read or written is the most significant bit of the value being assembled,
and bits are packed into bytes starting from the most significant bit.

*/

mod bit_stream;
pub use bit_stream::*;

mod byte_stream;
pub use byte_stream::*;

mod error;
pub use error::*;

mod options;
pub use options::*;

mod width;
pub use width::*;
