/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default number of bytes requested from the source at each refill.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Construction options of a [`BitCursorReader`](crate::impls::BitCursorReader).
///
/// A `buffer_size` of zero selects [`DEFAULT_BUFFER_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderOptions {
    pub buffer_size: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ReaderOptions {
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// The effective buffer size.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        if self.buffer_size == 0 {
            DEFAULT_BUFFER_SIZE
        } else {
            self.buffer_size
        }
    }
}

/// Layout options of [`BitRead::read_bits`](crate::traits::BitRead::read_bits).
///
/// By default the bits are left aligned: the first bit read is the most
/// significant bit of the first byte, and the unused low bits of the last
/// byte are zero. With `align_right` the bits are instead returned as a
/// big-endian number, so the unused bits are the high bits of the first
/// byte. With `pad_one` unused bits are set to one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReadOptions {
    pub align_right: bool,
    pub pad_one: bool,
}

impl ReadOptions {
    #[must_use]
    pub fn with_align_right(mut self, align_right: bool) -> Self {
        self.align_right = align_right;
        self
    }

    #[must_use]
    pub fn with_pad_one(mut self, pad_one: bool) -> Self {
        self.pad_one = pad_one;
        self
    }
}
