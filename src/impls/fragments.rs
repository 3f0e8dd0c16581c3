/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// The maximum number of bytes touched by a 64-bit quantity that does not
/// start on a byte boundary.
pub(crate) const MAX_FRAGMENTS: usize = 9;

/// The decomposition of an access of at most 64 bits into per-byte fragments.
///
/// The first fragment fills the bits still available in the current byte;
/// then come full bytes, and finally a partial byte, if needed. Fragments are
/// stored most significant first, that is, in stream order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fragments {
    widths: [u8; MAX_FRAGMENTS],
    len: usize,
}

impl Fragments {
    /// Split `n_bits` (at most 64) given that `available` bits (between 1
    /// and 8) are left in the current byte.
    #[must_use]
    pub(crate) fn split(n_bits: u32, available: u8) -> Self {
        debug_assert!(n_bits <= 64);
        debug_assert!((1..=8).contains(&available));

        let mut widths = [0; MAX_FRAGMENTS];
        let mut len = 0;
        let mut to_split = n_bits;
        let mut room = available as u32;
        while to_split > 0 {
            let width = to_split.min(room);
            widths[len] = width as u8;
            len += 1;
            to_split -= width;
            room = 8;
        }
        Self { widths, len }
    }

    #[inline(always)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.widths[..self.len].iter().copied()
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.len
    }
}
