/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::{Error, Result};
use core::fmt::Debug;
use num_traits::{AsPrimitive, PrimInt, Unsigned};

/// Inner private trait used to make implementing [`UnsignedWidth`]
/// impossible for other types.
mod private {
    pub trait Sealed {}
}

/// The unsigned integer types that can be read from or written to a bit
/// stream: `u8`, `u16`, `u32`, and `u64`.
pub trait UnsignedWidth:
    private::Sealed + PrimInt + Unsigned + AsPrimitive<u64> + Debug + Send + Sync + 'static
{
    /// The number of bits of the type.
    const BITS: u32;

    /// Keep the lowest [`Self::BITS`](UnsignedWidth::BITS) bits of `value`.
    fn from_u64_truncating(value: u64) -> Self;
}

macro_rules! impl_unsigned_width {
    ($($ty:ty),*) => {$(
        impl private::Sealed for $ty {}

        impl UnsignedWidth for $ty {
            const BITS: u32 = <$ty>::BITS;

            #[inline(always)]
            fn from_u64_truncating(value: u64) -> Self {
                value as $ty
            }
        }
    )*};
}

impl_unsigned_width!(u8, u16, u32, u64);

/// Fail with [`Error::WidthExceeded`] if `n_bits` does not fit in `W`.
#[inline(always)]
pub fn check_width<W: UnsignedWidth>(n_bits: u32) -> Result<()> {
    if n_bits > W::BITS {
        return Err(Error::WidthExceeded {
            requested: n_bits as usize,
            capacity: W::BITS as usize,
        });
    }
    Ok(())
}

/// Return a mask with the lowest `n_bits` bits set; `n_bits` must be at most 64.
#[inline(always)]
#[must_use]
pub fn low_mask(n_bits: u32) -> u64 {
    debug_assert!(n_bits <= 64);
    if n_bits == 0 {
        0
    } else {
        u64::MAX >> (64 - n_bits)
    }
}
