/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::fmt::{Display, Formatter};
use std::error::Error as StdError;
use std::io;

/// The error returned by [`BitRead`](crate::traits::BitRead) and
/// [`BitWrite`](crate::traits::BitWrite) operations.
///
/// Widths are checked before touching the stream, so after
/// [`Error::WidthExceeded`] the cursor is unchanged. Otherwise, bits consumed
/// or produced before a failure are not rolled back, and the cursor should be
/// discarded.
#[derive(Debug)]
pub enum Error {
    /// The requested number of bits does not fit the target type (or, for
    /// byte-array writes, the provided slice).
    WidthExceeded { requested: usize, capacity: usize },
    /// The source was exhausted before the read could be satisfied.
    EndOfStream,
    /// The byte source failed.
    Source(io::Error),
    /// The byte sink failed.
    Sink(io::Error),
    /// A fragment asked for more bits than those left in the current byte.
    ///
    /// This must not occur given a correct width decomposition, and it
    /// signals a defect in this crate rather than a recoverable condition.
    InvalidMask { requested: u8, remaining: u8 },
}

/// A specialized [`Result`](core::result::Result) for bit-level operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::WidthExceeded {
                requested,
                capacity,
            } => write!(
                f,
                "Cannot handle {} bits: at most {} bits are available",
                requested, capacity
            ),
            Error::EndOfStream => write!(f, "Unexpected end of stream"),
            Error::Source(e) => write!(f, "Source error: {}", e),
            Error::Sink(e) => write!(f, "Sink error: {}", e),
            Error::InvalidMask {
                requested,
                remaining,
            } => write!(
                f,
                "Internal error: {} bits requested but only {} left in the current byte",
                requested, remaining
            ),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Source(e) | Error::Sink(e) => Some(e),
            _ => None,
        }
    }
}
