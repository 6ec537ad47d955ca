use log::debug;

use crate::error::{Error, Result};

/// The largest uncompressed length that will ever be allocated for a
/// decompression: 1 GiB.
///
/// A frame header can declare up to 4 GiB, and it costs an attacker five
/// bytes to do so. Declared lengths are checked against this before any
/// output buffer exists.
pub const MAX_UNCOMPRESSED_LEN: usize = 1 << 30;

/// Caps the output size of decompression.
///
/// The ceiling is fixed when the guard is built. It can be lowered below
/// `MAX_UNCOMPRESSED_LEN`, but never raised above it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SizeGuard {
    max: usize,
}

impl Default for SizeGuard {
    fn default() -> SizeGuard {
        SizeGuard { max: MAX_UNCOMPRESSED_LEN }
    }
}

impl SizeGuard {
    /// Creates a guard that permits at most `max` bytes, clamped to
    /// `MAX_UNCOMPRESSED_LEN`.
    pub fn new(max: usize) -> SizeGuard {
        SizeGuard { max: max.min(MAX_UNCOMPRESSED_LEN) }
    }

    /// The largest permitted length.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Returns an error if `len` exceeds the permitted maximum.
    pub fn check(&self, len: usize) -> Result<()> {
        if len > self.max {
            debug!("rejecting declared length {} (limit {})", len, self.max);
            return Err(Error::Range { given: len as u64, max: self.max as u64 });
        }
        Ok(())
    }
}
