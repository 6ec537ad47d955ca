/*!
This module provides the raw Snappy block codec that sits underneath
[`Codec`](../struct.Codec.html).

The routines here work on caller-provided buffers and report their outcome
as a [`Status`](../enum.Status.html). They never allocate output and never
read or write out of bounds, whatever bytes they are handed. Most callers
want the facade instead, which takes care of allocation, size limits and
turning statuses into errors.

The format is the "raw" (unframed) Snappy format: a varint holding the
uncompressed length followed by a sequence of literal and copy elements.
*/
pub use crate::compress::{compress, max_compressed_len};
pub use crate::decompress::{decompress, decompress_len, validate};

use crate::primitive::{Primitive, Status};

/// The raw Snappy block codec as a [`Primitive`](../trait.Primitive.html).
///
/// This is the primitive used by `Codec::new()`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Snappy;

impl Primitive for Snappy {
    fn max_compressed_length(&self, input_len: usize) -> usize {
        max_compressed_len(input_len)
    }

    fn compress(&self, input: &[u8], output: &mut [u8]) -> (usize, Status) {
        compress(input, output)
    }

    fn uncompressed_length(&self, input: &[u8]) -> (usize, Status) {
        decompress_len(input)
    }

    fn uncompress(&self, input: &[u8], output: &mut [u8]) -> Status {
        decompress(input, output)
    }

    fn validate(&self, input: &[u8]) -> Status {
        validate(input)
    }
}
