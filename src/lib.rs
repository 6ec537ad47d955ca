/*!
A safe boundary around the raw Snappy block compression format.

This crate takes arbitrary bytes from a caller, compresses or decompresses
them and hands back a newly allocated buffer. Hostile input cannot make it
panic, read or write out of bounds, or allocate without limit: the
uncompressed length declared by a frame header is checked against a ceiling
(1 GiB by default) before any output buffer exists, and allocation failure
is reported as an error rather than aborting the process.

There are three layers:

* The free functions in this module and [`Codec`] take and return plain
  bytes.
* The [`host`] module wraps the same operations for dynamically typed
  callers, checking that exactly one buffer argument was given.
* The [`raw`] module is the underlying block codec. It works on
  caller-provided buffers and reports a [`Status`] instead of an error.

# Example

```
let data = b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
let compressed = safesnap::compress(data)?;
assert!(compressed.len() < data.len());
assert!(safesnap::is_valid_compressed(&compressed));
assert_eq!(safesnap::uncompressed_length(&compressed)?, data.len());
assert_eq!(safesnap::uncompress(&compressed)?, &data[..]);
# Ok::<(), safesnap::Error>(())
```

Streaming and the Snappy framing format are not supported; each call
handles one whole buffer.
*/

pub use crate::codec::{Codec, CodecBuilder};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::limit::{SizeGuard, MAX_UNCOMPRESSED_LEN};
pub use crate::primitive::{Primitive, Status};
pub use crate::raw::Snappy;
pub use crate::text::Encoding;

/// We don't permit compressing a block bigger than what can fit in a u32.
const MAX_INPUT_SIZE: u64 = u32::MAX as u64;

/// The maximum number of bytes that we process at once. A block is the unit
/// at which we scan for candidates for compression.
const MAX_BLOCK_SIZE: usize = 1 << 16;

mod codec;
mod compress;
mod decompress;
mod error;
pub mod host;
mod limit;
mod primitive;
pub mod raw;
mod tag;
mod text;
mod varint;

/// Compresses `input` with the default codec.
///
/// See [`Codec::compress`].
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    Codec::new().compress(input)
}

/// Decompresses `input` with the default codec.
///
/// See [`Codec::uncompress`].
pub fn uncompress(input: &[u8]) -> Result<Vec<u8>> {
    Codec::new().uncompress(input)
}

/// An alias for [`uncompress`].
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    uncompress(input)
}

/// Reads the uncompressed length declared by the header of `input`.
///
/// See [`Codec::uncompressed_length`].
pub fn uncompressed_length(input: &[u8]) -> Result<usize> {
    Codec::new().uncompressed_length(input)
}

/// Returns true if `input` is a well-formed compressed frame.
///
/// See [`Codec::is_valid_compressed`].
pub fn is_valid_compressed(input: &[u8]) -> bool {
    Codec::new().is_valid_compressed(input)
}

/// Compresses `text` after converting it to bytes with `encoding`.
pub fn compress_str(text: &str, encoding: Encoding) -> Result<Vec<u8>> {
    Codec::new().compress_str(text, encoding)
}

/// Decompresses `input` and converts the result to text with `encoding`.
pub fn uncompress_to_string(input: &[u8], encoding: Encoding) -> Result<String> {
    Codec::new().uncompress_to_string(input, encoding)
}

/// An alias for [`uncompress_to_string`].
pub fn decompress_to_string(input: &[u8], encoding: Encoding) -> Result<String> {
    uncompress_to_string(input, encoding)
}
