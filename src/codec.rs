use log::{debug, trace};

use crate::error::{Error, Result};
use crate::limit::SizeGuard;
use crate::primitive::{Primitive, Status};
use crate::raw::Snappy;

/// A safe, allocating front end to a block codec.
///
/// Every method takes an input slice and returns a freshly allocated,
/// exactly sized buffer (or a length, or a boolean). Malformed or hostile
/// input results in an [`Error`](enum.Error.html) and never in a panic, an
/// out of bounds access or an allocation larger than the configured limit.
///
/// A `Codec` holds no mutable state, so a single value can be shared freely
/// between threads.
///
/// # Example
///
/// ```
/// let codec = safesnap::Codec::new();
/// let compressed = codec.compress(b"hello hello hello hello")?;
/// assert_eq!(codec.uncompressed_length(&compressed)?, 23);
/// assert!(codec.is_valid_compressed(&compressed));
/// assert_eq!(codec.uncompress(&compressed)?, b"hello hello hello hello");
/// # Ok::<(), safesnap::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Codec<P = Snappy> {
    primitive: P,
    guard: SizeGuard,
}

impl Codec<Snappy> {
    /// Creates a codec over the raw Snappy format that permits decompressed
    /// output of up to `MAX_UNCOMPRESSED_LEN` bytes.
    pub fn new() -> Codec<Snappy> {
        Codec::default()
    }

    /// Returns a builder for configuring a codec.
    pub fn builder() -> CodecBuilder {
        CodecBuilder::new()
    }
}

impl<P: Primitive> Codec<P> {
    /// Creates a codec over a different block codec, with the default
    /// output limit.
    pub fn with_primitive(primitive: P) -> Codec<P> {
        Codec { primitive, guard: SizeGuard::default() }
    }

    /// The largest decompressed output this codec will allocate.
    pub fn max_uncompressed_len(&self) -> usize {
        self.guard.max()
    }

    /// Compresses `input` into a new buffer.
    ///
    /// Any input is legal, including an empty one, which compresses to a
    /// (non-empty) frame declaring zero bytes.
    ///
    /// # Errors
    ///
    /// `Error::Allocation` if the scratch buffer could not be allocated, and
    /// `Error::Compression` if the codec reported a failure (for the raw
    /// Snappy codec, only inputs of 4 GiB or more do this).
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let max = self.primitive.max_compressed_length(input.len());
        let mut buf = alloc(max)?;
        let (written, status) = self.primitive.compress(input, &mut buf);
        if !status.is_ok() {
            debug!("compression of {} bytes failed: {:?}", input.len(), status);
            return Err(Error::Compression { status });
        }
        if written > buf.len() {
            debug!("codec claims {} bytes written into {}", written, buf.len());
            return Err(Error::Compression { status: Status::BufferTooSmall });
        }
        buf.truncate(written);
        buf.shrink_to_fit();
        trace!("compressed {} bytes into {}", input.len(), buf.len());
        Ok(buf)
    }

    /// Decompresses `input` into a new buffer whose length is exactly the
    /// length declared by the frame header.
    ///
    /// # Errors
    ///
    /// In the order they are checked:
    ///
    /// * `Error::Format` if the frame header cannot be read.
    /// * `Error::Range` if the declared length exceeds the limit.
    /// * `Error::Allocation` if the output buffer could not be allocated.
    /// * `Error::Decompression` if the payload is corrupt.
    pub fn uncompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let len = self.uncompressed_length(input)?;
        self.guard.check(len)?;
        let mut buf = alloc(len)?;
        let status = self.primitive.uncompress(input, &mut buf);
        if !status.is_ok() {
            debug!(
                "corrupt payload in {} byte frame declaring {} bytes: {:?}",
                input.len(),
                len,
                status
            );
            return Err(Error::Decompression { status });
        }
        trace!("decompressed {} bytes into {}", input.len(), buf.len());
        Ok(buf)
    }

    /// An alias for `uncompress`.
    pub fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.uncompress(input)
    }

    /// Returns the uncompressed length declared by the frame header of
    /// `input`. Only the header is read and nothing is allocated.
    ///
    /// The limit is not applied here, so callers can use this to check a
    /// length against their own budget before decompressing.
    ///
    /// # Errors
    ///
    /// `Error::Format` if the header cannot be read.
    pub fn uncompressed_length(&self, input: &[u8]) -> Result<usize> {
        let (len, status) = self.primitive.uncompressed_length(input);
        if !status.is_ok() {
            debug!("unreadable header in {} byte input", input.len());
            return Err(Error::Format);
        }
        Ok(len)
    }

    /// Returns true if `input` is a well-formed compressed frame.
    ///
    /// The whole frame is checked, not just its header, but no output is
    /// produced. A frame that passes can only fail to decompress because of
    /// the size limit or a failed allocation.
    pub fn is_valid_compressed(&self, input: &[u8]) -> bool {
        let valid = self.primitive.validate(input).is_ok();
        trace!("{} byte input valid: {}", input.len(), valid);
        valid
    }
}

/// Allocates a zeroed buffer of exactly `len` bytes, reporting failure
/// instead of aborting.
fn alloc(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    if buf.try_reserve_exact(len).is_err() {
        debug!("failed to allocate {} bytes", len);
        return Err(Error::Allocation { size: len as u64 });
    }
    buf.resize(len, 0);
    Ok(buf)
}

/// A builder for a [`Codec`](struct.Codec.html).
///
/// ```
/// let codec = safesnap::Codec::builder()
///     .max_uncompressed_len(1 << 20)
///     .build();
/// assert_eq!(codec.max_uncompressed_len(), 1 << 20);
/// ```
#[derive(Clone, Debug)]
pub struct CodecBuilder {
    guard: SizeGuard,
}

impl Default for CodecBuilder {
    fn default() -> CodecBuilder {
        CodecBuilder::new()
    }
}

impl CodecBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> CodecBuilder {
        CodecBuilder { guard: SizeGuard::default() }
    }

    /// Sets the largest decompressed output the codec will allocate.
    ///
    /// Values above `MAX_UNCOMPRESSED_LEN` are clamped to it.
    pub fn max_uncompressed_len(&mut self, max: usize) -> &mut CodecBuilder {
        self.guard = SizeGuard::new(max);
        self
    }

    /// Builds a codec over the raw Snappy format.
    pub fn build(&self) -> Codec<Snappy> {
        self.build_with(Snappy)
    }

    /// Builds a codec over the given block codec.
    pub fn build_with<P: Primitive>(&self, primitive: P) -> Codec<P> {
        Codec { primitive, guard: self.guard }
    }
}
