/*!
The seam between the safe boundary and the block codec underneath it.

Every codec routine reports its outcome as a small [`Status`] rather than a
rich error. The [`Codec`](../struct.Codec.html) facade is the only place
where a status is inspected, and it always translates a non-OK status into
an [`Error`](../enum.Error.html) before anything reaches the caller.
*/

/// The outcome of a single primitive call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[must_use]
pub enum Status {
    /// The call succeeded.
    Ok,
    /// The input is not something the codec can process. For decoding
    /// routines, this means the input is not a well-formed compressed frame.
    InvalidInput,
    /// The output buffer given to the codec is smaller than what the call
    /// requires.
    BufferTooSmall,
}

impl Status {
    /// Returns true if and only if this status is `Status::Ok`.
    #[inline]
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

/// The routines a block codec must provide for [`Codec`] to wrap it.
///
/// Implementations must never panic on any input and must never write past
/// the end of the output slices they are given. Beyond that, they are trusted
/// to be correct: the facade does not second-guess a `Status::Ok`.
///
/// [`Codec`]: ../struct.Codec.html
pub trait Primitive {
    /// Returns an upper bound on the number of bytes `compress` may write for
    /// an input of `input_len` bytes.
    fn max_compressed_length(&self, input_len: usize) -> usize;

    /// Compresses `input` into `output`, returning the number of bytes
    /// written.
    ///
    /// `output` has at least `max_compressed_length(input.len())` bytes.
    fn compress(&self, input: &[u8], output: &mut [u8]) -> (usize, Status);

    /// Reads the uncompressed length declared by the header of `input`
    /// without decoding any of the payload.
    fn uncompressed_length(&self, input: &[u8]) -> (usize, Status);

    /// Decompresses `input` into `output`, which has exactly the length
    /// reported by `uncompressed_length`.
    fn uncompress(&self, input: &[u8], output: &mut [u8]) -> Status;

    /// Checks that `input` is a well-formed compressed frame without
    /// producing any output.
    fn validate(&self, input: &[u8]) -> Status;
}

impl<'a, P: Primitive + ?Sized> Primitive for &'a P {
    fn max_compressed_length(&self, input_len: usize) -> usize {
        (**self).max_compressed_length(input_len)
    }

    fn compress(&self, input: &[u8], output: &mut [u8]) -> (usize, Status) {
        (**self).compress(input, output)
    }

    fn uncompressed_length(&self, input: &[u8]) -> (usize, Status) {
        (**self).uncompressed_length(input)
    }

    fn uncompress(&self, input: &[u8], output: &mut [u8]) -> Status {
        (**self).uncompress(input, output)
    }

    fn validate(&self, input: &[u8]) -> Status {
        (**self).validate(input)
    }
}
