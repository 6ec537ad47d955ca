use std::io;
use std::result;

use thiserror::Error;

use crate::primitive::Status;

/// A convenient type alias for `Result<T, safesnap::Error>`.
pub type Result<T> = result::Result<T, Error>;

/// Error describes every way a call through the boundary can fail.
///
/// Errors are reported at the earliest point they can be detected: call
/// shape before the header is read, the header before anything is
/// allocated, and allocation before the codec writes a single byte. No
/// variant is ever accompanied by a partially filled output buffer.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// The call did not receive exactly one argument.
    #[error("wrong number of arguments (given {given}), expected a buffer")]
    Arity {
        /// The number of arguments the call received.
        given: usize,
    },
    /// The argument given is not a binary buffer.
    #[error("argument must be a buffer, got {got}")]
    Type {
        /// The name of the type that was given instead.
        got: &'static str,
    },
    /// The input does not begin with a readable compressed frame header.
    ///
    /// This covers empty input, truncated headers and headers declaring
    /// more than `2^32 - 1` bytes.
    #[error("invalid compressed data header")]
    Format,
    /// The header declares an uncompressed length above the permitted
    /// maximum.
    #[error(
        "decompression output too large \
         (size = {given} exceeds limit of {max} bytes)"
    )]
    Range {
        /// The uncompressed length declared by the header.
        given: u64,
        /// The maximum uncompressed length permitted.
        max: u64,
    },
    /// The output buffer could not be allocated.
    #[error("memory allocation failed (size = {size})")]
    Allocation {
        /// The number of bytes that were requested.
        size: u64,
    },
    /// The codec failed to compress the input.
    #[error("compression failed ({status:?})")]
    Compression {
        /// The status reported by the codec.
        status: Status,
    },
    /// The header was valid but the payload following it was not.
    #[error("decompression failed: corrupt payload despite valid header")]
    Decompression {
        /// The status reported by the codec.
        status: Status,
    },
}

/// The class of exception a host runtime would raise for an error.
///
/// Embedders that surface errors as exceptions (for example, a JavaScript
/// binding) can use this to pick the exception constructor.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The call itself was malformed.
    TypeError,
    /// A size limit was exceeded.
    RangeError,
    /// Everything else.
    Error,
}

impl Error {
    /// Returns the host exception class for this error.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::Arity { .. } | Error::Type { .. } => ErrorKind::TypeError,
            Error::Range { .. } => ErrorKind::RangeError,
            Error::Format
            | Error::Allocation { .. }
            | Error::Compression { .. }
            | Error::Decompression { .. } => ErrorKind::Error,
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        let kind = match err {
            Error::Arity { .. } | Error::Type { .. } => {
                io::ErrorKind::InvalidInput
            }
            Error::Format | Error::Decompression { .. } => {
                io::ErrorKind::InvalidData
            }
            Error::Allocation { .. } => io::ErrorKind::OutOfMemory,
            Error::Range { .. } | Error::Compression { .. } => {
                io::ErrorKind::Other
            }
        };
        io::Error::new(kind, err)
    }
}
