use byteorder::{ByteOrder, LittleEndian as LE};

use crate::primitive::Status;
use crate::tag::{self, Kind};
use crate::varint::read_varu32;

/// Returns the decompressed size (in bytes) declared by the header of
/// `input`.
///
/// Only the header is read. An empty input, a truncated header or a header
/// that does not fit in 32 bits reports `InvalidInput`.
pub fn decompress_len(input: &[u8]) -> (usize, Status) {
    match Header::read(input) {
        Some(hdr) => (hdr.decompress_len, Status::Ok),
        None => (0, Status::InvalidInput),
    }
}

/// Decompresses all of `input` into `output`.
///
/// `output` must be at least as big as the length declared by the header.
/// Only that many leading bytes of `output` are written. When the status is
/// not `Ok`, those bytes are unspecified.
pub fn decompress(input: &[u8], output: &mut [u8]) -> Status {
    let hdr = match Header::read(input) {
        Some(hdr) => hdr,
        None => return Status::InvalidInput,
    };
    if output.len() < hdr.decompress_len {
        return Status::BufferTooSmall;
    }
    let mut sink = Writer { dst: &mut output[..hdr.decompress_len], pos: 0 };
    walk(&input[hdr.len..], &mut sink)
}

/// Checks that `input` would decompress successfully, without writing any
/// decompressed bytes anywhere.
pub fn validate(input: &[u8]) -> Status {
    let hdr = match Header::read(input) {
        Some(hdr) => hdr,
        None => return Status::InvalidInput,
    };
    let mut sink = Counter { len: hdr.decompress_len, pos: 0 };
    walk(&input[hdr.len..], &mut sink)
}

/// Header represents the single varint that starts every compressed frame.
#[derive(Debug)]
struct Header {
    /// The length of the header in bytes (i.e., the varint).
    len: usize,
    /// The length of the original decompressed input in bytes.
    decompress_len: usize,
}

impl Header {
    fn read(input: &[u8]) -> Option<Header> {
        let (decompress_len, len) = read_varu32(input);
        if len == 0 {
            return None;
        }
        Some(Header { len, decompress_len: decompress_len as usize })
    }
}

/// Where the decoded elements of a frame go.
///
/// Both methods return false when the element cannot be applied, which makes
/// the whole frame invalid.
trait Sink {
    fn literal(&mut self, lit: &[u8]) -> bool;
    fn copy(&mut self, offset: usize, len: usize) -> bool;
    /// Whether exactly the declared number of bytes has been produced.
    fn is_complete(&self) -> bool;
}

/// Writes decoded bytes to a buffer of exactly the declared length.
struct Writer<'a> {
    dst: &'a mut [u8],
    pos: usize,
}

impl<'a> Sink for Writer<'a> {
    fn literal(&mut self, lit: &[u8]) -> bool {
        if self.dst.len() - self.pos < lit.len() {
            return false;
        }
        self.dst[self.pos..self.pos + lit.len()].copy_from_slice(lit);
        self.pos += lit.len();
        true
    }

    fn copy(&mut self, offset: usize, len: usize) -> bool {
        if offset == 0 || offset > self.pos {
            return false;
        }
        if self.dst.len() - self.pos < len {
            return false;
        }
        let start = self.pos - offset;
        if offset >= len {
            self.dst.copy_within(start..start + len, self.pos);
        } else {
            // The source overlaps the bytes being written, which repeats the
            // last `offset` bytes. That must go one byte at a time.
            for i in 0..len {
                self.dst[self.pos + i] = self.dst[start + i];
            }
        }
        self.pos += len;
        true
    }

    fn is_complete(&self) -> bool {
        self.pos == self.dst.len()
    }
}

/// Applies the same checks as `Writer` while only tracking the position.
struct Counter {
    len: usize,
    pos: usize,
}

impl Sink for Counter {
    fn literal(&mut self, lit: &[u8]) -> bool {
        if self.len - self.pos < lit.len() {
            return false;
        }
        self.pos += lit.len();
        true
    }

    fn copy(&mut self, offset: usize, len: usize) -> bool {
        if offset == 0 || offset > self.pos {
            return false;
        }
        if self.len - self.pos < len {
            return false;
        }
        self.pos += len;
        true
    }

    fn is_complete(&self) -> bool {
        self.pos == self.len
    }
}

/// Decodes every element in `src` (the frame minus its header) into `sink`.
fn walk<S: Sink>(src: &[u8], sink: &mut S) -> Status {
    let mut s = 0;
    while s < src.len() {
        let tag = tag::lookup(src[s]);
        s += 1;
        if src.len() - s < tag.extra {
            return Status::InvalidInput;
        }
        match tag.kind {
            Kind::Literal => {
                let len = if tag.extra == 0 {
                    tag.len as u64
                } else {
                    LE::read_uint(&src[s..], tag.extra) + 1
                };
                s += tag.extra;
                if ((src.len() - s) as u64) < len {
                    return Status::InvalidInput;
                }
                let len = len as usize;
                if !sink.literal(&src[s..s + len]) {
                    return Status::InvalidInput;
                }
                s += len;
            }
            Kind::Copy => {
                let offset = tag.offset_hi
                    | LE::read_uint(&src[s..], tag.extra) as usize;
                s += tag.extra;
                if !sink.copy(offset, tag.len) {
                    return Status::InvalidInput;
                }
            }
        }
    }
    if sink.is_complete() {
        Status::Ok
    } else {
        Status::InvalidInput
    }
}
