use byteorder::{ByteOrder, LittleEndian as LE};

use crate::primitive::Status;
use crate::tag::{TAG_COPY1, TAG_COPY2, TAG_LITERAL};
use crate::varint::write_varu32;
use crate::{MAX_BLOCK_SIZE, MAX_INPUT_SIZE};

/// The largest hash table used when searching a block for matches.
const MAX_TABLE_SIZE: usize = 1 << 14;

/// The number of bytes at the end of a block that are never searched for a
/// match. This keeps every 4 and 8 byte load in `compress_block` in bounds.
const INPUT_MARGIN: usize = 16 - 1;

/// Blocks smaller than this are emitted as a single literal.
const MIN_NON_LITERAL_BLOCK_SIZE: usize = 1 + 1 + INPUT_MARGIN;

/// Returns the maximum number of bytes that `compress` can write for an input
/// of `input_len` bytes.
///
/// This saturates at `usize::MAX` rather than overflowing.
pub fn max_compressed_len(input_len: usize) -> usize {
    32usize.saturating_add(input_len).saturating_add(input_len / 6)
}

/// Compresses all of `input` into `output` and returns the number of bytes
/// written.
///
/// The status is `InvalidInput` if `input` is larger than what the header
/// can describe (`2^32 - 1` bytes), and `BufferTooSmall` if `output` is
/// shorter than `max_compressed_len(input.len())`.
pub fn compress(input: &[u8], output: &mut [u8]) -> (usize, Status) {
    if input.len() as u64 > MAX_INPUT_SIZE {
        return (0, Status::InvalidInput);
    }
    if output.len() < max_compressed_len(input.len()) {
        return (0, Status::BufferTooSmall);
    }
    let mut table = [0u16; MAX_TABLE_SIZE];
    let mut opos = write_varu32(output, input.len() as u32);
    for block in input.chunks(MAX_BLOCK_SIZE) {
        opos += if block.len() < MIN_NON_LITERAL_BLOCK_SIZE {
            emit_literal(block, &mut output[opos..])
        } else {
            compress_block(block, &mut table, &mut output[opos..])
        };
    }
    (opos, Status::Ok)
}

/// Compresses a single block of at least `MIN_NON_LITERAL_BLOCK_SIZE` and at
/// most `MAX_BLOCK_SIZE` bytes.
///
/// Every position stored in the hash table fits in a `u16` because blocks
/// are never bigger than 64 KiB, which also keeps every offset within what a
/// copy-2 element can encode.
fn compress_block(block: &[u8], table: &mut [u16], output: &mut [u8]) -> usize {
    debug_assert!(block.len() >= MIN_NON_LITERAL_BLOCK_SIZE);
    debug_assert!(block.len() <= MAX_BLOCK_SIZE);

    let mut table_size = 256;
    let mut shift = 32 - 8;
    while table_size < MAX_TABLE_SIZE && table_size < block.len() {
        table_size *= 2;
        shift -= 1;
    }
    let table = &mut table[..table_size];
    for slot in table.iter_mut() {
        *slot = 0;
    }
    let hash = |x: u32| (x.wrapping_mul(0x1E35_A7BD) >> shift) as usize;

    let s_limit = block.len() - INPUT_MARGIN;
    let mut opos = 0;
    let mut next_emit = 0;
    let mut s = 1;
    let mut next_hash = hash(LE::read_u32(&block[s..]));
    loop {
        // Look for a 4 byte match, skipping ahead faster the longer we go
        // without finding one.
        let mut skip = 32;
        let mut next_s = s;
        let mut candidate;
        loop {
            s = next_s;
            let step = skip >> 5;
            next_s = s + step;
            skip += step;
            if next_s > s_limit {
                opos += emit_literal(&block[next_emit..], &mut output[opos..]);
                return opos;
            }
            candidate = table[next_hash] as usize;
            table[next_hash] = s as u16;
            next_hash = hash(LE::read_u32(&block[next_s..]));
            if LE::read_u32(&block[s..]) == LE::read_u32(&block[candidate..]) {
                break;
            }
        }

        opos += emit_literal(&block[next_emit..s], &mut output[opos..]);
        // Keep emitting copies for as long as the byte right after the last
        // copy starts another match.
        loop {
            let base = s;
            let mut matched = 4;
            while s + matched < block.len()
                && block[candidate + matched] == block[s + matched]
            {
                matched += 1;
            }
            s += matched;
            opos += emit_copy(base - candidate, matched, &mut output[opos..]);
            next_emit = s;
            if s >= s_limit {
                if next_emit < block.len() {
                    opos += emit_literal(
                        &block[next_emit..],
                        &mut output[opos..],
                    );
                }
                return opos;
            }

            let x = LE::read_u64(&block[s - 1..]);
            table[hash(x as u32)] = (s - 1) as u16;
            let cur_hash = hash((x >> 8) as u32);
            candidate = table[cur_hash] as usize;
            table[cur_hash] = s as u16;
            if (x >> 8) as u32 != LE::read_u32(&block[candidate..]) {
                next_hash = hash((x >> 16) as u32);
                s += 1;
                break;
            }
        }
    }
}

/// Writes `literal` as a single literal element and returns the number of
/// bytes written.
///
/// `literal` must be non-empty.
fn emit_literal(literal: &[u8], output: &mut [u8]) -> usize {
    let n = literal.len() - 1;
    let start = if n < 60 {
        output[0] = ((n as u8) << 2) | TAG_LITERAL;
        1
    } else {
        // Lengths that don't fit in the tag byte follow it as 1-4 little
        // endian bytes. Tag values 60..=63 say how many.
        let nbytes = match n {
            0..=0xFF => 1,
            0x100..=0xFFFF => 2,
            0x1_0000..=0xFF_FFFF => 3,
            _ => 4,
        };
        output[0] = ((59 + nbytes as u8) << 2) | TAG_LITERAL;
        LE::write_uint(&mut output[1..], n as u64, nbytes);
        1 + nbytes
    };
    output[start..start + literal.len()].copy_from_slice(literal);
    start + literal.len()
}

/// Writes a copy of `len` bytes from `offset` bytes back, splitting it into
/// as many elements as needed. Returns the number of bytes written.
///
/// `offset` must be in `1..=65535` and `len` must be at least 4.
fn emit_copy(offset: usize, mut len: usize, output: &mut [u8]) -> usize {
    debug_assert!(offset >= 1 && offset <= 0xFFFF);
    debug_assert!(len >= 4);

    let mut i = 0;
    // Peel off 64 byte copies, but never leave fewer than 4 bytes behind
    // since that would make the remainder unencodable as a copy-1.
    while len >= 68 {
        i += emit_copy2(offset, 64, &mut output[i..]);
        len -= 64;
    }
    if len > 64 {
        i += emit_copy2(offset, 60, &mut output[i..]);
        len -= 60;
    }
    if len <= 11 && offset <= 2047 {
        output[i] = (((offset >> 8) as u8) << 5)
            | (((len - 4) as u8) << 2)
            | TAG_COPY1;
        output[i + 1] = offset as u8;
        i + 2
    } else {
        i + emit_copy2(offset, len, &mut output[i..])
    }
}

fn emit_copy2(offset: usize, len: usize, output: &mut [u8]) -> usize {
    output[0] = (((len - 1) as u8) << 2) | TAG_COPY2;
    LE::write_u16(&mut output[1..], offset as u16);
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &[u8]) -> Vec<u8> {
        let mut buf = vec![0; max_compressed_len(input.len())];
        let (n, status) = compress(input, &mut buf);
        assert_eq!(status, Status::Ok);
        buf.truncate(n);
        buf
    }

    #[test]
    fn empty_is_a_lone_header() {
        assert_eq!(press(b""), vec![0]);
    }

    #[test]
    fn short_input_is_one_literal() {
        let got = press(b"aaaaaaaaaa");
        let mut expected = vec![10, 9 << 2];
        expected.extend_from_slice(b"aaaaaaaaaa");
        assert_eq!(got, expected);
    }

    #[test]
    fn long_literal_lengths() {
        let mut out = vec![0; 300];
        let literal = vec![7u8; 61];
        assert_eq!(emit_literal(&literal, &mut out), 2 + 61);
        assert_eq!(&out[..2], &[60 << 2, 60]);

        let literal = vec![7u8; 257];
        assert_eq!(emit_literal(&literal, &mut out), 3 + 257);
        assert_eq!(&out[..3], &[61 << 2, 0x00, 0x01]);
    }

    #[test]
    fn copies_are_split() {
        let mut out = [0; 16];
        // 4 bytes, near offset: one copy-1.
        assert_eq!(emit_copy(1, 4, &mut out), 2);
        assert_eq!(&out[..2], &[TAG_COPY1, 1]);
        // Far offset forces copy-2.
        assert_eq!(emit_copy(4096, 4, &mut out), 3);
        assert_eq!(&out[..3], &[(3 << 2) | TAG_COPY2, 0x00, 0x10]);
        // 67 bytes: a 60 byte copy-2 followed by a 7 byte copy-1.
        assert_eq!(emit_copy(1, 67, &mut out), 5);
        assert_eq!(&out[..3], &[(59 << 2) | TAG_COPY2, 1, 0]);
        assert_eq!(&out[3..5], &[(3 << 2) | TAG_COPY1, 1]);
    }

    #[test]
    fn runs_shrink() {
        let input = vec![b'a'; 1 << 20];
        let got = press(&input);
        assert!(got.len() < input.len() / 10, "got {} bytes", got.len());
    }

    #[test]
    fn small_output_is_rejected() {
        let mut buf = vec![0; max_compressed_len(100) - 1];
        assert_eq!(compress(&[0; 100], &mut buf), (0, Status::BufferTooSmall));
    }

    #[test]
    fn max_len_saturates() {
        assert_eq!(max_compressed_len(0), 32);
        assert_eq!(max_compressed_len(60), 32 + 60 + 10);
        assert_eq!(max_compressed_len(usize::MAX), usize::MAX);
    }
}
