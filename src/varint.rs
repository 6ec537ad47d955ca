/// The most bytes a 32 bit varint can occupy.
pub const MAX_VARINT_LEN: usize = 5;

/// Writes `n` as a little endian base 128 varint to the start of `dst` and
/// returns the number of bytes written.
///
/// `dst` must have room for at least `MAX_VARINT_LEN` bytes.
pub fn write_varu32(dst: &mut [u8], mut n: u32) -> usize {
    let mut i = 0;
    while n >= 0b1000_0000 {
        dst[i] = (n as u8) | 0b1000_0000;
        n >>= 7;
        i += 1;
    }
    dst[i] = n as u8;
    i + 1
}

/// Reads a 32 bit varint from the start of `src`.
///
/// Returns the decoded value and the number of bytes it occupied. If `src`
/// does not begin with a complete varint, or if the varint does not fit in
/// 32 bits, then the number of bytes returned is `0`.
pub fn read_varu32(src: &[u8]) -> (u32, usize) {
    let mut n: u64 = 0;
    for (i, &b) in src.iter().take(MAX_VARINT_LEN).enumerate() {
        n |= ((b & 0b0111_1111) as u64) << (7 * i);
        if b < 0b1000_0000 {
            if n > u32::MAX as u64 {
                return (0, 0);
            }
            return (n as u32, i + 1);
        }
    }
    (0, 0)
}
