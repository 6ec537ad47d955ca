use lazy_static::lazy_static;

/// The two low bits of every element's first byte.
pub const TAG_LITERAL: u8 = 0b00;
pub const TAG_COPY1: u8 = 0b01;
pub const TAG_COPY2: u8 = 0b10;
pub const TAG_COPY4: u8 = 0b11;

lazy_static! {
    /// Maps every possible tag byte to its decoded form, so that the decoder
    /// never has to pick the byte apart itself.
    static ref TABLE: [Tag; 256] = {
        let mut table = [Tag::literal(0, 0); 256];
        for (byte, entry) in table.iter_mut().enumerate() {
            *entry = Tag::from_byte(byte as u8);
        }
        table
    };
}

/// Looks up the decoded form of the tag byte `byte`.
#[inline]
pub fn lookup(byte: u8) -> Tag {
    TABLE[byte as usize]
}

/// What kind of element a tag byte begins.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    Literal,
    Copy,
}

/// A decoded tag byte.
///
/// For literals, `len` is the literal length when it fits in the tag byte
/// (`extra == 0`). Otherwise `extra` is the number of little endian bytes
/// following the tag that hold the literal length minus one.
///
/// For copies, `len` is always the copy length, `extra` is the number of
/// little endian offset bytes following the tag and `offset_hi` holds the
/// offset bits carried in the tag byte itself (copy-1 only).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tag {
    pub kind: Kind,
    pub len: usize,
    pub extra: usize,
    pub offset_hi: usize,
}

impl Tag {
    const fn literal(len: usize, extra: usize) -> Tag {
        Tag { kind: Kind::Literal, len, extra, offset_hi: 0 }
    }

    const fn copy(len: usize, extra: usize, offset_hi: usize) -> Tag {
        Tag { kind: Kind::Copy, len, extra, offset_hi }
    }

    fn from_byte(byte: u8) -> Tag {
        let upper = (byte >> 2) as usize;
        match byte & 0b11 {
            TAG_LITERAL if upper < 60 => Tag::literal(upper + 1, 0),
            TAG_LITERAL => Tag::literal(0, upper - 59),
            TAG_COPY1 => Tag::copy(4 + (upper & 0b111), 1, (upper >> 3) << 8),
            TAG_COPY2 => Tag::copy(upper + 1, 2, 0),
            tag => {
                debug_assert_eq!(tag, TAG_COPY4);
                Tag::copy(upper + 1, 4, 0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals() {
        assert_eq!(lookup(0b000000_00), Tag::literal(1, 0));
        assert_eq!(lookup(59 << 2), Tag::literal(60, 0));
        assert_eq!(lookup(60 << 2), Tag::literal(0, 1));
        assert_eq!(lookup(63 << 2), Tag::literal(0, 4));
    }

    #[test]
    fn copies() {
        assert_eq!(lookup(0b000_000_01), Tag::copy(4, 1, 0));
        assert_eq!(lookup(0b111_111_01), Tag::copy(11, 1, 0b111 << 8));
        assert_eq!(lookup(0b000000_10), Tag::copy(1, 2, 0));
        assert_eq!(lookup(0b111111_10), Tag::copy(64, 2, 0));
        assert_eq!(lookup(0b111111_11), Tag::copy(64, 4, 0));
    }
}
