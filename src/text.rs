use crate::codec::Codec;
use crate::error::Result;
use crate::primitive::Primitive;

/// How text is converted to and from bytes by the string helpers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Encoding {
    /// UTF-8. Invalid sequences in decompressed bytes are replaced with
    /// U+FFFD rather than rejected.
    #[default]
    Utf8,
    /// ISO-8859-1. Each byte is the code point of the same value. When
    /// encoding, characters above U+00FF keep only their low byte.
    Latin1,
}

impl Encoding {
    /// Converts `text` to bytes.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Latin1 => text.chars().map(|c| c as u32 as u8).collect(),
        }
    }

    /// Converts `bytes` to text. This never fails.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

impl<P: Primitive> Codec<P> {
    /// Compresses `text` after converting it to bytes with `encoding`.
    pub fn compress_str(&self, text: &str, encoding: Encoding) -> Result<Vec<u8>> {
        match encoding {
            Encoding::Utf8 => self.compress(text.as_bytes()),
            _ => self.compress(&encoding.encode(text)),
        }
    }

    /// Decompresses `input` and converts the result to text with
    /// `encoding`.
    ///
    /// This fails in exactly the same circumstances as `uncompress`.
    pub fn uncompress_to_string(
        &self,
        input: &[u8],
        encoding: Encoding,
    ) -> Result<String> {
        let bytes = self.uncompress(input)?;
        match encoding {
            Encoding::Utf8 => Ok(String::from_utf8(bytes).unwrap_or_else(|e| {
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            })),
            _ => Ok(encoding.decode(&bytes)),
        }
    }

    /// An alias for `uncompress_to_string`.
    pub fn decompress_to_string(
        &self,
        input: &[u8],
        encoding: Encoding,
    ) -> Result<String> {
        self.uncompress_to_string(input, encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_roundtrip() {
        let codec = Codec::new();
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(10);
        let compressed = codec.compress_str(&text, Encoding::Utf8).unwrap();
        assert!(compressed.len() < text.len());
        let got = codec.uncompress_to_string(&compressed, Encoding::Utf8).unwrap();
        assert_eq!(got, text);
    }

    #[test]
    fn utf8_is_lossy() {
        let codec = Codec::new();
        let compressed = codec.compress(&[b'a', 0xFF, b'b']).unwrap();
        let got = codec.decompress_to_string(&compressed, Encoding::Utf8).unwrap();
        assert_eq!(got, "a\u{FFFD}b");
    }

    #[test]
    fn latin1() {
        assert_eq!(Encoding::Latin1.encode("caf\u{e9}"), b"caf\xe9".to_vec());
        assert_eq!(Encoding::Latin1.decode(b"caf\xe9"), "caf\u{e9}");
        // Only the low byte survives.
        assert_eq!(Encoding::Latin1.encode("\u{263A}"), vec![0x3A]);

        let codec = Codec::new();
        let compressed = codec.compress_str("ol\u{e1}", Encoding::Latin1).unwrap();
        assert_eq!(codec.uncompress(&compressed).unwrap(), b"ol\xe1".to_vec());
        let got =
            codec.uncompress_to_string(&compressed, Encoding::Latin1).unwrap();
        assert_eq!(got, "ol\u{e1}");
    }

    #[test]
    fn errors_pass_through() {
        let codec = Codec::new();
        assert_eq!(
            codec.uncompress_to_string(&[], Encoding::Utf8),
            Err(crate::Error::Format)
        );
    }
}
