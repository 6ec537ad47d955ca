use safesnap::host::{self, Binding, Value};
use safesnap::{Codec, Error, ErrorKind, Status};

type Op = fn(&[Value]) -> safesnap::Result<Value>;

const OPS: &[(&str, Op)] = &[
    ("compress", host::compress),
    ("uncompress", host::uncompress),
    ("uncompressedLength", host::uncompressed_length),
    ("isValidCompressed", host::is_valid_compressed),
];

fn buf(bytes: &[u8]) -> Value {
    Value::from(bytes)
}

#[test]
fn no_arguments() {
    for &(name, op) in OPS {
        let err = op(&[]).unwrap_err();
        assert_eq!(err, Error::Arity { given: 0 }, "{}", name);
        assert_eq!(err.kind(), ErrorKind::TypeError, "{}", name);
    }
}

#[test]
fn too_many_arguments() {
    for &(name, op) in OPS {
        let err = op(&[buf(b"a"), buf(b"b")]).unwrap_err();
        assert_eq!(err, Error::Arity { given: 2 }, "{}", name);
    }
}

#[test]
fn not_a_buffer() {
    for &(name, op) in OPS {
        let err = op(&[Value::from("not a buffer")]).unwrap_err();
        assert_eq!(err, Error::Type { got: "string" }, "{}", name);
        assert_eq!(err.kind(), ErrorKind::TypeError, "{}", name);

        let err = op(&[Value::Number(3.0)]).unwrap_err();
        assert_eq!(err, Error::Type { got: "number" }, "{}", name);
    }
}

#[test]
fn roundtrip() {
    let original = b"Hello, World! This is a test of the Snappy compression library.";
    let compressed = host::compress(&[buf(original)]).unwrap();
    assert_eq!(
        host::is_valid_compressed(&[compressed.clone()]),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        host::uncompressed_length(&[compressed.clone()]),
        Ok(Value::Number(original.len() as f64))
    );
    let decompressed = host::uncompress(&[compressed]).unwrap();
    assert_eq!(decompressed.into_buffer().unwrap(), &original[..]);
}

#[test]
fn large_run() {
    let large = vec![b'a'; 1024 * 1024];
    let compressed = host::compress(&[Value::from(large.clone())]).unwrap();
    assert!(compressed.as_buffer().unwrap().len() < large.len() / 10);
    let decompressed = host::uncompress(&[compressed]).unwrap();
    assert_eq!(decompressed, Value::Buffer(large));
}

#[test]
fn empty_buffer() {
    let compressed = host::compress(&[buf(b"")]).unwrap();
    assert_eq!(
        host::uncompressed_length(&[compressed.clone()]),
        Ok(Value::Number(0.0))
    );
    assert_eq!(host::uncompress(&[compressed]), Ok(Value::Buffer(vec![])));
}

#[test]
fn invalid_data() {
    let junk = buf(b"This is not compressed data");
    assert_eq!(
        host::is_valid_compressed(&[junk.clone()]),
        Ok(Value::Bool(false))
    );
    let err = host::uncompress(&[junk]).unwrap_err();
    assert_eq!(err, Error::Decompression { status: Status::InvalidInput });
    assert_eq!(err.kind(), ErrorKind::Error);
}

#[test]
fn unreadable_header() {
    let junk = buf(&[0xFF; 8]);
    assert_eq!(host::uncompress(&[junk.clone()]), Err(Error::Format));
    assert_eq!(host::uncompressed_length(&[junk.clone()]), Err(Error::Format));
    assert_eq!(host::is_valid_compressed(&[junk]), Ok(Value::Bool(false)));
}

#[test]
fn declared_length_over_cap() {
    // A five byte header declaring 2 GiB and nothing else.
    let bomb = buf(&[0x80, 0x80, 0x80, 0x80, 0x08]);
    assert_eq!(
        host::uncompressed_length(&[bomb.clone()]),
        Ok(Value::Number(2_147_483_648.0))
    );
    let err = host::uncompress(&[bomb.clone()]).unwrap_err();
    assert_eq!(err, Error::Range { given: 1 << 31, max: 1 << 30 });
    assert_eq!(err.kind(), ErrorKind::RangeError);
    assert_eq!(host::is_valid_compressed(&[bomb]), Ok(Value::Bool(false)));
}

#[test]
fn configured_binding() {
    let binding = Binding::new(Codec::builder().max_uncompressed_len(16).build());
    assert_eq!(binding.codec().max_uncompressed_len(), 16);
    let compressed = binding.compress(&[buf(&[0; 17])]).unwrap();
    assert_eq!(
        binding.uncompress(&[compressed]),
        Err(Error::Range { given: 17, max: 16 })
    );
}

#[test]
fn string_helpers() {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(10);
    let compressed =
        safesnap::compress_str(&text, safesnap::Encoding::Utf8).unwrap();
    assert!(compressed.len() < text.len());
    let got = safesnap::uncompress_to_string(
        &compressed,
        safesnap::Encoding::default(),
    )
    .unwrap();
    assert_eq!(got, text);
    let got = safesnap::decompress_to_string(
        &compressed,
        safesnap::Encoding::Utf8,
    )
    .unwrap();
    assert_eq!(got, text);
}

#[test]
fn io_error_conversion() {
    let err: std::io::Error = safesnap::uncompress(&[]).unwrap_err().into();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
