// Walks through the public API on a handful of inputs, printing sizes and
// ratios. Run with `RUST_LOG=debug` to see why rejected inputs were
// rejected.

use std::error::Error;

use safesnap::{Codec, Encoding};

fn main() {
    env_logger::init();
    if let Err(err) = try_main() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let codec = Codec::new();

    println!("1. text");
    let text = "Hello! This is an example of compression with Snappy.";
    let compressed = codec.compress_str(text, Encoding::Utf8)?;
    let restored = codec.uncompress_to_string(&compressed, Encoding::Utf8)?;
    report(text.len(), compressed.len());
    assert_eq!(restored, text);

    println!("2. structured text");
    let json = r#"{"user":"Jane Doe","age":30,"interests":["music","sports"],"settings":{"theme":"dark","notifications":true}}"#;
    let compressed = codec.compress_str(json, Encoding::Utf8)?;
    report(json.len(), compressed.len());
    assert_eq!(codec.uncompress_to_string(&compressed, Encoding::Utf8)?, json);

    println!("3. binary");
    let binary: Vec<u8> = (0..1000u32).map(|i| (i % 256) as u8).collect();
    let compressed = codec.compress(&binary)?;
    report(binary.len(), compressed.len());
    assert_eq!(codec.uncompress(&compressed)?, binary);

    println!("4. repetitive text");
    let repeated = "Lorem ipsum dolor sit amet. ".repeat(100);
    let compressed = codec.compress(repeated.as_bytes())?;
    report(repeated.len(), compressed.len());

    println!("5. validation");
    let valid = codec.compress(b"test")?;
    let invalid = b"this is not snappy compressed data";
    println!("  compressed data valid: {}", codec.is_valid_compressed(&valid));
    println!("  plain text valid:      {}", codec.is_valid_compressed(invalid));
    println!(
        "  declared length (without decompressing): {}",
        codec.uncompressed_length(&valid)?
    );
    if let Err(err) = codec.uncompress(invalid) {
        println!("  uncompressing plain text: {}", err);
    }

    println!("6. hostile header");
    let bomb = [0xFF, 0xFF, 0xFF, 0xFF, 0x0F];
    println!("  declares {} bytes", codec.uncompressed_length(&bomb)?);
    if let Err(err) = codec.uncompress(&bomb) {
        println!("  uncompressing: {}", err);
    }
    Ok(())
}

fn report(original: usize, compressed: usize) {
    println!("  original:   {} bytes", original);
    println!("  compressed: {} bytes", compressed);
    println!("  ratio:      {:.2}x", original as f64 / compressed as f64);
}
