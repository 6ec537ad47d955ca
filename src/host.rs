/*!
Entry points shaped the way a dynamically typed host runtime calls them.

A host (a JavaScript engine, a scripting language) hands a native function
an argument list whose length and types are only known at run time. The
functions in this module take such a list as a slice of [`Value`]s, check
its shape before any codec work happens, and return a `Value`:

```
use safesnap::host::{self, Value};

let compressed = host::compress(&[Value::from(&b"hello"[..])])?;
let length = host::uncompressed_length(&[compressed.clone()])?;
assert_eq!(length, Value::Number(5.0));

let err = host::uncompress(&[Value::from("hello")]).unwrap_err();
assert_eq!(err.kind(), safesnap::ErrorKind::TypeError);
# Ok::<(), safesnap::Error>(())
```

The free functions use `Codec::new()`. A [`Binding`] carries any other
codec configuration.
*/

use log::debug;

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::primitive::Primitive;
use crate::raw::Snappy;

/// A value passed across the host boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Buffer(Vec<u8>),
}

impl Value {
    /// The host's name for this value's type, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match *self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Buffer(_) => "buffer",
        }
    }

    /// Returns the bytes of this value if it is a buffer.
    pub fn as_buffer(&self) -> Option<&[u8]> {
        match *self {
            Value::Buffer(ref bytes) => Some(&bytes[..]),
            _ => None,
        }
    }

    /// Converts this value into its bytes if it is a buffer.
    pub fn into_buffer(self) -> Option<Vec<u8>> {
        match self {
            Value::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Value {
        Value::Buffer(bytes)
    }
}

impl<'a> From<&'a [u8]> for Value {
    fn from(bytes: &'a [u8]) -> Value {
        Value::Buffer(bytes.to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(s: &'a str) -> Value {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Number(n)
    }
}

/// Checks that `args` is exactly one buffer and returns its bytes.
///
/// This is pure: it neither allocates nor touches the codec.
pub fn buffer_arg(args: &[Value]) -> Result<&[u8]> {
    if args.len() != 1 {
        debug!("rejecting call with {} arguments", args.len());
        return Err(Error::Arity { given: args.len() });
    }
    match args[0].as_buffer() {
        Some(bytes) => Ok(bytes),
        None => {
            let got = args[0].type_name();
            debug!("rejecting {} argument", got);
            Err(Error::Type { got })
        }
    }
}

/// A codec exposed through host-shaped entry points.
#[derive(Clone, Copy, Debug, Default)]
pub struct Binding<P = Snappy> {
    codec: Codec<P>,
}

impl<P: Primitive> Binding<P> {
    /// Exposes `codec` through host-shaped entry points.
    pub fn new(codec: Codec<P>) -> Binding<P> {
        Binding { codec }
    }

    /// The codec behind this binding.
    pub fn codec(&self) -> &Codec<P> {
        &self.codec
    }

    /// `compress(buffer) -> buffer`
    pub fn compress(&self, args: &[Value]) -> Result<Value> {
        let input = buffer_arg(args)?;
        self.codec.compress(input).map(Value::Buffer)
    }

    /// `uncompress(buffer) -> buffer`
    pub fn uncompress(&self, args: &[Value]) -> Result<Value> {
        let input = buffer_arg(args)?;
        self.codec.uncompress(input).map(Value::Buffer)
    }

    /// `uncompressedLength(buffer) -> number`
    ///
    /// Every length a header can declare fits in 32 bits, so the number is
    /// always exact.
    pub fn uncompressed_length(&self, args: &[Value]) -> Result<Value> {
        let input = buffer_arg(args)?;
        self.codec
            .uncompressed_length(input)
            .map(|len| Value::Number(len as f64))
    }

    /// `isValidCompressed(buffer) -> boolean`
    ///
    /// Only fails when the call itself is malformed.
    pub fn is_valid_compressed(&self, args: &[Value]) -> Result<Value> {
        let input = buffer_arg(args)?;
        Ok(Value::Bool(self.codec.is_valid_compressed(input)))
    }
}

/// `compress(buffer) -> buffer` using the default codec.
pub fn compress(args: &[Value]) -> Result<Value> {
    Binding::<Snappy>::default().compress(args)
}

/// `uncompress(buffer) -> buffer` using the default codec.
pub fn uncompress(args: &[Value]) -> Result<Value> {
    Binding::<Snappy>::default().uncompress(args)
}

/// `uncompressedLength(buffer) -> number` using the default codec.
pub fn uncompressed_length(args: &[Value]) -> Result<Value> {
    Binding::<Snappy>::default().uncompressed_length(args)
}

/// `isValidCompressed(buffer) -> boolean` using the default codec.
pub fn is_valid_compressed(args: &[Value]) -> Result<Value> {
    Binding::<Snappy>::default().is_valid_compressed(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_buffer() {
        let args = [Value::Buffer(vec![1, 2, 3])];
        assert_eq!(buffer_arg(&args), Ok(&[1u8, 2, 3][..]));
    }

    #[test]
    fn arity() {
        assert_eq!(buffer_arg(&[]), Err(Error::Arity { given: 0 }));
        let args = [Value::Buffer(vec![]), Value::Buffer(vec![])];
        assert_eq!(buffer_arg(&args), Err(Error::Arity { given: 2 }));
    }

    #[test]
    fn types() {
        let cases = vec![
            (Value::Undefined, "undefined"),
            (Value::Null, "null"),
            (Value::Bool(true), "boolean"),
            (Value::Number(1.0), "number"),
            (Value::from("not a buffer"), "string"),
        ];
        for (value, name) in cases {
            assert_eq!(buffer_arg(&[value]), Err(Error::Type { got: name }));
        }
    }
}
