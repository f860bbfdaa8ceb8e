//! Message composition on top of the wire encoders.
//!
//! A message is composed field by field into a [`MessageBuilder`]. The
//! builder applies default-value omission: zero numbers, `false`, empty
//! strings, absent options and empty collections are not written at all.
//! Nested messages are composed into their own builder, then written as a
//! single length-delimited field of the parent.
//!
//! ## Extensibility
//!
//! Any record can be made encodable by implementing [`Encode`]:
//!
//! ```
//! use shelfgen_core::message::{Encode, MessageBuilder};
//! use shelfgen_core::Result;
//!
//! struct Tag {
//!     label: String,
//!     weight: i64,
//! }
//!
//! impl Encode for Tag {
//!     const NAME: &'static str = "Tag";
//!
//!     fn encode_fields(&self, msg: &mut MessageBuilder) -> Result<()> {
//!         msg.string(1, &self.label);
//!         msg.uint64(Self::NAME, 2, self.weight)
//!     }
//! }
//!
//! let bytes = Tag { label: "x".into(), weight: 3 }.encode_to_vec()?;
//! assert_eq!(bytes, [0x0A, 0x01, b'x', 0x10, 0x03]);
//! # Ok::<(), shelfgen_core::Error>(())
//! ```

mod records;

use crate::error::{Error, Result};
use crate::wire::{
    encode_field_tag, encode_fixed32_float, encode_length_delimited, encode_varint, WireType,
};

pub use records::{backup, book, category, chapter, history};

/// A record with a fixed field layout on the wire
pub trait Encode {
    /// Message name used in error reports
    const NAME: &'static str;

    /// Write every non-default field, in ascending field-number order
    fn encode_fields(&self, msg: &mut MessageBuilder) -> Result<()>;

    /// Compose the record into a fresh buffer
    fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let mut msg = MessageBuilder::new();
        self.encode_fields(&mut msg)?;
        Ok(msg.finish())
    }
}

/// Growable buffer for one message being composed
#[derive(Debug, Default)]
pub struct MessageBuilder {
    buf: Vec<u8>,
}

impl MessageBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the builder and returns the encoded message
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// Writes a string field unless it is empty
    pub fn string(&mut self, field: u32, value: &str) {
        if !value.is_empty() {
            encode_field_tag(field, WireType::Len, &mut self.buf);
            encode_length_delimited(value.as_bytes(), &mut self.buf);
        }
    }

    /// Writes an optional string field unless it is absent or empty
    pub fn optional_string(&mut self, field: u32, value: Option<&str>) {
        if let Some(value) = value {
            self.string(field, value);
        }
    }

    /// Writes a bool field if it is true
    pub fn bool(&mut self, field: u32, value: bool) {
        if value {
            encode_field_tag(field, WireType::Varint, &mut self.buf);
            encode_varint(1, &mut self.buf);
        }
    }

    /// Writes an unsigned varint field unless it is zero.
    ///
    /// The model keeps integers signed; a negative value here is a caller
    /// bug and is reported instead of being clamped or sign-extended.
    pub fn uint64(&mut self, message: &'static str, field: u32, value: i64) -> Result<()> {
        let value = u64::try_from(value)
            .map_err(|_| Error::field_out_of_range(message, field, value))?;
        if value != 0 {
            encode_field_tag(field, WireType::Varint, &mut self.buf);
            encode_varint(value, &mut self.buf);
        }
        Ok(())
    }

    /// Writes a float field unless it is positive zero
    pub fn float(&mut self, field: u32, value: f32) {
        if value.to_bits() != 0 {
            encode_field_tag(field, WireType::I32, &mut self.buf);
            encode_fixed32_float(value, &mut self.buf);
        }
    }

    /// Composes `value` on its own and writes it as a length-delimited field.
    ///
    /// Nested messages are always written, even when they encode to zero
    /// bytes, so that repeated elements keep their count.
    pub fn message<M: Encode>(&mut self, field: u32, value: &M) -> Result<()> {
        let nested = value.encode_to_vec()?;
        encode_field_tag(field, WireType::Len, &mut self.buf);
        encode_length_delimited(&nested, &mut self.buf);
        Ok(())
    }

    /// Writes one string field per element, in order
    pub fn repeated_strings<S: AsRef<str>>(&mut self, field: u32, values: &[S]) {
        for value in values {
            // Repeated elements keep their position even when empty
            encode_field_tag(field, WireType::Len, &mut self.buf);
            encode_length_delimited(value.as_ref().as_bytes(), &mut self.buf);
        }
    }

    /// Writes one unsigned varint field per element, in order (unpacked)
    pub fn repeated_uint64(
        &mut self,
        message: &'static str,
        field: u32,
        values: &[i64],
    ) -> Result<()> {
        for &value in values {
            let value = u64::try_from(value)
                .map_err(|_| Error::field_out_of_range(message, field, value))?;
            encode_field_tag(field, WireType::Varint, &mut self.buf);
            encode_varint(value, &mut self.buf);
        }
        Ok(())
    }

    /// Writes one nested message field per element, in order
    pub fn repeated_messages<M: Encode>(&mut self, field: u32, values: &[M]) -> Result<()> {
        for value in values {
            self.message(field, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{FieldReader, FieldValue};

    struct Pair {
        left: i64,
        right: String,
    }

    impl Encode for Pair {
        const NAME: &'static str = "Pair";

        fn encode_fields(&self, msg: &mut MessageBuilder) -> Result<()> {
            msg.uint64(Self::NAME, 1, self.left)?;
            msg.string(2, &self.right);
            Ok(())
        }
    }

    #[test]
    fn test_defaults_are_omitted() {
        let mut msg = MessageBuilder::new();
        msg.string(1, "");
        msg.optional_string(2, None);
        msg.bool(3, false);
        msg.uint64("Test", 4, 0).unwrap();
        msg.float(5, 0.0);
        msg.repeated_strings::<&str>(6, &[]);
        msg.repeated_uint64("Test", 7, &[]).unwrap();
        assert!(msg.is_empty());
    }

    #[test]
    fn test_scalar_fields() {
        let mut msg = MessageBuilder::new();
        msg.bool(4, true);
        msg.uint64("Test", 6, 300).unwrap();
        msg.float(8, 1.0);
        assert_eq!(
            msg.finish(),
            [0x20, 0x01, 0x30, 0xAC, 0x02, 0x45, 0x00, 0x00, 0x80, 0x3F]
        );
    }

    #[test]
    fn test_negative_unsigned_is_rejected() {
        let mut msg = MessageBuilder::new();
        let err = msg.uint64("Chapter", 12, -1).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldOutOfRange { message: "Chapter", field: 12, value: -1 }
        ));
        assert!(msg.is_empty());

        assert!(msg.repeated_uint64("Book", 16, &[1, -3]).is_err());
    }

    #[test]
    fn test_repeated_preserve_order() {
        let mut msg = MessageBuilder::new();
        msg.repeated_strings(6, &["b", "a"]);
        msg.repeated_uint64("Test", 16, &[8, 1]).unwrap();
        let bytes = msg.finish();

        let fields: Vec<_> = FieldReader::new(&bytes).map(|f| f.unwrap()).collect();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0].2, FieldValue::Bytes(b"b"));
        assert_eq!(fields[1].2, FieldValue::Bytes(b"a"));
        assert_eq!(fields[2].2, FieldValue::Varint(8));
        assert_eq!(fields[3].2, FieldValue::Varint(1));
    }

    #[test]
    fn test_nested_message_is_length_delimited() {
        let pair = Pair {
            left: 7,
            right: "x".to_string(),
        };
        let mut msg = MessageBuilder::new();
        msg.message(15, &pair).unwrap();
        assert_eq!(msg.finish(), [0x7A, 0x05, 0x08, 0x07, 0x12, 0x01, b'x']);
    }

    #[test]
    fn test_nested_error_propagates() {
        let pair = Pair {
            left: -2,
            right: String::new(),
        };
        let mut msg = MessageBuilder::new();
        assert!(msg.repeated_messages(1, &[pair]).is_err());
    }
}
