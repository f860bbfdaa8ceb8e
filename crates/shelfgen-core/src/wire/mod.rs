//! Low-level protobuf wire format encoding.
//!
//! Every field is written as a varint "tag" holding the field number and
//! wire type, followed by the payload:
//!
//! - 0: VARINT (int64, uint64, bool, enum)
//! - 1: I64 (fixed64, double)
//! - 2: LEN (string, bytes, embedded messages)
//! - 5: I32 (fixed32, float)
//!
//! The encoders write into any [`BufMut`]; callers own the buffer. The
//! [`reader`] submodule walks encoded bytes back into fields and is used to
//! check what the encoders produced.

pub mod reader;

use bytes::BufMut;

pub use reader::{decode_varint, FieldReader, FieldValue};

/// Protobuf wire types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireType {
    /// Variable-length integer
    Varint = 0,
    /// 64-bit fixed-width
    I64 = 1,
    /// Length-delimited (strings, bytes, embedded messages)
    Len = 2,
    /// Start group (deprecated, never written)
    StartGroup = 3,
    /// End group (deprecated, never written)
    EndGroup = 4,
    /// 32-bit fixed-width
    I32 = 5,
}

/// Maximum valid protobuf field number (2^29 - 1)
pub const MAX_FIELD_NUMBER: u32 = 536_870_911;

/// Longest possible varint (a full 64-bit value)
pub const MAX_VARINT_LEN: usize = 10;

/// Encode `value` as a varint: 7 bits per byte, low-order group first,
/// continuation bit set on every byte but the last.
pub fn encode_varint(mut value: u64, buf: &mut impl BufMut) {
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Number of bytes [`encode_varint`] writes for `value`.
pub fn encoded_len_varint(value: u64) -> usize {
    // 1 byte per started group of 7 bits, at least one byte for zero
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

/// Map a signed integer onto an unsigned one so that small magnitudes stay
/// small: `0, -1, 1, -2, ...` become `0, 1, 2, 3, ...`.
pub fn encode_zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`encode_zigzag`].
pub fn decode_zigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Encode a float as 4 little-endian IEEE-754 bytes.
pub fn encode_fixed32_float(value: f32, buf: &mut impl BufMut) {
    buf.put_f32_le(value);
}

/// Encode `payload` prefixed with its length as a varint.
pub fn encode_length_delimited(payload: &[u8], buf: &mut impl BufMut) {
    encode_varint(payload.len() as u64, buf);
    buf.put_slice(payload);
}

/// Encode the tag `(field_number << 3) | wire_type`.
pub fn encode_field_tag(field_number: u32, wire_type: WireType, buf: &mut impl BufMut) {
    debug_assert!(
        (1..=MAX_FIELD_NUMBER).contains(&field_number),
        "field number {} out of range",
        field_number
    );
    encode_varint(((field_number as u64) << 3) | wire_type as u64, buf);
}

/// Encode a tag followed by an already-framed payload.
///
/// The payload must match the wire type: a varint for `Varint`, 4 or 8 raw
/// bytes for the fixed types, and a length prefix plus bytes for `Len`.
pub fn encode_field(field_number: u32, wire_type: WireType, payload: &[u8], buf: &mut impl BufMut) {
    encode_field_tag(field_number, wire_type, buf);
    buf.put_slice(payload);
}
