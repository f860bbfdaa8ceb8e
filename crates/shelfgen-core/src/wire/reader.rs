//! Field-level walking of encoded messages.
//!
//! This is not a general decoder: it splits one message level into
//! `(field number, wire type, payload)` triples so that encoded output can be
//! inspected. Nested messages come back as [`FieldValue::Bytes`] and can be
//! walked with a fresh [`FieldReader`].

use super::{WireType, MAX_FIELD_NUMBER, MAX_VARINT_LEN};
use crate::error::{Error, Result};

impl TryFrom<u8> for WireType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::I64),
            2 => Ok(WireType::Len),
            3 => Ok(WireType::StartGroup),
            4 => Ok(WireType::EndGroup),
            5 => Ok(WireType::I32),
            _ => Err(Error::invalid_wire_format(
                0,
                format!("unknown wire type: {}", value),
            )),
        }
    }
}

/// Decode a varint from the given bytes.
///
/// Returns the decoded value and the number of bytes consumed.
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize)> {
    let mut result: u64 = 0;
    let mut shift = 0;

    for (i, &byte) in data.iter().enumerate() {
        if i >= MAX_VARINT_LEN {
            return Err(Error::varint_decode(i));
        }

        result |= ((byte & 0x7F) as u64) << shift;
        shift += 7;

        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
    }

    Err(Error::varint_decode(data.len()))
}

/// Payload of a single field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Raw varint value (apply zigzag decoding for signed fields)
    Varint(u64),
    /// Eight little-endian bytes
    Fixed64(u64),
    /// Length-delimited payload, without its length prefix
    Bytes(&'a [u8]),
    /// Four little-endian bytes
    Fixed32(u32),
}

impl FieldValue<'_> {
    /// Returns the varint value, if this is one
    pub fn as_varint(&self) -> Option<u64> {
        match self {
            FieldValue::Varint(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the length-delimited payload, if this is one
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Interprets a fixed32 payload as a float
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            FieldValue::Fixed32(bits) => Some(f32::from_bits(*bits)),
            _ => None,
        }
    }
}

/// Iterator over the fields of one encoded message level
#[derive(Debug, Clone)]
pub struct FieldReader<'a> {
    data: &'a [u8],
    position: usize,
    failed: bool,
}

impl<'a> FieldReader<'a> {
    /// Creates a reader positioned at the first field of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            failed: false,
        }
    }

    /// Byte offset of the next field
    pub fn position(&self) -> usize {
        self.position
    }

    fn read_field(&mut self) -> Result<(u32, WireType, FieldValue<'a>)> {
        let start = self.position;
        let all: &'a [u8] = self.data;
        let data = &all[start..];

        let (tag, tag_len) = decode_varint(data)
            .map_err(|_| Error::invalid_wire_format(start, "failed to decode field tag"))?;

        let wire_type = WireType::try_from((tag & 0x07) as u8).map_err(|_| {
            Error::invalid_wire_format(start, format!("unknown wire type in tag {}", tag))
        })?;
        let field_number = (tag >> 3) as u32;

        if field_number == 0 || tag >> 3 > MAX_FIELD_NUMBER as u64 {
            return Err(Error::invalid_wire_format(
                start,
                format!("invalid field number {}", tag >> 3),
            ));
        }

        let rest = &data[tag_len..];
        let (value, value_len) = match wire_type {
            WireType::Varint => {
                let (v, len) = decode_varint(rest).map_err(|_| {
                    Error::invalid_wire_format(start + tag_len, "failed to decode varint value")
                })?;
                (FieldValue::Varint(v), len)
            }
            WireType::I64 => {
                let bytes: [u8; 8] = rest
                    .get(..8)
                    .and_then(|b| b.try_into().ok())
                    .ok_or_else(|| {
                        Error::invalid_wire_format(start + tag_len, "not enough bytes for I64")
                    })?;
                (FieldValue::Fixed64(u64::from_le_bytes(bytes)), 8)
            }
            WireType::Len => {
                let (length, prefix_len) = decode_varint(rest).map_err(|_| {
                    Error::invalid_wire_format(start + tag_len, "failed to decode length prefix")
                })?;
                let end = usize::try_from(length)
                    .ok()
                    .and_then(|len| prefix_len.checked_add(len))
                    .filter(|&end| end <= rest.len())
                    .ok_or_else(|| {
                        Error::invalid_wire_format(
                            start + tag_len,
                            format!(
                                "not enough bytes for LEN field (need {}, have {})",
                                length,
                                rest.len() - prefix_len
                            ),
                        )
                    })?;
                (FieldValue::Bytes(&rest[prefix_len..end]), end)
            }
            WireType::I32 => {
                let bytes: [u8; 4] = rest
                    .get(..4)
                    .and_then(|b| b.try_into().ok())
                    .ok_or_else(|| {
                        Error::invalid_wire_format(start + tag_len, "not enough bytes for I32")
                    })?;
                (FieldValue::Fixed32(u32::from_le_bytes(bytes)), 4)
            }
            WireType::StartGroup | WireType::EndGroup => {
                return Err(Error::invalid_wire_format(
                    start,
                    "group wire types are not supported",
                ));
            }
        };

        self.position = start + tag_len + value_len;
        Ok((field_number, wire_type, value))
    }
}

impl<'a> Iterator for FieldReader<'a> {
    type Item = Result<(u32, WireType, FieldValue<'a>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.position >= self.data.len() {
            return None;
        }

        let field = self.read_field();
        if field.is_err() {
            // Stop after the first malformed field, the rest is unframed
            self.failed = true;
        }
        Some(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_varint_single_byte() {
        let data = [0x08];
        let (value, len) = decode_varint(&data).unwrap();
        assert_eq!(value, 8);
        assert_eq!(len, 1);
    }

    #[test]
    fn test_decode_varint_multi_byte() {
        let data = [0xAC, 0x02]; // Value 300
        let (value, len) = decode_varint(&data).unwrap();
        assert_eq!(value, 300);
        assert_eq!(len, 2);
    }

    #[test]
    fn test_decode_varint_truncated() {
        assert!(decode_varint(&[0x80, 0x80]).is_err());
        assert!(decode_varint(&[]).is_err());
    }

    #[test]
    fn test_decode_varint_too_long() {
        let data = [0xFF; 11];
        assert!(decode_varint(&data).is_err());
    }

    #[test]
    fn test_wire_type_conversion() {
        assert_eq!(WireType::try_from(0).unwrap(), WireType::Varint);
        assert_eq!(WireType::try_from(1).unwrap(), WireType::I64);
        assert_eq!(WireType::try_from(2).unwrap(), WireType::Len);
        assert_eq!(WireType::try_from(5).unwrap(), WireType::I32);
        assert!(WireType::try_from(6).is_err());
    }

    #[test]
    fn test_read_mixed_fields() {
        // 1: varint 150, 2: "hi", 3: fixed32 1.0, 4: fixed64 7
        let data = [
            0x08, 0x96, 0x01, //
            0x12, 0x02, b'h', b'i', //
            0x1D, 0x00, 0x00, 0x80, 0x3F, //
            0x21, 0x07, 0, 0, 0, 0, 0, 0, 0,
        ];
        let fields: Vec<_> = FieldReader::new(&data).collect::<Result<_>>().unwrap();

        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], (1, WireType::Varint, FieldValue::Varint(150)));
        assert_eq!(fields[1], (2, WireType::Len, FieldValue::Bytes(b"hi")));
        assert_eq!(fields[2].2.as_f32(), Some(1.0));
        assert_eq!(fields[3], (4, WireType::I64, FieldValue::Fixed64(7)));
    }

    #[test]
    fn test_read_truncated_len_field() {
        let data = [0x0A, 0x05, b'h', b'e'];
        let mut reader = FieldReader::new(&data);
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_invalid_field_number() {
        // Field 0 is invalid
        let data = [0x00, 0x01];
        let mut reader = FieldReader::new(&data);
        assert!(reader.next().unwrap().is_err());
    }
}
