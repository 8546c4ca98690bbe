//! The standard value converters.

use uuid::Uuid;

use crate::buffer::Buffer;
use crate::error::ConversionError;
use crate::value::{PropertyData, SecurityDescriptor};

use super::ValueConverter;

/// Converter for single-byte booleans.
///
/// The platform encodes true as `0xFF` and false as `0x00`; on decode,
/// any nonzero byte anywhere in the buffer counts as true.
pub struct BooleanConverter;

impl ValueConverter for BooleanConverter {
    fn decode(&self, buffer: &Buffer) -> Result<PropertyData, ConversionError> {
        Ok(PropertyData::Bool(
            buffer.as_slice().iter().any(|&b| b != 0),
        ))
    }

    fn encode(&self, value: &PropertyData) -> Result<Buffer, ConversionError> {
        let v: bool = value.get()?;
        Ok(Buffer::from_bytes(&[if v { 0xFF } else { 0x00 }])?)
    }
}

macro_rules! integer_converter {
    ($(#[$meta:meta])* $name:ident, $t:ty, $variant:ident) => {
        $(#[$meta])*
        pub struct $name;

        impl ValueConverter for $name {
            fn decode(&self, buffer: &Buffer) -> Result<PropertyData, ConversionError> {
                let bytes = buffer.bytes_at(0, size_of::<$t>())?;
                let value = <$t>::from_le_bytes(bytes.try_into().unwrap());
                Ok(PropertyData::$variant(value))
            }

            fn encode(&self, value: &PropertyData) -> Result<Buffer, ConversionError> {
                let v: $t = value.get()?;
                Ok(Buffer::from_bytes(&v.to_le_bytes())?)
            }
        }
    };
}

integer_converter!(
    /// Converter for little-endian signed 8-bit integers.
    I8Converter, i8, I8
);
integer_converter!(
    /// Converter for unsigned 8-bit integers.
    U8Converter, u8, U8
);
integer_converter!(
    /// Converter for little-endian signed 16-bit integers.
    I16Converter, i16, I16
);
integer_converter!(
    /// Converter for little-endian unsigned 16-bit integers.
    U16Converter, u16, U16
);
integer_converter!(
    /// Converter for little-endian signed 32-bit integers.
    I32Converter, i32, I32
);
integer_converter!(
    /// Converter for little-endian unsigned 32-bit integers.
    U32Converter, u32, U32
);
integer_converter!(
    /// Converter for little-endian signed 64-bit integers.
    I64Converter, i64, I64
);
integer_converter!(
    /// Converter for little-endian unsigned 64-bit integers.
    U64Converter, u64, U64
);

/// Converter for 16-byte binary GUIDs in the platform's mixed-endian
/// layout.
pub struct GuidConverter;

impl ValueConverter for GuidConverter {
    fn decode(&self, buffer: &Buffer) -> Result<PropertyData, ConversionError> {
        let bytes = buffer.bytes_at(0, 16)?;
        let array: [u8; 16] = bytes.try_into().unwrap();
        Ok(PropertyData::Guid(Uuid::from_bytes_le(array)))
    }

    fn encode(&self, value: &PropertyData) -> Result<Buffer, ConversionError> {
        let v: Uuid = value.get()?;
        Ok(Buffer::from_bytes(&v.to_bytes_le())?)
    }
}

/// Converter for NUL-terminated UTF-16LE strings.
///
/// Decode strips a single trailing NUL code unit if present; encode
/// always appends one. An empty string encodes to just the terminator
/// (2 zero bytes).
pub struct StringConverter;

impl StringConverter {
    /// Splits the buffer bytes into UTF-16 code units, little-endian.
    ///
    /// A trailing odd byte is rejected as a bad encoding.
    fn code_units(bytes: &[u8]) -> Result<Vec<u16>, ConversionError> {
        if bytes.len() % 2 != 0 {
            return Err(ConversionError::BadEncoding(format!(
                "UTF-16 data has odd length {}",
                bytes.len()
            )));
        }

        Ok(bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect())
    }

    fn encode_units(value: &str, out: &mut Vec<u8>) {
        for unit in value.encode_utf16() {
            out.extend_from_slice(&unit.to_le_bytes());
        }
        out.extend_from_slice(&[0, 0]);
    }
}

impl ValueConverter for StringConverter {
    fn decode(&self, buffer: &Buffer) -> Result<PropertyData, ConversionError> {
        let mut units = Self::code_units(buffer.as_slice())?;
        if units.last() == Some(&0) {
            units.pop();
        }

        Ok(PropertyData::String(String::from_utf16_lossy(&units)))
    }

    fn encode(&self, value: &PropertyData) -> Result<Buffer, ConversionError> {
        let v: String = value.get()?;
        let mut bytes = Vec::with_capacity(v.len() * 2 + 2);
        Self::encode_units(&v, &mut bytes);
        Ok(Buffer::from_bytes(&bytes)?)
    }
}

/// Converter for lists of NUL-terminated UTF-16LE strings.
///
/// The encoded list is terminated by an additional empty string, so two
/// consecutive NUL code units follow the last real entry. Decode stops at
/// the first zero-length entry; an empty list encodes to exactly 4 zero
/// bytes. Empty entries are skipped on encode, since a zero-length string
/// would read back as the list terminator.
pub struct StringListConverter;

impl ValueConverter for StringListConverter {
    fn decode(&self, buffer: &Buffer) -> Result<PropertyData, ConversionError> {
        let units = StringConverter::code_units(buffer.as_slice())?;
        let mut result = Vec::new();
        let mut offset = 0;

        while offset < units.len() {
            let length = units[offset..]
                .iter()
                .position(|&u| u == 0)
                .unwrap_or(units.len() - offset);

            // A zero-length entry is the list terminator.
            if length == 0 {
                break;
            }

            result.push(String::from_utf16_lossy(&units[offset..offset + length]));
            offset += length + 1;
        }

        Ok(PropertyData::StringList(result))
    }

    fn encode(&self, value: &PropertyData) -> Result<Buffer, ConversionError> {
        let v: Vec<String> = value.get()?;
        let mut bytes = Vec::new();

        for item in &v {
            if item.is_empty() {
                continue;
            }
            StringConverter::encode_units(item, &mut bytes);
        }

        // With no entries the buffer is two empty strings' terminators
        // back to back.
        if bytes.is_empty() {
            bytes.extend_from_slice(&[0, 0]);
        }
        bytes.extend_from_slice(&[0, 0]);

        Ok(Buffer::from_bytes(&bytes)?)
    }
}

/// Converter that copies buffer bytes verbatim.
pub struct BinaryConverter;

impl ValueConverter for BinaryConverter {
    fn decode(&self, buffer: &Buffer) -> Result<PropertyData, ConversionError> {
        Ok(PropertyData::Binary(buffer.bytes()))
    }

    fn encode(&self, value: &PropertyData) -> Result<Buffer, ConversionError> {
        let v: Vec<u8> = value.get()?;
        Ok(Buffer::from_bytes(&v)?)
    }
}

/// Converter for self-relative binary security descriptors.
pub struct SecurityDescriptorConverter;

impl ValueConverter for SecurityDescriptorConverter {
    fn decode(&self, buffer: &Buffer) -> Result<PropertyData, ConversionError> {
        let descriptor = SecurityDescriptor::from_binary(buffer.as_slice())?;
        Ok(PropertyData::SecurityDescriptor(descriptor))
    }

    fn encode(&self, value: &PropertyData) -> Result<Buffer, ConversionError> {
        let v: SecurityDescriptor = value.get()?;
        Ok(Buffer::from_bytes(&v.binary_form())?)
    }
}
