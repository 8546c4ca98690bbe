//! Type tags describing how a property's raw bytes are encoded.
//!
//! Two tag families exist, matching the two property namespaces the
//! platform exposes: [`PropertyType`] for keyed device/interface
//! properties and [`RegistryValueType`] for the legacy registry-backed
//! properties. Both round-trip through their native numeric codes so
//! unknown tags coming from the platform are preserved rather than
//! rejected.

use serde::{Deserialize, Serialize};

/// Native type tag for a keyed device property.
///
/// The numeric codes are the platform's own; [`Other`](Self::Other)
/// preserves any code this crate does not model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    /// No value is stored.
    Empty,
    /// An explicit null value.
    Null,
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer.
    UInt8,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    UInt64,
    /// 16-byte GUID in its binary layout.
    Guid,
    /// Single-byte boolean.
    Boolean,
    /// NUL-terminated UTF-16LE string.
    String,
    /// List of NUL-terminated UTF-16LE strings with an empty terminator.
    StringList,
    /// Self-relative binary security descriptor.
    SecurityDescriptor,
    /// Security descriptor in string form.
    SecurityDescriptorString,
    /// Opaque byte sequence.
    Binary,
    /// A tag this crate does not model, preserved verbatim.
    Other(u32),
}

impl PropertyType {
    /// Returns the tag for a native numeric code.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0x00 => PropertyType::Empty,
            0x01 => PropertyType::Null,
            0x02 => PropertyType::Int8,
            0x03 => PropertyType::UInt8,
            0x04 => PropertyType::Int16,
            0x05 => PropertyType::UInt16,
            0x06 => PropertyType::Int32,
            0x07 => PropertyType::UInt32,
            0x08 => PropertyType::Int64,
            0x09 => PropertyType::UInt64,
            0x0D => PropertyType::Guid,
            0x11 => PropertyType::Boolean,
            0x12 => PropertyType::String,
            0x13 => PropertyType::SecurityDescriptor,
            0x14 => PropertyType::SecurityDescriptorString,
            0x2012 => PropertyType::StringList,
            0x1016 => PropertyType::Binary,
            other => PropertyType::Other(other),
        }
    }

    /// Returns the native numeric code for this tag.
    pub fn raw(&self) -> u32 {
        match self {
            PropertyType::Empty => 0x00,
            PropertyType::Null => 0x01,
            PropertyType::Int8 => 0x02,
            PropertyType::UInt8 => 0x03,
            PropertyType::Int16 => 0x04,
            PropertyType::UInt16 => 0x05,
            PropertyType::Int32 => 0x06,
            PropertyType::UInt32 => 0x07,
            PropertyType::Int64 => 0x08,
            PropertyType::UInt64 => 0x09,
            PropertyType::Guid => 0x0D,
            PropertyType::Boolean => 0x11,
            PropertyType::String => 0x12,
            PropertyType::SecurityDescriptor => 0x13,
            PropertyType::SecurityDescriptorString => 0x14,
            PropertyType::StringList => 0x2012,
            PropertyType::Binary => 0x1016,
            PropertyType::Other(other) => *other,
        }
    }
}

/// Native type tag for a registry-backed device property.
///
/// These are the platform's registry value type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistryValueType {
    /// No defined value type.
    None,
    /// NUL-terminated UTF-16LE string.
    String,
    /// String containing unexpanded environment-variable references.
    ExpandString,
    /// Opaque byte sequence.
    Binary,
    /// 32-bit unsigned integer, little-endian.
    DoubleWord,
    /// 32-bit unsigned integer, big-endian.
    DoubleWordBigEndian,
    /// Symbolic link.
    Link,
    /// List of NUL-terminated UTF-16LE strings with an empty terminator.
    MultiString,
    /// Resource list as stored by the resource arbiter.
    ResourceList,
    /// Full resource descriptor.
    FullResourceDescriptor,
    /// Resource requirements list.
    ResourceRequirementsList,
    /// 64-bit unsigned integer, little-endian.
    QuadWord,
    /// A tag this crate does not model, preserved verbatim.
    Other(u32),
}

impl RegistryValueType {
    /// Returns the tag for a native numeric code.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => RegistryValueType::None,
            1 => RegistryValueType::String,
            2 => RegistryValueType::ExpandString,
            3 => RegistryValueType::Binary,
            4 => RegistryValueType::DoubleWord,
            5 => RegistryValueType::DoubleWordBigEndian,
            6 => RegistryValueType::Link,
            7 => RegistryValueType::MultiString,
            8 => RegistryValueType::ResourceList,
            9 => RegistryValueType::FullResourceDescriptor,
            10 => RegistryValueType::ResourceRequirementsList,
            11 => RegistryValueType::QuadWord,
            other => RegistryValueType::Other(other),
        }
    }

    /// Returns the native numeric code for this tag.
    pub fn raw(&self) -> u32 {
        match self {
            RegistryValueType::None => 0,
            RegistryValueType::String => 1,
            RegistryValueType::ExpandString => 2,
            RegistryValueType::Binary => 3,
            RegistryValueType::DoubleWord => 4,
            RegistryValueType::DoubleWordBigEndian => 5,
            RegistryValueType::Link => 6,
            RegistryValueType::MultiString => 7,
            RegistryValueType::ResourceList => 8,
            RegistryValueType::FullResourceDescriptor => 9,
            RegistryValueType::ResourceRequirementsList => 10,
            RegistryValueType::QuadWord => 11,
            RegistryValueType::Other(other) => *other,
        }
    }
}
