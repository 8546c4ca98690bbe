//! Bidirectional codecs between raw buffers and typed property values.
//!
//! Each [`ValueConverter`] is a stateless pair of functions for one value
//! encoding. Converters are looked up by type tag in a
//! [`ConverterRegistry`]; when no converter is registered for a tag, the
//! raw bytes are surfaced verbatim as [`PropertyData::Binary`] rather
//! than failing.
//!
//! The encodings are the platform's own and are reproduced bit for bit:
//! little-endian fixed-width integers, a single `0x00`/`0xFF` byte for
//! booleans, the 16-byte binary GUID layout, NUL-terminated UTF-16LE
//! strings, and double-NUL-terminated string lists.

mod codecs;
mod registry;

use std::sync::Arc;

pub use codecs::{
    BinaryConverter, BooleanConverter, GuidConverter, I8Converter, I16Converter, I32Converter,
    I64Converter, SecurityDescriptorConverter, StringConverter, StringListConverter, U8Converter,
    U16Converter, U32Converter, U64Converter,
};
pub use registry::ConverterRegistry;

use crate::buffer::Buffer;
use crate::error::ConversionError;
use crate::property_type::{PropertyType, RegistryValueType};
use crate::value::PropertyData;

/// A stateless codec between a raw buffer and one value encoding.
///
/// `decode` must not retain any reference to the buffer: the buffer is
/// transient and is released by the caller once decoding returns.
pub trait ValueConverter: Send + Sync {
    /// Decodes the buffer's valid bytes into a typed value.
    fn decode(&self, buffer: &Buffer) -> Result<PropertyData, ConversionError>;

    /// Encodes a value into a fresh buffer holding its raw form.
    ///
    /// The value is first coerced to the converter's supported shape
    /// through the conversion cascade, so e.g. a `U8` value can be
    /// encoded by the 32-bit integer converter.
    fn encode(&self, value: &PropertyData) -> Result<Buffer, ConversionError>;
}

/// The converter registries for both property families, bundled so the
/// composition root can create them once and share them.
///
/// There is deliberately no global registry: every cache-owning entity is
/// handed an `Arc<Converters>` when it is constructed.
pub struct Converters {
    device: ConverterRegistry<PropertyType>,
    registry: ConverterRegistry<RegistryValueType>,
}

impl Converters {
    /// Creates a bundle with the standard converters registered for both
    /// families.
    pub fn with_defaults() -> Arc<Self> {
        Arc::new(Self {
            device: ConverterRegistry::with_device_defaults(),
            registry: ConverterRegistry::with_registry_defaults(),
        })
    }

    /// Creates a bundle with two empty registries.
    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            device: ConverterRegistry::new(),
            registry: ConverterRegistry::new(),
        })
    }

    /// Returns the registry for keyed device/interface properties.
    pub fn device(&self) -> &ConverterRegistry<PropertyType> {
        &self.device
    }

    /// Returns the registry for registry-backed properties.
    pub fn registry(&self) -> &ConverterRegistry<RegistryValueType> {
        &self.registry
    }
}

/// Decodes a terminal buffer using the converter registered for `tag`.
///
/// An empty buffer decodes to `None` (the property exists but has no
/// value). An unregistered tag yields the raw bytes as
/// [`PropertyData::Binary`].
pub(crate) fn decode_with<T>(
    registry: &ConverterRegistry<T>,
    tag: T,
    buffer: &Buffer,
) -> Result<Option<PropertyData>, ConversionError>
where
    T: Copy + Eq + std::hash::Hash,
{
    if buffer.is_empty() {
        return Ok(None);
    }

    match registry.lookup(tag) {
        Some(converter) => converter.decode(buffer).map(Some),
        None => Ok(Some(PropertyData::Binary(buffer.bytes()))),
    }
}
