//! Typed access to device configuration properties.
//!
//! This crate implements the retrieval and conversion layer that sits
//! between a native device-configuration API and application code. A
//! backend exposes raw property bytes through the [`PropertySource`]
//! trait; everything above it is portable: the probe-and-retry buffer
//! protocol, the converter registries that decode the platform's wire
//! encodings into typed values, the dynamic conversion cascade, and the
//! per-entity property caches.
//!
//! # Features
//!
//! - **Probe and retry**: reads start with an empty buffer and grow it
//!   to exactly the size the source reports, so values of unknown size
//!   need no guessing
//! - **Two property families**: GUID-keyed properties with rich type
//!   tags, and registry-backed properties with registry value types,
//!   served by the same generic machinery
//! - **Bit-exact codecs**: little-endian integers, single-byte booleans,
//!   the platform's 16-byte GUID layout, NUL-terminated UTF-16LE strings
//!   and double-NUL string lists, and self-relative security descriptors
//! - **Dynamic conversion**: a decoded value converts to any sensible
//!   target type through one cascade, including caller-declared flag
//!   types via [`property_enum!`]
//! - **Lock-free converter lookup**: registries publish their mapping
//!   through an atomic swap, so decoding never takes a lock
//!
//! # Example
//!
//! ```rust
//! use devprops::{Buffer, Converters, PropertyType, ValueConverter};
//!
//! let converters = Converters::with_defaults();
//! let converter = converters.device().lookup(PropertyType::UInt32).unwrap();
//!
//! let buffer = Buffer::from_bytes(&[7, 0, 0, 0])?;
//! let value = converter.decode(&buffer)?;
//!
//! assert_eq!(value.get::<u32>()?, 7);
//! assert_eq!(value.get::<String>()?, "7");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod buffer;
pub mod cache;
pub mod convert;
pub mod device;
pub mod error;
pub mod key;
pub mod keys;
pub mod property;
pub mod property_type;
pub mod source;
pub mod value;

pub use buffer::{Buffer, FixedRecord, ALLOCATION_GRANULARITY, MAX_ALLOCATION_SIZE};
pub use cache::PropertyCache;
pub use convert::{ConverterRegistry, Converters, ValueConverter};
pub use device::{
    Capabilities, ConfigFlags, Device, DeviceInterface, DeviceKey, DevicePropertyValue,
    InterfaceFlags, RegistryPropertyValue,
};
pub use error::{BufferError, ConversionError, PropertyError, SourceError};
pub use key::{PropertyKey, RegistryPropertyKey};
pub use property::PropertyValue;
pub use property_type::{PropertyType, RegistryValueType};
pub use source::{PropertySource, RetryPolicy, SourceRead};
pub use value::{FromPropertyData, PropertyData, SecurityDescriptor};
