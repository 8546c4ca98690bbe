//! A single property slot and the probe-and-retry retrieval protocol.

use std::hash::Hash;

use crate::buffer::Buffer;
use crate::convert::{decode_with, ConverterRegistry};
use crate::error::{PropertyError, SourceError};
use crate::source::{PropertySource, RetryPolicy, SourceRead};
use crate::value::{FromPropertyData, PropertyData};

/// A property slot: a key plus the value and type tag last read for it.
///
/// The slot starts empty and is filled by [`read`](Self::read). `K` is
/// the key family and `T` the type-tag family; the same machinery serves
/// keyed device properties and registry-backed properties.
#[derive(Debug)]
pub struct PropertyValue<K, T> {
    key: K,
    value_type: Option<T>,
    data: Option<PropertyData>,
}

impl<K, T> PropertyValue<K, T> {
    /// Creates an empty slot for `key`.
    pub fn new(key: K) -> Self {
        Self {
            key,
            value_type: None,
            data: None,
        }
    }

    /// Returns the key this slot reads.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the type tag reported by the last successful read, if any.
    pub fn value_type(&self) -> Option<&T> {
        self.value_type.as_ref()
    }

    /// Returns the decoded value of the last successful read.
    ///
    /// `None` either because the slot has never been read or because the
    /// property exists with an empty value.
    pub fn data(&self) -> Option<&PropertyData> {
        self.data.as_ref()
    }

    /// Returns `true` if the slot holds a decoded value.
    pub fn has_value(&self) -> bool {
        self.data.is_some()
    }

    /// Converts the held value to `V` through the conversion cascade.
    ///
    /// Fails with [`ConversionError::UnsupportedTarget`] when the slot
    /// holds no value.
    ///
    /// [`ConversionError::UnsupportedTarget`]: crate::ConversionError::UnsupportedTarget
    pub fn get<V: FromPropertyData>(&self) -> Result<V, crate::error::ConversionError> {
        match &self.data {
            Some(data) => data.get(),
            None => Err(crate::error::ConversionError::UnsupportedTarget {
                from: "no value",
                to: std::any::type_name::<V>(),
            }),
        }
    }

    /// Converts the held value to `V`, falling back to `default` when the
    /// slot is empty or the conversion fails.
    pub fn get_or<V: FromPropertyData>(&self, default: V) -> V {
        self.get().unwrap_or(default)
    }
}

impl<K, T: Copy + Eq + Hash> PropertyValue<K, T> {
    /// Reads the property from `source` and stores the decoded value.
    ///
    /// The protocol probes with an empty buffer first. On
    /// [`SourceError::InsufficientBuffer`] the buffer is resized to the
    /// reported requirement and the read retried, subject to `policy`. On
    /// success the buffer is truncated to the bytes the source actually
    /// used and decoded through `registry`.
    ///
    /// Returns `Ok(true)` when the property exists (its value may still
    /// be empty), `Ok(false)` when the source reports it absent. The tag
    /// and value are only ever overwritten together, after a successful
    /// decode: a failed read or conversion leaves the last successfully
    /// read pair in place. `Ok(false)` clears the slot.
    pub fn read<S>(
        &mut self,
        source: &S,
        registry: &ConverterRegistry<T>,
        policy: RetryPolicy,
    ) -> Result<bool, PropertyError>
    where
        S: PropertySource<K, T>,
    {
        let mut buffer = Buffer::new();
        let mut attempts: u32 = 0;

        loop {
            if !policy.allows(attempts) {
                return Err(PropertyError::RetryExhausted { attempts });
            }
            attempts += 1;

            match source.read(&self.key, &mut buffer) {
                Ok(SourceRead { value_type, size }) => {
                    buffer.truncate(size)?;
                    let data = decode_with(registry, value_type, &buffer)?;
                    self.value_type = Some(value_type);
                    self.data = data;
                    return Ok(true);
                }
                Err(SourceError::InsufficientBuffer { required }) => {
                    #[cfg(feature = "logging")]
                    log::trace!(
                        "buffer too small on attempt {attempts}, growing to {required} bytes"
                    );
                    buffer.resize(required)?;
                }
                Err(SourceError::NotFound) => {
                    self.clear();
                    return Ok(false);
                }
                Err(SourceError::AccessDenied { code }) => {
                    return Err(PropertyError::AccessDenied { code });
                }
                Err(SourceError::Platform { code, message }) => {
                    return Err(PropertyError::Platform { code, message });
                }
            }
        }
    }

    fn clear(&mut self) {
        self.value_type = None;
        self.data = None;
    }
}
