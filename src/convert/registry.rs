//! Concurrent, type-tag-keyed converter lookup.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::property_type::{PropertyType, RegistryValueType};

use super::codecs::{
    BinaryConverter, BooleanConverter, GuidConverter, I8Converter, I16Converter, I32Converter,
    I64Converter, SecurityDescriptorConverter, StringConverter, StringListConverter, U8Converter,
    U16Converter, U32Converter, U64Converter,
};
use super::ValueConverter;

/// A concurrent mapping from value-type tag to converter.
///
/// Lookups are wait-free and always observe a consistent mapping.
/// Registration copies the map and publishes it with a compare-and-swap,
/// retrying against the latest state when it loses a race, so concurrent
/// registrations never lose an update and never block readers.
pub struct ConverterRegistry<T> {
    map: ArcSwap<HashMap<T, Arc<dyn ValueConverter>>>,
}

impl<T: Copy + Eq + Hash> ConverterRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            map: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Registers a converter for `tag`.
    ///
    /// If a converter is already registered for the tag and `overwrite`
    /// is false, the registry is left unchanged and `false` is returned.
    /// With `overwrite` set, the entry is replaced; the replacement
    /// retries until it lands against the latest observed state.
    pub fn register(
        &self,
        tag: T,
        converter: Arc<dyn ValueConverter>,
        overwrite: bool,
    ) -> bool {
        loop {
            let current = self.map.load_full();

            if current.contains_key(&tag) && !overwrite {
                return false;
            }

            let mut next = HashMap::clone(&current);
            next.insert(tag, Arc::clone(&converter));

            let previous = self.map.compare_and_swap(&current, Arc::new(next));
            if Arc::ptr_eq(&*previous, &current) {
                return true;
            }
            // Lost a race with another writer; retry against the new map.
        }
    }

    /// Registers one converter under several tags.
    pub fn register_many(
        &self,
        tags: &[T],
        converter: Arc<dyn ValueConverter>,
        overwrite: bool,
    ) {
        for &tag in tags {
            self.register(tag, Arc::clone(&converter), overwrite);
        }
    }

    /// Returns the converter registered for `tag`, if any.
    pub fn lookup(&self, tag: T) -> Option<Arc<dyn ValueConverter>> {
        self.map.load().get(&tag).cloned()
    }
}

impl<T: Copy + Eq + Hash> Default for ConverterRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterRegistry<PropertyType> {
    /// Creates a registry with the standard converters for keyed device
    /// and device-interface properties.
    pub fn with_device_defaults() -> Self {
        let registry = Self::new();
        registry.register(PropertyType::Boolean, Arc::new(BooleanConverter), false);
        registry.register(PropertyType::Guid, Arc::new(GuidConverter), false);
        registry.register(PropertyType::Int8, Arc::new(I8Converter), false);
        registry.register(PropertyType::Int16, Arc::new(I16Converter), false);
        registry.register(PropertyType::Int32, Arc::new(I32Converter), false);
        registry.register(PropertyType::Int64, Arc::new(I64Converter), false);
        registry.register(PropertyType::UInt8, Arc::new(U8Converter), false);
        registry.register(PropertyType::UInt16, Arc::new(U16Converter), false);
        registry.register(PropertyType::UInt32, Arc::new(U32Converter), false);
        registry.register(PropertyType::UInt64, Arc::new(U64Converter), false);
        registry.register(
            PropertyType::SecurityDescriptor,
            Arc::new(SecurityDescriptorConverter),
            false,
        );
        registry.register_many(
            &[
                PropertyType::String,
                PropertyType::SecurityDescriptorString,
            ],
            Arc::new(StringConverter),
            false,
        );
        registry.register(
            PropertyType::StringList,
            Arc::new(StringListConverter),
            false,
        );
        registry
    }
}

impl ConverterRegistry<RegistryValueType> {
    /// Creates a registry with the standard converters for
    /// registry-backed properties.
    pub fn with_registry_defaults() -> Self {
        let registry = Self::new();
        registry.register_many(
            &[
                RegistryValueType::String,
                RegistryValueType::ExpandString,
                RegistryValueType::ResourceList,
            ],
            Arc::new(StringConverter),
            false,
        );
        registry.register(
            RegistryValueType::MultiString,
            Arc::new(StringListConverter),
            false,
        );
        registry.register_many(
            &[
                RegistryValueType::DoubleWord,
                RegistryValueType::DoubleWordBigEndian,
            ],
            Arc::new(U32Converter),
            false,
        );
        registry.register(RegistryValueType::QuadWord, Arc::new(U64Converter), false);
        registry.register(RegistryValueType::Binary, Arc::new(BinaryConverter), false);
        registry
    }
}
