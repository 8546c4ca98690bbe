//! Per-entity cache of property slots.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use crate::convert::ConverterRegistry;
use crate::error::PropertyError;
use crate::property::PropertyValue;
use crate::source::{PropertySource, RetryPolicy};

/// Caches the property slots read for a single entity.
///
/// A slot enters the cache on its first successful read and stays until
/// the source reports the property gone. A failed refresh surfaces its
/// error but keeps the slot, which still holds the last successfully
/// read tag and value. Misses and first-read failures leave no entry.
#[derive(Debug, Default)]
pub struct PropertyCache<K, T> {
    entries: HashMap<K, PropertyValue<K, T>>,
}

impl<K, T> PropertyCache<K, T>
where
    K: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the number of cached slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no slots are cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if a slot for `key` is cached.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Drops every cached slot.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the cached slot for `key`, if present, without touching
    /// the source.
    pub fn peek(&self, key: &K) -> Option<&PropertyValue<K, T>> {
        self.entries.get(key)
    }

    /// Returns the slot for `key`, reading it from `source` on a miss or
    /// when `force_refresh` is set.
    ///
    /// `Ok(None)` means the source reported the property absent; any
    /// previously cached slot for the key is dropped in that case. A
    /// failed refresh surfaces the error and leaves the cached slot in
    /// place with its last successfully read value.
    pub fn get<S>(
        &mut self,
        source: &S,
        registry: &ConverterRegistry<T>,
        policy: RetryPolicy,
        key: K,
        force_refresh: bool,
    ) -> Result<Option<&PropertyValue<K, T>>, PropertyError>
    where
        S: PropertySource<K, T>,
    {
        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if force_refresh {
                    match occupied.get_mut().read(source, registry, policy) {
                        Ok(true) => {}
                        Ok(false) => {
                            occupied.remove();
                            return Ok(None);
                        }
                        Err(e) => return Err(e),
                    }
                }
                Ok(Some(occupied.into_mut()))
            }
            Entry::Vacant(vacant) => {
                let mut slot = PropertyValue::new(key);
                match slot.read(source, registry, policy) {
                    Ok(true) => Ok(Some(vacant.insert(slot))),
                    Ok(false) => Ok(None),
                    Err(e) => Err(e),
                }
            }
        }
    }

    /// Re-reads every cached slot.
    ///
    /// Slots the source now reports absent are dropped silently; slots
    /// whose refresh fails are reported and kept with their last value.
    /// A failure for one slot never stops the others from refreshing.
    /// The returned vector is empty when every refresh succeeded.
    pub fn refresh_all<S>(
        &mut self,
        source: &S,
        registry: &ConverterRegistry<T>,
        policy: RetryPolicy,
    ) -> Vec<(K, PropertyError)>
    where
        S: PropertySource<K, T>,
    {
        let keys: Vec<K> = self.entries.keys().copied().collect();
        self.refresh_keys(source, registry, policy, &keys)
    }

    /// Re-reads the cached slots for `keys`, skipping keys that are not
    /// cached.
    pub fn refresh_selected<S>(
        &mut self,
        source: &S,
        registry: &ConverterRegistry<T>,
        policy: RetryPolicy,
        keys: &[K],
    ) -> Vec<(K, PropertyError)>
    where
        S: PropertySource<K, T>,
    {
        self.refresh_keys(source, registry, policy, keys)
    }

    fn refresh_keys<S>(
        &mut self,
        source: &S,
        registry: &ConverterRegistry<T>,
        policy: RetryPolicy,
        keys: &[K],
    ) -> Vec<(K, PropertyError)>
    where
        S: PropertySource<K, T>,
    {
        let mut failures = Vec::new();

        for &key in keys {
            let Some(slot) = self.entries.get_mut(&key) else {
                continue;
            };
            match slot.read(source, registry, policy) {
                Ok(true) => {}
                Ok(false) => {
                    self.entries.remove(&key);
                }
                Err(e) => {
                    #[cfg(feature = "logging")]
                    log::debug!("keeping cached property after failed refresh: {e}");
                    failures.push((key, e));
                }
            }
        }

        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::error::SourceError;
    use crate::property_type::PropertyType;
    use crate::source::SourceRead;
    use std::cell::RefCell;
    use std::collections::HashMap as Map;

    /// Serves values from a mutable table and counts reads per key.
    struct TableSource {
        values: RefCell<Map<&'static str, (PropertyType, Vec<u8>)>>,
        reads: RefCell<Map<&'static str, u32>>,
        denied: RefCell<Vec<&'static str>>,
    }

    impl TableSource {
        fn new(values: &[(&'static str, PropertyType, Vec<u8>)]) -> Self {
            Self {
                values: RefCell::new(
                    values
                        .iter()
                        .map(|(k, t, v)| (*k, (*t, v.clone())))
                        .collect(),
                ),
                reads: RefCell::new(Map::new()),
                denied: RefCell::new(Vec::new()),
            }
        }

        fn deny(&self, key: &'static str) {
            self.denied.borrow_mut().push(key);
        }

        fn remove(&self, key: &'static str) {
            self.values.borrow_mut().remove(key);
        }

        fn reads(&self, key: &'static str) -> u32 {
            self.reads.borrow().get(key).copied().unwrap_or(0)
        }
    }

    impl PropertySource<&'static str, PropertyType> for TableSource {
        fn read(
            &self,
            key: &&'static str,
            buffer: &mut Buffer,
        ) -> Result<SourceRead<PropertyType>, SourceError> {
            *self.reads.borrow_mut().entry(*key).or_insert(0) += 1;
            if self.denied.borrow().contains(key) {
                return Err(SourceError::AccessDenied { code: 5 });
            }
            let values = self.values.borrow();
            let (value_type, bytes) = values.get(key).ok_or(SourceError::NotFound)?;
            if buffer.len() < bytes.len() {
                return Err(SourceError::InsufficientBuffer {
                    required: bytes.len(),
                });
            }
            buffer.as_mut_slice()[..bytes.len()].copy_from_slice(bytes);
            Ok(SourceRead {
                value_type: *value_type,
                size: bytes.len(),
            })
        }
    }

    fn registry() -> ConverterRegistry<PropertyType> {
        ConverterRegistry::with_device_defaults()
    }

    #[test]
    fn test_hit_does_not_touch_the_source() {
        let source = TableSource::new(&[("address", PropertyType::UInt32, vec![3, 0, 0, 0])]);
        let registry = registry();
        let mut cache = PropertyCache::new();

        let slot = cache
            .get(&source, &registry, RetryPolicy::default(), "address", false)
            .unwrap()
            .unwrap();
        assert_eq!(slot.get::<u32>().unwrap(), 3);
        let after_miss = source.reads("address");

        cache
            .get(&source, &registry, RetryPolicy::default(), "address", false)
            .unwrap()
            .unwrap();
        assert_eq!(source.reads("address"), after_miss);
    }

    #[test]
    fn test_missing_property_is_not_cached() {
        let source = TableSource::new(&[]);
        let registry = registry();
        let mut cache: PropertyCache<&str, PropertyType> = PropertyCache::new();

        let result = cache
            .get(&source, &registry, RetryPolicy::default(), "ghost", false)
            .unwrap();
        assert!(result.is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_force_refresh_rereads_in_place() {
        let source = TableSource::new(&[("address", PropertyType::UInt32, vec![3, 0, 0, 0])]);
        let registry = registry();
        let mut cache = PropertyCache::new();

        cache
            .get(&source, &registry, RetryPolicy::default(), "address", false)
            .unwrap();
        source
            .values
            .borrow_mut()
            .insert("address", (PropertyType::UInt32, vec![9, 0, 0, 0]));

        let slot = cache
            .get(&source, &registry, RetryPolicy::default(), "address", true)
            .unwrap()
            .unwrap();
        assert_eq!(slot.get::<u32>().unwrap(), 9);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_refresh_drops_vanished_property() {
        let source = TableSource::new(&[("address", PropertyType::UInt32, vec![3, 0, 0, 0])]);
        let registry = registry();
        let mut cache = PropertyCache::new();

        cache
            .get(&source, &registry, RetryPolicy::default(), "address", false)
            .unwrap();
        source.remove("address");

        let result = cache
            .get(&source, &registry, RetryPolicy::default(), "address", true)
            .unwrap();
        assert!(result.is_none());
        assert!(!cache.contains(&"address"));
    }

    #[test]
    fn test_refresh_all_drops_vanished_property_silently() {
        let source = TableSource::new(&[
            ("good", PropertyType::UInt32, vec![1, 0, 0, 0]),
            ("gone", PropertyType::UInt32, vec![2, 0, 0, 0]),
        ]);
        let registry = registry();
        let mut cache = PropertyCache::new();

        for key in ["good", "gone"] {
            cache
                .get(&source, &registry, RetryPolicy::default(), key, false)
                .unwrap();
        }
        source.remove("gone");

        let failures = cache.refresh_all(&source, &registry, RetryPolicy::default());
        assert!(failures.is_empty());
        assert!(cache.contains(&"good"));
        assert!(!cache.contains(&"gone"));
    }

    #[test]
    fn test_refresh_all_reports_failures_per_key() {
        let source = TableSource::new(&[
            ("good", PropertyType::UInt32, vec![1, 0, 0, 0]),
            ("secured", PropertyType::UInt32, vec![2, 0, 0, 0]),
        ]);
        let registry = registry();
        let mut cache = PropertyCache::new();

        for key in ["good", "secured"] {
            cache
                .get(&source, &registry, RetryPolicy::default(), key, false)
                .unwrap();
        }
        source.deny("secured");

        let failures = cache.refresh_all(&source, &registry, RetryPolicy::default());
        assert_eq!(failures.len(), 1);
        match &failures[0] {
            ("secured", PropertyError::AccessDenied { code: 5 }) => {}
            other => panic!("Expected AccessDenied for 'secured', got {other:?}"),
        }
        assert!(cache.contains(&"good"));
        // The slot survives the failure with its last read value.
        assert_eq!(cache.peek(&"secured").unwrap().get::<u32>().unwrap(), 2);
    }

    #[test]
    fn test_failed_refresh_keeps_last_valid_pair() {
        let source = TableSource::new(&[("address", PropertyType::UInt32, vec![7, 0, 0, 0])]);
        let registry = registry();
        let mut cache = PropertyCache::new();

        cache
            .get(&source, &registry, RetryPolicy::default(), "address", false)
            .unwrap();
        source.deny("address");

        match cache.get(&source, &registry, RetryPolicy::default(), "address", true) {
            Err(PropertyError::AccessDenied { code: 5 }) => {}
            other => panic!("Expected AccessDenied, got {other:?}"),
        }

        let slot = cache.peek(&"address").expect("slot dropped by failed refresh");
        assert_eq!(slot.value_type(), Some(&PropertyType::UInt32));
        assert_eq!(slot.get::<u32>().unwrap(), 7);
    }

    #[test]
    fn test_refresh_selected_skips_uncached_keys() {
        let source = TableSource::new(&[("address", PropertyType::UInt32, vec![3, 0, 0, 0])]);
        let registry = registry();
        let mut cache = PropertyCache::new();

        cache
            .get(&source, &registry, RetryPolicy::default(), "address", false)
            .unwrap();

        let failures = cache.refresh_selected(
            &source,
            &registry,
            RetryPolicy::default(),
            &["address", "never-read"],
        );
        assert!(failures.is_empty());
        assert_eq!(source.reads("never-read"), 0);
    }

    #[test]
    fn test_peek_never_reads() {
        let source = TableSource::new(&[("address", PropertyType::UInt32, vec![3, 0, 0, 0])]);
        let registry = registry();
        let mut cache = PropertyCache::new();

        assert!(cache.peek(&"address").is_none());
        cache
            .get(&source, &registry, RetryPolicy::default(), "address", false)
            .unwrap();
        let reads = source.reads("address");
        assert!(cache.peek(&"address").is_some());
        assert_eq!(source.reads("address"), reads);
    }
}
