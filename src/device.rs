//! Device and device-interface entities over a property source.
//!
//! These types own the per-entity caches and the shared converter bundle
//! and expose the most common properties as typed accessors. They are
//! built over any [`PropertySource`] implementation; enumerating devices
//! and opening native handles is the backend's business, not this
//! crate's.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::cache::PropertyCache;
use crate::convert::Converters;
use crate::error::PropertyError;
use crate::key::{PropertyKey, RegistryPropertyKey};
use crate::keys;
use crate::property::PropertyValue;
use crate::property_enum;
use crate::property_type::{PropertyType, RegistryValueType};
use crate::source::{PropertySource, RetryPolicy};

/// A cached slot for a keyed device or interface property.
pub type DevicePropertyValue = PropertyValue<PropertyKey, PropertyType>;

/// A cached slot for a registry-backed device property.
pub type RegistryPropertyValue = PropertyValue<RegistryPropertyKey, RegistryValueType>;

property_enum! {
    /// Configuration flags stored in the device's registry key.
    pub struct ConfigFlags: u32 {
        /// The device is disabled.
        const DISABLED = 0x0000_0001;
        /// The device has been physically removed.
        const REMOVED = 0x0000_0002;
        /// The device was installed manually.
        const MANUAL_INSTALL = 0x0000_0004;
        /// Boot logical configuration is ignored.
        const IGNORE_BOOT_LC = 0x0000_0008;
        /// The device is a network boot device.
        const NET_BOOT = 0x0000_0010;
        /// The device will be reinstalled.
        const REINSTALL = 0x0000_0020;
        /// The last installation of the device failed.
        const FAILED_INSTALL = 0x0000_0040;
        /// A child of the device cannot be stopped.
        const CANT_STOP_A_CHILD = 0x0000_0080;
        /// Installation finishes on the next start.
        const FINISH_INSTALL = 0x0000_0400;
        /// A forced configuration is required.
        const NEEDS_FORCED_CONFIG = 0x0000_0800;
    }
}

property_enum! {
    /// Capability flags reported for a device.
    pub struct Capabilities: u32 {
        /// The device supports software locking.
        const LOCK_SUPPORTED = 0x0000_0001;
        /// The device supports software-controlled ejection.
        const EJECT_SUPPORTED = 0x0000_0002;
        /// The device can be removed from its parent.
        const REMOVABLE = 0x0000_0004;
        /// The device is a docking peripheral.
        const DOCK_DEVICE = 0x0000_0008;
        /// The instance identifier is unique across the system.
        const UNIQUE_ID = 0x0000_0010;
        /// Installation can proceed without user interaction.
        const SILENT_INSTALL = 0x0000_0020;
        /// The raw device can be opened without a function driver.
        const RAW_DEVICE_OK = 0x0000_0040;
        /// The device tolerates surprise removal.
        const SURPRISE_REMOVAL_OK = 0x0000_0080;
        /// The hardware has been disabled.
        const HARDWARE_DISABLED = 0x0000_0100;
        /// The device cannot be dynamically reconfigured.
        const NON_DYNAMIC = 0x0000_0200;
    }
}

property_enum! {
    /// State flags reported for a device interface at enumeration time.
    pub struct InterfaceFlags: u32 {
        /// The interface is active.
        const ACTIVE = 0x0000_0001;
        /// The interface is the default for its class.
        const DEFAULT = 0x0000_0002;
        /// The interface has been removed.
        const REMOVED = 0x0000_0004;
    }
}

/// A key from either of a device's property families.
///
/// [`Device::refresh`] reports failures under this type so a caller can
/// retry the exact properties that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKey {
    /// A keyed device or interface property.
    Property(PropertyKey),
    /// A registry-backed property.
    Registry(RegistryPropertyKey),
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(key) => key.fmt(f),
            Self::Registry(key) => key.fmt(f),
        }
    }
}

/// A device, with cached access to both of its property families.
///
/// `S` serves the keyed family and the registry family through the two
/// [`PropertySource`] implementations it carries.
pub struct Device<S> {
    source: S,
    converters: Arc<Converters>,
    policy: RetryPolicy,
    properties: PropertyCache<PropertyKey, PropertyType>,
    registry_properties: PropertyCache<RegistryPropertyKey, RegistryValueType>,
}

impl<S> Device<S>
where
    S: PropertySource<PropertyKey, PropertyType>
        + PropertySource<RegistryPropertyKey, RegistryValueType>,
{
    /// Creates a device over `source` with the default retry policy.
    pub fn new(source: S, converters: Arc<Converters>) -> Self {
        Self::with_policy(source, converters, RetryPolicy::default())
    }

    /// Creates a device over `source` with an explicit retry policy.
    pub fn with_policy(source: S, converters: Arc<Converters>, policy: RetryPolicy) -> Self {
        Self {
            source,
            converters,
            policy,
            properties: PropertyCache::new(),
            registry_properties: PropertyCache::new(),
        }
    }

    /// Returns the keyed property for `key`, reading it on a cache miss
    /// or when `refresh` is set.
    pub fn property(
        &mut self,
        key: PropertyKey,
        refresh: bool,
    ) -> Result<Option<&DevicePropertyValue>, PropertyError> {
        self.properties.get(
            &self.source,
            self.converters.device(),
            self.policy,
            key,
            refresh,
        )
    }

    /// Returns the registry-backed property for `key`, reading it on a
    /// cache miss or when `refresh` is set.
    pub fn registry_property(
        &mut self,
        key: RegistryPropertyKey,
        refresh: bool,
    ) -> Result<Option<&RegistryPropertyValue>, PropertyError> {
        self.registry_properties.get(
            &self.source,
            self.converters.registry(),
            self.policy,
            key,
            refresh,
        )
    }

    /// Re-reads every cached property of both families, returning the
    /// keys whose refresh failed.
    pub fn refresh(&mut self) -> Vec<(DeviceKey, PropertyError)> {
        let mut failures: Vec<(DeviceKey, PropertyError)> = Vec::new();
        failures.extend(
            self.properties
                .refresh_all(&self.source, self.converters.device(), self.policy)
                .into_iter()
                .map(|(key, e)| (DeviceKey::Property(key), e)),
        );
        failures.extend(
            self.registry_properties
                .refresh_all(&self.source, self.converters.registry(), self.policy)
                .into_iter()
                .map(|(key, e)| (DeviceKey::Registry(key), e)),
        );
        failures
    }

    /// Display name of the device.
    pub fn name(&mut self) -> Result<Option<String>, PropertyError> {
        self.keyed_string(keys::NAME)
    }

    /// Device instance identifier.
    pub fn instance_id(&mut self) -> Result<Option<String>, PropertyError> {
        self.keyed_string(keys::device::INSTANCE_ID)
    }

    /// Friendly name, falling back to the device description.
    pub fn friendly_name(&mut self) -> Result<Option<String>, PropertyError> {
        match self.keyed_string(keys::device::FRIENDLY_NAME)? {
            Some(name) => Ok(Some(name)),
            None => self.keyed_string(keys::device::DESCRIPTION),
        }
    }

    /// Configuration flags from the device's registry key, if set.
    pub fn config_flags(&mut self) -> Result<Option<ConfigFlags>, PropertyError> {
        Ok(self
            .registry_property(keys::registry::CONFIG_FLAGS, false)?
            .and_then(|slot| slot.get::<ConfigFlags>().ok()))
    }

    /// Capability flags from the device's registry key, if set.
    pub fn capabilities(&mut self) -> Result<Option<Capabilities>, PropertyError> {
        Ok(self
            .registry_property(keys::registry::CAPABILITIES, false)?
            .and_then(|slot| slot.get::<Capabilities>().ok()))
    }

    /// Whether the device is enabled.
    ///
    /// `Ok(None)` when the configuration flags are not available.
    pub fn is_enabled(&mut self) -> Result<Option<bool>, PropertyError> {
        Ok(self
            .config_flags()?
            .map(|flags| !flags.contains(ConfigFlags::DISABLED)))
    }

    fn keyed_string(&mut self, key: PropertyKey) -> Result<Option<String>, PropertyError> {
        Ok(self
            .property(key, false)?
            .and_then(|slot| slot.get::<String>().ok()))
    }
}

/// A device interface, with cached access to its keyed properties.
pub struct DeviceInterface<S> {
    source: S,
    converters: Arc<Converters>,
    policy: RetryPolicy,
    flags: InterfaceFlags,
    properties: PropertyCache<PropertyKey, PropertyType>,
}

impl<S> DeviceInterface<S>
where
    S: PropertySource<PropertyKey, PropertyType>,
{
    /// Creates an interface over `source`.
    ///
    /// `flags` are the state flags the backend reported when the
    /// interface was enumerated.
    pub fn new(source: S, converters: Arc<Converters>, flags: InterfaceFlags) -> Self {
        Self::with_policy(source, converters, flags, RetryPolicy::default())
    }

    /// Creates an interface over `source` with an explicit retry policy.
    pub fn with_policy(
        source: S,
        converters: Arc<Converters>,
        flags: InterfaceFlags,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            source,
            converters,
            policy,
            flags,
            properties: PropertyCache::new(),
        }
    }

    /// Returns the keyed property for `key`, reading it on a cache miss
    /// or when `refresh` is set.
    pub fn property(
        &mut self,
        key: PropertyKey,
        refresh: bool,
    ) -> Result<Option<&DevicePropertyValue>, PropertyError> {
        self.properties.get(
            &self.source,
            self.converters.device(),
            self.policy,
            key,
            refresh,
        )
    }

    /// State flags reported at enumeration time.
    pub fn flags(&self) -> InterfaceFlags {
        self.flags
    }

    /// Whether the interface was active when enumerated.
    pub fn is_active(&self) -> bool {
        self.flags.contains(InterfaceFlags::ACTIVE)
    }

    /// Whether the interface is the default for its class.
    pub fn is_default(&self) -> bool {
        self.flags.contains(InterfaceFlags::DEFAULT)
    }

    /// Whether the interface has been removed.
    pub fn is_removed(&self) -> bool {
        self.flags.contains(InterfaceFlags::REMOVED)
    }

    /// Friendly name of the interface.
    pub fn friendly_name(&mut self) -> Result<Option<String>, PropertyError> {
        Ok(self
            .property(keys::interface::FRIENDLY_NAME, false)?
            .and_then(|slot| slot.get::<String>().ok()))
    }

    /// Whether the interface's enabled property is set.
    pub fn is_enabled(&mut self) -> Result<Option<bool>, PropertyError> {
        Ok(self
            .property(keys::interface::ENABLED, false)?
            .and_then(|slot| slot.get::<bool>().ok()))
    }

    /// Interface class identifier.
    pub fn interface_class_id(&mut self) -> Result<Option<Uuid>, PropertyError> {
        Ok(self
            .property(keys::interface::CLASS_GUID, false)?
            .and_then(|slot| slot.get::<Uuid>().ok()))
    }
}
