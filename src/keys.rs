//! Catalog of well-known property keys.
//!
//! A representative subset of the platform's published keys. Keys are
//! plain constants; nothing in the retrieval machinery depends on this
//! catalog, and callers can construct [`PropertyKey`]s for properties
//! not listed here.

use uuid::{Uuid, uuid};

use crate::key::{PropertyKey, RegistryPropertyKey};
use crate::property_type::{PropertyType, RegistryValueType};

/// Namespace for the classic device properties (the `SPDRP_*` family).
const FORMAT_DEVICE: Uuid = uuid!("a45c254e-df1c-4efd-8020-67d146a850e0");

/// Namespace shared by devices and device interfaces for the instance id.
const FORMAT_INSTANCE: Uuid = uuid!("78c34fc8-104a-4aca-9ea4-524d52996e57");

/// Namespace for device-interface properties.
const FORMAT_INTERFACE: Uuid = uuid!("026e516e-b814-414b-83cd-856d6fef4822");

/// Namespace for the display name common to all object kinds.
const FORMAT_NAME: Uuid = uuid!("b725f130-47ef-101a-a5f1-02608c9eebac");

/// Display name of the object.
pub const NAME: PropertyKey = PropertyKey::new(FORMAT_NAME, 10, "Name", &[PropertyType::String]);

/// Keyed properties of a device.
pub mod device {
    use super::*;

    /// Device description.
    pub const DESCRIPTION: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 2, "Description", &[PropertyType::String]);
    /// Hardware identifiers, most to least specific.
    pub const HARDWARE_IDS: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 3, "Hardware IDs", &[PropertyType::StringList]);
    /// Compatible identifiers.
    pub const COMPATIBLE_IDS: PropertyKey = PropertyKey::new(
        FORMAT_DEVICE,
        4,
        "Compatible IDs",
        &[PropertyType::StringList],
    );
    /// Name of the service servicing the device.
    pub const SERVICE: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 6, "Service", &[PropertyType::String]);
    /// Setup class name.
    pub const CLASS: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 9, "Class", &[PropertyType::String]);
    /// Setup class identifier.
    pub const CLASS_GUID: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 10, "Class GUID", &[PropertyType::Guid]);
    /// Driver key name.
    pub const DRIVER: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 11, "Driver", &[PropertyType::String]);
    /// Configuration flags.
    pub const CONFIG_FLAGS: PropertyKey = PropertyKey::new(
        FORMAT_DEVICE,
        12,
        "Configuration Flags",
        &[PropertyType::UInt32],
    );
    /// Manufacturer name.
    pub const MANUFACTURER: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 13, "Manufacturer", &[PropertyType::String]);
    /// Friendly name.
    pub const FRIENDLY_NAME: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 14, "Friendly Name", &[PropertyType::String]);
    /// Location information.
    pub const LOCATION_INFO: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 15, "Location Info", &[PropertyType::String]);
    /// Physical device object name.
    pub const PDO_NAME: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 16, "PDO Name", &[PropertyType::String]);
    /// Capability flags.
    pub const CAPABILITIES: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 17, "Capabilities", &[PropertyType::UInt32]);
    /// Upper filter drivers.
    pub const UPPER_FILTERS: PropertyKey = PropertyKey::new(
        FORMAT_DEVICE,
        19,
        "Upper Filters",
        &[PropertyType::StringList],
    );
    /// Lower filter drivers.
    pub const LOWER_FILTERS: PropertyKey = PropertyKey::new(
        FORMAT_DEVICE,
        20,
        "Lower Filters",
        &[PropertyType::StringList],
    );
    /// Bus type identifier.
    pub const BUS_TYPE_GUID: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 21, "Bus Type GUID", &[PropertyType::Guid]);
    /// Bus number.
    pub const BUS_NUMBER: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 23, "BusNumber", &[PropertyType::UInt32]);
    /// Enumerator name.
    pub const ENUMERATOR_NAME: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 24, "Enumerator Name", &[PropertyType::String]);
    /// Security descriptor, binary form.
    pub const SECURITY: PropertyKey = PropertyKey::new(
        FORMAT_DEVICE,
        25,
        "Security",
        &[PropertyType::SecurityDescriptor],
    );
    /// Whether the device requires exclusive access.
    pub const EXCLUSIVE: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 28, "Exclusive", &[PropertyType::Boolean]);
    /// Device characteristics.
    pub const CHARACTERISTICS: PropertyKey = PropertyKey::new(
        FORMAT_DEVICE,
        29,
        "Characteristics",
        &[PropertyType::UInt32],
    );
    /// Device address on the bus.
    pub const ADDRESS: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 30, "Address", &[PropertyType::UInt32]);
    /// Power data.
    pub const POWER_DATA: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 32, "Power Data", &[PropertyType::Binary]);
    /// Removal policy.
    pub const REMOVAL_POLICY: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 33, "Removal Policy", &[PropertyType::UInt32]);
    /// Install state.
    pub const INSTALL_STATE: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 36, "Install State", &[PropertyType::UInt32]);
    /// Location paths.
    pub const LOCATION_PATHS: PropertyKey = PropertyKey::new(
        FORMAT_DEVICE,
        37,
        "Location Paths",
        &[PropertyType::StringList],
    );
    /// Base container identifier.
    pub const BASE_CONTAINER_ID: PropertyKey =
        PropertyKey::new(FORMAT_DEVICE, 38, "Base Container ID", &[PropertyType::Guid]);
    /// Device instance identifier (shared with device interfaces).
    pub const INSTANCE_ID: PropertyKey =
        PropertyKey::new(FORMAT_INSTANCE, 256, "Instance ID", &[PropertyType::String]);
}

/// Keyed properties of a device interface.
pub mod interface {
    use super::*;

    /// Friendly name of the interface.
    pub const FRIENDLY_NAME: PropertyKey =
        PropertyKey::new(FORMAT_INTERFACE, 2, "Friendly Name", &[PropertyType::String]);
    /// Whether the interface is enabled.
    pub const ENABLED: PropertyKey =
        PropertyKey::new(FORMAT_INTERFACE, 3, "Enabled", &[PropertyType::Boolean]);
    /// Interface class identifier.
    pub const CLASS_GUID: PropertyKey =
        PropertyKey::new(FORMAT_INTERFACE, 4, "Class GUID", &[PropertyType::Guid]);
    /// Reference string supplied when the interface was registered.
    pub const REFERENCE_STRING: PropertyKey = PropertyKey::new(
        FORMAT_INTERFACE,
        5,
        "Reference String",
        &[PropertyType::String],
    );
}

/// Registry-backed properties of a device (the `SPDRP_*` codes).
pub mod registry {
    use super::*;

    /// Device description.
    pub const DEVICE_DESC: RegistryPropertyKey = RegistryPropertyKey::new(
        0x0000,
        "Device Description",
        &[RegistryValueType::String],
    );
    /// Hardware identifiers.
    pub const HARDWARE_ID: RegistryPropertyKey = RegistryPropertyKey::new(
        0x0001,
        "Hardware IDs",
        &[RegistryValueType::MultiString],
    );
    /// Compatible identifiers.
    pub const COMPATIBLE_IDS: RegistryPropertyKey = RegistryPropertyKey::new(
        0x0002,
        "Compatible IDs",
        &[RegistryValueType::MultiString],
    );
    /// Service name.
    pub const SERVICE: RegistryPropertyKey =
        RegistryPropertyKey::new(0x0004, "Service", &[RegistryValueType::String]);
    /// Setup class name.
    pub const CLASS: RegistryPropertyKey =
        RegistryPropertyKey::new(0x0007, "Class", &[RegistryValueType::String]);
    /// Setup class identifier, in string form.
    pub const CLASS_GUID: RegistryPropertyKey =
        RegistryPropertyKey::new(0x0008, "Class GUID", &[RegistryValueType::String]);
    /// Driver key name.
    pub const DRIVER: RegistryPropertyKey =
        RegistryPropertyKey::new(0x0009, "Driver", &[RegistryValueType::String]);
    /// Configuration flags.
    pub const CONFIG_FLAGS: RegistryPropertyKey = RegistryPropertyKey::new(
        0x000A,
        "Configuration Flags",
        &[RegistryValueType::DoubleWord],
    );
    /// Manufacturer name.
    pub const MANUFACTURER: RegistryPropertyKey =
        RegistryPropertyKey::new(0x000B, "Manufacturer", &[RegistryValueType::String]);
    /// Friendly name.
    pub const FRIENDLY_NAME: RegistryPropertyKey =
        RegistryPropertyKey::new(0x000C, "Friendly Name", &[RegistryValueType::String]);
    /// Location information.
    pub const LOCATION_INFORMATION: RegistryPropertyKey = RegistryPropertyKey::new(
        0x000D,
        "Location Information",
        &[RegistryValueType::String],
    );
    /// Capability flags.
    pub const CAPABILITIES: RegistryPropertyKey =
        RegistryPropertyKey::new(0x000F, "Capabilities", &[RegistryValueType::DoubleWord]);
    /// Upper filter drivers.
    pub const UPPER_FILTERS: RegistryPropertyKey = RegistryPropertyKey::new(
        0x0011,
        "Upper Filters",
        &[RegistryValueType::MultiString],
    );
    /// Lower filter drivers.
    pub const LOWER_FILTERS: RegistryPropertyKey = RegistryPropertyKey::new(
        0x0012,
        "Lower Filters",
        &[RegistryValueType::MultiString],
    );
    /// Bus type identifier, binary form.
    pub const BUS_TYPE_GUID: RegistryPropertyKey =
        RegistryPropertyKey::new(0x0013, "Bus Type GUID", &[RegistryValueType::Binary]);
    /// Bus number.
    pub const BUS_NUMBER: RegistryPropertyKey =
        RegistryPropertyKey::new(0x0015, "Bus Number", &[RegistryValueType::DoubleWord]);
    /// Security descriptor, binary form.
    pub const SECURITY: RegistryPropertyKey =
        RegistryPropertyKey::new(0x0017, "Security", &[RegistryValueType::Binary]);
    /// Device address on the bus.
    pub const ADDRESS: RegistryPropertyKey =
        RegistryPropertyKey::new(0x001C, "Address", &[RegistryValueType::DoubleWord]);
    /// Power data.
    pub const DEVICE_POWER_DATA: RegistryPropertyKey = RegistryPropertyKey::new(
        0x001E,
        "Device Power Data",
        &[RegistryValueType::Binary],
    );
}
