use anyhow::Result;
use devprops::{
    keys, Buffer, ConfigFlags, Converters, Device, DeviceInterface, InterfaceFlags, PropertyKey,
    PropertySource, PropertyType, RegistryPropertyKey, RegistryValueType, SourceError, SourceRead,
};
use std::collections::HashMap;
use uuid::{uuid, Uuid};

/// Serves both property families from fixed tables.
struct FakeBackend {
    keyed: HashMap<PropertyKey, (PropertyType, Vec<u8>)>,
    registry: HashMap<RegistryPropertyKey, (RegistryValueType, Vec<u8>)>,
}

fn serve<T: Copy>(
    entry: Option<&(T, Vec<u8>)>,
    buffer: &mut Buffer,
) -> Result<SourceRead<T>, SourceError> {
    let (value_type, bytes) = entry.ok_or(SourceError::NotFound)?;
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

impl PropertySource<PropertyKey, PropertyType> for FakeBackend {
    fn read(
        &self,
        key: &PropertyKey,
        buffer: &mut Buffer,
    ) -> Result<SourceRead<PropertyType>, SourceError> {
        serve(self.keyed.get(key), buffer)
    }
}

impl PropertySource<RegistryPropertyKey, RegistryValueType> for FakeBackend {
    fn read(
        &self,
        key: &RegistryPropertyKey,
        buffer: &mut Buffer,
    ) -> Result<SourceRead<RegistryValueType>, SourceError> {
        serve(self.registry.get(key), buffer)
    }
}

fn utf16(s: &str) -> Vec<u8> {
    s.encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(u16::to_le_bytes)
        .collect()
}

const HID_CLASS: Uuid = uuid!("4d1e55b2-f16f-11cf-88cb-001111000030");

fn mouse_backend() -> FakeBackend {
    let mut keyed = HashMap::new();
    keyed.insert(keys::NAME, (PropertyType::String, utf16("USB Mouse")));
    keyed.insert(
        keys::device::INSTANCE_ID,
        (PropertyType::String, utf16("USB\\VID_046D&PID_C077\\7")),
    );
    keyed.insert(
        keys::device::FRIENDLY_NAME,
        (PropertyType::String, utf16("Gaming Mouse")),
    );
    keyed.insert(
        keys::device::HARDWARE_IDS,
        (PropertyType::StringList, {
            let mut bytes = utf16("USB\\VID_046D&PID_C077");
            bytes.extend([0, 0]);
            bytes
        }),
    );
    keyed.insert(
        keys::interface::CLASS_GUID,
        (PropertyType::Guid, HID_CLASS.to_bytes_le().to_vec()),
    );
    keyed.insert(keys::interface::ENABLED, (PropertyType::Boolean, vec![0x01]));

    let mut registry = HashMap::new();
    registry.insert(
        keys::registry::CONFIG_FLAGS,
        (RegistryValueType::DoubleWord, vec![0, 0, 0, 0]),
    );
    registry.insert(
        keys::registry::FRIENDLY_NAME,
        (RegistryValueType::String, utf16("Gaming Mouse")),
    );

    FakeBackend { keyed, registry }
}

#[test]
fn test_device_name_and_instance_id() -> Result<()> {
    let mut device = Device::new(mouse_backend(), Converters::with_defaults());

    assert_eq!(device.name()?.as_deref(), Some("USB Mouse"));
    assert_eq!(
        device.instance_id()?.as_deref(),
        Some("USB\\VID_046D&PID_C077\\7")
    );
    assert_eq!(device.friendly_name()?.as_deref(), Some("Gaming Mouse"));
    Ok(())
}

#[test]
fn test_device_is_enabled_from_registry_flags() -> Result<()> {
    let mut device = Device::new(mouse_backend(), Converters::with_defaults());
    assert_eq!(device.is_enabled()?, Some(true));

    let mut backend = mouse_backend();
    backend.registry.insert(
        keys::registry::CONFIG_FLAGS,
        (
            RegistryValueType::DoubleWord,
            ConfigFlags::DISABLED.raw().to_le_bytes().to_vec(),
        ),
    );
    let mut device = Device::new(backend, Converters::with_defaults());
    assert_eq!(device.is_enabled()?, Some(false));
    Ok(())
}

#[test]
fn test_device_serves_both_property_families() -> Result<()> {
    let mut device = Device::new(mouse_backend(), Converters::with_defaults());

    let hardware_ids = device
        .property(keys::device::HARDWARE_IDS, false)?
        .expect("hardware ids published")
        .get::<Vec<String>>()?;
    assert_eq!(hardware_ids, vec!["USB\\VID_046D&PID_C077".to_string()]);

    let friendly = device
        .registry_property(keys::registry::FRIENDLY_NAME, false)?
        .expect("friendly name published")
        .get::<String>()?;
    assert_eq!(friendly, "Gaming Mouse");
    Ok(())
}

#[test]
fn test_device_refresh_reports_no_failures_for_healthy_source() -> Result<()> {
    let mut device = Device::new(mouse_backend(), Converters::with_defaults());
    device.name()?;
    device.is_enabled()?;

    assert!(device.refresh().is_empty());
    Ok(())
}

#[test]
fn test_interface_flags_and_properties() -> Result<()> {
    let mut interface = DeviceInterface::new(
        mouse_backend(),
        Converters::with_defaults(),
        InterfaceFlags::ACTIVE,
    );
    assert!(interface.is_active());
    assert!(!interface.is_default());
    assert!(!interface.is_removed());

    assert_eq!(interface.is_enabled()?, Some(true));
    assert_eq!(interface.interface_class_id()?, Some(HID_CLASS));
    Ok(())
}

#[test]
fn test_missing_properties_come_back_as_none() -> Result<()> {
    let empty = FakeBackend {
        keyed: HashMap::new(),
        registry: HashMap::new(),
    };
    let mut device = Device::new(empty, Converters::with_defaults());

    assert_eq!(device.name()?, None);
    assert_eq!(device.friendly_name()?, None);
    assert_eq!(device.is_enabled()?, None);
    Ok(())
}
