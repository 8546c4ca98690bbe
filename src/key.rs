//! Property keys for the two property namespaces.
//!
//! A key's identity is its native identifier alone: the `(format_id,
//! property_id)` pair for keyed properties, the numeric code for registry
//! properties. The human-readable name and the advisory list of expected
//! value types are documentation and take no part in equality or hashing.

use std::fmt;
use std::hash::{Hash, Hasher};

use uuid::Uuid;

use crate::property_type::{PropertyType, RegistryValueType};

/// Identifies a keyed device or device-interface property.
///
/// Keys are normally process-wide constants from the
/// [`keys`](crate::keys) catalog, but callers may construct their own for
/// properties the catalog does not cover.
#[derive(Debug, Clone, Copy)]
pub struct PropertyKey {
    format_id: Uuid,
    property_id: u32,
    name: &'static str,
    expected_types: &'static [PropertyType],
}

impl PropertyKey {
    /// Creates a new property key.
    ///
    /// `expected_types` is advisory: it documents the value types the
    /// platform is known to return for this key and is not enforced when
    /// reading.
    pub const fn new(
        format_id: Uuid,
        property_id: u32,
        name: &'static str,
        expected_types: &'static [PropertyType],
    ) -> Self {
        Self {
            format_id,
            property_id,
            name,
            expected_types,
        }
    }

    /// Returns the format (namespace) identifier.
    pub fn format_id(&self) -> Uuid {
        self.format_id
    }

    /// Returns the property identifier within the format namespace.
    pub fn property_id(&self) -> u32 {
        self.property_id
    }

    /// Returns the human-readable name of the property.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the value types the platform is expected to report for
    /// this key.
    pub fn expected_types(&self) -> &'static [PropertyType] {
        self.expected_types
    }
}

impl PartialEq for PropertyKey {
    fn eq(&self, other: &Self) -> bool {
        self.format_id == other.format_id && self.property_id == other.property_id
    }
}

impl Eq for PropertyKey {}

impl Hash for PropertyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.format_id.hash(state);
        self.property_id.hash(state);
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.format_id, self.property_id)
    }
}

/// Identifies a registry-backed device property by its numeric code.
#[derive(Debug, Clone, Copy)]
pub struct RegistryPropertyKey {
    code: u32,
    name: &'static str,
    expected_types: &'static [RegistryValueType],
}

impl RegistryPropertyKey {
    /// Creates a new registry property key.
    pub const fn new(
        code: u32,
        name: &'static str,
        expected_types: &'static [RegistryValueType],
    ) -> Self {
        Self {
            code,
            name,
            expected_types,
        }
    }

    /// Returns the native property code.
    pub fn code(&self) -> u32 {
        self.code
    }

    /// Returns the human-readable name of the property.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the value types the platform is expected to report for
    /// this key.
    pub fn expected_types(&self) -> &'static [RegistryValueType] {
        self.expected_types
    }
}

impl PartialEq for RegistryPropertyKey {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for RegistryPropertyKey {}

impl Hash for RegistryPropertyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for RegistryPropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#06x})", self.name, self.code)
    }
}
