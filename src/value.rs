//! Decoded property values and typed access to them.
//!
//! [`PropertyData`] is the closed set of value shapes a property can
//! decode to. Callers usually don't match on it directly; they ask for a
//! concrete type through [`PropertyData::get`], which walks a fixed list
//! of conversion strategies in priority order:
//!
//! 1. exact variant match, or a checked numeric widening/narrowing cast;
//! 2. reinterpretation of the value's integer form, for enumeration-like
//!    types declared with [`property_enum!`](crate::property_enum);
//! 3. a textual or structural conversion between the stored shape and the
//!    target (string parsing/formatting, binary security descriptors);
//! 4. no path found: the conversion fails with [`ConversionError`].
//!
//! A failure anywhere in the cascade (including numeric overflow) is a
//! conversion failure, never a panic, and never touches the stored value.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ConversionError;

/// Minimum size of a self-relative security descriptor: revision, a
/// reserved byte, control flags and four 32-bit offsets.
const SECURITY_DESCRIPTOR_HEADER_LEN: usize = 20;

/// Control bit set on every self-relative security descriptor.
const SE_SELF_RELATIVE: u16 = 0x8000;

/// A security descriptor held in its self-relative binary form.
///
/// The header (revision, control flags, owner/group/SACL/DACL offsets) is
/// validated on construction; the full byte image is retained so
/// [`binary_form`](Self::binary_form) reproduces the platform encoding
/// bit for bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityDescriptor {
    bytes: Vec<u8>,
}

impl SecurityDescriptor {
    /// Parses a self-relative binary security descriptor.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, ConversionError> {
        if bytes.len() < SECURITY_DESCRIPTOR_HEADER_LEN {
            return Err(ConversionError::BadEncoding(format!(
                "security descriptor too short: {} bytes",
                bytes.len()
            )));
        }

        if bytes[0] != 1 {
            return Err(ConversionError::BadEncoding(format!(
                "unsupported security descriptor revision {}",
                bytes[0]
            )));
        }

        let control = u16::from_le_bytes([bytes[2], bytes[3]]);
        if control & SE_SELF_RELATIVE == 0 {
            return Err(ConversionError::BadEncoding(
                "security descriptor is not self-relative".to_string(),
            ));
        }

        // The four component offsets must be zero (absent) or inside the
        // descriptor image.
        for (index, name) in [(4, "owner"), (8, "group"), (12, "SACL"), (16, "DACL")] {
            let offset =
                u32::from_le_bytes(bytes[index..index + 4].try_into().unwrap()) as usize;
            if offset != 0 && offset >= bytes.len() {
                return Err(ConversionError::BadEncoding(format!(
                    "{name} offset {offset} is outside the descriptor"
                )));
            }
        }

        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Returns the descriptor revision.
    pub fn revision(&self) -> u8 {
        self.bytes[0]
    }

    /// Returns the control flags.
    pub fn control(&self) -> u16 {
        u16::from_le_bytes([self.bytes[2], self.bytes[3]])
    }

    /// Serializes the descriptor back to its self-relative binary form.
    pub fn binary_form(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

/// A decoded property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyData {
    /// Boolean value.
    Bool(bool),
    /// Signed 8-bit integer.
    I8(i8),
    /// Unsigned 8-bit integer.
    U8(u8),
    /// Signed 16-bit integer.
    I16(i16),
    /// Unsigned 16-bit integer.
    U16(u16),
    /// Signed 32-bit integer.
    I32(i32),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// GUID value.
    Guid(Uuid),
    /// String value.
    String(String),
    /// List of strings.
    StringList(Vec<String>),
    /// Opaque byte sequence, also used when no converter is registered
    /// for the value's type tag.
    Binary(Vec<u8>),
    /// Security descriptor in structured form.
    SecurityDescriptor(SecurityDescriptor),
}

impl PropertyData {
    /// Returns the name of the stored value's shape, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyData::Bool(_) => "Bool",
            PropertyData::I8(_) => "I8",
            PropertyData::U8(_) => "U8",
            PropertyData::I16(_) => "I16",
            PropertyData::U16(_) => "U16",
            PropertyData::I32(_) => "I32",
            PropertyData::U32(_) => "U32",
            PropertyData::I64(_) => "I64",
            PropertyData::U64(_) => "U64",
            PropertyData::Guid(_) => "Guid",
            PropertyData::String(_) => "String",
            PropertyData::StringList(_) => "StringList",
            PropertyData::Binary(_) => "Binary",
            PropertyData::SecurityDescriptor(_) => "SecurityDescriptor",
        }
    }

    /// Returns the value converted to `T`.
    pub fn get<T: FromPropertyData>(&self) -> Result<T, ConversionError> {
        T::from_property(self)
    }

    /// Returns the value converted to `T`, or `default` if no conversion
    /// path exists or the conversion fails.
    pub fn get_or<T: FromPropertyData>(&self, default: T) -> T {
        T::from_property(self).unwrap_or(default)
    }

    /// Returns the stored value widened to an `i128`, if it is an integer.
    ///
    /// This is the common first step for the numeric cast strategy; the
    /// caller narrows the result with a checked conversion.
    fn as_i128(&self) -> Option<i128> {
        match self {
            PropertyData::I8(v) => Some(i128::from(*v)),
            PropertyData::U8(v) => Some(i128::from(*v)),
            PropertyData::I16(v) => Some(i128::from(*v)),
            PropertyData::U16(v) => Some(i128::from(*v)),
            PropertyData::I32(v) => Some(i128::from(*v)),
            PropertyData::U32(v) => Some(i128::from(*v)),
            PropertyData::I64(v) => Some(i128::from(*v)),
            PropertyData::U64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    /// Reinterprets the stored integer value as an `i64`.
    ///
    /// This is the enumeration path: the value is taken bit-for-bit
    /// (an out-of-range `u64` wraps), with no validation against any
    /// particular enumeration's members. Fails if the stored value is
    /// not an integer.
    pub fn to_i64(&self) -> Result<i64, ConversionError> {
        match self {
            PropertyData::U64(v) => Ok(*v as i64),
            other => other
                .as_i128()
                .map(|wide| wide as i64)
                .ok_or(ConversionError::UnsupportedTarget {
                    from: other.type_name(),
                    to: "i64",
                }),
        }
    }
}

/// Conversion from a stored [`PropertyData`] value to a concrete type.
///
/// Implementations encode the strategy cascade described in the [module
/// documentation](self) for one target type. The trait is implemented for
/// the primitive integers, `bool`, `String`, `Uuid`, `Vec<String>`,
/// `Vec<u8>` and [`SecurityDescriptor`]; enumeration-like targets get an
/// implementation from [`property_enum!`](crate::property_enum).
pub trait FromPropertyData: Sized {
    /// Converts the stored value, or reports why no path exists.
    fn from_property(data: &PropertyData) -> Result<Self, ConversionError>;
}

macro_rules! integer_from_property {
    ($($t:ty),+) => {
        $(
            impl FromPropertyData for $t {
                fn from_property(data: &PropertyData) -> Result<Self, ConversionError> {
                    // Exact match and widening/narrowing casts share the
                    // checked i128 path; strings get a parse fallback.
                    if let Some(wide) = data.as_i128() {
                        return <$t>::try_from(wide)
                            .map_err(|_| ConversionError::ValueOutOfRange);
                    }

                    if let PropertyData::String(s) = data {
                        return s.trim().parse::<$t>().map_err(|_| {
                            ConversionError::UnsupportedTarget {
                                from: "String",
                                to: stringify!($t),
                            }
                        });
                    }

                    Err(ConversionError::UnsupportedTarget {
                        from: data.type_name(),
                        to: stringify!($t),
                    })
                }
            }
        )+
    };
}

integer_from_property!(i8, u8, i16, u16, i32, u32, i64, u64);

impl FromPropertyData for bool {
    fn from_property(data: &PropertyData) -> Result<Self, ConversionError> {
        match data {
            PropertyData::Bool(v) => Ok(*v),
            PropertyData::String(s) => match s.trim() {
                s if s.eq_ignore_ascii_case("true") => Ok(true),
                s if s.eq_ignore_ascii_case("false") => Ok(false),
                _ => Err(ConversionError::UnsupportedTarget {
                    from: "String",
                    to: "bool",
                }),
            },
            other => Err(ConversionError::UnsupportedTarget {
                from: other.type_name(),
                to: "bool",
            }),
        }
    }
}

impl FromPropertyData for String {
    fn from_property(data: &PropertyData) -> Result<Self, ConversionError> {
        match data {
            PropertyData::String(s) => Ok(s.clone()),
            PropertyData::Bool(v) => Ok(v.to_string()),
            PropertyData::I8(v) => Ok(v.to_string()),
            PropertyData::U8(v) => Ok(v.to_string()),
            PropertyData::I16(v) => Ok(v.to_string()),
            PropertyData::U16(v) => Ok(v.to_string()),
            PropertyData::I32(v) => Ok(v.to_string()),
            PropertyData::U32(v) => Ok(v.to_string()),
            PropertyData::I64(v) => Ok(v.to_string()),
            PropertyData::U64(v) => Ok(v.to_string()),
            PropertyData::Guid(v) => Ok(v.to_string()),
            other => Err(ConversionError::UnsupportedTarget {
                from: other.type_name(),
                to: "String",
            }),
        }
    }
}

impl FromPropertyData for Uuid {
    fn from_property(data: &PropertyData) -> Result<Self, ConversionError> {
        match data {
            PropertyData::Guid(v) => Ok(*v),
            PropertyData::String(s) => {
                Uuid::parse_str(s.trim().trim_start_matches('{').trim_end_matches('}')).map_err(
                    |_| ConversionError::UnsupportedTarget {
                        from: "String",
                        to: "Uuid",
                    },
                )
            }
            other => Err(ConversionError::UnsupportedTarget {
                from: other.type_name(),
                to: "Uuid",
            }),
        }
    }
}

impl FromPropertyData for Vec<String> {
    fn from_property(data: &PropertyData) -> Result<Self, ConversionError> {
        match data {
            PropertyData::StringList(v) => Ok(v.clone()),
            other => Err(ConversionError::UnsupportedTarget {
                from: other.type_name(),
                to: "Vec<String>",
            }),
        }
    }
}

impl FromPropertyData for Vec<u8> {
    fn from_property(data: &PropertyData) -> Result<Self, ConversionError> {
        match data {
            PropertyData::Binary(v) => Ok(v.clone()),
            other => Err(ConversionError::UnsupportedTarget {
                from: other.type_name(),
                to: "Vec<u8>",
            }),
        }
    }
}

impl FromPropertyData for SecurityDescriptor {
    fn from_property(data: &PropertyData) -> Result<Self, ConversionError> {
        match data {
            PropertyData::SecurityDescriptor(v) => Ok(v.clone()),
            PropertyData::Binary(bytes) => SecurityDescriptor::from_binary(bytes),
            other => Err(ConversionError::UnsupportedTarget {
                from: other.type_name(),
                to: "SecurityDescriptor",
            }),
        }
    }
}

/// Declares a flags/enumeration type convertible from a property value.
///
/// The declared type is a transparent newtype over its integer
/// representation with the named values as associated constants. It gets
/// a [`FromPropertyData`] implementation that reinterprets the stored
/// value's integer form, with no validation that the result matches a
/// named value (combined flag bits are valid).
///
/// ```
/// devprops::property_enum! {
///     /// Removal policy reported for a device.
///     pub struct RemovalPolicy: u32 {
///         const EXPECT_NO_REMOVAL = 1;
///         const EXPECT_ORDERLY_REMOVAL = 2;
///         const EXPECT_SURPRISE_REMOVAL = 3;
///     }
/// }
///
/// use devprops::PropertyData;
/// let data = PropertyData::U32(2);
/// assert_eq!(
///     data.get::<RemovalPolicy>().unwrap(),
///     RemovalPolicy::EXPECT_ORDERLY_REMOVAL
/// );
/// ```
#[macro_export]
macro_rules! property_enum {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $repr:ty {
            $(
                $(#[$vmeta:meta])*
                const $variant:ident = $value:expr;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name($repr);

        impl $name {
            $(
                $(#[$vmeta])*
                $vis const $variant: Self = Self($value);
            )*

            /// Creates a value from its raw representation.
            ///
            /// Any bit pattern is accepted.
            $vis const fn from_raw(raw: $repr) -> Self {
                Self(raw)
            }

            /// Returns the raw representation.
            $vis const fn raw(self) -> $repr {
                self.0
            }

            /// Returns `true` if every bit of `flag` is set in `self`.
            $vis const fn contains(self, flag: Self) -> bool {
                (self.0 & flag.0) == flag.0
            }
        }

        impl $crate::FromPropertyData for $name {
            fn from_property(
                data: &$crate::PropertyData,
            ) -> Result<Self, $crate::ConversionError> {
                Ok(Self(data.to_i64()? as $repr))
            }
        }
    };
}
