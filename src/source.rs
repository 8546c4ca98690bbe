//! The seam between property retrieval and the backing store.
//!
//! A [`PropertySource`] answers a single question: given a key and a
//! caller-owned buffer, fill the buffer with the property's raw bytes
//! and report its type tag and size. The retrieval loop in
//! [`PropertyValue::read`](crate::property::PropertyValue::read) drives
//! the probe-and-retry protocol on top of this trait; sources only have
//! to translate their backend's size feedback into
//! [`SourceError::InsufficientBuffer`].

use crate::buffer::Buffer;
use crate::error::SourceError;

/// The outcome of a successful source read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRead<T> {
    /// The type tag the backend reported for the value.
    pub value_type: T,
    /// How many bytes of the buffer the backend actually used.
    pub size: usize,
}

/// A backend that can fill a buffer with a property's raw bytes.
///
/// `K` is the key family and `T` the type-tag family, so one source can
/// serve keyed properties (GUID + id keys, rich type tags) and another
/// registry-backed properties (numeric codes, registry value types).
///
/// Implementations must honor the probe convention: when called with a
/// buffer too small for the value, including the zero-length probe
/// buffer, they return [`SourceError::InsufficientBuffer`] carrying the
/// exact number of bytes required. They must not write past the buffer's
/// capacity.
pub trait PropertySource<K, T> {
    /// Reads the property identified by `key` into `buffer`.
    fn read(&self, key: &K, buffer: &mut Buffer) -> Result<SourceRead<T>, SourceError>;
}

/// Bounds the resize-and-retry loop of a property read.
///
/// The platform's size feedback is taken at face value by default: a
/// well-behaved backend reports the exact required size, so the second
/// attempt succeeds and an unbounded loop terminates. `Limited` guards
/// against a backend whose reported size keeps growing, at the cost of
/// failing reads of genuinely volatile values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Retry for as long as the source keeps asking for a larger buffer.
    #[default]
    Unbounded,
    /// Give up after this many attempts.
    Limited(u32),
}

impl RetryPolicy {
    /// Whether another attempt is allowed after `attempts` tries.
    pub(crate) fn allows(&self, attempts: u32) -> bool {
        match self {
            RetryPolicy::Unbounded => true,
            RetryPolicy::Limited(max) => attempts < *max,
        }
    }
}
