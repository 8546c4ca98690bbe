use std::fmt;

/// Errors raised by misuse of a [`Buffer`](crate::Buffer).
///
/// These are programmer errors: they indicate an out-of-range length or
/// offset, or an operation that is illegal while a fixed-layout record is
/// bound to the buffer. They are never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// A requested length is negative-equivalent (overflowing) or exceeds
    /// the maximum allocation size.
    InvalidLength(usize),
    /// A read window falls outside the buffer's apparent length.
    OutOfRange {
        /// Start of the requested window.
        offset: usize,
        /// Length of the requested window.
        length: usize,
        /// Apparent length of the buffer at the time of the request.
        available: usize,
    },
    /// The operation is not permitted while a fixed-layout record is bound.
    RecordBound,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::InvalidLength(len) => {
                write!(f, "invalid buffer length: {len}")
            }
            BufferError::OutOfRange {
                offset,
                length,
                available,
            } => {
                write!(
                    f,
                    "range {offset}..{} is outside the buffer (apparent length {available})",
                    offset + length
                )
            }
            BufferError::RecordBound => {
                write!(f, "operation not permitted while a record is bound")
            }
        }
    }
}

impl std::error::Error for BufferError {}

/// Failure reasons reported by a [`PropertySource`](crate::PropertySource).
///
/// `InsufficientBuffer` is transient and drives the retry protocol; it is
/// never surfaced through the public retrieval API. `NotFound` becomes a
/// soft "no value" result. Everything else is fatal to the current call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The supplied buffer is too small; `required` is the size the source
    /// needs, in bytes.
    InsufficientBuffer {
        /// Required buffer size reported by the source.
        required: usize,
    },
    /// The property does not exist for this entity.
    NotFound,
    /// The caller lacks the rights needed to read the property.
    AccessDenied {
        /// Native error code reported by the platform.
        code: i32,
    },
    /// Any other native failure.
    Platform {
        /// Native error code reported by the platform.
        code: i32,
        /// Resolved human-readable message for the code.
        message: String,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::InsufficientBuffer { required } => {
                write!(f, "buffer too small, {required} bytes required")
            }
            SourceError::NotFound => write!(f, "property not found"),
            SourceError::AccessDenied { code } => {
                write!(f, "access denied (native error {code})")
            }
            SourceError::Platform { code, message } => {
                write!(f, "native error {code}: {message}")
            }
        }
    }
}

impl std::error::Error for SourceError {}

/// Errors surfaced by the property retrieval protocol.
///
/// A missing property is not an error: [`PropertyValue::read`] reports it
/// as `Ok(false)` and the cache as `Ok(None)`.
///
/// [`PropertyValue::read`]: crate::PropertyValue::read
#[derive(Debug)]
pub enum PropertyError {
    /// The caller lacks the rights needed to read the property.
    AccessDenied {
        /// Native error code reported by the platform.
        code: i32,
    },
    /// An unrecoverable native failure, annotated with the underlying
    /// error code and resolved message.
    Platform {
        /// Native error code reported by the platform.
        code: i32,
        /// Resolved human-readable message for the code.
        message: String,
    },
    /// A buffer operation failed while servicing the read.
    Buffer(BufferError),
    /// The retrieved bytes could not be decoded as the reported value
    /// type.
    Conversion(ConversionError),
    /// The retry cap of a [`RetryPolicy::Limited`] was reached while the
    /// source kept reporting an insufficient buffer.
    ///
    /// [`RetryPolicy::Limited`]: crate::RetryPolicy::Limited
    RetryExhausted {
        /// Number of source calls performed before giving up.
        attempts: u32,
    },
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyError::AccessDenied { code } => {
                write!(
                    f,
                    "insufficient rights to read the property (native error {code})"
                )
            }
            PropertyError::Platform { code, message } => {
                write!(f, "unable to read the property: native error {code}: {message}")
            }
            PropertyError::Buffer(e) => write!(f, "buffer error: {e}"),
            PropertyError::Conversion(e) => write!(f, "conversion error: {e}"),
            PropertyError::RetryExhausted { attempts } => {
                write!(f, "source still reported an insufficient buffer after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for PropertyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PropertyError::Buffer(e) => Some(e),
            PropertyError::Conversion(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BufferError> for PropertyError {
    fn from(err: BufferError) -> Self {
        PropertyError::Buffer(err)
    }
}

impl From<ConversionError> for PropertyError {
    fn from(err: ConversionError) -> Self {
        PropertyError::Conversion(err)
    }
}

/// Errors raised when converting between property encodings and typed
/// values.
///
/// Conversion failures are recoverable: they affect only the single
/// `get` call and never corrupt a cached value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// No conversion path exists between the stored value and the
    /// requested type.
    UnsupportedTarget {
        /// Name of the stored value's type.
        from: &'static str,
        /// Name of the requested type.
        to: &'static str,
    },
    /// A numeric conversion overflowed or underflowed the target type.
    ValueOutOfRange,
    /// The raw bytes are not a valid encoding for the expected type.
    BadEncoding(String),
    /// A buffer operation failed mid-conversion.
    Buffer(BufferError),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::UnsupportedTarget { from, to } => {
                write!(f, "cannot convert a {from} value to {to}")
            }
            ConversionError::ValueOutOfRange => {
                write!(f, "value is out of range for the target type")
            }
            ConversionError::BadEncoding(msg) => write!(f, "bad encoding: {msg}"),
            ConversionError::Buffer(e) => write!(f, "buffer error: {e}"),
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConversionError::Buffer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BufferError> for ConversionError {
    fn from(err: BufferError) -> Self {
        ConversionError::Buffer(err)
    }
}
