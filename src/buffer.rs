//! Growable raw-memory buffer exchanged with the property source.
//!
//! A [`Buffer`] separates the bytes it has physically reserved (the
//! allocated capacity, always a multiple of [`ALLOCATION_GRANULARITY`])
//! from the bytes it advertises as valid (the apparent length). The
//! retrieval protocol grows a buffer to whatever size the source reports,
//! lets the source fill it, then truncates it down to the bytes actually
//! used.
//!
//! Growing a buffer past its capacity deliberately does *not* preserve the
//! old contents: the protocol only ever grows into memory that the next
//! source call will overwrite in full, so the old allocation is dropped
//! and a fresh one is taken. Truncation, by contrast, never touches the
//! allocation at all.

use crate::error::BufferError;

/// Memory is always reserved in multiples of this size, in bytes.
pub const ALLOCATION_GRANULARITY: usize = 16;

/// Maximum number of bytes a single buffer may reserve.
pub const MAX_ALLOCATION_SIZE: usize = 0x3FFF_FFFF;

/// A fixed-layout record that can be bound into a [`Buffer`].
///
/// Binding encodes the record into the buffer and tags the buffer so that
/// later resizes know to release the record first and truncation is
/// rejected outright.
pub trait FixedRecord {
    /// Exact size of the encoded record, in bytes.
    fn encoded_size(&self) -> usize;

    /// Encodes the record into `out`, which is exactly
    /// [`encoded_size`](Self::encoded_size) bytes long.
    fn encode_into(&self, out: &mut [u8]);
}

/// An owned, resizable block of raw memory.
///
/// See the [module documentation](self) for the capacity/length split and
/// the non-preserving growth rule.
#[derive(Debug, Default)]
pub struct Buffer {
    /// Reserved memory. `data.len()` is the allocated capacity.
    data: Vec<u8>,
    /// Bytes currently advertised as valid.
    len: usize,
    /// Set while the buffer holds an encoded fixed-layout record.
    record_tag: Option<&'static str>,
}

impl Buffer {
    /// Creates a new, empty buffer. No memory is reserved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer with an apparent length of `size` bytes.
    pub fn with_size(size: usize) -> Result<Self, BufferError> {
        let mut buffer = Self::new();
        buffer.resize(size)?;
        Ok(buffer)
    }

    /// Creates a buffer holding a copy of `value`.
    pub fn from_bytes(value: &[u8]) -> Result<Self, BufferError> {
        let mut buffer = Self::new();
        buffer.write_bytes(value)?;
        Ok(buffer)
    }

    /// Returns the apparent length of the buffer, in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the apparent length is zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of bytes physically reserved.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the tag of the bound record, if one is bound.
    pub fn record_tag(&self) -> Option<&'static str> {
        self.record_tag
    }

    /// Resizes the buffer to `len` bytes.
    ///
    /// If `len` exceeds the current capacity, the existing allocation is
    /// released and a fresh one is reserved, sized to `len` rounded up to
    /// the next multiple of [`ALLOCATION_GRANULARITY`]. The old contents
    /// are **not** carried over on that path. The apparent length is set
    /// to `len` unconditionally.
    ///
    /// Any bound record is released and its tag cleared before resizing.
    pub fn resize(&mut self, len: usize) -> Result<(), BufferError> {
        if len > MAX_ALLOCATION_SIZE {
            return Err(BufferError::InvalidLength(len));
        }

        self.record_tag = None;

        // Growth path: drop the old allocation and take a rounded-up
        // fresh one. Contents are deliberately not preserved.
        if len > self.data.len() {
            let granules = len.div_ceil(ALLOCATION_GRANULARITY);
            self.data = vec![0u8; granules * ALLOCATION_GRANULARITY];
        }

        self.len = len;
        Ok(())
    }

    /// Truncates the apparent length to `len` bytes.
    ///
    /// The allocation and its contents are untouched; only the apparent
    /// length shrinks. Fails if `len` exceeds the current apparent length
    /// or if a record is bound.
    pub fn truncate(&mut self, len: usize) -> Result<(), BufferError> {
        if len > self.len {
            return Err(BufferError::InvalidLength(len));
        }

        if self.record_tag.is_some() {
            return Err(BufferError::RecordBound);
        }

        self.len = len;
        Ok(())
    }

    /// Releases the allocation, releasing any bound record first.
    ///
    /// Capacity and apparent length are reset to zero. Idempotent.
    pub fn free(&mut self) {
        self.record_tag = None;
        self.data = Vec::new();
        self.len = 0;
    }

    /// Returns a copy of the buffer's valid bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.data[..self.len].to_vec()
    }

    /// Returns a copy of `length` bytes starting at `offset`.
    ///
    /// Fails if the requested window extends past the apparent length.
    pub fn bytes_at(&self, offset: usize, length: usize) -> Result<Vec<u8>, BufferError> {
        let end = offset
            .checked_add(length)
            .ok_or(BufferError::InvalidLength(length))?;
        if end > self.len {
            return Err(BufferError::OutOfRange {
                offset,
                length,
                available: self.len,
            });
        }

        Ok(self.data[offset..end].to_vec())
    }

    /// Returns the valid bytes as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Returns the valid bytes as a mutable slice, for the property source
    /// to fill.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data[..self.len]
    }

    /// Replaces the buffer contents with a copy of `value`.
    ///
    /// The buffer is resized to exactly `value.len()`, discarding the
    /// prior contents.
    pub fn write_bytes(&mut self, value: &[u8]) -> Result<(), BufferError> {
        self.write_bytes_from(value, 0, value.len())
    }

    /// Replaces the buffer contents with `length` bytes taken from
    /// `value` starting at `offset`.
    ///
    /// The buffer is resized to exactly `length`, discarding the prior
    /// contents.
    pub fn write_bytes_from(
        &mut self,
        value: &[u8],
        offset: usize,
        length: usize,
    ) -> Result<(), BufferError> {
        let end = offset
            .checked_add(length)
            .ok_or(BufferError::InvalidLength(length))?;
        if end > value.len() {
            return Err(BufferError::OutOfRange {
                offset,
                length,
                available: value.len(),
            });
        }

        self.resize(length)?;
        self.data[..length].copy_from_slice(&value[offset..end]);
        Ok(())
    }

    /// Encodes a fixed-layout record into the buffer and binds it.
    ///
    /// The buffer is resized to the record's exact encoded size, the
    /// encoding is copied in, and the record tag is set so later resizes
    /// release the record first and truncation is rejected.
    pub fn bind_record<R: FixedRecord>(&mut self, value: &R) -> Result<(), BufferError> {
        let size = value.encoded_size();
        self.resize(size)?;
        value.encode_into(&mut self.data[..size]);
        self.record_tag = Some(std::any::type_name::<R>());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRecord {
        a: u32,
        b: u64,
    }

    impl FixedRecord for TestRecord {
        fn encoded_size(&self) -> usize {
            12
        }

        fn encode_into(&self, out: &mut [u8]) {
            out[0..4].copy_from_slice(&self.a.to_le_bytes());
            out[4..12].copy_from_slice(&self.b.to_le_bytes());
        }
    }

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = Buffer::new();
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_capacity_rounded_to_granularity() {
        let mut buffer = Buffer::new();
        for len in [1, 15, 16, 17, 100, 255] {
            buffer.resize(len).unwrap();
            assert_eq!(buffer.len(), len);
            assert_eq!(buffer.capacity() % ALLOCATION_GRANULARITY, 0);
            assert!(buffer.capacity() >= len);
        }
    }

    #[test]
    fn test_resize_below_capacity_keeps_allocation() {
        let mut buffer = Buffer::with_size(100).unwrap();
        let capacity = buffer.capacity();

        buffer.resize(10).unwrap();
        assert_eq!(buffer.len(), 10);
        assert_eq!(buffer.capacity(), capacity);
    }

    #[test]
    fn test_resize_rejects_oversized_length() {
        let mut buffer = Buffer::new();
        match buffer.resize(MAX_ALLOCATION_SIZE + 1) {
            Err(BufferError::InvalidLength(_)) => {}
            other => panic!("Expected InvalidLength, got {other:?}"),
        }
    }

    #[test]
    fn test_growth_does_not_preserve_contents() {
        let mut buffer = Buffer::from_bytes(&[0xAA; 16]).unwrap();
        let capacity = buffer.capacity();

        buffer.resize(capacity + 1).unwrap();
        assert!(buffer.as_slice()[..16].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_truncate_shrinks_apparent_length_only() {
        let mut buffer = Buffer::from_bytes(&[1, 2, 3, 4, 5]).unwrap();
        let capacity = buffer.capacity();

        buffer.truncate(2).unwrap();
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.capacity(), capacity);
        assert_eq!(buffer.bytes(), vec![1, 2]);
    }

    #[test]
    fn test_truncate_never_grows() {
        let mut buffer = Buffer::with_size(8).unwrap();
        match buffer.truncate(9) {
            Err(BufferError::InvalidLength(9)) => {}
            other => panic!("Expected InvalidLength, got {other:?}"),
        }
        assert_eq!(buffer.len(), 8);
    }

    #[test]
    fn test_free_is_idempotent() {
        let mut buffer = Buffer::with_size(64).unwrap();
        buffer.free();
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 0);
        buffer.free();
        assert_eq!(buffer.capacity(), 0);
    }

    #[test]
    fn test_bytes_at_rejects_out_of_range_window() {
        let buffer = Buffer::from_bytes(&[1, 2, 3]).unwrap();
        match buffer.bytes_at(2, 2) {
            Err(BufferError::OutOfRange { available: 3, .. }) => {}
            other => panic!("Expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_bytes_at_copies_window() {
        let buffer = Buffer::from_bytes(&[1, 2, 3, 4]).unwrap();
        assert_eq!(buffer.bytes_at(1, 2).unwrap(), vec![2, 3]);
        assert_eq!(buffer.bytes_at(4, 0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_write_bytes_from_validates_source_window() {
        let mut buffer = Buffer::new();
        match buffer.write_bytes_from(&[1, 2, 3], 2, 2) {
            Err(BufferError::OutOfRange { .. }) => {}
            other => panic!("Expected OutOfRange, got {other:?}"),
        }

        buffer.write_bytes_from(&[1, 2, 3, 4], 1, 2).unwrap();
        assert_eq!(buffer.bytes(), vec![2, 3]);
    }

    #[test]
    fn test_bind_record_sets_tag_and_blocks_truncate() {
        let mut buffer = Buffer::new();
        buffer.bind_record(&TestRecord { a: 7, b: 9 }).unwrap();

        assert_eq!(buffer.len(), 12);
        assert!(buffer.record_tag().is_some());
        assert_eq!(&buffer.as_slice()[0..4], &7u32.to_le_bytes());

        match buffer.truncate(4) {
            Err(BufferError::RecordBound) => {}
            other => panic!("Expected RecordBound, got {other:?}"),
        }
    }

    #[test]
    fn test_resize_releases_bound_record() {
        let mut buffer = Buffer::new();
        buffer.bind_record(&TestRecord { a: 1, b: 2 }).unwrap();

        buffer.resize(4).unwrap();
        assert!(buffer.record_tag().is_none());
        buffer.truncate(0).unwrap();
    }

    #[test]
    fn test_invariants_hold_across_operation_sequences() {
        let mut buffer = Buffer::new();
        let lengths = [3usize, 64, 1, 0, 40, 17, 16, 129];

        for &len in &lengths {
            buffer.resize(len).unwrap();
            assert!(buffer.len() <= buffer.capacity());
            assert_eq!(buffer.capacity() % ALLOCATION_GRANULARITY, 0);

            let half = len / 2;
            buffer.truncate(half).unwrap();
            assert!(buffer.len() <= buffer.capacity());
        }

        buffer.free();
        assert_eq!(buffer.capacity() % ALLOCATION_GRANULARITY, 0);
    }
}
