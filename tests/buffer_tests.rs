use devprops::{Buffer, BufferError, ALLOCATION_GRANULARITY, MAX_ALLOCATION_SIZE};
use rand::Rng;

#[test]
fn test_invariants_hold_under_random_operation_sequences() {
    let mut rng = rand::rng();
    let mut buffer = Buffer::new();

    for _ in 0..2_000 {
        match rng.random_range(0..4) {
            0 => {
                let len = rng.random_range(0..4096);
                buffer.resize(len).unwrap();
                assert_eq!(buffer.len(), len);
            }
            1 => {
                let len = rng.random_range(0..=buffer.len());
                buffer.truncate(len).unwrap();
                assert_eq!(buffer.len(), len);
            }
            2 => {
                let len = rng.random_range(0..256);
                let payload = vec![0x5Au8; len];
                buffer.write_bytes(&payload).unwrap();
                assert_eq!(buffer.bytes(), payload);
            }
            _ => buffer.free(),
        }

        assert!(buffer.len() <= buffer.capacity());
        assert_eq!(buffer.capacity() % ALLOCATION_GRANULARITY, 0);
        assert!(buffer.capacity() <= MAX_ALLOCATION_SIZE + ALLOCATION_GRANULARITY);
    }
}

#[test]
fn test_truncate_past_length_fails_under_random_lengths() {
    let mut rng = rand::rng();

    for _ in 0..100 {
        let len = rng.random_range(0..1024);
        let mut buffer = Buffer::with_size(len).unwrap();
        match buffer.truncate(len + 1 + rng.random_range(0..64)) {
            Err(BufferError::InvalidLength(_)) => {}
            other => panic!("Expected InvalidLength, got {other:?}"),
        }
        assert_eq!(buffer.len(), len);
    }
}
