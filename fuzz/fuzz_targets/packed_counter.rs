#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::PackedCounter;

fuzz_target!(|data: &[u8]| {
    // Up to six 8-byte lengths; the sixth must always be rejected.
    let lengths: Vec<u64> = data
        .chunks_exact(8)
        .take(6)
        .map(|chunk| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            u64::from_be_bytes(bytes) >> (data[0] % 40)
        })
        .collect();

    match PackedCounter::encode(&lengths) {
        Ok(counter) => {
            assert!(lengths.len() <= 5);
            assert_eq!(counter.total(), lengths.iter().sum::<u64>());
            for (i, length) in lengths.iter().enumerate() {
                assert_eq!(counter.field_length(i), Some(*length));
            }
        }
        Err(_) => {
            assert!(lengths.len() > 5 || lengths.iter().any(|l| *l > wire::MAX_FIELD_LENGTH));
        }
    }
});
