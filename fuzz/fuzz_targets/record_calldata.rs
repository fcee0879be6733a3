#![no_main]

use calldata::{KeyTuple, RecordParts, TableCallBuilder};
use libfuzzer_sys::fuzz_target;
use packed::PackedValue;
use wire::ResourceId;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let key_len = usize::from(data[0] % 4);
    let dynamic_count = usize::from(data[1] % 7);
    let rest = &data[2..];

    let key: Vec<PackedValue> = rest.iter().take(key_len).map(|b| PackedValue::U8(*b)).collect();
    let static_values: Vec<PackedValue> = rest.iter().take(8).map(|b| PackedValue::U16(u16::from(*b))).collect();
    let dynamic_values: Vec<PackedValue> = rest
        .chunks(rest.len().div_ceil(dynamic_count.max(1)).max(1))
        .take(dynamic_count)
        .map(|chunk| PackedValue::Bytes(chunk.to_vec()))
        .collect();

    let Ok(key) = KeyTuple::from_values(&key) else {
        return;
    };
    let record = match RecordParts::encode(&static_values, &dynamic_values) {
        Ok(record) => record,
        Err(_) => {
            assert!(dynamic_values.len() > 5);
            return;
        }
    };

    let table = ResourceId::table("fuzz", "Record");
    let call = TableCallBuilder::new()
        .build_record(&table, &key, &record)
        .expect("default encoder builds aligned calldata");
    assert_eq!((call.len() - 4) % 32, 0);
    assert_eq!(record.encoded_lengths.total() as usize, record.dynamic_data.len());
});
