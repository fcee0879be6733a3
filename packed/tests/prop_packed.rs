use packed::{encode_packed, PackedValue, ScalarKind, U256};
use proptest::prelude::*;

fn scalar_strategy() -> impl Strategy<Value = PackedValue> {
    prop_oneof![
        any::<u8>().prop_map(PackedValue::U8),
        any::<u16>().prop_map(PackedValue::U16),
        any::<u32>().prop_map(PackedValue::U32),
        any::<u64>().prop_map(PackedValue::U64),
        any::<i8>().prop_map(PackedValue::I8),
        any::<i16>().prop_map(PackedValue::I16),
        any::<i32>().prop_map(PackedValue::I32),
        any::<i64>().prop_map(PackedValue::I64),
        any::<bool>().prop_map(PackedValue::Bool),
        any::<[u8; 32]>().prop_map(|bytes| PackedValue::U256(U256::from_be_bytes(bytes))),
        prop::collection::vec(any::<u8>(), 0..48).prop_map(PackedValue::Bytes),
    ]
}

fn value_strategy() -> impl Strategy<Value = PackedValue> {
    scalar_strategy().prop_recursive(3, 32, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(PackedValue::Array)
    })
}

proptest! {
    #[test]
    fn prop_u8_is_identity(n in any::<u8>()) {
        prop_assert_eq!(encode_packed(&[PackedValue::U8(n)]), vec![n]);
    }

    #[test]
    fn prop_bool_is_one_byte(b in any::<bool>()) {
        let expected = if b { vec![0x01] } else { vec![0x00] };
        prop_assert_eq!(encode_packed(&[PackedValue::Bool(b)]), expected);
    }

    #[test]
    fn prop_concatenation_is_length_additive(values in prop::collection::vec(value_strategy(), 0..12)) {
        let whole = encode_packed(&values);
        let parts: usize = values
            .iter()
            .map(|value| encode_packed(std::slice::from_ref(value)).len())
            .sum();
        prop_assert_eq!(whole.len(), parts);
    }

    #[test]
    fn prop_concatenation_equals_joined_parts(values in prop::collection::vec(value_strategy(), 0..12)) {
        let whole = encode_packed(&values);
        let joined: Vec<u8> = values
            .iter()
            .flat_map(|value| encode_packed(std::slice::from_ref(value)))
            .collect();
        prop_assert_eq!(whole, joined);
    }

    #[test]
    fn prop_encoded_len_matches_output(value in value_strategy()) {
        prop_assert_eq!(encode_packed(std::slice::from_ref(&value)).len(), value.encoded_len());
    }

    #[test]
    fn prop_u32_matches_to_be_bytes(n in any::<u32>()) {
        prop_assert_eq!(encode_packed(&[PackedValue::U32(n)]), n.to_be_bytes().to_vec());
    }

    #[test]
    fn prop_i64_matches_to_be_bytes(n in any::<i64>()) {
        prop_assert_eq!(encode_packed(&[PackedValue::I64(n)]), n.to_be_bytes().to_vec());
    }

    #[test]
    fn prop_u16_declared_width_is_checked(n in any::<u32>()) {
        let result = ScalarKind::U16.from_unsigned(u128::from(n));
        prop_assert_eq!(result.is_ok(), n <= u32::from(u16::MAX));
    }

    #[test]
    fn prop_i8_declared_width_is_checked(n in any::<i16>()) {
        let result = ScalarKind::I8.from_signed(i128::from(n));
        prop_assert_eq!(result.is_ok(), i8::try_from(n).is_ok());
    }

    #[test]
    fn prop_u256_reduction_keeps_low_word(high in prop::collection::vec(any::<u8>(), 0..8), low in any::<[u8; 32]>()) {
        let mut bytes = high;
        bytes.extend_from_slice(&low);
        prop_assert_eq!(
            PackedValue::u256_from_be_slice(&bytes),
            PackedValue::U256(U256::from_be_bytes(low))
        );
    }
}
