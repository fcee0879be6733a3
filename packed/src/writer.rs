//! Byte-level writer for packed encoding.

use alloy_primitives::U256;

use crate::value::PackedValue;

/// A byte-level writer for the packed format.
///
/// Every write appends the value's big-endian bytes with no padding or
/// separators. Call [`finish`](Self::finish) to get the final byte buffer.
#[derive(Debug, Default)]
pub struct PackedWriter {
    /// The accumulated bytes.
    bytes: Vec<u8>,
}

impl PackedWriter {
    /// Creates a new empty `PackedWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `PackedWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn bytes_written(&self) -> usize {
        self.bytes.len()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i8(&mut self, value: i8) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes `0x01` for `true`, `0x00` for `false`.
    pub fn write_bool(&mut self, value: bool) {
        self.bytes.push(u8::from(value));
    }

    /// Writes exactly 32 big-endian bytes.
    pub fn write_u256(&mut self, value: &U256) {
        self.bytes.extend_from_slice(&value.to_be_bytes::<32>());
    }

    /// Writes raw bytes with no length prefix.
    pub fn write_bytes(&mut self, value: &[u8]) {
        self.bytes.extend_from_slice(value);
    }

    /// Writes a packed value, recursing into arrays.
    pub fn write_value(&mut self, value: &PackedValue) {
        match value {
            PackedValue::U8(v) => self.write_u8(*v),
            PackedValue::U16(v) => self.write_u16(*v),
            PackedValue::U32(v) => self.write_u32(*v),
            PackedValue::U64(v) => self.write_u64(*v),
            PackedValue::I8(v) => self.write_i8(*v),
            PackedValue::I16(v) => self.write_i16(*v),
            PackedValue::I32(v) => self.write_i32(*v),
            PackedValue::I64(v) => self.write_i64(*v),
            PackedValue::Bool(v) => self.write_bool(*v),
            PackedValue::U256(v) => self.write_u256(v),
            PackedValue::Bytes(v) => self.write_bytes(v),
            PackedValue::Array(items) => self.write_values(items),
        }
    }

    /// Writes values back to back.
    pub fn write_values(&mut self, values: &[PackedValue]) {
        for value in values {
            self.write_value(value);
        }
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.bytes);
    }
}

/// Encodes values in packed form.
///
/// The output length is always the sum of the values'
/// [`encoded_len`](PackedValue::encoded_len).
#[must_use]
pub fn encode_packed(values: &[PackedValue]) -> Vec<u8> {
    let len = values.iter().map(PackedValue::encoded_len).sum();
    let mut writer = PackedWriter::with_capacity(len);
    writer.write_values(values);
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let writer = PackedWriter::new();
        assert_eq!(writer.bytes_written(), 0);
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn write_bool_bytes() {
        let mut writer = PackedWriter::new();
        writer.write_bool(true);
        writer.write_bool(false);
        assert_eq!(writer.finish(), vec![0x01, 0x00]);
    }

    #[test]
    fn write_unsigned_big_endian() {
        let mut writer = PackedWriter::new();
        writer.write_u8(0xAB);
        writer.write_u16(0x1234);
        writer.write_u32(0xDEAD_BEEF);
        writer.write_u64(0x0102_0304_0506_0708);
        assert_eq!(writer.bytes_written(), 15);
        assert_eq!(
            writer.finish(),
            vec![
                0xAB, 0x12, 0x34, 0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06,
                0x07, 0x08
            ]
        );
    }

    #[test]
    fn write_signed_twos_complement() {
        let mut writer = PackedWriter::new();
        writer.write_i8(-1);
        writer.write_i16(-2);
        writer.write_i32(-256);
        writer.write_i64(i64::MIN);
        assert_eq!(
            writer.finish(),
            vec![
                0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00
            ]
        );
    }

    #[test]
    fn write_u256_is_32_bytes() {
        let mut writer = PackedWriter::new();
        writer.write_u256(&U256::from(0x0102u64));
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[30], 0x01);
        assert_eq!(bytes[31], 0x02);
        assert!(bytes[..30].iter().all(|b| *b == 0));
    }

    #[test]
    fn write_u256_max() {
        let mut writer = PackedWriter::new();
        writer.write_u256(&U256::MAX);
        assert_eq!(writer.finish(), vec![0xFF; 32]);
    }

    #[test]
    fn write_bytes_unmodified() {
        let mut writer = PackedWriter::new();
        writer.write_bytes(b"City");
        writer.write_bytes(&[]);
        assert_eq!(writer.finish(), b"City".to_vec());
    }

    #[test]
    fn write_value_array_recurses() {
        let mut writer = PackedWriter::new();
        writer.write_value(&PackedValue::Array(vec![
            PackedValue::U32(4),
            PackedValue::Array(vec![PackedValue::U8(1), PackedValue::Bool(true)]),
        ]));
        assert_eq!(writer.finish(), vec![0x00, 0x00, 0x00, 0x04, 0x01, 0x01]);
    }

    #[test]
    fn encode_two_uint16() {
        let bytes = encode_packed(&[PackedValue::U16(120), PackedValue::U16(45)]);
        assert_eq!(bytes, vec![0x00, 0x78, 0x00, 0x2d]);
    }

    #[test]
    fn encode_empty_array_is_empty() {
        assert!(encode_packed(&[PackedValue::Array(Vec::new())]).is_empty());
        assert!(encode_packed(&[]).is_empty());
    }

    #[test]
    fn encode_city_static_fields() {
        // x: int32, y: int32, isCapital: bool, kingdomId: uint8, level: uint8
        let bytes = encode_packed(&[
            PackedValue::I32(-3),
            PackedValue::I32(12),
            PackedValue::Bool(true),
            PackedValue::U8(2),
            PackedValue::U8(5),
        ]);
        assert_eq!(
            bytes,
            vec![0xFF, 0xFF, 0xFF, 0xFD, 0x00, 0x00, 0x00, 0x0C, 0x01, 0x02, 0x05]
        );
    }

    #[test]
    fn finish_into() {
        let mut writer = PackedWriter::new();
        writer.write_u8(0xAB);

        let mut buf = vec![0x00, 0x11];
        writer.finish_into(&mut buf);
        assert_eq!(buf, vec![0x00, 0x11, 0xAB]);
    }

    #[test]
    fn with_capacity() {
        let writer = PackedWriter::with_capacity(100);
        assert_eq!(writer.bytes_written(), 0);
    }
}
