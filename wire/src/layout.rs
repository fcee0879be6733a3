//! Field layout word describing a table's static fields.
//!
//! ```text
//! | static length (2) | #static (1) | #dynamic (1) | width 0 | width 1 | ... |
//! ```

use crate::counter::MAX_DYNAMIC_FIELDS;
use crate::error::{LengthKind, WireError, WireResult};

/// Maximum number of fields in a table.
pub const MAX_TOTAL_FIELDS: usize = 28;

/// Maximum number of static fields in a table.
pub const MAX_STATIC_FIELDS: usize = 28;

/// Widest static field in bytes.
pub const MAX_STATIC_WIDTH: usize = 32;

const HEADER_BYTES: usize = 4;

/// Static field widths and field counts of a table, in one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldLayout([u8; 32]);

impl FieldLayout {
    /// Layout of a table with no value fields.
    pub const EMPTY: Self = Self([0; 32]);

    /// Builds a layout from static field widths and a dynamic field count.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::LengthOverflow`] if a field count exceeds its
    /// limit, or [`WireError::InvalidStaticWidth`] if a width is outside
    /// `1..=32`.
    pub fn new(static_widths: &[usize], dynamic_fields: usize) -> WireResult<Self> {
        if static_widths.len() > MAX_STATIC_FIELDS {
            return Err(WireError::LengthOverflow {
                kind: LengthKind::StaticFieldCount,
                limit: MAX_STATIC_FIELDS as u64,
                actual: static_widths.len() as u64,
            });
        }
        if dynamic_fields > MAX_DYNAMIC_FIELDS {
            return Err(WireError::LengthOverflow {
                kind: LengthKind::DynamicFieldCount,
                limit: MAX_DYNAMIC_FIELDS as u64,
                actual: dynamic_fields as u64,
            });
        }
        let total_fields = static_widths.len() + dynamic_fields;
        if total_fields > MAX_TOTAL_FIELDS {
            return Err(WireError::LengthOverflow {
                kind: LengthKind::TotalFieldCount,
                limit: MAX_TOTAL_FIELDS as u64,
                actual: total_fields as u64,
            });
        }

        let mut bytes = [0u8; 32];
        let mut static_length: usize = 0;
        for (index, &width) in static_widths.iter().enumerate() {
            if width == 0 || width > MAX_STATIC_WIDTH {
                return Err(WireError::InvalidStaticWidth { index, width });
            }
            static_length += width;
            // Checked above: width <= 32.
            bytes[HEADER_BYTES + index] = width as u8;
        }

        // At most 28 * 32 bytes; fits two bytes.
        bytes[..2].copy_from_slice(&(static_length as u16).to_be_bytes());
        bytes[2] = static_widths.len() as u8;
        bytes[3] = dynamic_fields as u8;
        Ok(Self(bytes))
    }

    /// Wraps a raw word without validation.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw word.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Total byte length of the static data.
    #[must_use]
    pub const fn static_data_length(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]])
    }

    #[must_use]
    pub const fn num_static_fields(&self) -> usize {
        self.0[2] as usize
    }

    #[must_use]
    pub const fn num_dynamic_fields(&self) -> usize {
        self.0[3] as usize
    }

    /// Width of static field `index`, or `None` past the last static field.
    #[must_use]
    pub fn static_field_width(&self, index: usize) -> Option<usize> {
        (index < self.num_static_fields()).then(|| usize::from(self.0[HEADER_BYTES + index]))
    }
}

impl From<FieldLayout> for [u8; 32] {
    fn from(layout: FieldLayout) -> Self {
        layout.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(prefix: &[u8]) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[..prefix.len()].copy_from_slice(prefix);
        bytes
    }

    #[test]
    fn single_uint32_golden() {
        let layout = FieldLayout::new(&[4], 0).unwrap();
        assert_eq!(*layout.as_bytes(), word(&[0x00, 0x04, 0x01, 0x00, 0x04]));
    }

    #[test]
    fn single_uint8_golden() {
        let layout = FieldLayout::new(&[1], 0).unwrap();
        assert_eq!(*layout.as_bytes(), word(&[0x00, 0x01, 0x01, 0x00, 0x01]));
    }

    #[test]
    fn mixed_static_and_dynamic() {
        // uint8, uint32, uint32, bool + name + skill ids
        let layout = FieldLayout::new(&[1, 4, 4, 1], 2).unwrap();
        assert_eq!(layout.static_data_length(), 10);
        assert_eq!(layout.num_static_fields(), 4);
        assert_eq!(layout.num_dynamic_fields(), 2);
        assert_eq!(layout.static_field_width(1), Some(4));
        assert_eq!(layout.static_field_width(4), None);
    }

    #[test]
    fn dynamic_only() {
        let layout = FieldLayout::new(&[], 1).unwrap();
        assert_eq!(*layout.as_bytes(), word(&[0x00, 0x00, 0x00, 0x01]));
    }

    #[test]
    fn rejects_zero_width() {
        let err = FieldLayout::new(&[4, 0], 0).unwrap_err();
        assert_eq!(err, WireError::InvalidStaticWidth { index: 1, width: 0 });
    }

    #[test]
    fn rejects_wide_static_field() {
        assert!(FieldLayout::new(&[33], 0).is_err());
        assert!(FieldLayout::new(&[32], 0).is_ok());
    }

    #[test]
    fn rejects_too_many_dynamic() {
        let err = FieldLayout::new(&[1], 6).unwrap_err();
        assert!(matches!(
            err,
            WireError::LengthOverflow {
                kind: LengthKind::DynamicFieldCount,
                ..
            }
        ));
    }

    #[test]
    fn rejects_too_many_total() {
        let widths = [1usize; 25];
        let err = FieldLayout::new(&widths, 5).unwrap_err();
        assert!(matches!(
            err,
            WireError::LengthOverflow {
                kind: LengthKind::TotalFieldCount,
                limit: 28,
                actual: 30
            }
        ));
    }

    #[test]
    fn empty_layout() {
        assert_eq!(FieldLayout::new(&[], 0).unwrap(), FieldLayout::EMPTY);
    }
}
