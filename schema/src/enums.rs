//! Immutable enum name tables.
//!
//! Record sources often name enum variants instead of giving their `uint8`
//! discriminant. An [`EnumTable`] is built once from configuration and passed
//! by reference to everything that packs values.

use std::collections::BTreeMap;

use crate::error::{SchemaError, SchemaResult};

type Variants = BTreeMap<String, u8>;

/// Enum name to variant name to discriminant lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "BTreeMap<String, Variants>",
        into = "BTreeMap<String, Variants>"
    )
)]
pub struct EnumTable {
    enums: BTreeMap<String, Variants>,
}

impl EnumTable {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> EnumTableBuilder {
        EnumTableBuilder::default()
    }

    /// Creates a table from explicit discriminants.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateDiscriminant`] if two variants of one
    /// enum share a value.
    pub fn from_map(enums: BTreeMap<String, Variants>) -> SchemaResult<Self> {
        for (enum_name, variants) in &enums {
            let mut seen = [false; 256];
            for &value in variants.values() {
                let slot = &mut seen[usize::from(value)];
                if *slot {
                    return Err(SchemaError::DuplicateDiscriminant {
                        enum_name: enum_name.clone(),
                        value,
                    });
                }
                *slot = true;
            }
        }
        Ok(Self { enums })
    }

    /// Looks up the discriminant of `variant`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownEnum`] or [`SchemaError::UnknownVariant`].
    pub fn resolve(&self, enum_name: &str, variant: &str) -> SchemaResult<u8> {
        let variants = self.variants_of(enum_name)?;
        variants
            .get(variant)
            .copied()
            .ok_or_else(|| SchemaError::UnknownVariant {
                enum_name: enum_name.to_string(),
                variant: variant.to_string(),
            })
    }

    /// Reverse lookup of a discriminant.
    #[must_use]
    pub fn name_of(&self, enum_name: &str, value: u8) -> Option<&str> {
        self.enums
            .get(enum_name)?
            .iter()
            .find(|&(_, &v)| v == value)
            .map(|(name, _)| name.as_str())
    }

    /// Variants of an enum ordered by discriminant.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownEnum`] if the enum is not defined.
    pub fn variants(&self, enum_name: &str) -> SchemaResult<Vec<(&str, u8)>> {
        let mut variants: Vec<_> = self
            .variants_of(enum_name)?
            .iter()
            .map(|(name, &value)| (name.as_str(), value))
            .collect();
        variants.sort_by_key(|&(_, value)| value);
        Ok(variants)
    }

    /// Enum names in sorted order.
    pub fn enum_names(&self) -> impl Iterator<Item = &str> {
        self.enums.keys().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, enum_name: &str) -> bool {
        self.enums.contains_key(enum_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.enums.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }

    fn variants_of(&self, enum_name: &str) -> SchemaResult<&Variants> {
        self.enums
            .get(enum_name)
            .ok_or_else(|| SchemaError::UnknownEnum {
                name: enum_name.to_string(),
            })
    }
}

impl TryFrom<BTreeMap<String, Variants>> for EnumTable {
    type Error = SchemaError;

    fn try_from(enums: BTreeMap<String, Variants>) -> SchemaResult<Self> {
        Self::from_map(enums)
    }
}

impl From<EnumTable> for BTreeMap<String, Variants> {
    fn from(table: EnumTable) -> Self {
        table.enums
    }
}

/// Builder for [`EnumTable`].
#[derive(Debug, Default)]
pub struct EnumTableBuilder {
    entries: Vec<(String, String, usize)>,
}

impl EnumTableBuilder {
    /// Adds an enum whose variants are numbered from zero in order.
    #[must_use]
    pub fn variants<I, S>(mut self, enum_name: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (index, name) in names.into_iter().enumerate() {
            self.entries
                .push((enum_name.to_string(), name.into(), index));
        }
        self
    }

    /// Adds one variant with an explicit discriminant.
    #[must_use]
    pub fn variant(mut self, enum_name: &str, name: &str, value: u8) -> Self {
        self.entries
            .push((enum_name.to_string(), name.to_string(), usize::from(value)));
        self
    }

    /// Builds the table after validation.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::TooManyVariants`] if an ordered list exceeds
    /// 256 names, [`SchemaError::DuplicateVariant`] if a name repeats within
    /// one enum, or [`SchemaError::DuplicateDiscriminant`] if a value repeats.
    pub fn build(self) -> SchemaResult<EnumTable> {
        {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for (enum_name, _, _) in &self.entries {
                *counts.entry(enum_name.as_str()).or_default() += 1;
            }
            if let Some((enum_name, &count)) = counts.iter().find(|&(_, &count)| count > 256) {
                return Err(SchemaError::TooManyVariants {
                    enum_name: (*enum_name).to_string(),
                    count,
                });
            }
        }

        let mut enums: BTreeMap<String, Variants> = BTreeMap::new();
        for (enum_name, name, index) in self.entries {
            let value = u8::try_from(index).map_err(|_| SchemaError::TooManyVariants {
                enum_name: enum_name.clone(),
                count: index + 1,
            })?;
            let variants = enums.entry(enum_name.clone()).or_default();
            if variants.insert(name.clone(), value).is_some() {
                return Err(SchemaError::DuplicateVariant {
                    enum_name,
                    variant: name,
                });
            }
        }
        EnumTable::from_map(enums)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> EnumTable {
        EnumTable::builder()
            .variants("ItemCategory", ["Equipment", "Healing", "Resource"])
            .variants("Rarity", ["Common", "Rare"])
            .build()
            .unwrap()
    }

    #[test]
    fn resolves_in_declaration_order() {
        let table = categories();
        assert_eq!(table.resolve("ItemCategory", "Equipment").unwrap(), 0);
        assert_eq!(table.resolve("ItemCategory", "Resource").unwrap(), 2);
        assert_eq!(table.resolve("Rarity", "Rare").unwrap(), 1);
    }

    #[test]
    fn unknown_lookups() {
        let table = categories();
        assert!(matches!(
            table.resolve("Biome", "Forest"),
            Err(SchemaError::UnknownEnum { .. })
        ));
        assert!(matches!(
            table.resolve("Rarity", "Epic"),
            Err(SchemaError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn reverse_lookup() {
        let table = categories();
        assert_eq!(table.name_of("ItemCategory", 1), Some("Healing"));
        assert_eq!(table.name_of("ItemCategory", 9), None);
        assert_eq!(table.name_of("Biome", 0), None);
    }

    #[test]
    fn variants_sorted_by_discriminant() {
        let table = EnumTable::builder()
            .variant("Dir", "West", 3)
            .variant("Dir", "North", 0)
            .variant("Dir", "East", 1)
            .build()
            .unwrap();
        assert_eq!(
            table.variants("Dir").unwrap(),
            vec![("North", 0), ("East", 1), ("West", 3)]
        );
    }

    #[test]
    fn enum_names_sorted() {
        let table = categories();
        assert_eq!(table.enum_names().collect::<Vec<_>>(), ["ItemCategory", "Rarity"]);
        assert_eq!(table.len(), 2);
        assert!(table.contains("Rarity"));
        assert!(EnumTable::default().is_empty());
    }

    #[test]
    fn rejects_duplicate_discriminant() {
        let err = EnumTable::builder()
            .variant("Dir", "North", 0)
            .variant("Dir", "South", 0)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateDiscriminant {
                enum_name: "Dir".to_string(),
                value: 0
            }
        );
    }

    #[test]
    fn rejects_duplicate_variant() {
        let err = EnumTable::builder()
            .variants("Dir", ["North", "North"])
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateVariant { .. }));
    }

    #[test]
    fn rejects_too_many_variants() {
        let names: Vec<String> = (0..257).map(|i| format!("V{i}")).collect();
        let err = EnumTable::builder().variants("Big", names).build().unwrap_err();
        assert_eq!(
            err,
            SchemaError::TooManyVariants {
                enum_name: "Big".to_string(),
                count: 257
            }
        );
    }

    #[test]
    fn accepts_full_byte_range() {
        let names: Vec<String> = (0..256).map(|i| format!("V{i}")).collect();
        let table = EnumTable::builder().variants("Full", names).build().unwrap();
        assert_eq!(table.resolve("Full", "V255").unwrap(), 255);
    }
}
