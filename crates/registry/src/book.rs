//! Insertion-ordered contract address book.

use alloy_primitives::Address;
use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use thiserror::Error;

/// A single canonical registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractEntry {
    /// Canonical contract name, unique within one network.
    pub name: String,
    /// The deployed (or predicted) contract address.
    pub address: Address,
}

/// An insertion-ordered mapping from canonical contract names to addresses.
///
/// Name uniqueness is enforced on insertion rather than by post-hoc
/// deduplication: a colliding [`insert`](Self::insert) fails instead of
/// overwriting, so an unexpected factory shape surfaces as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    entries: Vec<ContractEntry>,
}

/// Returned when an insertion would shadow an existing entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("registry already contains an entry named `{0}`")]
pub struct DuplicateNameError(pub String);

impl AddressBook {
    /// Creates an empty book.
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Inserts a new entry, rejecting duplicate names.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        address: Address,
    ) -> Result<(), DuplicateNameError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(DuplicateNameError(name));
        }
        self.entries.push(ContractEntry { name, address });
        Ok(())
    }

    /// Returns the address registered under an exact name, if any.
    pub fn get(&self, name: &str) -> Option<Address> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.address)
    }

    /// Whether an exact name is already registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ContractEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the book holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AddressBook {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.address.to_checksum(None))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AddressBook {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BookVisitor;

        impl<'de> Visitor<'de> for BookVisitor {
            type Value = AddressBook;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("a map of contract names to addresses")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut book = AddressBook::new();
                while let Some((name, raw)) = access.next_entry::<String, String>()? {
                    let address =
                        raw.parse::<Address>().map_err(serde::de::Error::custom)?;
                    book.insert(name, address).map_err(serde::de::Error::custom)?;
                }
                Ok(book)
            }
        }

        deserializer.deserialize_map(BookVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_insert_preserves_order() {
        let mut book = AddressBook::new();
        book.insert("SAFEEngine", address!("0000000000000000000000000000000000000001")).unwrap();
        book.insert("TaxCollector", address!("0000000000000000000000000000000000000002")).unwrap();
        book.insert("CoinJoin", address!("0000000000000000000000000000000000000003")).unwrap();

        let names: Vec<_> = book.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["SAFEEngine", "TaxCollector", "CoinJoin"]);
    }

    #[test]
    fn test_duplicate_insert_fails() {
        let mut book = AddressBook::new();
        book.insert("SAFEEngine", address!("0000000000000000000000000000000000000001")).unwrap();
        let err = book
            .insert("SAFEEngine", address!("0000000000000000000000000000000000000002"))
            .unwrap_err();
        assert_eq!(err, DuplicateNameError("SAFEEngine".to_string()));
        // The original entry is untouched.
        assert_eq!(
            book.get("SAFEEngine"),
            Some(address!("0000000000000000000000000000000000000001"))
        );
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let mut book = AddressBook::new();
        book.insert("ZetaContract", address!("00000000000000000000000000000000000000aa")).unwrap();
        book.insert("AlphaContract", address!("00000000000000000000000000000000000000bb")).unwrap();

        let encoded = serde_json::to_string(&book).unwrap();
        // Insertion order survives serialization, not alphabetical order.
        assert!(encoded.find("ZetaContract").unwrap() < encoded.find("AlphaContract").unwrap());

        let decoded: AddressBook = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, book);
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let raw = r#"{
            "SAFEEngine": "0x0000000000000000000000000000000000000001",
            "SAFEEngine": "0x0000000000000000000000000000000000000002"
        }"#;
        assert!(serde_json::from_str::<AddressBook>(raw).is_err());
    }
}
