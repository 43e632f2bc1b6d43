//! Flat JSON form of the registry.
//!
//! The JSON registry is the structured counterpart of the Solidity text form:
//! a single flat object mapping canonical names to checksummed address
//! strings, in insertion order.

use crate::AddressBook;

/// Serializes a book into the flat JSON registry, with a trailing newline.
pub fn to_json(book: &AddressBook) -> String {
    // AddressBook's Serialize impl writes entries in insertion order, and
    // serde_json emits map entries in the order they are serialized.
    let mut out = serde_json::to_string_pretty(book).unwrap_or_else(|_| "{}".to_string());
    out.push('\n');
    out
}

/// Parses a flat JSON registry back into an [`AddressBook`].
pub fn from_json(src: &str) -> Result<AddressBook, serde_json::Error> {
    serde_json::from_str(src)
}
