//! Solidity-source text form of the registry.
//!
//! The text registry is a sequence of `address public NAME = 0x…;`
//! declarations inside a single abstract contract, consumed verbatim by
//! downstream Forge scripts. Serialization is a pure function of the book, so
//! re-serializing an unchanged book is byte-identical and version-control
//! diffs stay minimal.

use crate::{AddressBook, DuplicateNameError, Network};
use alloy_primitives::Address;
use std::fmt::Write;
use thiserror::Error;

const DECLARATION_PREFIX: &str = "address public ";

/// Errors raised while parsing a text registry back into an [`AddressBook`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TextRegistryError {
    /// A declaration line could not be split into name and address.
    #[error("malformed registry declaration: `{0}`")]
    MalformedDeclaration(String),
    /// A declaration carried a value that does not parse as an address.
    #[error("declaration for `{name}` has an invalid address `{value}`")]
    InvalidAddress {
        /// The declared name.
        name: String,
        /// The raw value that failed to parse.
        value: String,
    },
    /// Two declarations share a name.
    #[error(transparent)]
    Duplicate(#[from] DuplicateNameError),
}

/// Serializes a book into the Solidity text registry for one network.
///
/// Entries are emitted in insertion order with no sorting.
pub fn to_solidity(book: &AddressBook, network: Network) -> String {
    let mut out = String::new();
    out.push_str("// SPDX-License-Identifier: GPL-3.0\n");
    let _ = writeln!(out, "pragma solidity {};", network.solc_pragma());
    out.push('\n');
    let _ = writeln!(out, "abstract contract {} {{", network.contracts_container());
    for entry in book.iter() {
        let _ = writeln!(
            out,
            "  {DECLARATION_PREFIX}{} = {};",
            entry.name,
            entry.address.to_checksum(None)
        );
    }
    out.push_str("}\n");
    out
}

/// Parses a Solidity text registry back into an [`AddressBook`].
///
/// Inverse of [`to_solidity`]: lines carrying the declaration prefix are split
/// on `=`, trimmed on both sides, and stripped of the `;` terminator; all
/// other lines (header, container braces) are ignored.
pub fn from_solidity(src: &str) -> Result<AddressBook, TextRegistryError> {
    let mut book = AddressBook::new();
    for line in src.lines() {
        let trimmed = line.trim();
        let Some(declaration) = trimmed.strip_prefix(DECLARATION_PREFIX) else {
            continue;
        };
        let Some(declaration) = declaration.strip_suffix(';') else {
            return Err(TextRegistryError::MalformedDeclaration(trimmed.to_string()));
        };
        let Some((name, value)) = declaration.split_once('=') else {
            return Err(TextRegistryError::MalformedDeclaration(trimmed.to_string()));
        };
        let name = name.trim();
        let value = value.trim();
        let address = value.parse::<Address>().map_err(|_| TextRegistryError::InvalidAddress {
            name: name.to_string(),
            value: value.to_string(),
        })?;
        book.insert(name, address)?;
    }
    Ok(book)
}
