//! Registry file persistence.
//!
//! Writes fully replace the target file; there is no in-place merge and no
//! transactional rollback. Concurrent invocations against the same file are
//! unsupported.

use crate::{
    from_solidity, resolve, to_json, to_solidity, AddressBook, ContractEntry, Network,
    RegistryLayout, ResolveError, TextRegistryError,
};
use std::{fs, io, path::PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while reading or writing registry files.
#[derive(Debug, Error)]
pub enum RegistryStoreError {
    /// Reading or writing a registry file failed.
    #[error("failed to {action} registry file {path}: {source}")]
    Io {
        /// What was being attempted.
        action: &'static str,
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The text registry was malformed.
    #[error(transparent)]
    Text(#[from] TextRegistryError),
    /// The query did not resolve to exactly one entry.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Loads the text registry for a network back into an [`AddressBook`].
pub fn load_book(
    layout: &RegistryLayout,
    network: Network,
) -> Result<AddressBook, RegistryStoreError> {
    let path = layout.solidity_path(network);
    let src = fs::read_to_string(&path)
        .map_err(|source| RegistryStoreError::Io { action: "read", path: path.clone(), source })?;
    let book = from_solidity(&src)?;
    debug!(target: "registry", network = %network, entries = book.len(), "loaded registry");
    Ok(book)
}

/// Persists a book as both the Solidity text registry and the flat JSON
/// registry for a network, replacing any existing files.
pub fn write_book(
    layout: &RegistryLayout,
    network: Network,
    book: &AddressBook,
) -> Result<(), RegistryStoreError> {
    write_file(layout.solidity_path(network), to_solidity(book, network))?;
    write_file(layout.json_path(network), to_json(book))?;
    info!(target: "registry", network = %network, entries = book.len(), "registry written");
    Ok(())
}

/// Loads the registry for a network and resolves a fuzzy name query against
/// it, returning an owned entry.
pub fn lookup(
    layout: &RegistryLayout,
    network: Network,
    query: &str,
) -> Result<ContractEntry, RegistryStoreError> {
    let book = load_book(layout, network)?;
    let entry = resolve(&book, query)?;
    Ok(entry.clone())
}

fn write_file(path: PathBuf, contents: String) -> Result<(), RegistryStoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| RegistryStoreError::Io {
            action: "create parent directory for",
            path: path.clone(),
            source,
        })?;
    }
    fs::write(&path, contents)
        .map_err(|source| RegistryStoreError::Io { action: "write", path, source })
}
