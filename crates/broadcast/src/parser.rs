//! Naming rules that fold a broadcast log into a canonical address book.

use crate::{BroadcastLog, BroadcastTx};
use govctl_registry::{AddressBook, DuplicateNameError};
use std::{fs, io, path::Path, path::PathBuf};
use thiserror::Error;
use tracing::debug;

/// Generic ERC-20 deployments renamed by their token-symbol argument.
const SYMBOL_SUFFIXED: &[&str] = &["MintableERC20", "MintableVoteERC20"];

/// Named singleton deployments renamed to their protocol-level alias.
const PROTOCOL_ALIASES: &[(&str, &str)] =
    &[("OpenDollarGovernance", "ProtocolToken"), ("OpenDollar", "SystemCoin")];

/// Factories invoked once per collateral type; children carry the collateral
/// discriminator taken from the parent's first constructor argument.
const DISCRIMINATED_FACTORIES: &[&str] =
    &["CollateralAuctionHouseFactory", "CollateralJoinFactory"];

/// Factories that produce same-named children with no natural discriminator;
/// children carry the parent's zero-based log index instead.
const SEQUENCE_FACTORIES: &[&str] = &["DelayedOracleFactory", "DenominatedOracleFactory"];

/// Fatal errors while turning a broadcast log into an address book. No
/// partial registry is ever emitted.
#[derive(Debug, Error)]
pub enum BroadcastParseError {
    /// Reading the log file failed.
    #[error("failed to read broadcast log {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The log was not valid JSON or lacked required fields.
    #[error("malformed broadcast log: {0}")]
    Json(#[from] serde_json::Error),
    /// A transaction needed an argument the log does not carry.
    #[error("transaction {index} ({name}) is missing constructor argument {position}")]
    MissingArgument {
        /// Zero-based position of the transaction in the log.
        index: usize,
        /// The transaction's contract name.
        name: String,
        /// The argument position that was required.
        position: usize,
    },
    /// A transaction spawned children but has no contract name to derive
    /// theirs from.
    #[error("transaction {index} spawned contracts but carries no contract name")]
    UnnamedParent {
        /// Zero-based position of the transaction in the log.
        index: usize,
    },
    /// The naming rules produced a colliding name (unexpected factory shape).
    #[error(transparent)]
    Duplicate(#[from] DuplicateNameError),
}

/// Reads and deserializes a broadcast log file.
pub fn read_broadcast(path: &Path) -> Result<BroadcastLog, BroadcastParseError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| BroadcastParseError::Io { path: path.to_path_buf(), source })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Applies the naming rules to a broadcast log, in log order, producing a
/// collision-free address book for one network.
pub fn parse_broadcast(log: &BroadcastLog) -> Result<AddressBook, BroadcastParseError> {
    let mut book = AddressBook::new();
    for (index, tx) in log.transactions.iter().enumerate() {
        if tx.transaction_type.is_create() {
            if let (Some(address), Some(name)) = (tx.contract_address, tx.contract_name.as_deref())
            {
                let name = direct_name(name, tx, index)?;
                debug!(target: "broadcast", %name, %address, "direct entry");
                book.insert(name, address)?;
            }
        }

        let spawned: Vec<_> =
            tx.additional_contracts.iter().filter(|c| c.transaction_type.is_create()).collect();
        for (ordinal, child) in spawned.iter().enumerate() {
            let name = child_name(tx, index, ordinal, spawned.len())?;
            debug!(target: "broadcast", %name, address = %child.address, "factory child");
            book.insert(name, child.address)?;
        }
    }
    Ok(book)
}

/// Name of a top-level `CREATE` entry, after the alias table.
fn direct_name(
    name: &str,
    tx: &BroadcastTx,
    index: usize,
) -> Result<String, BroadcastParseError> {
    if SYMBOL_SUFFIXED.contains(&name) {
        let symbol = tx.argument(1).ok_or_else(|| BroadcastParseError::MissingArgument {
            index,
            name: name.to_string(),
            position: 1,
        })?;
        return Ok(format!("{name}_{}", scrub(symbol).to_uppercase()));
    }
    if let Some((_, alias)) = PROTOCOL_ALIASES.iter().find(|(from, _)| *from == name) {
        return Ok((*alias).to_string());
    }
    Ok(name.to_string())
}

/// Name of a factory child: the parent name with `Factory` rewritten to
/// `Child`, plus whichever disambiguating suffixes apply.
fn child_name(
    tx: &BroadcastTx,
    index: usize,
    ordinal: usize,
    sibling_count: usize,
) -> Result<String, BroadcastParseError> {
    let parent = tx
        .contract_name
        .as_deref()
        .ok_or(BroadcastParseError::UnnamedParent { index })?;
    let mut name = parent.replace("Factory", "Child");

    if DISCRIMINATED_FACTORIES.contains(&parent) {
        let discriminator =
            tx.argument(0).ok_or_else(|| BroadcastParseError::MissingArgument {
                index,
                name: parent.to_string(),
                position: 0,
            })?;
        name = format!("{name}_{}", scrub(discriminator));
    }

    if SEQUENCE_FACTORIES.contains(&parent) || parent.contains("RelayerFactory") {
        name = format!("{name}_{index}");
    }

    // One call can spawn several children; suffix their ordinal so siblings
    // never collide.
    if sibling_count > 1 {
        name = format!("{name}_{ordinal}");
    }
    Ok(name)
}

fn scrub(raw: &str) -> &str {
    raw.trim_matches('"')
}
