//! Broadcast log wire types.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// How a broadcast transaction took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxKind {
    /// A top-level contract creation.
    Create,
    /// A salted contract creation.
    Create2,
    /// A plain call into an existing contract.
    Call,
    /// Any transaction type this tool does not act on.
    #[serde(other)]
    Other,
}

impl TxKind {
    /// Whether the transaction instantiated a contract.
    pub const fn is_create(&self) -> bool {
        matches!(self, Self::Create | Self::Create2)
    }
}

/// A contract instantiated indirectly, as a side effect of its parent
/// transaction (a factory child).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnedContract {
    /// How the child came into existence.
    pub transaction_type: TxKind,
    /// The child's deployed address.
    pub address: Address,
}

/// One record of the broadcast log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastTx {
    /// Address of the contract this transaction created, if any.
    #[serde(default)]
    pub contract_address: Option<Address>,
    /// Source name of the created contract, if any.
    #[serde(default)]
    pub contract_name: Option<String>,
    /// The transaction's effect.
    pub transaction_type: TxKind,
    /// Stringified constructor/call arguments, in call order.
    #[serde(default)]
    pub arguments: Option<Vec<String>>,
    /// Contracts spawned indirectly by this transaction.
    #[serde(default)]
    pub additional_contracts: Vec<SpawnedContract>,
}

impl BroadcastTx {
    /// Returns the argument at `position`, if present.
    pub fn argument(&self, position: usize) -> Option<&str> {
        self.arguments.as_ref()?.get(position).map(String::as_str)
    }
}

/// A full deployment broadcast record. A log without a `transactions` field
/// fails deserialization outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastLog {
    /// The ordered transaction sequence.
    pub transactions: Vec<BroadcastTx>,
}
