//! The closed set of proposal kinds.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Every proposal kind the pipeline can generate. The last six only echo
/// their inputs through to the execution scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProposalKind {
    /// Onboards a new collateral type.
    AddCollateral,
    /// Deploys a batch of price-feed relayers.
    DeployRelayerSet,
    /// Deploys a batch of delayed oracles.
    DeployDelayedOracle,
    /// Deploys a batch of denominated oracles.
    DeployDenominatedOracle,
    /// Transfers protocol-held ERC-20 funds.
    TransferErc20,
    /// Updates the vault's block delay.
    UpdateBlockDelay,
    /// Swaps the vault NFT renderer.
    UpdateNftRenderer,
    /// Updates the timelock minimum delay.
    UpdateTimeDelay,
    /// Retunes the PID controller gains.
    UpdatePidController,
    /// Generic single-parameter modification.
    UpdateParameter,
}

/// Returned for a proposal-type string outside the supported set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized proposal type `{0}`")]
pub struct UnrecognizedKindError(pub String);

impl ProposalKind {
    /// The `proposalType` tag carried in proposal documents.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::AddCollateral => "addCollateral",
            Self::DeployRelayerSet => "deployRelayerSet",
            Self::DeployDelayedOracle => "deployDelayedOracle",
            Self::DeployDenominatedOracle => "deployDenominatedOracle",
            Self::TransferErc20 => "transferErc20",
            Self::UpdateBlockDelay => "updateBlockDelay",
            Self::UpdateNftRenderer => "updateNftRenderer",
            Self::UpdateTimeDelay => "updateTimeDelay",
            Self::UpdatePidController => "updatePidController",
            Self::UpdateParameter => "updateParameter",
        }
    }

    /// Pascal-case name used in generator script identifiers.
    pub const fn pascal(&self) -> &'static str {
        match self {
            Self::AddCollateral => "AddCollateral",
            Self::DeployRelayerSet => "DeployRelayerSet",
            Self::DeployDelayedOracle => "DeployDelayedOracle",
            Self::DeployDenominatedOracle => "DeployDenominatedOracle",
            Self::TransferErc20 => "TransferErc20",
            Self::UpdateBlockDelay => "UpdateBlockDelay",
            Self::UpdateNftRenderer => "UpdateNftRenderer",
            Self::UpdateTimeDelay => "UpdateTimeDelay",
            Self::UpdatePidController => "UpdatePidController",
            Self::UpdateParameter => "UpdateParameter",
        }
    }

    /// The Forge target that generates this proposal's execution payload,
    /// in `path:contract` form.
    pub fn script_path(&self) -> String {
        let name = self.pascal();
        format!(
            "script/testScripts/gov/GenerateProposal/Generate{name}Proposal.s.sol:Generate{name}Proposal"
        )
    }

    /// All supported kinds.
    pub const ALL: [Self; 10] = [
        Self::AddCollateral,
        Self::DeployRelayerSet,
        Self::DeployDelayedOracle,
        Self::DeployDenominatedOracle,
        Self::TransferErc20,
        Self::UpdateBlockDelay,
        Self::UpdateNftRenderer,
        Self::UpdateTimeDelay,
        Self::UpdatePidController,
        Self::UpdateParameter,
    ];
}

impl fmt::Display for ProposalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ProposalKind {
    type Err = UnrecognizedKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Self::ALL
            .iter()
            .find(|kind| kind.tag().to_lowercase() == lowered)
            .copied()
            .ok_or_else(|| UnrecognizedKindError(s.to_string()))
    }
}
