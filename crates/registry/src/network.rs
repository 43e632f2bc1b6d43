//! Supported target networks and registry file locations.

use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;

/// The closed set of networks the deployment pipeline targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Ethereum/Arbitrum mainnet deployments.
    Mainnet,
    /// Sepolia testnet deployments.
    Sepolia,
    /// Local anvil deployments.
    Anvil,
}

/// Returned when a network identifier is not one of the supported set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized network `{0}`, expected one of: mainnet, sepolia, anvil")]
pub struct UnknownNetworkError(pub String);

impl Network {
    /// All supported networks.
    pub const ALL: [Self; 3] = [Self::Mainnet, Self::Sepolia, Self::Anvil];

    /// Lowercase network identifier used in paths and documents.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Sepolia => "sepolia",
            Self::Anvil => "anvil",
        }
    }

    /// The name of the abstract contract wrapping the text registry.
    pub const fn contracts_container(&self) -> &'static str {
        match self {
            Self::Mainnet => "MainnetContracts",
            Self::Sepolia => "SepoliaContracts",
            Self::Anvil => "AnvilContracts",
        }
    }

    /// Solidity pragma version emitted in the text registry header.
    pub const fn solc_pragma(&self) -> &'static str {
        match self {
            Self::Anvil => "0.8.19",
            _ => "0.8.20",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = UnknownNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "sepolia" => Ok(Self::Sepolia),
            "anvil" => Ok(Self::Anvil),
            other => Err(UnknownNetworkError(other.to_string())),
        }
    }
}

/// Where the per-network registry files live, relative to a repository root.
///
/// Passed explicitly into every file-touching operation instead of being
/// derived from ambient process state.
#[derive(Debug, Clone, Constructor, PartialEq, Eq)]
pub struct RegistryLayout {
    /// The repository root all registry paths are resolved against.
    pub root: PathBuf,
}

impl RegistryLayout {
    /// Path of the Solidity text registry for a network.
    pub fn solidity_path(&self, network: Network) -> PathBuf {
        match network {
            Network::Mainnet => self.root.join("script/MainnetContracts.s.sol"),
            Network::Sepolia => self.root.join("script/SepoliaContracts.s.sol"),
            Network::Anvil => self.root.join("script/anvil/AnvilContracts.t.sol"),
        }
    }

    /// Path of the flat JSON registry for a network.
    pub fn json_path(&self, network: Network) -> PathBuf {
        match network {
            Network::Anvil => self.root.join("script/anvil/AnvilContracts.json"),
            _ => self.root.join(format!("script/{}.json", network.contracts_container())),
        }
    }
}

impl Default for RegistryLayout {
    fn default() -> Self {
        Self::new(Path::new(".").to_path_buf())
    }
}
