//! Export Subcommand

use crate::flags::GlobalArgs;
use alloy_primitives::Address;
use clap::Parser;
use govctl_registry::{build_sdk_bundle, load_book, Network, SdkConfig};
use std::path::PathBuf;

/// The `export` Subcommand
///
/// Assembles the SDK address bundle (role-keyed core addresses plus the
/// collateral map) from the network's registry and writes it as JSON.
///
/// # Usage
///
/// ```sh
/// govctl export --network sepolia --eth-address 0x... [--out bundle.json]
/// ```
#[derive(Parser, PartialEq, Eq, Debug, Clone)]
#[command(about = "Exports the registry as an SDK address bundle")]
pub(crate) struct ExportCommand {
    /// The network whose registry to export.
    #[arg(long, short)]
    network: Network,
    /// The canonical ETH placeholder address for this network.
    #[arg(long, env = "GOVCTL_ETH_ADDRESS")]
    eth_address: Address,
    /// Output file. Defaults to `<repo-root>/sdk/<network>.json`.
    #[arg(long, short)]
    out: Option<PathBuf>,
}

impl ExportCommand {
    /// Runs the subcommand.
    pub(crate) fn run(self, args: &GlobalArgs) -> anyhow::Result<()> {
        let book = load_book(&args.layout(), self.network)?;
        let config = SdkConfig { eth_address: self.eth_address };
        let bundle = build_sdk_bundle(&book, &config)?;

        let path = self
            .out
            .unwrap_or_else(|| args.repo_root.join("sdk").join(format!("{}.json", self.network)));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut encoded = serde_json::to_string_pretty(&bundle)?;
        encoded.push('\n');
        std::fs::write(&path, encoded)?;
        println!("wrote {} bundle to {}", self.network, path.display());
        Ok(())
    }
}
