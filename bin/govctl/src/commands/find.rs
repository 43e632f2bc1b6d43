//! Find Subcommand

use crate::flags::GlobalArgs;
use clap::Parser;
use govctl_registry::{lookup, Network};

/// The `find` Subcommand
///
/// Resolves a case-insensitive substring query against the network's
/// registry and prints the single matching entry.
///
/// # Usage
///
/// ```sh
/// govctl find --network sepolia vault721
/// ```
#[derive(Parser, PartialEq, Eq, Debug, Clone)]
#[command(about = "Looks up a contract address by fuzzy name")]
pub(crate) struct FindCommand {
    /// The network whose registry to search.
    #[arg(long, short)]
    network: Network,
    /// Substring of the contract name, matched case-insensitively.
    query: String,
}

impl FindCommand {
    /// Runs the subcommand.
    pub(crate) fn run(self, args: &GlobalArgs) -> anyhow::Result<()> {
        let entry = lookup(&args.layout(), self.network, &self.query)?;
        println!("{}: {}", entry.name, entry.address.to_checksum(None));
        Ok(())
    }
}
