//! Parse Subcommand

use crate::flags::GlobalArgs;
use clap::Parser;
use govctl_broadcast::{parse_broadcast, read_broadcast};
use govctl_registry::{write_book, Network};
use std::path::PathBuf;

/// The `parse` Subcommand
///
/// Reads a Foundry broadcast log, derives the named deployment entries from
/// it, and rewrites the network's registry files.
///
/// # Usage
///
/// ```sh
/// govctl parse --network sepolia [--broadcast path/to/run-latest.json]
/// ```
#[derive(Parser, PartialEq, Eq, Debug, Clone)]
#[command(about = "Parses a Foundry broadcast log into the deployment registry")]
pub(crate) struct ParseCommand {
    /// The network the broadcast was run against.
    #[arg(long, short)]
    network: Network,
    /// Path to the broadcast log. Defaults to
    /// `<repo-root>/deployments/<network>/run-latest.json`.
    #[arg(long)]
    broadcast: Option<PathBuf>,
}

impl ParseCommand {
    /// Runs the subcommand.
    pub(crate) fn run(self, args: &GlobalArgs) -> anyhow::Result<()> {
        let path = self.broadcast.unwrap_or_else(|| {
            args.repo_root.join("deployments").join(self.network.name()).join("run-latest.json")
        });
        let log = read_broadcast(&path)?;
        let book = parse_broadcast(&log)?;
        write_book(&args.layout(), self.network, &book)?;
        println!(
            "parsed {} entries from {} into the {} registry",
            book.len(),
            path.display(),
            self.network
        );
        Ok(())
    }
}
