//! Contains the govctl CLI.

use crate::{
    commands::{
        ExportCommand, FindCommand, ParseCommand, PredictCommand, ProposalCommand,
    },
    flags::GlobalArgs,
};
use anyhow::Result;
use clap::{Parser, Subcommand};

/// Subcommands for the CLI.
#[derive(Debug, PartialEq, Clone, Subcommand)]
pub(crate) enum Commands {
    /// Parses a Foundry broadcast log into the deployment registry.
    #[command(alias = "p")]
    Parse(ParseCommand),
    /// Looks up a contract address by fuzzy name.
    #[command(alias = "f")]
    Find(FindCommand),
    /// Predicts the addresses a deployer will create next.
    Predict(PredictCommand),
    /// Exports the registry as an SDK address bundle.
    #[command(alias = "e")]
    Export(ExportCommand),
    /// Creates, updates, and inspects governance proposal files.
    #[command(alias = "gov")]
    Proposal(ProposalCommand),
}

/// The govctl CLI.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub(crate) subcommand: Commands,
    /// Global arguments for the CLI.
    #[command(flatten)]
    pub(crate) global: GlobalArgs,
}

impl Cli {
    /// Runs the CLI.
    pub(crate) fn run(self) -> Result<()> {
        self.global.init_tracing()?;

        match self.subcommand {
            Commands::Parse(parse) => parse.run(&self.global),
            Commands::Find(find) => find.run(&self.global),
            Commands::Predict(predict) => Self::block_on(predict.run(&self.global)),
            Commands::Export(export) => export.run(&self.global),
            Commands::Proposal(proposal) => proposal.run(&self.global),
        }
    }

    /// Runs a future to completion on a fresh multi-thread runtime.
    pub(crate) fn block_on<F>(fut: F) -> Result<()>
    where
        F: std::future::Future<Output = Result<()>>,
    {
        let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
        rt.block_on(fut)
    }
}
