//! CLI flags shared by every subcommand.

use clap::{ArgAction, Parser};
use govctl_registry::RegistryLayout;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Global arguments for the CLI.
#[derive(Parser, Default, PartialEq, Eq, Clone, Debug)]
pub(crate) struct GlobalArgs {
    /// Verbosity level (-v for debug, -vv for trace).
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub(crate) v: u8,
    /// Root of the deployment repository the registry and proposal files
    /// live under.
    #[arg(long, global = true, default_value = ".", env = "GOVCTL_REPO_ROOT")]
    pub(crate) repo_root: PathBuf,
}

impl GlobalArgs {
    /// Initializes the tracing subscriber from the verbosity flags.
    ///
    /// `RUST_LOG` wins over `-v` when set.
    pub(crate) fn init_tracing(&self) -> anyhow::Result<()> {
        let default = match self.v {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default));
        tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init().map_err(
            |e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"),
        )?;
        Ok(())
    }

    /// The registry file layout rooted at `--repo-root`.
    pub(crate) fn layout(&self) -> RegistryLayout {
        RegistryLayout::new(self.repo_root.clone())
    }
}
