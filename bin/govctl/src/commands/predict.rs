//! Predict Subcommand

use crate::flags::GlobalArgs;
use alloy_primitives::Address;
use alloy_provider::ProviderBuilder;
use clap::Parser;
use govctl_predict::{create_sequence, deployer_nonce};
use url::Url;

/// The `predict` Subcommand
///
/// Derives the addresses the next `count` `CREATE` transactions from a
/// deployer will produce. The starting nonce is read from the chain unless
/// overridden, in which case no RPC endpoint is needed.
///
/// # Usage
///
/// ```sh
/// govctl predict --deployer 0x... --count 3 [--rpc-url URL | --start-nonce N]
/// ```
#[derive(Parser, PartialEq, Eq, Debug, Clone)]
#[command(about = "Predicts the addresses a deployer will create next")]
pub(crate) struct PredictCommand {
    /// RPC endpoint to read the deployer's pending nonce from.
    #[arg(long, env = "GOVCTL_RPC_URL", required_unless_present = "start_nonce")]
    rpc_url: Option<Url>,
    /// The account performing the deployments.
    #[arg(long, short)]
    deployer: Address,
    /// How many consecutive deployments to predict.
    #[arg(long, short, default_value_t = 1)]
    count: u32,
    /// Nonce to start from, skipping the RPC read.
    #[arg(long)]
    start_nonce: Option<u64>,
}

impl PredictCommand {
    /// Runs the subcommand.
    pub(crate) async fn run(self, _args: &GlobalArgs) -> anyhow::Result<()> {
        let nonce = match self.start_nonce {
            Some(nonce) => nonce,
            None => {
                // required_unless_present guarantees the URL is set here.
                let url = self
                    .rpc_url
                    .ok_or_else(|| anyhow::anyhow!("either --rpc-url or --start-nonce is required"))?;
                let provider = ProviderBuilder::new().connect_http(url);
                deployer_nonce(&provider, self.deployer).await?
            }
        };

        for (offset, address) in create_sequence(self.deployer, nonce, self.count).iter().enumerate()
        {
            println!("nonce {}: {}", nonce + offset as u64, address.to_checksum(None));
        }
        Ok(())
    }
}
