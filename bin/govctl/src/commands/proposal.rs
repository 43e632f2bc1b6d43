//! Proposal Subcommand

use crate::flags::GlobalArgs;
use alloy_provider::{Provider, ProviderBuilder};
use clap::{Parser, Subcommand};
use govctl_predict::{create_address, create_sequence, deployer_nonce, factory_address, FactoryGetter};
use govctl_proposal::{
    clean_proposal, load_proposal, proposal_path, write_proposal, AddCollateralParams,
    PredictedCollateral, ProposalDocument, ProposalKind, ProposalPatch, ProposalPayload,
};
use govctl_registry::{lookup, Network};
use std::path::PathBuf;
use url::Url;

/// The `proposal` Subcommand
///
/// Manages governance proposal files under `gov-input/<network>/`.
///
/// # Usage
///
/// ```sh
/// govctl proposal <ACTION> [FLAGS] [OPTIONS]
/// ```
#[derive(Parser, PartialEq, Debug, Clone)]
#[command(about = "Creates, updates, and inspects governance proposal files")]
pub(crate) struct ProposalCommand {
    /// The proposal action to run.
    #[command(subcommand)]
    action: ProposalAction,
}

/// Actions on proposal files.
#[derive(Subcommand, PartialEq, Debug, Clone)]
enum ProposalAction {
    /// Scaffolds a new add-collateral proposal with registry-resolved
    /// addresses.
    NewAddCollateral(NewAddCollateralArgs),
    /// Applies a partial JSON update to an existing proposal.
    Update(UpdateArgs),
    /// Fills a proposal's predicted deployment addresses from the chain.
    Predict(ProposalPredictArgs),
    /// Resets a proposal's resolved addresses and predictions.
    Clean(LocateArgs),
    /// Prints a proposal file.
    Show(LocateArgs),
    /// Prints the Foundry script target for a proposal kind.
    Path(PathArgs),
}

/// Flags that locate an existing proposal file.
#[derive(Parser, PartialEq, Eq, Debug, Clone)]
struct LocateArgs {
    /// The network the proposal targets.
    #[arg(long, short)]
    network: Network,
    /// The proposal kind.
    #[arg(long, short)]
    kind: ProposalKind,
    /// Explicit file path, overriding the canonical location.
    #[arg(long)]
    file: Option<PathBuf>,
}

impl LocateArgs {
    fn path(&self, args: &GlobalArgs) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| proposal_path(&args.repo_root, self.network, self.kind))
    }
}

#[derive(Parser, PartialEq, Eq, Debug, Clone)]
struct NewAddCollateralArgs {
    /// The network the proposal targets.
    #[arg(long, short)]
    network: Network,
    /// Symbol of the collateral being onboarded.
    #[arg(long)]
    symbol: String,
    /// Token contract of the collateral being onboarded.
    #[arg(long)]
    token: alloy_primitives::Address,
    /// Minimum auction bid, decimal string.
    #[arg(long)]
    minimum_bid: String,
    /// Minimum auction discount, decimal string.
    #[arg(long)]
    minimum_discount: String,
    /// Maximum auction discount, decimal string.
    #[arg(long)]
    maximum_discount: String,
    /// Per-second discount update rate, decimal string.
    #[arg(long)]
    per_second_discount_update_rate: String,
}

#[derive(Parser, PartialEq, Eq, Debug, Clone)]
struct UpdateArgs {
    /// Where the proposal lives.
    #[command(flatten)]
    locate: LocateArgs,
    /// The partial update, as a JSON object carrying the same
    /// `proposalType` tag as the file.
    #[arg(long)]
    patch: String,
}

#[derive(Parser, PartialEq, Eq, Debug, Clone)]
struct ProposalPredictArgs {
    /// Where the proposal lives.
    #[command(flatten)]
    locate: LocateArgs,
    /// RPC endpoint to read factory nonces from.
    #[arg(long, env = "GOVCTL_RPC_URL")]
    rpc_url: Url,
    /// Parent contract to discover the factory address from via its getter,
    /// instead of the registry or the proposal file.
    #[arg(long)]
    parent: Option<alloy_primitives::Address>,
}

#[derive(Parser, PartialEq, Eq, Debug, Clone)]
struct PathArgs {
    /// The proposal kind.
    #[arg(long, short)]
    kind: ProposalKind,
}

impl ProposalCommand {
    /// Runs the subcommand.
    pub(crate) fn run(self, args: &GlobalArgs) -> anyhow::Result<()> {
        match self.action {
            ProposalAction::NewAddCollateral(new) => new.run(args),
            ProposalAction::Update(update) => update.run(args),
            ProposalAction::Predict(predict) => crate::cli::Cli::block_on(predict.run(args)),
            ProposalAction::Clean(locate) => {
                let path = locate.path(args);
                clean_proposal(&path)?;
                println!("cleaned {}", path.display());
                Ok(())
            }
            ProposalAction::Show(locate) => {
                let doc = load_proposal(&locate.path(args))?;
                println!("{}", serde_json::to_string_pretty(&doc)?);
                Ok(())
            }
            ProposalAction::Path(path) => {
                println!("{}", path.kind.script_path());
                Ok(())
            }
        }
    }
}

impl NewAddCollateralArgs {
    fn run(self, args: &GlobalArgs) -> anyhow::Result<()> {
        let layout = args.layout();
        let od_governor = lookup(&layout, self.network, "ODGovernor")?.address;
        let global_settlement = lookup(&layout, self.network, "GlobalSettlement")?.address;

        let doc = ProposalDocument::new(
            self.network,
            ProposalPayload::AddCollateral(AddCollateralParams {
                od_governor,
                global_settlement,
                new_collateral_type: self.symbol,
                new_collateral_address: self.token,
                minimum_bid: self.minimum_bid,
                minimum_discount: self.minimum_discount,
                maximum_discount: self.maximum_discount,
                per_second_discount_update_rate: self.per_second_discount_update_rate,
                predicted: Vec::new(),
            }),
        );
        let path = proposal_path(&args.repo_root, self.network, doc.kind());
        write_proposal(&path, &doc)?;
        println!("wrote {}", path.display());
        Ok(())
    }
}

impl UpdateArgs {
    fn run(self, args: &GlobalArgs) -> anyhow::Result<()> {
        let path = self.locate.path(args);
        let patch: ProposalPatch = serde_json::from_str(&self.patch)?;
        let mut doc = load_proposal(&path)?;
        doc.apply(patch)?;
        write_proposal(&path, &doc)?;
        println!("updated {}", path.display());
        Ok(())
    }
}

impl ProposalPredictArgs {
    async fn run(self, args: &GlobalArgs) -> anyhow::Result<()> {
        let path = self.locate.path(args);
        let mut doc = load_proposal(&path)?;
        let provider = ProviderBuilder::new().connect_http(self.rpc_url);

        match &mut doc.payload {
            ProposalPayload::AddCollateral(params) => {
                // Each factory deploys its own child, so each factory's
                // nonce governs its child's address.
                let (join_factory, auction_factory) = match self.parent {
                    Some(parent) => (
                        factory_address(&provider, parent, FactoryGetter::CollateralJoin).await?,
                        factory_address(&provider, parent, FactoryGetter::CollateralAuctionHouse)
                            .await?,
                    ),
                    None => {
                        let layout = args.layout();
                        (
                            lookup(&layout, doc.network, "CollateralJoinFactory")?.address,
                            lookup(&layout, doc.network, "CollateralAuctionHouseFactory")?.address,
                        )
                    }
                };
                let entry = PredictedCollateral {
                    symbol: params.new_collateral_type.clone(),
                    collateral_join: create_address(
                        join_factory,
                        deployer_nonce(&provider, join_factory).await?,
                    ),
                    collateral_auction_house: create_address(
                        auction_factory,
                        deployer_nonce(&provider, auction_factory).await?,
                    ),
                };
                params.merge_predicted(entry);
            }
            ProposalPayload::DeployRelayerSet(params) => {
                if let Some(parent) = self.parent {
                    params.relayer_factory =
                        factory_address(&provider, parent, FactoryGetter::ChainlinkRelayer).await?;
                }
                let addrs = predict_batch(&provider, params.relayer_factory, params.feeds.len())
                    .await?;
                params.extend_predicted(addrs);
            }
            ProposalPayload::DeployDelayedOracle(params) => {
                if let Some(parent) = self.parent {
                    params.delayed_oracle_factory =
                        factory_address(&provider, parent, FactoryGetter::DelayedOracle).await?;
                }
                let addrs =
                    predict_batch(&provider, params.delayed_oracle_factory, params.sources.len())
                        .await?;
                params.extend_predicted(addrs);
            }
            ProposalPayload::DeployDenominatedOracle(params) => {
                if let Some(parent) = self.parent {
                    params.denominated_oracle_factory =
                        factory_address(&provider, parent, FactoryGetter::DenominatedOracle)
                            .await?;
                }
                let addrs = predict_batch(
                    &provider,
                    params.denominated_oracle_factory,
                    params.sources.len(),
                )
                .await?;
                params.extend_predicted(addrs);
            }
            other => {
                anyhow::bail!("{} proposals deploy no contracts to predict", other.kind())
            }
        }

        write_proposal(&path, &doc)?;
        println!("predicted addresses written to {}", path.display());
        Ok(())
    }
}

/// Predicts the next `count` factory-child addresses from the factory's
/// current nonce.
async fn predict_batch<P: Provider>(
    provider: &P,
    factory: alloy_primitives::Address,
    count: usize,
) -> anyhow::Result<Vec<alloy_primitives::Address>> {
    let nonce = deployer_nonce(provider, factory).await?;
    Ok(create_sequence(factory, nonce, u32::try_from(count)?))
}
