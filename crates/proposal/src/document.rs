//! Proposal document shapes.
//!
//! Governance amounts (bids, discounts, rates) stay decimal strings end to
//! end: several are RAY/WAD magnitudes that overflow `u64`, and the
//! downstream execution scripts read them as strings.

use crate::ProposalKind;
use alloy_primitives::Address;
use govctl_registry::Network;
use serde::{Deserialize, Serialize};

/// A complete proposal document, as persisted under `gov-input/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDocument {
    /// Target network.
    pub network: Network,
    /// Kind tag plus kind-specific parameters.
    #[serde(flatten)]
    pub payload: ProposalPayload,
}

impl ProposalDocument {
    /// Creates a document and computes its derived fields.
    pub fn new(network: Network, mut payload: ProposalPayload) -> Self {
        payload.normalize();
        Self { network, payload }
    }

    /// The document's kind.
    pub const fn kind(&self) -> ProposalKind {
        self.payload.kind()
    }
}

/// Kind-specific proposal parameters, tagged by `proposalType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "proposalType", rename_all = "camelCase")]
pub enum ProposalPayload {
    /// Onboard a new collateral type.
    AddCollateral(AddCollateralParams),
    /// Deploy a batch of price-feed relayers.
    DeployRelayerSet(RelayerSetParams),
    /// Deploy a batch of delayed oracles.
    DeployDelayedOracle(DelayedOracleParams),
    /// Deploy a batch of denominated oracles.
    DeployDenominatedOracle(DenominatedOracleParams),
    /// Transfer protocol-held ERC-20 funds.
    TransferErc20(TransferErc20Params),
    /// Update the vault's block delay.
    UpdateBlockDelay(UpdateBlockDelayParams),
    /// Swap the vault NFT renderer.
    UpdateNftRenderer(UpdateNftRendererParams),
    /// Update the timelock minimum delay.
    UpdateTimeDelay(UpdateTimeDelayParams),
    /// Retune the PID controller gains.
    UpdatePidController(UpdatePidControllerParams),
    /// Generic single-parameter modification.
    UpdateParameter(UpdateParameterParams),
}

impl ProposalPayload {
    /// The payload's kind.
    pub const fn kind(&self) -> ProposalKind {
        match self {
            Self::AddCollateral(_) => ProposalKind::AddCollateral,
            Self::DeployRelayerSet(_) => ProposalKind::DeployRelayerSet,
            Self::DeployDelayedOracle(_) => ProposalKind::DeployDelayedOracle,
            Self::DeployDenominatedOracle(_) => ProposalKind::DeployDenominatedOracle,
            Self::TransferErc20(_) => ProposalKind::TransferErc20,
            Self::UpdateBlockDelay(_) => ProposalKind::UpdateBlockDelay,
            Self::UpdateNftRenderer(_) => ProposalKind::UpdateNftRenderer,
            Self::UpdateTimeDelay(_) => ProposalKind::UpdateTimeDelay,
            Self::UpdatePidController(_) => ProposalKind::UpdatePidController,
            Self::UpdateParameter(_) => ProposalKind::UpdateParameter,
        }
    }

    /// Recomputes derived fields (`arrayLength`) from their source arrays.
    ///
    /// `arrayLength` is never settable on its own; it is overwritten here on
    /// every construction and every patch.
    pub fn normalize(&mut self) {
        match self {
            Self::DeployRelayerSet(p) => p.array_length = p.feeds.len(),
            Self::DeployDelayedOracle(p) => p.array_length = p.sources.len(),
            Self::DeployDenominatedOracle(p) => p.array_length = p.sources.len(),
            _ => {}
        }
    }
}

/// Addresses predicted for one collateral's factory children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedCollateral {
    /// The collateral symbol this prediction belongs to.
    #[serde(rename = "Symbol")]
    pub symbol: String,
    /// The predicted collateral-join child address.
    #[serde(rename = "CollateralJoin")]
    pub collateral_join: Address,
    /// The predicted auction-house child address.
    #[serde(rename = "CollateralAuctionHouse")]
    pub collateral_auction_house: Address,
}

/// Parameters for an add-collateral proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCollateralParams {
    /// The governor contract executing the proposal.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Address,
    /// Settlement contract wired into the new auction house.
    #[serde(rename = "GlobalSettlement")]
    pub global_settlement: Address,
    /// Symbol of the collateral being onboarded.
    #[serde(rename = "NewCollateralType")]
    pub new_collateral_type: String,
    /// Token contract of the collateral being onboarded.
    #[serde(rename = "NewCollateralAddress")]
    pub new_collateral_address: Address,
    /// Minimum auction bid, decimal string.
    #[serde(rename = "MinimumBid")]
    pub minimum_bid: String,
    /// Minimum auction discount, decimal string.
    #[serde(rename = "MinimumDiscount")]
    pub minimum_discount: String,
    /// Maximum auction discount, decimal string.
    #[serde(rename = "MaximumDiscount")]
    pub maximum_discount: String,
    /// Per-second discount update rate, decimal string.
    #[serde(rename = "PerSecondDiscountUpdateRate")]
    pub per_second_discount_update_rate: String,
    /// Predicted factory-child addresses, keyed by collateral symbol.
    #[serde(rename = "Predicted", default, skip_serializing_if = "Vec::is_empty")]
    pub predicted: Vec<PredictedCollateral>,
}

impl AddCollateralParams {
    /// Merges a predicted record for one symbol: replaces that symbol's
    /// record in place if present, appends otherwise. Other records are
    /// never dropped or reordered.
    pub fn merge_predicted(&mut self, entry: PredictedCollateral) {
        if let Some(existing) = self.predicted.iter_mut().find(|p| p.symbol == entry.symbol) {
            *existing = entry;
        } else {
            self.predicted.push(entry);
        }
    }
}

/// One price feed a relayer will be deployed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayerFeed {
    /// The Chainlink aggregator feed.
    #[serde(rename = "ChainlinkFeed")]
    pub feed: Address,
    /// Staleness threshold in seconds.
    #[serde(rename = "StalenessThreshold")]
    pub staleness_threshold: u64,
}

/// Parameters for a relayer-set deployment proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayerSetParams {
    /// The governor contract executing the proposal.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Address,
    /// The factory whose nonce the predictions are derived from.
    #[serde(rename = "ChainlinkRelayerFactory")]
    pub relayer_factory: Address,
    /// One entry per relayer to deploy.
    #[serde(rename = "Feeds")]
    pub feeds: Vec<RelayerFeed>,
    /// Derived: always `Feeds.len()`.
    #[serde(rename = "arrayLength", default)]
    pub array_length: usize,
    /// Predicted relayer addresses, in deployment order.
    #[serde(rename = "PredictedRelayerAddresses", default)]
    pub predicted_relayer_addresses: Vec<Address>,
}

impl RelayerSetParams {
    /// Appends newly predicted addresses after any already present.
    pub fn extend_predicted(&mut self, addrs: impl IntoIterator<Item = Address>) {
        self.predicted_relayer_addresses.extend(addrs);
    }
}

/// One source a delayed oracle wraps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedOracleSource {
    /// The underlying price source.
    #[serde(rename = "PriceSource")]
    pub price_source: Address,
    /// The quote delay in seconds.
    #[serde(rename = "UpdateDelay")]
    pub update_delay: u64,
}

/// Parameters for a delayed-oracle deployment proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedOracleParams {
    /// The governor contract executing the proposal.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Address,
    /// The factory whose nonce the predictions are derived from.
    #[serde(rename = "DelayedOracleFactory")]
    pub delayed_oracle_factory: Address,
    /// One entry per oracle to deploy.
    #[serde(rename = "Sources")]
    pub sources: Vec<DelayedOracleSource>,
    /// Derived: always `Sources.len()`.
    #[serde(rename = "arrayLength", default)]
    pub array_length: usize,
    /// Predicted oracle addresses, in deployment order.
    #[serde(rename = "PredictedDelayedOracleAddresses", default)]
    pub predicted_delayed_oracle_addresses: Vec<Address>,
}

impl DelayedOracleParams {
    /// Appends newly predicted addresses after any already present.
    pub fn extend_predicted(&mut self, addrs: impl IntoIterator<Item = Address>) {
        self.predicted_delayed_oracle_addresses.extend(addrs);
    }
}

/// One base/denomination pair a denominated oracle joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenominatedOracleSource {
    /// The base price source.
    #[serde(rename = "PriceSource")]
    pub price_source: Address,
    /// The denomination price source.
    #[serde(rename = "DenominationPriceSource")]
    pub denomination_price_source: Address,
    /// Whether the denomination is inverted.
    #[serde(rename = "Inverted")]
    pub inverted: bool,
}

/// Parameters for a denominated-oracle deployment proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenominatedOracleParams {
    /// The governor contract executing the proposal.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Address,
    /// The factory whose nonce the predictions are derived from.
    #[serde(rename = "DenominatedOracleFactory")]
    pub denominated_oracle_factory: Address,
    /// One entry per oracle to deploy.
    #[serde(rename = "Sources")]
    pub sources: Vec<DenominatedOracleSource>,
    /// Derived: always `Sources.len()`.
    #[serde(rename = "arrayLength", default)]
    pub array_length: usize,
    /// Predicted oracle addresses, in deployment order.
    #[serde(rename = "PredictedDenominatedOracleAddresses", default)]
    pub predicted_denominated_oracle_addresses: Vec<Address>,
}

impl DenominatedOracleParams {
    /// Appends newly predicted addresses after any already present.
    pub fn extend_predicted(&mut self, addrs: impl IntoIterator<Item = Address>) {
        self.predicted_denominated_oracle_addresses.extend(addrs);
    }
}

/// Parameters for an ERC-20 transfer proposal. Echoed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferErc20Params {
    /// The governor contract executing the proposal.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Address,
    /// The token being transferred.
    #[serde(rename = "Token")]
    pub token: Address,
    /// The transfer recipient.
    #[serde(rename = "Recipient")]
    pub recipient: Address,
    /// Transfer amount, decimal string.
    #[serde(rename = "Amount")]
    pub amount: String,
}

/// Parameters for a block-delay update proposal. Echoed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBlockDelayParams {
    /// The governor contract executing the proposal.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Address,
    /// The vault contract carrying the delay.
    #[serde(rename = "Vault721")]
    pub vault721: Address,
    /// New block delay.
    #[serde(rename = "BlockDelay")]
    pub block_delay: u64,
}

/// Parameters for an NFT-renderer update proposal. Echoed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNftRendererParams {
    /// The governor contract executing the proposal.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Address,
    /// The vault contract being re-pointed.
    #[serde(rename = "Vault721")]
    pub vault721: Address,
    /// The replacement renderer.
    #[serde(rename = "NftRenderer")]
    pub nft_renderer: Address,
}

/// Parameters for a timelock-delay update proposal. Echoed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTimeDelayParams {
    /// The governor contract executing the proposal.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Address,
    /// The timelock controller being updated.
    #[serde(rename = "TimelockController")]
    pub timelock_controller: Address,
    /// New minimum delay in seconds.
    #[serde(rename = "MinDelay")]
    pub min_delay: u64,
}

/// Parameters for a PID-controller retune proposal. Echoed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePidControllerParams {
    /// The governor contract executing the proposal.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Address,
    /// The controller being retuned.
    #[serde(rename = "PIDController")]
    pub pid_controller: Address,
    /// Proportional gain, decimal string.
    #[serde(rename = "ProportionalGain")]
    pub proportional_gain: String,
    /// Integral gain, decimal string.
    #[serde(rename = "IntegralGain")]
    pub integral_gain: String,
    /// Per-second cumulative leak, decimal string.
    #[serde(rename = "PerSecondCumulativeLeak")]
    pub per_second_cumulative_leak: String,
}

/// Parameters for a generic parameter-update proposal. Echoed through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateParameterParams {
    /// The governor contract executing the proposal.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Address,
    /// The contract carrying the parameter.
    #[serde(rename = "Target")]
    pub target: Address,
    /// The parameter name, as the target encodes it.
    #[serde(rename = "Param")]
    pub param: String,
    /// The ABI-encoded replacement value, hex string.
    #[serde(rename = "Data")]
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn governor() -> Address {
        address!("5E669C5D5059Cf9A79F9Af22a4fb64cf1c7570e6")
    }

    fn relayer_set() -> RelayerSetParams {
        RelayerSetParams {
            od_governor: governor(),
            relayer_factory: address!("0000000000000000000000000000000000000aaa"),
            feeds: vec![
                RelayerFeed {
                    feed: address!("0000000000000000000000000000000000000001"),
                    staleness_threshold: 3600,
                },
                RelayerFeed {
                    feed: address!("0000000000000000000000000000000000000002"),
                    staleness_threshold: 86400,
                },
            ],
            array_length: 0,
            predicted_relayer_addresses: Vec::new(),
        }
    }

    #[test]
    fn test_array_length_is_derived() {
        let doc = ProposalDocument::new(
            Network::Sepolia,
            ProposalPayload::DeployRelayerSet(relayer_set()),
        );
        let ProposalPayload::DeployRelayerSet(params) = &doc.payload else { unreachable!() };
        assert_eq!(params.array_length, 2);
    }

    #[test]
    fn test_array_length_cannot_drift() {
        // A stale persisted length is overwritten by normalize.
        let mut payload = ProposalPayload::DeployRelayerSet(RelayerSetParams {
            array_length: 99,
            ..relayer_set()
        });
        payload.normalize();
        let ProposalPayload::DeployRelayerSet(params) = &payload else { unreachable!() };
        assert_eq!(params.array_length, 2);
    }

    #[test]
    fn test_document_tag_and_network_round_trip() {
        let doc = ProposalDocument::new(
            Network::Anvil,
            ProposalPayload::UpdateTimeDelay(UpdateTimeDelayParams {
                od_governor: governor(),
                timelock_controller: address!("0000000000000000000000000000000000000bbb"),
                min_delay: 3600,
            }),
        );
        let encoded = serde_json::to_string_pretty(&doc).unwrap();
        assert!(encoded.contains("\"proposalType\": \"updateTimeDelay\""));
        assert!(encoded.contains("\"network\": \"anvil\""));
        let decoded: ProposalDocument = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let raw = r#"{"network": "sepolia", "proposalType": "mintForFree"}"#;
        assert!(serde_json::from_str::<ProposalDocument>(raw).is_err());
    }

    #[test]
    fn test_merge_predicted_replaces_in_place() {
        let mut params = AddCollateralParams {
            od_governor: governor(),
            global_settlement: address!("0000000000000000000000000000000000000ccc"),
            new_collateral_type: "WSTETH".to_string(),
            new_collateral_address: address!("0000000000000000000000000000000000000ddd"),
            minimum_bid: "100".to_string(),
            minimum_discount: "1000000000000000000".to_string(),
            maximum_discount: "900000000000000000".to_string(),
            per_second_discount_update_rate: "999998607628240588157433861".to_string(),
            predicted: vec![PredictedCollateral {
                symbol: "RETH".to_string(),
                collateral_join: address!("0000000000000000000000000000000000000010"),
                collateral_auction_house: address!("0000000000000000000000000000000000000011"),
            }],
        };

        params.merge_predicted(PredictedCollateral {
            symbol: "WSTETH".to_string(),
            collateral_join: address!("0000000000000000000000000000000000000020"),
            collateral_auction_house: address!("0000000000000000000000000000000000000021"),
        });
        assert_eq!(params.predicted.len(), 2);
        assert_eq!(params.predicted[0].symbol, "RETH");

        // Re-predicting the same symbol replaces its record without moving it.
        params.merge_predicted(PredictedCollateral {
            symbol: "RETH".to_string(),
            collateral_join: address!("0000000000000000000000000000000000000030"),
            collateral_auction_house: address!("0000000000000000000000000000000000000031"),
        });
        assert_eq!(params.predicted.len(), 2);
        assert_eq!(params.predicted[0].symbol, "RETH");
        assert_eq!(
            params.predicted[0].collateral_join,
            address!("0000000000000000000000000000000000000030")
        );
    }

    #[test]
    fn test_extend_predicted_appends() {
        let mut params = relayer_set();
        params.extend_predicted([address!("0000000000000000000000000000000000000100")]);
        params.extend_predicted([address!("0000000000000000000000000000000000000101")]);
        assert_eq!(
            params.predicted_relayer_addresses,
            vec![
                address!("0000000000000000000000000000000000000100"),
                address!("0000000000000000000000000000000000000101"),
            ]
        );
    }
}
