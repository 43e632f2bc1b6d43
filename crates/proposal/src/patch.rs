//! Partial updates to persisted proposal documents.
//!
//! Every patch field is an [`Option`]; `None` keeps the document's current
//! value, so an empty patch object is a no-op. Derived fields are recomputed
//! after the patch lands.

use crate::{
    document::{
        AddCollateralParams, DelayedOracleParams, DelayedOracleSource, DenominatedOracleParams,
        DenominatedOracleSource, PredictedCollateral, ProposalDocument, ProposalPayload,
        RelayerFeed, RelayerSetParams, TransferErc20Params, UpdateBlockDelayParams,
        UpdateNftRendererParams, UpdateParameterParams, UpdatePidControllerParams,
        UpdateTimeDelayParams,
    },
    ProposalKind,
};
use alloy_primitives::Address;
use serde::Deserialize;

/// Applies each `Some` patch field to the matching document field.
macro_rules! apply_fields {
    ($params:expr, $patch:expr, [$($field:ident),+ $(,)?]) => {
        $(
            if let Some(value) = $patch.$field {
                $params.$field = value;
            }
        )+
    };
}

/// A kind-tagged partial document, parsed from user-supplied JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "proposalType", rename_all = "camelCase")]
pub enum ProposalPatch {
    /// Partial [`AddCollateralParams`].
    AddCollateral(AddCollateralPatch),
    /// Partial [`RelayerSetParams`].
    DeployRelayerSet(RelayerSetPatch),
    /// Partial [`DelayedOracleParams`].
    DeployDelayedOracle(DelayedOraclePatch),
    /// Partial [`DenominatedOracleParams`].
    DeployDenominatedOracle(DenominatedOraclePatch),
    /// Partial [`TransferErc20Params`].
    TransferErc20(TransferErc20Patch),
    /// Partial [`UpdateBlockDelayParams`].
    UpdateBlockDelay(UpdateBlockDelayPatch),
    /// Partial [`UpdateNftRendererParams`].
    UpdateNftRenderer(UpdateNftRendererPatch),
    /// Partial [`UpdateTimeDelayParams`].
    UpdateTimeDelay(UpdateTimeDelayPatch),
    /// Partial [`UpdatePidControllerParams`].
    UpdatePidController(UpdatePidControllerPatch),
    /// Partial [`UpdateParameterParams`].
    UpdateParameter(UpdateParameterPatch),
}

impl ProposalPatch {
    /// The patch's kind.
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
}

/// A patch whose kind tag does not match the document it was applied to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("patch kind {patch} does not match document kind {document}")]
pub struct PatchKindMismatch {
    /// The document's kind.
    pub document: ProposalKind,
    /// The patch's kind.
    pub patch: ProposalKind,
}

impl ProposalDocument {
    /// Applies a partial update, then recomputes derived fields.
    ///
    /// The patch must carry the same `proposalType` tag as the document; a
    /// mismatch leaves the document untouched.
    pub fn apply(&mut self, patch: ProposalPatch) -> Result<(), PatchKindMismatch> {
        match (&mut self.payload, patch) {
            (ProposalPayload::AddCollateral(params), ProposalPatch::AddCollateral(patch)) => {
                apply_fields!(params, patch, [
                    od_governor,
                    global_settlement,
                    new_collateral_type,
                    new_collateral_address,
                    minimum_bid,
                    minimum_discount,
                    maximum_discount,
                    per_second_discount_update_rate,
                    predicted,
                ]);
            }
            (ProposalPayload::DeployRelayerSet(params), ProposalPatch::DeployRelayerSet(patch)) => {
                apply_fields!(params, patch, [
                    od_governor,
                    relayer_factory,
                    feeds,
                    predicted_relayer_addresses,
                ]);
            }
            (
                ProposalPayload::DeployDelayedOracle(params),
                ProposalPatch::DeployDelayedOracle(patch),
            ) => {
                apply_fields!(params, patch, [
                    od_governor,
                    delayed_oracle_factory,
                    sources,
                    predicted_delayed_oracle_addresses,
                ]);
            }
            (
                ProposalPayload::DeployDenominatedOracle(params),
                ProposalPatch::DeployDenominatedOracle(patch),
            ) => {
                apply_fields!(params, patch, [
                    od_governor,
                    denominated_oracle_factory,
                    sources,
                    predicted_denominated_oracle_addresses,
                ]);
            }
            (ProposalPayload::TransferErc20(params), ProposalPatch::TransferErc20(patch)) => {
                apply_fields!(params, patch, [od_governor, token, recipient, amount]);
            }
            (ProposalPayload::UpdateBlockDelay(params), ProposalPatch::UpdateBlockDelay(patch)) => {
                apply_fields!(params, patch, [od_governor, vault721, block_delay]);
            }
            (
                ProposalPayload::UpdateNftRenderer(params),
                ProposalPatch::UpdateNftRenderer(patch),
            ) => {
                apply_fields!(params, patch, [od_governor, vault721, nft_renderer]);
            }
            (ProposalPayload::UpdateTimeDelay(params), ProposalPatch::UpdateTimeDelay(patch)) => {
                apply_fields!(params, patch, [od_governor, timelock_controller, min_delay]);
            }
            (
                ProposalPayload::UpdatePidController(params),
                ProposalPatch::UpdatePidController(patch),
            ) => {
                apply_fields!(params, patch, [
                    od_governor,
                    pid_controller,
                    proportional_gain,
                    integral_gain,
                    per_second_cumulative_leak,
                ]);
            }
            (ProposalPayload::UpdateParameter(params), ProposalPatch::UpdateParameter(patch)) => {
                apply_fields!(params, patch, [od_governor, target, param, data]);
            }
            (payload, patch) => {
                return Err(PatchKindMismatch { document: payload.kind(), patch: patch.kind() });
            }
        }
        self.payload.normalize();
        Ok(())
    }
}

/// Partial [`AddCollateralParams`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddCollateralPatch {
    /// Replacement governor.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Option<Address>,
    /// Replacement settlement contract.
    #[serde(rename = "GlobalSettlement")]
    pub global_settlement: Option<Address>,
    /// Replacement collateral symbol.
    #[serde(rename = "NewCollateralType")]
    pub new_collateral_type: Option<String>,
    /// Replacement collateral token.
    #[serde(rename = "NewCollateralAddress")]
    pub new_collateral_address: Option<Address>,
    /// Replacement minimum bid.
    #[serde(rename = "MinimumBid")]
    pub minimum_bid: Option<String>,
    /// Replacement minimum discount.
    #[serde(rename = "MinimumDiscount")]
    pub minimum_discount: Option<String>,
    /// Replacement maximum discount.
    #[serde(rename = "MaximumDiscount")]
    pub maximum_discount: Option<String>,
    /// Replacement discount update rate.
    #[serde(rename = "PerSecondDiscountUpdateRate")]
    pub per_second_discount_update_rate: Option<String>,
    /// Full replacement of the predicted records.
    #[serde(rename = "Predicted")]
    pub predicted: Option<Vec<PredictedCollateral>>,
}

/// Partial [`RelayerSetParams`]. `arrayLength` is not patchable; it is
/// recomputed from `Feeds`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RelayerSetPatch {
    /// Replacement governor.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Option<Address>,
    /// Replacement factory.
    #[serde(rename = "ChainlinkRelayerFactory")]
    pub relayer_factory: Option<Address>,
    /// Full replacement of the feed list.
    #[serde(rename = "Feeds")]
    pub feeds: Option<Vec<RelayerFeed>>,
    /// Full replacement of the predicted addresses.
    #[serde(rename = "PredictedRelayerAddresses")]
    pub predicted_relayer_addresses: Option<Vec<Address>>,
}

/// Partial [`DelayedOracleParams`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DelayedOraclePatch {
    /// Replacement governor.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Option<Address>,
    /// Replacement factory.
    #[serde(rename = "DelayedOracleFactory")]
    pub delayed_oracle_factory: Option<Address>,
    /// Full replacement of the source list.
    #[serde(rename = "Sources")]
    pub sources: Option<Vec<DelayedOracleSource>>,
    /// Full replacement of the predicted addresses.
    #[serde(rename = "PredictedDelayedOracleAddresses")]
    pub predicted_delayed_oracle_addresses: Option<Vec<Address>>,
}

/// Partial [`DenominatedOracleParams`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DenominatedOraclePatch {
    /// Replacement governor.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Option<Address>,
    /// Replacement factory.
    #[serde(rename = "DenominatedOracleFactory")]
    pub denominated_oracle_factory: Option<Address>,
    /// Full replacement of the source list.
    #[serde(rename = "Sources")]
    pub sources: Option<Vec<DenominatedOracleSource>>,
    /// Full replacement of the predicted addresses.
    #[serde(rename = "PredictedDenominatedOracleAddresses")]
    pub predicted_denominated_oracle_addresses: Option<Vec<Address>>,
}

/// Partial [`TransferErc20Params`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransferErc20Patch {
    /// Replacement governor.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Option<Address>,
    /// Replacement token.
    #[serde(rename = "Token")]
    pub token: Option<Address>,
    /// Replacement recipient.
    #[serde(rename = "Recipient")]
    pub recipient: Option<Address>,
    /// Replacement amount.
    #[serde(rename = "Amount")]
    pub amount: Option<String>,
}

/// Partial [`UpdateBlockDelayParams`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateBlockDelayPatch {
    /// Replacement governor.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Option<Address>,
    /// Replacement vault.
    #[serde(rename = "Vault721")]
    pub vault721: Option<Address>,
    /// Replacement block delay.
    #[serde(rename = "BlockDelay")]
    pub block_delay: Option<u64>,
}

/// Partial [`UpdateNftRendererParams`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateNftRendererPatch {
    /// Replacement governor.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Option<Address>,
    /// Replacement vault.
    #[serde(rename = "Vault721")]
    pub vault721: Option<Address>,
    /// Replacement renderer.
    #[serde(rename = "NftRenderer")]
    pub nft_renderer: Option<Address>,
}

/// Partial [`UpdateTimeDelayParams`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTimeDelayPatch {
    /// Replacement governor.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Option<Address>,
    /// Replacement timelock controller.
    #[serde(rename = "TimelockController")]
    pub timelock_controller: Option<Address>,
    /// Replacement minimum delay.
    #[serde(rename = "MinDelay")]
    pub min_delay: Option<u64>,
}

/// Partial [`UpdatePidControllerParams`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdatePidControllerPatch {
    /// Replacement governor.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Option<Address>,
    /// Replacement controller.
    #[serde(rename = "PIDController")]
    pub pid_controller: Option<Address>,
    /// Replacement proportional gain.
    #[serde(rename = "ProportionalGain")]
    pub proportional_gain: Option<String>,
    /// Replacement integral gain.
    #[serde(rename = "IntegralGain")]
    pub integral_gain: Option<String>,
    /// Replacement cumulative leak.
    #[serde(rename = "PerSecondCumulativeLeak")]
    pub per_second_cumulative_leak: Option<String>,
}

/// Partial [`UpdateParameterParams`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateParameterPatch {
    /// Replacement governor.
    #[serde(rename = "ODGovernor")]
    pub od_governor: Option<Address>,
    /// Replacement target.
    #[serde(rename = "Target")]
    pub target: Option<Address>,
    /// Replacement parameter name.
    #[serde(rename = "Param")]
    pub param: Option<String>,
    /// Replacement encoded value.
    #[serde(rename = "Data")]
    pub data: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use govctl_registry::Network;
    use alloy_primitives::address;

    fn transfer_doc() -> ProposalDocument {
        ProposalDocument::new(
            Network::Sepolia,
            ProposalPayload::TransferErc20(TransferErc20Params {
                od_governor: address!("5E669C5D5059Cf9A79F9Af22a4fb64cf1c7570e6"),
                token: address!("0000000000000000000000000000000000000001"),
                recipient: address!("0000000000000000000000000000000000000002"),
                amount: "1000000000000000000".to_string(),
            }),
        )
    }

    #[test]
    fn test_single_field_patch() {
        let mut doc = transfer_doc();
        let before = doc.clone();
        let patch: ProposalPatch = serde_json::from_str(
            r#"{"proposalType": "transferErc20", "Amount": "42"}"#,
        )
        .unwrap();
        doc.apply(patch).unwrap();
        let ProposalPayload::TransferErc20(params) = &doc.payload else { unreachable!() };
        let ProposalPayload::TransferErc20(original) = &before.payload else { unreachable!() };
        assert_eq!(params.amount, "42");
        assert_eq!(params.token, original.token);
        assert_eq!(params.recipient, original.recipient);
        assert_eq!(params.od_governor, original.od_governor);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut doc = transfer_doc();
        let before = doc.clone();
        let patch: ProposalPatch =
            serde_json::from_str(r#"{"proposalType": "transferErc20"}"#).unwrap();
        doc.apply(patch).unwrap();
        assert_eq!(doc, before);
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let mut doc = transfer_doc();
        let before = doc.clone();
        let patch: ProposalPatch = serde_json::from_str(
            r#"{"proposalType": "updateBlockDelay", "BlockDelay": 5}"#,
        )
        .unwrap();
        let err = doc.apply(patch).unwrap_err();
        assert_eq!(err.document, ProposalKind::TransferErc20);
        assert_eq!(err.patch, ProposalKind::UpdateBlockDelay);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_feed_patch_recomputes_array_length() {
        let mut doc = ProposalDocument::new(
            Network::Anvil,
            ProposalPayload::DeployRelayerSet(RelayerSetParams {
                od_governor: address!("5E669C5D5059Cf9A79F9Af22a4fb64cf1c7570e6"),
                relayer_factory: address!("0000000000000000000000000000000000000aaa"),
                feeds: vec![RelayerFeed {
                    feed: address!("0000000000000000000000000000000000000001"),
                    staleness_threshold: 3600,
                }],
                array_length: 0,
                predicted_relayer_addresses: Vec::new(),
            }),
        );
        let patch: ProposalPatch = serde_json::from_str(
            r#"{
                "proposalType": "deployRelayerSet",
                "Feeds": [
                    {"ChainlinkFeed": "0x0000000000000000000000000000000000000001", "StalenessThreshold": 3600},
                    {"ChainlinkFeed": "0x0000000000000000000000000000000000000002", "StalenessThreshold": 3600},
                    {"ChainlinkFeed": "0x0000000000000000000000000000000000000003", "StalenessThreshold": 3600}
                ]
            }"#,
        )
        .unwrap();
        doc.apply(patch).unwrap();
        let ProposalPayload::DeployRelayerSet(params) = &doc.payload else { unreachable!() };
        assert_eq!(params.array_length, 3);
    }
}
