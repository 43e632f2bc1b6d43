#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod kind;
pub use kind::{ProposalKind, UnrecognizedKindError};

mod document;
pub use document::{
    AddCollateralParams, DelayedOracleParams, DelayedOracleSource, DenominatedOracleParams,
    DenominatedOracleSource, PredictedCollateral, ProposalDocument, ProposalPayload, RelayerFeed,
    RelayerSetParams, TransferErc20Params, UpdateBlockDelayParams, UpdateNftRendererParams,
    UpdateParameterParams, UpdatePidControllerParams, UpdateTimeDelayParams,
};

mod patch;
pub use patch::{
    AddCollateralPatch, DelayedOraclePatch, DenominatedOraclePatch, PatchKindMismatch,
    ProposalPatch, RelayerSetPatch, TransferErc20Patch, UpdateBlockDelayPatch,
    UpdateNftRendererPatch, UpdateParameterPatch, UpdatePidControllerPatch, UpdateTimeDelayPatch,
};

mod store;
pub use store::{
    clean_proposal, load_proposal, proposal_path, write_proposal, ProposalFileError,
};
