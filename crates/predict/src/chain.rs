//! Live reads feeding prediction: deployer nonce and factory discovery.
//!
//! There is no retry anywhere here; a failed round trip aborts the run and is
//! surfaced to the operator.

use alloy_primitives::{Address, TxKind};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{TransactionInput, TransactionRequest};
use alloy_sol_types::{sol, SolCall};
use thiserror::Error;
use tracing::debug;

sol! {
    function chainlinkRelayerFactory() external view returns (address);
    function delayedOracleFactory() external view returns (address);
    function denominatedOracleFactory() external view returns (address);
    function collateralJoinFactory() external view returns (address);
    function collateralAuctionHouseFactory() external view returns (address);
}

/// Errors raised by the chain reads.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The RPC endpoint was unreachable or returned an error.
    #[error("chain read failed: {0}")]
    Rpc(#[from] alloy_transport::TransportError),
    /// The factory getter returned data that does not decode to an address.
    #[error("failed to decode factory getter return data: {0}")]
    AbiDecode(#[from] alloy_sol_types::Error),
}

/// The factory getters a parent contract exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryGetter {
    /// `chainlinkRelayerFactory()`
    ChainlinkRelayer,
    /// `delayedOracleFactory()`
    DelayedOracle,
    /// `denominatedOracleFactory()`
    DenominatedOracle,
    /// `collateralJoinFactory()`
    CollateralJoin,
    /// `collateralAuctionHouseFactory()`
    CollateralAuctionHouse,
}

impl FactoryGetter {
    fn calldata(&self) -> Vec<u8> {
        match self {
            Self::ChainlinkRelayer => chainlinkRelayerFactoryCall {}.abi_encode(),
            Self::DelayedOracle => delayedOracleFactoryCall {}.abi_encode(),
            Self::DenominatedOracle => denominatedOracleFactoryCall {}.abi_encode(),
            Self::CollateralJoin => collateralJoinFactoryCall {}.abi_encode(),
            Self::CollateralAuctionHouse => collateralAuctionHouseFactoryCall {}.abi_encode(),
        }
    }

    fn decode(&self, data: &[u8]) -> Result<Address, alloy_sol_types::Error> {
        match self {
            Self::ChainlinkRelayer => chainlinkRelayerFactoryCall::abi_decode_returns(data),
            Self::DelayedOracle => delayedOracleFactoryCall::abi_decode_returns(data),
            Self::DenominatedOracle => denominatedOracleFactoryCall::abi_decode_returns(data),
            Self::CollateralJoin => collateralJoinFactoryCall::abi_decode_returns(data),
            Self::CollateralAuctionHouse => {
                collateralAuctionHouseFactoryCall::abi_decode_returns(data)
            }
        }
    }
}

/// Reads the deployer's current transaction count (pending tag), the nonce
/// its next `CREATE` will consume.
///
/// Predictions derived from this value hold only while no other transaction
/// from `deployer` lands first.
pub async fn deployer_nonce<P: Provider>(
    provider: &P,
    deployer: Address,
) -> Result<u64, PredictError> {
    let nonce = provider.get_transaction_count(deployer).pending().await?;
    debug!(target: "predict", %deployer, nonce, "deployer nonce read");
    Ok(nonce)
}

/// Discovers a factory's address by calling its getter on a parent contract.
pub async fn factory_address<P: Provider>(
    provider: &P,
    parent: Address,
    getter: FactoryGetter,
) -> Result<Address, PredictError> {
    let tx = TransactionRequest {
        to: Some(TxKind::Call(parent)),
        input: TransactionInput::new(getter.calldata().into()),
        ..Default::default()
    };
    let raw = provider.call(tx).await?;
    let factory = getter.decode(&raw)?;
    debug!(target: "predict", %parent, ?getter, %factory, "factory discovered");
    Ok(factory)
}
