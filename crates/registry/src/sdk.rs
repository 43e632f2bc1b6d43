//! SDK export bundle.
//!
//! Downstream SDK consumers read addresses grouped by protocol role
//! (`GEB_*`, `PROXY_*`, `JOB_*` keys) and by collateral symbol with nested
//! join/auction-house sub-addresses, rather than by deployment name. This
//! module regroups a registry book into that shape and validates it before it
//! is handed off.

use crate::AddressBook;
use alloy_primitives::{address, Address};
use derive_more::Constructor;
use serde::{
    ser::{SerializeMap, SerializeStruct},
    Serialize, Serializer,
};
use thiserror::Error;

/// The canonical Multicall3 deployment, identical on every supported network.
pub const MULTICALL: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

/// Protocol-role key → canonical registry name.
///
/// `PROXY_FACTORY` and `PROXY_REGISTRY` both point at `Vault721`, which serves
/// as both on-chain.
const ROLE_KEYS: &[(&str, &str)] = &[
    ("GEB_SYSTEM_COIN", "SystemCoin"),
    ("GEB_PROTOCOL_TOKEN", "ProtocolToken"),
    ("GEB_SAFE_ENGINE", "SAFEEngine"),
    ("GEB_ORACLE_RELAYER", "OracleRelayer"),
    ("GEB_SURPLUS_AUCTION_HOUSE", "SurplusAuctionHouse"),
    ("GEB_DEBT_AUCTION_HOUSE", "DebtAuctionHouse"),
    ("GEB_COLLATERAL_AUCTION_HOUSE_FACTORY", "CollateralAuctionHouseFactory"),
    ("GEB_ACCOUNTING_ENGINE", "AccountingEngine"),
    ("GEB_LIQUIDATION_ENGINE", "LiquidationEngine"),
    ("GEB_COIN_JOIN", "CoinJoin"),
    ("GEB_COLLATERAL_JOIN_FACTORY", "CollateralJoinFactory"),
    ("GEB_TAX_COLLECTOR", "TaxCollector"),
    ("GEB_STABILITY_FEE_TREASURY", "StabilityFeeTreasury"),
    ("GEB_GLOBAL_SETTLEMENT", "GlobalSettlement"),
    ("GEB_POST_SETTLEMENT_SURPLUS_AUCTION_HOUSE", "PostSettlementSurplusAuctionHouse"),
    ("GEB_POST_SETTLEMENT_SURPLUS_AUCTIONEER", "SettlementSurplusAuctioneer"),
    ("GEB_RRFM_SETTER", "PIDRateSetter"),
    ("GEB_RRFM_CALCULATOR", "PIDController"),
    ("SAFE_MANAGER", "ODSafeManager"),
    ("PROXY_FACTORY", "Vault721"),
    ("PROXY_REGISTRY", "Vault721"),
    ("PROXY_BASIC_ACTIONS", "BasicActions"),
    ("PROXY_DEBT_AUCTION_ACTIONS", "DebtBidActions"),
    ("PROXY_SURPLUS_AUCTION_ACTIONS", "SurplusBidActions"),
    ("PROXY_COLLATERAL_AUCTION_ACTIONS", "CollateralBidActions"),
    ("PROXY_POST_SETTLEMENT_SURPLUS_AUCTION_ACTIONS", "PostSettlementSurplusBidActions"),
    ("PROXY_GLOBAL_SETTLEMENT_ACTIONS", "GlobalSettlementActions"),
    ("PROXY_REWARDED_ACTIONS", "RewardedActions"),
    ("JOB_ACCOUNTING", "AccountingJob"),
    ("JOB_LIQUIDATION", "LiquidationJob"),
    ("JOB_ORACLES", "OracleJob"),
];

/// Registry name prefixes that may hold a collateral's token contract.
const TOKEN_PREFIXES: &[&str] = &["MintableERC20_", "MintableVoteERC20_", "Erc20ForTestnet"];

/// Inputs the export cannot derive from the registry itself.
#[derive(Debug, Clone, Constructor, PartialEq, Eq)]
pub struct SdkConfig {
    /// The network's canonical wrapped-ether token address. Must be verified
    /// against live network state whenever it changes.
    pub eth_address: Address,
}

/// Per-collateral address record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollateralSet {
    /// The collateral token contract.
    pub address: String,
    /// The collateral's join child, if the collateral is auctionable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collateral_join: Option<String>,
    /// The collateral's auction-house child, if the collateral is auctionable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collateral_auction_house: Option<String>,
}

/// The validated export bundle: role-keyed addresses plus per-symbol
/// collateral records, both in deterministic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkBundle {
    /// `ROLE_KEY → checksummed address`, in role-table order.
    pub addresses: Vec<(String, String)>,
    /// `SYMBOL → collateral record`, registry scan order.
    pub collateral: Vec<(String, CollateralSet)>,
}

/// Raised when the registry is missing values the SDK requires.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("missing values: {}", missing.join(", "))]
pub struct SdkExportError {
    /// Every missing key, reported in one diagnostic.
    pub missing: Vec<String>,
}

struct OrderedPairs<'a, T>(&'a [(String, T)]);

impl<T: Serialize> Serialize for OrderedPairs<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for SdkBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("SdkBundle", 2)?;
        out.serialize_field("addresses", &OrderedPairs(&self.addresses))?;
        out.serialize_field("collateral", &OrderedPairs(&self.collateral))?;
        out.end()
    }
}

/// Builds the SDK bundle from a registry book.
///
/// Fails with every missing role key and collateral field collected into a
/// single [`SdkExportError`], so one corrected re-run suffices.
pub fn build_sdk_bundle(
    book: &AddressBook,
    config: &SdkConfig,
) -> Result<SdkBundle, SdkExportError> {
    let mut missing = Vec::new();

    let mut addresses = Vec::with_capacity(ROLE_KEYS.len() + 2);
    addresses.push(("MULTICALL".to_string(), MULTICALL.to_checksum(None)));
    addresses.push(("ETH".to_string(), config.eth_address.to_checksum(None)));
    for (role, name) in ROLE_KEYS {
        match book.get(name) {
            Some(addr) => addresses.push(((*role).to_string(), addr.to_checksum(None))),
            None => missing.push((*role).to_string()),
        }
    }

    let collateral = collect_collateral(book, config, &mut missing);

    if !missing.is_empty() {
        return Err(SdkExportError { missing });
    }
    Ok(SdkBundle { addresses, collateral })
}

/// Scans the book for `*Child_<SYM>` factory children and assembles one
/// [`CollateralSet`] per symbol. The system coin and protocol token lead the
/// map as plain (non-auctionable) records.
fn collect_collateral(
    book: &AddressBook,
    config: &SdkConfig,
    missing: &mut Vec<String>,
) -> Vec<(String, CollateralSet)> {
    let mut out = Vec::new();
    for (symbol, name) in [("OD", "SystemCoin"), ("ODG", "ProtocolToken")] {
        match book.get(name) {
            Some(addr) => out.push((
                symbol.to_string(),
                CollateralSet {
                    address: addr.to_checksum(None),
                    collateral_join: None,
                    collateral_auction_house: None,
                },
            )),
            None => missing.push(format!("collateral.{symbol}.address")),
        }
    }

    for entry in book.iter() {
        let Some(symbol) = join_child_symbol(&entry.name) else { continue };
        let token = collateral_token(book, config, symbol);
        let auction_house =
            book.get(&format!("CollateralAuctionHouseChild_{symbol}")).map(|a| a.to_checksum(None));
        if token.is_none() {
            missing.push(format!("collateral.{symbol}.address"));
        }
        if auction_house.is_none() {
            missing.push(format!("collateral.{symbol}.collateralAuctionHouse"));
        }
        out.push((
            symbol.to_string(),
            CollateralSet {
                address: token.unwrap_or_default(),
                collateral_join: Some(entry.address.to_checksum(None)),
                collateral_auction_house: auction_house,
            },
        ));
    }
    out
}

/// Extracts the collateral symbol from a `CollateralJoin*Child_<SYM>` key.
fn join_child_symbol(name: &str) -> Option<&str> {
    if !name.starts_with("CollateralJoin") {
        return None;
    }
    name.split_once("Child_").map(|(_, symbol)| symbol)
}

/// Finds the token contract backing a collateral symbol. Wrapped ether has no
/// registry entry; its address comes from the config.
fn collateral_token(book: &AddressBook, config: &SdkConfig, symbol: &str) -> Option<String> {
    if symbol == "WETH" {
        return Some(config.eth_address.to_checksum(None));
    }
    TOKEN_PREFIXES
        .iter()
        .find_map(|prefix| book.get(&format!("{prefix}{symbol}")))
        .map(|a| a.to_checksum(None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn full_book() -> AddressBook {
        let mut book = AddressBook::new();
        let mut next = 0u16;
        let mut push = |book: &mut AddressBook, name: &str| {
            next += 1;
            let mut bytes = [0u8; 20];
            bytes[18..].copy_from_slice(&next.to_be_bytes());
            book.insert(name, Address::from(bytes)).unwrap();
        };
        for (_, name) in ROLE_KEYS {
            if !book.contains(name) {
                push(&mut book, name);
            }
        }
        push(&mut book, "CollateralJoinChild_WETH");
        push(&mut book, "CollateralAuctionHouseChild_WETH");
        push(&mut book, "MintableERC20_WBTC");
        push(&mut book, "CollateralJoinChild_WBTC");
        push(&mut book, "CollateralAuctionHouseChild_WBTC");
        book
    }

    fn config() -> SdkConfig {
        SdkConfig::new(address!("Ee01c0CD76354C383B8c7B4e65EA88D00B06f36f"))
    }

    #[test]
    fn test_bundle_contains_constants_and_roles() {
        let bundle = build_sdk_bundle(&full_book(), &config()).unwrap();
        assert_eq!(bundle.addresses[0].0, "MULTICALL");
        assert_eq!(bundle.addresses[0].1, MULTICALL.to_checksum(None));
        assert_eq!(bundle.addresses[1].0, "ETH");
        assert!(bundle.addresses.iter().any(|(k, _)| k == "GEB_SAFE_ENGINE"));
        assert!(bundle.addresses.iter().any(|(k, _)| k == "JOB_ORACLES"));
    }

    #[test]
    fn test_collateral_records() {
        let bundle = build_sdk_bundle(&full_book(), &config()).unwrap();
        let symbols: Vec<_> = bundle.collateral.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(symbols, ["OD", "ODG", "WETH", "WBTC"]);

        let (_, weth) = &bundle.collateral[2];
        assert_eq!(weth.address, config().eth_address.to_checksum(None));
        assert!(weth.collateral_join.is_some());
        assert!(weth.collateral_auction_house.is_some());
    }

    #[test]
    fn test_missing_values_are_all_reported() {
        let mut book = full_book();
        // Rebuild without two role contracts.
        let mut pruned = AddressBook::new();
        for entry in book.iter() {
            if entry.name != "TaxCollector" && entry.name != "OracleJob" {
                pruned.insert(entry.name.clone(), entry.address).unwrap();
            }
        }
        book = pruned;

        let err = build_sdk_bundle(&book, &config()).unwrap_err();
        assert!(err.missing.contains(&"GEB_TAX_COLLECTOR".to_string()));
        assert!(err.missing.contains(&"JOB_ORACLES".to_string()));
        assert_eq!(err.missing.len(), 2);
    }

    #[test]
    fn test_serialized_shape() {
        let bundle = build_sdk_bundle(&full_book(), &config()).unwrap();
        let value: serde_json::Value = serde_json::from_str(
            &serde_json::to_string(&bundle).unwrap(),
        )
        .unwrap();
        assert!(value["addresses"]["MULTICALL"].is_string());
        assert!(value["collateral"]["WBTC"]["collateralJoin"].is_string());
        // Plain records omit join/auction-house fields entirely.
        assert!(value["collateral"]["OD"].get("collateralJoin").is_none());
    }
}
