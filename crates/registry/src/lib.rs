#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod book;
pub use book::{AddressBook, ContractEntry, DuplicateNameError};

mod network;
pub use network::{Network, RegistryLayout, UnknownNetworkError};

mod text;
pub use text::{from_solidity, to_solidity, TextRegistryError};

mod json;
pub use json::{from_json, to_json};

mod resolver;
pub use resolver::{resolve, ResolveError};

mod store;
pub use store::{load_book, lookup, write_book, RegistryStoreError};

mod sdk;
pub use sdk::{build_sdk_bundle, CollateralSet, SdkBundle, SdkConfig, SdkExportError, MULTICALL};
