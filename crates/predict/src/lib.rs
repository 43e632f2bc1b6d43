#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod create;
pub use create::{create_address, create_sequence};

mod chain;
pub use chain::{deployer_nonce, factory_address, FactoryGetter, PredictError};
