#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod log;
pub use log::{BroadcastLog, BroadcastTx, SpawnedContract, TxKind};

mod parser;
pub use parser::{parse_broadcast, read_broadcast, BroadcastParseError};
