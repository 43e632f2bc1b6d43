//! Contains subcommands for the govctl CLI.

mod parse;
pub(crate) use parse::ParseCommand;

mod find;
pub(crate) use find::FindCommand;

mod predict;
pub(crate) use predict::PredictCommand;

mod export;
pub(crate) use export::ExportCommand;

mod proposal;
pub(crate) use proposal::ProposalCommand;
