// crates/dgb-cli/src/commands/mod.rs
//
// Command module declarations for the DGB CLI.

pub mod chain;
pub mod reward;
pub mod schedule;
pub mod status;
pub mod subsidy;
