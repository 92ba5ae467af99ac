//! Subcommand implementations

pub mod describe;
pub mod get;
pub mod project;
pub mod use_cmd;
